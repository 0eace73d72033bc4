use tracing::debug;

use super::board::{Board, Cell, Pos, Representation};
use super::history::History;
use super::notation::Command;
use super::player::Player;
use crate::error::GameError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Outcome {
    InProgress,
    BlackWin,
    WhiteWin,
    Draw,
}

impl Outcome {
    pub fn is_terminal(self) -> bool {
        self != Outcome::InProgress
    }

    /// Closing line shown when the game ends.
    pub fn message(self) -> Option<&'static str> {
        match self {
            Outcome::InProgress => None,
            Outcome::BlackWin => Some("Black wins."),
            Outcome::WhiteWin => Some("White wins."),
            Outcome::Draw => Some("It is a draw."),
        }
    }
}

/// Run directions as (row step, col step). Together they cover every
/// vertical, horizontal and diagonal line once.
const NORTH: (isize, isize) = (-1, 0);
const NORTH_WEST: (isize, isize) = (-1, -1);
const NORTH_EAST: (isize, isize) = (-1, 1);
const EAST: (isize, isize) = (0, 1);

/// The holes left by an offset.
#[derive(Debug, Clone, Copy)]
enum Gap {
    /// The two removed pieces sat in different columns.
    Apart(Pos, Pos),
    /// Both removed pieces came from `col`; `top` is the smaller row.
    Stacked { col: usize, top: usize, bottom: usize },
}

impl Gap {
    fn new(a: Pos, b: Pos) -> Self {
        if a.col != b.col {
            Gap::Apart(a, b)
        } else {
            Gap::Stacked {
                col: a.col,
                top: a.row.min(b.row),
                bottom: a.row.max(b.row),
            }
        }
    }

    /// Let the pieces above the hole(s) fall into them.
    fn settle(self, board: &mut Board) -> Result<(), GameError> {
        match self {
            Gap::Apart(a, b) => {
                settle_above(board, a)?;
                settle_above(board, b)
            }
            Gap::Stacked { col, top, bottom } => {
                for row in (0..bottom).rev() {
                    if row == top {
                        continue;
                    }
                    let from = Pos::new(row, col);
                    let cell = board.get(from)?;
                    if cell == Cell::Empty {
                        break;
                    }
                    let fall = if row > top { 1 } else { 2 };
                    board.set(Pos::new(row + fall, col), cell)?;
                    board.set(from, Cell::Empty)?;
                }
                Ok(())
            }
        }
    }

    /// Where a surviving piece ends up once the hole(s) are closed.
    fn shift(self, pos: Pos) -> Pos {
        let fall = match self {
            Gap::Apart(a, b) => {
                let below = |hole: Pos| pos.col == hole.col && pos.row < hole.row;
                usize::from(below(a) || below(b))
            }
            Gap::Stacked { col, top, bottom } => {
                if pos.col != col {
                    0
                } else if pos.row < top {
                    2
                } else if pos.row < bottom {
                    1
                } else {
                    0
                }
            }
        };
        Pos::new(pos.row + fall, pos.col)
    }
}

/// Drop every piece stacked above `hole` by one row.
fn settle_above(board: &mut Board, hole: Pos) -> Result<(), GameError> {
    for row in (0..hole.row).rev() {
        let from = Pos::new(row, hole.col);
        let cell = board.get(from)?;
        if cell == Cell::Empty {
            break;
        }
        board.set(Pos::new(row + 1, hole.col), cell)?;
        board.set(from, Cell::Empty)?;
    }
    Ok(())
}

/// A game in progress: the board, each player's live pieces in placement
/// order, and whose turn it is. Black moves first.
#[derive(Debug, Clone)]
pub struct Game {
    run: usize,
    board: Board,
    black: History,
    white: History,
    turn: Player,
}

impl Game {
    /// Create a game on an empty board.
    ///
    /// Fails when the board has a zero dimension or when a run of `run`
    /// pieces could fit neither across nor down the board.
    pub fn new(
        run: usize,
        width: usize,
        height: usize,
        representation: Representation,
    ) -> Result<Self, GameError> {
        if run == 0 {
            return Err(GameError::ZeroRun);
        }
        if run > width && run > height {
            return Err(GameError::ImpracticalRun { run, width, height });
        }
        let board = Board::new(width, height, representation)?;
        debug!(run, width, height, ?representation, "new game");
        Ok(Game {
            run,
            board,
            black: History::new(),
            white: History::new(),
            turn: Player::Black,
        })
    }

    pub fn run(&self) -> usize {
        self.run
    }

    pub fn current_turn(&self) -> Player {
        self.turn
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn width(&self) -> usize {
        self.board.width()
    }

    pub fn height(&self) -> usize {
        self.board.height()
    }

    pub fn get_cell(&self, row: usize, col: usize) -> Result<Cell, GameError> {
        self.board.get(Pos::new(row, col))
    }

    /// Live pieces of `player`, oldest first.
    pub fn history(&self, player: Player) -> &History {
        match player {
            Player::Black => &self.black,
            Player::White => &self.white,
        }
    }

    fn history_mut(&mut self, player: Player) -> &mut History {
        match player {
            Player::Black => &mut self.black,
            Player::White => &mut self.white,
        }
    }

    /// Dispatch a parsed move. A drop outside the board is treated like a
    /// full column: refused, with the state left alone.
    pub fn apply(&mut self, command: Command) -> Result<bool, GameError> {
        match command {
            Command::Drop(column) if column >= self.width() => Ok(false),
            Command::Drop(column) => self.drop_piece(column),
            Command::Disarray => {
                self.disarray();
                Ok(true)
            }
            Command::Offset => self.offset(),
        }
    }

    /// Drop the current player's piece into `column`.
    ///
    /// Returns `Ok(false)` without touching anything if the column is full.
    /// A column off the board is an error.
    pub fn drop_piece(&mut self, column: usize) -> Result<bool, GameError> {
        if self.board.get(Pos::new(0, column))? != Cell::Empty {
            return Ok(false);
        }

        // Find the lowest empty row; row 0 is known to be empty
        let mut landing = Pos::new(0, column);
        for row in (0..self.height()).rev() {
            let pos = Pos::new(row, column);
            if self.board.get(pos)? == Cell::Empty {
                landing = pos;
                break;
            }
        }

        let player = self.turn;
        self.board.set(landing, player.to_cell())?;
        self.history_mut(player).push_newest(landing);
        self.turn = player.other();
        debug!(player = player.name(), row = landing.row, col = column, "drop");
        Ok(true)
    }

    /// Flip the board upside down and let every column fall back into place.
    pub fn disarray(&mut self) {
        let height = self.height();
        let drops = self.board.reflect_columns();
        let reflect = |pos: Pos| Pos::new(height - 1 - pos.row + drops[pos.col], pos.col);
        self.black.rewrite_all(reflect);
        self.white.rewrite_all(reflect);
        debug!(player = self.turn.name(), ?drops, "disarray");
        self.turn = self.turn.other();
    }

    /// Remove the current player's oldest piece and the opponent's newest,
    /// then close the gaps.
    ///
    /// Returns `Ok(false)` without touching anything if either player has no
    /// piece on the board.
    pub fn offset(&mut self) -> Result<bool, GameError> {
        if self.black.is_empty() || self.white.is_empty() {
            return Ok(false);
        }

        let player = self.turn;
        let oldest = self.history_mut(player).pop_oldest()?;
        let newest = self.history_mut(player.other()).pop_newest()?;
        self.board.set(oldest, Cell::Empty)?;
        self.board.set(newest, Cell::Empty)?;

        let gap = Gap::new(oldest, newest);
        gap.settle(&mut self.board)?;
        self.black.rewrite_all(|pos| gap.shift(pos));
        self.white.rewrite_all(|pos| gap.shift(pos));

        self.turn = player.other();
        debug!(player = player.name(), ?oldest, ?newest, "offset");
        Ok(true)
    }

    /// Evaluate the position. Runs by both players at once (possible after a
    /// disarray or an offset) are a draw, as is a board with no open column.
    pub fn outcome(&self) -> Outcome {
        let black = self.has_run(Player::Black);
        let white = self.has_run(Player::White);
        match (black, white) {
            (true, true) => Outcome::Draw,
            (true, false) => Outcome::BlackWin,
            (false, true) => Outcome::WhiteWin,
            (false, false) if !self.board.has_open_column() => Outcome::Draw,
            (false, false) => Outcome::InProgress,
        }
    }

    fn has_run(&self, player: Player) -> bool {
        let cell = player.to_cell();
        self.history(player).iter().any(|start| {
            self.directions_from(start)
                .any(|direction| self.is_run(start, direction, cell))
        })
    }

    /// Directions in which a run starting at `pos` stays on the board.
    fn directions_from(&self, pos: Pos) -> impl Iterator<Item = (isize, isize)> {
        let fits_north = self.run <= pos.row + 1;
        let fits_west = self.run <= pos.col + 1;
        let fits_east = self.run <= self.width() - pos.col;
        [
            (NORTH, fits_north),
            (NORTH_WEST, fits_north && fits_west),
            (NORTH_EAST, fits_north && fits_east),
            (EAST, fits_east),
        ]
        .into_iter()
        .filter_map(|(direction, fits)| fits.then_some(direction))
    }

    /// Whether the `run - 1` cells after `start` in `direction` all hold `cell`.
    fn is_run(&self, start: Pos, (d_row, d_col): (isize, isize), cell: Cell) -> bool {
        (1..self.run).all(|step| {
            let step = step as isize;
            let row = start.row.checked_add_signed(d_row * step);
            let col = start.col.checked_add_signed(d_col * step);
            match (row, col) {
                (Some(row), Some(col)) => self.board.get(Pos::new(row, col)) == Ok(cell),
                _ => false,
            }
        })
    }
}

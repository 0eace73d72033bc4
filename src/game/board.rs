use std::fmt;

use serde::{Deserialize, Serialize};

use super::notation::label;
use crate::error::GameError;

/// Bits per packed storage word.
const WORD_BITS: usize = u32::BITS as usize;
/// Cells per packed storage word.
const CELLS_PER_WORD: usize = WORD_BITS / 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Cell {
    #[default]
    Empty,
    Black,
    White,
}

impl Cell {
    fn symbol(self) -> char {
        match self {
            Cell::Empty => '.',
            Cell::Black => '*',
            Cell::White => 'o',
        }
    }
}

/// Physical encoding of the board cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Representation {
    /// One `Cell` per square.
    #[default]
    Dense,
    /// Two bits per square packed into `u32` words.
    Packed,
}

/// Board coordinate. Row 0 is the top, row `height - 1` the bottom.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Pos {
    pub row: usize,
    pub col: usize,
}

impl Pos {
    pub const fn new(row: usize, col: usize) -> Self {
        Pos { row, col }
    }
}

/// Cell storage behind the board. Coordinates are bounds-checked by
/// [`Board`] before they reach an implementation.
trait CellStore {
    fn get(&self, pos: Pos) -> Cell;

    fn set(&mut self, pos: Pos, cell: Cell);

    /// Reflect every column and let it settle again. Returns the number of
    /// empty cells found in each column.
    fn reflect_columns(&mut self) -> Vec<usize>;
}

/// One column seen top to bottom.
trait Column {
    fn height(&self) -> usize;

    fn get(&self, row: usize) -> Cell;

    fn swap(&mut self, a: usize, b: usize);
}

/// Reflect a settled column across its centerline and let the pieces fall
/// back down, in a single pass: each piece met while scanning down from the
/// top is swapped with the mirrored slot at the bottom. Returns how many
/// cells of the column are empty.
fn reflect_column<C: Column + ?Sized>(column: &mut C) -> usize {
    let mut empty = 0;
    let mut bottom = column.height() - 1;
    for row in 0..column.height() {
        if column.get(row) == Cell::Empty {
            empty += 1;
            continue;
        }
        if bottom <= row {
            break;
        }
        column.swap(row, bottom);
        bottom -= 1;
    }
    empty
}

impl Column for [Cell] {
    fn height(&self) -> usize {
        self.len()
    }

    fn get(&self, row: usize) -> Cell {
        self[row]
    }

    fn swap(&mut self, a: usize, b: usize) {
        <[Cell]>::swap(self, a, b);
    }
}

/// Dense grid, stored column by column so each column is one contiguous
/// slice.
#[derive(Debug, Clone)]
struct DenseGrid {
    height: usize,
    cells: Vec<Cell>,
}

impl DenseGrid {
    fn new(width: usize, height: usize) -> Self {
        DenseGrid {
            height,
            cells: vec![Cell::Empty; width * height],
        }
    }

    fn index(&self, pos: Pos) -> usize {
        pos.col * self.height + pos.row
    }
}

impl CellStore for DenseGrid {
    fn get(&self, pos: Pos) -> Cell {
        self.cells[self.index(pos)]
    }

    fn set(&mut self, pos: Pos, cell: Cell) {
        let index = self.index(pos);
        self.cells[index] = cell;
    }

    /// One worker per column. Workers only see their own column slice and
    /// their own drop-count slot; the scope joins them all before returning.
    fn reflect_columns(&mut self) -> Vec<usize> {
        let mut drops = vec![0; self.cells.len() / self.height];
        std::thread::scope(|scope| {
            for (column, drop) in self.cells.chunks_mut(self.height).zip(drops.iter_mut()) {
                scope.spawn(move || *drop = reflect_column(column));
            }
        });
        drops
    }
}

/// Two bits per cell, row-major: cell `(r, c)` is bit pair `r * width + c`.
#[derive(Debug, Clone)]
struct PackedBits {
    width: usize,
    height: usize,
    words: Vec<u32>,
}

impl PackedBits {
    fn new(width: usize, height: usize) -> Self {
        PackedBits {
            width,
            height,
            words: vec![0; Self::word_count(width, height)],
        }
    }

    fn word_count(width: usize, height: usize) -> usize {
        (width * height * 2).div_ceil(WORD_BITS)
    }

    /// Word index and bit shift of a cell.
    fn locate(&self, pos: Pos) -> (usize, usize) {
        let pair = pos.row * self.width + pos.col;
        (pair / CELLS_PER_WORD, (pair % CELLS_PER_WORD) * 2)
    }
}

impl CellStore for PackedBits {
    fn get(&self, pos: Pos) -> Cell {
        let (word, shift) = self.locate(pos);
        match (self.words[word] >> shift) & 0b11 {
            0 => Cell::Empty,
            1 => Cell::Black,
            _ => Cell::White,
        }
    }

    fn set(&mut self, pos: Pos, cell: Cell) {
        let (word, shift) = self.locate(pos);
        let bits: u32 = match cell {
            Cell::Empty => 0b00,
            Cell::Black => 0b01,
            Cell::White => 0b10,
        };
        self.words[word] &= !(0b11 << shift);
        self.words[word] |= bits << shift;
    }

    /// Neighbouring columns share words, so columns are done one at a time.
    fn reflect_columns(&mut self) -> Vec<usize> {
        (0..self.width)
            .map(|col| reflect_column(&mut PackedColumn { bits: &mut *self, col }))
            .collect()
    }
}

struct PackedColumn<'a> {
    bits: &'a mut PackedBits,
    col: usize,
}

impl Column for PackedColumn<'_> {
    fn height(&self) -> usize {
        self.bits.height
    }

    fn get(&self, row: usize) -> Cell {
        self.bits.get(Pos::new(row, self.col))
    }

    fn swap(&mut self, a: usize, b: usize) {
        let (a, b) = (Pos::new(a, self.col), Pos::new(b, self.col));
        let (cell_a, cell_b) = (self.bits.get(a), self.bits.get(b));
        self.bits.set(a, cell_b);
        self.bits.set(b, cell_a);
    }
}

#[derive(Debug, Clone)]
enum Storage {
    Dense(DenseGrid),
    Packed(PackedBits),
}

impl Storage {
    fn store(&self) -> &dyn CellStore {
        match self {
            Storage::Dense(grid) => grid,
            Storage::Packed(bits) => bits,
        }
    }

    fn store_mut(&mut self) -> &mut dyn CellStore {
        match self {
            Storage::Dense(grid) => grid,
            Storage::Packed(bits) => bits,
        }
    }
}

/// A `width` x `height` board in either representation.
#[derive(Debug, Clone)]
pub struct Board {
    width: usize,
    height: usize,
    storage: Storage,
}

impl Board {
    /// Create a new empty board
    pub fn new(
        width: usize,
        height: usize,
        representation: Representation,
    ) -> Result<Self, GameError> {
        if width == 0 || height == 0 {
            return Err(GameError::ZeroDimension { width, height });
        }
        let storage = match representation {
            Representation::Dense => Storage::Dense(DenseGrid::new(width, height)),
            Representation::Packed => Storage::Packed(PackedBits::new(width, height)),
        };
        Ok(Board {
            width,
            height,
            storage,
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn representation(&self) -> Representation {
        match self.storage {
            Storage::Dense(_) => Representation::Dense,
            Storage::Packed(_) => Representation::Packed,
        }
    }

    fn check(&self, pos: Pos) -> Result<(), GameError> {
        if pos.row >= self.height || pos.col >= self.width {
            return Err(GameError::OutOfBounds {
                row: pos.row,
                col: pos.col,
                width: self.width,
                height: self.height,
            });
        }
        Ok(())
    }

    /// Get the cell at a specific position
    pub fn get(&self, pos: Pos) -> Result<Cell, GameError> {
        self.check(pos)?;
        Ok(self.storage.store().get(pos))
    }

    pub fn set(&mut self, pos: Pos, cell: Cell) -> Result<(), GameError> {
        self.check(pos)?;
        self.storage.store_mut().set(pos, cell);
        Ok(())
    }

    /// Check if a column is full. Columns off the board count as full.
    pub fn is_column_full(&self, col: usize) -> bool {
        match self.get(Pos::new(0, col)) {
            Ok(cell) => cell != Cell::Empty,
            Err(_) => true,
        }
    }

    /// Whether any column can still take a piece.
    pub fn has_open_column(&self) -> bool {
        (0..self.width).any(|col| !self.is_column_full(col))
    }

    /// Number of cells holding `cell`.
    pub fn count(&self, cell: Cell) -> usize {
        let store = self.storage.store();
        (0..self.height)
            .flat_map(|row| (0..self.width).map(move |col| Pos::new(row, col)))
            .filter(|&pos| store.get(pos) == cell)
            .count()
    }

    /// Reflect the board across its horizontal centerline and let every
    /// column settle. Returns the empty-cell count of each column.
    pub(crate) fn reflect_columns(&mut self) -> Vec<usize> {
        self.storage.store_mut().reflect_columns()
    }
}

impl fmt::Display for Board {
    /// Column labels across the top, row labels down the side.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let store = self.storage.store();
        writeln!(f)?;
        write!(f, "  ")?;
        for col in 0..self.width {
            write!(f, "{} ", label(col))?;
        }
        writeln!(f)?;
        for row in 0..self.height {
            write!(f, "{} ", label(row))?;
            for col in 0..self.width {
                write!(f, "{} ", store.get(Pos::new(row, col)).symbol())?;
            }
            writeln!(f)?;
        }
        writeln!(f)
    }
}

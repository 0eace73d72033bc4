use crate::config::GameConfig;
use crate::error::ConfigError;
use crate::game::{Command, Game};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use ratatui::{backend::Backend, Terminal};
use std::io;
use tracing::{debug, error};

pub struct App {
    config: GameConfig,
    game: Game,
    selected_column: usize,
    should_quit: bool,
    message: Option<String>,
}

impl App {
    pub fn new(config: GameConfig) -> Result<Self, ConfigError> {
        let game = config.new_game()?;
        Ok(App {
            selected_column: game.width() / 2, // Start in middle
            config,
            game,
            should_quit: false,
            message: None,
        })
    }

    /// Main application loop
    pub fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> io::Result<()> {
        loop {
            terminal.draw(|f| self.render(f))?;

            if self.should_quit {
                break;
            }

            self.handle_events()?;
        }
        Ok(())
    }

    /// Handle keyboard events
    fn handle_events(&mut self) -> io::Result<()> {
        if event::poll(std::time::Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    self.handle_key(key);
                }
            }
        }
        Ok(())
    }

    /// Handle key press
    fn handle_key(&mut self, key: KeyEvent) {
        // Clear message on any key press
        self.message = None;

        match key.code {
            KeyCode::Esc => {
                self.should_quit = true;
            }
            KeyCode::Left => {
                self.selected_column = self.selected_column.saturating_sub(1);
            }
            KeyCode::Right => {
                if self.selected_column + 1 < self.game.width() {
                    self.selected_column += 1;
                }
            }
            KeyCode::Enter | KeyCode::Char(' ') => {
                self.play(Command::Drop(self.selected_column));
            }
            KeyCode::Tab => self.restart(),
            KeyCode::Char(ch) => match Command::parse(ch) {
                Some(command) => self.play(command),
                None => self.message = Some(format!("'{ch}' is not a move")),
            },
            _ => {}
        }
    }

    fn restart(&mut self) {
        match self.config.new_game() {
            Ok(game) => {
                self.game = game;
                self.selected_column = self.game.width() / 2;
                self.message = Some("New game started!".to_string());
            }
            Err(e) => {
                error!(error = %e, "failed to restart game");
                self.message = Some(format!("Cannot restart: {e}"));
            }
        }
    }

    fn play(&mut self, command: Command) {
        if self.game.outcome().is_terminal() {
            self.message = Some("Game over! Press Tab to restart.".to_string());
            return;
        }

        debug!(?command, "move requested");
        match (command, self.game.apply(command)) {
            (_, Ok(true)) => {
                if let Command::Drop(column) = command {
                    self.selected_column = column;
                }
                // Check if game just ended
                if let Some(text) = self.game.outcome().message() {
                    self.message = Some(text.to_string());
                }
            }
            (Command::Drop(column), Ok(false)) if column >= self.game.width() => {
                self.message = Some("No such column!".to_string());
            }
            (Command::Drop(_), Ok(false)) => {
                self.message = Some("Column is full!".to_string());
            }
            (Command::Offset, Ok(false)) => {
                self.message = Some("Both players need a piece on the board!".to_string());
            }
            (_, Ok(false)) => {
                self.message = Some("Move refused!".to_string());
            }
            (_, Err(e)) => {
                error!(error = %e, "move failed");
                self.message = Some(format!("Error: {e}"));
            }
        }
    }

    /// Render the UI
    fn render(&self, frame: &mut ratatui::Frame) {
        super::game_view::render(frame, &self.game, self.selected_column, &self.message);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{Cell, Outcome, Player};
    use crossterm::event::KeyModifiers;

    fn press(app: &mut App, code: KeyCode) {
        app.handle_key(KeyEvent::new(code, KeyModifiers::NONE));
    }

    fn small_app() -> App {
        App::new(GameConfig {
            run: 3,
            width: 4,
            height: 4,
            ..GameConfig::default()
        })
        .unwrap()
    }

    #[test]
    fn test_selector_drop() {
        let mut app = small_app();
        assert_eq!(app.selected_column, 2);
        press(&mut app, KeyCode::Left);
        press(&mut app, KeyCode::Left);
        press(&mut app, KeyCode::Left);
        assert_eq!(app.selected_column, 0);
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.game.get_cell(3, 0).unwrap(), Cell::Black);
        assert_eq!(app.game.current_turn(), Player::White);
    }

    #[test]
    fn test_character_moves() {
        let mut app = small_app();
        press(&mut app, KeyCode::Char('3'));
        assert_eq!(app.game.get_cell(3, 3).unwrap(), Cell::Black);
        press(&mut app, KeyCode::Char('^'));
        assert_eq!(app.game.current_turn(), Player::Black);
        press(&mut app, KeyCode::Char('!'));
        assert!(app.message.is_some());
        assert_eq!(app.game.current_turn(), Player::Black);
        press(&mut app, KeyCode::Char('9'));
        assert_eq!(app.message.as_deref(), Some("No such column!"));
        press(&mut app, KeyCode::Char('#'));
        assert_eq!(app.message.as_deref(), Some("'#' is not a move"));
    }

    #[test]
    fn test_game_over_and_restart() {
        let mut app = small_app();
        for ch in ['0', '0', '1', '1', '2'] {
            press(&mut app, KeyCode::Char(ch));
        }
        assert_eq!(app.game.outcome(), Outcome::BlackWin);
        assert_eq!(app.message.as_deref(), Some("Black wins."));

        press(&mut app, KeyCode::Char('3'));
        assert_eq!(app.game.get_cell(3, 3).unwrap(), Cell::Empty);

        press(&mut app, KeyCode::Tab);
        assert_eq!(app.game.outcome(), Outcome::InProgress);
        assert!(app.game.history(Player::Black).is_empty());
    }

    #[test]
    fn test_refused_moves_explain_why() {
        let mut app = App::new(GameConfig {
            run: 2,
            width: 2,
            height: 1,
            ..GameConfig::default()
        })
        .unwrap();
        press(&mut app, KeyCode::Char('!'));
        assert_eq!(
            app.message.as_deref(),
            Some("Both players need a piece on the board!")
        );
        press(&mut app, KeyCode::Char('0'));
        press(&mut app, KeyCode::Char('0'));
        assert_eq!(app.message.as_deref(), Some("Column is full!"));
        assert_eq!(app.game.current_turn(), Player::White);

        // Disarray is never refused
        press(&mut app, KeyCode::Char('^'));
        assert_eq!(app.message, None);
        assert_eq!(app.game.current_turn(), Player::Black);
    }

    #[test]
    fn test_escape_quits() {
        let mut app = small_app();
        press(&mut app, KeyCode::Esc);
        assert!(app.should_quit);
    }
}

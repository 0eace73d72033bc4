use crate::game::notation::label;
use crate::game::{Cell, Game, Player};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

const BLACK_COLOR: Color = Color::LightRed;
const WHITE_COLOR: Color = Color::White;

pub fn render(frame: &mut Frame, game: &Game, selected_column: usize, message: &Option<String>) {
    let board_rows = u16::try_from(game.height())
        .unwrap_or(u16::MAX)
        .saturating_add(4);
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),       // Header
            Constraint::Min(board_rows), // Board
            Constraint::Length(3),       // Message
            Constraint::Length(4),       // Controls
        ])
        .split(frame.area());

    render_header(frame, game, chunks[0]);
    render_board(frame, game, selected_column, chunks[1]);
    render_message(frame, message, chunks[2]);
    render_controls(frame, chunks[3]);
}

fn player_color(player: Player) -> Color {
    match player {
        Player::Black => BLACK_COLOR,
        Player::White => WHITE_COLOR,
    }
}

fn render_header(frame: &mut Frame, game: &Game, area: Rect) {
    let outcome = game.outcome();
    let player = game.current_turn();

    let status = if outcome.is_terminal() {
        format!("Game Over  |  run of {}", game.run())
    } else {
        format!("Current Player: {}  |  run of {}", player.name(), game.run())
    };

    let header = Paragraph::new(status)
        .style(
            Style::default()
                .fg(player_color(player))
                .add_modifier(Modifier::BOLD),
        )
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).title("Disarray"));

    frame.render_widget(header, area);
}

fn render_board(frame: &mut Frame, game: &Game, selected_column: usize, area: Rect) {
    let mut lines = Vec::new();

    // Column labels with selection indicator
    let mut col_line = vec![Span::raw("   ")];
    for col in 0..game.width() {
        let text = format!(" {} ", label(col));
        if col == selected_column {
            col_line.push(Span::styled(
                text,
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
            ));
        } else {
            col_line.push(Span::raw(text));
        }
    }
    col_line.push(Span::raw("  "));
    lines.push(Line::from(col_line));

    let rule = "═".repeat(game.width() * 3 + 1);
    lines.push(Line::from(format!("  ╔{rule}╗")));

    for row in 0..game.height() {
        let mut row_spans = vec![Span::raw(format!("{} ║", label(row)))];
        for col in 0..game.width() {
            let (symbol, color) = match game.get_cell(row, col) {
                Ok(Cell::Black) => (" ● ", BLACK_COLOR),
                Ok(Cell::White) => (" ● ", WHITE_COLOR),
                _ => (" . ", Color::DarkGray),
            };
            row_spans.push(Span::styled(symbol, Style::default().fg(color)));
        }
        row_spans.push(Span::raw(" ║"));
        lines.push(Line::from(row_spans));
    }

    lines.push(Line::from(format!("  ╚{rule}╝")));

    // Selection indicator
    let mut indicator_line = vec![Span::raw("   ")];
    for col in 0..game.width() {
        if col == selected_column {
            indicator_line.push(Span::styled(" ▲ ", Style::default().fg(Color::Cyan)));
        } else {
            indicator_line.push(Span::raw("   "));
        }
    }
    indicator_line.push(Span::raw("  "));
    lines.push(Line::from(indicator_line));

    let board_widget = Paragraph::new(lines).alignment(Alignment::Center);
    frame.render_widget(board_widget, area);
}

fn render_message(frame: &mut Frame, message: &Option<String>, area: Rect) {
    let text = message.as_deref().unwrap_or("");
    let msg_widget = Paragraph::new(text)
        .style(Style::default().fg(Color::Yellow))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));

    frame.render_widget(msg_widget, area);
}

fn render_controls(frame: &mut Frame, area: Rect) {
    let line1 = Line::from("←/→: Move  |  Enter: Drop  |  Tab: Restart  |  Esc: Quit");
    let line2 = Line::from(vec![
        Span::styled("0-9 A-Z a-z", Style::default().add_modifier(Modifier::BOLD)),
        Span::raw(": drop in column   "),
        Span::styled("^", Style::default().add_modifier(Modifier::BOLD)),
        Span::raw(": disarray   "),
        Span::styled("!", Style::default().add_modifier(Modifier::BOLD)),
        Span::raw(": offset"),
    ]);

    let controls = Paragraph::new(vec![line1, line2])
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).title("Controls"));

    frame.render_widget(controls, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::Representation;
    use ratatui::{backend::TestBackend, Terminal};

    fn screen_text(game: &Game, message: Option<String>) -> String {
        let backend = TestBackend::new(80, 24);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal
            .draw(|f| render(f, game, 0, &message))
            .unwrap();
        let buffer = terminal.backend().buffer().clone();
        buffer
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    #[test]
    fn test_render_shows_turn_and_labels() {
        let mut game = Game::new(3, 12, 4, Representation::Packed).unwrap();
        game.drop_piece(11).unwrap();
        let text = screen_text(&game, Some("hello".to_string()));
        assert!(text.contains("Current Player: White"));
        assert!(text.contains(" A  B "));
        assert!(text.contains("hello"));
    }

    #[test]
    fn test_render_board_taller_than_u16() {
        let game = Game::new(1, 1, 70_000, Representation::Packed).unwrap();
        let text = screen_text(&game, None);
        assert!(text.contains("╔════╗"));
    }

    #[test]
    fn test_render_game_over() {
        let mut game = Game::new(1, 3, 3, Representation::Dense).unwrap();
        game.drop_piece(0).unwrap();
        let text = screen_text(&game, None);
        assert!(text.contains("Game Over"));
    }
}

//! Row/column labels and the single-character move notation shared by the
//! plain and terminal front ends.

/// Number of distinct labels before the `?` overflow marker.
pub const LABEL_COUNT: usize = 62;

/// A move request parsed from one input character.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Drop(usize),
    Disarray,
    Offset,
}

impl Command {
    /// Parse a move character: `!` offset, `^` disarray, a column label drops.
    ///
    /// Only the character itself is checked here; the column still has to be
    /// compared against the board width by the caller.
    pub fn parse(ch: char) -> Option<Command> {
        match ch {
            '!' => Some(Command::Offset),
            '^' => Some(Command::Disarray),
            _ => column_from_label(ch).map(Command::Drop),
        }
    }
}

/// Label for a row or column index: `0-9`, then `A-Z`, then `a-z`, then `?`.
pub fn label(index: usize) -> char {
    match index {
        0..=9 => (b'0' + index as u8) as char,
        10..=35 => (b'A' + (index - 10) as u8) as char,
        36..=61 => (b'a' + (index - 36) as u8) as char,
        _ => '?',
    }
}

/// Inverse of [`label`]. `?` has no index.
pub fn column_from_label(ch: char) -> Option<usize> {
    match ch {
        '0'..='9' => Some(ch as usize - '0' as usize),
        'A'..='Z' => Some(ch as usize - 'A' as usize + 10),
        'a'..='z' => Some(ch as usize - 'a' as usize + 36),
        _ => None,
    }
}

//! Cell reference parsing and formatting.
//!
//! Provides bidirectional conversion between spreadsheet-style cell references
//! (e.g., "A1", "B2", "AA100") and zero-indexed row/column coordinates.
//!
//! # Examples
//!
//! ```
//! use gridcalc_engine::engine::Position;
//!
//! let pos = Position::from_a1("B3");
//! assert_eq!(pos.col, 1);  // 0-indexed
//! assert_eq!(pos.row, 2);
//! assert_eq!(pos.to_string(), "B3");
//! assert!(!Position::from_a1("b3").is_valid());
//! ```

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::OnceLock;

use crate::error::EngineError;

const LETTERS: i32 = 26;
const MAX_REFERENCE_LEN: usize = 17;

/// A cell coordinate (0-indexed). Ordered row-major.
#[derive(Clone, Copy, Debug, Hash, Eq, PartialEq, Ord, PartialOrd, Serialize, Deserialize)]
pub struct Position {
    pub row: i32,
    pub col: i32,
}

impl Position {
    pub const MAX_ROWS: i32 = 16384;
    pub const MAX_COLS: i32 = 16384;

    /// Sentinel for "no position", used for unresolved references.
    pub const NONE: Position = Position { row: -1, col: -1 };

    pub const fn new(row: i32, col: i32) -> Position {
        Position { row, col }
    }

    pub fn is_valid(&self) -> bool {
        (0..Self::MAX_ROWS).contains(&self.row) && (0..Self::MAX_COLS).contains(&self.col)
    }

    /// Parse a reference in `A1` notation.
    ///
    /// Never fails: anything that is not `[A-Z]{1,3}[0-9]{1,5}` or that lands
    /// outside the grid yields [`Position::NONE`].
    pub fn from_a1(name: &str) -> Position {
        Self::parse_a1(name).unwrap_or(Position::NONE)
    }

    fn parse_a1(name: &str) -> Option<Position> {
        if name.len() > MAX_REFERENCE_LEN {
            return None;
        }
        let caps = a1_re().captures(name)?;
        let letters = &caps["letters"];
        let numbers = &caps["numbers"];

        let mut col_acc = 0i32;
        for c in letters.bytes() {
            col_acc = col_acc * LETTERS + i32::from(c - b'A') + 1;
        }
        let col = col_acc - 1;
        let row = numbers.parse::<i32>().ok()? - 1;

        let pos = Position::new(row, col);
        pos.is_valid().then_some(pos)
    }

    /// Render in `A1` notation; invalid positions render as an empty string.
    pub fn to_a1(&self) -> String {
        if !self.is_valid() {
            return String::new();
        }
        format!("{}{}", Position::col_to_letters(self.col), self.row + 1)
    }

    /// Convert column index to spreadsheet-style letters (0 -> A, 25 -> Z, 26 -> AA).
    pub fn col_to_letters(col: i32) -> String {
        let mut result = String::new();
        let mut n = i64::from(col) + 1;
        while n > 0 {
            n -= 1;
            result.insert(0, (b'A' + (n % 26) as u8) as char);
            n /= 26;
        }
        result
    }
}

impl std::str::FromStr for Position {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_a1(s).ok_or_else(|| EngineError::InvalidReference(s.to_string()))
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_a1())
    }
}

/// Printable extent of a sheet, measured from the origin.
#[derive(Clone, Copy, Debug, Default, Hash, Eq, PartialEq, Serialize, Deserialize)]
pub struct Size {
    pub rows: usize,
    pub cols: usize,
}

impl Size {
    pub const fn new(rows: usize, cols: usize) -> Size {
        Size { rows, cols }
    }
}

fn a1_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^(?<letters>[A-Z]{1,3})(?<numbers>[0-9]{1,5})$")
            .expect("cell reference regex must compile")
    })
}

#[cfg(test)]
mod tests {
    use super::Position;

    #[test]
    fn test_from_a1_rejects_lowercase_and_long_letters() {
        assert_eq!(Position::from_a1("a1"), Position::NONE);
        assert_eq!(Position::from_a1("ABCD1"), Position::NONE);
        assert_eq!(Position::from_a1("A123456"), Position::NONE);
    }

    #[test]
    fn test_from_a1_rejects_out_of_bounds() {
        // XFE is column 16384, one past the last valid column.
        assert_eq!(Position::from_a1("XFD1"), Position::new(0, 16383));
        assert_eq!(Position::from_a1("XFE1"), Position::NONE);
        assert_eq!(Position::from_a1("A16384"), Position::new(16383, 0));
        assert_eq!(Position::from_a1("A16385"), Position::NONE);
        assert_eq!(Position::from_a1("A0"), Position::NONE);
    }

    #[test]
    fn test_invalid_position_renders_empty() {
        assert_eq!(Position::NONE.to_a1(), "");
        assert_eq!(Position::new(0, Position::MAX_COLS).to_string(), "");
    }

    #[test]
    fn test_round_trip_corners() {
        for pos in [
            Position::new(0, 0),
            Position::new(0, 25),
            Position::new(0, 26),
            Position::new(0, 701),
            Position::new(0, 702),
            Position::new(Position::MAX_ROWS - 1, Position::MAX_COLS - 1),
        ] {
            assert_eq!(Position::from_a1(&pos.to_a1()), pos);
        }
        assert_eq!(Position::new(0, 701).to_a1(), "ZZ1");
        assert_eq!(Position::new(0, 702).to_a1(), "AAA1");
    }

    #[test]
    fn test_from_str_reports_error() {
        assert!("B7".parse::<Position>().is_ok());
        let err = "7B".parse::<Position>().unwrap_err();
        assert!(err.to_string().contains("7B"));
    }

    #[test]
    fn test_row_major_order() {
        assert!(Position::new(0, 5) < Position::new(1, 0));
        assert!(Position::new(1, 0) < Position::new(1, 1));
    }
}

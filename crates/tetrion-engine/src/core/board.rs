use std::fmt::Write as _;

use arrayvec::ArrayVec;
use serde::{Deserialize, Serialize};

use crate::core::piece::Piece;

use super::{BOARD_HEIGHT, BOARD_WIDTH};

// All cells of one row set.
const FULL_ROW_MASK: u16 = (1 << BOARD_WIDTH) - 1;

/// Single row of the board as a bitmask, bit `c` = column `c`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Row {
    bits: u16,
}

impl Row {
    const EMPTY: Self = Self { bits: 0 };

    #[inline]
    fn is_occupied(self, col: usize) -> bool {
        (self.bits & (1 << col)) != 0
    }

    #[inline]
    fn occupy(&mut self, col: usize) {
        self.bits |= 1 << col;
    }

    #[inline]
    fn is_filled(self) -> bool {
        self.bits == FULL_ROW_MASK
    }
}

/// Occupancy snapshot of the playfield.
///
/// The board is [`Board::WIDTH`] columns by [`Board::HEIGHT`] rows, row 0 at
/// the top. Each row is stored as a `u16` bitmask for cheap cell queries.
///
/// During evaluation the board is strictly read-only; the mutating operations
/// (`fill_piece`, `clear_filled_rows`) are reserved for the game-state
/// tracker in this crate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    rows: [Row; BOARD_HEIGHT],
}

impl Default for Board {
    fn default() -> Self {
        Self::EMPTY
    }
}

impl Board {
    pub const WIDTH: usize = BOARD_WIDTH;
    pub const HEIGHT: usize = BOARD_HEIGHT;

    pub const EMPTY: Self = Self {
        rows: [Row::EMPTY; BOARD_HEIGHT],
    };

    /// Checks whether the cell at (`col`, `row`) is occupied.
    ///
    /// # Panics
    ///
    /// Panics if the coordinates are outside the board. Querying out of
    /// range is a contract violation, not a recoverable condition.
    #[must_use]
    pub fn occupied(&self, col: usize, row: usize) -> bool {
        assert!(
            col < BOARD_WIDTH && row < BOARD_HEIGHT,
            "cell query out of range: ({col}, {row})",
        );
        self.rows[row].is_occupied(col)
    }

    /// Number of consecutive empty cells from the top of `col` down to the
    /// first occupied cell, or [`Board::HEIGHT`] if the column is empty.
    ///
    /// # Panics
    ///
    /// Panics if `col` is outside the board.
    #[must_use]
    pub fn well_depth(&self, col: usize) -> usize {
        assert!(col < BOARD_WIDTH, "column query out of range: {col}");
        self.rows
            .iter()
            .take_while(|row| !row.is_occupied(col))
            .count()
    }

    /// Locks a piece's cells onto the board.
    ///
    /// The caller must have validated that every cell is inside the board.
    #[expect(clippy::cast_sign_loss)]
    pub(crate) fn fill_piece(&mut self, piece: Piece) {
        for (col, row) in piece.cells() {
            debug_assert!(col >= 0 && row >= 0, "unvalidated piece cell ({col}, {row})");
            self.rows[row as usize].occupy(col as usize);
        }
    }

    /// Removes every filled row, shifting the rows above it down, and
    /// returns the removed row indices in ascending order.
    pub(crate) fn clear_filled_rows(&mut self) -> ArrayVec<usize, BOARD_HEIGHT> {
        let mut cleared = ArrayVec::new();
        for (y, row) in self.rows.iter().enumerate() {
            if row.is_filled() {
                cleared.push(y);
            }
        }

        let mut shift = 0;
        for y in (0..BOARD_HEIGHT).rev() {
            if self.rows[y].is_filled() {
                shift += 1;
                continue;
            }
            if shift > 0 {
                self.rows[y + shift] = self.rows[y];
            }
        }
        self.rows[..shift].fill(Row::EMPTY);

        cleared
    }

    /// Builds a board from ASCII art for tests and fixtures.
    ///
    /// `#` is an occupied cell, `.` an empty one. Each line must contain
    /// exactly [`Board::WIDTH`] cells; lines are anchored to the bottom of
    /// the board, so omitted leading rows are empty.
    ///
    /// # Panics
    ///
    /// Panics if the art has more than [`Board::HEIGHT`] rows or a row with
    /// the wrong number of cells.
    #[must_use]
    pub fn from_ascii(art: &str) -> Self {
        let mut board = Self::EMPTY;
        let lines: Vec<&str> = art.lines().filter(|line| !line.trim().is_empty()).collect();
        assert!(
            lines.len() <= BOARD_HEIGHT,
            "expected at most {BOARD_HEIGHT} rows, got {}",
            lines.len(),
        );

        let top = BOARD_HEIGHT - lines.len();
        for (i, line) in lines.iter().enumerate() {
            let cells: Vec<char> = line.chars().filter(|c| *c == '#' || *c == '.').collect();
            assert_eq!(
                cells.len(),
                BOARD_WIDTH,
                "each row must have exactly {BOARD_WIDTH} cells, got {} at row {i}",
                cells.len(),
            );
            for (col, &ch) in cells.iter().enumerate() {
                if ch == '#' {
                    board.rows[top + i].occupy(col);
                }
            }
        }
        board
    }
}

impl Serialize for Board {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        // Format: "000,3ff,001,..." (one 3-digit hex value per row, top first)
        let mut hex_string = String::with_capacity(BOARD_HEIGHT * 4);
        for (i, row) in self.rows.iter().enumerate() {
            if i > 0 {
                hex_string.push(',');
            }
            write!(&mut hex_string, "{:03x}", row.bits).unwrap();
        }
        serializer.serialize_str(&hex_string)
    }
}

impl<'de> Deserialize<'de> for Board {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;

        let parts: Vec<&str> = s.split(',').collect();
        if parts.len() != BOARD_HEIGHT {
            return Err(serde::de::Error::custom(format!(
                "expected {} comma-separated hex values, got {}",
                BOARD_HEIGHT,
                parts.len()
            )));
        }

        let mut rows = [Row::EMPTY; BOARD_HEIGHT];
        for (i, hex_str) in parts.iter().enumerate() {
            let bits = u16::from_str_radix(hex_str, 16).map_err(|e| {
                serde::de::Error::custom(format!("invalid hex at row {i}: {hex_str} ({e})"))
            })?;
            if bits > FULL_ROW_MASK {
                return Err(serde::de::Error::custom(format!(
                    "row {i} has bits outside the board: {hex_str}"
                )));
            }
            rows[i] = Row { bits };
        }

        Ok(Board { rows })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_board() {
        let board = Board::EMPTY;
        for row in 0..Board::HEIGHT {
            for col in 0..Board::WIDTH {
                assert!(!board.occupied(col, row), "({col}, {row}) should be empty");
            }
        }
        for col in 0..Board::WIDTH {
            assert_eq!(board.well_depth(col), Board::HEIGHT);
        }
    }

    #[test]
    fn test_from_ascii_bottom_aligned() {
        let board = Board::from_ascii(
            r"
            #.........
            ##........
            ",
        );

        assert!(board.occupied(0, Board::HEIGHT - 2));
        assert!(board.occupied(0, Board::HEIGHT - 1));
        assert!(board.occupied(1, Board::HEIGHT - 1));
        assert!(!board.occupied(1, Board::HEIGHT - 2));
        assert_eq!(board.well_depth(0), Board::HEIGHT - 2);
        assert_eq!(board.well_depth(1), Board::HEIGHT - 1);
        assert_eq!(board.well_depth(2), Board::HEIGHT);
    }

    #[test]
    fn test_well_depth_ignores_cells_below_first_block() {
        // A covered gap does not end the scan early or extend it.
        let board = Board::from_ascii(
            r"
            #.........
            ..........
            #.........
            ",
        );
        assert_eq!(board.well_depth(0), Board::HEIGHT - 3);
    }

    #[test]
    #[should_panic(expected = "cell query out of range")]
    fn test_occupied_out_of_range_panics() {
        let _ = Board::EMPTY.occupied(Board::WIDTH, 0);
    }

    #[test]
    #[should_panic(expected = "column query out of range")]
    fn test_well_depth_out_of_range_panics() {
        let _ = Board::EMPTY.well_depth(Board::WIDTH);
    }

    #[test]
    fn test_clear_filled_rows_reports_indices() {
        let mut board = Board::from_ascii(
            r"
            .#........
            ##########
            .#........
            ##########
            ",
        );

        let cleared = board.clear_filled_rows();
        assert_eq!(cleared.as_slice(), &[Board::HEIGHT - 3, Board::HEIGHT - 1]);

        // Survivors shift down, preserving their order.
        let expected = Board::from_ascii(
            r"
            .#........
            .#........
            ",
        );
        assert_eq!(board, expected);
    }

    #[test]
    fn test_clear_filled_rows_empty_board() {
        let mut board = Board::EMPTY;
        assert!(board.clear_filled_rows().is_empty());
        assert_eq!(board, Board::EMPTY);
    }

    #[test]
    fn test_serde_round_trip() {
        let board = Board::from_ascii(
            r"
            #.#.......
            ##########
            ",
        );

        let serialized = serde_json::to_string(&board).unwrap();
        assert!(serialized.contains("3ff")); // the filled row
        let deserialized: Board = serde_json::from_str(&serialized).unwrap();
        assert_eq!(deserialized, board);
    }

    #[test]
    fn test_deserialize_rejects_bad_input() {
        // Wrong row count
        assert!(serde_json::from_str::<Board>("\"000,000\"").is_err());
        // Bits outside the playable width
        let mut rows = vec!["000"; Board::HEIGHT];
        rows[0] = "fff";
        let s = format!("\"{}\"", rows.join(","));
        assert!(serde_json::from_str::<Board>(&s).is_err());
        // Not hex
        let mut rows = vec!["000"; Board::HEIGHT];
        rows[3] = "zzz";
        let s = format!("\"{}\"", rows.join(","));
        assert!(serde_json::from_str::<Board>(&s).is_err());
    }
}

pub use self::{board::*, piece::*};

pub(crate) mod board;
pub(crate) mod piece;

/// Board width in columns. Shared by every snapshot and every measurement.
pub(crate) const BOARD_WIDTH: usize = 10;
/// Board height in rows. Row 0 is the top of the board.
pub(crate) const BOARD_HEIGHT: usize = 20;

use arrayvec::ArrayVec;

use crate::{
    PlacementError,
    core::{Board, Piece},
};

/// Tracks the board across placements and exposes the snapshot an evaluator
/// reads: the current board, the rows cleared by the most recent placement,
/// and the piece that caused them.
///
/// The snapshot accessors borrow immutably, so the state cannot change while
/// an evaluation holds it.
#[derive(Debug, Clone, Default)]
pub struct GameState {
    board: Board,
    last_piece: Option<Piece>,
    last_cleared: ArrayVec<usize, { Board::HEIGHT }>,
}

impl GameState {
    /// Starts from an empty board with no placement history.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts from an existing board, e.g. one received from a match server.
    #[must_use]
    pub fn with_board(board: Board) -> Self {
        Self {
            board,
            last_piece: None,
            last_cleared: ArrayVec::new(),
        }
    }

    #[must_use]
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Row indices cleared by the most recent placement, ascending.
    /// Empty if the last placement cleared nothing or none was applied yet.
    #[must_use]
    pub fn last_cleared_rows(&self) -> &[usize] {
        &self.last_cleared
    }

    /// The most recently placed piece in its final resting position, with
    /// coordinates as of the moment it locked (before row clearing).
    #[must_use]
    pub fn last_piece_played(&self) -> Option<Piece> {
        self.last_piece
    }

    /// Locks a piece onto the board, clears any filled rows, and records the
    /// placement. Returns the number of rows cleared.
    ///
    /// # Errors
    ///
    /// Fails without modifying the state when a piece cell falls outside the
    /// board or lands on an occupied cell.
    pub fn apply_placement(&mut self, piece: Piece) -> Result<usize, PlacementError> {
        for (col, row) in piece.cells() {
            let (Ok(col), Ok(row)) = (usize::try_from(col), usize::try_from(row)) else {
                return Err(PlacementError::OutOfBounds);
            };
            if col >= Board::WIDTH || row >= Board::HEIGHT {
                return Err(PlacementError::OutOfBounds);
            }
            if self.board.occupied(col, row) {
                return Err(PlacementError::Overlapping);
            }
        }

        self.board.fill_piece(piece);
        self.last_cleared = self.board.clear_filled_rows();
        self.last_piece = Some(piece);
        Ok(self.last_cleared.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::PieceKind;

    #[test]
    fn test_new_state_has_no_history() {
        let state = GameState::new();
        assert_eq!(state.board(), &Board::EMPTY);
        assert!(state.last_cleared_rows().is_empty());
        assert!(state.last_piece_played().is_none());
    }

    #[test]
    fn test_placement_locks_cells() {
        let mut state = GameState::new();
        // O-piece mask cells are at offsets (1..=2, 1..=2).
        let piece = Piece::from_parts(PieceKind::O, 0, 3, 17).unwrap();

        let cleared = state.apply_placement(piece).unwrap();
        assert_eq!(cleared, 0);
        assert!(state.board().occupied(4, 18));
        assert!(state.board().occupied(5, 18));
        assert!(state.board().occupied(4, 19));
        assert!(state.board().occupied(5, 19));
        assert_eq!(state.last_piece_played(), Some(piece));
        assert!(state.last_cleared_rows().is_empty());
    }

    #[test]
    fn test_placement_clears_completed_rows() {
        let board = Board::from_ascii(
            r"
            #########.
            #########.
            #########.
            #########.
            ",
        );
        let mut state = GameState::with_board(board);

        // Vertical bar into the open right column fills all four rows.
        let piece = Piece::from_parts(PieceKind::I, 1, 7, 16).unwrap();
        let cleared = state.apply_placement(piece).unwrap();

        assert_eq!(cleared, 4);
        assert_eq!(
            state.last_cleared_rows(),
            &[
                Board::HEIGHT - 4,
                Board::HEIGHT - 3,
                Board::HEIGHT - 2,
                Board::HEIGHT - 1
            ],
        );
        assert_eq!(state.board(), &Board::EMPTY);
        assert_eq!(state.last_piece_played(), Some(piece));
    }

    #[test]
    fn test_placement_partial_clear_keeps_remainder() {
        let board = Board::from_ascii(
            r"
            ##........
            #########.
            ",
        );
        let mut state = GameState::with_board(board);

        // Vertical bar: bottom cell completes the bottom row, the rest stack
        // in the right column.
        let piece = Piece::from_parts(PieceKind::I, 1, 7, 16).unwrap();
        let cleared = state.apply_placement(piece).unwrap();

        assert_eq!(cleared, 1);
        assert_eq!(state.last_cleared_rows(), &[Board::HEIGHT - 1]);
        let expected = Board::from_ascii(
            r"
            .........#
            .........#
            ##.......#
            ",
        );
        assert_eq!(state.board(), &expected);
    }

    #[test]
    fn test_placement_out_of_bounds_is_rejected() {
        let mut state = GameState::new();
        let piece = Piece::from_parts(PieceKind::O, 0, -1, 0).unwrap();
        assert_eq!(
            state.apply_placement(piece),
            Err(PlacementError::OutOfBounds)
        );
        assert_eq!(state.board(), &Board::EMPTY);
        assert!(state.last_piece_played().is_none());
    }

    #[test]
    fn test_placement_overlap_is_rejected() {
        let board = Board::from_ascii(
            r"
            ##########
            ",
        );
        let mut state = GameState::with_board(board.clone());

        let piece = Piece::from_parts(PieceKind::O, 0, 3, 17).unwrap();
        assert_eq!(
            state.apply_placement(piece),
            Err(PlacementError::Overlapping)
        );
        assert_eq!(state.board(), &board);
    }
}

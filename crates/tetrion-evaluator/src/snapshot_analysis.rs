//! One evaluation's view of a game snapshot.
//!
//! [`SnapshotAnalysis`] borrows a [`GameState`] for the duration of a single
//! evaluation, pairing the lazily computed [`BoardAnalysis`] with the
//! placement-specific facts (cleared rows, last-played piece) that the
//! piece-aware features need. The borrow guarantees the snapshot cannot
//! change while features are being extracted.

use tetrion_engine::{Board, GameState, Piece};

use crate::board_analysis::BoardAnalysis;

#[expect(clippy::cast_possible_truncation)]
const HEIGHT: i32 = Board::HEIGHT as i32;

#[derive(Debug)]
pub struct SnapshotAnalysis<'a> {
    state: &'a GameState,
    board_analysis: BoardAnalysis,
}

impl<'a> SnapshotAnalysis<'a> {
    #[must_use]
    pub fn new(state: &'a GameState) -> Self {
        Self {
            state,
            board_analysis: BoardAnalysis::from_board(state.board()),
        }
    }

    #[must_use]
    pub fn board_analysis(&self) -> &BoardAnalysis {
        &self.board_analysis
    }

    /// Row indices cleared by the last placement, ascending.
    #[must_use]
    pub fn cleared_rows(&self) -> &[usize] {
        self.state.last_cleared_rows()
    }

    #[must_use]
    pub fn last_piece(&self) -> Option<Piece> {
        self.state.last_piece_played()
    }

    /// Height from the bottom at which the last piece came to rest,
    /// measured at its topmost occupied cell. 0 before the first placement.
    #[must_use]
    pub fn landing_height(&self) -> i32 {
        let Some(piece) = self.last_piece() else {
            return 0;
        };
        let top = i32::try_from(piece.mask().top_occupied_row()).unwrap();
        HEIGHT - (i32::from(piece.row()) + top)
    }

    /// Erosion score of the last placement: rows cleared multiplied by the
    /// piece cells lying in those rows. 0 when nothing cleared.
    #[must_use]
    pub fn eroded_pieces(&self) -> i32 {
        let Some(piece) = self.last_piece() else {
            return 0;
        };
        let cleared = self.cleared_rows();
        let eroded_cells = piece
            .cells()
            .filter(|&(_, row)| usize::try_from(row).is_ok_and(|row| cleared.contains(&row)))
            .count();
        i32::try_from(cleared.len() * eroded_cells).unwrap()
    }
}

#[cfg(test)]
mod tests {
    use tetrion_engine::PieceKind;

    use super::*;

    #[test]
    fn test_piece_measurements_default_to_zero_without_history() {
        let state = GameState::new();
        let analysis = SnapshotAnalysis::new(&state);
        assert_eq!(analysis.landing_height(), 0);
        assert_eq!(analysis.eroded_pieces(), 0);
        assert!(analysis.cleared_rows().is_empty());
    }

    #[test]
    fn test_landing_height_measures_topmost_piece_cell() {
        let mut state = GameState::new();
        // O-piece at anchor row 17: topmost mask row is 1, so the piece's
        // highest cell sits in board row 18.
        let piece = Piece::from_parts(PieceKind::O, 0, 3, 17).unwrap();
        state.apply_placement(piece).unwrap();

        let analysis = SnapshotAnalysis::new(&state);
        assert_eq!(analysis.landing_height(), 2);
    }

    #[test]
    fn test_eroded_pieces_multiplies_rows_by_piece_cells() {
        let board = Board::from_ascii(
            r"
            #########.
            ",
        );
        let mut state = GameState::with_board(board);

        // Vertical bar into the right column: its bottom cell completes the
        // bottom row, the other three stay on the board.
        let piece = Piece::from_parts(PieceKind::I, 1, 7, 16).unwrap();
        assert_eq!(state.apply_placement(piece).unwrap(), 1);

        let analysis = SnapshotAnalysis::new(&state);
        assert_eq!(analysis.eroded_pieces(), 1);
        assert_eq!(analysis.cleared_rows(), &[Board::HEIGHT - 1]);
        assert_eq!(analysis.board_analysis().blocks(), 3);
    }

    #[test]
    fn test_eroded_pieces_scales_with_cleared_rows() {
        let board = Board::from_ascii(
            r"
            #########.
            #########.
            #########.
            #########.
            ",
        );
        let mut state = GameState::with_board(board);

        let piece = Piece::from_parts(PieceKind::I, 1, 7, 16).unwrap();
        assert_eq!(state.apply_placement(piece).unwrap(), 4);

        // All four piece cells sit in cleared rows: 4 rows * 4 cells.
        let analysis = SnapshotAnalysis::new(&state);
        assert_eq!(analysis.eroded_pieces(), 16);
    }
}

//! Board and piece model for a falling-block puzzle agent.
//!
//! This crate provides the data structures an evaluator needs to score a
//! single move: the [`Board`] occupancy matrix, the [`Piece`] catalogue with
//! its rotation states, and the [`GameState`] tracker that applies placements
//! and records what the last move did (cleared rows, resting piece).
//!
//! Everything here is synchronous and allocation-light; a snapshot is a plain
//! value that an evaluator reads without mutating.

pub use self::{core::*, engine::*};

pub mod core;
pub mod engine;

/// Reasons a placement can be rejected by [`GameState::apply_placement`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum PlacementError {
    /// One or more piece cells fall outside the board.
    #[display("piece extends outside the board")]
    OutOfBounds,
    /// One or more piece cells land on an occupied cell.
    #[display("piece overlaps occupied cells")]
    Overlapping,
}

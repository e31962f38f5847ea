//! Game-state tracking.
//!
//! The evaluator consumes read-only snapshots; this module produces them.
//! [`GameState`] owns the board, applies validated placements, and records
//! what the last placement did (cleared rows, resting piece).
//! [`PieceGenerator`] supplies a deterministic piece stream for simulation.

pub use self::{game_state::*, piece_gen::*};

mod game_state;
mod piece_gen;

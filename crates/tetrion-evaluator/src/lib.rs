//! Feature extraction for scoring falling-block board snapshots.
//!
//! The evaluator turns one read-only game snapshot (board, rows cleared by
//! the last placement, last-played piece) into a fixed-order vector of
//! scalar measurements, then combines that vector with a weight vector into
//! a move score. The weight search itself lives in an external optimizer;
//! this crate only exposes the measurement surface it needs:
//!
//! - [`feature::all_features`] - the measurement catalogue, in declared order
//! - [`feature::feature_count`] / [`feature::feature_ranges`] - the search
//!   space description for the optimizer
//! - [`move_evaluator::MoveEvaluator`] - vector assembly plus an injected
//!   [`move_evaluator::ScoreStrategy`] for the weighted combination
//!
//! # Architecture
//!
//! ```text
//! GameState snapshot
//!     ↓ borrows
//! SnapshotAnalysis (cleared rows + last piece + lazy BoardAnalysis)
//!     ↓ read by
//! Feature::extract, one scalar each, any order
//!     ↓ collected into
//! feature vector → ScoreStrategy → score
//! ```
//!
//! Every feature is a pure read over the immutable snapshot; shared
//! intermediate measurements (well depths, hole scans) are memoized per
//! snapshot in [`board_analysis::BoardAnalysis`], so computing all 19
//! features costs a handful of board passes rather than 19.

pub mod board_analysis;
pub mod feature;
pub mod move_evaluator;
pub mod snapshot_analysis;

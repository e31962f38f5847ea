//! Move scoring: feature-vector assembly plus weighted combination.
//!
//! [`MoveEvaluator`] owns the feature catalogue and turns one snapshot into
//! a score. The combination algorithm is an injected [`ScoreStrategy`]
//! supplied by the external optimizer; the built-in [`WeightedSum`] default
//! computes the plain dot product `Σ wᵢ·fᵢ`.

use std::{fmt, iter};

use tetrion_engine::GameState;

use crate::{
    feature::{BoxedFeature, Feature, all_features},
    snapshot_analysis::SnapshotAnalysis,
};

/// Combines a feature vector with a weight vector into one score.
///
/// Both slices have [`MoveEvaluator::feature_count`] elements, in catalogue
/// order.
pub trait ScoreStrategy: fmt::Debug + Send + Sync {
    fn combine(&self, values: &[i32], weights: &[f32]) -> f32;
}

/// Linear combination: `score = Σ wᵢ·fᵢ`.
#[derive(Debug, Clone, Copy, Default)]
pub struct WeightedSum;

impl ScoreStrategy for WeightedSum {
    #[expect(clippy::cast_precision_loss)]
    fn combine(&self, values: &[i32], weights: &[f32]) -> f32 {
        iter::zip(values, weights).map(|(v, w)| *v as f32 * w).sum()
    }
}

/// Scores snapshots for the external optimizer.
#[derive(Debug)]
pub struct MoveEvaluator {
    features: Vec<BoxedFeature>,
    strategy: Box<dyn ScoreStrategy>,
}

impl Default for MoveEvaluator {
    fn default() -> Self {
        Self::new()
    }
}

impl MoveEvaluator {
    /// Creates an evaluator with the full catalogue and the
    /// [`WeightedSum`] strategy.
    #[must_use]
    pub fn new() -> Self {
        Self::with_strategy(Box::new(WeightedSum))
    }

    /// Creates an evaluator with a caller-supplied combination strategy.
    #[must_use]
    pub fn with_strategy(strategy: Box<dyn ScoreStrategy>) -> Self {
        Self {
            features: all_features(),
            strategy,
        }
    }

    /// Number of features, and thus the required weight-vector length.
    #[must_use]
    pub fn feature_count(&self) -> usize {
        self.features.len()
    }

    /// Search-space ranges, one per feature, in catalogue order.
    #[must_use]
    pub fn feature_ranges(&self) -> Vec<(f32, f32)> {
        self.features.iter().map(|feature| feature.range()).collect()
    }

    /// Extracts the full feature vector from a snapshot, in catalogue order.
    #[must_use]
    pub fn feature_values(&self, state: &GameState) -> Vec<i32> {
        let analysis = SnapshotAnalysis::new(state);
        self.features
            .iter()
            .map(|feature| feature.extract(&analysis))
            .collect()
    }

    /// Scores a snapshot under the given weights.
    ///
    /// # Panics
    ///
    /// Panics when `weights.len()` differs from
    /// [`feature_count`](Self::feature_count); mismatched arity is a
    /// programming error, not a runtime condition.
    #[must_use]
    pub fn evaluate(&self, state: &GameState, weights: &[f32]) -> f32 {
        assert_eq!(
            weights.len(),
            self.features.len(),
            "weight vector length must match the feature count",
        );
        self.strategy.combine(&self.feature_values(state), weights)
    }
}

#[cfg(test)]
mod tests {
    use tetrion_engine::Board;

    use super::*;

    #[test]
    fn test_feature_count_and_ranges() {
        let evaluator = MoveEvaluator::new();
        assert_eq!(evaluator.feature_count(), 19);
        assert_eq!(
            evaluator.feature_ranges(),
            vec![(-100.0, 100.0); evaluator.feature_count()],
        );
    }

    #[test]
    fn test_zero_weights_score_zero() {
        let state = GameState::with_board(Board::from_ascii(
            r"
            #.#.#.#.#.
            ##########
            ",
        ));
        let evaluator = MoveEvaluator::new();
        let weights = vec![0.0; evaluator.feature_count()];
        assert_eq!(evaluator.evaluate(&state, &weights), 0.0);
    }

    #[test]
    fn test_weighted_sum_matches_manual_dot_product() {
        let state = GameState::with_board(Board::from_ascii(
            r"
            ..#.......
            #.##......
            ##.#......
            ",
        ));
        let evaluator = MoveEvaluator::new();
        let weights: Vec<f32> = (0..evaluator.feature_count())
            .map(|i| (i as f32) * 0.5 - 2.0)
            .collect();

        let values = evaluator.feature_values(&state);
        let expected: f32 = values
            .iter()
            .zip(&weights)
            .map(|(v, w)| *v as f32 * w)
            .sum();
        assert_eq!(evaluator.evaluate(&state, &weights), expected);
    }

    #[test]
    fn test_single_weight_selects_single_feature() {
        let state = GameState::with_board(Board::from_ascii(
            r"
            ####......
            ",
        ));
        let evaluator = MoveEvaluator::new();

        // Weight only the "blocks" slot (index 8).
        let mut weights = vec![0.0; evaluator.feature_count()];
        weights[8] = 1.0;
        assert_eq!(evaluator.evaluate(&state, &weights), 4.0);
    }

    #[test]
    fn test_injected_strategy_replaces_weighted_sum() {
        #[derive(Debug)]
        struct CountNonZero;

        impl ScoreStrategy for CountNonZero {
            #[expect(clippy::cast_precision_loss)]
            fn combine(&self, values: &[i32], _weights: &[f32]) -> f32 {
                values.iter().filter(|v| **v != 0).count() as f32
            }
        }

        let state = GameState::with_board(Board::from_ascii(
            r"
            #.........
            ",
        ));
        let evaluator = MoveEvaluator::with_strategy(Box::new(CountNonZero));
        let weights = vec![0.0; evaluator.feature_count()];

        // Single bottom-corner cell: pile_height, blocks, weighted_blocks,
        // altitude_difference, smoothness, and the well metrics are nonzero.
        let nonzero = evaluator
            .feature_values(&state)
            .into_iter()
            .filter(|v| *v != 0)
            .count();
        let score = evaluator.evaluate(&state, &weights);
        assert_eq!(score, nonzero as f32);
        assert!(score > 0.0);
    }

    #[test]
    #[should_panic(expected = "weight vector length")]
    fn test_wrong_arity_panics() {
        let state = GameState::new();
        let evaluator = MoveEvaluator::new();
        let _ = evaluator.evaluate(&state, &[1.0, 2.0]);
    }
}

//! The feature catalogue.
//!
//! A feature is one deterministic scalar measurement of a snapshot. Features
//! are independent pure functions: they share no mutable state, may run in
//! any order, and extracting one twice from the same snapshot yields the
//! same value.
//!
//! The catalogue order returned by [`all_features`] is part of the external
//! contract (the optimizer addresses weights by position), so it never
//! changes between calls or releases. Every feature currently declares the
//! same placeholder search range, [`FEATURE_RANGE`]; per-feature tuning is
//! the optimizer's concern, not ours.

use std::fmt;

use crate::snapshot_analysis::SnapshotAnalysis;

pub use self::source::all_features;

pub mod source;

/// Placeholder numeric range shared by every feature.
pub const FEATURE_RANGE: (f32, f32) = (-100.0, 100.0);

pub trait Feature: fmt::Debug + Send + Sync {
    fn id(&self) -> &str;
    fn name(&self) -> &str;
    fn clone_boxed(&self) -> BoxedFeature;

    /// Bounds the optimizer's search space for this feature's weight.
    fn range(&self) -> (f32, f32) {
        FEATURE_RANGE
    }

    /// Extracts this feature's scalar from a snapshot.
    #[must_use]
    fn extract(&self, analysis: &SnapshotAnalysis<'_>) -> i32;
}

pub type BoxedFeature = Box<dyn Feature>;

impl Clone for BoxedFeature {
    fn clone(&self) -> Self {
        self.clone_boxed()
    }
}

impl Feature for BoxedFeature {
    fn id(&self) -> &str {
        self.as_ref().id()
    }

    fn name(&self) -> &str {
        self.as_ref().name()
    }

    fn clone_boxed(&self) -> BoxedFeature {
        self.as_ref().clone_boxed()
    }

    fn range(&self) -> (f32, f32) {
        self.as_ref().range()
    }

    fn extract(&self, analysis: &SnapshotAnalysis<'_>) -> i32 {
        self.as_ref().extract(analysis)
    }
}

/// Number of features in the catalogue.
#[must_use]
pub fn feature_count() -> usize {
    all_features().len()
}

/// Search-space ranges, one per feature, in catalogue order.
#[must_use]
pub fn feature_ranges() -> Vec<(f32, f32)> {
    all_features().iter().map(Feature::range).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalogue_has_nineteen_features() {
        assert_eq!(feature_count(), 19);
    }

    #[test]
    fn test_catalogue_order_is_stable() {
        let ids: Vec<_> = all_features().iter().map(|f| f.id().to_owned()).collect();
        assert_eq!(
            ids,
            vec![
                "pile_height",
                "holes",
                "connected_holes",
                "removed_rows",
                "altitude_difference",
                "max_well_depth",
                "sum_of_all_wells",
                "landing_height",
                "blocks",
                "weighted_blocks",
                "row_transitions",
                "col_transitions",
                "highest_hole",
                "blocks_above_highest_hole",
                "potential_rows",
                "smoothness",
                "eroded_pieces",
                "row_holes",
                "hole_depth",
            ],
        );
    }

    #[test]
    fn test_ranges_are_uniform_placeholders() {
        let ranges = feature_ranges();
        assert_eq!(ranges.len(), feature_count());
        for range in ranges {
            assert_eq!(range, (-100.0, 100.0));
        }
    }

    #[test]
    fn test_ids_are_unique() {
        let features = all_features();
        for (i, a) in features.iter().enumerate() {
            for b in &features[i + 1..] {
                assert_ne!(a.id(), b.id());
            }
        }
    }
}

//! The 19 feature implementations.
//!
//! Each type extracts one measurement from a [`SnapshotAnalysis`]. Board
//! scans live in [`BoardAnalysis`](crate::board_analysis::BoardAnalysis);
//! the piece-aware features read the placement facts the snapshot carries.

use crate::{
    feature::{BoxedFeature, Feature},
    snapshot_analysis::SnapshotAnalysis,
};

/// The full catalogue in declared order.
///
/// The order is the external optimizer's weight layout; never reorder.
#[must_use]
pub fn all_features() -> Vec<BoxedFeature> {
    vec![
        Box::new(PileHeight),
        Box::new(Holes),
        Box::new(ConnectedHoles),
        Box::new(RemovedRows),
        Box::new(AltitudeDifference),
        Box::new(MaxWellDepth),
        Box::new(SumOfAllWells),
        Box::new(LandingHeight),
        Box::new(Blocks),
        Box::new(WeightedBlocks),
        Box::new(RowTransitions),
        Box::new(ColTransitions),
        Box::new(HighestHole),
        Box::new(BlocksAboveHighestHole),
        Box::new(PotentialRows),
        Box::new(Smoothness),
        Box::new(ErodedPieces),
        Box::new(RowHoles),
        Box::new(HoleDepth),
    ]
}

/// Row of the topmost occupied cell anywhere on the board.
#[derive(Debug, Clone)]
pub struct PileHeight;

impl Feature for PileHeight {
    fn id(&self) -> &'static str {
        "pile_height"
    }
    fn name(&self) -> &'static str {
        "Pile Height"
    }
    fn clone_boxed(&self) -> BoxedFeature {
        Box::new(self.clone())
    }
    fn extract(&self, analysis: &SnapshotAnalysis<'_>) -> i32 {
        analysis.board_analysis().pile_height()
    }
}

/// Number of covered empty cells.
///
/// Every empty cell with at least one occupied cell above it in the same
/// column counts, so a single overhang over a deep shaft counts once per
/// buried cell. See [`ConnectedHoles`] for the run-based variant.
#[derive(Debug, Clone)]
pub struct Holes;

impl Feature for Holes {
    fn id(&self) -> &'static str {
        "holes"
    }
    fn name(&self) -> &'static str {
        "Holes"
    }
    fn clone_boxed(&self) -> BoxedFeature {
        Box::new(self.clone())
    }
    fn extract(&self, analysis: &SnapshotAnalysis<'_>) -> i32 {
        analysis.board_analysis().holes()
    }
}

/// Number of vertically contiguous runs of covered empty cells.
#[derive(Debug, Clone)]
pub struct ConnectedHoles;

impl Feature for ConnectedHoles {
    fn id(&self) -> &'static str {
        "connected_holes"
    }
    fn name(&self) -> &'static str {
        "Connected Holes"
    }
    fn clone_boxed(&self) -> BoxedFeature {
        Box::new(self.clone())
    }
    fn extract(&self, analysis: &SnapshotAnalysis<'_>) -> i32 {
        analysis.board_analysis().connected_holes()
    }
}

/// Rows cleared by the last placement.
#[derive(Debug, Clone)]
pub struct RemovedRows;

impl Feature for RemovedRows {
    fn id(&self) -> &'static str {
        "removed_rows"
    }
    fn name(&self) -> &'static str {
        "Removed Rows"
    }
    fn clone_boxed(&self) -> BoxedFeature {
        Box::new(self.clone())
    }
    fn extract(&self, analysis: &SnapshotAnalysis<'_>) -> i32 {
        i32::try_from(analysis.cleared_rows().len()).unwrap()
    }
}

/// Height range between the tallest and the shortest column.
#[derive(Debug, Clone)]
pub struct AltitudeDifference;

impl Feature for AltitudeDifference {
    fn id(&self) -> &'static str {
        "altitude_difference"
    }
    fn name(&self) -> &'static str {
        "Altitude Difference"
    }
    fn clone_boxed(&self) -> BoxedFeature {
        Box::new(self.clone())
    }
    fn extract(&self, analysis: &SnapshotAnalysis<'_>) -> i32 {
        analysis.board_analysis().altitude_difference()
    }
}

/// Depth of the deepest surface well.
///
/// A well is a column whose well-depth value is strictly smaller than both
/// neighbours' (single neighbour at a board edge); its depth is the smaller
/// neighbour difference.
#[derive(Debug, Clone)]
pub struct MaxWellDepth;

impl Feature for MaxWellDepth {
    fn id(&self) -> &'static str {
        "max_well_depth"
    }
    fn name(&self) -> &'static str {
        "Max Well Depth"
    }
    fn clone_boxed(&self) -> BoxedFeature {
        Box::new(self.clone())
    }
    fn extract(&self, analysis: &SnapshotAnalysis<'_>) -> i32 {
        analysis.board_analysis().max_well_depth()
    }
}

/// Total depth over all surface wells (same well rule as [`MaxWellDepth`]).
#[derive(Debug, Clone)]
pub struct SumOfAllWells;

impl Feature for SumOfAllWells {
    fn id(&self) -> &'static str {
        "sum_of_all_wells"
    }
    fn name(&self) -> &'static str {
        "Sum of All Wells"
    }
    fn clone_boxed(&self) -> BoxedFeature {
        Box::new(self.clone())
    }
    fn extract(&self, analysis: &SnapshotAnalysis<'_>) -> i32 {
        analysis.board_analysis().sum_of_well_depths()
    }
}

/// Height from the bottom at which the last piece came to rest.
#[derive(Debug, Clone)]
pub struct LandingHeight;

impl Feature for LandingHeight {
    fn id(&self) -> &'static str {
        "landing_height"
    }
    fn name(&self) -> &'static str {
        "Landing Height"
    }
    fn clone_boxed(&self) -> BoxedFeature {
        Box::new(self.clone())
    }
    fn extract(&self, analysis: &SnapshotAnalysis<'_>) -> i32 {
        analysis.landing_height()
    }
}

/// Total occupied cells on the board.
#[derive(Debug, Clone)]
pub struct Blocks;

impl Feature for Blocks {
    fn id(&self) -> &'static str {
        "blocks"
    }
    fn name(&self) -> &'static str {
        "Blocks"
    }
    fn clone_boxed(&self) -> BoxedFeature {
        Box::new(self.clone())
    }
    fn extract(&self, analysis: &SnapshotAnalysis<'_>) -> i32 {
        analysis.board_analysis().blocks()
    }
}

/// Occupied cells weighted by height from the bottom.
#[derive(Debug, Clone)]
pub struct WeightedBlocks;

impl Feature for WeightedBlocks {
    fn id(&self) -> &'static str {
        "weighted_blocks"
    }
    fn name(&self) -> &'static str {
        "Weighted Blocks"
    }
    fn clone_boxed(&self) -> BoxedFeature {
        Box::new(self.clone())
    }
    fn extract(&self, analysis: &SnapshotAnalysis<'_>) -> i32 {
        analysis.board_analysis().weighted_blocks()
    }
}

/// Horizontal fragmentation: occupied/empty adjacency changes along rows,
/// side walls treated as occupied, empty rows contributing zero.
#[derive(Debug, Clone)]
pub struct RowTransitions;

impl Feature for RowTransitions {
    fn id(&self) -> &'static str {
        "row_transitions"
    }
    fn name(&self) -> &'static str {
        "Row Transitions"
    }
    fn clone_boxed(&self) -> BoxedFeature {
        Box::new(self.clone())
    }
    fn extract(&self, analysis: &SnapshotAnalysis<'_>) -> i32 {
        analysis.board_analysis().row_transitions()
    }
}

/// Vertical fragmentation: adjacency changes along columns scanned bottom to
/// top, discounted by one transition per non-well column, never negative.
#[derive(Debug, Clone)]
pub struct ColTransitions;

impl Feature for ColTransitions {
    fn id(&self) -> &'static str {
        "col_transitions"
    }
    fn name(&self) -> &'static str {
        "Column Transitions"
    }
    fn clone_boxed(&self) -> BoxedFeature {
        Box::new(self.clone())
    }
    fn extract(&self, analysis: &SnapshotAnalysis<'_>) -> i32 {
        analysis.board_analysis().col_transitions()
    }
}

/// Height from the bottom of the highest covered empty cell.
#[derive(Debug, Clone)]
pub struct HighestHole;

impl Feature for HighestHole {
    fn id(&self) -> &'static str {
        "highest_hole"
    }
    fn name(&self) -> &'static str {
        "Highest Hole"
    }
    fn clone_boxed(&self) -> BoxedFeature {
        Box::new(self.clone())
    }
    fn extract(&self, analysis: &SnapshotAnalysis<'_>) -> i32 {
        analysis.board_analysis().highest_hole()
    }
}

/// Occupied cells above the hole in the column attaining [`HighestHole`];
/// height ties keep the larger count.
#[derive(Debug, Clone)]
pub struct BlocksAboveHighestHole;

impl Feature for BlocksAboveHighestHole {
    fn id(&self) -> &'static str {
        "blocks_above_highest_hole"
    }
    fn name(&self) -> &'static str {
        "Blocks Above Highest Hole"
    }
    fn clone_boxed(&self) -> BoxedFeature {
        Box::new(self.clone())
    }
    fn extract(&self, analysis: &SnapshotAnalysis<'_>) -> i32 {
        analysis.board_analysis().blocks_above_highest_hole()
    }
}

/// Rows exactly one empty cell short of clearing.
#[derive(Debug, Clone)]
pub struct PotentialRows;

impl Feature for PotentialRows {
    fn id(&self) -> &'static str {
        "potential_rows"
    }
    fn name(&self) -> &'static str {
        "Potential Rows"
    }
    fn clone_boxed(&self) -> BoxedFeature {
        Box::new(self.clone())
    }
    fn extract(&self, analysis: &SnapshotAnalysis<'_>) -> i32 {
        analysis.board_analysis().potential_rows()
    }
}

/// Surface smoothness: summed absolute well-depth differences between
/// adjacent columns.
#[derive(Debug, Clone)]
pub struct Smoothness;

impl Feature for Smoothness {
    fn id(&self) -> &'static str {
        "smoothness"
    }
    fn name(&self) -> &'static str {
        "Smoothness"
    }
    fn clone_boxed(&self) -> BoxedFeature {
        Box::new(self.clone())
    }
    fn extract(&self, analysis: &SnapshotAnalysis<'_>) -> i32 {
        analysis.board_analysis().smoothness()
    }
}

/// Erosion score of the last placement: rows cleared multiplied by the
/// last-piece cells lying in those rows. Rewards placements that spend
/// their own cells on clears.
#[derive(Debug, Clone)]
pub struct ErodedPieces;

impl Feature for ErodedPieces {
    fn id(&self) -> &'static str {
        "eroded_pieces"
    }
    fn name(&self) -> &'static str {
        "Eroded Pieces"
    }
    fn clone_boxed(&self) -> BoxedFeature {
        Box::new(self.clone())
    }
    fn extract(&self, analysis: &SnapshotAnalysis<'_>) -> i32 {
        analysis.eroded_pieces()
    }
}

/// Rows containing at least one covered empty cell.
#[derive(Debug, Clone)]
pub struct RowHoles;

impl Feature for RowHoles {
    fn id(&self) -> &'static str {
        "row_holes"
    }
    fn name(&self) -> &'static str {
        "Row Holes"
    }
    fn clone_boxed(&self) -> BoxedFeature {
        Box::new(self.clone())
    }
    fn extract(&self, analysis: &SnapshotAnalysis<'_>) -> i32 {
        analysis.board_analysis().row_holes()
    }
}

/// Buriedness of holes: each covered empty cell contributes the occupied
/// cells above it in its column.
#[derive(Debug, Clone)]
pub struct HoleDepth;

impl Feature for HoleDepth {
    fn id(&self) -> &'static str {
        "hole_depth"
    }
    fn name(&self) -> &'static str {
        "Hole Depth"
    }
    fn clone_boxed(&self) -> BoxedFeature {
        Box::new(self.clone())
    }
    fn extract(&self, analysis: &SnapshotAnalysis<'_>) -> i32 {
        analysis.board_analysis().hole_depth()
    }
}

//! Lazily cached per-board measurements.
//!
//! [`BoardAnalysis`] owns one board snapshot and memoizes every scan the
//! features share: well depths, surface wells, hole structure, transitions.
//! Each measurement is computed at most once per snapshot (`OnceCell`), so
//! features stay independent without repeating whole-board passes.

use std::cell::OnceCell;

use tetrion_engine::Board;

#[expect(clippy::cast_possible_truncation)]
const WIDTH: i32 = Board::WIDTH as i32;
#[expect(clippy::cast_possible_truncation)]
const HEIGHT: i32 = Board::HEIGHT as i32;

/// First covered empty cell of one column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnHole {
    /// Height of the hole measured from the bottom of the board.
    pub height: i32,
    /// Occupied cells above the hole in the same column.
    pub blocks_above: i32,
}

#[derive(Debug)]
pub struct BoardAnalysis {
    board: Board,
    well_depths: OnceCell<[i32; Board::WIDTH]>,
    surface_wells: OnceCell<[i32; Board::WIDTH]>,
    column_holes: OnceCell<[Option<ColumnHole>; Board::WIDTH]>,
    holes: OnceCell<i32>,
    connected_holes: OnceCell<i32>,
    row_transitions: OnceCell<i32>,
    col_transitions: OnceCell<i32>,
    blocks: OnceCell<i32>,
    weighted_blocks: OnceCell<i32>,
    smoothness: OnceCell<i32>,
    potential_rows: OnceCell<i32>,
    row_holes: OnceCell<i32>,
    hole_depth: OnceCell<i32>,
}

impl BoardAnalysis {
    #[must_use]
    pub fn from_board(board: &Board) -> Self {
        Self {
            board: board.clone(),
            well_depths: OnceCell::new(),
            surface_wells: OnceCell::new(),
            column_holes: OnceCell::new(),
            holes: OnceCell::new(),
            connected_holes: OnceCell::new(),
            row_transitions: OnceCell::new(),
            col_transitions: OnceCell::new(),
            blocks: OnceCell::new(),
            weighted_blocks: OnceCell::new(),
            smoothness: OnceCell::new(),
            potential_rows: OnceCell::new(),
            row_holes: OnceCell::new(),
            hole_depth: OnceCell::new(),
        }
    }

    #[must_use]
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Well depth of every column: empty cells from the top down to the
    /// first occupied cell.
    #[must_use]
    pub fn well_depths(&self) -> &[i32; Board::WIDTH] {
        self.well_depths.get_or_init(|| {
            let mut depths = [0; Board::WIDTH];
            for (col, depth) in depths.iter_mut().enumerate() {
                *depth = i32::try_from(self.board.well_depth(col)).unwrap();
            }
            depths
        })
    }

    /// Row index (from the top) of the topmost occupied cell anywhere.
    #[must_use]
    pub fn pile_height(&self) -> i32 {
        let min_depth = *self.well_depths().iter().min().unwrap();
        HEIGHT - min_depth
    }

    /// Height range between the tallest and the shortest column.
    #[must_use]
    pub fn altitude_difference(&self) -> i32 {
        let depths = self.well_depths();
        let min_depth = *depths.iter().min().unwrap();
        let max_depth = *depths.iter().max().unwrap();
        (HEIGHT - min_depth) - (HEIGHT - max_depth)
    }

    /// Per-column surface-well depth.
    ///
    /// A column is a well when its well-depth value is strictly smaller than
    /// both neighbours' (or its single neighbour's at a board edge); the
    /// depth is the smaller of the two neighbour differences. Non-well
    /// columns are 0.
    #[must_use]
    pub fn surface_wells(&self) -> &[i32; Board::WIDTH] {
        self.surface_wells.get_or_init(|| {
            let depths = self.well_depths();
            let mut wells = [0; Board::WIDTH];
            let last = Board::WIDTH - 1;
            if depths[0] < depths[1] {
                wells[0] = depths[1] - depths[0];
            }
            for col in 1..last {
                if depths[col] < depths[col - 1] && depths[col] < depths[col + 1] {
                    wells[col] =
                        i32::min(depths[col - 1] - depths[col], depths[col + 1] - depths[col]);
                }
            }
            if depths[last] < depths[last - 1] {
                wells[last] = depths[last - 1] - depths[last];
            }
            wells
        })
    }

    /// Depth of the deepest surface well.
    #[must_use]
    pub fn max_well_depth(&self) -> i32 {
        *self.surface_wells().iter().max().unwrap()
    }

    /// Total depth over all surface wells.
    #[must_use]
    pub fn sum_of_well_depths(&self) -> i32 {
        self.surface_wells().iter().sum()
    }

    fn well_column_count(&self) -> i32 {
        i32::try_from(self.surface_wells().iter().filter(|w| **w > 0).count()).unwrap()
    }

    /// Count of covered empty cells: every empty cell with at least one
    /// occupied cell above it in the same column.
    #[must_use]
    pub fn holes(&self) -> i32 {
        *self.holes.get_or_init(|| {
            let mut count = 0;
            for col in 0..Board::WIDTH {
                let mut hit_top = false;
                for row in 0..Board::HEIGHT {
                    if self.board.occupied(col, row) {
                        hit_top = true;
                    } else if hit_top {
                        count += 1;
                    }
                }
            }
            count
        })
    }

    /// Like [`holes`](Self::holes), but a vertically contiguous run of
    /// covered empty cells counts once.
    #[must_use]
    pub fn connected_holes(&self) -> i32 {
        *self.connected_holes.get_or_init(|| {
            let mut count = 0;
            for col in 0..Board::WIDTH {
                let mut hit_top = false;
                let mut in_hole = false;
                for row in 0..Board::HEIGHT {
                    let occupied = self.board.occupied(col, row);
                    if occupied && !hit_top {
                        hit_top = true;
                    } else if occupied && in_hole {
                        in_hole = false;
                    } else if !occupied && hit_top && !in_hole {
                        count += 1;
                        in_hole = true;
                    }
                }
            }
            count
        })
    }

    /// First covered empty cell of every column, with the occupied-cell
    /// count above it.
    #[must_use]
    pub fn column_holes(&self) -> &[Option<ColumnHole>; Board::WIDTH] {
        self.column_holes.get_or_init(|| {
            let mut holes = [None; Board::WIDTH];
            for (col, hole) in holes.iter_mut().enumerate() {
                let mut blocks_above = 0;
                let mut hit_top = false;
                for row in 0..Board::HEIGHT {
                    if self.board.occupied(col, row) {
                        blocks_above += 1;
                        hit_top = true;
                    } else if hit_top {
                        *hole = Some(ColumnHole {
                            height: HEIGHT - i32::try_from(row).unwrap(),
                            blocks_above,
                        });
                        break;
                    }
                }
            }
            holes
        })
    }

    /// Height from the bottom of the highest first-covered-empty-cell, or 0
    /// when the board has no holes.
    #[must_use]
    pub fn highest_hole(&self) -> i32 {
        self.column_holes()
            .iter()
            .flatten()
            .map(|hole| hole.height)
            .max()
            .unwrap_or(0)
    }

    /// Occupied cells above the hole in whichever column attains
    /// [`highest_hole`](Self::highest_hole); ties keep the larger count.
    #[must_use]
    pub fn blocks_above_highest_hole(&self) -> i32 {
        let highest = self.highest_hole();
        self.column_holes()
            .iter()
            .flatten()
            .filter(|hole| hole.height == highest)
            .map(|hole| hole.blocks_above)
            .max()
            .unwrap_or(0)
    }

    /// Occupied/empty adjacency changes along each row, both side walls
    /// treated as occupied. A row contributes only when its scan enters a
    /// block from an empty cell, so empty rows (and rows whose only blocks
    /// extend the left wall) count zero.
    #[must_use]
    pub fn row_transitions(&self) -> i32 {
        *self.row_transitions.get_or_init(|| {
            let mut total = 0;
            for row in 0..Board::HEIGHT {
                let mut in_block = true;
                let mut valid_row = false;
                let mut transitions = 0;
                for col in 0..Board::WIDTH {
                    let occupied = self.board.occupied(col, row);
                    if occupied && !in_block {
                        transitions += 1;
                        in_block = true;
                        valid_row = true;
                    }
                    if !occupied && in_block {
                        transitions += 1;
                        in_block = false;
                    }
                }
                if !in_block {
                    transitions += 1;
                }
                if valid_row {
                    total += transitions;
                }
            }
            total
        })
    }

    /// Occupied/empty adjacency changes along each column, scanned bottom to
    /// top with the floor treated as occupied, summed over columns whose
    /// scan enters a block from an empty cell. The total is then discounted
    /// by one transition per non-well column (surface wells keep their top
    /// edge) and saturates at zero.
    #[must_use]
    pub fn col_transitions(&self) -> i32 {
        *self.col_transitions.get_or_init(|| {
            let mut total = 0;
            for col in 0..Board::WIDTH {
                let mut in_block = true;
                let mut valid_col = false;
                let mut transitions = 0;
                for row in (0..Board::HEIGHT).rev() {
                    let occupied = self.board.occupied(col, row);
                    if occupied && !in_block {
                        transitions += 1;
                        in_block = true;
                        valid_col = true;
                    }
                    if !occupied && in_block {
                        transitions += 1;
                        in_block = false;
                    }
                }
                if valid_col {
                    total += transitions;
                }
            }
            let discount = WIDTH - self.well_column_count();
            i32::max(total - discount, 0)
        })
    }

    /// Total occupied cells.
    #[must_use]
    pub fn blocks(&self) -> i32 {
        *self.blocks.get_or_init(|| {
            let mut count = 0;
            for row in 0..Board::HEIGHT {
                for col in 0..Board::WIDTH {
                    if self.board.occupied(col, row) {
                        count += 1;
                    }
                }
            }
            count
        })
    }

    /// Occupied cells weighted by height from the bottom: a cell in row `r`
    /// contributes `HEIGHT - r`.
    #[must_use]
    pub fn weighted_blocks(&self) -> i32 {
        *self.weighted_blocks.get_or_init(|| {
            let mut weighted = 0;
            for row in 0..Board::HEIGHT {
                for col in 0..Board::WIDTH {
                    if self.board.occupied(col, row) {
                        weighted += HEIGHT - i32::try_from(row).unwrap();
                    }
                }
            }
            weighted
        })
    }

    /// Sum of absolute well-depth differences between adjacent columns.
    #[must_use]
    pub fn smoothness(&self) -> i32 {
        *self.smoothness.get_or_init(|| {
            self.well_depths()
                .windows(2)
                .map(|pair| (pair[0] - pair[1]).abs())
                .sum()
        })
    }

    /// Rows exactly one empty cell short of clearing.
    #[must_use]
    pub fn potential_rows(&self) -> i32 {
        *self.potential_rows.get_or_init(|| {
            let mut count = 0;
            for row in 0..Board::HEIGHT {
                let empty_cells = (0..Board::WIDTH)
                    .filter(|&col| !self.board.occupied(col, row))
                    .count();
                if empty_cells == 1 {
                    count += 1;
                }
            }
            count
        })
    }

    /// Rows containing at least one covered empty cell.
    #[must_use]
    pub fn row_holes(&self) -> i32 {
        *self.row_holes.get_or_init(|| {
            let depths = self.well_depths();
            let mut count = 0;
            for row in 0..Board::HEIGHT {
                let row_depth = i32::try_from(row).unwrap();
                let has_hole = (0..Board::WIDTH)
                    .any(|col| row_depth > depths[col] && !self.board.occupied(col, row));
                if has_hole {
                    count += 1;
                }
            }
            count
        })
    }

    /// Sum over covered empty cells of the occupied cells above them in the
    /// same column.
    #[must_use]
    pub fn hole_depth(&self) -> i32 {
        *self.hole_depth.get_or_init(|| {
            let mut total = 0;
            for col in 0..Board::WIDTH {
                let mut blocks_above = 0;
                for row in 0..Board::HEIGHT {
                    if self.board.occupied(col, row) {
                        blocks_above += 1;
                    } else if blocks_above > 0 {
                        total += blocks_above;
                    }
                }
            }
            total
        })
    }
}

use rand::{Rng, distr::StandardUniform, prelude::Distribution};
use serde::{Deserialize, Serialize};

use super::BOARD_WIDTH;

/// Occupancy mask of a piece within its 4×4 bounding box.
///
/// Element `y` is a 4-bit row, bit `x` = column `x`. Masks are static data:
/// one per valid (kind, rotation) pair, fixed for the lifetime of the
/// process.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShapeMask {
    rows: [u8; 4],
}

impl ShapeMask {
    /// Checks the cell at (`x`, `y`) of the bounding box.
    #[must_use]
    pub fn is_set(self, x: usize, y: usize) -> bool {
        assert!(x < 4 && y < 4, "mask query out of range: ({x}, {y})");
        (self.rows[y] & (1 << x)) != 0
    }

    /// Iterates the occupied cells of the bounding box as (x, y) offsets.
    pub fn cells(self) -> impl Iterator<Item = (usize, usize)> {
        (0..4usize).flat_map(move |y| {
            (0..4usize).filter_map(move |x| ((self.rows[y] & (1 << x)) != 0).then_some((x, y)))
        })
    }

    /// Index of the topmost bounding-box row containing an occupied cell.
    #[must_use]
    pub fn top_occupied_row(self) -> usize {
        self.rows.iter().take_while(|row| **row == 0).count()
    }
}

/// Builds one mask row from booleans, leftmost cell first.
const fn r(cells: [bool; 4]) -> u8 {
    let mut bits = 0;
    let mut x = 0;
    while x < 4 {
        if cells[x] {
            bits |= 1 << x;
        }
        x += 1;
    }
    bits
}

const C: bool = true;
const E: bool = false;
const EEEE: u8 = r([E; 4]);

const fn mask(rows: [u8; 4]) -> ShapeMask {
    ShapeMask { rows }
}

// Rotation catalogues. The square has a single state, the bar and the two
// S-curves alternate between two, the asymmetric shapes cycle through four.
const O_MASKS: [ShapeMask; 1] = [mask([EEEE, r([E, C, C, E]), r([E, C, C, E]), EEEE])];

const I_MASKS: [ShapeMask; 2] = [
    mask([EEEE, r([C, C, C, C]), EEEE, EEEE]),
    mask([r([E, E, C, E]); 4]),
];

const S_MASKS: [ShapeMask; 2] = [
    mask([EEEE, r([E, E, C, C]), r([E, C, C, E]), EEEE]),
    mask([r([E, E, C, E]), r([E, E, C, C]), r([E, E, E, C]), EEEE]),
];

const Z_MASKS: [ShapeMask; 2] = [
    mask([EEEE, r([E, C, C, E]), r([E, E, C, C]), EEEE]),
    mask([r([E, E, E, C]), r([E, E, C, C]), r([E, E, C, E]), EEEE]),
];

const L_MASKS: [ShapeMask; 4] = [
    mask([EEEE, r([E, C, C, C]), r([E, C, E, E]), EEEE]),
    mask([r([E, E, C, E]), r([E, E, C, E]), r([E, E, C, C]), EEEE]),
    mask([r([E, E, E, C]), r([E, C, C, C]), EEEE, EEEE]),
    mask([r([E, C, C, E]), r([E, E, C, E]), r([E, E, C, E]), EEEE]),
];

const J_MASKS: [ShapeMask; 4] = [
    mask([EEEE, r([E, C, C, C]), r([E, E, E, C]), EEEE]),
    mask([r([E, E, C, C]), r([E, E, C, E]), r([E, E, C, E]), EEEE]),
    mask([r([E, C, E, E]), r([E, C, C, C]), EEEE, EEEE]),
    mask([r([E, E, C, E]), r([E, E, C, E]), r([E, C, C, E]), EEEE]),
];

const T_MASKS: [ShapeMask; 4] = [
    mask([EEEE, r([E, C, C, C]), r([E, E, C, E]), EEEE]),
    mask([r([E, E, C, E]), r([E, E, C, C]), r([E, E, C, E]), EEEE]),
    mask([r([E, E, C, E]), r([E, C, C, C]), EEEE, EEEE]),
    mask([r([E, E, C, E]), r([E, C, C, E]), r([E, E, C, E]), EEEE]),
];

/// Enum over the seven shape families.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[repr(u8)]
pub enum PieceKind {
    /// Square.
    O = 0,
    /// Straight bar.
    I = 1,
    /// S-curve.
    S = 2,
    /// Reversed S-curve.
    Z = 3,
    /// L-shape.
    L = 4,
    /// Reversed L-shape.
    J = 5,
    /// T-shape.
    T = 6,
}

impl Distribution<PieceKind> for StandardUniform {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> PieceKind {
        match rng.random_range(0..=6) {
            0 => PieceKind::O,
            1 => PieceKind::I,
            2 => PieceKind::S,
            3 => PieceKind::Z,
            4 => PieceKind::L,
            5 => PieceKind::J,
            _ => PieceKind::T,
        }
    }
}

impl PieceKind {
    /// Number of shape families (7).
    pub const LEN: usize = 7;

    /// All families, in catalogue order.
    pub const ALL: [Self; Self::LEN] = [
        Self::O,
        Self::I,
        Self::S,
        Self::Z,
        Self::L,
        Self::J,
        Self::T,
    ];

    /// Number of distinct rotation states of this family.
    #[must_use]
    pub const fn rotation_count(self) -> u8 {
        match self {
            PieceKind::O => 1,
            PieceKind::I | PieceKind::S | PieceKind::Z => 2,
            PieceKind::L | PieceKind::J | PieceKind::T => 4,
        }
    }

    const fn masks(self) -> &'static [ShapeMask] {
        match self {
            PieceKind::O => &O_MASKS,
            PieceKind::I => &I_MASKS,
            PieceKind::S => &S_MASKS,
            PieceKind::Z => &Z_MASKS,
            PieceKind::L => &L_MASKS,
            PieceKind::J => &J_MASKS,
            PieceKind::T => &T_MASKS,
        }
    }

    /// Looks up the mask for a rotation state.
    ///
    /// Returns `None` when `rotation` is not a valid state for this family,
    /// never an empty or garbage mask.
    #[must_use]
    pub fn mask(self, rotation: u8) -> Option<ShapeMask> {
        self.masks().get(usize::from(rotation)).copied()
    }

    /// Single-character tag of this family.
    #[must_use]
    pub const fn as_char(self) -> char {
        match self {
            PieceKind::O => 'O',
            PieceKind::I => 'I',
            PieceKind::S => 'S',
            PieceKind::Z => 'Z',
            PieceKind::L => 'L',
            PieceKind::J => 'J',
            PieceKind::T => 'T',
        }
    }

    /// Parses a family from its single-character tag.
    #[must_use]
    pub const fn from_char(c: char) -> Option<Self> {
        match c {
            'O' => Some(PieceKind::O),
            'I' => Some(PieceKind::I),
            'S' => Some(PieceKind::S),
            'Z' => Some(PieceKind::Z),
            'L' => Some(PieceKind::L),
            'J' => Some(PieceKind::J),
            'T' => Some(PieceKind::T),
            _ => None,
        }
    }
}

/// A piece at a position and orientation on (or around) the board.
///
/// The anchor (`col`, `row`) is the board position of the mask's top-left
/// cell and is deliberately signed: shifts are unchecked translations, and a
/// mask whose occupied cells sit away from the bounding-box edge may have a
/// negative anchor while every occupied cell is still on the board. Callers
/// validate legality against the [`Board`](crate::Board).
///
/// Pieces are immutable; transforms return new values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Piece {
    kind: PieceKind,
    rotation: u8,
    col: i16,
    row: i16,
}

#[expect(clippy::cast_possible_truncation)]
const SPAWN_COL: i16 = ((BOARD_WIDTH - 4) / 2) as i16;

impl Piece {
    /// Creates a piece in its spawn state: rotation 0, centered at the top.
    #[must_use]
    pub const fn new(kind: PieceKind) -> Self {
        Self {
            kind,
            rotation: 0,
            col: SPAWN_COL,
            row: 0,
        }
    }

    /// Creates a piece from explicit parts.
    ///
    /// Returns `None` when `rotation` is not a valid state for `kind`.
    #[must_use]
    pub fn from_parts(kind: PieceKind, rotation: u8, col: i16, row: i16) -> Option<Self> {
        (rotation < kind.rotation_count()).then_some(Self {
            kind,
            rotation,
            col,
            row,
        })
    }

    #[must_use]
    pub fn kind(&self) -> PieceKind {
        self.kind
    }

    #[must_use]
    pub fn rotation(&self) -> u8 {
        self.rotation
    }

    #[must_use]
    pub fn col(&self) -> i16 {
        self.col
    }

    #[must_use]
    pub fn row(&self) -> i16 {
        self.row
    }

    /// The 4×4 mask of the current rotation state.
    #[must_use]
    pub fn mask(&self) -> ShapeMask {
        // The rotation index is kept in range by construction.
        self.kind.masks()[usize::from(self.rotation)]
    }

    /// Iterates the piece's occupied cells in board coordinates.
    #[expect(clippy::cast_possible_truncation)]
    pub fn cells(&self) -> impl Iterator<Item = (i32, i32)> + use<> {
        let (col, row) = (i32::from(self.col), i32::from(self.row));
        self.mask()
            .cells()
            .map(move |(dx, dy)| (col + dx as i32, row + dy as i32))
    }

    /// Steps to the next rotation state counterclockwise.
    ///
    /// The square is a no-op, two-state families alternate, four-state
    /// families cycle.
    #[must_use]
    pub fn rotated_left(&self) -> Self {
        let count = self.kind.rotation_count();
        Self {
            rotation: (self.rotation + 1) % count,
            ..*self
        }
    }

    /// Steps to the next rotation state clockwise.
    #[must_use]
    pub fn rotated_right(&self) -> Self {
        let count = self.kind.rotation_count();
        Self {
            rotation: (self.rotation + count - 1) % count,
            ..*self
        }
    }

    /// Translates one column left. No bounds checking.
    #[must_use]
    pub fn shifted_left(&self) -> Self {
        Self {
            col: self.col - 1,
            ..*self
        }
    }

    /// Translates one column right. No bounds checking.
    #[must_use]
    pub fn shifted_right(&self) -> Self {
        Self {
            col: self.col + 1,
            ..*self
        }
    }

    /// Translates one row up. No bounds checking.
    #[must_use]
    pub fn shifted_up(&self) -> Self {
        Self {
            row: self.row - 1,
            ..*self
        }
    }

    /// Translates one row down. No bounds checking.
    #[must_use]
    pub fn shifted_down(&self) -> Self {
        Self {
            row: self.row + 1,
            ..*self
        }
    }
}

impl Serialize for Piece {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        // Format: "kind#rotation@col,row" (e.g., "S#1@4,18")
        let s = format!(
            "{}#{}@{},{}",
            self.kind.as_char(),
            self.rotation,
            self.col,
            self.row
        );
        serializer.serialize_str(&s)
    }
}

impl<'de> Deserialize<'de> for Piece {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        use serde::de::Error;

        let s = String::deserialize(deserializer)?;
        let malformed =
            || D::Error::custom(format!("expected format 'kind#rotation@col,row', got '{s}'"));

        let (kind_str, rest) = s.split_once('#').ok_or_else(malformed)?;
        let (rotation_str, position_str) = rest.split_once('@').ok_or_else(malformed)?;
        let (col_str, row_str) = position_str.split_once(',').ok_or_else(malformed)?;

        let mut kind_chars = kind_str.chars();
        let kind = kind_chars
            .next()
            .filter(|_| kind_chars.next().is_none())
            .and_then(PieceKind::from_char)
            .ok_or_else(|| D::Error::custom(format!("invalid piece kind: '{kind_str}'")))?;

        let rotation = rotation_str
            .parse::<u8>()
            .map_err(|e| D::Error::custom(format!("invalid rotation: {rotation_str} ({e})")))?;

        let col = col_str
            .parse::<i16>()
            .map_err(|e| D::Error::custom(format!("invalid column: {col_str} ({e})")))?;
        let row = row_str
            .parse::<i16>()
            .map_err(|e| D::Error::custom(format!("invalid row: {row_str} ({e})")))?;

        Piece::from_parts(kind, rotation, col, row).ok_or_else(|| {
            D::Error::custom(format!(
                "rotation {rotation} is not a state of the {} family",
                kind.as_char()
            ))
        })
    }
}

use std::sync::LazyLock;

use arrayvec::ArrayVec;
use rand::{Rng, distr::StandardUniform, prelude::Distribution};
use serde::{Deserialize, Serialize};

use crate::GeometryError;

/// Maximum side length of a piece bounding box.
///
/// The I-piece is 4 cells long; every other canonical shape fits in 3x3.
pub const MAX_SHAPE_DIM: usize = 4;

type ShapeRow = ArrayVec<bool, MAX_SHAPE_DIM>;
type ShapeRows = ArrayVec<ShapeRow, MAX_SHAPE_DIM>;

/// Enum representing the type of piece.
///
/// The discriminant is the piece's index in the canonical catalog, and also
/// determines the tag stored in board cells (index + 1, see
/// [`Cell::tag`](crate::Cell::tag)).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[repr(u8)]
pub enum PieceKind {
    /// I-piece.
    I = 0,
    /// O-piece.
    O = 1,
    /// T-piece.
    T = 2,
    /// L-piece.
    L = 3,
    /// J-piece.
    J = 4,
    /// S-piece.
    S = 5,
    /// Z-piece.
    Z = 6,
}

impl Distribution<PieceKind> for StandardUniform {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> PieceKind {
        match rng.random_range(0..=6) {
            0 => PieceKind::I,
            1 => PieceKind::O,
            2 => PieceKind::T,
            3 => PieceKind::L,
            4 => PieceKind::J,
            5 => PieceKind::S,
            _ => PieceKind::Z,
        }
    }
}

impl PieceKind {
    /// Number of piece types (7).
    pub const LEN: usize = 7;

    /// All piece kinds in catalog order.
    pub const ALL: [Self; Self::LEN] = [
        PieceKind::I,
        PieceKind::O,
        PieceKind::T,
        PieceKind::L,
        PieceKind::J,
        PieceKind::S,
        PieceKind::Z,
    ];

    /// Returns the catalog index of this kind.
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }
}

/// A rectangular boolean occupancy grid for one orientation of a piece.
///
/// The grid is at most [`MAX_SHAPE_DIM`] cells on a side and every row has
/// the same width. Rotation produces a new grid; for non-square bounding
/// boxes the width and height swap.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShapeGrid {
    rows: ShapeRows,
}

impl ShapeGrid {
    /// Builds a grid from row slices, validating the geometry.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError`] if the grid is empty, has rows of unequal
    /// width, or does not fit the piece bounding box.
    pub fn from_rows(rows: &[&[bool]]) -> Result<Self, GeometryError> {
        let Some(first) = rows.first() else {
            return Err(GeometryError::Empty);
        };
        let width = first.len();
        if width == 0 {
            return Err(GeometryError::Empty);
        }
        if rows.len() > MAX_SHAPE_DIM || width > MAX_SHAPE_DIM {
            return Err(GeometryError::Oversized);
        }
        if rows.iter().any(|row| row.len() != width) {
            return Err(GeometryError::RaggedRows);
        }
        let rows = rows
            .iter()
            .map(|row| row.iter().copied().collect())
            .collect();
        Ok(Self { rows })
    }

    /// Width of the bounding box in cells.
    #[must_use]
    pub fn width(&self) -> usize {
        self.rows[0].len()
    }

    /// Height of the bounding box in cells.
    #[must_use]
    pub fn height(&self) -> usize {
        self.rows.len()
    }

    /// Returns whether the cell at (x, y) within the bounding box is occupied.
    #[must_use]
    pub fn is_occupied(&self, x: usize, y: usize) -> bool {
        self.rows[y][x]
    }

    /// Iterates over the rows of the grid as boolean slices.
    pub fn rows(&self) -> impl Iterator<Item = &[bool]> {
        self.rows.iter().map(|row| row.as_slice())
    }

    /// Iterates over the (dx, dy) offsets of every occupied cell.
    pub fn occupied_offsets(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.rows.iter().enumerate().flat_map(|(dy, row)| {
            row.iter()
                .enumerate()
                .filter_map(move |(dx, &cell)| cell.then_some((dx, dy)))
        })
    }

    /// Returns the grid rotated 90 degrees clockwise.
    ///
    /// `new[i][j] = old[height - 1 - j][i]`, i.e. transpose then reverse each
    /// resulting row. Does not mutate; the caller decides whether to commit.
    #[must_use]
    pub fn rotated(&self) -> Self {
        let height = self.height();
        let mut rows = ShapeRows::new();
        for x in 0..self.width() {
            let mut row = ShapeRow::new();
            for y in (0..height).rev() {
                row.push(self.rows[y][x]);
            }
            rows.push(row);
        }
        Self { rows }
    }
}

/// One entry of the geometry catalog: a canonical shape and its identity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShapeTemplate {
    kind: PieceKind,
    grid: ShapeGrid,
}

impl ShapeTemplate {
    /// The identity tag shared by every piece created from this template.
    #[must_use]
    pub fn kind(&self) -> PieceKind {
        self.kind
    }

    /// The canonical (spawn orientation) occupancy grid.
    #[must_use]
    pub fn grid(&self) -> &ShapeGrid {
        &self.grid
    }
}

static CATALOG: LazyLock<[ShapeTemplate; PieceKind::LEN]> = LazyLock::new(build_catalog);

fn build_catalog() -> [ShapeTemplate; PieceKind::LEN] {
    const C: bool = true;
    const E: bool = false;

    fn entry(kind: PieceKind, rows: &[&[bool]]) -> ShapeTemplate {
        let grid = ShapeGrid::from_rows(rows).expect("canonical shape templates are well-formed");
        ShapeTemplate { kind, grid }
    }

    [
        entry(PieceKind::I, &[&[C, C, C, C]]),
        entry(PieceKind::O, &[&[C, C], &[C, C]]),
        entry(PieceKind::T, &[&[C, C, C], &[E, C, E]]),
        entry(PieceKind::L, &[&[C, C, C], &[C, E, E]]),
        entry(PieceKind::J, &[&[C, C, C], &[E, E, C]]),
        entry(PieceKind::S, &[&[C, C, E], &[E, C, C]]),
        entry(PieceKind::Z, &[&[E, C, C], &[C, C, E]]),
    ]
}

/// Returns the fixed ordered catalog of the 7 canonical shape templates.
#[must_use]
pub fn templates() -> &'static [ShapeTemplate; PieceKind::LEN] {
    &CATALOG
}

/// Looks up the canonical template for a piece kind.
#[must_use]
pub fn template(kind: PieceKind) -> &'static ShapeTemplate {
    &CATALOG[kind.index()]
}

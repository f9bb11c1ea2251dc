use rand::Rng;

use super::{
    board::BOARD_COLS,
    shape::{self, PieceKind, ShapeGrid, ShapeTemplate},
};

/// A live piece: a shape grid at a board position.
///
/// The identity [`PieceKind`] is fixed when the piece is created from its
/// originating template and never changes, even though the shape grid
/// rotates. Movement and rotation return new `Piece` values; collision
/// checking is the board's responsibility, consulted by the session before
/// a transform is committed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Piece {
    shape: ShapeGrid,
    kind: PieceKind,
    x: i32,
    y: i32,
}

impl Piece {
    /// Creates a piece from a catalog template, horizontally centered at the
    /// spawn row.
    #[must_use]
    pub fn from_template(template: &ShapeTemplate) -> Self {
        let shape = template.grid().clone();
        let x = spawn_x(shape.width());
        Self {
            shape,
            kind: template.kind(),
            x,
            y: 0,
        }
    }

    /// Creates a piece from a kind sampled uniformly over the catalog.
    #[must_use]
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self::from_template(shape::template(rng.random()))
    }

    #[must_use]
    pub fn shape(&self) -> &ShapeGrid {
        &self.shape
    }

    #[must_use]
    pub fn kind(&self) -> PieceKind {
        self.kind
    }

    #[must_use]
    pub fn x(&self) -> i32 {
        self.x
    }

    #[must_use]
    pub fn y(&self) -> i32 {
        self.y
    }

    /// Returns the piece translated by (dx, dy). Does not collision-check.
    #[must_use]
    pub fn translated(&self, dx: i32, dy: i32) -> Self {
        Self {
            shape: self.shape.clone(),
            kind: self.kind,
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    /// Returns the piece rotated 90 degrees clockwise in place.
    ///
    /// The position is unchanged; the bounding box may swap width and height.
    /// Does not collision-check.
    #[must_use]
    pub fn rotated(&self) -> Self {
        Self {
            shape: self.shape.rotated(),
            kind: self.kind,
            x: self.x,
            y: self.y,
        }
    }

    /// Iterates over the absolute board coordinates of every occupied cell.
    ///
    /// Coordinates are signed: cells above the visible grid have `y < 0`.
    #[expect(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
    pub fn occupied_cells(&self) -> impl Iterator<Item = (i32, i32)> + '_ {
        self.shape
            .occupied_offsets()
            .map(|(dx, dy)| (self.x + dx as i32, self.y + dy as i32))
    }
}

#[expect(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
fn spawn_x(width: usize) -> i32 {
    ((BOARD_COLS - width) / 2) as i32
}

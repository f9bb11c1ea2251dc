pub use self::{core::*, engine::*};

pub mod core;
pub mod engine;

/// Construction-time fault in a shape grid.
///
/// Raised when building a [`ShapeGrid`] from malformed row data. This is a
/// programmer error surfaced at catalog initialization, not a runtime
/// condition the engine recovers from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum GeometryError {
    /// The grid has no rows or a zero-width row.
    #[display("shape grid is empty")]
    Empty,
    /// Not every row has the same number of cells.
    #[display("shape grid rows have inconsistent widths")]
    RaggedRows,
    /// The grid does not fit the 4x4 piece bounding box.
    #[display("shape grid exceeds the 4x4 piece bounding box")]
    Oversized,
}

use super::{piece::Piece, shape::PieceKind};

/// Number of rows in the playable grid.
pub const BOARD_ROWS: usize = 20;
/// Number of columns in the playable grid.
pub const BOARD_COLS: usize = 10;

/// A single cell of the board grid.
///
/// A filled cell remembers the identity of the piece that locked into it,
/// which is what rendering layers use to pick a color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Cell {
    /// Empty cell (no locked piece).
    #[default]
    Empty,
    /// Cell occupied by a locked piece of the given kind.
    Filled(PieceKind),
}

impl Cell {
    #[must_use]
    pub fn is_empty(self) -> bool {
        self == Cell::Empty
    }

    /// Integer tag for snapshots: 0 for empty, catalog index + 1 for filled.
    ///
    /// Tag 0 stays reserved for empty so a snapshot grid is self-describing.
    #[must_use]
    #[expect(clippy::cast_possible_truncation)]
    pub fn tag(self) -> u8 {
        match self {
            Cell::Empty => 0,
            Cell::Filled(kind) => kind.index() as u8 + 1,
        }
    }
}

/// Tag grid view of the board, row 0 first.
pub type BoardSnapshot = [[u8; BOARD_COLS]; BOARD_ROWS];

/// The fixed-size playing field.
///
/// Rows are ordered top to bottom; row 0 is the spawn row. Dimensions never
/// change after creation. The board owns collision testing, locking a piece
/// into the grid, and row clearing; it never moves pieces itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    rows: [[Cell; BOARD_COLS]; BOARD_ROWS],
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl Board {
    /// Creates an all-empty board.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            rows: [[Cell::Empty; BOARD_COLS]; BOARD_ROWS],
        }
    }

    /// Returns the cell grid, row 0 first.
    #[must_use]
    pub fn rows(&self) -> &[[Cell; BOARD_COLS]; BOARD_ROWS] {
        &self.rows
    }

    /// Writes a single cell. Intended for hosts seeding scenarios and tests.
    pub fn fill(&mut self, x: usize, y: usize, cell: Cell) {
        self.rows[y][x] = cell;
    }

    /// Returns the integer tag grid described in the cell documentation.
    #[must_use]
    pub fn snapshot(&self) -> BoardSnapshot {
        let mut grid = [[0; BOARD_COLS]; BOARD_ROWS];
        for (y, row) in self.rows.iter().enumerate() {
            for (x, cell) in row.iter().enumerate() {
                grid[y][x] = cell.tag();
            }
        }
        grid
    }

    /// Tests whether the piece overlaps a wall, the floor, or locked content.
    ///
    /// Cells above the visible grid (`y < 0`) are checked against the side
    /// walls only, never against board content, so a piece may spawn or
    /// rotate with part of its bounding box above row 0.
    #[must_use]
    pub fn collides(&self, piece: &Piece) -> bool {
        piece.occupied_cells().any(|(x, y)| self.cell_blocked(x, y))
    }

    fn cell_blocked(&self, x: i32, y: i32) -> bool {
        let Ok(x) = usize::try_from(x) else {
            return true; // left of the board
        };
        if x >= BOARD_COLS {
            return true;
        }
        let Ok(y) = usize::try_from(y) else {
            return false; // above the visible grid
        };
        y >= BOARD_ROWS || !self.rows[y][x].is_empty()
    }

    /// Locks the piece's cells into the grid.
    ///
    /// Cells with `y < 0` are dropped: content still above the visible grid
    /// at lock time is lost by design rather than recovered or reported.
    pub fn merge(&mut self, piece: &Piece) {
        for (x, y) in piece.occupied_cells() {
            let (Ok(x), Ok(y)) = (usize::try_from(x), usize::try_from(y)) else {
                continue;
            };
            self.rows[y][x] = Cell::Filled(piece.kind());
        }
    }

    /// Clears every fully-occupied row and returns how many were removed.
    ///
    /// Rows above a cleared row shift down one step and an empty row appears
    /// at the top, so adjacent simultaneously-full rows clear correctly.
    pub fn clear_full_rows(&mut self) -> usize {
        let mut cleared = 0;
        for y in (0..BOARD_ROWS).rev() {
            if self.rows[y].iter().all(|cell| !cell.is_empty()) {
                cleared += 1;
                continue;
            }
            if cleared > 0 {
                self.rows[y + cleared] = self.rows[y];
            }
        }
        self.rows[..cleared].fill([Cell::Empty; BOARD_COLS]);
        cleared
    }

    /// Returns true when the spawn row is obstructed.
    #[must_use]
    pub fn is_game_over(&self) -> bool {
        self.rows[0].iter().any(|cell| !cell.is_empty())
    }
}

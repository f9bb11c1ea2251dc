/// Points awarded per cleared row, multiplied by the current level.
pub const POINTS_PER_ROW: usize = 100;

/// Score threshold step for leveling: the level increments when the score
/// reaches `level * LEVEL_UP_STEP`.
pub const LEVEL_UP_STEP: usize = 1000;

/// Score, level, and lock counters for one game.
///
/// Score and level only ever increase during a session. The level feeds back
/// into scoring only; fall cadence is owned by the external timing driver.
///
/// # Example
///
/// ```
/// use quadris_engine::Progress;
///
/// let mut progress = Progress::new();
/// progress.record_lock(2);
///
/// assert_eq!(progress.score(), 200);
/// assert_eq!(progress.level(), 1);
/// assert_eq!(progress.completed_pieces(), 1);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Progress {
    score: usize,
    level: usize,
    completed_pieces: usize,
    total_cleared_rows: usize,
}

impl Default for Progress {
    fn default() -> Self {
        Self::new()
    }
}

impl Progress {
    /// Creates progress for a fresh game: zero score, level 1.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            score: 0,
            level: 1,
            completed_pieces: 0,
            total_cleared_rows: 0,
        }
    }

    #[must_use]
    pub const fn score(&self) -> usize {
        self.score
    }

    #[must_use]
    pub const fn level(&self) -> usize {
        self.level
    }

    /// Total number of pieces locked into the board.
    #[must_use]
    pub const fn completed_pieces(&self) -> usize {
        self.completed_pieces
    }

    /// Total rows cleared across the whole game.
    #[must_use]
    pub const fn total_cleared_rows(&self) -> usize {
        self.total_cleared_rows
    }

    /// Records one locked piece and the rows it cleared.
    ///
    /// Clearing rows awards `rows * POINTS_PER_ROW * level` points, then the
    /// level increments once if the score has reached `level * LEVEL_UP_STEP`.
    pub const fn record_lock(&mut self, cleared_rows: usize) {
        self.completed_pieces += 1;
        self.total_cleared_rows += cleared_rows;
        if cleared_rows == 0 {
            return;
        }
        self.score += cleared_rows * POINTS_PER_ROW * self.level;
        if self.score >= self.level * LEVEL_UP_STEP {
            self.level += 1;
        }
    }
}

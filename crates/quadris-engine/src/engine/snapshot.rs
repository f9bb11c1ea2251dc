use serde::{Deserialize, Serialize};

use crate::core::{board::BoardSnapshot, piece::Piece, shape::PieceKind};

use super::session::{GameSession, SessionPhase};

/// Read-only view of a piece for rendering layers.
///
/// The shape is the current (possibly rotated) occupancy grid; `(x, y)` is
/// the board-relative offset of its top-left corner.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct PieceSnapshot {
    pub kind: PieceKind,
    pub cells: Vec<Vec<bool>>,
    pub x: i32,
    pub y: i32,
}

impl From<&Piece> for PieceSnapshot {
    fn from(piece: &Piece) -> Self {
        Self {
            kind: piece.kind(),
            cells: piece.shape().rows().map(<[bool]>::to_vec).collect(),
            x: piece.x(),
            y: piece.y(),
        }
    }
}

/// Fully-consistent post-command view of a session.
///
/// Everything a rendering layer needs: the board tag grid (0 for empty,
/// catalog index + 1 for filled), the active and preview pieces, score,
/// level, and phase. Serializable so hosts can log or transmit it.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct SessionSnapshot {
    pub board: BoardSnapshot,
    pub current: PieceSnapshot,
    pub next: PieceSnapshot,
    pub score: usize,
    pub level: usize,
    pub phase: SessionPhase,
}

impl SessionSnapshot {
    pub(crate) fn of(session: &GameSession) -> Self {
        Self {
            board: session.board().snapshot(),
            current: session.current_piece().into(),
            next: session.next_piece().into(),
            score: session.score(),
            level: session.level(),
            phase: *session.phase(),
        }
    }
}

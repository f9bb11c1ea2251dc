//! Session orchestration on top of the core data structures.
//!
//! - [`GameSession`] - owns the board and the current/next pieces, and runs
//!   the tick/command protocol
//! - [`Progress`] - score, level, and lock counters
//! - [`SessionSnapshot`] - serializable read-only view for host programs
//!
//! # Game flow
//!
//! 1. Create a [`GameSession`] (it starts idle) and call [`GameSession::start`]
//! 2. An external timing driver calls [`GameSession::tick`] at its own cadence
//! 3. An external input layer calls the movement and rotation commands
//! 4. A renderer reads the observation surface, never mutating anything
//! 5. When the spawn row is obstructed the session reaches game over;
//!    `start` begins a fresh game
//!
//! The engine is agnostic to real-world timing: a tick is the logical
//! "move the active piece down one row" event, nothing more.
//!
//! # Example
//!
//! ```
//! use quadris_engine::{GameSession, SessionPhase};
//!
//! let mut session = GameSession::with_seed(7);
//! session.start();
//!
//! session.move_left();
//! session.rotate();
//! session.tick();
//!
//! assert_eq!(*session.phase(), SessionPhase::Running);
//! assert_eq!(session.score(), 0);
//! ```

pub use self::{progress::*, session::*, snapshot::*};

mod progress;
mod session;
mod snapshot;

//! Practice session management
//!
//! This module provides the `PracticeSession` controller that owns:
//! - The current question and filter selection
//! - The per-question countdown and its tick task
//! - Recording start/stop delegation and the clip list
//! - The append-only attempt history

mod history;
mod session;
mod state;

pub use history::HistoryEntry;
pub use session::PracticeSession;
pub use state::{SessionSnapshot, SessionState};

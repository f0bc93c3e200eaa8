use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::question::Question;

/// One completed question attempt.
///
/// History is append-only within a session; entries are never mutated or
/// removed.
#[derive(Debug, Clone, Serialize)]
pub struct HistoryEntry {
    /// The question that was attempted
    pub question: Question,

    /// When the attempt ended
    pub attempted_at: DateTime<Utc>,

    /// Seconds spent on the question (configured duration minus what was
    /// left on the countdown when advancing)
    pub time_spent_secs: u32,
}

use serde::Serialize;

use crate::question::{Difficulty, Question, QuestionFilter};
use crate::timer::Countdown;

/// The single mutable session state, owned by the controller.
///
/// Invariant: while a recording is active, `current_question` is `Some`; the
/// controller enforces this at every transition that clears the question.
#[derive(Debug, Clone)]
pub struct SessionState {
    pub current_question: Option<Question>,
    pub countdown: Countdown,
    pub show_answer: bool,
    pub filter: QuestionFilter,
}

impl SessionState {
    pub fn new(default_duration_secs: u32) -> Self {
        Self {
            current_question: None,
            countdown: Countdown::new(default_duration_secs),
            show_answer: false,
            filter: QuestionFilter::default(),
        }
    }
}

/// Read-only view of the live session state
#[derive(Debug, Clone, Serialize)]
pub struct SessionSnapshot {
    pub current_question: Option<Question>,
    pub remaining_secs: u32,
    pub configured_secs: u32,
    pub timer_active: bool,
    pub is_recording: bool,
    pub show_answer: bool,
    /// Selected category, `None` meaning "all"
    pub category: Option<String>,
    /// Selected difficulty, `None` meaning "all"
    pub difficulty: Option<Difficulty>,
    pub history_len: usize,
    pub recordings_len: usize,
}

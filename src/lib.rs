pub mod alert;
pub mod audio;
pub mod config;
pub mod question;
pub mod recorder;
pub mod session;
pub mod timer;

pub use alert::{AlertPlayer, TerminalBell};
pub use audio::{AudioFrame, CaptureDevice, CaptureError, ClipInfo, ClipWriter, SilenceDevice};
pub use config::Config;
pub use question::{
    pick_random, AnswerKey, CategoryFilter, Difficulty, DifficultyFilter, Question, QuestionBank,
    QuestionFilter,
};
pub use recorder::{CaptureState, Recorder, RecordingClip};
pub use session::{HistoryEntry, PracticeSession, SessionSnapshot};
pub use timer::{Countdown, TickOutcome};

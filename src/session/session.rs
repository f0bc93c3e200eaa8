use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use chrono::Utc;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tracing::{error, info, warn};

use super::history::HistoryEntry;
use super::state::{SessionSnapshot, SessionState};
use crate::alert::AlertPlayer;
use crate::question::{
    pick_random, AnswerKey, CategoryFilter, DifficultyFilter, Question, QuestionBank,
};
use crate::recorder::{Recorder, RecordingClip};
use crate::timer::TickOutcome;

/// The practice session controller.
///
/// Owns all session state and routes every mutation through a named
/// transition. The countdown is driven by a single spawned tick task whose
/// handle is stored here and aborted on every path that deactivates the
/// timer.
pub struct PracticeSession {
    bank: QuestionBank,
    answers: AnswerKey,

    state: Arc<Mutex<SessionState>>,

    /// Completed attempts, append-only
    history: Arc<Mutex<Vec<HistoryEntry>>>,

    /// Finalized answer clips, append-only
    recordings: Arc<Mutex<Vec<RecordingClip>>>,

    recorder: Arc<Mutex<Recorder>>,
    alert: Arc<dyn AlertPlayer>,

    /// Handle for the recurring tick task
    tick_task: Mutex<Option<JoinHandle<()>>>,
}

impl PracticeSession {
    pub fn new(
        bank: QuestionBank,
        answers: AnswerKey,
        recorder: Recorder,
        alert: Arc<dyn AlertPlayer>,
        default_duration_secs: u32,
    ) -> Self {
        info!(
            "Practice session created: {} questions, {}s per answer",
            bank.len(),
            default_duration_secs
        );

        Self {
            bank,
            answers,
            state: Arc::new(Mutex::new(SessionState::new(default_duration_secs))),
            history: Arc::new(Mutex::new(Vec::new())),
            recordings: Arc::new(Mutex::new(Vec::new())),
            recorder: Arc::new(Mutex::new(recorder)),
            alert,
            tick_task: Mutex::new(None),
        }
    }

    /// Move to the next question.
    ///
    /// Logs the outgoing question (if any) to history, stops an active
    /// recording, picks a new question with the current filters, hides the
    /// answer, and restarts the countdown. Returns the new question, `None`
    /// when nothing matches the filters.
    pub async fn advance(&self) -> Option<Question> {
        let (prev_question, elapsed) = {
            let state = self.state.lock().await;
            (
                state.current_question.clone(),
                state.countdown.elapsed_secs(),
            )
        };

        if let Some(question) = prev_question.clone() {
            let entry = HistoryEntry {
                question,
                attempted_at: Utc::now(),
                time_spent_secs: elapsed,
            };
            let mut history = self.history.lock().await;
            history.push(entry);
        }

        // Stop recording before the question changes so the clip is tied to
        // the question it was answering
        self.finish_recording(prev_question.as_ref()).await;

        let next = {
            let mut state = self.state.lock().await;
            let next = pick_random(self.bank.questions(), &state.filter).cloned();
            state.current_question = next.clone();
            state.show_answer = false;
            state.countdown.restart();
            next
        };

        match &next {
            Some(q) => info!("Next question: #{} ({})", q.id, q.category),
            None => warn!("No questions match the current filter"),
        }

        self.spawn_tick_task().await;

        next
    }

    /// Change the category filter. Clears the current question (stopping any
    /// recording first), hides the answer, and deactivates the countdown.
    /// Does not auto-advance.
    pub async fn set_category(&self, category: CategoryFilter) {
        self.reset_for_filter_change().await;

        let mut state = self.state.lock().await;
        state.filter.category = category;
    }

    /// Change the difficulty filter. Same reset semantics as `set_category`.
    pub async fn set_difficulty(&self, difficulty: DifficultyFilter) {
        self.reset_for_filter_change().await;

        let mut state = self.state.lock().await;
        state.filter.difficulty = difficulty;
    }

    async fn reset_for_filter_change(&self) {
        let prev_question = {
            let state = self.state.lock().await;
            state.current_question.clone()
        };

        // The current question is about to be cleared; a live recording must
        // not outlast it
        self.finish_recording(prev_question.as_ref()).await;

        {
            let mut state = self.state.lock().await;
            state.current_question = None;
            state.show_answer = false;
            state.countdown.deactivate();
        }

        self.stop_tick_task().await;
        info!("Filter changed; question cleared");
    }

    /// Show or hide the model answer. Touches nothing else.
    pub async fn toggle_answer(&self) -> bool {
        let mut state = self.state.lock().await;
        state.show_answer = !state.show_answer;
        state.show_answer
    }

    /// Change the configured answer duration in seconds.
    ///
    /// Zero is rejected and the previous duration retained; returns whether
    /// the new value was accepted.
    pub async fn set_duration(&self, secs: u32) -> bool {
        let mut state = self.state.lock().await;
        let accepted = state.countdown.set_duration(secs);
        if accepted {
            info!("Answer duration set to {}s", secs);
        }
        accepted
    }

    /// Restart the countdown from the configured duration
    pub async fn restart_timer(&self) {
        {
            let mut state = self.state.lock().await;
            state.countdown.restart();
        }
        self.spawn_tick_task().await;
        info!("Countdown restarted");
    }

    /// Start recording the spoken answer.
    ///
    /// Refused (with a warning) when no question is current; a recording must
    /// always be attributable to a question. Microphone denial is handled
    /// inside the recorder as a local no-op.
    pub async fn start_recording(&self) -> Result<()> {
        {
            let state = self.state.lock().await;
            if state.current_question.is_none() {
                warn!("No current question; recording not started");
                return Ok(());
            }
        }

        let mut recorder = self.recorder.lock().await;
        recorder.start().await
    }

    /// Stop recording and keep the clip (when a question is current)
    pub async fn stop_recording(&self) {
        let question = {
            let state = self.state.lock().await;
            state.current_question.clone()
        };
        self.finish_recording(question.as_ref()).await;
    }

    /// Advance the countdown by one second.
    ///
    /// Called by the spawned tick task once per second while the timer runs;
    /// tests drive it directly. On expiry the recording is stopped before the
    /// alert fires, and the countdown is left reset and inactive.
    pub async fn handle_tick(&self) -> TickOutcome {
        Self::tick_once(
            &self.state,
            &self.recorder,
            &self.recordings,
            &self.alert,
        )
        .await
    }

    /// One countdown step plus the expiry side effects. Shared between the
    /// spawned tick task and `handle_tick`.
    async fn tick_once(
        state: &Arc<Mutex<SessionState>>,
        recorder: &Arc<Mutex<Recorder>>,
        recordings: &Arc<Mutex<Vec<RecordingClip>>>,
        alert: &Arc<dyn AlertPlayer>,
    ) -> TickOutcome {
        let (outcome, question) = {
            let mut state = state.lock().await;
            let outcome = state.countdown.tick();
            (outcome, state.current_question.clone())
        };

        if outcome == TickOutcome::Expired {
            Self::finalize_recording(recorder, recordings, question.as_ref()).await;
            alert.play();
            info!("Countdown expired");
        }

        outcome
    }

    /// Stop the recorder and append the clip, if one was produced
    async fn finalize_recording(
        recorder: &Arc<Mutex<Recorder>>,
        recordings: &Arc<Mutex<Vec<RecordingClip>>>,
        question: Option<&Question>,
    ) {
        let result = {
            let mut recorder = recorder.lock().await;
            recorder.stop(question).await
        };

        match result {
            Ok(Some(clip)) => {
                let mut recordings = recordings.lock().await;
                recordings.push(clip);
            }
            Ok(None) => {}
            Err(e) => error!("Failed to finalize recording: {}", e),
        }
    }

    async fn finish_recording(&self, question: Option<&Question>) {
        Self::finalize_recording(&self.recorder, &self.recordings, question).await;
    }

    async fn spawn_tick_task(&self) {
        self.stop_tick_task().await;

        let state = Arc::clone(&self.state);
        let recorder = Arc::clone(&self.recorder);
        let recordings = Arc::clone(&self.recordings);
        let alert = Arc::clone(&self.alert);

        let handle = tokio::spawn(async move {
            let mut interval = tokio::time::interval(Duration::from_secs(1));
            // The first interval tick completes immediately; skip it so the
            // countdown moves one second per elapsed second
            interval.tick().await;

            loop {
                interval.tick().await;
                match Self::tick_once(&state, &recorder, &recordings, &alert).await {
                    TickOutcome::Running(_) => {}
                    TickOutcome::Expired | TickOutcome::Inactive => break,
                }
            }
        });

        let mut task = self.tick_task.lock().await;
        *task = Some(handle);
    }

    async fn stop_tick_task(&self) {
        let mut task = self.tick_task.lock().await;
        if let Some(handle) = task.take() {
            handle.abort();
        }
    }

    /// Tear down the session: cancel the tick task and release the capture
    /// device. Safe to call repeatedly.
    pub async fn shutdown(&self) {
        self.stop_tick_task().await;

        let question = {
            let mut state = self.state.lock().await;
            state.countdown.deactivate();
            state.current_question.clone()
        };
        self.finish_recording(question.as_ref()).await;

        info!("Practice session shut down");
    }

    /// Read-only view of the current state
    pub async fn snapshot(&self) -> SessionSnapshot {
        let state = self.state.lock().await;
        let is_recording = {
            let recorder = self.recorder.lock().await;
            recorder.is_recording()
        };
        let history_len = self.history.lock().await.len();
        let recordings_len = self.recordings.lock().await.len();

        SessionSnapshot {
            current_question: state.current_question.clone(),
            remaining_secs: state.countdown.remaining_secs(),
            configured_secs: state.countdown.configured_secs(),
            timer_active: state.countdown.is_active(),
            is_recording,
            show_answer: state.show_answer,
            category: match &state.filter.category {
                CategoryFilter::All => None,
                CategoryFilter::Category(c) => Some(c.clone()),
            },
            difficulty: match state.filter.difficulty {
                DifficultyFilter::All => None,
                DifficultyFilter::Level(d) => Some(d),
            },
            history_len,
            recordings_len,
        }
    }

    /// Model answer for the current question, with the placeholder fallback
    /// for unregistered questions. `None` when no question is current.
    pub async fn answer_for_current(&self) -> Option<String> {
        let state = self.state.lock().await;
        state
            .current_question
            .as_ref()
            .map(|q| self.answers.lookup(q.id).to_string())
    }

    pub async fn history(&self) -> Vec<HistoryEntry> {
        let history = self.history.lock().await;
        history.clone()
    }

    pub async fn recordings(&self) -> Vec<RecordingClip> {
        let recordings = self.recordings.lock().await;
        recordings.clone()
    }

    pub fn bank(&self) -> &QuestionBank {
        &self.bank
    }

    /// Unique category names available in the loaded bank
    pub fn categories(&self) -> Vec<String> {
        self.bank.categories()
    }
}

//! Answer recording
//!
//! Wraps a [`CaptureDevice`] behind an explicit capture state machine so
//! start/stop idempotency and device release are enforced in one place.

use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fs;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tracing::{error, info, warn};
use uuid::Uuid;

use crate::audio::{AudioFrame, CaptureDevice, CaptureError, ClipWriter};
use crate::question::Question;

/// Capture lifecycle. Transitions are guarded; calling `start` outside `Idle`
/// or `stop` outside `Capturing` is a no-op.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaptureState {
    /// Not capturing
    Idle,
    /// Device is live and frames are being buffered
    Capturing,
    /// Device is being released and the clip finalized
    Finalizing,
}

/// One captured answer clip tied to a question attempt
#[derive(Debug, Clone, Serialize)]
pub struct RecordingClip {
    /// Clip ID
    pub id: Uuid,

    /// Question this clip answers
    pub question_id: u32,

    /// Question text at the time of recording
    pub question_text: String,

    /// Path of the WAV file on disk
    pub path: PathBuf,

    /// When the clip was finalized
    pub recorded_at: DateTime<Utc>,

    /// Clip length in seconds
    pub duration_seconds: f64,
}

impl RecordingClip {
    /// Delete the underlying WAV file. The clip owns its file; discard it
    /// when the recording is no longer needed.
    pub fn discard(self) -> Result<()> {
        fs::remove_file(&self.path)?;
        Ok(())
    }
}

/// Records one answer at a time from a capture device.
///
/// Frames are buffered in memory while capturing and written out as a single
/// WAV clip on stop. The device is always released on stop, whether or not a
/// clip is produced.
pub struct Recorder {
    device: Box<dyn CaptureDevice>,
    output_dir: PathBuf,
    fallback_sample_rate: u32,
    fallback_channels: u16,
    state: CaptureState,
    buffer: Arc<Mutex<Vec<AudioFrame>>>,
    drain_task: Option<JoinHandle<()>>,
}

impl Recorder {
    pub fn new(
        device: Box<dyn CaptureDevice>,
        output_dir: impl Into<PathBuf>,
        sample_rate: u32,
        channels: u16,
    ) -> Result<Self> {
        let output_dir = output_dir.into();
        fs::create_dir_all(&output_dir)?;

        Ok(Self {
            device,
            output_dir,
            fallback_sample_rate: sample_rate,
            fallback_channels: channels,
            state: CaptureState::Idle,
            buffer: Arc::new(Mutex::new(Vec::new())),
            drain_task: None,
        })
    }

    pub fn state(&self) -> CaptureState {
        self.state
    }

    pub fn is_recording(&self) -> bool {
        self.state == CaptureState::Capturing
    }

    /// Start capturing.
    ///
    /// A denied microphone request is a local no-op: logged, no state change,
    /// no error escalated. Calling while already capturing is a no-op.
    pub async fn start(&mut self) -> Result<()> {
        if self.state != CaptureState::Idle {
            warn!("Recording already in progress; start ignored");
            return Ok(());
        }

        let mut rx = match self.device.start().await {
            Ok(rx) => rx,
            Err(CaptureError::PermissionDenied) => {
                warn!("Microphone access denied; recording not started");
                return Ok(());
            }
            Err(e) => return Err(e.into()),
        };

        info!("Recording started ({})", self.device.name());

        {
            let mut buffer = self.buffer.lock().await;
            buffer.clear();
        }

        let buffer = Arc::clone(&self.buffer);
        let drain_task = tokio::spawn(async move {
            while let Some(frame) = rx.recv().await {
                let mut buffer = buffer.lock().await;
                buffer.push(frame);
            }
        });

        self.drain_task = Some(drain_task);
        self.state = CaptureState::Capturing;

        Ok(())
    }

    /// Stop capturing and finalize the clip.
    ///
    /// The device is released unconditionally. A clip is produced only when a
    /// current question is supplied; otherwise the buffered audio is dropped.
    /// Calling while not capturing is a no-op.
    pub async fn stop(&mut self, question: Option<&Question>) -> Result<Option<RecordingClip>> {
        if self.state != CaptureState::Capturing {
            return Ok(None);
        }

        self.state = CaptureState::Finalizing;

        // Release the device first so the frame channel closes and the
        // microphone is never held past this point
        if let Err(e) = self.device.stop().await {
            error!("Failed to stop capture device: {}", e);
        }

        if let Some(task) = self.drain_task.take() {
            if let Err(e) = task.await {
                error!("Frame drain task panicked: {}", e);
            }
        }

        let frames = {
            let mut buffer = self.buffer.lock().await;
            std::mem::take(&mut *buffer)
        };

        self.state = CaptureState::Idle;

        let question = match question {
            Some(q) => q,
            None => {
                info!("Recording stopped with no current question; clip dropped");
                return Ok(None);
            }
        };

        let clip = self.write_clip(question, &frames)?;
        info!(
            "Recording stopped: question #{} ({:.1}s)",
            clip.question_id, clip.duration_seconds
        );

        Ok(Some(clip))
    }

    fn write_clip(&self, question: &Question, frames: &[AudioFrame]) -> Result<RecordingClip> {
        let id = Uuid::new_v4();
        let path = self
            .output_dir
            .join(format!("answer-{:03}-{}.wav", question.id, id));

        let (sample_rate, channels) = frames
            .first()
            .map(|f| (f.sample_rate, f.channels))
            .unwrap_or((self.fallback_sample_rate, self.fallback_channels));

        let mut writer = ClipWriter::create(&path, sample_rate, channels)?;
        for frame in frames {
            writer.write_frame(frame)?;
        }
        let info = writer.finish()?;

        Ok(RecordingClip {
            id,
            question_id: question.id,
            question_text: question.question.clone(),
            path: info.file_path,
            recorded_at: Utc::now(),
            duration_seconds: info.duration_seconds,
        })
    }
}

use std::time::Duration;

use thiserror::Error;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::debug;

/// Audio sample data (16-bit PCM, interleaved)
#[derive(Debug, Clone)]
pub struct AudioFrame {
    /// Raw audio samples (i16 PCM, interleaved)
    pub samples: Vec<i16>,
    /// Sample rate in Hz
    pub sample_rate: u32,
    /// Number of channels
    pub channels: u16,
    /// Timestamp in milliseconds since capture started
    pub timestamp_ms: u64,
}

/// Capture device failure taxonomy
#[derive(Debug, Error)]
pub enum CaptureError {
    /// The user (or platform) refused microphone access. A denied attempt is
    /// terminal for that attempt and is never retried automatically.
    #[error("microphone access denied")]
    PermissionDenied,

    /// No usable capture device
    #[error("capture device unavailable: {0}")]
    Unavailable(String),

    /// The device failed mid-capture
    #[error("capture device failure: {0}")]
    Device(String),
}

/// Microphone capture device seam
///
/// Implementations:
/// - `SilenceDevice`: synthetic frames for the terminal binary and demos
/// - test doubles (scripted frames, permission denial) in the test suite
#[async_trait::async_trait]
pub trait CaptureDevice: Send + Sync {
    /// Request access and start capturing.
    ///
    /// Returns a channel receiver that delivers audio frames until the device
    /// is stopped; the channel closes when capture ends.
    async fn start(&mut self) -> Result<mpsc::Receiver<AudioFrame>, CaptureError>;

    /// Stop capturing and release the device. Must be idempotent.
    async fn stop(&mut self) -> Result<(), CaptureError>;

    /// Check if the device is currently capturing
    fn is_capturing(&self) -> bool;

    /// Device name for logging
    fn name(&self) -> &str;
}

/// Synthetic capture device producing silent frames at a fixed cadence.
///
/// Stands in for a real microphone where none is wired up; the frame
/// timing and channel contract match what a hardware-backed device would
/// deliver.
pub struct SilenceDevice {
    sample_rate: u32,
    channels: u16,
    frame_duration_ms: u64,
    task: Option<JoinHandle<()>>,
}

impl SilenceDevice {
    pub fn new(sample_rate: u32, channels: u16) -> Self {
        Self {
            sample_rate,
            channels,
            frame_duration_ms: 100, // 100ms frames
            task: None,
        }
    }
}

#[async_trait::async_trait]
impl CaptureDevice for SilenceDevice {
    async fn start(&mut self) -> Result<mpsc::Receiver<AudioFrame>, CaptureError> {
        if self.task.is_some() {
            return Err(CaptureError::Device("already capturing".to_string()));
        }

        let (tx, rx) = mpsc::channel(100);
        let sample_rate = self.sample_rate;
        let channels = self.channels;
        let frame_duration_ms = self.frame_duration_ms;
        let samples_per_frame =
            (sample_rate as u64 * frame_duration_ms / 1000) as usize * channels as usize;

        let task = tokio::spawn(async move {
            let mut interval = tokio::time::interval(Duration::from_millis(frame_duration_ms));
            let mut timestamp_ms = 0u64;

            loop {
                interval.tick().await;

                let frame = AudioFrame {
                    samples: vec![0i16; samples_per_frame],
                    sample_rate,
                    channels,
                    timestamp_ms,
                };

                if tx.send(frame).await.is_err() {
                    // Receiver dropped; capture is over
                    break;
                }

                timestamp_ms += frame_duration_ms;
            }
        });

        self.task = Some(task);
        debug!("Silence device started ({}Hz, {}ch)", sample_rate, channels);

        Ok(rx)
    }

    async fn stop(&mut self) -> Result<(), CaptureError> {
        if let Some(task) = self.task.take() {
            task.abort();
            debug!("Silence device stopped");
        }
        Ok(())
    }

    fn is_capturing(&self) -> bool {
        self.task.is_some()
    }

    fn name(&self) -> &str {
        "silence"
    }
}

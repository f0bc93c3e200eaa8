// Shared test doubles: scripted capture devices and a counting alert.
#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use mensetsu::alert::AlertPlayer;
use mensetsu::audio::{AudioFrame, CaptureDevice, CaptureError};
use mensetsu::question::{Difficulty, Question};
use tokio::sync::mpsc;

/// A 100ms frame of silence (16kHz mono)
pub fn silent_frame(timestamp_ms: u64) -> AudioFrame {
    AudioFrame {
        samples: vec![0i16; 1600],
        sample_rate: 16000,
        channels: 1,
        timestamp_ms,
    }
}

pub fn question(id: u32, category: &str, difficulty: Difficulty) -> Question {
    Question {
        id,
        category: category.to_string(),
        difficulty,
        question: format!("質問 {}", id),
    }
}

/// Capture device that delivers a fixed set of frames.
///
/// The frames are buffered into the channel on `start`; the channel closes
/// when `stop` drops the sender, so a recorder drains exactly the scripted
/// frames.
pub struct ScriptedDevice {
    frames: Vec<AudioFrame>,
    tx: Option<mpsc::Sender<AudioFrame>>,
    pub starts: Arc<AtomicUsize>,
    pub stops: Arc<AtomicUsize>,
}

impl ScriptedDevice {
    pub fn new(frames: Vec<AudioFrame>) -> Self {
        Self {
            frames,
            tx: None,
            starts: Arc::new(AtomicUsize::new(0)),
            stops: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn with_frames(count: usize) -> Self {
        Self::new((0..count).map(|i| silent_frame(i as u64 * 100)).collect())
    }
}

#[async_trait::async_trait]
impl CaptureDevice for ScriptedDevice {
    async fn start(&mut self) -> Result<mpsc::Receiver<AudioFrame>, CaptureError> {
        self.starts.fetch_add(1, Ordering::SeqCst);

        let (tx, rx) = mpsc::channel(self.frames.len().max(1));
        for frame in &self.frames {
            tx.send(frame.clone())
                .await
                .map_err(|_| CaptureError::Device("scripted channel closed".to_string()))?;
        }

        self.tx = Some(tx);
        Ok(rx)
    }

    async fn stop(&mut self) -> Result<(), CaptureError> {
        if self.tx.take().is_some() {
            self.stops.fetch_add(1, Ordering::SeqCst);
        }
        Ok(())
    }

    fn is_capturing(&self) -> bool {
        self.tx.is_some()
    }

    fn name(&self) -> &str {
        "scripted"
    }
}

/// Capture device that always refuses microphone access
pub struct DeniedDevice;

#[async_trait::async_trait]
impl CaptureDevice for DeniedDevice {
    async fn start(&mut self) -> Result<mpsc::Receiver<AudioFrame>, CaptureError> {
        Err(CaptureError::PermissionDenied)
    }

    async fn stop(&mut self) -> Result<(), CaptureError> {
        Ok(())
    }

    fn is_capturing(&self) -> bool {
        false
    }

    fn name(&self) -> &str {
        "denied"
    }
}

/// Alert player that counts how often it fired
#[derive(Default)]
pub struct CountingAlert {
    pub plays: AtomicUsize,
}

impl CountingAlert {
    pub fn count(&self) -> usize {
        self.plays.load(Ordering::SeqCst)
    }
}

impl AlertPlayer for CountingAlert {
    fn play(&self) {
        self.plays.fetch_add(1, Ordering::SeqCst);
    }
}

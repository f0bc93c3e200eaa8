use anyhow::{Context, Result};
use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

use super::device::AudioFrame;

/// Format and size details of a finalized clip
#[derive(Debug, Clone)]
pub struct ClipInfo {
    /// File path of the written WAV
    pub file_path: PathBuf,
    /// Sample rate
    pub sample_rate: u32,
    /// Number of channels
    pub channels: u16,
    /// Number of samples written
    pub sample_count: usize,
    /// Clip length in seconds
    pub duration_seconds: f64,
}

/// Writes one answer clip to disk as a WAV file
pub struct ClipWriter {
    writer: Option<hound::WavWriter<BufWriter<File>>>,
    info: ClipInfo,
}

impl ClipWriter {
    pub fn create(file_path: impl AsRef<Path>, sample_rate: u32, channels: u16) -> Result<Self> {
        let file_path = file_path.as_ref().to_path_buf();

        let spec = hound::WavSpec {
            channels,
            sample_rate,
            bits_per_sample: 16,
            sample_format: hound::SampleFormat::Int,
        };

        let writer = hound::WavWriter::create(&file_path, spec)
            .with_context(|| format!("Failed to create WAV file: {:?}", file_path))?;

        Ok(Self {
            writer: Some(writer),
            info: ClipInfo {
                file_path,
                sample_rate,
                channels,
                sample_count: 0,
                duration_seconds: 0.0,
            },
        })
    }

    pub fn write_frame(&mut self, frame: &AudioFrame) -> Result<()> {
        if let Some(writer) = &mut self.writer {
            for &sample in &frame.samples {
                writer
                    .write_sample(sample)
                    .context("Failed to write sample to WAV")?;
            }
            self.info.sample_count += frame.samples.len();
        }

        Ok(())
    }

    pub fn finish(mut self) -> Result<ClipInfo> {
        if let Some(writer) = self.writer.take() {
            writer.finalize().context("Failed to finalize WAV file")?;
        }

        self.info.duration_seconds = self.info.sample_count as f64
            / (self.info.sample_rate as f64 * self.info.channels as f64);

        info!(
            "Clip written: {} ({:.1}s, {} samples)",
            self.info.file_path.display(),
            self.info.duration_seconds,
            self.info.sample_count
        );

        Ok(self.info.clone())
    }
}

impl Drop for ClipWriter {
    fn drop(&mut self) {
        if let Some(writer) = self.writer.take() {
            if let Err(e) = writer.finalize() {
                warn!("Failed to finalize WAV writer on drop: {}", e);
            }
        }
    }
}

use anyhow::Result;
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub session: SessionSettings,
    pub audio: AudioSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SessionSettings {
    /// Answer time per question, in seconds
    pub default_duration_secs: u32,
    /// Path to the question data JSON file
    pub questions_path: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AudioSettings {
    pub recordings_path: String,
    pub sample_rate: u32,
    pub channels: u16,
}

impl Config {
    pub fn load(path: &str) -> Result<Self> {
        let settings = config::Config::builder()
            .add_source(config::File::with_name(path))
            .build()?;

        Ok(settings.try_deserialize()?)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            session: SessionSettings {
                default_duration_secs: 120, // 2 minutes
                questions_path: "data/questions.json".to_string(),
            },
            audio: AudioSettings {
                recordings_path: "recordings".to_string(),
                sample_rate: 16000,
                channels: 1,
            },
        }
    }
}

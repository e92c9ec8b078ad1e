use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

use crate::error::{Result, SubtitlerError};
use crate::media::EmbedMode;
use crate::transcribe::TranscriberImplementation;

/// Config file picked up from the working directory when `--config` is not given
pub const DEFAULT_CONFIG_FILE: &str = "subtitler.toml";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub paths: PathsConfig,
    pub transcriber: TranscriberConfig,
    pub media: MediaConfig,
    pub workflow: WorkflowConfig,
}

/// Directory layout used in batch mode
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PathsConfig {
    /// Directory scanned for input videos
    pub input_dir: PathBuf,
    /// Directory for extracted audio
    pub audio_dir: PathBuf,
    /// Directory for generated subtitle files
    pub subtitle_dir: PathBuf,
    /// Directory for plain-text transcripts
    pub text_dir: PathBuf,
    /// Directory for subtitled videos
    pub output_dir: PathBuf,
    /// Video file extensions picked up in batch mode (case-insensitive)
    pub video_extensions: Vec<String>,
    /// Extension of the extracted audio file; `wav` selects 16 kHz mono PCM
    pub audio_extension: String,
    /// Container of the subtitled video; the input's extension when unset
    pub output_extension: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TranscriberConfig {
    /// Which whisper front-end drives the model
    pub implementation: TranscriberImplementation,
    /// Path to transcriber binary (e.g. whisper, whisper-cli)
    pub binary_path: String,
    /// Model variant used for every file in a run
    pub model: String,
    /// Where whisper.cpp model files (ggml-<model>.bin) live
    pub model_dir: PathBuf,
    /// Source language hint; auto-detected when unset
    pub language: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MediaConfig {
    /// Path to ffmpeg binary
    pub binary_path: String,
    /// Burn subtitles into the picture or add them as a subtitle stream
    pub embed_mode: EmbedMode,
    /// Additional encoding options for subtitle embedding
    /// Common options: ["-preset", "medium", "-crf", "23", "-pix_fmt", "yuv420p"]
    pub subtitle_options: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct WorkflowConfig {
    /// Keep going with the rest of a batch when one video fails
    pub continue_on_error: bool,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            input_dir: PathBuf::from("assets/video_input"),
            audio_dir: PathBuf::from("assets/audio"),
            subtitle_dir: PathBuf::from("assets/subtitles"),
            text_dir: PathBuf::from("assets/text"),
            output_dir: PathBuf::from("assets/video_output"),
            video_extensions: vec!["mp4".to_string()],
            audio_extension: "mp3".to_string(),
            output_extension: None,
        }
    }
}

impl Default for TranscriberConfig {
    fn default() -> Self {
        Self {
            implementation: TranscriberImplementation::OpenAI,
            binary_path: "whisper".to_string(),
            model: "base".to_string(),
            model_dir: PathBuf::from(".subtitler").join("models"),
            language: None,
        }
    }
}

impl Default for MediaConfig {
    fn default() -> Self {
        Self {
            binary_path: "ffmpeg".to_string(),
            embed_mode: EmbedMode::Burn,
            subtitle_options: Vec::new(),
        }
    }
}

impl Config {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| SubtitlerError::Config(format!("Failed to read config file: {}", e)))?;

        toml::from_str(&content)
            .map_err(|e| SubtitlerError::Config(format!("Failed to parse config file: {}", e)))
    }

    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| SubtitlerError::Config(format!("Failed to serialize config: {}", e)))?;

        std::fs::write(path, content)
            .map_err(|e| SubtitlerError::Config(format!("Failed to write config file: {}", e)))?;

        Ok(())
    }

    /// Load from an explicit path, else `subtitler.toml` in the current directory, else defaults
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        let config = match explicit {
            Some(path) => Self::from_file(path)?,
            None => {
                let local = Path::new(DEFAULT_CONFIG_FILE);
                if local.exists() {
                    info!("Found {} in current directory, loading...", DEFAULT_CONFIG_FILE);
                    Self::from_file(local)?
                } else {
                    Self::default()
                }
            }
        };

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.paths.video_extensions.iter().all(|ext| ext.trim().is_empty()) {
            return Err(SubtitlerError::Config(
                "paths.video_extensions must name at least one extension".to_string(),
            ));
        }
        if self.paths.audio_extension.trim().is_empty() {
            return Err(SubtitlerError::Config("paths.audio_extension is empty".to_string()));
        }
        if self.media.binary_path.trim().is_empty() {
            return Err(SubtitlerError::Config("media.binary_path is empty".to_string()));
        }
        if self.transcriber.binary_path.trim().is_empty() {
            return Err(SubtitlerError::Config("transcriber.binary_path is empty".to_string()));
        }
        if self.transcriber.model.trim().is_empty() {
            return Err(SubtitlerError::Config("transcriber.model is empty".to_string()));
        }

        if matches!(self.transcriber.implementation, TranscriberImplementation::WhisperCpp)
            && !self.paths.audio_extension.eq_ignore_ascii_case("wav")
        {
            warn!(
                "whisper.cpp expects 16 kHz WAV input but audio_extension is '{}'",
                self.paths.audio_extension
            );
        }

        Ok(())
    }
}

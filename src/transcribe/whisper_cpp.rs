use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::command::ToolCommand;
use crate::config::TranscriberConfig;
use crate::error::{Result, SubtitlerError};
use crate::transcript::{Segment, Transcript};
use super::TranscriberTrait;

// Structs for parsing whisper.cpp JSON output (`-oj`)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WhisperCppOutput {
    pub result: Option<WhisperCppResult>,
    pub transcription: Vec<WhisperCppSegment>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WhisperCppResult {
    pub language: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WhisperCppSegment {
    pub offsets: WhisperCppOffsets,
    pub text: String,
}

/// Segment bounds in milliseconds
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WhisperCppOffsets {
    pub from: i64,
    pub to: i64,
}

impl From<WhisperCppOutput> for Transcript {
    fn from(whisper_output: WhisperCppOutput) -> Self {
        let language = whisper_output.result.map(|result| result.language);

        // whisper.cpp has no top-level text field
        let text = whisper_output
            .transcription
            .iter()
            .map(|seg| seg.text.as_str())
            .collect::<String>();

        let segments = whisper_output
            .transcription
            .into_iter()
            .enumerate()
            .map(|(id, seg)| Segment {
                id: id as u32,
                start: seg.offsets.from as f64 / 1000.0,
                end: seg.offsets.to as f64 / 1000.0,
                text: seg.text,
            })
            .collect();

        Transcript {
            text,
            segments,
            language,
        }
    }
}

/// whisper.cpp implementation (`whisper-cli`)
pub struct WhisperCppTranscriber {
    config: TranscriberConfig,
}

impl WhisperCppTranscriber {
    pub fn new(config: TranscriberConfig) -> Self {
        Self { config }
    }

    /// Convert a model name to the model file path
    pub fn resolve_model_path(&self) -> PathBuf {
        let model = &self.config.model;

        // Already a path
        if model.contains('/') || model.contains('\\') || model.ends_with(".bin") {
            return PathBuf::from(model);
        }

        self.config.model_dir.join(format!("ggml-{}.bin", model))
    }

    fn build_command(&self, audio_path: &Path, output_base: &Path) -> ToolCommand {
        let mut command = ToolCommand::new(&self.config.binary_path, "whisper.cpp transcription")
            .arg("-oj")
            .arg("-of")
            .path(output_base)
            .arg("-m")
            .path(self.resolve_model_path())
            .arg("-f")
            .path(audio_path);

        if let Some(lang) = &self.config.language {
            command = command.arg("-l").arg(lang.as_str());
        }

        command
    }
}

#[async_trait]
impl TranscriberTrait for WhisperCppTranscriber {
    async fn transcribe(&self, audio_path: &Path) -> Result<Transcript> {
        info!(
            "Transcribing {} with whisper.cpp model {}",
            audio_path.display(),
            self.resolve_model_path().display()
        );

        let temp_dir = tempfile::tempdir()?;
        let output_base = temp_dir.path().join("transcript");
        let output_path = temp_dir.path().join("transcript.json");

        self.build_command(audio_path, &output_base).execute().await?;

        let json_content = tokio::fs::read_to_string(&output_path).await.map_err(|e| {
            SubtitlerError::Transcriber(format!("Failed to read transcription: {}", e))
        })?;

        let whisper_output: WhisperCppOutput = serde_json::from_str(&json_content)
            .map_err(|e| SubtitlerError::Transcriber(format!("Failed to parse transcription JSON: {}", e)))?;

        let transcript = Transcript::from(whisper_output);
        debug!("whisper.cpp returned {} segments", transcript.segments.len());
        Ok(transcript)
    }

    async fn check_availability(&self) -> Result<()> {
        ToolCommand::new(&self.config.binary_path, "whisper.cpp availability check")
            .arg("--help")
            .execute()
            .await?;

        let model_path = self.resolve_model_path();
        if !model_path.exists() {
            return Err(SubtitlerError::FileNotFound(format!(
                "whisper.cpp model {}",
                model_path.display()
            )));
        }

        info!("whisper.cpp is available");
        Ok(())
    }
}

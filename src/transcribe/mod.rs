// Speech-to-text behind a trait, with one implementation per whisper front-end:
// - OpenAI: the `whisper` Python CLI
// - WhisperCpp: the whisper.cpp `whisper-cli` binary
//
// Each backend parses its own JSON output and maps it onto `Transcript`.

pub mod openai;
pub mod whisper_cpp;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::config::TranscriberConfig;
use crate::error::Result;
use crate::transcript::Transcript;

/// Main trait for transcription operations
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TranscriberTrait: Send + Sync {
    /// Transcribe a whole audio file in one pass
    async fn transcribe(&self, audio_path: &Path) -> Result<Transcript>;

    /// Check that the transcriber binary can be launched
    async fn check_availability(&self) -> Result<()>;
}

/// Transcriber implementation type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TranscriberImplementation {
    #[serde(rename = "openai")]
    OpenAI,
    #[serde(rename = "whisper-cpp")]
    WhisperCpp,
}

/// Factory for creating transcriber instances
pub struct TranscriberFactory;

impl TranscriberFactory {
    /// Create the transcriber selected by `config.implementation`
    pub fn create_transcriber(config: TranscriberConfig) -> Box<dyn TranscriberTrait> {
        match config.implementation {
            TranscriberImplementation::OpenAI => Box::new(openai::OpenAITranscriber::new(config)),
            TranscriberImplementation::WhisperCpp => {
                Box::new(whisper_cpp::WhisperCppTranscriber::new(config))
            }
        }
    }
}

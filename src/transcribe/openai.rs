// OpenAI Whisper Python implementation
// Drives the `whisper` command-line tool and reads its JSON output

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, info};

use crate::command::ToolCommand;
use crate::config::TranscriberConfig;
use crate::error::{Result, SubtitlerError};
use crate::transcript::{Segment, Transcript};
use super::TranscriberTrait;

/// OpenAI Whisper specific JSON output format
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OpenAIWhisperOutput {
    pub text: String,
    pub segments: Vec<OpenAIWhisperSegment>,
    pub language: Option<String>,
}

/// OpenAI Whisper specific segment format
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OpenAIWhisperSegment {
    pub id: u32,
    pub seek: Option<u64>,
    pub start: f64,
    pub end: f64,
    pub text: String,
    pub avg_logprob: Option<f64>,
    pub no_speech_prob: Option<f64>,
}

impl From<OpenAIWhisperOutput> for Transcript {
    fn from(whisper_output: OpenAIWhisperOutput) -> Self {
        let segments = whisper_output
            .segments
            .into_iter()
            .map(|seg| Segment {
                id: seg.id,
                start: seg.start,
                end: seg.end,
                text: seg.text,
            })
            .collect();

        Transcript {
            text: whisper_output.text,
            segments,
            language: whisper_output.language,
        }
    }
}

/// OpenAI Whisper implementation
pub struct OpenAITranscriber {
    config: TranscriberConfig,
}

impl OpenAITranscriber {
    pub fn new(config: TranscriberConfig) -> Self {
        Self { config }
    }

    fn build_command(&self, audio_path: &Path, output_dir: &Path) -> ToolCommand {
        let mut command = ToolCommand::new(&self.config.binary_path, "Whisper transcription")
            .path(audio_path)
            .arg("--model")
            .arg(self.config.model.as_str())
            .arg("--output_dir")
            .path(output_dir)
            .args(["--output_format", "json", "--verbose", "False"]);

        if let Some(lang) = &self.config.language {
            command = command.arg("--language").arg(lang.as_str());
        }

        command
    }
}

#[async_trait]
impl TranscriberTrait for OpenAITranscriber {
    async fn transcribe(&self, audio_path: &Path) -> Result<Transcript> {
        info!(
            "Transcribing {} with whisper model '{}'",
            audio_path.display(),
            self.config.model
        );

        // Create temporary output directory for whisper results
        let temp_dir = tempfile::tempdir()?;
        self.build_command(audio_path, temp_dir.path()).execute().await?;

        // whisper names its output after the input stem
        let audio_stem = audio_path
            .file_stem()
            .ok_or_else(|| SubtitlerError::InvalidPath(audio_path.display().to_string()))?;
        let json_file = temp_dir
            .path()
            .join(format!("{}.json", audio_stem.to_string_lossy()));

        let json_content = tokio::fs::read_to_string(&json_file).await.map_err(|e| {
            SubtitlerError::Transcriber(format!(
                "Whisper JSON output {} not readable: {}",
                json_file.display(),
                e
            ))
        })?;

        let whisper_output: OpenAIWhisperOutput = serde_json::from_str(&json_content)
            .map_err(|e| SubtitlerError::Transcriber(format!("Failed to parse OpenAI Whisper JSON: {}", e)))?;

        let transcript = Transcript::from(whisper_output);
        debug!(
            "Whisper returned {} segments (language: {:?})",
            transcript.segments.len(),
            transcript.language
        );
        Ok(transcript)
    }

    async fn check_availability(&self) -> Result<()> {
        ToolCommand::new(&self.config.binary_path, "Whisper availability check")
            .arg("--help")
            .execute()
            .await?;

        info!("OpenAI Whisper command-line tool is available");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::subtitle::render_srt;

    const SAMPLE_OUTPUT: &str = r#"{
        "text": " Hello world. How are you?",
        "segments": [
            {"id": 0, "seek": 0, "start": 0.0, "end": 2.5, "text": " Hello world.",
             "tokens": [50364, 2425], "temperature": 0.0, "avg_logprob": -0.25,
             "compression_ratio": 0.9, "no_speech_prob": 0.01},
            {"id": 1, "seek": 0, "start": 2.5, "end": 5.0, "text": " How are you?",
             "tokens": [50489], "temperature": 0.0, "avg_logprob": -0.3,
             "compression_ratio": 0.9, "no_speech_prob": 0.02}
        ],
        "language": "en"
    }"#;

    #[test]
    fn test_parse_whisper_json() {
        let output: OpenAIWhisperOutput = serde_json::from_str(SAMPLE_OUTPUT).unwrap();
        let transcript = Transcript::from(output);

        assert_eq!(transcript.text, " Hello world. How are you?");
        assert_eq!(transcript.language.as_deref(), Some("en"));
        assert_eq!(transcript.segments.len(), 2);
        assert_eq!(
            transcript.segments[1],
            Segment {
                id: 1,
                start: 2.5,
                end: 5.0,
                text: " How are you?".to_string(),
            }
        );
    }

    #[test]
    fn test_cue_text_keeps_whisper_spacing() {
        let output: OpenAIWhisperOutput = serde_json::from_str(
            r#"{"text": " Hello world.", "language": "en",
                "segments": [{"id": 0, "start": 0.0, "end": 2.0, "text": " Hello world."}]}"#,
        )
        .unwrap();

        let srt = render_srt(&Transcript::from(output).segments);
        assert_eq!(srt, "1\n0:00:00,000 --> 0:00:02,000\n Hello world.\n\n");
    }

    #[test]
    fn test_command_line() {
        let transcriber = OpenAITranscriber::new(TranscriberConfig {
            language: Some("ja".to_string()),
            ..TranscriberConfig::default()
        });
        let command = transcriber.build_command(Path::new("audio/talk.mp3"), Path::new("/tmp/out"));

        assert_eq!(command.program, "whisper");
        assert_eq!(
            command.args,
            vec![
                "audio/talk.mp3",
                "--model",
                "base",
                "--output_dir",
                "/tmp/out",
                "--output_format",
                "json",
                "--verbose",
                "False",
                "--language",
                "ja"
            ]
        );
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_missing_json_output_is_transcriber_error() {
        // `true` succeeds without writing anything
        let transcriber = OpenAITranscriber::new(TranscriberConfig {
            binary_path: "true".to_string(),
            ..TranscriberConfig::default()
        });

        let err = transcriber.transcribe(Path::new("talk.mp3")).await.unwrap_err();
        assert!(matches!(err, SubtitlerError::Transcriber(_)));
    }
}

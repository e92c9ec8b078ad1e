use async_trait::async_trait;
use std::path::Path;
use tracing::{debug, info};

use crate::config::MediaConfig;
use crate::error::Result;
use super::{MediaCommandBuilder, MediaProcessorTrait};

/// Concrete implementation of media processor (FFmpeg-based)
pub struct MediaProcessorImpl {
    config: MediaConfig,
    command_builder: MediaCommandBuilder,
}

impl MediaProcessorImpl {
    /// Create a new media processor implementation
    pub fn new(config: MediaConfig) -> Self {
        let command_builder = MediaCommandBuilder::new(&config.binary_path);

        Self {
            config,
            command_builder,
        }
    }

    /// First line of `ffmpeg -version`
    pub async fn version_info(&self) -> Result<String> {
        let output = self.command_builder.version_check().execute().await?;
        let version_info = String::from_utf8_lossy(&output.stdout);
        Ok(version_info
            .lines()
            .next()
            .unwrap_or("Unknown version")
            .to_string())
    }
}

#[async_trait]
impl MediaProcessorTrait for MediaProcessorImpl {
    async fn extract_audio(&self, video_path: &Path, audio_path: &Path) -> Result<()> {
        info!("Extracting audio from {} to {}", video_path.display(), audio_path.display());

        self.command_builder
            .extract_audio(video_path, audio_path)
            .execute()
            .await?;

        info!("Audio extraction completed");
        Ok(())
    }

    async fn embed_subtitles(
        &self,
        video_path: &Path,
        subtitle_path: &Path,
        output_path: &Path,
    ) -> Result<()> {
        info!(
            "Embedding subtitles from {} into {} -> {}",
            subtitle_path.display(),
            video_path.display(),
            output_path.display()
        );

        self.command_builder
            .embed_subtitles(
                video_path,
                subtitle_path,
                output_path,
                self.config.embed_mode,
                &self.config.subtitle_options,
            )
            .execute()
            .await?;

        info!("Subtitle embedding completed successfully");
        Ok(())
    }

    async fn check_availability(&self) -> Result<()> {
        let version = self.version_info().await?;
        debug!("Media processor version: {}", version);
        info!("Media processor is available");
        Ok(())
    }
}

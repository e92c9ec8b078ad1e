use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::sync::OnceCell;
use tracing::{error, info, warn};
use walkdir::WalkDir;

use crate::config::Config;
use crate::error::{Result, SubtitlerError};
use crate::media::{MediaProcessorFactory, MediaProcessorTrait};
use crate::paths::{partial_path, DerivedPaths, DirectoryLayout};
use crate::subtitle::{generate_srt, write_text};
use crate::transcribe::{TranscriberFactory, TranscriberTrait};
use crate::transcript::Transcript;

/// What happened to one video
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VideoOutcome {
    /// The subtitled output already existed
    Skipped,
    /// The full pipeline ran and produced the output
    Completed,
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct BatchSummary {
    pub discovered: usize,
    pub completed: usize,
    pub skipped: usize,
    pub failed: usize,
}

pub struct Workflow {
    config: Config,
    transcriber: Box<dyn TranscriberTrait>,
    media: Box<dyn MediaProcessorTrait>,
    dependencies_checked: OnceCell<()>,
}

impl Workflow {
    pub fn new(config: Config) -> Self {
        let transcriber = TranscriberFactory::create_transcriber(config.transcriber.clone());
        let media = MediaProcessorFactory::create_processor(config.media.clone());

        Self::with_components(config, transcriber, media)
    }

    pub fn with_components(
        config: Config,
        transcriber: Box<dyn TranscriberTrait>,
        media: Box<dyn MediaProcessorTrait>,
    ) -> Self {
        Self {
            config,
            transcriber,
            media,
            dependencies_checked: OnceCell::new(),
        }
    }

    /// Verify both external tools once per workflow
    pub async fn check_dependencies(&self) -> Result<()> {
        self.dependencies_checked
            .get_or_try_init(|| async {
                self.media.check_availability().await?;
                self.transcriber.check_availability().await
            })
            .await?;
        Ok(())
    }

    /// Batch mode: every matching video in the configured input directory
    pub async fn process_directory(&self) -> Result<BatchSummary> {
        let paths = &self.config.paths;
        info!("Processing directory: {}", paths.input_dir.display());

        let videos = discover_videos(&paths.input_dir, &paths.video_extensions);
        info!("Found {} video files to process", videos.len());

        let layout = DirectoryLayout::from_paths_config(paths);
        self.process_videos(&videos, &layout).await
    }

    /// Single-file mode: all artifacts are written next to the video
    pub async fn process_single_file<P: AsRef<Path>>(&self, input_path: P) -> Result<VideoOutcome> {
        let input_path = input_path.as_ref();
        info!("Processing single file: {}", input_path.display());

        if !input_path.is_file() {
            return Err(SubtitlerError::FileNotFound(input_path.display().to_string()));
        }

        self.process_video_file(input_path, &DirectoryLayout::alongside())
            .await
    }

    /// Run the pipeline over `videos` in order
    pub async fn process_videos(
        &self,
        videos: &[PathBuf],
        layout: &DirectoryLayout,
    ) -> Result<BatchSummary> {
        let mut summary = BatchSummary {
            discovered: videos.len(),
            ..BatchSummary::default()
        };

        for (position, video_path) in videos.iter().enumerate() {
            info!("[{}/{}] {}", position + 1, videos.len(), video_path.display());

            match self.process_video_file(video_path, layout).await {
                Ok(VideoOutcome::Completed) => summary.completed += 1,
                Ok(VideoOutcome::Skipped) => summary.skipped += 1,
                Err(e) if self.config.workflow.continue_on_error => {
                    warn!("Failed to process {}: {}", video_path.display(), e);
                    summary.failed += 1;
                }
                Err(e) => {
                    error!("Failed to process {}: {}", video_path.display(), e);
                    return Err(e);
                }
            }
        }

        info!(
            "Batch finished: {} completed, {} skipped, {} failed",
            summary.completed, summary.skipped, summary.failed
        );
        Ok(summary)
    }

    pub async fn process_video_file(
        &self,
        video_path: &Path,
        layout: &DirectoryLayout,
    ) -> Result<VideoOutcome> {
        let paths = DerivedPaths::resolve(
            video_path,
            layout,
            &self.config.paths.audio_extension,
            self.config.paths.output_extension.as_deref(),
        )?;

        // The output is only ever created by the final rename, so it marks completion
        if paths.output.exists() {
            info!("Output already exists, skipping: {}", paths.output.display());
            return Ok(VideoOutcome::Skipped);
        }

        self.check_dependencies().await?;

        for path in paths.all() {
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent).await?;
            }
        }

        // Step 1: Extract audio
        self.media.extract_audio(video_path, &paths.audio).await?;

        // Step 2: Transcribe
        let transcript = self.transcriber.transcribe(&paths.audio).await?;
        info!(
            "Transcribed {} segments covering {:.1}s",
            transcript.segments.len(),
            transcript.duration().unwrap_or_default()
        );
        if !transcript.has_sequential_ids() {
            warn!(
                "Segment ids for {} are not contiguous; subtitle cue numbers will have gaps",
                paths.audio.display()
            );
        }

        // Step 3: Subtitle and text files
        generate_srt(&transcript, &paths.subtitle).await?;
        write_text(&transcript, &paths.text).await?;

        // Step 4: Embed under a temporary name, then publish
        let partial = partial_path(&paths.output);
        if let Err(e) = self
            .media
            .embed_subtitles(video_path, &paths.subtitle, &partial)
            .await
        {
            // Best effort; the output path is untouched either way
            let _ = fs::remove_file(&partial).await;
            return Err(e);
        }
        fs::rename(&partial, &paths.output).await?;

        info!("Completed: {}", paths.output.display());
        Ok(VideoOutcome::Completed)
    }

    /// Extract audio from video file
    pub async fn extract_audio(&self, video_path: &Path, audio_path: &Path) -> Result<()> {
        self.media.extract_audio(video_path, audio_path).await
    }

    /// Transcribe an audio file into a subtitle file and, optionally, a text file
    pub async fn transcribe_audio(
        &self,
        audio_path: &Path,
        subtitle_path: &Path,
        text_path: Option<&Path>,
    ) -> Result<Transcript> {
        let transcript = self.transcriber.transcribe(audio_path).await?;

        generate_srt(&transcript, subtitle_path).await?;
        if let Some(text_path) = text_path {
            write_text(&transcript, text_path).await?;
        }

        Ok(transcript)
    }

    /// Embed subtitles into video file
    pub async fn embed_subtitles(
        &self,
        video_path: &Path,
        subtitle_path: &Path,
        output_path: &Path,
    ) -> Result<()> {
        self.media
            .embed_subtitles(video_path, subtitle_path, output_path)
            .await
    }
}

/// Video files directly inside `input_dir` with one of `extensions`, sorted by name.
/// A missing directory yields nothing.
pub fn discover_videos(input_dir: &Path, extensions: &[String]) -> Vec<PathBuf> {
    if !input_dir.is_dir() {
        warn!("Input directory {} does not exist", input_dir.display());
        return Vec::new();
    }

    WalkDir::new(input_dir)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|e| e.ok())
        .map(|entry| entry.into_path())
        .filter(|path| path.is_file())
        .filter(|path| {
            path.extension()
                .and_then(|ext| ext.to_str())
                .is_some_and(|ext| extensions.iter().any(|wanted| wanted.eq_ignore_ascii_case(ext)))
        })
        .collect()
}

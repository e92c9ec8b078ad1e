//! Subtitler - batch subtitling of video files
//!
//! Extracts audio with ffmpeg, transcribes it with whisper, writes SRT and text
//! files and embeds the subtitles back into the video.

use anyhow::{bail, Result};
use clap::Parser;
use std::path::Path;
use tracing::{info, Level};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::{non_blocking, rolling};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use subtitler::cli::{Args, Commands};
use subtitler::config::Config;
use subtitler::workflow::Workflow;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // Parse command line arguments
    let args = Args::parse();
    if let Err(e) = args.validate() {
        e.exit();
    }

    // Setup logging to both console and file
    let _log_guard = setup_logging(args.verbose)?;

    match (args.command, args.input) {
        (Some(Commands::InitConfig { output, force }), _) => {
            init_config(&output, force)?;
        }
        (Some(Commands::Extract { input, output }), _) => {
            info!("Extracting audio from: {}", input.display());
            let workflow = load_workflow(args.config.as_deref())?;
            workflow.extract_audio(&input, &output).await?;
        }
        (Some(Commands::Transcribe { input, output, text }), _) => {
            info!("Transcribing audio: {}", input.display());
            let workflow = load_workflow(args.config.as_deref())?;
            let transcript = workflow
                .transcribe_audio(&input, &output, text.as_deref())
                .await?;
            info!("Wrote {} subtitle cues to {}", transcript.segments.len(), output.display());
        }
        (Some(Commands::Embed { video, subtitles, output }), _) => {
            info!("Embedding subtitles into video: {}", video.display());
            let workflow = load_workflow(args.config.as_deref())?;
            workflow.embed_subtitles(&video, &subtitles, &output).await?;
        }
        (None, Some(input)) => {
            let workflow = load_workflow(args.config.as_deref())?;
            let outcome = workflow.process_single_file(&input).await?;
            info!("{}: {:?}", input.display(), outcome);
        }
        (None, None) => {
            let workflow = load_workflow(args.config.as_deref())?;
            let summary = workflow.process_directory().await?;
            if summary.failed > 0 {
                bail!("{} of {} videos failed", summary.failed, summary.discovered);
            }
        }
    }

    info!("Subtitler completed successfully");
    Ok(())
}

fn load_workflow(config_path: Option<&Path>) -> Result<Workflow> {
    let config = Config::load(config_path)?;
    Ok(Workflow::new(config))
}

fn init_config(output: &Path, force: bool) -> Result<()> {
    if output.exists() && !force {
        bail!("{} already exists (use --force to overwrite)", output.display());
    }
    Config::default().save_to_file(output)?;
    info!("Wrote default configuration to {}", output.display());
    Ok(())
}

/// Setup logging to both console and file
fn setup_logging(verbose: bool) -> Result<WorkerGuard> {
    // Create log directory
    let log_dir = std::env::current_dir()?.join(".subtitler").join("log");
    std::fs::create_dir_all(&log_dir)?;

    // Set up file appender with daily rotation
    let file_appender = rolling::daily(&log_dir, "subtitler.log");
    let (non_blocking_file, guard) = non_blocking(file_appender);

    // Determine log level
    let log_level = if verbose { Level::DEBUG } else { Level::INFO };

    // Create console layer
    let console_layer = fmt::layer()
        .with_target(false)
        .with_file(verbose)
        .with_line_number(verbose);

    // Create file layer
    let file_layer = fmt::layer()
        .with_writer(non_blocking_file)
        .with_target(false)
        .with_file(true)
        .with_line_number(true)
        .with_ansi(false); // No ANSI colors in file

    // Setup layered subscriber
    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env().add_directive(log_level.into()))
        .with(console_layer)
        .with(file_layer)
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to initialize logging: {}", e))?;

    info!(
        "Logging initialized - console: {}, file: {}",
        log_level,
        log_dir.join("subtitler.log").display()
    );

    Ok(guard)
}

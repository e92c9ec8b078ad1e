use clap::error::ErrorKind;
use clap::{CommandFactory, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,

    /// Configuration file path
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Video file to subtitle; without it every video in the configured input directory is processed
    pub input: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

impl Args {
    /// A video path only makes sense without a subcommand
    pub fn validate(&self) -> Result<(), clap::Error> {
        if let (Some(input), Some(_)) = (&self.input, &self.command) {
            return Err(Self::command().error(
                ErrorKind::ArgumentConflict,
                format!(
                    "the video path '{}' cannot be combined with a subcommand",
                    input.display()
                ),
            ));
        }
        Ok(())
    }
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Extract audio from video file
    Extract {
        /// Input video file
        #[arg(short, long)]
        input: PathBuf,

        /// Output audio file
        #[arg(short, long)]
        output: PathBuf,
    },

    /// Transcribe audio into an SRT subtitle file
    Transcribe {
        /// Input audio file
        #[arg(short, long)]
        input: PathBuf,

        /// Output subtitle file
        #[arg(short, long)]
        output: PathBuf,

        /// Also write the plain transcript text here
        #[arg(short, long)]
        text: Option<PathBuf>,
    },

    /// Embed subtitles into video file
    Embed {
        /// Input video file
        #[arg(short, long)]
        video: PathBuf,

        /// Subtitle file
        #[arg(short, long)]
        subtitles: PathBuf,

        /// Output video file
        #[arg(short, long)]
        output: PathBuf,
    },

    /// Write the default configuration to a file
    InitConfig {
        /// Where to write the configuration
        #[arg(short, long, default_value = "subtitler.toml")]
        output: PathBuf,

        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

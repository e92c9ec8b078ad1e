//! Subtitler - batch subtitling of video files
//!
//! Pipeline per video: extract audio (ffmpeg) -> transcribe (whisper) ->
//! write SRT and text files -> embed subtitles into a new video (ffmpeg).

pub mod cli;
pub mod command;
pub mod config;
pub mod error;
pub mod media;
pub mod paths;
pub mod subtitle;
pub mod transcribe;
pub mod transcript;
pub mod workflow;

use std::fmt::Write as _;
use std::path::Path;
use tokio::fs;
use tracing::info;

use crate::error::Result;
use crate::transcript::{Segment, Transcript};

/// Generate SRT subtitle file from transcription
pub async fn generate_srt<P: AsRef<Path>>(transcript: &Transcript, output_path: P) -> Result<()> {
    let output_path = output_path.as_ref();
    info!("Generating SRT file: {}", output_path.display());

    fs::write(output_path, render_srt(&transcript.segments)).await?;

    info!("SRT file generated successfully");
    Ok(())
}

/// Write the full transcript text as-is
pub async fn write_text<P: AsRef<Path>>(transcript: &Transcript, output_path: P) -> Result<()> {
    let output_path = output_path.as_ref();
    info!("Writing transcript text: {}", output_path.display());

    fs::write(output_path, &transcript.text).await?;
    Ok(())
}

/// SRT body for `segments`, one cue per segment numbered from its id
pub fn render_srt(segments: &[Segment]) -> String {
    let mut srt_content = String::new();

    for segment in segments {
        // Writing into a String cannot fail
        let _ = write!(
            srt_content,
            "{}\n{} --> {}\n{}\n\n",
            u64::from(segment.id) + 1,
            format_srt_time(segment.start),
            format_srt_time(segment.end),
            segment.text
        );
    }

    srt_content
}

/// Format time in seconds as `H:MM:SS,000`.
/// Fractional seconds are truncated; the millisecond field is always zero.
pub fn format_srt_time(seconds: f64) -> String {
    // `as` saturates: NaN and negatives become 0
    let total_seconds = seconds.trunc() as u64;
    let hours = total_seconds / 3600;
    let minutes = (total_seconds % 3600) / 60;
    let secs = total_seconds % 60;

    format!("{}:{:02}:{:02},000", hours, minutes, secs)
}

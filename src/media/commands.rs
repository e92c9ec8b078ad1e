use std::path::Path;

use crate::command::ToolCommand;
use super::EmbedMode;

/// ffmpeg-flavoured wrapper around [`ToolCommand`]
#[derive(Debug, Clone)]
pub struct MediaCommand {
    command: ToolCommand,
}

impl MediaCommand {
    /// Create a new media processing command
    pub fn new<S1: Into<String>, S2: Into<String>>(binary_path: S1, description: S2) -> Self {
        Self {
            command: ToolCommand::new(binary_path, description),
        }
    }

    /// Add an argument
    pub fn arg<S: Into<String>>(mut self, arg: S) -> Self {
        self.command = self.command.arg(arg);
        self
    }

    /// Add input file
    pub fn input<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.command = self.command.arg("-i").path(path);
        self
    }

    /// Add output file
    pub fn output<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.command = self.command.path(path);
        self
    }

    /// Force overwrite output
    pub fn overwrite(self) -> Self {
        self.arg("-y")
    }

    /// Disable video
    pub fn no_video(self) -> Self {
        self.arg("-vn")
    }

    /// Set audio codec
    pub fn audio_codec<S: Into<String>>(self, codec: S) -> Self {
        self.arg("-c:a").arg(codec)
    }

    /// Set audio sample rate
    pub fn audio_sample_rate(self, rate: u32) -> Self {
        self.arg("-ar").arg(rate.to_string())
    }

    /// Set audio channels
    pub fn audio_channels(self, channels: u32) -> Self {
        self.arg("-ac").arg(channels.to_string())
    }

    /// Variable bitrate quality, 0 is best
    pub fn audio_quality(self, quality: u32) -> Self {
        self.arg("-q:a").arg(quality.to_string())
    }

    /// Add video filter
    pub fn video_filter<S: Into<String>>(self, filter: S) -> Self {
        self.arg("-vf").arg(filter)
    }

    /// Select every stream of an input
    pub fn map_input(self, index: usize) -> Self {
        self.arg("-map").arg(index.to_string())
    }

    /// Copy all streams without re-encoding
    pub fn copy_streams(self) -> Self {
        self.arg("-c").arg("copy")
    }

    /// Set subtitle codec
    pub fn subtitle_codec<S: Into<String>>(self, codec: S) -> Self {
        self.arg("-c:s").arg(codec)
    }

    pub fn into_command(self) -> ToolCommand {
        self.command
    }
}

/// Builder for common media processing operations
pub struct MediaCommandBuilder {
    binary_path: String,
}

impl MediaCommandBuilder {
    /// Create a new command builder
    pub fn new<S: Into<String>>(binary_path: S) -> Self {
        Self {
            binary_path: binary_path.into(),
        }
    }

    /// Build audio extraction command
    ///
    /// WAV targets get 16 kHz mono PCM, which whisper.cpp requires. Anything else
    /// is encoded at the highest VBR quality the encoder offers.
    pub fn extract_audio(&self, video_path: &Path, audio_path: &Path) -> ToolCommand {
        let command = MediaCommand::new(&self.binary_path, "Audio extraction")
            .overwrite()
            .input(video_path)
            .no_video();

        let is_wav = audio_path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("wav"));

        let command = if is_wav {
            command
                .audio_codec("pcm_s16le")
                .audio_sample_rate(16000)
                .audio_channels(1)
        } else {
            command.audio_quality(0)
        };

        command.output(audio_path).into_command()
    }

    /// Build subtitle embedding command
    pub fn embed_subtitles(
        &self,
        video_path: &Path,
        subtitle_path: &Path,
        output_path: &Path,
        mode: EmbedMode,
        additional_options: &[String],
    ) -> ToolCommand {
        let mut command = match mode {
            EmbedMode::Burn => MediaCommand::new(&self.binary_path, "Subtitle burn-in")
                .overwrite()
                .input(video_path)
                .video_filter(subtitles_filter(subtitle_path)),
            EmbedMode::SoftMux => MediaCommand::new(&self.binary_path, "Subtitle muxing")
                .overwrite()
                .input(video_path)
                .input(subtitle_path)
                .map_input(0)
                .map_input(1)
                .copy_streams()
                .subtitle_codec(subtitle_codec_for(output_path)),
        };

        // Add user-specified additional options
        for option in additional_options {
            command = command.arg(option.as_str());
        }

        command.output(output_path).into_command()
    }

    /// Build version check command
    pub fn version_check(&self) -> ToolCommand {
        MediaCommand::new(&self.binary_path, "Version check")
            .arg("-version")
            .into_command()
    }
}

/// `subtitles=` filter for `subtitle_path`, escaped for use inside `-vf`
pub fn subtitles_filter(subtitle_path: &Path) -> String {
    let path = subtitle_path.to_string_lossy();
    // Filter option value first, then the filtergraph around it
    let option_value = escape_with(&path, &['\\', '\'', ':']);
    format!("subtitles={}", escape_with(&option_value, &['\\', '\'', '[', ']', ',', ';']))
}

fn escape_with(value: &str, special: &[char]) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        if special.contains(&c) {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

/// Subtitle stream codec the output container accepts
pub fn subtitle_codec_for(output_path: &Path) -> &'static str {
    let extension = output_path
        .extension()
        .map(|ext| ext.to_string_lossy().to_lowercase());

    match extension.as_deref() {
        Some("mkv") => "srt",
        Some("webm") => "webvtt",
        _ => "mov_text",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_audio_max_quality() {
        let builder = MediaCommandBuilder::new("ffmpeg");
        let command = builder.extract_audio(Path::new("in/clip.mp4"), Path::new("audio/clip.mp3"));

        assert_eq!(command.program, "ffmpeg");
        assert_eq!(
            command.args,
            vec!["-y", "-i", "in/clip.mp4", "-vn", "-q:a", "0", "audio/clip.mp3"]
        );
    }

    #[test]
    fn test_extract_audio_wav_for_whisper_cpp() {
        let builder = MediaCommandBuilder::new("/usr/local/bin/ffmpeg");
        let command = builder.extract_audio(Path::new("clip.mp4"), Path::new("clip.WAV"));

        assert_eq!(command.program, "/usr/local/bin/ffmpeg");
        assert_eq!(
            command.args,
            vec![
                "-y", "-i", "clip.mp4", "-vn", "-c:a", "pcm_s16le", "-ar", "16000", "-ac", "1",
                "clip.WAV"
            ]
        );
    }

    #[test]
    fn test_burn_in_command() {
        let builder = MediaCommandBuilder::new("ffmpeg");
        let options = vec!["-crf".to_string(), "23".to_string()];
        let command = builder.embed_subtitles(
            Path::new("movie.mp4"),
            Path::new("movie.srt"),
            Path::new("movie [subtitled].partial.mp4"),
            EmbedMode::Burn,
            &options,
        );

        assert_eq!(
            command.args,
            vec![
                "-y",
                "-i",
                "movie.mp4",
                "-vf",
                "subtitles=movie.srt",
                "-crf",
                "23",
                "movie [subtitled].partial.mp4"
            ]
        );
    }

    #[test]
    fn test_soft_mux_command() {
        let builder = MediaCommandBuilder::new("ffmpeg");
        let command = builder.embed_subtitles(
            Path::new("movie.mkv"),
            Path::new("movie.srt"),
            Path::new("movie [subtitled].mkv"),
            EmbedMode::SoftMux,
            &[],
        );

        assert_eq!(
            command.args,
            vec![
                "-y",
                "-i",
                "movie.mkv",
                "-i",
                "movie.srt",
                "-map",
                "0",
                "-map",
                "1",
                "-c",
                "copy",
                "-c:s",
                "srt",
                "movie [subtitled].mkv"
            ]
        );
    }

    #[test]
    fn test_subtitles_filter_escaping() {
        assert_eq!(
            subtitles_filter(Path::new("/subs/plain.srt")),
            "subtitles=/subs/plain.srt"
        );
        assert_eq!(
            subtitles_filter(Path::new("/subs/movie [1].srt")),
            r"subtitles=/subs/movie \[1\].srt"
        );
        assert_eq!(
            subtitles_filter(Path::new("C:/subs/it's.srt")),
            r"subtitles=C\\:/subs/it\\\'s.srt"
        );
    }

    #[test]
    fn test_subtitle_codec_for_container() {
        assert_eq!(subtitle_codec_for(Path::new("a.mp4")), "mov_text");
        assert_eq!(subtitle_codec_for(Path::new("a.MKV")), "srt");
        assert_eq!(subtitle_codec_for(Path::new("a.webm")), "webvtt");
        assert_eq!(subtitle_codec_for(Path::new("a")), "mov_text");
    }
}

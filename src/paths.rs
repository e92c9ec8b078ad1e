//! Derivation of intermediate and output file paths from an input video.
//!
//! Everything here is pure path arithmetic; nothing touches the filesystem.

use std::ffi::OsStr;
use std::path::{Path, PathBuf};

use crate::config::PathsConfig;
use crate::error::{Result, SubtitlerError};

/// Marker inserted between the base name and the extension of subtitled videos
pub const SUBTITLED_SUFFIX: &str = " [subtitled]";

/// Container used when the input video has no extension and none is configured
pub const FALLBACK_CONTAINER: &str = "mp4";

fn file_stem(input_path: &Path) -> Result<&OsStr> {
    input_path
        .file_stem()
        .ok_or_else(|| SubtitlerError::InvalidPath(input_path.display().to_string()))
}

/// Swap the extension of `input_path`, optionally moving it into `target_dir`
pub fn derive_path(input_path: &Path, extension: &str, target_dir: Option<&Path>) -> Result<PathBuf> {
    let stem = file_stem(input_path)?;

    Ok(match target_dir {
        Some(dir) => {
            let mut name = stem.to_os_string();
            name.push(".");
            name.push(extension);
            dir.join(name)
        }
        None => input_path.with_extension(extension),
    })
}

/// `{stem} [subtitled].{ext}` in `output_dir`, or next to the video
pub fn output_path(
    video_path: &Path,
    output_dir: Option<&Path>,
    output_extension: Option<&str>,
) -> Result<PathBuf> {
    let stem = file_stem(video_path)?;
    let extension = output_extension
        .map(OsStr::new)
        .or_else(|| video_path.extension())
        .unwrap_or_else(|| OsStr::new(FALLBACK_CONTAINER));

    let mut name = stem.to_os_string();
    name.push(SUBTITLED_SUFFIX);
    name.push(".");
    name.push(extension);

    let dir = match output_dir {
        Some(dir) => dir,
        None => video_path.parent().unwrap_or_else(|| Path::new("")),
    };
    Ok(dir.join(name))
}

/// In-progress name for `output`: `{stem}.partial.{ext}`.
/// The extension is kept so the transcoder still picks the right container.
pub fn partial_path(output: &Path) -> PathBuf {
    let mut name = output
        .file_stem()
        .map(OsStr::to_os_string)
        .unwrap_or_default();
    name.push(".partial");
    if let Some(extension) = output.extension() {
        name.push(".");
        name.push(extension);
    }
    output.with_file_name(name)
}

/// Target directories for each derived file; `None` keeps it next to the video
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DirectoryLayout {
    pub audio_dir: Option<PathBuf>,
    pub subtitle_dir: Option<PathBuf>,
    pub text_dir: Option<PathBuf>,
    pub output_dir: Option<PathBuf>,
}

impl DirectoryLayout {
    /// Batch-mode layout: every artifact goes to its configured directory
    pub fn from_paths_config(paths: &PathsConfig) -> Self {
        Self {
            audio_dir: Some(paths.audio_dir.clone()),
            subtitle_dir: Some(paths.subtitle_dir.clone()),
            text_dir: Some(paths.text_dir.clone()),
            output_dir: Some(paths.output_dir.clone()),
        }
    }

    /// Single-file layout: everything lands next to the video
    pub fn alongside() -> Self {
        Self::default()
    }
}

/// The four files produced for one video
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DerivedPaths {
    pub audio: PathBuf,
    pub subtitle: PathBuf,
    pub text: PathBuf,
    pub output: PathBuf,
}

impl DerivedPaths {
    pub fn resolve(
        video_path: &Path,
        layout: &DirectoryLayout,
        audio_extension: &str,
        output_extension: Option<&str>,
    ) -> Result<Self> {
        Ok(Self {
            audio: derive_path(video_path, audio_extension, layout.audio_dir.as_deref())?,
            subtitle: derive_path(video_path, "srt", layout.subtitle_dir.as_deref())?,
            text: derive_path(video_path, "txt", layout.text_dir.as_deref())?,
            output: output_path(video_path, layout.output_dir.as_deref(), output_extension)?,
        })
    }

    /// Every derived file, in the order the pipeline writes them
    pub fn all(&self) -> [&Path; 4] {
        [
            self.audio.as_path(),
            self.subtitle.as_path(),
            self.text.as_path(),
            self.output.as_path(),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_derive_path_same_directory() {
        let derived = derive_path(Path::new("clip.mp4"), "srt", None).unwrap();
        assert_eq!(derived, PathBuf::from("clip.srt"));

        let nested = derive_path(Path::new("/videos/a/clip.mp4"), "mp3", None).unwrap();
        assert_eq!(nested, PathBuf::from("/videos/a/clip.mp3"));
    }

    #[test]
    fn test_derive_path_target_directory() {
        let derived = derive_path(Path::new("clip.mp4"), "srt", Some(Path::new("/out"))).unwrap();
        assert_eq!(derived, PathBuf::from("/out/clip.srt"));

        let nested =
            derive_path(Path::new("/videos/a/clip.mp4"), "txt", Some(Path::new("/out"))).unwrap();
        assert_eq!(nested, PathBuf::from("/out/clip.txt"));
    }

    #[test]
    fn test_derive_path_keeps_inner_dots() {
        let derived = derive_path(Path::new("my.holiday.mp4"), "srt", Some(Path::new("subs"))).unwrap();
        assert_eq!(derived, PathBuf::from("subs/my.holiday.srt"));
    }

    #[test]
    fn test_derive_path_without_name_is_invalid() {
        let err = derive_path(Path::new("/"), "srt", None).unwrap_err();
        assert!(matches!(err, SubtitlerError::InvalidPath(_)));

        let err = derive_path(Path::new(".."), "srt", Some(Path::new("/out"))).unwrap_err();
        assert!(matches!(err, SubtitlerError::InvalidPath(_)));
    }

    #[test]
    fn test_output_naming() {
        let output = output_path(Path::new("movie.mp4"), None, None).unwrap();
        assert_eq!(output.file_name().unwrap(), "movie [subtitled].mp4");

        let moved = output_path(Path::new("/in/movie.mkv"), Some(Path::new("/done")), None).unwrap();
        assert_eq!(moved, PathBuf::from("/done/movie [subtitled].mkv"));

        let forced = output_path(Path::new("/in/movie.avi"), None, Some("mp4")).unwrap();
        assert_eq!(forced, PathBuf::from("/in/movie [subtitled].mp4"));

        let bare = output_path(Path::new("/in/movie"), None, None).unwrap();
        assert_eq!(bare, PathBuf::from("/in/movie [subtitled].mp4"));
    }

    #[test]
    fn test_partial_path() {
        assert_eq!(
            partial_path(Path::new("/done/movie [subtitled].mp4")),
            PathBuf::from("/done/movie [subtitled].partial.mp4")
        );
    }

    #[test]
    fn test_resolve_batch_layout() {
        let layout = DirectoryLayout::from_paths_config(&PathsConfig::default());
        let paths = DerivedPaths::resolve(
            Path::new("assets/video_input/talk.mp4"),
            &layout,
            "mp3",
            None,
        )
        .unwrap();

        assert_eq!(paths.audio, PathBuf::from("assets/audio/talk.mp3"));
        assert_eq!(paths.subtitle, PathBuf::from("assets/subtitles/talk.srt"));
        assert_eq!(paths.text, PathBuf::from("assets/text/talk.txt"));
        assert_eq!(paths.output, PathBuf::from("assets/video_output/talk [subtitled].mp4"));
    }

    #[test]
    fn test_resolve_alongside_layout() {
        let paths = DerivedPaths::resolve(
            Path::new("/home/me/talk.mp4"),
            &DirectoryLayout::alongside(),
            "wav",
            None,
        )
        .unwrap();

        assert_eq!(paths.audio, PathBuf::from("/home/me/talk.wav"));
        assert_eq!(paths.subtitle, PathBuf::from("/home/me/talk.srt"));
        assert_eq!(paths.text, PathBuf::from("/home/me/talk.txt"));
        assert_eq!(paths.output, PathBuf::from("/home/me/talk [subtitled].mp4"));
    }
}

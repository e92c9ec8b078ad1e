use serde::{Deserialize, Serialize};

/// A time-bounded span of recognised speech
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    /// Ordinal assigned by the transcription backend, starting at 0
    pub id: u32,
    /// Start offset in seconds
    pub start: f64,
    /// End offset in seconds
    pub end: f64,
    pub text: String,
}

/// Speech recognition result for one audio file
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Transcript {
    pub text: String,
    pub segments: Vec<Segment>,
    pub language: Option<String>,
}

impl Transcript {
    /// End of the last segment, if any
    pub fn duration(&self) -> Option<f64> {
        self.segments.last().map(|segment| segment.end)
    }

    /// Whether segment ids run 0, 1, 2, ... in order.
    /// Cue numbers are taken from the ids, so gaps show up in the subtitle file.
    pub fn has_sequential_ids(&self) -> bool {
        self.segments
            .iter()
            .enumerate()
            .all(|(position, segment)| segment.id as usize == position)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn segment(id: u32, start: f64, end: f64) -> Segment {
        Segment {
            id,
            start,
            end,
            text: format!("segment {}", id),
        }
    }

    #[test]
    fn test_duration() {
        let mut transcript = Transcript::default();
        assert_eq!(transcript.duration(), None);

        transcript.segments = vec![segment(0, 0.0, 2.5), segment(1, 2.5, 7.25)];
        assert_eq!(transcript.duration(), Some(7.25));
    }

    #[test]
    fn test_sequential_ids() {
        let transcript = Transcript {
            segments: vec![segment(0, 0.0, 1.0), segment(1, 1.0, 2.0)],
            ..Default::default()
        };
        assert!(transcript.has_sequential_ids());

        let sparse = Transcript {
            segments: vec![segment(0, 0.0, 1.0), segment(4, 1.0, 2.0)],
            ..Default::default()
        };
        assert!(!sparse.has_sequential_ids());
        assert!(Transcript::default().has_sequential_ids());
    }
}

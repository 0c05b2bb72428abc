//! Data models for transcripts.

use serde::{Deserialize, Serialize};

/// A complete transcript for one source recording.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transcript {
    /// Stable name of the recording (file stem or slug).
    pub name: String,
    /// Full transcript text.
    pub text: String,
    /// Timed segments in chronological order. May be empty.
    pub segments: Vec<Segment>,
}

impl Transcript {
    /// Create a transcript from timed segments. The full text is the
    /// non-empty segment texts joined line by line.
    pub fn new(name: String, segments: Vec<Segment>) -> Self {
        let text = segments
            .iter()
            .map(|s| s.text.trim())
            .filter(|t| !t.is_empty())
            .collect::<Vec<_>>()
            .join("\n");

        Self {
            name,
            text,
            segments,
        }
    }

    /// Create a transcript from raw text with no timing information.
    ///
    /// Segments are synthesized with [`crate::chunking::segment`].
    pub fn from_text(name: String, text: String) -> Self {
        let segments = crate::chunking::segment(&text);
        Self {
            name,
            text,
            segments,
        }
    }
}

/// A single span of transcript text with timing in seconds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    /// Start time in seconds.
    pub start: f64,
    /// End time in seconds.
    pub end: f64,
    /// Spoken text.
    pub text: String,
}

impl Segment {
    /// Create a new segment.
    pub fn new(start: f64, end: f64, text: impl Into<String>) -> Self {
        Self {
            start,
            end,
            text: text.into(),
        }
    }

    /// Number of whitespace-separated words.
    pub fn word_count(&self) -> usize {
        self.text.split_whitespace().count()
    }
}

/// Format seconds as MM:SS or HH:MM:SS.
pub fn format_timestamp(seconds: f64) -> String {
    let total_seconds = seconds.max(0.0) as u32;
    let hours = total_seconds / 3600;
    let minutes = (total_seconds % 3600) / 60;
    let secs = total_seconds % 60;

    if hours > 0 {
        format!("{:02}:{:02}:{:02}", hours, minutes, secs)
    } else {
        format!("{:02}:{:02}", minutes, secs)
    }
}

//! Synthetic segmentation for transcripts without timing data.
//!
//! Each paragraph becomes one segment. Its duration is guessed from the
//! number of sentence-ending punctuation characters, two seconds apiece,
//! with a two second floor.

use crate::transcription::Segment;
use regex::Regex;
use std::sync::LazyLock;

/// Estimated seconds per sentence-ending character.
const SECONDS_PER_SENTENCE: f64 = 2.0;

/// Minimum duration of a synthesized segment.
const MIN_SEGMENT_SECONDS: f64 = 2.0;

static BLANK_LINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\n\s*\n").expect("Invalid regex"));

/// Split raw text into timed segments, one per paragraph.
///
/// Always returns at least one segment: when no paragraph has content the
/// whole text is returned as a single zero-length segment.
pub fn segment(text: &str) -> Vec<Segment> {
    let mut segments = Vec::new();
    let mut cursor = 0.0;

    for paragraph in BLANK_LINE.split(text) {
        let paragraph = paragraph.trim();
        if paragraph.is_empty() {
            continue;
        }

        let duration = estimate_duration(paragraph);
        segments.push(Segment::new(cursor, cursor + duration, paragraph));
        cursor += duration;
    }

    if segments.is_empty() {
        segments.push(Segment::new(0.0, 0.0, text));
    }

    segments
}

/// Spoken duration guess for a paragraph.
///
/// Counts `.`, `!` and `?` characters, not grammatical sentences, so "..."
/// counts three times.
pub fn estimate_duration(paragraph: &str) -> f64 {
    let sentences = paragraph
        .chars()
        .filter(|c| matches!(c, '.' | '!' | '?'))
        .count();

    (sentences as f64 * SECONDS_PER_SENTENCE).max(MIN_SEGMENT_SECONDS)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paragraphs_get_consecutive_windows() {
        let text = "Welcome back. Today we cook!\n\nFirst, the onions.\n\n\n  Any questions? Really? Okay.  ";
        let segments = segment(text);

        assert_eq!(segments.len(), 3);
        assert_eq!(segments[0], Segment::new(0.0, 4.0, "Welcome back. Today we cook!"));
        assert_eq!(segments[1], Segment::new(4.0, 6.0, "First, the onions."));
        assert_eq!(segments[2], Segment::new(6.0, 12.0, "Any questions? Really? Okay."));
    }

    #[test]
    fn test_whitespace_only_lines_separate_paragraphs() {
        let segments = segment("one\n   \t\ntwo\r\n\r\nthree");
        let texts: Vec<&str> = segments.iter().map(|s| s.text.as_str()).collect();
        assert_eq!(texts, vec!["one", "two", "three"]);
    }

    #[test]
    fn test_minimum_duration_without_punctuation() {
        let segments = segment("no punctuation at all");
        assert_eq!(segments, vec![Segment::new(0.0, 2.0, "no punctuation at all")]);
    }

    #[test]
    fn test_punctuation_counted_per_character() {
        assert_eq!(estimate_duration("Wait..."), 6.0);
        assert_eq!(estimate_duration("What?!"), 4.0);
    }

    #[test]
    fn test_empty_text_yields_single_segment() {
        assert_eq!(segment(""), vec![Segment::new(0.0, 0.0, "")]);
        assert_eq!(segment(" \n\n \n"), vec![Segment::new(0.0, 0.0, " \n\n \n")]);
    }
}

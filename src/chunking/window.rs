//! Word-window chunking implementation.
//!
//! Groups consecutive segments until the word budget would be exceeded,
//! then starts the next chunk with the tail of the previous one.

use super::{chunk_id, Chunk, ChunkingConfig};
use crate::transcription::{Segment, Transcript};
use tracing::debug;

/// Greedy word-bounded chunker with tail overlap.
///
/// Segments are never split. A segment longer than `max_words` ends up in a
/// chunk that exceeds the budget.
#[derive(Debug, Clone, Default)]
pub struct WordWindowChunker {
    config: ChunkingConfig,
}

impl WordWindowChunker {
    pub fn new(config: ChunkingConfig) -> Self {
        Self { config }
    }

    /// Split a transcript into chunks.
    ///
    /// A transcript without segments is treated as one segment holding its
    /// whole text, so non-blank text always yields at least one chunk.
    pub fn chunk(&self, transcript: &Transcript) -> Vec<Chunk> {
        if transcript.segments.is_empty() {
            let whole = [Segment::new(0.0, 0.0, transcript.text.as_str())];
            return self.chunk_segments(&whole);
        }
        self.chunk_segments(&transcript.segments)
    }

    /// Split a run of segments into chunks.
    pub fn chunk_segments(&self, segments: &[Segment]) -> Vec<Chunk> {
        let mut chunks = Vec::new();
        let mut buffer: Vec<&Segment> = Vec::new();
        let mut wsum = 0;

        for seg in segments {
            let text = seg.text.trim();
            if text.is_empty() {
                continue;
            }
            let words = seg.word_count();

            if wsum + words > self.config.max_words && !buffer.is_empty() {
                chunks.push(close(&buffer, chunks.len() + 1));
                buffer = self.carry_over(&buffer);
                wsum = buffer.iter().map(|s| s.word_count()).sum();
            }

            buffer.push(seg);
            wsum += words;
        }

        if !buffer.is_empty() {
            chunks.push(close(&buffer, chunks.len() + 1));
        }

        debug!("Chunked {} segments into {} chunks", segments.len(), chunks.len());
        chunks
    }

    /// Trailing segments of a closed buffer that fit in the overlap budget,
    /// in chronological order.
    fn carry_over<'a>(&self, closed: &[&'a Segment]) -> Vec<&'a Segment> {
        if self.config.overlap_words == 0 {
            return Vec::new();
        }

        let mut carry = Vec::new();
        let mut carried_words = 0;
        for seg in closed.iter().rev() {
            let words = seg.word_count();
            if carried_words + words > self.config.overlap_words {
                break;
            }
            carry.push(*seg);
            carried_words += words;
        }
        carry.reverse();
        carry
    }
}

fn close(buffer: &[&Segment], n: usize) -> Chunk {
    let text = buffer
        .iter()
        .map(|s| s.text.trim())
        .collect::<Vec<_>>()
        .join(" ");

    // Buffers are only closed when non-empty.
    let start = buffer.first().map(|s| s.start).unwrap_or(0.0);
    let end = buffer.last().map(|s| s.end).unwrap_or(0.0);

    Chunk::new(chunk_id(n), text, start, end)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chunker(max_words: usize, overlap_words: usize) -> WordWindowChunker {
        WordWindowChunker::new(ChunkingConfig {
            max_words,
            overlap_words,
        })
    }

    fn talk() -> Vec<Segment> {
        vec![
            Segment::new(0.0, 2.0, "Hello world."),
            Segment::new(2.0, 4.0, "Foo bar baz qux."),
            Segment::new(4.0, 6.0, "End of talk."),
        ]
    }

    #[test]
    fn test_small_transcript_is_one_chunk() {
        let transcript = Transcript::new("t".to_string(), talk());
        let chunks = WordWindowChunker::default().chunk(&transcript);

        assert_eq!(chunks.len(), 1);
        assert_eq!(chunks[0].id, "chunk-1");
        assert_eq!(chunks[0].text, "Hello world. Foo bar baz qux. End of talk.");
        assert_eq!(chunks[0].start, 0.0);
        assert_eq!(chunks[0].end, 6.0);
    }

    #[test]
    fn test_three_segment_walkthrough() {
        let chunks = chunker(4, 2).chunk_segments(&talk());

        assert_eq!(
            chunks,
            vec![
                Chunk::new("chunk-1", "Hello world.", 0.0, 2.0),
                Chunk::new("chunk-2", "Hello world. Foo bar baz qux.", 0.0, 4.0),
                Chunk::new("chunk-3", "End of talk.", 4.0, 6.0),
            ]
        );

        for seg in talk() {
            assert!(chunks.iter().any(|c| c.text.contains(seg.text.as_str())));
        }
    }

    #[test]
    fn test_no_overlap() {
        let chunks = chunker(4, 0).chunk_segments(&talk());

        let texts: Vec<&str> = chunks.iter().map(|c| c.text.as_str()).collect();
        assert_eq!(texts, vec!["Hello world.", "Foo bar baz qux.", "End of talk."]);
    }

    #[test]
    fn test_consecutive_chunks_share_a_segment() {
        let segments: Vec<Segment> = (0..20)
            .map(|i| Segment::new(i as f64, i as f64 + 1.0, format!("word{:02} and more", i)))
            .collect();
        let chunks = chunker(10, 4).chunk_segments(&segments);

        assert!(chunks.len() > 2);
        for pair in chunks.windows(2) {
            let last = segments
                .iter()
                .position(|s| pair[0].text.ends_with(s.text.as_str()))
                .unwrap();
            let tail = &segments[last];
            assert!(pair[1].text.starts_with(tail.text.as_str()));
            assert_eq!(pair[1].start, tail.start);
        }
    }

    #[test]
    fn test_empty_segments_are_skipped() {
        let segments = vec![
            Segment::new(0.0, 1.0, "  "),
            Segment::new(1.0, 2.0, " spaced out "),
            Segment::new(2.0, 3.0, ""),
        ];
        let chunks = WordWindowChunker::default().chunk_segments(&segments);

        assert_eq!(chunks, vec![Chunk::new("chunk-1", "spaced out", 1.0, 2.0)]);
    }

    #[test]
    fn test_only_empty_segments_yield_nothing() {
        let segments = vec![Segment::new(0.0, 1.0, " "), Segment::new(1.0, 2.0, "\n")];
        assert!(WordWindowChunker::default().chunk_segments(&segments).is_empty());
    }

    #[test]
    fn test_oversized_segment_is_not_split() {
        let long = (0..12).map(|i| format!("w{}", i)).collect::<Vec<_>>().join(" ");
        let segments = vec![
            Segment::new(0.0, 5.0, long.clone()),
            Segment::new(5.0, 6.0, "tail"),
        ];
        let chunks = chunker(5, 0).chunk_segments(&segments);

        assert_eq!(chunks.len(), 2);
        assert_eq!(chunks[0].text, long);
        assert_eq!(chunks[1].text, "tail");
    }

    #[test]
    fn test_oversized_segment_after_buffer_closes_first() {
        let long = (0..8).map(|i| format!("w{}", i)).collect::<Vec<_>>().join(" ");
        let segments = vec![
            Segment::new(0.0, 1.0, "short one"),
            Segment::new(1.0, 5.0, long.clone()),
        ];
        let chunks = chunker(5, 0).chunk_segments(&segments);

        assert_eq!(chunks[0].text, "short one");
        assert_eq!(chunks[1].text, long);
    }

    #[test]
    fn test_segmentless_transcript_uses_whole_text() {
        let transcript = Transcript {
            name: "raw".to_string(),
            text: "just some text".to_string(),
            segments: Vec::new(),
        };
        let chunks = WordWindowChunker::default().chunk(&transcript);

        assert_eq!(chunks, vec![Chunk::new("chunk-1", "just some text", 0.0, 0.0)]);
    }

    #[test]
    fn test_chunking_is_deterministic() {
        let segments: Vec<Segment> = (0..50)
            .map(|i| Segment::new(i as f64 * 3.0, i as f64 * 3.0 + 3.0, format!("sentence number {} here.", i)))
            .collect();
        let chunker = chunker(17, 6);

        assert_eq!(chunker.chunk_segments(&segments), chunker.chunk_segments(&segments));
    }

}

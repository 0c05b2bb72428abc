//! Word-overlap retrieval for when no embedding function is available.
//!
//! Chunks are scored by the number of distinct lowercase whitespace tokens
//! they share with the query. Chunks sharing nothing are dropped and ties keep
//! their input order.

use super::HasText;
use std::collections::HashSet;

/// Number of chunks returned when the caller does not ask for a count.
pub const DEFAULT_KEYWORD_TOP_K: usize = 3;

fn tokens(text: &str) -> HashSet<String> {
    text.split_whitespace().map(str::to_lowercase).collect()
}

/// Overlap between the query's token set and `text`'s token set.
pub fn score(query_tokens: &HashSet<String>, text: &str) -> usize {
    tokens(text).intersection(query_tokens).count()
}

/// The `top_k` chunks sharing the most words with `query`, best first.
pub fn retrieve<'a, T: HasText>(query: &str, chunks: &'a [T], top_k: usize) -> Vec<&'a T> {
    let query_tokens = tokens(query);

    let mut scored: Vec<(usize, &T)> = chunks
        .iter()
        .map(|chunk| (score(&query_tokens, chunk.text()), chunk))
        .filter(|(score, _)| *score > 0)
        .collect();

    // sort_by is stable
    scored.sort_by(|a, b| b.0.cmp(&a.0));
    scored.into_iter().take(top_k).map(|(_, chunk)| chunk).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chunking::Chunk;

    fn chunks() -> Vec<Chunk> {
        vec![
            Chunk::new("chunk-1", "Rust has no garbage collector", 0.0, 10.0),
            Chunk::new("chunk-2", "the weather was nice", 10.0, 20.0),
            Chunk::new("chunk-3", "garbage collection pauses in Go", 20.0, 30.0),
            Chunk::new("chunk-4", "RUST rust Rust collector", 30.0, 40.0),
        ]
    }

    #[test]
    fn test_ranks_by_overlap() {
        let chunks = chunks();
        let hits = retrieve("does rust need a garbage collector", &chunks, DEFAULT_KEYWORD_TOP_K);

        let ids: Vec<&str> = hits.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, vec!["chunk-1", "chunk-4", "chunk-3"]);
    }

    #[test]
    fn test_never_returns_zero_overlap() {
        let chunks = chunks();
        let hits = retrieve("weather", &chunks, 10);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].id, "chunk-2");

        assert!(retrieve("kubernetes", &chunks, 10).is_empty());
        assert!(retrieve("", &chunks, 10).is_empty());
    }

    #[test]
    fn test_ties_keep_input_order() {
        let texts = vec![
            "alpha beta".to_string(),
            "beta gamma".to_string(),
            "delta".to_string(),
            "beta".to_string(),
        ];

        let hits = retrieve("beta", &texts, 3);
        assert_eq!(hits, vec![&texts[0], &texts[1], &texts[3]]);
    }

    #[test]
    fn test_tokens_are_sets() {
        let query = tokens("rust rust");
        assert_eq!(score(&query, "Rust RUST rust"), 1);
        // punctuation stays attached
        assert_eq!(score(&query, "rust, mostly"), 0);
    }

    #[test]
    fn test_top_k_zero() {
        assert!(retrieve("rust", &chunks(), 0).is_empty());
    }
}

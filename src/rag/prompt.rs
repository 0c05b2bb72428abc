//! Question-answering prompt built from retrieved chunks.

use super::RetrievedChunk;
use crate::config::{Prompts, QaPrompts};
use std::collections::HashMap;

/// Numbered context block, one entry per chunk:
///
/// ```text
/// [1] [00:00-00:30]
/// first chunk text
///
/// [2] [00:30-01:05]
/// second chunk text
/// ```
pub fn format_context(chunks: &[RetrievedChunk]) -> String {
    chunks
        .iter()
        .enumerate()
        .map(|(i, chunk)| format!("[{}] [{}]\n{}", i + 1, chunk.format_range(), chunk.text))
        .collect::<Vec<_>>()
        .join("\n\n")
}

/// Render the question-answering prompt for a text-completion model.
pub fn build_prompt(template: &QaPrompts, question: &str, chunks: &[RetrievedChunk]) -> String {
    let mut vars = HashMap::new();
    vars.insert("question".to_string(), question.to_string());
    vars.insert("context".to_string(), format_context(chunks));
    Prompts::render(&template.template, &vars)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hits() -> Vec<RetrievedChunk> {
        vec![
            RetrievedChunk::new("Ownership moves values.", 133.0, 165.0),
            RetrievedChunk::new("Borrows are checked.", 310.0, 330.0),
        ]
    }

    #[test]
    fn test_format_context() {
        assert_eq!(
            format_context(&hits()),
            "[1] [02:13-02:45]\nOwnership moves values.\n\n[2] [05:10-05:30]\nBorrows are checked."
        );
        assert_eq!(format_context(&[]), "");
    }

    #[test]
    fn test_build_prompt() {
        let prompt = build_prompt(&QaPrompts::default(), "What is ownership?", &hits());

        assert!(prompt.contains("Question:\nWhat is ownership?"));
        assert!(prompt.contains("Context chunks:\n[1] [02:13-02:45]\nOwnership moves values."));
        assert!(!prompt.contains("{{"));
    }

    #[test]
    fn test_custom_template() {
        let template = QaPrompts {
            template: "Q: {{question}}\n{{context}}".to_string(),
        };
        assert_eq!(
            build_prompt(&template, "why?", &hits()[..1]),
            "Q: why?\n[1] [02:13-02:45]\nOwnership moves values."
        );
    }
}

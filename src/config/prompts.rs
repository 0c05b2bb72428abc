//! Prompt templates for Vidrecall.
//!
//! The question-answering template can be overridden by placing `qa.toml`
//! in the custom prompts directory.

use regex::{Captures, Regex};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::LazyLock;

static PLACEHOLDER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{\{(\w+)\}\}").expect("Invalid regex"));

/// Collection of all prompt templates.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Prompts {
    pub qa: QaPrompts,
}

/// Prompt handed to a text-completion model together with retrieved chunks.
///
/// Placeholders: `{{question}}` and `{{context}}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct QaPrompts {
    pub template: String,
}

impl Default for QaPrompts {
    fn default() -> Self {
        Self {
            template: r#"You are a helpful assistant answering questions about a video transcript. Use only the provided context.

Question:
{{question}}

Context chunks:
{{context}}

Instructions:
- Provide a concise answer.
- Cite the most relevant chunks by their bracketed numbers and timestamps, e.g., [1 02:13-02:45], [3 05:10-05:30].
- If unsure or missing context, state that clearly."#
                .to_string(),
        }
    }
}

impl Prompts {
    /// Load prompts, applying overrides from a custom directory if given.
    pub fn load(custom_dir: Option<&str>) -> crate::error::Result<Self> {
        let mut prompts = Prompts::default();

        if let Some(dir) = custom_dir {
            let custom_path = PathBuf::from(shellexpand::tilde(dir).to_string());

            let qa_path = custom_path.join("qa.toml");
            if qa_path.exists() {
                let content = std::fs::read_to_string(&qa_path)?;
                prompts.qa = toml::from_str(&content)?;
            }
        }

        Ok(prompts)
    }

    /// Render a prompt template with the given variables.
    ///
    /// Placeholders are substituted in a single pass, so values are never
    /// themselves expanded. Unknown placeholders are left as they are.
    pub fn render(template: &str, vars: &HashMap<String, String>) -> String {
        PLACEHOLDER
            .replace_all(template, |caps: &Captures<'_>| match vars.get(&caps[1]) {
                Some(value) => value.clone(),
                None => caps[0].to_string(),
            })
            .into_owned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_prompts() {
        let prompts = Prompts::default();
        assert!(prompts.qa.template.contains("{{question}}"));
        assert!(prompts.qa.template.contains("{{context}}"));
    }

    #[test]
    fn test_render_template() {
        let template = "Hello {{name}}, you have {{count}} messages.";
        let mut vars = HashMap::new();
        vars.insert("name".to_string(), "Alice".to_string());
        vars.insert("count".to_string(), "5".to_string());

        let result = Prompts::render(template, &vars);
        assert_eq!(result, "Hello Alice, you have 5 messages.");
    }

    #[test]
    fn test_render_does_not_expand_values() {
        let template = "Question: {{question}}\nContext: {{context}}\n{{unknown}}";
        let mut vars = HashMap::new();
        vars.insert("question".to_string(), "what does {{context}} mean?".to_string());
        vars.insert("context".to_string(), "[1] {{question}}".to_string());

        let result = Prompts::render(template, &vars);
        assert_eq!(
            result,
            "Question: what does {{context}} mean?\nContext: [1] {{question}}\n{{unknown}}"
        );
    }

    #[test]
    fn test_custom_qa_template() {
        let dir = TempDir::new().unwrap();
        std::fs::write(
            dir.path().join("qa.toml"),
            "template = \"Q: {{question}}\\n{{context}}\"\n",
        )
        .unwrap();

        let prompts = Prompts::load(dir.path().to_str()).unwrap();
        assert_eq!(prompts.qa.template, "Q: {{question}}\n{{context}}");
    }
}

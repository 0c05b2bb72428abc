//! Configuration settings for Vidrecall.

use crate::chunking::ChunkingConfig;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Root configuration structure.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Settings {
    pub general: GeneralSettings,
    pub transcripts: TranscriptSettings,
    pub chunking: ChunkingSettings,
    pub embedding: EmbeddingSettings,
    pub vector_store: VectorStoreSettings,
    pub query: QuerySettings,
    pub prompts: PromptSettings,
}

/// General application settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralSettings {
    /// Directory for storing application data.
    pub data_dir: String,
    /// Log level used when neither `-v` nor `RUST_LOG` is given
    /// (trace, debug, info, warn, error).
    pub log_level: String,
}

impl Default for GeneralSettings {
    fn default() -> Self {
        Self {
            data_dir: "~/.vidrecall".to_string(),
            log_level: "warn".to_string(),
        }
    }
}

/// Where persisted transcripts live.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TranscriptSettings {
    /// Directory of `<name>.txt` transcript files.
    pub dir: String,
}

impl Default for TranscriptSettings {
    fn default() -> Self {
        Self {
            dir: "~/.vidrecall/transcripts".to_string(),
        }
    }
}

/// Content chunking settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ChunkingSettings {
    /// Word count above which a chunk is closed.
    pub max_words: usize,
    /// Words carried from the end of one chunk into the next.
    pub overlap_words: usize,
}

impl Default for ChunkingSettings {
    fn default() -> Self {
        let defaults = ChunkingConfig::default();
        Self {
            max_words: defaults.max_words,
            overlap_words: defaults.overlap_words,
        }
    }
}

impl From<&ChunkingSettings> for ChunkingConfig {
    fn from(settings: &ChunkingSettings) -> Self {
        ChunkingConfig {
            max_words: settings.max_words,
            overlap_words: settings.overlap_words,
        }
    }
}

/// Embedding generation settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EmbeddingSettings {
    /// Embedding provider (openai, hash, none).
    pub provider: String,
    /// Embedding model to use.
    pub model: String,
    /// Embedding dimensions.
    pub dimensions: u32,
}

impl Default for EmbeddingSettings {
    fn default() -> Self {
        Self {
            provider: "openai".to_string(),
            model: "text-embedding-3-small".to_string(),
            dimensions: 1536,
        }
    }
}

/// Vector store settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct VectorStoreSettings {
    /// Persistence directory holding the index database.
    pub persist_dir: String,
}

impl Default for VectorStoreSettings {
    fn default() -> Self {
        Self {
            persist_dir: "~/.vidrecall/index".to_string(),
        }
    }
}

/// Retrieval settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct QuerySettings {
    /// Number of chunks returned by semantic search.
    pub top_k: usize,
    /// Number of chunks returned by keyword retrieval.
    pub keyword_top_k: usize,
    /// Retry with keyword retrieval when embeddings are unavailable.
    pub keyword_fallback: bool,
}

impl Default for QuerySettings {
    fn default() -> Self {
        Self {
            top_k: 4,
            keyword_top_k: 3,
            keyword_fallback: true,
        }
    }
}

/// Prompt customization settings.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct PromptSettings {
    /// Directory for custom prompts (overrides defaults).
    pub custom_dir: Option<String>,
}

impl Settings {
    /// Load settings from the default configuration file.
    pub fn load() -> crate::error::Result<Self> {
        Self::load_from(None)
    }

    /// Load settings from a specific path, or default location if None.
    pub fn load_from(path: Option<&PathBuf>) -> crate::error::Result<Self> {
        let config_path = match path {
            Some(p) => p.clone(),
            None => Self::default_config_path(),
        };

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            let settings: Settings = toml::from_str(&content)?;
            Ok(settings)
        } else {
            Ok(Settings::default())
        }
    }

    /// Save settings to a specific path.
    pub fn save_to(&self, path: &PathBuf) -> crate::error::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)
            .map_err(|e| crate::error::VidrecallError::Config(e.to_string()))?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Get the default configuration file path.
    pub fn default_config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("vidrecall")
            .join("config.toml")
    }

    /// Expand shell variables in paths (e.g., ~).
    pub fn expand_path(path: &str) -> PathBuf {
        PathBuf::from(shellexpand::tilde(path).to_string())
    }

    /// Get the expanded data directory path.
    pub fn data_dir(&self) -> PathBuf {
        Self::expand_path(&self.general.data_dir)
    }

    /// Get the expanded transcripts directory path.
    pub fn transcripts_dir(&self) -> PathBuf {
        Self::expand_path(&self.transcripts.dir)
    }

    /// Get the expanded vector store persistence directory.
    pub fn persist_dir(&self) -> PathBuf {
        Self::expand_path(&self.vector_store.persist_dir)
    }

    /// Chunking parameters.
    pub fn chunking_config(&self) -> ChunkingConfig {
        ChunkingConfig::from(&self.chunking)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_partial_file_keeps_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[chunking]\nmax_words = 120\n\n[embedding]\nprovider = \"hash\"\n").unwrap();

        let settings = Settings::load_from(Some(&path)).unwrap();

        assert_eq!(settings.chunking.max_words, 120);
        assert_eq!(settings.chunking.overlap_words, 40);
        assert_eq!(settings.embedding.provider, "hash");
        assert_eq!(settings.query.top_k, 4);
        assert_eq!(settings.query.keyword_top_k, 3);
        assert_eq!(settings.general.log_level, "warn");
    }

    #[test]
    fn test_missing_file_is_default() {
        let dir = TempDir::new().unwrap();
        let settings = Settings::load_from(Some(&dir.path().join("absent.toml"))).unwrap();
        assert_eq!(settings.chunking_config(), ChunkingConfig::default());
    }

    #[test]
    fn test_save_and_reload() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let mut settings = Settings::default();
        settings.vector_store.persist_dir = "/tmp/vidrecall-test".to_string();
        settings.save_to(&path).unwrap();

        let loaded = Settings::load_from(Some(&path)).unwrap();
        assert_eq!(loaded.persist_dir(), PathBuf::from("/tmp/vidrecall-test"));
    }
}

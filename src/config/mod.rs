//! Configuration module for Vidrecall.
//!
//! Handles loading and managing application settings and prompt templates.

mod prompts;
mod settings;

pub use prompts::{Prompts, QaPrompts};
pub use settings::{
    ChunkingSettings, EmbeddingSettings, GeneralSettings, PromptSettings, QuerySettings,
    Settings, TranscriptSettings, VectorStoreSettings,
};

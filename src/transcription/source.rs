//! Discovery of persisted transcript files.
//!
//! Transcripts are stored as `<stem>.txt` files in a single directory; the
//! file stem is the collection name.

use crate::error::{Result, VidrecallError};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// File extension of persisted transcripts.
const TRANSCRIPT_EXTENSION: &str = "txt";

/// Reads `(name, text)` pairs from a transcripts directory.
pub struct DirectoryTranscriptSource {
    dir: PathBuf,
}

impl DirectoryTranscriptSource {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// The directory being scanned.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn is_transcript_file(path: &Path) -> bool {
        path.is_file()
            && path
                .extension()
                .and_then(|ext| ext.to_str())
                .map(|ext| ext.eq_ignore_ascii_case(TRANSCRIPT_EXTENSION))
                .unwrap_or(false)
    }

    /// List transcript files sorted by file name. A missing directory yields
    /// an empty list.
    pub fn discover(&self) -> Result<Vec<PathBuf>> {
        if !self.dir.exists() {
            debug!("Transcript directory {:?} does not exist", self.dir);
            return Ok(Vec::new());
        }

        let mut paths: Vec<PathBuf> = std::fs::read_dir(&self.dir)?
            .filter_map(|entry| entry.ok().map(|e| e.path()))
            .filter(|p| Self::is_transcript_file(p))
            .collect();
        paths.sort();

        info!("Found {} transcripts in {:?}", paths.len(), self.dir);
        Ok(paths)
    }

    /// Load every transcript as `(name, text)`.
    ///
    /// A file that cannot be read is returned with its error in place of
    /// the text, so one bad file does not hide the others.
    pub fn load_all(&self) -> Result<Vec<(String, Result<String>)>> {
        Ok(self
            .discover()?
            .into_iter()
            .map(|path| {
                let name = Self::stem(&path);
                let text = std::fs::read_to_string(&path).map_err(VidrecallError::from);
                if let Err(e) = &text {
                    warn!("Cannot read transcript {:?}: {}", path, e);
                }
                (name, text)
            })
            .collect())
    }

    /// Load a single transcript by name.
    pub fn load(&self, name: &str) -> Result<String> {
        let path = self.dir.join(format!("{}.{}", name, TRANSCRIPT_EXTENSION));
        if !path.is_file() {
            return Err(VidrecallError::TranscriptNotFound(format!(
                "{} (looked for {:?})",
                name, path
            )));
        }
        Ok(std::fs::read_to_string(path)?)
    }

    fn stem(path: &Path) -> String {
        path.file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string())
    }
}

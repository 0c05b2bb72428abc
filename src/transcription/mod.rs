//! Transcript types and transcript file discovery.
//!
//! Speech-to-text itself happens outside this crate; transcripts arrive here
//! as text files or as already-timed segments.

mod models;
mod source;

pub use models::{format_timestamp, Segment, Transcript};
pub use source::DirectoryTranscriptSource;

//! Core types for Storyline.
//!
//! Stories and their chapters are decoded from [`Record`]s. A record is a
//! typed, by-name view over either a database row or a JSON object, so the
//! same decoder handles a story row and the chapter objects aggregated into
//! one of its columns.
//!
//! # Example
//!
//! ```
//! use storyline_core::{JsonRecord, decode_story};
//! use serde_json::json;
//!
//! let row = JsonRecord::try_from(json!({
//!     "id": 1,
//!     "title": "T",
//!     "created_at": "2023-05-01T00:00:00Z",
//!     "chapters": [],
//! }))
//! .unwrap();
//!
//! let story = decode_story(&row).unwrap();
//! assert_eq!(story.title(), "T");
//! assert!(story.chapters().is_empty());
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod chapter;
mod decode;
mod json_record;
mod policy;
mod record;
mod repository;
mod story;

pub use chapter::{Chapter, EXCERPT_CHARS};
pub use decode::{decode_chapter, decode_story};
pub use json_record::JsonRecord;
pub use policy::{ChapterOrder, DecodePolicy, collect_stories};
pub use record::Record;
pub use repository::{InMemoryStoryRepository, StoryRepository, warn_on_orphans};
pub use story::Story;

use storyline_error::DecodeError;

/// Result type for decoding operations.
pub type DecodeResult<T> = Result<T, DecodeError>;

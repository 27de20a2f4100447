//! PostgreSQL integration for Storyline.
//!
//! Stories are read in one query: each row carries the story's own columns
//! plus a `json_agg` column holding its chapters. [`RowRecord`] exposes a
//! diesel row through the [`Record`](storyline_core::Record) trait, so the
//! same decoders handle the row and the JSON chapters inside it.
//!
//! # Example
//!
//! ```rust,no_run
//! use storyline_core::{DecodePolicy, StoryRepository};
//! use storyline_database::{DatabaseConfig, PgStoryRepository, build_pool};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let pool = build_pool(&DatabaseConfig::from_env()?)?;
//! let repo = PgStoryRepository::new(pool);
//!
//! for story in repo.list_stories(DecodePolicy::FailFast)? {
//!     println!("{story}");
//! }
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod connection;
mod queries;
mod row_record;
mod story_repository;
mod story_row;

pub use connection::{DatabaseConfig, PgPool, build_pool};
pub use queries::{FIND_STORY_SQL, LIST_STORIES_SQL};
pub use row_record::RowRecord;
pub use story_repository::PgStoryRepository;
pub use story_row::StoryRow;

use storyline_error::DatabaseError;

/// Result type for database operations.
pub type DatabaseResult<T> = Result<T, DatabaseError>;

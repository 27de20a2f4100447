//! Error types for Storyline.
//!
//! # Error Hierarchy
//!
//! All errors follow the `ErrorKind` + wrapper struct pattern:
//! - `*ErrorKind` enum defines specific error conditions
//! - `*Error` struct wraps the kind with source location tracking
//! - All errors use `#[track_caller]` for automatic location capture
//!
//! Decode failures and database failures are separate channels. Both fold
//! into [`StorylineError`] at the repository boundary.
//!
//! # Examples
//!
//! ```
//! use storyline_error::{DecodeError, DecodeErrorKind, StorylineResult};
//!
//! fn decode_title() -> StorylineResult<String> {
//!     Err(DecodeError::new(DecodeErrorKind::RequiredFieldMissing(
//!         "title".to_string(),
//!     )))?
//! }
//!
//! assert!(decode_title().is_err());
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod config;
mod database;
mod decode;
mod error;

pub use config::ConfigError;
pub use database::{DatabaseError, DatabaseErrorKind};
pub use decode::{DecodeError, DecodeErrorKind, FieldType};
pub use error::{StorylineError, StorylineErrorKind, StorylineResult};

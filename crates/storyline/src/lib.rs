//! Storyline - stories and chapters from one PostgreSQL query
//!
//! Each story row carries its chapters as a `json_agg` column. The row and
//! the chapter objects inside it decode through the same
//! [`Record`](storyline_core::Record) trait, so one set of decoders builds
//! the whole tree.
//!
//! # Architecture
//!
//! - `storyline_error` - Error types
//! - `storyline_core` - Entities, records, decoders, repository trait
//! - `storyline_database` - Diesel rows, connection pool, SQL
//!
//! This crate re-exports all of them and adds configuration, logging setup
//! and the console listing used by the `storyline` binary.

pub use storyline_core::*;
pub use storyline_database::*;
pub use storyline_error::*;

mod listing;
mod printer;
mod settings;
mod telemetry;

pub use listing::{ListingOptions, list_stories, show_story};
pub use printer::{OutputFormat, print_stories, print_story};
pub use settings::{ListingConfig, StorylineConfig};
pub use telemetry::init_tracing;

//! Listing commands shared by the binary and its tests.

use crate::{ListingConfig, OutputFormat, print_stories, print_story};
use std::error::Error;
use std::io::Write;
use storyline_core::{ChapterOrder, DecodePolicy, StoryRepository};
use tracing::{info, instrument};

/// Resolved options for one listing run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListingOptions {
    /// Chapter order to present
    pub order: ChapterOrder,
    /// What to do with rows that fail to decode
    pub policy: DecodePolicy,
    /// Characters of chapter text per line
    pub excerpt_chars: usize,
    /// Output format
    pub format: OutputFormat,
}

impl ListingOptions {
    /// Options taken from configuration, printed in `format`.
    pub fn from_config(config: &ListingConfig, format: OutputFormat) -> Self {
        Self {
            order: config.chapter_order,
            policy: config.decode_policy(),
            excerpt_chars: config.excerpt_chars,
            format,
        }
    }
}

/// Lists every story in `repo` to `out`.
///
/// # Errors
///
/// Returns the repository's error (database or decode) or a write error.
#[instrument(skip(repo, out))]
pub fn list_stories(
    repo: &impl StoryRepository,
    options: &ListingOptions,
    out: &mut impl Write,
) -> Result<(), Box<dyn Error>> {
    let stories: Vec<_> = repo
        .list_stories(options.policy)?
        .into_iter()
        .map(|story| options.order.apply(story))
        .collect();

    info!(count = stories.len(), "Printing stories");
    print_stories(out, &stories, options.format, options.excerpt_chars)?;
    Ok(())
}

/// Prints one story. Returns `false` when no story has that id.
///
/// # Errors
///
/// Returns the repository's error (database or decode) or a write error.
#[instrument(skip(repo, out))]
pub fn show_story(
    repo: &impl StoryRepository,
    id: i32,
    options: &ListingOptions,
    out: &mut impl Write,
) -> Result<bool, Box<dyn Error>> {
    let Some(story) = repo.find_story(id)? else {
        return Ok(false);
    };

    let story = options.order.apply(story);
    print_story(out, &story, options.format, options.excerpt_chars)?;
    Ok(true)
}

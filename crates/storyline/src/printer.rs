//! Console rendering of stories.

use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::io::{self, Write};
use storyline_core::Story;

/// Output format options
#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    /// `[year] title` headers with one line per chapter
    #[default]
    Human,
    /// Pretty-printed JSON
    Json,
}

/// Writes a listing of stories.
///
/// The human format prints each story as `[<year>] <title>` followed by
/// `- <chapter>` lines, with chapter text cut to `excerpt_chars`.
pub fn print_stories(
    out: &mut impl Write,
    stories: &[Story],
    format: OutputFormat,
    excerpt_chars: usize,
) -> io::Result<()> {
    match format {
        OutputFormat::Human => {
            for story in stories {
                write_story(out, story, excerpt_chars)?;
            }
        }
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut *out, stories)?;
            writeln!(out)?;
        }
    }
    Ok(())
}

/// Writes a single story.
pub fn print_story(
    out: &mut impl Write,
    story: &Story,
    format: OutputFormat,
    excerpt_chars: usize,
) -> io::Result<()> {
    match format {
        OutputFormat::Human => write_story(out, story, excerpt_chars),
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut *out, story)?;
            writeln!(out)
        }
    }
}

fn write_story(out: &mut impl Write, story: &Story, excerpt_chars: usize) -> io::Result<()> {
    writeln!(out, "{}", story)?;
    for chapter in story.chapters() {
        writeln!(out, "- {}", chapter.summary(excerpt_chars))?;
    }
    Ok(())
}

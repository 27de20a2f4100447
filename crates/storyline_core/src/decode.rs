//! Entity decoders.
//!
//! Both decoders are pure: the same record content always produces the same
//! entity or the same error, and the first failing field wins.

use crate::{Chapter, DecodeResult, Record, Story};
use storyline_error::DecodeError;
use tracing::{instrument, trace};

/// Builds a [`Chapter`] from a record.
///
/// Reads `id`, `story_id`, `title`, `text`, `position` and `created_at`.
/// Only `title` may be absent.
///
/// # Errors
///
/// `RequiredFieldMissing` for an absent required field, or whatever the
/// record reports for a value it cannot read.
pub fn decode_chapter<R: Record + ?Sized>(record: &R) -> DecodeResult<Chapter> {
    let id = required("id", record.int("id")?)?;
    let story_id = required("story_id", record.int("story_id")?)?;
    let title = record.string("title")?;
    let text = required("text", record.string("text")?)?;
    let position = required("position", record.int("position")?)?;
    let created_at = required("created_at", record.timestamp("created_at")?)?;

    Ok(Chapter {
        id,
        position,
        story_id,
        title,
        text,
        created_at,
    })
}

/// Builds a [`Story`] and its chapters from a record.
///
/// Reads `id`, `title`, `created_at` and the `chapters` record list, then
/// decodes every child with [`decode_chapter`]. An empty list is valid; an
/// absent one is not.
///
/// # Errors
///
/// The first failure from the story's own fields or from any chapter. No
/// partial story is returned.
#[instrument(level = "trace", skip_all)]
pub fn decode_story<R: Record + ?Sized>(record: &R) -> DecodeResult<Story> {
    let id = required("id", record.int("id")?)?;
    let title = required("title", record.string("title")?)?;
    let children = required("chapters", record.nested_records("chapters")?)?;
    let chapters = children
        .iter()
        .map(decode_chapter)
        .collect::<DecodeResult<Vec<_>>>()?;
    let created_at = required("created_at", record.timestamp("created_at")?)?;

    trace!(story_id = id, chapters = chapters.len(), "Decoded story");

    Ok(Story {
        id,
        title,
        chapters,
        created_at,
    })
}

#[track_caller]
fn required<T>(field: &str, value: Option<T>) -> DecodeResult<T> {
    match value {
        Some(value) => Ok(value),
        None => Err(DecodeError::missing(field)),
    }
}

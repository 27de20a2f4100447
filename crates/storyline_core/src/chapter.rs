//! Chapter entity.

use chrono::{DateTime, FixedOffset};
use serde::Serialize;
use std::borrow::Cow;
use std::fmt;

/// Number of characters of chapter text shown by [`Chapter`]'s `Display`.
pub const EXCERPT_CHARS: usize = 140;

/// One chapter of a [`Story`](crate::Story).
///
/// Only built by [`decode_chapter`](crate::decode_chapter). `story_id` refers
/// back to the owning story; it is not checked against it here.
///
/// `Display` renders the console form, `<title>: "<excerpt>"`, falling back
/// to `Chapter <position>` when the chapter has no title.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, derive_getters::Getters)]
pub struct Chapter {
    /// Stable identifier
    pub(crate) id: i32,
    /// Display order within the story; unique but not necessarily contiguous
    pub(crate) position: i32,
    /// Identifier of the owning story
    pub(crate) story_id: i32,
    /// Optional chapter title
    pub(crate) title: Option<String>,
    /// Chapter body
    pub(crate) text: String,
    /// Creation time with its original UTC offset
    pub(crate) created_at: DateTime<FixedOffset>,
}

impl Chapter {
    /// The title, or `Chapter <position>` when there is none.
    pub fn display_title(&self) -> Cow<'_, str> {
        match &self.title {
            Some(title) => Cow::Borrowed(title),
            None => Cow::Owned(format!("Chapter {}", self.position)),
        }
    }

    /// The first `max_chars` characters of the text.
    ///
    /// Counts `char`s, so multi-byte text is never split mid-character. No
    /// ellipsis is added.
    pub fn excerpt(&self, max_chars: usize) -> &str {
        match self.text.char_indices().nth(max_chars) {
            Some((end, _)) => &self.text[..end],
            None => &self.text,
        }
    }

    /// Console form with a custom excerpt length.
    pub fn summary(&self, max_chars: usize) -> String {
        format!("{}: \"{}\"", self.display_title(), self.excerpt(max_chars))
    }
}

impl fmt::Display for Chapter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: \"{}\"",
            self.display_title(),
            self.excerpt(EXCERPT_CHARS)
        )
    }
}

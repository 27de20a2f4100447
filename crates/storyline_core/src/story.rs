//! Story entity.

use crate::Chapter;
use chrono::{DateTime, Datelike, FixedOffset};
use serde::Serialize;
use std::fmt;

/// A story and the chapters aggregated into its row.
///
/// Only built by [`decode_story`](crate::decode_story). Chapters keep the
/// order the aggregate produced; use [`Story::sorted_by_position`] when
/// `position` order matters.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, derive_getters::Getters)]
pub struct Story {
    /// Stable identifier
    pub(crate) id: i32,
    /// Story title
    pub(crate) title: String,
    /// Owned chapters, in aggregate order
    pub(crate) chapters: Vec<Chapter>,
    /// Creation time with its original UTC offset
    pub(crate) created_at: DateTime<FixedOffset>,
}

impl Story {
    /// The same story with chapters ordered by `position`.
    pub fn sorted_by_position(mut self) -> Self {
        self.chapters.sort_by_key(|chapter| chapter.position);
        self
    }

    /// Chapters whose `story_id` does not point back at this story.
    pub fn orphaned_chapters(&self) -> impl Iterator<Item = &Chapter> {
        self.chapters
            .iter()
            .filter(move |chapter| chapter.story_id != self.id)
    }
}

/// Renders `[<year>] <title>`.
impl fmt::Display for Story {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.created_at.year(), self.title)
    }
}

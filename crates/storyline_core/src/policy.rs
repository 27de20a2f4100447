//! What to do with rows that fail to decode, and how to order chapters.

use crate::{DecodeResult, Story};
use serde::{Deserialize, Serialize};
use tracing::warn;

/// Handling of rows that fail to decode during a listing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DecodePolicy {
    /// Abort the whole listing on the first failure.
    #[default]
    FailFast,
    /// Log the failure and leave the row out.
    SkipInvalid,
}

/// Chapter order presented to callers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChapterOrder {
    /// Keep the order of the JSON aggregate.
    #[default]
    Aggregate,
    /// Sort by `position` after decoding.
    Position,
}

impl ChapterOrder {
    /// Applies this order to a decoded story.
    pub fn apply(self, story: Story) -> Story {
        match self {
            Self::Aggregate => story,
            Self::Position => story.sorted_by_position(),
        }
    }
}

/// Gathers per-row decode results into a listing according to `policy`.
///
/// # Errors
///
/// Under [`DecodePolicy::FailFast`], the first failed row's error.
pub fn collect_stories<I>(results: I, policy: DecodePolicy) -> DecodeResult<Vec<Story>>
where
    I: IntoIterator<Item = DecodeResult<Story>>,
{
    match policy {
        DecodePolicy::FailFast => results.into_iter().collect(),
        DecodePolicy::SkipInvalid => Ok(results
            .into_iter()
            .filter_map(|result| match result {
                Ok(story) => Some(story),
                Err(e) => {
                    warn!(error = %e, field = e.kind.field(), "Skipping story that failed to decode");
                    None
                }
            })
            .collect()),
    }
}

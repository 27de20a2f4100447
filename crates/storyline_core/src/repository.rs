//! Story repository trait and an in-memory implementation.

use crate::{DecodePolicy, JsonRecord, Record, Story, collect_stories, decode_story};
use storyline_error::StorylineResult;
use tracing::{debug, instrument, warn};

/// Read access to stories.
///
/// Database failures and decode failures both surface as
/// [`StorylineError`](storyline_error::StorylineError), each under its own
/// kind.
pub trait StoryRepository {
    /// Lists every story with its chapters.
    fn list_stories(&self, policy: DecodePolicy) -> StorylineResult<Vec<Story>>;

    /// Loads one story by id.
    fn find_story(&self, id: i32) -> StorylineResult<Option<Story>>;
}

/// Repository over story rows already held as JSON objects.
///
/// Each row has the same shape the listing query produces, with `chapters`
/// as a JSON array. Useful for tests and for fixtures loaded from disk.
#[derive(Debug, Clone, Default)]
pub struct InMemoryStoryRepository {
    rows: Vec<JsonRecord>,
}

impl InMemoryStoryRepository {
    /// Creates a repository over the given rows.
    pub fn new(rows: Vec<JsonRecord>) -> Self {
        Self { rows }
    }

    /// Parses a JSON array of story rows.
    ///
    /// Elements that are not objects are ignored, as with aggregated
    /// chapters.
    pub fn from_json_array(bytes: &[u8]) -> StorylineResult<Self> {
        Ok(Self::new(JsonRecord::parse_array("stories", bytes)?))
    }

    /// Number of stored rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether no rows are stored.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

impl StoryRepository for InMemoryStoryRepository {
    #[instrument(skip(self), fields(rows = self.rows.len()))]
    fn list_stories(&self, policy: DecodePolicy) -> StorylineResult<Vec<Story>> {
        let stories = collect_stories(self.rows.iter().map(decode_story), policy)?;
        warn_on_orphans(&stories);
        debug!(count = stories.len(), "Listed stories");
        Ok(stories)
    }

    #[instrument(skip(self))]
    fn find_story(&self, id: i32) -> StorylineResult<Option<Story>> {
        for row in &self.rows {
            if row.int("id")? == Some(id) {
                let story = decode_story(row)?;
                warn_on_orphans(std::slice::from_ref(&story));
                return Ok(Some(story));
            }
        }
        Ok(None)
    }
}

/// Logs chapters that claim a different parent than the story holding them.
pub fn warn_on_orphans(stories: &[Story]) {
    for story in stories {
        for chapter in story.orphaned_chapters() {
            warn!(
                story_id = story.id,
                chapter_id = chapter.id,
                chapter_story_id = chapter.story_id,
                "Chapter references a different story than the one containing it"
            );
        }
    }
}

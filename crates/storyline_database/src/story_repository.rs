//! PostgreSQL implementation of StoryRepository.

use crate::{FIND_STORY_SQL, LIST_STORIES_SQL, PgPool, StoryRow};
use diesel::prelude::*;
use diesel::sql_types::Integer;
use storyline_core::{DecodePolicy, Story, StoryRepository, collect_stories, warn_on_orphans};
use storyline_error::{DatabaseError, StorylineResult};
use tracing::{debug, instrument};

/// Reads stories through an injected connection pool.
///
/// Each call checks out one connection for the duration of its query. The
/// connection goes back to the pool when the call returns, whether it
/// succeeded or not.
///
/// # Example
/// ```no_run
/// use storyline_core::{DecodePolicy, StoryRepository};
/// use storyline_database::{DatabaseConfig, PgStoryRepository, build_pool};
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let pool = build_pool(&DatabaseConfig::from_env()?)?;
/// let repo = PgStoryRepository::new(pool.clone());
/// let story = repo.find_story(1)?;
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct PgStoryRepository {
    pool: PgPool,
}

impl PgStoryRepository {
    /// Create a repository over `pool`.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

impl StoryRepository for PgStoryRepository {
    #[instrument(skip(self))]
    fn list_stories(&self, policy: DecodePolicy) -> StorylineResult<Vec<Story>> {
        let mut conn = self.pool.get().map_err(DatabaseError::from)?;

        let rows: Vec<StoryRow> = diesel::sql_query(LIST_STORIES_SQL)
            .load(&mut conn)
            .map_err(DatabaseError::from)?;
        debug!(rows = rows.len(), "Loaded story rows");

        let stories = collect_stories(rows.into_iter().map(StoryRow::into_result), policy)?;
        warn_on_orphans(&stories);

        debug!(count = stories.len(), "Listed stories");
        Ok(stories)
    }

    #[instrument(skip(self))]
    fn find_story(&self, id: i32) -> StorylineResult<Option<Story>> {
        let mut conn = self.pool.get().map_err(DatabaseError::from)?;

        let row: Option<StoryRow> = diesel::sql_query(FIND_STORY_SQL)
            .bind::<Integer, _>(id)
            .get_result(&mut conn)
            .optional()
            .map_err(DatabaseError::from)?;

        match row {
            Some(row) => {
                let story = row.into_result()?;
                warn_on_orphans(std::slice::from_ref(&story));
                Ok(Some(story))
            }
            None => {
                debug!("Story not found");
                Ok(None)
            }
        }
    }
}

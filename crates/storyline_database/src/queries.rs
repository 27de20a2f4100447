//! SQL for reading stories with their chapters aggregated in-row.
//!
//! Every query returns the columns `id`, `title`, `created_at` and
//! `chapters`, where `chapters` is a `json` array of full chapter rows.
//! Stories without chapters get `[]` rather than NULL.

/// Lists all stories, ordered by id.
pub const LIST_STORIES_SQL: &str = r#"
SELECT
    s.id,
    s.title,
    s.created_at,
    COALESCE(
        ( SELECT json_agg(c ORDER BY c.position)
          FROM chapters c
          WHERE c.story_id = s.id ),
        '[]'::json
    ) AS chapters
FROM stories s
ORDER BY s.id
"#;

/// Loads one story; binds the story id as `$1`.
pub const FIND_STORY_SQL: &str = r#"
SELECT
    s.id,
    s.title,
    s.created_at,
    COALESCE(
        ( SELECT json_agg(c ORDER BY c.position)
          FROM chapters c
          WHERE c.story_id = s.id ),
        '[]'::json
    ) AS chapters
FROM stories s
WHERE s.id = $1
"#;

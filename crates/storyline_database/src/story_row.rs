//! Diesel row type for the story listing queries.

use crate::RowRecord;
use diesel::deserialize::{self, QueryableByName};
use diesel::pg::Pg;
use diesel::row::NamedRow;
use storyline_core::{DecodeResult, Story, decode_story};

/// One result row of the story queries, already decoded.
///
/// Decoding never fails the diesel load itself; the outcome is carried
/// here so decode failures stay separate from query failures.
#[derive(Debug)]
pub struct StoryRow(DecodeResult<Story>);

impl StoryRow {
    /// The decoded story or the decode failure for this row.
    pub fn into_result(self) -> DecodeResult<Story> {
        self.0
    }
}

impl QueryableByName<Pg> for StoryRow {
    fn build<'a>(row: &impl NamedRow<'a, Pg>) -> deserialize::Result<Self> {
        Ok(Self(decode_story(&RowRecord::new(row))))
    }
}

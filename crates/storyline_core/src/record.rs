//! The typed field accessor shared by every record source.

use crate::{DecodeResult, JsonRecord};
use chrono::{DateTime, FixedOffset};

/// Typed, by-name read access to one record.
///
/// Implemented by [`JsonRecord`] here and by the row-backed record in
/// `storyline_database`. Decoders take `&impl Record` and never look at
/// where the values come from.
///
/// Every method returns `Ok(None)` when the field is null or missing. An
/// error means the value exists but cannot be read as the requested type.
pub trait Record {
    /// Text value of `key`.
    fn string(&self, key: &str) -> DecodeResult<Option<String>>;

    /// 32-bit integer value of `key`.
    fn int(&self, key: &str) -> DecodeResult<Option<i32>>;

    /// Timestamp with UTC offset stored under `key`.
    fn timestamp(&self, key: &str) -> DecodeResult<Option<DateTime<FixedOffset>>>;

    /// Child records held in a JSON array under `key`.
    ///
    /// Array elements that are not JSON objects are dropped. The children
    /// are always JSON-backed, whatever the parent's source.
    fn nested_records(&self, key: &str) -> DecodeResult<Option<Vec<JsonRecord>>>;
}

impl<R: Record + ?Sized> Record for &R {
    fn string(&self, key: &str) -> DecodeResult<Option<String>> {
        (**self).string(key)
    }

    fn int(&self, key: &str) -> DecodeResult<Option<i32>> {
        (**self).int(key)
    }

    fn timestamp(&self, key: &str) -> DecodeResult<Option<DateTime<FixedOffset>>> {
        (**self).timestamp(key)
    }

    fn nested_records(&self, key: &str) -> DecodeResult<Option<Vec<JsonRecord>>> {
        (**self).nested_records(key)
    }
}

//! Record backed by a native PostgreSQL result row.

use chrono::{DateTime, FixedOffset, Utc};
use diesel::deserialize::FromSql;
use diesel::pg::{Pg, PgValue};
use diesel::row::{Field, NamedRow, Row};
use diesel::sql_types::{Integer, Text, Timestamptz};
use storyline_core::{DecodeResult, JsonRecord, Record};
use storyline_error::{DecodeError, FieldType};
use tracing::debug;

// PostgreSQL type OIDs, from `pg_type`.
const INT4_OID: u32 = 23;
const TEXT_OID: u32 = 25;
const NAME_OID: u32 = 19;
const BPCHAR_OID: u32 = 1042;
const VARCHAR_OID: u32 = 1043;
const TIMESTAMPTZ_OID: u32 = 1184;
const JSON_OID: u32 = 114;
const JSONB_OID: u32 = 3802;

const STRING_OIDS: &[u32] = &[TEXT_OID, VARCHAR_OID, BPCHAR_OID, NAME_OID];
const INT_OIDS: &[u32] = &[INT4_OID];
const TIMESTAMP_OIDS: &[u32] = &[TIMESTAMPTZ_OID];
const RECORD_LIST_OIDS: &[u32] = &[JSON_OID, JSONB_OID, TEXT_OID, VARCHAR_OID];

/// Leading version byte of the `jsonb` binary wire format.
const JSONB_VERSION: u8 = 1;

/// A [`Record`] over one diesel result row.
///
/// Scalars are read with their native PostgreSQL types (`text`, `int4`,
/// `timestamptz`). A nested record list is read as the raw bytes of a
/// `json` (or `jsonb`) column and converted into [`JsonRecord`]s, so
/// children always decode through the JSON-backed record.
///
/// The column's type OID is checked before any bytes are decoded, so a
/// column of another type is a `TypeMismatch` rather than a
/// reinterpretation. A column that is missing from the row reads as absent.
pub struct RowRecord<'r, R> {
    row: &'r R,
}

impl<'r, R> RowRecord<'r, R> {
    /// Wraps a row handed out by diesel.
    pub fn new(row: &'r R) -> Self {
        Self { row }
    }
}

impl<'a, 'r, R> Record for RowRecord<'r, R>
where
    R: NamedRow<'a, Pg>,
{
    fn string(&self, key: &str) -> DecodeResult<Option<String>> {
        read_column(self.row, key, FieldType::String, STRING_OIDS, |value| {
            from_native::<Text, String>(key, FieldType::String, value)
        })
    }

    fn int(&self, key: &str) -> DecodeResult<Option<i32>> {
        read_column(self.row, key, FieldType::Int, INT_OIDS, |value| {
            from_native::<Integer, i32>(key, FieldType::Int, value)
        })
    }

    fn timestamp(&self, key: &str) -> DecodeResult<Option<DateTime<FixedOffset>>> {
        let value = read_column(self.row, key, FieldType::Timestamp, TIMESTAMP_OIDS, |value| {
            from_native::<Timestamptz, DateTime<Utc>>(key, FieldType::Timestamp, value)
        })?;
        Ok(value.map(|ts| ts.fixed_offset()))
    }

    fn nested_records(&self, key: &str) -> DecodeResult<Option<Vec<JsonRecord>>> {
        read_column(self.row, key, FieldType::RecordList, RECORD_LIST_OIDS, |value| {
            let bytes = value.as_bytes();
            let json = match (value.get_oid().get(), bytes.split_first()) {
                (JSONB_OID, Some((&JSONB_VERSION, rest))) => rest,
                _ => bytes,
            };
            JsonRecord::parse_array(key, json)
        })
    }
}

/// Reads a nullable column whose type OID is one of `accepted`.
///
/// A column missing from the row and a SQL `NULL` both read as `None`.
fn read_column<'a, R, T>(
    row: &R,
    key: &str,
    expected: FieldType,
    accepted: &[u32],
    decode: impl FnOnce(PgValue<'_>) -> DecodeResult<T>,
) -> DecodeResult<Option<T>>
where
    R: NamedRow<'a, Pg>,
{
    let Some(field) = <R as Row<'a, Pg>>::get(row, key) else {
        return Ok(None);
    };
    let Some(value) = field.value() else {
        return Ok(None);
    };

    let oid = value.get_oid().get();
    if !accepted.contains(&oid) {
        debug!(field = key, %expected, oid, "Column has an unexpected PostgreSQL type");
        return Err(DecodeError::type_mismatch(key, expected));
    }

    decode(value).map(Some)
}

/// Decodes a value whose OID already matched, through diesel's `FromSql`.
fn from_native<ST, T>(key: &str, expected: FieldType, value: PgValue<'_>) -> DecodeResult<T>
where
    T: FromSql<ST, Pg>,
{
    T::from_sql(value).map_err(|e| {
        debug!(field = key, %expected, error = %e, "Column rejected by native decoder");
        DecodeError::type_mismatch(key, expected)
    })
}

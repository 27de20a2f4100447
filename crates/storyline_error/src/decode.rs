//! Decode error types.
//!
//! Raised while turning a record (a result row or a JSON object) into a
//! domain entity. Absent values are never errors; they surface as
//! [`DecodeErrorKind::RequiredFieldMissing`] only when a decoder needs them.

/// The typed view a decoder asked a record for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, derive_more::Display)]
pub enum FieldType {
    /// Text value
    #[display("string")]
    String,
    /// 32-bit integer value
    #[display("int")]
    Int,
    /// Timestamp with a UTC offset
    #[display("timestamp")]
    Timestamp,
    /// Array of nested records
    #[display("record list")]
    RecordList,
}

/// Decode error conditions.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, derive_more::Display)]
pub enum DecodeErrorKind {
    /// A required field was null or absent
    #[display("Required field '{}' is missing", _0)]
    RequiredFieldMissing(String),
    /// The stored value could not be coerced to the requested type
    #[display("Field '{field}' is not a valid {expected}")]
    TypeMismatch {
        /// Field name
        field: String,
        /// Type the caller asked for
        expected: FieldType,
    },
    /// The value had the right type but the wrong format
    #[display("Field '{field}' could not be parsed: {reason}")]
    ParseFailure {
        /// Field name
        field: String,
        /// Parser message
        reason: String,
    },
    /// Raw bytes for a nested record list were not JSON at all
    #[display("Field '{field}' does not hold valid JSON: {reason}")]
    MalformedSource {
        /// Field name
        field: String,
        /// Parser message
        reason: String,
    },
}

impl DecodeErrorKind {
    /// Name of the field that failed to decode.
    pub fn field(&self) -> &str {
        match self {
            Self::RequiredFieldMissing(field) => field,
            Self::TypeMismatch { field, .. }
            | Self::ParseFailure { field, .. }
            | Self::MalformedSource { field, .. } => field,
        }
    }
}

/// Decode error with source location tracking.
///
/// # Examples
///
/// ```
/// use storyline_error::{DecodeError, DecodeErrorKind, FieldType};
///
/// let err = DecodeError::new(DecodeErrorKind::TypeMismatch {
///     field: "position".to_string(),
///     expected: FieldType::Int,
/// });
/// assert_eq!(err.kind.field(), "position");
/// assert!(format!("{}", err).contains("not a valid int"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Decode Error: {} at line {} in {}", kind, line, file)]
pub struct DecodeError {
    /// The kind of error that occurred
    pub kind: DecodeErrorKind,
    /// Line number where error was created
    pub line: u32,
    /// File where error was created
    pub file: &'static str,
}

impl DecodeError {
    /// Create a new DecodeError with automatic location tracking.
    #[track_caller]
    pub fn new(kind: DecodeErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }

    /// Shorthand for [`DecodeErrorKind::RequiredFieldMissing`].
    #[track_caller]
    pub fn missing(field: impl Into<String>) -> Self {
        Self::new(DecodeErrorKind::RequiredFieldMissing(field.into()))
    }

    /// Shorthand for [`DecodeErrorKind::TypeMismatch`].
    #[track_caller]
    pub fn type_mismatch(field: impl Into<String>, expected: FieldType) -> Self {
        Self::new(DecodeErrorKind::TypeMismatch {
            field: field.into(),
            expected,
        })
    }

    /// Shorthand for [`DecodeErrorKind::ParseFailure`].
    #[track_caller]
    pub fn parse_failure(field: impl Into<String>, reason: impl ToString) -> Self {
        Self::new(DecodeErrorKind::ParseFailure {
            field: field.into(),
            reason: reason.to_string(),
        })
    }

    /// Shorthand for [`DecodeErrorKind::MalformedSource`].
    #[track_caller]
    pub fn malformed(field: impl Into<String>, reason: impl ToString) -> Self {
        Self::new(DecodeErrorKind::MalformedSource {
            field: field.into(),
            reason: reason.to_string(),
        })
    }
}

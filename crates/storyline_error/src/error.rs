//! Top-level error wrapper types.

use crate::{ConfigError, DatabaseError, DecodeError};

/// Every failure a Storyline operation can surface.
///
/// # Examples
///
/// ```
/// use storyline_error::{ConfigError, StorylineError};
///
/// let err: StorylineError = ConfigError::new("bad pool size").into();
/// assert!(format!("{}", err).contains("Configuration Error"));
/// ```
#[derive(Debug, derive_more::From, derive_more::Display, derive_more::Error)]
pub enum StorylineErrorKind {
    /// Entity decoding error
    #[from(DecodeError)]
    Decode(DecodeError),
    /// Connection, pool or query error
    #[from(DatabaseError)]
    Database(DatabaseError),
    /// Configuration error
    #[from(ConfigError)]
    Config(ConfigError),
}

/// Storyline error with kind discrimination.
#[derive(Debug, derive_more::Display, derive_more::Error)]
#[display("Storyline Error: {}", _0)]
pub struct StorylineError(Box<StorylineErrorKind>);

impl StorylineError {
    /// Create a new error from a kind.
    pub fn new(kind: StorylineErrorKind) -> Self {
        Self(Box::new(kind))
    }

    /// Get the error kind.
    pub fn kind(&self) -> &StorylineErrorKind {
        &self.0
    }

    /// The decode failure, when this error came from entity decoding.
    pub fn as_decode(&self) -> Option<&DecodeError> {
        match self.kind() {
            StorylineErrorKind::Decode(err) => Some(err),
            _ => None,
        }
    }
}

impl<T> From<T> for StorylineError
where
    T: Into<StorylineErrorKind>,
{
    fn from(err: T) -> Self {
        Self::new(err.into())
    }
}

/// Result type for Storyline operations.
pub type StorylineResult<T> = std::result::Result<T, StorylineError>;

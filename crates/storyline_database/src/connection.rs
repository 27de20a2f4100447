//! Connection pool construction.

use crate::DatabaseResult;
use diesel::pg::PgConnection;
use diesel::r2d2::{ConnectionManager, Pool};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use storyline_error::{DatabaseError, DatabaseErrorKind};
use tracing::{info, instrument};

/// Pool of PostgreSQL connections.
///
/// Cloning shares the same pool. A checked-out connection returns to the
/// pool when it is dropped.
pub type PgPool = Pool<ConnectionManager<PgConnection>>;

/// Connection settings for the story database.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// PostgreSQL connection URL
    #[serde(default)]
    pub url: String,

    /// Upper bound on pooled connections
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,

    /// Seconds to wait for a connection before giving up
    #[serde(default = "default_connection_timeout_secs")]
    pub connection_timeout_secs: u64,
}

fn default_max_connections() -> u32 {
    4
}

fn default_connection_timeout_secs() -> u64 {
    5
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: String::new(),
            max_connections: default_max_connections(),
            connection_timeout_secs: default_connection_timeout_secs(),
        }
    }
}

impl DatabaseConfig {
    /// Default settings pointing at `DATABASE_URL`.
    ///
    /// # Errors
    ///
    /// Returns an error if `DATABASE_URL` is not set.
    pub fn from_env() -> DatabaseResult<Self> {
        let url = std::env::var("DATABASE_URL").map_err(|_| {
            DatabaseError::new(DatabaseErrorKind::Connection(
                "DATABASE_URL environment variable not set".to_string(),
            ))
        })?;

        Ok(Self {
            url,
            ..Self::default()
        })
    }
}

/// Builds a connection pool from `config`.
///
/// The pool is the only handle to the database; pass it to whatever needs
/// to query.
///
/// # Errors
///
/// Returns a connection error if the pool cannot open its initial
/// connections within the configured timeout.
#[instrument(skip_all, fields(max_connections = config.max_connections))]
pub fn build_pool(config: &DatabaseConfig) -> DatabaseResult<PgPool> {
    let manager = ConnectionManager::<PgConnection>::new(config.url.as_str());

    let pool = Pool::builder()
        .max_size(config.max_connections)
        .connection_timeout(Duration::from_secs(config.connection_timeout_secs))
        .build(manager)
        .map_err(|e| DatabaseError::new(DatabaseErrorKind::Connection(e.to_string())))?;

    info!("Connection pool ready");
    Ok(pool)
}

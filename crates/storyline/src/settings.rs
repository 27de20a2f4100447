//! Layered TOML/environment configuration.
//!
//! Sources, later ones overriding earlier ones:
//! 1. Bundled defaults (`storyline.toml` shipped with the binary)
//! 2. `~/.config/storyline/storyline.toml`
//! 3. `./storyline.toml`
//! 4. An explicit file passed on the command line
//! 5. `STORYLINE__<SECTION>__<KEY>` environment variables
//! 6. `DATABASE_URL`, for `database.url`

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, Environment, File, FileFormat};
use serde::{Deserialize, Serialize};
use std::path::Path;
use storyline_core::{ChapterOrder, DecodePolicy, EXCERPT_CHARS};
use storyline_database::DatabaseConfig;
use storyline_error::{ConfigError, StorylineResult};
use tracing::{debug, instrument};

const DEFAULT_CONFIG: &str = include_str!("../storyline.toml");

/// How listings are decoded and shown.
///
/// ```toml
/// [listing]
/// chapter_order = "position"
/// skip_invalid = true
/// excerpt_chars = 80
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ListingConfig {
    /// Order chapters are shown in
    #[serde(default)]
    pub chapter_order: ChapterOrder,

    /// Leave out stories that fail to decode instead of aborting
    #[serde(default)]
    pub skip_invalid: bool,

    /// Characters of chapter text shown per chapter
    #[serde(default = "default_excerpt_chars")]
    pub excerpt_chars: usize,
}

fn default_excerpt_chars() -> usize {
    EXCERPT_CHARS
}

impl Default for ListingConfig {
    fn default() -> Self {
        Self {
            chapter_order: ChapterOrder::default(),
            skip_invalid: false,
            excerpt_chars: default_excerpt_chars(),
        }
    }
}

impl ListingConfig {
    /// Decode policy implied by `skip_invalid`.
    pub fn decode_policy(&self) -> DecodePolicy {
        if self.skip_invalid {
            DecodePolicy::SkipInvalid
        } else {
            DecodePolicy::FailFast
        }
    }
}

/// Top-level Storyline configuration.
///
/// # Example
///
/// ```no_run
/// use storyline::StorylineConfig;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let config = StorylineConfig::load(None)?;
/// println!("Pool size: {}", config.database.max_connections);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, Default)]
pub struct StorylineConfig {
    /// Database connection settings
    #[serde(default)]
    pub database: DatabaseConfig,

    /// Listing behaviour
    #[serde(default)]
    pub listing: ListingConfig,
}

impl StorylineConfig {
    /// Load configuration from every source, in precedence order.
    ///
    /// User config files are optional and skipped if not found; `explicit`
    /// must exist when given.
    ///
    /// # Errors
    ///
    /// Returns an error if a source cannot be read or parsed, or if the
    /// result fails [`validate`](Self::validate).
    #[instrument(skip_all, fields(explicit = ?explicit))]
    pub fn load(explicit: Option<&Path>) -> StorylineResult<Self> {
        debug!("Loading configuration");

        let mut builder = Self::defaults();

        if let Some(home) = dirs::home_dir() {
            let home_config = home.join(".config/storyline/storyline.toml");
            builder = builder.add_source(File::from(home_config).required(false));
        }

        builder = builder.add_source(File::with_name("storyline").required(false));

        if let Some(path) = explicit {
            builder = builder.add_source(File::from(path));
        }

        builder = builder
            .add_source(
                Environment::with_prefix("STORYLINE")
                    .separator("__")
                    .try_parsing(true),
            )
            .set_override_option("database.url", std::env::var("DATABASE_URL").ok())
            .map_err(|e| ConfigError::new(format!("Failed to apply DATABASE_URL: {}", e)))?;

        Self::finish(builder)
    }

    /// Load configuration from TOML text layered over the bundled defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the text cannot be parsed or fails validation.
    pub fn from_toml_str(toml: &str) -> StorylineResult<Self> {
        Self::finish(Self::defaults().add_source(File::from_str(toml, FileFormat::Toml)))
    }

    /// Checks values the pool and printer cannot work with.
    ///
    /// # Errors
    ///
    /// Returns an error for an empty database URL or a zero pool size.
    pub fn validate(&self) -> StorylineResult<()> {
        if self.database.url.trim().is_empty() {
            return Err(ConfigError::new(
                "database.url is empty; set DATABASE_URL or [database] url",
            )
            .into());
        }
        if self.database.max_connections == 0 {
            return Err(ConfigError::new("database.max_connections must be at least 1").into());
        }
        Ok(())
    }

    fn defaults() -> ConfigBuilder<DefaultState> {
        Config::builder().add_source(File::from_str(DEFAULT_CONFIG, FileFormat::Toml))
    }

    fn finish(builder: ConfigBuilder<DefaultState>) -> StorylineResult<Self> {
        let config: Self = builder
            .build()
            .map_err(|e| ConfigError::new(format!("Failed to build configuration: {}", e)))?
            .try_deserialize()
            .map_err(|e| ConfigError::new(format!("Failed to parse configuration: {}", e)))?;

        config.validate()?;
        Ok(config)
    }
}

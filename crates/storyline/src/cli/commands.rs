//! CLI command definitions.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use storyline::{ChapterOrder, ListingConfig, ListingOptions, OutputFormat};

/// Storyline - list stories and their chapters from PostgreSQL
#[derive(Parser, Debug)]
#[command(name = "storyline")]
#[command(about = "List stories and their chapters from PostgreSQL", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Command to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Configuration file layered over the default locations
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List every story with its chapters
    List {
        #[command(flatten)]
        display: DisplayArgs,

        /// Leave out stories that fail to decode
        #[arg(long)]
        skip_invalid: bool,
    },

    /// Show a single story
    Show {
        /// Story id
        id: i32,

        #[command(flatten)]
        display: DisplayArgs,
    },
}

/// Presentation flags shared by the commands
#[derive(Args, Debug)]
pub struct DisplayArgs {
    /// Output format
    #[arg(long, value_enum, default_value = "human")]
    pub format: OutputFormat,

    /// Sort chapters by position instead of aggregate order
    #[arg(long)]
    pub by_position: bool,

    /// Characters of chapter text to show
    #[arg(long)]
    pub excerpt: Option<usize>,
}

impl DisplayArgs {
    /// Command-line flags layered over the configured listing options.
    pub fn resolve(&self, config: &ListingConfig) -> ListingOptions {
        let mut options = ListingOptions::from_config(config, self.format);
        if self.by_position {
            options.order = ChapterOrder::Position;
        }
        if let Some(excerpt) = self.excerpt {
            options.excerpt_chars = excerpt;
        }
        options
    }
}

//! Storyline CLI binary.
//!
//! Reads stories with their aggregated chapters and prints them:
//! - `list` prints every story
//! - `show <id>` prints one

use clap::Parser;
use storyline::{
    DecodePolicy, PgStoryRepository, StorylineConfig, build_pool, init_tracing, list_stories,
    show_story,
};

mod cli;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    use cli::{Cli, Commands};

    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = StorylineConfig::load(cli.config.as_deref())?;
    let pool = build_pool(&config.database)?;
    let repo = PgStoryRepository::new(pool);

    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    match cli.command {
        Commands::List {
            display,
            skip_invalid,
        } => {
            let mut options = display.resolve(&config.listing);
            if skip_invalid {
                options.policy = DecodePolicy::SkipInvalid;
            }
            list_stories(&repo, &options, &mut out)?;
        }

        Commands::Show { id, display } => {
            let options = display.resolve(&config.listing);
            if !show_story(&repo, id, &options, &mut out)? {
                eprintln!("Story {} not found", id);
                std::process::exit(1);
            }
        }
    }

    Ok(())
}

//! Tracing subscriber setup for the binary.

use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Installs a console subscriber writing to stderr.
///
/// `RUST_LOG` wins when set; otherwise Storyline crates log at `info`, or
/// `debug` when `verbose` is on, and everything else at `warn`.
pub fn init_tracing(verbose: bool) {
    let default = if verbose {
        "warn,storyline=debug"
    } else {
        "warn,storyline=info"
    };

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();
}

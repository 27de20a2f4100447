//! Command-line interface module.

mod commands;

pub use commands::{Cli, Commands, DisplayArgs};

//! Drivertrace CLI library
//!
//! Command-line front end over the `drivertrace` core: list the command
//! taxonomy, canonicalize engine locator text and parse canonical locators.

#![warn(missing_docs)]

mod commands;
mod config;
mod error;
/// Subcommand handlers
pub mod handlers;
mod output;

pub use commands::{
    Cli, ColorArg, Commands, CommandsArgs, FormatArg, FormatDurationArgs, LocatorArgs, ParseArgs,
};
pub use config::{CliConfig, ColorChoice, OutputFormat, Verbosity};
pub use error::{CliError, CliResult};
pub use output::{CommandRow, DurationRow, LocatorRow, ParsedRow};

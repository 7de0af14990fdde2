//! Subcommand handlers. Each returns the text to print on stdout.

use drivertrace::locator::{from_by_string, from_element_string};
use drivertrace::{format_duration, By, Command};
use std::time::Duration;
use tracing::{debug, info};

use crate::commands::{CommandsArgs, FormatDurationArgs, LocatorArgs, ParseArgs};
use crate::config::CliConfig;
use crate::error::{CliError, CliResult};
use crate::output::{
    render_commands, render_duration, render_locators, render_parsed, CommandRow, DurationRow,
    LocatorRow, ParsedRow,
};

/// `drivertrace commands`
pub fn run_commands(config: &CliConfig, args: &CommandsArgs) -> CliResult<String> {
    if args.subject.as_deref().is_some_and(|s| s.trim().is_empty()) {
        return Err(CliError::invalid_argument("--subject must not be blank"));
    }
    let rows: Vec<CommandRow> = Command::ALL
        .iter()
        .copied()
        .filter(|cmd| args.group.map_or(true, |group| cmd.group() == group))
        .map(|cmd| CommandRow::new(cmd, args.subject.as_deref()))
        .collect();
    info!(count = rows.len(), "listing commands");
    render_commands(&rows, config.format)
}

/// Canonicalize one input, choosing the codec path by its shape
#[must_use]
pub fn canonicalize(input: &str) -> String {
    if input.starts_with("By.") {
        debug!(input, "locator text");
        from_by_string(input)
    } else {
        debug!(input, "element text");
        from_element_string(input)
    }
}

/// `drivertrace locator`
pub fn run_locator(config: &CliConfig, args: &LocatorArgs) -> CliResult<String> {
    let rows: Vec<LocatorRow> = args
        .inputs
        .iter()
        .map(|input| LocatorRow {
            input: input.clone(),
            canonical: canonicalize(input),
        })
        .collect();
    render_locators(&rows, config.format)
}

/// `drivertrace parse`
pub fn run_parse(config: &CliConfig, args: &ParseArgs) -> CliResult<String> {
    let by = By::parse(&args.input)?;
    render_parsed(&ParsedRow::from(&by), config.format)
}

/// `drivertrace format-duration`
pub fn run_format_duration(config: &CliConfig, args: &FormatDurationArgs) -> CliResult<String> {
    let row = DurationRow {
        nanos: args.nanos,
        formatted: format_duration(Duration::from_nanos(args.nanos)),
    };
    render_duration(&row, config.format)
}

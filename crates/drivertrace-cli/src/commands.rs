//! CLI command definitions using clap

use clap::{Args, Parser, Subcommand, ValueEnum};
use drivertrace::CapabilityGroup;

/// Drivertrace: inspect WebDriver commands and canonicalize locators
#[derive(Parser, Debug)]
#[command(name = "drivertrace")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Verbosity level (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Quiet mode (errors only)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Color output (auto, always, never)
    #[arg(long, default_value = "auto", global = true)]
    pub color: ColorArg,

    /// Output format (text, json)
    #[arg(long, default_value = "text", global = true)]
    pub format: FormatArg,

    /// Subcommand to run
    #[command(subcommand)]
    pub command: Commands,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List recognized driver commands and their call expressions
    Commands(CommandsArgs),

    /// Canonicalize element or locator text to By.<kind>("<value>")
    Locator(LocatorArgs),

    /// Parse a canonical locator into kind and value
    Parse(ParseArgs),

    /// Format a duration given in nanoseconds
    FormatDuration(FormatDurationArgs),
}

/// Arguments for the commands command
#[derive(Args, Debug)]
pub struct CommandsArgs {
    /// Only list commands of this capability group
    #[arg(short, long)]
    pub group: Option<CapabilityGroup>,

    /// Subject name used in the call expressions
    #[arg(short, long)]
    pub subject: Option<String>,
}

/// Arguments for the locator command
#[derive(Args, Debug)]
pub struct LocatorArgs {
    /// Element handle text or `By.<kind>: <value>` text
    #[arg(required = true)]
    pub inputs: Vec<String>,
}

/// Arguments for the parse command
#[derive(Args, Debug)]
pub struct ParseArgs {
    /// Canonical locator, e.g. By.id("submit")
    pub input: String,
}

/// Arguments for the format-duration command
#[derive(Args, Debug)]
pub struct FormatDurationArgs {
    /// Duration in nanoseconds
    pub nanos: u64,
}

/// Color argument
#[derive(ValueEnum, Clone, Debug, Default)]
pub enum ColorArg {
    /// Automatic color detection
    #[default]
    Auto,
    /// Always use colors
    Always,
    /// Never use colors
    Never,
}

impl From<ColorArg> for crate::config::ColorChoice {
    fn from(arg: ColorArg) -> Self {
        match arg {
            ColorArg::Auto => Self::Auto,
            ColorArg::Always => Self::Always,
            ColorArg::Never => Self::Never,
        }
    }
}

/// Output format argument
#[derive(ValueEnum, Clone, Debug, Default)]
pub enum FormatArg {
    /// Human-readable text
    #[default]
    Text,
    /// JSON
    Json,
}

impl From<FormatArg> for crate::config::OutputFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Text => Self::Text,
            FormatArg::Json => Self::Json,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn test_verify_cli() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_commands_with_group() {
        let cli = Cli::parse_from(["drivertrace", "commands", "--group", "alert"]);
        match cli.command {
            Commands::Commands(args) => {
                assert_eq!(args.group, Some(CapabilityGroup::Alert));
                assert!(args.subject.is_none());
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_parse_bad_group() {
        assert!(Cli::try_parse_from(["drivertrace", "commands", "--group", "frame"]).is_err());
    }

    #[test]
    fn test_parse_global_flags() {
        let cli = Cli::parse_from(["drivertrace", "parse", "-vv", "--format", "json", "By.id(\"x\")"]);
        assert_eq!(cli.verbose, 2);
        assert!(matches!(cli.format, FormatArg::Json));
        assert!(matches!(cli.command, Commands::Parse(ParseArgs { ref input }) if input == "By.id(\"x\")"));
    }

    #[test]
    fn test_locator_requires_input() {
        assert!(Cli::try_parse_from(["drivertrace", "locator"]).is_err());
    }
}

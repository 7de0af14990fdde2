//! Drivertrace CLI: inspect WebDriver commands and canonicalize locators
//!
//! ## Usage
//!
//! ```bash
//! drivertrace commands --group navigation          # List commands of a group
//! drivertrace locator "By.id: submitBtn"           # By.id("submitBtn")
//! drivertrace parse 'By.xpath("//a")' --format json
//! drivertrace format-duration 1500000000           # 1 sec 500 ms
//! ```

use clap::Parser;
use drivertrace_cli::{
    handlers::{run_commands, run_format_duration, run_locator, run_parse},
    Cli, CliConfig, CliResult, ColorChoice, Commands, OutputFormat, Verbosity,
};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> CliResult<()> {
    let cli = Cli::parse();
    let config = build_config(&cli);
    init_logging(config.verbosity);
    console::set_colors_enabled(config.color.should_color());

    let output = match &cli.command {
        Commands::Commands(args) => run_commands(&config, args)?,
        Commands::Locator(args) => run_locator(&config, args)?,
        Commands::Parse(args) => run_parse(&config, args)?,
        Commands::FormatDuration(args) => run_format_duration(&config, args)?,
    };
    println!("{output}");
    Ok(())
}

fn build_config(cli: &Cli) -> CliConfig {
    let verbosity = Verbosity::from_flags(cli.quiet, cli.verbose);
    let color: ColorChoice = cli.color.clone().into();
    let format: OutputFormat = cli.format.clone().into();

    CliConfig::new()
        .with_verbosity(verbosity)
        .with_color(color)
        .with_format(format)
}

fn init_logging(verbosity: Verbosity) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(verbosity.filter_directive()));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

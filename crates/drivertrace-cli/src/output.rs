//! Output rendering for text and JSON

use console::style;
use drivertrace::{By, Command};
use serde::Serialize;

use crate::config::OutputFormat;
use crate::error::CliResult;

/// One taxonomy row
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CommandRow {
    /// Unique command name
    pub name: &'static str,
    /// Capability group
    pub group: &'static str,
    /// Method name
    pub mnemonic: &'static str,
    /// Call expression
    pub long_form: String,
}

impl CommandRow {
    /// Row for `cmd` rendered with `subject`, or the group default
    #[must_use]
    pub fn new(cmd: Command, subject: Option<&str>) -> Self {
        Self {
            name: cmd.name(),
            group: cmd.group().name(),
            mnemonic: cmd.short_name(),
            long_form: subject.map_or_else(|| cmd.long_form(), |s| cmd.long_form_with(s)),
        }
    }
}

/// One canonicalization result
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LocatorRow {
    /// Text as given
    pub input: String,
    /// Canonical form, or the input when it was not recognized
    pub canonical: String,
}

/// Parsed locator
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParsedRow {
    /// Locator strategy
    pub kind: String,
    /// Strategy argument
    pub value: String,
    /// Canonical form
    pub canonical: String,
}

impl From<&By> for ParsedRow {
    fn from(by: &By) -> Self {
        Self {
            kind: by.kind.method_name().to_string(),
            value: by.value.clone(),
            canonical: by.canonical(),
        }
    }
}

/// Duration formatting result
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DurationRow {
    /// Input in nanoseconds
    pub nanos: u64,
    /// `"<s> sec <ms> ms"`
    pub formatted: String,
}

/// Render taxonomy rows
pub fn render_commands(rows: &[CommandRow], format: OutputFormat) -> CliResult<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(rows)?),
        OutputFormat::Text => {
            let width = rows.iter().map(|r| r.name.len()).max().unwrap_or(0);
            let lines: Vec<String> = rows
                .iter()
                .map(|r| {
                    format!(
                        "{:<width$}  {:<17}  {}",
                        style(r.name).bold(),
                        r.group,
                        style(&r.long_form).cyan(),
                    )
                })
                .collect();
            Ok(lines.join("\n"))
        }
    }
}

/// Render canonicalization results
pub fn render_locators(rows: &[LocatorRow], format: OutputFormat) -> CliResult<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(rows)?),
        OutputFormat::Text => Ok(rows
            .iter()
            .map(|r| r.canonical.clone())
            .collect::<Vec<_>>()
            .join("\n")),
    }
}

/// Render a parsed locator
pub fn render_parsed(row: &ParsedRow, format: OutputFormat) -> CliResult<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(row)?),
        OutputFormat::Text => Ok(format!(
            "kind: {}\nvalue: {}\ncanonical: {}",
            style(&row.kind).bold(),
            row.value,
            style(&row.canonical).cyan()
        )),
    }
}

/// Render a formatted duration
pub fn render_duration(row: &DurationRow, format: OutputFormat) -> CliResult<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(row)?),
        OutputFormat::Text => Ok(row.formatted.clone()),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn test_command_row() {
        let row = CommandRow::new(Command::GetSizeByWindow, None);
        assert_eq!(row.name, "getSizeByWindow");
        assert_eq!(row.group, "Window");
        assert_eq!(row.mnemonic, "getSize");
        assert_eq!(row.long_form, "webDriver.manage().window().getSize");

        let row = CommandRow::new(Command::Clear, Some("field"));
        assert_eq!(row.long_form, "field.clear");
    }

    #[test]
    fn test_commands_json() {
        let rows = vec![CommandRow::new(Command::To, None)];
        let json = render_commands(&rows, OutputFormat::Json).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value[0]["long_form"], "webDriver.navigate().to");
        assert_eq!(value[0]["group"], "Navigation");
    }

    #[test]
    fn test_commands_text() {
        console::set_colors_enabled(false);
        let rows = vec![
            CommandRow::new(Command::Back, None),
            CommandRow::new(Command::Accept, None),
        ];
        let text = render_commands(&rows, OutputFormat::Text).unwrap();
        assert_eq!(text.lines().count(), 2);
        assert!(text.contains("webDriver.switchTo().alert().accept"));
    }

    #[test]
    fn test_locators_text() {
        let rows = vec![LocatorRow {
            input: "By.id: a".into(),
            canonical: "By.id(\"a\")".into(),
        }];
        assert_eq!(
            render_locators(&rows, OutputFormat::Text).unwrap(),
            "By.id(\"a\")"
        );
    }

    #[test]
    fn test_parsed_json() {
        let row = ParsedRow::from(&By::link_text("Home"));
        let json = render_parsed(&row, OutputFormat::Json).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["kind"], "linkText");
        assert_eq!(value["canonical"], "By.linkText(\"Home\")");
    }

    #[test]
    fn test_duration_text() {
        let row = DurationRow {
            nanos: 1_002_000_000,
            formatted: "1 sec 2 ms".into(),
        };
        assert_eq!(render_duration(&row, OutputFormat::Text).unwrap(), "1 sec 2 ms");
    }
}

//! Result and error types for Drivertrace.

use thiserror::Error;

/// Result type for Drivertrace operations
pub type DriverTraceResult<T> = Result<T, DriverTraceError>;

/// Errors that can occur in Drivertrace
///
/// The lenient entry points (`from_element_string`, `from_by_string`,
/// `parse_by`) never return these; they degrade to pass-through strings or
/// `None` instead.
#[derive(Debug, Error)]
pub enum DriverTraceError {
    /// Canonical locator string with a kind that is not recognized
    #[error("Problem converting param into By: {input}")]
    UnknownLocatorKind {
        /// Offending input
        input: String,
    },

    /// Recognized locator kind, but the string is too short to hold a value
    #[error("Malformed locator: {input}")]
    MalformedLocator {
        /// Offending input
        input: String,
    },

    /// Command name that is not part of the taxonomy
    #[error("Unknown command: {name}")]
    UnknownCommand {
        /// Offending name
        name: String,
    },

    /// Capability group name that is not part of the taxonomy
    #[error("Unknown capability group: {name}")]
    UnknownGroup {
        /// Offending name
        name: String,
    },
}

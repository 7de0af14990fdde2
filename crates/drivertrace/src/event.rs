//! Event records for intercepted driver commands.
//!
//! A dispatcher creates one [`DriverEvent`] per phase of a command: before
//! it runs, after it returns, or when it throws. Records are stamped by an
//! [`EventSession`](crate::EventSession), which owns the timing markers the
//! durations are measured against.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize, Serializer};
use std::error::Error as StdError;
use std::fmt;
use std::sync::{Arc, PoisonError};
use std::time::Duration;
use thiserror::Error;

use crate::command::Command;
use crate::session::global_session;

/// Which side of a command a record describes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventKind {
    /// Before a user-facing driver command
    BeforeAction,
    /// After a user-facing driver command
    AfterAction,
    /// Before a passive state read
    BeforeGather,
    /// After a passive state read
    AfterGather,
    /// A command failed
    Exception,
}

impl EventKind {
    /// Opens a command
    #[must_use]
    pub const fn is_before(self) -> bool {
        matches!(self, Self::BeforeAction | Self::BeforeGather)
    }

    /// Closes a command
    #[must_use]
    pub const fn is_after(self) -> bool {
        matches!(self, Self::AfterAction | Self::AfterGather)
    }

    /// The closing kind for an opening kind
    #[must_use]
    pub const fn closing(self) -> Option<Self> {
        match self {
            Self::BeforeAction => Some(Self::AfterAction),
            Self::BeforeGather => Some(Self::AfterGather),
            _ => None,
        }
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::BeforeAction => "BeforeAction",
            Self::AfterAction => "AfterAction",
            Self::BeforeGather => "BeforeGather",
            Self::AfterGather => "AfterGather",
            Self::Exception => "Exception",
        };
        f.write_str(name)
    }
}

/// Opaque value returned by a command
pub type ReturnObject = Arc<dyn fmt::Display + Send + Sync>;

#[derive(Debug, Error)]
#[error("{0}")]
struct Message(String);

/// Failure captured from a command
#[derive(Clone)]
pub struct Issue(Arc<dyn StdError + Send + Sync>);

impl Issue {
    /// Wrap an error
    #[must_use]
    pub fn new(err: impl StdError + Send + Sync + 'static) -> Self {
        Self(Arc::new(err))
    }

    /// Issue with a plain message
    #[must_use]
    pub fn msg(message: impl Into<String>) -> Self {
        Self::new(Message(message.into()))
    }

    /// Error message
    #[must_use]
    pub fn message(&self) -> String {
        self.0.to_string()
    }

    /// The captured error
    #[must_use]
    pub fn error(&self) -> &(dyn StdError + Send + Sync + 'static) {
        self.0.as_ref()
    }
}

impl fmt::Debug for Issue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Issue").field(&self.message()).finish()
    }
}

impl fmt::Display for Issue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

fn serialize_issue<S: Serializer>(issue: &Option<Issue>, serializer: S) -> Result<S::Ok, S::Error> {
    match issue {
        Some(issue) => serializer.serialize_some(&issue.message()),
        None => serializer.serialize_none(),
    }
}

/// One phase of one intercepted driver command.
///
/// The record number is unique per session and never reused. The event
/// number is chosen by the dispatcher; a Before/After pair shares it.
#[derive(Clone, Serialize, Deserialize)]
pub struct DriverEvent {
    record_number: u64,
    event_number: u32,
    kind: EventKind,
    cmd: Option<Command>,
    timestamp: DateTime<Utc>,
    since_last_action: Option<Duration>,
    elapsed: Option<Duration>,
    param1: Option<String>,
    param2: Option<String>,
    return_value: Option<String>,
    #[serde(skip)]
    return_object: Option<ReturnObject>,
    #[serde(serialize_with = "serialize_issue", skip_deserializing)]
    issue: Option<Issue>,
    element_locator: Option<String>,
}

impl DriverEvent {
    /// Record a phase against the process-wide session.
    ///
    /// Use [`EventSession::record`](crate::EventSession::record) directly
    /// when more than one instrumented driver runs at a time.
    #[must_use]
    pub fn new(kind: EventKind, event_number: u32, cmd: impl Into<Option<Command>>) -> Self {
        global_session()
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .record(kind, event_number, cmd)
    }

    pub(crate) fn stamped(
        record_number: u64,
        kind: EventKind,
        event_number: u32,
        cmd: Option<Command>,
        since_last_action: Option<Duration>,
        elapsed: Option<Duration>,
    ) -> Self {
        Self {
            record_number,
            event_number,
            kind,
            cmd,
            timestamp: Utc::now(),
            since_last_action,
            elapsed,
            param1: None,
            param2: None,
            return_value: None,
            return_object: None,
            issue: None,
            element_locator: None,
        }
    }

    /// Session-wide sequence number
    #[must_use]
    pub const fn record_number(&self) -> u64 {
        self.record_number
    }

    /// Dispatcher-assigned command ordinal
    #[must_use]
    pub const fn event_number(&self) -> u32 {
        self.event_number
    }

    /// Phase
    #[must_use]
    pub const fn kind(&self) -> EventKind {
        self.kind
    }

    /// Classified command, absent on bare exception records
    #[must_use]
    pub const fn cmd(&self) -> Option<Command> {
        self.cmd
    }

    /// Wall-clock creation time
    #[must_use]
    pub const fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    /// Wall-clock creation time in milliseconds since the Unix epoch
    #[must_use]
    pub fn timestamp_ms(&self) -> i64 {
        self.timestamp.timestamp_millis()
    }

    /// Gap between the end of the previous action and the start of this one
    #[must_use]
    pub const fn since_last_action(&self) -> Option<Duration> {
        self.since_last_action
    }

    /// Time from the matching Before record to this After record
    #[must_use]
    pub const fn elapsed(&self) -> Option<Duration> {
        self.elapsed
    }

    /// First argument
    #[must_use]
    pub fn param1(&self) -> Option<&str> {
        self.param1.as_deref()
    }

    /// Set the first argument
    pub fn set_param1(&mut self, param1: impl Into<String>) {
        self.param1 = Some(param1.into());
    }

    /// Second argument
    #[must_use]
    pub fn param2(&self) -> Option<&str> {
        self.param2.as_deref()
    }

    /// Set the second argument
    pub fn set_param2(&mut self, param2: impl Into<String>) {
        self.param2 = Some(param2.into());
    }

    /// Returned value as text
    #[must_use]
    pub fn return_value(&self) -> Option<&str> {
        self.return_value.as_deref()
    }

    /// Set the returned value
    pub fn set_return_value(&mut self, return_value: impl Into<String>) {
        self.return_value = Some(return_value.into());
    }

    /// Returned object. Not serialized.
    #[must_use]
    pub fn return_object(&self) -> Option<&ReturnObject> {
        self.return_object.as_ref()
    }

    /// Set the returned object
    pub fn set_return_object(&mut self, return_object: impl fmt::Display + Send + Sync + 'static) {
        self.return_object = Some(Arc::new(return_object));
    }

    /// Captured failure
    #[must_use]
    pub fn issue(&self) -> Option<&Issue> {
        self.issue.as_ref()
    }

    /// Attach a captured failure
    pub fn set_issue(&mut self, issue: Issue) {
        self.issue = Some(issue);
    }

    /// Canonical locator of the element the command worked on
    #[must_use]
    pub fn element_locator(&self) -> Option<&str> {
        self.element_locator.as_deref()
    }

    /// Set the canonical locator
    pub fn set_element_locator(&mut self, element_locator: impl Into<String>) {
        self.element_locator = Some(element_locator.into());
    }
}

impl fmt::Debug for DriverEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DriverEvent")
            .field("record_number", &self.record_number)
            .field("event_number", &self.event_number)
            .field("kind", &self.kind)
            .field("cmd", &self.cmd)
            .field("timestamp", &self.timestamp)
            .field("since_last_action", &self.since_last_action)
            .field("elapsed", &self.elapsed)
            .field("param1", &self.param1)
            .field("param2", &self.param2)
            .field("return_value", &self.return_value)
            .field(
                "return_object",
                &self.return_object.as_ref().map(ToString::to_string),
            )
            .field("issue", &self.issue)
            .field("element_locator", &self.element_locator)
            .finish()
    }
}

/// Single-line diagnostic form
impl fmt::Display for DriverEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "eventno:{},type:{},timestamp:{} ms,cmd:",
            self.event_number,
            self.kind,
            self.timestamp_ms()
        )?;
        match self.cmd {
            Some(cmd) => f.write_str(cmd.short_name())?,
            None => f.write_str("null")?,
        }
        if let Some(param1) = &self.param1 {
            write!(f, ",param1:{param1}")?;
        }
        if let Some(param2) = &self.param2 {
            write!(f, ",param2:{param2}")?;
        }
        if let Some(value) = &self.return_value {
            write!(f, ",returned:{value},")?;
        }
        if let Some(object) = &self.return_object {
            write!(f, ",returned:{object},")?;
        }
        if let Some(since) = self.since_last_action {
            write!(f, ",since last action:{}", format_duration(since))?;
        }
        if let Some(elapsed) = self.elapsed {
            write!(f, ",executed in:{}", format_duration(elapsed))?;
        }
        if let Some(issue) = &self.issue {
            write!(f, ",issue:{issue}")?;
        }
        Ok(())
    }
}

/// `"<s> sec <ms> ms"`, truncated to whole milliseconds
#[must_use]
pub fn format_duration(duration: Duration) -> String {
    format!("{} sec {} ms", duration.as_secs(), duration.subsec_millis())
}

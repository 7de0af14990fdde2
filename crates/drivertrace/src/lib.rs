//! Drivertrace: structured records of WebDriver commands.
//!
//! An instrumentation layer around a WebDriver client produces one
//! [`DriverEvent`] before and after every command it intercepts. This crate
//! is the core such a layer is built on:
//!
//! - [`Command`] / [`CapabilityGroup`]: the closed taxonomy of driver
//!   operations and the call expression each one renders to.
//! - [`EventSession`] / [`DriverEvent`]: sequence numbering, timestamps and
//!   the two duration metrics (`elapsed`, `since_last_action`).
//! - [`locator`]: the codec between an engine's element/locator text and the
//!   canonical `By.<kind>("<value>")` form.
//!
//! ```text
//!  dispatcher ──► EventSession::record ──► DriverEvent ──► DriverEventListener
//!                       │                       ▲
//!                   Command                locator::from_element_string
//! ```
//!
//! # Example
//!
//! ```
//! use drivertrace::prelude::*;
//!
//! let mut session = EventSession::new();
//! let before = session.record(EventKind::BeforeAction, 1, Command::ClickByElement);
//! let mut after = session.record(EventKind::AfterAction, 1, Command::ClickByElement);
//! after.set_element_locator(from_element_string(
//!     "[[ChromeDriver: chrome on LINUX (4f1c)] -> id: submit]",
//! ));
//!
//! assert_eq!(after.record_number(), before.record_number() + 1);
//! assert!(after.elapsed().is_some());
//! assert_eq!(after.element_locator(), Some(r#"By.id("submit")"#));
//! assert_eq!(Command::ClickByElement.long_form(), "webElement.click");
//! ```

#![warn(missing_docs)]

mod clock;
mod command;
mod event;
mod listener;
mod result;
mod session;

/// Locator codec
pub mod locator;

pub use clock::{system_clock, FakeClock, MonotonicClock, SharedClock, SystemClock};
pub use command::{CapabilityGroup, Command, DEFAULT_DRIVER_SUBJECT, DEFAULT_ELEMENT_SUBJECT};
pub use event::{format_duration, DriverEvent, EventKind, Issue, ReturnObject};
pub use listener::{DriverEventListener, FullListener};
pub use locator::{By, ByKind};
pub use result::{DriverTraceError, DriverTraceResult};
pub use session::{global_session, EventSession, SessionConfig};

/// Prelude for convenient imports
pub mod prelude {
    pub use super::clock::*;
    pub use super::command::*;
    pub use super::event::*;
    pub use super::listener::*;
    pub use super::locator::*;
    pub use super::result::*;
    pub use super::session::*;
}

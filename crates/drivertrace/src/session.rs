//! Recording sessions: sequence numbering and timing markers.
//!
//! Record numbers come from one process-wide counter that starts at 1 and is
//! shared by every session, so no two records in a process carry the same
//! number. An [`EventSession`] holds the two monotonic markers that durations
//! are measured against:
//!
//! - `last_event_start`: set by every Before record, read by every After
//!   record to compute `elapsed`.
//! - `last_action_end`: set by `AfterAction`, read by the next
//!   `BeforeAction` to compute `since_last_action`.
//!
//! Recording is a critical section. `record` takes `&mut self`, so sharing a
//! session across threads means wrapping it in a lock; interleaving two
//! commands' Before/After records on one session still mixes up the markers.
//! Give each instrumented driver its own session to avoid that.

use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, OnceLock};
use std::time::Duration;
use tracing::trace;

use crate::clock::{system_clock, SharedClock};
use crate::command::{
    CapabilityGroup, Command, DEFAULT_DRIVER_SUBJECT, DEFAULT_ELEMENT_SUBJECT,
};
use crate::event::{DriverEvent, EventKind};

/// Configuration for an event session
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Subject name for driver-level long forms
    pub driver_subject: String,
    /// Subject name for element long forms
    pub element_subject: String,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            driver_subject: DEFAULT_DRIVER_SUBJECT.to_string(),
            element_subject: DEFAULT_ELEMENT_SUBJECT.to_string(),
        }
    }
}

impl SessionConfig {
    /// Create a new config
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the driver subject name
    #[must_use]
    pub fn with_driver_subject(mut self, subject: impl Into<String>) -> Self {
        self.driver_subject = subject.into();
        self
    }

    /// Set the element subject name
    #[must_use]
    pub fn with_element_subject(mut self, subject: impl Into<String>) -> Self {
        self.element_subject = subject.into();
        self
    }
}

static NEXT_RECORD_NUMBER: AtomicU64 = AtomicU64::new(1);

fn take_record_number() -> u64 {
    NEXT_RECORD_NUMBER.fetch_add(1, Ordering::Relaxed)
}

/// Stamps driver events for one instrumented driver
#[derive(Debug)]
pub struct EventSession {
    config: SessionConfig,
    clock: SharedClock,
    last_event_start: Duration,
    last_action_end: Duration,
}

impl EventSession {
    /// Session with default config and the system clock
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(SessionConfig::default())
    }

    /// Session with the system clock
    #[must_use]
    pub fn with_config(config: SessionConfig) -> Self {
        Self::with_clock(config, system_clock())
    }

    /// Session on an explicit clock.
    ///
    /// Both markers start at the clock's current reading, so the first
    /// durations are measured from session creation.
    #[must_use]
    pub fn with_clock(config: SessionConfig, clock: SharedClock) -> Self {
        let now = clock.now();
        Self {
            config,
            clock,
            last_event_start: now,
            last_action_end: now,
        }
    }

    /// Session config
    #[must_use]
    pub const fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// Create the record for one phase of a command.
    ///
    /// | kind | effect |
    /// |---|---|
    /// | `BeforeAction` | `since_last_action` when `event_number > 1`, then marks the event start |
    /// | `AfterAction` | marks the action end, then `elapsed` |
    /// | `BeforeGather` | marks the event start |
    /// | `AfterGather` | `elapsed` |
    /// | `Exception` | none |
    pub fn record(
        &mut self,
        kind: EventKind,
        event_number: u32,
        cmd: impl Into<Option<Command>>,
    ) -> DriverEvent {
        let cmd = cmd.into();
        let record_number = take_record_number();

        let now = self.clock.now();
        let mut since_last_action = None;
        let mut elapsed = None;
        match kind {
            EventKind::BeforeAction => {
                if event_number > 1 {
                    since_last_action = Some(now.saturating_sub(self.last_action_end));
                }
                self.last_event_start = now;
            }
            EventKind::AfterAction => {
                self.last_action_end = now;
                elapsed = Some(now.saturating_sub(self.last_event_start));
            }
            EventKind::BeforeGather => self.last_event_start = now,
            EventKind::AfterGather => {
                elapsed = Some(now.saturating_sub(self.last_event_start));
            }
            EventKind::Exception => {}
        }

        trace!(
            record = record_number,
            event = event_number,
            kind = %kind,
            cmd = cmd.map(Command::name),
            "driver event recorded"
        );

        DriverEvent::stamped(
            record_number,
            kind,
            event_number,
            cmd,
            since_last_action,
            elapsed,
        )
    }

    /// Long form of `cmd` using this session's subject names
    #[must_use]
    pub fn long_form(&self, cmd: Command) -> String {
        let subject = match cmd.group() {
            CapabilityGroup::Element => &self.config.element_subject,
            _ => &self.config.driver_subject,
        };
        cmd.long_form_with(subject)
    }
}

impl Default for EventSession {
    fn default() -> Self {
        Self::new()
    }
}

/// The process-wide session behind [`DriverEvent::new`]
pub fn global_session() -> &'static Mutex<EventSession> {
    static SESSION: OnceLock<Mutex<EventSession>> = OnceLock::new();
    SESSION.get_or_init(|| Mutex::new(EventSession::new()))
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::clock::FakeClock;
    use std::sync::Arc;

    fn fake_session() -> (EventSession, Arc<FakeClock>) {
        let clock = Arc::new(FakeClock::at(Duration::from_secs(100)));
        let session = EventSession::with_clock(SessionConfig::default(), clock.clone());
        (session, clock)
    }

    mod config_tests {
        use super::*;

        #[test]
        fn test_default() {
            let config = SessionConfig::default();
            assert_eq!(config.driver_subject, "webDriver");
            assert_eq!(config.element_subject, "webElement");
        }

        #[test]
        fn test_builders() {
            let config = SessionConfig::new()
                .with_driver_subject("driver")
                .with_element_subject("el");
            assert_eq!(config.driver_subject, "driver");
            assert_eq!(config.element_subject, "el");
        }

        #[test]
        fn test_long_form_uses_subjects() {
            let session = EventSession::with_config(
                SessionConfig::new()
                    .with_driver_subject("driver")
                    .with_element_subject("el"),
            );
            assert_eq!(session.long_form(Command::Refresh), "driver.navigate().refresh");
            assert_eq!(session.long_form(Command::Clear), "el.clear");
        }
    }

    mod numbering_tests {
        use super::*;

        // Other tests record concurrently, so only ordering is guaranteed here.
        #[test]
        fn test_increasing_within_session() {
            let (mut session, _) = fake_session();
            let numbers: Vec<u64> = (0..10)
                .map(|i| {
                    session
                        .record(EventKind::BeforeGather, i + 1, Command::GetTitle)
                        .record_number()
                })
                .collect();
            assert!(numbers[0] >= 1);
            assert!(numbers.windows(2).all(|w| w[0] < w[1]));
        }

        #[test]
        fn test_sessions_never_share_numbers() {
            let mut a = EventSession::new();
            let mut b = EventSession::new();
            let ra = a.record(EventKind::BeforeGather, 1, Command::GetTitle);
            let rb = b.record(EventKind::BeforeGather, 1, Command::GetTitle);
            let rg = DriverEvent::new(EventKind::BeforeGather, 1, Command::GetTitle);
            assert_ne!(ra.record_number(), rb.record_number());
            assert_ne!(ra.record_number(), rg.record_number());
            assert_ne!(rb.record_number(), rg.record_number());
        }

        #[test]
        fn test_locked_session_across_threads() {
            let session = Arc::new(Mutex::new(EventSession::new()));
            let handles: Vec<_> = (0..4)
                .map(|_| {
                    let session = Arc::clone(&session);
                    std::thread::spawn(move || {
                        (0..25)
                            .map(|i| {
                                session
                                    .lock()
                                    .unwrap()
                                    .record(EventKind::BeforeGather, i, Command::GetText)
                                    .record_number()
                            })
                            .collect::<Vec<_>>()
                    })
                })
                .collect();

            let mut all: Vec<u64> = handles
                .into_iter()
                .flat_map(|h| h.join().unwrap())
                .collect();
            all.sort_unstable();
            all.dedup();
            assert_eq!(all.len(), 100);
            assert!(all[0] >= 1);
        }

        #[test]
        fn test_global_session_increasing() {
            let a = DriverEvent::new(EventKind::BeforeGather, 1, Command::GetCurrentUrl);
            let b = DriverEvent::new(EventKind::AfterGather, 1, Command::GetCurrentUrl);
            assert!(b.record_number() > a.record_number());
            assert_eq!(b.cmd(), Some(Command::GetCurrentUrl));
            assert!(b.elapsed().is_some());
        }
    }

    mod timing_tests {
        use super::*;

        #[test]
        fn test_action_pair() {
            let (mut session, clock) = fake_session();
            let before = session.record(EventKind::BeforeAction, 1, Command::Get);
            assert_eq!(before.since_last_action(), None);
            assert_eq!(before.elapsed(), None);

            clock.advance_ms(1_250);
            let after = session.record(EventKind::AfterAction, 1, Command::Get);
            assert_eq!(after.elapsed(), Some(Duration::from_millis(1_250)));
            assert_eq!(after.since_last_action(), None);
        }

        #[test]
        fn test_since_last_action() {
            let (mut session, clock) = fake_session();
            session.record(EventKind::BeforeAction, 1, Command::Get);
            clock.advance_ms(10);
            session.record(EventKind::AfterAction, 1, Command::Get);

            clock.advance_ms(300);
            let next = session.record(EventKind::BeforeAction, 2, Command::ClickByElement);
            assert_eq!(next.since_last_action(), Some(Duration::from_millis(300)));
            assert_eq!(next.elapsed(), None);
        }

        #[test]
        fn test_first_event_has_no_gap() {
            let (mut session, clock) = fake_session();
            clock.advance_ms(5_000);
            let first = session.record(EventKind::BeforeAction, 1, Command::Get);
            assert_eq!(first.since_last_action(), None);
        }

        #[test]
        fn test_gap_measured_from_session_start() {
            let (mut session, clock) = fake_session();
            clock.advance_ms(40);
            let e = session.record(EventKind::BeforeAction, 2, Command::Back);
            assert_eq!(e.since_last_action(), Some(Duration::from_millis(40)));
        }

        #[test]
        fn test_gather_pair() {
            let (mut session, clock) = fake_session();
            session.record(EventKind::BeforeGather, 3, Command::GetText);
            clock.advance_ms(7);
            let after = session.record(EventKind::AfterGather, 3, Command::GetText);
            assert_eq!(after.elapsed(), Some(Duration::from_millis(7)));
            assert_eq!(after.since_last_action(), None);
        }

        #[test]
        fn test_gather_does_not_move_action_end() {
            let (mut session, clock) = fake_session();
            session.record(EventKind::BeforeAction, 1, Command::Get);
            clock.advance_ms(5);
            session.record(EventKind::AfterAction, 1, Command::Get);

            clock.advance_ms(20);
            session.record(EventKind::BeforeGather, 2, Command::GetTitle);
            clock.advance_ms(3);
            session.record(EventKind::AfterGather, 2, Command::GetTitle);

            clock.advance_ms(2);
            let next = session.record(EventKind::BeforeAction, 3, Command::Quit);
            assert_eq!(next.since_last_action(), Some(Duration::from_millis(25)));
        }

        #[test]
        fn test_exception_leaves_markers() {
            let (mut session, clock) = fake_session();
            session.record(EventKind::BeforeAction, 1, Command::Submit);
            clock.advance_ms(4);
            let exception = session.record(EventKind::Exception, 1, None);
            assert_eq!(exception.elapsed(), None);
            assert_eq!(exception.since_last_action(), None);
            assert_eq!(exception.cmd(), None);

            clock.advance_ms(6);
            let after = session.record(EventKind::AfterAction, 1, Command::Submit);
            assert_eq!(after.elapsed(), Some(Duration::from_millis(10)));
        }

        #[test]
        fn test_system_clock() {
            let mut session = EventSession::new();
            let before = session.record(EventKind::BeforeAction, 1, Command::Get);
            let after = session.record(EventKind::AfterAction, 1, Command::Get);
            assert!(after.elapsed().is_some());
            assert!(after.timestamp() >= before.timestamp());
            let next = session.record(EventKind::BeforeAction, 2, Command::Get);
            assert!(next.since_last_action().is_some());
        }
    }

    mod independent_sessions_tests {
        use super::*;

        #[test]
        fn test_sessions_do_not_interfere() {
            let clock = Arc::new(FakeClock::new());
            let mut a = EventSession::with_clock(SessionConfig::default(), clock.clone());
            let mut b = EventSession::with_clock(SessionConfig::default(), clock.clone());

            a.record(EventKind::BeforeAction, 1, Command::Get);
            clock.advance_ms(10);
            b.record(EventKind::BeforeAction, 1, Command::Get);
            clock.advance_ms(10);
            let after_a = a.record(EventKind::AfterAction, 1, Command::Get);
            let after_b = b.record(EventKind::AfterAction, 1, Command::Get);

            assert_eq!(after_a.elapsed(), Some(Duration::from_millis(20)));
            assert_eq!(after_b.elapsed(), Some(Duration::from_millis(10)));
            assert_ne!(after_a.record_number(), after_b.record_number());
        }
    }
}

//! Consumers of driver event records.

use crate::event::{DriverEvent, EventKind};

/// Receives every record a dispatcher produces
pub trait DriverEventListener {
    /// Called once per record, in creation order
    fn on_event(&mut self, event: &DriverEvent);
}

impl<F: FnMut(&DriverEvent)> DriverEventListener for F {
    fn on_event(&mut self, event: &DriverEvent) {
        self(event);
    }
}

/// Listener that keeps every record it sees
#[derive(Debug, Clone, Default)]
pub struct FullListener {
    events: Vec<DriverEvent>,
}

impl FullListener {
    /// Create an empty listener
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records in arrival order
    #[must_use]
    pub fn events(&self) -> &[DriverEvent] {
        &self.events
    }

    /// Number of records
    #[must_use]
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// No records yet
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Drop all records
    pub fn clear(&mut self) {
        self.events.clear();
    }

    /// Take the records out
    #[must_use]
    pub fn into_events(self) -> Vec<DriverEvent> {
        self.events
    }

    /// Records belonging to one command
    pub fn for_event(&self, event_number: u32) -> impl Iterator<Item = &DriverEvent> {
        self.events
            .iter()
            .filter(move |e| e.event_number() == event_number)
    }

    /// Records of one kind
    pub fn of_kind(&self, kind: EventKind) -> impl Iterator<Item = &DriverEvent> {
        self.events.iter().filter(move |e| e.kind() == kind)
    }

    /// First Before record of a command and the After record that closes it
    #[must_use]
    pub fn pair(&self, event_number: u32) -> Option<(&DriverEvent, &DriverEvent)> {
        let before = self
            .for_event(event_number)
            .find(|e| e.kind().is_before())?;
        let closing = before.kind().closing()?;
        let after = self
            .for_event(event_number)
            .find(|e| e.kind() == closing && e.record_number() > before.record_number())?;
        Some((before, after))
    }

    /// Records carrying a captured failure
    pub fn issues(&self) -> impl Iterator<Item = &DriverEvent> {
        self.events.iter().filter(|e| e.issue().is_some())
    }
}

impl DriverEventListener for FullListener {
    fn on_event(&mut self, event: &DriverEvent) {
        self.events.push(event.clone());
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::clock::FakeClock;
    use crate::command::Command;
    use crate::event::Issue;
    use crate::session::{EventSession, SessionConfig};
    use std::sync::Arc;
    use std::time::Duration;

    fn recorded() -> FullListener {
        let clock = Arc::new(FakeClock::new());
        let mut session = EventSession::with_clock(SessionConfig::default(), clock.clone());
        let mut listener = FullListener::new();

        listener.on_event(&session.record(EventKind::BeforeAction, 1, Command::Get));
        clock.advance_ms(30);
        listener.on_event(&session.record(EventKind::AfterAction, 1, Command::Get));

        listener.on_event(&session.record(EventKind::BeforeGather, 2, Command::GetTitle));
        clock.advance_ms(2);
        listener.on_event(&session.record(EventKind::AfterGather, 2, Command::GetTitle));

        listener.on_event(&session.record(EventKind::BeforeAction, 3, Command::ClickByElement));
        let mut failed = session.record(EventKind::Exception, 3, None);
        failed.set_issue(Issue::msg("element not interactable"));
        listener.on_event(&failed);
        listener
    }

    #[test]
    fn test_collects_in_order() {
        let listener = recorded();
        assert_eq!(listener.len(), 6);
        let numbers: Vec<u64> = listener.events().iter().map(DriverEvent::record_number).collect();
        assert!(numbers.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_for_event_and_kind() {
        let listener = recorded();
        assert_eq!(listener.for_event(2).count(), 2);
        assert_eq!(listener.of_kind(EventKind::BeforeAction).count(), 2);
        assert_eq!(listener.issues().count(), 1);
    }

    #[test]
    fn test_pair() {
        let listener = recorded();
        let (before, after) = listener.pair(1).unwrap();
        assert_eq!(before.kind(), EventKind::BeforeAction);
        assert_eq!(after.kind(), EventKind::AfterAction);
        assert_eq!(after.elapsed(), Some(Duration::from_millis(30)));

        let (_, after) = listener.pair(2).unwrap();
        assert_eq!(after.elapsed(), Some(Duration::from_millis(2)));
    }

    #[test]
    fn test_pair_unclosed() {
        assert!(recorded().pair(3).is_none());
        assert!(recorded().pair(99).is_none());
    }

    #[test]
    fn test_clear_and_into_events() {
        let mut listener = recorded();
        let events = listener.clone().into_events();
        assert_eq!(events.len(), 6);
        listener.clear();
        assert!(listener.is_empty());
    }

    #[test]
    fn test_closure_listener() {
        let mut lines = Vec::new();
        {
            let mut sink = |e: &DriverEvent| lines.push(e.to_string());
            let mut session = EventSession::new();
            sink.on_event(&session.record(EventKind::BeforeGather, 1, Command::GetPageSource));
        }
        assert_eq!(lines.len(), 1);
        assert!(lines[0].contains("type:BeforeGather"));
    }
}

//! Mock implementations for testing without a real directory or screen.
//!
//! # Available Mocks
//!
//! | Mock | Trait | Purpose |
//! |------|-------|---------|
//! | [`MockClock`] | [`Clock`] | Controllable time source |
//! | [`MockDirectory`] | [`StationDirectory`] | In-memory station lists per line |
//! | [`MockDisplay`] | [`AnnouncementDisplay`] | Records rendered snapshots |
//!
//! # Example
//!
//! ```rust
//! use rs_nextstop::hal::{MockClock, MockDirectory, MockDisplay};
//! use rs_nextstop::station::{Line, LocalizedNames, Station};
//! use rs_nextstop::traits::Clock;
//! use rs_nextstop::{AnnouncementController, Config, JourneySelection};
//!
//! let stations = vec![
//!     Station::new(1, 1, LocalizedNames::base("A")),
//!     Station::new(2, 2, LocalizedNames::base("B")),
//! ];
//! let directory = MockDirectory::new().with_line(7, stations);
//! let mut controller = AnnouncementController::new(directory, &Config::default());
//! let mut clock = MockClock::new();
//! let mut display = MockDisplay::new();
//!
//! controller
//!     .start_journey(JourneySelection::new(Line::linear(7), 1).with_bound(2), clock.now_ms())
//!     .unwrap();
//! controller.render_to(&mut display).unwrap();
//! // First stop: the destination sits between the bound particles.
//! assert_eq!(display.last().unwrap().station_text, "B");
//!
//! clock.advance(3000);
//! controller.update(clock.now_ms());
//! ```
//!
//! [`Clock`]: crate::traits::Clock
//! [`StationDirectory`]: crate::traits::StationDirectory
//! [`AnnouncementDisplay`]: crate::traits::AnnouncementDisplay

use alloc::collections::BTreeMap;
use alloc::vec::Vec;

use crate::snapshot::AnnouncementSnapshot;
use crate::station::{Line, LineId, Station};
use crate::traits::{AnnouncementDisplay, Clock, StationDirectory};

// ============================================================================
// Clock
// ============================================================================

/// Mock clock for testing time-based behavior.
///
/// Allows manual control of time progression for deterministic tests.
///
/// # Example
///
/// ```rust
/// use rs_nextstop::hal::MockClock;
/// use rs_nextstop::traits::Clock;
///
/// let mut clock = MockClock::new();
/// clock.set(1000);
/// clock.advance(500);
/// assert_eq!(clock.now_ms(), 1500);
/// ```
#[derive(Debug, Default)]
pub struct MockClock {
    current_ms: u64,
}

impl MockClock {
    /// Creates a new mock clock starting at 0ms.
    pub fn new() -> Self {
        Self { current_ms: 0 }
    }

    /// Sets the current time in milliseconds.
    pub fn set(&mut self, ms: u64) {
        self.current_ms = ms;
    }

    /// Advances the clock by the given duration.
    pub fn advance(&mut self, ms: u64) {
        self.current_ms += ms;
    }
}

impl Clock for MockClock {
    fn now_ms(&self) -> u64 {
        self.current_ms
    }
}

// ============================================================================
// Directory
// ============================================================================

/// Lookup error from [`MockDirectory`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
#[error("no stations registered for line {0}")]
pub struct UnknownLine(pub LineId);

/// In-memory station directory keyed by line id.
#[derive(Debug, Default)]
pub struct MockDirectory {
    lines: BTreeMap<LineId, Vec<Station>>,
}

impl MockDirectory {
    /// Creates an empty directory.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers the stations of a line.
    pub fn with_line(mut self, line_id: LineId, stations: Vec<Station>) -> Self {
        self.lines.insert(line_id, stations);
        self
    }
}

impl StationDirectory for MockDirectory {
    type Error = UnknownLine;

    fn stations_for_journey(&self, line: &Line) -> Result<Vec<Station>, UnknownLine> {
        self.lines.get(&line.id).cloned().ok_or(UnknownLine(line.id))
    }
}

// ============================================================================
// Display
// ============================================================================

/// Mock display that records every rendered snapshot.
///
/// # Example
///
/// ```
/// use rs_nextstop::hal::MockDisplay;
/// use rs_nextstop::traits::AnnouncementDisplay;
/// use rs_nextstop::AnnouncementSnapshot;
///
/// let mut display = MockDisplay::new();
/// display.render(&AnnouncementSnapshot::default()).unwrap();
/// assert_eq!(display.render_count(), 1);
/// ```
#[derive(Debug, Default)]
pub struct MockDisplay {
    /// Every snapshot rendered since the last clear, oldest first.
    pub rendered: Vec<AnnouncementSnapshot>,
    /// Number of times clear() was called.
    pub clear_count: usize,
}

impl MockDisplay {
    /// Creates a new mock display.
    pub fn new() -> Self {
        Self::default()
    }

    /// The most recently rendered snapshot.
    pub fn last(&self) -> Option<&AnnouncementSnapshot> {
        self.rendered.last()
    }

    /// Number of renders since the last clear.
    pub fn render_count(&self) -> usize {
        self.rendered.len()
    }
}

impl AnnouncementDisplay for MockDisplay {
    type Error = ();

    fn clear(&mut self) -> Result<(), ()> {
        self.rendered.clear();
        self.clear_count += 1;
        Ok(())
    }

    fn render(&mut self, snapshot: &AnnouncementSnapshot) -> Result<(), ()> {
        self.rendered.push(snapshot.clone());
        Ok(())
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::station::LocalizedNames;

    #[test]
    fn mock_clock_advances() {
        let mut clock = MockClock::new();
        assert_eq!(clock.now_ms(), 0);
        clock.advance(250);
        clock.advance(250);
        assert_eq!(clock.now_ms(), 500);
        clock.set(10);
        assert_eq!(clock.now_ms(), 10);
    }

    #[test]
    fn mock_directory_lookup() {
        let directory = MockDirectory::new()
            .with_line(1, alloc::vec![Station::new(5, 5, LocalizedNames::base("A"))]);
        assert_eq!(directory.stations_for_journey(&Line::linear(1)).unwrap()[0].id, 5);
        assert_eq!(
            directory.stations_for_journey(&Line::linear(2)),
            Err(UnknownLine(2))
        );
    }

    #[test]
    fn mock_display_records_and_clears() {
        let mut display = MockDisplay::new();
        let snapshot = AnnouncementSnapshot {
            station_text: "A".into(),
            ..AnnouncementSnapshot::default()
        };
        display.render(&snapshot).unwrap();
        display.render(&snapshot).unwrap();
        assert_eq!(display.render_count(), 2);
        assert_eq!(display.last().map(|s| s.station_text.as_str()), Some("A"));
        display.clear().unwrap();
        assert_eq!(display.render_count(), 0);
        assert_eq!(display.clear_count, 1);
    }
}

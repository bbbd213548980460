//! Announcement controller that ties everything together.
//!
//! This module provides [`AnnouncementController`], the single owner of the
//! header state. It:
//!
//! - Fetches the journey's stations from a [`StationDirectory`]
//! - Accepts arrival/approach signals from the detector
//! - Runs the one rotation timer (polled via [`AnnouncementController::update`])
//! - Recomputes the [`AnnouncementSnapshot`] whenever an input changes
//!
//! # Example
//!
//! ```rust
//! use rs_nextstop::{
//!     AnnouncementController, Config, DetectorUpdate, JourneySelection, Language, Phase,
//!     hal::MockDirectory,
//!     station::{Line, LocalizedNames, Station},
//! };
//!
//! let stations = vec![
//!     Station::new(1, 1, LocalizedNames::base("新宿").with_roman("Shinjuku")),
//!     Station::new(2, 2, LocalizedNames::base("代々木").with_roman("Yoyogi")),
//!     Station::new(3, 3, LocalizedNames::base("原宿").with_roman("Harajuku")),
//! ];
//! let directory = MockDirectory::new().with_line(1, stations);
//! let mut controller = AnnouncementController::new(directory, &Config::default());
//!
//! controller
//!     .start_journey(JourneySelection::new(Line::linear(1), 1).with_bound(3), 0)
//!     .unwrap();
//!
//! // Departed and approaching the next stop
//! controller.apply_signal(DetectorUpdate::new(Some(1), false, true), 0);
//!
//! // Main loop - call update() every tick
//! for now_ms in (0..=3000).step_by(20) {
//!     controller.update(now_ms);
//! }
//!
//! let snapshot = controller.snapshot();
//! assert_eq!(snapshot.phase, Phase::Arriving);
//! assert_eq!(snapshot.language, Language::Base);
//! assert_eq!(snapshot.station_text, "代々木");
//! ```

use alloc::vec::Vec;

use crate::config::Config;
use crate::language::{EnabledLanguages, HeaderState, Phase};
use crate::machine::PhaseMachine;
use crate::resolver::{TextInput, TextResolver};
use crate::snapshot::AnnouncementSnapshot;
use crate::state::{is_last_stop, left_stations, upcoming_stop, JourneyState, NavigationState, Route};
use crate::station::{Line, LoopDirection, Station, StationId, TrainType};
use crate::timer::{RotationTimer, TimerMode, TimerToken};
use crate::topology::{BoundResolver, LoopCatalog};
use crate::traits::{AnnouncementDisplay, StationDirectory};

/// What the rider picked when starting a journey.
#[derive(Clone, Debug)]
pub struct JourneySelection {
    /// Line being ridden.
    pub line: Line,
    /// Train type, if known.
    pub train_type: Option<TrainType>,
    /// Station the journey starts at.
    pub origin: StationId,
    /// Destination, if selected.
    pub bound: Option<StationId>,
    /// Direction of travel on loop lines.
    pub direction: LoopDirection,
}

impl JourneySelection {
    /// Journey on `line` starting at `origin`, no bound selected.
    pub fn new(line: Line, origin: StationId) -> Self {
        Self {
            line,
            train_type: None,
            origin,
            bound: None,
            direction: LoopDirection::default(),
        }
    }

    /// Set the selected bound
    pub fn with_bound(mut self, bound: StationId) -> Self {
        self.bound = Some(bound);
        self
    }

    /// Set the loop direction
    pub fn with_direction(mut self, direction: LoopDirection) -> Self {
        self.direction = direction;
        self
    }

    /// Set the train type
    pub fn with_train_type(mut self, train_type: TrainType) -> Self {
        self.train_type = Some(train_type);
        self
    }
}

/// One atomic input from the arrival/approach detector.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DetectorUpdate {
    /// Station the train is at or last passed; `None` keeps the current one.
    pub station: Option<StationId>,
    /// Train is stopped at `station`.
    pub arrived: bool,
    /// Train is approaching the next stop.
    pub approaching: bool,
}

impl DetectorUpdate {
    /// Create an update
    pub fn new(station: Option<StationId>, arrived: bool, approaching: bool) -> Self {
        Self {
            station,
            arrived,
            approaching,
        }
    }
}

/// Main announcement controller.
///
/// Single writer of [`NavigationState`] and [`JourneyState`]. Everything is
/// synchronous: each call processes one input to completion and leaves a
/// fresh snapshot behind.
///
/// # Type Parameter
///
/// - `D`: The station directory ([`StationDirectory`] trait)
///
/// # Thread Safety
///
/// The controller is not thread-safe and does not need to be: feed it from
/// one event loop. Wrap it in a mutex if several threads must reach it.
pub struct AnnouncementController<D: StationDirectory> {
    directory: D,
    machine: PhaseMachine,
    timer: RotationTimer,
    bounds: BoundResolver,
    text: TextResolver,
    idle_rotation: bool,
    first_stop_layout: bool,
    navigation: NavigationState,
    journey: JourneyState,
    route: Option<Route>,
    snapshot: AnnouncementSnapshot,
}

impl<D: StationDirectory> AnnouncementController<D> {
    /// Create a controller with no active journey
    pub fn new(directory: D, config: &Config) -> Self {
        let config = config.clone().sanitized();
        let announcement = &config.announcement;
        let machine = PhaseMachine::new(announcement.locale).with_policy(announcement.rotation);
        let text = TextResolver::new(config.labels.clone(), config.display.app_name.as_str())
            .with_single_line_labels(config.display.single_line_labels)
            .with_bus_parenthesis_stripping(config.display.strip_bus_parentheses);
        let snapshot = AnnouncementSnapshot::placeholder(machine.state(), text.app_name());

        Self {
            directory,
            timer: RotationTimer::new(announcement.transition_interval_ms),
            bounds: BoundResolver::new(
                LoopCatalog::default(),
                usize::from(announcement.max_loop_bound_points),
            ),
            text,
            idle_rotation: announcement.idle_rotation,
            first_stop_layout: config.display.first_stop_layout,
            navigation: NavigationState {
                header_state: machine.state(),
                enabled_languages: announcement.enabled_languages.clone(),
                left_stations: Vec::new(),
            },
            journey: JourneyState::default(),
            route: None,
            snapshot,
            machine,
        }
    }

    /// Use `catalog` for lines that carry no loop flag themselves
    pub fn with_loop_catalog(mut self, catalog: LoopCatalog) -> Self {
        self.bounds = BoundResolver::new(catalog, self.bounds.max_points());
        self
    }

    /// Start a journey: load its stations and reset to `(CURRENT, default)`.
    ///
    /// The train is taken to be stopped at the origin. Unknown origin or
    /// bound ids are logged and left unset.
    pub fn start_journey(
        &mut self,
        selection: JourneySelection,
        now_ms: u64,
    ) -> Result<&AnnouncementSnapshot, D::Error> {
        let stations = self.directory.stations_for_journey(&selection.line)?;
        let route = Route {
            stations,
            line: selection.line,
            train_type: selection.train_type,
        };

        let station = route.find(selection.origin).cloned();
        if station.is_none() {
            tracing::warn!(
                "origin station {} not on line {}",
                selection.origin,
                route.line.id
            );
        }
        let selected_bound = selection.bound.and_then(|id| {
            let found = route.find(id).cloned();
            if found.is_none() {
                tracing::warn!("bound station {} not on line {}", id, route.line.id);
            }
            found
        });
        tracing::debug!(
            "journey started on line {} ({} stations)",
            route.line.id,
            route.stations.len()
        );

        self.journey = JourneyState {
            origin: station.as_ref().map(|s| s.group_id),
            station,
            next_station: None,
            selected_bound,
            selected_direction: selection.direction,
            arrived: true,
            approaching: false,
        };
        self.route = Some(route);
        self.derive();
        self.reset_to_current(now_ms);
        Ok(&self.snapshot)
    }

    /// Change the selected bound (and loop direction), resetting to CURRENT.
    pub fn select_bound(
        &mut self,
        bound: Option<StationId>,
        direction: LoopDirection,
        now_ms: u64,
    ) -> &AnnouncementSnapshot {
        if let Some(route) = &self.route {
            self.journey.selected_bound = bound.and_then(|id| route.find(id).cloned());
        }
        self.journey.selected_direction = direction;
        self.derive();
        self.reset_to_current(now_ms)
    }

    /// Apply one detector update.
    pub fn apply_signal(&mut self, update: DetectorUpdate, now_ms: u64) -> &AnnouncementSnapshot {
        if self.route.is_none() {
            tracing::trace!("detector update without an active journey");
            return &self.snapshot;
        }
        if let Some(id) = update.station {
            self.move_current(id);
        }
        self.journey.arrived = update.arrived;
        self.journey.approaching = update.approaching;
        self.derive();

        if self.journey.arrived {
            let before = self.machine.state();
            if self.machine.on_arrived(self.journey.station.as_ref()) != before {
                // Restart any idle schedule from the reset.
                self.timer.cancel();
            }
        }
        self.sync_timer(now_ms);
        self.refresh();
        &self.snapshot
    }

    /// Set the `arrived` flag, keeping everything else.
    pub fn set_arrived(&mut self, arrived: bool, now_ms: u64) -> &AnnouncementSnapshot {
        let update = DetectorUpdate::new(None, arrived, self.journey.approaching);
        self.apply_signal(update, now_ms)
    }

    /// Set the `approaching` flag, keeping everything else.
    pub fn set_approaching(&mut self, approaching: bool, now_ms: u64) -> &AnnouncementSnapshot {
        let update = DetectorUpdate::new(None, self.journey.arrived, approaching);
        self.apply_signal(update, now_ms)
    }

    /// Move the current station, keeping the flags.
    pub fn move_to(&mut self, station: StationId, now_ms: u64) -> &AnnouncementSnapshot {
        let update = DetectorUpdate::new(Some(station), self.journey.arrived, self.journey.approaching);
        self.apply_signal(update, now_ms)
    }

    /// Poll the rotation timer - call every loop iteration
    ///
    /// Returns true if a tick changed the header state.
    pub fn update(&mut self, now_ms: u64) -> bool {
        match self.timer.poll(now_ms) {
            Some(token) => self.fire(token),
            None => false,
        }
    }

    /// Deliver a timer tick. Stale tokens are ignored.
    ///
    /// Returns true if the header state changed.
    pub fn fire(&mut self, token: TimerToken) -> bool {
        if !self.timer.accept(token) {
            return false;
        }
        let before = self.machine.state();
        let enabled = &self.navigation.enabled_languages;
        let upcoming = self.journey.next_station.as_ref();
        match token.mode() {
            TimerMode::Approach => {
                if self.journey.approaching && !self.journey.arrived {
                    self.machine.on_approach_tick(enabled, upcoming);
                }
            }
            TimerMode::Idle => {
                let displayed = match before.phase {
                    Phase::Current => self.journey.station.as_ref(),
                    Phase::Arriving | Phase::Next => upcoming,
                };
                self.machine
                    .on_idle_tick(enabled, self.journey.arrived, upcoming, displayed);
            }
        }
        self.refresh();
        self.machine.state() != before
    }

    /// Force `(CURRENT, locale default)` and restart the timer.
    ///
    /// Used when the rider changes bound or journey.
    pub fn reset_to_current(&mut self, now_ms: u64) -> &AnnouncementSnapshot {
        self.machine.reset();
        self.timer.cancel();
        self.sync_timer(now_ms);
        self.refresh();
        &self.snapshot
    }

    /// End the journey. The timer is cancelled; ticks already handed out
    /// become no-ops.
    pub fn teardown(&mut self) {
        self.timer.cancel();
        self.route = None;
        self.journey = JourneyState::default();
        self.navigation.left_stations.clear();
        self.machine.reset();
        self.refresh();
        tracing::debug!("journey torn down");
    }

    /// Replace the enabled language list.
    pub fn set_enabled_languages(&mut self, languages: EnabledLanguages) -> &AnnouncementSnapshot {
        self.navigation.enabled_languages = languages;
        self.refresh();
        &self.snapshot
    }

    /// Render the current snapshot.
    pub fn render_to<R: AnnouncementDisplay>(&self, display: &mut R) -> Result<(), R::Error> {
        display.render(&self.snapshot)
    }

    /// Latest snapshot.
    pub fn snapshot(&self) -> &AnnouncementSnapshot {
        &self.snapshot
    }

    /// Current header state.
    pub fn header_state(&self) -> HeaderState {
        self.machine.state()
    }

    /// Navigation state (read-only).
    pub fn navigation(&self) -> &NavigationState {
        &self.navigation
    }

    /// Journey state (read-only).
    pub fn journey(&self) -> &JourneyState {
        &self.journey
    }

    /// Active route, if a journey is running.
    pub fn route(&self) -> Option<&Route> {
        self.route.as_ref()
    }

    /// Mode of the armed timer, if any.
    pub fn timer_mode(&self) -> Option<TimerMode> {
        self.timer.mode()
    }

    /// Get a reference to the directory
    pub fn directory(&self) -> &D {
        &self.directory
    }

    fn move_current(&mut self, id: StationId) {
        if self.journey.station.as_ref().is_some_and(|s| s.id == id) {
            return;
        }
        let Some(station) = self.route.as_ref().and_then(|r| r.find(id)).cloned() else {
            tracing::warn!("ignoring unknown station {}", id);
            return;
        };
        if self.journey.origin.is_some_and(|g| g != station.group_id) {
            self.journey.origin = None;
        }
        self.journey.station = Some(station);
    }

    /// Recompute left stations and the upcoming stop.
    fn derive(&mut self) {
        let Some(route) = &self.route else {
            self.navigation.left_stations.clear();
            self.journey.next_station = None;
            return;
        };
        let topology = self.bounds.loop_service(&route.line, route.train_type.as_ref());
        let left: Vec<&Station> = match &self.journey.station {
            Some(current) => left_stations(
                &route.stations,
                current,
                topology,
                self.journey.selected_direction,
            ),
            None => Vec::new(),
        };
        self.journey.next_station = upcoming_stop(&left).cloned();
        self.navigation.left_stations = left.into_iter().cloned().collect();
    }

    fn sync_timer(&mut self, now_ms: u64) {
        let mode = if self.route.is_none() {
            None
        } else if self.journey.approaching && !self.journey.arrived {
            Some(TimerMode::Approach)
        } else if self.idle_rotation {
            Some(TimerMode::Idle)
        } else {
            None
        };
        match mode {
            Some(mode) => {
                self.timer.arm(mode, now_ms);
            }
            None => self.timer.cancel(),
        }
    }

    fn refresh(&mut self) {
        let state = self.machine.state();
        self.navigation.header_state = state;

        let snapshot = match &self.route {
            None => AnnouncementSnapshot::placeholder(state, self.text.app_name()),
            Some(route) => {
                let journey = &self.journey;
                let is_loop = self
                    .bounds
                    .loop_service(&route.line, route.train_type.as_ref())
                    .is_some();
                let bound = self.bounds.resolve(
                    &route.stations,
                    journey.station.as_ref(),
                    &route.line,
                    route.train_type.as_ref(),
                    journey.selected_direction,
                    journey.selected_bound.as_ref(),
                );
                let input = TextInput {
                    state,
                    station: journey.station.as_ref(),
                    next_station: journey.next_station.as_ref(),
                    bound,
                    is_last_stop: is_last_stop(
                        &route.stations,
                        journey.next_station.as_ref(),
                        journey.selected_bound.as_ref(),
                        is_loop,
                    ),
                    is_first_stop: self.first_stop_layout && journey.is_first_stop(),
                    transport: route.line.transport,
                };
                self.text.resolve(&input, Some(&self.snapshot))
            }
        };
        self.snapshot = snapshot;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hal::MockDirectory;
    use crate::language::Language;
    use crate::station::LocalizedNames;
    use alloc::vec;

    fn directory() -> MockDirectory {
        MockDirectory::new().with_line(
            1,
            vec![
                Station::new(1, 1, LocalizedNames::base("A").with_phonetic("エー").with_roman("A")),
                Station::new(2, 2, LocalizedNames::base("B").with_phonetic("ビー").with_roman("B")),
                Station::new(3, 3, LocalizedNames::base("C").with_phonetic("シー").with_roman("C")),
            ],
        )
    }

    fn started() -> AnnouncementController<MockDirectory> {
        let mut controller = AnnouncementController::new(directory(), &Config::default());
        controller
            .start_journey(JourneySelection::new(Line::linear(1), 1).with_bound(3), 0)
            .unwrap();
        controller
    }

    #[test]
    fn no_journey_shows_placeholder() {
        let controller = AnnouncementController::new(directory(), &Config::default());
        assert_eq!(controller.snapshot().bound_text, crate::resolver::DEFAULT_APP_NAME);
        assert!(controller.timer_mode().is_none());
    }

    #[test]
    fn unknown_line_is_an_error() {
        let mut controller = AnnouncementController::new(directory(), &Config::default());
        assert!(controller
            .start_journey(JourneySelection::new(Line::linear(9), 1), 0)
            .is_err());
    }

    #[test]
    fn journey_start_derives_upcoming_stop() {
        let controller = started();
        assert_eq!(controller.journey().next_station.as_ref().map(|s| s.id), Some(2));
        assert_eq!(controller.navigation().left_stations.len(), 2);
        assert!(controller.snapshot().is_first_stop);
    }

    #[test]
    fn approach_arms_and_arrival_cancels() {
        let mut controller = started();
        controller.apply_signal(DetectorUpdate::new(Some(1), false, true), 0);
        assert_eq!(controller.timer_mode(), Some(TimerMode::Approach));
        controller.apply_signal(DetectorUpdate::new(Some(2), true, false), 100);
        assert!(controller.timer_mode().is_none());
    }

    #[test]
    fn idle_rotation_arms_when_enabled() {
        let config = Config::default().with_announcement(
            crate::config::AnnouncementConfig::default().with_idle_rotation(true),
        );
        let mut controller = AnnouncementController::new(directory(), &config);
        controller
            .start_journey(JourneySelection::new(Line::linear(1), 1).with_bound(3), 0)
            .unwrap();
        assert_eq!(controller.timer_mode(), Some(TimerMode::Idle));
        assert!(controller.update(3000));
        assert_eq!(controller.header_state().language, Language::Phonetic);
    }

    #[test]
    fn stale_token_after_teardown_is_noop() {
        let mut controller = started();
        controller.apply_signal(DetectorUpdate::new(Some(1), false, true), 0);
        let token = controller.timer.poll(3000).unwrap();
        controller.teardown();
        assert!(!controller.fire(token));
        assert_eq!(controller.header_state().phase, Phase::Current);
    }

    #[test]
    fn arrival_from_next_resets_and_drops_pending_tick() {
        let config = Config::default().with_announcement(
            crate::config::AnnouncementConfig::default()
                .with_idle_rotation(true)
                .with_locale(crate::language::Locale::Foreign),
        );
        let mut controller = AnnouncementController::new(directory(), &config);
        controller
            .start_journey(JourneySelection::new(Line::linear(1), 1).with_bound(3), 0)
            .unwrap();
        controller.set_arrived(false, 500);
        assert!(controller.update(3000));
        assert!(controller.update(6000));
        assert_eq!(
            controller.header_state(),
            HeaderState::new(Phase::Next, Language::Base)
        );

        let pending = controller.timer.poll(9000).unwrap();
        controller.move_to(2, 9100);
        controller.set_arrived(true, 9200);
        assert_eq!(
            controller.header_state(),
            HeaderState::new(Phase::Current, Language::Roman)
        );
        assert!(!controller.fire(pending));
        assert!(!controller.update(12_000));
        assert_eq!(controller.header_state().phase, Phase::Current);
    }

    #[test]
    fn unknown_station_update_is_ignored() {
        let mut controller = started();
        controller.move_to(42, 0);
        assert_eq!(controller.journey().station.as_ref().map(|s| s.id), Some(1));
    }
}

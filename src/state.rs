//! Navigation and journey state, and the values derived from them.
//!
//! Both records are written only by the controller. Renderers and other
//! readers get shared references.

use alloc::vec::Vec;

use crate::language::{EnabledLanguages, HeaderState};
use crate::station::{GroupId, Line, LoopDirection, LoopTopology, Station, TrainType};
use crate::topology::scan;

/// Header state, language settings and what lies ahead.
#[derive(Clone, Debug, Default)]
pub struct NavigationState {
    /// Active phase and language.
    pub header_state: HeaderState,
    /// Operator's rotation list.
    pub enabled_languages: EnabledLanguages,
    /// Stations ahead of the train, nearest first.
    pub left_stations: Vec<Station>,
}

/// Where the rider is and where they are going.
#[derive(Clone, Debug, Default)]
pub struct JourneyState {
    /// Current station.
    pub station: Option<Station>,
    /// Upcoming stop (first non-pass station ahead).
    pub next_station: Option<Station>,
    /// Destination chosen by the rider.
    pub selected_bound: Option<Station>,
    /// Direction of travel on loop lines.
    pub selected_direction: LoopDirection,
    /// Train is stopped at `station`.
    pub arrived: bool,
    /// Train is approaching `next_station`.
    pub approaching: bool,
    /// Group of the journey origin until the train leaves it.
    pub origin: Option<GroupId>,
}

impl JourneyState {
    /// Current station is the journey origin, a bound is selected, and the
    /// train is not yet approaching the next stop.
    pub fn is_first_stop(&self) -> bool {
        let at_origin = match (&self.station, self.origin) {
            (Some(station), Some(origin)) => station.group_id == origin,
            _ => false,
        };
        at_origin && self.selected_bound.is_some() && !self.approaching
    }
}

/// The active line and its ordered stations.
#[derive(Clone, Debug)]
pub struct Route {
    /// Stations in journey order.
    pub stations: Vec<Station>,
    /// The line being ridden.
    pub line: Line,
    /// Train type, if known.
    pub train_type: Option<TrainType>,
}

impl Route {
    /// Creates a route.
    pub fn new(line: Line, stations: Vec<Station>) -> Self {
        Self {
            stations,
            line,
            train_type: None,
        }
    }

    /// Sets the train type.
    pub fn with_train_type(mut self, train_type: TrainType) -> Self {
        self.train_type = Some(train_type);
        self
    }

    /// First station with the given id.
    pub fn find(&self, id: crate::station::StationId) -> Option<&Station> {
        self.stations.iter().find(|s| s.id == id)
    }
}

/// Stations ahead of `current`, nearest first.
///
/// Linear lines give the stations after `current` in journey order. Loops
/// give the rotation in `direction` (a partial loop stops at its ends).
/// Empty when `current` is not on the route.
pub fn left_stations<'a>(
    stations: &'a [Station],
    current: &Station,
    topology: Option<&LoopTopology>,
    direction: LoopDirection,
) -> Vec<&'a Station> {
    let Some(start) = stations.iter().position(|s| s.same_group(current)) else {
        return Vec::new();
    };
    match topology {
        Some(topology) => scan(stations, start, topology.kind, direction).collect(),
        None => stations[start + 1..].iter().collect(),
    }
}

/// First stopping station in `left`.
pub fn upcoming_stop<'a>(left: &[&'a Station]) -> Option<&'a Station> {
    left.iter().copied().find(|s| !s.is_pass())
}

/// Linear only: the upcoming stop is the selected bound or the last
/// stopping station of the route.
pub fn is_last_stop(
    stations: &[Station],
    upcoming: Option<&Station>,
    selected_bound: Option<&Station>,
    is_loop: bool,
) -> bool {
    if is_loop {
        return false;
    }
    let Some(upcoming) = upcoming else {
        return false;
    };
    if selected_bound.is_some_and(|bound| bound.same_group(upcoming)) {
        return true;
    }
    stations
        .iter()
        .rev()
        .find(|s| !s.is_pass())
        .is_some_and(|last| last.same_group(upcoming))
}

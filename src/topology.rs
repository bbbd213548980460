//! Loop topology resolution: which station a loop train is "bound for".
//!
//! Loop lines have no terminus, so the display names the nearest named
//! boundary point ahead of the train instead. Inbound travel walks the
//! station list by increasing index, outbound by decreasing index, both
//! modulo the list length. Partial loops never wrap.
//!
//! # Example
//!
//! ```rust
//! use rs_nextstop::station::{Line, LocalizedNames, LoopDirection, LoopTopology, Station};
//! use rs_nextstop::topology::{BoundResolver, ResolvedBound};
//!
//! let stations: Vec<Station> = (0..6)
//!     .map(|i| Station::new(i, 100 + i, LocalizedNames::base(format!("S{i}"))))
//!     .collect();
//! let line = Line::looped(1, LoopTopology::full([0, 3]));
//!
//! let resolver = BoundResolver::default();
//! let selected = Some(&stations[3]);
//! let bound = resolver.resolve(&stations, Some(&stations[5]), &line, None, LoopDirection::Inbound, selected);
//! match bound {
//!     ResolvedBound::Loop(points) => assert_eq!(points[0].id, 0), // wrapped past the end
//!     _ => unreachable!(),
//! }
//! ```

use alloc::collections::BTreeMap;
use alloc::string::String;
use alloc::vec::Vec;

use crate::language::Language;
use crate::station::{Line, LineId, LoopDirection, LoopKind, LoopTopology, Station, TrainType};

/// Upper bound on boundary points joined into one bound label.
pub const MAX_BOUND_POINTS: usize = 2;

/// What the bound text should name.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ResolvedBound<'a> {
    /// No bound selected; the display shows a placeholder.
    Unselected,
    /// Linear line: the selected destination.
    Terminal(&'a Station),
    /// Loop line: boundary points ahead, nearest first. Empty when the
    /// topology is inconsistent.
    Loop(Vec<&'a Station>),
}

impl ResolvedBound<'_> {
    /// True for loop bounds.
    pub fn is_loop(&self) -> bool {
        matches!(self, ResolvedBound::Loop(_))
    }

    /// Bare name(s) in `lang`, without affixes.
    ///
    /// `None` when any named station lacks `lang`. An empty loop bound
    /// yields `Some("")`.
    pub fn name(&self, lang: Language, separator: &str) -> Option<String> {
        let lang = lang.base_equivalent();
        match self {
            ResolvedBound::Unselected => None,
            ResolvedBound::Terminal(station) => station.name(lang).map(String::from),
            ResolvedBound::Loop(points) => {
                let mut out = String::new();
                for (index, point) in points.iter().enumerate() {
                    if index > 0 {
                        out.push_str(separator);
                    }
                    out.push_str(point.name(lang)?);
                }
                Some(out)
            }
        }
    }
}

/// Registry of known loop lines, used when a line record carries no loop flag.
#[derive(Clone, Debug, Default)]
pub struct LoopCatalog {
    lines: BTreeMap<LineId, LoopTopology>,
}

impl LoopCatalog {
    /// Creates an empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `line_id` as a loop
    pub fn register(&mut self, line_id: LineId, topology: LoopTopology) {
        self.lines.insert(line_id, topology);
    }

    /// Builder form of [`register`](Self::register).
    pub fn with_line(mut self, line_id: LineId, topology: LoopTopology) -> Self {
        self.register(line_id, topology);
        self
    }

    /// Loop topology for `line`: its own flag first, then the catalog.
    pub fn topology_for<'a>(&'a self, line: &'a Line) -> Option<&'a LoopTopology> {
        line.loop_topology().or_else(|| self.lines.get(&line.id))
    }
}

/// Resolves the bound for a journey position.
#[derive(Clone, Debug)]
pub struct BoundResolver {
    catalog: LoopCatalog,
    max_points: usize,
}

impl Default for BoundResolver {
    fn default() -> Self {
        Self::new(LoopCatalog::default(), 1)
    }
}

impl BoundResolver {
    /// Creates a resolver naming at most `max_points` boundary points.
    pub fn new(catalog: LoopCatalog, max_points: usize) -> Self {
        Self {
            catalog,
            max_points: max_points.clamp(1, MAX_BOUND_POINTS),
        }
    }

    /// The loop catalog in use.
    pub fn catalog(&self) -> &LoopCatalog {
        &self.catalog
    }

    /// Maximum boundary points named per bound.
    pub fn max_points(&self) -> usize {
        self.max_points
    }

    /// Loop topology if `line` is operated as a loop by `train_type`.
    ///
    /// Non-local services on a loop line run point to point and are
    /// treated as linear.
    pub fn loop_service<'a>(
        &'a self,
        line: &'a Line,
        train_type: Option<&TrainType>,
    ) -> Option<&'a LoopTopology> {
        if train_type.is_some_and(|tt| !tt.is_local()) {
            return None;
        }
        self.catalog.topology_for(line)
    }

    /// Decides what the bound text names.
    ///
    /// `selected_bound` is the rider's destination; without it the result
    /// is [`ResolvedBound::Unselected`] regardless of topology.
    pub fn resolve<'a>(
        &self,
        stations: &'a [Station],
        current: Option<&Station>,
        line: &Line,
        train_type: Option<&TrainType>,
        direction: LoopDirection,
        selected_bound: Option<&'a Station>,
    ) -> ResolvedBound<'a> {
        let Some(topology) = self.loop_service(line, train_type) else {
            return match selected_bound {
                Some(bound) => ResolvedBound::Terminal(bound),
                None => ResolvedBound::Unselected,
            };
        };
        if selected_bound.is_none() {
            return ResolvedBound::Unselected;
        }
        let Some(current) = current else {
            return ResolvedBound::Loop(Vec::new());
        };
        ResolvedBound::Loop(boundary_points(
            stations,
            current,
            topology,
            direction,
            self.max_points,
        ))
    }
}

/// Scans from `current` in `direction` for up to `limit` boundary points.
///
/// The current station's own group is skipped and each group is named at
/// most once. Returns an empty list when `current` is not on the line.
pub fn boundary_points<'a>(
    stations: &'a [Station],
    current: &Station,
    topology: &LoopTopology,
    direction: LoopDirection,
    limit: usize,
) -> Vec<&'a Station> {
    let mut found: Vec<&'a Station> = Vec::new();
    let Some(start) = stations.iter().position(|s| s.same_group(current)) else {
        tracing::debug!(
            "station {} not found on loop of {} stations",
            current.id,
            stations.len()
        );
        return found;
    };

    for station in scan(stations, start, topology.kind, direction) {
        if found.len() >= limit {
            break;
        }
        if !topology.is_boundary(station) || station.same_group(current) {
            continue;
        }
        if found.iter().any(|s| s.same_group(station)) {
            continue;
        }
        found.push(station);
    }

    if found.is_empty() {
        tracing::debug!("no boundary point reachable from station {}", current.id);
    }
    found
}

/// Stations after `start` in travel order, excluding `start` itself.
pub(crate) fn scan<'a>(
    stations: &'a [Station],
    start: usize,
    kind: LoopKind,
    direction: LoopDirection,
) -> impl Iterator<Item = &'a Station> + 'a {
    let len = stations.len();
    (1..len).filter_map(move |step| {
        let index = match (kind, direction) {
            (LoopKind::Full, LoopDirection::Inbound) => (start + step) % len,
            (LoopKind::Full, LoopDirection::Outbound) => (start + len - step) % len,
            (LoopKind::Partial, LoopDirection::Inbound) => start.checked_add(step).filter(|i| *i < len)?,
            (LoopKind::Partial, LoopDirection::Outbound) => start.checked_sub(step)?,
        };
        stations.get(index)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::station::LocalizedNames;
    use alloc::format;

    fn loop_stations(n: u32) -> Vec<Station> {
        (0..n)
            .map(|i| {
                Station::new(
                    i,
                    100 + i,
                    LocalizedNames::base(format!("駅{i}")).with_roman(format!("S{i}")),
                )
            })
            .collect()
    }

    #[test]
    fn inbound_wraps_from_last_index() {
        let stations = loop_stations(6);
        let topology = LoopTopology::full([0]);
        let points = boundary_points(&stations, &stations[5], &topology, LoopDirection::Inbound, 1);
        assert_eq!(points.len(), 1);
        assert_eq!(points[0].id, 0);
    }

    #[test]
    fn outbound_wraps_from_first_index() {
        let stations = loop_stations(6);
        let topology = LoopTopology::full([5, 2]);
        let points = boundary_points(&stations, &stations[0], &topology, LoopDirection::Outbound, 1);
        assert_eq!(points[0].id, 5);
    }

    #[test]
    fn current_station_is_never_its_own_bound() {
        let stations = loop_stations(6);
        let topology = LoopTopology::full([2, 4]);
        let points = boundary_points(&stations, &stations[2], &topology, LoopDirection::Inbound, 1);
        assert_eq!(points[0].id, 4);
    }

    #[test]
    fn collects_up_to_limit_in_scan_order() {
        let stations = loop_stations(8);
        let topology = LoopTopology::full([1, 3, 6]);
        let points = boundary_points(&stations, &stations[5], &topology, LoopDirection::Inbound, 2);
        let ids: Vec<u32> = points.iter().map(|s| s.id).collect();
        assert_eq!(ids, [6, 1]);
    }

    #[test]
    fn missing_current_station_gives_empty_bound() {
        let stations = loop_stations(4);
        let stranger = Station::new(99, 999, LocalizedNames::base("X"));
        let topology = LoopTopology::full([0]);
        assert!(boundary_points(&stations, &stranger, &topology, LoopDirection::Inbound, 1).is_empty());
    }

    #[test]
    fn no_boundary_points_gives_empty_bound() {
        let stations = loop_stations(4);
        let topology = LoopTopology::full(Vec::new());
        assert!(boundary_points(&stations, &stations[1], &topology, LoopDirection::Outbound, 1).is_empty());
    }

    #[test]
    fn partial_loop_does_not_wrap() {
        let stations = loop_stations(6);
        let topology = LoopTopology::partial([0]);
        assert!(boundary_points(&stations, &stations[4], &topology, LoopDirection::Inbound, 1).is_empty());
        let points = boundary_points(&stations, &stations[4], &topology, LoopDirection::Outbound, 1);
        assert_eq!(points[0].id, 0);
    }

    #[test]
    fn linear_line_returns_selected_bound() {
        let stations = loop_stations(3);
        let resolver = BoundResolver::default();
        let bound = resolver.resolve(
            &stations,
            Some(&stations[0]),
            &Line::linear(1),
            None,
            LoopDirection::Inbound,
            Some(&stations[2]),
        );
        assert_eq!(bound, ResolvedBound::Terminal(&stations[2]));
        assert_eq!(bound.name(Language::Roman, " & ").as_deref(), Some("S2"));
    }

    #[test]
    fn non_local_train_on_loop_is_linear() {
        let stations = loop_stations(6);
        let line = Line::looped(1, LoopTopology::full([0]));
        let resolver = BoundResolver::default();
        let rapid = TrainType::new(102);
        let bound = resolver.resolve(
            &stations,
            Some(&stations[2]),
            &line,
            Some(&rapid),
            LoopDirection::Inbound,
            Some(&stations[5]),
        );
        assert_eq!(bound, ResolvedBound::Terminal(&stations[5]));
    }

    #[test]
    fn catalog_supplies_topology_for_unflagged_line() {
        let stations = loop_stations(6);
        let catalog = LoopCatalog::new().with_line(7, LoopTopology::full([3]));
        let resolver = BoundResolver::new(catalog, 1);
        let bound = resolver.resolve(
            &stations,
            Some(&stations[1]),
            &Line::linear(7),
            None,
            LoopDirection::Inbound,
            Some(&stations[3]),
        );
        assert!(bound.is_loop());
        assert_eq!(bound.name(Language::Base, "・").as_deref(), Some("駅3"));
    }

    #[test]
    fn loop_name_joins_points_and_fails_on_missing_language() {
        let stations = loop_stations(6);
        let bound = ResolvedBound::Loop(alloc::vec![&stations[1], &stations[4]]);
        assert_eq!(bound.name(Language::Roman, " & ").as_deref(), Some("S1 & S4"));
        assert_eq!(bound.name(Language::IntlA, "・"), None);
        assert_eq!(ResolvedBound::Loop(Vec::new()).name(Language::Base, "・").as_deref(), Some(""));
    }
}

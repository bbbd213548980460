//! Station, line and train type records consumed from the station directory.
//!
//! These are plain data. Every localized name is optional: stations
//! routinely lack one or both international names, and text resolution
//! treats absence as "nothing to show" rather than an error.

use alloc::string::String;
use alloc::vec::Vec;

use crate::language::Language;

/// Station identifier (unique per operator line).
pub type StationId = u32;

/// Platform group identifier, shared by stations that are the same
/// physical place across operators.
pub type GroupId = u32;

/// Line identifier.
pub type LineId = u32;

/// Per-language display names.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct LocalizedNames {
    /// Name as written in the base language.
    pub base: Option<String>,
    /// Phonetic (katakana) reading.
    pub phonetic: Option<String>,
    /// Romanized name.
    pub roman: Option<String>,
    /// First international language name.
    pub intl_a: Option<String>,
    /// Second international language name.
    pub intl_b: Option<String>,
}

impl LocalizedNames {
    /// Names with only the base-language name set.
    pub fn base(name: impl Into<String>) -> Self {
        Self {
            base: Some(name.into()),
            ..Self::default()
        }
    }

    /// Set the phonetic reading
    pub fn with_phonetic(mut self, name: impl Into<String>) -> Self {
        self.phonetic = Some(name.into());
        self
    }

    /// Set the romanized name
    pub fn with_roman(mut self, name: impl Into<String>) -> Self {
        self.roman = Some(name.into());
        self
    }

    /// Set the first international name
    pub fn with_intl_a(mut self, name: impl Into<String>) -> Self {
        self.intl_a = Some(name.into());
        self
    }

    /// Set the second international name
    pub fn with_intl_b(mut self, name: impl Into<String>) -> Self {
        self.intl_b = Some(name.into());
        self
    }

    /// Raw name for `lang`, `None` when absent or empty.
    ///
    /// Phonetic names are returned as stored; kana folding happens at
    /// display time.
    pub fn get(&self, lang: Language) -> Option<&str> {
        let name = match lang {
            Language::Base => self.base.as_deref(),
            Language::Phonetic => self.phonetic.as_deref(),
            Language::Roman => self.roman.as_deref(),
            Language::IntlA => self.intl_a.as_deref(),
            Language::IntlB => self.intl_b.as_deref(),
        };
        name.filter(|n| !n.is_empty())
    }

    /// True if a non-empty name exists for `lang`.
    pub fn has(&self, lang: Language) -> bool {
        self.get(lang).is_some()
    }
}

/// Whether and when trains stop at a station.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum StopCondition {
    /// Every train stops.
    #[default]
    All,
    /// The train does not stop (pass-through).
    Not,
    /// Some trains stop.
    Partial,
    /// Stops on weekdays only.
    Weekday,
    /// Stops on holidays only.
    Holiday,
    /// Partial-platform stop.
    PartialStop,
}

/// Station-number badge. Carried for the numbering subsystem only.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StationNumber {
    /// Badge code, e.g. `JY17`.
    pub code: String,
    /// Line symbol shape name.
    pub shape: String,
    /// Badge color (`#RRGGBB`).
    pub color: String,
}

/// A station in a journey.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Station {
    /// Station identifier.
    pub id: StationId,
    /// Platform group identifier.
    pub group_id: GroupId,
    /// Localized names.
    #[cfg_attr(feature = "serde", serde(default))]
    pub names: LocalizedNames,
    /// Train does not stop here.
    #[cfg_attr(feature = "serde", serde(default))]
    pub pass: bool,
    /// Stop-pattern tag.
    #[cfg_attr(feature = "serde", serde(default))]
    pub stop_condition: StopCondition,
    /// Station-number badges.
    #[cfg_attr(feature = "serde", serde(default))]
    pub numbers: Vec<StationNumber>,
}

impl Station {
    /// Creates a stopping station.
    pub fn new(id: StationId, group_id: GroupId, names: LocalizedNames) -> Self {
        Self {
            id,
            group_id,
            names,
            ..Self::default()
        }
    }

    /// Marks the station as pass-through
    pub fn passing(mut self) -> Self {
        self.pass = true;
        self
    }

    /// Set the stop condition
    pub fn with_stop_condition(mut self, condition: StopCondition) -> Self {
        self.stop_condition = condition;
        self
    }

    /// True if the train does not stop here.
    pub fn is_pass(&self) -> bool {
        self.pass || self.stop_condition == StopCondition::Not
    }

    /// Name for `lang`, `None` when absent or empty.
    pub fn name(&self, lang: Language) -> Option<&str> {
        self.names.get(lang)
    }

    /// True if both stations share a platform group.
    pub fn same_group(&self, other: &Station) -> bool {
        self.group_id == other.group_id
    }
}

/// Travel direction on a loop line.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum LoopDirection {
    /// Increasing station index, wrapping at the end.
    #[default]
    Inbound,
    /// Decreasing station index, wrapping at the start.
    Outbound,
}

/// How far a loop scan may travel.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum LoopKind {
    /// Full circuit; scans wrap around the station list.
    #[default]
    Full,
    /// Loop-shaped line whose services never wrap; scans stop at the ends.
    Partial,
}

/// Loop metadata: which stations serve as "bound for" labels.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LoopTopology {
    /// Wrapping behaviour.
    #[cfg_attr(feature = "serde", serde(default))]
    pub kind: LoopKind,
    /// Station ids of the named boundary points.
    pub boundary_points: Vec<StationId>,
}

impl LoopTopology {
    /// Full loop with the given boundary points.
    pub fn full(boundary_points: impl IntoIterator<Item = StationId>) -> Self {
        Self {
            kind: LoopKind::Full,
            boundary_points: boundary_points.into_iter().collect(),
        }
    }

    /// Non-wrapping loop with the given boundary points.
    pub fn partial(boundary_points: impl IntoIterator<Item = StationId>) -> Self {
        Self {
            kind: LoopKind::Partial,
            boundary_points: boundary_points.into_iter().collect(),
        }
    }

    /// True if `station` is a named boundary point.
    pub fn is_boundary(&self, station: &Station) -> bool {
        self.boundary_points.contains(&station.id)
    }
}

/// Line shape.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum LineTopology {
    /// Ordinary line with termini.
    #[default]
    Linear,
    /// Circuit line.
    Loop(LoopTopology),
}

/// Kind of transport on a line.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TransportType {
    /// Rail service.
    #[default]
    Rail,
    /// Bus service; stop names carry parenthesised qualifiers.
    Bus,
}

/// An operator line.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Line {
    /// Line identifier.
    pub id: LineId,
    /// Localized line names.
    #[cfg_attr(feature = "serde", serde(default))]
    pub names: LocalizedNames,
    /// Display color (`#RRGGBB`).
    #[cfg_attr(feature = "serde", serde(default))]
    pub color: String,
    /// Operating company identifier.
    #[cfg_attr(feature = "serde", serde(default))]
    pub company_id: u32,
    /// Line shape.
    #[cfg_attr(feature = "serde", serde(default))]
    pub topology: LineTopology,
    /// Transport kind.
    #[cfg_attr(feature = "serde", serde(default))]
    pub transport: TransportType,
}

impl Line {
    /// Creates a linear rail line.
    pub fn linear(id: LineId) -> Self {
        Self {
            id,
            ..Self::default()
        }
    }

    /// Creates a loop rail line.
    pub fn looped(id: LineId, topology: LoopTopology) -> Self {
        Self {
            id,
            topology: LineTopology::Loop(topology),
            ..Self::default()
        }
    }

    /// Set the transport type
    pub fn with_transport(mut self, transport: TransportType) -> Self {
        self.transport = transport;
        self
    }

    /// Loop metadata if the line is flagged as a loop.
    pub fn loop_topology(&self) -> Option<&LoopTopology> {
        match &self.topology {
            LineTopology::Loop(topology) => Some(topology),
            LineTopology::Linear => None,
        }
    }

    /// True if both lines belong to different operators.
    pub fn crosses_company(&self, other: &Line) -> bool {
        self.company_id != other.company_id
    }
}

/// Service tier of a train type.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TrainTier {
    /// Stops at every station.
    Local,
    /// Rapid service.
    Rapid,
    /// Limited express.
    LimitedExpress,
    /// Anything else.
    Other,
}

/// Train type, passed through from the directory.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TrainType {
    /// Numeric classification.
    pub type_id: u32,
    /// Localized names.
    #[cfg_attr(feature = "serde", serde(default))]
    pub names: LocalizedNames,
}

impl TrainType {
    /// Creates a train type with the given classification.
    pub fn new(type_id: u32) -> Self {
        Self {
            type_id,
            ..Self::default()
        }
    }

    /// Service tier derived from the classification code.
    pub fn tier(&self) -> TrainTier {
        match self.type_id {
            100 | 101 | 300 | 301 => TrainTier::Local,
            102 | 302 => TrainTier::Rapid,
            200..=299 => TrainTier::LimitedExpress,
            _ => TrainTier::Other,
        }
    }

    /// True for local (all-stops) services.
    pub fn is_local(&self) -> bool {
        self.tier() == TrainTier::Local
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_names_count_as_absent() {
        let names = LocalizedNames::base("東京").with_roman("").with_intl_a("东京");
        assert_eq!(names.get(Language::Base), Some("東京"));
        assert_eq!(names.get(Language::Roman), None);
        assert_eq!(names.get(Language::IntlB), None);
        assert!(names.has(Language::IntlA));
    }

    #[test]
    fn stop_condition_not_is_pass() {
        let station = Station::new(1, 1, LocalizedNames::base("A"));
        assert!(!station.is_pass());
        assert!(station.clone().passing().is_pass());
        assert!(station.with_stop_condition(StopCondition::Not).is_pass());
    }

    #[test]
    fn train_tiers() {
        assert!(TrainType::new(100).is_local());
        assert!(TrainType::new(301).is_local());
        assert_eq!(TrainType::new(102).tier(), TrainTier::Rapid);
        assert_eq!(TrainType::new(250).tier(), TrainTier::LimitedExpress);
        assert_eq!(TrainType::new(7).tier(), TrainTier::Other);
    }

    #[test]
    fn line_topology_lookup() {
        assert!(Line::linear(1).loop_topology().is_none());
        let line = Line::looped(2, LoopTopology::full([10, 20]));
        assert_eq!(line.loop_topology().map(|t| t.boundary_points.len()), Some(2));
    }
}

//! Text resolution: header state + journey position -> display strings.
//!
//! [`TextResolver::resolve`] is a pure function of its input and the
//! previously displayed snapshot. The previous snapshot matters only when a
//! station lacks a name in the requested language: the station and bound
//! lines then keep what they showed before instead of going blank.
//!
//! # Example
//!
//! ```rust
//! use rs_nextstop::{HeaderState, Language, Phase, TextInput, TextResolver};
//! use rs_nextstop::station::{LocalizedNames, Station};
//! use rs_nextstop::topology::ResolvedBound;
//!
//! let current = Station::new(1, 1, LocalizedNames::base("新宿").with_roman("Shinjuku"));
//! let next = Station::new(2, 2, LocalizedNames::base("代々木").with_roman("Yoyogi"));
//! let terminal = Station::new(3, 3, LocalizedNames::base("東京").with_roman("Tokyo"));
//!
//! let resolver = TextResolver::default();
//! let input = TextInput {
//!     state: HeaderState::new(Phase::Next, Language::Roman),
//!     station: Some(&current),
//!     next_station: Some(&next),
//!     bound: ResolvedBound::Terminal(&terminal),
//!     is_last_stop: false,
//!     is_first_stop: false,
//!     transport: Default::default(),
//! };
//! let snapshot = resolver.resolve(&input, None);
//! assert_eq!(snapshot.state_text, "Next");
//! assert_eq!(snapshot.station_text, "Yoyogi");
//! assert_eq!(snapshot.bound_text, "for Tokyo");
//! ```

use alloc::string::String;
use alloc::vec::Vec;

use crate::labels::LabelSet;
use crate::language::{HeaderState, Language, Phase};
use crate::snapshot::AnnouncementSnapshot;
use crate::station::{Station, TransportType};
use crate::text::{katakana_to_hiragana, single_line, small_capitalize_tail, strip_parenthesized};
use crate::topology::ResolvedBound;

/// Placeholder bound text used when no bound is selected.
pub const DEFAULT_APP_NAME: &str = "NextStop";

/// Everything the resolver reads for one snapshot.
#[derive(Clone, Debug)]
pub struct TextInput<'a> {
    /// Phase and language to render.
    pub state: HeaderState,
    /// Current station.
    pub station: Option<&'a Station>,
    /// Upcoming stop.
    pub next_station: Option<&'a Station>,
    /// Bound, already resolved for the line topology.
    pub bound: ResolvedBound<'a>,
    /// The upcoming stop is the final stop.
    pub is_last_stop: bool,
    /// Current station is the journey origin with a bound selected.
    pub is_first_stop: bool,
    /// Transport kind of the line.
    pub transport: TransportType,
}

/// Builds announcement snapshots from label tables.
#[derive(Clone, Debug)]
pub struct TextResolver {
    labels: LabelSet,
    app_name: String,
    single_line_labels: bool,
    strip_bus_parentheses: bool,
}

impl Default for TextResolver {
    fn default() -> Self {
        Self::new(LabelSet::default(), DEFAULT_APP_NAME)
    }
}

impl TextResolver {
    /// Creates a resolver with the given labels and placeholder.
    pub fn new(labels: LabelSet, app_name: &str) -> Self {
        Self {
            labels,
            app_name: app_name.into(),
            single_line_labels: false,
            strip_bus_parentheses: true,
        }
    }

    /// Replace label line breaks with spaces
    pub fn with_single_line_labels(mut self, enabled: bool) -> Self {
        self.single_line_labels = enabled;
        self
    }

    /// Strip parenthesised qualifiers from bus stop names
    pub fn with_bus_parenthesis_stripping(mut self, enabled: bool) -> Self {
        self.strip_bus_parentheses = enabled;
        self
    }

    /// Label tables in use.
    pub fn labels(&self) -> &LabelSet {
        &self.labels
    }

    /// Placeholder shown when no bound is selected.
    pub fn app_name(&self) -> &str {
        &self.app_name
    }

    /// Resolves a full snapshot.
    ///
    /// `previous` supplies the fallback for station and bound text when
    /// the requested language is missing.
    pub fn resolve(
        &self,
        input: &TextInput<'_>,
        previous: Option<&AnnouncementSnapshot>,
    ) -> AnnouncementSnapshot {
        let (state_text, state_text_right) = self.state_texts(input);
        let station_text = self
            .station_text(input)
            .or_else(|| previous.map(|p| p.station_text.clone()))
            .unwrap_or_default();
        let bound_text = self
            .bound_text(input)
            .or_else(|| previous.map(|p| p.bound_text.clone()))
            .unwrap_or_default();

        AnnouncementSnapshot {
            phase: input.state.phase,
            language: input.state.language,
            state_text,
            state_text_right,
            station_text,
            bound_text,
            is_last_stop: input.is_last_stop,
            is_first_stop: self.first_stop_layout(input),
        }
    }

    /// Particles replace the state label only while CURRENT is shown.
    fn first_stop_layout(&self, input: &TextInput<'_>) -> bool {
        input.is_first_stop
            && input.state.phase == Phase::Current
            && input.bound != ResolvedBound::Unselected
    }

    /// State label and trailing particle.
    pub fn state_texts(&self, input: &TextInput<'_>) -> (String, String) {
        let lang = input.state.language;
        let labels = self.labels.get(lang);

        if self.first_stop_layout(input) {
            return (
                labels.first_stop.left.clone(),
                labels.first_stop.right.clone(),
            );
        }

        let phase = match input.bound {
            ResolvedBound::Unselected => Phase::Current,
            _ => input.state.phase,
        };
        let label = labels.phase.get(phase, input.is_last_stop);
        let text = if lang == Language::Roman && input.is_last_stop && phase != Phase::Current {
            small_capitalize_tail(Some(label))
        } else if self.single_line_labels {
            single_line(Some(label))
        } else {
            String::from(label)
        };
        (text, String::new())
    }

    /// Station line, or `None` to keep the previous value.
    ///
    /// The first-stop layout names the destination between its particles.
    /// Without a bound the current station is shown in every phase, to
    /// match the CURRENT label.
    pub fn station_text(&self, input: &TextInput<'_>) -> Option<String> {
        let lang = input.state.language;
        let text = if self.first_stop_layout(input) {
            self.bound_station_name(input)?
        } else {
            let station = match (&input.bound, input.state.phase) {
                (ResolvedBound::Unselected, _) | (_, Phase::Current) => input.station,
                (_, Phase::Arriving | Phase::Next) => input.next_station,
            }?;
            localized_name(station, lang)?
        };
        if input.transport == TransportType::Bus && self.strip_bus_parentheses {
            return Some(strip_parenthesized(&text));
        }
        Some(text)
    }

    /// Bare bound name(s) in the header language, without affixes.
    fn bound_station_name(&self, input: &TextInput<'_>) -> Option<String> {
        let lang = input.state.language;
        match &input.bound {
            ResolvedBound::Unselected => None,
            ResolvedBound::Terminal(station) => localized_name(station, lang),
            ResolvedBound::Loop(_) => {
                let separator = &self.labels.get(lang).bound.separator;
                input.bound.name(lang, separator)
            }
        }
    }

    /// Bound line, or `None` to keep the previous value.
    pub fn bound_text(&self, input: &TextInput<'_>) -> Option<String> {
        if input.bound == ResolvedBound::Unselected {
            return Some(self.app_name.clone());
        }
        let affix = &self.labels.get(input.state.language).bound;
        let name = input.bound.name(input.state.language, &affix.separator)?;
        if name.is_empty() {
            return Some(name);
        }
        let suffix = if input.bound.is_loop() {
            &affix.loop_suffix
        } else {
            &affix.linear_suffix
        };
        let parts: Vec<&str> = [affix.prefix.as_str(), name.as_str(), suffix.as_str()]
            .into_iter()
            .filter(|p| !p.is_empty())
            .collect();
        Some(parts.join(" "))
    }
}

/// Display name of `station` in `lang`, kana folded for phonetic.
fn localized_name(station: &Station, lang: Language) -> Option<String> {
    let raw = station.name(lang)?;
    Some(match lang {
        Language::Phonetic => katakana_to_hiragana(Some(raw)),
        _ => String::from(raw),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::station::LocalizedNames;

    fn station(id: u32, base: &str, kana: &str, roman: &str) -> Station {
        Station::new(
            id,
            id,
            LocalizedNames::base(base).with_phonetic(kana).with_roman(roman),
        )
    }

    struct Fixture {
        current: Station,
        next: Station,
        terminal: Station,
    }

    impl Fixture {
        fn new() -> Self {
            Self {
                current: station(1, "新宿", "シンジュク", "Shinjuku"),
                next: station(2, "渋谷", "シブヤ", "Shibuya"),
                terminal: station(3, "品川", "シナガワ", "Shinagawa"),
            }
        }

        fn input(&self, phase: Phase, language: Language) -> TextInput<'_> {
            TextInput {
                state: HeaderState::new(phase, language),
                station: Some(&self.current),
                next_station: Some(&self.next),
                bound: ResolvedBound::Terminal(&self.terminal),
                is_last_stop: false,
                is_first_stop: false,
                transport: TransportType::Rail,
            }
        }
    }

    #[test]
    fn current_uses_current_station() {
        let f = Fixture::new();
        let snap = TextResolver::default().resolve(&f.input(Phase::Current, Language::Base), None);
        assert_eq!(snap.state_text, "ただいま");
        assert_eq!(snap.station_text, "新宿");
        assert_eq!(snap.bound_text, "品川 ゆき");
    }

    #[test]
    fn arriving_and_next_use_next_station() {
        let f = Fixture::new();
        let resolver = TextResolver::default();
        let arriving = resolver.resolve(&f.input(Phase::Arriving, Language::Base), None);
        assert_eq!(arriving.state_text, "まもなく");
        assert_eq!(arriving.station_text, "渋谷");
        let next = resolver.resolve(&f.input(Phase::Next, Language::Roman), None);
        assert_eq!(next.station_text, "Shibuya");
        assert_eq!(next.bound_text, "for Shinagawa");
    }

    #[test]
    fn phonetic_is_folded_to_hiragana() {
        let f = Fixture::new();
        let snap = TextResolver::default().resolve(&f.input(Phase::Arriving, Language::Phonetic), None);
        assert_eq!(snap.station_text, "しぶや");
        // Phonetic bound text reuses the base names.
        assert_eq!(snap.bound_text, "品川 ゆき");
    }

    #[test]
    fn roman_last_stop_label_is_small_capitalized() {
        let f = Fixture::new();
        let mut input = f.input(Phase::Next, Language::Roman);
        input.is_last_stop = true;
        let snap = TextResolver::default().resolve(&input, None);
        assert_eq!(snap.state_text, "Next last stop");
        assert!(snap.is_last_stop);
    }

    #[test]
    fn single_line_mode_flattens_labels() {
        let f = Fixture::new();
        let mut input = f.input(Phase::Next, Language::Base);
        input.is_last_stop = true;
        let resolver = TextResolver::default().with_single_line_labels(true);
        assert_eq!(resolver.resolve(&input, None).state_text, "次は 終点");
        let plain = TextResolver::default();
        assert_eq!(plain.resolve(&input, None).state_text, "次は\n終点");
    }

    #[test]
    fn missing_international_name_keeps_previous_text() {
        let f = Fixture::new();
        let resolver = TextResolver::default();
        let previous = resolver.resolve(&f.input(Phase::Arriving, Language::Roman), None);
        let snap = resolver.resolve(&f.input(Phase::Arriving, Language::IntlB), Some(&previous));
        assert_eq!(snap.station_text, "Shibuya");
        assert_eq!(snap.bound_text, "for Shinagawa");
        // State label is still switched to the requested language.
        assert_eq!(snap.state_text, "곧 도착");
    }

    #[test]
    fn missing_next_station_keeps_previous_text() {
        let f = Fixture::new();
        let resolver = TextResolver::default();
        let previous = resolver.resolve(&f.input(Phase::Current, Language::Base), None);
        let mut input = f.input(Phase::Next, Language::Base);
        input.next_station = None;
        assert_eq!(resolver.resolve(&input, Some(&previous)).station_text, "新宿");
        assert_eq!(resolver.resolve(&input, None).station_text, "");
    }

    #[test]
    fn unselected_bound_shows_placeholder() {
        let f = Fixture::new();
        let mut input = f.input(Phase::Next, Language::Roman);
        input.bound = ResolvedBound::Unselected;
        input.is_first_stop = true;
        let snap = TextResolver::new(LabelSet::default(), "TrainLCD").resolve(&input, None);
        assert_eq!(snap.bound_text, "TrainLCD");
        assert_eq!(snap.state_text, "Now stopping at");
        assert!(!snap.is_first_stop);
    }

    #[test]
    fn first_stop_layout_uses_particles() {
        let f = Fixture::new();
        let resolver = TextResolver::default();

        let mut input = f.input(Phase::Current, Language::Base);
        input.is_first_stop = true;
        let snap = resolver.resolve(&input, None);
        assert_eq!(snap.state_text, "");
        assert_eq!(snap.state_text_right, "ゆき");
        assert_eq!(snap.station_text, "品川");

        input.state = HeaderState::new(Phase::Current, Language::Roman);
        let snap = resolver.resolve(&input, None);
        assert_eq!(snap.state_text, "For");
        assert_eq!(snap.state_text_right, "");
        assert_eq!(snap.station_text, "Shinagawa");

        input.state = HeaderState::new(Phase::Current, Language::Phonetic);
        assert_eq!(resolver.resolve(&input, None).station_text, "しながわ");

        // Other phases keep their normal labels and stations.
        input.state = HeaderState::new(Phase::Next, Language::Roman);
        let snap = resolver.resolve(&input, None);
        assert_eq!(snap.state_text, "Next");
        assert_eq!(snap.station_text, "Shibuya");
        assert!(!snap.is_first_stop);
    }

    #[test]
    fn first_stop_on_loop_names_boundary_points() {
        let f = Fixture::new();
        let mut input = f.input(Phase::Current, Language::Base);
        input.is_first_stop = true;
        input.bound = ResolvedBound::Loop(alloc::vec![&f.terminal, &f.next]);
        let snap = TextResolver::default().resolve(&input, None);
        assert_eq!(snap.station_text, "品川・渋谷");
        assert_eq!(snap.bound_text, "品川・渋谷 方面");
    }

    #[test]
    fn first_stop_missing_bound_name_keeps_previous_text() {
        let f = Fixture::new();
        let resolver = TextResolver::default();
        let mut input = f.input(Phase::Current, Language::Base);
        input.is_first_stop = true;
        let previous = resolver.resolve(&input, None);
        input.state = HeaderState::new(Phase::Current, Language::IntlB);
        assert_eq!(resolver.resolve(&input, Some(&previous)).station_text, "品川");
    }

    #[test]
    fn unselected_bound_shows_current_station_in_every_phase() {
        let f = Fixture::new();
        let mut input = f.input(Phase::Arriving, Language::Base);
        input.bound = ResolvedBound::Unselected;
        let snap = TextResolver::default().resolve(&input, None);
        assert_eq!(snap.state_text, "ただいま");
        assert_eq!(snap.station_text, "新宿");
    }

    #[test]
    fn loop_bound_uses_loop_suffix() {
        let f = Fixture::new();
        let mut input = f.input(Phase::Current, Language::Base);
        input.bound = ResolvedBound::Loop(alloc::vec![&f.terminal, &f.next]);
        let snap = TextResolver::default().resolve(&input, None);
        assert_eq!(snap.bound_text, "品川・渋谷 方面");

        input.state = HeaderState::new(Phase::Current, Language::Roman);
        let snap = TextResolver::default().resolve(&input, None);
        assert_eq!(snap.bound_text, "for Shinagawa & Shibuya");
    }

    #[test]
    fn inconsistent_loop_gives_empty_bound() {
        let f = Fixture::new();
        let mut input = f.input(Phase::Current, Language::Base);
        input.bound = ResolvedBound::Loop(Vec::new());
        let previous = AnnouncementSnapshot {
            bound_text: "stale".into(),
            ..AnnouncementSnapshot::default()
        };
        assert_eq!(TextResolver::default().resolve(&input, Some(&previous)).bound_text, "");
    }

    #[test]
    fn bus_stop_names_drop_qualifiers() {
        let f = Fixture::new();
        let bus_stop = Station::new(9, 9, LocalizedNames::base("駅前（北口）"));
        let mut input = f.input(Phase::Current, Language::Base);
        input.station = Some(&bus_stop);
        input.transport = TransportType::Bus;
        assert_eq!(TextResolver::default().resolve(&input, None).station_text, "駅前");
    }

    #[test]
    fn resolution_is_deterministic() {
        let f = Fixture::new();
        let resolver = TextResolver::default();
        let input = f.input(Phase::Arriving, Language::Roman);
        assert_eq!(resolver.resolve(&input, None), resolver.resolve(&input, None));
    }
}

//! Phase and language state machine.
//!
//! [`PhaseMachine`] owns the [`HeaderState`] and moves it in response to
//! three inputs:
//!
//! - arrival at a stopping station, which resets to `(CURRENT, default)`
//! - an approach tick, which moves into ARRIVING and then rotates the
//!   language through the enabled list
//! - an idle tick (opt-in), which rotates the language while no approach
//!   is in progress
//!
//! The machine never fails. An empty language list pins the language to
//! [`Language::Base`].
//!
//! # Example
//!
//! ```rust
//! use rs_nextstop::{EnabledLanguages, HeaderState, Language, Locale, Phase, PhaseMachine};
//! use rs_nextstop::station::{LocalizedNames, Station};
//!
//! let next = Station::new(2, 2, LocalizedNames::base("渋谷").with_roman("Shibuya"));
//! let enabled = EnabledLanguages::new([Language::Base, Language::Roman]);
//! let mut machine = PhaseMachine::new(Locale::Base);
//!
//! machine.on_approach_tick(&enabled, Some(&next));
//! assert_eq!(machine.state(), HeaderState::new(Phase::Arriving, Language::Base));
//! machine.on_approach_tick(&enabled, Some(&next));
//! assert_eq!(machine.state(), HeaderState::new(Phase::Arriving, Language::Phonetic));
//! machine.on_approach_tick(&enabled, Some(&next));
//! assert_eq!(machine.state(), HeaderState::new(Phase::Arriving, Language::Roman));
//! ```

use crate::language::{EnabledLanguages, HeaderState, Language, Locale, Phase};
use crate::station::Station;

/// What an ARRIVING tick does once the language cannot advance.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum OnExhausted {
    /// Go back to the entry language and start the cycle again.
    #[default]
    Restart,
    /// Keep showing the current language.
    Hold,
}

/// How international-language availability is judged for the upcoming stop.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Availability {
    /// The upcoming stop must carry a name in that exact language.
    #[default]
    PerLanguage,
    /// Any international name on the upcoming stop unlocks both.
    AnyInternational,
    /// International languages are always entered.
    Ignore,
}

impl Availability {
    /// True if `lang` may be shown for `station`.
    ///
    /// Only international languages are ever refused.
    pub fn allows(self, lang: Language, station: Option<&Station>) -> bool {
        if !lang.is_international() {
            return true;
        }
        let Some(station) = station else {
            return matches!(self, Availability::Ignore);
        };
        match self {
            Availability::PerLanguage => station.names.has(lang),
            Availability::AnyInternational => {
                station.names.has(Language::IntlA) || station.names.has(Language::IntlB)
            }
            Availability::Ignore => true,
        }
    }
}

/// Rotation rules for the ARRIVING phase.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct RotationPolicy {
    /// Behaviour after the last enabled language (or an unavailable one).
    pub on_exhausted: OnExhausted,
    /// Availability rule for international languages.
    pub availability: Availability,
}

impl RotationPolicy {
    /// Set exhaustion behaviour
    pub fn with_on_exhausted(mut self, on_exhausted: OnExhausted) -> Self {
        self.on_exhausted = on_exhausted;
        self
    }

    /// Set availability rule
    pub fn with_availability(mut self, availability: Availability) -> Self {
        self.availability = availability;
        self
    }
}

/// Owner of the announcement phase and language.
#[derive(Clone, Debug)]
pub struct PhaseMachine {
    state: HeaderState,
    locale: Locale,
    policy: RotationPolicy,
}

impl PhaseMachine {
    /// Create a machine in the locale's initial state
    pub fn new(locale: Locale) -> Self {
        Self {
            state: HeaderState::initial(locale),
            locale,
            policy: RotationPolicy::default(),
        }
    }

    /// Set the rotation policy
    pub fn with_policy(mut self, policy: RotationPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Current header state.
    pub fn state(&self) -> HeaderState {
        self.state
    }

    /// Locale the machine resets to.
    pub fn locale(&self) -> Locale {
        self.locale
    }

    /// Rotation policy in use.
    pub fn policy(&self) -> RotationPolicy {
        self.policy
    }

    /// Force `(CURRENT, locale default)`.
    pub fn reset(&mut self) -> HeaderState {
        self.set(HeaderState::initial(self.locale))
    }

    /// Handles `arrived` becoming true at `station`.
    ///
    /// Resets only from ARRIVING or NEXT, and only at a stopping station.
    pub fn on_arrived(&mut self, station: Option<&Station>) -> HeaderState {
        let stopping = station.is_some_and(|s| !s.is_pass());
        if self.state.phase != Phase::Current && stopping {
            return self.reset();
        }
        self.state
    }

    /// One approach-timer tick.
    ///
    /// `upcoming` is the next stopping station, if any.
    pub fn on_approach_tick(
        &mut self,
        enabled: &EnabledLanguages,
        upcoming: Option<&Station>,
    ) -> HeaderState {
        match self.state.phase {
            Phase::Current | Phase::Next => {
                if upcoming.is_some_and(|s| !s.is_pass()) {
                    let entry = entry_language(enabled);
                    return self.set(HeaderState::new(Phase::Arriving, entry));
                }
                self.state
            }
            Phase::Arriving => {
                let next = self.rotate_arriving(enabled, upcoming);
                self.set(HeaderState::new(Phase::Arriving, next))
            }
        }
    }

    fn rotate_arriving(&self, enabled: &EnabledLanguages, upcoming: Option<&Station>) -> Language {
        let lang = self.state.language;
        if enabled.is_empty() {
            return Language::Base;
        }
        if lang == Language::Base && enabled.contains(Language::Base) {
            return Language::Phonetic;
        }
        match enabled.next_after(lang) {
            Some(next) if self.policy.availability.allows(next, upcoming) => next,
            _ => match self.policy.on_exhausted {
                OnExhausted::Restart => entry_language(enabled),
                OnExhausted::Hold => lang,
            },
        }
    }

    /// One idle-rotation tick (no approach in progress).
    ///
    /// Departed from the current station, CURRENT gives way to NEXT.
    /// Otherwise the language rotates within the phase, wrapping at the end
    /// of the enabled list. Languages missing on `displayed` are skipped;
    /// the state holds only when no other language has a name.
    pub fn on_idle_tick(
        &mut self,
        enabled: &EnabledLanguages,
        arrived: bool,
        upcoming: Option<&Station>,
        displayed: Option<&Station>,
    ) -> HeaderState {
        if !arrived && self.state.phase == Phase::Current && upcoming.is_some() {
            let lang = self.locale.default_language();
            return self.set(HeaderState::new(Phase::Next, lang));
        }
        if enabled.is_empty() {
            return self.set(self.state.with_language(Language::Base));
        }

        let lang = self.state.language;
        let mut candidate = idle_successor(enabled, lang);
        // Phonetic plus every enabled language, at most once each.
        for _ in 0..=enabled.len() {
            let Some(next) = candidate else {
                break;
            };
            if next == lang {
                break;
            }
            if displayed.map_or(true, |s| s.names.has(next)) {
                return self.set(self.state.with_language(next));
            }
            candidate = idle_successor(enabled, next);
        }
        self.state
    }

    fn set(&mut self, next: HeaderState) -> HeaderState {
        if next != self.state {
            tracing::debug!("header state {} -> {}", self.state, next);
            self.state = next;
        }
        self.state
    }
}

/// Idle rotation order: base, phonetic, then the enabled list, wrapping.
fn idle_successor(enabled: &EnabledLanguages, lang: Language) -> Option<Language> {
    if lang == Language::Base && enabled.contains(Language::Base) {
        Some(Language::Phonetic)
    } else {
        enabled.next_wrapping(lang)
    }
}

/// Language ARRIVING starts with: base if enabled (or nothing is), else the
/// first enabled language.
pub fn entry_language(enabled: &EnabledLanguages) -> Language {
    if enabled.is_empty() || enabled.contains(Language::Base) {
        Language::Base
    } else {
        enabled.first().unwrap_or(Language::Base)
    }
}

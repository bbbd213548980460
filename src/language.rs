//! Announcement phases, display languages and the combined header state.
//!
//! The display cycles through a small, fixed set of phases (what moment of
//! the stop cycle is being announced) and languages (which localized
//! rendering is active). The pair of the two is the [`HeaderState`], the one
//! value every other part of the crate keys off.
//!
//! # Example
//!
//! ```rust
//! use rs_nextstop::{EnabledLanguages, HeaderState, Language, Phase};
//!
//! let state = HeaderState::new(Phase::Arriving, Language::Phonetic);
//! assert_eq!(state.to_string(), "ARRIVING_KANA");
//! assert_eq!("NEXT_EN".parse::<HeaderState>().unwrap(), HeaderState::new(Phase::Next, Language::Roman));
//!
//! let enabled = EnabledLanguages::from_tags(&["JA", "EN", "KO"]).unwrap();
//! assert_eq!(enabled.next_after(Language::Base), Some(Language::Roman));
//! // Phonetic is a variant of the base language, so it never advances the index
//! assert_eq!(enabled.next_after(Language::Phonetic), Some(Language::Roman));
//! ```

use core::fmt;
use core::str::FromStr;

/// Maximum number of languages that can take part in the rotation.
pub const MAX_ENABLED_LANGUAGES: usize = 4;

/// Which moment in the stop cycle is being announced.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Phase {
    /// Train is at (or stopped at) the current station.
    #[default]
    Current,
    /// Train is about to arrive at the upcoming station.
    Arriving,
    /// Train has departed; the upcoming station is announced.
    Next,
}

impl Phase {
    /// Tag used in combined legacy header tags.
    pub const fn tag(self) -> &'static str {
        match self {
            Phase::Current => "CURRENT",
            Phase::Arriving => "ARRIVING",
            Phase::Next => "NEXT",
        }
    }
}

/// Which localized rendering is active.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Language {
    /// Base language (station names as written).
    #[default]
    #[cfg_attr(feature = "serde", serde(rename = "JA"))]
    Base,
    /// Phonetic rendering of the base language (kana folded to hiragana).
    #[cfg_attr(feature = "serde", serde(rename = "KANA"))]
    Phonetic,
    /// Romanized names.
    #[cfg_attr(feature = "serde", serde(rename = "EN"))]
    Roman,
    /// First optional international language.
    #[cfg_attr(feature = "serde", serde(rename = "ZH"))]
    IntlA,
    /// Second optional international language.
    #[cfg_attr(feature = "serde", serde(rename = "KO"))]
    IntlB,
}

impl Language {
    /// All languages in rotation priority order.
    pub const ALL: [Language; 5] = [
        Language::Base,
        Language::Phonetic,
        Language::Roman,
        Language::IntlA,
        Language::IntlB,
    ];

    /// Short tag as used in settings (`JA`, `KANA`, `EN`, `ZH`, `KO`).
    pub const fn tag(self) -> &'static str {
        match self {
            Language::Base => "JA",
            Language::Phonetic => "KANA",
            Language::Roman => "EN",
            Language::IntlA => "ZH",
            Language::IntlB => "KO",
        }
    }

    /// Returns the language used for position lookups in the enabled list.
    ///
    /// Phonetic shares the base language's slot.
    pub const fn base_equivalent(self) -> Language {
        match self {
            Language::Phonetic => Language::Base,
            other => other,
        }
    }

    /// True for the two optional international languages.
    pub const fn is_international(self) -> bool {
        matches!(self, Language::IntlA | Language::IntlB)
    }

    const fn priority(self) -> u8 {
        match self {
            Language::Base | Language::Phonetic => 0,
            Language::Roman => 1,
            Language::IntlA => 2,
            Language::IntlB => 3,
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// Error returned when a language tag is not recognised.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("unknown language tag: {tag}")]
pub struct ParseLanguageError {
    /// The offending tag (truncated to fit).
    pub tag: heapless::String<16>,
}

impl ParseLanguageError {
    fn new(tag: &str) -> Self {
        let mut s = heapless::String::new();
        for c in tag.chars() {
            if s.push(c).is_err() {
                break;
            }
        }
        Self { tag: s }
    }
}

impl FromStr for Language {
    type Err = ParseLanguageError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "JA" | "ja" => Ok(Language::Base),
            "KANA" | "kana" => Ok(Language::Phonetic),
            "EN" | "en" => Ok(Language::Roman),
            "ZH" | "zh" => Ok(Language::IntlA),
            "KO" | "ko" => Ok(Language::IntlB),
            other => Err(ParseLanguageError::new(other)),
        }
    }
}

/// The app's UI locale, which decides the default header language.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Locale {
    /// UI runs in the base language.
    #[default]
    Base,
    /// UI runs in any other language; romanized names are the default.
    Foreign,
}

impl Locale {
    /// Language the header resets to on arrival.
    pub const fn default_language(self) -> Language {
        match self {
            Locale::Base => Language::Base,
            Locale::Foreign => Language::Roman,
        }
    }
}

/// Combined phase and language tag.
///
/// This is the single source of truth for what the header renders.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HeaderState {
    /// Announcement phase.
    pub phase: Phase,
    /// Active language.
    pub language: Language,
}

impl HeaderState {
    /// Creates a header state from its parts.
    pub const fn new(phase: Phase, language: Language) -> Self {
        Self { phase, language }
    }

    /// `(CURRENT, <locale default>)`, the state every reset lands on.
    pub const fn initial(locale: Locale) -> Self {
        Self::new(Phase::Current, locale.default_language())
    }

    /// Returns a copy with a different language.
    pub const fn with_language(self, language: Language) -> Self {
        Self::new(self.phase, language)
    }
}

impl fmt::Display for HeaderState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.phase.tag())?;
        match self.language {
            Language::Base => Ok(()),
            lang => write!(f, "_{}", lang.tag()),
        }
    }
}

/// Error returned when a combined header tag cannot be parsed.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ParseHeaderStateError {
    /// The phase part is unknown.
    #[error("unknown header phase")]
    UnknownPhase,
    /// The language suffix is unknown.
    #[error(transparent)]
    Language(#[from] ParseLanguageError),
}

impl FromStr for HeaderState {
    type Err = ParseHeaderStateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (phase, lang) = match s.split_once('_') {
            Some((phase, lang)) => (phase, Some(lang)),
            None => (s, None),
        };
        let phase = match phase {
            "CURRENT" => Phase::Current,
            "ARRIVING" => Phase::Arriving,
            "NEXT" => Phase::Next,
            _ => return Err(ParseHeaderStateError::UnknownPhase),
        };
        let language = match lang {
            None => Language::Base,
            Some(tag) => tag.parse()?,
        };
        Ok(Self::new(phase, language))
    }
}

/// Ordered list of the languages that take part in the rotation.
///
/// Phonetic is never stored: it is implied by the base language. Entries
/// are unique. An empty list is allowed and degrades every rotation to the
/// base language only.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(
    feature = "serde",
    serde(from = "alloc::vec::Vec<Language>", into = "alloc::vec::Vec<Language>")
)]
pub struct EnabledLanguages {
    languages: heapless::Vec<Language, MAX_ENABLED_LANGUAGES>,
}

impl Default for EnabledLanguages {
    /// All four rotating languages.
    fn default() -> Self {
        Self::new([
            Language::Base,
            Language::Roman,
            Language::IntlA,
            Language::IntlB,
        ])
    }
}

impl From<alloc::vec::Vec<Language>> for EnabledLanguages {
    fn from(languages: alloc::vec::Vec<Language>) -> Self {
        Self::new(languages)
    }
}

impl From<EnabledLanguages> for alloc::vec::Vec<Language> {
    fn from(enabled: EnabledLanguages) -> Self {
        enabled.languages.iter().copied().collect()
    }
}

impl EnabledLanguages {
    /// Builds a list keeping the given order, dropping duplicates and phonetic.
    pub fn new(languages: impl IntoIterator<Item = Language>) -> Self {
        let mut list: heapless::Vec<Language, MAX_ENABLED_LANGUAGES> = heapless::Vec::new();
        for lang in languages {
            if lang == Language::Phonetic || list.contains(&lang) {
                continue;
            }
            // Capacity equals the number of distinct storable languages.
            let _ = list.push(lang);
        }
        Self { languages: list }
    }

    /// An empty list (base language only).
    pub fn empty() -> Self {
        Self {
            languages: heapless::Vec::new(),
        }
    }

    /// Parses settings tags, failing on the first unknown tag.
    pub fn from_tags(tags: &[&str]) -> Result<Self, ParseLanguageError> {
        let langs = tags
            .iter()
            .map(|tag| tag.parse::<Language>())
            .collect::<Result<alloc::vec::Vec<_>, _>>()?;
        Ok(Self::new(langs))
    }

    /// Parses settings tags, skipping unknown ones.
    pub fn from_tags_lenient<'a>(tags: impl IntoIterator<Item = &'a str>) -> Self {
        Self::new(tags.into_iter().filter_map(|tag| match tag.parse() {
            Ok(lang) => Some(lang),
            Err(err) => {
                tracing::warn!("ignoring enabled language: {}", err);
                None
            }
        }))
    }

    /// Returns the languages in rotation order.
    pub fn as_slice(&self) -> &[Language] {
        &self.languages
    }

    /// Returns the number of enabled languages.
    pub fn len(&self) -> usize {
        self.languages.len()
    }

    /// Returns true if no language is enabled.
    pub fn is_empty(&self) -> bool {
        self.languages.is_empty()
    }

    /// Returns true if `lang` takes part in the rotation.
    ///
    /// Phonetic counts as enabled whenever the base language is.
    pub fn contains(&self, lang: Language) -> bool {
        self.languages.contains(&lang.base_equivalent())
    }

    /// Position of `lang` (phonetic maps to the base slot).
    pub fn index_of(&self, lang: Language) -> Option<usize> {
        let target = lang.base_equivalent();
        self.languages.iter().position(|l| *l == target)
    }

    /// First language in the rotation.
    pub fn first(&self) -> Option<Language> {
        self.languages.first().copied()
    }

    /// The language immediately following `lang`, without wrapping.
    pub fn next_after(&self, lang: Language) -> Option<Language> {
        let index = self.index_of(lang)?;
        self.languages.get(index + 1).copied()
    }

    /// The language following `lang`, wrapping to the first entry.
    pub fn next_wrapping(&self, lang: Language) -> Option<Language> {
        self.next_after(lang).or_else(|| self.first())
    }

    /// Returns a copy sorted by the fixed language priority.
    pub fn normalized(&self) -> Self {
        let mut languages = self.languages.clone();
        languages.sort_unstable_by_key(|l| l.priority());
        Self { languages }
    }

    /// Returns a normalized copy with `lang` switched on or off.
    pub fn toggled(&self, lang: Language) -> Self {
        let lang = lang.base_equivalent();
        let toggled = if self.languages.contains(&lang) {
            Self::new(self.languages.iter().copied().filter(|l| *l != lang))
        } else {
            Self::new(self.languages.iter().copied().chain(core::iter::once(lang)))
        };
        toggled.normalized()
    }

    /// True if switching `lang` would leave neither base nor romanized enabled.
    ///
    /// `currently_enabled` is the toggle's current position; only switching
    /// off can be refused.
    pub fn is_toggle_disabled(&self, lang: Language, currently_enabled: bool) -> bool {
        if !currently_enabled {
            return false;
        }
        match lang.base_equivalent() {
            Language::Base => !self.languages.contains(&Language::Roman),
            Language::Roman => !self.languages.contains(&Language::Base),
            _ => false,
        }
    }
}

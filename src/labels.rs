//! Per-language label tables for the state line and bound text.
//!
//! Labels may contain a `\n` where a skin wraps the text onto two lines.
//! Operators can replace any table through configuration; the defaults
//! follow the usual Japanese railway wording.

use alloc::string::String;

use crate::language::{Language, Phase};

/// State labels for one language.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct PhaseLabels {
    /// "Now stopping at".
    pub current: String,
    /// "Arriving at".
    pub arriving: String,
    /// "Arriving at" for the final stop.
    pub arriving_last: String,
    /// "Next is".
    pub next: String,
    /// "Next is" for the final stop.
    pub next_last: String,
}

impl PhaseLabels {
    /// Label for `phase`; CURRENT has no last-stop variant.
    pub fn get(&self, phase: Phase, is_last_stop: bool) -> &str {
        match (phase, is_last_stop) {
            (Phase::Current, _) => &self.current,
            (Phase::Arriving, false) => &self.arriving,
            (Phase::Arriving, true) => &self.arriving_last,
            (Phase::Next, false) => &self.next,
            (Phase::Next, true) => &self.next_last,
        }
    }
}

/// Words placed around the bound station name.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct BoundAffix {
    /// Text before the name ("for").
    pub prefix: String,
    /// Text after the name on linear lines ("-bound").
    pub linear_suffix: String,
    /// Text after the name on loop lines ("direction").
    pub loop_suffix: String,
    /// Separator when several boundary points are listed.
    pub separator: String,
}

/// First-stop layout particles (shown instead of the state label).
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct FirstStopParticles {
    /// Particle left of the name ("For").
    pub left: String,
    /// Particle right of the name ("-bound").
    pub right: String,
}

/// Everything needed to word the header in one language.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct LanguageLabels {
    /// State labels.
    pub phase: PhaseLabels,
    /// Bound affixes.
    pub bound: BoundAffix,
    /// First-stop particles.
    pub first_stop: FirstStopParticles,
}

/// Label tables for all languages.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct LabelSet {
    /// Base language.
    pub base: LanguageLabels,
    /// Phonetic rendering.
    pub phonetic: LanguageLabels,
    /// Romanized.
    pub roman: LanguageLabels,
    /// First international language.
    pub intl_a: LanguageLabels,
    /// Second international language.
    pub intl_b: LanguageLabels,
}

impl LabelSet {
    /// Labels for `lang`.
    pub fn get(&self, lang: Language) -> &LanguageLabels {
        match lang {
            Language::Base => &self.base,
            Language::Phonetic => &self.phonetic,
            Language::Roman => &self.roman,
            Language::IntlA => &self.intl_a,
            Language::IntlB => &self.intl_b,
        }
    }

    /// Mutable labels for `lang`.
    pub fn get_mut(&mut self, lang: Language) -> &mut LanguageLabels {
        match lang {
            Language::Base => &mut self.base,
            Language::Phonetic => &mut self.phonetic,
            Language::Roman => &mut self.roman,
            Language::IntlA => &mut self.intl_a,
            Language::IntlB => &mut self.intl_b,
        }
    }
}

fn labels(
    phase: [&str; 5],
    bound: [&str; 4],
    first_stop: [&str; 2],
) -> LanguageLabels {
    let [current, arriving, arriving_last, next, next_last] = phase;
    let [prefix, linear_suffix, loop_suffix, separator] = bound;
    let [left, right] = first_stop;
    LanguageLabels {
        phase: PhaseLabels {
            current: current.into(),
            arriving: arriving.into(),
            arriving_last: arriving_last.into(),
            next: next.into(),
            next_last: next_last.into(),
        },
        bound: BoundAffix {
            prefix: prefix.into(),
            linear_suffix: linear_suffix.into(),
            loop_suffix: loop_suffix.into(),
            separator: separator.into(),
        },
        first_stop: FirstStopParticles {
            left: left.into(),
            right: right.into(),
        },
    }
}

impl Default for LabelSet {
    fn default() -> Self {
        Self {
            base: labels(
                ["ただいま", "まもなく", "まもなく\n終点", "次は", "次は\n終点"],
                ["", "ゆき", "方面", "・"],
                ["", "ゆき"],
            ),
            phonetic: labels(
                ["ただいま", "まもなく", "まもなく\nしゅうてん", "つぎは", "つぎは\nしゅうてん"],
                ["", "ゆき", "方面", "・"],
                ["", "ゆき"],
            ),
            roman: labels(
                ["Now stopping at", "Arriving at", "Arriving at\nTerminal", "Next", "Next\nLast Stop"],
                ["for", "", "", " & "],
                ["For", ""],
            ),
            intl_a: labels(
                ["现在停靠", "即将到达", "即将到达\n终点站", "下一站", "下一站\n终点站"],
                ["开往", "", "", "・"],
                ["开往", ""],
            ),
            intl_b: labels(
                ["이번 역", "곧 도착", "곧 도착\n종착역", "다음 역", "다음\n종착역"],
                ["", "행", "행", "・"],
                ["", "행"],
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn current_has_no_last_stop_variant() {
        let set = LabelSet::default();
        let base = &set.get(Language::Base).phase;
        assert_eq!(base.get(Phase::Current, true), base.get(Phase::Current, false));
        assert_ne!(base.get(Phase::Next, true), base.get(Phase::Next, false));
    }

    #[test]
    fn labels_can_be_overridden() {
        let mut set = LabelSet::default();
        set.get_mut(Language::Roman).phase.next = "Next is".into();
        assert_eq!(set.get(Language::Roman).phase.get(Phase::Next, false), "Next is");
    }
}

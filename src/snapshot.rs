//! The immutable record handed to the rendering layer.

use alloc::string::String;

use crate::language::{HeaderState, Language, Phase};

/// What the header shows right now.
///
/// Recomputed whenever an input changes. Renderers read it and never
/// write back; only the controller moves phase and language.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AnnouncementSnapshot {
    /// Announcement phase.
    pub phase: Phase,
    /// Active language.
    pub language: Language,
    /// State label ("Arriving at"), or the first-stop particle.
    pub state_text: String,
    /// Trailing first-stop particle; empty outside the first-stop layout.
    pub state_text_right: String,
    /// Station name.
    pub station_text: String,
    /// Bound text including affixes, or the app name placeholder.
    pub bound_text: String,
    /// The upcoming stop is the final stop.
    pub is_last_stop: bool,
    /// First-stop layout is active.
    pub is_first_stop: bool,
}

impl AnnouncementSnapshot {
    /// Empty snapshot showing only the placeholder bound.
    pub fn placeholder(state: HeaderState, app_name: &str) -> Self {
        Self {
            phase: state.phase,
            language: state.language,
            bound_text: app_name.into(),
            ..Self::default()
        }
    }

    /// The combined phase and language.
    pub fn header_state(&self) -> HeaderState {
        HeaderState::new(self.phase, self.language)
    }
}

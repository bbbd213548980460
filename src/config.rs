//! Operator configuration for the announcement controller.
//!
//! Uses `heapless::String` for the short display strings so the same types
//! work without `std`.
//!
//! # Example
//!
//! ```rust
//! use rs_nextstop::config::{AnnouncementConfig, Config, DisplayConfig};
//! use rs_nextstop::{EnabledLanguages, Language};
//!
//! // Use defaults
//! let config = Config::default();
//! assert_eq!(config.announcement.transition_interval_ms, 3000);
//!
//! // Or customize
//! let config = Config::default()
//!     .with_announcement(
//!         AnnouncementConfig::default()
//!             .with_transition_interval_ms(2000)
//!             .with_enabled_languages(EnabledLanguages::new([Language::Base, Language::Roman])),
//!     )
//!     .with_display(DisplayConfig::default().with_app_name("TrainLCD"));
//! ```

use heapless::String as HString;

use crate::labels::LabelSet;
use crate::language::{EnabledLanguages, Locale};
use crate::machine::RotationPolicy;
use crate::resolver::DEFAULT_APP_NAME;
use crate::topology::MAX_BOUND_POINTS;

/// Maximum length for short config strings (app name)
pub const MAX_SHORT_STRING: usize = 64;

/// Type alias for short config strings
pub type ShortString = HString<MAX_SHORT_STRING>;

/// Default content transition interval in milliseconds
pub const DEFAULT_TRANSITION_INTERVAL_MS: u64 = 3000;

/// Create a ShortString from a &str, truncating at a char boundary if too long
pub fn short_string(s: &str) -> ShortString {
    let mut hs = ShortString::new();
    for c in s.chars() {
        if hs.push(c).is_err() {
            break;
        }
    }
    hs
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The document could not be decoded.
    #[cfg(feature = "json")]
    #[error("invalid config document: {0}")]
    Json(#[from] serde_json::Error),
    /// A value is outside its accepted range.
    #[error("{field}: {reason}")]
    OutOfRange {
        /// Offending field.
        field: &'static str,
        /// What is accepted.
        reason: &'static str,
    },
}

// ============================================================================
// Main Config
// ============================================================================

/// Complete controller configuration
#[derive(Clone, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Config {
    /// Phase/language behaviour
    pub announcement: AnnouncementConfig,
    /// Text presentation
    pub display: DisplayConfig,
    /// Label and affix tables
    pub labels: LabelSet,
}

impl Config {
    /// Set announcement configuration
    pub fn with_announcement(mut self, announcement: AnnouncementConfig) -> Self {
        self.announcement = announcement;
        self
    }

    /// Set display configuration
    pub fn with_display(mut self, display: DisplayConfig) -> Self {
        self.display = display;
        self
    }

    /// Set label tables
    pub fn with_labels(mut self, labels: LabelSet) -> Self {
        self.labels = labels;
        self
    }

    /// Decode a JSON document; missing fields take their defaults.
    ///
    /// Out-of-range values are clamped, see [`Config::sanitized`].
    #[cfg(feature = "json")]
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Config = serde_json::from_str(json)?;
        Ok(config.sanitized())
    }

    /// Strict check: reports the first out-of-range value.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.announcement.validate()
    }

    /// Clamp out-of-range values, logging each correction.
    pub fn sanitized(mut self) -> Self {
        self.announcement = self.announcement.sanitized();
        self
    }
}

// ============================================================================
// Announcement Config
// ============================================================================

/// Phase and language behaviour
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct AnnouncementConfig {
    /// Period of the rotation timer in milliseconds
    pub transition_interval_ms: u64,
    /// App locale; picks the language CURRENT resets to
    pub locale: Locale,
    /// Languages taking part in the rotation, in order
    pub enabled_languages: EnabledLanguages,
    /// ARRIVING rotation rules
    pub rotation: RotationPolicy,
    /// Rotate languages while not approaching
    pub idle_rotation: bool,
    /// Boundary points named in a loop bound (1 or 2)
    pub max_loop_bound_points: u8,
}

impl Default for AnnouncementConfig {
    fn default() -> Self {
        Self {
            transition_interval_ms: DEFAULT_TRANSITION_INTERVAL_MS,
            locale: Locale::Base,
            enabled_languages: EnabledLanguages::default(),
            rotation: RotationPolicy::default(),
            idle_rotation: false,
            max_loop_bound_points: 1,
        }
    }
}

impl AnnouncementConfig {
    /// Set the transition interval
    pub fn with_transition_interval_ms(mut self, ms: u64) -> Self {
        self.transition_interval_ms = ms;
        self
    }

    /// Set the locale
    pub fn with_locale(mut self, locale: Locale) -> Self {
        self.locale = locale;
        self
    }

    /// Set the enabled languages
    pub fn with_enabled_languages(mut self, languages: EnabledLanguages) -> Self {
        self.enabled_languages = languages;
        self
    }

    /// Set the rotation policy
    pub fn with_rotation(mut self, rotation: RotationPolicy) -> Self {
        self.rotation = rotation;
        self
    }

    /// Enable or disable idle rotation
    pub fn with_idle_rotation(mut self, enabled: bool) -> Self {
        self.idle_rotation = enabled;
        self
    }

    /// Set how many loop boundary points are named
    pub fn with_max_loop_bound_points(mut self, points: u8) -> Self {
        self.max_loop_bound_points = points;
        self
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.transition_interval_ms == 0 {
            return Err(ConfigError::OutOfRange {
                field: "transition_interval_ms",
                reason: "must be greater than zero",
            });
        }
        if !(1..=MAX_BOUND_POINTS).contains(&usize::from(self.max_loop_bound_points)) {
            return Err(ConfigError::OutOfRange {
                field: "max_loop_bound_points",
                reason: "must be 1 or 2",
            });
        }
        Ok(())
    }

    fn sanitized(mut self) -> Self {
        if self.transition_interval_ms == 0 {
            tracing::warn!(
                "transition_interval_ms is zero, using {}",
                DEFAULT_TRANSITION_INTERVAL_MS
            );
            self.transition_interval_ms = DEFAULT_TRANSITION_INTERVAL_MS;
        }
        let max = MAX_BOUND_POINTS as u8;
        if self.max_loop_bound_points == 0 || self.max_loop_bound_points > max {
            let clamped = self.max_loop_bound_points.clamp(1, max);
            tracing::warn!(
                "max_loop_bound_points {} out of range, using {}",
                self.max_loop_bound_points,
                clamped
            );
            self.max_loop_bound_points = clamped;
        }
        self
    }
}

// ============================================================================
// Display Config
// ============================================================================

/// Text presentation options
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct DisplayConfig {
    /// Bound placeholder shown before a bound is selected
    pub app_name: ShortString,
    /// Replace label line breaks with spaces
    pub single_line_labels: bool,
    /// Strip parenthesised qualifiers from bus stop names
    pub strip_bus_parentheses: bool,
    /// Use the first-stop particle layout at the journey origin
    pub first_stop_layout: bool,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            app_name: short_string(DEFAULT_APP_NAME),
            single_line_labels: false,
            strip_bus_parentheses: true,
            first_stop_layout: true,
        }
    }
}

impl DisplayConfig {
    /// Set the placeholder app name
    pub fn with_app_name(mut self, name: &str) -> Self {
        self.app_name = short_string(name);
        self
    }

    /// Enable or disable single-line labels
    pub fn with_single_line_labels(mut self, enabled: bool) -> Self {
        self.single_line_labels = enabled;
        self
    }

    /// Enable or disable bus parenthesis stripping
    pub fn with_strip_bus_parentheses(mut self, enabled: bool) -> Self {
        self.strip_bus_parentheses = enabled;
        self
    }

    /// Enable or disable the first-stop layout
    pub fn with_first_stop_layout(mut self, enabled: bool) -> Self {
        self.first_stop_layout = enabled;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::language::Language;

    #[test]
    fn defaults() {
        let config = Config::default();
        assert_eq!(config.announcement.transition_interval_ms, 3000);
        assert_eq!(config.announcement.max_loop_bound_points, 1);
        assert!(!config.announcement.idle_rotation);
        assert_eq!(config.display.app_name.as_str(), DEFAULT_APP_NAME);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn short_string_truncates_on_char_boundary() {
        let long: alloc::string::String = core::iter::repeat('駅').take(40).collect();
        let s = short_string(&long);
        assert!(s.len() <= MAX_SHORT_STRING);
        assert_eq!(s.chars().count(), MAX_SHORT_STRING / '駅'.len_utf8());
    }

    #[test]
    fn zero_interval_is_rejected_then_clamped() {
        let config = Config::default().with_announcement(
            AnnouncementConfig::default().with_transition_interval_ms(0),
        );
        assert!(matches!(
            config.validate(),
            Err(ConfigError::OutOfRange { field: "transition_interval_ms", .. })
        ));
        let fixed = config.sanitized();
        assert_eq!(fixed.announcement.transition_interval_ms, DEFAULT_TRANSITION_INTERVAL_MS);
    }

    #[test]
    fn bound_points_are_clamped() {
        let config = AnnouncementConfig::default().with_max_loop_bound_points(9);
        assert!(config.validate().is_err());
        assert_eq!(config.sanitized().max_loop_bound_points, 2);
        let config = AnnouncementConfig::default().with_max_loop_bound_points(0);
        assert_eq!(config.sanitized().max_loop_bound_points, 1);
    }

    #[test]
    fn builder_chain() {
        let config = AnnouncementConfig::default()
            .with_locale(Locale::Foreign)
            .with_idle_rotation(true)
            .with_enabled_languages(EnabledLanguages::new([Language::Roman]));
        assert_eq!(config.locale, Locale::Foreign);
        assert!(config.idle_rotation);
        assert_eq!(config.enabled_languages.as_slice(), &[Language::Roman]);
    }

    #[cfg(feature = "json")]
    #[test]
    fn from_json_fills_defaults() {
        let config = Config::from_json(
            r#"{
                "announcement": {
                    "transition_interval_ms": 0,
                    "enabled_languages": ["JA", "EN"]
                },
                "display": { "app_name": "TrainLCD" }
            }"#,
        )
        .unwrap();
        assert_eq!(config.announcement.transition_interval_ms, DEFAULT_TRANSITION_INTERVAL_MS);
        assert_eq!(
            config.announcement.enabled_languages.as_slice(),
            &[Language::Base, Language::Roman]
        );
        assert_eq!(config.display.app_name.as_str(), "TrainLCD");
        assert!(config.display.strip_bus_parentheses);
    }

    #[cfg(feature = "json")]
    #[test]
    fn from_json_rejects_unknown_language() {
        let err = Config::from_json(r#"{ "announcement": { "enabled_languages": ["FR"] } }"#);
        assert!(matches!(err, Err(ConfigError::Json(_))));
    }
}

//! # rs-nextstop
//!
//! Announcement controller for "next station" passenger information
//! displays: decides which phase of the stop cycle is shown, in which
//! language, and with what text.
//!
//! ## Features
//!
//! - **Phase/language state machine**: CURRENT / ARRIVING / NEXT, rotating
//!   through an operator-configured language list while approaching
//! - **Loop lines**: direction-aware "bound for" resolution with wraparound
//! - **Absent-safe text**: missing translations keep the previous text
//!   instead of blanking the display
//! - **Single timer**: at most one rotation timer, cancelled by generation so
//!   late ticks are harmless
//!
//! ## Architecture
//!
//! The crate is structured to allow testing without a real directory or
//! screen:
//!
//! - `language` - Phases, languages, header state and the enabled list
//! - `station` - Stations, lines, loop metadata, train types
//! - `topology` - Loop bound resolution
//! - `machine` - Phase/language transitions
//! - `resolver` - Snapshot text resolution
//! - `controller` - Ties everything together around one timer
//! - `traits` - Directory, display and clock abstractions
//! - `hal` - Mock implementations for tests
//!
//! ## Example
//!
//! ```rust
//! use rs_nextstop::{
//!     AnnouncementController, Config, DetectorUpdate, JourneySelection, Phase,
//!     hal::MockDirectory,
//!     station::{Line, LocalizedNames, Station},
//! };
//!
//! let stations = vec![
//!     Station::new(1, 1, LocalizedNames::base("東京").with_roman("Tokyo")),
//!     Station::new(2, 2, LocalizedNames::base("神田").with_roman("Kanda")),
//! ];
//! let mut controller =
//!     AnnouncementController::new(MockDirectory::new().with_line(1, stations), &Config::default());
//! controller
//!     .start_journey(JourneySelection::new(Line::linear(1), 1).with_bound(2), 0)
//!     .unwrap();
//!
//! // Arrived at the next stop
//! let snapshot = controller.apply_signal(DetectorUpdate::new(Some(2), true, false), 10);
//! assert_eq!(snapshot.phase, Phase::Current);
//! assert_eq!(snapshot.station_text, "神田");
//! ```

#![cfg_attr(not(feature = "std"), no_std)]
#![warn(missing_docs)]

extern crate alloc;

/// Announcement controller coordinating state, timer and text.
pub mod controller;
/// Hardware abstraction layer with mock implementations for testing.
pub mod hal;
/// Per-language label and affix tables.
pub mod labels;
/// Phases, languages and the combined header state.
pub mod language;
/// Phase/language state machine.
pub mod machine;
/// Text resolution from header state and journey position.
pub mod resolver;
/// Snapshot record consumed by renderers.
pub mod snapshot;
/// Navigation and journey state.
pub mod state;
/// Station, line and train type records.
pub mod station;
/// Absent-safe string transforms.
pub mod text;
/// Repeating rotation timer with stale-tick protection.
pub mod timer;
/// Loop topology and bound resolution.
pub mod topology;
/// Core traits for collaborators.
pub mod traits;

/// Controller configuration.
pub mod config;

// Re-exports for convenience
pub use config::{AnnouncementConfig, Config, ConfigError, DisplayConfig};
pub use controller::{AnnouncementController, DetectorUpdate, JourneySelection};
pub use labels::LabelSet;
pub use language::{
    EnabledLanguages, HeaderState, Language, Locale, ParseHeaderStateError, ParseLanguageError,
    Phase,
};
pub use machine::{Availability, OnExhausted, PhaseMachine, RotationPolicy};
pub use resolver::{TextInput, TextResolver};
pub use snapshot::AnnouncementSnapshot;
pub use state::{JourneyState, NavigationState, Route};
pub use timer::{RotationTimer, TimerMode, TimerToken};
pub use topology::{BoundResolver, LoopCatalog, ResolvedBound};

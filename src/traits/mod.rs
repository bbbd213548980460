//! Seams between the announcement controller and its collaborators.
//!
//! # Submodules
//!
//! - `directory`: where journey station lists come from
//! - `display`: where snapshots go
//! - `clock`: time source for polling loops
//!
//! Each trait carries an associated `Error` so implementations can report
//! their own failures; the controller itself never fails.

pub mod clock;
pub mod directory;
pub mod display;

pub use clock::*;
pub use directory::*;
pub use display::*;

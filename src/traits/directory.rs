//! Station/line directory abstraction.
//!
//! The directory is external data: the controller only asks it for the
//! ordered station list of a line when a journey starts.

use alloc::vec::Vec;

use crate::station::{Line, Station};

/// Source of journey station lists.
///
/// Implementations might read a bundled database, a cache filled by a
/// network client, or (in tests) an in-memory table.
///
/// # Example
///
/// ```rust
/// use rs_nextstop::hal::MockDirectory;
/// use rs_nextstop::station::{Line, LocalizedNames, Station};
/// use rs_nextstop::traits::StationDirectory;
///
/// let line = Line::linear(1);
/// let directory = MockDirectory::new().with_line(
///     1,
///     vec![Station::new(10, 10, LocalizedNames::base("A"))],
/// );
/// assert_eq!(directory.stations_for_journey(&line).unwrap().len(), 1);
/// ```
pub trait StationDirectory {
    /// Error type for lookups.
    type Error: core::fmt::Debug;

    /// Ordered stations for a journey on `line`.
    ///
    /// Linear lines list stations in travel order. Loop lines list them in
    /// increasing (inbound) order.
    fn stations_for_journey(&self, line: &Line) -> Result<Vec<Station>, Self::Error>;
}

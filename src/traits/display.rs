//! Display abstraction for announcement snapshots.
//!
//! This module defines the [`AnnouncementDisplay`] trait for whatever skin
//! draws the header: an LCD layout, a terminal, a recording mock.

use crate::snapshot::AnnouncementSnapshot;

/// Rendering sink for snapshots.
///
/// Renderers get a shared reference and must not feed anything back into
/// the controller; the phase and language belong to the controller alone.
///
/// # Example
///
/// ```ignore
/// use rs_nextstop::traits::AnnouncementDisplay;
/// use rs_nextstop::AnnouncementSnapshot;
///
/// struct Lcd { /* ... */ }
///
/// impl AnnouncementDisplay for Lcd {
///     type Error = ();
///
///     fn clear(&mut self) -> Result<(), ()> { Ok(()) }
///     fn render(&mut self, snapshot: &AnnouncementSnapshot) -> Result<(), ()> {
///         // Draw state label, station name, bound...
///         Ok(())
///     }
/// }
/// ```
pub trait AnnouncementDisplay {
    /// Error type for display operations.
    type Error;

    /// Clears the display.
    fn clear(&mut self) -> Result<(), Self::Error>;

    /// Renders a snapshot.
    ///
    /// Called whenever the snapshot changes.
    fn render(&mut self, snapshot: &AnnouncementSnapshot) -> Result<(), Self::Error>;
}

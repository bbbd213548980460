//! Time source.

/// Monotonic millisecond clock.
///
/// The controller takes `now_ms` as an argument everywhere; a `Clock` is
/// what a main loop reads it from.
///
/// # Example
///
/// ```rust
/// use rs_nextstop::traits::Clock;
/// use rs_nextstop::hal::MockClock;
///
/// let mut clock = MockClock::new();
/// assert_eq!(clock.now_ms(), 0);
///
/// clock.advance(3000);
/// assert_eq!(clock.now_ms(), 3000);
/// ```
pub trait Clock {
    /// Returns current time in milliseconds since an arbitrary epoch.
    ///
    /// Must be monotonically increasing.
    fn now_ms(&self) -> u64;
}

#[cfg(feature = "std")]
/// Wall-clock [`Clock`] measuring from its creation.
#[derive(Debug, Clone, Copy)]
pub struct SystemClock {
    started: std::time::Instant,
}

#[cfg(feature = "std")]
impl SystemClock {
    /// Starts a clock at zero.
    pub fn new() -> Self {
        Self {
            started: std::time::Instant::now(),
        }
    }
}

#[cfg(feature = "std")]
impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(feature = "std")]
impl Clock for SystemClock {
    fn now_ms(&self) -> u64 {
        u64::try_from(self.started.elapsed().as_millis()).unwrap_or(u64::MAX)
    }
}

//! The single repeating rotation timer.
//!
//! There is at most one timer per controller. Arming replaces whatever was
//! armed before, and every arm or cancel bumps a generation counter. A
//! tick carries the generation it was scheduled under as a
//! [`TimerToken`]; [`RotationTimer::accept`] refuses tokens from an older
//! generation, so a tick that was already in flight when the timer was
//! cancelled can never change state.
//!
//! The timer is polled, like every other time-driven part of the crate:
//! call [`RotationTimer::poll`] with the current time from your main loop.
//!
//! ```rust
//! use rs_nextstop::timer::{RotationTimer, TimerMode};
//!
//! let mut timer = RotationTimer::new(3000);
//! timer.arm(TimerMode::Approach, 0);
//! assert!(timer.poll(2999).is_none());
//! let token = timer.poll(3000).unwrap();
//! assert!(timer.accept(token));
//!
//! timer.cancel();
//! assert!(!timer.accept(token)); // stale
//! ```

/// Why the timer is running.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TimerMode {
    /// Approaching the next stop; ticks drive the ARRIVING rotation.
    Approach,
    /// Opt-in language rotation while not approaching.
    Idle,
}

/// Identifies one tick and the timer generation it belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TimerToken {
    generation: u32,
    mode: TimerMode,
}

impl TimerToken {
    /// Mode the timer was armed in when this tick was produced.
    pub fn mode(&self) -> TimerMode {
        self.mode
    }
}

#[derive(Clone, Copy, Debug)]
struct Armed {
    mode: TimerMode,
    next_due_ms: u64,
}

/// Repeating timer with cancellation by generation.
#[derive(Clone, Debug)]
pub struct RotationTimer {
    period_ms: u64,
    generation: u32,
    armed: Option<Armed>,
}

impl RotationTimer {
    /// Create a disarmed timer with the given period.
    ///
    /// A zero period is treated as one millisecond.
    pub fn new(period_ms: u64) -> Self {
        Self {
            period_ms: period_ms.max(1),
            generation: 0,
            armed: None,
        }
    }

    /// Tick period in milliseconds.
    pub fn period_ms(&self) -> u64 {
        self.period_ms
    }

    /// Change the period; takes effect from the next arm.
    pub fn set_period_ms(&mut self, period_ms: u64) {
        self.period_ms = period_ms.max(1);
    }

    /// Arm in `mode`, first tick one period after `now_ms`.
    ///
    /// Re-arming in the mode that is already running keeps the schedule.
    pub fn arm(&mut self, mode: TimerMode, now_ms: u64) -> TimerToken {
        if let Some(armed) = self.armed {
            if armed.mode == mode {
                return self.token(mode);
            }
        }
        self.generation = self.generation.wrapping_add(1);
        self.armed = Some(Armed {
            mode,
            next_due_ms: now_ms.saturating_add(self.period_ms),
        });
        tracing::trace!("rotation timer armed ({:?}, generation {})", mode, self.generation);
        self.token(mode)
    }

    /// Disarm. Outstanding tokens become stale.
    pub fn cancel(&mut self) {
        if self.armed.take().is_some() {
            self.generation = self.generation.wrapping_add(1);
            tracing::trace!("rotation timer cancelled (generation {})", self.generation);
        }
    }

    /// True while armed.
    pub fn is_armed(&self) -> bool {
        self.armed.is_some()
    }

    /// Mode of the armed timer.
    pub fn mode(&self) -> Option<TimerMode> {
        self.armed.map(|a| a.mode)
    }

    /// Returns a token if a tick is due at `now_ms`.
    ///
    /// At most one tick is produced per call. A caller that fell several
    /// periods behind gets one tick and the schedule restarts from `now_ms`.
    pub fn poll(&mut self, now_ms: u64) -> Option<TimerToken> {
        let period = self.period_ms;
        let armed = self.armed.as_mut()?;
        if now_ms < armed.next_due_ms {
            return None;
        }
        let behind = now_ms - armed.next_due_ms;
        armed.next_due_ms = if behind >= period {
            now_ms.saturating_add(period)
        } else {
            armed.next_due_ms.saturating_add(period)
        };
        let mode = armed.mode;
        Some(self.token(mode))
    }

    /// True if `token` belongs to the current generation of an armed timer.
    pub fn accept(&self, token: TimerToken) -> bool {
        let live = self.armed.is_some() && token.generation == self.generation;
        if !live {
            tracing::trace!(
                "ignoring stale rotation tick (generation {}, current {})",
                token.generation,
                self.generation
            );
        }
        live
    }

    fn token(&self, mode: TimerMode) -> TimerToken {
        TimerToken {
            generation: self.generation,
            mode,
        }
    }
}

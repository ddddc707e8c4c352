//! Movement classification from the decoded ground-speed field
//!
//! Turns noisy near-zero speed samples into a stable movement state using
//! fixed thresholds and a hold-off debounce, and raises each status
//! notification exactly once per streak so the display is never
//! re-announced a status it already shows.

use crate::types::{MovementNotice, MovementState};
use std::time::{Duration, Instant};

/// Speeds at or below this classify as stopped (knots)
pub const STOPPED_MAX_KNOTS: f64 = 0.2;
/// Speeds at or above this classify as flying (knots)
pub const FLYING_MIN_KNOTS: f64 = 30.0;
/// Time spent in Stopped before the stopped notice fires
pub const STOPPED_HOLDOFF: Duration = Duration::from_millis(6000);

/// Map a ground speed in knots to a movement state.
///
/// An empty speed field reads as 0 upstream, so a missing value lands in
/// Stopped rather than erroring.
pub fn classify_speed(knots: f64) -> MovementState {
    if knots <= STOPPED_MAX_KNOTS {
        MovementState::Stopped
    } else if knots < FLYING_MIN_KNOTS {
        MovementState::Taxying
    } else {
        MovementState::Flying
    }
}

/// Debounced movement state machine.
///
/// The caller supplies the monotonic time with each sample, so the
/// hold-off behaves identically under test and on a live feed.
#[derive(Debug)]
pub struct MovementClassifier {
    state: MovementState,
    stopped_since: Option<Instant>,
    stopped_latched: bool,
    taxying_latched: bool,
    holdoff: Duration,
}

impl MovementClassifier {
    pub fn new() -> Self {
        Self::with_holdoff(STOPPED_HOLDOFF)
    }

    pub fn with_holdoff(holdoff: Duration) -> Self {
        Self {
            state: MovementState::Stopped,
            stopped_since: None,
            stopped_latched: false,
            taxying_latched: false,
            holdoff,
        }
    }

    pub fn state(&self) -> MovementState {
        self.state
    }

    pub fn stopped_latched(&self) -> bool {
        self.stopped_latched
    }

    pub fn taxying_latched(&self) -> bool {
        self.taxying_latched
    }

    /// Feed one ground-speed sample. Returns the one-shot notice raised by
    /// this sample, if any.
    pub fn update(&mut self, ground_speed: f64, now: Instant) -> Option<MovementNotice> {
        match classify_speed(ground_speed) {
            MovementState::Stopped => {
                self.taxying_latched = false;
                let since = match self.stopped_since {
                    Some(t) if self.state == MovementState::Stopped => t,
                    // A new stopped streak begins now.
                    _ => {
                        self.stopped_since = Some(now);
                        now
                    }
                };
                self.state = MovementState::Stopped;
                if !self.stopped_latched && now.duration_since(since) >= self.holdoff {
                    self.stopped_latched = true;
                    return Some(MovementNotice::Stopped);
                }
            }
            MovementState::Taxying => {
                self.stopped_latched = false;
                self.stopped_since = None;
                self.state = MovementState::Taxying;
                if !self.taxying_latched {
                    self.taxying_latched = true;
                    return Some(MovementNotice::Taxying);
                }
            }
            MovementState::Flying => {
                self.stopped_since = None;
                self.stopped_latched = false;
                self.taxying_latched = false;
                self.state = MovementState::Flying;
            }
        }
        None
    }
}

impl Default for MovementClassifier {
    fn default() -> Self {
        Self::new()
    }
}

//! Hold-to-confirm click state machine with a global cooldown.
//!
//! The temporal core of the keyboard: per frame it takes the hovered key,
//! the pinch distance, and a monotonic timestamp, and decides whether a
//! press starts, keeps filling, confirms, or cancels. Time is supplied by
//! the caller, so the machine can be driven with synthetic clocks in tests.

use std::time::Duration;

use crate::config::InteractionThresholds;
use crate::layout::KeyId;

/// Current phase of the single click session.
///
/// A confirmed click is momentary (reported by [`ClickTracker::step`]'s
/// return value), and the cooldown is a timer rather than a phase, so the
/// machine only ever rests in these two states.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickPhase {
    Idle,
    Pressing { key: KeyId, start: Duration },
}

/// Single-pointer click tracker: at most one press session at a time, plus
/// the process-wide last-confirmation timestamp that gates the cooldown.
#[derive(Debug)]
pub struct ClickTracker {
    thresholds: InteractionThresholds,
    phase: ClickPhase,
    last_confirm: Option<Duration>,
}

impl ClickTracker {
    pub fn new(thresholds: InteractionThresholds) -> Self {
        Self {
            thresholds,
            phase: ClickPhase::Idle,
            last_confirm: None,
        }
    }

    pub fn phase(&self) -> ClickPhase {
        self.phase
    }

    /// Drop any in-progress press. Called when the frame has no usable hand
    /// or the hand is a fist (global interaction pause). The cooldown clock
    /// is untouched; it outlives press sessions.
    pub fn reset(&mut self) {
        self.phase = ClickPhase::Idle;
    }

    /// Advance one frame. Returns the key whose click confirmed this frame,
    /// if any.
    ///
    /// Rules, in priority order:
    /// 1. no hover, or pinch at/above the click threshold: back to Idle;
    /// 2. Idle over a key with a sub-threshold pinch: start Pressing;
    /// 3. hover moved off the pressed key: back to Idle (a fresh press may
    ///    start on the next qualifying frame);
    /// 4. hold complete: confirm iff the cooldown window since the last
    ///    confirmation has fully elapsed, otherwise drop silently. Either
    ///    way the session ends - the cooldown gates confirmation only,
    ///    never re-entry into Pressing.
    pub fn step(
        &mut self,
        hovered: Option<KeyId>,
        pinch_distance: f64,
        now: Duration,
    ) -> Option<KeyId> {
        let Some(key) = hovered else {
            self.phase = ClickPhase::Idle;
            return None;
        };
        if pinch_distance >= self.thresholds.click_distance_px {
            self.phase = ClickPhase::Idle;
            return None;
        }

        match self.phase {
            ClickPhase::Idle => {
                self.phase = ClickPhase::Pressing { key, start: now };
                None
            }
            ClickPhase::Pressing { key: held, .. } if held != key => {
                self.phase = ClickPhase::Idle;
                None
            }
            ClickPhase::Pressing { key: held, start } => {
                let elapsed = now.saturating_sub(start).as_secs_f64();
                if elapsed < self.thresholds.hold_duration {
                    return None;
                }
                self.phase = ClickPhase::Idle;
                if self.cooldown_open(now) {
                    self.last_confirm = Some(now);
                    Some(held)
                } else {
                    None
                }
            }
        }
    }

    /// Whether enough time has passed since the last confirmation.
    fn cooldown_open(&self, now: Duration) -> bool {
        match self.last_confirm {
            None => true,
            Some(at) => now.saturating_sub(at).as_secs_f64() > self.thresholds.cooldown,
        }
    }

    /// Fill fraction of the active press, if any, for render feedback.
    pub fn progress(&self, now: Duration) -> Option<(KeyId, f64)> {
        let ClickPhase::Pressing { key, start } = self.phase else {
            return None;
        };
        let elapsed = now.saturating_sub(start).as_secs_f64();
        Some((key, (elapsed / self.thresholds.hold_duration).clamp(0.0, 1.0)))
    }

    /// Remaining cooldown as a fraction of the full window; 0.0 once open.
    /// Always measured against the global last confirmation, even while a
    /// new press is filling.
    pub fn cooldown_fraction(&self, now: Duration) -> f64 {
        let Some(at) = self.last_confirm else {
            return 0.0;
        };
        let remaining = self.thresholds.cooldown - now.saturating_sub(at).as_secs_f64();
        (remaining / self.thresholds.cooldown).clamp(0.0, 1.0)
    }
}

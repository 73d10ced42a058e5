//! Sensor power-cycle controller.
//!
//! Hung sensors (a DHT22 is the classic case) often come back after a
//! power cycle.  The controller watches the reading stream and, while it
//! stays NaN, toggles the sensor's VCC line off and back on.
//!
//! ## Cycle
//!
//! ```text
//!            NaN, gate open                NaN, gate open
//!  Energized ──────────────▶ De-energized ──────────────▶ Energized
//!      ▲                                                  (attempt += 1)
//!      │                 any valid reading                     │
//!      └──────────────── clears attempts ◀─────────────────────┘
//! ```
//!
//! - The *gate* opens once `off_interval_ms` has elapsed since the last
//!   time it opened.  Each open restarts the timer, even when the attempt
//!   budget blocks the toggle.
//! - One attempt is one full off→on cycle, counted when power returns.
//! - With `max_attempts > 0` the controller stops toggling after that many
//!   cycles until a valid reading ends the streak.
//!
//! The controller is polled; it has no timer or task of its own.

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};

use crate::config::ResetConfig;
use crate::diagnostics::ResetStats;
use crate::error::Result;
use crate::ports::{ClockPort, Level, OutputPort};

/// What a single [`ResetController::reset_vcc`] call did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ResetAction {
    /// Valid reading, no streak in progress.
    Healthy,
    /// Valid reading that ended a streak after `attempts` power cycles.
    Recovered { attempts: u8 },
    /// NaN, but the off-interval has not elapsed yet.
    RateLimited,
    /// NaN; supply switched off (first half of a cycle).
    PowerOff,
    /// NaN; supply restored, completing attempt number `attempt`.
    PowerOn { attempt: u8 },
    /// NaN and gate open, but the attempt budget is spent.
    Exhausted,
}

impl ResetAction {
    /// `true` if this call wrote the output line.
    pub fn toggled(self) -> bool {
        matches!(self, Self::PowerOff | Self::PowerOn { .. })
    }
}

/// Power-cycles a sensor through its supply line while its readings are NaN.
pub struct ResetController<O, C> {
    output: O,
    clock: C,
    line: u8,
    off_interval_ms: u16,
    max_attempts: u8,
    attempt_count: u8,
    last_toggle_ms: u32,
    energized: bool,
    total_resets: u32,
}

impl<O: OutputPort, C: ClockPort> ResetController<O, C> {
    /// Build a controller and put its line into output mode.
    ///
    /// The off-interval is clamped to
    /// [`MIN_OFF_INTERVAL_MS`](crate::config::MIN_OFF_INTERVAL_MS).  The line
    /// is assumed energized; call [`begin`](Self::begin) to assert it.
    pub fn new(config: ResetConfig, mut output: O, clock: C) -> Result<Self> {
        output.configure_output(config.line)?;

        let off_interval_ms = config.effective_off_interval_ms();
        if off_interval_ms != config.off_interval_ms {
            debug!(
                "reset: off-interval {} ms below floor, using {} ms",
                config.off_interval_ms, off_interval_ms
            );
        }

        Ok(Self {
            output,
            clock,
            line: config.line,
            off_interval_ms,
            max_attempts: config.max_attempts,
            attempt_count: 0,
            last_toggle_ms: 0,
            energized: true,
            total_resets: 0,
        })
    }

    /// Take ownership of the line and power the sensor.  Safe to repeat.
    pub fn begin(&mut self) -> Result<()> {
        self.output.configure_output(self.line)?;
        self.output.write_output(self.line, Level::Energized)?;
        self.energized = true;
        info!("reset: line {} energized", self.line);
        Ok(())
    }

    /// Feed the latest sensor reading.  Call once per polling cycle.
    ///
    /// A number clears the failure streak.  NaN advances the power-cycle
    /// state machine if the off-interval has elapsed.  Errors come only
    /// from the output driver; state is left untouched when a write fails.
    pub fn reset_vcc(&mut self, reading: f32) -> Result<ResetAction> {
        if !reading.is_nan() {
            if self.attempt_count > 0 {
                let attempts = self.attempt_count;
                self.attempt_count = 0;
                info!("reset: sensor recovered after {} power cycle(s)", attempts);
                return Ok(ResetAction::Recovered { attempts });
            }
            return Ok(ResetAction::Healthy);
        }

        let now = self.clock.now_ms();
        if now.wrapping_sub(self.last_toggle_ms) < u32::from(self.off_interval_ms) {
            return Ok(ResetAction::RateLimited);
        }

        let action = if !self.attempts_available() {
            debug!(
                "reset: {} attempt(s) spent, waiting for a valid reading",
                self.attempt_count
            );
            ResetAction::Exhausted
        } else if self.energized {
            self.output.write_output(self.line, Level::DeEnergized)?;
            self.energized = false;
            info!("reset: line {} de-energized", self.line);
            ResetAction::PowerOff
        } else {
            self.output.write_output(self.line, Level::Energized)?;
            self.energized = true;
            self.attempt_count = self.attempt_count.saturating_add(1);
            self.total_resets = self.total_resets.saturating_add(1);
            info!(
                "reset: line {} re-energized (attempt {}, lifetime {})",
                self.line, self.attempt_count, self.total_resets
            );
            if self.max_attempts != 0 && self.attempt_count == self.max_attempts {
                warn!(
                    "reset: attempt budget of {} used up on line {}",
                    self.max_attempts, self.line
                );
            }
            ResetAction::PowerOn {
                attempt: self.attempt_count,
            }
        };

        self.last_toggle_ms = now;
        Ok(action)
    }

    fn attempts_available(&self) -> bool {
        self.max_attempts == 0 || self.attempt_count < self.max_attempts
    }

    // ── Read-only accessors ───────────────────────────────────

    /// Lifetime count of completed off→on cycles, successful or not.
    pub fn total_resets(&self) -> u32 {
        self.total_resets
    }

    /// Cycles completed in the current invalid streak.
    pub fn attempt_count(&self) -> u8 {
        self.attempt_count
    }

    /// Last level written to the line.
    pub fn is_energized(&self) -> bool {
        self.energized
    }

    /// `true` once the streak has used the whole attempt budget.
    pub fn is_exhausted(&self) -> bool {
        !self.attempts_available()
    }

    pub fn line(&self) -> u8 {
        self.line
    }

    /// Enforced off-interval, after clamping.
    pub fn off_interval_ms(&self) -> u16 {
        self.off_interval_ms
    }

    pub fn max_attempts(&self) -> u8 {
        self.max_attempts
    }

    pub fn last_toggle_ms(&self) -> u32 {
        self.last_toggle_ms
    }

    pub fn stats(&self) -> ResetStats {
        ResetStats {
            line: self.line,
            total_resets: self.total_resets,
            attempt_count: self.attempt_count,
            max_attempts: self.max_attempts,
            energized: self.energized,
            exhausted: self.is_exhausted(),
            last_toggle_ms: self.last_toggle_ms,
            off_interval_ms: self.off_interval_ms,
        }
    }

    pub fn output(&self) -> &O {
        &self.output
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    /// Release the collaborators.
    pub fn into_parts(self) -> (O, C) {
        (self.output, self.clock)
    }
}

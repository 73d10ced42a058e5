//! Port traits — the boundary between the reset logic and the hardware.
//!
//! ```text
//!   Adapter ──▶ Port trait ──▶ ResetController (domain)
//! ```
//!
//! The controller consumes these via generics, so it never touches a GPIO
//! register or a timer directly.  Adapters live in [`crate::adapters`];
//! tests substitute recording mocks.

use crate::error::OutputError;

// ───────────────────────────────────────────────────────────────
// Output line (driven adapter: domain → hardware)
// ───────────────────────────────────────────────────────────────

/// Logical level of the sensor supply line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    /// Line driven active: sensor powered.
    Energized,
    /// Line driven inactive: sensor unpowered.
    DeEnergized,
}

impl Level {
    pub fn is_energized(self) -> bool {
        matches!(self, Self::Energized)
    }
}

impl From<bool> for Level {
    fn from(high: bool) -> Self {
        if high { Self::Energized } else { Self::DeEnergized }
    }
}

/// Write-side port: configure and drive a digital output line.
pub trait OutputPort {
    /// Put `line` into output mode.  Must be idempotent.
    fn configure_output(&mut self, line: u8) -> Result<(), OutputError>;

    /// Drive `line` to `level`.
    fn write_output(&mut self, line: u8, level: Level) -> Result<(), OutputError>;
}

impl<T: OutputPort + ?Sized> OutputPort for &mut T {
    fn configure_output(&mut self, line: u8) -> Result<(), OutputError> {
        (**self).configure_output(line)
    }

    fn write_output(&mut self, line: u8, level: Level) -> Result<(), OutputError> {
        (**self).write_output(line, level)
    }
}

// ───────────────────────────────────────────────────────────────
// Clock (driven adapter: hardware → domain)
// ───────────────────────────────────────────────────────────────

/// Millisecond timestamp source.
///
/// Non-decreasing except for a single wrap from `u32::MAX` back to zero
/// (about 49.7 days).  Consumers must compute elapsed time with
/// `now.wrapping_sub(then)`, which stays correct across one wrap.
pub trait ClockPort {
    fn now_ms(&self) -> u32;
}

impl<T: ClockPort + ?Sized> ClockPort for &T {
    fn now_ms(&self) -> u32 {
        (**self).now_ms()
    }
}

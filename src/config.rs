//! Reset controller configuration.
//!
//! Everything the controller needs is fixed at construction time.  The
//! embedding application may persist a [`ResetConfig`] blob (postcard) in
//! NVS; runtime counters are never persisted.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::pins;

/// Floor for the off-interval (ms).  The DHT22 needs 2000 ms between reads,
/// so toggling any faster would interrupt the driver mid-read.
pub const MIN_OFF_INTERVAL_MS: u16 = 2001;

/// Off-interval used when none is configured (ms).
pub const DEFAULT_OFF_INTERVAL_MS: u16 = 2100;

/// Maximum attempts used when none is configured.  `0` = retry forever.
pub const DEFAULT_MAX_ATTEMPTS: u8 = 0;

/// Construction-time configuration for a
/// [`ResetController`](crate::controller::ResetController).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResetConfig {
    /// Output line that powers the sensor.
    pub line: u8,
    /// Requested time between toggles (ms).  Clamped to
    /// [`MIN_OFF_INTERVAL_MS`] by [`effective_off_interval_ms`](Self::effective_off_interval_ms).
    pub off_interval_ms: u16,
    /// Power-cycles allowed per invalid streak.  `0` = unbounded.
    pub max_attempts: u8,
}

impl Default for ResetConfig {
    fn default() -> Self {
        Self {
            line: pins::SENSOR_VCC_GPIO,
            off_interval_ms: DEFAULT_OFF_INTERVAL_MS,
            max_attempts: DEFAULT_MAX_ATTEMPTS,
        }
    }
}

impl ResetConfig {
    /// Default timing on the given output line.
    pub fn new(line: u8) -> Self {
        Self {
            line,
            ..Self::default()
        }
    }

    pub fn with_off_interval_ms(mut self, off_interval_ms: u16) -> Self {
        self.off_interval_ms = off_interval_ms;
        self
    }

    pub fn with_max_attempts(mut self, max_attempts: u8) -> Self {
        self.max_attempts = max_attempts;
        self
    }

    /// Off-interval actually enforced: anything not strictly above the
    /// floor becomes the floor.
    pub fn effective_off_interval_ms(&self) -> u16 {
        if self.off_interval_ms > MIN_OFF_INTERVAL_MS {
            self.off_interval_ms
        } else {
            MIN_OFF_INTERVAL_MS
        }
    }

    /// `true` when retries are unbounded.
    pub fn is_unbounded(&self) -> bool {
        self.max_attempts == 0
    }

    /// Encode as a postcard blob for NVS storage.
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        postcard::to_allocvec(self).map_err(|_| Error::Config("encode failed"))
    }

    /// Decode a blob written by [`to_bytes`](Self::to_bytes).
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        postcard::from_bytes(bytes).map_err(|_| Error::Config("corrupted blob"))
    }
}

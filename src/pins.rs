//! GPIO / peripheral pin assignments for the reference board.
//!
//! Single source of truth: the device binary and the config defaults
//! reference this module rather than hard-coding pin numbers.

// ---------------------------------------------------------------------------
// Sensor supply
// ---------------------------------------------------------------------------

/// Digital output feeding the sensor's VCC rail (HIGH = powered).
/// The sensor draws its supply straight from this pin, so keep its
/// current within the GPIO drive limit.
pub const SENSOR_VCC_GPIO: u8 = 4;

// ---------------------------------------------------------------------------
// Sensor signal — Analog (ADC1)
// ---------------------------------------------------------------------------

/// NTC thermistor divider output, ADC1 channel 8 (GPIO 9 on ESP32-S3).
pub const THERMISTOR_ADC_GPIO: u8 = 9;
/// ADC1 channel number matching [`THERMISTOR_ADC_GPIO`].
pub const THERMISTOR_ADC_CHANNEL: u32 = 8;

// ---------------------------------------------------------------------------
// Polling
// ---------------------------------------------------------------------------

/// Main-loop polling period.  Must exceed the sensor's minimum read cycle.
pub const POLL_INTERVAL_MS: u32 = 2_500;

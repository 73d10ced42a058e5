//! HardReset: sensor VCC power-cycle controller.
//!
//! Some sensors (the DHT22 above all) occasionally hang and only recover
//! when unplugged.  Powering such a sensor from a GPIO lets
//! [`ResetController`] do the unplugging: while readings come back NaN it
//! toggles the supply off and on, rate-limited to the sensor's read cycle
//! and bounded per failure streak.
//!
//! ```text
//!   poll loop ──reading──▶ ResetController ──▶ OutputPort (HalOutput / mock)
//!                                 │
//!                                 └──────────▶ ClockPort  (MonotonicClock / mock)
//! ```
//!
//! All ESP-IDF-specific code is guarded by `#[cfg(target_os = "espidf")]`
//! within each module, so the crate builds and tests on the host.

#![deny(unused_must_use)]

pub mod adapters;
pub mod config;
pub mod controller;
pub mod diagnostics;
pub mod drivers;
pub mod error;
pub mod pins;
pub mod ports;
pub mod sensors;

pub use config::ResetConfig;
pub use controller::{ResetAction, ResetController};
pub use error::{Error, OutputError, Result};
pub use ports::{ClockPort, Level, OutputPort};

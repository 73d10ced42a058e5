//! NTC thermistor temperature sensor (10 kOhm @ 25 C, B = 3950).
//!
//! Wired in a voltage divider with a fixed 10 kOhm resistor and powered
//! from the switched VCC line, so it goes dark whenever the controller
//! cuts power.  A sample pinned to either rail means the divider is open,
//! shorted or unpowered; that is reported as `f32::NAN`, the invalid-reading
//! signal the reset controller acts on.
//!
//! ## Dual-target design
//!
//! On ESP-IDF: reads ADC1 via the oneshot API (initialised by hw_init).
//! On host/test: reads from a static AtomicU16 for injection.

use core::sync::atomic::AtomicU16;
#[cfg(not(target_os = "espidf"))]
use core::sync::atomic::Ordering;

#[cfg(target_os = "espidf")]
use crate::drivers::hw_init;

/// Injected value that simulates an ADC driver error.
pub const SIM_READ_ERROR: u16 = u16::MAX;

static SIM_ADC: AtomicU16 = AtomicU16::new(2048);

#[cfg(not(target_os = "espidf"))]
pub fn sim_set_adc(raw: u16) {
    SIM_ADC.store(raw, Ordering::Relaxed);
}

const R25: f32 = 10_000.0;
const BETA: f32 = 3950.0;
const T25_K: f32 = 298.15;
const R_DIVIDER: f32 = 10_000.0;
const ADC_MAX: f32 = 4095.0;
const V_REF: f32 = 3.3;
/// Distance from either rail (V) below which a sample is treated as dead.
const RAIL_MARGIN_V: f32 = 0.01;

pub struct ThermistorSensor {
    adc_channel: u32,
}

impl ThermistorSensor {
    pub fn new(adc_channel: u32) -> Self {
        Self { adc_channel }
    }

    /// Temperature in Celsius, or NaN when the sensor is not answering.
    pub fn read(&self) -> f32 {
        match self.read_adc() {
            Some(raw) => adc_to_celsius(raw),
            None => f32::NAN,
        }
    }

    #[cfg(target_os = "espidf")]
    fn read_adc(&self) -> Option<u16> {
        hw_init::adc1_read(self.adc_channel)
    }

    #[cfg(not(target_os = "espidf"))]
    fn read_adc(&self) -> Option<u16> {
        let _ = self.adc_channel;
        match SIM_ADC.load(Ordering::Relaxed) {
            SIM_READ_ERROR => None,
            raw => Some(raw),
        }
    }
}

/// Beta-equation conversion.  NaN for rail-pinned or nonsensical samples.
pub fn adc_to_celsius(raw: u16) -> f32 {
    let voltage = (f32::from(raw) / ADC_MAX) * V_REF;
    if voltage <= RAIL_MARGIN_V || voltage >= (V_REF - RAIL_MARGIN_V) {
        return f32::NAN;
    }
    let r_ntc = R_DIVIDER * voltage / (V_REF - voltage);
    let inv_t = (1.0 / T25_K) + (1.0 / BETA) * (r_ntc / R25).ln();
    if inv_t <= 0.0 {
        return f32::NAN;
    }
    (1.0 / inv_t) - 273.15
}

//! HardReset firmware — main entry point.
//!
//! Polls an NTC thermistor powered from a GPIO and power-cycles it through
//! that GPIO whenever readings go dead.
//!
//! ```text
//!  ┌──────────────┐  reading  ┌─────────────────┐  Level   ┌────────────────┐
//!  │ Thermistor   │──────────▶│ ResetController │─────────▶│ HalOutput      │
//!  │ (ADC1)       │           │                 │          │ (PinDriver)    │
//!  └──────────────┘           └─────────────────┘          └────────────────┘
//!                                     ▲  now_ms
//!                              MonotonicClock (esp_timer)
//! ```

use anyhow::Result;
use esp_idf_svc::hal::delay::FreeRtos;
use esp_idf_svc::hal::gpio::PinDriver;
use esp_idf_svc::hal::peripherals::Peripherals;
use log::{error, info, warn};

use hardreset::adapters::output::HalOutput;
use hardreset::adapters::time::MonotonicClock;
use hardreset::diagnostics::ResetHistory;
use hardreset::drivers::hw_init;
use hardreset::pins;
use hardreset::sensors::thermistor::ThermistorSensor;
use hardreset::{ClockPort, ResetAction, ResetConfig, ResetController};

/// Log a stats line every this many polls (~1 min at 2.5 s).
const STATS_EVERY_POLLS: u32 = 24;

fn main() -> Result<()> {
    // ── 1. ESP-IDF bootstrap ──────────────────────────────────
    esp_idf_svc::sys::link_patches();
    esp_idf_logger::init()?;

    info!("HardReset v{}", env!("CARGO_PKG_VERSION"));

    // ── 2. Peripherals ────────────────────────────────────────
    if let Err(e) = hw_init::init_peripherals() {
        error!("HAL init failed: {}", e);
        return Err(e.into());
    }

    let peripherals = Peripherals::take()?;
    // Must match pins::SENSOR_VCC_GPIO.
    let vcc_pin = PinDriver::output(peripherals.pins.gpio4)?;
    let output = HalOutput::new(pins::SENSOR_VCC_GPIO, vcc_pin);
    let clock = MonotonicClock::new();

    // ── 3. Controller ─────────────────────────────────────────
    let config = ResetConfig::new(pins::SENSOR_VCC_GPIO)
        .with_off_interval_ms(3_000)
        .with_max_attempts(5);
    let mut reset = ResetController::new(config, output, &clock)?;
    reset.begin()?;
    info!(
        "reset: line {}, off-interval {} ms, max attempts {}",
        reset.line(),
        reset.off_interval_ms(),
        reset.max_attempts()
    );

    let sensor = ThermistorSensor::new(pins::THERMISTOR_ADC_CHANNEL);
    let mut history = ResetHistory::new();
    let mut polls: u32 = 0;

    // ── 4. Polling loop ───────────────────────────────────────
    loop {
        let reading = sensor.read();
        if reading.is_nan() {
            warn!("sensor: no reading");
        } else {
            info!("sensor: {:.1} C", reading);
        }

        match reset.reset_vcc(reading) {
            Ok(action) => {
                let recorded = history.record(clock.now_ms(), action);
                if recorded && action == ResetAction::Exhausted {
                    warn!("reset: giving up until the sensor answers again");
                }
            }
            // Nothing changed; the next poll retries the write.
            Err(e) => error!("reset: {}", e),
        }

        polls = polls.wrapping_add(1);
        if polls % STATS_EVERY_POLLS == 0 {
            match reset.stats().to_json() {
                Ok(json) => info!("stats: {}", json),
                Err(e) => warn!("stats: {}", e),
            }
        }

        FreeRtos::delay_ms(pins::POLL_INTERVAL_MS);
    }
}

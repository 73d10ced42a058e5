//! embedded-hal output adapter.
//!
//! Binds one [`embedded_hal::digital::OutputPin`] to a line identifier and
//! exposes it as an [`OutputPort`].  Pin direction is fixed by the pin's
//! type (on ESP-IDF, `PinDriver<_, Output>`), so `configure_output` only
//! confirms the line belongs to this adapter.

use embedded_hal::digital::{Error as _, OutputPin};
use log::warn;

use crate::error::OutputError;
use crate::ports::{Level, OutputPort};

/// A single HAL output pin addressed by `line`.
pub struct HalOutput<P> {
    line: u8,
    pin: P,
}

impl<P: OutputPin> HalOutput<P> {
    pub fn new(line: u8, pin: P) -> Self {
        Self { line, pin }
    }

    pub fn line(&self) -> u8 {
        self.line
    }

    pub fn pin(&self) -> &P {
        &self.pin
    }

    pub fn into_inner(self) -> P {
        self.pin
    }

    fn check_line(&self, line: u8) -> Result<(), OutputError> {
        if line == self.line {
            Ok(())
        } else {
            Err(OutputError::UnknownLine(line))
        }
    }
}

impl<P: OutputPin> OutputPort for HalOutput<P> {
    fn configure_output(&mut self, line: u8) -> Result<(), OutputError> {
        self.check_line(line)
    }

    fn write_output(&mut self, line: u8, level: Level) -> Result<(), OutputError> {
        self.check_line(line)?;
        let result = match level {
            Level::Energized => self.pin.set_high(),
            Level::DeEnergized => self.pin.set_low(),
        };
        result.map_err(|e| {
            warn!("output: line {} write {:?} failed: {:?}", line, level, e.kind());
            OutputError::WriteFailed(line)
        })
    }
}

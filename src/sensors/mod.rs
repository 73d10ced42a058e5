//! Reading sources that feed the reset controller.

pub mod thermistor;

//! Unified error types for the HardReset crate.
//!
//! The reset state machine itself never fails: NaN readings are its trigger
//! signal and out-of-range intervals are clamped.  What *can* fail are the
//! collaborators it drives (the output line) and the glue around it
//! (peripheral init, config blobs).  All variants are `Copy` so they pass
//! through the polling loop without allocation.

use core::fmt;

// ---------------------------------------------------------------------------
// Top-level error
// ---------------------------------------------------------------------------

/// Every fallible operation in the crate funnels into this type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// The digital output driver rejected a configure or write.
    Output(OutputError),
    /// Peripheral initialisation failed.
    Init(&'static str),
    /// Configuration could not be encoded or decoded.
    Config(&'static str),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Output(e) => write!(f, "output: {e}"),
            Self::Init(msg) => write!(f, "init: {msg}"),
            Self::Config(msg) => write!(f, "config: {msg}"),
        }
    }
}

impl core::error::Error for Error {}

// ---------------------------------------------------------------------------
// Output driver errors
// ---------------------------------------------------------------------------

/// Failures reported by an [`OutputPort`](crate::ports::OutputPort).
/// Each variant carries the line identifier it concerns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputError {
    /// The line could not be put into output mode.
    ConfigureFailed(u8),
    /// Driving the line HIGH or LOW failed.
    WriteFailed(u8),
    /// The driver does not own the requested line.
    UnknownLine(u8),
}

impl fmt::Display for OutputError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ConfigureFailed(line) => write!(f, "configure failed on line {line}"),
            Self::WriteFailed(line) => write!(f, "write failed on line {line}"),
            Self::UnknownLine(line) => write!(f, "line {line} not owned by driver"),
        }
    }
}

impl From<OutputError> for Error {
    fn from(e: OutputError) -> Self {
        Self::Output(e)
    }
}

// ---------------------------------------------------------------------------
// Convenience Result alias
// ---------------------------------------------------------------------------

/// Crate-wide `Result` alias.
pub type Result<T> = core::result::Result<T, Error>;

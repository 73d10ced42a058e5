//! Adapters — concrete implementations of the port traits.
//!
//! | Adapter  | Implements   | Connects to                          |
//! |----------|--------------|--------------------------------------|
//! | `output` | OutputPort   | any embedded-hal 1.0 `OutputPin`     |
//! | `time`   | ClockPort    | ESP32 `esp_timer` / host `Instant`   |

pub mod output;
pub mod time;

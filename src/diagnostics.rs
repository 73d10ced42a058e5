//! Runtime diagnostics for the reset controller.
//!
//! [`ResetStats`] is a point-in-time snapshot suitable for a log line or a
//! telemetry payload.  [`ResetHistory`] keeps the last few state-changing
//! actions in a fixed-capacity ring so a field report can show *when* the
//! sensor was cycled, not just how often.  Nothing here is persisted.

use heapless::Deque;
use serde::{Deserialize, Serialize};

use crate::controller::ResetAction;
use crate::error::{Error, Result};

const HISTORY_SLOTS: usize = 8;

/// Snapshot of a controller's counters and state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResetStats {
    pub line: u8,
    /// Lifetime count of completed off→on cycles.
    pub total_resets: u32,
    /// Cycles completed in the current streak.
    pub attempt_count: u8,
    /// `0` = unbounded.
    pub max_attempts: u8,
    pub energized: bool,
    /// Attempt budget spent; waiting for a valid reading.
    pub exhausted: bool,
    pub last_toggle_ms: u32,
    pub off_interval_ms: u16,
}

impl ResetStats {
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string(self).map_err(|_| Error::Config("stats encode failed"))
    }
}

/// One recorded action with its clock timestamp.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResetEvent {
    pub at_ms: u32,
    pub action: ResetAction,
}

/// Ring of the most recent state-changing actions.
#[derive(Default)]
pub struct ResetHistory {
    events: Deque<ResetEvent, HISTORY_SLOTS>,
}

impl ResetHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `action` if it changed something worth keeping.
    ///
    /// `Healthy` and `RateLimited` are dropped, and repeated `Exhausted`
    /// entries collapse into the first one.  Returns `true` if stored.
    pub fn record(&mut self, at_ms: u32, action: ResetAction) -> bool {
        match action {
            ResetAction::Healthy | ResetAction::RateLimited => return false,
            ResetAction::Exhausted
                if self
                    .events
                    .back()
                    .is_some_and(|e| e.action == ResetAction::Exhausted) =>
            {
                return false;
            }
            _ => {}
        }

        if self.events.is_full() {
            self.events.pop_front();
        }
        // Cannot fail: a slot was freed above.
        let _ = self.events.push_back(ResetEvent { at_ms, action });
        true
    }

    /// Oldest first.
    pub fn iter(&self) -> impl Iterator<Item = &ResetEvent> {
        self.events.iter()
    }

    pub fn latest(&self) -> Option<&ResetEvent> {
        self.events.back()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn clear(&mut self) {
        self.events.clear();
    }

    pub const fn capacity(&self) -> usize {
        HISTORY_SLOTS
    }
}

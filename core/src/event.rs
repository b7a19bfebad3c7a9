//! Economy events — the notifications the core hands to its observers.
//!
//! RULE: The core never calls into presentation code. It emits events;
//! observers (UI refresh, audio cues, the run session's log) react to them.

use crate::{
    outcome::RunOutcome,
    types::{Currency, DayIndex, Level, RunId},
    upgrade::UpgradeKind,
};
use serde::{Deserialize, Serialize};

/// Variants are appended — never removed or reordered.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum EconEvent {
    // ── Ledger ─────────────────────────────────────
    UpgradePurchased {
        kind:      UpgradeKind,
        new_level: Level,
    },

    // ── Run lifecycle ──────────────────────────────
    RunStarted {
        run_id: RunId,
    },
    RunRecorded {
        run_id:    RunId,
        outcome:   RunOutcome,
        day_index: DayIndex,
        currency:  Currency,
    },
}

impl EconEvent {
    /// Stable name used for the `event_type` column of the log.
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::UpgradePurchased { .. } => "upgrade_purchased",
            Self::RunStarted { .. }       => "run_started",
            Self::RunRecorded { .. }      => "run_recorded",
        }
    }
}

/// One entry of a run's event log.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventLogEntry {
    pub seq:        u64,
    pub run_id:     RunId,
    pub event_type: String,
    pub payload:    String, // JSON-serialized EconEvent
}

//! Run outcome snapshot — the summary of a finished run.
//!
//! Written once per run by `record()`, read any number of times by the
//! end-of-run screen, cleared by `reset()` when the next run begins.
//! Out-of-range inputs are clamped, never rejected.

use crate::types::{Currency, DayIndex};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Lowest day index a recorded run can report.
pub const MIN_RECORDED_DAY: DayIndex = 1;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RunOutcome {
    #[default]
    None,
    Victory,
    Defeat,
}

/// Raw end-of-run figures as reported by the simulation.
/// Values may be out of range; `record()` clamps them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RunStats {
    pub cure_progress:   f64,
    pub total_outposts:  i64,
    pub active_outposts: i64,
    pub currency:        Currency,
    pub day_index:       i64,
    pub saved_provinces: i64,
    pub lost_provinces:  i64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RunOutcomeSnapshot {
    outcome:         RunOutcome,
    cure_progress:   f64,
    total_outposts:  u32,
    active_outposts: u32,
    currency:        Currency,
    day_index:       DayIndex,
    saved_provinces: u32,
    lost_provinces:  u32,
    recorded_at:     Option<DateTime<Utc>>,
}

impl RunOutcomeSnapshot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Overwrite every field from `stats`.
    ///
    /// With no stats the figures fall back to the "no data" baseline
    /// (zero progress, zero counts, day 1) but `outcome` is kept.
    pub fn record(&mut self, outcome: RunOutcome, stats: Option<&RunStats>) {
        let baseline = RunStats::default();
        let stats = stats.unwrap_or(&baseline);

        *self = Self {
            outcome,
            cure_progress:   clamp_fraction(stats.cure_progress),
            total_outposts:  clamp_count(stats.total_outposts),
            active_outposts: clamp_count(stats.active_outposts),
            currency:        stats.currency,
            day_index:       clamp_count(stats.day_index).max(MIN_RECORDED_DAY),
            saved_provinces: clamp_count(stats.saved_provinces),
            lost_provinces:  clamp_count(stats.lost_provinces),
            recorded_at:     Some(Utc::now()),
        };

        log::info!(
            "run outcome recorded: {:?} day={} cure={:.2} currency={}",
            self.outcome, self.day_index, self.cure_progress, self.currency
        );
    }

    /// Restore the "no outcome" baseline.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn has_outcome(&self) -> bool {
        self.outcome != RunOutcome::None
    }

    pub fn outcome(&self) -> RunOutcome              { self.outcome }
    pub fn cure_progress(&self) -> f64               { self.cure_progress }
    pub fn total_outposts(&self) -> u32              { self.total_outposts }
    pub fn active_outposts(&self) -> u32             { self.active_outposts }
    pub fn currency(&self) -> Currency               { self.currency }
    pub fn day_index(&self) -> DayIndex              { self.day_index }
    pub fn saved_provinces(&self) -> u32             { self.saved_provinces }
    pub fn lost_provinces(&self) -> u32              { self.lost_provinces }
    pub fn recorded_at(&self) -> Option<DateTime<Utc>> { self.recorded_at }
}

fn clamp_fraction(value: f64) -> f64 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(0.0, 1.0)
    }
}

fn clamp_count(value: i64) -> u32 {
    value.clamp(0, i64::from(u32::MAX)) as u32
}

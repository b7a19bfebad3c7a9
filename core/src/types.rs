//! Shared primitive types used across the economy core.

/// An amount of in-game currency. Signed so that callers may hold debt.
pub type Currency = i64;

/// An upgrade level. Level 0 means "never purchased".
pub type Level = u32;

/// A run day. Day 1 is the first day of a run.
pub type DayIndex = u32;

/// The canonical run identifier.
pub type RunId = String;

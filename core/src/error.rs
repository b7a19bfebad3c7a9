use crate::{types::{Currency, Level}, upgrade::UpgradeKind};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum EconError {
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Cannot read {path}: {source}")]
    Io {
        path:   String,
        #[source]
        source: std::io::Error,
    },

    #[error("Upgrade '{kind}' is defined more than once")]
    DuplicateDefinition { kind: UpgradeKind },

    #[error("Upgrade '{kind}' has {len} bonus entries but max level {max_level}")]
    BonusScheduleTooShort {
        kind:      UpgradeKind,
        max_level: Level,
        len:       usize,
    },

    #[error("Upgrade '{kind}' has a bonus schedule but is not a one-time bonus")]
    BonusScheduleUnexpected { kind: UpgradeKind },

    #[error("Upgrade '{kind}' has a negative cost term (base={base_cost}, per_level={cost_per_level})")]
    NegativeCost {
        kind:           UpgradeKind,
        base_cost:      Currency,
        cost_per_level: Currency,
    },

    #[error("Run '{run_id}' already has a recorded outcome")]
    RunAlreadyRecorded { run_id: String },

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub type EconResult<T> = Result<T, EconError>;

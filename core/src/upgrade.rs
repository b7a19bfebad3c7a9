//! Upgrade kinds and their static definitions.
//!
//! RULE: Upgrade variety is data, not code. Every kind shares the same
//! cost curve and bonus formula; only the numbers in its definition differ.

use crate::types::{Currency, Level};
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

/// The seven purchasable upgrade categories.
/// Declaration order is the stable iteration order everywhere.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UpgradeKind {
    // ── Infrastructure / income ─────────────────────
    TaxEfficiency,
    EconomicRecovery,
    EmergencyFunds,

    // ── Cure effectiveness ──────────────────────────
    ResearchEfficiency,
    OutpostCapacity,
    RapidDeployment,
    VaccineBreakthrough,
}

impl UpgradeKind {
    pub const ALL: [UpgradeKind; 7] = [
        Self::TaxEfficiency,
        Self::EconomicRecovery,
        Self::EmergencyFunds,
        Self::ResearchEfficiency,
        Self::OutpostCapacity,
        Self::RapidDeployment,
        Self::VaccineBreakthrough,
    ];

    pub fn group(&self) -> UpgradeGroup {
        match self {
            Self::TaxEfficiency
            | Self::EconomicRecovery
            | Self::EmergencyFunds      => UpgradeGroup::Infrastructure,
            Self::ResearchEfficiency
            | Self::OutpostCapacity
            | Self::RapidDeployment
            | Self::VaccineBreakthrough => UpgradeGroup::CureEffectiveness,
        }
    }

    /// Stable snake_case name, identical to the serde representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::TaxEfficiency       => "tax_efficiency",
            Self::EconomicRecovery    => "economic_recovery",
            Self::EmergencyFunds      => "emergency_funds",
            Self::ResearchEfficiency  => "research_efficiency",
            Self::OutpostCapacity     => "outpost_capacity",
            Self::RapidDeployment     => "rapid_deployment",
            Self::VaccineBreakthrough => "vaccine_breakthrough",
        }
    }
}

impl fmt::Display for UpgradeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for UpgradeKind {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|k| k.as_str() == s)
            .ok_or_else(|| anyhow::anyhow!("Unknown upgrade kind: {s}"))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UpgradeGroup {
    Infrastructure,
    CureEffectiveness,
}

/// Static description of one upgrade kind. Owned by the catalogue.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpgradeDefinition {
    pub kind:              UpgradeKind,
    pub name:              String,
    pub description:       String,
    pub base_cost:         Currency,
    pub cost_per_level:    Currency,
    pub max_level:         Level,
    #[serde(default)]
    pub is_one_time_bonus: bool,
    /// Refund granted on reaching level `i + 1`. Empty unless one-time bonus.
    #[serde(default)]
    pub bonus_amounts:     Vec<Currency>,
    /// Effect contributed per owned level (multiplier delta or flat count).
    #[serde(default)]
    pub effect_per_level:  f64,
}

impl UpgradeDefinition {
    /// Price of buying the next level when currently at `level`.
    /// `None` once the kind is maxed.
    pub fn cost_at(&self, level: Level) -> Option<Currency> {
        if level >= self.max_level {
            return None;
        }
        Some(
            self.cost_per_level
                .saturating_mul(Currency::from(level))
                .saturating_add(self.base_cost),
        )
    }

    /// Bonus paid out on reaching `new_level`. Zero for ordinary upgrades
    /// and for levels the schedule does not cover.
    pub fn bonus_for_level(&self, new_level: Level) -> Currency {
        if !self.is_one_time_bonus || new_level == 0 {
            return 0;
        }
        self.bonus_amounts
            .get(new_level as usize - 1)
            .copied()
            .unwrap_or(0)
    }
}

//! Upgrade catalogue — the immutable table of upgrade definitions.
//!
//! RULE: A catalogue is validated once at construction and never mutated.
//! The built-in table is shared process-wide through `builtin()`.
//! Loaded tables (see config.rs) go through the same validation.

use crate::{
    error::{EconError, EconResult},
    types::Currency,
    upgrade::{UpgradeDefinition, UpgradeKind},
};
use std::{
    collections::BTreeMap,
    sync::{Arc, OnceLock},
};

#[derive(Debug, Clone)]
pub struct UpgradeCatalogue {
    definitions: BTreeMap<UpgradeKind, UpgradeDefinition>,
}

impl UpgradeCatalogue {
    /// Build a catalogue from a list of definitions.
    ///
    /// Rejects duplicate kinds, negative cost terms, and bonus schedules
    /// that do not cover every reachable level. Missing kinds are allowed
    /// (they degrade to "unpurchasable" in the ledger) but are logged.
    pub fn from_definitions(defs: Vec<UpgradeDefinition>) -> EconResult<Self> {
        let mut definitions = BTreeMap::new();

        for def in defs {
            validate_definition(&def)?;
            let kind = def.kind;
            if definitions.insert(kind, def).is_some() {
                return Err(EconError::DuplicateDefinition { kind });
            }
        }

        for kind in UpgradeKind::ALL {
            if !definitions.contains_key(&kind) {
                log::warn!("catalogue: no definition for {kind}; it will never be purchasable");
            }
        }

        Ok(Self { definitions })
    }

    /// The shipped upgrade table. Built on first use.
    pub fn builtin() -> Arc<UpgradeCatalogue> {
        static BUILTIN: OnceLock<Arc<UpgradeCatalogue>> = OnceLock::new();
        BUILTIN
            .get_or_init(|| {
                let catalogue = Self::from_definitions(builtin_definitions())
                    .unwrap_or_else(|e| panic!("built-in upgrade table is invalid: {e}"));
                Arc::new(catalogue)
            })
            .clone()
    }

    pub fn get_definition(&self, kind: UpgradeKind) -> Option<&UpgradeDefinition> {
        self.definitions.get(&kind)
    }

    /// All definitions in enum declaration order.
    pub fn all_definitions(&self) -> impl Iterator<Item = &UpgradeDefinition> {
        self.definitions.values()
    }

    pub fn contains(&self, kind: UpgradeKind) -> bool {
        self.definitions.contains_key(&kind)
    }

    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }
}

fn validate_definition(def: &UpgradeDefinition) -> EconResult<()> {
    if def.is_one_time_bonus {
        if def.bonus_amounts.len() < def.max_level as usize {
            return Err(EconError::BonusScheduleTooShort {
                kind:      def.kind,
                max_level: def.max_level,
                len:       def.bonus_amounts.len(),
            });
        }
    } else if !def.bonus_amounts.is_empty() {
        return Err(EconError::BonusScheduleUnexpected { kind: def.kind });
    }

    if def.max_level == 0 {
        log::warn!("catalogue: {} has max_level 0 and is permanently maxed", def.kind);
    }
    if def.base_cost < 0 || def.cost_per_level < 0 {
        return Err(EconError::NegativeCost {
            kind:           def.kind,
            base_cost:      def.base_cost,
            cost_per_level: def.cost_per_level,
        });
    }
    Ok(())
}

fn def(
    kind:             UpgradeKind,
    name:             &str,
    description:      &str,
    base_cost:        Currency,
    cost_per_level:   Currency,
    max_level:        u32,
    effect_per_level: f64,
) -> UpgradeDefinition {
    UpgradeDefinition {
        kind,
        name: name.into(),
        description: description.into(),
        base_cost,
        cost_per_level,
        max_level,
        is_one_time_bonus: false,
        bonus_amounts: Vec::new(),
        effect_per_level,
    }
}

fn builtin_definitions() -> Vec<UpgradeDefinition> {
    use UpgradeKind::*;

    vec![
        // ── Infrastructure / income ──────────────────────────────────
        def(
            TaxEfficiency, "Tax Efficiency",
            "Collect more revenue from every province each day.",
            100, 50, 5, 0.10,
        ),
        def(
            EconomicRecovery, "Economic Recovery",
            "Infected provinces lose less income.",
            150, 75, 4, 0.08,
        ),
        UpgradeDefinition {
            is_one_time_bonus: true,
            bonus_amounts: vec![200, 300, 500],
            ..def(
                EmergencyFunds, "Emergency Funds",
                "Release a one-time cash reserve on each purchase.",
                80, 80, 3, 0.0,
            )
        },
        // ── Cure effectiveness ───────────────────────────────────────
        def(
            ResearchEfficiency, "Research Efficiency",
            "Outposts contribute more cure progress per day.",
            120, 60, 5, 0.10,
        ),
        def(
            OutpostCapacity, "Outpost Capacity",
            "Allows one additional active outpost per level.",
            200, 100, 3, 1.0,
        ),
        def(
            RapidDeployment, "Rapid Deployment",
            "New outposts become operational sooner.",
            150, 50, 4, 0.15,
        ),
        def(
            VaccineBreakthrough, "Vaccine Breakthrough",
            "Large boost to global cure progress.",
            500, 250, 3, 0.20,
        ),
    ]
}

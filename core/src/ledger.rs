//! Upgrade ledger — per-session upgrade levels and the purchase transaction.
//!
//! RULES:
//!   - One `UpgradeLevel` per kind, created at construction, never removed.
//!   - `purchase()` is the only path that raises a level.
//!   - `reset()` is the only path that lowers one (back to 0).
//!   - The ledger never owns currency. The caller passes its balance in.
//!   - Failure is flat: anything not purchasable returns `PurchaseReceipt::FAILED`.

use crate::{
    catalogue::UpgradeCatalogue,
    event::EconEvent,
    types::{Currency, Level},
    upgrade::{UpgradeGroup, UpgradeKind},
};
use serde::{Deserialize, Serialize};
use std::{collections::BTreeMap, sync::Arc};

/// Sentinel cost for a kind that cannot be bought (maxed or undefined).
pub const UNAFFORDABLE_COST: Currency = Currency::MAX;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpgradeLevel {
    pub kind:          UpgradeKind,
    pub current_level: Level,
}

/// Result of a purchase attempt.
/// Net balance delta of a successful purchase is `bonus - cost`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PurchaseReceipt {
    pub success: bool,
    pub cost:    Currency,
    pub bonus:   Currency,
}

impl PurchaseReceipt {
    pub const FAILED: PurchaseReceipt = PurchaseReceipt { success: false, cost: 0, bonus: 0 };

    pub fn net_delta(&self) -> Currency {
        self.bonus - self.cost
    }
}

/// Anything that wants to hear about successful purchases.
pub trait LedgerObserver {
    fn on_purchased(&mut self, event: &EconEvent);
}

impl<F> LedgerObserver for F
where
    F: FnMut(&EconEvent),
{
    fn on_purchased(&mut self, event: &EconEvent) {
        self(event)
    }
}

/// One presentation row per kind.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LedgerRow {
    pub kind:      UpgradeKind,
    pub name:      String,
    pub level:     Level,
    pub max_level: Level,
    pub next_cost: Option<Currency>,
    pub maxed:     bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LedgerSummary {
    pub rows: Vec<LedgerRow>,
}

pub struct UpgradeLedger {
    catalogue: Arc<UpgradeCatalogue>,
    levels:    BTreeMap<UpgradeKind, UpgradeLevel>,
    observers: Vec<Box<dyn LedgerObserver>>,
}

impl UpgradeLedger {
    pub fn new(catalogue: Arc<UpgradeCatalogue>) -> Self {
        let levels = UpgradeKind::ALL
            .into_iter()
            .map(|kind| (kind, UpgradeLevel { kind, current_level: 0 }))
            .collect();
        Self { catalogue, levels, observers: Vec::new() }
    }

    pub fn catalogue(&self) -> &UpgradeCatalogue {
        &self.catalogue
    }

    /// Register an observer. Observers are called in registration order.
    pub fn subscribe(&mut self, observer: Box<dyn LedgerObserver>) {
        self.observers.push(observer);
    }

    pub fn get_level(&self, kind: UpgradeKind) -> Level {
        self.levels.get(&kind).map(|l| l.current_level).unwrap_or(0)
    }

    /// Price of the next level, or `None` when nothing more can be bought.
    pub fn next_cost(&self, kind: UpgradeKind) -> Option<Currency> {
        self.catalogue
            .get_definition(kind)
            .and_then(|def| def.cost_at(self.get_level(kind)))
    }

    /// Price of the next level, or `UNAFFORDABLE_COST` when maxed/undefined.
    pub fn get_cost(&self, kind: UpgradeKind) -> Currency {
        self.next_cost(kind).unwrap_or(UNAFFORDABLE_COST)
    }

    pub fn is_max_level(&self, kind: UpgradeKind) -> bool {
        match self.catalogue.get_definition(kind) {
            Some(def) => self.get_level(kind) >= def.max_level,
            None      => true,
        }
    }

    pub fn can_afford(&self, kind: UpgradeKind, balance: Currency) -> bool {
        match self.next_cost(kind) {
            Some(cost) => balance >= cost,
            None       => false,
        }
    }

    /// Buy one level of `kind`, paying from `balance`.
    ///
    /// On failure nothing changes and no observer is called.
    /// On success the cost is deducted, the level rises by one, any
    /// one-time bonus for the new level is credited, and every observer
    /// receives one `UpgradePurchased` event.
    pub fn purchase(&mut self, kind: UpgradeKind, balance: &mut Currency) -> PurchaseReceipt {
        if !self.can_afford(kind, *balance) {
            log::debug!("purchase {kind}: not purchasable (balance={balance})");
            return PurchaseReceipt::FAILED;
        }
        let Some(def) = self.catalogue.get_definition(kind) else {
            return PurchaseReceipt::FAILED;
        };
        let Some(cost) = def.cost_at(self.get_level(kind)) else {
            return PurchaseReceipt::FAILED;
        };
        let Some(entry) = self.levels.get_mut(&kind) else {
            return PurchaseReceipt::FAILED;
        };

        *balance = balance.saturating_sub(cost);
        entry.current_level += 1;
        let new_level = entry.current_level;

        let bonus = def.bonus_for_level(new_level);
        *balance = balance.saturating_add(bonus);

        log::debug!(
            "purchase {kind}: level {new_level}/{} cost={cost} bonus={bonus} balance={balance}",
            def.max_level
        );

        let event = EconEvent::UpgradePurchased { kind, new_level };
        for observer in &mut self.observers {
            observer.on_purchased(&event);
        }

        PurchaseReceipt { success: true, cost, bonus }
    }

    /// Zero every level. Bulk operation; observers are not notified.
    pub fn reset(&mut self) {
        for level in self.levels.values_mut() {
            level.current_level = 0;
        }
        log::debug!("ledger reset");
    }

    /// All levels in enum declaration order.
    pub fn levels(&self) -> impl Iterator<Item = &UpgradeLevel> {
        self.levels.values()
    }

    /// Accumulated effect of `kind`: `effect_per_level * level`.
    pub fn effect(&self, kind: UpgradeKind) -> f64 {
        self.catalogue
            .get_definition(kind)
            .map(|def| def.effect_per_level * f64::from(self.get_level(kind)))
            .unwrap_or(0.0)
    }

    /// Sum of levels owned across one upgrade group.
    pub fn group_level_total(&self, group: UpgradeGroup) -> Level {
        self.levels
            .values()
            .filter(|l| l.kind.group() == group)
            .map(|l| l.current_level)
            .sum()
    }

    pub fn summary(&self) -> LedgerSummary {
        let rows = self
            .levels
            .values()
            .map(|l| {
                let def = self.catalogue.get_definition(l.kind);
                LedgerRow {
                    kind:      l.kind,
                    name:      def.map(|d| d.name.clone()).unwrap_or_else(|| l.kind.to_string()),
                    level:     l.current_level,
                    max_level: def.map(|d| d.max_level).unwrap_or(0),
                    next_cost: self.next_cost(l.kind),
                    maxed:     self.is_max_level(l.kind),
                }
            })
            .collect();
        LedgerSummary { rows }
    }
}

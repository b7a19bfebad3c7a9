//! Run session — explicit owner of one run's economy state.
//!
//! The session is passed around by the game-flow controller instead of
//! living in a global. It owns:
//!   - the upgrade ledger (reset at the start of every run),
//!   - the outcome snapshot (recorded once at the end of every run),
//!   - an in-memory event log with JSON payloads.
//!
//! LIFECYCLE: begin_run() -> purchase()* -> end_run() -> begin_run() ...

use crate::{
    catalogue::UpgradeCatalogue,
    error::{EconError, EconResult},
    event::{EconEvent, EventLogEntry},
    ledger::{PurchaseReceipt, UpgradeLedger},
    outcome::{RunOutcome, RunOutcomeSnapshot, RunStats},
    types::{Currency, RunId},
    upgrade::UpgradeKind,
};
use std::sync::Arc;

pub struct RunSession {
    run_id:   RunId,
    ledger:   UpgradeLedger,
    snapshot: RunOutcomeSnapshot,
    log:      Vec<EventLogEntry>,
}

impl RunSession {
    /// New session with a random run id. The first run is already started.
    pub fn new(catalogue: Arc<UpgradeCatalogue>) -> EconResult<Self> {
        Self::with_run_id(new_run_id(), catalogue)
    }

    pub fn with_run_id(run_id: RunId, catalogue: Arc<UpgradeCatalogue>) -> EconResult<Self> {
        let mut session = Self {
            run_id,
            ledger:   UpgradeLedger::new(catalogue),
            snapshot: RunOutcomeSnapshot::new(),
            log:      Vec::new(),
        };
        log::info!("run {} started", session.run_id);
        session.append(EconEvent::RunStarted { run_id: session.run_id.clone() })?;
        Ok(session)
    }

    pub fn run_id(&self) -> &str {
        &self.run_id
    }

    pub fn ledger(&self) -> &UpgradeLedger {
        &self.ledger
    }

    /// Mutable ledger access, for registering observers.
    pub fn ledger_mut(&mut self) -> &mut UpgradeLedger {
        &mut self.ledger
    }

    pub fn snapshot(&self) -> &RunOutcomeSnapshot {
        &self.snapshot
    }

    pub fn event_log(&self) -> &[EventLogEntry] {
        &self.log
    }

    /// Start a fresh run: new run id, zeroed ledger, cleared snapshot.
    pub fn begin_run(&mut self) -> EconResult<()> {
        self.run_id = new_run_id();
        self.ledger.reset();
        self.snapshot.reset();
        log::info!("run {} started", self.run_id);
        self.append(EconEvent::RunStarted { run_id: self.run_id.clone() })
    }

    /// Purchase through the ledger and log the result when it succeeds.
    pub fn purchase(
        &mut self,
        kind:    UpgradeKind,
        balance: &mut Currency,
    ) -> EconResult<PurchaseReceipt> {
        let receipt = self.ledger.purchase(kind, balance);
        if receipt.success {
            let new_level = self.ledger.get_level(kind);
            self.append(EconEvent::UpgradePurchased { kind, new_level })?;
        }
        Ok(receipt)
    }

    /// Record the outcome of the current run. Only one record per run.
    pub fn end_run(&mut self, outcome: RunOutcome, stats: Option<&RunStats>) -> EconResult<()> {
        if self.snapshot.recorded_at().is_some() {
            return Err(EconError::RunAlreadyRecorded { run_id: self.run_id.clone() });
        }
        self.snapshot.record(outcome, stats);
        log::info!("run {} ended: {:?}", self.run_id, outcome);
        self.append(EconEvent::RunRecorded {
            run_id:    self.run_id.clone(),
            outcome,
            day_index: self.snapshot.day_index(),
            currency:  self.snapshot.currency(),
        })
    }

    fn append(&mut self, event: EconEvent) -> EconResult<()> {
        let entry = EventLogEntry {
            seq:        self.log.len() as u64,
            run_id:     self.run_id.clone(),
            event_type: event.type_name().to_string(),
            payload:    serde_json::to_string(&event)?,
        };
        self.log.push(entry);
        Ok(())
    }
}

fn new_run_id() -> RunId {
    format!("run-{}", uuid::Uuid::new_v4())
}

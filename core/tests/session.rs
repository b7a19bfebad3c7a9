//! Run session tests: lifecycle, event log, once-per-run recording.

use outbreak_core::{
    config::EconConfig,
    error::EconError,
    event::EconEvent,
    outcome::{RunOutcome, RunStats},
    session::RunSession,
    upgrade::UpgradeKind,
};

fn build(run_id: &str) -> RunSession {
    let _ = env_logger::builder().is_test(true).try_init();
    RunSession::with_run_id(run_id.to_string(), EconConfig::default_test().catalogue)
        .expect("build session")
}

fn logged_events(session: &RunSession) -> Vec<EconEvent> {
    session
        .event_log()
        .iter()
        .map(|e| serde_json::from_str(&e.payload).expect("payload is an EconEvent"))
        .collect()
}

#[test]
fn successful_purchases_are_logged() {
    let mut session = build("session-purchase");
    let mut balance = 150;

    let ok = session.purchase(UpgradeKind::TaxEfficiency, &mut balance).unwrap();
    let failed = session.purchase(UpgradeKind::TaxEfficiency, &mut balance).unwrap();

    assert!(ok.success);
    assert!(!failed.success);
    assert_eq!(balance, 50);

    let log = session.event_log();
    assert_eq!(log.len(), 2, "run start plus the successful purchase");
    assert_eq!(log[1].event_type, "upgrade_purchased");
    assert_eq!(log[1].run_id, "session-purchase");
    assert_eq!(
        logged_events(&session),
        vec![
            EconEvent::RunStarted { run_id: "session-purchase".into() },
            EconEvent::UpgradePurchased { kind: UpgradeKind::TaxEfficiency, new_level: 1 },
        ]
    );
}

#[test]
fn end_run_records_once() {
    let mut session = build("session-end");
    let stats = RunStats { cure_progress: 0.5, day_index: 30, ..RunStats::default() };

    session.end_run(RunOutcome::Defeat, Some(&stats)).unwrap();
    assert_eq!(session.snapshot().outcome(), RunOutcome::Defeat);
    assert_eq!(session.snapshot().day_index(), 30);

    let err = session
        .end_run(RunOutcome::Victory, Some(&stats))
        .expect_err("second record in the same run must fail");
    assert!(matches!(err, EconError::RunAlreadyRecorded { .. }), "unexpected error: {err}");
    assert_eq!(session.snapshot().outcome(), RunOutcome::Defeat, "first record is kept");
}

#[test]
fn begin_run_clears_previous_run() {
    let mut session = build("session-cycle");
    let mut balance = 1_000;
    session.purchase(UpgradeKind::OutpostCapacity, &mut balance).unwrap();
    session.end_run(RunOutcome::Victory, None).unwrap();
    let old_id = session.run_id().to_string();

    session.begin_run().unwrap();

    assert_ne!(session.run_id(), old_id, "each run gets a fresh id");
    assert_eq!(session.ledger().get_level(UpgradeKind::OutpostCapacity), 0);
    assert!(!session.snapshot().has_outcome());
    session.end_run(RunOutcome::Victory, None).expect("new run may record again");

    let types: Vec<_> = session.event_log().iter().map(|e| e.event_type.as_str()).collect();
    assert_eq!(
        types,
        vec!["run_started", "upgrade_purchased", "run_recorded", "run_started", "run_recorded"]
    );
}

#[test]
fn ledger_observers_see_session_purchases() {
    use std::{cell::Cell, rc::Rc};

    let mut session = build("session-observer");
    let count = Rc::new(Cell::new(0));
    let c = Rc::clone(&count);
    session
        .ledger_mut()
        .subscribe(Box::new(move |_: &EconEvent| c.set(c.get() + 1)));

    let mut balance = 10_000;
    for _ in 0..4 {
        session.purchase(UpgradeKind::EconomicRecovery, &mut balance).unwrap();
    }
    session.purchase(UpgradeKind::EconomicRecovery, &mut balance).unwrap(); // maxed

    assert_eq!(count.get(), 4);
}

#[test]
fn new_session_logs_run_start() {
    let session = build("session-fresh");
    let log = session.event_log();
    assert_eq!(log.len(), 1);
    assert_eq!(log[0].seq, 0);
    assert_eq!(log[0].run_id, "session-fresh");
    assert_eq!(
        logged_events(&session),
        vec![EconEvent::RunStarted { run_id: "session-fresh".into() }]
    );
}

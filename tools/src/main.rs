//! econ-runner: headless driver for the outbreak economy core.
//!
//! Usage:
//!   econ-runner --seed 12345 --days 60 --data-dir ./data
//!   econ-runner --ipc-mode --balance 800

use anyhow::Result;
use outbreak_core::{
    config::EconConfig,
    ledger::LedgerSummary,
    outcome::{RunOutcome, RunOutcomeSnapshot, RunStats},
    session::RunSession,
    types::Currency,
    upgrade::UpgradeKind,
};
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg64Mcg;
use std::env;
use std::io::{self, BufRead, Write};

#[derive(serde::Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum IpcCommand {
    GetState,
    Purchase { kind: UpgradeKind },
    Income { amount: Currency },
    EndRun {
        outcome: RunOutcome,
        #[serde(default)]
        stats: Option<RunStats>,
    },
    NewRun,
    Quit,
}

#[derive(serde::Serialize)]
struct UiState<'a> {
    run_id:   &'a str,
    balance:  Currency,
    upgrades: LedgerSummary,
    outcome:  &'a RunOutcomeSnapshot,
    #[serde(skip_serializing_if = "Option::is_none")]
    last_purchase: Option<PurchaseReply>,
}

#[derive(serde::Serialize, Clone, Copy)]
struct PurchaseReply {
    kind:    UpgradeKind,
    success: bool,
    cost:    Currency,
    bonus:   Currency,
}

fn main() -> Result<()> {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    let seed = parse_arg(&args, "--seed", 42u64);
    let days = parse_arg(&args, "--days", 60u32);
    let ipc_mode = args.iter().any(|a| a == "--ipc-mode");
    let data_dir = args
        .windows(2)
        .find(|w| w[0] == "--data-dir")
        .map(|w| w[1].as_str());

    let config = match data_dir {
        Some(dir) => EconConfig::load(dir)?,
        None => EconConfig::default_test(),
    };
    let balance = parse_arg(&args, "--balance", config.starting_balance);
    let income = parse_arg(&args, "--income", config.daily_income);

    let mut session = RunSession::new(config.catalogue.clone())?;

    if ipc_mode {
        run_ipc_loop(&mut session, balance)?;
    } else {
        println!("Outbreak economy — econ-runner");
        println!("  seed:      {seed}");
        println!("  days:      {days}");
        println!("  balance:   {balance}");
        println!("  income:    {income}");
        println!("  data_dir:  {}", data_dir.unwrap_or("(built-in)"));
        println!();
        let balance = autoplay(&mut session, seed, days, balance, income)?;
        print_summary(&session, balance);
    }

    Ok(())
}

/// Play `days` days: collect income, then buy random affordable upgrades.
fn autoplay(
    session: &mut RunSession,
    seed:    u64,
    days:    u32,
    mut balance: Currency,
    income:  Currency,
) -> Result<Currency> {
    let mut rng = Pcg64Mcg::seed_from_u64(seed);

    for day in 1..=days {
        let tax_bonus = session.ledger().effect(UpgradeKind::TaxEfficiency);
        balance = balance.saturating_add((income as f64 * (1.0 + tax_bonus)).round() as Currency);

        loop {
            let affordable: Vec<_> = UpgradeKind::ALL
                .into_iter()
                .filter(|k| session.ledger().can_afford(*k, balance))
                .collect();
            if affordable.is_empty() || rng.gen_bool(0.3) {
                break;
            }
            let kind = affordable[rng.gen_range(0..affordable.len())];
            let receipt = session.purchase(kind, &mut balance)?;
            log::debug!(
                "day={day} bought {kind} cost={} bonus={} balance={balance}",
                receipt.cost, receipt.bonus
            );
        }
    }

    let maxed = UpgradeKind::ALL
        .into_iter()
        .filter(|k| session.ledger().is_max_level(*k))
        .count() as i64;
    let cure = session.ledger().effect(UpgradeKind::ResearchEfficiency)
        + session.ledger().effect(UpgradeKind::VaccineBreakthrough);
    let outposts = 3 + session.ledger().effect(UpgradeKind::OutpostCapacity) as i64;
    let outcome = if cure >= 1.0 { RunOutcome::Victory } else { RunOutcome::Defeat };

    let stats = RunStats {
        cure_progress:   cure,
        total_outposts:  outposts,
        active_outposts: outposts,
        currency:        balance,
        day_index:       i64::from(days),
        saved_provinces: maxed,
        lost_provinces:  7 - maxed,
    };
    session.end_run(outcome, Some(&stats))?;
    Ok(balance)
}

fn run_ipc_loop(session: &mut RunSession, mut balance: Currency) -> Result<()> {
    let stdin = io::stdin();
    let mut stdout = io::stdout();
    let mut handle = stdin.lock();
    let mut buffer = String::new();

    loop {
        buffer.clear();
        let bytes_read = handle.read_line(&mut buffer)?;
        if bytes_read == 0 {
            break; // EOF
        }

        let cmd: IpcCommand = match serde_json::from_str(&buffer) {
            Ok(c) => c,
            Err(e) => {
                let err_json = serde_json::json!({ "error": e.to_string() });
                writeln!(stdout, "{}", err_json)?;
                stdout.flush()?;
                continue;
            }
        };

        let mut last_purchase = None;
        match cmd {
            IpcCommand::Quit => break,
            IpcCommand::GetState => {}
            IpcCommand::Purchase { kind } => {
                let r = session.purchase(kind, &mut balance)?;
                last_purchase = Some(PurchaseReply {
                    kind,
                    success: r.success,
                    cost:    r.cost,
                    bonus:   r.bonus,
                });
            }
            IpcCommand::Income { amount } => {
                balance = balance.saturating_add(amount);
            }
            IpcCommand::EndRun { outcome, stats } => {
                if let Err(e) = session.end_run(outcome, stats.as_ref()) {
                    log::warn!("end_run rejected: {e}");
                    let err_json = serde_json::json!({ "error": e.to_string() });
                    writeln!(stdout, "{}", err_json)?;
                    stdout.flush()?;
                    continue;
                }
            }
            IpcCommand::NewRun => session.begin_run()?,
        }

        let state = UiState {
            run_id:   session.run_id(),
            balance,
            upgrades: session.ledger().summary(),
            outcome:  session.snapshot(),
            last_purchase,
        };
        writeln!(stdout, "{}", serde_json::to_string(&state)?)?;
        stdout.flush()?;
    }
    Ok(())
}

fn print_summary(session: &RunSession, balance: Currency) {
    let snapshot = session.snapshot();

    println!("=== RUN SUMMARY ===");
    println!("  run_id:         {}", session.run_id());
    println!("  outcome:        {:?}", snapshot.outcome());
    println!("  day:            {}", snapshot.day_index());
    println!("  cure progress:  {:.0}%", snapshot.cure_progress() * 100.0);
    println!("  outposts:       {}/{}", snapshot.active_outposts(), snapshot.total_outposts());
    println!("  balance:        {balance}");
    println!("  events logged:  {}", session.event_log().len());

    println!();
    println!("=== UPGRADES ===");
    for row in session.ledger().summary().rows {
        let next = match row.next_cost {
            Some(cost) => format!("next: {cost}"),
            None => "MAXED".to_string(),
        };
        println!("  {:<22} {}/{}  {next}", row.name, row.level, row.max_level);
    }
}

fn parse_arg<T: std::str::FromStr + Copy>(args: &[String], flag: &str, default: T) -> T {
    args.windows(2)
        .find(|w| w[0] == flag)
        .and_then(|w| w[1].parse().ok())
        .unwrap_or(default)
}

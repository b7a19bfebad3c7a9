//! Outbreak economy core: upgrade catalogue, upgrade ledger, and the
//! end-of-run outcome snapshot.

pub mod catalogue;
pub mod config;
pub mod error;
pub mod event;
pub mod ledger;
pub mod outcome;
pub mod session;
pub mod types;
pub mod upgrade;

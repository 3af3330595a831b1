#![doc(test(attr(deny(warnings))))]

//! Cashflow Pulse keeps a local transaction ledger and the state derived from it:
//! rolling totals, daily buckets, per-category spending patterns, alert counters
//! and achievement progress.

pub mod config;
pub mod core;
pub mod domain;
pub mod errors;
pub mod storage;
pub mod utils;

pub use crate::core::clock::{Clock, FixedClock, SystemClock};
pub use crate::core::ledger_manager::{AddOutcome, DashboardSnapshot, LedgerManager};

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup info log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        utils::init_tracing();
        tracing::info!("Cashflow Pulse tracing initialized.");
    });
}

#[cfg(test)]
mod tests {
    #[test]
    fn init_does_not_panic() {
        super::init();
        super::init();
    }
}

#![allow(dead_code)]

use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use cashflow_pulse::{
    storage::{JsonFileStore, MemoryStore},
    FixedClock, LedgerManager,
};
use chrono::{DateTime, Duration, TimeZone, Utc};
use once_cell::sync::Lazy;
use tempfile::TempDir;

/// Holds TempDir guards so temporary folders live for the duration of the test run.
static TEST_DIRS: Lazy<Mutex<Vec<TempDir>>> = Lazy::new(|| Mutex::new(Vec::new()));

/// Mid-afternoon UTC so "today" has room on both sides of the clock.
pub fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 10, 18, 14, 0, 0).unwrap()
}

pub fn clock() -> FixedClock {
    FixedClock::utc(now())
}

pub fn days_ago(days: i64) -> DateTime<Utc> {
    now() - Duration::days(days)
}

/// Manager backed by a shared in-memory store the test can inspect.
pub fn memory_manager() -> (LedgerManager, Arc<MemoryStore>) {
    let store = Arc::new(MemoryStore::new());
    let manager = LedgerManager::new(Box::new(store.clone()), Box::new(clock()));
    (manager, store)
}

/// Reopens a manager over an existing in-memory store.
pub fn reopen(store: &Arc<MemoryStore>) -> LedgerManager {
    LedgerManager::new(Box::new(store.clone()), Box::new(clock()))
}

/// Creates an isolated on-disk store root for each test.
pub fn temp_root() -> PathBuf {
    let temp = TempDir::new().expect("create temp dir");
    let base = temp.path().to_path_buf();
    TEST_DIRS.lock().expect("lock temp dir registry").push(temp);
    base
}

pub fn file_store(root: &PathBuf) -> JsonFileStore {
    JsonFileStore::new(Some(root.clone())).expect("create json file store")
}

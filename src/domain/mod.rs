//! Ledger entities, persistence-friendly types, and small derived records.

pub mod achievement;
pub mod alert;
pub mod common;
pub mod daily;
pub mod pattern;
pub mod pulse;
pub mod transaction;

pub use achievement::{Achievement, AchievementKind, LedgerMetrics, Measure};
pub use alert::{AlertCondition, AlertRule};
pub use common::{Displayable, Identifiable};
pub use daily::DailyBucket;
pub use pattern::{Frequency, SpendingPattern};
pub use pulse::{PulseColor, PulseEvent};
pub use transaction::{Transaction, TransactionCategory, TransactionType};

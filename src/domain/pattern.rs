use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::transaction::TransactionCategory;

/// Per-category summary derived from the full transaction history.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SpendingPattern {
    pub category: TransactionCategory,
    pub average_amount: f64,
    pub frequency: Frequency,
    pub last_occurrence: DateTime<Utc>,
    pub occurrences: usize,
}

/// Coarse frequency class. `Irregular` is never produced by the count-based rule.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum Frequency {
    Daily,
    Weekly,
    Monthly,
    Irregular,
}

impl Frequency {
    pub fn from_count(count: usize) -> Self {
        if count > 20 {
            Frequency::Daily
        } else if count > 5 {
            Frequency::Weekly
        } else {
            Frequency::Monthly
        }
    }
}

impl fmt::Display for Frequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Frequency::Daily => "Daily",
            Frequency::Weekly => "Weekly",
            Frequency::Monthly => "Monthly",
            Frequency::Irregular => "Irregular",
        };
        f.write_str(label)
    }
}

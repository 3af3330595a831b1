use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::transaction::Transaction;

/// Transactions that fall on one local calendar day.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DailyBucket {
    pub date: NaiveDate,
    pub transactions: Vec<Transaction>,
}

impl DailyBucket {
    pub fn new(date: NaiveDate, transactions: Vec<Transaction>) -> Self {
        Self { date, transactions }
    }

    pub fn total_income(&self) -> f64 {
        self.transactions
            .iter()
            .filter(|txn| txn.is_income())
            .map(|txn| txn.amount)
            .sum()
    }

    pub fn total_expense(&self) -> f64 {
        self.transactions
            .iter()
            .filter(|txn| txn.is_expense())
            .map(|txn| txn.amount)
            .sum()
    }

    pub fn net_flow(&self) -> f64 {
        self.total_income() - self.total_expense()
    }

    /// Combined turnover normalised against `scale`, clamped to `[0, 1]`.
    pub fn flow_intensity(&self, scale: f64) -> f64 {
        let total = self.total_income() + self.total_expense();
        if total <= 0.0 || scale <= 0.0 {
            return 0.0;
        }
        (total / scale).min(1.0)
    }
}

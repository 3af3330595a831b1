use std::collections::HashMap;

use chrono::{DateTime, Utc};

use crate::domain::{Frequency, SpendingPattern, Transaction, TransactionCategory};

/// Derives per-category spending patterns from the full history.
pub struct PatternService;

#[derive(Default)]
struct CategoryStats {
    total: f64,
    count: usize,
    last: Option<DateTime<Utc>>,
}

impl PatternService {
    /// One pattern per category with at least one transaction, in category
    /// declaration order. The result replaces any previous pattern set.
    pub fn detect(transactions: &[Transaction]) -> Vec<SpendingPattern> {
        let mut stats: HashMap<TransactionCategory, CategoryStats> = HashMap::new();
        for txn in transactions {
            let entry = stats.entry(txn.category).or_default();
            entry.total += txn.amount;
            entry.count += 1;
            entry.last = Some(match entry.last {
                Some(previous) if previous >= txn.timestamp => previous,
                _ => txn.timestamp,
            });
        }

        TransactionCategory::ALL
            .iter()
            .filter_map(|category| {
                let entry = stats.get(category)?;
                let last_occurrence = entry.last?;
                Some(SpendingPattern {
                    category: *category,
                    average_amount: entry.total / entry.count as f64,
                    frequency: Frequency::from_count(entry.count),
                    last_occurrence,
                    occurrences: entry.count,
                })
            })
            .collect()
    }

    pub fn find(
        patterns: &[SpendingPattern],
        category: TransactionCategory,
    ) -> Option<&SpendingPattern> {
        patterns.iter().find(|pattern| pattern.category == category)
    }
}

//! Pure period, balance, and per-day aggregation over the transaction list.

use std::collections::BTreeMap;

use chrono::{DateTime, Datelike, Duration, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::core::clock::Clock;
use crate::domain::{DailyBucket, Transaction, TransactionType};

/// Income and expense sums for one window.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct FlowTotals {
    pub income: f64,
    pub expense: f64,
}

impl FlowTotals {
    pub fn net(&self) -> f64 {
        self.income - self.expense
    }

    fn record(&mut self, txn: &Transaction) {
        match txn.kind {
            TransactionType::Income => self.income += txn.amount,
            TransactionType::Expense => self.expense += txn.amount,
        }
    }
}

/// Totals for the three fixed rolling windows.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PeriodTotals {
    pub today: FlowTotals,
    pub week: FlowTotals,
    pub month: FlowTotals,
}

pub struct AggregationService;

impl AggregationService {
    /// Signed sum over every transaction.
    pub fn balance(transactions: &[Transaction]) -> f64 {
        transactions.iter().map(Transaction::signed_amount).sum()
    }

    /// Sums transactions stamped at or after `since`.
    pub fn totals_since(transactions: &[Transaction], since: DateTime<Utc>) -> FlowTotals {
        Self::totals_where(transactions, |txn| txn.timestamp >= since)
    }

    /// Sums transactions stamped strictly after `after`.
    pub fn totals_after(transactions: &[Transaction], after: DateTime<Utc>) -> FlowTotals {
        Self::totals_where(transactions, |txn| txn.timestamp > after)
    }

    /// Sums transactions stamped in `(after, until]`.
    pub fn totals_between(
        transactions: &[Transaction],
        after: DateTime<Utc>,
        until: DateTime<Utc>,
    ) -> FlowTotals {
        Self::totals_where(transactions, |txn| {
            txn.timestamp > after && txn.timestamp <= until
        })
    }

    fn totals_where<F>(transactions: &[Transaction], predicate: F) -> FlowTotals
    where
        F: Fn(&Transaction) -> bool,
    {
        let mut totals = FlowTotals::default();
        for txn in transactions.iter().filter(|txn| predicate(txn)) {
            totals.record(txn);
        }
        totals
    }

    /// Today from local midnight, the trailing seven days, and the trailing
    /// calendar month. Windows are open-ended forward.
    pub fn period_totals(transactions: &[Transaction], clock: &dyn Clock) -> PeriodTotals {
        let now = clock.now();
        PeriodTotals {
            today: Self::totals_since(transactions, clock.start_of_day(clock.today())),
            week: Self::totals_since(transactions, now - Duration::days(7)),
            month: Self::totals_since(transactions, clock.months_before(now, 1)),
        }
    }

    /// Totals from the first local day of the current month onward.
    pub fn month_to_date(transactions: &[Transaction], clock: &dyn Clock) -> FlowTotals {
        let today = clock.today();
        let first = today.with_day(1).unwrap_or(today);
        Self::totals_since(transactions, clock.start_of_day(first))
    }

    /// One bucket per local day present, newest day first. Transactions inside a
    /// bucket are ordered newest first.
    pub fn daily_buckets(transactions: &[Transaction], clock: &dyn Clock) -> Vec<DailyBucket> {
        let mut grouped: BTreeMap<NaiveDate, Vec<Transaction>> = BTreeMap::new();
        for txn in transactions {
            grouped
                .entry(clock.local_date(txn.timestamp))
                .or_default()
                .push(txn.clone());
        }
        grouped
            .into_iter()
            .rev()
            .map(|(date, mut day)| {
                sort_newest_first(&mut day);
                DailyBucket::new(date, day)
            })
            .collect()
    }

    /// Transactions on the given local day, newest first.
    pub fn transactions_on(
        transactions: &[Transaction],
        date: NaiveDate,
        clock: &dyn Clock,
    ) -> Vec<Transaction> {
        let mut matches: Vec<Transaction> = transactions
            .iter()
            .filter(|txn| clock.local_date(txn.timestamp) == date)
            .cloned()
            .collect();
        sort_newest_first(&mut matches);
        matches
    }

    pub fn largest_amount(transactions: &[Transaction]) -> f64 {
        transactions
            .iter()
            .map(|txn| txn.amount.abs())
            .fold(0.0, f64::max)
    }
}

fn sort_newest_first(transactions: &mut [Transaction]) {
    transactions.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::clock::FixedClock;
    use crate::domain::TransactionCategory;
    use chrono::TimeZone;

    fn clock() -> FixedClock {
        FixedClock::utc(Utc.with_ymd_and_hms(2025, 4, 15, 18, 0, 0).unwrap())
    }

    fn ts(month: u32, day: u32, hour: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, month, day, hour, 0, 0).unwrap()
    }

    fn sample() -> Vec<Transaction> {
        vec![
            Transaction::income(2_000.0, TransactionCategory::Salary, ts(4, 15, 9)),
            Transaction::expense(40.0, TransactionCategory::Food, ts(4, 15, 12)),
            Transaction::expense(60.0, TransactionCategory::Transport, ts(4, 10, 8)),
            Transaction::income(300.0, TransactionCategory::Freelance, ts(3, 20, 8)),
            Transaction::expense(900.0, TransactionCategory::Bills, ts(3, 1, 8)),
        ]
    }

    #[test]
    fn empty_ledger_yields_zeroes() {
        let clock = clock();
        assert_eq!(AggregationService::balance(&[]), 0.0);
        assert_eq!(
            AggregationService::period_totals(&[], &clock),
            PeriodTotals::default()
        );
        assert!(AggregationService::daily_buckets(&[], &clock).is_empty());
        assert_eq!(AggregationService::largest_amount(&[]), 0.0);
    }

    #[test]
    fn period_totals_use_rolling_windows() {
        let clock = clock();
        let totals = AggregationService::period_totals(&sample(), &clock);
        assert_eq!(totals.today.income, 2_000.0);
        assert_eq!(totals.today.expense, 40.0);
        assert_eq!(totals.week.expense, 100.0);
        assert_eq!(totals.month.income, 2_300.0);
        assert_eq!(totals.month.expense, 100.0);
        assert_eq!(totals.month.net(), 2_200.0);
    }

    #[test]
    fn balance_is_signed_sum() {
        let txns = sample();
        let expected = 2_000.0 - 40.0 - 60.0 + 300.0 - 900.0;
        assert_eq!(AggregationService::balance(&txns), expected);
    }

    #[test]
    fn daily_buckets_partition_transactions() {
        let clock = clock();
        let txns = sample();
        let buckets = AggregationService::daily_buckets(&txns, &clock);
        assert_eq!(buckets.len(), 4);
        let dates: Vec<_> = buckets.iter().map(|bucket| bucket.date).collect();
        let mut sorted = dates.clone();
        sorted.sort_by(|a, b| b.cmp(a));
        assert_eq!(dates, sorted);

        let counted: usize = buckets.iter().map(|bucket| bucket.transactions.len()).sum();
        assert_eq!(counted, txns.len());
        for txn in &txns {
            let holders = buckets
                .iter()
                .filter(|bucket| bucket.transactions.iter().any(|t| t.id == txn.id))
                .count();
            assert_eq!(holders, 1);
        }

        let today = &buckets[0];
        assert_eq!(today.transactions[0].category, TransactionCategory::Food);
        assert_eq!(today.net_flow(), 1_960.0);
        assert_eq!(today.flow_intensity(5_000.0), 2_040.0 / 5_000.0);
    }

    #[test]
    fn buckets_follow_local_calendar() {
        let clock = FixedClock::new(
            Utc.with_ymd_and_hms(2025, 4, 15, 18, 0, 0).unwrap(),
            chrono::FixedOffset::east_opt(9 * 3600).unwrap(),
        );
        let txns = vec![
            Transaction::expense(5.0, TransactionCategory::Food, ts(4, 14, 14)),
            Transaction::expense(7.0, TransactionCategory::Food, ts(4, 14, 16)),
        ];
        let buckets = AggregationService::daily_buckets(&txns, &clock);
        assert_eq!(buckets.len(), 2);
        assert_eq!(buckets[0].date, NaiveDate::from_ymd_opt(2025, 4, 15).unwrap());
        assert_eq!(buckets[1].date, NaiveDate::from_ymd_opt(2025, 4, 14).unwrap());
    }

    #[test]
    fn transactions_on_filters_and_sorts() {
        let clock = clock();
        let day = NaiveDate::from_ymd_opt(2025, 4, 15).unwrap();
        let found = AggregationService::transactions_on(&sample(), day, &clock);
        assert_eq!(found.len(), 2);
        assert!(found[0].timestamp > found[1].timestamp);
        let quiet = NaiveDate::from_ymd_opt(2025, 4, 1).unwrap();
        assert!(AggregationService::transactions_on(&sample(), quiet, &clock).is_empty());
    }

    #[test]
    fn month_to_date_starts_on_the_first() {
        let clock = clock();
        let totals = AggregationService::month_to_date(&sample(), &clock);
        assert_eq!(totals.income, 2_000.0);
        assert_eq!(totals.expense, 100.0);
    }
}

//! Achievement progress and unlock tracking.

use std::collections::HashSet;

use chrono::{DateTime, NaiveDate, Utc};
use uuid::Uuid;

use crate::core::clock::Clock;
use crate::core::services::AggregationService;
use crate::domain::{Achievement, AchievementKind, Displayable, LedgerMetrics, Transaction};

const PERFECT_WEEK_DAYS: u32 = 7;

pub struct AchievementService;

impl AchievementService {
    /// Stock achievement set, all locked with zero progress.
    pub fn default_achievements() -> Vec<Achievement> {
        AchievementKind::ALL
            .iter()
            .copied()
            .map(Achievement::from_kind)
            .collect()
    }

    /// Appends a stock achievement for every kind missing from `achievements`.
    /// Returns how many were added.
    pub fn fill_missing(achievements: &mut Vec<Achievement>) -> usize {
        let missing: Vec<AchievementKind> = AchievementKind::ALL
            .iter()
            .copied()
            .filter(|kind| !achievements.iter().any(|achievement| achievement.kind == *kind))
            .collect();
        achievements.extend(missing.iter().copied().map(Achievement::from_kind));
        missing.len()
    }

    /// Samples every measure the achievements depend on.
    pub fn metrics(transactions: &[Transaction], balance: f64, clock: &dyn Clock) -> LedgerMetrics {
        let month = AggregationService::month_to_date(transactions, clock);
        LedgerMetrics {
            transaction_count: transactions.len(),
            balance,
            day_streak: Self::day_streak(transactions, clock),
            perfect_week_days: Self::active_days(transactions, clock, PERFECT_WEEK_DAYS),
            month_income: month.income,
            month_expense: month.expense,
            largest_amount: AggregationService::largest_amount(transactions),
        }
    }

    /// Consecutive local days with activity, walking back from today. A day
    /// without transactions ends the walk, so an idle today means no streak.
    /// The walk never starts from yesterday: a streak only counts while it is
    /// kept up today.
    pub fn day_streak(transactions: &[Transaction], clock: &dyn Clock) -> u32 {
        let days = Self::distinct_days(transactions, clock);
        let mut streak = 0;
        let mut cursor = Some(clock.today());
        while let Some(day) = cursor.filter(|day| days.contains(day)) {
            streak += 1;
            cursor = day.pred_opt();
        }
        streak
    }

    /// How many of the trailing `window` local days (today included) have at
    /// least one transaction. Gaps do not stop the count.
    pub fn active_days(transactions: &[Transaction], clock: &dyn Clock, window: u32) -> u32 {
        let days = Self::distinct_days(transactions, clock);
        let mut covered = 0;
        let mut cursor = Some(clock.today());
        for _ in 0..window {
            let Some(day) = cursor else { break };
            if days.contains(&day) {
                covered += 1;
            }
            cursor = day.pred_opt();
        }
        covered
    }

    /// Recomputes progress for every achievement and unlocks the ones whose
    /// measure reached its target. Returns the ids unlocked by this call.
    pub fn refresh(
        achievements: &mut [Achievement],
        metrics: &LedgerMetrics,
        now: DateTime<Utc>,
    ) -> Vec<Uuid> {
        let mut unlocked = Vec::new();
        for achievement in achievements.iter_mut() {
            let measured = achievement.kind.measure().value(metrics);
            if achievement.apply_measurement(measured, now) {
                tracing::info!(achievement = %achievement.display_label(), "achievement unlocked");
                unlocked.push(achievement.id);
            }
        }
        unlocked
    }

    fn distinct_days(transactions: &[Transaction], clock: &dyn Clock) -> HashSet<NaiveDate> {
        transactions
            .iter()
            .map(|txn| clock.local_date(txn.timestamp))
            .collect()
    }
}

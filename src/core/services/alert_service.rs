//! Rule evaluation for newly recorded transactions.

use chrono::Duration;
use uuid::Uuid;

use crate::config::AlertThresholds;
use crate::core::clock::Clock;
use crate::core::services::{AggregationService, PatternService, PeriodTotals};
use crate::domain::{AlertCondition, AlertRule, SpendingPattern, Transaction};

/// State a rule is evaluated against.
///
/// `transactions` already contains the transaction under evaluation, while
/// `patterns` and `totals` describe the history recorded before it.
pub struct AlertContext<'a> {
    pub transactions: &'a [Transaction],
    pub patterns: &'a [SpendingPattern],
    pub totals: &'a PeriodTotals,
    pub thresholds: &'a AlertThresholds,
    pub clock: &'a dyn Clock,
}

pub struct AlertService;

impl AlertService {
    /// Stock rule set, one enabled rule per condition.
    pub fn default_rules() -> Vec<AlertRule> {
        AlertCondition::ALL
            .iter()
            .copied()
            .map(AlertRule::for_condition)
            .collect()
    }

    /// Evaluates every enabled rule once against `txn`, bumping each triggered
    /// rule's counter by one. Returns the ids of the rules that fired.
    pub fn evaluate(rules: &mut [AlertRule], txn: &Transaction, ctx: &AlertContext<'_>) -> Vec<Uuid> {
        let mut fired = Vec::new();
        for rule in rules.iter_mut().filter(|rule| rule.is_enabled) {
            if Self::is_triggered(rule.condition, txn, ctx) {
                rule.record_trigger();
                tracing::debug!(rule = %rule.name, count = rule.trigger_count, "alert triggered");
                fired.push(rule.id);
            }
        }
        fired
    }

    pub fn is_triggered(condition: AlertCondition, txn: &Transaction, ctx: &AlertContext<'_>) -> bool {
        let limits = ctx.thresholds;
        match condition {
            AlertCondition::LargeTransaction => txn.amount.abs() > limits.large_transaction,
            AlertCondition::UnusualSpending => {
                if !txn.is_expense() {
                    return false;
                }
                match PatternService::find(ctx.patterns, txn.category) {
                    Some(pattern) if pattern.average_amount != 0.0 => {
                        let deviation = (txn.amount - pattern.average_amount).abs()
                            / pattern.average_amount;
                        deviation > limits.unusual_deviation
                    }
                    _ => false,
                }
            }
            AlertCondition::IncomeDrop => {
                if !txn.is_income() {
                    return false;
                }
                let now = ctx.clock.now();
                let window = Duration::days(limits.income_window_days);
                let recent = AggregationService::totals_after(ctx.transactions, now - window);
                let previous = AggregationService::totals_between(
                    ctx.transactions,
                    now - window - window,
                    now - window,
                );
                previous.income > 0.0 && recent.income < previous.income * limits.income_drop_ratio
            }
            AlertCondition::BudgetExceeded => {
                let month = ctx.totals.month;
                month.expense > month.income * limits.budget_ratio
            }
        }
    }
}

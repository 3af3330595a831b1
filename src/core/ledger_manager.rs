use chrono::NaiveDate;
use serde::{de::DeserializeOwned, Serialize};
use uuid::Uuid;

use crate::config::Config;
use crate::core::clock::Clock;
use crate::core::services::{
    AchievementService, AggregationService, AlertContext, AlertService, PatternService,
    PeriodTotals,
};
use crate::domain::{
    common::{find_by_id, find_by_id_mut, position_by_id},
    Achievement, AlertRule, DailyBucket, Displayable, PulseEvent, SpendingPattern, Transaction,
};
use crate::errors::LedgerError;
use crate::storage::{keys, KeyValueStore};

/// Everything the presentation layer renders, captured after the last mutation.
#[derive(Debug, Clone, Serialize)]
pub struct DashboardSnapshot {
    pub balance: f64,
    pub totals: PeriodTotals,
    pub daily_buckets: Vec<DailyBucket>,
    pub patterns: Vec<SpendingPattern>,
    pub alert_rules: Vec<AlertRule>,
    pub achievements: Vec<Achievement>,
    pub active_pulses: Vec<PulseEvent>,
}

/// Side effects of recording a transaction.
#[derive(Debug, Clone)]
pub struct AddOutcome {
    pub pulse: PulseEvent,
    pub triggered_rules: Vec<Uuid>,
    pub unlocked_achievements: Vec<Uuid>,
}

/// Facade that owns the transaction ledger, keeps derived state in step with
/// it, and caches the result in a key-value store.
///
/// Every mutation runs `mutate -> recompute -> persist` synchronously. Storage
/// failures are logged and otherwise ignored.
pub struct LedgerManager {
    transactions: Vec<Transaction>,
    balance: f64,
    totals: PeriodTotals,
    daily_buckets: Vec<DailyBucket>,
    patterns: Vec<SpendingPattern>,
    alert_rules: Vec<AlertRule>,
    achievements: Vec<Achievement>,
    pulses: Vec<PulseEvent>,
    config: Config,
    clock: Box<dyn Clock>,
    storage: Box<dyn KeyValueStore>,
}

impl LedgerManager {
    pub fn new(storage: Box<dyn KeyValueStore>, clock: Box<dyn Clock>) -> Self {
        Self::with_config(storage, clock, Config::default())
    }

    /// Restores the cached ledger from `storage`, falling back to defaults for
    /// anything missing or undecodable, then recomputes and re-persists.
    pub fn with_config(
        storage: Box<dyn KeyValueStore>,
        clock: Box<dyn Clock>,
        config: Config,
    ) -> Self {
        let mut manager = Self {
            transactions: Vec::new(),
            balance: 0.0,
            totals: PeriodTotals::default(),
            daily_buckets: Vec::new(),
            patterns: Vec::new(),
            alert_rules: Vec::new(),
            achievements: Vec::new(),
            pulses: Vec::new(),
            config,
            clock,
            storage,
        };
        manager.load();
        manager.recompute();
        manager.persist();
        manager
    }

    /// Records a transaction, emits its pulse, evaluates alert rules against it,
    /// then refreshes derived state and persists. Re-adding an existing id
    /// replaces the stored transaction.
    pub fn add_transaction(&mut self, txn: Transaction) -> AddOutcome {
        if let Some(index) = position_by_id(&self.transactions, txn.id) {
            let previous = std::mem::replace(&mut self.transactions[index], txn.clone());
            self.balance -= previous.signed_amount();
            tracing::debug!(id = %txn.id, "replacing existing transaction");
        } else {
            self.transactions.push(txn.clone());
        }
        self.balance += txn.signed_amount();

        let now = self.clock.now();
        self.pulses.retain(|pulse| !pulse.is_expired(now));
        let pulse = PulseEvent::new(
            txn.id,
            txn.pulse_color(),
            txn.pulse_intensity(self.config.pulse.intensity_scale),
            now,
            self.config.pulse.lifetime(),
        );
        self.pulses.push(pulse.clone());

        let ctx = AlertContext {
            transactions: &self.transactions,
            patterns: &self.patterns,
            totals: &self.totals,
            thresholds: &self.config.alerts,
            clock: self.clock.as_ref(),
        };
        let triggered_rules = AlertService::evaluate(&mut self.alert_rules, &txn, &ctx);

        let unlocked_achievements = self.recompute();
        self.persist();
        tracing::debug!(
            id = %txn.id,
            label = %txn.display_label(),
            balance = self.balance,
            "transaction added"
        );

        AddOutcome {
            pulse,
            triggered_rules,
            unlocked_achievements,
        }
    }

    /// Removes the transaction with `id` and reverses its balance contribution.
    /// Unknown ids are a no-op. Alert rules are never evaluated on deletion.
    pub fn delete_transaction(&mut self, id: Uuid) -> Option<Transaction> {
        let index = position_by_id(&self.transactions, id)?;
        let removed = self.transactions.remove(index);
        self.balance -= removed.signed_amount();
        self.recompute();
        self.persist();
        tracing::debug!(id = %id, balance = self.balance, "transaction deleted");
        Some(removed)
    }

    /// Transactions on the given local day, newest first.
    pub fn transactions_on(&self, date: NaiveDate) -> Vec<Transaction> {
        AggregationService::transactions_on(&self.transactions, date, self.clock.as_ref())
    }

    /// Enables or disables a rule. Returns `false` when no rule has `id`.
    pub fn set_rule_enabled(&mut self, id: Uuid, enabled: bool) -> bool {
        let Some(rule) = find_by_id_mut(&mut self.alert_rules, id) else {
            return false;
        };
        rule.is_enabled = enabled;
        tracing::info!(rule = %rule.display_label(), enabled, "alert rule toggled");
        self.persist();
        true
    }

    /// Drops every transaction, resets rules and achievements to their stock
    /// sets, and removes the cached snapshot from storage.
    pub fn clear_all_data(&mut self) {
        self.transactions.clear();
        self.balance = 0.0;
        self.pulses.clear();
        self.alert_rules = AlertService::default_rules();
        self.achievements = AchievementService::default_achievements();
        self.recompute();
        for key in keys::ALL {
            if let Err(err) = self.storage.remove(key) {
                tracing::warn!(key, error = %err, "failed to remove stored entry");
            }
        }
        tracing::info!("ledger cleared");
    }

    /// Removes pulses whose lifetime has elapsed. Returns how many were dropped.
    pub fn sweep_expired_pulses(&mut self) -> usize {
        let now = self.clock.now();
        let before = self.pulses.len();
        self.pulses.retain(|pulse| !pulse.is_expired(now));
        before - self.pulses.len()
    }

    pub fn snapshot(&self) -> DashboardSnapshot {
        DashboardSnapshot {
            balance: self.balance,
            totals: self.totals,
            daily_buckets: self.daily_buckets.clone(),
            patterns: self.patterns.clone(),
            alert_rules: self.alert_rules.clone(),
            achievements: self.achievements.clone(),
            active_pulses: self.pulses.clone(),
        }
    }

    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    pub fn transaction(&self, id: Uuid) -> Option<&Transaction> {
        find_by_id(&self.transactions, id)
    }

    pub fn balance(&self) -> f64 {
        self.balance
    }

    /// Balance recomputed from scratch; matches `balance()` up to float drift.
    pub fn recomputed_balance(&self) -> f64 {
        AggregationService::balance(&self.transactions)
    }

    pub fn totals(&self) -> &PeriodTotals {
        &self.totals
    }

    pub fn daily_buckets(&self) -> &[DailyBucket] {
        &self.daily_buckets
    }

    /// Flow intensity per bucket, scaled by the configured daily turnover.
    pub fn daily_flow_intensities(&self) -> Vec<(NaiveDate, f64)> {
        let scale = self.config.daily_flow_scale;
        self.daily_buckets
            .iter()
            .map(|bucket| (bucket.date, bucket.flow_intensity(scale)))
            .collect()
    }

    pub fn patterns(&self) -> &[SpendingPattern] {
        &self.patterns
    }

    pub fn alert_rules(&self) -> &[AlertRule] {
        &self.alert_rules
    }

    pub fn achievements(&self) -> &[Achievement] {
        &self.achievements
    }

    pub fn active_pulses(&self) -> &[PulseEvent] {
        &self.pulses
    }

    pub fn enabled_rule_count(&self) -> usize {
        self.alert_rules.iter().filter(|rule| rule.is_enabled).count()
    }

    pub fn unlocked_achievement_count(&self) -> usize {
        self.achievements
            .iter()
            .filter(|achievement| achievement.is_unlocked)
            .count()
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn storage(&self) -> &dyn KeyValueStore {
        self.storage.as_ref()
    }

    /// Swaps the time source and refreshes time-dependent state. Unlocks
    /// reached under the new clock are persisted.
    pub fn set_clock(&mut self, clock: Box<dyn Clock>) {
        self.clock = clock;
        if !self.recompute().is_empty() {
            self.persist();
        }
    }

    /// Re-runs aggregation, pattern detection, and achievement tracking.
    /// Returns ids of achievements unlocked by this pass.
    fn recompute(&mut self) -> Vec<Uuid> {
        let clock = self.clock.as_ref();
        self.totals = AggregationService::period_totals(&self.transactions, clock);
        self.daily_buckets = AggregationService::daily_buckets(&self.transactions, clock);
        self.patterns = PatternService::detect(&self.transactions);
        let metrics = AchievementService::metrics(&self.transactions, self.balance, clock);
        let unlocked = AchievementService::refresh(&mut self.achievements, &metrics, clock.now());
        tracing::debug!(
            transactions = self.transactions.len(),
            buckets = self.daily_buckets.len(),
            patterns = self.patterns.len(),
            "derived state recomputed"
        );
        unlocked
    }

    fn load(&mut self) {
        self.transactions = self.read_list(keys::TRANSACTIONS).unwrap_or_default();
        self.balance = match self.storage.get_double(keys::CURRENT_BALANCE) {
            Ok(Some(stored)) => stored,
            Ok(None) => self.recomputed_balance(),
            Err(err) => {
                tracing::warn!(error = %err, "stored balance unreadable; recomputing");
                self.recomputed_balance()
            }
        };
        self.alert_rules = self
            .read_list(keys::ALERT_RULES)
            .unwrap_or_else(AlertService::default_rules);
        self.achievements = self
            .read_list::<Achievement>(keys::ACHIEVEMENTS)
            .unwrap_or_default();
        let added = AchievementService::fill_missing(&mut self.achievements);
        if added > 0 {
            tracing::debug!(added, "seeded missing achievements");
        }
        tracing::info!(
            transactions = self.transactions.len(),
            balance = self.balance,
            "ledger loaded"
        );
    }

    fn read_list<T: DeserializeOwned>(&self, key: &str) -> Option<Vec<T>> {
        let bytes = match self.storage.get(key) {
            Ok(Some(bytes)) => bytes,
            Ok(None) => return None,
            Err(err) => {
                tracing::warn!(key, error = %err, "failed to read stored entry");
                return None;
            }
        };
        match serde_json::from_slice(&bytes) {
            Ok(list) => Some(list),
            Err(err) => {
                tracing::warn!(key, error = %err, "stored entry is malformed; using defaults");
                None
            }
        }
    }

    fn persist(&self) {
        let blobs = [
            (keys::TRANSACTIONS, encode(&self.transactions)),
            (keys::ALERT_RULES, encode(&self.alert_rules)),
            (keys::ACHIEVEMENTS, encode(&self.achievements)),
        ];
        for (key, encoded) in blobs {
            if let Err(err) = encoded.and_then(|bytes| self.storage.set(key, &bytes)) {
                tracing::warn!(key, error = %err, "failed to persist entry");
            }
        }
        if let Err(err) = self.storage.set_double(keys::CURRENT_BALANCE, self.balance) {
            tracing::warn!(key = keys::CURRENT_BALANCE, error = %err, "failed to persist entry");
        }
    }
}

fn encode<T: Serialize + ?Sized>(value: &T) -> Result<Vec<u8>, LedgerError> {
    Ok(serde_json::to_vec(value)?)
}

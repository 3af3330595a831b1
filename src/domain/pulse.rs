use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Colour family of a pulse.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum PulseColor {
    Income,
    Expense,
}

impl PulseColor {
    pub fn hex(&self) -> &'static str {
        match self {
            PulseColor::Income => "00FF88",
            PulseColor::Expense => "FF4757",
        }
    }
}

/// Transient presentation event emitted when a transaction is added.
///
/// Pulses never touch ledger state; they are dropped once `expires_at` passes.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PulseEvent {
    pub id: Uuid,
    pub transaction_id: Uuid,
    pub color: PulseColor,
    pub intensity: f64,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

impl PulseEvent {
    pub fn new(
        transaction_id: Uuid,
        color: PulseColor,
        intensity: f64,
        created_at: DateTime<Utc>,
        lifetime: Duration,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            transaction_id,
            color,
            intensity,
            created_at,
            expires_at: created_at + lifetime,
        }
    }

    pub fn lifetime(&self) -> Duration {
        self.expires_at - self.created_at
    }

    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at
    }
}

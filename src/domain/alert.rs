use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::common::{Displayable, Identifiable};

/// User-toggleable rule evaluated against each newly added transaction.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AlertRule {
    pub id: Uuid,
    pub name: String,
    pub condition: AlertCondition,
    pub is_enabled: bool,
    #[serde(default)]
    pub trigger_count: u64,
}

impl AlertRule {
    pub fn new(name: impl Into<String>, condition: AlertCondition) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            condition,
            is_enabled: true,
            trigger_count: 0,
        }
    }

    /// Rule named after its condition, e.g. "Large Transaction Alert".
    pub fn for_condition(condition: AlertCondition) -> Self {
        Self::new(format!("{condition} Alert"), condition)
    }

    pub fn record_trigger(&mut self) {
        self.trigger_count = self.trigger_count.saturating_add(1);
    }
}

impl Identifiable for AlertRule {
    fn id(&self) -> Uuid {
        self.id
    }
}

impl Displayable for AlertRule {
    fn display_label(&self) -> String {
        let state = if self.is_enabled { "on" } else { "off" };
        format!("{} ({state}, {} triggers)", self.name, self.trigger_count)
    }
}

/// Persisted under its display label, e.g. `"Large Transaction"`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum AlertCondition {
    #[serde(rename = "Unusual Spending")]
    UnusualSpending,
    #[serde(rename = "Large Transaction")]
    LargeTransaction,
    #[serde(rename = "Income Drop")]
    IncomeDrop,
    #[serde(rename = "Budget Exceeded")]
    BudgetExceeded,
}

impl AlertCondition {
    pub const ALL: [AlertCondition; 4] = [
        AlertCondition::LargeTransaction,
        AlertCondition::UnusualSpending,
        AlertCondition::IncomeDrop,
        AlertCondition::BudgetExceeded,
    ];
}

impl fmt::Display for AlertCondition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            AlertCondition::UnusualSpending => "Unusual Spending",
            AlertCondition::LargeTransaction => "Large Transaction",
            AlertCondition::IncomeDrop => "Income Drop",
            AlertCondition::BudgetExceeded => "Budget Exceeded",
        };
        f.write_str(label)
    }
}

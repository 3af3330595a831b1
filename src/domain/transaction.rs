use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::common::{Displayable, Identifiable};
use crate::domain::pulse::PulseColor;

/// A single income or expense entry. The amount is a non-negative magnitude;
/// the direction comes from `kind`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Transaction {
    pub id: Uuid,
    pub amount: f64,
    #[serde(rename = "type")]
    pub kind: TransactionType,
    pub category: TransactionCategory,
    pub timestamp: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default)]
    pub is_recurring: bool,
}

impl Transaction {
    pub fn new(
        amount: f64,
        kind: TransactionType,
        category: TransactionCategory,
        timestamp: DateTime<Utc>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            amount,
            kind,
            category,
            timestamp,
            note: None,
            location: None,
            is_recurring: false,
        }
    }

    pub fn income(amount: f64, category: TransactionCategory, timestamp: DateTime<Utc>) -> Self {
        Self::new(amount, TransactionType::Income, category, timestamp)
    }

    pub fn expense(amount: f64, category: TransactionCategory, timestamp: DateTime<Utc>) -> Self {
        Self::new(amount, TransactionType::Expense, category, timestamp)
    }

    pub fn with_id(mut self, id: Uuid) -> Self {
        self.id = id;
        self
    }

    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.note = Some(note.into());
        self
    }

    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }

    pub fn recurring(mut self) -> Self {
        self.is_recurring = true;
        self
    }

    pub fn is_income(&self) -> bool {
        self.kind == TransactionType::Income
    }

    pub fn is_expense(&self) -> bool {
        self.kind == TransactionType::Expense
    }

    /// Contribution to the running balance: positive for income, negative for expense.
    pub fn signed_amount(&self) -> f64 {
        match self.kind {
            TransactionType::Income => self.amount,
            TransactionType::Expense => -self.amount,
        }
    }

    pub fn pulse_color(&self) -> PulseColor {
        if self.category.is_income() {
            PulseColor::Income
        } else {
            PulseColor::Expense
        }
    }

    /// Pulse strength in `[0, 1]`, saturating once `|amount|` reaches `scale`.
    pub fn pulse_intensity(&self, scale: f64) -> f64 {
        if scale <= 0.0 {
            return 1.0;
        }
        (self.amount.abs() / scale).min(1.0)
    }
}

impl Identifiable for Transaction {
    fn id(&self) -> Uuid {
        self.id
    }
}

impl Displayable for Transaction {
    fn display_label(&self) -> String {
        let sign = if self.is_income() { '+' } else { '-' };
        format!("{sign}{:.2} {}", self.amount, self.category)
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum TransactionType {
    Income,
    Expense,
}

impl fmt::Display for TransactionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            TransactionType::Income => "Income",
            TransactionType::Expense => "Expense",
        };
        f.write_str(label)
    }
}

/// Fixed category set. The first four are income categories, the rest expenses.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum TransactionCategory {
    Salary,
    Freelance,
    Investment,
    Gift,
    Food,
    Transport,
    Entertainment,
    Shopping,
    Bills,
    Health,
    Education,
    Other,
}

impl TransactionCategory {
    pub const ALL: [TransactionCategory; 12] = [
        TransactionCategory::Salary,
        TransactionCategory::Freelance,
        TransactionCategory::Investment,
        TransactionCategory::Gift,
        TransactionCategory::Food,
        TransactionCategory::Transport,
        TransactionCategory::Entertainment,
        TransactionCategory::Shopping,
        TransactionCategory::Bills,
        TransactionCategory::Health,
        TransactionCategory::Education,
        TransactionCategory::Other,
    ];

    pub fn is_income(&self) -> bool {
        matches!(
            self,
            TransactionCategory::Salary
                | TransactionCategory::Freelance
                | TransactionCategory::Investment
                | TransactionCategory::Gift
        )
    }

    pub fn income_categories() -> impl Iterator<Item = TransactionCategory> {
        Self::ALL.into_iter().filter(|category| category.is_income())
    }

    pub fn expense_categories() -> impl Iterator<Item = TransactionCategory> {
        Self::ALL.into_iter().filter(|category| !category.is_income())
    }

    /// Categories a transaction of the given type may use.
    pub fn for_type(kind: TransactionType) -> Vec<TransactionCategory> {
        match kind {
            TransactionType::Income => Self::income_categories().collect(),
            TransactionType::Expense => Self::expense_categories().collect(),
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            TransactionCategory::Salary => "Salary",
            TransactionCategory::Freelance => "Freelance",
            TransactionCategory::Investment => "Investment",
            TransactionCategory::Gift => "Gift",
            TransactionCategory::Food => "Food",
            TransactionCategory::Transport => "Transport",
            TransactionCategory::Entertainment => "Entertainment",
            TransactionCategory::Shopping => "Shopping",
            TransactionCategory::Bills => "Bills",
            TransactionCategory::Health => "Health",
            TransactionCategory::Education => "Education",
            TransactionCategory::Other => "Other",
        }
    }
}

impl fmt::Display for TransactionCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

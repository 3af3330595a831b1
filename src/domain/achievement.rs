//! Gamified milestones and the measures that drive them.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::common::{Displayable, Identifiable};

/// Milestone tracked against the ledger. Unlocking is one-way: once
/// `is_unlocked` is set it stays set and `unlocked_at` never changes.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Achievement {
    pub id: Uuid,
    pub kind: AchievementKind,
    pub title: String,
    pub description: String,
    pub icon_name: String,
    pub is_unlocked: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unlocked_at: Option<DateTime<Utc>>,
    pub progress: f64,
    pub target_value: f64,
}

impl Achievement {
    pub fn from_kind(kind: AchievementKind) -> Self {
        Self {
            id: Uuid::new_v4(),
            kind,
            title: kind.title().to_string(),
            description: kind.description().to_string(),
            icon_name: kind.icon_name().to_string(),
            is_unlocked: false,
            unlocked_at: None,
            progress: 0.0,
            target_value: kind.target(),
        }
    }

    /// Updates progress from a measured value and unlocks on first reaching the
    /// target. Returns `true` only on the call that unlocks.
    pub fn apply_measurement(&mut self, measured: f64, now: DateTime<Utc>) -> bool {
        self.progress = if self.target_value > 0.0 {
            (measured / self.target_value).clamp(0.0, 1.0)
        } else {
            1.0
        };
        if self.is_unlocked || measured < self.target_value {
            return false;
        }
        self.is_unlocked = true;
        self.unlocked_at = Some(now);
        true
    }

    pub fn progress_percentage(&self) -> u8 {
        (self.progress * 100.0).clamp(0.0, 100.0) as u8
    }
}

impl Identifiable for Achievement {
    fn id(&self) -> Uuid {
        self.id
    }
}

impl Displayable for Achievement {
    fn display_label(&self) -> String {
        format!("{} ({}%)", self.title, self.progress_percentage())
    }
}

/// Quantity an achievement is measured against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Measure {
    TransactionCount,
    AbsoluteBalance,
    PositiveBalance,
    DayStreak,
    PerfectWeekDays,
    MonthlySaver,
    LargestAmount,
}

/// Ledger-wide values sampled once per recomputation.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct LedgerMetrics {
    pub transaction_count: usize,
    pub balance: f64,
    pub day_streak: u32,
    pub perfect_week_days: u32,
    pub month_income: f64,
    pub month_expense: f64,
    pub largest_amount: f64,
}

impl LedgerMetrics {
    pub fn is_saver(&self) -> bool {
        self.month_income > self.month_expense && self.month_income > 0.0
    }
}

impl Measure {
    pub fn value(&self, metrics: &LedgerMetrics) -> f64 {
        match self {
            Measure::TransactionCount => metrics.transaction_count as f64,
            Measure::AbsoluteBalance => metrics.balance.abs(),
            Measure::PositiveBalance => indicator(metrics.balance > 0.0),
            Measure::DayStreak => f64::from(metrics.day_streak),
            Measure::PerfectWeekDays => f64::from(metrics.perfect_week_days),
            Measure::MonthlySaver => indicator(metrics.is_saver()),
            Measure::LargestAmount => metrics.largest_amount,
        }
    }
}

fn indicator(flag: bool) -> f64 {
    if flag {
        1.0
    } else {
        0.0
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum AchievementKind {
    FirstSteps,
    GettingStarted,
    RegularUser,
    PowerUser,
    Thousandaire,
    TenThousandaire,
    InTheGreen,
    WeekWarrior,
    MonthMaster,
    PerfectWeek,
    Saver,
    BigSpender,
}

impl AchievementKind {
    pub const ALL: [AchievementKind; 12] = [
        AchievementKind::FirstSteps,
        AchievementKind::GettingStarted,
        AchievementKind::RegularUser,
        AchievementKind::PowerUser,
        AchievementKind::Thousandaire,
        AchievementKind::TenThousandaire,
        AchievementKind::InTheGreen,
        AchievementKind::WeekWarrior,
        AchievementKind::MonthMaster,
        AchievementKind::PerfectWeek,
        AchievementKind::Saver,
        AchievementKind::BigSpender,
    ];

    pub fn measure(&self) -> Measure {
        match self {
            AchievementKind::FirstSteps
            | AchievementKind::GettingStarted
            | AchievementKind::RegularUser
            | AchievementKind::PowerUser => Measure::TransactionCount,
            AchievementKind::Thousandaire | AchievementKind::TenThousandaire => {
                Measure::AbsoluteBalance
            }
            AchievementKind::InTheGreen => Measure::PositiveBalance,
            AchievementKind::WeekWarrior | AchievementKind::MonthMaster => Measure::DayStreak,
            AchievementKind::PerfectWeek => Measure::PerfectWeekDays,
            AchievementKind::Saver => Measure::MonthlySaver,
            AchievementKind::BigSpender => Measure::LargestAmount,
        }
    }

    pub fn target(&self) -> f64 {
        match self {
            AchievementKind::FirstSteps => 1.0,
            AchievementKind::GettingStarted => 10.0,
            AchievementKind::RegularUser => 50.0,
            AchievementKind::PowerUser => 100.0,
            AchievementKind::Thousandaire => 1_000.0,
            AchievementKind::TenThousandaire => 10_000.0,
            AchievementKind::InTheGreen => 1.0,
            AchievementKind::WeekWarrior => 7.0,
            AchievementKind::MonthMaster => 30.0,
            AchievementKind::PerfectWeek => 7.0,
            AchievementKind::Saver => 1.0,
            AchievementKind::BigSpender => 1_000.0,
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            AchievementKind::FirstSteps => "First Steps",
            AchievementKind::GettingStarted => "Getting Started",
            AchievementKind::RegularUser => "Regular User",
            AchievementKind::PowerUser => "Power User",
            AchievementKind::Thousandaire => "Thousandaire",
            AchievementKind::TenThousandaire => "Ten Thousandaire",
            AchievementKind::InTheGreen => "In the Green",
            AchievementKind::WeekWarrior => "Week Warrior",
            AchievementKind::MonthMaster => "Month Master",
            AchievementKind::PerfectWeek => "Perfect Week",
            AchievementKind::Saver => "Saver",
            AchievementKind::BigSpender => "Big Spender",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            AchievementKind::FirstSteps => "Add your first transaction",
            AchievementKind::GettingStarted => "Add 10 transactions",
            AchievementKind::RegularUser => "Add 50 transactions",
            AchievementKind::PowerUser => "Add 100 transactions",
            AchievementKind::Thousandaire => "Reach $1,000 balance",
            AchievementKind::TenThousandaire => "Reach $10,000 balance",
            AchievementKind::InTheGreen => "Have a positive balance",
            AchievementKind::WeekWarrior => "Use app for 7 days straight",
            AchievementKind::MonthMaster => "Use app for 30 days straight",
            AchievementKind::PerfectWeek => "Add transactions every day for a week",
            AchievementKind::Saver => "Save more than you spend in a month",
            AchievementKind::BigSpender => "Make a transaction over $1,000",
        }
    }

    pub fn icon_name(&self) -> &'static str {
        match self {
            AchievementKind::FirstSteps => "star.fill",
            AchievementKind::GettingStarted => "star.circle.fill",
            AchievementKind::RegularUser => "star.circle",
            AchievementKind::PowerUser => "crown.fill",
            AchievementKind::Thousandaire => "dollarsign.circle.fill",
            AchievementKind::TenThousandaire => "dollarsign.square.fill",
            AchievementKind::InTheGreen => "arrow.up.circle.fill",
            AchievementKind::WeekWarrior => "calendar.badge.clock",
            AchievementKind::MonthMaster => "calendar",
            AchievementKind::PerfectWeek => "checkmark.seal.fill",
            AchievementKind::Saver => "banknote.fill",
            AchievementKind::BigSpender => "creditcard.fill",
        }
    }
}

//! Stateless services that derive ledger state from the transaction list.

pub mod achievement_service;
pub mod aggregation_service;
pub mod alert_service;
pub mod pattern_service;

pub use achievement_service::AchievementService;
pub use aggregation_service::{AggregationService, FlowTotals, PeriodTotals};
pub use alert_service::{AlertContext, AlertService};
pub use pattern_service::PatternService;

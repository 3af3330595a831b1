use uuid::Uuid;

/// Entities stored in the ledger snapshot under a stable id.
pub trait Identifiable {
    fn id(&self) -> Uuid;
}

/// Short human label used in logs and list views.
pub trait Displayable {
    fn display_label(&self) -> String;
}

/// Index of the entity carrying `id`, if any.
pub fn position_by_id<T: Identifiable>(items: &[T], id: Uuid) -> Option<usize> {
    items.iter().position(|item| item.id() == id)
}

pub fn find_by_id<T: Identifiable>(items: &[T], id: Uuid) -> Option<&T> {
    items.iter().find(|item| item.id() == id)
}

pub fn find_by_id_mut<T: Identifiable>(items: &mut [T], id: Uuid) -> Option<&mut T> {
    items.iter_mut().find(|item| item.id() == id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{AlertCondition, AlertRule};

    #[test]
    fn lookups_match_on_id() {
        let mut rules: Vec<AlertRule> = AlertCondition::ALL
            .iter()
            .copied()
            .map(AlertRule::for_condition)
            .collect();
        let target = rules[2].id;
        assert_eq!(position_by_id(&rules, target), Some(2));
        assert_eq!(find_by_id(&rules, target).map(|rule| rule.condition), Some(AlertCondition::IncomeDrop));
        find_by_id_mut(&mut rules, target).unwrap().is_enabled = false;
        assert!(!rules[2].is_enabled);
        assert!(find_by_id(&rules, Uuid::new_v4()).is_none());
    }
}

//! Guest list reconciliation for event updates.
//!
//! Given the guests currently attached to an event and the list submitted by
//! the client, produces the set of writes that makes the stored list match the
//! submitted one. The plan is pure; the caller executes it.

use std::collections::HashSet;
use uuid::Uuid;

use crate::models::guest::GuestInput;

/// One write against the guests table.
#[derive(Debug, Clone)]
pub enum GuestChange {
    /// Overwrite the editable fields of an existing guest.
    Update(Uuid, GuestInput),
    /// Insert a new guest for the event.
    Create(GuestInput),
}

/// Writes needed to bring an event's guests in line with a submitted list.
#[derive(Debug, Clone, Default)]
pub struct GuestReconcilePlan {
    /// Updates and creates, in submitted order. The resulting guest ids form
    /// the new guest list in this order.
    pub changes: Vec<GuestChange>,
    /// Existing guests absent from the submitted list.
    pub remove: Vec<Uuid>,
}

impl GuestReconcilePlan {
    pub fn updates(&self) -> usize {
        self.changes
            .iter()
            .filter(|c| matches!(c, GuestChange::Update(..)))
            .count()
    }

    pub fn creates(&self) -> usize {
        self.changes.len() - self.updates()
    }
}

/// Builds the plan.
///
/// An input whose id belongs to the event becomes an update; an input with no
/// id, or with an id from elsewhere, becomes a create. A repeated id is only
/// honored the first time.
pub fn plan_guest_reconcile(existing: &[Uuid], incoming: Vec<GuestInput>) -> GuestReconcilePlan {
    let existing_set: HashSet<Uuid> = existing.iter().copied().collect();
    let mut kept: HashSet<Uuid> = HashSet::new();
    let mut changes = Vec::with_capacity(incoming.len());

    for input in incoming {
        match input.id {
            Some(id) if existing_set.contains(&id) => {
                if kept.insert(id) {
                    changes.push(GuestChange::Update(id, input));
                }
            }
            _ => changes.push(GuestChange::Create(input)),
        }
    }

    let remove = existing
        .iter()
        .filter(|id| !kept.contains(id))
        .copied()
        .collect();

    GuestReconcilePlan { changes, remove }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input(id: Option<Uuid>, name: &str) -> GuestInput {
        GuestInput {
            id,
            name: name.to_string(),
            phone: Some("966500000001".to_string()),
            email: None,
            invited_by: None,
        }
    }

    #[test]
    fn test_mixed_update_create_remove() {
        let a = Uuid::new_v4();
        let b = Uuid::new_v4();
        let c = Uuid::new_v4();

        let plan = plan_guest_reconcile(
            &[a, b, c],
            vec![input(Some(b), "b"), input(None, "new"), input(Some(a), "a")],
        );

        assert_eq!(plan.updates(), 2);
        assert_eq!(plan.creates(), 1);
        assert_eq!(plan.remove, vec![c]);
        assert!(matches!(plan.changes[0], GuestChange::Update(id, _) if id == b));
        assert!(matches!(plan.changes[1], GuestChange::Create(_)));
        assert!(matches!(plan.changes[2], GuestChange::Update(id, _) if id == a));
    }

    #[test]
    fn test_foreign_id_becomes_create() {
        let mine = Uuid::new_v4();
        let foreign = Uuid::new_v4();
        let plan = plan_guest_reconcile(&[mine], vec![input(Some(foreign), "x")]);
        assert_eq!(plan.creates(), 1);
        assert_eq!(plan.remove, vec![mine]);
    }

    #[test]
    fn test_duplicate_id_updated_once() {
        let a = Uuid::new_v4();
        let plan = plan_guest_reconcile(&[a], vec![input(Some(a), "first"), input(Some(a), "again")]);
        assert_eq!(plan.changes.len(), 1);
        match &plan.changes[0] {
            GuestChange::Update(_, g) => assert_eq!(g.name, "first"),
            other => panic!("unexpected change {:?}", other),
        }
        assert!(plan.remove.is_empty());
    }

    #[test]
    fn test_empty_submission_removes_everything() {
        let a = Uuid::new_v4();
        let b = Uuid::new_v4();
        let plan = plan_guest_reconcile(&[a, b], vec![]);
        assert!(plan.changes.is_empty());
        assert_eq!(plan.remove, vec![a, b]);
    }
}

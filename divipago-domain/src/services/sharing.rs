use std::borrow::Cow;

use crate::model::{Expense, ExpenseItem, Money, ParticipantId};

/// Resolved cost-sharing set of one item: who shares the cost, and the
/// per-person share at full precision.
///
/// The set is the item's subgroup when non-empty, otherwise the full current
/// participant list of the expense. The divisor is the cardinality of that
/// set as written: a subgroup id that no longer resolves to a current
/// participant keeps its place in the divisor but never receives its share.
/// The lost share is dropped, not redistributed among remaining members —
/// callers that credit shares must filter against the current participant
/// list themselves.
pub struct SharingSet<'a> {
    members: Cow<'a, [ParticipantId]>,
    share: Money,
}

impl<'a> SharingSet<'a> {
    /// Returns `None` when the set is empty (an expense with no participants
    /// and no subgroup), which makes the item a no-op instead of a division
    /// by zero.
    pub fn resolve(expense: &'a Expense, item: &'a ExpenseItem) -> Option<Self> {
        let members: Cow<'a, [ParticipantId]> = if item.subgroup.is_empty() {
            Cow::Owned(expense.participant_ids().collect())
        } else {
            Cow::Borrowed(item.subgroup.as_slice())
        };
        if members.is_empty() {
            return None;
        }
        let share = item.amount.split(members.len());
        Some(Self { members, share })
    }

    pub fn members(&self) -> &[ParticipantId] {
        &self.members
    }

    pub fn share(&self) -> Money {
        self.share
    }

    pub fn contains(&self, id: ParticipantId) -> bool {
        self.members.contains(&id)
    }
}

/// The item's payer, if set and still part of the expense.
///
/// A payer reference left dangling by a participant removal resolves to
/// `None`: the item contributes nothing to `paid` and emits no debt edges.
pub fn resolved_payer(expense: &Expense, item: &ExpenseItem) -> Option<ParticipantId> {
    item.payer.filter(|id| expense.is_participant(*id))
}

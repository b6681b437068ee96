use std::collections::BTreeMap;

use crate::{
    model::{Expense, ItemShare, ParticipantId},
    services::sharing::SharingSet,
};

/// Projects the per-participant line-item breakdown: for every current
/// participant, every item with its per-person share and whether the
/// participant is in that item's cost-sharing set.
pub struct ItemShareProjector;

impl ItemShareProjector {
    pub fn calculate(&self, expense: &Expense) -> BTreeMap<ParticipantId, Vec<ItemShare>> {
        let mut breakdown: BTreeMap<ParticipantId, Vec<ItemShare>> = expense
            .participant_ids()
            .map(|id| (id, Vec::with_capacity(expense.items.len())))
            .collect();

        for item in &expense.items {
            let Some(set) = SharingSet::resolve(expense, item) else {
                continue;
            };
            for (id, shares) in &mut breakdown {
                shares.push(ItemShare {
                    item_id: item.id,
                    description: item.description.clone(),
                    share: set.share(),
                    included: set.contains(*id),
                });
            }
        }

        breakdown
    }
}

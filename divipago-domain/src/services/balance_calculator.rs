use crate::{
    model::{Balance, BalanceSheet, Expense},
    services::sharing::{resolved_payer, SharingSet},
};

/// Derives per-participant paid/owed totals from the raw item list.
///
/// Total, synchronous, and free of failure modes: zero participants yield an
/// empty sheet, an unresolved payer simply earns no `paid` credit, and a
/// stale subgroup id contributes nothing (its share is lost, not
/// redistributed).
pub struct BalanceCalculator;

impl BalanceCalculator {
    pub fn calculate(&self, expense: &Expense) -> BalanceSheet {
        let mut sheet: BalanceSheet = expense
            .participant_ids()
            .map(|id| (id, Balance::default()))
            .collect();

        for item in &expense.items {
            if let Some(payer) = resolved_payer(expense, item) {
                if let Some(balance) = sheet.get_mut(&payer) {
                    balance.paid += item.amount;
                }
            }

            let Some(set) = SharingSet::resolve(expense, item) else {
                continue;
            };
            for member in set.members() {
                // Absent entries are stale subgroup references; skipping them
                // drops the share rather than rebalancing remaining members.
                if let Some(balance) = sheet.get_mut(member) {
                    balance.owes += set.share();
                }
            }
        }

        sheet
    }
}

use fxhash::FxHashSet;
use indexmap::IndexMap;

use crate::{
    model::{DebtEdge, Expense, Money, ParticipantId, PaymentTrail, SettlementPayment},
    services::sharing::{resolved_payer, SharingSet},
};

/// Converts per-item debt edges into a minimal set of net pairwise payments.
///
/// Netting is strictly per unordered pair of participants: all `A -> B` and
/// `B -> A` edges are summed and cancelled, so the output carries at most one
/// payment per pair and every payment is strictly positive. Cycles across
/// three or more participants are NOT collapsed; that n-party optimization is
/// a deliberate non-feature, kept for compatibility with existing expense
/// histories.
pub struct DebtConsolidator;

/// Net flow and contributing edges for one unordered pair, keyed `(low, high)`
/// by id order. A positive net means `low` pays `high`.
type PairLedger = IndexMap<(ParticipantId, ParticipantId), (Money, Vec<DebtEdge>)>;

impl DebtConsolidator {
    /// Emits one debt edge per non-payer sharing-set member per item.
    ///
    /// Items without a resolved payer produce no edges: a debt cannot be
    /// attributed to an unknown creditor. Stale subgroup members produce no
    /// edges either, mirroring how their share is dropped from `owes`.
    pub fn debt_edges(&self, expense: &Expense) -> Vec<DebtEdge> {
        let current: FxHashSet<ParticipantId> = expense.participant_ids().collect();
        let mut edges = Vec::new();

        for item in &expense.items {
            let Some(creditor) = resolved_payer(expense, item) else {
                continue;
            };
            let Some(set) = SharingSet::resolve(expense, item) else {
                continue;
            };
            for &debtor in set.members() {
                if debtor == creditor || !current.contains(&debtor) {
                    continue;
                }
                edges.push(DebtEdge {
                    debtor,
                    creditor,
                    amount: set.share(),
                    item_description: item.description.clone(),
                    item_amount: item.amount,
                });
            }
        }

        edges
    }

    /// Produces the settlement plan: netted pairwise payments, ordered by the
    /// first appearance of each pair in the item list.
    ///
    /// Netting arithmetic runs at full precision; a net that rounds to 0.00
    /// is treated as settled and omitted.
    pub fn consolidate(&self, expense: &Expense) -> Vec<SettlementPayment> {
        self.consolidate_with_trail(expense)
            .into_iter()
            .map(|trail| trail.payment)
            .collect()
    }

    /// Like [`DebtConsolidator::consolidate`], but each payment carries the
    /// debt edges (in both directions) that were netted to produce it.
    pub fn consolidate_with_trail(&self, expense: &Expense) -> Vec<PaymentTrail> {
        let edges = self.debt_edges(expense);
        let edge_count = edges.len();
        let ledger = self.net_pairs(edges);
        let pair_count = ledger.len();

        let payments: Vec<PaymentTrail> = ledger
            .into_iter()
            .filter_map(|((low, high), (net, contributions))| {
                if net.round_display().is_zero() {
                    return None;
                }
                let payment = if net > Money::ZERO {
                    SettlementPayment {
                        from: low,
                        to: high,
                        amount: net,
                    }
                } else {
                    SettlementPayment {
                        from: high,
                        to: low,
                        amount: -net,
                    }
                };
                Some(PaymentTrail {
                    payment,
                    contributions,
                })
            })
            .collect();

        tracing::debug!(
            edge_count,
            pair_count,
            payment_count = payments.len(),
            "Consolidated debt edges into pairwise settlement payments"
        );

        payments
    }

    fn net_pairs(&self, edges: Vec<DebtEdge>) -> PairLedger {
        let mut ledger = PairLedger::default();

        for edge in edges {
            let (key, signed) = if edge.debtor < edge.creditor {
                ((edge.debtor, edge.creditor), edge.amount)
            } else {
                ((edge.creditor, edge.debtor), -edge.amount)
            };
            let (net, contributions) = ledger
                .entry(key)
                .or_insert_with(|| (Money::ZERO, Vec::new()));
            *net += signed;
            contributions.push(edge);
        }

        ledger
    }
}

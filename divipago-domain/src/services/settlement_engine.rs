use std::collections::BTreeMap;

use crate::{
    model::{BalanceSheet, Expense, ItemShare, ParticipantId, PaymentTrail, SettlementPayment},
    services::{BalanceCalculator, DebtConsolidator, ItemShareProjector},
};

/// Facade over the derivation services: every read model of an expense is
/// recomputed from the raw participant and item lists on each call, so there
/// is no cached state to invalidate after an edit.
pub struct SettlementEngine;

impl SettlementEngine {
    pub fn balances(expense: &Expense) -> BalanceSheet {
        let calculator = BalanceCalculator;
        calculator.calculate(expense)
    }

    pub fn settlement(expense: &Expense) -> Vec<SettlementPayment> {
        let consolidator = DebtConsolidator;
        consolidator.consolidate(expense)
    }

    pub fn settlement_trail(expense: &Expense) -> Vec<PaymentTrail> {
        let consolidator = DebtConsolidator;
        consolidator.consolidate_with_trail(expense)
    }

    pub fn item_breakdown(expense: &Expense) -> BTreeMap<ParticipantId, Vec<ItemShare>> {
        let projector = ItemShareProjector;
        projector.calculate(expense)
    }
}

#![warn(clippy::uninlined_format_args)]

pub mod model;
pub mod services;

pub use model::{
    Balance, BalanceSheet, DebtEdge, Expense, ExpenseCategory, ExpenseId, ExpenseItem, ItemId,
    ItemShare, Money, Participant, ParticipantId, PaymentTrail, SettlementPayment,
};
pub use services::{
    BalanceCalculator, DebtConsolidator, ItemShareProjector, SettlementEngine, SharingSet,
};

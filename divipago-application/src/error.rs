use divipago_domain::{ExpenseId, ItemId, Money, ParticipantId};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Expense {0} not found")]
    ExpenseNotFound(ExpenseId),
    #[error("Participant {participant} is not part of expense {expense}")]
    ParticipantNotFound {
        participant: ParticipantId,
        expense: ExpenseId,
    },
    #[error("Item {item} not found in expense {expense}")]
    ItemNotFound { item: ItemId, expense: ExpenseId },
    #[error("Item amount must be positive (got {0})")]
    InvalidAmount(Money),
    #[error("Item description must not be empty")]
    EmptyDescription,
    #[error("Participant name must not be empty")]
    EmptyName,
    #[error("Expense title must not be empty")]
    EmptyTitle,
    #[error("Snapshot is not valid app data: {0}")]
    InvalidSnapshot(#[from] serde_json::Error),
}

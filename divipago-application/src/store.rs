use std::collections::BTreeMap;

use chrono::NaiveDate;
use divipago_domain::{
    Expense, ExpenseCategory, ExpenseId, ExpenseItem, ItemId, Money, Participant, ParticipantId,
};
use serde::{Deserialize, Serialize};

use crate::{error::StoreError, filter::FilterState};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppSettings {
    pub currency: String,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            currency: "ARS".to_owned(),
        }
    }
}

/// The whole application state: the expense list plus settings and the
/// current listing filter.
///
/// Every mutation takes the current state by reference and returns a fresh
/// value; callers swap states atomically and the engine only ever sees a
/// fully consistent snapshot. Balances and settlements are never stored
/// here — they are derived on demand, so an edit can never leave a stale
/// computed value behind.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppState {
    pub expenses: Vec<Expense>,
    #[serde(default)]
    pub settings: AppSettings,
    #[serde(default)]
    pub filter: FilterState,
}

impl AppState {
    pub fn add_expense(
        &self,
        title: impl Into<String>,
        category: ExpenseCategory,
        date: NaiveDate,
    ) -> Result<(Self, ExpenseId), StoreError> {
        let title = title.into();
        if title.trim().is_empty() {
            return Err(StoreError::EmptyTitle);
        }
        let expense = Expense::new(title, category, date);
        let id = expense.id;
        let mut next = self.clone();
        next.expenses.push(expense);
        Ok((next, id))
    }

    pub fn remove_expense(&self, id: ExpenseId) -> Result<Self, StoreError> {
        let index = self
            .expenses
            .iter()
            .position(|expense| expense.id == id)
            .ok_or(StoreError::ExpenseNotFound(id))?;
        let mut next = self.clone();
        next.expenses.remove(index);
        Ok(next)
    }

    pub fn expense(&self, id: ExpenseId) -> Result<&Expense, StoreError> {
        self.expenses
            .iter()
            .find(|expense| expense.id == id)
            .ok_or(StoreError::ExpenseNotFound(id))
    }

    fn expense_index(&self, id: ExpenseId) -> Result<usize, StoreError> {
        self.expenses
            .iter()
            .position(|expense| expense.id == id)
            .ok_or(StoreError::ExpenseNotFound(id))
    }

    pub fn add_participant(
        &self,
        expense_id: ExpenseId,
        name: impl Into<String>,
    ) -> Result<(Self, ParticipantId), StoreError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(StoreError::EmptyName);
        }
        let index = self.expense_index(expense_id)?;
        let participant = Participant::new(name);
        let id = participant.id;
        let mut next = self.clone();
        next.expenses[index].participants.push(participant);
        Ok((next, id))
    }

    /// Removes a participant and scrubs every reference to them from the
    /// items: a `payer` pointing at them is cleared and they are dropped
    /// from every subgroup. Item amounts and other subgroup members are
    /// left untouched, so remaining shares shrink their divisor.
    pub fn remove_participant(
        &self,
        expense_id: ExpenseId,
        participant_id: ParticipantId,
    ) -> Result<Self, StoreError> {
        let index = self.expense_index(expense_id)?;
        let position = self.expenses[index]
            .participants
            .iter()
            .position(|participant| participant.id == participant_id)
            .ok_or(StoreError::ParticipantNotFound {
                participant: participant_id,
                expense: expense_id,
            })?;

        let mut next = self.clone();
        let expense = &mut next.expenses[index];
        expense.participants.remove(position);
        for item in &mut expense.items {
            if item.payer == Some(participant_id) {
                item.payer = None;
            }
            item.subgroup.retain(|member| *member != participant_id);
        }

        tracing::debug!(
            expense = %expense_id,
            participant = %participant_id,
            "Removed participant and scrubbed item references"
        );
        Ok(next)
    }

    pub fn add_item(
        &self,
        expense_id: ExpenseId,
        description: impl Into<String>,
        amount: Money,
        payer: Option<ParticipantId>,
        subgroup: Vec<ParticipantId>,
    ) -> Result<(Self, ItemId), StoreError> {
        let description = description.into();
        if description.trim().is_empty() {
            return Err(StoreError::EmptyDescription);
        }
        if amount <= Money::ZERO {
            return Err(StoreError::InvalidAmount(amount));
        }
        let index = self.expense_index(expense_id)?;
        for member in payer.iter().chain(subgroup.iter()) {
            if !self.expenses[index].is_participant(*member) {
                return Err(StoreError::ParticipantNotFound {
                    participant: *member,
                    expense: expense_id,
                });
            }
        }

        let mut item = ExpenseItem::new(description, amount).with_subgroup(subgroup);
        item.payer = payer;
        let id = item.id;
        let mut next = self.clone();
        next.expenses[index].items.push(item);
        Ok((next, id))
    }

    pub fn remove_item(&self, expense_id: ExpenseId, item_id: ItemId) -> Result<Self, StoreError> {
        let index = self.expense_index(expense_id)?;
        let position = self.expenses[index]
            .items
            .iter()
            .position(|item| item.id == item_id)
            .ok_or(StoreError::ItemNotFound {
                item: item_id,
                expense: expense_id,
            })?;
        let mut next = self.clone();
        next.expenses[index].items.remove(position);
        Ok(next)
    }

    /// Sets or clears who fronted the money for an item. A new payer must be
    /// a current participant.
    pub fn reassign_item_payer(
        &self,
        expense_id: ExpenseId,
        item_id: ItemId,
        payer: Option<ParticipantId>,
    ) -> Result<Self, StoreError> {
        let index = self.expense_index(expense_id)?;
        if let Some(payer) = payer {
            if !self.expenses[index].is_participant(payer) {
                return Err(StoreError::ParticipantNotFound {
                    participant: payer,
                    expense: expense_id,
                });
            }
        }
        let position = self.expenses[index]
            .items
            .iter()
            .position(|item| item.id == item_id)
            .ok_or(StoreError::ItemNotFound {
                item: item_id,
                expense: expense_id,
            })?;
        let mut next = self.clone();
        next.expenses[index].items[position].payer = payer;
        Ok(next)
    }

    pub fn with_search_query(&self, query: impl Into<String>) -> Self {
        let mut next = self.clone();
        next.filter.search_query = query.into();
        next
    }

    pub fn with_date_range(&self, from: Option<NaiveDate>, to: Option<NaiveDate>) -> Self {
        let mut next = self.clone();
        next.filter.date_from = from;
        next.filter.date_to = to;
        next
    }

    pub fn with_selected_category(&self, category: Option<ExpenseCategory>) -> Self {
        let mut next = self.clone();
        next.filter.category = category;
        next
    }

    pub fn with_currency(&self, currency: impl Into<String>) -> Self {
        let mut next = self.clone();
        next.settings.currency = currency.into();
        next
    }

    /// Total spend per category across all expenses, unfiltered. Categories
    /// with no expenses are absent rather than zero.
    pub fn category_totals(&self) -> BTreeMap<ExpenseCategory, Money> {
        let mut totals = BTreeMap::new();
        for expense in &self.expenses {
            *totals.entry(expense.category).or_insert(Money::ZERO) += expense.total();
        }
        totals
    }

    /// Expenses passing the current filter, in insertion order.
    pub fn filtered_expenses(&self) -> Vec<&Expense> {
        self.expenses
            .iter()
            .filter(|expense| self.filter.matches(expense))
            .collect()
    }

    /// Serializes the full state as a JSON snapshot for backup or transfer.
    pub fn export_data(&self) -> Result<String, StoreError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Restores a state from a snapshot produced by
    /// [`AppState::export_data`]. The snapshot replaces the state wholesale.
    pub fn import_data(json: &str) -> Result<Self, StoreError> {
        let state: AppState = serde_json::from_str(json)?;
        tracing::debug!(
            expense_count = state.expenses.len(),
            "Imported app data snapshot"
        );
        Ok(state)
    }
}

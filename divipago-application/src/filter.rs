use chrono::NaiveDate;
use divipago_domain::{Expense, ExpenseCategory};
use serde::{Deserialize, Serialize};

/// Current listing filter. All criteria are conjunctive; a default filter
/// matches every expense.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterState {
    #[serde(default)]
    pub search_query: String,
    #[serde(default)]
    pub date_from: Option<NaiveDate>,
    #[serde(default)]
    pub date_to: Option<NaiveDate>,
    #[serde(default)]
    pub category: Option<ExpenseCategory>,
}

impl FilterState {
    pub fn matches(&self, expense: &Expense) -> bool {
        self.matches_query(expense)
            && self.matches_date(expense.date)
            && self.matches_category(expense.category)
    }

    /// Case-insensitive substring match on the title. Whitespace-only
    /// queries match everything.
    fn matches_query(&self, expense: &Expense) -> bool {
        let query = self.search_query.trim();
        if query.is_empty() {
            return true;
        }
        expense
            .title
            .to_lowercase()
            .contains(&query.to_lowercase())
    }

    /// Inclusive on both bounds; an open bound matches everything on that side.
    fn matches_date(&self, date: NaiveDate) -> bool {
        self.date_from.is_none_or(|from| date >= from)
            && self.date_to.is_none_or(|to| date <= to)
    }

    fn matches_category(&self, category: ExpenseCategory) -> bool {
        self.category.is_none_or(|selected| selected == category)
    }
}

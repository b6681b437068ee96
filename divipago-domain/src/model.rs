use std::{
    collections::BTreeMap,
    fmt,
    iter::Sum,
    ops::{Add, AddAssign, Neg, Sub, SubAssign},
};

use chrono::NaiveDate;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A monetary amount at full decimal precision.
///
/// All intermediate arithmetic (splitting, summing, netting) stays at full
/// precision; [`Money::round_display`] is the single point where the
/// two-decimal display quantization happens. Chained computations never
/// round, so equal debts in opposite directions cancel exactly.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Money(Decimal);

impl Money {
    pub const ZERO: Money = Money(Decimal::ZERO);

    /// Builds a `Money` from a mantissa and scale, e.g. `Money::new(1250, 2)` is 12.50.
    pub fn new(num: i64, scale: u32) -> Self {
        Self(Decimal::new(num, scale))
    }

    pub fn from_i64(value: i64) -> Self {
        Self(Decimal::from(value))
    }

    pub fn from_decimal(value: Decimal) -> Self {
        Self(value)
    }

    pub fn as_decimal(self) -> Decimal {
        self.0
    }

    pub fn abs(self) -> Self {
        Self(self.0.abs())
    }

    pub fn is_zero(self) -> bool {
        self.0.is_zero()
    }

    /// Equal division among `ways` consumers. Callers guard `ways > 0`.
    pub fn split(self, ways: usize) -> Self {
        debug_assert!(ways > 0, "split requires at least one consumer");
        Self(self.0 / Decimal::from(ways as u64))
    }

    /// Quantizes to two decimal places, half away from zero.
    ///
    /// This is display rounding only; engine arithmetic never calls it on
    /// intermediate values.
    pub fn round_display(self) -> Self {
        Self(
            self.0
                .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero),
        )
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl Add for Money {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self(self.0 + rhs.0)
    }
}

impl AddAssign for Money {
    fn add_assign(&mut self, rhs: Self) {
        self.0 += rhs.0;
    }
}

impl Sub for Money {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        Self(self.0 - rhs.0)
    }
}

impl SubAssign for Money {
    fn sub_assign(&mut self, rhs: Self) {
        self.0 -= rhs.0;
    }
}

impl Neg for Money {
    type Output = Self;

    fn neg(self) -> Self::Output {
        Self(-self.0)
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::ZERO, Add::add)
    }
}

impl<'a> Sum<&'a Money> for Money {
    fn sum<I: Iterator<Item = &'a Money>>(iter: I) -> Self {
        iter.copied().sum()
    }
}

macro_rules! id_newtype {
    ($(#[$doc:meta])* $name:ident) => {
        $(#[$doc])*
        #[derive(
            Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(pub Uuid);

        impl $name {
            pub fn new() -> Self {
                Self(Uuid::new_v4())
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                self.0.fmt(f)
            }
        }
    };
}

id_newtype!(
    /// Stable identity of a participant within an expense.
    ParticipantId
);
id_newtype!(ItemId);
id_newtype!(ExpenseId);

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Participant {
    pub id: ParticipantId,
    pub name: String,
}

impl Participant {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: ParticipantId::new(),
            name: name.into(),
        }
    }
}

/// Closed category set with an associated display icon.
///
/// Replaces the string-keyed icon lookup of earlier revisions; an unknown
/// category can no longer fall through to a missing icon. The serde ids
/// match the historical snapshot format (`comida`, `restaurante`, ...).
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum ExpenseCategory {
    Comida,
    Restaurante,
    Super,
    Transporte,
    Entretenimiento,
    Shopping,
    Utilidades,
    Salud,
    Viajes,
    Educacion,
    #[default]
    Otros,
}

impl ExpenseCategory {
    pub const ALL: [ExpenseCategory; 11] = [
        ExpenseCategory::Comida,
        ExpenseCategory::Restaurante,
        ExpenseCategory::Super,
        ExpenseCategory::Transporte,
        ExpenseCategory::Entretenimiento,
        ExpenseCategory::Shopping,
        ExpenseCategory::Utilidades,
        ExpenseCategory::Salud,
        ExpenseCategory::Viajes,
        ExpenseCategory::Educacion,
        ExpenseCategory::Otros,
    ];

    pub fn icon(self) -> &'static str {
        match self {
            ExpenseCategory::Comida => "🍕",
            ExpenseCategory::Restaurante => "🍽️",
            ExpenseCategory::Super => "🛒",
            ExpenseCategory::Transporte => "🚗",
            ExpenseCategory::Entretenimiento => "🎭",
            ExpenseCategory::Shopping => "🛍️",
            ExpenseCategory::Utilidades => "💡",
            ExpenseCategory::Salud => "🏥",
            ExpenseCategory::Viajes => "✈️",
            ExpenseCategory::Educacion => "📚",
            ExpenseCategory::Otros => "📌",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ExpenseCategory::Comida => "Comida",
            ExpenseCategory::Restaurante => "Restaurante",
            ExpenseCategory::Super => "Super",
            ExpenseCategory::Transporte => "Transporte",
            ExpenseCategory::Entretenimiento => "Entretenimiento",
            ExpenseCategory::Shopping => "Shopping",
            ExpenseCategory::Utilidades => "Utilidades",
            ExpenseCategory::Salud => "Salud",
            ExpenseCategory::Viajes => "Viajes",
            ExpenseCategory::Educacion => "Educacion",
            ExpenseCategory::Otros => "Otros",
        }
    }
}

/// A single expense line: paid by at most one participant, consumed by a
/// subgroup.
///
/// An empty `subgroup` means "everyone in the parent expense at evaluation
/// time". `payer` may be unset (nobody has fronted the money yet) or may
/// reference a participant that was later removed; both cases are tolerated
/// by the engine rather than rejected.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExpenseItem {
    pub id: ItemId,
    pub description: String,
    pub amount: Money,
    pub payer: Option<ParticipantId>,
    #[serde(default)]
    pub subgroup: Vec<ParticipantId>,
}

impl ExpenseItem {
    pub fn new(description: impl Into<String>, amount: Money) -> Self {
        Self {
            id: ItemId::new(),
            description: description.into(),
            amount,
            payer: None,
            subgroup: Vec::new(),
        }
    }

    pub fn with_payer(mut self, payer: ParticipantId) -> Self {
        self.payer = Some(payer);
        self
    }

    pub fn with_subgroup(mut self, subgroup: Vec<ParticipantId>) -> Self {
        self.subgroup = subgroup;
        self
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Expense {
    pub id: ExpenseId,
    pub title: String,
    pub category: ExpenseCategory,
    pub date: NaiveDate,
    pub participants: Vec<Participant>,
    pub items: Vec<ExpenseItem>,
}

impl Expense {
    pub fn new(title: impl Into<String>, category: ExpenseCategory, date: NaiveDate) -> Self {
        Self {
            id: ExpenseId::new(),
            title: title.into(),
            category,
            date,
            participants: Vec::new(),
            items: Vec::new(),
        }
    }

    pub fn total(&self) -> Money {
        self.items.iter().map(|item| item.amount).sum()
    }

    pub fn participant_ids(&self) -> impl Iterator<Item = ParticipantId> + '_ {
        self.participants.iter().map(|participant| participant.id)
    }

    pub fn is_participant(&self, id: ParticipantId) -> bool {
        self.participants
            .iter()
            .any(|participant| participant.id == id)
    }

    pub fn participant_name(&self, id: ParticipantId) -> Option<&str> {
        self.participants
            .iter()
            .find(|participant| participant.id == id)
            .map(|participant| participant.name.as_str())
    }
}

/// Aggregate paid/owed position of one participant.
///
/// Derived, never stored: recomputed from scratch on every query.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Balance {
    pub paid: Money,
    pub owes: Money,
}

impl Balance {
    /// Positive means this participant is in debt to the group; negative
    /// means the group owes them.
    pub fn net(self) -> Money {
        self.owes - self.paid
    }
}

/// Per-participant balances keyed by id, with stable iteration order.
pub type BalanceSheet = BTreeMap<ParticipantId, Balance>;

/// A per-item obligation from one non-payer sharing-set member to the item's
/// payer, tagged with the originating item for the audit trail.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DebtEdge {
    pub debtor: ParticipantId,
    pub creditor: ParticipantId,
    pub amount: Money,
    pub item_description: String,
    pub item_amount: Money,
}

/// A consolidated, netted transfer that clears all debt edges between a pair
/// of participants. Always strictly positive.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SettlementPayment {
    pub from: ParticipantId,
    pub to: ParticipantId,
    pub amount: Money,
}

/// A settlement payment together with the debt edges (in both directions)
/// that were netted to produce it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PaymentTrail {
    pub payment: SettlementPayment,
    pub contributions: Vec<DebtEdge>,
}

/// One row of the per-participant line-item breakdown: the item's per-person
/// share and whether this participant was part of its cost-sharing set.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ItemShare {
    pub item_id: ItemId,
    pub description: String,
    pub share: Money,
    pub included: bool,
}

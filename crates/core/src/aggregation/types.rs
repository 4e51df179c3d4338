//! Aggregation result types.

use carteira_shared::RecordId;
use rust_decimal::Decimal;
use serde::Serialize;

/// Which collection a record came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RecordKind {
    /// A balance ("Saldo").
    Balance,
    /// An expense ("Conta").
    Expense,
}

impl std::fmt::Display for RecordKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Balance => write!(f, "balance"),
            Self::Expense => write!(f, "expense"),
        }
    }
}

/// A record whose amount did not parse, or overflowed the total, and was
/// counted as zero.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkippedAmount {
    /// Record id.
    pub id: RecordId,
    /// Collection the record belongs to.
    pub kind: RecordKind,
    /// The stored amount string.
    pub raw: String,
}

/// Running total over one collection.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Tally {
    /// Sum of every parsable amount.
    pub total: Decimal,
    /// Number of records that contributed.
    pub counted: usize,
    /// Records counted as zero.
    pub skipped: Vec<SkippedAmount>,
}

/// The three display strings of a summary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FormattedTotals {
    /// Balance total, e.g. `R$ 1.500,00`.
    pub balances: String,
    /// Expense total.
    pub expenses: String,
    /// Net total.
    pub net: String,
}

/// Aggregate view over balances and expenses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Summary {
    /// Exact balance total.
    pub balance_total: Decimal,
    /// Exact expense total.
    pub expense_total: Decimal,
    /// Net total from the cent-rounded totals.
    pub net_total: Decimal,
    /// Display strings.
    pub formatted: FormattedTotals,
    /// Records whose amounts were skipped, balances first.
    pub skipped: Vec<SkippedAmount>,
}

impl Summary {
    /// Returns true when the net total is below zero.
    #[must_use]
    pub fn is_deficit(&self) -> bool {
        self.net_total.is_sign_negative() && !self.net_total.is_zero()
    }
}

//! Balance and expense records.
//!
//! Records are snapshots handed over by the document store: every field is a
//! string exactly as stored. Drafts are the typed inputs accepted at the API
//! boundary; they render into the stored string formats.

use std::str::FromStr;

use carteira_shared::RecordId;
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize, de};
use thiserror::Error;

use crate::currency::{Brl, UnparsableAmount, parse_balance_amount, parse_expense_amount};

/// Largest installment count a draft may carry.
pub const MAX_INSTALLMENTS: u8 = 99;

/// Validation errors for record drafts.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RecordError {
    /// Description is empty or whitespace.
    #[error("description must not be empty")]
    EmptyDescription,

    /// Amount is below zero.
    #[error("amount must not be negative")]
    NegativeAmount,

    /// Installment count is not an integer in `1..=99`.
    #[error("installments must be a whole number between 1 and {MAX_INSTALLMENTS}, got {0:?}")]
    InvalidInstallments(String),
}

/// A stored balance ("Saldo").
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BalanceRecord {
    /// Store-assigned id.
    pub id: RecordId,
    /// Free-form description.
    pub description: String,
    /// Amount in display format, e.g. `R$ 1.234,56`.
    pub amount: String,
}

impl BalanceRecord {
    /// Parses the stored amount.
    pub fn parsed_amount(&self) -> Result<Decimal, UnparsableAmount> {
        parse_balance_amount(&self.amount)
    }
}

/// A stored expense ("Conta").
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExpenseRecord {
    /// Store-assigned id.
    pub id: RecordId,
    /// Free-form description.
    pub description: String,
    /// Amount in plain format, e.g. `1234,56`.
    pub amount: String,
    /// Installment count as stored, e.g. `"3"`.
    pub installments: String,
}

impl ExpenseRecord {
    /// Parses the stored amount.
    pub fn parsed_amount(&self) -> Result<Decimal, UnparsableAmount> {
        parse_expense_amount(&self.amount)
    }
}

/// Number of installments an expense is split into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct Installments(u8);

impl Installments {
    /// A single payment.
    pub const ONE: Self = Self(1);

    /// Returns the count.
    #[must_use]
    pub const fn get(self) -> u8 {
        self.0
    }
}

impl TryFrom<u64> for Installments {
    type Error = RecordError;

    fn try_from(value: u64) -> Result<Self, Self::Error> {
        u8::try_from(value)
            .ok()
            .filter(|n| (1..=MAX_INSTALLMENTS).contains(n))
            .map(Self)
            .ok_or_else(|| RecordError::InvalidInstallments(value.to_string()))
    }
}

impl FromStr for Installments {
    type Err = RecordError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() || !trimmed.bytes().all(|b| b.is_ascii_digit()) {
            return Err(RecordError::InvalidInstallments(s.to_string()));
        }
        trimmed
            .parse::<u64>()
            .ok()
            .and_then(|n| Self::try_from(n).ok())
            .ok_or_else(|| RecordError::InvalidInstallments(s.to_string()))
    }
}

impl std::fmt::Display for Installments {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl<'de> Deserialize<'de> for Installments {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct InstallmentsVisitor;

        impl de::Visitor<'_> for InstallmentsVisitor {
            type Value = Installments;

            fn expecting(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "an installment count between 1 and {MAX_INSTALLMENTS}")
            }

            fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
                v.parse().map_err(E::custom)
            }

            fn visit_u64<E: de::Error>(self, v: u64) -> Result<Self::Value, E> {
                Installments::try_from(v).map_err(E::custom)
            }

            fn visit_i64<E: de::Error>(self, v: i64) -> Result<Self::Value, E> {
                u64::try_from(v)
                    .map_err(|_| RecordError::InvalidInstallments(v.to_string()))
                    .and_then(Installments::try_from)
                    .map_err(E::custom)
            }
        }

        deserializer.deserialize_any(InstallmentsVisitor)
    }
}

fn check_common(description: &str, amount: Brl) -> Result<(), RecordError> {
    if description.trim().is_empty() {
        return Err(RecordError::EmptyDescription);
    }
    if amount.is_negative() {
        return Err(RecordError::NegativeAmount);
    }
    Ok(())
}

/// Input for creating or replacing a balance.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct BalanceDraft {
    /// Free-form description.
    pub description: String,
    /// Amount.
    pub amount: Brl,
}

impl BalanceDraft {
    /// Checks the draft: non-empty description, non-negative amount.
    pub fn validate(&self) -> Result<(), RecordError> {
        check_common(&self.description, self.amount)
    }

    /// Amount as it is stored for balances.
    #[must_use]
    pub fn stored_amount(&self) -> String {
        self.amount.to_display()
    }
}

/// Input for creating or replacing an expense.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ExpenseDraft {
    /// Free-form description.
    pub description: String,
    /// Amount; strings use the plain format.
    #[serde(deserialize_with = "Brl::deserialize_plain")]
    pub amount: Brl,
    /// Installment count.
    pub installments: Installments,
}

impl ExpenseDraft {
    /// Checks the draft: non-empty description, non-negative amount.
    pub fn validate(&self) -> Result<(), RecordError> {
        check_common(&self.description, self.amount)
    }

    /// Amount as it is stored for expenses.
    #[must_use]
    pub fn stored_amount(&self) -> String {
        self.amount.to_plain()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use rust_decimal_macros::dec;

    #[rstest]
    #[case("1", 1)]
    #[case("12", 12)]
    #[case(" 3 ", 3)]
    #[case("99", 99)]
    fn test_installments_from_str(#[case] raw: &str, #[case] expected: u8) {
        assert_eq!(raw.parse::<Installments>().unwrap().get(), expected);
    }

    #[rstest]
    #[case("0")]
    #[case("100")]
    #[case("-1")]
    #[case("1.5")]
    #[case("")]
    #[case("dez")]
    fn test_installments_rejects(#[case] raw: &str) {
        assert!(matches!(
            raw.parse::<Installments>(),
            Err(RecordError::InvalidInstallments(_))
        ));
    }

    #[test]
    fn test_installments_deserialize() {
        let from_str: Installments = serde_json::from_str("\"3\"").unwrap();
        let from_num: Installments = serde_json::from_str("3").unwrap();
        assert_eq!(from_str, from_num);
        assert!(serde_json::from_str::<Installments>("0").is_err());
        assert!(serde_json::from_str::<Installments>("-2").is_err());
    }

    #[test]
    fn test_balance_draft_stores_display_format() {
        let draft: BalanceDraft =
            serde_json::from_str(r#"{"description": "Salário", "amount": "R$ 1.234,56"}"#)
                .unwrap();
        assert!(draft.validate().is_ok());
        assert_eq!(draft.amount.amount(), dec!(1234.56));
        assert_eq!(draft.stored_amount(), "R$ 1.234,56");
    }

    #[test]
    fn test_expense_draft_stores_plain_format() {
        let draft: ExpenseDraft = serde_json::from_str(
            r#"{"description": "Aluguel", "amount": 1500.5, "installments": "2"}"#,
        )
        .unwrap();
        assert!(draft.validate().is_ok());
        assert_eq!(draft.stored_amount(), "1500,50");
        assert_eq!(draft.installments.get(), 2);
    }

    #[test]
    fn test_expense_draft_reads_plain_strings() {
        let draft: ExpenseDraft = serde_json::from_str(
            r#"{"description": "Luz", "amount": "42.50", "installments": 1}"#,
        )
        .unwrap();
        assert_eq!(draft.amount.amount(), dec!(42.50));
        assert_eq!(draft.stored_amount(), "42,50");

        let stored = ExpenseRecord {
            id: RecordId::from("e1"),
            description: draft.description.clone(),
            amount: draft.stored_amount(),
            installments: draft.installments.to_string(),
        };
        assert_eq!(stored.parsed_amount().unwrap(), draft.amount.amount());

        assert!(
            serde_json::from_str::<ExpenseDraft>(
                r#"{"description": "Luz", "amount": "R$ 42,50", "installments": 1}"#
            )
            .is_err()
        );
    }

    #[test]
    fn test_draft_validation() {
        let empty = BalanceDraft {
            description: "  ".to_string(),
            amount: Brl::new(dec!(10)),
        };
        assert_eq!(empty.validate(), Err(RecordError::EmptyDescription));

        let negative = ExpenseDraft {
            description: "Luz".to_string(),
            amount: Brl::new(dec!(-1)),
            installments: Installments::ONE,
        };
        assert_eq!(negative.validate(), Err(RecordError::NegativeAmount));

        let zero = BalanceDraft {
            description: "Carteira".to_string(),
            amount: Brl::ZERO,
        };
        assert!(zero.validate().is_ok());
    }

    #[test]
    fn test_records_parse_their_own_format() {
        let balance = BalanceRecord {
            id: RecordId::from("b1"),
            description: "Salário".to_string(),
            amount: "R$ 1.000,00".to_string(),
        };
        assert_eq!(balance.parsed_amount().unwrap(), dec!(1000));

        let expense = ExpenseRecord {
            id: RecordId::from("e1"),
            description: "Mercado".to_string(),
            amount: "R$ 1.000,00".to_string(),
            installments: "1".to_string(),
        };
        assert!(expense.parsed_amount().is_err());
    }
}

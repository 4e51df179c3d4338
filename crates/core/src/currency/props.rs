//! Property-based tests for amount parsing and formatting.

use proptest::prelude::*;
use rust_decimal::Decimal;

use super::brl::{Brl, format_brl, parse_balance_amount, parse_expense_amount};

/// Strategy to generate signed cent amounts (-10,000,000.00 to 10,000,000.00).
fn signed_amount() -> impl Strategy<Value = Decimal> {
    (-1_000_000_000i64..1_000_000_000i64).prop_map(|cents| Decimal::new(cents, 2))
}

/// Strategy to generate arbitrary short strings, including separators and markers.
fn noisy_input() -> impl Strategy<Value = String> {
    "[0-9R$.,\\- a-z]{0,16}"
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// Formatted output is always a valid balance string denoting the same cents.
    #[test]
    fn prop_formatted_amount_reads_back_as_balance(amount in signed_amount()) {
        let formatted = format_brl(amount);
        prop_assert_eq!(parse_balance_amount(&formatted).unwrap(), amount);
    }

    /// Formatted output always ends in a comma and exactly two digits.
    #[test]
    fn prop_format_has_two_fraction_digits(amount in signed_amount()) {
        let formatted = format_brl(amount);
        let (_, frac) = formatted.rsplit_once(',').unwrap();
        prop_assert_eq!(frac.len(), 2);
        prop_assert!(frac.bytes().all(|b| b.is_ascii_digit()));
        prop_assert!(formatted.starts_with("R$ ") || formatted.starts_with("-R$ "));
    }

    /// The plain rendering is what expenses store, so it must parse as an expense.
    #[test]
    fn prop_plain_amount_reads_back_as_expense(amount in signed_amount()) {
        let plain = Brl::new(amount).to_plain();
        prop_assert_eq!(parse_expense_amount(&plain).unwrap(), amount);
    }

    /// Parsing never panics, whatever the input.
    #[test]
    fn prop_parsers_total(input in noisy_input()) {
        let _ = parse_balance_amount(&input);
        let _ = parse_expense_amount(&input);
    }

    /// Display strings with thousands separators are never accepted as expenses.
    #[test]
    fn prop_grouped_display_is_not_an_expense(cents in 100_000i64..1_000_000_000i64) {
        let formatted = format_brl(Decimal::new(cents, 2));
        prop_assert!(parse_expense_amount(&formatted).is_err());
    }
}

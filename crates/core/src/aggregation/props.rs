//! Property-based tests for aggregation.

use carteira_shared::RecordId;
use proptest::prelude::*;
use rust_decimal::Decimal;

use super::engine::AggregationEngine;
use crate::currency::Brl;
use crate::records::{BalanceRecord, ExpenseRecord};

/// Strategy to generate non-negative cent amounts (0.00 to 1,000,000.00).
fn cents() -> impl Strategy<Value = Decimal> {
    (0i64..100_000_000i64).prop_map(|c| Decimal::new(c, 2))
}

/// Strategy to generate an expense list mixing valid and junk amounts.
fn expenses() -> impl Strategy<Value = Vec<ExpenseRecord>> {
    prop::collection::vec(
        prop_oneof![
            3 => cents().prop_map(|d| Brl::new(d).to_plain()),
            1 => "[a-z ]{1,8}",
        ],
        0..20,
    )
    .prop_map(|amounts| {
        amounts
            .into_iter()
            .enumerate()
            .map(|(i, amount)| ExpenseRecord {
                id: RecordId::new(format!("e{i}")),
                description: "conta".to_string(),
                amount,
                installments: "1".to_string(),
            })
            .collect()
    })
}

fn balances_from(amounts: &[Decimal]) -> Vec<BalanceRecord> {
    amounts
        .iter()
        .enumerate()
        .map(|(i, d)| BalanceRecord {
            id: RecordId::new(format!("b{i}")),
            description: "saldo".to_string(),
            amount: Brl::new(*d).to_display(),
        })
        .collect()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// Order of records never changes a total.
    #[test]
    fn prop_sum_is_order_independent(
        (original, shuffled) in expenses().prop_flat_map(|v| (Just(v.clone()), Just(v).prop_shuffle()))
    ) {
        prop_assert_eq!(
            AggregationEngine::sum_expenses(&original),
            AggregationEngine::sum_expenses(&shuffled)
        );
    }

    /// A balance total is the exact sum of the amounts that produced it.
    #[test]
    fn prop_balance_sum_is_exact(amounts in prop::collection::vec(cents(), 0..20)) {
        let expected = amounts.iter().copied().sum::<Decimal>();
        prop_assert_eq!(AggregationEngine::sum_balances(&balances_from(&amounts)), expected);
    }

    /// Junk entries contribute exactly nothing.
    #[test]
    fn prop_invalid_entries_count_as_zero(records in expenses()) {
        let valid: Vec<ExpenseRecord> = records
            .iter()
            .filter(|r| r.parsed_amount().is_ok())
            .cloned()
            .collect();
        let tally = AggregationEngine::tally_expenses(&records);

        prop_assert_eq!(tally.total, AggregationEngine::sum_expenses(&valid));
        prop_assert_eq!(tally.counted + tally.skipped.len(), records.len());
    }

    /// Net is plain subtraction.
    #[test]
    fn prop_net_is_difference(b in cents(), e in cents()) {
        prop_assert_eq!(AggregationEngine::compute_net(b, e), b - e);
    }
}

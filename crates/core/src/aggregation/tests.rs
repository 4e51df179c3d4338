//! Unit tests for the aggregation engine.

use carteira_shared::RecordId;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use super::engine::AggregationEngine;
use super::types::RecordKind;
use crate::records::{BalanceRecord, ExpenseRecord};

fn balance(id: &str, amount: &str) -> BalanceRecord {
    BalanceRecord {
        id: RecordId::from(id),
        description: format!("saldo {id}"),
        amount: amount.to_string(),
    }
}

fn expense(id: &str, amount: &str) -> ExpenseRecord {
    ExpenseRecord {
        id: RecordId::from(id),
        description: format!("conta {id}"),
        amount: amount.to_string(),
        installments: "1".to_string(),
    }
}

#[test]
fn test_empty_sums_are_zero() {
    assert_eq!(AggregationEngine::sum_balances(&[]), Decimal::ZERO);
    assert_eq!(AggregationEngine::sum_expenses(&[]), Decimal::ZERO);
}

#[test]
fn test_sum_balances_skips_invalid() {
    let records = vec![
        balance("a", "R$ 1.234,56"),
        balance("b", "não é número"),
        balance("c", "R$ 0,44"),
    ];

    let tally = AggregationEngine::tally_balances(&records);

    assert_eq!(tally.total, dec!(1235.00));
    assert_eq!(tally.counted, 2);
    assert_eq!(tally.skipped.len(), 1);
    assert_eq!(tally.skipped[0].id, RecordId::from("b"));
    assert_eq!(tally.skipped[0].kind, RecordKind::Balance);
    assert_eq!(tally.skipped[0].raw, "não é número");
}

#[test]
fn test_sum_reports_overflowing_amount() {
    let max = "R$ 79.228.162.514.264.337.593.543.950.335";
    let records = vec![balance("a", max), balance("b", max), balance("c", "R$ 1,00")];

    let tally = AggregationEngine::tally_balances(&records);

    assert_eq!(tally.total, Decimal::MAX);
    assert_eq!(tally.counted, 1);
    assert_eq!(tally.skipped.len(), 2);
    assert_eq!(tally.skipped[0].id, RecordId::from("b"));
    assert_eq!(tally.skipped[0].raw, max);
    assert_eq!(tally.skipped[1].id, RecordId::from("c"));
}

#[test]
fn test_sum_expenses_uses_expense_format() {
    // A display-format string is not a valid expense amount.
    let records = vec![expense("a", "42,50"), expense("b", "R$ 10,00"), expense("c", "7")];

    assert_eq!(AggregationEngine::sum_expenses(&records), dec!(49.50));
}

#[test]
fn test_sum_avoids_float_drift() {
    let records: Vec<ExpenseRecord> = (0..10).map(|i| expense(&i.to_string(), "0,10")).collect();

    assert_eq!(AggregationEngine::sum_expenses(&records), dec!(1.00));
}

#[test]
fn test_compute_net() {
    assert_eq!(
        AggregationEngine::compute_net(dec!(1500), dec!(300)),
        dec!(1200)
    );
    assert_eq!(
        AggregationEngine::compute_net(dec!(100), dec!(250.75)),
        dec!(-150.75)
    );
    assert_eq!(
        AggregationEngine::compute_net(Decimal::ZERO, Decimal::ZERO),
        Decimal::ZERO
    );
}

#[test]
fn test_end_to_end_summary() {
    let balances = vec![balance("b1", "R$ 1.000,00"), balance("b2", "R$ 500,00")];
    let expenses = vec![expense("e1", "300,00"), expense("e2", "abc")];

    let summary = AggregationEngine::summarize(&balances, &expenses);

    assert_eq!(summary.balance_total, dec!(1500.00));
    assert_eq!(summary.expense_total, dec!(300.00));
    assert_eq!(summary.net_total, dec!(1200.00));
    assert_eq!(summary.formatted.balances, "R$ 1.500,00");
    assert_eq!(summary.formatted.expenses, "R$ 300,00");
    assert_eq!(summary.formatted.net, "R$ 1.200,00");
    assert!(!summary.is_deficit());

    assert_eq!(summary.skipped.len(), 1);
    assert_eq!(summary.skipped[0].id, RecordId::from("e2"));
    assert_eq!(summary.skipped[0].kind, RecordKind::Expense);
}

#[test]
fn test_summary_deficit() {
    let balances = vec![balance("b1", "R$ 100,00")];
    let expenses = vec![expense("e1", "1234,50")];

    let summary = AggregationEngine::summarize(&balances, &expenses);

    assert!(summary.is_deficit());
    assert_eq!(summary.net_total, dec!(-1134.50));
    assert_eq!(summary.formatted.net, "-R$ 1.134,50");
}

#[test]
fn test_summary_reconciles_rounded_figures() {
    // Each total is rounded on its own and the net follows the rounded figures.
    let balances = vec![balance("b1", "R$ 10,005")];
    let expenses = vec![expense("e1", "0,004")];

    let summary = AggregationEngine::summarize(&balances, &expenses);

    assert_eq!(summary.formatted.balances, "R$ 10,01");
    assert_eq!(summary.formatted.expenses, "R$ 0,00");
    assert_eq!(summary.formatted.net, "R$ 10,01");
    assert_eq!(summary.balance_total, dec!(10.005));
}

#[test]
fn test_summary_of_nothing() {
    let summary = AggregationEngine::summarize(&[], &[]);

    assert_eq!(summary.formatted.balances, "R$ 0,00");
    assert_eq!(summary.formatted.expenses, "R$ 0,00");
    assert_eq!(summary.formatted.net, "R$ 0,00");
    assert!(summary.skipped.is_empty());
}

#[test]
fn test_summary_serializes_for_display() {
    let summary = AggregationEngine::summarize(&[balance("b1", "R$ 2,50")], &[]);
    let json = serde_json::to_value(&summary).unwrap();

    assert_eq!(json["balance_total"], "2.50");
    assert_eq!(json["formatted"]["net"], "R$ 2,50");
    assert_eq!(json["skipped"], serde_json::json!([]));
}

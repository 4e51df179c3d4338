//! Repository tests against the in-memory store.

use std::sync::Arc;

use carteira_core::aggregation::AggregationEngine;
use carteira_core::currency::Brl;
use carteira_core::records::{BalanceDraft, ExpenseDraft, Installments};
use carteira_shared::RecordId;
use carteira_store::{
    BalanceRepository, DocumentStore, ExpenseRepository, Fields, MemoryStore, StoreError,
};
use rust_decimal_macros::dec;
use serde_json::json;

fn repos() -> (Arc<MemoryStore>, BalanceRepository, ExpenseRepository) {
    let store = Arc::new(MemoryStore::new());
    let balances = BalanceRepository::new(store.clone(), "Saldo");
    let expenses = ExpenseRepository::new(store.clone(), "Contas");
    (store, balances, expenses)
}

fn balance(description: &str, amount: rust_decimal::Decimal) -> BalanceDraft {
    BalanceDraft {
        description: description.to_string(),
        amount: Brl::new(amount),
    }
}

fn expense(description: &str, amount: rust_decimal::Decimal, installments: u64) -> ExpenseDraft {
    ExpenseDraft {
        description: description.to_string(),
        amount: Brl::new(amount),
        installments: Installments::try_from(installments).unwrap(),
    }
}

#[tokio::test]
async fn test_balances_are_stored_in_display_format() {
    let (store, balances, _) = repos();

    let created = balances.create(&balance(" Salário ", dec!(3200))).await.unwrap();

    assert_eq!(created.description, "Salário");
    assert_eq!(created.amount, "R$ 3.200,00");

    let raw = store.get("Saldo", &created.id).await.unwrap();
    assert_eq!(raw.text("descricao"), "Salário");
    assert_eq!(raw.text("saldo"), "R$ 3.200,00");
}

#[tokio::test]
async fn test_expenses_are_stored_in_plain_format() {
    let (store, _, expenses) = repos();

    let created = expenses
        .create(&expense("Notebook", dec!(4599.9), 10))
        .await
        .unwrap();

    assert_eq!(created.amount, "4599,90");
    assert_eq!(created.installments, "10");

    let raw = store.get("Contas", &created.id).await.unwrap();
    assert_eq!(raw.text("contas"), "Notebook");
    assert_eq!(raw.text("valor"), "4599,90");
    assert_eq!(raw.text("parcelas"), "10");
}

#[tokio::test]
async fn test_update_and_delete() {
    let (_, balances, _) = repos();
    let created = balances.create(&balance("Poupança", dec!(100))).await.unwrap();

    let updated = balances
        .update(&created.id, &balance("Poupança", dec!(150.25)))
        .await
        .unwrap();
    assert_eq!(updated.id, created.id);
    assert_eq!(updated.amount, "R$ 150,25");

    balances.delete(&created.id).await.unwrap();
    assert!(matches!(
        balances.get(&created.id).await,
        Err(StoreError::NotFound { .. })
    ));
}

#[tokio::test]
async fn test_update_unknown_id() {
    let (_, _, expenses) = repos();
    let result = expenses
        .update(&RecordId::from("missing"), &expense("Luz", dec!(1), 1))
        .await;
    assert!(matches!(result, Err(StoreError::NotFound { .. })));
}

#[tokio::test]
async fn test_legacy_documents_feed_aggregation() {
    let (store, balances, expenses) = repos();

    let legacy = |value: serde_json::Value| -> Fields {
        match value {
            serde_json::Value::Object(map) => map,
            _ => unreachable!(),
        }
    };
    store
        .create("Saldo", legacy(json!({"descricao": "Conta", "saldo": "R$ 1.000,00"})))
        .await
        .unwrap();
    store
        .create("Saldo", legacy(json!({"descricao": "Carteira", "saldo": "R$ 500,00"})))
        .await
        .unwrap();
    store
        .create("Contas", legacy(json!({"contas": "Mercado", "valor": "300,00", "parcelas": 1})))
        .await
        .unwrap();
    store
        .create("Contas", legacy(json!({"contas": "Sem valor", "parcelas": "1"})))
        .await
        .unwrap();

    let balance_records = balances.list().await.unwrap();
    let expense_records = expenses.list().await.unwrap();

    assert_eq!(balance_records[0].description, "Carteira");
    assert_eq!(expense_records[1].installments, "1");
    assert_eq!(expense_records[0].amount, "");

    let summary = AggregationEngine::summarize(&balance_records, &expense_records);
    assert_eq!(summary.net_total, dec!(1200.00));
    assert_eq!(summary.formatted.net, "R$ 1.200,00");
    assert_eq!(summary.skipped.len(), 1);
}

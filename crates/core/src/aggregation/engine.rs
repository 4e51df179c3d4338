//! Totals, net and summary computation.

use rust_decimal::Decimal;
use tracing::warn;

use carteira_shared::RecordId;

use super::types::{FormattedTotals, RecordKind, SkippedAmount, Summary, Tally};
use crate::currency::{UnparsableAmount, format_brl, round_cents};
use crate::records::{BalanceRecord, ExpenseRecord};

/// A record carrying a stored amount string.
pub trait AmountSource {
    /// Collection the record belongs to.
    const KIND: RecordKind;

    /// Record id.
    fn record_id(&self) -> &RecordId;

    /// Stored amount string.
    fn raw_amount(&self) -> &str;

    /// Parses the amount using the collection's format.
    fn parse_amount(&self) -> Result<Decimal, UnparsableAmount>;
}

impl AmountSource for BalanceRecord {
    const KIND: RecordKind = RecordKind::Balance;

    fn record_id(&self) -> &RecordId {
        &self.id
    }

    fn raw_amount(&self) -> &str {
        &self.amount
    }

    fn parse_amount(&self) -> Result<Decimal, UnparsableAmount> {
        self.parsed_amount()
    }
}

impl AmountSource for ExpenseRecord {
    const KIND: RecordKind = RecordKind::Expense;

    fn record_id(&self) -> &RecordId {
        &self.id
    }

    fn raw_amount(&self) -> &str {
        &self.amount
    }

    fn parse_amount(&self) -> Result<Decimal, UnparsableAmount> {
        self.parsed_amount()
    }
}

/// Stateless aggregation over record snapshots.
pub struct AggregationEngine;

impl AggregationEngine {
    /// Sums any collection, counting unparsable amounts as zero.
    ///
    /// An amount that would overflow the running total is skipped the same way.
    #[must_use]
    pub fn tally<R: AmountSource>(records: &[R]) -> Tally {
        records.iter().fold(Tally::default(), |mut tally, record| {
            let added = record.parse_amount().map(|amount| tally.total.checked_add(amount));
            match added {
                Ok(Some(total)) => {
                    tally.total = total;
                    tally.counted += 1;
                }
                Ok(None) => {
                    warn!(
                        record_id = %record.record_id(),
                        kind = %R::KIND,
                        total = %tally.total,
                        "Amount overflows total, skipped"
                    );
                    tally.skipped.push(Self::skipped(record));
                }
                Err(e) => {
                    warn!(
                        record_id = %record.record_id(),
                        kind = %R::KIND,
                        error = %e,
                        "Invalid numeric amount skipped"
                    );
                    tally.skipped.push(Self::skipped(record));
                }
            }
            tally
        })
    }

    fn skipped<R: AmountSource>(record: &R) -> SkippedAmount {
        SkippedAmount {
            id: record.record_id().clone(),
            kind: R::KIND,
            raw: record.raw_amount().to_string(),
        }
    }

    /// Tallies balances.
    #[must_use]
    pub fn tally_balances(records: &[BalanceRecord]) -> Tally {
        Self::tally(records)
    }

    /// Tallies expenses.
    #[must_use]
    pub fn tally_expenses(records: &[ExpenseRecord]) -> Tally {
        Self::tally(records)
    }

    /// Sum of all balance amounts; unparsable ones count as zero.
    #[must_use]
    pub fn sum_balances(records: &[BalanceRecord]) -> Decimal {
        Self::tally_balances(records).total
    }

    /// Sum of all expense amounts; unparsable ones count as zero.
    #[must_use]
    pub fn sum_expenses(records: &[ExpenseRecord]) -> Decimal {
        Self::tally_expenses(records).total
    }

    /// Balances minus expenses. Negative means deficit.
    #[must_use]
    pub fn compute_net(balance_total: Decimal, expense_total: Decimal) -> Decimal {
        balance_total.saturating_sub(expense_total)
    }

    /// Builds the full summary for presentation.
    ///
    /// The net is taken from the cent-rounded totals so the three formatted
    /// figures always reconcile.
    #[must_use]
    pub fn summarize(balances: &[BalanceRecord], expenses: &[ExpenseRecord]) -> Summary {
        let balance_tally = Self::tally_balances(balances);
        let expense_tally = Self::tally_expenses(expenses);

        let net_total = Self::compute_net(
            round_cents(balance_tally.total),
            round_cents(expense_tally.total),
        );

        let formatted = FormattedTotals {
            balances: format_brl(balance_tally.total),
            expenses: format_brl(expense_tally.total),
            net: format_brl(net_total),
        };

        let mut skipped = balance_tally.skipped;
        skipped.extend(expense_tally.skipped);

        Summary {
            balance_total: balance_tally.total,
            expense_total: expense_tally.total,
            net_total,
            formatted,
            skipped,
        }
    }
}

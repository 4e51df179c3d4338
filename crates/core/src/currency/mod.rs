//! Brazilian real amounts.
//!
//! Two string formats exist and must never be conflated:
//! - display format, used for balances: `R$ 1.234,56`
//! - plain format, used for expenses: `1234,56`

pub mod brl;
pub mod error;

#[cfg(test)]
mod props;

pub use brl::{
    Brl, CURRENCY_MARKER, format_brl, parse_balance_amount, parse_expense_amount, round_cents,
};
pub use error::{AmountFormat, UnparsableAmount};

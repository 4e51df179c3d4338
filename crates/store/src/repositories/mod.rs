//! Typed repositories over the document store.
//!
//! Field names follow the existing collections, so documents written by
//! earlier clients read back unchanged.

pub mod balance;
pub mod expense;

pub use balance::BalanceRepository;
pub use expense::ExpenseRepository;

//! Core logic for Carteira.
//!
//! This crate contains pure logic with ZERO web or database dependencies.
//!
//! # Modules
//!
//! - `currency` - The `Brl` value object, pt-BR amount parsing and formatting
//! - `records` - Balance and expense records plus validated inputs
//! - `aggregation` - Totals, net summary and skipped-amount reporting
//! - `auth` - Password hashing and credential verification

pub mod aggregation;
pub mod auth;
pub mod currency;
pub mod records;

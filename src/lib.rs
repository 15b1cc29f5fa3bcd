//! Canteen
//!
//! Canteen is an order pricing engine for a small food store: it totals an order against the
//! menu catalog and applies a composable set of discount rules to produce the amount payable.

pub mod calculator;
pub mod catalog;
pub mod config;
pub mod discounts;
pub mod orders;
pub mod prelude;
pub mod pricing;
pub mod receipt;
pub mod rules;
pub mod shell;

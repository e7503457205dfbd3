//! Money display helpers
//!
//! The engine computes in [`rust_decimal::Decimal`] major units, matching the JSON wire
//! format; these helpers format amounts for user-facing surfaces.

use rust_decimal::Decimal;
use rusty_money::{
    Money,
    iso::{self, Currency},
};

/// Default currency for the marketplace.
pub const MARKETPLACE_CURRENCY: &Currency = iso::INR;

/// Formats an amount for display, e.g. `₹1,250.50`.
#[must_use]
pub fn display_amount(amount: Decimal, currency: &'static Currency) -> String {
    Money::from_decimal(amount, currency).to_string()
}

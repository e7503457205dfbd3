//! Order quotes
//!
//! Computes line totals and the order-level quote: subtotal, speed-keyed charges,
//! free-delivery waiver and the floored total. Aggregation trusts already-clamped cart
//! lines; bounds are enforced at the mutation boundary in [`crate::cart`], never silently
//! here.

use std::io;

use decimal_percentage::Percentage;
use rust_decimal::Decimal;
use rusty_money::iso::Currency;
use serde::Serialize;
use tabled::{
    builder::Builder,
    settings::{Alignment, Style, object::Columns},
};
use thiserror::Error;

use crate::{
    cart::CartLine,
    catalog::ChargeTable,
    money::display_amount,
    speed::DeliverySpeed,
};

/// Errors that can occur when rendering a quote.
#[derive(Debug, Error)]
pub enum QuoteError {
    /// Underlying writer failed.
    #[error(transparent)]
    Io(#[from] io::Error),
}

/// An order-level price quote.
///
/// Derived and ephemeral: recomputed from the cart and vendor charges on every call,
/// never persisted independently.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PricingQuote {
    /// Sum of line totals across the cart.
    pub subtotal: Decimal,

    /// Pickup charge for the selected speed.
    pub pickup_charge: Decimal,

    /// Delivery charge for the selected speed, zero when waived.
    pub delivery_charge: Decimal,

    /// Speed surcharge for the selected speed.
    pub speed_surcharge: Decimal,

    /// Vendor discount for the selected speed.
    pub discount: Decimal,

    /// Order total, floored at zero.
    pub total: Decimal,
}

impl PricingQuote {
    /// Computes the quote for a cart at a delivery speed.
    ///
    /// `total = subtotal + pickup + delivery + surcharge − discount`, floored at zero;
    /// the delivery charge is waived when the subtotal meets the speed's free-delivery
    /// threshold. Charges are keyed by the literal speed, so subscription orders use
    /// the `subscription` charge row even though their eligibility is scheduled.
    #[must_use]
    pub fn compute(lines: &[CartLine], charges: &ChargeTable, speed: DeliverySpeed) -> Self {
        let subtotal: Decimal = lines.iter().map(CartLine::line_total).sum();
        let row = charges.for_speed(speed);

        let delivery_charge = if row
            .free_delivery_above
            .is_some_and(|threshold| subtotal >= threshold)
        {
            Decimal::ZERO
        } else {
            row.delivery
        };

        let total = (subtotal + row.pickup + delivery_charge + row.surcharge - row.discount)
            .max(Decimal::ZERO);

        PricingQuote {
            subtotal,
            pickup_charge: row.pickup,
            delivery_charge,
            speed_surcharge: row.surcharge,
            discount: row.discount,
            total,
        }
    }

    /// Total before the vendor discount is applied.
    #[must_use]
    pub fn pre_discount_total(&self) -> Decimal {
        self.subtotal + self.pickup_charge + self.delivery_charge + self.speed_surcharge
    }

    /// The vendor discount as a percentage of the pre-discount total.
    ///
    /// Zero when the pre-discount total is zero.
    #[must_use]
    pub fn savings_percent(&self) -> Percentage {
        let base = self.pre_discount_total();

        if base.is_zero() {
            return Percentage::from(0.0);
        }

        Percentage::from(self.discount / base)
    }

    /// Writes a rendered quote to the given writer: one table row per cart line,
    /// followed by the charge summary.
    ///
    /// # Errors
    ///
    /// Returns [`QuoteError::Io`] if writing fails.
    pub fn write_to(
        &self,
        mut out: impl io::Write,
        lines: &[CartLine],
        currency: &'static Currency,
    ) -> Result<(), QuoteError> {
        let mut builder = Builder::default();

        builder.push_record(["Item", "Service", "Qty", "Weight", "Unit Price", "Line Total"]);

        for line in lines {
            let weight = line
                .weight_kg()
                .map_or_else(String::new, |weight| format!("{weight} kg"));

            builder.push_record([
                line.key().item_type.clone(),
                line.key().service_type.clone(),
                line.quantity().to_string(),
                weight,
                display_amount(line.unit_price(), currency),
                display_amount(line.line_total(), currency),
            ]);
        }

        let mut table = builder.build();
        table
            .with(Style::sharp())
            .modify(Columns::new(2..), Alignment::right());

        writeln!(out, "{table}")?;

        for (label, amount) in [
            ("Subtotal", self.subtotal),
            ("Pickup", self.pickup_charge),
            ("Delivery", self.delivery_charge),
            ("Surcharge", self.speed_surcharge),
            ("Discount", self.discount),
            ("Total", self.total),
        ] {
            writeln!(out, "{label:>10}: {}", display_amount(amount, currency))?;
        }

        Ok(())
    }
}

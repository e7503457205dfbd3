//! Mangle prelude.
//!
//! Convenience exports for common library consumers.

pub use crate::{
    cart::{CartLine, ItemKey, MAX_QUANTITY, MIN_QUANTITY, PriceBasis, merge_line},
    catalog::{
        CatalogError, ChargeTable, Charges, PricingCatalog, PricingModel, ServiceAvailability,
        VendorPricingDoc, WeightBounds,
    },
    eligibility::{Eligibility, ItemOffer, PerPieceOffer, WeightOffer},
    estimator::starting_price,
    money::{MARKETPLACE_CURRENCY, display_amount},
    quote::{PricingQuote, QuoteError},
    reconcile::{Reconciliation, reconcile},
    speed::DeliverySpeed,
};

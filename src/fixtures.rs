//! Fixtures
//!
//! Code-built vendor documents shared by unit and integration tests. Each returns the raw
//! wire-shaped document so tests exercise the same validation path as production callers.

use rust_decimal::Decimal;

use crate::{
    catalog::{ChargesDoc, PerPieceTable, PricingConfigDoc, PricingModel, ServiceToggleDoc,
        VendorPricingDoc, WeightTable},
    speed::DeliverySpeed,
};

/// A full vendor record in the backend's JSON wire shape, for contract tests.
pub const WIRE_VENDOR_JSON: &str = r#"{
    "pricingConfig": {
        "model": "hybrid",
        "weightBasedPricing": { "wash_fold": 40, "wash_iron": 55 },
        "minWeightPerItem": 0.5,
        "maxWeightPerItem": 25
    },
    "pricing": {
        "shirt": { "wash_fold": 20, "wash_iron": 25 },
        "towel": { "wash_fold": 15 }
    },
    "quickPricing": {
        "shirt": { "wash_fold": 30 }
    },
    "quickWeightBasedPricing": { "wash_fold": 65 },
    "quickServiceConfig": { "enabled": true },
    "scheduledServiceConfig": { "enabled": true },
    "charges": {
        "quick": { "pickup": 20, "delivery": 50, "surcharge": 40 },
        "scheduled": { "pickup": 20, "delivery": 30, "freeDeliveryAbove": 500 },
        "subscription": { "pickup": 0, "delivery": 0, "discount": 50 }
    }
}"#;

/// A per-piece vendor with scheduled prices only: no quick variants, no quick toggle.
#[must_use]
pub fn scheduled_only_vendor() -> VendorPricingDoc {
    VendorPricingDoc {
        pricing: per_piece_table(&[
            ("shirt", &[("wash_fold", 20), ("wash_iron", 25)]),
            ("pant", &[("wash_iron", 30)]),
        ]),
        charges: charges(&[(
            DeliverySpeed::Scheduled,
            ChargesDoc {
                pickup: Decimal::from(20),
                delivery: Decimal::from(30),
                free_delivery_above: Some(Decimal::from(500)),
                ..ChargesDoc::default()
            },
        )]),
        ..VendorPricingDoc::default()
    }
}

/// A per-piece vendor offering quick service with explicit quick prices.
#[must_use]
pub fn quick_enabled_vendor() -> VendorPricingDoc {
    VendorPricingDoc {
        pricing: per_piece_table(&[
            ("shirt", &[("wash_fold", 20), ("wash_iron", 25)]),
            ("pant", &[("wash_iron", 30)]),
        ]),
        quick_pricing: per_piece_table(&[
            ("shirt", &[("wash_fold", 30)]),
            ("pant", &[("wash_iron", 40)]),
        ]),
        quick_service_config: ServiceToggleDoc {
            enabled: Some(true),
        },
        charges: charges(&[
            (
                DeliverySpeed::Scheduled,
                ChargesDoc {
                    pickup: Decimal::from(20),
                    delivery: Decimal::from(30),
                    free_delivery_above: Some(Decimal::from(500)),
                    ..ChargesDoc::default()
                },
            ),
            (
                DeliverySpeed::Quick,
                ChargesDoc {
                    pickup: Decimal::from(20),
                    delivery: Decimal::from(50),
                    surcharge: Decimal::from(40),
                    ..ChargesDoc::default()
                },
            ),
        ]),
        ..VendorPricingDoc::default()
    }
}

/// A hybrid vendor: towels per-piece at 15, any garment weight-based at 40/kg.
#[must_use]
pub fn hybrid_vendor() -> VendorPricingDoc {
    VendorPricingDoc {
        pricing_config: PricingConfigDoc {
            model: PricingModel::Hybrid,
            weight_based_pricing: weight_table(&[("wash_fold", 40)]),
            ..PricingConfigDoc::default()
        },
        pricing: per_piece_table(&[("towel", &[("wash_fold", 15)])]),
        ..VendorPricingDoc::default()
    }
}

fn per_piece_table(entries: &[(&str, &[(&str, i64)])]) -> PerPieceTable {
    entries
        .iter()
        .map(|(item, services)| {
            let services = services
                .iter()
                .map(|(service, price)| ((*service).to_owned(), Decimal::from(*price)))
                .collect();

            ((*item).to_owned(), services)
        })
        .collect()
}

fn weight_table(entries: &[(&str, i64)]) -> WeightTable {
    entries
        .iter()
        .map(|(service, price)| ((*service).to_owned(), Decimal::from(*price)))
        .collect()
}

fn charges(
    rows: &[(DeliverySpeed, ChargesDoc)],
) -> rustc_hash::FxHashMap<DeliverySpeed, ChargesDoc> {
    rows.iter().copied().collect()
}

//! Eligibility resolution
//!
//! Produces the full menu of (item, service, price) offerings a vendor makes available at a
//! given delivery speed, applying the catalog's strict quick policy and the vendor's service
//! toggles. The resolved menu is a snapshot: re-resolve whenever the speed or the vendor
//! record changes, and feed the result to [`crate::reconcile::reconcile`] to keep carts
//! consistent.

use rust_decimal::Decimal;
use rustc_hash::FxHashMap;

use crate::{
    cart::{ItemKey, PriceBasis},
    catalog::PricingCatalog,
    speed::DeliverySpeed,
};

/// A per-piece menu entry.
#[derive(Debug, Clone, PartialEq)]
pub struct PerPieceOffer {
    /// Garment type.
    pub item_type: String,

    /// Service type.
    pub service_type: String,

    /// Unit price at the resolved speed.
    pub unit_price: Decimal,

    /// Quick price for display on scheduled listings.
    ///
    /// Present only on scheduled-speed menus; defaults to the scheduled price when the
    /// vendor set no explicit quick price. Display-only: it never makes the entry
    /// orderable at quick speed.
    pub quick_display_price: Option<Decimal>,
}

/// A weight-based menu entry, applicable to any garment type.
#[derive(Debug, Clone, PartialEq)]
pub struct WeightOffer {
    /// Service type.
    pub service_type: String,

    /// Price per kilogram at the resolved speed.
    pub price_per_kg: Decimal,

    /// Quick price per kilogram for display on scheduled listings.
    pub quick_display_price: Option<Decimal>,
}

/// A single offering for a specific garment, as shown on an item-selection screen.
///
/// Under a hybrid vendor the same garment can appear twice: once per-piece and once
/// weight-based. The two are distinct offerings, never merged.
#[derive(Debug, Clone, PartialEq)]
pub struct ItemOffer {
    /// Garment type.
    pub item_type: String,

    /// Service type.
    pub service_type: String,

    /// Pricing basis of this offering.
    pub basis: PriceBasis,

    /// Unit price (per piece, or per kilogram).
    pub unit_price: Decimal,

    /// Quick price for display on scheduled listings.
    pub quick_display_price: Option<Decimal>,
}

/// The menu of offerings a vendor makes available at one delivery speed.
#[derive(Debug, Clone, PartialEq)]
pub struct Eligibility {
    speed: DeliverySpeed,
    per_piece: Vec<PerPieceOffer>,
    weight_based: Vec<WeightOffer>,
    piece_prices: FxHashMap<String, FxHashMap<String, Decimal>>,
    weight_prices: FxHashMap<String, Decimal>,
}

impl Eligibility {
    /// Resolves the menu for a delivery speed.
    ///
    /// Quick menus are strict: an entry appears only when an explicit positive quick
    /// price exists. Scheduled menus carry a display-only quick price on every entry.
    /// Subscription speed reuses scheduled eligibility. A vendor with no pricing, or
    /// with the requested service disabled, yields an empty menu; that is an expected
    /// outcome, not an error.
    #[must_use]
    pub fn resolve(catalog: &PricingCatalog, speed: DeliverySpeed) -> Eligibility {
        let effective = speed.eligibility_speed();

        let mut eligibility = Eligibility {
            speed,
            per_piece: Vec::new(),
            weight_based: Vec::new(),
            piece_prices: FxHashMap::default(),
            weight_prices: FxHashMap::default(),
        };

        let offered = match effective {
            DeliverySpeed::Quick => catalog.availability().quick_enabled(),
            _ => catalog.availability().scheduled_enabled(),
        };

        if !offered {
            return eligibility;
        }

        if catalog.is_per_piece_active() {
            eligibility.collect_per_piece(catalog, effective);
        }

        if catalog.is_weight_based_active() {
            eligibility.collect_weight_based(catalog, effective);
        }

        eligibility
    }

    /// The speed this menu was resolved for.
    #[must_use]
    pub fn speed(&self) -> DeliverySpeed {
        self.speed
    }

    /// Per-piece entries, grouped by item then service.
    #[must_use]
    pub fn per_piece(&self) -> &[PerPieceOffer] {
        &self.per_piece
    }

    /// Weight-based entries, ordered by service.
    #[must_use]
    pub fn weight_based(&self) -> &[WeightOffer] {
        &self.weight_based
    }

    /// Number of menu entries across both sections.
    #[must_use]
    pub fn len(&self) -> usize {
        self.per_piece.len() + self.weight_based.len()
    }

    /// Whether the vendor offers nothing at this speed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.per_piece.is_empty() && self.weight_based.is_empty()
    }

    /// Resolved unit price for a cart line's identity, or `None` when not offered.
    ///
    /// Weight-based offerings are keyed by service alone, so any garment type matches
    /// a weight-based key for an offered service.
    #[must_use]
    pub fn unit_price_for(&self, key: &ItemKey) -> Option<Decimal> {
        match key.pricing_model {
            PriceBasis::PerPiece => self
                .piece_prices
                .get(&key.item_type)
                .and_then(|services| services.get(&key.service_type))
                .copied(),
            PriceBasis::WeightBased => self.weight_prices.get(&key.service_type).copied(),
        }
    }

    /// All offerings for one garment type: its per-piece entries followed by every
    /// weight-based entry materialised for that garment.
    #[must_use]
    pub fn offers_for_item(&self, item_type: &str) -> Vec<ItemOffer> {
        let per_piece = self
            .per_piece
            .iter()
            .filter(|offer| offer.item_type == item_type)
            .map(|offer| ItemOffer {
                item_type: offer.item_type.clone(),
                service_type: offer.service_type.clone(),
                basis: PriceBasis::PerPiece,
                unit_price: offer.unit_price,
                quick_display_price: offer.quick_display_price,
            });

        let weight_based = self.weight_based.iter().map(|offer| ItemOffer {
            item_type: item_type.to_owned(),
            service_type: offer.service_type.clone(),
            basis: PriceBasis::WeightBased,
            unit_price: offer.price_per_kg,
            quick_display_price: offer.quick_display_price,
        });

        per_piece.chain(weight_based).collect()
    }

    fn collect_per_piece(&mut self, catalog: &PricingCatalog, effective: DeliverySpeed) {
        let table = match effective {
            DeliverySpeed::Quick => catalog.per_piece_quick(),
            _ => catalog.per_piece_scheduled(),
        };

        let mut item_types: Vec<&String> = table.keys().collect();
        item_types.sort_unstable();

        for item_type in item_types {
            let Some(services) = table.get(item_type) else {
                continue;
            };

            let mut service_types: Vec<&String> = services.keys().collect();
            service_types.sort_unstable();

            for service_type in service_types {
                let Some(unit_price) = catalog.lookup_per_piece(item_type, service_type, effective)
                else {
                    continue;
                };

                let quick_display_price = match effective {
                    DeliverySpeed::Quick => None,
                    _ => catalog.display_quick_price_per_piece(item_type, service_type),
                };

                self.per_piece.push(PerPieceOffer {
                    item_type: item_type.clone(),
                    service_type: service_type.clone(),
                    unit_price,
                    quick_display_price,
                });

                self.piece_prices
                    .entry(item_type.clone())
                    .or_default()
                    .insert(service_type.clone(), unit_price);
            }
        }
    }

    fn collect_weight_based(&mut self, catalog: &PricingCatalog, effective: DeliverySpeed) {
        let table = match effective {
            DeliverySpeed::Quick => catalog.weight_quick(),
            _ => catalog.weight_scheduled(),
        };

        let mut service_types: Vec<&String> = table.keys().collect();
        service_types.sort_unstable();

        for service_type in service_types {
            let Some(price_per_kg) = catalog.lookup_weight_based(service_type, effective) else {
                continue;
            };

            let quick_display_price = match effective {
                DeliverySpeed::Quick => None,
                _ => catalog.display_quick_price_weight(service_type),
            };

            self.weight_based.push(WeightOffer {
                service_type: service_type.clone(),
                price_per_kg,
                quick_display_price,
            });

            self.weight_prices
                .insert(service_type.clone(), price_per_kg);
        }
    }
}

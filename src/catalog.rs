//! Pricing catalog
//!
//! Wraps a vendor's raw pricing document in a validated, queryable structure. The catalog
//! answers "is (item, service) priced for this delivery speed, and at what price?" without
//! exposing the wire shape. Malformed documents fail loudly at construction; legitimately
//! empty tables are fine and simply offer nothing.

use rust_decimal::Decimal;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::speed::DeliverySpeed;

/// Item type → service type → price, in major currency units.
pub type PerPieceTable = FxHashMap<String, FxHashMap<String, Decimal>>;

/// Service type → price per kilogram.
pub type WeightTable = FxHashMap<String, Decimal>;

/// Errors raised when a vendor pricing document is malformed.
///
/// These indicate bad data, not a vendor who offers nothing; an empty catalog is
/// not an error.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CatalogError {
    /// A pricing table entry carries a negative price.
    #[error("pricing entry {entry} has negative price {price}")]
    NegativePrice {
        /// Dotted path of the offending entry, e.g. `quickPricing.shirt.wash_fold`.
        entry: String,

        /// The negative price found.
        price: Decimal,
    },

    /// The per-item weight bounds are inverted or non-positive.
    #[error("invalid weight bounds: min {min} kg, max {max} kg")]
    InvalidWeightBounds {
        /// Configured minimum weight per item.
        min: Decimal,

        /// Configured maximum weight per item.
        max: Decimal,
    },

    /// A charge amount is negative.
    #[error("{field} charge for {speed:?} is negative: {amount}")]
    NegativeCharge {
        /// Delivery speed the charge row belongs to.
        speed: DeliverySpeed,

        /// Name of the offending charge field.
        field: &'static str,

        /// The negative amount found.
        amount: Decimal,
    },

    /// Neither quick nor scheduled service is enabled.
    #[error("vendor has neither quick nor scheduled service enabled")]
    NoServiceEnabled,
}

/// A vendor's pricing model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PricingModel {
    /// Price per individual garment only.
    #[default]
    PerPiece,

    /// Price per kilogram only.
    WeightBased,

    /// Both per-piece and weight-based offerings.
    Hybrid,
}

/// Per-unit weight bounds for weight-based lines, in kilograms.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WeightBounds {
    min: Decimal,
    max: Decimal,
}

impl WeightBounds {
    /// Clamps a weight into the configured bounds.
    #[must_use]
    pub fn clamp(&self, weight_kg: Decimal) -> Decimal {
        weight_kg.clamp(self.min, self.max)
    }

    /// Minimum weight per item.
    #[must_use]
    pub fn min(&self) -> Decimal {
        self.min
    }

    /// Maximum weight per item.
    #[must_use]
    pub fn max(&self) -> Decimal {
        self.max
    }
}

impl Default for WeightBounds {
    /// Marketplace defaults: 0.1 kg to 50 kg per item.
    fn default() -> Self {
        WeightBounds {
            min: Decimal::new(1, 1),
            max: Decimal::from(50),
        }
    }
}

/// Which delivery speeds a vendor accepts orders for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ServiceAvailability {
    quick_enabled: bool,
    scheduled_enabled: bool,
}

impl ServiceAvailability {
    /// Whether quick (same-day) service is enabled.
    #[must_use]
    pub fn quick_enabled(&self) -> bool {
        self.quick_enabled
    }

    /// Whether scheduled service is enabled.
    #[must_use]
    pub fn scheduled_enabled(&self) -> bool {
        self.scheduled_enabled
    }

    /// Whether the vendor can accept orders at all.
    #[must_use]
    pub fn accepts_orders(&self) -> bool {
        self.quick_enabled || self.scheduled_enabled
    }

    /// A valid default speed for new order drafts, preferring scheduled.
    #[must_use]
    pub fn default_speed(&self) -> Option<DeliverySpeed> {
        if self.scheduled_enabled {
            Some(DeliverySpeed::Scheduled)
        } else if self.quick_enabled {
            Some(DeliverySpeed::Quick)
        } else {
            None
        }
    }
}

/// Validated per-speed order charges.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Charges {
    /// Pickup charge.
    pub pickup: Decimal,

    /// Delivery charge, waived above the free-delivery threshold.
    pub delivery: Decimal,

    /// Speed surcharge (typically non-zero for quick service).
    pub surcharge: Decimal,

    /// Subtotal at or above which delivery is free; `None` means never waived.
    pub free_delivery_above: Option<Decimal>,

    /// Flat discount applied to the order total.
    pub discount: Decimal,
}

/// Charges for every delivery speed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ChargeTable {
    quick: Charges,
    scheduled: Charges,
    subscription: Charges,
}

impl ChargeTable {
    /// Returns the charge row for a delivery speed.
    ///
    /// Unlike eligibility, charges are keyed by the literal speed: a subscription
    /// order uses the `subscription` row, not the scheduled one.
    #[must_use]
    pub fn for_speed(&self, speed: DeliverySpeed) -> &Charges {
        match speed {
            DeliverySpeed::Quick => &self.quick,
            DeliverySpeed::Scheduled => &self.scheduled,
            DeliverySpeed::Subscription => &self.subscription,
        }
    }
}

/// Raw `pricingConfig` object from the vendor record.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PricingConfigDoc {
    /// Vendor pricing model; defaults to per-piece.
    #[serde(default)]
    pub model: PricingModel,

    /// Scheduled weight-based prices, keyed by service type.
    #[serde(default)]
    pub weight_based_pricing: WeightTable,

    /// Minimum weight per item in kilograms.
    #[serde(default)]
    pub min_weight_per_item: Option<Decimal>,

    /// Maximum weight per item in kilograms.
    #[serde(default)]
    pub max_weight_per_item: Option<Decimal>,
}

/// Raw service toggle (`{ enabled: bool }`) from the vendor record.
#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct ServiceToggleDoc {
    /// Whether the service is enabled; absence falls back to the per-service default.
    #[serde(default)]
    pub enabled: Option<bool>,
}

/// Raw per-speed charge row from the vendor record.
#[derive(Debug, Clone, Copy, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChargesDoc {
    /// Pickup charge.
    #[serde(default)]
    pub pickup: Decimal,

    /// Delivery charge.
    #[serde(default)]
    pub delivery: Decimal,

    /// Speed surcharge.
    #[serde(default)]
    pub surcharge: Decimal,

    /// Free-delivery threshold on the order subtotal.
    #[serde(default)]
    pub free_delivery_above: Option<Decimal>,

    /// Flat discount.
    #[serde(default)]
    pub discount: Decimal,
}

/// The vendor record's pricing-relevant fields, as stored by the backend.
///
/// All tables are optional; a vendor with no pricing configured deserializes to an
/// empty document and yields an empty catalog.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VendorPricingDoc {
    /// Pricing model and weight-based configuration.
    #[serde(default)]
    pub pricing_config: PricingConfigDoc,

    /// Scheduled per-piece prices: item type → service type → price.
    #[serde(default)]
    pub pricing: PerPieceTable,

    /// Quick per-piece prices; absent entries mean "not offered for quick".
    #[serde(default)]
    pub quick_pricing: PerPieceTable,

    /// Quick weight-based prices; absence means "not offered for quick".
    #[serde(default)]
    pub quick_weight_based_pricing: WeightTable,

    /// Quick service toggle; defaults to disabled.
    #[serde(default)]
    pub quick_service_config: ServiceToggleDoc,

    /// Scheduled service toggle; defaults to enabled unless explicitly disabled.
    #[serde(default)]
    pub scheduled_service_config: ServiceToggleDoc,

    /// Per-speed charge rows, keyed by `quick`, `scheduled` or `subscription`.
    #[serde(default)]
    pub charges: FxHashMap<DeliverySpeed, ChargesDoc>,
}

impl VendorPricingDoc {
    /// Parses a vendor record from its JSON wire form.
    ///
    /// # Errors
    ///
    /// Returns a [`serde_json::Error`] if the document is not valid JSON or does not
    /// match the wire shape (for example, an unknown charge speed key).
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

/// A vendor's pricing configuration, validated and queryable.
///
/// Immutable for the lifetime of a pricing query; rebuild from a fresh document when the
/// vendor record changes.
#[derive(Debug, Clone, PartialEq)]
pub struct PricingCatalog {
    model: PricingModel,
    per_piece_scheduled: PerPieceTable,
    per_piece_quick: PerPieceTable,
    weight_scheduled: WeightTable,
    weight_quick: WeightTable,
    weight_bounds: WeightBounds,
    availability: ServiceAvailability,
    charges: ChargeTable,
}

impl PricingCatalog {
    /// Validates a raw vendor document into a catalog.
    ///
    /// # Errors
    ///
    /// Returns a [`CatalogError`] if any price or charge is negative, the weight bounds
    /// are invalid, or neither service is enabled. Empty pricing tables are not errors.
    pub fn from_doc(doc: VendorPricingDoc) -> Result<Self, CatalogError> {
        validate_per_piece("pricing", &doc.pricing)?;
        validate_per_piece("quickPricing", &doc.quick_pricing)?;
        validate_weight(
            "pricingConfig.weightBasedPricing",
            &doc.pricing_config.weight_based_pricing,
        )?;
        validate_weight("quickWeightBasedPricing", &doc.quick_weight_based_pricing)?;

        let defaults = WeightBounds::default();
        let weight_bounds = WeightBounds {
            min: doc.pricing_config.min_weight_per_item.unwrap_or(defaults.min),
            max: doc.pricing_config.max_weight_per_item.unwrap_or(defaults.max),
        };

        if weight_bounds.min <= Decimal::ZERO || weight_bounds.max < weight_bounds.min {
            return Err(CatalogError::InvalidWeightBounds {
                min: weight_bounds.min,
                max: weight_bounds.max,
            });
        }

        let availability = ServiceAvailability {
            quick_enabled: doc.quick_service_config.enabled.unwrap_or(false),
            scheduled_enabled: doc.scheduled_service_config.enabled.unwrap_or(true),
        };

        if !availability.accepts_orders() {
            return Err(CatalogError::NoServiceEnabled);
        }

        let charges = validate_charges(&doc.charges)?;

        Ok(PricingCatalog {
            model: doc.pricing_config.model,
            per_piece_scheduled: doc.pricing,
            per_piece_quick: doc.quick_pricing,
            weight_scheduled: doc.pricing_config.weight_based_pricing,
            weight_quick: doc.quick_weight_based_pricing,
            weight_bounds,
            availability,
            charges,
        })
    }

    /// The vendor's pricing model.
    #[must_use]
    pub fn model(&self) -> PricingModel {
        self.model
    }

    /// Whether any weight-based offerings are active.
    #[must_use]
    pub fn is_weight_based_active(&self) -> bool {
        matches!(self.model, PricingModel::WeightBased | PricingModel::Hybrid)
    }

    /// Whether any per-piece offerings are active.
    #[must_use]
    pub fn is_per_piece_active(&self) -> bool {
        matches!(self.model, PricingModel::PerPiece | PricingModel::Hybrid)
    }

    /// Looks up the per-piece price for (item, service) at a delivery speed.
    ///
    /// Returns `None` when the pair is not offered. Quick never falls back to the
    /// scheduled price: "not offered quickly" and "same price quickly" are different
    /// answers, and only an explicit positive quick price makes the pair orderable.
    /// Subscription speed resolves against the scheduled table.
    #[must_use]
    pub fn lookup_per_piece(
        &self,
        item_type: &str,
        service_type: &str,
        speed: DeliverySpeed,
    ) -> Option<Decimal> {
        let table = match speed.eligibility_speed() {
            DeliverySpeed::Quick => &self.per_piece_quick,
            _ => &self.per_piece_scheduled,
        };

        table
            .get(item_type)
            .and_then(|services| services.get(service_type))
            .copied()
            .filter(|price| price.is_sign_positive() && !price.is_zero())
    }

    /// Looks up the weight-based price per kilogram for a service at a delivery speed.
    ///
    /// Same strict quick policy as [`Self::lookup_per_piece`].
    #[must_use]
    pub fn lookup_weight_based(&self, service_type: &str, speed: DeliverySpeed) -> Option<Decimal> {
        let table = match speed.eligibility_speed() {
            DeliverySpeed::Quick => &self.weight_quick,
            _ => &self.weight_scheduled,
        };

        table
            .get(service_type)
            .copied()
            .filter(|price| price.is_sign_positive() && !price.is_zero())
    }

    /// Quick price of a per-piece pair for display on scheduled listings.
    ///
    /// Presentation-only lenient variant: when no explicit quick price exists, the
    /// scheduled price stands in as the estimate. This never makes the pair orderable
    /// at quick speed; eligibility stays strict.
    #[must_use]
    pub fn display_quick_price_per_piece(
        &self,
        item_type: &str,
        service_type: &str,
    ) -> Option<Decimal> {
        self.lookup_per_piece(item_type, service_type, DeliverySpeed::Quick)
            .or_else(|| self.lookup_per_piece(item_type, service_type, DeliverySpeed::Scheduled))
    }

    /// Quick price per kilogram for display on scheduled listings.
    ///
    /// Same lenient display policy as [`Self::display_quick_price_per_piece`].
    #[must_use]
    pub fn display_quick_price_weight(&self, service_type: &str) -> Option<Decimal> {
        self.lookup_weight_based(service_type, DeliverySpeed::Quick)
            .or_else(|| self.lookup_weight_based(service_type, DeliverySpeed::Scheduled))
    }

    /// The scheduled per-piece table, for enumeration.
    #[must_use]
    pub fn per_piece_scheduled(&self) -> &PerPieceTable {
        &self.per_piece_scheduled
    }

    /// The quick per-piece table, for enumeration.
    #[must_use]
    pub fn per_piece_quick(&self) -> &PerPieceTable {
        &self.per_piece_quick
    }

    /// The scheduled weight-based table, for enumeration.
    #[must_use]
    pub fn weight_scheduled(&self) -> &WeightTable {
        &self.weight_scheduled
    }

    /// The quick weight-based table, for enumeration.
    #[must_use]
    pub fn weight_quick(&self) -> &WeightTable {
        &self.weight_quick
    }

    /// Per-unit weight bounds for weight-based cart lines.
    #[must_use]
    pub fn weight_bounds(&self) -> &WeightBounds {
        &self.weight_bounds
    }

    /// Which delivery speeds the vendor accepts orders for.
    #[must_use]
    pub fn availability(&self) -> &ServiceAvailability {
        &self.availability
    }

    /// Per-speed order charges.
    #[must_use]
    pub fn charges(&self) -> &ChargeTable {
        &self.charges
    }
}

fn validate_per_piece(table_name: &str, table: &PerPieceTable) -> Result<(), CatalogError> {
    for (item, services) in table {
        for (service, price) in services {
            if price.is_sign_negative() {
                return Err(CatalogError::NegativePrice {
                    entry: format!("{table_name}.{item}.{service}"),
                    price: *price,
                });
            }
        }
    }

    Ok(())
}

fn validate_weight(table_name: &str, table: &WeightTable) -> Result<(), CatalogError> {
    for (service, price) in table {
        if price.is_sign_negative() {
            return Err(CatalogError::NegativePrice {
                entry: format!("{table_name}.{service}"),
                price: *price,
            });
        }
    }

    Ok(())
}

fn validate_charges(
    charges: &FxHashMap<DeliverySpeed, ChargesDoc>,
) -> Result<ChargeTable, CatalogError> {
    let mut table = ChargeTable::default();

    for (speed, doc) in charges {
        for (field, amount) in [
            ("pickup", doc.pickup),
            ("delivery", doc.delivery),
            ("surcharge", doc.surcharge),
            ("discount", doc.discount),
        ] {
            if amount.is_sign_negative() {
                return Err(CatalogError::NegativeCharge {
                    speed: *speed,
                    field,
                    amount,
                });
            }
        }

        // A negative threshold would waive delivery on every order.
        if let Some(threshold) = doc.free_delivery_above
            && threshold.is_sign_negative()
        {
            return Err(CatalogError::NegativeCharge {
                speed: *speed,
                field: "freeDeliveryAbove",
                amount: threshold,
            });
        }

        let row = Charges {
            pickup: doc.pickup,
            delivery: doc.delivery,
            surcharge: doc.surcharge,
            free_delivery_above: doc.free_delivery_above,
            discount: doc.discount,
        };

        match speed {
            DeliverySpeed::Quick => table.quick = row,
            DeliverySpeed::Scheduled => table.scheduled = row,
            DeliverySpeed::Subscription => table.subscription = row,
        }
    }

    Ok(table)
}

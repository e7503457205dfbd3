//! Cart lines

use rust_decimal::Decimal;
use serde::{
    Deserialize, Serialize,
    de::Deserializer,
    ser::{SerializeStruct, Serializer},
};

use crate::catalog::WeightBounds;

/// Lowest quantity a single cart line may carry.
pub const MIN_QUANTITY: u32 = 1;

/// Highest quantity a single cart line may carry.
pub const MAX_QUANTITY: u32 = 100;

/// How a cart line is priced.
///
/// Vendors may run a hybrid catalog, but each individual line is always priced one way.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PriceBasis {
    /// Priced per individual garment.
    PerPiece,

    /// Priced per kilogram of laundry.
    WeightBased,
}

/// Unique identity of a cart line, used for merging and dedupe.
///
/// Two lines for the same garment are still distinct when one is per-piece
/// and the other weight-based.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemKey {
    /// Garment type, e.g. `shirt`.
    pub item_type: String,

    /// Service type, e.g. `wash_fold`.
    pub service_type: String,

    /// Pricing basis for this line.
    pub pricing_model: PriceBasis,
}

impl ItemKey {
    /// Creates a per-piece key.
    pub fn per_piece(item_type: impl Into<String>, service_type: impl Into<String>) -> Self {
        ItemKey {
            item_type: item_type.into(),
            service_type: service_type.into(),
            pricing_model: PriceBasis::PerPiece,
        }
    }

    /// Creates a weight-based key.
    pub fn weight_based(item_type: impl Into<String>, service_type: impl Into<String>) -> Self {
        ItemKey {
            item_type: item_type.into(),
            service_type: service_type.into(),
            pricing_model: PriceBasis::WeightBased,
        }
    }
}

/// A selected item in a customer's order draft.
///
/// `unit_price` is a snapshot resolved at selection time, not a live reference; it must be
/// re-resolved through [`crate::reconcile::reconcile`] whenever the delivery speed changes.
///
/// On the wire the line is emitted with a derived `lineTotal` field; incoming documents may
/// carry one but it is ignored and recomputed here. Deserialized lines pass through the
/// same clamping as the constructors; wire weights are clamped to the marketplace default
/// bounds, so re-clamp with [`CartLine::set_weight`] when the vendor configures its own.
#[derive(Debug, Clone, PartialEq)]
pub struct CartLine {
    key: ItemKey,

    quantity: u32,

    /// Weight per unit in kilograms; present iff the line is weight-based.
    weight: Option<Decimal>,

    unit_price: Decimal,
}

impl CartLine {
    /// Creates a per-piece line, clamping quantity into `1..=100`.
    pub fn per_piece(
        item_type: impl Into<String>,
        service_type: impl Into<String>,
        unit_price: Decimal,
        quantity: u32,
    ) -> Self {
        CartLine {
            key: ItemKey::per_piece(item_type, service_type),
            quantity: quantity.clamp(MIN_QUANTITY, MAX_QUANTITY),
            weight: None,
            unit_price,
        }
    }

    /// Creates a weight-based line, clamping quantity and per-unit weight into bounds.
    pub fn weight_based(
        item_type: impl Into<String>,
        service_type: impl Into<String>,
        price_per_kg: Decimal,
        weight_kg: Decimal,
        quantity: u32,
        bounds: &WeightBounds,
    ) -> Self {
        CartLine {
            key: ItemKey::weight_based(item_type, service_type),
            quantity: quantity.clamp(MIN_QUANTITY, MAX_QUANTITY),
            weight: Some(bounds.clamp(weight_kg)),
            unit_price: price_per_kg,
        }
    }

    /// Returns the merge/dedupe identity of the line.
    pub fn key(&self) -> &ItemKey {
        &self.key
    }

    /// Returns the line quantity.
    #[must_use]
    pub fn quantity(&self) -> u32 {
        self.quantity
    }

    /// Returns the per-unit weight in kilograms, if the line is weight-based.
    #[must_use]
    pub fn weight_kg(&self) -> Option<Decimal> {
        self.weight
    }

    /// Returns the snapshotted unit price (per piece, or per kilogram).
    #[must_use]
    pub fn unit_price(&self) -> Decimal {
        self.unit_price
    }

    /// Sets the quantity, clamped into `1..=100`.
    pub fn set_quantity(&mut self, quantity: u32) {
        self.quantity = quantity.clamp(MIN_QUANTITY, MAX_QUANTITY);
    }

    /// Sets the per-unit weight, clamped into the vendor's bounds.
    ///
    /// Ignored on per-piece lines, which carry no weight.
    pub fn set_weight(&mut self, weight_kg: Decimal, bounds: &WeightBounds) {
        if self.key.pricing_model == PriceBasis::WeightBased {
            self.weight = Some(bounds.clamp(weight_kg));
        }
    }

    /// Overwrites the unit-price snapshot with a freshly resolved price.
    pub fn reprice(&mut self, unit_price: Decimal) {
        self.unit_price = unit_price;
    }

    /// Derived line total.
    ///
    /// Per-piece: `unit_price × quantity`. Weight-based: `unit_price × weight × quantity`
    /// (weight is per unit, so total weight transported is `weight × quantity`). A
    /// weight-based line with no recorded weight contributes nothing.
    #[must_use]
    pub fn line_total(&self) -> Decimal {
        let quantity = Decimal::from(self.quantity);

        match self.key.pricing_model {
            PriceBasis::PerPiece => self.unit_price * quantity,
            PriceBasis::WeightBased => {
                self.unit_price * self.weight.unwrap_or(Decimal::ZERO) * quantity
            }
        }
    }
}

/// Raw wire form of a cart line, before clamping.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct CartLineDoc {
    #[serde(flatten)]
    key: ItemKey,

    quantity: u32,

    #[serde(default)]
    weight: Option<Decimal>,

    unit_price: Decimal,
}

/// Clamps wire values on the way in: quantity into `1..=100`, weight into the marketplace
/// default bounds. A weight-based line arriving without a weight is floored to the bounds
/// minimum rather than silently totalling zero; per-piece lines drop any stray weight.
impl<'de> Deserialize<'de> for CartLine {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let doc = CartLineDoc::deserialize(deserializer)?;
        let bounds = WeightBounds::default();

        let weight = match doc.key.pricing_model {
            PriceBasis::PerPiece => None,
            PriceBasis::WeightBased => {
                Some(bounds.clamp(doc.weight.unwrap_or_else(|| bounds.min())))
            }
        };

        Ok(CartLine {
            key: doc.key,
            quantity: doc.quantity.clamp(MIN_QUANTITY, MAX_QUANTITY),
            weight,
            unit_price: doc.unit_price,
        })
    }
}

impl Serialize for CartLine {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let field_count = if self.weight.is_some() { 6 } else { 5 };
        let mut state = serializer.serialize_struct("CartLine", field_count)?;

        state.serialize_field("itemType", &self.key.item_type)?;
        state.serialize_field("serviceType", &self.key.service_type)?;
        state.serialize_field("pricingModel", &self.key.pricing_model)?;
        state.serialize_field("quantity", &self.quantity)?;

        if let Some(weight) = self.weight {
            state.serialize_field("weight", &weight)?;
        }

        state.serialize_field("unitPrice", &self.unit_price)?;
        state.serialize_field("lineTotal", &self.line_total())?;

        state.end()
    }
}

/// Merges a newly selected line into a cart.
///
/// If a line with the same [`ItemKey`] already exists, its quantity is bumped by the new
/// line's quantity (still clamped into `1..=100`) and its price snapshot refreshed;
/// otherwise the line is appended.
pub fn merge_line(cart: &mut Vec<CartLine>, line: CartLine) {
    match cart.iter_mut().find(|existing| existing.key == line.key) {
        Some(existing) => {
            existing.set_quantity(existing.quantity.saturating_add(line.quantity));
            existing.reprice(line.unit_price);
        }
        None => cart.push(line),
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    #[test]
    fn per_piece_line_total() {
        let line = CartLine::per_piece("shirt", "wash_fold", Decimal::from(20), 3);

        assert_eq!(line.line_total(), Decimal::from(60));
    }

    #[test]
    fn weight_based_line_total_multiplies_weight_and_quantity() {
        let bounds = WeightBounds::default();
        let line =
            CartLine::weight_based("mixed", "wash_fold", Decimal::from(50), Decimal::from(2), 3, &bounds);

        assert_eq!(line.line_total(), Decimal::from(300));
    }

    #[test]
    fn quantity_clamps_at_mutation_boundary() {
        let mut line = CartLine::per_piece("shirt", "wash_fold", Decimal::from(20), 0);

        assert_eq!(line.quantity(), MIN_QUANTITY);

        line.set_quantity(500);
        assert_eq!(line.quantity(), MAX_QUANTITY);
    }

    #[test]
    fn weight_clamps_into_vendor_bounds() {
        let bounds = WeightBounds::default();
        let mut line = CartLine::weight_based(
            "mixed",
            "wash_fold",
            Decimal::from(50),
            Decimal::from(900),
            1,
            &bounds,
        );

        assert_eq!(line.weight_kg(), Some(Decimal::from(50)));

        line.set_weight(Decimal::ZERO, &bounds);
        assert_eq!(line.weight_kg(), Some(Decimal::new(1, 1)));
    }

    #[test]
    fn set_weight_is_ignored_on_per_piece_lines() {
        let bounds = WeightBounds::default();
        let mut line = CartLine::per_piece("shirt", "wash_fold", Decimal::from(20), 1);

        line.set_weight(Decimal::from(5), &bounds);

        assert_eq!(line.weight_kg(), None);
    }

    #[test]
    fn merge_line_bumps_quantity_for_same_key() -> TestResult {
        let mut cart = vec![CartLine::per_piece("shirt", "wash_fold", Decimal::from(20), 2)];

        merge_line(
            &mut cart,
            CartLine::per_piece("shirt", "wash_fold", Decimal::from(22), 3),
        );

        assert_eq!(cart.len(), 1);

        let line = cart.first().expect("missing merged line");
        assert_eq!(line.quantity(), 5);
        assert_eq!(line.unit_price(), Decimal::from(22));

        Ok(())
    }

    #[test]
    fn merge_line_appends_distinct_keys() {
        let mut cart = vec![CartLine::per_piece("shirt", "wash_fold", Decimal::from(20), 2)];

        merge_line(
            &mut cart,
            CartLine::per_piece("shirt", "wash_iron", Decimal::from(25), 1),
        );

        assert_eq!(cart.len(), 2);
    }

    #[test]
    fn serializes_with_derived_line_total() -> TestResult {
        let line = CartLine::per_piece("shirt", "wash_fold", Decimal::from(20), 2);
        let json = serde_json::to_value(&line)?;

        assert_eq!(json["itemType"], "shirt");
        assert_eq!(json["pricingModel"], "per_piece");
        assert_eq!(json["lineTotal"], serde_json::json!("40"));

        Ok(())
    }

    #[test]
    fn deserializes_wire_shape_and_ignores_line_total() -> TestResult {
        let line: CartLine = serde_json::from_str(
            r#"{
                "itemType": "mixed",
                "serviceType": "wash_fold",
                "pricingModel": "weight_based",
                "quantity": 2,
                "weight": "1.5",
                "unitPrice": "60",
                "lineTotal": "999"
            }"#,
        )?;

        assert_eq!(line.key().item_type, "mixed");
        assert_eq!(line.line_total(), Decimal::from(180));

        Ok(())
    }

    #[test]
    fn deserialized_lines_clamp_like_constructed_ones() -> TestResult {
        let line: CartLine = serde_json::from_str(
            r#"{
                "itemType": "shirt",
                "serviceType": "wash_fold",
                "pricingModel": "per_piece",
                "quantity": 1000,
                "unitPrice": "20"
            }"#,
        )?;

        assert_eq!(line.quantity(), MAX_QUANTITY);
        assert_eq!(line.line_total(), Decimal::from(2000));

        let line: CartLine = serde_json::from_str(
            r#"{
                "itemType": "mixed",
                "serviceType": "wash_fold",
                "pricingModel": "weight_based",
                "quantity": 0,
                "weight": "900",
                "unitPrice": "60"
            }"#,
        )?;

        assert_eq!(line.quantity(), MIN_QUANTITY);
        assert_eq!(line.weight_kg(), Some(Decimal::from(50)));

        Ok(())
    }

    #[test]
    fn deserialized_weight_line_without_weight_floors_to_minimum() -> TestResult {
        let line: CartLine = serde_json::from_str(
            r#"{
                "itemType": "mixed",
                "serviceType": "wash_fold",
                "pricingModel": "weight_based",
                "quantity": 2,
                "unitPrice": "60"
            }"#,
        )?;

        assert_eq!(line.weight_kg(), Some(Decimal::new(1, 1)));
        assert_eq!(line.line_total(), Decimal::from(12));

        Ok(())
    }

    #[test]
    fn deserialized_per_piece_line_drops_stray_weight() -> TestResult {
        let line: CartLine = serde_json::from_str(
            r#"{
                "itemType": "shirt",
                "serviceType": "wash_fold",
                "pricingModel": "per_piece",
                "quantity": 2,
                "weight": "3",
                "unitPrice": "20"
            }"#,
        )?;

        assert_eq!(line.weight_kg(), None);
        assert_eq!(line.line_total(), Decimal::from(40));

        Ok(())
    }
}

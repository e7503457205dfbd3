//! Starting-price estimation
//!
//! Answers "what is the cheapest price this vendor offers" for list and browse views,
//! independent of any cart. A pure read query over the catalog, recomputed on every call;
//! nothing here caches state that could go stale against a refreshed vendor record.

use rust_decimal::Decimal;

use crate::catalog::{PricingCatalog, PricingModel};

/// Fallback starting price for per-piece vendors with no positive entries.
#[must_use]
pub fn default_per_piece_starting_price() -> Decimal {
    Decimal::from(20)
}

/// Fallback starting price for weight-based vendors with no positive entries.
#[must_use]
pub fn default_weight_starting_price() -> Decimal {
    Decimal::from(50)
}

/// The cheapest price a vendor offers, for "starting from ₹X" listings.
///
/// Weight-based vendors are estimated from the scheduled weight table (quick prices are
/// premium variants, not a floor). A hybrid vendor whose weight table has no positive
/// entry falls through to the per-piece scan; only a purely weight-based vendor with no
/// positive entry yields the weight default. The defaults stand in for legitimately
/// empty catalogs; malformed documents are rejected earlier, at catalog construction.
#[must_use]
pub fn starting_price(catalog: &PricingCatalog) -> Decimal {
    if catalog.is_weight_based_active() {
        if let Some(cheapest) = min_positive(catalog.weight_scheduled().values().copied()) {
            return cheapest;
        }

        if catalog.model() == PricingModel::WeightBased {
            return default_weight_starting_price();
        }
    }

    let per_piece_prices = catalog
        .per_piece_scheduled()
        .values()
        .flat_map(|services| services.values().copied());

    min_positive(per_piece_prices).unwrap_or_else(default_per_piece_starting_price)
}

/// Minimum over the positive prices in an iterator, `None` when there are none.
///
/// Guards the "all-zero catalog" edge case: zero-priced entries are placeholders, not
/// offers, and must not win the minimum.
fn min_positive(prices: impl Iterator<Item = Decimal>) -> Option<Decimal> {
    prices.filter(|price| *price > Decimal::ZERO).min()
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use crate::{catalog::VendorPricingDoc, fixtures};

    use super::*;

    fn catalog_from(json: &str) -> PricingCatalog {
        let doc = VendorPricingDoc::from_json(json).expect("fixture JSON must parse");

        PricingCatalog::from_doc(doc).expect("fixture document must validate")
    }

    #[test]
    fn per_piece_vendor_uses_cheapest_scheduled_entry() -> TestResult {
        let catalog = PricingCatalog::from_doc(fixtures::scheduled_only_vendor())?;

        assert_eq!(starting_price(&catalog), Decimal::from(20));

        Ok(())
    }

    #[test]
    fn empty_per_piece_vendor_defaults_to_twenty() -> TestResult {
        let catalog = catalog_from(r#"{ "pricingConfig": { "model": "per_piece" } }"#);

        assert_eq!(starting_price(&catalog), Decimal::from(20));

        Ok(())
    }

    #[test]
    fn weight_vendor_uses_cheapest_weight_entry() -> TestResult {
        let catalog = catalog_from(
            r#"{
                "pricingConfig": {
                    "model": "weight_based",
                    "weightBasedPricing": { "wash_fold": 60, "wash_iron": 80 }
                }
            }"#,
        );

        assert_eq!(starting_price(&catalog), Decimal::from(60));

        Ok(())
    }

    #[test]
    fn empty_weight_vendor_defaults_to_fifty() -> TestResult {
        let catalog = catalog_from(r#"{ "pricingConfig": { "model": "weight_based" } }"#);

        assert_eq!(starting_price(&catalog), Decimal::from(50));

        Ok(())
    }

    #[test]
    fn all_zero_weight_entries_do_not_win_the_minimum() -> TestResult {
        let catalog = catalog_from(
            r#"{
                "pricingConfig": {
                    "model": "weight_based",
                    "weightBasedPricing": { "wash_fold": 0 }
                }
            }"#,
        );

        assert_eq!(starting_price(&catalog), Decimal::from(50));

        Ok(())
    }

    #[test]
    fn hybrid_with_empty_weight_table_falls_through_to_per_piece() -> TestResult {
        let catalog = catalog_from(
            r#"{
                "pricingConfig": { "model": "hybrid" },
                "pricing": { "towel": { "wash_fold": 15 } }
            }"#,
        );

        assert_eq!(starting_price(&catalog), Decimal::from(15));

        Ok(())
    }

    #[test]
    fn hybrid_prefers_weight_minimum_when_present() -> TestResult {
        let catalog = PricingCatalog::from_doc(fixtures::hybrid_vendor())?;

        assert_eq!(starting_price(&catalog), Decimal::from(40));

        Ok(())
    }
}

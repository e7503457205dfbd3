//! Cart reconciliation
//!
//! Keeps an existing cart consistent when the delivery speed changes, the one
//! externally-triggered mutation that can invalidate previously valid lines. Callers must
//! resolve eligibility for the new speed first and run a single reconciliation pass against
//! it; the pass reports exactly which lines were dropped so the UI can say
//! "N items removed — not available for quick service".

use smallvec::SmallVec;

use crate::{cart::CartLine, eligibility::Eligibility};

/// Outcome of a reconciliation pass: the updated cart plus every dropped line.
///
/// Removals are an expected, reportable outcome, not an error.
#[derive(Debug, Clone, PartialEq)]
pub struct Reconciliation {
    cart: Vec<CartLine>,
    removed: SmallVec<[CartLine; 4]>,
}

impl Reconciliation {
    /// Lines that survived, with refreshed price snapshots.
    #[must_use]
    pub fn cart(&self) -> &[CartLine] {
        &self.cart
    }

    /// Consumes the result, yielding the updated cart.
    #[must_use]
    pub fn into_cart(self) -> Vec<CartLine> {
        self.cart
    }

    /// Lines dropped because the new eligibility has no entry for their identity.
    #[must_use]
    pub fn removed(&self) -> &[CartLine] {
        &self.removed
    }

    /// Number of dropped lines, for user-facing removal notices.
    #[must_use]
    pub fn removed_count(&self) -> usize {
        self.removed.len()
    }
}

/// Re-validates a cart against a freshly resolved eligibility menu.
///
/// Single atomic pass over the cart, in order: a line whose identity is still offered has
/// its `unit_price` overwritten with the newly resolved price (quantity, weight and
/// identity untouched); a line with no matching entry moves to the removed set. The pass
/// never adds lines, and running it twice against the same eligibility is a no-op — the
/// second pass removes nothing and drifts no price.
#[must_use]
pub fn reconcile(cart: Vec<CartLine>, eligibility: &Eligibility) -> Reconciliation {
    let mut kept = Vec::with_capacity(cart.len());
    let mut removed = SmallVec::new();

    for mut line in cart {
        match eligibility.unit_price_for(line.key()) {
            Some(unit_price) => {
                line.reprice(unit_price);
                kept.push(line);
            }
            None => removed.push(line),
        }
    }

    Reconciliation {
        cart: kept,
        removed,
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;
    use testresult::TestResult;

    use crate::{
        cart::CartLine,
        catalog::{PricingCatalog, WeightBounds},
        fixtures,
        speed::DeliverySpeed,
    };

    use super::*;

    #[test]
    fn switching_to_quick_drops_scheduled_only_lines() -> TestResult {
        let catalog = PricingCatalog::from_doc(fixtures::scheduled_only_vendor())?;
        let quick = Eligibility::resolve(&catalog, DeliverySpeed::Quick);

        let cart = vec![CartLine::per_piece("shirt", "wash_fold", Decimal::from(20), 2)];
        let result = reconcile(cart, &quick);

        assert!(result.cart().is_empty());
        assert_eq!(result.removed_count(), 1);

        let dropped = result.removed().first().expect("expected dropped line");
        assert_eq!(dropped.key().item_type, "shirt");
        assert_eq!(dropped.quantity(), 2);

        Ok(())
    }

    #[test]
    fn surviving_lines_are_repriced_but_otherwise_untouched() -> TestResult {
        let catalog = PricingCatalog::from_doc(fixtures::quick_enabled_vendor())?;
        let quick = Eligibility::resolve(&catalog, DeliverySpeed::Quick);

        // Stale snapshot from the scheduled menu.
        let cart = vec![CartLine::per_piece("shirt", "wash_fold", Decimal::from(20), 4)];
        let result = reconcile(cart, &quick);

        let line = result.cart().first().expect("expected surviving line");
        assert_eq!(line.unit_price(), Decimal::from(30));
        assert_eq!(line.quantity(), 4);
        assert_eq!(result.removed_count(), 0);

        Ok(())
    }

    #[test]
    fn weight_lines_match_by_service_alone() -> TestResult {
        let catalog = PricingCatalog::from_doc(fixtures::hybrid_vendor())?;
        let scheduled = Eligibility::resolve(&catalog, DeliverySpeed::Scheduled);

        let cart = vec![CartLine::weight_based(
            "bedsheet",
            "wash_fold",
            Decimal::from(35),
            Decimal::from(2),
            1,
            &WeightBounds::default(),
        )];
        let result = reconcile(cart, &scheduled);

        let line = result.cart().first().expect("expected surviving line");
        assert_eq!(line.unit_price(), Decimal::from(40));
        assert_eq!(line.weight_kg(), Some(Decimal::from(2)));

        Ok(())
    }

    #[test]
    fn reconcile_is_idempotent() -> TestResult {
        let catalog = PricingCatalog::from_doc(fixtures::quick_enabled_vendor())?;
        let quick = Eligibility::resolve(&catalog, DeliverySpeed::Quick);

        let cart = vec![
            CartLine::per_piece("shirt", "wash_fold", Decimal::from(20), 2),
            CartLine::per_piece("pant", "wash_iron", Decimal::from(25), 1),
        ];

        let first = reconcile(cart.clone(), &quick);
        let second = reconcile(first.cart().to_vec(), &quick);

        assert_eq!(second.removed_count(), 0);
        assert_eq!(second.cart(), first.cart());

        Ok(())
    }

    #[test]
    fn reconcile_never_invents_lines() -> TestResult {
        let catalog = PricingCatalog::from_doc(fixtures::quick_enabled_vendor())?;
        let quick = Eligibility::resolve(&catalog, DeliverySpeed::Quick);

        let cart = vec![
            CartLine::per_piece("shirt", "wash_fold", Decimal::from(20), 2),
            CartLine::per_piece("curtain", "dry_clean", Decimal::from(90), 1),
        ];
        let input_keys: Vec<_> = cart.iter().map(|line| line.key().clone()).collect();

        let result = reconcile(cart, &quick);

        assert_eq!(result.cart().len() + result.removed_count(), input_keys.len());

        for line in result.cart().iter().chain(result.removed()) {
            assert!(
                input_keys.contains(line.key()),
                "reconciliation produced a line not present in the input"
            );
        }

        Ok(())
    }

    #[test]
    fn empty_cart_reconciles_to_empty() -> TestResult {
        let catalog = PricingCatalog::from_doc(fixtures::quick_enabled_vendor())?;
        let scheduled = Eligibility::resolve(&catalog, DeliverySpeed::Scheduled);

        let result = reconcile(Vec::new(), &scheduled);

        assert!(result.cart().is_empty());
        assert_eq!(result.removed_count(), 0);

        Ok(())
    }
}

//! Mangle
//!
//! Mangle is a pricing, eligibility and cart-reconciliation engine for laundry-service
//! marketplaces. It turns a vendor's raw pricing document into a queryable catalog, resolves
//! the menu of orderable (item, service) offerings for a delivery speed, keeps customer carts
//! consistent when the speed changes, and computes order quotes.
//!
//! The engine is a pure, synchronous computation library: every public operation is a function
//! of the vendor snapshot and/or cart it receives, performs no I/O, and owns no mutable state.
//! Debouncing and cancellation of repeated recalculations belong to the caller.

pub mod cart;
pub mod catalog;
pub mod eligibility;
pub mod estimator;
pub mod fixtures;
pub mod money;
pub mod prelude;
pub mod quote;
pub mod reconcile;
pub mod speed;

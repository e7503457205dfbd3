//! Delivery speeds

use serde::{Deserialize, Serialize};

/// How quickly an order is picked up and returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeliverySpeed {
    /// Same-day premium service.
    Quick,

    /// Standard advance-booked service.
    Scheduled,

    /// Recurring subscription plan.
    Subscription,
}

impl DeliverySpeed {
    /// The speed whose price tables govern eligibility for this speed.
    ///
    /// Subscriptions have no price tables of their own and reuse scheduled
    /// eligibility; quick and scheduled map to themselves.
    #[must_use]
    pub fn eligibility_speed(self) -> DeliverySpeed {
        match self {
            DeliverySpeed::Quick => DeliverySpeed::Quick,
            DeliverySpeed::Scheduled | DeliverySpeed::Subscription => DeliverySpeed::Scheduled,
        }
    }
}

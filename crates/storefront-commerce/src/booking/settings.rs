//! Merchant booking settings.

use crate::error::CommerceError;
use serde::{Deserialize, Serialize};

/// How a merchant takes bookings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BookingSettings {
    /// Bookings reserve whole days, so no time slot is picked.
    pub full_day: bool,
    /// Shoppers pay an advance before the booking is confirmed.
    pub require_advance_payment: bool,
    /// Share of the service price due in advance, in percent.
    pub advance_percent: u8,
}

impl Default for BookingSettings {
    fn default() -> Self {
        Self {
            full_day: false,
            require_advance_payment: false,
            advance_percent: 100,
        }
    }
}

impl BookingSettings {
    /// Check the settings are usable.
    pub fn validate(&self) -> Result<(), CommerceError> {
        if self.require_advance_payment && !(1..=100).contains(&self.advance_percent) {
            return Err(CommerceError::InvalidSettings(format!(
                "advance_percent must be 1-100, got {}",
                self.advance_percent
            )));
        }
        Ok(())
    }
}

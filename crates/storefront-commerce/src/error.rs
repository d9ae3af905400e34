//! Commerce error types.

use thiserror::Error;

/// Errors that can occur in storefront operations.
///
/// Price and stock resolution never fail; these cover the cart, its
/// persistence, and the booking wizard.
#[derive(Error, Debug)]
pub enum CommerceError {
    /// Item not in cart.
    #[error("Item not in cart: {0}")]
    ItemNotInCart(String),

    /// Invalid quantity.
    #[error("Invalid quantity: {0}")]
    InvalidQuantity(i64),

    /// Quantity exceeds maximum allowed.
    #[error("Quantity {0} exceeds maximum allowed ({1})")]
    QuantityExceedsLimit(i64, i64),

    /// Arithmetic overflow.
    #[error("Arithmetic overflow in money calculation")]
    Overflow,

    /// Currency mismatch.
    #[error("Currency mismatch: expected {expected}, got {got}")]
    CurrencyMismatch { expected: String, got: String },

    /// Invalid booking wizard transition.
    #[error("Invalid booking transition from {from} to {to}")]
    InvalidBookingTransition { from: String, to: String },

    /// Booking step cannot be left yet.
    #[error("Booking incomplete: missing {0}")]
    BookingIncomplete(String),

    /// Unusable merchant settings.
    #[error("Invalid settings: {0}")]
    InvalidSettings(String),

    /// Cache/storage error.
    #[error("Cache error: {0}")]
    CacheError(String),

    /// Serialization error.
    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl From<storefront_cache::CacheError> for CommerceError {
    fn from(e: storefront_cache::CacheError) -> Self {
        CommerceError::CacheError(e.to_string())
    }
}

impl From<serde_json::Error> for CommerceError {
    fn from(e: serde_json::Error) -> Self {
        CommerceError::SerializationError(e.to_string())
    }
}

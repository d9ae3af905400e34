//! Storefront commerce logic.
//!
//! - **Catalog**: raw product normalization, variant stock and price resolution
//! - **Cart**: line items priced from frozen snapshots, persisted per storefront
//! - **Booking**: the appointment wizard
//! - **Showcase**: canonical storefront slugs
//!
//! # Example
//!
//! ```rust,ignore
//! use storefront_commerce::prelude::*;
//!
//! let product = Product::from_json(json, Currency::INR)?;
//! let status = product.stock_status();
//!
//! let mut cart = Cart::new("acme", Currency::INR);
//! let id = cart.add_item(&product, ItemOptions::new().with_color("Red").with_size("M"), 1)?;
//! cart.update_item_options(&id, ItemOptions::new().with_size("L"));
//! println!("Total: {}", cart.calculate_pricing()?.subtotal);
//! ```

pub mod error;
pub mod ids;
pub mod money;

pub mod booking;
pub mod cart;
pub mod catalog;
pub mod showcase;

pub use error::CommerceError;
pub use ids::*;
pub use money::{Currency, Money};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::error::CommerceError;
    pub use crate::ids::*;
    pub use crate::money::{Currency, Money};

    pub use crate::catalog::{
        normalize_product, PriceDisplay, PricingInfo, Product, RawProduct, StockStatus, Variant,
    };

    pub use crate::cart::{Cart, CartItem, CartPricing, CartStore, ItemOptions};

    pub use crate::booking::{BookingFlow, BookingService, BookingSettings, BookingStep, CustomerDetails};

    pub use crate::showcase::{resolve_slug, slugify, SlugResolution, Storefront};
}

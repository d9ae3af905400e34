//! Product catalog module.
//!
//! Contains the wire and canonical product shapes, stock aggregation, price
//! resolution, and dropdown option lists.

mod options;
mod pricing;
mod product;
mod raw;
mod size_map;
mod stock;

pub use options::{color_options, size_options};
pub use pricing::{
    display_price, price_for, resolve_price, PriceDisplay, PricedVariant, PricingInfo,
    VariantPricing,
};
pub use product::{normalize_product, BasePricing, Product, ProductStock, Variant, VariantStock};
pub use raw::{RawProduct, RawVariant};
pub use size_map::SizeMap;
pub use stock::{compute_stock_status, stock_for_selection, StockStatus, LOW_STOCK_THRESHOLD};

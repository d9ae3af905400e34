//! Shopping cart module.
//!
//! Contains the cart, its items with frozen pricing snapshots, totals, and
//! the storage-backed cart store.

mod cart;
mod pricing;
mod store;

pub use cart::{Cart, CartItem, ItemOptions, MAX_QUANTITY_PER_ITEM};
pub use pricing::{CartPricing, LineItemPricing};
pub use store::{cart_storage_key, CartStore};

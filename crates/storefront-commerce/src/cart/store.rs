//! Cart persistence bound to a storage key.

use crate::cart::{Cart, CartItem, CartPricing, ItemOptions};
use crate::catalog::Product;
use crate::error::CommerceError;
use crate::ids::{CartItemId, TenantId};
use crate::money::Currency;
use storefront_cache::{cache_key, Cache, CacheError, KvStore};

/// Storage key of a storefront's cart.
pub fn cart_storage_key(storefront: &TenantId) -> String {
    cache_key!("cart", storefront)
}

/// Owns one cart and keeps it in sync with a key-value store.
///
/// The cart is loaded once in [`open`](Self::open) and written back after
/// every mutation. Nothing else should write under the same key.
///
/// # Example
///
/// ```rust,ignore
/// let mut store = CartStore::for_storefront(FileStore::open(dir)?, "acme".into(), Currency::INR)?;
/// let id = store.add_item(&product, ItemOptions::new().with_size("M"), 1)?;
/// store.decrement(&id)?;
/// ```
pub struct CartStore<S> {
    cache: Cache<S>,
    key: String,
    cart: Cart,
}

impl<S: KvStore> CartStore<S> {
    /// Open the cart stored under `key`, or start an empty one.
    ///
    /// A stored value that no longer deserializes, or that belongs to
    /// another storefront or currency, is discarded.
    pub fn open(
        store: S,
        key: impl Into<String>,
        storefront: TenantId,
        currency: Currency,
    ) -> Result<Self, CommerceError> {
        let cache = Cache::new(store);
        let key = key.into();

        let cart = match cache.get::<Cart>(&key) {
            Ok(Some(cart)) if cart.storefront != storefront || cart.currency != currency => {
                tracing::warn!(
                    key = %key,
                    stored_storefront = %cart.storefront,
                    stored_currency = ?cart.currency,
                    "discarding cart of another storefront or currency"
                );
                Cart::new(storefront, currency)
            }
            Ok(Some(cart)) => {
                tracing::debug!(key = %key, items = cart.items.len(), "loaded cart");
                cart
            }
            Ok(None) => Cart::new(storefront, currency),
            Err(CacheError::SerializeError(e)) => {
                tracing::warn!(key = %key, error = %e, "discarding unreadable cart");
                Cart::new(storefront, currency)
            }
            Err(e) => return Err(e.into()),
        };

        Ok(Self { cache, key, cart })
    }

    /// Open the cart of a storefront under its default key.
    pub fn for_storefront(store: S, storefront: TenantId, currency: Currency) -> Result<Self, CommerceError> {
        let key = cart_storage_key(&storefront);
        Self::open(store, key, storefront, currency)
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    pub fn items(&self) -> &[CartItem] {
        &self.cart.items
    }

    /// See [`Cart::add_item`].
    pub fn add_item(
        &mut self,
        product: &Product,
        options: ItemOptions,
        quantity: i64,
    ) -> Result<CartItemId, CommerceError> {
        self.apply(|cart| cart.add_item(product, options, quantity))
    }

    /// See [`Cart::update_quantity`].
    pub fn update_quantity(&mut self, id: &CartItemId, quantity: i64) -> Result<bool, CommerceError> {
        self.apply(|cart| cart.update_quantity(id, quantity))
    }

    /// See [`Cart::increment`].
    pub fn increment(&mut self, id: &CartItemId) -> Result<bool, CommerceError> {
        self.apply(|cart| cart.increment(id))
    }

    /// See [`Cart::decrement`].
    pub fn decrement(&mut self, id: &CartItemId) -> Result<bool, CommerceError> {
        self.apply(|cart| Ok(cart.decrement(id)))
    }

    /// See [`Cart::remove_item`].
    pub fn remove_item(&mut self, id: &CartItemId) -> Result<bool, CommerceError> {
        self.apply(|cart| Ok(cart.remove_item(id)))
    }

    /// See [`Cart::update_item_options`].
    pub fn update_item_options(
        &mut self,
        id: &CartItemId,
        update: ItemOptions,
    ) -> Result<Option<CartItemId>, CommerceError> {
        self.apply(|cart| Ok(cart.update_item_options(id, update)))
    }

    /// Empty the cart.
    pub fn clear(&mut self) -> Result<(), CommerceError> {
        self.apply(|cart| {
            cart.clear();
            Ok(())
        })
    }

    /// Take the final totals and empty the cart.
    pub fn complete_checkout(&mut self) -> Result<CartPricing, CommerceError> {
        let pricing = self.apply(|cart| {
            let pricing = cart.calculate_pricing()?;
            cart.clear();
            Ok(pricing)
        })?;
        tracing::info!(
            key = %self.key,
            items = pricing.item_count,
            subtotal = %pricing.subtotal,
            "checkout completed"
        );
        Ok(pricing)
    }

    /// Run a mutation on a copy of the cart and keep it only once saved.
    fn apply<T>(&mut self, f: impl FnOnce(&mut Cart) -> Result<T, CommerceError>) -> Result<T, CommerceError> {
        let mut next = self.cart.clone();
        let out = f(&mut next)?;
        self.cache.set(&self.key, &next)?;
        tracing::debug!(key = %self.key, items = next.items.len(), "saved cart");
        self.cart = next;
        Ok(out)
    }
}

//! Cart and cart item types.

use crate::cart::{CartPricing, LineItemPricing};
use crate::catalog::{PricingInfo, Product};
use crate::error::CommerceError;
use crate::ids::{CartItemId, ProductId, TenantId};
use crate::money::{Currency, Money};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Maximum quantity allowed per cart item.
pub const MAX_QUANTITY_PER_ITEM: i64 = 9999;

/// The colour/size a shopper picked for a cart item.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemOptions {
    pub size: Option<String>,
    pub color: Option<String>,
}

impl ItemOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_size(mut self, size: impl Into<String>) -> Self {
        self.size = clean(Some(size.into()));
        self
    }

    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = clean(Some(color.into()));
        self
    }

    pub fn size(&self) -> Option<&str> {
        self.size.as_deref()
    }

    pub fn color(&self) -> Option<&str> {
        self.color.as_deref()
    }

    /// Overlay `update` onto these options; unset fields keep their value.
    fn merged(&self, update: ItemOptions) -> ItemOptions {
        ItemOptions {
            size: clean(update.size).or_else(|| self.size.clone()),
            color: clean(update.color).or_else(|| self.color.clone()),
        }
    }

    fn cleaned(self) -> ItemOptions {
        ItemOptions {
            size: clean(self.size),
            color: clean(self.color),
        }
    }
}

fn clean(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// A line in the shopper's cart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartItem {
    /// Synthetic id from product id, size and colour.
    pub id: CartItemId,
    pub product_id: ProductId,
    /// Product name (denormalized for display).
    pub name: String,
    pub image: Option<String>,
    pub quantity: i64,
    /// Unit price for the current options.
    pub price: Money,
    pub options: ItemOptions,
    /// Pricing frozen when the item was added.
    pub pricing_info: PricingInfo,
}

impl CartItem {
    /// Create an item priced for `options`.
    pub fn new(product: &Product, options: ItemOptions, quantity: i64) -> Self {
        let options = options.cleaned();
        let pricing_info = PricingInfo::from_product(product);
        let price = pricing_info.price_for(options.color(), options.size());
        Self {
            id: CartItemId::for_selection(&product.id, options.size(), options.color()),
            product_id: product.id.clone(),
            name: product.name.clone(),
            image: product.image.clone(),
            quantity,
            price,
            options,
            pricing_info,
        }
    }

    /// Line total (unit price × quantity).
    pub fn total(&self) -> Result<Money, CommerceError> {
        self.price
            .try_multiply(self.quantity)
            .ok_or(CommerceError::Overflow)
    }
}

/// A shopper's cart for one storefront.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Cart {
    /// Storefront tenant the cart belongs to.
    pub storefront: TenantId,
    pub items: Vec<CartItem>,
    pub currency: Currency,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Cart {
    /// Create an empty cart for a storefront.
    pub fn new(storefront: impl Into<TenantId>, currency: Currency) -> Self {
        let now = Utc::now();
        Self {
            storefront: storefront.into(),
            items: Vec::new(),
            currency,
            created_at: now,
            updated_at: now,
        }
    }

    /// Add a product selection to the cart.
    ///
    /// Re-adding the same product, size and colour increases the quantity of
    /// the existing item; any other selection becomes a new item.
    ///
    /// Returns an error if:
    /// - Quantity is not positive
    /// - The product is priced in another currency
    /// - The resulting quantity exceeds MAX_QUANTITY_PER_ITEM
    pub fn add_item(
        &mut self,
        product: &Product,
        options: ItemOptions,
        quantity: i64,
    ) -> Result<CartItemId, CommerceError> {
        if quantity <= 0 {
            return Err(CommerceError::InvalidQuantity(quantity));
        }
        if product.currency() != self.currency {
            return Err(CommerceError::CurrencyMismatch {
                expected: self.currency.code().to_string(),
                got: product.currency().code().to_string(),
            });
        }

        let options = options.cleaned();
        let id = CartItemId::for_selection(&product.id, options.size(), options.color());

        if let Some(existing) = self
            .items
            .iter_mut()
            .find(|i| i.product_id == product.id && i.options == options)
        {
            let new_quantity = existing
                .quantity
                .checked_add(quantity)
                .ok_or(CommerceError::Overflow)?;
            if new_quantity > MAX_QUANTITY_PER_ITEM {
                return Err(CommerceError::QuantityExceedsLimit(
                    new_quantity,
                    MAX_QUANTITY_PER_ITEM,
                ));
            }
            existing.quantity = new_quantity;
            self.touch();
            return Ok(id);
        }

        if quantity > MAX_QUANTITY_PER_ITEM {
            return Err(CommerceError::QuantityExceedsLimit(
                quantity,
                MAX_QUANTITY_PER_ITEM,
            ));
        }

        self.items.push(CartItem::new(product, options, quantity));
        self.touch();
        Ok(id)
    }

    /// Set an item's quantity. A quantity below 1 removes the item.
    ///
    /// Returns whether an item was found.
    pub fn update_quantity(&mut self, id: &CartItemId, quantity: i64) -> Result<bool, CommerceError> {
        if quantity < 1 {
            return Ok(self.remove_item(id));
        }
        if quantity > MAX_QUANTITY_PER_ITEM {
            return Err(CommerceError::QuantityExceedsLimit(
                quantity,
                MAX_QUANTITY_PER_ITEM,
            ));
        }

        match self.items.iter_mut().find(|i| &i.id == id) {
            Some(item) => {
                item.quantity = quantity;
                self.touch();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Increase an item's quantity by one.
    pub fn increment(&mut self, id: &CartItemId) -> Result<bool, CommerceError> {
        match self.get_item(id).map(|i| i.quantity) {
            Some(quantity) => self.update_quantity(id, quantity + 1),
            None => Ok(false),
        }
    }

    /// Decrease an item's quantity by one, removing it when it reaches zero.
    pub fn decrement(&mut self, id: &CartItemId) -> bool {
        let Some(quantity) = self.get_item(id).map(|i| i.quantity) else {
            return false;
        };
        if quantity <= 1 {
            return self.remove_item(id);
        }
        if let Some(item) = self.items.iter_mut().find(|i| &i.id == id) {
            item.quantity = quantity - 1;
        }
        self.touch();
        true
    }

    /// Remove an item from the cart.
    pub fn remove_item(&mut self, id: &CartItemId) -> bool {
        let len_before = self.items.len();
        self.items.retain(|i| &i.id != id);
        let removed = self.items.len() < len_before;
        if removed {
            self.touch();
        }
        removed
    }

    /// Change an item's size and/or colour and re-price it.
    ///
    /// Unset fields in `update` keep their current value. The unit price is
    /// recomputed from the item's frozen pricing snapshot, never from the
    /// live catalog. The item's id follows its new options; if another item
    /// already has that id the two are merged, capped at
    /// MAX_QUANTITY_PER_ITEM.
    ///
    /// Returns the item's id after the change, or `None` if no item matched.
    pub fn update_item_options(&mut self, id: &CartItemId, update: ItemOptions) -> Option<CartItemId> {
        let idx = self.items.iter().position(|i| &i.id == id)?;

        let item = &mut self.items[idx];
        item.options = item.options.merged(update);
        item.price = item
            .pricing_info
            .price_for(item.options.color(), item.options.size());
        item.id = CartItemId::for_selection(&item.product_id, item.options.size(), item.options.color());
        let new_id = item.id.clone();

        let duplicate = self
            .items
            .iter()
            .enumerate()
            .find(|(i, other)| *i != idx && other.id == new_id)
            .map(|(i, _)| i);

        if let Some(dup) = duplicate {
            let moved = self.items.remove(idx);
            let target = if dup > idx { dup - 1 } else { dup };
            let merged = &mut self.items[target];
            merged.quantity = merged
                .quantity
                .saturating_add(moved.quantity)
                .min(MAX_QUANTITY_PER_ITEM);
            merged.price = moved.price;
        }

        tracing::debug!(from = %id, to = %new_id, "updated cart item options");
        self.touch();
        Some(new_id)
    }

    /// Remove every item.
    pub fn clear(&mut self) {
        self.items.clear();
        self.touch();
    }

    /// Get total item count (sum of quantities).
    pub fn item_count(&self) -> i64 {
        self.items.iter().map(|i| i.quantity).sum()
    }

    /// Get number of distinct items.
    pub fn unique_item_count(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get_item(&self, id: &CartItemId) -> Option<&CartItem> {
        self.items.iter().find(|i| &i.id == id)
    }

    /// Calculate cart totals.
    ///
    /// Returns error if arithmetic overflow occurs.
    pub fn calculate_pricing(&self) -> Result<CartPricing, CommerceError> {
        let line_items = self
            .items
            .iter()
            .map(|item| {
                Ok(LineItemPricing {
                    item_id: item.id.clone(),
                    unit_price: item.price,
                    quantity: item.quantity,
                    total: item.total()?,
                })
            })
            .collect::<Result<Vec<_>, CommerceError>>()?;

        let subtotal = Money::try_sum(line_items.iter().map(|l| &l.total), self.currency)
            .ok_or(CommerceError::Overflow)?;

        Ok(CartPricing {
            subtotal,
            item_count: self.item_count(),
            line_items,
        })
    }

    fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}

//! Price resolution for colour/size selections.
//!
//! One resolver serves both the live product card and cart lines priced
//! from a frozen [`PricingInfo`] snapshot, so the two cannot drift apart.
//!
//! Priority, first match wins:
//!
//! 1. the selected variant's own price for the selected size,
//! 2. the selected variant's offer price, then its base price,
//! 3. the product's price for the selected size (size-based pricing),
//! 4. the product's offer price, then its base price.

use crate::catalog::product::{BasePricing, Product, Variant};
use crate::catalog::size_map::{same_label, SizeMap};
use crate::money::Money;
use serde::{Deserialize, Serialize};

/// Pricing view of a variant, shared by live variants and snapshots.
pub trait PricedVariant {
    fn color(&self) -> &str;
    fn sizes(&self) -> &[String];
    fn price(&self) -> Option<Money>;
    fn offer_price(&self) -> Option<Money>;
    fn size_prices(&self) -> &SizeMap<Money>;

    /// A variant with no sizes listed accepts any size.
    fn offers_size(&self, size: &str) -> bool {
        self.sizes().is_empty() || self.sizes().iter().any(|s| same_label(s, size))
    }

    /// Offer price when positive, else base price when positive.
    fn own_price(&self) -> Option<Money> {
        self.offer_price()
            .and_then(Money::positive)
            .or_else(|| self.price().and_then(Money::positive))
    }
}

impl PricedVariant for Variant {
    fn color(&self) -> &str {
        &self.color
    }

    fn sizes(&self) -> &[String] {
        &self.sizes
    }

    fn price(&self) -> Option<Money> {
        self.price
    }

    fn offer_price(&self) -> Option<Money> {
        self.offer_price
    }

    fn size_prices(&self) -> &SizeMap<Money> {
        &self.size_prices
    }
}

/// The pricing half of a [`Variant`], frozen into cart lines.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VariantPricing {
    pub color: String,
    pub sizes: Vec<String>,
    pub price: Option<Money>,
    pub offer_price: Option<Money>,
    pub size_prices: SizeMap<Money>,
}

impl From<&Variant> for VariantPricing {
    fn from(v: &Variant) -> Self {
        Self {
            color: v.color.clone(),
            sizes: v.sizes.clone(),
            price: v.price,
            offer_price: v.offer_price,
            size_prices: v.size_prices.clone(),
        }
    }
}

impl PricedVariant for VariantPricing {
    fn color(&self) -> &str {
        &self.color
    }

    fn sizes(&self) -> &[String] {
        &self.sizes
    }

    fn price(&self) -> Option<Money> {
        self.price
    }

    fn offer_price(&self) -> Option<Money> {
        self.offer_price
    }

    fn size_prices(&self) -> &SizeMap<Money> {
        &self.size_prices
    }
}

/// Snapshot of everything needed to re-price a product selection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PricingInfo {
    pub base: BasePricing,
    pub variants: Vec<VariantPricing>,
}

impl PricingInfo {
    /// Freeze a product's current pricing.
    pub fn from_product(product: &Product) -> Self {
        Self {
            base: product.pricing.clone(),
            variants: product.variants.iter().map(VariantPricing::from).collect(),
        }
    }

    /// Price a selection against the snapshot.
    pub fn price_for(&self, color: Option<&str>, size: Option<&str>) -> Money {
        resolve_price(&self.base, &self.variants, color, size)
    }
}

/// Resolve the unit price of a selection. Never fails; the last resort is
/// the base pricing's selling price.
pub fn resolve_price<V: PricedVariant>(
    base: &BasePricing,
    variants: &[V],
    color: Option<&str>,
    size: Option<&str>,
) -> Money {
    let selected = color.and_then(|color| {
        variants.iter().find(|v| {
            same_label(v.color(), color) && size.map_or(true, |size| v.offers_size(size))
        })
    });

    if let Some(variant) = selected {
        let size_price = size.and_then(|size| variant.size_prices().get(size).copied());
        if let Some(price) = size_price.and_then(Money::positive) {
            return price;
        }
        if let Some(price) = variant.own_price() {
            return price;
        }
    }

    let product_size_price = size
        .zip(base.size_prices.as_ref())
        .and_then(|(size, prices)| prices.get(size).copied());
    if let Some(price) = product_size_price.and_then(Money::positive) {
        return price;
    }

    base.selling_price()
}

/// Unit price of a product for an optional colour and size.
pub fn price_for(product: &Product, color: Option<&str>, size: Option<&str>) -> Money {
    resolve_price(&product.pricing, &product.variants, color, size)
}

/// The price label of a product card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceDisplay {
    pub min: Money,
    pub max: Money,
    /// Number of distinct prices across every priced source.
    pub distinct: usize,
}

impl PriceDisplay {
    pub fn is_range(&self) -> bool {
        self.distinct > 1
    }

    /// `"₹400.00"`, or `"From ₹400.00"` when several prices exist.
    pub fn label(&self) -> String {
        if self.is_range() {
            format!("From {}", self.min.display())
        } else {
            self.min.display()
        }
    }
}

/// Collect every positive price a product can sell at and summarize them.
pub fn display_price(product: &Product) -> PriceDisplay {
    let mut amounts: Vec<Money> = Vec::new();

    if let Some(size_prices) = &product.pricing.size_prices {
        amounts.extend(size_prices.values().copied());
    }
    for variant in &product.variants {
        amounts.extend(variant.own_price());
        amounts.extend(variant.size_prices.values().copied());
    }
    amounts.push(product.pricing.selling_price());
    amounts.retain(Money::is_positive);

    let mut cents: Vec<i64> = amounts.iter().map(|m| m.amount_minor).collect();
    cents.sort_unstable();
    cents.dedup();

    let currency = product.currency();
    match (cents.first(), cents.last()) {
        (Some(&min), Some(&max)) => PriceDisplay {
            min: Money::new(min, currency),
            max: Money::new(max, currency),
            distinct: cents.len(),
        },
        _ => {
            let base = product.pricing.selling_price();
            PriceDisplay {
                min: base,
                max: base,
                distinct: 1,
            }
        }
    }
}

impl Product {
    /// See [`price_for`].
    pub fn price_for(&self, color: Option<&str>, size: Option<&str>) -> Money {
        price_for(self, color, size)
    }

    /// See [`display_price`].
    pub fn display_price(&self) -> PriceDisplay {
        display_price(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::money::Currency;

    fn inr(major: i64) -> Money {
        Money::from_major(major, Currency::INR)
    }

    fn tee() -> Product {
        let mut product = Product::new("p1", "acme", "Tee", inr(300));
        let mut red = Variant::new("Red", 5);
        red.sizes = vec!["M".into(), "L".into()];
        red.price = Some(inr(400));
        red.size_prices = [("M", inr(500))].into_iter().collect();
        product.variants.push(red);
        product
    }

    #[test]
    fn test_variant_size_price_wins() {
        let product = tee();
        assert_eq!(product.price_for(Some("Red"), Some("M")), inr(500));
        assert_eq!(product.price_for(Some("red"), Some("m")), inr(500));
    }

    #[test]
    fn test_variant_base_price_for_size_without_entry() {
        assert_eq!(tee().price_for(Some("Red"), Some("L")), inr(400));
    }

    #[test]
    fn test_variant_offer_price_beats_variant_price() {
        let mut product = tee();
        product.variants[0].offer_price = Some(inr(350));
        assert_eq!(product.price_for(Some("Red"), Some("L")), inr(350));
        assert_eq!(product.price_for(Some("Red"), None), inr(350));
    }

    #[test]
    fn test_variant_not_offering_size_falls_back_to_product() {
        let mut product = tee();
        product.pricing.size_prices = Some([("XL", inr(650))].into_iter().collect());

        assert_eq!(product.price_for(Some("Red"), Some("XL")), inr(650));
        assert_eq!(product.price_for(Some("Red"), Some("XS")), inr(300));
    }

    #[test]
    fn test_product_size_price_without_color() {
        let mut product = tee();
        product.pricing.size_prices = Some([("m", inr(320))].into_iter().collect());
        assert_eq!(product.price_for(None, Some("M")), inr(320));
    }

    #[test]
    fn test_zero_prices_fall_through() {
        let mut product = tee();
        product.variants[0].size_prices = [("M", inr(0))].into_iter().collect();
        product.variants[0].price = None;
        product.pricing.offer_price = Some(inr(280));

        assert_eq!(product.price_for(Some("Red"), Some("M")), inr(280));
    }

    #[test]
    fn test_never_non_positive_when_base_positive() {
        let product = tee();
        for color in [None, Some("Red"), Some("Blue")] {
            for size in [None, Some("M"), Some("L"), Some("XXL")] {
                assert!(product.price_for(color, size).is_positive());
            }
        }
    }

    #[test]
    fn test_snapshot_matches_live_product() {
        let product = tee();
        let info = PricingInfo::from_product(&product);
        assert_eq!(info.price_for(Some("Red"), Some("M")), product.price_for(Some("Red"), Some("M")));
        assert_eq!(info.price_for(None, None), inr(300));
    }

    #[test]
    fn test_display_price_range() {
        let display = tee().display_price();
        assert_eq!(display.min, inr(300));
        assert_eq!(display.max, inr(500));
        assert_eq!(display.distinct, 3);
        assert_eq!(display.label(), "From \u{20b9}300.00");
    }

    #[test]
    fn test_display_price_single() {
        let product = Product::new("p2", "acme", "Mug", inr(250));
        let display = product.display_price();
        assert!(!display.is_range());
        assert_eq!(display.label(), "\u{20b9}250.00");
    }

    #[test]
    fn test_display_price_all_zero() {
        let product = Product::new("p3", "acme", "Free", Money::zero(Currency::INR));
        let display = product.display_price();
        assert_eq!(display.min, Money::zero(Currency::INR));
        assert_eq!(display.distinct, 1);
    }
}

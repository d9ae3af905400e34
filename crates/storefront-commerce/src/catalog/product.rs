//! Canonical product and variant types, and the normalization boundary.

use crate::catalog::raw::{
    parse_amount, parse_flag, parse_list, parse_object, parse_quantity, parse_string,
    parse_variants, RawProduct, RawVariant,
};
use crate::catalog::size_map::{same_label, SizeMap};
use crate::ids::{ProductId, TenantId};
use crate::money::{Currency, Money};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Product-level pricing: base price, offer price and optional size prices.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BasePricing {
    /// Base (list) price.
    pub price: Money,
    /// Offer price (`compareAtPrice` on the wire); set only when positive.
    pub offer_price: Option<Money>,
    /// Per-size prices; `Some` only when size-based pricing is switched on.
    pub size_prices: Option<SizeMap<Money>>,
}

impl BasePricing {
    /// Pricing with a single flat price.
    pub fn flat(price: Money) -> Self {
        Self {
            price,
            offer_price: None,
            size_prices: None,
        }
    }

    /// The price a shopper pays with no size selected: the offer price when
    /// positive, otherwise the base price.
    pub fn selling_price(&self) -> Money {
        self.offer_price
            .and_then(Money::positive)
            .unwrap_or(self.price)
    }

    /// The struck-through price shown next to an offer.
    pub fn original_price(&self) -> Option<Money> {
        let offer = self.offer_price?.positive()?;
        let base = self.price.positive()?;
        (base != offer).then_some(base)
    }

    /// Discount of the offer price against the base price, in percent.
    pub fn discount_percentage(&self) -> Option<f64> {
        let offer = self.offer_price?;
        if self.price.amount_minor > offer.amount_minor && offer.is_positive() {
            let savings = self.price.amount_minor - offer.amount_minor;
            Some((savings as f64 / self.price.amount_minor as f64) * 100.0)
        } else {
            None
        }
    }

    pub fn has_size_pricing(&self) -> bool {
        self.size_prices.is_some()
    }
}

/// Where a variant-less product gets its stock from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProductStock {
    /// Only an availability flag; `true` means in stock with no count.
    Availability(bool),
    /// Per-size quantities.
    BySize(SizeMap<i64>),
}

impl Default for ProductStock {
    fn default() -> Self {
        ProductStock::Availability(true)
    }
}

/// A variant's stock: one count, or one count per size.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum VariantStock {
    Flat(i64),
    BySize(SizeMap<i64>),
}

impl VariantStock {
    /// Total units across sizes.
    pub fn total(&self) -> i64 {
        match self {
            VariantStock::Flat(n) => *n,
            VariantStock::BySize(map) => sum_quantities(map.values().copied()),
        }
    }
}

/// Sum stock counts, saturating at `i64::MAX`.
pub(crate) fn sum_quantities(quantities: impl IntoIterator<Item = i64>) -> i64 {
    quantities.into_iter().fold(0, i64::saturating_add)
}

/// A colour/size combination with its own pricing and stock.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Variant {
    pub color: String,
    /// Sizes offered; empty means the variant is not size-specific.
    pub sizes: Vec<String>,
    pub price: Option<Money>,
    pub offer_price: Option<Money>,
    pub size_prices: SizeMap<Money>,
    pub stock: VariantStock,
}

impl Variant {
    /// A variant of one colour with a flat stock count.
    pub fn new(color: impl Into<String>, stock: i64) -> Self {
        Self {
            color: color.into(),
            sizes: Vec::new(),
            price: None,
            offer_price: None,
            size_prices: SizeMap::new(),
            stock: VariantStock::Flat(stock.max(0)),
        }
    }

    pub fn matches_color(&self, color: &str) -> bool {
        same_label(&self.color, color)
    }

    /// Whether this variant can be bought in `size`.
    pub fn offers_size(&self, size: &str) -> bool {
        self.sizes.is_empty() || self.sizes.iter().any(|s| same_label(s, size))
    }

    /// Stock for one size of this variant.
    pub fn stock_for_size(&self, size: &str) -> i64 {
        match &self.stock {
            VariantStock::BySize(map) => map.get(size).copied().unwrap_or(0),
            VariantStock::Flat(n) if self.offers_size(size) => *n,
            VariantStock::Flat(_) => 0,
        }
    }
}

/// A sellable catalog entry in canonical form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    /// Storefront tenant that owns the product.
    pub owner_id: TenantId,
    pub name: String,
    pub slug: Option<String>,
    pub image: Option<String>,
    /// Colours listed on the product itself.
    pub colors: Vec<String>,
    /// Sizes listed on the product itself.
    pub sizes: Vec<String>,
    pub pricing: BasePricing,
    /// Stock source used when the product has no variants.
    pub stock: ProductStock,
    pub variants: Vec<Variant>,
}

impl Product {
    /// Create a product with a flat price, no variants, and default stock.
    pub fn new(
        id: impl Into<ProductId>,
        owner_id: impl Into<TenantId>,
        name: impl Into<String>,
        price: Money,
    ) -> Self {
        Self {
            id: id.into(),
            owner_id: owner_id.into(),
            name: name.into(),
            slug: None,
            image: None,
            colors: Vec::new(),
            sizes: Vec::new(),
            pricing: BasePricing::flat(price),
            stock: ProductStock::default(),
            variants: Vec::new(),
        }
    }

    /// Parse a backend product record and normalize it.
    pub fn from_json(json: &str, currency: Currency) -> Result<Self, serde_json::Error> {
        let raw: RawProduct = serde_json::from_str(json)?;
        Ok(normalize_product(raw, currency))
    }

    pub fn has_variants(&self) -> bool {
        !self.variants.is_empty()
    }

    pub fn currency(&self) -> Currency {
        self.pricing.price.currency
    }

    /// Variants of a colour, in catalog order.
    pub fn variants_for_color<'a>(&'a self, color: &'a str) -> impl Iterator<Item = &'a Variant> {
        self.variants.iter().filter(move |v| v.matches_color(color))
    }
}

/// Normalize a backend record into a [`Product`].
///
/// This is the only place loosely-typed fields are interpreted. It never
/// fails: unreadable prices become zero, unreadable stock maps become
/// empty, and malformed variants are skipped.
pub fn normalize_product(raw: RawProduct, currency: Currency) -> Product {
    let id = parse_string(&raw.id).unwrap_or_default();
    let owner_id = parse_string(&raw.owner_id).unwrap_or_default();

    let size_pricing = parse_flag(&raw.has_size_pricing).unwrap_or(false);
    let pricing = BasePricing {
        price: money_or_zero(&raw.price, currency),
        offer_price: positive_money(&raw.compare_at_price, currency),
        size_prices: size_pricing.then(|| parse_size_prices(&raw.size_prices, currency)),
    };

    let size_stocks = parse_size_stocks(&raw.size_stocks);
    let stock = if size_stocks.is_empty() {
        ProductStock::Availability(parse_flag(&raw.available) != Some(false))
    } else {
        ProductStock::BySize(size_stocks)
    };

    let variants = parse_variants(&raw.variants)
        .into_iter()
        .map(|v| normalize_variant(v, currency))
        .collect::<Vec<_>>();

    tracing::trace!(product_id = %id, variants = variants.len(), "normalized product");

    Product {
        id: ProductId::new(id),
        owner_id: TenantId::new(owner_id),
        name: raw.name.unwrap_or_default(),
        slug: raw.slug.filter(|s| !s.trim().is_empty()),
        image: raw.image.filter(|s| !s.trim().is_empty()),
        colors: parse_list(&raw.colors),
        sizes: parse_list(&raw.sizes),
        pricing,
        stock,
        variants,
    }
}

fn normalize_variant(raw: RawVariant, currency: Currency) -> Variant {
    let size_stocks = parse_size_stocks(&raw.size_stocks);
    let stock = if size_stocks.is_empty() {
        VariantStock::Flat(parse_quantity(&raw.stock).unwrap_or(0))
    } else {
        VariantStock::BySize(size_stocks)
    };

    Variant {
        color: parse_string(&raw.color).unwrap_or_default(),
        sizes: parse_list(&raw.sizes),
        price: positive_money(&raw.price, currency),
        offer_price: positive_money(&raw.compare_at_price, currency),
        size_prices: parse_size_prices(&raw.size_prices, currency),
        stock,
    }
}

fn money_or_zero(value: &Value, currency: Currency) -> Money {
    parse_amount(value)
        .map(|amount| Money::from_decimal(amount, currency))
        .unwrap_or_else(|| Money::zero(currency))
}

fn positive_money(value: &Value, currency: Currency) -> Option<Money> {
    money_or_zero(value, currency).positive()
}

fn parse_size_prices(value: &Value, currency: Currency) -> SizeMap<Money> {
    let Some(map) = parse_object(value) else {
        return SizeMap::new();
    };
    map.iter()
        .filter_map(|(size, v)| {
            parse_amount(v).map(|amount| (size.clone(), Money::from_decimal(amount, currency)))
        })
        .collect()
}

fn parse_size_stocks(value: &Value) -> SizeMap<i64> {
    let Some(map) = parse_object(value) else {
        return SizeMap::new();
    };
    map.iter()
        .map(|(size, v)| (size.clone(), parse_quantity(v).unwrap_or(0)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn normalize(value: serde_json::Value) -> Product {
        normalize_product(serde_json::from_value(value).unwrap(), Currency::INR)
    }

    #[test]
    fn test_normalize_minimal_product() {
        let product = normalize(json!({ "id": "p1", "userId": "acme", "name": "Tee", "price": 499 }));

        assert_eq!(product.id.as_str(), "p1");
        assert_eq!(product.owner_id.as_str(), "acme");
        assert_eq!(product.pricing.price, Money::from_major(499, Currency::INR));
        assert_eq!(product.pricing.offer_price, None);
        assert_eq!(product.stock, ProductStock::Availability(true));
        assert!(!product.has_variants());
    }

    #[test]
    fn test_normalize_mixed_shapes() {
        let product = normalize(json!({
            "id": 42,
            "price": "600",
            "compareAtPrice": "450.50",
            "hasSizePricing": "true",
            "sizePrices": "{\"m\": 650, \"L\": \"700\"}",
            "sizes": "S, M, L",
            "colors": ["Red", "red", "Blue"],
            "sizeStocks": { "S": 0, "M": "3" }
        }));

        assert_eq!(product.id.as_str(), "42");
        assert_eq!(product.pricing.offer_price, Some(Money::new(45050, Currency::INR)));
        let size_prices = product.pricing.size_prices.as_ref().unwrap();
        assert_eq!(size_prices.get("M"), Some(&Money::from_major(650, Currency::INR)));
        assert_eq!(size_prices.get("l"), Some(&Money::from_major(700, Currency::INR)));
        assert_eq!(product.sizes, vec!["S", "M", "L"]);
        assert_eq!(product.colors, vec!["Red", "Blue"]);
        match &product.stock {
            ProductStock::BySize(map) => assert_eq!(map.get("m"), Some(&3)),
            other => panic!("unexpected stock {:?}", other),
        }
    }

    #[test]
    fn test_size_prices_ignored_without_flag() {
        let product = normalize(json!({ "price": 100, "sizePrices": { "M": 150 } }));
        assert!(!product.pricing.has_size_pricing());
    }

    #[test]
    fn test_normalize_variants() {
        let product = normalize(json!({
            "price": 400,
            "variants": [
                { "color": "Red", "sizes": "S,M", "price": 420, "stock": "5" },
                { "color": "Blue", "sizes": ["M"], "sizeStocks": "{\"M\": 2}" },
                { "color": "Green", "sizeStocks": "not json" }
            ]
        }));

        assert_eq!(product.variants.len(), 3);
        assert_eq!(product.variants[0].sizes, vec!["S", "M"]);
        assert_eq!(product.variants[0].stock, VariantStock::Flat(5));
        assert_eq!(product.variants[0].price, Some(Money::from_major(420, Currency::INR)));
        assert_eq!(product.variants[1].stock.total(), 2);
        assert_eq!(product.variants[2].stock, VariantStock::Flat(0));
    }

    #[test]
    fn test_available_false() {
        let product = normalize(json!({ "price": 100, "available": false }));
        assert_eq!(product.stock, ProductStock::Availability(false));
    }

    #[test]
    fn test_original_price_and_discount() {
        let pricing = BasePricing {
            price: Money::from_major(1000, Currency::INR),
            offer_price: Some(Money::from_major(750, Currency::INR)),
            size_prices: None,
        };
        assert_eq!(pricing.selling_price(), Money::from_major(750, Currency::INR));
        assert_eq!(pricing.original_price(), Some(Money::from_major(1000, Currency::INR)));
        assert!((pricing.discount_percentage().unwrap() - 25.0).abs() < 0.01);

        let flat = BasePricing::flat(Money::from_major(1000, Currency::INR));
        assert_eq!(flat.original_price(), None);
        assert_eq!(flat.discount_percentage(), None);
    }

    #[test]
    fn test_variant_stock_for_size() {
        let mut variant = Variant::new("Red", 4);
        variant.sizes = vec!["S".to_string(), "M".to_string()];
        assert_eq!(variant.stock_for_size("m"), 4);
        assert_eq!(variant.stock_for_size("XL"), 0);

        variant.stock = VariantStock::BySize([("S", 0), ("M", 2)].into_iter().collect());
        assert_eq!(variant.stock_for_size("M"), 2);
        assert_eq!(variant.stock.total(), 2);
    }

    #[test]
    fn test_from_json() {
        let product = Product::from_json(r#"{"id":"p9","price":250}"#, Currency::INR).unwrap();
        assert_eq!(product.pricing.selling_price(), Money::from_major(250, Currency::INR));
        assert!(Product::from_json("42", Currency::INR).is_err());
    }
}

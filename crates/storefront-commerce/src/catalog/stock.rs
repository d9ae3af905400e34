//! Stock aggregation for product cards.

use crate::catalog::product::{sum_quantities, Product, ProductStock, VariantStock};
use crate::catalog::size_map::same_label;
use serde::{Deserialize, Serialize};

/// Total stock at or below which a product shows a "low stock" badge.
pub const LOW_STOCK_THRESHOLD: i64 = 15;

/// Derived stock state of a product. Never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StockStatus {
    pub is_sold_out: bool,
    pub is_low_stock: bool,
    pub total_stock: i64,
    pub out_of_stock_sizes: Vec<String>,
    pub out_of_stock_colors: Vec<String>,
}

impl StockStatus {
    fn from_total(total_stock: i64, sizes: Vec<String>, colors: Vec<String>) -> Self {
        Self {
            is_sold_out: total_stock == 0,
            is_low_stock: total_stock > 0 && total_stock <= LOW_STOCK_THRESHOLD,
            total_stock,
            out_of_stock_sizes: sizes,
            out_of_stock_colors: colors,
        }
    }

    pub fn is_size_out_of_stock(&self, size: &str) -> bool {
        self.out_of_stock_sizes.iter().any(|s| same_label(s, size))
    }

    pub fn is_color_out_of_stock(&self, color: &str) -> bool {
        self.out_of_stock_colors.iter().any(|c| same_label(c, color))
    }
}

/// Compute the stock badge data for a product.
///
/// Variants win over the product's own stock fields. Without variants a
/// per-size map is summed; failing that the availability flag decides
/// between 0 and an unbounded 1.
pub fn compute_stock_status(product: &Product) -> StockStatus {
    if product.has_variants() {
        let mut by_color = Tally::default();
        let mut by_size = Tally::default();

        for variant in &product.variants {
            let variant_total = variant.stock.total();
            by_color.add(&variant.color, variant_total);

            match &variant.stock {
                VariantStock::BySize(map) => {
                    for (size, qty) in map.iter() {
                        by_size.add(size, *qty);
                    }
                }
                VariantStock::Flat(n) => {
                    for size in &variant.sizes {
                        by_size.add(size, *n);
                    }
                }
            }
        }

        return StockStatus::from_total(by_color.total(), by_size.exhausted(), by_color.exhausted());
    }

    match &product.stock {
        ProductStock::BySize(map) if !map.is_empty() => {
            let mut by_size = Tally::default();
            for (size, qty) in map.iter() {
                by_size.add(size, *qty);
            }
            StockStatus::from_total(by_size.total(), by_size.exhausted(), Vec::new())
        }
        ProductStock::Availability(false) => StockStatus::from_total(0, Vec::new(), Vec::new()),
        _ => StockStatus::from_total(1, Vec::new(), Vec::new()),
    }
}

/// Stock of one colour/size pairing across matching variants.
///
/// Returns `None` when no variant carries that colour and size; variant-less
/// products answer from their own size map or availability flag.
pub fn stock_for_selection(product: &Product, color: Option<&str>, size: Option<&str>) -> Option<i64> {
    if !product.has_variants() {
        return match (&product.stock, size) {
            (ProductStock::BySize(map), Some(size)) => map.get(size).copied(),
            (ProductStock::BySize(map), None) => Some(sum_quantities(map.values().copied())),
            (ProductStock::Availability(available), _) => Some(i64::from(*available)),
        };
    }

    let mut matched = false;
    let mut total = 0;
    for variant in &product.variants {
        if color.is_some_and(|c| !variant.matches_color(c)) {
            continue;
        }
        match size {
            Some(size) if variant.offers_size(size) => {
                total = sum_quantities([total, variant.stock_for_size(size)])
            }
            Some(_) => continue,
            None => total = sum_quantities([total, variant.stock.total()]),
        }
        matched = true;
    }
    matched.then_some(total)
}

impl Product {
    /// See [`compute_stock_status`].
    pub fn stock_status(&self) -> StockStatus {
        compute_stock_status(self)
    }

    /// See [`stock_for_selection`].
    pub fn variant_stock_for(&self, color: Option<&str>, size: Option<&str>) -> Option<i64> {
        stock_for_selection(self, color, size)
    }
}

/// Running per-label totals in first-seen order.
#[derive(Default)]
struct Tally {
    entries: Vec<(String, i64)>,
}

impl Tally {
    fn add(&mut self, label: &str, qty: i64) {
        let label = label.trim();
        if label.is_empty() {
            self.entries.push((String::new(), qty));
            return;
        }
        match self.entries.iter_mut().find(|(l, _)| same_label(l, label)) {
            Some((_, total)) => *total = total.saturating_add(qty),
            None => self.entries.push((label.to_string(), qty)),
        }
    }

    fn total(&self) -> i64 {
        sum_quantities(self.entries.iter().map(|(_, qty)| *qty))
    }

    /// Labels whose accumulated total is exactly zero.
    fn exhausted(&self) -> Vec<String> {
        self.entries
            .iter()
            .filter(|(label, qty)| *qty == 0 && !label.is_empty())
            .map(|(label, _)| label.clone())
            .collect()
    }
}

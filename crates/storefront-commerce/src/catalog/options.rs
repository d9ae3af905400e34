//! Colour and size dropdown options for product cards.
//!
//! Values listed on the product itself always come first; values that only
//! exist through variants follow in the order they first appear.

use crate::catalog::product::Product;
use crate::catalog::size_map::same_label;

/// Colours a shopper can choose from.
pub fn color_options(product: &Product) -> Vec<String> {
    let mut options = OptionList::default();
    options.extend(product.colors.iter());
    options.extend(product.variants.iter().map(|v| &v.color));
    options.into_vec()
}

/// Sizes a shopper can choose from, optionally narrowed to one colour.
///
/// With a colour selected only that colour's variant sizes are offered,
/// unless no variant carries the colour, in which case the product's own
/// sizes apply.
pub fn size_options(product: &Product, color: Option<&str>) -> Vec<String> {
    let mut options = OptionList::default();

    if let Some(color) = color {
        let mut matched = false;
        for variant in product.variants_for_color(color) {
            matched = true;
            options.extend(variant.sizes.iter());
        }
        if matched {
            return options.into_vec();
        }
        options.extend(product.sizes.iter());
        return options.into_vec();
    }

    options.extend(product.sizes.iter());
    for variant in &product.variants {
        options.extend(variant.sizes.iter());
    }
    options.into_vec()
}

#[derive(Default)]
struct OptionList {
    values: Vec<String>,
}

impl OptionList {
    fn extend<'a>(&mut self, values: impl Iterator<Item = &'a String>) {
        for value in values {
            let value = value.trim();
            if value.is_empty() || self.values.iter().any(|v| same_label(v, value)) {
                continue;
            }
            self.values.push(value.to_string());
        }
    }

    fn into_vec(self) -> Vec<String> {
        self.values
    }
}

impl Product {
    /// See [`color_options`].
    pub fn color_options(&self) -> Vec<String> {
        color_options(self)
    }

    /// See [`size_options`].
    pub fn size_options(&self, color: Option<&str>) -> Vec<String> {
        size_options(self, color)
    }
}

//! Cart totals.

use crate::ids::CartItemId;
use crate::money::Money;
use serde::{Deserialize, Serialize};

/// Totals for a cart.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CartPricing {
    /// Sum of every line total.
    pub subtotal: Money,
    /// Sum of quantities.
    pub item_count: i64,
    /// Per-item breakdown.
    pub line_items: Vec<LineItemPricing>,
}

impl CartPricing {
    /// Average price per unit across the cart.
    pub fn average_unit_price(&self) -> Money {
        if self.item_count == 0 {
            return Money::zero(self.subtotal.currency);
        }
        Money::new(
            self.subtotal.amount_minor / self.item_count,
            self.subtotal.currency,
        )
    }

    pub fn line(&self, id: &CartItemId) -> Option<&LineItemPricing> {
        self.line_items.iter().find(|l| &l.item_id == id)
    }
}

/// Totals for a single cart item.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LineItemPricing {
    pub item_id: CartItemId,
    pub unit_price: Money,
    pub quantity: i64,
    /// unit_price × quantity.
    pub total: Money,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::money::Currency;

    #[test]
    fn test_average_unit_price() {
        let pricing = CartPricing {
            subtotal: Money::new(90000, Currency::INR),
            item_count: 3,
            line_items: vec![],
        };
        assert_eq!(pricing.average_unit_price().amount_minor, 30000);
    }

    #[test]
    fn test_average_unit_price_empty() {
        let pricing = CartPricing {
            subtotal: Money::zero(Currency::INR),
            item_count: 0,
            line_items: vec![],
        };
        assert!(pricing.average_unit_price().is_zero());
    }

    #[test]
    fn test_line_lookup() {
        let id = CartItemId::new("p1-M-Red");
        let pricing = CartPricing {
            subtotal: Money::new(1000, Currency::INR),
            item_count: 2,
            line_items: vec![LineItemPricing {
                item_id: id.clone(),
                unit_price: Money::new(500, Currency::INR),
                quantity: 2,
                total: Money::new(1000, Currency::INR),
            }],
        };
        assert_eq!(pricing.line(&id).map(|l| l.quantity), Some(2));
        assert!(pricing.line(&CartItemId::new("other")).is_none());
    }
}

//! Cart and order arithmetic

use rust_decimal::{Decimal, RoundingStrategy};

use crate::model::{FulfillmentKind, OrderItem};

/// Fees applied on top of the cart subtotal
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Pricing {
    /// Flat fee, charged for delivery orders only
    pub delivery_fee: Decimal,
    /// Applied to subtotal plus fee
    pub tax_rate: Decimal,
}

impl Default for Pricing {
    fn default() -> Self {
        Self {
            delivery_fee: Decimal::new(599, 2),
            tax_rate: Decimal::new(8875, 5),
        }
    }
}

impl Pricing {
    pub fn quote(&self, cart: &[OrderItem], kind: FulfillmentKind) -> OrderQuote {
        let subtotal = cart_subtotal(cart);
        let delivery_fee = match kind {
            FulfillmentKind::Delivery => self.delivery_fee,
            FulfillmentKind::Takeaway => Decimal::ZERO,
        };
        let tax = (subtotal + delivery_fee) * self.tax_rate;
        OrderQuote {
            subtotal,
            delivery_fee,
            tax,
            total: subtotal + delivery_fee + tax,
        }
    }
}

/// Sum of unit price times quantity
pub fn cart_subtotal(cart: &[OrderItem]) -> Decimal {
    cart.iter().map(OrderItem::line_total).sum()
}

/// Breakdown shown at checkout; values are unrounded
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct OrderQuote {
    pub subtotal: Decimal,
    pub delivery_fee: Decimal,
    pub tax: Decimal,
    pub total: Decimal,
}

impl OrderQuote {
    /// The total stored on the order
    pub fn rounded_total(&self) -> Decimal {
        to_cents(self.total)
    }
}

/// Round to two decimal places, midpoint away from zero
pub fn to_cents(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Category, Id, MenuItem};

    fn entry(price: Decimal, quantity: u32) -> OrderItem {
        OrderItem {
            menu_item: MenuItem {
                id: Id::new(format!("item-{price}")),
                name: "Dish".into(),
                description: String::new(),
                price,
                category: Category::Dinner,
                image: String::new(),
                rating: 4.0,
                review_count: 0,
                popular: false,
            },
            quantity,
            special_instructions: None,
        }
    }

    #[test]
    fn test_subtotal() {
        let cart = vec![
            entry(Decimal::new(1250, 2), 2),
            entry(Decimal::new(450, 2), 1),
        ];
        assert_eq!(cart_subtotal(&cart), Decimal::new(2950, 2));
        assert_eq!(cart_subtotal(&[]), Decimal::ZERO);
    }

    #[test]
    fn test_subtotal_of_two_lines() {
        let cart = vec![
            entry(Decimal::new(1200, 2), 2),
            entry(Decimal::new(550, 2), 1),
        ];
        assert_eq!(cart_subtotal(&cart), Decimal::new(2950, 2));
    }

    #[test]
    fn test_delivery_quote() {
        let cart = vec![
            entry(Decimal::new(1250, 2), 2),
            entry(Decimal::new(450, 2), 1),
        ];
        let quote = Pricing::default().quote(&cart, FulfillmentKind::Delivery);

        assert_eq!(quote.subtotal, Decimal::new(2950, 2));
        assert_eq!(quote.delivery_fee, Decimal::new(599, 2));
        // (29.50 + 5.99) * 0.08875
        assert_eq!(quote.tax, Decimal::new(31497375, 7));
        assert_eq!(quote.rounded_total(), Decimal::new(3864, 2));
    }

    #[test]
    fn test_takeaway_has_no_fee() {
        let cart = vec![entry(Decimal::new(1000, 2), 1)];
        let quote = Pricing::default().quote(&cart, FulfillmentKind::Takeaway);

        assert_eq!(quote.delivery_fee, Decimal::ZERO);
        assert_eq!(quote.tax, Decimal::new(8875, 4));
        assert_eq!(quote.rounded_total(), Decimal::new(1089, 2));
    }

    #[test]
    fn test_to_cents_midpoint() {
        assert_eq!(to_cents(Decimal::new(10005, 3)), Decimal::new(1001, 2));
        assert_eq!(to_cents(Decimal::new(10004, 3)), Decimal::new(1000, 2));
    }
}

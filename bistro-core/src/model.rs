//! Domain entities of the storefront
//!
//! Entities are plain data. Collections that own them live in
//! [`Storefront`](crate::store::Storefront); the only way to change them
//! after creation is a dispatched [`StoreAction`](crate::action::StoreAction).

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Opaque entity identifier (`<prefix>-<token>`)
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Id(String);

impl Id {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Id {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Id {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for Id {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// Menu section an item belongs to
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Breakfast,
    Lunch,
    Dinner,
    Drinks,
    Desserts,
}

impl Category {
    pub const ALL: [Category; 5] = [
        Category::Breakfast,
        Category::Lunch,
        Category::Dinner,
        Category::Drinks,
        Category::Desserts,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Category::Breakfast => "breakfast",
            Category::Lunch => "lunch",
            Category::Dinner => "dinner",
            Category::Drinks => "drinks",
            Category::Desserts => "desserts",
        }
    }

    /// Human-readable section title
    pub fn label(self) -> &'static str {
        match self {
            Category::Breakfast => "Breakfast",
            Category::Lunch => "Lunch",
            Category::Dinner => "Dinner",
            Category::Drinks => "Drinks",
            Category::Desserts => "Desserts",
        }
    }

    pub fn next(self) -> Self {
        let idx = Self::ALL.iter().position(|c| *c == self).unwrap_or(0);
        Self::ALL[(idx + 1) % Self::ALL.len()]
    }

    pub fn prev(self) -> Self {
        let idx = Self::ALL.iter().position(|c| *c == self).unwrap_or(0);
        Self::ALL[(idx + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a string is not part of the category vocabulary
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown category `{0}`")]
pub struct UnknownCategory(pub String);

impl FromStr for Category {
    type Err = UnknownCategory;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| UnknownCategory(s.to_string()))
    }
}

/// Category selection used by the menu filter; `All` is never an item category
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum CategoryFilter {
    #[default]
    All,
    Only(Category),
}

impl CategoryFilter {
    pub fn matches(self, category: Category) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Only(c) => c == category,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            CategoryFilter::All => "All Items",
            CategoryFilter::Only(c) => c.label(),
        }
    }

    /// Cycle `All -> Breakfast -> ... -> Desserts -> All`
    pub fn next(self) -> Self {
        match self {
            CategoryFilter::All => CategoryFilter::Only(Category::ALL[0]),
            CategoryFilter::Only(Category::Desserts) => CategoryFilter::All,
            CategoryFilter::Only(c) => CategoryFilter::Only(c.next()),
        }
    }

    pub fn prev(self) -> Self {
        match self {
            CategoryFilter::All => CategoryFilter::Only(Category::Desserts),
            CategoryFilter::Only(Category::Breakfast) => CategoryFilter::All,
            CategoryFilter::Only(c) => CategoryFilter::Only(c.prev()),
        }
    }
}

impl fmt::Display for CategoryFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CategoryFilter::All => f.write_str("all"),
            CategoryFilter::Only(c) => c.fmt(f),
        }
    }
}

impl FromStr for CategoryFilter {
    type Err = UnknownCategory;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == "all" {
            Ok(CategoryFilter::All)
        } else {
            s.parse().map(CategoryFilter::Only)
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MenuItem {
    pub id: Id,
    pub name: String,
    pub description: String,
    pub price: Decimal,
    pub category: Category,
    pub image: String,
    /// Average rating, 0 to 5
    pub rating: f32,
    pub review_count: u32,
    #[serde(default)]
    pub popular: bool,
}

/// Partial update for a [`MenuItem`]; `None` fields keep their value
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MenuItemPatch {
    pub name: Option<String>,
    pub description: Option<String>,
    pub price: Option<Decimal>,
    pub category: Option<Category>,
    pub image: Option<String>,
    pub rating: Option<f32>,
    pub review_count: Option<u32>,
    pub popular: Option<bool>,
}

impl MenuItemPatch {
    /// Merge onto `item`, returning whether anything changed
    pub fn apply(self, item: &mut MenuItem) -> bool {
        let before = item.clone();
        if let Some(name) = self.name {
            item.name = name;
        }
        if let Some(description) = self.description {
            item.description = description;
        }
        if let Some(price) = self.price {
            item.price = price;
        }
        if let Some(category) = self.category {
            item.category = category;
        }
        if let Some(image) = self.image {
            item.image = image;
        }
        if let Some(rating) = self.rating {
            item.rating = rating;
        }
        if let Some(review_count) = self.review_count {
            item.review_count = review_count;
        }
        if let Some(popular) = self.popular {
            item.popular = popular;
        }
        *item != before
    }
}

/// A menu item snapshot with the quantity the customer wants
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct OrderItem {
    pub menu_item: MenuItem,
    pub quantity: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub special_instructions: Option<String>,
}

impl OrderItem {
    pub fn line_total(&self) -> Decimal {
        self.menu_item.price * Decimal::from(self.quantity)
    }
}

/// Contact details shared by orders and reservations
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Customer {
    pub name: String,
    pub email: String,
    pub phone: String,
}

/// Delivery or takeaway without the address payload
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum FulfillmentKind {
    #[default]
    Delivery,
    Takeaway,
}

impl FulfillmentKind {
    pub fn toggle(self) -> Self {
        match self {
            FulfillmentKind::Delivery => FulfillmentKind::Takeaway,
            FulfillmentKind::Takeaway => FulfillmentKind::Delivery,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            FulfillmentKind::Delivery => "Delivery",
            FulfillmentKind::Takeaway => "Takeaway",
        }
    }

    /// Customer-facing time estimate
    pub fn eta(self) -> &'static str {
        match self {
            FulfillmentKind::Delivery => "30-45 minutes",
            FulfillmentKind::Takeaway => "15-20 minutes",
        }
    }
}

/// How an order reaches the customer; only delivery carries an address
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Fulfillment {
    Delivery { address: String },
    Takeaway,
}

impl Fulfillment {
    pub fn kind(&self) -> FulfillmentKind {
        match self {
            Fulfillment::Delivery { .. } => FulfillmentKind::Delivery,
            Fulfillment::Takeaway => FulfillmentKind::Takeaway,
        }
    }

    pub fn address(&self) -> Option<&str> {
        match self {
            Fulfillment::Delivery { address } => Some(address),
            Fulfillment::Takeaway => None,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    #[default]
    Pending,
    Preparing,
    Ready,
    Completed,
    Cancelled,
}

impl OrderStatus {
    pub const ALL: [OrderStatus; 5] = [
        OrderStatus::Pending,
        OrderStatus::Preparing,
        OrderStatus::Ready,
        OrderStatus::Completed,
        OrderStatus::Cancelled,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            OrderStatus::Pending => "pending",
            OrderStatus::Preparing => "preparing",
            OrderStatus::Ready => "ready",
            OrderStatus::Completed => "completed",
            OrderStatus::Cancelled => "cancelled",
        }
    }

    /// The next step of the kitchen progression, if any
    pub fn next(self) -> Option<OrderStatus> {
        match self {
            OrderStatus::Pending => Some(OrderStatus::Preparing),
            OrderStatus::Preparing => Some(OrderStatus::Ready),
            OrderStatus::Ready => Some(OrderStatus::Completed),
            OrderStatus::Completed | OrderStatus::Cancelled => None,
        }
    }

    /// Transitions only move forward; staying put is allowed
    pub fn can_become(self, to: OrderStatus) -> bool {
        self == to
            || self.next() == Some(to)
            || (self == OrderStatus::Pending && to == OrderStatus::Cancelled)
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub id: Id,
    pub customer: Customer,
    pub items: Vec<OrderItem>,
    pub total: Decimal,
    pub fulfillment: Fulfillment,
    #[serde(default)]
    pub status: OrderStatus,
    pub created_at: DateTime<Utc>,
}

/// Partial update for an [`Order`]
#[derive(Clone, Debug, Default, PartialEq)]
pub struct OrderPatch {
    pub status: Option<OrderStatus>,
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
}

impl OrderPatch {
    pub fn status(status: OrderStatus) -> Self {
        Self {
            status: Some(status),
            ..Default::default()
        }
    }

    /// Merge onto `order`. An illegal status transition is skipped while
    /// the remaining fields still apply.
    pub fn apply(self, order: &mut Order) -> bool {
        let mut changed = false;
        if let Some(status) = self.status {
            if order.status.can_become(status) {
                changed |= order.status != status;
                order.status = status;
            } else {
                tracing::debug!(
                    order = %order.id,
                    from = %order.status,
                    to = %status,
                    "ignoring backwards order transition"
                );
            }
        }
        changed |= merge_field(&mut order.customer.name, self.name);
        changed |= merge_field(&mut order.customer.email, self.email);
        changed |= merge_field(&mut order.customer.phone, self.phone);
        changed
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReservationStatus {
    #[default]
    Pending,
    Confirmed,
    Cancelled,
}

impl ReservationStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            ReservationStatus::Pending => "pending",
            ReservationStatus::Confirmed => "confirmed",
            ReservationStatus::Cancelled => "cancelled",
        }
    }

    pub fn can_become(self, to: ReservationStatus) -> bool {
        self == to || self == ReservationStatus::Pending
    }
}

impl fmt::Display for ReservationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reservation {
    pub id: Id,
    pub customer: Customer,
    pub date: NaiveDate,
    pub time: NaiveTime,
    pub guests: u8,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub special_requests: Option<String>,
    #[serde(default)]
    pub status: ReservationStatus,
    pub created_at: DateTime<Utc>,
}

/// Partial update for a [`Reservation`]
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ReservationPatch {
    pub status: Option<ReservationStatus>,
    pub date: Option<NaiveDate>,
    pub time: Option<NaiveTime>,
    pub guests: Option<u8>,
    pub special_requests: Option<String>,
}

impl ReservationPatch {
    pub fn status(status: ReservationStatus) -> Self {
        Self {
            status: Some(status),
            ..Default::default()
        }
    }

    pub fn apply(self, reservation: &mut Reservation) -> bool {
        let mut changed = false;
        if let Some(status) = self.status {
            if reservation.status.can_become(status) {
                changed |= reservation.status != status;
                reservation.status = status;
            } else {
                tracing::debug!(
                    reservation = %reservation.id,
                    from = %reservation.status,
                    to = %status,
                    "ignoring backwards reservation transition"
                );
            }
        }
        changed |= merge_field(&mut reservation.date, self.date);
        changed |= merge_field(&mut reservation.time, self.time);
        changed |= merge_field(&mut reservation.guests, self.guests);
        if let Some(requests) = self.special_requests {
            let requests = Some(requests).filter(|r| !r.trim().is_empty());
            changed |= reservation.special_requests != requests;
            reservation.special_requests = requests;
        }
        changed
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Review {
    pub id: Id,
    pub customer_name: String,
    /// 1 to 5 stars
    pub rating: u8,
    pub comment: String,
    pub date: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub menu_item_id: Option<Id>,
}

fn merge_field<T: PartialEq>(slot: &mut T, value: Option<T>) -> bool {
    match value {
        Some(value) if *slot != value => {
            *slot = value;
            true
        }
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_filter_cycles_through_all() {
        let mut filter = CategoryFilter::All;
        let mut seen = vec![filter];
        for _ in 0..6 {
            filter = filter.next();
            seen.push(filter);
        }
        assert_eq!(seen[1], CategoryFilter::Only(Category::Breakfast));
        assert_eq!(seen[5], CategoryFilter::Only(Category::Desserts));
        assert_eq!(seen[6], CategoryFilter::All);
        assert_eq!(CategoryFilter::All.prev(), CategoryFilter::Only(Category::Desserts));
    }

    #[test]
    fn test_category_filter_parse() {
        assert_eq!("all".parse::<CategoryFilter>(), Ok(CategoryFilter::All));
        assert_eq!(
            "dinner".parse::<CategoryFilter>(),
            Ok(CategoryFilter::Only(Category::Dinner))
        );
        assert!("brunch".parse::<CategoryFilter>().is_err());
        assert!("all".parse::<Category>().is_err());
    }

    #[test]
    fn test_order_status_moves_forward_only() {
        use OrderStatus::*;
        assert!(Pending.can_become(Preparing));
        assert!(Preparing.can_become(Ready));
        assert!(Ready.can_become(Completed));
        assert!(Pending.can_become(Cancelled));
        assert!(Ready.can_become(Ready));

        assert!(!Preparing.can_become(Pending));
        assert!(!Completed.can_become(Pending));
        assert!(!Preparing.can_become(Cancelled));
        assert!(!Pending.can_become(Ready));
    }

    #[test]
    fn test_reservation_status_leaves_pending_once() {
        use ReservationStatus::*;
        assert!(Pending.can_become(Confirmed));
        assert!(Pending.can_become(Cancelled));
        assert!(!Confirmed.can_become(Pending));
        assert!(!Cancelled.can_become(Confirmed));
    }

    #[test]
    fn test_fulfillment_serde_shape() {
        let json = serde_json::to_value(Fulfillment::Delivery {
            address: "1 Main St".into(),
        })
        .unwrap();
        assert_eq!(json["type"], "delivery");
        assert_eq!(json["address"], "1 Main St");

        let takeaway: Fulfillment = serde_json::from_str(r#"{"type":"takeaway"}"#).unwrap();
        assert_eq!(takeaway.address(), None);
    }
}

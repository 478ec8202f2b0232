//! Initial storefront data
//!
//! The bundled seed ships inside the crate; an alternative JSON document with
//! the same shape can be loaded from disk.

use std::collections::HashSet;
use std::path::Path;

use serde::Deserialize;

use crate::error::SeedError;
use crate::model::{Id, MenuItem, Order, Reservation, Review};

const BUNDLED: &str = include_str!("../data/seed.json");

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct Seed {
    #[serde(default)]
    pub menu: Vec<MenuItem>,
    #[serde(default)]
    pub reservations: Vec<Reservation>,
    #[serde(default)]
    pub orders: Vec<Order>,
    #[serde(default)]
    pub reviews: Vec<Review>,
}

impl Seed {
    /// The seed bundled with the crate
    pub fn bundled() -> Result<Self, SeedError> {
        Self::from_json(BUNDLED)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, SeedError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|source| SeedError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&raw)
    }

    pub fn from_json(raw: &str) -> Result<Self, SeedError> {
        let seed: Seed = serde_json::from_str(raw)?;
        seed.check_unique_ids()?;
        tracing::debug!(
            menu = seed.menu.len(),
            reservations = seed.reservations.len(),
            orders = seed.orders.len(),
            reviews = seed.reviews.len(),
            "seed loaded"
        );
        Ok(seed)
    }

    fn check_unique_ids(&self) -> Result<(), SeedError> {
        unique("menu", self.menu.iter().map(|i| &i.id))?;
        unique("reservation", self.reservations.iter().map(|r| &r.id))?;
        unique("order", self.orders.iter().map(|o| &o.id))?;
        unique("review", self.reviews.iter().map(|r| &r.id))
    }
}

fn unique<'a>(
    collection: &'static str,
    ids: impl Iterator<Item = &'a Id>,
) -> Result<(), SeedError> {
    let mut seen = HashSet::new();
    for id in ids {
        if !seen.insert(id) {
            return Err(SeedError::DuplicateId {
                collection,
                id: id.clone(),
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Category, Fulfillment, OrderStatus};
    use rust_decimal::Decimal;

    #[test]
    fn test_bundled_seed_loads() {
        let seed = Seed::bundled().unwrap();
        assert!(!seed.menu.is_empty());
        for category in Category::ALL {
            assert!(
                seed.menu.iter().any(|i| i.category == category),
                "no {category} items in seed"
            );
        }
        assert!(seed.menu.iter().any(|i| i.popular));
        assert!(seed.reviews.len() >= 3);
    }

    #[test]
    fn test_bundled_seed_orders() {
        let seed = Seed::bundled().unwrap();
        let delivery = seed.orders.iter().find(|o| o.id.as_str() == "ord-1").unwrap();
        assert_eq!(
            delivery.fulfillment,
            Fulfillment::Delivery {
                address: "42 Harbor Lane".into()
            }
        );
        assert_eq!(delivery.status, OrderStatus::Preparing);
        assert_eq!(delivery.total, Decimal::new(3810, 2));
    }

    #[test]
    fn test_duplicate_ids_rejected() {
        let raw = r#"{
            "reviews": [
                {"id": "rev-1", "customer_name": "A", "rating": 5, "comment": "x", "date": "2024-01-01"},
                {"id": "rev-1", "customer_name": "B", "rating": 4, "comment": "y", "date": "2024-01-02"}
            ]
        }"#;
        let err = Seed::from_json(raw).unwrap_err();
        assert!(matches!(
            err,
            SeedError::DuplicateId { collection: "review", .. }
        ));
    }

    #[test]
    fn test_malformed_seed() {
        assert!(matches!(Seed::from_json("{"), Err(SeedError::Parse(_))));
        assert!(matches!(
            Seed::from_path("/nonexistent/seed.json"),
            Err(SeedError::Read { .. })
        ));
    }
}

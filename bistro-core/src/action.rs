//! Action traits and the store-level action set

use std::fmt::Debug;

use crate::model::{
    CategoryFilter, Id, MenuItem, MenuItemPatch, Order, OrderPatch, Reservation,
    ReservationPatch, Review,
};

/// Marker trait for actions that can be dispatched
///
/// Actions represent intents to change state. They should be:
/// - Clone: Actions may be logged, replayed, or sent to multiple handlers
/// - Debug: For debugging and logging
/// - Send + 'static: Async tasks send them back to the main loop
pub trait Action: Clone + Debug + Send + 'static {
    /// Get the action name for logging and filtering
    fn name(&self) -> &'static str;
}

/// Grouping of actions by the slice of state they touch
pub trait ActionCategory: Action {
    /// Category name, `None` for global actions
    fn category(&self) -> Option<&'static str>;
}

/// Concise one-line description for logs
///
/// The default is the `Debug` output; data-heavy actions override it.
pub trait ActionSummary: Action {
    fn summary(&self) -> String {
        format!("{:?}", self)
    }
}

/// Every mutation the store accepts
///
/// Naming follows `<Slice><Verb>`: the prefix is the category, the verb is
/// what happens to it.
#[derive(Clone, Debug, PartialEq)]
pub enum StoreAction {
    /// Add `quantity` of `item`; merges with an existing cart entry
    CartAdd {
        item: MenuItem,
        quantity: u32,
        instructions: Option<String>,
    },
    CartRemove(Id),
    /// Set the quantity of a cart entry; zero removes it
    CartQuantitySet {
        item_id: Id,
        quantity: u32,
    },
    CartClear,

    ReservationAdd(Reservation),
    ReservationUpdate {
        id: Id,
        patch: ReservationPatch,
    },

    OrderAdd(Order),
    OrderUpdate {
        id: Id,
        patch: OrderPatch,
    },

    ReviewAdd(Review),

    FilterSearchSet(String),
    FilterCategorySet(CategoryFilter),

    MenuItemAdd(MenuItem),
    MenuItemUpdate {
        id: Id,
        patch: MenuItemPatch,
    },
    MenuItemDelete(Id),
}

impl Action for StoreAction {
    fn name(&self) -> &'static str {
        match self {
            StoreAction::CartAdd { .. } => "CartAdd",
            StoreAction::CartRemove(_) => "CartRemove",
            StoreAction::CartQuantitySet { .. } => "CartQuantitySet",
            StoreAction::CartClear => "CartClear",
            StoreAction::ReservationAdd(_) => "ReservationAdd",
            StoreAction::ReservationUpdate { .. } => "ReservationUpdate",
            StoreAction::OrderAdd(_) => "OrderAdd",
            StoreAction::OrderUpdate { .. } => "OrderUpdate",
            StoreAction::ReviewAdd(_) => "ReviewAdd",
            StoreAction::FilterSearchSet(_) => "FilterSearchSet",
            StoreAction::FilterCategorySet(_) => "FilterCategorySet",
            StoreAction::MenuItemAdd(_) => "MenuItemAdd",
            StoreAction::MenuItemUpdate { .. } => "MenuItemUpdate",
            StoreAction::MenuItemDelete(_) => "MenuItemDelete",
        }
    }
}

impl ActionCategory for StoreAction {
    fn category(&self) -> Option<&'static str> {
        Some(match self {
            StoreAction::CartAdd { .. }
            | StoreAction::CartRemove(_)
            | StoreAction::CartQuantitySet { .. }
            | StoreAction::CartClear => "cart",
            StoreAction::ReservationAdd(_) | StoreAction::ReservationUpdate { .. } => {
                "reservation"
            }
            StoreAction::OrderAdd(_) | StoreAction::OrderUpdate { .. } => "order",
            StoreAction::ReviewAdd(_) => "review",
            StoreAction::FilterSearchSet(_) | StoreAction::FilterCategorySet(_) => "filter",
            StoreAction::MenuItemAdd(_)
            | StoreAction::MenuItemUpdate { .. }
            | StoreAction::MenuItemDelete(_) => "menu_item",
        })
    }
}

/// Entity payloads are large; log ids instead
impl ActionSummary for StoreAction {
    fn summary(&self) -> String {
        match self {
            StoreAction::CartAdd { item, quantity, .. } => {
                format!("CartAdd {{ item: {}, quantity: {} }}", item.id, quantity)
            }
            StoreAction::ReservationAdd(r) => {
                format!("ReservationAdd {{ id: {}, guests: {} }}", r.id, r.guests)
            }
            StoreAction::OrderAdd(o) => format!(
                "OrderAdd {{ id: {}, items: {}, total: {} }}",
                o.id,
                o.items.len(),
                o.total
            ),
            StoreAction::ReviewAdd(r) => {
                format!("ReviewAdd {{ id: {}, rating: {} }}", r.id, r.rating)
            }
            StoreAction::MenuItemAdd(item) => format!("MenuItemAdd {{ id: {} }}", item.id),
            StoreAction::MenuItemUpdate { id, .. } => format!("MenuItemUpdate {{ id: {} }}", id),
            _ => format!("{:?}", self),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_names_and_categories() {
        let action = StoreAction::CartClear;
        assert_eq!(action.name(), "CartClear");
        assert_eq!(action.category(), Some("cart"));

        let action = StoreAction::FilterSearchSet("soup".into());
        assert_eq!(action.name(), "FilterSearchSet");
        assert_eq!(action.category(), Some("filter"));

        let action = StoreAction::MenuItemDelete(Id::new("item-1"));
        assert_eq!(action.category(), Some("menu_item"));
    }

    #[test]
    fn test_summary_falls_back_to_debug() {
        let action = StoreAction::CartRemove(Id::new("item-7"));
        assert!(action.summary().contains("item-7"));
    }
}

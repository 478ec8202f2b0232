//! Storefront state tree, its reducer, and the store that owns it
//!
//! The store holds the application state and provides a single point for
//! state mutations through [`Store::dispatch`]. Nothing else writes to the
//! collections; views read them and derive what they need.
//!
//! # Example
//! ```
//! use bistro_core::action::StoreAction;
//! use bistro_core::model::CategoryFilter;
//! use bistro_core::store::{Store, Storefront};
//!
//! let mut store = Store::new(Storefront::default());
//! assert!(store.dispatch(StoreAction::FilterSearchSet("soup".into())));
//! assert!(!store.dispatch(StoreAction::FilterSearchSet("soup".into())));
//! assert_eq!(store.state().search_query, "soup");
//! assert_eq!(store.state().category, CategoryFilter::All);
//! ```

use crate::action::{Action, ActionCategory, ActionSummary, StoreAction};
use crate::model::{CategoryFilter, Id, MenuItem, Order, OrderItem, Reservation, Review};
use crate::seed::Seed;

/// The normalized entity tree plus menu filter inputs
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Storefront {
    pub menu: Vec<MenuItem>,
    pub reservations: Vec<Reservation>,
    pub orders: Vec<Order>,
    pub reviews: Vec<Review>,
    pub cart: Vec<OrderItem>,
    pub search_query: String,
    pub category: CategoryFilter,
}

impl Storefront {
    /// Start from seed collections with an empty cart and no filters
    pub fn from_seed(seed: Seed) -> Self {
        Self {
            menu: seed.menu,
            reservations: seed.reservations,
            orders: seed.orders,
            reviews: seed.reviews,
            ..Default::default()
        }
    }

    pub fn menu_item(&self, id: &Id) -> Option<&MenuItem> {
        self.menu.iter().find(|item| &item.id == id)
    }

    pub fn order(&self, id: &Id) -> Option<&Order> {
        self.orders.iter().find(|order| &order.id == id)
    }

    pub fn reservation(&self, id: &Id) -> Option<&Reservation> {
        self.reservations.iter().find(|res| &res.id == id)
    }

    pub fn cart_entry(&self, item_id: &Id) -> Option<&OrderItem> {
        self.cart.iter().find(|entry| &entry.menu_item.id == item_id)
    }
}

/// The reducer: applies one action to the state tree
///
/// Returns `true` if the state changed. Actions that do not apply (unknown
/// id, duplicate id, zero quantity on add) leave the state untouched and
/// return `false`; dispatch itself never fails.
pub fn reduce(state: &mut Storefront, action: StoreAction) -> bool {
    match action {
        // ===== Cart =====
        StoreAction::CartAdd {
            item,
            quantity,
            instructions,
        } => {
            if quantity == 0 {
                return false;
            }
            if let Some(entry) = state
                .cart
                .iter_mut()
                .find(|entry| entry.menu_item.id == item.id)
            {
                entry.quantity = entry.quantity.saturating_add(quantity);
            } else {
                state.cart.push(OrderItem {
                    menu_item: item,
                    quantity,
                    special_instructions: instructions.filter(|s| !s.trim().is_empty()),
                });
            }
            true
        }

        StoreAction::CartRemove(item_id) => remove_where(&mut state.cart, |entry| {
            entry.menu_item.id == item_id
        }),

        StoreAction::CartQuantitySet { item_id, quantity } => {
            // Zero is removal, never a zero-quantity entry
            if quantity == 0 {
                return remove_where(&mut state.cart, |entry| entry.menu_item.id == item_id);
            }
            match state
                .cart
                .iter_mut()
                .find(|entry| entry.menu_item.id == item_id)
            {
                Some(entry) if entry.quantity != quantity => {
                    entry.quantity = quantity;
                    true
                }
                _ => false,
            }
        }

        StoreAction::CartClear => {
            let changed = !state.cart.is_empty();
            state.cart.clear();
            changed
        }

        // ===== Reservations =====
        StoreAction::ReservationAdd(reservation) => {
            push_unique(&mut state.reservations, reservation, |r| &r.id)
        }

        StoreAction::ReservationUpdate { id, patch } => {
            match state.reservations.iter_mut().find(|r| r.id == id) {
                Some(reservation) => patch.apply(reservation),
                None => false,
            }
        }

        // ===== Orders =====
        StoreAction::OrderAdd(order) => push_unique(&mut state.orders, order, |o| &o.id),

        StoreAction::OrderUpdate { id, patch } => {
            match state.orders.iter_mut().find(|o| o.id == id) {
                Some(order) => patch.apply(order),
                None => false,
            }
        }

        // ===== Reviews =====
        StoreAction::ReviewAdd(review) => push_unique(&mut state.reviews, review, |r| &r.id),

        // ===== Filters =====
        StoreAction::FilterSearchSet(query) => {
            if state.search_query == query {
                false
            } else {
                state.search_query = query;
                true
            }
        }

        StoreAction::FilterCategorySet(category) => {
            if state.category == category {
                false
            } else {
                state.category = category;
                true
            }
        }

        // ===== Menu items =====
        StoreAction::MenuItemAdd(item) => push_unique(&mut state.menu, item, |i| &i.id),

        StoreAction::MenuItemUpdate { id, patch } => {
            match state.menu.iter_mut().find(|i| i.id == id) {
                Some(item) => patch.apply(item),
                None => false,
            }
        }

        StoreAction::MenuItemDelete(id) => remove_where(&mut state.menu, |i| i.id == id),
    }
}

fn remove_where<T>(items: &mut Vec<T>, pred: impl Fn(&T) -> bool) -> bool {
    let before = items.len();
    items.retain(|item| !pred(item));
    items.len() != before
}

fn push_unique<T>(items: &mut Vec<T>, item: T, id: impl Fn(&T) -> &Id) -> bool {
    if items.iter().any(|existing| id(existing) == id(&item)) {
        tracing::debug!(id = %id(&item), "ignoring entity with duplicate id");
        return false;
    }
    items.push(item);
    true
}

/// Owner of a [`Storefront`] with middleware around every dispatch
///
/// There is no global instance: whoever needs the store receives it (or a
/// reference to it) explicitly, so independent stores can coexist.
pub struct Store<M: Middleware<StoreAction> = NoopMiddleware> {
    state: Storefront,
    middleware: M,
}

impl Store<NoopMiddleware> {
    /// Create a store without middleware
    pub fn new(state: Storefront) -> Self {
        Self::with_middleware(state, NoopMiddleware)
    }
}

impl<M: Middleware<StoreAction>> Store<M> {
    /// Create a store with middleware
    pub fn with_middleware(state: Storefront, middleware: M) -> Self {
        Self { state, middleware }
    }

    /// Dispatch an action through middleware and reducer
    ///
    /// Returns `true` if the state changed and a re-render is needed.
    pub fn dispatch(&mut self, action: StoreAction) -> bool {
        self.middleware.before(&action);
        let name = action.name();
        let changed = reduce(&mut self.state, action);
        self.middleware.after(name, changed);
        changed
    }

    /// Get a reference to the current state
    pub fn state(&self) -> &Storefront {
        &self.state
    }

    /// Consume the store, keeping the state
    pub fn into_state(self) -> Storefront {
        self.state
    }

    /// Get a reference to the middleware
    pub fn middleware(&self) -> &M {
        &self.middleware
    }

    /// Get a mutable reference to the middleware
    pub fn middleware_mut(&mut self) -> &mut M {
        &mut self.middleware
    }
}

/// Middleware trait for intercepting actions
///
/// Implement this trait to add logging or other cross-cutting concerns.
/// `after` receives the action name only: the action itself has been moved
/// into the reducer by then.
pub trait Middleware<A: Action> {
    /// Called before the action is dispatched to the reducer
    fn before(&mut self, action: &A);

    /// Called after the action is processed by the reducer
    fn after(&mut self, action_name: &'static str, state_changed: bool);
}

/// A no-op middleware that does nothing
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopMiddleware;

impl<A: Action> Middleware<A> for NoopMiddleware {
    fn before(&mut self, _action: &A) {}
    fn after(&mut self, _action_name: &'static str, _state_changed: bool) {}
}

/// Middleware that logs actions through `tracing`
#[derive(Debug, Clone, Default)]
pub struct LoggingMiddleware {
    /// Whether to log before dispatch (with the action summary)
    pub log_before: bool,
    /// Whether to log after dispatch (with the change flag)
    pub log_after: bool,
    /// Action names that are never logged
    pub exclude: Vec<&'static str>,
}

impl LoggingMiddleware {
    /// Log after dispatch only
    pub fn new() -> Self {
        Self {
            log_before: false,
            log_after: true,
            exclude: Vec::new(),
        }
    }

    /// Log both before and after
    pub fn verbose() -> Self {
        Self {
            log_before: true,
            ..Self::new()
        }
    }

    /// Skip the given action names
    pub fn excluding(mut self, names: &[&'static str]) -> Self {
        self.exclude.extend_from_slice(names);
        self
    }

    fn skips(&self, name: &str) -> bool {
        self.exclude.iter().any(|excluded| *excluded == name)
    }
}

impl<A: ActionCategory + ActionSummary> Middleware<A> for LoggingMiddleware {
    fn before(&mut self, action: &A) {
        if self.log_before && !self.skips(action.name()) {
            tracing::debug!(
                action = %action.name(),
                category = action.category().unwrap_or("global"),
                summary = %action.summary(),
                "dispatching action"
            );
        }
    }

    fn after(&mut self, action_name: &'static str, state_changed: bool) {
        if self.log_after && !self.skips(action_name) {
            tracing::debug!(
                action = %action_name,
                state_changed = state_changed,
                "action processed"
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{
        Category, Customer, Fulfillment, MenuItemPatch, OrderPatch, OrderStatus,
        ReservationPatch, ReservationStatus,
    };
    use chrono::{NaiveDate, NaiveTime, TimeZone, Utc};
    use rust_decimal::Decimal;

    fn item(id: &str, price: Decimal, category: Category) -> MenuItem {
        MenuItem {
            id: Id::new(id),
            name: format!("Item {id}"),
            description: String::new(),
            price,
            category,
            image: String::new(),
            rating: 4.0,
            review_count: 0,
            popular: false,
        }
    }

    fn add(item: &MenuItem, quantity: u32) -> StoreAction {
        StoreAction::CartAdd {
            item: item.clone(),
            quantity,
            instructions: None,
        }
    }

    fn order(id: &str) -> Order {
        Order {
            id: Id::new(id),
            customer: Customer {
                name: "Ada".into(),
                email: "ada@example.com".into(),
                phone: "555-0100".into(),
            },
            items: Vec::new(),
            total: Decimal::new(1000, 2),
            fulfillment: Fulfillment::Takeaway,
            status: OrderStatus::Pending,
            created_at: Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap(),
        }
    }

    fn reservation(id: &str) -> Reservation {
        Reservation {
            id: Id::new(id),
            customer: Customer::default(),
            date: NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(),
            time: NaiveTime::from_hms_opt(19, 0, 0).unwrap(),
            guests: 4,
            special_requests: None,
            status: ReservationStatus::Pending,
            created_at: Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap(),
        }
    }

    #[test]
    fn test_cart_add_appends_then_merges() {
        let mut state = Storefront::default();
        let pasta = item("item-1", Decimal::new(1200, 2), Category::Dinner);

        assert!(reduce(&mut state, add(&pasta, 2)));
        assert_eq!(state.cart.len(), 1);
        assert_eq!(state.cart[0].quantity, 2);

        assert!(reduce(&mut state, add(&pasta, 3)));
        assert_eq!(state.cart.len(), 1);
        assert_eq!(state.cart[0].quantity, 5);
    }

    #[test]
    fn test_cart_add_quantities_sum() {
        let pasta = item("item-1", Decimal::ONE, Category::Dinner);
        for q1 in 1..5u32 {
            for q2 in 1..5u32 {
                let mut state = Storefront::default();
                reduce(&mut state, add(&pasta, q1));
                reduce(&mut state, add(&pasta, q2));
                assert_eq!(state.cart_entry(&pasta.id).map(|e| e.quantity), Some(q1 + q2));
            }
        }
    }

    #[test]
    fn test_cart_add_zero_is_noop() {
        let mut state = Storefront::default();
        let pasta = item("item-1", Decimal::ONE, Category::Dinner);
        assert!(!reduce(&mut state, add(&pasta, 0)));
        assert!(state.cart.is_empty());
    }

    #[test]
    fn test_cart_add_keeps_instructions_of_new_entry() {
        let mut state = Storefront::default();
        let pasta = item("item-1", Decimal::ONE, Category::Dinner);
        reduce(
            &mut state,
            StoreAction::CartAdd {
                item: pasta.clone(),
                quantity: 1,
                instructions: Some("no onions".into()),
            },
        );
        reduce(
            &mut state,
            StoreAction::CartAdd {
                item: pasta,
                quantity: 1,
                instructions: Some("   ".into()),
            },
        );
        assert_eq!(state.cart[0].special_instructions.as_deref(), Some("no onions"));
    }

    #[test]
    fn test_cart_remove_absent_is_noop() {
        let mut state = Storefront::default();
        let pasta = item("item-1", Decimal::ONE, Category::Dinner);
        reduce(&mut state, add(&pasta, 1));
        let before = state.clone();

        assert!(!reduce(&mut state, StoreAction::CartRemove(Id::new("item-404"))));
        assert_eq!(state, before);

        assert!(reduce(&mut state, StoreAction::CartRemove(pasta.id.clone())));
        assert!(state.cart.is_empty());
    }

    #[test]
    fn test_cart_quantity_zero_removes() {
        let mut state = Storefront::default();
        let pasta = item("item-1", Decimal::ONE, Category::Dinner);
        reduce(&mut state, add(&pasta, 2));

        assert!(reduce(
            &mut state,
            StoreAction::CartQuantitySet {
                item_id: pasta.id.clone(),
                quantity: 7,
            }
        ));
        assert_eq!(state.cart[0].quantity, 7);

        assert!(reduce(
            &mut state,
            StoreAction::CartQuantitySet {
                item_id: pasta.id.clone(),
                quantity: 0,
            }
        ));
        assert!(state.cart.is_empty());
    }

    #[test]
    fn test_cart_clear_always_empties() {
        let mut state = Storefront::default();
        assert!(!reduce(&mut state, StoreAction::CartClear));

        reduce(&mut state, add(&item("a", Decimal::ONE, Category::Lunch), 1));
        reduce(&mut state, add(&item("b", Decimal::ONE, Category::Lunch), 4));
        assert!(reduce(&mut state, StoreAction::CartClear));
        assert!(state.cart.is_empty());
    }

    #[test]
    fn test_order_update_merges_only_given_fields() {
        let mut state = Storefront::default();
        reduce(&mut state, StoreAction::OrderAdd(order("ord-1")));

        let changed = reduce(
            &mut state,
            StoreAction::OrderUpdate {
                id: Id::new("ord-1"),
                patch: OrderPatch::status(OrderStatus::Preparing),
            },
        );
        assert!(changed);
        let updated = state.order(&Id::new("ord-1")).unwrap();
        assert_eq!(updated.status, OrderStatus::Preparing);
        assert_eq!(updated.customer.name, "Ada");
        assert_eq!(updated.total, Decimal::new(1000, 2));
    }

    #[test]
    fn test_order_update_unknown_id_is_noop() {
        let mut state = Storefront::default();
        reduce(&mut state, StoreAction::OrderAdd(order("ord-1")));
        let before = state.clone();

        assert!(!reduce(
            &mut state,
            StoreAction::OrderUpdate {
                id: Id::new("ord-404"),
                patch: OrderPatch::status(OrderStatus::Ready),
            }
        ));
        assert_eq!(state, before);
    }

    #[test]
    fn test_order_status_never_returns_to_pending() {
        let mut state = Storefront::default();
        let mut completed = order("ord-1");
        completed.status = OrderStatus::Completed;
        reduce(&mut state, StoreAction::OrderAdd(completed));

        let changed = reduce(
            &mut state,
            StoreAction::OrderUpdate {
                id: Id::new("ord-1"),
                patch: OrderPatch {
                    status: Some(OrderStatus::Pending),
                    phone: Some("555-0199".into()),
                    ..Default::default()
                },
            },
        );
        assert!(changed);
        let stored = state.order(&Id::new("ord-1")).unwrap();
        assert_eq!(stored.status, OrderStatus::Completed);
        assert_eq!(stored.customer.phone, "555-0199");
    }

    #[test]
    fn test_duplicate_order_id_is_noop() {
        let mut state = Storefront::default();
        assert!(reduce(&mut state, StoreAction::OrderAdd(order("ord-1"))));
        assert!(!reduce(&mut state, StoreAction::OrderAdd(order("ord-1"))));
        assert_eq!(state.orders.len(), 1);
    }

    #[test]
    fn test_reservation_update() {
        let mut state = Storefront::default();
        reduce(&mut state, StoreAction::ReservationAdd(reservation("res-1")));

        assert!(!reduce(
            &mut state,
            StoreAction::ReservationUpdate {
                id: Id::new("res-404"),
                patch: ReservationPatch::status(ReservationStatus::Confirmed),
            }
        ));

        assert!(reduce(
            &mut state,
            StoreAction::ReservationUpdate {
                id: Id::new("res-1"),
                patch: ReservationPatch::status(ReservationStatus::Confirmed),
            }
        ));
        let stored = state.reservation(&Id::new("res-1")).unwrap();
        assert_eq!(stored.status, ReservationStatus::Confirmed);
        assert_eq!(stored.guests, 4);

        assert!(!reduce(
            &mut state,
            StoreAction::ReservationUpdate {
                id: Id::new("res-1"),
                patch: ReservationPatch::status(ReservationStatus::Pending),
            }
        ));
    }

    #[test]
    fn test_search_query_is_idempotent() {
        let mut once = Storefront::default();
        reduce(&mut once, StoreAction::FilterSearchSet("chicken".into()));

        let mut twice = Storefront::default();
        reduce(&mut twice, StoreAction::FilterSearchSet("chicken".into()));
        assert!(!reduce(&mut twice, StoreAction::FilterSearchSet("chicken".into())));

        assert_eq!(once, twice);
    }

    #[test]
    fn test_menu_item_crud() {
        let mut state = Storefront::default();
        let soup = item("item-1", Decimal::new(650, 2), Category::Lunch);
        assert!(reduce(&mut state, StoreAction::MenuItemAdd(soup.clone())));

        assert!(reduce(
            &mut state,
            StoreAction::MenuItemUpdate {
                id: soup.id.clone(),
                patch: MenuItemPatch {
                    price: Some(Decimal::new(700, 2)),
                    ..Default::default()
                },
            }
        ));
        let stored = state.menu_item(&soup.id).unwrap();
        assert_eq!(stored.price, Decimal::new(700, 2));
        assert_eq!(stored.name, soup.name);

        assert!(reduce(&mut state, StoreAction::MenuItemDelete(soup.id.clone())));
        assert!(state.menu.is_empty());
        assert!(!reduce(&mut state, StoreAction::MenuItemDelete(soup.id)));
    }

    #[derive(Default)]
    struct CountingMiddleware {
        before_count: usize,
        changed_count: usize,
    }

    impl<A: Action> Middleware<A> for CountingMiddleware {
        fn before(&mut self, _action: &A) {
            self.before_count += 1;
        }

        fn after(&mut self, _action_name: &'static str, state_changed: bool) {
            if state_changed {
                self.changed_count += 1;
            }
        }
    }

    #[test]
    fn test_store_with_middleware() {
        let mut store =
            Store::with_middleware(Storefront::default(), CountingMiddleware::default());

        store.dispatch(StoreAction::FilterSearchSet("tea".into()));
        store.dispatch(StoreAction::FilterSearchSet("tea".into()));
        store.dispatch(StoreAction::CartClear);

        assert_eq!(store.middleware().before_count, 3);
        assert_eq!(store.middleware().changed_count, 1);
        assert_eq!(store.state().search_query, "tea");
    }

    #[test]
    fn test_independent_stores() {
        let mut a = Store::new(Storefront::default());
        let b = Store::new(Storefront::default());
        a.dispatch(StoreAction::FilterCategorySet(CategoryFilter::Only(
            Category::Drinks,
        )));
        assert_ne!(a.state(), b.state());
    }
}

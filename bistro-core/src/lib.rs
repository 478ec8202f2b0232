//! Core of the bistro storefront
//!
//! This crate holds everything that is not terminal specific: the domain
//! model, a store with a reducer as its single mutation surface, derived
//! views, forms with validation, and the async submission workflows.
//!
//! # Core Concepts
//!
//! - **StoreAction**: a tagged request to mutate the storefront
//! - **Store**: owner of the [`Storefront`] state tree, wrapped in middleware
//! - **Views**: pure functions of the state (filtered menu, totals, review stats)
//! - **Forms**: raw input that validates into typed requests
//! - **Workflows**: cancellable submissions that produce new entities
//!
//! # Basic Example
//!
//! ```
//! use bistro_core::prelude::*;
//!
//! let seed = Seed::bundled().unwrap();
//! let mut store = Store::new(Storefront::from_seed(seed));
//!
//! let item = store.state().menu[0].clone();
//! assert!(store.dispatch(StoreAction::CartAdd { item, quantity: 2, instructions: None }));
//! assert_eq!(views::cart_item_count(store.state()), 2);
//! ```
//!
//! # Async Workflow Pattern
//!
//! Submissions follow the two-phase action pattern:
//!
//! 1. an **intent** validates a form and hands a [`Submission`] to the
//!    [`TaskManager`] together with a cancellation token
//! 2. a **result** (`*Did*` action in the application) carries the
//!    [`Submitted`] entity, the rejection reason, or the cancellation back
//!
//! The result is recorded through [`Submitted::into_store_actions`], so the
//! store stays the only place where state changes.

pub mod action;
pub mod config;
pub mod error;
pub mod forms;
pub mod ids;
pub mod model;
pub mod money;
pub mod notify;
pub mod seed;
pub mod store;
pub mod tasks;
pub mod testing;
pub mod views;
pub mod workflow;

pub use action::{Action, ActionCategory, ActionSummary, StoreAction};
pub use config::{StorefrontConfig, SubmitDelays};
pub use error::{ConfigError, SeedError, SubmitError};
pub use ids::{IdGenerator, IdKind};
pub use money::{OrderQuote, Pricing};
pub use notify::{Notice, NoticeBoard, NoticeKind, Notifier};
pub use seed::Seed;
pub use store::{reduce, LoggingMiddleware, Middleware, NoopMiddleware, Store, Storefront};
pub use tasks::{TaskKey, TaskManager};
pub use workflow::{Backend, SimulatedBackend, Submission, Submitted, Workflow};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::action::{Action, ActionCategory, ActionSummary, StoreAction};
    pub use crate::config::{StorefrontConfig, SubmitDelays};
    pub use crate::forms::{
        CheckoutForm, Field, FieldErrors, MenuItemForm, ReservationForm, ReviewForm,
    };
    pub use crate::ids::{IdGenerator, IdKind};
    pub use crate::model::{
        Category, CategoryFilter, Customer, Fulfillment, FulfillmentKind, Id, MenuItem,
        MenuItemPatch, Order, OrderItem, OrderPatch, OrderStatus, Reservation, ReservationPatch,
        ReservationStatus, Review,
    };
    pub use crate::money::{OrderQuote, Pricing};
    pub use crate::notify::{Notice, NoticeBoard, NoticeKind, Notifier};
    pub use crate::seed::Seed;
    pub use crate::store::{LoggingMiddleware, Middleware, NoopMiddleware, Store, Storefront};
    pub use crate::tasks::{TaskKey, TaskManager};
    pub use crate::views;
    pub use crate::workflow::{Backend, SimulatedBackend, Submission, Submitted, Workflow};
}

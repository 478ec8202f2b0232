//! Test utilities for code built on the storefront core
//!
//! - [`TestHarness`]: state plus an action channel to capture emitted actions
//! - [`RejectingBackend`]: a [`Backend`] whose calls always fail
//! - Assertion macros for verifying emitted actions
//!
//! # Example
//!
//! ```
//! use bistro_core::action::StoreAction;
//! use bistro_core::testing::TestHarness;
//! use bistro_core::{assert_emitted, assert_not_emitted};
//!
//! let mut harness = TestHarness::<(), StoreAction>::new(());
//! harness.emit(StoreAction::CartClear);
//!
//! let emitted = harness.drain_emitted();
//! assert_emitted!(emitted, StoreAction::CartClear);
//! assert_not_emitted!(emitted, StoreAction::FilterSearchSet(_));
//! ```

use std::future::Future;

use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

use crate::action::{Action, ActionCategory};
use crate::error::SubmitError;
use crate::workflow::{Backend, Workflow};

/// Generic test harness.
///
/// Provides:
/// - State management with a simple `state` field
/// - Action channel for capturing emitted actions
/// - Helper methods for emitting and draining actions
pub struct TestHarness<S, A: Action> {
    /// The application state under test
    pub state: S,
    tx: mpsc::UnboundedSender<A>,
    rx: mpsc::UnboundedReceiver<A>,
}

impl<S, A: Action> TestHarness<S, A> {
    /// Create a new test harness with the given initial state.
    pub fn new(state: S) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Self { state, tx, rx }
    }

    /// Get a clone of the action sender, e.g. for a task manager.
    pub fn sender(&self) -> mpsc::UnboundedSender<A> {
        self.tx.clone()
    }

    /// Emit an action (simulates what a handler would do).
    pub fn emit(&self, action: A) {
        let _ = self.tx.send(action);
    }

    /// Emit every action of a handler's output.
    pub fn emit_all(&self, actions: impl IntoIterator<Item = A>) {
        for action in actions {
            self.emit(action);
        }
    }

    /// Drain all emitted actions from the channel.
    pub fn drain_emitted(&mut self) -> Vec<A> {
        let mut actions = Vec::new();
        while let Ok(action) = self.rx.try_recv() {
            actions.push(action);
        }
        actions
    }

    /// Wait for the next action, e.g. one sent by a spawned task.
    pub async fn next_emitted(&mut self) -> Option<A> {
        self.rx.recv().await
    }
}

impl<S: Default, A: Action> Default for TestHarness<S, A> {
    fn default() -> Self {
        Self::new(S::default())
    }
}

impl<S, A: ActionCategory> TestHarness<S, A> {
    /// Drain all emitted actions that belong to a specific category.
    ///
    /// Actions not matching the category remain in the channel for later draining.
    pub fn drain_category(&mut self, category: &str) -> Vec<A> {
        let (matching, rest): (Vec<A>, Vec<A>) = self
            .drain_emitted()
            .into_iter()
            .partition(|action| action.category() == Some(category));
        for action in rest {
            let _ = self.tx.send(action);
        }
        matching
    }
}

/// Backend that refuses every submission with the same reason
#[derive(Clone, Debug)]
pub struct RejectingBackend {
    reason: String,
}

impl RejectingBackend {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

impl Backend for RejectingBackend {
    fn submit(
        &self,
        _workflow: Workflow,
        _token: &CancellationToken,
    ) -> impl Future<Output = Result<(), SubmitError>> + Send {
        let reason = self.reason.clone();
        async move { Err(SubmitError::Rejected(reason)) }
    }
}

/// Assert that a specific action was emitted.
#[macro_export]
macro_rules! assert_emitted {
    ($actions:expr, $pattern:pat $(if $guard:expr)?) => {
        assert!(
            $actions.iter().any(|a| matches!(a, $pattern $(if $guard)?)),
            "Expected action matching `{}` to be emitted, but got: {:?}",
            stringify!($pattern),
            $actions
        );
    };
}

/// Assert that a specific action was NOT emitted.
#[macro_export]
macro_rules! assert_not_emitted {
    ($actions:expr, $pattern:pat $(if $guard:expr)?) => {
        assert!(
            !$actions.iter().any(|a| matches!(a, $pattern $(if $guard)?)),
            "Expected action matching `{}` NOT to be emitted, but it was: {:?}",
            stringify!($pattern),
            $actions
        );
    };
}

/// Find and return the first action matching a pattern.
#[macro_export]
macro_rules! find_emitted {
    ($actions:expr, $pattern:pat $(if $guard:expr)?) => {
        $actions.iter().find(|a| matches!(a, $pattern $(if $guard)?))
    };
}

/// Count how many actions match a pattern.
#[macro_export]
macro_rules! count_emitted {
    ($actions:expr, $pattern:pat $(if $guard:expr)?) => {
        $actions.iter().filter(|a| matches!(a, $pattern $(if $guard)?)).count()
    };
}

/// Assert that an action of a specific category was emitted.
#[macro_export]
macro_rules! assert_category_emitted {
    ($actions:expr, $category:expr) => {
        assert!(
            $actions.iter().any(|a| {
                use $crate::action::ActionCategory;
                a.category() == Some($category)
            }),
            "Expected action with category `{}` to be emitted, but got: {:?}",
            $category,
            $actions
        );
    };
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::action::StoreAction;
    use crate::model::Id;

    #[test]
    fn test_harness_emit_and_drain() {
        let mut harness = TestHarness::<(), StoreAction>::new(());

        harness.emit(StoreAction::CartClear);
        harness.emit(StoreAction::CartRemove(Id::new("item-1")));

        let actions = harness.drain_emitted();
        assert_eq!(actions.len(), 2);
        assert_eq!(actions[0], StoreAction::CartClear);

        // Drain again should be empty
        assert!(harness.drain_emitted().is_empty());
    }

    #[test]
    fn test_drain_category_keeps_the_rest() {
        let mut harness = TestHarness::<(), StoreAction>::default();
        harness.emit_all([
            StoreAction::CartClear,
            StoreAction::FilterSearchSet("tea".into()),
            StoreAction::CartRemove(Id::new("item-2")),
        ]);

        let cart = harness.drain_category("cart");
        assert_eq!(cart.len(), 2);

        let rest = harness.drain_emitted();
        assert_eq!(rest, vec![StoreAction::FilterSearchSet("tea".into())]);
    }

    #[test]
    fn test_assert_macros() {
        let actions = vec![
            StoreAction::CartClear,
            StoreAction::CartRemove(Id::new("item-1")),
        ];

        assert_emitted!(actions, StoreAction::CartClear);
        assert_emitted!(actions, StoreAction::CartRemove(id) if id.as_str() == "item-1");
        assert_not_emitted!(actions, StoreAction::MenuItemDelete(_));
        assert_category_emitted!(actions, "cart");

        assert!(find_emitted!(actions, StoreAction::CartRemove(_)).is_some());
        assert_eq!(count_emitted!(actions, StoreAction::CartRemove(_)), 1);
    }
}

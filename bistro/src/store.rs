//! Effect-aware store for the terminal app
//!
//! The storefront reducer in `bistro_core` returns `bool`. The application
//! reducer also has to ask for side work (start a submission, show a
//! notice), so it returns both the change flag and a list of effects:
//!
//! ```ignore
//! fn reducer(state: &mut AppState, action: Action) -> DispatchResult<Effect>
//! ```
//!
//! Effects are declarative descriptions of work; the runtime decides how to
//! carry them out.

use std::marker::PhantomData;

use bistro_core::{Action, Middleware, NoopMiddleware};

/// Result of dispatching an action to an effect-aware store
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DispatchResult<E> {
    /// Whether the state was modified
    pub changed: bool,
    /// Effects to be processed after dispatch
    pub effects: Vec<E>,
}

impl<E> Default for DispatchResult<E> {
    fn default() -> Self {
        Self::unchanged()
    }
}

impl<E> DispatchResult<E> {
    /// No state change, no effects
    #[inline]
    pub fn unchanged() -> Self {
        Self {
            changed: false,
            effects: vec![],
        }
    }

    /// State changed, no effects
    #[inline]
    pub fn changed() -> Self {
        Self {
            changed: true,
            effects: vec![],
        }
    }

    /// Effect only, state untouched
    #[inline]
    pub fn effect(effect: E) -> Self {
        Self {
            changed: false,
            effects: vec![effect],
        }
    }

    #[inline]
    pub fn effects(effects: Vec<E>) -> Self {
        Self {
            changed: false,
            effects,
        }
    }

    /// State changed and one effect
    #[inline]
    pub fn changed_with(effect: E) -> Self {
        Self {
            changed: true,
            effects: vec![effect],
        }
    }

    #[inline]
    pub fn changed_with_many(effects: Vec<E>) -> Self {
        Self {
            changed: true,
            effects,
        }
    }

    /// Append an effect (builder)
    #[inline]
    pub fn with(mut self, effect: E) -> Self {
        self.effects.push(effect);
        self
    }

    #[inline]
    pub fn mark_changed(mut self) -> Self {
        self.changed = true;
        self
    }

    #[inline]
    pub fn has_effects(&self) -> bool {
        !self.effects.is_empty()
    }
}

/// Reducer signature for effect-aware stores
pub type EffectReducer<S, A, E> = fn(&mut S, A) -> DispatchResult<E>;

/// Owner of the application state, wrapped in middleware
pub struct EffectStore<S, A, E, M = NoopMiddleware>
where
    A: Action,
    M: Middleware<A>,
{
    state: S,
    reducer: EffectReducer<S, A, E>,
    middleware: M,
    _marker: PhantomData<(A, E)>,
}

impl<S, A: Action, E> EffectStore<S, A, E, NoopMiddleware> {
    pub fn new(state: S, reducer: EffectReducer<S, A, E>) -> Self {
        Self::with_middleware(state, reducer, NoopMiddleware)
    }
}

impl<S, A: Action, E, M: Middleware<A>> EffectStore<S, A, E, M> {
    pub fn with_middleware(state: S, reducer: EffectReducer<S, A, E>, middleware: M) -> Self {
        Self {
            state,
            reducer,
            middleware,
            _marker: PhantomData,
        }
    }

    #[inline]
    pub fn state(&self) -> &S {
        &self.state
    }

    /// Direct mutable access, for setup and tests; bypasses the reducer
    #[inline]
    pub fn state_mut(&mut self) -> &mut S {
        &mut self.state
    }

    #[inline]
    pub fn middleware(&self) -> &M {
        &self.middleware
    }

    #[inline]
    pub fn middleware_mut(&mut self) -> &mut M {
        &mut self.middleware
    }

    pub fn dispatch(&mut self, action: A) -> DispatchResult<E> {
        self.middleware.before(&action);
        let name = action.name();
        let result = (self.reducer)(&mut self.state, action);
        self.middleware.after(name, result.changed);
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone, Debug)]
    enum TestAction {
        Increment,
        NoOp,
        TriggerEffect,
    }

    impl Action for TestAction {
        fn name(&self) -> &'static str {
            match self {
                TestAction::Increment => "Increment",
                TestAction::NoOp => "NoOp",
                TestAction::TriggerEffect => "TriggerEffect",
            }
        }
    }

    #[derive(Debug, PartialEq)]
    enum TestEffect {
        Log(String),
    }

    fn reducer(count: &mut i32, action: TestAction) -> DispatchResult<TestEffect> {
        match action {
            TestAction::Increment => {
                *count += 1;
                DispatchResult::changed()
            }
            TestAction::NoOp => DispatchResult::unchanged(),
            TestAction::TriggerEffect => {
                DispatchResult::effect(TestEffect::Log("triggered".into()))
            }
        }
    }

    #[derive(Default)]
    struct Recorder {
        seen: Vec<(&'static str, bool)>,
        before: usize,
    }

    impl Middleware<TestAction> for Recorder {
        fn before(&mut self, _action: &TestAction) {
            self.before += 1;
        }

        fn after(&mut self, action_name: &'static str, state_changed: bool) {
            self.seen.push((action_name, state_changed));
        }
    }

    #[test]
    fn test_builders() {
        let result = DispatchResult::<u8>::changed_with(1).with(2);
        assert!(result.changed);
        assert_eq!(result.effects, vec![1, 2]);

        let result = DispatchResult::effects(vec![3]).mark_changed();
        assert!(result.changed);
        assert!(result.has_effects());

        assert_eq!(DispatchResult::<u8>::default(), DispatchResult::unchanged());
    }

    #[test]
    fn test_dispatch_returns_effects() {
        let mut store = EffectStore::new(0, reducer);

        let result = store.dispatch(TestAction::Increment);
        assert!(result.changed);
        assert_eq!(*store.state(), 1);

        let result = store.dispatch(TestAction::TriggerEffect);
        assert!(!result.changed);
        assert_eq!(result.effects, vec![TestEffect::Log("triggered".into())]);
    }

    #[test]
    fn test_middleware_sees_every_dispatch() {
        let mut store = EffectStore::with_middleware(0, reducer, Recorder::default());

        store.dispatch(TestAction::Increment);
        store.dispatch(TestAction::NoOp);

        assert_eq!(store.middleware().before, 2);
        assert_eq!(
            store.middleware().seen,
            vec![("Increment", true), ("NoOp", false)]
        );
    }
}

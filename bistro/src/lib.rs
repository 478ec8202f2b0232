//! Bistro terminal storefront
//!
//! A ratatui front end for [`bistro_core`]. The application follows the
//! event → action → reducer → effect loop:
//!
//! 1. terminal events are mapped to [`Action`](action::Action)s by the screens
//! 2. [`reducer`](reducer::reducer) updates the [`AppState`](state::AppState)
//!    (delegating storefront changes to the core store) and returns effects
//! 3. the [`EffectHandler`](app::EffectHandler) turns effects into tasks,
//!    notices and `*Did*` result actions
//! 4. the [`EffectRuntime`](runtime::EffectRuntime) re-renders when the state
//!    changed
//!
//! ```
//! use bistro::action::Action;
//! use bistro::reducer::reducer;
//! use bistro::state::{AppState, Screen};
//!
//! let mut state = AppState::default();
//! let result = reducer(&mut state, Action::NavScreenSet(Screen::Menu));
//! assert!(result.changed);
//! assert_eq!(state.screen, Screen::Menu);
//! ```

pub mod action;
pub mod app;
pub mod cli;
pub mod component;
pub mod components;
pub mod effect;
pub mod event;
pub mod logging;
pub mod reducer;
pub mod runtime;
pub mod state;
pub mod store;
pub mod testing;
pub mod ui;

//! Effects - side effects declared by the reducer
//!
//! Effects are returned from the reducer and carried out by the runtime.
//! This keeps the reducer pure while making async work explicit.

use bistro_core::forms::MenuItemDraft;
use bistro_core::{Notice, Submission, Workflow};

#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    /// Send a validated submission to the backend
    Submit(Submission),
    /// Fire the cancellation token of a running submission
    CancelSubmit(Workflow),
    /// Give a new menu item its id
    CreateMenuItem(MenuItemDraft),
    /// Publish a notice on the notification channel
    Notify(Notice),
    /// (Re)start the auto-dismiss timer of the notice on display
    ScheduleNoticeDismiss,
}

//! Application actions
//!
//! Naming follows the `<Category><Verb>` convention of the storefront
//! actions: the prefix is the category (`nav`, `menu`, `detail`, `cart`,
//! `form`, `submit`, `admin`, `notice`, `ui`), `Did` marks an async result.
//! Storefront mutations are wrapped in [`Action::Store`] and keep their own
//! categories.

use bistro_core::model::{MenuItem, OrderStatus, ReservationStatus};
use bistro_core::{
    Action as ActionTrait, ActionCategory, ActionSummary, Notice, StoreAction, Submitted,
    Workflow,
};
use chrono::NaiveDate;

use crate::state::{AdminTab, Input, Screen};

#[derive(Clone, Debug, PartialEq)]
pub enum Action {
    /// A storefront mutation, reduced by `bistro_core::reduce`
    Store(StoreAction),

    // ===== Navigation =====
    NavScreenSet(Screen),

    // ===== Menu =====
    MenuSelect(usize),
    MenuSearchFocus,
    MenuSearchBlur,
    MenuCategoryNext,
    MenuCategoryPrev,
    /// Add one of the selected item to the cart
    MenuQuickAdd,

    // ===== Item detail =====
    DetailOpen,
    DetailClose,
    DetailQuantityStep { up: bool },
    DetailInstructionsChange(String),
    DetailAddToCart,

    // ===== Cart =====
    CartSelect(usize),
    CartQuantityStep { up: bool },
    CartRemoveSelected,

    // ===== Forms (whichever form is active) =====
    FormFocusNext,
    FormFocusPrev,
    FormInputChange(Input, String),
    FormChoiceStep { input: Input, forward: bool },
    FormRatingSet(u8),
    /// Intent: validate and submit the active form
    FormSubmit,

    // ===== Submissions =====
    /// Result: the backend accepted a submission
    SubmitDidComplete(Submitted),
    /// Result: the backend refused a submission
    SubmitDidFail { workflow: Workflow, reason: String },
    /// Result: the submission was cancelled before it went through
    SubmitDidCancel(Workflow),

    // ===== Admin =====
    AdminTabSet(AdminTab),
    AdminSelect(usize),
    AdminItemNew,
    AdminItemEdit,
    AdminItemDeleteRequest,
    AdminItemDeleteConfirm,
    /// Result: a new menu item got its id
    AdminItemDidCreate(MenuItem),
    AdminReservationSet(ReservationStatus),
    AdminOrderAdvance,
    AdminOrderSet(OrderStatus),

    // ===== Notices =====
    NoticeShow(Notice),
    NoticeDismiss,

    // ===== UI =====
    /// Esc: cancel a running submission or close the topmost overlay
    UiBack,
    UiTerminalResize(u16, u16),
    /// The local date moved on; reservations validate against it
    UiDateSet(NaiveDate),

    // ===== Global =====
    Quit,
}

impl ActionTrait for Action {
    fn name(&self) -> &'static str {
        match self {
            Action::Store(action) => action.name(),
            Action::NavScreenSet(_) => "NavScreenSet",
            Action::MenuSelect(_) => "MenuSelect",
            Action::MenuSearchFocus => "MenuSearchFocus",
            Action::MenuSearchBlur => "MenuSearchBlur",
            Action::MenuCategoryNext => "MenuCategoryNext",
            Action::MenuCategoryPrev => "MenuCategoryPrev",
            Action::MenuQuickAdd => "MenuQuickAdd",
            Action::DetailOpen => "DetailOpen",
            Action::DetailClose => "DetailClose",
            Action::DetailQuantityStep { .. } => "DetailQuantityStep",
            Action::DetailInstructionsChange(_) => "DetailInstructionsChange",
            Action::DetailAddToCart => "DetailAddToCart",
            Action::CartSelect(_) => "CartSelect",
            Action::CartQuantityStep { .. } => "CartQuantityStep",
            Action::CartRemoveSelected => "CartRemoveSelected",
            Action::FormFocusNext => "FormFocusNext",
            Action::FormFocusPrev => "FormFocusPrev",
            Action::FormInputChange(..) => "FormInputChange",
            Action::FormChoiceStep { .. } => "FormChoiceStep",
            Action::FormRatingSet(_) => "FormRatingSet",
            Action::FormSubmit => "FormSubmit",
            Action::SubmitDidComplete(_) => "SubmitDidComplete",
            Action::SubmitDidFail { .. } => "SubmitDidFail",
            Action::SubmitDidCancel(_) => "SubmitDidCancel",
            Action::AdminTabSet(_) => "AdminTabSet",
            Action::AdminSelect(_) => "AdminSelect",
            Action::AdminItemNew => "AdminItemNew",
            Action::AdminItemEdit => "AdminItemEdit",
            Action::AdminItemDeleteRequest => "AdminItemDeleteRequest",
            Action::AdminItemDeleteConfirm => "AdminItemDeleteConfirm",
            Action::AdminItemDidCreate(_) => "AdminItemDidCreate",
            Action::AdminReservationSet(_) => "AdminReservationSet",
            Action::AdminOrderAdvance => "AdminOrderAdvance",
            Action::AdminOrderSet(_) => "AdminOrderSet",
            Action::NoticeShow(_) => "NoticeShow",
            Action::NoticeDismiss => "NoticeDismiss",
            Action::UiBack => "UiBack",
            Action::UiTerminalResize(..) => "UiTerminalResize",
            Action::UiDateSet(_) => "UiDateSet",
            Action::Quit => "Quit",
        }
    }
}

impl ActionCategory for Action {
    fn category(&self) -> Option<&'static str> {
        match self {
            Action::Store(action) => action.category(),
            Action::NavScreenSet(_) => Some("nav"),
            Action::MenuSelect(_)
            | Action::MenuSearchFocus
            | Action::MenuSearchBlur
            | Action::MenuCategoryNext
            | Action::MenuCategoryPrev
            | Action::MenuQuickAdd => Some("menu"),
            Action::DetailOpen
            | Action::DetailClose
            | Action::DetailQuantityStep { .. }
            | Action::DetailInstructionsChange(_)
            | Action::DetailAddToCart => Some("detail"),
            Action::CartSelect(_)
            | Action::CartQuantityStep { .. }
            | Action::CartRemoveSelected => Some("cart"),
            Action::FormFocusNext
            | Action::FormFocusPrev
            | Action::FormInputChange(..)
            | Action::FormChoiceStep { .. }
            | Action::FormRatingSet(_)
            | Action::FormSubmit => Some("form"),
            Action::SubmitDidComplete(_)
            | Action::SubmitDidFail { .. }
            | Action::SubmitDidCancel(_) => Some("submit"),
            Action::AdminTabSet(_)
            | Action::AdminSelect(_)
            | Action::AdminItemNew
            | Action::AdminItemEdit
            | Action::AdminItemDeleteRequest
            | Action::AdminItemDeleteConfirm
            | Action::AdminItemDidCreate(_)
            | Action::AdminReservationSet(_)
            | Action::AdminOrderAdvance
            | Action::AdminOrderSet(_) => Some("admin"),
            Action::NoticeShow(_) | Action::NoticeDismiss => Some("notice"),
            Action::UiBack | Action::UiTerminalResize(..) | Action::UiDateSet(_) => Some("ui"),
            Action::Quit => None,
        }
    }
}

/// Concise summaries for the action log
impl ActionSummary for Action {
    fn summary(&self) -> String {
        match self {
            Action::Store(action) => action.summary(),
            Action::SubmitDidComplete(submitted) => {
                format!("SubmitDidComplete({})", submitted.workflow().as_str())
            }
            Action::AdminItemDidCreate(item) => format!("AdminItemDidCreate({})", item.id),
            // Form text may be personal data
            Action::FormInputChange(input, value) => {
                format!("FormInputChange({:?}, {} chars)", input, value.chars().count())
            }
            _ => format!("{:?}", self),
        }
    }
}

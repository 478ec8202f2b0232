//! Reducer - (state, action) -> (changed, effects)
//!
//! Storefront mutations are delegated to `bistro_core::reduce`; everything
//! here is view state and the bookkeeping around submissions. Async work is
//! only ever requested through the returned [`Effect`]s.

use bistro_core::forms::{Field, FieldErrors, MenuItemForm, MAX_GUESTS, MIN_GUESTS};
use bistro_core::model::{
    FulfillmentKind, Id, MenuItem, OrderPatch, OrderStatus, ReservationPatch, ReservationStatus,
};
use bistro_core::{reduce, Notice, StoreAction, Submission, Workflow};

use crate::action::Action;
use crate::effect::Effect;
use crate::state::{AdminTab, AppState, FormId, FormState, Input, MenuDetail, MenuEditor};
use crate::store::DispatchResult;

pub const EMPTY_CART_MESSAGE: &str = "Your cart is empty. Please add items before ordering.";

pub fn reducer(state: &mut AppState, action: Action) -> DispatchResult<Effect> {
    match action {
        Action::Store(action) => changed_if(store(state, action)),

        // ===== Navigation =====
        Action::NavScreenSet(screen) => {
            if state.screen == screen {
                return DispatchResult::unchanged();
            }
            // Leaving a screen abandons the submission its form started
            let effects = state
                .screen
                .workflow()
                .filter(|workflow| state.is_submitting(*workflow))
                .map(Effect::CancelSubmit)
                .into_iter()
                .collect();
            state.screen = screen;
            state.menu.search_focused = false;
            state.menu.detail = None;
            state.admin.confirm_delete = None;
            DispatchResult::changed_with_many(effects)
        }

        // ===== Menu =====
        Action::MenuSelect(index) => {
            if index == state.menu.selected || index >= state.menu_entries().len() {
                return DispatchResult::unchanged();
            }
            state.menu.selected = index;
            DispatchResult::changed()
        }

        Action::MenuSearchFocus => {
            changed_if(!std::mem::replace(&mut state.menu.search_focused, true))
        }

        Action::MenuSearchBlur => {
            changed_if(std::mem::replace(&mut state.menu.search_focused, false))
        }

        Action::MenuCategoryNext | Action::MenuCategoryPrev => {
            let category = if action == Action::MenuCategoryNext {
                state.shop.category.next()
            } else {
                state.shop.category.prev()
            };
            state.menu.selected = 0;
            store(state, StoreAction::FilterCategorySet(category));
            DispatchResult::changed()
        }

        Action::MenuQuickAdd => match state.selected_menu_item().cloned() {
            Some(item) => add_to_cart(state, item, 1, None),
            None => DispatchResult::unchanged(),
        },

        // ===== Item detail =====
        Action::DetailOpen => match state.selected_menu_item() {
            Some(item) => {
                state.menu.detail = Some(MenuDetail::new(item.id.clone()));
                state.menu.search_focused = false;
                DispatchResult::changed()
            }
            None => DispatchResult::unchanged(),
        },

        Action::DetailClose => changed_if(state.menu.detail.take().is_some()),

        Action::DetailQuantityStep { up } => match state.menu.detail.as_mut() {
            Some(detail) => {
                let before = detail.quantity;
                detail.quantity = if up {
                    before.saturating_add(1)
                } else {
                    before.saturating_sub(1).max(1)
                };
                changed_if(detail.quantity != before)
            }
            None => DispatchResult::unchanged(),
        },

        Action::DetailInstructionsChange(text) => match state.menu.detail.as_mut() {
            Some(detail) => {
                detail.instructions = text;
                DispatchResult::changed()
            }
            None => DispatchResult::unchanged(),
        },

        Action::DetailAddToCart => {
            let Some(detail) = state.menu.detail.take() else {
                return DispatchResult::unchanged();
            };
            match state.shop.menu_item(&detail.item_id).cloned() {
                Some(item) => {
                    add_to_cart(state, item, detail.quantity, Some(detail.instructions))
                        .mark_changed()
                }
                None => DispatchResult::changed(),
            }
        }

        // ===== Cart =====
        Action::CartSelect(index) => {
            if index == state.cart_selected || index >= state.shop.cart.len() {
                return DispatchResult::unchanged();
            }
            state.cart_selected = index;
            DispatchResult::changed()
        }

        Action::CartQuantityStep { up } => {
            let Some(entry) = state.shop.cart.get(state.cart_selected) else {
                return DispatchResult::unchanged();
            };
            let item_id = entry.menu_item.id.clone();
            let quantity = if up {
                entry.quantity.saturating_add(1)
            } else {
                entry.quantity.saturating_sub(1)
            };
            changed_if(store(state, StoreAction::CartQuantitySet { item_id, quantity }))
        }

        Action::CartRemoveSelected => match state.shop.cart.get(state.cart_selected) {
            Some(entry) => {
                let id = entry.menu_item.id.clone();
                changed_if(store(state, StoreAction::CartRemove(id)))
            }
            None => DispatchResult::unchanged(),
        },

        // ===== Forms =====
        Action::FormFocusNext | Action::FormFocusPrev => {
            let Some(form) = state.active_form() else {
                return DispatchResult::unchanged();
            };
            let len = state.inputs(form).len();
            let forward = action == Action::FormFocusNext;
            match focus_mut(state, form) {
                Some(focus) if len > 0 => {
                    *focus = if forward {
                        (*focus + 1) % len
                    } else {
                        (*focus + len - 1) % len
                    };
                    DispatchResult::changed()
                }
                _ => DispatchResult::unchanged(),
            }
        }

        Action::FormInputChange(input, value) => input_change(state, input, value),

        Action::FormChoiceStep { input, forward } => choice_step(state, input, forward),

        Action::FormRatingSet(rating) => {
            if state.active_form() != Some(FormId::Review) || !(1..=5).contains(&rating) {
                return DispatchResult::unchanged();
            }
            edit(&mut state.review, Input::Rating, |form| {
                form.rating = rating;
                true
            })
        }

        Action::FormSubmit => match state.active_form() {
            Some(FormId::Checkout) => submit_checkout(state),
            Some(FormId::Reservation) => {
                let inputs = state.inputs(FormId::Reservation);
                let result = state
                    .reservation
                    .form
                    .validate(state.today)
                    .map(Submission::Reservation);
                begin_submit(&mut state.reservation, inputs, result)
            }
            Some(FormId::Review) => {
                let inputs = state.inputs(FormId::Review);
                let result = state.review.form.validate().map(Submission::Review);
                begin_submit(&mut state.review, inputs, result)
            }
            Some(FormId::MenuItem) => save_menu_item(state),
            None => DispatchResult::unchanged(),
        },

        // ===== Submissions =====
        Action::SubmitDidComplete(submitted) => {
            let workflow = submitted.workflow();
            let message = submitted.success_message();
            for action in submitted.into_store_actions() {
                reduce(&mut state.shop, action);
            }
            match workflow {
                Workflow::Checkout => state.checkout.reset(),
                Workflow::Reservation => state.reservation.reset(),
                Workflow::Review => state.review.reset(),
            }
            state.clamp_selections();
            DispatchResult::changed_with(Effect::Notify(Notice::success(message)))
        }

        Action::SubmitDidFail { workflow, .. } => {
            set_submitting(state, workflow, false);
            DispatchResult::changed_with(Effect::Notify(Notice::error(
                workflow.failure_message(),
            )))
        }

        Action::SubmitDidCancel(workflow) => {
            set_submitting(state, workflow, false);
            DispatchResult::changed_with(Effect::Notify(Notice::error(
                workflow.cancelled_message(),
            )))
        }

        // ===== Admin =====
        Action::AdminTabSet(tab) => {
            if state.admin.tab == tab {
                return DispatchResult::unchanged();
            }
            state.admin.tab = tab;
            state.admin.selected = 0;
            state.admin.confirm_delete = None;
            DispatchResult::changed()
        }

        Action::AdminSelect(index) => {
            if index == state.admin.selected || index >= state.admin_len() {
                return DispatchResult::unchanged();
            }
            state.admin.selected = index;
            DispatchResult::changed()
        }

        Action::AdminItemNew => {
            if state.admin.tab != AdminTab::Menu {
                return DispatchResult::unchanged();
            }
            state.admin.editor = Some(MenuEditor::default());
            DispatchResult::changed()
        }

        Action::AdminItemEdit => match admin_menu_item(state) {
            Some(item) => {
                let editor = MenuEditor {
                    editing: Some(item.id.clone()),
                    state: FormState {
                        form: MenuItemForm::from_item(item),
                        ..Default::default()
                    },
                };
                state.admin.editor = Some(editor);
                DispatchResult::changed()
            }
            None => DispatchResult::unchanged(),
        },

        Action::AdminItemDeleteRequest => match admin_menu_item(state) {
            Some(item) => {
                state.admin.confirm_delete = Some(item.id.clone());
                DispatchResult::changed()
            }
            None => DispatchResult::unchanged(),
        },

        Action::AdminItemDeleteConfirm => {
            let Some(id) = state.admin.confirm_delete.take() else {
                return DispatchResult::unchanged();
            };
            if store(state, StoreAction::MenuItemDelete(id)) {
                DispatchResult::changed_with(Effect::Notify(Notice::success(
                    "Menu item deleted successfully!",
                )))
            } else {
                DispatchResult::changed()
            }
        }

        Action::AdminItemDidCreate(item) => {
            if store(state, StoreAction::MenuItemAdd(item)) {
                DispatchResult::changed_with(Effect::Notify(Notice::success(
                    "Menu item added successfully!",
                )))
            } else {
                DispatchResult::unchanged()
            }
        }

        Action::AdminReservationSet(status) => {
            if state.admin.tab != AdminTab::Reservations {
                return DispatchResult::unchanged();
            }
            let Some(id) = state
                .shop
                .reservations
                .get(state.admin.selected)
                .map(|r| r.id.clone())
            else {
                return DispatchResult::unchanged();
            };
            set_reservation_status(state, id, status)
        }

        Action::AdminOrderAdvance => match admin_order(state) {
            Some((id, status)) => match status.next() {
                Some(next) => set_order_status(state, id, next),
                None => DispatchResult::unchanged(),
            },
            None => DispatchResult::unchanged(),
        },

        Action::AdminOrderSet(status) => match admin_order(state) {
            Some((id, _)) => set_order_status(state, id, status),
            None => DispatchResult::unchanged(),
        },

        // ===== Notices =====
        Action::NoticeShow(notice) => {
            state.notice = Some(notice);
            DispatchResult::changed_with(Effect::ScheduleNoticeDismiss)
        }

        Action::NoticeDismiss => changed_if(state.notice.take().is_some()),

        // ===== UI =====
        Action::UiBack => back(state),

        Action::UiTerminalResize(width, height) => {
            if state.terminal_size != (width, height) {
                state.terminal_size = (width, height);
                DispatchResult::changed()
            } else {
                DispatchResult::unchanged()
            }
        }

        Action::UiDateSet(today) => {
            if state.today == today {
                return DispatchResult::unchanged();
            }
            state.today = today;
            DispatchResult::changed()
        }

        Action::Quit => {
            // Handled by the runtime loop
            DispatchResult::unchanged()
        }
    }
}

fn changed_if(changed: bool) -> DispatchResult<Effect> {
    if changed {
        DispatchResult::changed()
    } else {
        DispatchResult::unchanged()
    }
}

/// Run a storefront action and keep selections valid
fn store(state: &mut AppState, action: StoreAction) -> bool {
    let changed = reduce(&mut state.shop, action);
    if changed {
        state.clamp_selections();
    }
    changed
}

fn add_to_cart(
    state: &mut AppState,
    item: MenuItem,
    quantity: u32,
    instructions: Option<String>,
) -> DispatchResult<Effect> {
    let message = format!("{} added to cart!", item.name);
    let action = StoreAction::CartAdd {
        item,
        quantity,
        instructions,
    };
    if store(state, action) {
        DispatchResult::changed_with(Effect::Notify(Notice::success(message)))
    } else {
        DispatchResult::unchanged()
    }
}

fn focus_mut(state: &mut AppState, form: FormId) -> Option<&mut usize> {
    match form {
        FormId::Checkout => Some(&mut state.checkout.focus),
        FormId::Reservation => Some(&mut state.reservation.focus),
        FormId::Review => Some(&mut state.review.focus),
        FormId::MenuItem => state.admin.editor.as_mut().map(|e| &mut e.state.focus),
    }
}

fn set_submitting(state: &mut AppState, workflow: Workflow, submitting: bool) {
    match workflow {
        Workflow::Checkout => state.checkout.submitting = submitting,
        Workflow::Reservation => state.reservation.submitting = submitting,
        Workflow::Review => state.review.submitting = submitting,
    }
}

/// Apply an edit to a form and clear the error of the edited field
///
/// `apply` returns `false` when the input does not belong to the form.
/// Forms are locked while their submission is in flight.
fn edit<F>(
    form: &mut FormState<F>,
    input: Input,
    apply: impl FnOnce(&mut F) -> bool,
) -> DispatchResult<Effect> {
    if form.submitting || !apply(&mut form.form) {
        return DispatchResult::unchanged();
    }
    if let Some(field) = input.field() {
        form.errors.clear(field);
    }
    DispatchResult::changed()
}

fn input_change(state: &mut AppState, input: Input, value: String) -> DispatchResult<Effect> {
    match state.active_form() {
        Some(FormId::Checkout) => edit(&mut state.checkout, input, |form| {
            let slot = match input {
                Input::Name => &mut form.name,
                Input::Email => &mut form.email,
                Input::Phone => &mut form.phone,
                Input::Address => &mut form.address,
                _ => return false,
            };
            *slot = value;
            true
        }),
        Some(FormId::Reservation) => edit(&mut state.reservation, input, |form| {
            let slot = match input {
                Input::Name => &mut form.name,
                Input::Email => &mut form.email,
                Input::Phone => &mut form.phone,
                Input::Date => &mut form.date,
                Input::SpecialRequests => &mut form.special_requests,
                _ => return false,
            };
            *slot = value;
            true
        }),
        Some(FormId::Review) => edit(&mut state.review, input, |form| {
            let slot = match input {
                Input::Name => &mut form.name,
                Input::Comment => &mut form.comment,
                _ => return false,
            };
            *slot = value;
            true
        }),
        Some(FormId::MenuItem) => match state.admin.editor.as_mut() {
            Some(editor) => edit(&mut editor.state, input, |form| {
                let slot = match input {
                    Input::Name => &mut form.name,
                    Input::Description => &mut form.description,
                    Input::Price => &mut form.price,
                    Input::Image => &mut form.image,
                    _ => return false,
                };
                *slot = value;
                true
            }),
            None => DispatchResult::unchanged(),
        },
        None => DispatchResult::unchanged(),
    }
}

fn choice_step(state: &mut AppState, input: Input, forward: bool) -> DispatchResult<Effect> {
    match state.active_form() {
        Some(FormId::Checkout) => {
            let result = edit(&mut state.checkout, input, |form| {
                if input != Input::Fulfillment {
                    return false;
                }
                form.fulfillment = form.fulfillment.toggle();
                true
            });
            if state.checkout.form.fulfillment == FulfillmentKind::Takeaway {
                state.checkout.errors.clear(Field::Address);
            }
            result
        }
        Some(FormId::Reservation) => edit(&mut state.reservation, input, |form| match input {
            Input::Time => {
                form.cycle_time(forward);
                true
            }
            Input::Guests => {
                let before = form.guests;
                form.guests = if forward {
                    before.saturating_add(1).min(MAX_GUESTS)
                } else {
                    before.saturating_sub(1).max(MIN_GUESTS)
                };
                form.guests != before
            }
            _ => false,
        }),
        Some(FormId::Review) => {
            let menu = &state.shop.menu;
            edit(&mut state.review, input, |form| match input {
                Input::Rating => {
                    form.rating = step_rating(form.rating, forward);
                    true
                }
                Input::Dish => {
                    form.menu_item = step_dish(menu, form.menu_item.as_ref(), forward);
                    true
                }
                _ => false,
            })
        }
        Some(FormId::MenuItem) => match state.admin.editor.as_mut() {
            Some(editor) => edit(&mut editor.state, input, |form| match input {
                Input::Category => {
                    form.category = if forward {
                        form.category.next()
                    } else {
                        form.category.prev()
                    };
                    true
                }
                Input::Popular => {
                    form.popular = !form.popular;
                    true
                }
                _ => false,
            }),
            None => DispatchResult::unchanged(),
        },
        None => DispatchResult::unchanged(),
    }
}

/// 1..=5 with wrap-around; 0 (unset) starts at either end
fn step_rating(rating: u8, forward: bool) -> u8 {
    match (rating, forward) {
        (0, true) | (5, true) => 1,
        (0, false) | (1, false) => 5,
        (r, true) => r + 1,
        (r, false) => r - 1,
    }
}

/// Cycle `None` → first item → ... → last item → `None`
fn step_dish(menu: &[MenuItem], current: Option<&Id>, forward: bool) -> Option<Id> {
    let position = current.and_then(|id| menu.iter().position(|item| &item.id == id));
    let next = match (position, forward) {
        (None, true) => menu.first(),
        (None, false) => menu.last(),
        (Some(i), true) => menu.get(i + 1),
        (Some(0), false) => None,
        (Some(i), false) => menu.get(i - 1),
    };
    next.map(|item| item.id.clone())
}

fn submit_checkout(state: &mut AppState) -> DispatchResult<Effect> {
    if state.checkout.submitting {
        return DispatchResult::unchanged();
    }
    if state.shop.cart.is_empty() {
        return DispatchResult::effect(Effect::Notify(Notice::error(EMPTY_CART_MESSAGE)));
    }
    let inputs = state.inputs(FormId::Checkout);
    let result = state
        .checkout
        .form
        .validate()
        .map(|request| Submission::checkout(request, &state.shop.cart, &state.pricing));
    begin_submit(&mut state.checkout, inputs, result)
}

/// Record validation errors, or lock the form and hand out the submission
fn begin_submit<F>(
    form: &mut FormState<F>,
    inputs: &[Input],
    result: Result<Submission, FieldErrors>,
) -> DispatchResult<Effect> {
    if form.submitting {
        return DispatchResult::unchanged();
    }
    match result {
        Ok(submission) => {
            form.errors = FieldErrors::new();
            form.submitting = true;
            DispatchResult::changed_with(Effect::Submit(submission))
        }
        Err(errors) => {
            form.errors = errors;
            form.focus_first_error(inputs);
            DispatchResult::changed()
        }
    }
}

fn save_menu_item(state: &mut AppState) -> DispatchResult<Effect> {
    let inputs = state.inputs(FormId::MenuItem);
    let Some(editor) = state.admin.editor.as_mut() else {
        return DispatchResult::unchanged();
    };
    let draft = match editor.state.form.validate() {
        Ok(draft) => draft,
        Err(errors) => {
            editor.state.errors = errors;
            editor.state.focus_first_error(inputs);
            return DispatchResult::changed();
        }
    };
    let editing = editor.editing.clone();
    state.admin.editor = None;

    match editing {
        Some(id) => {
            if state.shop.menu_item(&id).is_none() {
                return DispatchResult::changed();
            }
            store(
                state,
                StoreAction::MenuItemUpdate {
                    id,
                    patch: draft.into_patch(),
                },
            );
            DispatchResult::changed_with(Effect::Notify(Notice::success(
                "Menu item updated successfully!",
            )))
        }
        None => DispatchResult::changed_with(Effect::CreateMenuItem(draft)),
    }
}

fn admin_menu_item(state: &AppState) -> Option<&MenuItem> {
    if state.admin.tab != AdminTab::Menu {
        return None;
    }
    state.shop.menu.get(state.admin.selected)
}

fn admin_order(state: &AppState) -> Option<(Id, OrderStatus)> {
    if state.admin.tab != AdminTab::Orders {
        return None;
    }
    state
        .shop
        .orders
        .get(state.admin.selected)
        .map(|order| (order.id.clone(), order.status))
}

fn set_reservation_status(
    state: &mut AppState,
    id: Id,
    status: ReservationStatus,
) -> DispatchResult<Effect> {
    let action = StoreAction::ReservationUpdate {
        id,
        patch: ReservationPatch::status(status),
    };
    if store(state, action) {
        DispatchResult::changed_with(Effect::Notify(Notice::success(format!(
            "Reservation {} successfully!",
            status
        ))))
    } else {
        DispatchResult::unchanged()
    }
}

fn set_order_status(state: &mut AppState, id: Id, status: OrderStatus) -> DispatchResult<Effect> {
    let action = StoreAction::OrderUpdate {
        id,
        patch: OrderPatch::status(status),
    };
    if store(state, action) {
        DispatchResult::changed_with(Effect::Notify(Notice::success(format!(
            "Order status updated to {}!",
            status
        ))))
    } else {
        DispatchResult::unchanged()
    }
}

/// Esc: the innermost thing wins
fn back(state: &mut AppState) -> DispatchResult<Effect> {
    if let Some(workflow) = state.screen.workflow() {
        if state.is_submitting(workflow) {
            // `submitting` stays set until the cancellation result arrives
            return DispatchResult::effect(Effect::CancelSubmit(workflow));
        }
    }
    if state.admin.confirm_delete.take().is_some() {
        return DispatchResult::changed();
    }
    if state.admin.editor.take().is_some() {
        return DispatchResult::changed();
    }
    if state.menu.detail.take().is_some() {
        return DispatchResult::changed();
    }
    changed_if(std::mem::replace(&mut state.menu.search_focused, false))
}

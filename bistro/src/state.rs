//! Application state: the storefront plus everything the screens need
//!
//! The storefront itself lives in `shop` and is only ever changed through
//! `bistro_core::reduce`. The rest is view state: which screen is open,
//! selections, form contents and the notice on display.

use bistro_core::forms::{
    CheckoutForm, Field, FieldErrors, MenuItemForm, ReservationForm, ReviewForm,
};
use bistro_core::model::{FulfillmentKind, Id, MenuItem};
use bistro_core::{views, Notice, Pricing, Storefront, Workflow};
use chrono::NaiveDate;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Screen {
    #[default]
    Home,
    Menu,
    Order,
    Reservations,
    Reviews,
    Admin,
}

impl Screen {
    pub const ALL: [Screen; 6] = [
        Screen::Home,
        Screen::Menu,
        Screen::Order,
        Screen::Reservations,
        Screen::Reviews,
        Screen::Admin,
    ];

    pub fn title(self) -> &'static str {
        match self {
            Screen::Home => "Home",
            Screen::Menu => "Menu",
            Screen::Order => "Order",
            Screen::Reservations => "Reservations",
            Screen::Reviews => "Reviews",
            Screen::Admin => "Admin",
        }
    }

    /// Function key number that opens the screen
    pub fn hotkey(self) -> u8 {
        match self {
            Screen::Home => 1,
            Screen::Menu => 2,
            Screen::Order => 3,
            Screen::Reservations => 4,
            Screen::Reviews => 5,
            Screen::Admin => 6,
        }
    }

    pub fn from_hotkey(n: u8) -> Option<Screen> {
        Screen::ALL.into_iter().find(|screen| screen.hotkey() == n)
    }

    /// The submission whose form lives on this screen
    pub fn workflow(self) -> Option<Workflow> {
        match self {
            Screen::Order => Some(Workflow::Checkout),
            Screen::Reservations => Some(Workflow::Reservation),
            Screen::Reviews => Some(Workflow::Review),
            Screen::Home | Screen::Menu | Screen::Admin => None,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FormId {
    Checkout,
    Reservation,
    Review,
    MenuItem,
}

impl FormId {
    pub fn workflow(self) -> Option<Workflow> {
        match self {
            FormId::Checkout => Some(Workflow::Checkout),
            FormId::Reservation => Some(Workflow::Reservation),
            FormId::Review => Some(Workflow::Review),
            FormId::MenuItem => None,
        }
    }
}

/// One focusable row of a form
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Input {
    Cart,
    Fulfillment,
    Name,
    Email,
    Phone,
    Address,
    Date,
    Time,
    Guests,
    SpecialRequests,
    Rating,
    Dish,
    Comment,
    Description,
    Price,
    Category,
    Image,
    Popular,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InputKind {
    /// Free text edited in place
    Text,
    /// Cycled with left/right
    Choice,
    /// A list with its own keys
    List,
}

impl Input {
    pub fn label(self) -> &'static str {
        match self {
            Input::Cart => "Cart",
            Input::Fulfillment => "Order type",
            Input::Name => "Name",
            Input::Email => "Email",
            Input::Phone => "Phone",
            Input::Address => "Delivery address",
            Input::Date => "Date (YYYY-MM-DD)",
            Input::Time => "Time",
            Input::Guests => "Guests",
            Input::SpecialRequests => "Special requests",
            Input::Rating => "Rating",
            Input::Dish => "Menu item",
            Input::Comment => "Review",
            Input::Description => "Description",
            Input::Price => "Price",
            Input::Category => "Category",
            Input::Image => "Image URL",
            Input::Popular => "Popular",
        }
    }

    pub fn kind(self) -> InputKind {
        match self {
            Input::Cart => InputKind::List,
            Input::Fulfillment
            | Input::Time
            | Input::Guests
            | Input::Rating
            | Input::Dish
            | Input::Category
            | Input::Popular => InputKind::Choice,
            Input::Name
            | Input::Email
            | Input::Phone
            | Input::Address
            | Input::Date
            | Input::SpecialRequests
            | Input::Comment
            | Input::Description
            | Input::Price
            | Input::Image => InputKind::Text,
        }
    }

    /// The validation field reported for this input, if any
    pub fn field(self) -> Option<Field> {
        match self {
            Input::Name => Some(Field::Name),
            Input::Email => Some(Field::Email),
            Input::Phone => Some(Field::Phone),
            Input::Address => Some(Field::Address),
            Input::Date => Some(Field::Date),
            Input::Time => Some(Field::Time),
            Input::Guests => Some(Field::Guests),
            Input::Rating => Some(Field::Rating),
            Input::Comment => Some(Field::Comment),
            Input::Description => Some(Field::Description),
            Input::Price => Some(Field::Price),
            Input::Cart
            | Input::Fulfillment
            | Input::SpecialRequests
            | Input::Dish
            | Input::Category
            | Input::Image
            | Input::Popular => None,
        }
    }
}

const CHECKOUT_DELIVERY: &[Input] = &[
    Input::Cart,
    Input::Fulfillment,
    Input::Name,
    Input::Email,
    Input::Phone,
    Input::Address,
];
const CHECKOUT_TAKEAWAY: &[Input] = &[
    Input::Cart,
    Input::Fulfillment,
    Input::Name,
    Input::Email,
    Input::Phone,
];
const RESERVATION: &[Input] = &[
    Input::Name,
    Input::Email,
    Input::Phone,
    Input::Date,
    Input::Time,
    Input::Guests,
    Input::SpecialRequests,
];
const REVIEW: &[Input] = &[Input::Rating, Input::Dish, Input::Name, Input::Comment];
const MENU_ITEM: &[Input] = &[
    Input::Name,
    Input::Description,
    Input::Price,
    Input::Category,
    Input::Image,
    Input::Popular,
];

/// Raw form contents plus their validation and submission status
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FormState<F> {
    pub form: F,
    pub errors: FieldErrors,
    /// Index into the form's input list
    pub focus: usize,
    /// A submission is in flight; cleared by its result
    pub submitting: bool,
}

impl<F: Default> FormState<F> {
    /// Back to an empty form, e.g. after a successful submission
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

impl<F> FormState<F> {
    pub fn focused(&self, inputs: &[Input]) -> Option<Input> {
        inputs.get(self.focus).copied()
    }

    /// Put the focus on the first input that failed validation
    pub fn focus_first_error(&mut self, inputs: &[Input]) {
        if let Some(index) = inputs
            .iter()
            .position(|input| input.field().is_some_and(|f| self.errors.contains(f)))
        {
            self.focus = index;
        }
    }
}

/// Quantity picker for one menu item
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MenuDetail {
    pub item_id: Id,
    pub quantity: u32,
    pub instructions: String,
}

impl MenuDetail {
    pub fn new(item_id: Id) -> Self {
        Self {
            item_id,
            quantity: 1,
            instructions: String::new(),
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MenuView {
    /// Index into the grouped, filtered menu
    pub selected: usize,
    pub search_focused: bool,
    pub detail: Option<MenuDetail>,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum AdminTab {
    #[default]
    Menu,
    Reservations,
    Orders,
}

impl AdminTab {
    pub const ALL: [AdminTab; 3] = [AdminTab::Menu, AdminTab::Reservations, AdminTab::Orders];

    pub fn title(self) -> &'static str {
        match self {
            AdminTab::Menu => "Menu Items",
            AdminTab::Reservations => "Reservations",
            AdminTab::Orders => "Orders",
        }
    }

    pub fn next(self) -> Self {
        match self {
            AdminTab::Menu => AdminTab::Reservations,
            AdminTab::Reservations => AdminTab::Orders,
            AdminTab::Orders => AdminTab::Menu,
        }
    }

    pub fn prev(self) -> Self {
        match self {
            AdminTab::Menu => AdminTab::Orders,
            AdminTab::Reservations => AdminTab::Menu,
            AdminTab::Orders => AdminTab::Reservations,
        }
    }
}

/// Add/edit dialog for a menu item
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MenuEditor {
    /// `None` while creating a new item
    pub editing: Option<Id>,
    pub state: FormState<MenuItemForm>,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct AdminView {
    pub tab: AdminTab,
    pub selected: usize,
    pub editor: Option<MenuEditor>,
    /// Item waiting for a delete confirmation
    pub confirm_delete: Option<Id>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct AppState {
    pub shop: Storefront,
    pub pricing: Pricing,
    /// Reference date for reservation validation
    pub today: NaiveDate,
    pub screen: Screen,
    pub menu: MenuView,
    pub cart_selected: usize,
    pub checkout: FormState<CheckoutForm>,
    pub reservation: FormState<ReservationForm>,
    pub review: FormState<ReviewForm>,
    pub admin: AdminView,
    pub notice: Option<Notice>,
    pub terminal_size: (u16, u16),
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(Storefront::default(), Pricing::default(), NaiveDate::default())
    }
}

impl AppState {
    pub fn new(shop: Storefront, pricing: Pricing, today: NaiveDate) -> Self {
        Self {
            shop,
            pricing,
            today,
            screen: Screen::Home,
            menu: MenuView::default(),
            cart_selected: 0,
            checkout: FormState::default(),
            reservation: FormState::default(),
            review: FormState::default(),
            admin: AdminView::default(),
            notice: None,
            terminal_size: (80, 24),
        }
    }

    // ===== Menu =====

    /// The filtered menu in display order (grouped by category)
    pub fn menu_entries(&self) -> Vec<&MenuItem> {
        views::menu_sections(&self.shop)
            .into_iter()
            .flat_map(|section| section.items)
            .collect()
    }

    pub fn selected_menu_item(&self) -> Option<&MenuItem> {
        self.menu_entries().get(self.menu.selected).copied()
    }

    pub fn detail_item(&self) -> Option<&MenuItem> {
        self.menu
            .detail
            .as_ref()
            .and_then(|detail| self.shop.menu_item(&detail.item_id))
    }

    // ===== Forms =====

    /// The form that receives input on the current screen
    pub fn active_form(&self) -> Option<FormId> {
        match self.screen {
            Screen::Order => Some(FormId::Checkout),
            Screen::Reservations => Some(FormId::Reservation),
            Screen::Reviews => Some(FormId::Review),
            Screen::Admin if self.admin.editor.is_some() => Some(FormId::MenuItem),
            Screen::Home | Screen::Menu | Screen::Admin => None,
        }
    }

    pub fn inputs(&self, form: FormId) -> &'static [Input] {
        match form {
            FormId::Checkout => match self.checkout.form.fulfillment {
                FulfillmentKind::Delivery => CHECKOUT_DELIVERY,
                FulfillmentKind::Takeaway => CHECKOUT_TAKEAWAY,
            },
            FormId::Reservation => RESERVATION,
            FormId::Review => REVIEW,
            FormId::MenuItem => MENU_ITEM,
        }
    }

    pub fn focused_input(&self, form: FormId) -> Option<Input> {
        let inputs = self.inputs(form);
        match form {
            FormId::Checkout => self.checkout.focused(inputs),
            FormId::Reservation => self.reservation.focused(inputs),
            FormId::Review => self.review.focused(inputs),
            FormId::MenuItem => self
                .admin
                .editor
                .as_ref()
                .and_then(|editor| editor.state.focused(inputs)),
        }
    }

    pub fn is_submitting(&self, workflow: Workflow) -> bool {
        match workflow {
            Workflow::Checkout => self.checkout.submitting,
            Workflow::Reservation => self.reservation.submitting,
            Workflow::Review => self.review.submitting,
        }
    }

    // ===== Admin =====

    pub fn admin_len(&self) -> usize {
        match self.admin.tab {
            AdminTab::Menu => self.shop.menu.len(),
            AdminTab::Reservations => self.shop.reservations.len(),
            AdminTab::Orders => self.shop.orders.len(),
        }
    }

    /// Keep every selection inside its list after the store changed
    pub fn clamp_selections(&mut self) {
        let menu_len = self.menu_entries().len();
        self.menu.selected = clamp(self.menu.selected, menu_len);
        self.cart_selected = clamp(self.cart_selected, self.shop.cart.len());
        self.admin.selected = clamp(self.admin.selected, self.admin_len());

        if self.detail_item().is_none() {
            self.menu.detail = None;
        }
        if let Some(id) = &self.admin.confirm_delete {
            if self.shop.menu_item(id).is_none() {
                self.admin.confirm_delete = None;
            }
        }
        let focus_len = self.inputs(FormId::Checkout).len();
        self.checkout.focus = clamp(self.checkout.focus, focus_len);
    }
}

fn clamp(index: usize, len: usize) -> usize {
    index.min(len.saturating_sub(1))
}

#[cfg(test)]
mod tests {
    use super::*;
    use bistro_core::Seed;

    fn seeded() -> AppState {
        let seed = Seed::bundled().expect("bundled seed");
        AppState::new(
            Storefront::from_seed(seed),
            Pricing::default(),
            NaiveDate::from_ymd_opt(2025, 6, 1).expect("date"),
        )
    }

    #[test]
    fn test_hotkeys_round_trip() {
        for screen in Screen::ALL {
            assert_eq!(Screen::from_hotkey(screen.hotkey()), Some(screen));
        }
        assert_eq!(Screen::from_hotkey(9), None);
    }

    #[test]
    fn test_active_form_follows_screen() {
        let mut state = AppState::default();
        assert_eq!(state.active_form(), None);

        state.screen = Screen::Order;
        assert_eq!(state.active_form(), Some(FormId::Checkout));

        state.screen = Screen::Admin;
        assert_eq!(state.active_form(), None);
        state.admin.editor = Some(MenuEditor::default());
        assert_eq!(state.active_form(), Some(FormId::MenuItem));
    }

    #[test]
    fn test_checkout_inputs_drop_address_for_takeaway() {
        let mut state = AppState::default();
        assert!(state.inputs(FormId::Checkout).contains(&Input::Address));

        state.checkout.form.fulfillment = FulfillmentKind::Takeaway;
        assert!(!state.inputs(FormId::Checkout).contains(&Input::Address));
    }

    #[test]
    fn test_menu_entries_follow_filters() {
        let mut state = seeded();
        let all = state.menu_entries().len();
        assert_eq!(all, state.shop.menu.len());

        state.shop.search_query = "zzz-not-on-the-menu".into();
        assert!(state.menu_entries().is_empty());
        assert!(state.selected_menu_item().is_none());
    }

    #[test]
    fn test_clamp_selections() {
        let mut state = seeded();
        state.menu.selected = 99;
        state.admin.selected = 99;
        state.cart_selected = 5;
        state.menu.detail = Some(MenuDetail::new(Id::new("gone")));

        state.clamp_selections();

        assert_eq!(state.menu.selected, state.shop.menu.len() - 1);
        assert_eq!(state.admin.selected, state.shop.menu.len() - 1);
        assert_eq!(state.cart_selected, 0);
        assert!(state.menu.detail.is_none());
    }

    #[test]
    fn test_focus_first_error() {
        let mut form = FormState::<ReservationForm>::default();
        form.errors.insert(Field::Time, "Time is required");
        form.errors.insert(Field::Guests, "Number of guests must be between 1 and 12");

        form.focus_first_error(RESERVATION);
        assert_eq!(form.focused(RESERVATION), Some(Input::Time));
    }
}

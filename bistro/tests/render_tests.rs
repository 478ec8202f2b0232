//! Whole-frame rendering of every screen against the bundled seed

use bistro::action::Action;
use bistro::reducer::reducer;
use bistro::state::{AdminTab, AppState, Screen};
use bistro::testing::RenderHarness;
use bistro::ui::BistroUi;
use bistro_core::{Pricing, Seed, Storefront};
use chrono::NaiveDate;

fn seeded() -> AppState {
    let seed = Seed::bundled().expect("bundled seed");
    AppState::new(
        Storefront::from_seed(seed),
        Pricing::default(),
        NaiveDate::from_ymd_opt(2025, 6, 1).expect("date"),
    )
}

fn render(state: &AppState) -> String {
    let mut ui = BistroUi::new();
    let mut harness = RenderHarness::new(140, 40);
    harness.render_to_string_plain(|frame| {
        let area = frame.area();
        ui.render(frame, area, state);
    })
}

fn on(screen: Screen) -> AppState {
    let mut state = seeded();
    reducer(&mut state, Action::NavScreenSet(screen));
    state
}

#[test]
fn test_home() {
    let output = render(&seeded());

    assert!(output.contains("Welcome to Bistro"));
    assert!(output.contains("Popular Dishes"));
    assert!(output.contains("Buttermilk Pancakes"));
    assert!(output.contains("What Guests Say"));
}

#[test]
fn test_menu_lists_every_section() {
    let output = render(&on(Screen::Menu));

    assert!(output.contains("Our Menu"));
    assert!(output.contains("Buttermilk Pancakes"));
    assert!(output.contains("Ribeye Steak"));
    assert!(output.contains("Chocolate Lava Cake"));
    assert!(output.contains("Search"));
}

#[test]
fn test_menu_with_detail_open() {
    let mut state = on(Screen::Menu);
    reducer(&mut state, Action::DetailOpen);
    reducer(&mut state, Action::DetailQuantityStep { up: true });

    let output = render(&state);

    assert!(output.contains("Special instructions"));
    assert!(output.contains("$23.00"));
}

#[test]
fn test_order_with_cart() {
    let mut state = on(Screen::Menu);
    reducer(&mut state, Action::MenuQuickAdd);
    reducer(&mut state, Action::NavScreenSet(Screen::Order));

    let output = render(&state);

    assert!(output.contains("Cart: 1"));
    assert!(output.contains("Your Cart"));
    assert!(output.contains("Order Summary"));
    // 11.50 + 5.99 delivery, 8.875% tax
    assert!(output.contains("$19.04"));
    assert!(output.contains("Checkout"));
}

#[test]
fn test_reservations() {
    let output = render(&on(Screen::Reservations));

    assert!(output.contains("Book a Table"));
    assert!(output.contains("2 guests"));
    assert!(output.contains("11:00"));
}

#[test]
fn test_reviews() {
    let output = render(&on(Screen::Reviews));

    assert!(output.contains("Guest Reviews"));
    assert!(output.contains("Write a Review"));
    assert!(output.contains("Not rated"));
}

#[test]
fn test_admin_tabs() {
    let mut state = on(Screen::Admin);
    let output = render(&state);
    assert!(output.contains("Menu Items (10)"));
    assert!(output.contains("Reservations (1 pending)"));
    assert!(output.contains("Orders (1 pending)"));

    reducer(&mut state, Action::AdminTabSet(AdminTab::Reservations));
    let output = render(&state);
    assert!(output.contains("John Smith"));
    assert!(output.contains("Maria Garcia"));

    reducer(&mut state, Action::AdminTabSet(AdminTab::Orders));
    let output = render(&state);
    assert!(output.contains("Alex Johnson"));
    assert!(output.contains("Priya Patel"));
}

#[test]
fn test_admin_editor_and_confirm() {
    let mut state = on(Screen::Admin);
    reducer(&mut state, Action::AdminItemNew);
    assert!(render(&state).contains("Add Menu Item"));

    reducer(&mut state, Action::UiBack);
    reducer(&mut state, Action::AdminItemDeleteRequest);
    assert!(state.admin.confirm_delete.is_some());
    assert!(render(&state).contains("Delete \"Buttermilk Pancakes\"?"));
}

#[test]
fn test_small_terminal_does_not_panic() {
    let state = on(Screen::Order);
    let mut ui = BistroUi::new();
    let mut harness = RenderHarness::new(20, 6);

    harness.render(|frame| {
        let area = frame.area();
        ui.render(frame, area, &state);
    });
}

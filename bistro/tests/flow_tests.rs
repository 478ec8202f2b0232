//! End-to-end flows: keys through the UI, the reducer and the effect handler

use std::time::Duration;

use bistro::action::Action;
use bistro::app::EffectHandler;
use bistro::reducer::reducer;
use bistro::runtime::EffectContext;
use bistro::state::{AdminTab, AppState, Input, Screen};
use bistro::testing::{key_press, typed};
use bistro::ui::BistroUi;
use bistro_core::model::{FulfillmentKind, OrderStatus, ReservationStatus};
use bistro_core::testing::TestHarness;
use bistro_core::{
    NoticeBoard, NoticeKind, Pricing, Seed, SimulatedBackend, Storefront, SubmitDelays,
    TaskManager, Workflow,
};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use tokio::sync::mpsc;

struct Flow {
    harness: TestHarness<AppState, Action>,
    ui: BistroUi,
    tx: mpsc::UnboundedSender<Action>,
    tasks: TaskManager<Action>,
    handler: EffectHandler,
    board: NoticeBoard,
}

impl Flow {
    fn new(delays: SubmitDelays) -> Self {
        let seed = Seed::bundled().expect("bundled seed");
        let state = AppState::new(
            Storefront::from_seed(seed),
            Pricing::default(),
            NaiveDate::from_ymd_opt(2025, 6, 1).expect("date"),
        );
        let harness = TestHarness::new(state);
        let tx = harness.sender();
        let tasks = TaskManager::new(tx.clone());
        let (notifier, board) = NoticeBoard::channel();
        let handler = EffectHandler::new(
            SimulatedBackend::new(delays),
            notifier,
            Duration::from_secs(60),
        );
        Self {
            harness,
            ui: BistroUi::new(),
            tx,
            tasks,
            handler,
            board,
        }
    }

    /// Reduce one action, run its effects and show any published notices
    fn dispatch(&mut self, action: Action) {
        let result = reducer(&mut self.harness.state, action);
        {
            let mut ctx = EffectContext::new(&self.tx, &mut self.tasks);
            for effect in result.effects {
                self.handler.handle(effect, &mut ctx);
            }
        }
        for notice in self.board.drain() {
            self.dispatch(Action::NoticeShow(notice));
        }
    }

    fn press(&mut self, key: &str) {
        let outcome = self.ui.map_event(&key_press(key), &self.harness.state);
        for action in outcome.actions {
            self.dispatch(action);
        }
    }

    fn type_text(&mut self, text: &str) {
        for event in typed(text) {
            let outcome = self.ui.map_event(&event, &self.harness.state);
            for action in outcome.actions {
                self.dispatch(action);
            }
        }
    }

    /// Wait for the next action from a task and dispatch it
    async fn settle(&mut self) {
        let action = self.harness.next_emitted().await.expect("action from a task");
        self.dispatch(action);
    }

    fn notice(&self) -> Option<(&str, NoticeKind)> {
        self.harness.state
            .notice
            .as_ref()
            .map(|notice| (notice.message.as_str(), notice.kind))
    }
}

#[tokio::test]
async fn test_checkout_from_menu_to_order() {
    let mut flow = Flow::new(SubmitDelays::instant());

    // Two pancakes from the menu
    flow.press("f2");
    flow.press("a");
    flow.press("a");
    assert_eq!(flow.harness.state.shop.cart.len(), 1);
    assert_eq!(flow.harness.state.shop.cart[0].quantity, 2);
    assert_eq!(
        flow.notice(),
        Some(("Buttermilk Pancakes added to cart!", NoticeKind::Success))
    );

    // Cart -> order type -> name
    flow.press("f3");
    flow.press("enter");
    flow.press("right");
    assert_eq!(flow.harness.state.checkout.form.fulfillment, FulfillmentKind::Takeaway);
    flow.press("tab");
    assert_eq!(
        flow.harness.state.focused_input(bistro::state::FormId::Checkout),
        Some(Input::Name)
    );
    flow.type_text("Jane Doe");
    flow.press("tab");
    flow.type_text("jane@example.com");
    flow.press("tab");
    flow.type_text("555-0100");

    flow.press("ctrl+s");
    assert!(flow.harness.state.checkout.submitting);

    flow.settle().await;

    let order = flow.harness.state.shop.orders.last().expect("new order");
    assert_eq!(order.customer.name, "Jane Doe");
    assert_eq!(order.fulfillment.kind(), FulfillmentKind::Takeaway);
    assert_eq!(order.status, OrderStatus::Pending);
    // 23.00 plus 8.875% tax
    assert_eq!(order.total, Decimal::new(2504, 2));
    assert!(flow.harness.state.shop.cart.is_empty());
    assert!(!flow.harness.state.checkout.submitting);
    assert_eq!(flow.harness.state.checkout.form.name, "");
    assert_eq!(
        flow.notice(),
        Some((
            "Order placed successfully! Ready for pickup in 15-20 minutes",
            NoticeKind::Success
        ))
    );
}

#[tokio::test]
async fn test_checkout_validation_blocks_submission() {
    let mut flow = Flow::new(SubmitDelays::instant());
    flow.press("f3");

    flow.press("ctrl+s");
    assert_eq!(
        flow.notice(),
        Some((
            "Your cart is empty. Please add items before ordering.",
            NoticeKind::Error
        ))
    );

    flow.press("f2");
    flow.press("a");
    flow.press("f3");
    flow.press("ctrl+s");

    assert!(!flow.harness.state.checkout.submitting);
    assert!(!flow.harness.state.checkout.errors.is_empty());
    assert_eq!(
        flow.harness.state.focused_input(bistro::state::FormId::Checkout),
        Some(Input::Name)
    );
    assert!(!flow.tasks.is_running(&Workflow::Checkout.key()));
}

#[tokio::test(start_paused = true)]
async fn test_escape_cancels_a_running_reservation() {
    let mut flow = Flow::new(SubmitDelays::default());
    flow.press("f4");
    flow.type_text("Kim Lee");
    flow.press("tab");
    flow.type_text("kim@example.com");
    flow.press("tab");
    flow.type_text("555-0199");
    flow.press("tab");
    flow.type_text("2025-06-02");
    flow.press("tab");
    flow.press("right");
    flow.press("ctrl+s");
    assert!(flow.harness.state.reservation.submitting);
    let before = flow.harness.state.shop.reservations.len();

    flow.press("esc");
    flow.settle().await;

    assert!(!flow.harness.state.reservation.submitting);
    assert_eq!(flow.harness.state.shop.reservations.len(), before);
    assert_eq!(flow.harness.state.reservation.form.name, "Kim Lee");
    assert_eq!(flow.notice().map(|(_, kind)| kind), Some(NoticeKind::Error));
}

#[tokio::test]
async fn test_review_is_listed_after_submission() {
    let mut flow = Flow::new(SubmitDelays::instant());
    let before = flow.harness.state.shop.reviews.len();
    flow.press("f5");

    flow.press("4");
    flow.press("tab");
    flow.press("tab");
    flow.type_text("Sam");
    flow.press("tab");
    flow.type_text("Lovely risotto");
    flow.press("ctrl+s");
    flow.settle().await;

    assert_eq!(flow.harness.state.shop.reviews.len(), before + 1);
    let review = flow.harness.state.shop.reviews.last().expect("review");
    assert_eq!(review.rating, 4);
    assert_eq!(review.customer_name, "Sam");
    assert_eq!(
        flow.notice(),
        Some(("Thank you for your review!", NoticeKind::Success))
    );
}

#[tokio::test]
async fn test_admin_adds_and_deletes_a_menu_item() {
    let mut flow = Flow::new(SubmitDelays::instant());
    let before = flow.harness.state.shop.menu.len();
    flow.press("f6");

    flow.press("n");
    assert!(flow.harness.state.admin.editor.is_some());
    flow.type_text("Tomato Soup");
    flow.press("tab");
    flow.type_text("Slow roasted tomatoes");
    flow.press("tab");
    flow.type_text("7.50");
    flow.press("ctrl+s");

    assert!(flow.harness.state.admin.editor.is_none());
    flow.settle().await;
    assert_eq!(flow.harness.state.shop.menu.len(), before + 1);
    let added = flow.harness.state.shop.menu.last().expect("new item");
    assert_eq!(added.name, "Tomato Soup");
    assert_eq!(added.price, Decimal::new(750, 2));

    flow.press("d");
    assert!(flow.harness.state.admin.confirm_delete.is_some());
    flow.press("n");
    assert!(flow.harness.state.admin.confirm_delete.is_none());
    assert_eq!(flow.harness.state.shop.menu.len(), before + 1);

    flow.press("d");
    flow.press("y");
    assert_eq!(flow.harness.state.shop.menu.len(), before);
    assert_eq!(
        flow.notice(),
        Some(("Menu item deleted successfully!", NoticeKind::Success))
    );
}

#[tokio::test]
async fn test_admin_moves_reservations_and_orders() {
    let mut flow = Flow::new(SubmitDelays::instant());
    flow.press("f6");

    flow.press("right");
    assert_eq!(flow.harness.state.admin.tab, AdminTab::Reservations);
    let pending = flow
        .harness
        .state
        .shop
        .reservations
        .iter()
        .position(|r| r.status == ReservationStatus::Pending)
        .expect("a pending reservation");
    flow.dispatch(Action::AdminSelect(pending));
    flow.press("c");
    assert_eq!(
        flow.harness.state.shop.reservations[pending].status,
        ReservationStatus::Confirmed
    );

    flow.press("right");
    assert_eq!(flow.harness.state.admin.tab, AdminTab::Orders);
    let pending = flow
        .harness
        .state
        .shop
        .orders
        .iter()
        .position(|o| o.status == OrderStatus::Pending)
        .expect("a pending order");
    flow.dispatch(Action::AdminSelect(pending));
    flow.press("a");
    assert_eq!(flow.harness.state.shop.orders[pending].status, OrderStatus::Preparing);

    // Only a pending order can be cancelled
    flow.press("x");
    assert_eq!(flow.harness.state.shop.orders[pending].status, OrderStatus::Preparing);
    flow.press("a");
    assert_eq!(flow.harness.state.shop.orders[pending].status, OrderStatus::Ready);
}

#[tokio::test(start_paused = true)]
async fn test_notice_dismisses_itself() {
    let mut flow = Flow::new(SubmitDelays::instant());
    flow.press("f2");
    flow.press("a");
    assert!(flow.harness.state.notice.is_some());

    flow.settle().await;

    assert_eq!(flow.harness.state.notice, None);
    assert_eq!(flow.harness.state.screen, Screen::Menu);
}

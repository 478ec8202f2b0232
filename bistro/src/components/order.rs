//! Order screen: the cart, the price breakdown and the checkout form

use crossterm::event::KeyCode;
use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Color, Style, Stylize},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use super::form_view::{FormView, FormViewProps};
use super::money;
use super::select_list::{SelectList, SelectListProps};
use crate::action::Action;
use crate::component::Component;
use crate::event::EventKind;
use crate::state::{AppState, FormId, Input};

#[derive(Default)]
pub struct OrderScreen {
    cart: SelectList,
    form: FormView,
}

pub struct OrderScreenProps<'a> {
    pub state: &'a AppState,
}

impl OrderScreen {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Component<Action> for OrderScreen {
    type Props<'a> = OrderScreenProps<'a>;

    fn handle_event(
        &mut self,
        event: &EventKind,
        props: Self::Props<'_>,
    ) -> impl IntoIterator<Item = Action> {
        let state = props.state;
        if state.focused_input(FormId::Checkout) != Some(Input::Cart) {
            return self
                .form
                .handle_event(
                    event,
                    FormViewProps {
                        state,
                        form: FormId::Checkout,
                        title: "",
                        is_focused: true,
                    },
                )
                .into_iter()
                .collect::<Vec<_>>();
        }
        if state.checkout.submitting {
            return Vec::new();
        }

        if let EventKind::Key(key) = event {
            let action = match key.code {
                KeyCode::Char('+') | KeyCode::Char('=') | KeyCode::Right => {
                    Some(Action::CartQuantityStep { up: true })
                }
                KeyCode::Char('-') | KeyCode::Left => Some(Action::CartQuantityStep { up: false }),
                KeyCode::Char('d') | KeyCode::Delete => Some(Action::CartRemoveSelected),
                KeyCode::Enter => Some(Action::FormFocusNext),
                _ => None,
            };
            if let Some(action) = action {
                return vec![action];
            }
        }

        let lines = cart_lines(state);
        self.cart
            .handle_event(
                event,
                SelectListProps {
                    items: &lines,
                    selected: state.cart_selected,
                    is_focused: true,
                    title: "",
                    empty_message: "",
                    on_select: Action::CartSelect,
                },
            )
            .into_iter()
            .collect::<Vec<_>>()
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        let state = props.state;
        let [left, right] =
            Layout::horizontal([Constraint::Percentage(55), Constraint::Percentage(45)])
                .areas(area);
        let [cart_area, summary_area] =
            Layout::vertical([Constraint::Fill(1), Constraint::Length(7)]).areas(left);

        let lines = cart_lines(state);
        self.cart.render(
            frame,
            cart_area,
            SelectListProps {
                items: &lines,
                selected: state.cart_selected,
                is_focused: state.focused_input(FormId::Checkout) == Some(Input::Cart),
                title: "Your Cart",
                empty_message: "Your cart is empty. Press F2 to browse the menu.",
                on_select: Action::CartSelect,
            },
        );

        let quote = state
            .pricing
            .quote(&state.shop.cart, state.checkout.form.fulfillment);
        let row = |label: &str, value: String| {
            Line::from(vec![
                Span::styled(format!("{:<16}", label), Style::default().fg(Color::Gray)),
                Span::raw(value),
            ])
        };
        let mut summary = vec![row("Subtotal", money(quote.subtotal))];
        if !quote.delivery_fee.is_zero() {
            summary.push(row("Delivery fee", money(quote.delivery_fee)));
        }
        summary.push(row("Tax", money(quote.tax)));
        summary.push(Line::from(vec![
            Span::styled(format!("{:<16}", "Total"), Style::default().bold()),
            Span::styled(money(quote.rounded_total()), Style::default().fg(Color::Green).bold()),
        ]));
        frame.render_widget(
            Paragraph::new(summary).block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(" Order Summary "),
            ),
            summary_area,
        );

        self.form.render(
            frame,
            right,
            FormViewProps {
                state,
                form: FormId::Checkout,
                title: "Checkout",
                is_focused: state.focused_input(FormId::Checkout) != Some(Input::Cart),
            },
        );
    }
}

fn cart_lines(state: &AppState) -> Vec<Line<'static>> {
    state
        .shop
        .cart
        .iter()
        .map(|entry| {
            let mut spans = vec![
                Span::raw(format!("{:>2} × {:<26}", entry.quantity, entry.menu_item.name)),
                Span::styled(
                    format!("{:>9}", money(entry.line_total())),
                    Style::default().fg(Color::Green),
                ),
            ];
            if let Some(note) = &entry.special_instructions {
                spans.push(Span::styled(
                    format!("  ({})", note),
                    Style::default().fg(Color::DarkGray),
                ));
            }
            Line::from(spans)
        })
        .collect()
}

//! Admin dashboard: menu management, reservation and order status

use bistro_core::model::{OrderStatus, ReservationStatus};
use bistro_core::views;
use crossterm::event::KeyCode;
use ratatui::{
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Color, Style, Stylize},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use super::form_view::{FormView, FormViewProps};
use super::modal::{centered_rect, render_modal, ModalStyle};
use super::money;
use super::select_list::{SelectList, SelectListProps};
use crate::action::Action;
use crate::component::Component;
use crate::event::EventKind;
use crate::state::{AdminTab, AppState, FormId};

#[derive(Default)]
pub struct AdminScreen {
    list: SelectList,
    editor: FormView,
}

pub struct AdminScreenProps<'a> {
    pub state: &'a AppState,
}

impl AdminScreen {
    pub fn new() -> Self {
        Self::default()
    }

    /// Key hints for the help bar
    pub fn hints(state: &AppState) -> &'static [(&'static str, &'static str)] {
        if state.admin.editor.is_some() {
            return &[("Tab", "next field"), ("^S", "save"), ("Esc", "close")];
        }
        if state.admin.confirm_delete.is_some() {
            return &[("y", "delete"), ("n/Esc", "keep")];
        }
        match state.admin.tab {
            AdminTab::Menu => &[
                ("←/→", "tab"),
                ("n", "new"),
                ("e", "edit"),
                ("d", "delete"),
                ("^C", "quit"),
            ],
            AdminTab::Reservations => &[
                ("←/→", "tab"),
                ("c", "confirm"),
                ("x", "cancel"),
                ("^C", "quit"),
            ],
            AdminTab::Orders => &[
                ("←/→", "tab"),
                ("Enter", "advance"),
                ("x", "cancel"),
                ("^C", "quit"),
            ],
        }
    }
}

impl Component<Action> for AdminScreen {
    type Props<'a> = AdminScreenProps<'a>;

    fn handle_event(
        &mut self,
        event: &EventKind,
        props: Self::Props<'_>,
    ) -> impl IntoIterator<Item = Action> {
        let state = props.state;
        if state.admin.editor.is_some() {
            return self
                .editor
                .handle_event(
                    event,
                    FormViewProps {
                        state,
                        form: FormId::MenuItem,
                        title: "",
                        is_focused: true,
                    },
                )
                .into_iter()
                .collect::<Vec<_>>();
        }

        let EventKind::Key(key) = event else {
            return self.navigate(event, state);
        };

        if state.admin.confirm_delete.is_some() {
            return match key.code {
                KeyCode::Char('y') | KeyCode::Enter => vec![Action::AdminItemDeleteConfirm],
                KeyCode::Char('n') => vec![Action::UiBack],
                _ => Vec::new(),
            };
        }

        let tab = state.admin.tab;
        let action = match (tab, key.code) {
            (_, KeyCode::Left | KeyCode::Char('h')) => Some(Action::AdminTabSet(tab.prev())),
            (_, KeyCode::Right | KeyCode::Char('l')) => Some(Action::AdminTabSet(tab.next())),
            (AdminTab::Menu, KeyCode::Char('n')) => Some(Action::AdminItemNew),
            (AdminTab::Menu, KeyCode::Char('e') | KeyCode::Enter) => Some(Action::AdminItemEdit),
            (AdminTab::Menu, KeyCode::Char('d') | KeyCode::Delete) => {
                Some(Action::AdminItemDeleteRequest)
            }
            (AdminTab::Reservations, KeyCode::Char('c')) => {
                Some(Action::AdminReservationSet(ReservationStatus::Confirmed))
            }
            (AdminTab::Reservations, KeyCode::Char('x')) => {
                Some(Action::AdminReservationSet(ReservationStatus::Cancelled))
            }
            (AdminTab::Orders, KeyCode::Char('a') | KeyCode::Enter) => {
                Some(Action::AdminOrderAdvance)
            }
            (AdminTab::Orders, KeyCode::Char('x')) => {
                Some(Action::AdminOrderSet(OrderStatus::Cancelled))
            }
            _ => None,
        };
        match action {
            Some(action) => vec![action],
            None => self.navigate(event, state),
        }
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        let state = props.state;
        let [tabs_area, list_area] =
            Layout::vertical([Constraint::Length(1), Constraint::Fill(1)]).areas(area);

        let shop = &state.shop;
        let pending_reservations =
            views::reservation_status_count(&shop.reservations, ReservationStatus::Pending);
        let pending_orders = views::order_status_count(&shop.orders, OrderStatus::Pending);
        let tabs: Vec<Span> = AdminTab::ALL
            .into_iter()
            .map(|tab| {
                let label = match tab {
                    AdminTab::Menu => format!(" {} ({}) ", tab.title(), shop.menu.len()),
                    AdminTab::Reservations => {
                        format!(" {} ({} pending) ", tab.title(), pending_reservations)
                    }
                    AdminTab::Orders => format!(" {} ({} pending) ", tab.title(), pending_orders),
                };
                if tab == state.admin.tab {
                    Span::styled(label, Style::default().fg(Color::Black).bg(Color::Cyan).bold())
                } else {
                    Span::styled(label, Style::default().fg(Color::Gray))
                }
            })
            .collect();
        frame.render_widget(Paragraph::new(Line::from(tabs)), tabs_area);

        let lines = admin_lines(state);
        let overlay = state.admin.editor.is_some() || state.admin.confirm_delete.is_some();
        self.list.render(
            frame,
            list_area,
            SelectListProps {
                items: &lines,
                selected: state.admin.selected,
                is_focused: !overlay,
                title: state.admin.tab.title(),
                empty_message: "Nothing here yet.",
                on_select: Action::AdminSelect,
            },
        );

        if let Some(id) = &state.admin.confirm_delete {
            let name = shop.menu_item(id).map_or("this item", |item| item.name.as_str());
            let modal = centered_rect(50, 5, frame.area());
            render_modal(frame, modal, &ModalStyle::with_bg(Color::Rgb(40, 20, 20)));
            let text = vec![
                Line::from(format!("Delete \"{}\"?", name)).bold(),
                Line::from("y delete   n keep").dark_gray(),
            ];
            frame.render_widget(
                Paragraph::new(text).alignment(Alignment::Center).block(
                    Block::default()
                        .borders(Borders::ALL)
                        .border_style(Style::default().fg(Color::Red))
                        .title(" Confirm "),
                ),
                modal,
            );
        }

        if let Some(editor) = &state.admin.editor {
            let title = if editor.editing.is_some() {
                "Edit Menu Item"
            } else {
                "Add Menu Item"
            };
            let modal = centered_rect(70, 16, frame.area());
            render_modal(frame, modal, &ModalStyle::with_bg(Color::Rgb(25, 25, 35)));
            self.editor.render(
                frame,
                modal,
                FormViewProps {
                    state,
                    form: FormId::MenuItem,
                    title,
                    is_focused: true,
                },
            );
        }
    }
}

impl AdminScreen {
    fn navigate(&mut self, event: &EventKind, state: &AppState) -> Vec<Action> {
        let lines = admin_lines(state);
        self.list
            .handle_event(
                event,
                SelectListProps {
                    items: &lines,
                    selected: state.admin.selected,
                    is_focused: true,
                    title: "",
                    empty_message: "",
                    on_select: Action::AdminSelect,
                },
            )
            .into_iter()
            .collect()
    }
}

fn order_status_color(status: OrderStatus) -> Color {
    match status {
        OrderStatus::Pending => Color::Yellow,
        OrderStatus::Preparing => Color::Blue,
        OrderStatus::Ready => Color::Green,
        OrderStatus::Completed => Color::DarkGray,
        OrderStatus::Cancelled => Color::Red,
    }
}

fn reservation_status_color(status: ReservationStatus) -> Color {
    match status {
        ReservationStatus::Pending => Color::Yellow,
        ReservationStatus::Confirmed => Color::Green,
        ReservationStatus::Cancelled => Color::Red,
    }
}

fn admin_lines(state: &AppState) -> Vec<Line<'static>> {
    let shop = &state.shop;
    match state.admin.tab {
        AdminTab::Menu => shop
            .menu
            .iter()
            .map(|item| {
                Line::from(vec![
                    Span::raw(format!("{:<28} ", item.name)),
                    Span::styled(
                        format!("{:<10}", item.category.label()),
                        Style::default().fg(Color::Magenta),
                    ),
                    Span::styled(
                        format!("{:>9}", money(item.price)),
                        Style::default().fg(Color::Green),
                    ),
                    Span::raw(format!("  ★ {:.1}", item.rating)),
                    Span::styled(
                        if item.popular { "  popular" } else { "" },
                        Style::default().fg(Color::Yellow),
                    ),
                ])
            })
            .collect(),
        AdminTab::Reservations => shop
            .reservations
            .iter()
            .map(|reservation| {
                Line::from(vec![
                    Span::raw(format!(
                        "{:<20} {} {}  {:>2} guests  ",
                        reservation.customer.name,
                        reservation.date.format("%Y-%m-%d"),
                        reservation.time.format("%H:%M"),
                        reservation.guests
                    )),
                    Span::styled(
                        reservation.status.as_str(),
                        Style::default().fg(reservation_status_color(reservation.status)),
                    ),
                ])
            })
            .collect(),
        AdminTab::Orders => shop
            .orders
            .iter()
            .map(|order| {
                let units: u32 = order.items.iter().map(|entry| entry.quantity).sum();
                Line::from(vec![
                    Span::raw(format!(
                        "{:<20} {:>2} items {:>9}  {:<9} ",
                        order.customer.name,
                        units,
                        money(order.total),
                        order.fulfillment.kind().label()
                    )),
                    Span::styled(
                        order.status.as_str(),
                        Style::default().fg(order_status_color(order.status)),
                    ),
                ])
            })
            .collect(),
    }
}

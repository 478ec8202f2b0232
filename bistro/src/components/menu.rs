//! Menu screen: search, category filter, grouped item list and the item
//! detail dialog

use bistro_core::StoreAction;
use crossterm::event::KeyCode;
use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Color, Style, Stylize},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use super::modal::{centered_rect, render_modal, ModalStyle};
use super::select_list::{SelectList, SelectListProps};
use super::text_input::{TextInput, TextInputProps};
use super::money;
use crate::action::Action;
use crate::component::Component;
use crate::event::EventKind;
use crate::state::AppState;

#[derive(Default)]
pub struct MenuScreen {
    search: TextInput,
    list: SelectList,
    instructions: TextInput,
    /// Focus seen on the previous event, to place cursors on focus changes
    search_was_focused: bool,
    detail_was_open: bool,
}

pub struct MenuScreenProps<'a> {
    pub state: &'a AppState,
}

impl MenuScreen {
    pub fn new() -> Self {
        Self::default()
    }

    fn sync_cursors(&mut self, state: &AppState) {
        if state.menu.search_focused && !self.search_was_focused {
            self.search.move_to_end(&state.shop.search_query);
        }
        self.search_was_focused = state.menu.search_focused;

        let detail = state.menu.detail.as_ref();
        if let (Some(detail), false) = (detail, self.detail_was_open) {
            self.instructions.move_to_end(&detail.instructions);
        }
        self.detail_was_open = detail.is_some();
    }
}

impl Component<Action> for MenuScreen {
    type Props<'a> = MenuScreenProps<'a>;

    fn handle_event(
        &mut self,
        event: &EventKind,
        props: Self::Props<'_>,
    ) -> impl IntoIterator<Item = Action> {
        let state = props.state;
        self.sync_cursors(state);

        if let Some(detail) = &state.menu.detail {
            if let EventKind::Key(key) = event {
                match key.code {
                    KeyCode::Up => return vec![Action::DetailQuantityStep { up: true }],
                    KeyCode::Down => return vec![Action::DetailQuantityStep { up: false }],
                    _ => {}
                }
            }
            return Component::<Action>::handle_event(
                &mut self.instructions,
                event,
                TextInputProps {
                    value: &detail.instructions,
                    placeholder: "",
                    is_focused: true,
                    show_border: true,
                    title: None,
                    on_change: Action::DetailInstructionsChange,
                    on_submit: |_| Action::DetailAddToCart,
                },
            )
            .into_iter()
            .collect::<Vec<_>>();
        }

        if state.menu.search_focused {
            return Component::<Action>::handle_event(
                &mut self.search,
                event,
                TextInputProps {
                    value: &state.shop.search_query,
                    placeholder: "",
                    is_focused: true,
                    show_border: true,
                    title: None,
                    on_change: |query| Action::Store(StoreAction::FilterSearchSet(query)),
                    on_submit: |_| Action::MenuSearchBlur,
                },
            )
            .into_iter()
            .collect::<Vec<_>>();
        }

        if let EventKind::Key(key) = event {
            let action = match key.code {
                KeyCode::Char('/') => Some(Action::MenuSearchFocus),
                KeyCode::Char('[') | KeyCode::Left => Some(Action::MenuCategoryPrev),
                KeyCode::Char(']') | KeyCode::Right => Some(Action::MenuCategoryNext),
                KeyCode::Char('a') => Some(Action::MenuQuickAdd),
                KeyCode::Enter => Some(Action::DetailOpen),
                _ => None,
            };
            if let Some(action) = action {
                return vec![action];
            }
        }

        let lines = menu_lines(state);
        self.list
            .handle_event(
                event,
                SelectListProps {
                    items: &lines,
                    selected: state.menu.selected,
                    is_focused: true,
                    title: "",
                    empty_message: "",
                    on_select: Action::MenuSelect,
                },
            )
            .into_iter()
            .collect::<Vec<_>>()
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        let state = props.state;
        self.sync_cursors(state);

        let [filters, body] =
            Layout::vertical([Constraint::Length(3), Constraint::Fill(1)]).areas(area);
        let [search_area, category_area] =
            Layout::horizontal([Constraint::Fill(1), Constraint::Length(24)]).areas(filters);
        let [list_area, preview_area] =
            Layout::horizontal([Constraint::Percentage(60), Constraint::Percentage(40)])
                .areas(body);

        Component::<Action>::render(
            &mut self.search,
            frame,
            search_area,
            TextInputProps {
                value: &state.shop.search_query,
                placeholder: "Press / to search dishes",
                is_focused: state.menu.search_focused,
                show_border: true,
                title: Some("Search"),
                on_change: |query| Action::Store(StoreAction::FilterSearchSet(query)),
                on_submit: |_| Action::MenuSearchBlur,
            },
        );

        let category = Line::from(vec![
            Span::styled("◀ ", Style::default().fg(Color::Cyan)),
            Span::styled(state.shop.category.label(), Style::default().bold()),
            Span::styled(" ▶", Style::default().fg(Color::Cyan)),
        ])
        .centered();
        frame.render_widget(
            Paragraph::new(category)
                .block(Block::default().borders(Borders::ALL).title(" Category ")),
            category_area,
        );

        let lines = menu_lines(state);
        let list_focused = !state.menu.search_focused && state.menu.detail.is_none();
        self.list.render(
            frame,
            list_area,
            SelectListProps {
                items: &lines,
                selected: state.menu.selected,
                is_focused: list_focused,
                title: "Our Menu",
                empty_message: "No items found. Try a different search or category.",
                on_select: Action::MenuSelect,
            },
        );

        render_preview(frame, preview_area, state);

        if let Some(detail) = &state.menu.detail {
            let Some(item) = state.detail_item() else {
                return;
            };
            let modal = centered_rect(56, 13, frame.area());
            render_modal(frame, modal, &ModalStyle::with_bg(Color::Rgb(25, 25, 35)));

            let block = Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Cyan))
                .title(format!(" {} ", item.name));
            let inner = block.inner(modal);
            frame.render_widget(block, modal);

            let [description, quantity, _, instructions, hint] = Layout::vertical([
                Constraint::Length(3),
                Constraint::Length(1),
                Constraint::Length(1),
                Constraint::Length(3),
                Constraint::Length(1),
            ])
            .areas(inner);

            frame.render_widget(
                Paragraph::new(item.description.as_str()).wrap(Wrap { trim: true }),
                description,
            );
            let line_total = item.price * rust_decimal::Decimal::from(detail.quantity);
            frame.render_widget(
                Paragraph::new(Line::from(vec![
                    Span::raw("Quantity: "),
                    Span::styled(format!("▲ {} ▼", detail.quantity), Style::default().bold()),
                    Span::raw("   Total: "),
                    Span::styled(money(line_total), Style::default().fg(Color::Green).bold()),
                ])),
                quantity,
            );
            Component::<Action>::render(
                &mut self.instructions,
                frame,
                instructions,
                TextInputProps {
                    value: &detail.instructions,
                    placeholder: "Any special requests?",
                    is_focused: true,
                    show_border: true,
                    title: Some("Special instructions"),
                    on_change: Action::DetailInstructionsChange,
                    on_submit: |_| Action::DetailAddToCart,
                },
            );
            frame.render_widget(
                Paragraph::new(
                    Line::from("↑/↓ quantity  Enter add to cart  Esc close").dark_gray(),
                ),
                hint,
            );
        }
    }
}

/// One row per visible item; the category label starts each section
fn menu_lines(state: &AppState) -> Vec<Line<'static>> {
    let mut previous = None;
    state
        .menu_entries()
        .into_iter()
        .map(|item| {
            let section = if previous == Some(item.category) {
                String::new()
            } else {
                item.category.label().to_string()
            };
            previous = Some(item.category);
            let mut spans = vec![
                Span::styled(format!("{:<10} ", section), Style::default().fg(Color::Magenta)),
                Span::raw(format!("{:<28} ", item.name)),
                Span::styled(
                    format!("{:>8}", money(item.price)),
                    Style::default().fg(Color::Green),
                ),
            ];
            if item.popular {
                spans.push(Span::styled(" ★ popular", Style::default().fg(Color::Yellow)));
            }
            Line::from(spans)
        })
        .collect()
}

fn render_preview(frame: &mut Frame, area: Rect, state: &AppState) {
    let block = Block::default().borders(Borders::ALL).title(" Details ");
    let Some(item) = state.selected_menu_item() else {
        frame.render_widget(block, area);
        return;
    };
    let in_cart = state
        .shop
        .cart_entry(&item.id)
        .map_or(0, |entry| entry.quantity);
    let mut lines = vec![
        Line::from(item.name.clone()).bold(),
        Line::from(item.category.label()).magenta(),
        Line::default(),
        Line::from(item.description.clone()),
        Line::default(),
        Line::from(vec![
            Span::styled(money(item.price), Style::default().fg(Color::Green).bold()),
            Span::styled(
                format!("   ★ {:.1} ({} reviews)", item.rating, item.review_count),
                Style::default().fg(Color::Yellow),
            ),
        ]),
    ];
    if in_cart > 0 {
        lines.push(Line::from(format!("{} in your cart", in_cart)).cyan());
    }
    lines.push(Line::default());
    lines.push(Line::from("Enter details  a quick add").dark_gray());
    frame.render_widget(
        Paragraph::new(lines).wrap(Wrap { trim: true }).block(block),
        area,
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::MenuDetail;
    use crate::testing::{key_press, RenderHarness};
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

    fn send(screen: &mut MenuScreen, state: &AppState, key: &str) -> Vec<Action> {
        screen
            .handle_event(&key_press(key), MenuScreenProps { state })
            .into_iter()
            .collect::<Vec<_>>()
    }

    #[test]
    fn test_list_keys() {
        let state = seeded();
        let mut screen = MenuScreen::new();

        assert_eq!(send(&mut screen, &state, "j"), vec![Action::MenuSelect(1)]);
        assert_eq!(send(&mut screen, &state, "/"), vec![Action::MenuSearchFocus]);
        assert_eq!(send(&mut screen, &state, "]"), vec![Action::MenuCategoryNext]);
        assert_eq!(send(&mut screen, &state, "a"), vec![Action::MenuQuickAdd]);
        assert_eq!(send(&mut screen, &state, "enter"), vec![Action::DetailOpen]);
    }

    #[test]
    fn test_search_typing() {
        let mut state = seeded();
        state.menu.search_focused = true;
        state.shop.search_query = "sal".into();
        let mut screen = MenuScreen::new();

        assert_eq!(
            send(&mut screen, &state, "a"),
            vec![Action::Store(StoreAction::FilterSearchSet("sala".into()))]
        );
        assert_eq!(send(&mut screen, &state, "enter"), vec![Action::MenuSearchBlur]);
    }

    #[test]
    fn test_detail_keys() {
        let mut state = seeded();
        state.menu.detail = Some(MenuDetail::new(state.shop.menu[0].id.clone()));
        let mut screen = MenuScreen::new();

        assert_eq!(
            send(&mut screen, &state, "up"),
            vec![Action::DetailQuantityStep { up: true }]
        );
        assert_eq!(
            send(&mut screen, &state, "x"),
            vec![Action::DetailInstructionsChange("x".into())]
        );
        assert_eq!(send(&mut screen, &state, "enter"), vec![Action::DetailAddToCart]);
    }

    #[test]
    fn test_render_groups_and_detail() {
        let mut state = seeded();
        let mut screen = MenuScreen::new();
        let mut harness = RenderHarness::new(120, 30);

        let output = harness.render_to_string_plain(|frame| {
            let area = frame.area();
            screen.render(frame, area, MenuScreenProps { state: &state });
        });
        assert!(output.contains("All Items"));
        assert!(output.contains("Breakfast"));
        assert!(output.contains("Buttermilk Pancakes"));

        state.menu.detail = Some(MenuDetail::new(state.shop.menu[0].id.clone()));
        let output = harness.render_to_string_plain(|frame| {
            let area = frame.area();
            screen.render(frame, area, MenuScreenProps { state: &state });
        });
        assert!(output.contains("Special instructions"));
        assert!(output.contains("Quantity"));
    }

    #[test]
    fn test_render_empty_result() {
        let mut state = seeded();
        state.shop.search_query = "zzz-not-on-the-menu".into();
        let mut screen = MenuScreen::new();
        let mut harness = RenderHarness::new(120, 30);

        let output = harness.render_to_string_plain(|frame| {
            let area = frame.area();
            screen.render(frame, area, MenuScreenProps { state: &state });
        });
        assert!(output.contains("No items found"));
    }
}

use bistro_core::views;
use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Color, Style, Stylize},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::action::Action;
use crate::component::Component;
use crate::state::{AppState, Screen};

/// Screen tabs on the left, cart badge on the right
pub struct Header;

pub struct HeaderProps<'a> {
    pub state: &'a AppState,
}

impl Header {
    pub const HEIGHT: u16 = 1;
}

impl Component<Action> for Header {
    type Props<'a> = HeaderProps<'a>;

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        let [tabs_area, cart_area] =
            Layout::horizontal([Constraint::Fill(1), Constraint::Length(14)]).areas(area);

        let mut spans = vec![Span::styled(" Bistro ", Style::default().fg(Color::Yellow).bold())];
        for screen in Screen::ALL {
            let label = format!(" F{} {} ", screen.hotkey(), screen.title());
            let style = if screen == props.state.screen {
                Style::default().fg(Color::Black).bg(Color::Cyan).bold()
            } else {
                Style::default().fg(Color::Gray)
            };
            spans.push(Span::styled(label, style));
        }
        frame.render_widget(Paragraph::new(Line::from(spans)), tabs_area);

        let count = views::cart_item_count(&props.state.shop);
        let cart_style = if count > 0 {
            Style::default().fg(Color::Green).bold()
        } else {
            Style::default().fg(Color::DarkGray)
        };
        frame.render_widget(
            Paragraph::new(
                Line::from(Span::styled(format!("Cart: {} ", count), cart_style)).right_aligned(),
            ),
            cart_area,
        );
    }
}

use bistro_core::views;
use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Color, Style, Stylize},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use super::{money, stars};
use crate::action::Action;
use crate::component::Component;
use crate::state::AppState;

const RECENT_REVIEWS: usize = 3;

/// Landing screen: welcome text, popular dishes and the latest reviews
#[derive(Default)]
pub struct HomeScreen;

pub struct HomeScreenProps<'a> {
    pub state: &'a AppState,
}

impl Component<Action> for HomeScreen {
    type Props<'a> = HomeScreenProps<'a>;

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        let shop = &props.state.shop;
        let [welcome_area, body] =
            Layout::vertical([Constraint::Length(4), Constraint::Fill(1)]).areas(area);
        let [popular_area, reviews_area] =
            Layout::horizontal([Constraint::Percentage(50), Constraint::Percentage(50)])
                .areas(body);

        let welcome = vec![
            Line::from("Welcome to Bistro").bold().yellow().centered(),
            Line::from("Fresh breakfast, lunch and dinner. Order online or book a table.")
                .centered(),
            Line::from(vec![
                Span::styled("F2", Style::default().fg(Color::Cyan).bold()),
                Span::raw(" browse the menu   "),
                Span::styled("F4", Style::default().fg(Color::Cyan).bold()),
                Span::raw(" reserve a table"),
            ])
            .centered(),
        ];
        frame.render_widget(Paragraph::new(welcome), welcome_area);

        let popular: Vec<Line> = views::popular_items(shop)
            .into_iter()
            .map(|item| {
                Line::from(vec![
                    Span::styled(format!("{:<28}", item.name), Style::default().bold()),
                    Span::styled(money(item.price), Style::default().fg(Color::Green)),
                    Span::styled(
                        format!("  ★ {:.1}", item.rating),
                        Style::default().fg(Color::Yellow),
                    ),
                ])
            })
            .collect();
        frame.render_widget(
            Paragraph::new(popular).block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(" Popular Dishes "),
            ),
            popular_area,
        );

        let mut reviews: Vec<Line> = Vec::new();
        for review in views::recent_reviews(shop, RECENT_REVIEWS).iter().rev() {
            reviews.push(Line::from(vec![
                Span::styled(stars(review.rating), Style::default().fg(Color::Yellow)),
                Span::styled(format!("  {}", review.customer_name), Style::default().bold()),
            ]));
            reviews.push(Line::from(format!("\"{}\"", review.comment)).italic());
            reviews.push(Line::default());
        }
        if reviews.is_empty() {
            reviews.push(Line::from("No reviews yet").dark_gray());
        }
        frame.render_widget(
            Paragraph::new(reviews)
                .wrap(Wrap { trim: true })
                .block(Block::default().borders(Borders::ALL).title(" What Guests Say ")),
            reviews_area,
        );
    }
}

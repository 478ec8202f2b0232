use bistro_core::views;
use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Color, Style, Stylize},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use super::form_view::{stars, FormView, FormViewProps};
use crate::action::Action;
use crate::component::Component;
use crate::event::EventKind;
use crate::state::{AppState, FormId};

const BAR_WIDTH: usize = 20;

/// Rating summary, guest reviews and the review form
#[derive(Default)]
pub struct ReviewScreen {
    form: FormView,
}

pub struct ReviewScreenProps<'a> {
    pub state: &'a AppState,
}

impl ReviewScreen {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Component<Action> for ReviewScreen {
    type Props<'a> = ReviewScreenProps<'a>;

    fn handle_event(
        &mut self,
        event: &EventKind,
        props: Self::Props<'_>,
    ) -> impl IntoIterator<Item = Action> {
        self.form.handle_event(
            event,
            FormViewProps {
                state: props.state,
                form: FormId::Review,
                title: "",
                is_focused: true,
            },
        )
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        let state = props.state;
        let [left, form_area] =
            Layout::horizontal([Constraint::Percentage(55), Constraint::Percentage(45)])
                .areas(area);
        let [summary_area, list_area] =
            Layout::vertical([Constraint::Length(9), Constraint::Fill(1)]).areas(left);

        let summary = views::review_summary(&state.shop.reviews);
        let mut lines = vec![
            Line::from(vec![
                Span::styled(format!("{:.1} ", summary.average), Style::default().bold()),
                Span::styled(
                    stars(summary.average.round() as u8),
                    Style::default().fg(Color::Yellow),
                ),
                Span::styled(
                    format!("  based on {} reviews", summary.count),
                    Style::default().fg(Color::DarkGray),
                ),
            ]),
            Line::default(),
        ];
        for bucket in summary.histogram {
            let filled = ((bucket.percentage / 100.0) * BAR_WIDTH as f64).round() as usize;
            lines.push(Line::from(vec![
                Span::raw(format!("{} ★ ", bucket.stars)),
                Span::styled("█".repeat(filled), Style::default().fg(Color::Yellow)),
                Span::styled(
                    "░".repeat(BAR_WIDTH - filled.min(BAR_WIDTH)),
                    Style::default().fg(Color::DarkGray),
                ),
                Span::raw(format!(" {:>3}", bucket.count)),
            ]));
        }
        frame.render_widget(
            Paragraph::new(lines).block(Block::default().borders(Borders::ALL).title(" Ratings ")),
            summary_area,
        );

        let mut reviews = Vec::new();
        for review in state.shop.reviews.iter().rev() {
            let dish = review
                .menu_item_id
                .as_ref()
                .and_then(|id| state.shop.menu_item(id))
                .map(|item| format!(" on {}", item.name))
                .unwrap_or_default();
            reviews.push(Line::from(vec![
                Span::styled(stars(review.rating), Style::default().fg(Color::Yellow)),
                Span::styled(format!(" {}", review.customer_name), Style::default().bold()),
                Span::styled(
                    format!("{}  {}", dish, review.date.format("%b %d, %Y")),
                    Style::default().fg(Color::DarkGray),
                ),
            ]));
            reviews.push(Line::from(review.comment.clone()));
            reviews.push(Line::default());
        }
        frame.render_widget(
            Paragraph::new(reviews)
                .wrap(Wrap { trim: true })
                .block(Block::default().borders(Borders::ALL).title(" Guest Reviews ")),
            list_area,
        );

        self.form.render(
            frame,
            form_area,
            FormViewProps {
                state,
                form: FormId::Review,
                title: "Write a Review",
                is_focused: true,
            },
        );
    }
}

use ratatui::{
    layout::Rect,
    style::{Color, Style, Stylize},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::action::Action;
use crate::component::Component;

pub struct HelpBar;

pub struct HelpBarProps<'a> {
    /// `(key, description)` pairs for the current screen
    pub hints: &'a [(&'a str, &'a str)],
}

impl Component<Action> for HelpBar {
    type Props<'a> = HelpBarProps<'a>;

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        let spans: Vec<Span> = props
            .hints
            .iter()
            .flat_map(|(key, description)| {
                [
                    Span::styled(format!(" {}", key), Style::default().fg(Color::Cyan).bold()),
                    Span::styled(
                        format!(" {} ", description),
                        Style::default().fg(Color::DarkGray),
                    ),
                ]
            })
            .collect();
        frame.render_widget(Paragraph::new(Line::from(spans).centered()), area);
    }
}

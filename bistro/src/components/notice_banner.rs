use bistro_core::{Notice, NoticeKind};
use ratatui::{
    layout::Rect,
    style::{Color, Style, Stylize},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::action::Action;
use crate::component::Component;

/// One-line toast for the most recent notice
pub struct NoticeBanner;

pub struct NoticeBannerProps<'a> {
    pub notice: Option<&'a Notice>,
}

impl Component<Action> for NoticeBanner {
    type Props<'a> = NoticeBannerProps<'a>;

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        let Some(notice) = props.notice else {
            return;
        };
        let (icon, color) = match notice.kind {
            NoticeKind::Success => ("✓", Color::Green),
            NoticeKind::Error => ("✗", Color::Red),
        };
        let line = Line::from(vec![
            Span::styled(format!(" {} ", icon), Style::default().fg(Color::Black).bg(color).bold()),
            Span::styled(format!(" {} ", notice.message), Style::default().fg(color)),
            Span::styled(" ^D dismiss", Style::default().fg(Color::DarkGray)),
        ]);
        frame.render_widget(Paragraph::new(line), area);
    }
}

//! Scrollable selection list component

use crossterm::event::KeyCode;
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::Line,
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
    Frame,
};

use crate::component::Component;
use crate::event::EventKind;

pub struct SelectListProps<'a, A> {
    /// Pre-styled rows
    pub items: &'a [Line<'a>],
    pub selected: usize,
    pub is_focused: bool,
    pub title: &'a str,
    /// Shown instead of the list when there are no items
    pub empty_message: &'a str,
    pub on_select: fn(usize) -> A,
}

/// A scrollable selection list with keyboard and wheel navigation
///
/// Handles j/k/up/down, g/G/home/end, page up/down and the scroll wheel.
/// Enter is left to the owner, which decides what "open" means.
#[derive(Default)]
pub struct SelectList {
    scroll_offset: usize,
    /// Rows visible in the last render; used for paging
    viewport_height: usize,
}

impl SelectList {
    pub fn new() -> Self {
        Self::default()
    }

    fn ensure_visible(&mut self, selected: usize, viewport_height: usize) {
        if viewport_height == 0 {
            return;
        }
        if selected < self.scroll_offset {
            self.scroll_offset = selected;
        } else if selected >= self.scroll_offset + viewport_height {
            self.scroll_offset = selected.saturating_sub(viewport_height - 1);
        }
    }

    fn page(&self) -> usize {
        self.viewport_height.max(1)
    }
}

impl<A> Component<A> for SelectList {
    type Props<'a> = SelectListProps<'a, A>;

    fn handle_event(
        &mut self,
        event: &EventKind,
        props: Self::Props<'_>,
    ) -> impl IntoIterator<Item = A> {
        if !props.is_focused || props.items.is_empty() {
            return None;
        }

        let last = props.items.len() - 1;
        let target = match event {
            EventKind::Key(key) => match key.code {
                KeyCode::Char('j') | KeyCode::Down => (props.selected + 1).min(last),
                KeyCode::Char('k') | KeyCode::Up => props.selected.saturating_sub(1),
                KeyCode::Char('g') | KeyCode::Home => 0,
                KeyCode::Char('G') | KeyCode::End => last,
                KeyCode::PageDown => (props.selected + self.page()).min(last),
                KeyCode::PageUp => props.selected.saturating_sub(self.page()),
                _ => return None,
            },
            EventKind::Scroll { delta, .. } => props
                .selected
                .saturating_add_signed(*delta)
                .min(last),
            _ => return None,
        };

        (target != props.selected).then(|| (props.on_select)(target))
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        let block = Block::default()
            .borders(Borders::ALL)
            .title(format!(" {} ", props.title))
            .border_style(if props.is_focused {
                Style::default().fg(Color::Cyan)
            } else {
                Style::default().fg(Color::DarkGray)
            });

        if props.items.is_empty() {
            let empty = Paragraph::new(props.empty_message)
                .style(Style::default().fg(Color::DarkGray))
                .block(block);
            frame.render_widget(empty, area);
            return;
        }

        self.viewport_height = usize::from(area.height.saturating_sub(2));
        self.ensure_visible(props.selected, self.viewport_height);

        let items: Vec<ListItem> = props
            .items
            .iter()
            .map(|line| ListItem::new(line.clone()))
            .collect();

        let highlight = if props.is_focused {
            Style::default()
                .fg(Color::Black)
                .bg(Color::White)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().add_modifier(Modifier::REVERSED)
        };
        let list = List::new(items).block(block).highlight_style(highlight);

        let mut state = ListState::default().with_selected(Some(props.selected));
        *state.offset_mut() = self.scroll_offset;

        frame.render_stateful_widget(list, area, &mut state);
    }
}

//! Single-line text input component

use crossterm::event::{KeyCode, KeyModifiers};
use ratatui::{
    layout::Rect,
    style::{Color, Style},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::component::Component;
use crate::event::EventKind;

pub struct TextInputProps<'a, A> {
    pub value: &'a str,
    /// Shown dimmed while the value is empty
    pub placeholder: &'a str,
    pub is_focused: bool,
    pub show_border: bool,
    /// Border title; ignored without a border
    pub title: Option<&'a str>,
    /// Called with the full new value on every edit
    pub on_change: fn(String) -> A,
    /// Called on Enter
    pub on_submit: fn(String) -> A,
}

/// A single-line text input with cursor
///
/// The value itself lives in the application state; the component only
/// keeps the cursor and emits the edited value through `on_change`.
#[derive(Default)]
pub struct TextInput {
    /// Cursor position (byte index)
    cursor: usize,
}

impl TextInput {
    pub fn new() -> Self {
        Self::default()
    }

    /// Put the cursor after the last character, e.g. when a field gains focus
    pub fn move_to_end(&mut self, value: &str) {
        self.cursor = value.len();
    }

    fn clamp_cursor(&mut self, value: &str) {
        self.cursor = self.cursor.min(value.len());
        while !value.is_char_boundary(self.cursor) {
            self.cursor -= 1;
        }
    }

    fn move_cursor_left(&mut self, value: &str) {
        if let Some((i, _)) = value[..self.cursor].char_indices().next_back() {
            self.cursor = i;
        }
    }

    fn move_cursor_right(&mut self, value: &str) {
        if let Some(c) = value[self.cursor..].chars().next() {
            self.cursor += c.len_utf8();
        }
    }

    fn insert_char(&mut self, value: &str, c: char) -> String {
        let mut new_value = String::with_capacity(value.len() + c.len_utf8());
        new_value.push_str(&value[..self.cursor]);
        new_value.push(c);
        new_value.push_str(&value[self.cursor..]);
        self.cursor += c.len_utf8();
        new_value
    }

    /// Backspace
    fn delete_char_before(&mut self, value: &str) -> Option<String> {
        let (start, _) = value[..self.cursor].char_indices().next_back()?;
        let new_value = format!("{}{}", &value[..start], &value[self.cursor..]);
        self.cursor = start;
        Some(new_value)
    }

    /// Delete
    fn delete_char_at(&self, value: &str) -> Option<String> {
        let c = value[self.cursor..].chars().next()?;
        Some(format!(
            "{}{}",
            &value[..self.cursor],
            &value[self.cursor + c.len_utf8()..]
        ))
    }
}

impl<A> Component<A> for TextInput {
    type Props<'a> = TextInputProps<'a, A>;

    fn handle_event(
        &mut self,
        event: &EventKind,
        props: Self::Props<'_>,
    ) -> impl IntoIterator<Item = A> {
        if !props.is_focused {
            return None;
        }
        self.clamp_cursor(props.value);

        let EventKind::Key(key) = event else {
            return None;
        };

        if key.modifiers.contains(KeyModifiers::CONTROL) {
            return match key.code {
                KeyCode::Char('a') => {
                    self.cursor = 0;
                    None
                }
                KeyCode::Char('e') => {
                    self.cursor = props.value.len();
                    None
                }
                // Clear line
                KeyCode::Char('u') => {
                    self.cursor = 0;
                    Some((props.on_change)(String::new()))
                }
                _ => None,
            };
        }

        match key.code {
            KeyCode::Char(c) => {
                let new_value = self.insert_char(props.value, c);
                Some((props.on_change)(new_value))
            }
            KeyCode::Backspace => self
                .delete_char_before(props.value)
                .map(|v| (props.on_change)(v)),
            KeyCode::Delete => self
                .delete_char_at(props.value)
                .map(|v| (props.on_change)(v)),
            KeyCode::Left => {
                self.move_cursor_left(props.value);
                None
            }
            KeyCode::Right => {
                self.move_cursor_right(props.value);
                None
            }
            KeyCode::Home => {
                self.cursor = 0;
                None
            }
            KeyCode::End => {
                self.cursor = props.value.len();
                None
            }
            KeyCode::Enter => Some((props.on_submit)(props.value.to_string())),
            _ => None,
        }
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        self.clamp_cursor(props.value);

        let block = props.show_border.then(|| {
            let block = Block::default()
                .borders(Borders::ALL)
                .border_style(if props.is_focused {
                    Style::default().fg(Color::Cyan)
                } else {
                    Style::default().fg(Color::DarkGray)
                });
            match props.title {
                Some(title) => block.title(format!(" {} ", title)),
                None => block,
            }
        });
        let inner = block.as_ref().map_or(area, |b| b.inner(area));

        // Scroll horizontally so the cursor stays visible
        let width = usize::from(inner.width);
        let before_cursor = props.value[..self.cursor].chars().count();
        let skip = before_cursor.saturating_sub(width.saturating_sub(1));

        let paragraph = if props.value.is_empty() {
            Paragraph::new(props.placeholder).style(Style::default().fg(Color::DarkGray))
        } else {
            Paragraph::new(props.value.chars().skip(skip).collect::<String>())
        };
        let paragraph = match block {
            Some(block) => paragraph.block(block),
            None => paragraph,
        };
        frame.render_widget(paragraph, area);

        if props.is_focused && inner.width > 0 && inner.height > 0 {
            let offset = u16::try_from(before_cursor - skip).unwrap_or(inner.width - 1);
            frame.set_cursor_position((inner.x + offset.min(inner.width - 1), inner.y));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{key, key_press, RenderHarness};

    #[derive(Debug, Clone, PartialEq)]
    enum TestAction {
        Change(String),
        Submit(String),
    }

    fn props(value: &str, is_focused: bool) -> TextInputProps<'_, TestAction> {
        TextInputProps {
            value,
            placeholder: "",
            is_focused,
            show_border: true,
            title: None,
            on_change: TestAction::Change,
            on_submit: TestAction::Submit,
        }
    }

    fn send(input: &mut TextInput, k: &str, value: &str) -> Vec<TestAction> {
        input
            .handle_event(&key_press(k), props(value, true))
            .into_iter()
            .collect()
    }

    #[test]
    fn test_typing() {
        let mut input = TextInput::new();
        assert_eq!(send(&mut input, "a", ""), vec![TestAction::Change("a".into())]);
    }

    #[test]
    fn test_typing_appends_at_end() {
        let mut input = TextInput::new();
        input.move_to_end("hello");
        assert_eq!(
            send(&mut input, "!", "hello"),
            vec![TestAction::Change("hello!".into())]
        );
    }

    #[test]
    fn test_insert_in_the_middle() {
        let mut input = TextInput::new();
        input.move_to_end("ac");
        send(&mut input, "left", "ac");
        assert_eq!(send(&mut input, "b", "ac"), vec![TestAction::Change("abc".into())]);
    }

    #[test]
    fn test_backspace() {
        let mut input = TextInput::new();
        input.move_to_end("hello");
        assert_eq!(
            send(&mut input, "backspace", "hello"),
            vec![TestAction::Change("hell".into())]
        );
        assert_eq!(input.cursor, 4);
    }

    #[test]
    fn test_backspace_at_start() {
        let mut input = TextInput::new();
        assert!(send(&mut input, "backspace", "hello").is_empty());
    }

    #[test]
    fn test_multibyte_editing() {
        let mut input = TextInput::new();
        input.move_to_end("café");
        assert_eq!(
            send(&mut input, "backspace", "café"),
            vec![TestAction::Change("caf".into())]
        );

        input.cursor = 0;
        send(&mut input, "right", "é!");
        assert_eq!(input.cursor, 2);
        assert_eq!(send(&mut input, "delete", "é!"), vec![TestAction::Change("é".into())]);
    }

    #[test]
    fn test_ctrl_u_clears() {
        let mut input = TextInput::new();
        input.move_to_end("hello");
        let actions: Vec<_> = input
            .handle_event(&EventKind::Key(key("ctrl+u")), props("hello", true))
            .into_iter()
            .collect();
        assert_eq!(actions, vec![TestAction::Change(String::new())]);
    }

    #[test]
    fn test_submit() {
        let mut input = TextInput::new();
        assert_eq!(
            send(&mut input, "enter", "hello"),
            vec![TestAction::Submit("hello".into())]
        );
    }

    #[test]
    fn test_unfocused_ignores() {
        let mut input = TextInput::new();
        let actions: Vec<_> = input
            .handle_event(&key_press("a"), props("", false))
            .into_iter()
            .collect();
        assert!(actions.is_empty());
    }

    #[test]
    fn test_render_value_and_placeholder() {
        let mut render = RenderHarness::new(30, 3);
        let mut input = TextInput::new();

        let output = render.render_to_string_plain(|frame| {
            let area = frame.area();
            Component::<()>::render(
                &mut input,
                frame,
                area,
                TextInputProps {
                    value: "hello",
                    placeholder: "Type here...",
                    is_focused: true,
                    show_border: true,
                    title: Some("Search"),
                    on_change: |_| (),
                    on_submit: |_| (),
                },
            );
        });
        assert!(output.contains("hello"));
        assert!(output.contains("Search"));

        let output = render.render_to_string_plain(|frame| {
            let area = frame.area();
            Component::<()>::render(
                &mut input,
                frame,
                area,
                TextInputProps {
                    value: "",
                    placeholder: "Type here...",
                    is_focused: false,
                    show_border: true,
                    title: None,
                    on_change: |_| (),
                    on_submit: |_| (),
                },
            );
        });
        assert!(output.contains("Type here..."));
    }

    #[test]
    fn test_long_value_scrolls_to_cursor() {
        let mut render = RenderHarness::new(10, 1);
        let mut input = TextInput::new();
        let value = "abcdefghijklmnop";
        input.move_to_end(value);

        let output = render.render_to_string_plain(|frame| {
            let area = frame.area();
            Component::<()>::render(
                &mut input,
                frame,
                area,
                TextInputProps {
                    value,
                    placeholder: "",
                    is_focused: true,
                    show_border: false,
                    title: None,
                    on_change: |_| (),
                    on_submit: |_| (),
                },
            );
        });
        assert!(output.contains("hijklmnop"));
        assert!(!output.contains("abc"));
    }
}

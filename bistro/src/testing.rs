//! Test utilities for components and screens
//!
//! - [`key`]: create a `KeyEvent` from a string (e.g. `key("ctrl+s")`)
//! - [`key_press`]: the same, wrapped as an [`EventKind`]
//! - [`RenderHarness`]: render into an in-memory terminal and read it back
//!
//! # Example
//!
//! ```
//! use bistro::testing::{key, RenderHarness};
//! use crossterm::event::KeyCode;
//! use ratatui::widgets::Paragraph;
//!
//! assert_eq!(key("f2").code, KeyCode::F(2));
//!
//! let mut harness = RenderHarness::new(20, 3);
//! let output = harness.render_to_string_plain(|frame| {
//!     frame.render_widget(Paragraph::new("Hello"), frame.area());
//! });
//! assert!(output.contains("Hello"));
//! ```

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyEventState, KeyModifiers};
use ratatui::backend::TestBackend;
use ratatui::buffer::Buffer;
use ratatui::{Frame, Terminal};

use crate::event::EventKind;

/// Parse `"ctrl+s"`, `"shift+tab"`, `"f3"`, `"esc"`, `"x"`, `"G"`, `"+"`, ...
///
/// Modifier and key names are case-insensitive; a single character keeps
/// its case.
pub fn parse_key_string(key_str: &str) -> Option<KeyEvent> {
    let key_str = key_str.trim();
    if key_str.is_empty() {
        return None;
    }

    let lowered = key_str.to_lowercase();
    if lowered == "shift+tab" || lowered == "backtab" {
        return Some(press(KeyCode::BackTab, KeyModifiers::SHIFT));
    }

    // The last `+` separates the key, unless the key itself is `+`
    let (modifier_part, key_part) = if key_str == "+" {
        ("", "+")
    } else if let Some(prefix) = key_str.strip_suffix("++") {
        (prefix, "+")
    } else {
        key_str.rsplit_once('+').unwrap_or(("", key_str))
    };

    let mut modifiers = KeyModifiers::empty();
    for part in modifier_part.split('+').map(str::trim).filter(|p| !p.is_empty()) {
        match part.to_lowercase().as_str() {
            "ctrl" | "control" => modifiers |= KeyModifiers::CONTROL,
            "shift" => modifiers |= KeyModifiers::SHIFT,
            "alt" => modifiers |= KeyModifiers::ALT,
            _ => return None,
        }
    }

    let key_part = key_part.trim();
    if key_part.chars().count() == 1 {
        return Some(press(KeyCode::Char(key_part.chars().next()?), modifiers));
    }

    let name = key_part.to_lowercase();
    let code = match name.as_str() {
        "esc" | "escape" => KeyCode::Esc,
        "enter" | "return" => KeyCode::Enter,
        "tab" => KeyCode::Tab,
        "backspace" => KeyCode::Backspace,
        "up" => KeyCode::Up,
        "down" => KeyCode::Down,
        "left" => KeyCode::Left,
        "right" => KeyCode::Right,
        "home" => KeyCode::Home,
        "end" => KeyCode::End,
        "pageup" => KeyCode::PageUp,
        "pagedown" => KeyCode::PageDown,
        "delete" => KeyCode::Delete,
        "insert" => KeyCode::Insert,
        "space" => KeyCode::Char(' '),
        f if f.starts_with('f') => KeyCode::F(f[1..].parse().ok()?),
        _ => return None,
    };

    Some(press(code, modifiers))
}

fn press(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
    KeyEvent {
        code,
        modifiers,
        kind: KeyEventKind::Press,
        state: KeyEventState::empty(),
    }
}

/// Create a `KeyEvent` from a key string.
///
/// # Panics
///
/// Panics if the key string cannot be parsed.
pub fn key(s: &str) -> KeyEvent {
    parse_key_string(s).unwrap_or_else(|| panic!("Invalid key string: {:?}", s))
}

/// A key press as the runtime hands it to components
pub fn key_press(s: &str) -> EventKind {
    EventKind::Key(key(s))
}

pub fn char_key(c: char) -> KeyEvent {
    press(KeyCode::Char(c), KeyModifiers::empty())
}

pub fn ctrl_key(c: char) -> KeyEvent {
    press(KeyCode::Char(c), KeyModifiers::CONTROL)
}

pub fn alt_key(c: char) -> KeyEvent {
    press(KeyCode::Char(c), KeyModifiers::ALT)
}

/// Type a string, one key press per character
pub fn typed(text: &str) -> Vec<EventKind> {
    text.chars().map(|c| EventKind::Key(char_key(c))).collect()
}

/// Renders into a `TestBackend` of a fixed size
pub struct RenderHarness {
    terminal: Terminal<TestBackend>,
}

impl RenderHarness {
    /// # Panics
    ///
    /// Panics if the test terminal cannot be created.
    pub fn new(width: u16, height: u16) -> Self {
        let terminal = Terminal::new(TestBackend::new(width, height))
            .unwrap_or_else(|e| panic!("failed to create test terminal: {}", e));
        Self { terminal }
    }

    /// Draw one frame and return the resulting buffer
    pub fn render(&mut self, draw: impl FnOnce(&mut Frame)) -> Buffer {
        self.terminal
            .draw(draw)
            .unwrap_or_else(|e| panic!("failed to draw: {}", e));
        self.terminal.backend().buffer().clone()
    }

    /// Draw one frame and return its text, one line per row, styles dropped
    pub fn render_to_string_plain(&mut self, draw: impl FnOnce(&mut Frame)) -> String {
        buffer_to_string_plain(&self.render(draw))
    }
}

pub fn buffer_to_string_plain(buffer: &Buffer) -> String {
    let area = buffer.area;
    let mut out = String::with_capacity(usize::from(area.width + 1) * usize::from(area.height));
    for y in area.y..area.y + area.height {
        for x in area.x..area.x + area.width {
            out.push_str(buffer[(x, y)].symbol());
        }
        out.push('\n');
    }
    out
}

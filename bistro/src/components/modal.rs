//! Modal overlay with a dimmed background
//!
//! The background is rendered as usual, then dimmed in place, so dialogs
//! such as the item detail or the admin editor sit on top of a live screen.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier},
    widgets::{Clear, Widget},
    Frame,
};

pub struct ModalStyle {
    /// 0.0 keeps colors, 1.0 turns them black
    pub dim_factor: f32,
    /// Fill for the dialog area; `None` only clears it
    pub bg_color: Option<Color>,
}

impl Default for ModalStyle {
    fn default() -> Self {
        Self {
            dim_factor: 0.5,
            bg_color: None,
        }
    }
}

impl ModalStyle {
    pub fn with_bg(bg_color: Color) -> Self {
        Self {
            bg_color: Some(bg_color),
            ..Default::default()
        }
    }
}

/// Dim everything drawn so far and prepare `area` for the dialog
///
/// Call after the screen underneath has been rendered.
pub fn render_modal(frame: &mut Frame, area: Rect, style: &ModalStyle) {
    dim_buffer(frame.buffer_mut(), style.dim_factor);

    frame.render_widget(Clear, area);
    if let Some(bg) = style.bg_color {
        frame.render_widget(BgFill(bg), area);
    }
}

pub fn dim_buffer(buffer: &mut Buffer, factor: f32) {
    let scale = 1.0 - factor.clamp(0.0, 1.0);
    for cell in buffer.content.iter_mut() {
        cell.fg = dim_color(cell.fg, scale);
        cell.bg = dim_color(cell.bg, scale);
        cell.modifier.insert(Modifier::DIM);
    }
}

fn dim_color(color: Color, scale: f32) -> Color {
    let dim = |c: u8| (f32::from(c) * scale) as u8;
    match color {
        Color::Rgb(r, g, b) => Color::Rgb(dim(r), dim(g), dim(b)),
        Color::Reset | Color::Black | Color::Indexed(_) => color,
        // Named colors have no fixed RGB value
        _ => Color::DarkGray,
    }
}

struct BgFill(Color);

impl Widget for BgFill {
    fn render(self, area: Rect, buf: &mut Buffer) {
        for y in area.y..area.y.saturating_add(area.height) {
            for x in area.x..area.x.saturating_add(area.width) {
                buf[(x, y)].set_bg(self.0);
                buf[(x, y)].set_symbol(" ");
            }
        }
    }
}

/// A `width` x `height` rectangle centered in `area`, leaving a margin
pub fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let width = width.min(area.width.saturating_sub(2));
    let height = height.min(area.height.saturating_sub(2));
    let x = area.x + (area.width.saturating_sub(width)) / 2;
    let y = area.y + (area.height.saturating_sub(height)) / 2;
    Rect::new(x, y, width, height)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::RenderHarness;
    use ratatui::style::Style;
    use ratatui::widgets::Paragraph;

    #[test]
    fn test_modal_renders_over_background() {
        let mut harness = RenderHarness::new(80, 24);

        let buffer = harness.render(|frame| {
            frame.render_widget(
                Paragraph::new("Background content")
                    .style(Style::default().fg(Color::Rgb(200, 100, 50))),
                frame.area(),
            );
            let area = centered_rect(40, 10, frame.area());
            render_modal(frame, area, &ModalStyle::with_bg(Color::Rgb(30, 30, 40)));
            frame.render_widget(Paragraph::new("Modal content"), area);
        });

        let output = crate::testing::buffer_to_string_plain(&buffer);
        assert!(output.contains("Modal content"));
        assert!(output.contains("Background content"));
        assert_eq!(buffer[(0, 0)].fg, Color::Rgb(100, 50, 25));
        assert!(buffer[(0, 0)].modifier.contains(Modifier::DIM));
    }

    #[test]
    fn test_centered_rect() {
        let centered = centered_rect(40, 10, Rect::new(0, 0, 80, 24));

        assert_eq!(centered, Rect::new(20, 7, 40, 10));
    }

    #[test]
    fn test_centered_rect_clamps_to_area() {
        let centered = centered_rect(100, 50, Rect::new(0, 0, 30, 10));

        assert!(centered.width <= 28);
        assert!(centered.height <= 8);
    }
}

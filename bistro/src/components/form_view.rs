//! Generic form renderer shared by checkout, reservations, reviews and the
//! admin editor
//!
//! Each [`Input`] becomes one row: label, current value and, below it, the
//! validation message if there is one. The focused text input is edited in
//! place through a [`TextInput`]; choice inputs step with left/right.

use bistro_core::forms::FieldErrors;
use crossterm::event::KeyCode;
use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style, Stylize},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::action::Action;
use crate::component::Component;
use crate::components::text_input::{TextInput, TextInputProps};
use crate::event::EventKind;
use crate::state::{AppState, FormId, Input, InputKind};

const LABEL_WIDTH: u16 = 20;

pub struct FormViewProps<'a> {
    pub state: &'a AppState,
    pub form: FormId,
    pub title: &'a str,
    pub is_focused: bool,
}

#[derive(Default)]
pub struct FormView {
    input: TextInput,
    /// The text input the cursor belongs to
    editing: Option<(FormId, Input)>,
}

/// What the embedded text input reports
#[derive(Debug)]
enum Edit {
    Change(String),
    Submit,
}

impl FormView {
    pub fn new() -> Self {
        Self::default()
    }

    /// Move the cursor to the end whenever a different text input gains focus
    fn sync(&mut self, form: FormId, input: Input, value: &str) {
        if self.editing != Some((form, input)) {
            self.editing = Some((form, input));
            self.input.move_to_end(value);
        }
    }
}

impl Component<Action> for FormView {
    type Props<'a> = FormViewProps<'a>;

    fn handle_event(
        &mut self,
        event: &EventKind,
        props: Self::Props<'_>,
    ) -> impl IntoIterator<Item = Action> {
        let state = props.state;
        let Some(input) = state.focused_input(props.form) else {
            return Vec::new();
        };
        if !props.is_focused || is_submitting(state, props.form) {
            return Vec::new();
        }

        match input.kind() {
            InputKind::Text => {
                let value = input_value(state, props.form, input);
                self.sync(props.form, input, &value);
                Component::<Edit>::handle_event(
                    &mut self.input,
                    event,
                    TextInputProps {
                        value: &value,
                        placeholder: "",
                        is_focused: true,
                        show_border: false,
                        title: None,
                        on_change: Edit::Change,
                        on_submit: |_| Edit::Submit,
                    },
                )
                .into_iter()
                .map(|edit| match edit {
                    Edit::Change(value) => Action::FormInputChange(input, value),
                    Edit::Submit => Action::FormSubmit,
                })
                .collect::<Vec<_>>()
            }
            InputKind::Choice => {
                let EventKind::Key(key) = event else {
                    return Vec::new();
                };
                let action = match key.code {
                    KeyCode::Left | KeyCode::Char('h') => Action::FormChoiceStep {
                        input,
                        forward: false,
                    },
                    KeyCode::Right | KeyCode::Char('l') | KeyCode::Char(' ') => {
                        Action::FormChoiceStep {
                            input,
                            forward: true,
                        }
                    }
                    KeyCode::Char(c @ '1'..='5') if input == Input::Rating => {
                        Action::FormRatingSet(c as u8 - b'0')
                    }
                    KeyCode::Enter => Action::FormSubmit,
                    _ => return Vec::new(),
                };
                vec![action]
            }
            // Lists are driven by the screen that owns them
            InputKind::List => Vec::new(),
        }
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        let state = props.state;
        let submitting = is_submitting(state, props.form);
        let focused = state.focused_input(props.form).filter(|_| props.is_focused);
        let errors = form_errors(state, props.form);

        let title = if submitting {
            format!(" {} (submitting... Esc to cancel) ", props.title)
        } else {
            format!(" {} ", props.title)
        };
        let block = Block::default()
            .borders(Borders::ALL)
            .title(title)
            .border_style(if props.is_focused {
                Style::default().fg(Color::Cyan)
            } else {
                Style::default().fg(Color::DarkGray)
            });
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let rows: Vec<(Input, Option<&'static str>)> = state
            .inputs(props.form)
            .iter()
            .filter(|input| input.kind() != InputKind::List)
            .map(|&input| {
                let error = input.field().zip(errors).and_then(|(f, e)| e.get(f));
                (input, error)
            })
            .collect();
        let constraints = rows
            .iter()
            .map(|(_, error)| Constraint::Length(if error.is_some() { 2 } else { 1 }));
        let areas = Layout::vertical(constraints).split(inner);

        for (&(input, error), &row) in rows.iter().zip(areas.iter()) {
            let is_current = focused == Some(input);
            let [line, error_line] =
                Layout::vertical([Constraint::Length(1), Constraint::Length(1)]).areas(row);
            let [label_area, value_area] =
                Layout::horizontal([Constraint::Length(LABEL_WIDTH), Constraint::Fill(1)])
                    .areas(line);

            let marker = if is_current { "> " } else { "  " };
            let label_style = if is_current {
                Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::Gray)
            };
            frame.render_widget(
                Paragraph::new(Span::styled(format!("{}{}", marker, input.label()), label_style)),
                label_area,
            );

            let value = input_value(state, props.form, input);
            if is_current && input.kind() == InputKind::Text && !submitting {
                self.sync(props.form, input, &value);
                Component::<Edit>::render(
                    &mut self.input,
                    frame,
                    value_area,
                    TextInputProps {
                        value: &value,
                        placeholder: placeholder(input),
                        is_focused: true,
                        show_border: false,
                        title: None,
                        on_change: Edit::Change,
                        on_submit: |_| Edit::Submit,
                    },
                );
            } else {
                frame.render_widget(
                    Paragraph::new(value_line(input, value, is_current)),
                    value_area,
                );
            }

            if let Some(message) = error {
                frame.render_widget(
                    Paragraph::new(Line::from(format!("  {}", message)).red()),
                    Rect {
                        x: value_area.x,
                        width: value_area.width,
                        ..error_line
                    },
                );
            }
        }
    }
}

fn value_line(input: Input, value: String, is_current: bool) -> Line<'static> {
    if value.is_empty() {
        return Line::from(placeholder(input)).dark_gray();
    }
    if input.kind() == InputKind::Choice && is_current {
        return Line::from(vec![
            Span::styled("◀ ", Style::default().fg(Color::Cyan)),
            Span::raw(value),
            Span::styled(" ▶", Style::default().fg(Color::Cyan)),
        ]);
    }
    Line::from(value)
}

fn placeholder(input: Input) -> &'static str {
    match input {
        Input::Date => "YYYY-MM-DD",
        Input::Time => "Select a time",
        Input::Price => "0.00",
        Input::Image => "(default image)",
        Input::SpecialRequests => "(optional)",
        _ => "",
    }
}

pub fn is_submitting(state: &AppState, form: FormId) -> bool {
    form.workflow().is_some_and(|w| state.is_submitting(w))
}

fn form_errors(state: &AppState, form: FormId) -> Option<&FieldErrors> {
    match form {
        FormId::Checkout => Some(&state.checkout.errors),
        FormId::Reservation => Some(&state.reservation.errors),
        FormId::Review => Some(&state.review.errors),
        FormId::MenuItem => state.admin.editor.as_ref().map(|editor| &editor.state.errors),
    }
}

/// The display text of one input
pub fn input_value(state: &AppState, form: FormId, input: Input) -> String {
    match form {
        FormId::Checkout => {
            let form = &state.checkout.form;
            match input {
                Input::Fulfillment => form.fulfillment.label().to_string(),
                Input::Name => form.name.clone(),
                Input::Email => form.email.clone(),
                Input::Phone => form.phone.clone(),
                Input::Address => form.address.clone(),
                _ => String::new(),
            }
        }
        FormId::Reservation => {
            let form = &state.reservation.form;
            match input {
                Input::Name => form.name.clone(),
                Input::Email => form.email.clone(),
                Input::Phone => form.phone.clone(),
                Input::Date => form.date.clone(),
                Input::Time => form
                    .time
                    .map(|t| t.format("%H:%M").to_string())
                    .unwrap_or_default(),
                Input::Guests => match form.guests {
                    1 => "1 guest".to_string(),
                    n => format!("{} guests", n),
                },
                Input::SpecialRequests => form.special_requests.clone(),
                _ => String::new(),
            }
        }
        FormId::Review => {
            let form = &state.review.form;
            match input {
                Input::Rating if form.rating == 0 => "Not rated (1-5)".to_string(),
                Input::Rating => stars(form.rating),
                Input::Dish => form
                    .menu_item
                    .as_ref()
                    .and_then(|id| state.shop.menu_item(id))
                    .map_or_else(|| "General review".to_string(), |item| item.name.clone()),
                Input::Name => form.name.clone(),
                Input::Comment => form.comment.clone(),
                _ => String::new(),
            }
        }
        FormId::MenuItem => {
            let Some(editor) = state.admin.editor.as_ref() else {
                return String::new();
            };
            let form = &editor.state.form;
            match input {
                Input::Name => form.name.clone(),
                Input::Description => form.description.clone(),
                Input::Price => form.price.clone(),
                Input::Category => form.category.label().to_string(),
                Input::Image => form.image.clone(),
                Input::Popular => if form.popular { "Yes" } else { "No" }.to_string(),
                _ => String::new(),
            }
        }
    }
}

/// `★★★☆☆` for a 1 to 5 rating
pub fn stars(rating: u8) -> String {
    let filled = usize::from(rating.min(5));
    format!("{}{}", "★".repeat(filled), "☆".repeat(5 - filled))
}

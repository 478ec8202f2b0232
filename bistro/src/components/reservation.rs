use bistro_core::forms::{time_slots, MAX_GUESTS, MIN_GUESTS};
use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Color, Style, Stylize},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use super::form_view::{FormView, FormViewProps};
use crate::action::Action;
use crate::component::Component;
use crate::event::EventKind;
use crate::state::{AppState, FormId};

/// Table booking form next to the opening hours
#[derive(Default)]
pub struct ReservationScreen {
    form: FormView,
}

pub struct ReservationScreenProps<'a> {
    pub state: &'a AppState,
}

impl ReservationScreen {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Component<Action> for ReservationScreen {
    type Props<'a> = ReservationScreenProps<'a>;

    fn handle_event(
        &mut self,
        event: &EventKind,
        props: Self::Props<'_>,
    ) -> impl IntoIterator<Item = Action> {
        self.form.handle_event(
            event,
            FormViewProps {
                state: props.state,
                form: FormId::Reservation,
                title: "",
                is_focused: true,
            },
        )
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        let [form_area, info_area] =
            Layout::horizontal([Constraint::Percentage(60), Constraint::Percentage(40)])
                .areas(area);

        self.form.render(
            frame,
            form_area,
            FormViewProps {
                state: props.state,
                form: FormId::Reservation,
                title: "Book a Table",
                is_focused: true,
            },
        );

        let selected = props.state.reservation.form.time;
        let slots: Vec<Span> = time_slots()
            .into_iter()
            .map(|slot| {
                let label = format!("{} ", slot.format("%H:%M"));
                if Some(slot) == selected {
                    Span::styled(label, Style::default().fg(Color::Black).bg(Color::Cyan))
                } else {
                    Span::raw(label)
                }
            })
            .collect();

        let info = vec![
            Line::from("Opening hours").bold(),
            Line::from("Lunch   11:00 - 15:00"),
            Line::from("Dinner  17:00 - 22:00"),
            Line::default(),
            Line::from("Available times").bold(),
            Line::from(slots),
            Line::default(),
            Line::from(format!("Parties of {} to {} guests.", MIN_GUESTS, MAX_GUESTS)),
            Line::from("For larger groups please call us.").dark_gray(),
        ];
        frame.render_widget(
            Paragraph::new(info)
                .wrap(Wrap { trim: true })
                .block(Block::default().borders(Borders::ALL).title(" Information ")),
            info_area,
        );
    }
}

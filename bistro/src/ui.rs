//! Top-level view: global keys, screen routing and the frame layout

use chrono::NaiveDate;
use crossterm::event::{KeyCode, KeyModifiers};
use ratatui::{
    layout::{Constraint, Layout, Rect},
    Frame,
};

use crate::action::Action;
use crate::components::{
    AdminScreen, AdminScreenProps, Component, Header, HeaderProps, HelpBar, HelpBarProps,
    HomeScreen, HomeScreenProps, MenuScreen, MenuScreenProps, NoticeBanner, NoticeBannerProps,
    OrderScreen, OrderScreenProps, ReservationScreen, ReservationScreenProps, ReviewScreen,
    ReviewScreenProps,
};
use crate::event::EventKind;
use crate::runtime::EventOutcome;
use crate::state::{AppState, Screen};

type Hints = &'static [(&'static str, &'static str)];

#[derive(Default)]
pub struct BistroUi {
    home: HomeScreen,
    menu: MenuScreen,
    order: OrderScreen,
    reservation: ReservationScreen,
    review: ReviewScreen,
    admin: AdminScreen,
}

impl BistroUi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn render(&mut self, frame: &mut Frame, area: Rect, state: &AppState) {
        let [header, notice, body, help] = Layout::vertical([
            Constraint::Length(Header::HEIGHT),
            Constraint::Length(1),
            Constraint::Fill(1),
            Constraint::Length(1),
        ])
        .areas(area);

        Header.render(frame, header, HeaderProps { state });
        NoticeBanner.render(
            frame,
            notice,
            NoticeBannerProps {
                notice: state.notice.as_ref(),
            },
        );

        match state.screen {
            Screen::Home => self.home.render(frame, body, HomeScreenProps { state }),
            Screen::Menu => self.menu.render(frame, body, MenuScreenProps { state }),
            Screen::Order => self.order.render(frame, body, OrderScreenProps { state }),
            Screen::Reservations => {
                self.reservation
                    .render(frame, body, ReservationScreenProps { state })
            }
            Screen::Reviews => self.review.render(frame, body, ReviewScreenProps { state }),
            Screen::Admin => self.admin.render(frame, body, AdminScreenProps { state }),
        }

        HelpBar.render(
            frame,
            help,
            HelpBarProps {
                hints: hints(state),
            },
        );
    }

    pub fn map_event(&mut self, event: &EventKind, state: &AppState) -> EventOutcome<Action> {
        if let EventKind::Resize(width, height) = event {
            return EventOutcome::action(Action::UiTerminalResize(*width, *height)).with_render();
        }

        if let EventKind::Key(key) = event {
            if key.modifiers.contains(KeyModifiers::CONTROL) {
                match key.code {
                    KeyCode::Char('c') | KeyCode::Char('q') => return Action::Quit.into(),
                    KeyCode::Char('d') => return Action::NoticeDismiss.into(),
                    KeyCode::Char('s') => return Action::FormSubmit.into(),
                    _ => {}
                }
            }
            match key.code {
                KeyCode::F(n) => {
                    return Screen::from_hotkey(n).map(Action::NavScreenSet).into();
                }
                KeyCode::Esc => return Action::UiBack.into(),
                KeyCode::Tab if state.active_form().is_some() => {
                    return Action::FormFocusNext.into();
                }
                KeyCode::BackTab if state.active_form().is_some() => {
                    return Action::FormFocusPrev.into();
                }
                _ => {}
            }
        }

        let actions: Vec<Action> = match state.screen {
            Screen::Home => self
                .home
                .handle_event(event, HomeScreenProps { state })
                .into_iter()
                .collect(),
            Screen::Menu => self
                .menu
                .handle_event(event, MenuScreenProps { state })
                .into_iter()
                .collect(),
            Screen::Order => self
                .order
                .handle_event(event, OrderScreenProps { state })
                .into_iter()
                .collect(),
            Screen::Reservations => self
                .reservation
                .handle_event(event, ReservationScreenProps { state })
                .into_iter()
                .collect(),
            Screen::Reviews => self
                .review
                .handle_event(event, ReviewScreenProps { state })
                .into_iter()
                .collect(),
            Screen::Admin => self
                .admin
                .handle_event(event, AdminScreenProps { state })
                .into_iter()
                .collect(),
        };
        EventOutcome::from_actions(actions)
    }
}

/// `UiDateSet` once the local date no longer matches the state's
pub fn date_change(state: &AppState, today: NaiveDate) -> Option<Action> {
    (state.today != today).then_some(Action::UiDateSet(today))
}

fn hints(state: &AppState) -> Hints {
    match state.screen {
        Screen::Home => &[("F1-F6", "screens"), ("^D", "dismiss"), ("^C", "quit")],
        Screen::Menu if state.menu.detail.is_some() => {
            &[("↑/↓", "quantity"), ("Enter", "add to cart"), ("Esc", "close")]
        }
        Screen::Menu if state.menu.search_focused => &[("Enter/Esc", "done")],
        Screen::Menu => &[
            ("/", "search"),
            ("[ ]", "category"),
            ("Enter", "details"),
            ("a", "add"),
            ("^C", "quit"),
        ],
        Screen::Order if state.checkout.submitting => &[("Esc", "cancel order")],
        Screen::Order => &[
            ("Tab", "next field"),
            ("+/-", "quantity"),
            ("d", "remove"),
            ("^S", "place order"),
            ("^C", "quit"),
        ],
        Screen::Reservations if state.reservation.submitting => &[("Esc", "cancel request")],
        Screen::Reservations => &[
            ("Tab", "next field"),
            ("←/→", "choose"),
            ("^S", "submit"),
            ("^C", "quit"),
        ],
        Screen::Reviews if state.review.submitting => &[("Esc", "cancel review")],
        Screen::Reviews => &[
            ("Tab", "next field"),
            ("1-5", "rating"),
            ("^S", "submit"),
            ("^C", "quit"),
        ],
        Screen::Admin => AdminScreen::hints(state),
    }
}

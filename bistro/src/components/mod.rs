//! Widgets and screens
//!
//! The generic pieces (`TextInput`, `SelectList`, modal helpers) know nothing
//! about the storefront. Screens take the whole [`AppState`](crate::state::AppState)
//! as props and emit [`Action`](crate::action::Action)s.

pub mod admin;
pub mod form_view;
pub mod header;
pub mod help_bar;
pub mod home;
pub mod menu;
pub mod modal;
pub mod notice_banner;
pub mod order;
pub mod reservation;
pub mod review;
pub mod select_list;
pub mod text_input;

use rust_decimal::Decimal;

pub use crate::component::Component;

pub use admin::{AdminScreen, AdminScreenProps};
pub use form_view::{stars, FormView, FormViewProps};
pub use header::{Header, HeaderProps};
pub use help_bar::{HelpBar, HelpBarProps};
pub use home::{HomeScreen, HomeScreenProps};
pub use menu::{MenuScreen, MenuScreenProps};
pub use modal::{centered_rect, render_modal, ModalStyle};
pub use notice_banner::{NoticeBanner, NoticeBannerProps};
pub use order::{OrderScreen, OrderScreenProps};
pub use reservation::{ReservationScreen, ReservationScreenProps};
pub use review::{ReviewScreen, ReviewScreenProps};
pub use select_list::{SelectList, SelectListProps};
pub use text_input::{TextInput, TextInputProps};

/// `$12.50`
pub fn money(value: Decimal) -> String {
    format!("${:.2}", value)
}

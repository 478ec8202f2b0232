//! The trait shared by screens and widgets

use ratatui::{layout::Rect, Frame};

use crate::event::EventKind;

/// A piece of the UI that draws from props and answers events with actions
///
/// Storefront data arrives through `Props` and only changes by dispatching
/// the returned actions. Cursor position, scroll offset and other view-only
/// bits may live on `self`.
///
/// Generic widgets such as [`TextInput`](crate::components::TextInput) are
/// `Component<A>` for any action type, so callers name the one they want:
/// `Component::<Action>::handle_event(&mut self.search, event, props)`.
pub trait Component<A> {
    type Props<'a>;

    /// Actions to dispatch for `event`; screens that only draw keep the
    /// default, which emits nothing
    #[allow(unused_variables)]
    fn handle_event(
        &mut self,
        event: &EventKind,
        props: Self::Props<'_>,
    ) -> impl IntoIterator<Item = A> {
        None::<A>
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>);
}

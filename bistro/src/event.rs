//! Terminal events and the background poller that reads them

use std::time::Duration;

use crossterm::event::{self, KeyEvent, KeyEventKind, MouseEvent, MouseEventKind};
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

/// Raw event from crossterm before processing
#[derive(Debug)]
pub enum RawEvent {
    Key(KeyEvent),
    Mouse(MouseEvent),
    Resize(u16, u16),
}

/// The event payload handed to components
#[derive(Debug, Clone)]
pub enum EventKind {
    /// Keyboard event (presses only)
    Key(KeyEvent),
    /// Mouse click/drag events
    Mouse(MouseEvent),
    /// Scroll wheel with position and delta
    Scroll { column: u16, row: u16, delta: isize },
    /// Terminal resize
    Resize(u16, u16),
}

/// Configuration for the event poller.
#[derive(Debug, Clone, Copy)]
pub struct PollerConfig {
    /// Timeout passed to each `crossterm::event::poll` call.
    pub poll_timeout: Duration,
    /// Sleep between poll cycles.
    pub loop_sleep: Duration,
}

impl Default for PollerConfig {
    fn default() -> Self {
        Self {
            poll_timeout: Duration::from_millis(10),
            loop_sleep: Duration::from_millis(16),
        }
    }
}

/// Spawn the crossterm reader
///
/// Reads in batches between sleeps and forwards everything to `tx` until the
/// token is cancelled or the receiver goes away.
pub fn spawn_event_poller(
    tx: mpsc::UnboundedSender<RawEvent>,
    config: PollerConfig,
    cancel_token: CancellationToken,
) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        const MAX_EVENTS_PER_BATCH: usize = 20;

        loop {
            tokio::select! {
                _ = cancel_token.cancelled() => {
                    info!("event poller cancelled, draining buffer");
                    while event::poll(Duration::ZERO).unwrap_or(false) {
                        let _ = event::read();
                    }
                    break;
                }
                _ = tokio::time::sleep(config.loop_sleep) => {
                    let mut events_processed = 0;
                    while events_processed < MAX_EVENTS_PER_BATCH
                        && event::poll(config.poll_timeout).unwrap_or(false)
                    {
                        events_processed += 1;
                        let raw = match event::read() {
                            Ok(event::Event::Key(key)) => Some(RawEvent::Key(key)),
                            Ok(event::Event::Mouse(mouse)) => Some(RawEvent::Mouse(mouse)),
                            Ok(event::Event::Resize(w, h)) => Some(RawEvent::Resize(w, h)),
                            _ => None,
                        };
                        if let Some(raw) = raw {
                            if tx.send(raw).is_err() {
                                debug!("event channel closed, stopping poller");
                                return;
                            }
                        }
                    }
                }
            }
        }
    })
}

/// Process a raw event into an [`EventKind`]
///
/// Key releases and repeats are dropped; `None` means nothing to handle.
pub fn process_raw_event(raw: RawEvent) -> Option<EventKind> {
    match raw {
        RawEvent::Key(key) if key.kind != KeyEventKind::Press => None,
        RawEvent::Key(key) => Some(EventKind::Key(key)),
        RawEvent::Mouse(mouse) => Some(match mouse.kind {
            MouseEventKind::ScrollDown => EventKind::Scroll {
                column: mouse.column,
                row: mouse.row,
                delta: 1,
            },
            MouseEventKind::ScrollUp => EventKind::Scroll {
                column: mouse.column,
                row: mouse.row,
                delta: -1,
            },
            _ => EventKind::Mouse(mouse),
        }),
        RawEvent::Resize(w, h) => Some(EventKind::Resize(w, h)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyCode, KeyEventState, KeyModifiers};

    fn press(kind: KeyEventKind) -> KeyEvent {
        KeyEvent {
            code: KeyCode::Char('a'),
            modifiers: KeyModifiers::empty(),
            kind,
            state: KeyEventState::empty(),
        }
    }

    #[test]
    fn test_key_release_is_dropped() {
        assert!(process_raw_event(RawEvent::Key(press(KeyEventKind::Release))).is_none());
        assert!(matches!(
            process_raw_event(RawEvent::Key(press(KeyEventKind::Press))),
            Some(EventKind::Key(_))
        ));
    }

    #[test]
    fn test_scroll_becomes_delta() {
        let mouse = MouseEvent {
            kind: MouseEventKind::ScrollUp,
            column: 3,
            row: 4,
            modifiers: KeyModifiers::empty(),
        };
        match process_raw_event(RawEvent::Mouse(mouse)) {
            Some(EventKind::Scroll { column, row, delta }) => {
                assert_eq!((column, row, delta), (3, 4, -1));
            }
            other => panic!("unexpected event: {:?}", other),
        }
    }

    #[test]
    fn test_resize_passes_through() {
        assert!(matches!(
            process_raw_event(RawEvent::Resize(100, 40)),
            Some(EventKind::Resize(100, 40))
        ));
    }
}

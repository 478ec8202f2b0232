//! The event/action/render loop
//!
//! One `tokio::select!` multiplexes three sources: terminal events from the
//! poller, actions from components and finished tasks, and notices published
//! on the notification channel. Actions go through the store; effects are
//! handed to the caller's effect handler with an [`EffectContext`].

use std::io;

use bistro_core::{Action, Middleware, Notice, NoticeBoard, NoopMiddleware, TaskManager};
use ratatui::backend::Backend;
use ratatui::layout::Rect;
use ratatui::{Frame, Terminal};
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

use crate::event::{process_raw_event, spawn_event_poller, EventKind, PollerConfig, RawEvent};
use crate::store::{EffectReducer, EffectStore};

/// Result of mapping an event into actions plus an optional render hint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventOutcome<A> {
    /// Actions to enqueue.
    pub actions: Vec<A>,
    /// Whether to force a re-render.
    pub needs_render: bool,
}

impl<A> EventOutcome<A> {
    /// No actions and no render.
    pub fn ignored() -> Self {
        Self {
            actions: Vec::new(),
            needs_render: false,
        }
    }

    /// No actions, but request a render.
    pub fn needs_render() -> Self {
        Self {
            actions: Vec::new(),
            needs_render: true,
        }
    }

    pub fn action(action: A) -> Self {
        Self {
            actions: vec![action],
            needs_render: false,
        }
    }

    pub fn actions<I>(actions: I) -> Self
    where
        I: IntoIterator<Item = A>,
    {
        Self {
            actions: actions.into_iter().collect(),
            needs_render: false,
        }
    }

    /// Mark that a render is needed.
    pub fn with_render(mut self) -> Self {
        self.needs_render = true;
        self
    }

    /// Create from a component's `handle_event` output
    pub fn from_actions(iter: impl IntoIterator<Item = A>) -> Self {
        Self::actions(iter)
    }

    pub fn is_ignored(&self) -> bool {
        self.actions.is_empty() && !self.needs_render
    }
}

impl<A> Default for EventOutcome<A> {
    fn default() -> Self {
        Self::ignored()
    }
}

impl<A> From<A> for EventOutcome<A> {
    fn from(action: A) -> Self {
        Self::action(action)
    }
}

impl<A> From<Vec<A>> for EventOutcome<A> {
    fn from(actions: Vec<A>) -> Self {
        Self {
            actions,
            needs_render: false,
        }
    }
}

impl<A> From<Option<A>> for EventOutcome<A> {
    fn from(action: Option<A>) -> Self {
        match action {
            Some(action) => Self::action(action),
            None => Self::ignored(),
        }
    }
}

/// Context passed to effect handlers.
pub struct EffectContext<'a, A: Action> {
    action_tx: &'a mpsc::UnboundedSender<A>,
    tasks: &'a mut TaskManager<A>,
}

impl<'a, A: Action> EffectContext<'a, A> {
    pub fn new(action_tx: &'a mpsc::UnboundedSender<A>, tasks: &'a mut TaskManager<A>) -> Self {
        Self { action_tx, tasks }
    }

    /// Send an action directly.
    pub fn emit(&self, action: A) {
        let _ = self.action_tx.send(action);
    }

    pub fn action_tx(&self) -> &mpsc::UnboundedSender<A> {
        self.action_tx
    }

    pub fn tasks(&mut self) -> &mut TaskManager<A> {
        self.tasks
    }
}

/// Turns a published notice into an action
type NoticeAction<A> = fn(Notice) -> A;

/// Runtime for the effect store
pub struct EffectRuntime<S, A: Action, E, M: Middleware<A> = NoopMiddleware> {
    store: EffectStore<S, A, E, M>,
    action_tx: mpsc::UnboundedSender<A>,
    action_rx: mpsc::UnboundedReceiver<A>,
    poller_config: PollerConfig,
    should_render: bool,
    tasks: TaskManager<A>,
    notices: Option<(NoticeBoard, NoticeAction<A>)>,
}

impl<S, A: Action, E> EffectRuntime<S, A, E, NoopMiddleware> {
    /// Create a runtime from state + effect reducer.
    pub fn new(state: S, reducer: EffectReducer<S, A, E>) -> Self {
        Self::from_store(EffectStore::new(state, reducer))
    }
}

impl<S, A: Action, E, M: Middleware<A>> EffectRuntime<S, A, E, M> {
    pub fn from_store(store: EffectStore<S, A, E, M>) -> Self {
        let (action_tx, action_rx) = mpsc::unbounded_channel();
        let tasks = TaskManager::new(action_tx.clone());
        Self {
            store,
            action_tx,
            action_rx,
            poller_config: PollerConfig::default(),
            should_render: true,
            tasks,
            notices: None,
        }
    }

    /// Configure event polling behavior.
    pub fn with_event_poller(mut self, config: PollerConfig) -> Self {
        self.poller_config = config;
        self
    }

    /// Listen on a notification channel; every notice becomes `to_action(notice)`
    pub fn with_notices(mut self, board: NoticeBoard, to_action: NoticeAction<A>) -> Self {
        self.notices = Some((board, to_action));
        self
    }

    /// Send an action into the runtime queue.
    pub fn enqueue(&self, action: A) {
        let _ = self.action_tx.send(action);
    }

    pub fn action_tx(&self) -> mpsc::UnboundedSender<A> {
        self.action_tx.clone()
    }

    pub fn state(&self) -> &S {
        self.store.state()
    }

    pub fn tasks(&mut self) -> &mut TaskManager<A> {
        &mut self.tasks
    }

    /// Run the event/action loop until quit.
    pub async fn run<B, FRender, FEvent, FQuit, FEffect, R>(
        &mut self,
        terminal: &mut Terminal<B>,
        mut render: FRender,
        mut map_event: FEvent,
        mut should_quit: FQuit,
        mut handle_effect: FEffect,
    ) -> io::Result<()>
    where
        B: Backend,
        FRender: FnMut(&mut Frame, Rect, &S),
        FEvent: FnMut(&EventKind, &S) -> R,
        R: Into<EventOutcome<A>>,
        FQuit: FnMut(&A) -> bool,
        FEffect: FnMut(E, &mut EffectContext<A>),
    {
        let (event_tx, mut event_rx) = mpsc::unbounded_channel::<RawEvent>();
        let cancel_token = CancellationToken::new();
        let _handle = spawn_event_poller(event_tx, self.poller_config, cancel_token.clone());

        loop {
            if self.should_render {
                let state = self.store.state();
                terminal.draw(|frame| {
                    let area = frame.area();
                    render(frame, area, state);
                })?;
                self.should_render = false;
            }

            tokio::select! {
                Some(raw_event) = event_rx.recv() => {
                    let Some(event) = process_raw_event(raw_event) else {
                        continue;
                    };
                    let outcome: EventOutcome<A> = map_event(&event, self.store.state()).into();
                    if outcome.needs_render {
                        self.should_render = true;
                    }
                    for action in outcome.actions {
                        let _ = self.action_tx.send(action);
                    }
                }

                Some(action) = self.action_rx.recv() => {
                    if should_quit(&action) {
                        break;
                    }

                    let result = self.store.dispatch(action);
                    if result.has_effects() {
                        let mut ctx = EffectContext::new(&self.action_tx, &mut self.tasks);
                        for effect in result.effects {
                            handle_effect(effect, &mut ctx);
                        }
                    }
                    self.should_render |= result.changed;
                }

                Some(action) = next_notice(self.notices.as_mut()) => {
                    let _ = self.action_tx.send(action);
                }

                else => {
                    break;
                }
            }
        }

        cancel_token.cancel();
        self.tasks.cancel_all();

        Ok(())
    }
}

/// Next notice as an action; never resolves without a board
async fn next_notice<A>(notices: Option<&mut (NoticeBoard, NoticeAction<A>)>) -> Option<A> {
    match notices {
        Some((board, to_action)) => board.recv().await.map(*to_action),
        None => std::future::pending().await,
    }
}

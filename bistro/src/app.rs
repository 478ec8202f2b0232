//! Effect handling: where the reducer's requests meet tasks and channels

use std::sync::Arc;
use std::time::Duration;

use bistro_core::workflow;
use bistro_core::{
    Backend, IdGenerator, IdKind, Notifier, SimulatedBackend, StorefrontConfig, SubmitError,
    TaskKey,
};

use crate::action::Action;
use crate::effect::Effect;
use crate::runtime::EffectContext;

/// Key of the auto-dismiss timer; restarting it replaces the running one
pub const NOTICE_TIMER: &str = "notice";

/// Everything the effects need besides the task manager
pub struct EffectHandler<B: Backend = SimulatedBackend> {
    backend: Arc<B>,
    ids: Arc<IdGenerator>,
    notifier: Notifier,
    notice_ttl: Duration,
}

impl EffectHandler<SimulatedBackend> {
    pub fn from_config(config: &StorefrontConfig, notifier: Notifier) -> Self {
        Self::new(
            SimulatedBackend::new(config.delays),
            notifier,
            config.notice_ttl,
        )
    }
}

impl<B: Backend + 'static> EffectHandler<B> {
    pub fn new(backend: B, notifier: Notifier, notice_ttl: Duration) -> Self {
        Self {
            backend: Arc::new(backend),
            ids: Arc::new(IdGenerator::new()),
            notifier,
            notice_ttl,
        }
    }

    pub fn handle(&self, effect: Effect, ctx: &mut EffectContext<Action>) {
        match effect {
            Effect::Submit(submission) => {
                let kind = submission.workflow();
                let backend = Arc::clone(&self.backend);
                let ids = Arc::clone(&self.ids);
                ctx.tasks().spawn(kind.key(), move |token| async move {
                    match workflow::submit(backend.as_ref(), &ids, submission, &token).await {
                        Ok(submitted) => Action::SubmitDidComplete(submitted),
                        Err(SubmitError::Cancelled) => Action::SubmitDidCancel(kind),
                        Err(SubmitError::Rejected(reason)) => {
                            tracing::warn!(
                                workflow = kind.as_str(),
                                %reason,
                                "submission rejected"
                            );
                            Action::SubmitDidFail {
                                workflow: kind,
                                reason,
                            }
                        }
                    }
                });
            }
            Effect::CancelSubmit(workflow) => {
                if !ctx.tasks().cancel(&workflow.key()) {
                    tracing::debug!(workflow = workflow.as_str(), "nothing to cancel");
                }
            }
            Effect::CreateMenuItem(draft) => {
                let item = draft.into_item(self.ids.next(IdKind::MenuItem));
                ctx.emit(Action::AdminItemDidCreate(item));
            }
            Effect::Notify(notice) => {
                self.notifier.push(notice);
            }
            Effect::ScheduleNoticeDismiss => {
                ctx.tasks()
                    .debounce(TaskKey::new(NOTICE_TIMER), self.notice_ttl, |_| async {
                        Action::NoticeDismiss
                    });
            }
        }
    }
}

//! Identifier generation
//!
//! Ids are `<prefix>-<token>` where the token is the current Unix time in
//! milliseconds. A generator never hands out the same token twice: if the
//! clock has not moved (or moved backwards) the previous token is bumped.

use std::sync::atomic::{AtomicI64, Ordering};

use chrono::Utc;

use crate::model::Id;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum IdKind {
    MenuItem,
    Order,
    Reservation,
    Review,
}

impl IdKind {
    pub fn prefix(self) -> &'static str {
        match self {
            IdKind::MenuItem => "item",
            IdKind::Order => "ord",
            IdKind::Reservation => "res",
            IdKind::Review => "rev",
        }
    }
}

/// Thread-safe id source; share it behind an `Arc`
#[derive(Debug, Default)]
pub struct IdGenerator {
    last: AtomicI64,
}

impl IdGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn next(&self, kind: IdKind) -> Id {
        self.next_at(kind, Utc::now().timestamp_millis())
    }

    fn next_at(&self, kind: IdKind, now_ms: i64) -> Id {
        let mut last = self.last.load(Ordering::Relaxed);
        let token = loop {
            let candidate = now_ms.max(last + 1);
            match self
                .last
                .compare_exchange_weak(last, candidate, Ordering::Relaxed, Ordering::Relaxed)
            {
                Ok(_) => break candidate,
                Err(current) => last = current,
            }
        };
        Id::new(format!("{}-{}", kind.prefix(), token))
    }
}

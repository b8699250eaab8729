//! Scripted provider for deterministic tests without network or subprocesses.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use namer_core::ProviderKind;
use parking_lot::Mutex;

use crate::error::{ProviderError, ProviderResult};
use crate::provider::SuggestionProvider;

/// Pre-programmed answers, consumed one per `complete` call.
#[derive(Clone, Debug)]
pub enum MockReply {
    /// Return this raw answer text.
    Text(String),
    /// Fail with a transport-style error.
    Error(String),
    /// Wait, then resolve the inner reply.
    Delay(Duration, Box<MockReply>),
}

impl MockReply {
    /// Convenience: a raw text answer.
    pub fn text(text: &str) -> Self {
        Self::Text(text.to_string())
    }

    /// Convenience: wrap any reply with a delay.
    pub fn delayed(delay: Duration, inner: MockReply) -> Self {
        Self::Delay(delay, Box::new(inner))
    }
}

/// Mock provider that replays scripted answers in order.
pub struct MockProvider {
    kind: ProviderKind,
    available: bool,
    replies: Mutex<VecDeque<MockReply>>,
    call_count: AtomicUsize,
    probe_count: AtomicUsize,
}

impl MockProvider {
    /// An available provider posing as `kind`.
    pub fn new(kind: ProviderKind, replies: Vec<MockReply>) -> Self {
        Self {
            kind,
            available: true,
            replies: Mutex::new(replies.into()),
            call_count: AtomicUsize::new(0),
            probe_count: AtomicUsize::new(0),
        }
    }

    /// A provider whose availability check always fails.
    pub fn unavailable(kind: ProviderKind) -> Self {
        Self {
            available: false,
            ..Self::new(kind, Vec::new())
        }
    }

    /// Number of `complete` calls so far.
    pub fn call_count(&self) -> usize {
        self.call_count.load(Ordering::Relaxed)
    }

    /// Number of `is_available` calls so far.
    pub fn probe_count(&self) -> usize {
        self.probe_count.load(Ordering::Relaxed)
    }
}

#[async_trait]
impl SuggestionProvider for MockProvider {
    fn kind(&self) -> ProviderKind {
        self.kind
    }

    async fn is_available(&self) -> bool {
        let _ = self.probe_count.fetch_add(1, Ordering::Relaxed);
        self.available
    }

    async fn complete(&self, _prompt: &str) -> ProviderResult<String> {
        let idx = self.call_count.fetch_add(1, Ordering::Relaxed);
        let next = self.replies.lock().pop_front();
        let Some(mut reply) = next else {
            return Err(ProviderError::Other {
                message: format!("MockProvider: no reply scripted for call {idx}"),
            });
        };
        loop {
            match reply {
                MockReply::Text(text) => return Ok(text),
                MockReply::Error(message) => return Err(ProviderError::Other { message }),
                MockReply::Delay(duration, inner) => {
                    tokio::time::sleep(duration).await;
                    reply = *inner;
                }
            }
        }
    }
}

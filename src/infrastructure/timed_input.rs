//! Prompt timeout wrapper
//!
//! Decorates any actor input with a deadline so a silent human resolves to
//! no answer instead of stalling a rule phase.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;

use crate::application::ports::outbound::{ActorInputPort, ActorRef};
use crate::domain::value_objects::PlayerId;

pub struct TimedInput {
    inner: Arc<dyn ActorInputPort>,
    timeout: Duration,
}

impl TimedInput {
    pub fn new(inner: Arc<dyn ActorInputPort>, timeout: Duration) -> Self {
        Self { inner, timeout }
    }
}

#[async_trait]
impl ActorInputPort for TimedInput {
    async fn ask_yes_no(&self, actor: ActorRef, prompt: &str) -> Option<bool> {
        match tokio::time::timeout(self.timeout, self.inner.ask_yes_no(actor, prompt)).await {
            Ok(answer) => answer,
            Err(_) => {
                tracing::debug!(prompt, "yes/no prompt timed out");
                None
            }
        }
    }

    async fn ask_choice(
        &self,
        actor: ActorRef,
        prompt: &str,
        candidates: &[PlayerId],
    ) -> Option<PlayerId> {
        match tokio::time::timeout(
            self.timeout,
            self.inner.ask_choice(actor, prompt, candidates),
        )
        .await
        {
            Ok(choice) => choice,
            Err(_) => {
                tracing::debug!(prompt, "choice prompt timed out");
                None
            }
        }
    }
}

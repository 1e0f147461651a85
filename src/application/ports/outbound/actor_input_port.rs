//! Actor input port - soliciting human decisions
//!
//! The engine never blocks on a human forever: implementations carry an
//! implicit timeout and resolve to `None` on expiry or explicit
//! cancellation. Callers treat `None` as "no decision made" and fall back
//! to the neutral default of whatever rule they were resolving.

use async_trait::async_trait;

use crate::domain::value_objects::PlayerId;

/// Who a prompt (or an announcement) is addressed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActorRef {
    Player(PlayerId),
    Storytellers,
}

/// Port for soliciting a decision from a human actor.
///
/// Implementations deliver the prompt over whatever transport they like;
/// the engine only sees the resolved choice, or `None` when nobody
/// answered in time.
#[async_trait]
pub trait ActorInputPort: Send + Sync {
    /// Ask a yes/no question.
    async fn ask_yes_no(&self, actor: ActorRef, prompt: &str) -> Option<bool>;

    /// Ask the actor to pick one of `candidates`.
    async fn ask_choice(
        &self,
        actor: ActorRef,
        prompt: &str,
        candidates: &[PlayerId],
    ) -> Option<PlayerId>;
}

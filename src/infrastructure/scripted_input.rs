//! Scripted actor input
//!
//! Answers prompts from pre-loaded queues, in order. Used by tests and by
//! the demo binary; an exhausted queue resolves to no answer, which is
//! exactly what a timed-out human looks like to the engine.

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::application::ports::outbound::{ActorInputPort, ActorRef};
use crate::domain::value_objects::PlayerId;

pub struct ScriptedInput {
    answers: Mutex<VecDeque<Option<bool>>>,
    choices: Mutex<VecDeque<Option<PlayerId>>>,
}

impl ScriptedInput {
    /// An input that never answers anything.
    pub fn empty() -> Self {
        Self {
            answers: Mutex::new(VecDeque::new()),
            choices: Mutex::new(VecDeque::new()),
        }
    }

    /// Queue yes/no answers, consumed one per prompt.
    pub fn with_answers(answers: Vec<Option<bool>>) -> Self {
        Self {
            answers: Mutex::new(answers.into()),
            choices: Mutex::new(VecDeque::new()),
        }
    }

    /// Queue player-choice answers, consumed one per prompt.
    pub fn and_choices(self, choices: Vec<Option<PlayerId>>) -> Self {
        Self {
            choices: Mutex::new(choices.into()),
            ..self
        }
    }
}

#[async_trait]
impl ActorInputPort for ScriptedInput {
    async fn ask_yes_no(&self, _actor: ActorRef, prompt: &str) -> Option<bool> {
        let answer = self
            .answers
            .lock()
            .ok()
            .and_then(|mut queue| queue.pop_front())
            .flatten();
        tracing::trace!(prompt, ?answer, "scripted yes/no");
        answer
    }

    async fn ask_choice(
        &self,
        _actor: ActorRef,
        prompt: &str,
        candidates: &[PlayerId],
    ) -> Option<PlayerId> {
        let choice = self
            .choices
            .lock()
            .ok()
            .and_then(|mut queue| queue.pop_front())
            .flatten()
            .filter(|pick| candidates.contains(pick));
        tracing::trace!(prompt, ?choice, "scripted choice");
        choice
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_answers_are_consumed_in_order_then_run_dry() {
        let input = ScriptedInput::with_answers(vec![Some(true), None, Some(false)]);
        assert_eq!(input.ask_yes_no(ActorRef::Storytellers, "a").await, Some(true));
        assert_eq!(input.ask_yes_no(ActorRef::Storytellers, "b").await, None);
        assert_eq!(input.ask_yes_no(ActorRef::Storytellers, "c").await, Some(false));
        assert_eq!(input.ask_yes_no(ActorRef::Storytellers, "d").await, None);
    }

    #[tokio::test]
    async fn test_choices_outside_the_candidates_are_dropped() {
        let wanted = PlayerId::new();
        let stranger = PlayerId::new();
        let input = ScriptedInput::empty().and_choices(vec![Some(stranger), Some(wanted)]);

        assert_eq!(
            input
                .ask_choice(ActorRef::Storytellers, "pick", &[wanted])
                .await,
            None
        );
        assert_eq!(
            input
                .ask_choice(ActorRef::Storytellers, "pick", &[wanted])
                .await,
            Some(wanted)
        );
    }
}

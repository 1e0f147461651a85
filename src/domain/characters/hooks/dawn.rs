//! Dawn (day-start) hooks

use async_trait::async_trait;

use crate::application::ports::outbound::{ActorRef, Audience};
use crate::domain::characters::{
    CharPath, Character, DayStartCapability, PhaseCx, RoleHookSet,
};
use crate::domain::value_objects::PlayerId;

/// Mayor: if the Mayor is due to die, the storytellers may have another
/// player die instead. The swap must be settled before the kill list is
/// published, so an unanswered choice holds the dawn back.
pub struct MayorHooks;

#[async_trait]
impl DayStartCapability for MayorHooks {
    async fn on_dawn(
        &self,
        cx: &mut PhaseCx<'_>,
        path: &CharPath,
        kills: &mut Vec<PlayerId>,
    ) -> bool {
        let Some(me) = cx.game.owner_of(path) else {
            return true;
        };
        if !kills.contains(&me) {
            return true;
        }
        let bounce = cx
            .input
            .ask_yes_no(
                cx.origin,
                "The Mayor is due to die tonight. Does another player die instead?",
            )
            .await;
        if bounce != Some(true) {
            // Declined or timed out: the Mayor's death stands.
            return true;
        }
        let candidates: Vec<PlayerId> = cx.game.living_players().filter(|id| *id != me).collect();
        match cx
            .input
            .ask_choice(cx.origin, "Choose who dies in the Mayor's place.", &candidates)
            .await
        {
            Some(pick) => {
                if let Some(slot) = kills.iter_mut().find(|slot| **slot == me) {
                    *slot = pick;
                }
                true
            }
            // The bounce was confirmed but never resolved; hold the dawn so
            // the storytellers can finish the decision before anything is
            // published.
            None => false,
        }
    }
}

impl RoleHookSet for MayorHooks {
    fn day_start(&self) -> Option<&dyn DayStartCapability> {
        Some(self)
    }
}

/// Banshee: when the demon kills her, the whole town hears about it and she
/// gains her double nomination and double vote from then on.
pub struct BansheeHooks;

#[async_trait]
impl DayStartCapability for BansheeHooks {
    async fn on_dawn(
        &self,
        cx: &mut PhaseCx<'_>,
        path: &CharPath,
        kills: &mut Vec<PlayerId>,
    ) -> bool {
        let Some(me) = cx.game.owner_of(path) else {
            return true;
        };
        if !kills.contains(&me) {
            return true;
        }
        if let Some(node) = cx.game.character_at_mut(path) {
            node.state.triggered = true;
        }
        if let Err(error) = cx
            .announcer
            .announce(Audience::Town, "The Banshee has wailed: a Banshee has died!")
            .await
        {
            tracing::warn!("Failed to announce the Banshee's scream: {}", error);
        }
        true
    }
}

impl RoleHookSet for BansheeHooks {
    fn day_start(&self) -> Option<&dyn DayStartCapability> {
        Some(self)
    }

    fn double_vote_active(&self, character: &Character) -> bool {
        character.state.triggered
    }
}

/// Ravenkeeper: if she dies at night she wakes to choose a player and learns
/// their character before the dawn is published.
pub struct RavenkeeperHooks;

#[async_trait]
impl DayStartCapability for RavenkeeperHooks {
    async fn on_dawn(
        &self,
        cx: &mut PhaseCx<'_>,
        path: &CharPath,
        kills: &mut Vec<PlayerId>,
    ) -> bool {
        let Some(me) = cx.game.owner_of(path) else {
            return true;
        };
        if !kills.contains(&me) {
            return true;
        }
        let candidates: Vec<PlayerId> = cx
            .game
            .seating
            .iter()
            .filter(|p| p.id != me)
            .map(|p| p.id)
            .collect();
        let pick = cx
            .input
            .ask_choice(
                ActorRef::Player(me),
                "You have died in the night. Choose a player to learn.",
                &candidates,
            )
            .await;
        if let Some(pick) = pick {
            let learned = cx
                .game
                .player(pick)
                .map(|p| format!("{} is the {}.", p.name, p.character.role.display_name()));
            if let Some(text) = learned {
                if let Err(error) = cx.announcer.announce(Audience::Player(me), &text).await {
                    tracing::warn!("Failed to deliver the Ravenkeeper's result: {}", error);
                }
            }
        }
        true
    }
}

impl RoleHookSet for RavenkeeperHooks {
    fn day_start(&self) -> Option<&dyn DayStartCapability> {
        Some(self)
    }
}

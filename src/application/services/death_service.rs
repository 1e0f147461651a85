//! Death resolution service
//!
//! Implements the priority-sorted capability pass: every *living* player's
//! death hooks are collected (a dead character's death hook never fires),
//! stably sorted ascending by priority band, and invoked in order with the
//! evolving verdict threaded through. The band order is a load-bearing game
//! rule: it is what lets a forced kill override a protection that ran
//! earlier in the same resolution.

use std::sync::Arc;

use crate::application::ports::outbound::{ActorInputPort, ActorRef, AnnouncementPort};
use crate::domain::characters::{hooks, CharPath, DeathCapability, PhaseCx};
use crate::domain::entities::Game;
use crate::domain::events::GameEventKind;
use crate::domain::value_objects::PlayerId;

/// Errors raised by death resolution.
#[derive(Debug, thiserror::Error)]
pub enum DeathError {
    #[error("Player not found")]
    UnknownPlayer,

    #[error("{0} is already a ghost")]
    AlreadyGhost(String),
}

/// Service resolving whether a marked player actually dies.
pub struct DeathService {
    input: Arc<dyn ActorInputPort>,
    announcer: Arc<dyn AnnouncementPort>,
}

impl DeathService {
    pub fn new(input: Arc<dyn ActorInputPort>, announcer: Arc<dyn AnnouncementPort>) -> Self {
        Self { input, announcer }
    }

    /// Resolve a death marked against `target`, starting from a tentative
    /// `dies = true`. On a confirmed death the target becomes a ghost and
    /// gains exactly one dead vote. Resolving against a ghost is an
    /// invariant violation and mutates nothing.
    pub async fn resolve(&self, game: &mut Game, target: PlayerId) -> Result<bool, DeathError> {
        let player = game.player(target).ok_or(DeathError::UnknownPlayer)?;
        if player.is_ghost {
            return Err(DeathError::AlreadyGhost(player.name.clone()));
        }

        // Only living players' abilities participate.
        let mut holders: Vec<(CharPath, &'static dyn DeathCapability)> = game
            .hook_holders(true, |hooks| hooks.death().is_some())
            .into_iter()
            .filter_map(|path| {
                let role = game.character_at(&path)?.role;
                hooks::for_role(role).death().map(|cap| (path, cap))
            })
            .collect();
        // Stable: holders in the same band keep seating order.
        holders.sort_by_key(|(_, cap)| cap.priority());

        let mut dies = true;
        {
            let mut cx = PhaseCx {
                game: &mut *game,
                input: &*self.input,
                announcer: &*self.announcer,
                origin: ActorRef::Storytellers,
            };
            for (path, cap) in &holders {
                dies = cap.on_death(&mut cx, path, target, dies).await;
            }
        }

        if dies {
            if let Some(player) = game.player_mut(target) {
                player.make_ghost();
                tracing::info!("{} has died", player.name);
            }
            game.record(GameEventKind::PlayerDied { player: target });
        } else {
            tracing::debug!("death of player {} averted", target);
            game.record(GameEventKind::DeathAverted { player: target });
        }
        Ok(dies)
    }

    /// Mark a player to die overnight; the kill is resolved at dawn.
    pub fn mark_overnight(&self, game: &mut Game, target: PlayerId) -> Result<(), DeathError> {
        let player = game.player(target).ok_or(DeathError::UnknownPlayer)?;
        if player.is_ghost {
            return Err(DeathError::AlreadyGhost(player.name.clone()));
        }
        if !game.pending_deaths.contains(&target) {
            game.pending_deaths.push(target);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::characters::{Character, Role};
    use crate::domain::entities::Player;
    use crate::domain::value_objects::Script;
    use crate::infrastructure::{RecordingAnnouncer, ScriptedInput};

    fn service(input: ScriptedInput) -> DeathService {
        DeathService::new(Arc::new(input), Arc::new(RecordingAnnouncer::new()))
    }

    fn town(roles: &[Role]) -> Game {
        let mut game = Game::new(Script::trouble_brewing());
        for (index, role) in roles.iter().enumerate() {
            let alignment = role.team().starting_alignment();
            game.seat(Player::new(
                format!("p{}", index),
                Character::new(*role),
                alignment,
            ));
        }
        game
    }

    #[tokio::test]
    async fn test_plain_death_converts_to_ghost_with_one_token() {
        let mut game = town(&[Role::Chef, Role::Empath, Role::Imp]);
        let target = game.seating[0].id;

        let died = service(ScriptedInput::empty())
            .resolve(&mut game, target)
            .await
            .unwrap();
        assert!(died);
        let player = game.player(target).unwrap();
        assert!(player.is_ghost);
        assert_eq!(player.dead_votes, 1);
    }

    #[tokio::test]
    async fn test_resolving_a_ghost_is_rejected_without_mutation() {
        let mut game = town(&[Role::Chef, Role::Imp]);
        let target = game.seating[0].id;
        game.seating[0].make_ghost();
        game.seating[0].dead_votes = 0;

        let result = service(ScriptedInput::empty()).resolve(&mut game, target).await;
        assert!(matches!(result, Err(DeathError::AlreadyGhost(_))));
        assert_eq!(game.player(target).unwrap().dead_votes, 0);
    }

    #[tokio::test]
    async fn test_forced_kill_overrides_self_protection() {
        // Sailor protects herself; the Assassin's forced kill runs in a
        // later band and must win.
        let mut game = town(&[Role::Sailor, Role::Assassin, Role::Chef]);
        let sailor = game.seating[0].id;
        game.seating[1].character.state.chosen = Some(sailor);

        let died = service(ScriptedInput::empty())
            .resolve(&mut game, sailor)
            .await
            .unwrap();
        assert!(died);
        assert!(game.player(sailor).unwrap().is_ghost);
    }

    #[tokio::test]
    async fn test_self_protection_holds_without_a_forced_kill() {
        let mut game = town(&[Role::Sailor, Role::Chef]);
        let sailor = game.seating[0].id;

        let died = service(ScriptedInput::empty())
            .resolve(&mut game, sailor)
            .await
            .unwrap();
        assert!(!died);
        assert!(!game.player(sailor).unwrap().is_ghost);
    }

    #[tokio::test]
    async fn test_dead_characters_death_hooks_never_fire() {
        let mut game = town(&[Role::Sailor, Role::Soldier, Role::Chef]);
        let soldier = game.seating[1].id;
        // A dead Sailor stays out of everyone's death resolution; the
        // Soldier still protects himself at night.
        game.seating[0].make_ghost();

        let died = service(ScriptedInput::empty())
            .resolve(&mut game, soldier)
            .await
            .unwrap();
        assert!(!died, "Soldier survives the night demon attack");
    }

    #[tokio::test]
    async fn test_poisoned_protection_is_skipped() {
        let mut game = town(&[Role::Sailor, Role::Chef]);
        let sailor = game.seating[0].id;
        game.seating[0].character.is_poisoned = true;

        let died = service(ScriptedInput::empty())
            .resolve(&mut game, sailor)
            .await
            .unwrap();
        assert!(died, "a drunk Sailor has no protection");
    }
}

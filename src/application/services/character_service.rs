//! Character service - storyteller bookkeeping on live characters
//!
//! Night-phase ability targets, poison, role swaps and copied abilities are
//! all applied by the storytellers through this service; the rule phases
//! only ever read the state it maintains.

use crate::domain::characters::{CharPath, Character, CharacterError, Role};
use crate::domain::entities::Game;
use crate::domain::events::GameEventKind;
use crate::domain::value_objects::PlayerId;

#[derive(Debug, thiserror::Error)]
pub enum CharacterServiceError {
    #[error("Player not found")]
    UnknownPlayer,

    #[error("no character at that position")]
    BadPath,

    #[error("no copied ability to revoke")]
    NothingToRevoke,

    #[error(transparent)]
    Character(#[from] CharacterError),
}

/// Service applying storyteller decisions to characters.
pub struct CharacterService;

impl CharacterService {
    pub fn new() -> Self {
        Self
    }

    /// Point a character's ability at a target (the Butler's master, the
    /// Witch's curse, ...). `None` clears it.
    pub fn set_chosen(
        &self,
        game: &mut Game,
        path: &CharPath,
        target: Option<PlayerId>,
    ) -> Result<(), CharacterServiceError> {
        let node = game
            .character_at_mut(path)
            .ok_or(CharacterServiceError::BadPath)?;
        node.state.chosen = target;
        Ok(())
    }

    pub fn set_poisoned(
        &self,
        game: &mut Game,
        player: PlayerId,
        poisoned: bool,
    ) -> Result<(), CharacterServiceError> {
        let target = game
            .player_mut(player)
            .ok_or(CharacterServiceError::UnknownPlayer)?;
        target.character.is_poisoned = poisoned;
        game.record(GameEventKind::PoisonChanged { player, poisoned });
        tracing::debug!(%player, poisoned, "poison state changed");
        Ok(())
    }

    /// Swap a player's role outright, discarding the old character and all
    /// of its copied abilities.
    pub fn change_role(
        &self,
        game: &mut Game,
        player: PlayerId,
        role: Role,
    ) -> Result<(), CharacterServiceError> {
        if !game.script.contains(role) && !role.is_traveler() {
            tracing::warn!(%player, role = role.display_name(), "role is off-script");
        }
        let target = game
            .player_mut(player)
            .ok_or(CharacterServiceError::UnknownPlayer)?;
        target.change_role(role);
        game.record(GameEventKind::RoleChanged { player, role });
        Ok(())
    }

    /// Nest a copied ability under a composite character.
    pub fn grant_ability(
        &self,
        game: &mut Game,
        path: &CharPath,
        role: Role,
    ) -> Result<(), CharacterServiceError> {
        let owner = game.owner_of(path).ok_or(CharacterServiceError::BadPath)?;
        let node = game
            .character_at_mut(path)
            .ok_or(CharacterServiceError::BadPath)?;
        node.grant_ability(Character::new(role))?;
        game.record(GameEventKind::AbilityGranted {
            player: owner,
            role,
        });
        Ok(())
    }

    /// Remove a player's most recently copied ability, innermost first.
    pub fn revoke_ability(
        &self,
        game: &mut Game,
        player: PlayerId,
    ) -> Result<Role, CharacterServiceError> {
        let target = game
            .player_mut(player)
            .ok_or(CharacterServiceError::UnknownPlayer)?;
        let revoked = target
            .character
            .revoke_last_ability()
            .ok_or(CharacterServiceError::NothingToRevoke)?;
        game.record(GameEventKind::AbilityRevoked {
            player,
            role: revoked.role,
        });
        Ok(revoked.role)
    }
}

impl Default for CharacterService {
    fn default() -> Self {
        Self::new()
    }
}

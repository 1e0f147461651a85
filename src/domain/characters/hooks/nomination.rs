//! Nomination proceed hooks
//!
//! Deaths demanded here go onto the dispatch's death list; the nomination
//! service resolves them through normal death resolution after the hook
//! pass, whether or not the nomination survives to a vote.

use async_trait::async_trait;

use crate::domain::characters::{CharPath, NominationCapability, PhaseCx, RoleHookSet};
use crate::domain::characters::hooks::ExpireChoice;
use crate::domain::characters::DayEndCapability;
use crate::domain::value_objects::{PlayerId, Team};

/// Virgin: the first time she is nominated, a townsfolk nominator is
/// executed immediately and the nomination goes no further.
pub struct VirginHooks;

#[async_trait]
impl NominationCapability for VirginHooks {
    async fn on_nomination(
        &self,
        cx: &mut PhaseCx<'_>,
        path: &CharPath,
        nominator: Option<PlayerId>,
        nominee: Option<PlayerId>,
        deaths: &mut Vec<PlayerId>,
    ) -> bool {
        let Some(me) = cx.game.owner_of(path) else {
            return true;
        };
        if nominee != Some(me) {
            return true;
        }
        let already_used = cx
            .game
            .character_at(path)
            .map(|node| node.state.used)
            .unwrap_or(true);
        if already_used {
            return true;
        }
        // The ability is spent on the first nomination no matter who made it.
        if let Some(node) = cx.game.character_at_mut(path) {
            node.state.used = true;
        }
        if let Some(nominator) = nominator {
            let townsfolk = cx
                .game
                .player(nominator)
                .map(|p| p.character.role.team() == Team::Townsfolk)
                .unwrap_or(false);
            if townsfolk {
                deaths.push(nominator);
                return false;
            }
        }
        true
    }
}

impl RoleHookSet for VirginHooks {
    fn nomination(&self) -> Option<&dyn NominationCapability> {
        Some(self)
    }
}

/// Witch: the cursed player dies on nominating while five or more live.
pub struct WitchHooks;

#[async_trait]
impl NominationCapability for WitchHooks {
    async fn on_nomination(
        &self,
        cx: &mut PhaseCx<'_>,
        path: &CharPath,
        nominator: Option<PlayerId>,
        _nominee: Option<PlayerId>,
        deaths: &mut Vec<PlayerId>,
    ) -> bool {
        let cursed = cx.game.character_at(path).and_then(|node| node.state.chosen);
        if let (Some(nominator), Some(cursed)) = (nominator, cursed) {
            if nominator == cursed && cx.game.living_count() >= 5 {
                deaths.push(nominator);
            }
        }
        // The curse kills but never blocks the nomination itself.
        true
    }
}

impl RoleHookSet for WitchHooks {
    fn nomination(&self) -> Option<&dyn NominationCapability> {
        Some(self)
    }

    fn day_end(&self) -> Option<&dyn DayEndCapability> {
        Some(&ExpireChoice)
    }
}

/// Golem: may nominate only once per game; a non-demon nominee dies from
/// the nomination itself.
pub struct GolemHooks;

#[async_trait]
impl NominationCapability for GolemHooks {
    async fn on_nomination(
        &self,
        cx: &mut PhaseCx<'_>,
        path: &CharPath,
        nominator: Option<PlayerId>,
        nominee: Option<PlayerId>,
        deaths: &mut Vec<PlayerId>,
    ) -> bool {
        let Some(me) = cx.game.owner_of(path) else {
            return true;
        };
        if nominator != Some(me) {
            return true;
        }
        let already_used = cx
            .game
            .character_at(path)
            .map(|node| node.state.used)
            .unwrap_or(true);
        if already_used {
            return false;
        }
        if let Some(node) = cx.game.character_at_mut(path) {
            node.state.used = true;
        }
        if let Some(nominee) = nominee {
            let demon = cx
                .game
                .player(nominee)
                .map(|p| p.character.role.is_demon())
                .unwrap_or(false);
            if !demon {
                deaths.push(nominee);
            }
        }
        true
    }
}

impl RoleHookSet for GolemHooks {
    fn nomination(&self) -> Option<&dyn NominationCapability> {
        Some(self)
    }
}

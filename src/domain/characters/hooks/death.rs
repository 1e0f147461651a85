//! Death-resolution hooks
//!
//! Every holder runs in ascending priority-band order, threading the
//! evolving verdict through: protections first, forced kills last. A hook
//! that has nothing to say returns the verdict unchanged.

use async_trait::async_trait;

use crate::domain::characters::hooks::ExpireChoice;
use crate::domain::characters::{
    CharPath, DayEndCapability, DeathCapability, DeathPriority, PhaseCx, RoleHookSet,
};
use crate::domain::value_objects::{Alignment, PlayerId};

/// Pacifist: an executed good player might survive, at the storytellers'
/// discretion.
pub struct PacifistHooks;

#[async_trait]
impl DeathCapability for PacifistHooks {
    fn priority(&self) -> DeathPriority {
        DeathPriority::ProtectOthers
    }

    async fn on_death(
        &self,
        cx: &mut PhaseCx<'_>,
        _path: &CharPath,
        target: PlayerId,
        dies: bool,
    ) -> bool {
        if !dies || !cx.game.is_day() {
            return dies;
        }
        let (name, good) = match cx.game.player(target) {
            Some(p) => (p.name.clone(), p.alignment == Alignment::Good),
            None => return dies,
        };
        if !good {
            return dies;
        }
        let prompt = format!("The Pacifist is in play. Does {} survive the execution?", name);
        match cx.input.ask_yes_no(cx.origin, &prompt).await {
            Some(true) => false,
            _ => dies,
        }
    }
}

impl RoleHookSet for PacifistHooks {
    fn death(&self) -> Option<&dyn DeathCapability> {
        Some(self)
    }
}

/// Tea Lady: while both of her living neighbors are good, they cannot die.
pub struct TeaLadyHooks;

#[async_trait]
impl DeathCapability for TeaLadyHooks {
    fn priority(&self) -> DeathPriority {
        DeathPriority::ProtectOthers
    }

    async fn on_death(
        &self,
        cx: &mut PhaseCx<'_>,
        path: &CharPath,
        target: PlayerId,
        dies: bool,
    ) -> bool {
        if !dies {
            return dies;
        }
        let Some(me) = cx.game.owner_of(path) else {
            return dies;
        };
        let Some((left, right)) = cx.game.living_neighbors(me) else {
            return dies;
        };
        let both_good = [left, right].iter().all(|id| {
            cx.game
                .player(*id)
                .map(|p| p.alignment == Alignment::Good)
                .unwrap_or(false)
        });
        if both_good && (target == left || target == right) {
            false
        } else {
            dies
        }
    }
}

impl RoleHookSet for TeaLadyHooks {
    fn death(&self) -> Option<&dyn DeathCapability> {
        Some(self)
    }
}

/// Devil's Advocate: the player he chose cannot die by execution today.
pub struct DevilsAdvocateHooks;

#[async_trait]
impl DeathCapability for DevilsAdvocateHooks {
    fn priority(&self) -> DeathPriority {
        DeathPriority::ProtectOthers
    }

    async fn on_death(
        &self,
        cx: &mut PhaseCx<'_>,
        path: &CharPath,
        target: PlayerId,
        dies: bool,
    ) -> bool {
        let chosen = cx.game.character_at(path).and_then(|node| node.state.chosen);
        if dies && cx.game.is_day() && chosen == Some(target) {
            false
        } else {
            dies
        }
    }
}

impl RoleHookSet for DevilsAdvocateHooks {
    fn death(&self) -> Option<&dyn DeathCapability> {
        Some(self)
    }

    fn day_end(&self) -> Option<&dyn DayEndCapability> {
        Some(&ExpireChoice)
    }
}

/// Monk: the player he chose is safe from night deaths.
pub struct MonkHooks;

#[async_trait]
impl DeathCapability for MonkHooks {
    fn priority(&self) -> DeathPriority {
        DeathPriority::ProtectOthers
    }

    async fn on_death(
        &self,
        cx: &mut PhaseCx<'_>,
        path: &CharPath,
        target: PlayerId,
        dies: bool,
    ) -> bool {
        let Some(me) = cx.game.owner_of(path) else {
            return dies;
        };
        let chosen = cx.game.character_at(path).and_then(|node| node.state.chosen);
        if dies && !cx.game.is_day() && chosen == Some(target) && target != me {
            false
        } else {
            dies
        }
    }
}

impl RoleHookSet for MonkHooks {
    fn death(&self) -> Option<&dyn DeathCapability> {
        Some(self)
    }

    fn day_end(&self) -> Option<&dyn DayEndCapability> {
        Some(&ExpireChoice)
    }
}

/// Soldier: safe from the demon.
pub struct SoldierHooks;

#[async_trait]
impl DeathCapability for SoldierHooks {
    fn priority(&self) -> DeathPriority {
        DeathPriority::ProtectSelf
    }

    async fn on_death(
        &self,
        cx: &mut PhaseCx<'_>,
        path: &CharPath,
        target: PlayerId,
        dies: bool,
    ) -> bool {
        let me = cx.game.owner_of(path);
        if dies && me == Some(target) && !cx.game.is_day() {
            false
        } else {
            dies
        }
    }
}

impl RoleHookSet for SoldierHooks {
    fn death(&self) -> Option<&dyn DeathCapability> {
        Some(self)
    }
}

/// Fool: survives the first time he would die.
pub struct FoolHooks;

#[async_trait]
impl DeathCapability for FoolHooks {
    fn priority(&self) -> DeathPriority {
        DeathPriority::ProtectSelf
    }

    async fn on_death(
        &self,
        cx: &mut PhaseCx<'_>,
        path: &CharPath,
        target: PlayerId,
        dies: bool,
    ) -> bool {
        let me = cx.game.owner_of(path);
        if !dies || me != Some(target) {
            return dies;
        }
        let spent = cx
            .game
            .character_at(path)
            .map(|node| node.state.used)
            .unwrap_or(true);
        if spent {
            return dies;
        }
        if let Some(node) = cx.game.character_at_mut(path) {
            node.state.used = true;
        }
        false
    }
}

impl RoleHookSet for FoolHooks {
    fn death(&self) -> Option<&dyn DeathCapability> {
        Some(self)
    }
}

/// Sailor: cannot die while sober. Poison silences this hook like any
/// other, which is exactly the drunk Sailor.
pub struct SailorHooks;

#[async_trait]
impl DeathCapability for SailorHooks {
    fn priority(&self) -> DeathPriority {
        DeathPriority::ProtectSelf
    }

    async fn on_death(
        &self,
        cx: &mut PhaseCx<'_>,
        path: &CharPath,
        target: PlayerId,
        dies: bool,
    ) -> bool {
        if dies && cx.game.owner_of(path) == Some(target) {
            false
        } else {
            dies
        }
    }
}

impl RoleHookSet for SailorHooks {
    fn death(&self) -> Option<&dyn DeathCapability> {
        Some(self)
    }
}

/// Tinker: may die at any time, even when something else saved him.
pub struct TinkerHooks;

#[async_trait]
impl DeathCapability for TinkerHooks {
    fn priority(&self) -> DeathPriority {
        DeathPriority::KillSelf
    }

    async fn on_death(
        &self,
        cx: &mut PhaseCx<'_>,
        path: &CharPath,
        target: PlayerId,
        dies: bool,
    ) -> bool {
        if dies || cx.game.owner_of(path) != Some(target) {
            return dies;
        }
        matches!(
            cx.input
                .ask_yes_no(cx.origin, "The Tinker was saved. Does he die anyway?")
                .await,
            Some(true)
        )
    }
}

impl RoleHookSet for TinkerHooks {
    fn death(&self) -> Option<&dyn DeathCapability> {
        Some(self)
    }
}

/// Assassin: his chosen night victim dies even if protected.
pub struct AssassinHooks;

#[async_trait]
impl DeathCapability for AssassinHooks {
    fn priority(&self) -> DeathPriority {
        DeathPriority::ForcedKill
    }

    async fn on_death(
        &self,
        cx: &mut PhaseCx<'_>,
        path: &CharPath,
        target: PlayerId,
        dies: bool,
    ) -> bool {
        let chosen = cx.game.character_at(path).and_then(|node| node.state.chosen);
        if chosen == Some(target) && !cx.game.is_day() {
            true
        } else {
            dies
        }
    }
}

impl RoleHookSet for AssassinHooks {
    fn death(&self) -> Option<&dyn DeathCapability> {
        Some(self)
    }

    fn day_end(&self) -> Option<&dyn DayEndCapability> {
        Some(&ExpireChoice)
    }
}

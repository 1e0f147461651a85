//! Per-role capability implementations
//!
//! [`for_role`] is the single registry mapping a role identity to its hook
//! set. Roles without rule-phase behavior share [`NoHooks`]; travelers
//! without further hooks share [`TravelerNotice`] because a traveler's role
//! is public knowledge and shows up in the seating display.

mod dawn;
mod death;
mod nomination;
mod voting;

use crate::domain::characters::{
    CharPath, DayEndCapability, NoHooks, Role, RoleHookSet, SeatingOrderCapability,
};
use crate::domain::entities::{Game, SeatView};

pub use dawn::{BansheeHooks, MayorHooks, RavenkeeperHooks};
pub use death::{
    AssassinHooks, DevilsAdvocateHooks, FoolHooks, MonkHooks, PacifistHooks, SailorHooks,
    SoldierHooks, TeaLadyHooks, TinkerHooks,
};
pub use nomination::{GolemHooks, VirginHooks, WitchHooks};
pub use voting::{BureaucratHooks, ButlerHooks, OrganGrinderHooks, ThiefHooks, ZealotHooks};

/// Appends the traveler's public role to their seating-display row.
pub struct TravelerNotice;

impl SeatingOrderCapability for TravelerNotice {
    fn adjust(&self, game: &Game, path: &CharPath, view: &mut Vec<SeatView>) {
        let Some(owner) = game.owner_of(path) else {
            return;
        };
        let Some(node) = game.character_at(path) else {
            return;
        };
        if let Some(row) = view.iter_mut().find(|row| row.player == owner) {
            row.line.push_str(" - ");
            row.line.push_str(node.role.display_name());
        }
    }
}

impl RoleHookSet for TravelerNotice {
    fn seating_order(&self) -> Option<&dyn SeatingOrderCapability> {
        Some(self)
    }
}

/// Dusk cleanup shared by every role whose chosen target lasts one day.
pub struct ExpireChoice;

impl DayEndCapability for ExpireChoice {
    fn on_dusk(&self, game: &mut Game, path: &CharPath) {
        if let Some(node) = game.character_at_mut(path) {
            node.state.chosen = None;
        }
    }
}

/// The hook set for a role identity.
pub fn for_role(role: Role) -> &'static dyn RoleHookSet {
    match role {
        // Dawn
        Role::Mayor => &MayorHooks,
        Role::Banshee => &BansheeHooks,
        Role::Ravenkeeper => &RavenkeeperHooks,

        // Nominations
        Role::Virgin => &VirginHooks,
        Role::Witch => &WitchHooks,
        Role::Golem => &GolemHooks,

        // Voting
        Role::Butler => &ButlerHooks,
        Role::Zealot => &ZealotHooks,
        Role::OrganGrinder => &OrganGrinderHooks,
        Role::Bureaucrat => &BureaucratHooks,
        Role::Thief => &ThiefHooks,

        // Death resolution
        Role::Pacifist => &PacifistHooks,
        Role::TeaLady => &TeaLadyHooks,
        Role::DevilsAdvocate => &DevilsAdvocateHooks,
        Role::Monk => &MonkHooks,
        Role::Soldier => &SoldierHooks,
        Role::Fool => &FoolHooks,
        Role::Sailor => &SailorHooks,
        Role::Tinker => &TinkerHooks,
        Role::Assassin => &AssassinHooks,

        role if role.is_traveler() => &TravelerNotice,
        _ => &NoHooks,
    }
}

//! Vote-phase hooks: forced ballots, weight rewrites, secret ballots

use async_trait::async_trait;

use crate::domain::characters::hooks::ExpireChoice;
use crate::domain::characters::{
    CharPath, DayEndCapability, NomsCalledCapability, PhaseCx, RoleHookSet,
    SeatingOrderCapability, VoteBeginningCapability, VoteCapability,
};
use crate::domain::entities::{Ballot, Game, Vote, VoteWeight};
use crate::domain::events::GameEventKind;
use crate::domain::value_objects::PlayerId;

use super::TravelerNotice;

/// Butler: may only vote yes if his chosen master has already raised a
/// hand in the same vote.
pub struct ButlerHooks;

#[async_trait]
impl VoteCapability for ButlerHooks {
    fn on_voter_called(
        &self,
        game: &Game,
        path: &CharPath,
        vote: &Vote,
        voter: PlayerId,
    ) -> Option<Ballot> {
        let me = game.owner_of(path)?;
        if voter != me {
            return None;
        }
        let master = game.character_at(path)?.state.chosen?;
        if vote.yes_cast_by(master) {
            None
        } else {
            Some(Ballot::No)
        }
    }
}

impl RoleHookSet for ButlerHooks {
    fn vote(&self) -> Option<&dyn VoteCapability> {
        Some(self)
    }

    fn day_end(&self) -> Option<&dyn DayEndCapability> {
        Some(&ExpireChoice)
    }
}

/// Zealot: must vote for every nomination while five or more live.
pub struct ZealotHooks;

#[async_trait]
impl VoteCapability for ZealotHooks {
    fn on_voter_called(
        &self,
        game: &Game,
        path: &CharPath,
        _vote: &Vote,
        voter: PlayerId,
    ) -> Option<Ballot> {
        let me = game.owner_of(path)?;
        if voter == me && game.living_count() >= 5 {
            Some(Ballot::Yes)
        } else {
            None
        }
    }
}

impl RoleHookSet for ZealotHooks {
    fn vote(&self) -> Option<&dyn VoteCapability> {
        Some(self)
    }
}

/// Organ Grinder: ballots are collected eyes closed. Tallies stay hidden
/// and the storytellers quietly decide whether the vote carries.
pub struct OrganGrinderHooks;

impl NomsCalledCapability for OrganGrinderHooks {
    fn on_noms_called(&self, game: &mut Game, _path: &CharPath) {
        if let Some(day) = game.current_day_mut() {
            day.secret_ballots = true;
        }
        game.record(GameEventKind::SecretBallotsCalled);
    }
}

#[async_trait]
impl VoteCapability for OrganGrinderHooks {
    fn on_ballot_cast(
        &self,
        game: &mut Game,
        _path: &CharPath,
        vote: &Vote,
        voter: PlayerId,
        _ballot: Ballot,
    ) {
        if vote.secret {
            game.record(GameEventKind::BallotConcealed { voter });
        }
    }

    async fn on_conclusion(
        &self,
        cx: &mut PhaseCx<'_>,
        _path: &CharPath,
        vote: &Vote,
        dies: bool,
        tie: bool,
    ) -> (bool, bool) {
        if !vote.secret {
            return (dies, tie);
        }
        match cx
            .input
            .ask_yes_no(cx.origin, "The ballots were secret. Does the vote carry?")
            .await
        {
            Some(true) => (true, false),
            Some(false) => (false, false),
            // No ruling in time: keep the counted outcome.
            None => (dies, tie),
        }
    }
}

impl RoleHookSet for OrganGrinderHooks {
    fn noms_called(&self) -> Option<&dyn NomsCalledCapability> {
        Some(self)
    }

    fn vote(&self) -> Option<&dyn VoteCapability> {
        Some(self)
    }
}

/// Bureaucrat: the chosen player's ballots count three times each.
pub struct BureaucratHooks;

impl VoteBeginningCapability for BureaucratHooks {
    fn adjust(
        &self,
        game: &Game,
        path: &CharPath,
        order: &mut Vec<PlayerId>,
        weights: &mut Vec<VoteWeight>,
        _majority: &mut u32,
    ) {
        let Some(target) = game.character_at(path).and_then(|node| node.state.chosen) else {
            return;
        };
        for (index, voter) in order.iter().enumerate() {
            if *voter == target {
                weights[index].yes *= 3;
                weights[index].no *= 3;
            }
        }
    }
}

impl RoleHookSet for BureaucratHooks {
    fn seating_order(&self) -> Option<&dyn SeatingOrderCapability> {
        Some(&TravelerNotice)
    }

    fn vote_beginning(&self) -> Option<&dyn VoteBeginningCapability> {
        Some(self)
    }

    fn day_end(&self) -> Option<&dyn DayEndCapability> {
        Some(&ExpireChoice)
    }
}

/// Thief: the chosen player's ballots count negatively.
pub struct ThiefHooks;

impl VoteBeginningCapability for ThiefHooks {
    fn adjust(
        &self,
        game: &Game,
        path: &CharPath,
        order: &mut Vec<PlayerId>,
        weights: &mut Vec<VoteWeight>,
        _majority: &mut u32,
    ) {
        let Some(target) = game.character_at(path).and_then(|node| node.state.chosen) else {
            return;
        };
        for (index, voter) in order.iter().enumerate() {
            if *voter == target {
                weights[index].yes = -weights[index].yes;
                weights[index].no = -weights[index].no;
            }
        }
    }
}

impl RoleHookSet for ThiefHooks {
    fn seating_order(&self) -> Option<&dyn SeatingOrderCapability> {
        Some(&TravelerNotice)
    }

    fn vote_beginning(&self) -> Option<&dyn VoteBeginningCapability> {
        Some(self)
    }

    fn day_end(&self) -> Option<&dyn DayEndCapability> {
        Some(&ExpireChoice)
    }
}

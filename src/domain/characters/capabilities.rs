//! Capability interfaces a role may implement for each rule phase
//!
//! The engine never knows concrete role behavior; it asks a role's
//! [`RoleHookSet`] for the capability matching the current phase and skips
//! roles that return `None`. Every hook reports its result in the same shape
//! it would report success: a declined interactive prompt yields the hook's
//! neutral answer, never an error, so one character can never abort a phase
//! dispatch for the characters after it.

use async_trait::async_trait;

use crate::application::ports::outbound::{ActorInputPort, ActorRef, AnnouncementPort};
use crate::domain::entities::{Ballot, Game, SeatView, Vote, VoteWeight};
use crate::domain::value_objects::PlayerId;

use super::{CharPath, Character};

/// Shared context threaded through interactive phase hooks.
///
/// The game state is borrowed for exactly the duration of one hook call;
/// characters never keep a copy of it.
pub struct PhaseCx<'a> {
    pub game: &'a mut Game,
    pub input: &'a dyn ActorInputPort,
    pub announcer: &'a dyn AnnouncementPort,
    /// Whoever interactive decisions should be addressed to, usually the
    /// storytellers.
    pub origin: ActorRef,
}

/// Ordering band for death-resolution hooks. Lower bands run earlier, so a
/// forced kill always gets the last word over protections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum DeathPriority {
    ProtectOthers,
    ProtectSelf,
    KillSelf,
    Default,
    ForcedKill,
}

/// May rewrite the seating display and append annotation text.
pub trait SeatingOrderCapability: Send + Sync {
    fn adjust(&self, game: &Game, path: &CharPath, view: &mut Vec<SeatView>);
}

/// Runs at dawn over the mutable kill list. Returning `false` vetoes
/// further dawn processing (the kill publication is held back) without
/// undoing side effects already applied.
#[async_trait]
pub trait DayStartCapability: Send + Sync {
    async fn on_dawn(
        &self,
        cx: &mut PhaseCx<'_>,
        path: &CharPath,
        kills: &mut Vec<PlayerId>,
    ) -> bool;
}

/// Fires exactly once per day, the first time nominations open.
pub trait NomsCalledCapability: Send + Sync {
    fn on_noms_called(&self, game: &mut Game, path: &CharPath);
}

/// Boolean proceed hook for a nomination. Deaths demanded by the hook are
/// pushed onto `deaths` and resolved by the engine after dispatch, whether
/// or not the nomination goes on to a vote.
#[async_trait]
pub trait NominationCapability: Send + Sync {
    async fn on_nomination(
        &self,
        cx: &mut PhaseCx<'_>,
        path: &CharPath,
        nominator: Option<PlayerId>,
        nominee: Option<PlayerId>,
        deaths: &mut Vec<PlayerId>,
    ) -> bool;
}

/// Runs at dusk.
pub trait DayEndCapability: Send + Sync {
    fn on_dusk(&self, game: &mut Game, path: &CharPath);
}

/// Given the voter order, the per-voter weight table and the majority
/// threshold, rewrites any of the three in place before the first poll.
pub trait VoteBeginningCapability: Send + Sync {
    fn adjust(
        &self,
        game: &Game,
        path: &CharPath,
        order: &mut Vec<PlayerId>,
        weights: &mut Vec<VoteWeight>,
        majority: &mut u32,
    );
}

/// Per-ballot hooks during an open vote.
#[async_trait]
pub trait VoteCapability: Send + Sync {
    /// Called each time a voter is about to be polled. Returning a ballot
    /// forces it without prompting the voter.
    fn on_voter_called(
        &self,
        _game: &Game,
        _path: &CharPath,
        _vote: &Vote,
        _voter: PlayerId,
    ) -> Option<Ballot> {
        None
    }

    /// Called after any voter's ballot has been recorded.
    fn on_ballot_cast(
        &self,
        _game: &mut Game,
        _path: &CharPath,
        _vote: &Vote,
        _voter: PlayerId,
        _ballot: Ballot,
    ) {
    }

    /// Called at vote conclusion with the tentative outcome; returns the
    /// possibly-overridden `(dies, tie)` pair.
    async fn on_conclusion(
        &self,
        _cx: &mut PhaseCx<'_>,
        _path: &CharPath,
        _vote: &Vote,
        dies: bool,
        tie: bool,
    ) -> (bool, bool) {
        (dies, tie)
    }
}

/// Given a death target and the tentative verdict, returns the possibly
/// overridden verdict. Only living players' holders are consulted, in
/// ascending [`DeathPriority`] order.
#[async_trait]
pub trait DeathCapability: Send + Sync {
    fn priority(&self) -> DeathPriority {
        DeathPriority::Default
    }

    async fn on_death(
        &self,
        cx: &mut PhaseCx<'_>,
        path: &CharPath,
        target: PlayerId,
        dies: bool,
    ) -> bool;
}

/// The set of capabilities one role implements. Accessors return `None`
/// for phases the role does not participate in; the dispatcher skips those.
pub trait RoleHookSet: Send + Sync {
    fn seating_order(&self) -> Option<&dyn SeatingOrderCapability> {
        None
    }
    fn day_start(&self) -> Option<&dyn DayStartCapability> {
        None
    }
    fn noms_called(&self) -> Option<&dyn NomsCalledCapability> {
        None
    }
    fn nomination(&self) -> Option<&dyn NominationCapability> {
        None
    }
    fn day_end(&self) -> Option<&dyn DayEndCapability> {
        None
    }
    fn vote_beginning(&self) -> Option<&dyn VoteBeginningCapability> {
        None
    }
    fn vote(&self) -> Option<&dyn VoteCapability> {
        None
    }
    fn death(&self) -> Option<&dyn DeathCapability> {
        None
    }

    /// Whether the character currently grants an extra ballot per
    /// nomination (queried at vote construction).
    fn double_vote_active(&self, _character: &Character) -> bool {
        false
    }
}

/// The hook set shared by every role without rule-phase behavior.
pub struct NoHooks;

impl RoleHookSet for NoHooks {}

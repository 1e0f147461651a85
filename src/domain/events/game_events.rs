//! Game events - the append-only record of significant rule outcomes
//!
//! Every service appends to the game's event log as it resolves rule
//! phases. The log is part of the persisted game graph, which makes saved
//! matches auditable after restore.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::characters::Role;
use crate::domain::entities::{Ballot, VoteOutcome};
use crate::domain::value_objects::{EventId, PlayerId};

/// Base data carried by every event.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventMetadata {
    pub id: EventId,
    /// When the event occurred
    pub timestamp: DateTime<Utc>,
}

impl Default for EventMetadata {
    fn default() -> Self {
        Self {
            id: EventId::new(),
            timestamp: Utc::now(),
        }
    }
}

/// One recorded rule outcome.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameEvent {
    pub metadata: EventMetadata,
    pub kind: GameEventKind,
}

impl GameEvent {
    pub fn new(kind: GameEventKind) -> Self {
        Self {
            metadata: EventMetadata::default(),
            kind,
        }
    }
}

/// All rule outcomes the engine records.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEventKind {
    GameCreated {
        script: String,
    },

    // Day cycle
    DayStarted {
        day: usize,
    },
    /// Dawn processing was vetoed by a character hook; the overnight kill
    /// publication is held back.
    DawnDeferred {
        day: usize,
    },
    NightFell {
        day: usize,
    },
    WhispersOpened,
    WhispersClosed,
    NominationsOpened,
    NominationsClosed,
    /// Ballots are recorded face down for the rest of the day.
    SecretBallotsCalled,

    // Nominations and votes
    Nominated {
        nominator: Option<PlayerId>,
        nominee: Option<PlayerId>,
    },
    NominationVoided {
        nominator: Option<PlayerId>,
        nominee: Option<PlayerId>,
    },
    BallotCast {
        voter: PlayerId,
        ballot: Ballot,
        total: i32,
    },
    BallotConcealed {
        voter: PlayerId,
    },
    VoteConcluded {
        nominee: Option<PlayerId>,
        outcome: VoteOutcome,
        votes: i32,
    },

    // Deaths
    PlayerDied {
        player: PlayerId,
    },
    DeathAverted {
        player: PlayerId,
    },
    ExecutionHeld {
        player: PlayerId,
    },
    NoExecution,

    // Travelers
    TravelerJoined {
        player: PlayerId,
        role: Role,
    },
    TravelerLeft {
        player: PlayerId,
    },
    Exiled {
        player: PlayerId,
    },

    // Storyteller bookkeeping
    RoleChanged {
        player: PlayerId,
        role: Role,
    },
    PoisonChanged {
        player: PlayerId,
        poisoned: bool,
    },
    AbilityGranted {
        player: PlayerId,
        role: Role,
    },
    AbilityRevoked {
        player: PlayerId,
        role: Role,
    },
}

//! Domain entities - Core rule-engine objects with identity

mod day;
mod game;
mod player;
mod vote;

pub use day::{AboutToDie, Day, VoteOutcome};
pub use game::{Game, SeatView};
pub use player::Player;
pub use vote::{Ballot, Vote, VoteClosed, VoteKind, VoteWeight};

//! Vote entity - one nomination's ballot
//!
//! A vote is a cursor over a fixed voter order. The order, the per-voter
//! weight table and the majority threshold are all frozen before the first
//! poll (after the vote-beginning hooks have had their say); from then on
//! the cursor only moves forward, one recorded ballot at a time, until the
//! vote concludes.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::domain::value_objects::PlayerId;

use super::Game;

/// A single raw yes/no choice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Ballot {
    Yes,
    No,
}

/// Execution votes follow the full nomination protocol; exile votes are the
/// simplified traveler variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum VoteKind {
    Execution,
    Exile,
}

/// Weighted value of one order entry's ballot, as `(no, yes)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoteWeight {
    pub no: i32,
    pub yes: i32,
}

impl Default for VoteWeight {
    fn default() -> Self {
        Self { no: 0, yes: 1 }
    }
}

/// Attempted state advance on a concluded vote.
#[derive(Debug, thiserror::Error)]
#[error("the vote has already concluded")]
pub struct VoteClosed;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Vote {
    pub kind: VoteKind,
    /// `None` means the nomination targets the storytellers.
    pub nominee: Option<PlayerId>,
    pub nominator: Option<PlayerId>,
    /// The polling order. A voter with an active double-vote ability is
    /// listed twice, consecutively, at their seating position.
    pub order: Vec<PlayerId>,
    /// Weight table parallel to `order`.
    pub weights: Vec<VoteWeight>,
    /// Cursor into `order`; strictly monotonic.
    pub position: usize,
    /// Weighted running total.
    pub votes: i32,
    /// Raw choices in polling order.
    pub history: Vec<Ballot>,
    /// Pre-committed choices, applied when the voter's turn comes.
    pub presets: HashMap<PlayerId, Ballot>,
    /// Threshold frozen at creation; never recomputed, even if ghost
    /// status changes mid-vote.
    pub majority: u32,
    /// Ballots are recorded without being revealed.
    pub secret: bool,
    pub done: bool,
}

impl Vote {
    /// Build the voter order for a nomination.
    ///
    /// For an execution nomination of a seated player, polling starts at the
    /// seat immediately after the nominee and wraps so the nominee votes
    /// last. Nominating the storytellers (or calling an exile) polls the
    /// full seating order.
    pub fn build(
        game: &Game,
        kind: VoteKind,
        nominator: Option<PlayerId>,
        nominee: Option<PlayerId>,
    ) -> Self {
        let seats = game.seating.len();
        let base: Vec<usize> = match (kind, nominee.and_then(|id| game.seat_of(id))) {
            (VoteKind::Execution, Some(nominee_seat)) => (1..=seats)
                .map(|offset| (nominee_seat + offset) % seats)
                .collect(),
            _ => (0..seats).collect(),
        };

        let mut order = Vec::with_capacity(seats);
        for seat in base {
            let player = &game.seating[seat];
            order.push(player.id);
            // Double-vote holders are polled twice in a row.
            if kind == VoteKind::Execution && player.character.votes_twice() {
                order.push(player.id);
            }
        }

        let weights = vec![VoteWeight::default(); order.len()];
        let majority = match kind {
            VoteKind::Execution => {
                let eligible = order
                    .iter()
                    .filter(|id| game.player(**id).map(|p| !p.is_ghost).unwrap_or(false))
                    .count() as u32;
                eligible.div_ceil(2)
            }
            // Exiles take a simple majority of the whole order.
            VoteKind::Exile => (order.len() as u32).div_ceil(2),
        };

        Self {
            kind,
            nominee,
            nominator,
            order,
            weights,
            position: 0,
            votes: 0,
            history: Vec::new(),
            presets: HashMap::new(),
            majority,
            secret: game
                .current_day()
                .map(|day| day.secret_ballots)
                .unwrap_or(false),
            done: false,
        }
    }

    /// The voter whose turn it is, if the vote is still collecting.
    pub fn current_voter(&self) -> Option<PlayerId> {
        if self.done {
            return None;
        }
        self.order.get(self.position).copied()
    }

    /// Record the current voter's ballot and advance the cursor. Returns
    /// `true` when the last voter has been polled.
    pub fn record(&mut self, ballot: Ballot) -> Result<bool, VoteClosed> {
        if self.done || self.position >= self.order.len() {
            return Err(VoteClosed);
        }
        let weight = &self.weights[self.position];
        self.votes += match ballot {
            Ballot::Yes => weight.yes,
            Ballot::No => weight.no,
        };
        self.history.push(ballot);
        self.position += 1;
        Ok(self.position == self.order.len())
    }

    /// Whether `player` has already cast a yes earlier in this vote.
    pub fn yes_cast_by(&self, player: PlayerId) -> bool {
        self.order
            .iter()
            .zip(self.history.iter())
            .any(|(voter, ballot)| *voter == player && *ballot == Ballot::Yes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::characters::{Character, Role};
    use crate::domain::entities::Player;
    use crate::domain::value_objects::{Alignment, Script};

    fn town(names: &[&str]) -> Game {
        let mut game = Game::new(Script::trouble_brewing());
        for name in names {
            game.seat(Player::new(
                *name,
                Character::new(Role::Chef),
                Alignment::Good,
            ));
        }
        game
    }

    #[test]
    fn test_order_starts_after_nominee_and_wraps() {
        let game = town(&["a", "b", "c", "d", "e"]);
        let nominee = game.seating[2].id;
        let vote = Vote::build(&game, VoteKind::Execution, Some(game.seating[0].id), Some(nominee));

        let expected: Vec<PlayerId> = [3usize, 4, 0, 1, 2]
            .iter()
            .map(|seat| game.seating[*seat].id)
            .collect();
        assert_eq!(vote.order, expected);
        assert_eq!(*vote.order.last().unwrap(), nominee);
    }

    #[test]
    fn test_storyteller_nomination_polls_full_order() {
        let game = town(&["a", "b", "c", "d"]);
        let vote = Vote::build(&game, VoteKind::Execution, Some(game.seating[0].id), None);
        assert_eq!(vote.order.len(), 4);
        assert_eq!(vote.order[0], game.seating[0].id);
    }

    #[test]
    fn test_majority_is_ceil_half_of_living_voters() {
        let mut game = town(&["a", "b", "c", "d", "e"]);
        let nominee = game.seating[0].id;
        let vote = Vote::build(&game, VoteKind::Execution, None, Some(nominee));
        assert_eq!(vote.majority, 3);

        // Two ghosts: 3 living voters left, majority rounds up to 2.
        game.seating[3].make_ghost();
        game.seating[4].make_ghost();
        let vote = Vote::build(&game, VoteKind::Execution, None, Some(nominee));
        assert_eq!(vote.majority, 2);
    }

    #[test]
    fn test_majority_is_frozen_against_mid_vote_ghosting() {
        let mut game = town(&["a", "b", "c", "d", "e"]);
        let mut vote = Vote::build(&game, VoteKind::Execution, None, Some(game.seating[0].id));
        assert_eq!(vote.majority, 3);

        game.seating[1].make_ghost();
        vote.record(Ballot::Yes).unwrap();
        assert_eq!(vote.majority, 3);
    }

    #[test]
    fn test_double_voter_listed_twice_consecutively() {
        let mut game = town(&["a", "b", "c", "d"]);
        game.seating[1].character = Character::new(Role::Banshee);
        game.seating[1].character.state.triggered = true;
        let banshee = game.seating[1].id;

        let vote = Vote::build(&game, VoteKind::Execution, None, Some(game.seating[3].id));
        let twice: Vec<usize> = vote
            .order
            .iter()
            .enumerate()
            .filter(|(_, id)| **id == banshee)
            .map(|(i, _)| i)
            .collect();
        assert_eq!(twice.len(), 2);
        assert_eq!(twice[1], twice[0] + 1);
    }

    #[test]
    fn test_position_is_monotonic_and_closes_at_order_end() {
        let game = town(&["a", "b", "c"]);
        let mut vote = Vote::build(&game, VoteKind::Execution, None, Some(game.seating[0].id));

        assert!(!vote.record(Ballot::Yes).unwrap());
        assert!(!vote.record(Ballot::No).unwrap());
        assert!(vote.record(Ballot::Yes).unwrap());
        assert_eq!(vote.position, vote.order.len());

        vote.done = true;
        assert!(vote.record(Ballot::No).is_err());
        // The failed advance must not have corrupted anything.
        assert_eq!(vote.position, vote.order.len());
        assert_eq!(vote.history.len(), 3);
    }

    #[test]
    fn test_exile_majority_counts_the_full_order() {
        let mut game = town(&["a", "b", "c", "d", "e"]);
        game.seating[0].make_ghost();
        game.seating[1].make_ghost();
        let vote = Vote::build(&game, VoteKind::Exile, None, Some(game.seating[2].id));
        assert_eq!(vote.order.len(), 5);
        assert_eq!(vote.majority, 3);
    }
}

//! Day entity - one in-game day's phase flags and votes

use serde::{Deserialize, Serialize};

use crate::domain::value_objects::PlayerId;

use super::Vote;

/// The nominee currently leading the day's executions. Later nominations
/// are judged against this carryover.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AboutToDie {
    /// `None` when the storytellers themselves are the leading nominee.
    pub nominee: Option<PlayerId>,
    pub votes: i32,
    /// Index into [`Day::votes`] of the vote that set this leader.
    pub vote_index: usize,
}

/// Final verdict of a concluded vote.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum VoteOutcome {
    /// Below the threshold, or overtaken by the standing leader.
    Failed,
    /// Matched the standing leader exactly; nobody newly about to die.
    Tied,
    /// Became the day's leading execution candidate.
    Passed,
}

/// One in-game day.
///
/// Created at dawn and replaced only by advancing to the next day. At most
/// one of its votes is open at a time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Day {
    pub votes: Vec<Vote>,
    /// Whether private messaging is currently open.
    pub is_pms: bool,
    /// Whether nominations are currently open.
    pub is_noms: bool,
    /// Latch: the noms-called phase has fired for this day.
    pub noms_called: bool,
    /// Ballots this day are recorded without being revealed.
    pub secret_ballots: bool,
    /// Latch for the first-tie rule: the first tie of the day clears the
    /// standing leader, later ties leave the leader in place.
    pub tie_broken: bool,
    pub about_to_die: Option<AboutToDie>,
    pub ended: bool,
}

impl Day {
    pub fn new() -> Self {
        Self {
            votes: Vec::new(),
            is_pms: true,
            is_noms: false,
            noms_called: false,
            secret_ballots: false,
            tie_broken: false,
            about_to_die: None,
            ended: false,
        }
    }

    /// The vote currently collecting ballots, if any.
    pub fn open_vote(&self) -> Option<&Vote> {
        self.votes.last().filter(|vote| !vote.done)
    }

    pub fn has_open_vote(&self) -> bool {
        self.open_vote().is_some()
    }

    /// Judge a concluded tally against the frozen threshold and the
    /// standing leader. Pure; the verdict may still be overridden by vote
    /// hooks before [`Day::settle`] applies it.
    pub fn tentative_outcome(&self, votes: i32, majority: u32) -> (bool, bool) {
        if votes < majority as i32 {
            return (false, false);
        }
        match &self.about_to_die {
            None => (true, false),
            Some(leader) if votes > leader.votes => (true, false),
            Some(leader) if votes == leader.votes => (false, true),
            // At or above the threshold but short of the carryover.
            Some(_) => (false, false),
        }
    }

    /// Apply a final verdict to the about-to-die carryover.
    pub fn settle(
        &mut self,
        vote_index: usize,
        nominee: Option<PlayerId>,
        votes: i32,
        dies: bool,
        tie: bool,
    ) -> VoteOutcome {
        if dies {
            self.about_to_die = Some(AboutToDie {
                nominee,
                votes,
                vote_index,
            });
            return VoteOutcome::Passed;
        }
        if tie {
            if !self.tie_broken {
                self.about_to_die = None;
                self.tie_broken = true;
            }
            return VoteOutcome::Tied;
        }
        VoteOutcome::Failed
    }
}

impl Default for Day {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fresh_day_passes_at_majority_and_fails_below() {
        // 5 living players, majority 3, no prior leader.
        let day = Day::new();
        assert_eq!(day.tentative_outcome(3, 3), (true, false));
        assert_eq!(day.tentative_outcome(2, 3), (false, false));
    }

    #[test]
    fn test_carryover_comparison() {
        // Prior leader on 3 votes, later vote's majority is 2.
        let mut day = Day::new();
        day.settle(0, None, 3, true, false);

        // Equal to the leader: tie.
        assert_eq!(day.tentative_outcome(3, 2), (false, true));
        // Above the leader: passes and takes over.
        assert_eq!(day.tentative_outcome(4, 2), (true, false));
        // Meets the majority but short of the carryover: fails.
        assert_eq!(day.tentative_outcome(2, 2), (false, false));
    }

    #[test]
    fn test_first_tie_clears_the_leader() {
        let mut day = Day::new();
        day.settle(0, None, 3, true, false);
        assert!(day.about_to_die.is_some());

        assert_eq!(day.settle(1, None, 3, false, true), VoteOutcome::Tied);
        assert!(day.about_to_die.is_none());
        assert!(day.tie_broken);
    }

    #[test]
    fn test_later_ties_leave_the_leader_standing() {
        let mut day = Day::new();
        day.settle(0, None, 3, false, true);
        assert!(day.tie_broken);

        // A new leader emerges, then another tie: the leader stands.
        day.settle(1, None, 4, true, false);
        assert_eq!(day.settle(2, None, 4, false, true), VoteOutcome::Tied);
        assert_eq!(day.about_to_die.as_ref().unwrap().votes, 4);
    }
}

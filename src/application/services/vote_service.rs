//! Vote service - drives one open vote from first poll to settlement
//!
//! The service pops the open vote off the day while polling so character
//! hooks can freely mutate the rest of the game, then pushes it back
//! concluded. Polling each voter resolves a ballot from, in order: the
//! ghost-without-a-token rule, any forced ballot from a vote hook, the
//! voter's preset, and finally a live prompt (no answer counts as no).

use std::sync::Arc;

use crate::application::ports::outbound::{ActorInputPort, ActorRef, AnnouncementPort, Audience};
use crate::domain::characters::{
    hooks, CharPath, PhaseCx, VoteBeginningCapability, VoteCapability,
};
use crate::domain::entities::{Ballot, Game, Vote, VoteKind, VoteOutcome, VoteWeight};
use crate::domain::events::GameEventKind;
use crate::domain::value_objects::PlayerId;

/// Errors raised while driving a vote.
#[derive(Debug, thiserror::Error)]
pub enum VoteError {
    #[error("no vote is currently open")]
    NoOpenVote,

    #[error("{0} is not in this vote's order")]
    NotAVoter(String),
}

/// Build a vote for a nomination, run the vote-beginning hooks over its
/// order, weights and majority, and attach it to the current day.
pub(crate) fn start_vote(
    game: &mut Game,
    kind: VoteKind,
    nominator: Option<PlayerId>,
    nominee: Option<PlayerId>,
) {
    let mut vote = Vote::build(game, kind, nominator, nominee);

    let listeners: Vec<(CharPath, &'static dyn VoteBeginningCapability)> = game
        .hook_holders(false, |hooks| hooks.vote_beginning().is_some())
        .into_iter()
        .filter_map(|path| {
            let role = game.character_at(&path)?.role;
            hooks::for_role(role).vote_beginning().map(|cap| (path, cap))
        })
        .collect();

    let mut order = std::mem::take(&mut vote.order);
    let mut weights = std::mem::take(&mut vote.weights);
    let mut majority = vote.majority;
    for (path, cap) in &listeners {
        cap.adjust(game, path, &mut order, &mut weights, &mut majority);
    }
    // Hooks that rewrite the order are responsible for the weight table;
    // pad or truncate if one left them out of step.
    weights.resize(order.len(), VoteWeight::default());

    vote.order = order;
    vote.weights = weights;
    vote.majority = majority;

    if let Some(day) = game.current_day_mut() {
        day.votes.push(vote);
    }
}

/// Service polling voters and settling the outcome of an open vote.
pub struct VoteService {
    input: Arc<dyn ActorInputPort>,
    announcer: Arc<dyn AnnouncementPort>,
}

impl VoteService {
    pub fn new(input: Arc<dyn ActorInputPort>, announcer: Arc<dyn AnnouncementPort>) -> Self {
        Self { input, announcer }
    }

    /// Poll every remaining voter in order and settle the outcome.
    pub async fn run(&self, game: &mut Game) -> Result<VoteOutcome, VoteError> {
        let mut vote = Self::take_open(game)?;
        tracing::info!(
            kind = ?vote.kind,
            voters = vote.order.len(),
            majority = vote.majority,
            "collecting ballots"
        );

        while let Some(voter) = vote.current_voter() {
            let ballot = self.ballot_for(game, &vote, voter).await;

            // A yes from a ghost spends their dead-vote token.
            if vote.kind == VoteKind::Execution && ballot == Ballot::Yes {
                if let Some(player) = game.player_mut(voter) {
                    if player.is_ghost {
                        player.dead_votes = player.dead_votes.saturating_sub(1);
                    }
                }
            }

            let complete = match vote.record(ballot) {
                Ok(complete) => complete,
                // Unreachable while the loop guard holds.
                Err(_) => break,
            };

            for (path, cap) in Self::vote_listeners(game) {
                cap.on_ballot_cast(game, &path, &vote, voter, ballot);
            }
            if !vote.secret {
                game.record(GameEventKind::BallotCast {
                    voter,
                    ballot,
                    total: vote.votes,
                });
                if let Some(player) = game.player(voter) {
                    let text = match ballot {
                        Ballot::Yes => format!("{} raises a hand. {} so far.", player.name, vote.votes),
                        Ballot::No => format!("{} keeps their hand down.", player.name),
                    };
                    if let Err(error) = self.announcer.announce(Audience::Town, &text).await {
                        tracing::warn!(%error, "ballot announcement failed");
                    }
                }
            }

            if complete {
                break;
            }
        }

        self.conclude(game, vote).await
    }

    /// Pre-commit a ballot for a voter whose turn has not yet come.
    pub fn preset(
        &self,
        game: &mut Game,
        voter: PlayerId,
        ballot: Ballot,
    ) -> Result<(), VoteError> {
        let vote = Self::open_mut(game)?;
        if !vote.order.contains(&voter) {
            return Err(VoteError::NotAVoter(format!("{}", voter)));
        }
        vote.presets.insert(voter, ballot);
        Ok(())
    }

    pub fn clear_preset(&self, game: &mut Game, voter: PlayerId) -> Result<(), VoteError> {
        let vote = Self::open_mut(game)?;
        vote.presets.remove(&voter);
        Ok(())
    }

    fn open_mut(game: &mut Game) -> Result<&mut Vote, VoteError> {
        game.current_day_mut()
            .filter(|day| !day.ended)
            .and_then(|day| day.votes.last_mut())
            .filter(|vote| !vote.done)
            .ok_or(VoteError::NoOpenVote)
    }

    fn take_open(game: &mut Game) -> Result<Vote, VoteError> {
        let day = game
            .current_day_mut()
            .filter(|day| !day.ended)
            .ok_or(VoteError::NoOpenVote)?;
        match day.votes.pop() {
            Some(vote) if !vote.done => Ok(vote),
            Some(vote) => {
                day.votes.push(vote);
                Err(VoteError::NoOpenVote)
            }
            None => Err(VoteError::NoOpenVote),
        }
    }

    fn vote_listeners(game: &Game) -> Vec<(CharPath, &'static dyn VoteCapability)> {
        game.hook_holders(false, |hooks| hooks.vote().is_some())
            .into_iter()
            .filter_map(|path| {
                let role = game.character_at(&path)?.role;
                hooks::for_role(role).vote().map(|cap| (path, cap))
            })
            .collect()
    }

    async fn ballot_for(&self, game: &Game, vote: &Vote, voter: PlayerId) -> Ballot {
        // Ghosts without a dead-vote token are not polled at all, in
        // exiles too; only the spending of a token is execution-specific.
        if let Some(player) = game.player(voter) {
            if player.is_ghost && player.dead_votes == 0 {
                return Ballot::No;
            }
        }

        for (path, cap) in Self::vote_listeners(game) {
            if let Some(forced) = cap.on_voter_called(game, &path, vote, voter) {
                tracing::debug!("ballot for {} forced by a character ability", voter);
                return forced;
            }
        }

        if let Some(preset) = vote.presets.get(&voter) {
            return *preset;
        }

        let target = vote
            .nominee
            .and_then(|id| game.player(id))
            .map(|p| p.name.clone())
            .unwrap_or_else(|| "the storytellers".to_string());
        let verb = match vote.kind {
            VoteKind::Execution => "execute",
            VoteKind::Exile => "exile",
        };
        let prompt = format!("Do you vote to {} {}?", verb, target);
        match self
            .input
            .ask_yes_no(ActorRef::Player(voter), &prompt)
            .await
        {
            Some(true) => Ballot::Yes,
            // Declining or timing out keeps the hand down.
            _ => Ballot::No,
        }
    }

    async fn conclude(&self, game: &mut Game, mut vote: Vote) -> Result<VoteOutcome, VoteError> {
        vote.done = true;

        let (mut dies, mut tie) = match vote.kind {
            VoteKind::Execution => game
                .current_day()
                .map(|day| day.tentative_outcome(vote.votes, vote.majority))
                .unwrap_or((false, false)),
            VoteKind::Exile => (vote.votes >= vote.majority as i32, false),
        };

        if vote.kind == VoteKind::Execution {
            let listeners = Self::vote_listeners(game);
            let mut cx = PhaseCx {
                game: &mut *game,
                input: &*self.input,
                announcer: &*self.announcer,
                origin: ActorRef::Storytellers,
            };
            for (path, cap) in &listeners {
                (dies, tie) = cap.on_conclusion(&mut cx, path, &vote, dies, tie).await;
            }
        }

        let nominee = vote.nominee;
        let votes = vote.votes;
        let kind = vote.kind;
        let day = game.current_day_mut().ok_or(VoteError::NoOpenVote)?;
        let vote_index = day.votes.len();
        day.votes.push(vote);

        let outcome = match kind {
            VoteKind::Execution => day.settle(vote_index, nominee, votes, dies, tie),
            VoteKind::Exile => {
                if dies {
                    VoteOutcome::Passed
                } else {
                    VoteOutcome::Failed
                }
            }
        };
        game.record(GameEventKind::VoteConcluded {
            nominee,
            outcome,
            votes,
        });
        tracing::info!(?outcome, votes, "vote concluded");

        let nominee_name = nominee
            .and_then(|id| game.player(id))
            .map(|p| p.name.clone())
            .unwrap_or_else(|| "the storytellers".to_string());

        // A passed exile resolves immediately and cannot be prevented.
        if kind == VoteKind::Exile && outcome == VoteOutcome::Passed {
            if let Some(id) = nominee {
                if let Some(player) = game.player_mut(id) {
                    player.make_ghost();
                }
                game.record(GameEventKind::Exiled { player: id });
            }
        }

        let text = match (kind, outcome) {
            (VoteKind::Execution, VoteOutcome::Passed) => {
                format!("{} votes. {} is about to die.", votes, nominee_name)
            }
            (VoteKind::Execution, VoteOutcome::Tied) => {
                format!("{} votes. The count is tied.", votes)
            }
            (VoteKind::Execution, VoteOutcome::Failed) => {
                format!("{} votes. The nomination fails.", votes)
            }
            (VoteKind::Exile, VoteOutcome::Passed) => {
                format!("{} votes. {} is exiled.", votes, nominee_name)
            }
            (VoteKind::Exile, _) => format!("{} votes. The exile fails.", votes),
        };
        if let Err(error) = self.announcer.announce(Audience::Town, &text).await {
            tracing::warn!(%error, "conclusion announcement failed");
        }

        Ok(outcome)
    }
}

//! Nomination service - validates a nomination and opens its vote
//!
//! A nomination burns both parties' once-per-day allowance the moment it is
//! validated, before any character hook runs: a voided nomination is still
//! a spent nomination. Character proceed hooks then decide whether the
//! nomination goes on to a vote, and any deaths they demand are resolved
//! through normal death resolution either way.

use std::sync::Arc;

use crate::application::ports::outbound::{ActorInputPort, ActorRef, AnnouncementPort, Audience};
use crate::application::services::death_service::{DeathError, DeathService};
use crate::application::services::vote_service::start_vote;
use crate::domain::characters::{hooks, CharPath, NominationCapability, PhaseCx};
use crate::domain::entities::{Game, VoteKind};
use crate::domain::events::GameEventKind;
use crate::domain::value_objects::PlayerId;

/// Errors raised while validating a nomination.
#[derive(Debug, thiserror::Error)]
pub enum NominationError {
    #[error("it is not daytime")]
    NotDaytime,

    #[error("nominations are not open")]
    NominationsClosed,

    #[error("a vote is already in progress")]
    VoteInProgress,

    #[error("Player not found")]
    UnknownPlayer,

    #[error("{0} cannot nominate")]
    CannotNominate(String),

    #[error("{0} has already nominated today")]
    AlreadyNominated(String),

    #[error("{0} cannot be nominated")]
    CannotBeNominated(String),

    #[error("{0} has already been nominated today")]
    AlreadyNominatedToday(String),

    #[error("{0} is a traveler; call for their exile instead")]
    TravelerNominee(String),
}

/// Service opening execution votes from player nominations.
pub struct NominationService {
    input: Arc<dyn ActorInputPort>,
    announcer: Arc<dyn AnnouncementPort>,
    deaths: DeathService,
}

impl NominationService {
    pub fn new(input: Arc<dyn ActorInputPort>, announcer: Arc<dyn AnnouncementPort>) -> Self {
        let deaths = DeathService::new(input.clone(), announcer.clone());
        Self {
            input,
            announcer,
            deaths,
        }
    }

    /// Nominate `nominee` for execution. `None` on either side stands for
    /// the storytellers. Returns whether the nomination went to a vote.
    pub async fn nominate(
        &self,
        game: &mut Game,
        nominator: Option<PlayerId>,
        nominee: Option<PlayerId>,
    ) -> Result<bool, NominationError> {
        let day = game.current_day().ok_or(NominationError::NotDaytime)?;
        if day.ended {
            return Err(NominationError::NotDaytime);
        }
        if !day.is_noms {
            return Err(NominationError::NominationsClosed);
        }
        if day.has_open_vote() {
            return Err(NominationError::VoteInProgress);
        }

        if let Some(id) = nominator {
            let player = game.player(id).ok_or(NominationError::UnknownPlayer)?;
            if player.is_ghost || !player.can_nominate {
                return Err(NominationError::CannotNominate(player.name.clone()));
            }
            if player.has_nominated_today {
                return Err(NominationError::AlreadyNominated(player.name.clone()));
            }
        }
        if let Some(id) = nominee {
            let player = game.player(id).ok_or(NominationError::UnknownPlayer)?;
            if player.is_traveler() {
                return Err(NominationError::TravelerNominee(player.name.clone()));
            }
            if !player.can_be_nominated {
                return Err(NominationError::CannotBeNominated(player.name.clone()));
            }
            if player.has_been_nominated_today {
                return Err(NominationError::AlreadyNominatedToday(player.name.clone()));
            }
        }

        // The allowance is spent now; hooks cannot refund it.
        if let Some(player) = nominator.and_then(|id| game.player_mut(id)) {
            player.has_nominated_today = true;
        }
        if let Some(player) = nominee.and_then(|id| game.player_mut(id)) {
            player.has_been_nominated_today = true;
        }

        let nominator_name = Self::name_of(game, nominator);
        let nominee_name = Self::name_of(game, nominee);
        tracing::info!("{} nominates {}", nominator_name, nominee_name);

        let (proceed, marked) = self.dispatch_hooks(game, nominator, nominee).await;
        for target in marked {
            match self.deaths.resolve(game, target).await {
                Ok(_) | Err(DeathError::AlreadyGhost(_)) => {}
                Err(error) => tracing::warn!(%error, "nomination death could not be resolved"),
            }
        }

        if proceed {
            game.record(GameEventKind::Nominated { nominator, nominee });
            start_vote(game, VoteKind::Execution, nominator, nominee);
            let text = format!(
                "{} has nominated {}. The vote is open.",
                nominator_name, nominee_name
            );
            if let Err(error) = self.announcer.announce(Audience::Town, &text).await {
                tracing::warn!(%error, "nomination announcement failed");
            }
        } else {
            game.record(GameEventKind::NominationVoided { nominator, nominee });
            let text = format!(
                "The nomination of {} by {} does not go to a vote.",
                nominee_name, nominator_name
            );
            if let Err(error) = self.announcer.announce(Audience::Town, &text).await {
                tracing::warn!(%error, "nomination announcement failed");
            }
        }
        Ok(proceed)
    }

    async fn dispatch_hooks(
        &self,
        game: &mut Game,
        nominator: Option<PlayerId>,
        nominee: Option<PlayerId>,
    ) -> (bool, Vec<PlayerId>) {
        let listeners: Vec<(CharPath, &'static dyn NominationCapability)> = game
            .hook_holders(true, |hooks| hooks.nomination().is_some())
            .into_iter()
            .filter_map(|path| {
                let role = game.character_at(&path)?.role;
                hooks::for_role(role).nomination().map(|cap| (path, cap))
            })
            .collect();

        let mut marked = Vec::new();
        let mut proceed = true;
        let mut cx = PhaseCx {
            game: &mut *game,
            input: &*self.input,
            announcer: &*self.announcer,
            origin: ActorRef::Storytellers,
        };
        for (path, cap) in &listeners {
            proceed = cap
                .on_nomination(&mut cx, path, nominator, nominee, &mut marked)
                .await;
            if !proceed {
                break;
            }
        }
        (proceed, marked)
    }

    fn name_of(game: &Game, player: Option<PlayerId>) -> String {
        player
            .and_then(|id| game.player(id))
            .map(|p| p.name.clone())
            .unwrap_or_else(|| "the storytellers".to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::characters::{Character, Role};
    use crate::domain::entities::{Day, Player};
    use crate::domain::value_objects::Script;
    use crate::infrastructure::{RecordingAnnouncer, ScriptedInput};

    fn service() -> NominationService {
        NominationService::new(
            Arc::new(ScriptedInput::empty()),
            Arc::new(RecordingAnnouncer::new()),
        )
    }

    fn town(roles: &[Role]) -> Game {
        let mut game = Game::new(Script::trouble_brewing());
        for (index, role) in roles.iter().enumerate() {
            let alignment = role.team().starting_alignment();
            game.seat(Player::new(
                format!("p{}", index),
                Character::new(*role),
                alignment,
            ));
        }
        let mut day = Day::new();
        day.is_noms = true;
        game.days.push(day);
        game
    }

    #[tokio::test]
    async fn test_plain_nomination_opens_a_vote() {
        let mut game = town(&[Role::Chef, Role::Empath, Role::Imp]);
        let nominator = game.seating[0].id;
        let nominee = game.seating[2].id;

        let proceeded = service()
            .nominate(&mut game, Some(nominator), Some(nominee))
            .await
            .unwrap();
        assert!(proceeded);
        assert!(game.current_day().unwrap().has_open_vote());
        assert!(game.player(nominator).unwrap().has_nominated_today);
        assert!(game.player(nominee).unwrap().has_been_nominated_today);
    }

    #[tokio::test]
    async fn test_each_side_gets_one_nomination_per_day() {
        let mut game = town(&[Role::Chef, Role::Empath, Role::Librarian, Role::Imp]);
        let nominator = game.seating[0].id;
        let second = game.seating[1].id;
        let imp = game.seating[3].id;
        let service = service();

        service
            .nominate(&mut game, Some(nominator), Some(imp))
            .await
            .unwrap();
        // Drain the vote so only the allowance can be at fault.
        game.current_day_mut().unwrap().votes.last_mut().unwrap().done = true;

        let again = service
            .nominate(&mut game, Some(nominator), Some(second))
            .await;
        assert!(matches!(again, Err(NominationError::AlreadyNominated(_))));

        let same_target = service.nominate(&mut game, Some(second), Some(imp)).await;
        assert!(matches!(
            same_target,
            Err(NominationError::AlreadyNominatedToday(_))
        ));
    }

    #[tokio::test]
    async fn test_nomination_rejected_while_a_vote_is_open() {
        let mut game = town(&[Role::Chef, Role::Empath, Role::Librarian]);
        let chef = game.seating[0].id;
        let empath = game.seating[1].id;
        let librarian = game.seating[2].id;
        let service = service();
        service
            .nominate(&mut game, Some(chef), Some(librarian))
            .await
            .unwrap();

        let result = service.nominate(&mut game, Some(empath), Some(chef)).await;
        assert!(matches!(result, Err(NominationError::VoteInProgress)));
    }

    #[tokio::test]
    async fn test_nomination_rejected_while_nominations_closed() {
        let mut game = town(&[Role::Chef, Role::Empath]);
        game.current_day_mut().unwrap().is_noms = false;
        let nominator = game.seating[0].id;
        let nominee = game.seating[1].id;

        let result = service()
            .nominate(&mut game, Some(nominator), Some(nominee))
            .await;
        assert!(matches!(result, Err(NominationError::NominationsClosed)));
    }

    #[tokio::test]
    async fn test_traveler_nominee_is_directed_to_exile() {
        let mut game = town(&[Role::Chef, Role::Empath, Role::Beggar]);
        let nominator = game.seating[0].id;
        let beggar = game.seating[2].id;
        let result = service().nominate(&mut game, Some(nominator), Some(beggar)).await;
        assert!(matches!(result, Err(NominationError::TravelerNominee(_))));
    }

    #[tokio::test]
    async fn test_ghost_nominator_is_rejected() {
        let mut game = town(&[Role::Chef, Role::Empath]);
        game.seating[0].make_ghost();
        let ghost = game.seating[0].id;
        let nominee = game.seating[1].id;
        let result = service().nominate(&mut game, Some(ghost), Some(nominee)).await;
        assert!(matches!(result, Err(NominationError::CannotNominate(_))));
    }

    #[tokio::test]
    async fn test_virgin_executes_townsfolk_nominator_and_voids_the_vote() {
        let mut game = town(&[Role::Chef, Role::Virgin, Role::Imp]);
        let nominator = game.seating[0].id;
        let virgin = game.seating[1].id;

        let proceeded = service()
            .nominate(&mut game, Some(nominator), Some(virgin))
            .await
            .unwrap();
        assert!(!proceeded);
        assert!(!game.current_day().unwrap().has_open_vote());
        assert!(game.player(nominator).unwrap().is_ghost);
        // The ability is spent.
        assert!(game.seating[1].character.state.used);
    }

    #[tokio::test]
    async fn test_virgin_triggers_only_once() {
        let mut game = town(&[Role::Chef, Role::Empath, Role::Virgin, Role::Imp]);
        let virgin = game.seating[2].id;
        let service = service();

        // A minion nominator spends the ability without dying.
        let minion_game_seat = game.seating[3].id;
        game.seating[3].character = Character::new(Role::Poisoner);
        let proceeded = service
            .nominate(&mut game, Some(minion_game_seat), Some(virgin))
            .await
            .unwrap();
        assert!(proceeded);

        // The next day a townsfolk nominator is safe.
        game.current_day_mut().unwrap().votes.last_mut().unwrap().done = true;
        for player in &mut game.seating {
            player.reset_day_flags();
        }
        let nominator = game.seating[0].id;
        let proceeded = service
            .nominate(&mut game, Some(nominator), Some(virgin))
            .await
            .unwrap();
        assert!(proceeded);
        assert!(!game.player(nominator).unwrap().is_ghost);
    }

    #[tokio::test]
    async fn test_witch_curse_kills_the_nominator_but_the_vote_goes_on() {
        let mut game = town(&[
            Role::Chef,
            Role::Empath,
            Role::Librarian,
            Role::Witch,
            Role::Imp,
        ]);
        let cursed = game.seating[0].id;
        let imp = game.seating[4].id;
        game.seating[3].character.state.chosen = Some(cursed);

        let proceeded = service()
            .nominate(&mut game, Some(cursed), Some(imp))
            .await
            .unwrap();
        assert!(proceeded);
        assert!(game.player(cursed).unwrap().is_ghost);
        assert!(game.current_day().unwrap().has_open_vote());
    }

    #[tokio::test]
    async fn test_golem_nomination_fells_a_non_demon_nominee() {
        let mut game = town(&[Role::Golem, Role::Chef, Role::Empath, Role::Imp]);
        let golem = game.seating[0].id;
        let nominee = game.seating[1].id;

        let proceeded = service()
            .nominate(&mut game, Some(golem), Some(nominee))
            .await
            .unwrap();
        assert!(proceeded);
        assert!(game.player(nominee).unwrap().is_ghost);
        assert!(game.seating[0].character.state.used);
    }
}

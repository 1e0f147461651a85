//! Day service - the dawn/dusk cycle and the day's phase toggles
//!
//! Dawn is the delicate part: overnight kills are handed to the day-start
//! hooks as a mutable list before anything is published, and any hook may
//! veto publication. A vetoed dawn leaves the kills pending so the whole
//! publication can be retried once the blocking decision has been made.

use std::sync::Arc;

use crate::application::ports::outbound::{ActorInputPort, ActorRef, AnnouncementPort, Audience};
use crate::application::services::death_service::{DeathError, DeathService};
use crate::domain::characters::{
    hooks, CharPath, DayEndCapability, DayStartCapability, NomsCalledCapability, PhaseCx,
};
use crate::domain::entities::{Day, Game};
use crate::domain::events::GameEventKind;
use crate::domain::value_objects::PlayerId;

#[derive(Debug, thiserror::Error)]
pub enum DayError {
    #[error("it is not daytime")]
    NotDaytime,

    #[error("a day is already open")]
    AlreadyDaytime,

    #[error("a vote is still in progress")]
    VoteInProgress,
}

/// Service advancing the day cycle.
pub struct DayService {
    input: Arc<dyn ActorInputPort>,
    announcer: Arc<dyn AnnouncementPort>,
    deaths: DeathService,
}

impl DayService {
    pub fn new(input: Arc<dyn ActorInputPort>, announcer: Arc<dyn AnnouncementPort>) -> Self {
        let deaths = DeathService::new(input.clone(), announcer.clone());
        Self {
            input,
            announcer,
            deaths,
        }
    }

    /// Attempt to break the dawn: publish the overnight kills and open a
    /// new day. Returns whether the dawn was published (`false` means a
    /// hook held it back and [`DayService::publish_dawn`] should be
    /// retried; the night continues until it succeeds).
    pub async fn start_day(&self, game: &mut Game) -> Result<bool, DayError> {
        self.publish_dawn(game).await
    }

    /// Run the day-start hooks over the pending kill list and, unless a
    /// hook vetoes, resolve the kills and open the day. The kills are
    /// resolved while it is still night, so night-facing protections and
    /// forced kills see the phase they key on.
    pub async fn publish_dawn(&self, game: &mut Game) -> Result<bool, DayError> {
        if game.is_day() {
            return Err(DayError::AlreadyDaytime);
        }
        let mut kills = std::mem::take(&mut game.pending_deaths);

        let listeners: Vec<(CharPath, &'static dyn DayStartCapability)> = game
            .hook_holders(true, |hooks| hooks.day_start().is_some())
            .into_iter()
            .filter_map(|path| {
                let role = game.character_at(&path)?.role;
                hooks::for_role(role).day_start().map(|cap| (path, cap))
            })
            .collect();

        let mut proceed = true;
        {
            let mut cx = PhaseCx {
                game: &mut *game,
                input: &*self.input,
                announcer: &*self.announcer,
                origin: ActorRef::Storytellers,
            };
            for (path, cap) in &listeners {
                proceed = cap.on_dawn(&mut cx, path, &mut kills).await;
                if !proceed {
                    break;
                }
            }
        }

        if !proceed {
            // Hold the kills for a retry once the blocking decision lands.
            game.pending_deaths = kills;
            let day = game.day_number() + 1;
            game.record(GameEventKind::DawnDeferred { day });
            tracing::info!(day, "dawn held back by a character ability");
            return Ok(false);
        }

        let mut died = Vec::new();
        for target in kills {
            match self.deaths.resolve(game, target).await {
                Ok(true) => {
                    if let Some(player) = game.player(target) {
                        died.push(player.name.clone());
                    }
                }
                Ok(false) => {}
                Err(error) => tracing::warn!(%error, "overnight death could not be resolved"),
            }
        }

        game.days.push(Day::new());
        for player in &mut game.seating {
            player.reset_day_flags();
        }
        let day = game.day_number();
        game.record(GameEventKind::DayStarted { day });
        tracing::info!(day, "dawn breaks");

        let text = if died.is_empty() {
            "No one died in the night.".to_string()
        } else {
            format!("Died in the night: {}.", died.join(", "))
        };
        if let Err(error) = self.announcer.announce(Audience::Town, &text).await {
            tracing::warn!(%error, "dawn announcement failed");
        }
        Ok(true)
    }

    /// Execute the day's standing nominee, run the dusk hooks and close
    /// the day.
    pub async fn end_day(&self, game: &mut Game) -> Result<(), DayError> {
        if !game.is_day() {
            return Err(DayError::NotDaytime);
        }
        if game
            .current_day()
            .map(|day| day.has_open_vote())
            .unwrap_or(false)
        {
            return Err(DayError::VoteInProgress);
        }

        let nominee = game
            .current_day()
            .and_then(|day| day.about_to_die.as_ref())
            .and_then(|leader| leader.nominee);
        match nominee {
            Some(target) => self.execute(game, target).await,
            None => {
                game.record(GameEventKind::NoExecution);
                if let Err(error) = self
                    .announcer
                    .announce(Audience::Town, "No one is executed today.")
                    .await
                {
                    tracing::warn!(%error, "execution announcement failed");
                }
            }
        }

        // Once-per-day choices expire at dusk, for ghosts too.
        let listeners: Vec<(CharPath, &'static dyn DayEndCapability)> = game
            .hook_holders(false, |hooks| hooks.day_end().is_some())
            .into_iter()
            .filter_map(|path| {
                let role = game.character_at(&path)?.role;
                hooks::for_role(role).day_end().map(|cap| (path, cap))
            })
            .collect();
        for (path, cap) in &listeners {
            cap.on_dusk(game, path);
        }

        let day = game.day_number();
        if let Some(day) = game.current_day_mut() {
            day.ended = true;
            day.is_noms = false;
            day.is_pms = false;
        }
        game.record(GameEventKind::NightFell { day });
        tracing::info!(day, "night falls");
        Ok(())
    }

    async fn execute(&self, game: &mut Game, target: PlayerId) {
        let name = game
            .player(target)
            .map(|p| p.name.clone())
            .unwrap_or_else(|| "a player".to_string());
        match self.deaths.resolve(game, target).await {
            Ok(true) => {
                game.record(GameEventKind::ExecutionHeld { player: target });
                let text = format!("{} has been executed.", name);
                if let Err(error) = self.announcer.announce(Audience::Town, &text).await {
                    tracing::warn!(%error, "execution announcement failed");
                }
            }
            Ok(false) => {
                game.record(GameEventKind::NoExecution);
                let text = format!("{} somehow survives execution.", name);
                if let Err(error) = self.announcer.announce(Audience::Town, &text).await {
                    tracing::warn!(%error, "execution announcement failed");
                }
            }
            Err(error) => {
                tracing::warn!(%error, "execution could not be resolved");
                game.record(GameEventKind::NoExecution);
            }
        }
    }

    /// Open nominations. The first opening of the day also fires the
    /// noms-called hooks.
    pub async fn open_nominations(&self, game: &mut Game) -> Result<(), DayError> {
        if !game.is_day() {
            return Err(DayError::NotDaytime);
        }
        let first_call = game
            .current_day()
            .map(|day| !day.noms_called)
            .unwrap_or(false);
        if let Some(day) = game.current_day_mut() {
            day.is_noms = true;
            day.noms_called = true;
        }

        if first_call {
            let listeners: Vec<(CharPath, &'static dyn NomsCalledCapability)> = game
                .hook_holders(true, |hooks| hooks.noms_called().is_some())
                .into_iter()
                .filter_map(|path| {
                    let role = game.character_at(&path)?.role;
                    hooks::for_role(role).noms_called().map(|cap| (path, cap))
                })
                .collect();
            for (path, cap) in &listeners {
                cap.on_noms_called(game, path);
            }
        }

        game.record(GameEventKind::NominationsOpened);
        if let Err(error) = self
            .announcer
            .announce(Audience::Town, "Nominations are open.")
            .await
        {
            tracing::warn!(%error, "nomination announcement failed");
        }
        Ok(())
    }

    pub fn close_nominations(&self, game: &mut Game) -> Result<(), DayError> {
        if !game.is_day() {
            return Err(DayError::NotDaytime);
        }
        if let Some(day) = game.current_day_mut() {
            day.is_noms = false;
        }
        game.record(GameEventKind::NominationsClosed);
        Ok(())
    }

    pub fn open_whispers(&self, game: &mut Game) -> Result<(), DayError> {
        if !game.is_day() {
            return Err(DayError::NotDaytime);
        }
        if let Some(day) = game.current_day_mut() {
            day.is_pms = true;
        }
        game.record(GameEventKind::WhispersOpened);
        Ok(())
    }

    pub fn close_whispers(&self, game: &mut Game) -> Result<(), DayError> {
        if !game.is_day() {
            return Err(DayError::NotDaytime);
        }
        if let Some(day) = game.current_day_mut() {
            day.is_pms = false;
        }
        game.record(GameEventKind::WhispersClosed);
        Ok(())
    }

    /// Mark a player to die overnight; resolved at the next dawn.
    pub fn mark_overnight_death(
        &self,
        game: &mut Game,
        target: PlayerId,
    ) -> Result<(), DeathError> {
        self.deaths.mark_overnight(game, target)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::characters::{Character, Role};
    use crate::domain::entities::{AboutToDie, Player};
    use crate::domain::value_objects::Script;
    use crate::infrastructure::{RecordingAnnouncer, ScriptedInput};

    fn service(input: ScriptedInput) -> DayService {
        DayService::new(Arc::new(input), Arc::new(RecordingAnnouncer::new()))
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
        game
    }

    #[tokio::test]
    async fn test_start_day_resolves_overnight_kills() {
        let mut game = town(&[Role::Chef, Role::Empath, Role::Imp]);
        let target = game.seating[0].id;
        let service = service(ScriptedInput::empty());
        service.mark_overnight_death(&mut game, target).unwrap();

        let published = service.start_day(&mut game).await.unwrap();
        assert!(published);
        assert!(game.player(target).unwrap().is_ghost);
        assert!(game.pending_deaths.is_empty());
        assert!(game.is_day());
    }

    #[tokio::test]
    async fn test_soldier_survives_the_night() {
        let mut game = town(&[Role::Soldier, Role::Empath, Role::Imp]);
        let soldier = game.seating[0].id;
        let service = service(ScriptedInput::empty());
        service.mark_overnight_death(&mut game, soldier).unwrap();

        service.start_day(&mut game).await.unwrap();
        assert!(!game.player(soldier).unwrap().is_ghost);
    }

    #[tokio::test]
    async fn test_devils_advocate_shields_executions_but_not_night_kills() {
        let mut game = town(&[
            Role::DevilsAdvocate,
            Role::Empath,
            Role::Librarian,
            Role::Imp,
        ]);
        let empath = game.seating[1].id;
        let librarian = game.seating[2].id;
        let service = service(ScriptedInput::empty());

        // His charge is only safe from execution; the night kill lands.
        game.seating[0].character.state.chosen = Some(empath);
        service.mark_overnight_death(&mut game, empath).unwrap();
        service.start_day(&mut game).await.unwrap();
        assert!(game.player(empath).unwrap().is_ghost);

        // The same protection holds at the gallows.
        game.seating[0].character.state.chosen = Some(librarian);
        game.current_day_mut().unwrap().about_to_die = Some(AboutToDie {
            nominee: Some(librarian),
            votes: 2,
            vote_index: 0,
        });
        service.end_day(&mut game).await.unwrap();
        assert!(!game.player(librarian).unwrap().is_ghost);
    }

    #[tokio::test]
    async fn test_unresolved_mayor_bounce_defers_the_dawn() {
        let mut game = town(&[Role::Mayor, Role::Empath, Role::Librarian, Role::Imp]);
        let mayor = game.seating[0].id;

        // The storytellers confirm the bounce but never pick a target.
        let holding = service(ScriptedInput::with_answers(vec![Some(true)]));
        holding.mark_overnight_death(&mut game, mayor).unwrap();
        let published = holding.start_day(&mut game).await.unwrap();
        assert!(!published);
        assert_eq!(game.pending_deaths, vec![mayor]);
        assert!(!game.player(mayor).unwrap().is_ghost);

        // Retry with the decision made: the Empath dies in the Mayor's place.
        let empath = game.seating[1].id;
        let deciding = DayService::new(
            Arc::new(
                ScriptedInput::with_answers(vec![Some(true)]).and_choices(vec![Some(empath)]),
            ),
            Arc::new(RecordingAnnouncer::new()),
        );
        let published = deciding.publish_dawn(&mut game).await.unwrap();
        assert!(published);
        assert!(!game.player(mayor).unwrap().is_ghost);
        assert!(game.player(empath).unwrap().is_ghost);
    }

    #[tokio::test]
    async fn test_banshee_death_arms_her_double_vote() {
        let mut game = town(&[Role::Banshee, Role::Empath, Role::Imp]);
        let banshee = game.seating[0].id;
        let service = service(ScriptedInput::empty());
        service.mark_overnight_death(&mut game, banshee).unwrap();

        service.start_day(&mut game).await.unwrap();
        assert!(game.player(banshee).unwrap().is_ghost);
        assert!(game.seating[0].character.state.triggered);
    }

    #[tokio::test]
    async fn test_end_day_executes_the_standing_nominee() {
        let mut game = town(&[Role::Chef, Role::Empath, Role::Imp]);
        let service = service(ScriptedInput::empty());
        service.start_day(&mut game).await.unwrap();

        let target = game.seating[2].id;
        game.current_day_mut().unwrap().about_to_die = Some(AboutToDie {
            nominee: Some(target),
            votes: 2,
            vote_index: 0,
        });

        service.end_day(&mut game).await.unwrap();
        assert!(game.player(target).unwrap().is_ghost);
        assert!(!game.is_day());
        assert!(game
            .log
            .iter()
            .any(|e| matches!(e.kind, GameEventKind::ExecutionHeld { .. })));
    }

    #[tokio::test]
    async fn test_fool_survives_only_his_first_execution() {
        let mut game = town(&[Role::Fool, Role::Empath, Role::Imp]);
        let fool = game.seating[0].id;
        let service = service(ScriptedInput::empty());

        service.start_day(&mut game).await.unwrap();
        game.current_day_mut().unwrap().about_to_die = Some(AboutToDie {
            nominee: Some(fool),
            votes: 2,
            vote_index: 0,
        });
        service.end_day(&mut game).await.unwrap();
        assert!(!game.player(fool).unwrap().is_ghost);

        service.start_day(&mut game).await.unwrap();
        game.current_day_mut().unwrap().about_to_die = Some(AboutToDie {
            nominee: Some(fool),
            votes: 2,
            vote_index: 0,
        });
        service.end_day(&mut game).await.unwrap();
        assert!(game.player(fool).unwrap().is_ghost);
    }

    #[tokio::test]
    async fn test_dusk_expires_once_per_day_choices() {
        let mut game = town(&[Role::Monk, Role::Empath, Role::Imp]);
        let protected = game.seating[1].id;
        game.seating[0].character.state.chosen = Some(protected);
        let service = service(ScriptedInput::empty());

        service.start_day(&mut game).await.unwrap();
        service.end_day(&mut game).await.unwrap();
        assert_eq!(game.seating[0].character.state.chosen, None);
    }

    #[tokio::test]
    async fn test_organ_grinder_turns_ballots_secret_once() {
        let mut game = town(&[Role::OrganGrinder, Role::Empath, Role::Imp]);
        let service = service(ScriptedInput::empty());
        service.start_day(&mut game).await.unwrap();

        service.open_nominations(&mut game).await.unwrap();
        assert!(game.current_day().unwrap().secret_ballots);

        service.close_nominations(&mut game).unwrap();
        service.open_nominations(&mut game).await.unwrap();
        let calls = game
            .log
            .iter()
            .filter(|e| matches!(e.kind, GameEventKind::SecretBallotsCalled))
            .count();
        assert_eq!(calls, 1);
    }

    #[tokio::test]
    async fn test_day_cannot_start_twice() {
        let mut game = town(&[Role::Chef, Role::Imp]);
        let service = service(ScriptedInput::empty());
        service.start_day(&mut game).await.unwrap();
        let result = service.start_day(&mut game).await;
        assert!(matches!(result, Err(DayError::AlreadyDaytime)));
    }
}

//! Traveler service - late joins, departures and exile calls
//!
//! Travelers come and go mid-match, and the town deals with a troublesome
//! one through an exile vote rather than a nomination. Exile calls are not
//! nominations: they spend no allowance, poll the whole circle, and a
//! passed exile resolves on the spot with no protection consulted.

use std::sync::Arc;

use crate::application::ports::outbound::{AnnouncementPort, Audience};
use crate::application::services::vote_service::start_vote;
use crate::domain::characters::{Character, Role};
use crate::domain::entities::{Game, Player, VoteKind};
use crate::domain::events::GameEventKind;
use crate::domain::value_objects::{Alignment, PlayerId};

#[derive(Debug, thiserror::Error)]
pub enum TravelerError {
    #[error("Player not found")]
    UnknownPlayer,

    #[error("{0} is not a traveler role")]
    NotATravelerRole(String),

    #[error("{0} is not a traveler")]
    NotATraveler(String),

    #[error("it is not daytime")]
    NotDaytime,

    #[error("a vote is already in progress")]
    VoteInProgress,
}

/// Service handling traveler arrivals, departures and exiles.
pub struct TravelerService {
    announcer: Arc<dyn AnnouncementPort>,
}

impl TravelerService {
    pub fn new(announcer: Arc<dyn AnnouncementPort>) -> Self {
        Self { announcer }
    }

    /// Seat a traveler at `seat`, pushing later seats around the circle.
    /// Travelers declare their alignment on arrival.
    pub async fn add_traveler(
        &self,
        game: &mut Game,
        name: impl Into<String>,
        role: Role,
        alignment: Alignment,
        seat: usize,
    ) -> Result<PlayerId, TravelerError> {
        if !role.is_traveler() {
            return Err(TravelerError::NotATravelerRole(
                role.display_name().to_string(),
            ));
        }
        let player = Player::new(name, Character::new(role), alignment);
        let text = format!("{} has joined the town.", player.name);
        let id = game.seat_at(player, seat);
        game.record(GameEventKind::TravelerJoined { player: id, role });
        tracing::info!("traveler {} joined at seat {}", id, seat);
        if let Err(error) = self.announcer.announce(Audience::Town, &text).await {
            tracing::warn!(%error, "traveler announcement failed");
        }
        Ok(id)
    }

    /// Remove a traveler from the circle entirely.
    pub async fn remove_traveler(
        &self,
        game: &mut Game,
        id: PlayerId,
    ) -> Result<Player, TravelerError> {
        let player = game.player(id).ok_or(TravelerError::UnknownPlayer)?;
        if !player.is_traveler() {
            return Err(TravelerError::NotATraveler(player.name.clone()));
        }
        let player = game.unseat(id).ok_or(TravelerError::UnknownPlayer)?;
        game.record(GameEventKind::TravelerLeft { player: id });
        tracing::info!("traveler {} left the town", id);
        let text = format!("{} has left the town.", player.name);
        if let Err(error) = self.announcer.announce(Audience::Town, &text).await {
            tracing::warn!(%error, "traveler announcement failed");
        }
        Ok(player)
    }

    /// Open an exile vote against a traveler. Anyone may call one, any
    /// number of times a day.
    pub async fn call_for_exile(
        &self,
        game: &mut Game,
        nominator: Option<PlayerId>,
        nominee: PlayerId,
    ) -> Result<(), TravelerError> {
        if !game.is_day() {
            return Err(TravelerError::NotDaytime);
        }
        if game
            .current_day()
            .map(|day| day.has_open_vote())
            .unwrap_or(false)
        {
            return Err(TravelerError::VoteInProgress);
        }
        let target = game.player(nominee).ok_or(TravelerError::UnknownPlayer)?;
        if !target.is_traveler() {
            return Err(TravelerError::NotATraveler(target.name.clone()));
        }
        let target_name = target.name.clone();

        game.record(GameEventKind::Nominated {
            nominator,
            nominee: Some(nominee),
        });
        start_vote(game, VoteKind::Exile, nominator, Some(nominee));
        let text = format!("A call has gone up to exile {}. The vote is open.", target_name);
        if let Err(error) = self.announcer.announce(Audience::Town, &text).await {
            tracing::warn!(%error, "exile announcement failed");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::Day;
    use crate::domain::value_objects::Script;
    use crate::infrastructure::RecordingAnnouncer;

    fn service() -> TravelerService {
        TravelerService::new(Arc::new(RecordingAnnouncer::new()))
    }

    fn town(count: usize) -> Game {
        let mut game = Game::new(Script::trouble_brewing());
        for index in 0..count {
            game.seat(Player::new(
                format!("p{}", index),
                Character::new(Role::Chef),
                Alignment::Good,
            ));
        }
        game
    }

    #[tokio::test]
    async fn test_traveler_joins_at_the_requested_seat() {
        let mut game = town(4);
        let id = service()
            .add_traveler(&mut game, "Tess", Role::Beggar, Alignment::Good, 2)
            .await
            .unwrap();
        assert_eq!(game.seat_of(id), Some(2));
        assert_eq!(game.seating.len(), 5);
        assert_eq!(game.seating[4].seat, Some(4));
    }

    #[tokio::test]
    async fn test_non_traveler_roles_cannot_join_as_travelers() {
        let mut game = town(4);
        let result = service()
            .add_traveler(&mut game, "Tess", Role::Imp, Alignment::Evil, 0)
            .await;
        assert!(matches!(result, Err(TravelerError::NotATravelerRole(_))));
    }

    #[tokio::test]
    async fn test_removal_closes_the_seating_gap() {
        let mut game = town(4);
        let service = service();
        let id = service
            .add_traveler(&mut game, "Tess", Role::Beggar, Alignment::Good, 1)
            .await
            .unwrap();

        service.remove_traveler(&mut game, id).await.unwrap();
        assert_eq!(game.seating.len(), 4);
        assert!(game.seating.iter().all(|p| p.id != id));
        assert_eq!(game.seating[1].seat, Some(1));
    }

    #[tokio::test]
    async fn test_resident_players_cannot_be_removed() {
        let mut game = town(4);
        let resident = game.seating[0].id;
        let result = service().remove_traveler(&mut game, resident).await;
        assert!(matches!(result, Err(TravelerError::NotATraveler(_))));
    }

    #[tokio::test]
    async fn test_exile_call_opens_a_full_order_vote() {
        let mut game = town(4);
        game.days.push(Day::new());
        let service = service();
        let id = service
            .add_traveler(&mut game, "Tess", Role::Beggar, Alignment::Good, 4)
            .await
            .unwrap();

        let caller = game.seating[0].id;
        service
            .call_for_exile(&mut game, Some(caller), id)
            .await
            .unwrap();
        let vote = game.current_day().unwrap().open_vote().unwrap();
        assert_eq!(vote.kind, VoteKind::Exile);
        assert_eq!(vote.order.len(), 5);
    }

    #[tokio::test]
    async fn test_exile_call_requires_a_traveler() {
        let mut game = town(4);
        game.days.push(Day::new());
        let resident = game.seating[1].id;
        let result = service().call_for_exile(&mut game, None, resident).await;
        assert!(matches!(result, Err(TravelerError::NotATraveler(_))));
    }
}

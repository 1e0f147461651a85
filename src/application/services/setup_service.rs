//! Setup service - deals characters and assembles a new match
//!
//! The base distribution follows the published player-count table; dealt
//! minions may then bend it (the Baron trades two townsfolk for two
//! outsiders) before the rest of the bag is drawn.

use std::sync::Arc;

use rand::seq::SliceRandom;

use crate::application::ports::outbound::RoleLookupPort;
use crate::domain::characters::{Character, Role};
use crate::domain::entities::{Game, Player};
use crate::domain::value_objects::{Script, Team};

#[derive(Debug, thiserror::Error)]
pub enum SetupError {
    #[error("cannot set up a game for {0} players (5 to 15 supported)")]
    BadPlayerCount(usize),

    #[error("the script has too few {0} roles for this player count")]
    NotEnoughRoles(&'static str),

    #[error("unknown role '{0}'")]
    UnknownRole(String),
}

/// How many of each team a player count calls for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoleDistribution {
    pub townsfolk: usize,
    pub outsider: usize,
    pub minion: usize,
    pub demon: usize,
}

/// Service assembling a fresh game from a script and a player list.
pub struct SetupService {
    roles: Arc<dyn RoleLookupPort>,
}

impl SetupService {
    pub fn new(roles: Arc<dyn RoleLookupPort>) -> Self {
        Self { roles }
    }

    /// The base team counts for a player count.
    pub fn distribution(count: usize) -> Result<RoleDistribution, SetupError> {
        let distribution = match count {
            5 => RoleDistribution {
                townsfolk: 3,
                outsider: 0,
                minion: 1,
                demon: 1,
            },
            6 => RoleDistribution {
                townsfolk: 3,
                outsider: 1,
                minion: 1,
                demon: 1,
            },
            7..=15 => {
                let past_four = count - 4;
                let minion = past_four / 3;
                RoleDistribution {
                    townsfolk: 3 + minion * 2,
                    outsider: past_four % 3,
                    minion,
                    demon: 1,
                }
            }
            other => return Err(SetupError::BadPlayerCount(other)),
        };
        Ok(distribution)
    }

    /// Deal random characters from the script and seat everyone in the
    /// given order.
    pub fn create_game(
        &self,
        script: Script,
        players: &[String],
        storytellers: &[String],
    ) -> Result<Game, SetupError> {
        let bag = Self::draw_bag(&script, players.len())?;
        let mut game = Game::new(script);
        for (name, role) in players.iter().zip(bag) {
            let alignment = role.team().starting_alignment();
            game.seat(Player::new(name.clone(), Character::new(role), alignment));
        }
        for name in storytellers {
            game.storytellers.push(Player::storyteller(name.clone()));
        }
        tracing::info!(game = %game.id, players = players.len(), "game created");
        Ok(game)
    }

    /// Assemble a game with storyteller-chosen roles instead of a random
    /// bag. Role names are resolved through the lookup port.
    pub fn create_game_assigned(
        &self,
        script: Script,
        assignments: &[(String, String)],
        storytellers: &[String],
    ) -> Result<Game, SetupError> {
        let mut game = Game::new(script);
        for (name, role_name) in assignments {
            let role = self
                .roles
                .resolve(role_name)
                .ok_or_else(|| SetupError::UnknownRole(role_name.clone()))?;
            let alignment = role.team().starting_alignment();
            game.seat(Player::new(name.clone(), Character::new(role), alignment));
        }
        for name in storytellers {
            game.storytellers.push(Player::storyteller(name.clone()));
        }
        tracing::info!(game = %game.id, players = assignments.len(), "game created");
        Ok(game)
    }

    fn draw_bag(script: &Script, count: usize) -> Result<Vec<Role>, SetupError> {
        let mut distribution = Self::distribution(count)?;
        let mut rng = rand::thread_rng();

        let mut pool = |team: Team| -> Vec<Role> {
            let mut roles: Vec<Role> = script
                .roles
                .iter()
                .copied()
                .filter(|role| role.team() == team)
                .collect();
            roles.shuffle(&mut rng);
            roles
        };
        let mut demons = pool(Team::Demon);
        let mut minions = pool(Team::Minion);
        let mut outsiders = pool(Team::Outsider);
        let mut townsfolk = pool(Team::Townsfolk);

        let mut bag = Vec::with_capacity(count);
        for _ in 0..distribution.demon {
            bag.push(demons.pop().ok_or(SetupError::NotEnoughRoles("demon"))?);
        }
        for _ in 0..distribution.minion {
            bag.push(minions.pop().ok_or(SetupError::NotEnoughRoles("minion"))?);
        }
        Self::apply_setup_modifiers(&bag, &mut distribution);
        for _ in 0..distribution.outsider {
            bag.push(
                outsiders
                    .pop()
                    .ok_or(SetupError::NotEnoughRoles("outsider"))?,
            );
        }
        for _ in 0..distribution.townsfolk {
            bag.push(
                townsfolk
                    .pop()
                    .ok_or(SetupError::NotEnoughRoles("townsfolk"))?,
            );
        }

        bag.shuffle(&mut rng);
        Ok(bag)
    }

    /// Adjust the remaining draw for minions that change setup.
    fn apply_setup_modifiers(drawn: &[Role], distribution: &mut RoleDistribution) {
        if drawn.contains(&Role::Baron) {
            distribution.outsider += 2;
            distribution.townsfolk = distribution.townsfolk.saturating_sub(2);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::RoleRegistry;

    fn service() -> SetupService {
        SetupService::new(Arc::new(RoleRegistry::new()))
    }

    fn names(count: usize) -> Vec<String> {
        (0..count).map(|i| format!("p{}", i)).collect()
    }

    #[test]
    fn test_distribution_table() {
        let check = |count, townsfolk, outsider, minion| {
            let d = SetupService::distribution(count).unwrap();
            assert_eq!(
                (d.townsfolk, d.outsider, d.minion, d.demon),
                (townsfolk, outsider, minion, 1),
                "player count {}",
                count
            );
        };
        check(5, 3, 0, 1);
        check(6, 3, 1, 1);
        check(7, 5, 0, 1);
        check(9, 5, 2, 1);
        check(10, 7, 0, 2);
        check(13, 9, 0, 3);
        check(15, 9, 2, 3);

        assert!(SetupService::distribution(4).is_err());
        assert!(SetupService::distribution(16).is_err());
    }

    #[test]
    fn test_created_game_seats_everyone_with_one_demon() {
        let game = service()
            .create_game(
                Script::trouble_brewing(),
                &names(9),
                &["st".to_string()],
            )
            .unwrap();
        assert_eq!(game.seating.len(), 9);
        assert_eq!(game.storytellers.len(), 1);

        let demons = game
            .seating
            .iter()
            .filter(|p| p.character.role.is_demon())
            .count();
        assert_eq!(demons, 1);

        // Alignments follow the dealt teams.
        for player in &game.seating {
            assert_eq!(
                player.alignment,
                player.character.role.team().starting_alignment()
            );
        }
    }

    #[test]
    fn test_baron_trades_townsfolk_for_outsiders() {
        let mut distribution = SetupService::distribution(9).unwrap();
        SetupService::apply_setup_modifiers(&[Role::Imp, Role::Baron], &mut distribution);
        assert_eq!(distribution.outsider, 4);
        assert_eq!(distribution.townsfolk, 3);
    }

    #[test]
    fn test_assigned_setup_resolves_role_names() {
        let game = service()
            .create_game_assigned(
                Script::trouble_brewing(),
                &[
                    ("Ana".to_string(), "Imp".to_string()),
                    ("Ben".to_string(), "fortune teller".to_string()),
                ],
                &[],
            )
            .unwrap();
        assert_eq!(game.seating[0].character.role, Role::Imp);
        assert_eq!(game.seating[1].character.role, Role::FortuneTeller);

        let unknown = service().create_game_assigned(
            Script::trouble_brewing(),
            &[("Ana".to_string(), "wizzard".to_string())],
            &[],
        );
        assert!(matches!(unknown, Err(SetupError::UnknownRole(_))));
    }
}

//! Seating service - the public seating display and whisper permissions

use crate::domain::characters::{hooks, CharPath, SeatingOrderCapability};
use crate::domain::entities::{Game, SeatView};
use crate::domain::value_objects::{PlayerId, WhisperMode};

/// Read-side service over the seating circle. Holds no state of its own.
pub struct SeatingService;

impl SeatingService {
    pub fn new() -> Self {
        Self
    }

    /// The public seating display, one row per seated player, after the
    /// seating-order hooks have annotated it.
    pub fn display(&self, game: &Game) -> Vec<SeatView> {
        let mut view: Vec<SeatView> = game
            .seating
            .iter()
            .map(|player| {
                let mut line = player.name.clone();
                if player.is_ghost {
                    line.push_str(" (dead");
                    if player.dead_votes > 0 {
                        line.push_str(", ghost vote in hand");
                    }
                    line.push(')');
                }
                SeatView {
                    player: player.id,
                    line,
                }
            })
            .collect();

        let listeners: Vec<(CharPath, &'static dyn SeatingOrderCapability)> = game
            .hook_holders(false, |hooks| hooks.seating_order().is_some())
            .into_iter()
            .filter_map(|path| {
                let role = game.character_at(&path)?.role;
                hooks::for_role(role).seating_order().map(|cap| (path, cap))
            })
            .collect();
        for (path, cap) in &listeners {
            cap.adjust(game, path, &mut view);
        }
        view
    }

    /// Whether `from` may whisper `to` right now. Storytellers always may,
    /// in either direction.
    pub fn can_whisper(&self, game: &Game, from: PlayerId, to: PlayerId) -> bool {
        let storyteller_involved = [from, to]
            .iter()
            .any(|id| game.storytellers.iter().any(|p| p.id == *id));
        if storyteller_involved {
            return true;
        }
        let open = game
            .current_day()
            .map(|day| !day.ended && day.is_pms)
            .unwrap_or(false);
        if !open {
            return false;
        }
        match game.whisper_mode {
            WhisperMode::All => true,
            WhisperMode::Neighbors => {
                let (Some(a), Some(b)) = (game.seat_of(from), game.seat_of(to)) else {
                    return false;
                };
                let seats = game.seating.len();
                seats > 1 && ((a + 1) % seats == b || (b + 1) % seats == a)
            }
            WhisperMode::StorytellersOnly => false,
        }
    }
}

impl Default for SeatingService {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::characters::{Character, Role};
    use crate::domain::entities::{Day, Player};
    use crate::domain::value_objects::{Alignment, Script};

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

    #[test]
    fn test_display_marks_ghosts_and_their_tokens() {
        let mut game = town(3);
        game.seating[1].make_ghost();
        game.seating[2].make_ghost();
        game.seating[2].dead_votes = 0;

        let view = SeatingService::new().display(&game);
        assert_eq!(view[0].line, "p0");
        assert_eq!(view[1].line, "p1 (dead, ghost vote in hand)");
        assert_eq!(view[2].line, "p2 (dead)");
    }

    #[test]
    fn test_display_exposes_traveler_roles() {
        let mut game = town(2);
        game.seat(Player::new(
            "Tess",
            Character::new(Role::Beggar),
            Alignment::Good,
        ));

        let view = SeatingService::new().display(&game);
        assert_eq!(view[2].line, "Tess - Beggar");
    }

    #[test]
    fn test_whispers_follow_the_mode_and_the_day_flag() {
        let mut game = town(4);
        let a = game.seating[0].id;
        let b = game.seating[1].id;
        let c = game.seating[2].id;
        let service = SeatingService::new();

        // No day open yet.
        assert!(!service.can_whisper(&game, a, b));

        game.days.push(Day::new());
        assert!(service.can_whisper(&game, a, c));

        game.whisper_mode = WhisperMode::Neighbors;
        assert!(service.can_whisper(&game, a, b));
        assert!(!service.can_whisper(&game, a, c));
        // The circle wraps.
        let d = game.seating[3].id;
        assert!(service.can_whisper(&game, a, d));

        game.whisper_mode = WhisperMode::StorytellersOnly;
        assert!(!service.can_whisper(&game, a, b));
    }

    #[test]
    fn test_storytellers_always_whisper() {
        let mut game = town(2);
        game.storytellers.push(Player::storyteller("st"));
        let storyteller = game.storytellers[0].id;
        let player = game.seating[0].id;

        let service = SeatingService::new();
        assert!(service.can_whisper(&game, storyteller, player));
        assert!(service.can_whisper(&game, player, storyteller));
    }
}

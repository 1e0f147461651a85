//! Game entity - top-level match state
//!
//! The game owns the seating order, the day list and the event log. All
//! phase dispatch starts here: [`Game::hook_holders`] walks the seating
//! order once, descends each player's character tree (skipping poisoned
//! subtrees wholesale) and returns the addresses of every node that
//! implements the requested capability, in seating order. There is no
//! ambient global anywhere; services receive the game by reference.

use serde::{Deserialize, Serialize};

use crate::domain::characters::{hooks, CharPath, Character, RoleHookSet};
use crate::domain::events::{GameEvent, GameEventKind};
use crate::domain::value_objects::{GameId, PlayerId, Script, WhisperMode};

use super::{Day, Player};

/// One row of the seating display.
#[derive(Debug, Clone, PartialEq)]
pub struct SeatView {
    pub player: PlayerId,
    pub line: String,
}

/// Top-level match state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Game {
    pub id: GameId,
    pub script: Script,
    /// Seated players in seating order; `Player::seat` mirrors the index.
    pub seating: Vec<Player>,
    pub storytellers: Vec<Player>,
    pub days: Vec<Day>,
    pub whisper_mode: WhisperMode,
    /// Players marked to die overnight, consumed at dawn.
    pub pending_deaths: Vec<PlayerId>,
    pub log: Vec<GameEvent>,
}

impl Game {
    pub fn new(script: Script) -> Self {
        let mut game = Self {
            id: GameId::new(),
            script: script.clone(),
            seating: Vec::new(),
            storytellers: Vec::new(),
            days: Vec::new(),
            whisper_mode: WhisperMode::default(),
            pending_deaths: Vec::new(),
            log: Vec::new(),
        };
        game.record(GameEventKind::GameCreated {
            script: script.name,
        });
        game
    }

    /// Append a player at the end of the seating order.
    pub fn seat(&mut self, mut player: Player) -> PlayerId {
        player.seat = Some(self.seating.len());
        let id = player.id;
        self.seating.push(player);
        id
    }

    /// Insert a player at a seating position, shifting later seats down.
    pub fn seat_at(&mut self, player: Player, position: usize) -> PlayerId {
        let id = player.id;
        let position = position.min(self.seating.len());
        self.seating.insert(position, player);
        self.reseat();
        id
    }

    /// Remove a seated player entirely.
    pub fn unseat(&mut self, id: PlayerId) -> Option<Player> {
        let index = self.seating.iter().position(|p| p.id == id)?;
        let player = self.seating.remove(index);
        self.reseat();
        Some(player)
    }

    /// Reindex `Player::seat` after seating changes.
    fn reseat(&mut self) {
        for (index, player) in self.seating.iter_mut().enumerate() {
            player.seat = Some(index);
        }
    }

    pub fn player(&self, id: PlayerId) -> Option<&Player> {
        self.seating
            .iter()
            .chain(self.storytellers.iter())
            .find(|p| p.id == id)
    }

    pub fn player_mut(&mut self, id: PlayerId) -> Option<&mut Player> {
        self.seating
            .iter_mut()
            .chain(self.storytellers.iter_mut())
            .find(|p| p.id == id)
    }

    pub fn player_by_name(&self, name: &str) -> Option<&Player> {
        self.seating
            .iter()
            .chain(self.storytellers.iter())
            .find(|p| p.name.eq_ignore_ascii_case(name))
    }

    pub fn seat_of(&self, id: PlayerId) -> Option<usize> {
        self.seating.iter().position(|p| p.id == id)
    }

    /// Resolve a character-node address.
    pub fn character_at(&self, path: &CharPath) -> Option<&Character> {
        self.seating.get(path.seat)?.character.descend(&path.trail)
    }

    pub fn character_at_mut(&mut self, path: &CharPath) -> Option<&mut Character> {
        self.seating
            .get_mut(path.seat)?
            .character
            .descend_mut(&path.trail)
    }

    /// The player owning the character at `path`.
    pub fn owner_of(&self, path: &CharPath) -> Option<PlayerId> {
        self.seating.get(path.seat).map(|p| p.id)
    }

    pub fn living_players(&self) -> impl Iterator<Item = PlayerId> + '_ {
        self.seating
            .iter()
            .filter(|p| !p.is_ghost)
            .map(|p| p.id)
    }

    pub fn living_count(&self) -> usize {
        self.seating.iter().filter(|p| !p.is_ghost).count()
    }

    /// The nearest living players to either side of `id`, wrapping around
    /// the circle. `None` when fewer than two other living players exist.
    pub fn living_neighbors(&self, id: PlayerId) -> Option<(PlayerId, PlayerId)> {
        let seat = self.seat_of(id)?;
        let seats = self.seating.len();
        let mut left = None;
        let mut right = None;
        for offset in 1..seats {
            if left.is_none() {
                let candidate = &self.seating[(seat + seats - offset) % seats];
                if !candidate.is_ghost && candidate.id != id {
                    left = Some(candidate.id);
                }
            }
            if right.is_none() {
                let candidate = &self.seating[(seat + offset) % seats];
                if !candidate.is_ghost && candidate.id != id {
                    right = Some(candidate.id);
                }
            }
        }
        Some((left?, right?))
    }

    pub fn day_number(&self) -> usize {
        self.days.len()
    }

    /// The most recent day, whether or not it has ended.
    pub fn current_day(&self) -> Option<&Day> {
        self.days.last()
    }

    pub fn current_day_mut(&mut self) -> Option<&mut Day> {
        self.days.last_mut()
    }

    /// Whether a day is currently open (dawn has broken, dusk has not fallen).
    pub fn is_day(&self) -> bool {
        self.days.last().map(|day| !day.ended).unwrap_or(false)
    }

    /// Collect the addresses of every active character node whose role
    /// implements the capability selected by `pred`, in seating order.
    /// With `living_only`, ghosts' characters are excluded entirely.
    pub fn hook_holders(
        &self,
        living_only: bool,
        pred: impl Fn(&'static dyn RoleHookSet) -> bool,
    ) -> Vec<CharPath> {
        let mut holders = Vec::new();
        for (seat, player) in self.seating.iter().enumerate() {
            if living_only && player.is_ghost {
                continue;
            }
            let mut trail = Vec::new();
            player.character.visit_active(&mut trail, &mut |trail, node| {
                if pred(hooks::for_role(node.role)) {
                    holders.push(CharPath {
                        seat,
                        trail: trail.to_vec(),
                    });
                }
            });
        }
        holders
    }

    pub fn record(&mut self, kind: GameEventKind) {
        self.log.push(GameEvent::new(kind));
    }
}

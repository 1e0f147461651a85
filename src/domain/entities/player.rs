//! Player entity - a seated participant (or an unseated storyteller)

use serde::{Deserialize, Serialize};

use crate::domain::characters::{Character, Role};
use crate::domain::value_objects::{Alignment, PlayerId};

/// A participant in the match.
///
/// A player owns exactly one live [`Character`]; role changes swap the whole
/// character out. Storytellers are players too, distinguished by having no
/// seat.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub id: PlayerId,
    pub name: String,
    pub character: Character,
    pub alignment: Alignment,
    /// Stable seating index; `None` for storytellers.
    pub seat: Option<usize>,
    pub is_ghost: bool,
    /// Single-use ghost voting tokens. Always 0 while living; set to exactly
    /// 1 the instant the player becomes a ghost. Abilities may add more.
    pub dead_votes: u32,
    pub can_nominate: bool,
    pub can_be_nominated: bool,

    // Per-day activity, reset at dawn
    pub has_nominated_today: bool,
    pub has_been_nominated_today: bool,
    pub has_checked_in: bool,
}

impl Player {
    pub fn new(name: impl Into<String>, character: Character, alignment: Alignment) -> Self {
        Self {
            id: PlayerId::new(),
            name: name.into(),
            character,
            alignment,
            seat: None,
            is_ghost: false,
            dead_votes: 0,
            can_nominate: true,
            can_be_nominated: true,
            has_nominated_today: false,
            has_been_nominated_today: false,
            has_checked_in: false,
        }
    }

    /// An unseated storyteller participant.
    pub fn storyteller(name: impl Into<String>) -> Self {
        Self::new(name, Character::new(Role::Storyteller), Alignment::Neutral)
    }

    pub fn is_traveler(&self) -> bool {
        self.character.role.is_traveler()
    }

    /// Convert to a ghost, granting the single dead vote. Idempotent: a
    /// player who is already a ghost keeps whatever tokens they have.
    pub fn make_ghost(&mut self) -> bool {
        if self.is_ghost {
            return false;
        }
        self.is_ghost = true;
        self.dead_votes = 1;
        true
    }

    /// Swap in a new role; the previous character is discarded.
    pub fn change_role(&mut self, role: Role) {
        self.character = Character::new(role);
    }

    pub fn reset_day_flags(&mut self) {
        self.has_nominated_today = false;
        self.has_been_nominated_today = false;
        self.has_checked_in = false;
    }
}

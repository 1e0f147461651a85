//! Alignment and team value objects

use serde::{Deserialize, Serialize};

/// Which side a player is currently on.
///
/// Alignment is a property of the player, not the character: abilities and
/// storyteller rulings can flip a player's alignment without changing their
/// role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Alignment {
    Good,
    Evil,
    /// Storytellers and undeclared travelers.
    Neutral,
}

impl Alignment {
    pub fn display_name(&self) -> &'static str {
        match self {
            Alignment::Good => "good",
            Alignment::Evil => "evil",
            Alignment::Neutral => "neutral",
        }
    }
}

/// The printed team of a character role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Team {
    Townsfolk,
    Outsider,
    Minion,
    Demon,
    Traveler,
    /// The storyteller pseudo-role only.
    Neutral,
}

impl Team {
    /// The alignment a player starts with when dealt a role of this team.
    pub fn starting_alignment(&self) -> Alignment {
        match self {
            Team::Townsfolk | Team::Outsider => Alignment::Good,
            Team::Minion | Team::Demon => Alignment::Evil,
            Team::Traveler | Team::Neutral => Alignment::Neutral,
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Team::Townsfolk => "Townsfolk",
            Team::Outsider => "Outsider",
            Team::Minion => "Minion",
            Team::Demon => "Demon",
            Team::Traveler => "Traveler",
            Team::Neutral => "Neutral",
        }
    }
}

//! Script value object - the set of roles enabled for a match

use serde::{Deserialize, Serialize};

use crate::domain::characters::Role;

/// How freely players may message each other during the day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WhisperMode {
    /// Anyone may whisper anyone.
    All,
    /// Players may only whisper their seated neighbors (and the storytellers).
    Neighbors,
    /// Players may only whisper the storytellers.
    StorytellersOnly,
}

impl Default for WhisperMode {
    fn default() -> Self {
        WhisperMode::All
    }
}

/// A named collection of roles the storytellers have enabled for this match.
///
/// The script constrains setup (which roles can be dealt) and role changes;
/// it does not constrain travelers, who may join from any script.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Script {
    pub name: String,
    pub roles: Vec<Role>,
}

impl Script {
    pub fn new(name: impl Into<String>, roles: Vec<Role>) -> Self {
        Self {
            name: name.into(),
            roles,
        }
    }

    pub fn contains(&self, role: Role) -> bool {
        self.roles.contains(&role)
    }

    /// The beginner script: 22 roles, one demon.
    pub fn trouble_brewing() -> Self {
        use Role::*;
        Self::new(
            "Trouble Brewing",
            vec![
                Washerwoman,
                Librarian,
                Investigator,
                Chef,
                Empath,
                FortuneTeller,
                Undertaker,
                Monk,
                Ravenkeeper,
                Virgin,
                Slayer,
                Soldier,
                Mayor,
                Butler,
                Drunk,
                Recluse,
                Saint,
                Poisoner,
                Spy,
                ScarletWoman,
                Baron,
                Imp,
            ],
        )
    }

    pub fn bad_moon_rising() -> Self {
        use Role::*;
        Self::new(
            "Bad Moon Rising",
            vec![
                Grandmother,
                Sailor,
                Chambermaid,
                Exorcist,
                Innkeeper,
                Gambler,
                Gossip,
                Courtier,
                Professor,
                Minstrel,
                TeaLady,
                Pacifist,
                Fool,
                Goon,
                Lunatic,
                Tinker,
                Moonchild,
                Godfather,
                DevilsAdvocate,
                Assassin,
                Mastermind,
                Zombuul,
                Pukka,
                Shabaloth,
                Po,
            ],
        )
    }

    pub fn sects_and_violets() -> Self {
        use Role::*;
        Self::new(
            "Sects & Violets",
            vec![
                Clockmaker,
                Dreamer,
                SnakeCharmer,
                Mathematician,
                Flowergirl,
                TownCrier,
                Oracle,
                Savant,
                Seamstress,
                Philosopher,
                Artist,
                Juggler,
                Sage,
                Mutant,
                Sweetheart,
                Barber,
                Klutz,
                EvilTwin,
                Witch,
                Cerenovus,
                PitHag,
                FangGu,
                Vigormortis,
                NoDashii,
                Vortox,
            ],
        )
    }

    /// Look a base script up by a forgiving name.
    pub fn from_name(name: &str) -> Option<Self> {
        match name
            .to_lowercase()
            .replace(&[' ', '-', '_', '&'][..], "")
            .as_str()
        {
            "troublebrewing" | "tb" => Some(Self::trouble_brewing()),
            "badmoonrising" | "bmr" => Some(Self::bad_moon_rising()),
            "sectsandviolets" | "sectsviolets" | "snv" | "sv" => Some(Self::sects_and_violets()),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_scripts_resolve_by_shorthand() {
        assert_eq!(Script::from_name("tb").unwrap().name, "Trouble Brewing");
        assert_eq!(
            Script::from_name("Bad Moon Rising").unwrap().name,
            "Bad Moon Rising"
        );
        assert_eq!(
            Script::from_name("sects_and_violets").unwrap().name,
            "Sects & Violets"
        );
        assert!(Script::from_name("ravenswood bluff").is_none());
    }

    #[test]
    fn test_trouble_brewing_has_one_demon() {
        let script = Script::trouble_brewing();
        let demons = script
            .roles
            .iter()
            .filter(|r| r.team() == crate::domain::value_objects::Team::Demon)
            .count();
        assert_eq!(demons, 1);
        assert_eq!(script.roles.len(), 22);
    }
}

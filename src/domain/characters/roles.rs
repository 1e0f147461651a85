//! The closed roster of character roles
//!
//! Every role a character can embody is a variant of [`Role`]. The roster is
//! generated by the `define_roles!` macro, which carries the printed name,
//! the team, and two static flags: whether the role copies other abilities
//! (`composite`) and whether it can grant an extra ballot per nomination
//! (`double_vote`). Rule-phase behavior lives in the hooks module, not here.

use serde::{Deserialize, Serialize};

use crate::domain::value_objects::Team;

macro_rules! define_roles {
    (
        $(
            $role:ident: $name:literal => {
                team: $team:ident
                $(, composite: $composite:literal)?
                $(, double_vote: $double_vote:literal)?
            }
        ),* $(,)?
    ) => {
        /// A character role identity.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub enum Role {
            $($role,)*
        }

        impl Role {
            /// The printed character name.
            pub const fn display_name(&self) -> &'static str {
                match self {
                    $(Role::$role => $name,)*
                }
            }

            pub const fn team(&self) -> Team {
                match self {
                    $(Role::$role => Team::$team,)*
                }
            }

            /// Whether this role holds copied abilities of other roles.
            pub const fn is_composite(&self) -> bool {
                match self {
                    $(Role::$role => define_roles!(@flag $($composite)?),)*
                }
            }

            /// Whether this role can ever be listed twice in a voter order.
            /// The hook set decides whether the extra ballot is currently
            /// active for a concrete character.
            pub const fn has_double_vote(&self) -> bool {
                match self {
                    $(Role::$role => define_roles!(@flag $($double_vote)?),)*
                }
            }

            pub const fn all() -> &'static [Role] {
                &[$(Role::$role,)*]
            }
        }
    };

    (@flag $value:literal) => { $value };
    (@flag) => { false };
}

define_roles! {
    // ------------------------------------------------------------------
    // Trouble Brewing
    // ------------------------------------------------------------------
    Washerwoman: "Washerwoman" => { team: Townsfolk },
    Librarian: "Librarian" => { team: Townsfolk },
    Investigator: "Investigator" => { team: Townsfolk },
    Chef: "Chef" => { team: Townsfolk },
    Empath: "Empath" => { team: Townsfolk },
    FortuneTeller: "Fortune Teller" => { team: Townsfolk },
    Undertaker: "Undertaker" => { team: Townsfolk },
    Monk: "Monk" => { team: Townsfolk },
    Ravenkeeper: "Ravenkeeper" => { team: Townsfolk },
    Virgin: "Virgin" => { team: Townsfolk },
    Slayer: "Slayer" => { team: Townsfolk },
    Soldier: "Soldier" => { team: Townsfolk },
    Mayor: "Mayor" => { team: Townsfolk },
    Butler: "Butler" => { team: Outsider },
    Drunk: "Drunk" => { team: Outsider },
    Recluse: "Recluse" => { team: Outsider },
    Saint: "Saint" => { team: Outsider },
    Poisoner: "Poisoner" => { team: Minion },
    Spy: "Spy" => { team: Minion },
    ScarletWoman: "Scarlet Woman" => { team: Minion },
    Baron: "Baron" => { team: Minion },
    Imp: "Imp" => { team: Demon },

    // ------------------------------------------------------------------
    // Bad Moon Rising
    // ------------------------------------------------------------------
    Grandmother: "Grandmother" => { team: Townsfolk },
    Sailor: "Sailor" => { team: Townsfolk },
    Chambermaid: "Chambermaid" => { team: Townsfolk },
    Exorcist: "Exorcist" => { team: Townsfolk },
    Innkeeper: "Innkeeper" => { team: Townsfolk },
    Gambler: "Gambler" => { team: Townsfolk },
    Gossip: "Gossip" => { team: Townsfolk },
    Courtier: "Courtier" => { team: Townsfolk },
    Professor: "Professor" => { team: Townsfolk },
    Minstrel: "Minstrel" => { team: Townsfolk },
    TeaLady: "Tea Lady" => { team: Townsfolk },
    Pacifist: "Pacifist" => { team: Townsfolk },
    Fool: "Fool" => { team: Townsfolk },
    Goon: "Goon" => { team: Outsider },
    Lunatic: "Lunatic" => { team: Outsider },
    Tinker: "Tinker" => { team: Outsider },
    Moonchild: "Moonchild" => { team: Outsider },
    Godfather: "Godfather" => { team: Minion },
    DevilsAdvocate: "Devil's Advocate" => { team: Minion },
    Assassin: "Assassin" => { team: Minion },
    Mastermind: "Mastermind" => { team: Minion },
    Zombuul: "Zombuul" => { team: Demon },
    Pukka: "Pukka" => { team: Demon },
    Shabaloth: "Shabaloth" => { team: Demon },
    Po: "Po" => { team: Demon },

    // ------------------------------------------------------------------
    // Sects & Violets
    // ------------------------------------------------------------------
    Clockmaker: "Clockmaker" => { team: Townsfolk },
    Dreamer: "Dreamer" => { team: Townsfolk },
    SnakeCharmer: "Snake Charmer" => { team: Townsfolk },
    Mathematician: "Mathematician" => { team: Townsfolk },
    Flowergirl: "Flowergirl" => { team: Townsfolk },
    TownCrier: "Town Crier" => { team: Townsfolk },
    Oracle: "Oracle" => { team: Townsfolk },
    Savant: "Savant" => { team: Townsfolk },
    Seamstress: "Seamstress" => { team: Townsfolk },
    Philosopher: "Philosopher" => { team: Townsfolk, composite: true },
    Artist: "Artist" => { team: Townsfolk },
    Juggler: "Juggler" => { team: Townsfolk },
    Sage: "Sage" => { team: Townsfolk },
    Mutant: "Mutant" => { team: Outsider },
    Sweetheart: "Sweetheart" => { team: Outsider },
    Barber: "Barber" => { team: Outsider },
    Klutz: "Klutz" => { team: Outsider },
    EvilTwin: "Evil Twin" => { team: Minion },
    Witch: "Witch" => { team: Minion },
    Cerenovus: "Cerenovus" => { team: Minion },
    PitHag: "Pit-Hag" => { team: Minion },
    FangGu: "Fang Gu" => { team: Demon },
    Vigormortis: "Vigormortis" => { team: Demon },
    NoDashii: "No Dashii" => { team: Demon },
    Vortox: "Vortox" => { team: Demon },

    // ------------------------------------------------------------------
    // Experimental townsfolk
    // ------------------------------------------------------------------
    Alchemist: "Alchemist" => { team: Townsfolk, composite: true },
    Amnesiac: "Amnesiac" => { team: Townsfolk },
    Atheist: "Atheist" => { team: Townsfolk },
    Balloonist: "Balloonist" => { team: Townsfolk },
    Banshee: "Banshee" => { team: Townsfolk, double_vote: true },
    BountyHunter: "Bounty Hunter" => { team: Townsfolk },
    Cannibal: "Cannibal" => { team: Townsfolk, composite: true },
    Choirboy: "Choirboy" => { team: Townsfolk },
    CultLeader: "Cult Leader" => { team: Townsfolk },
    Engineer: "Engineer" => { team: Townsfolk },
    Farmer: "Farmer" => { team: Townsfolk },
    Fisherman: "Fisherman" => { team: Townsfolk },
    General: "General" => { team: Townsfolk },
    HighPriestess: "High Priestess" => { team: Townsfolk },
    Huntsman: "Huntsman" => { team: Townsfolk },
    King: "King" => { team: Townsfolk },
    Knight: "Knight" => { team: Townsfolk },
    Lycanthrope: "Lycanthrope" => { team: Townsfolk },
    Magician: "Magician" => { team: Townsfolk },
    Nightwatchman: "Nightwatchman" => { team: Townsfolk },
    Noble: "Noble" => { team: Townsfolk },
    Pixie: "Pixie" => { team: Townsfolk },
    PoppyGrower: "Poppy Grower" => { team: Townsfolk },
    Preacher: "Preacher" => { team: Townsfolk },
    Shugenja: "Shugenja" => { team: Townsfolk },
    Steward: "Steward" => { team: Townsfolk },
    VillageIdiot: "Village Idiot" => { team: Townsfolk },

    // ------------------------------------------------------------------
    // Experimental outsiders
    // ------------------------------------------------------------------
    Acrobat: "Acrobat" => { team: Outsider },
    Damsel: "Damsel" => { team: Outsider },
    Golem: "Golem" => { team: Outsider },
    Hatter: "Hatter" => { team: Outsider },
    Heretic: "Heretic" => { team: Outsider },
    Ogre: "Ogre" => { team: Outsider },
    PlagueDoctor: "Plague Doctor" => { team: Outsider },
    Politician: "Politician" => { team: Outsider },
    Puzzlemaster: "Puzzlemaster" => { team: Outsider },
    Snitch: "Snitch" => { team: Outsider },
    Zealot: "Zealot" => { team: Outsider },

    // ------------------------------------------------------------------
    // Experimental minions
    // ------------------------------------------------------------------
    Boffin: "Boffin" => { team: Minion },
    Boomdandy: "Boomdandy" => { team: Minion },
    Fearmonger: "Fearmonger" => { team: Minion },
    Goblin: "Goblin" => { team: Minion },
    Harpy: "Harpy" => { team: Minion },
    Marionette: "Marionette" => { team: Minion },
    Mezepheles: "Mezepheles" => { team: Minion },
    OrganGrinder: "Organ Grinder" => { team: Minion },
    Psychopath: "Psychopath" => { team: Minion },
    Summoner: "Summoner" => { team: Minion },
    Vizier: "Vizier" => { team: Minion },
    Widow: "Widow" => { team: Minion },
    Wizard: "Wizard" => { team: Minion },
    Xaan: "Xaan" => { team: Minion },

    // ------------------------------------------------------------------
    // Experimental demons
    // ------------------------------------------------------------------
    AlHadikhia: "Al-Hadikhia" => { team: Demon },
    Kazali: "Kazali" => { team: Demon },
    Legion: "Legion" => { team: Demon },
    Leviathan: "Leviathan" => { team: Demon },
    LilMonsta: "Lil' Monsta" => { team: Demon },
    Lleech: "Lleech" => { team: Demon },
    LordOfTyphon: "Lord of Typhon" => { team: Demon },
    Ojo: "Ojo" => { team: Demon },
    Riot: "Riot" => { team: Demon },
    Yaggababble: "Yaggababble" => { team: Demon },

    // ------------------------------------------------------------------
    // Travelers
    // ------------------------------------------------------------------
    Apprentice: "Apprentice" => { team: Traveler, composite: true },
    Barista: "Barista" => { team: Traveler },
    Beggar: "Beggar" => { team: Traveler },
    Bishop: "Bishop" => { team: Traveler },
    BoneCollector: "Bone Collector" => { team: Traveler },
    Bureaucrat: "Bureaucrat" => { team: Traveler },
    Butcher: "Butcher" => { team: Traveler },
    Deviant: "Deviant" => { team: Traveler },
    Gangster: "Gangster" => { team: Traveler },
    Gunslinger: "Gunslinger" => { team: Traveler },
    Harlot: "Harlot" => { team: Traveler },
    Judge: "Judge" => { team: Traveler },
    Matron: "Matron" => { team: Traveler },
    Scapegoat: "Scapegoat" => { team: Traveler },
    Thief: "Thief" => { team: Traveler },
    Voudon: "Voudon" => { team: Traveler },

    // ------------------------------------------------------------------
    // Moderation
    // ------------------------------------------------------------------
    Storyteller: "Storyteller" => { team: Neutral },
}

impl Role {
    pub fn is_traveler(&self) -> bool {
        self.team() == Team::Traveler
    }

    pub fn is_demon(&self) -> bool {
        self.team() == Team::Demon
    }
}

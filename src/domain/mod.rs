//! Domain layer - Core rule logic
//!
//! This layer contains:
//! - Entities: Game, Day, Vote, Player
//! - Characters: the role roster, the character tree, capability hooks
//! - Value Objects: ids, alignment, script, whisper mode
//! - Domain Events: the append-only match record

pub mod characters;
pub mod entities;
pub mod events;
pub mod value_objects;

//! Domain events - notifications of state changes within the match

pub mod game_events;

pub use game_events::{EventMetadata, GameEvent, GameEventKind};

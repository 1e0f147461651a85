//! Value objects - Immutable objects defined by their attributes

mod alignment;
mod ids;
mod script;

pub use alignment::{Alignment, Team};
pub use ids::{AnnouncementId, EventId, GameId, PlayerId};
pub use script::{Script, WhisperMode};

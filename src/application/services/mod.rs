//! Application services - the engine's rule phases as use cases

pub mod character_service;
pub mod day_service;
pub mod death_service;
pub mod nomination_service;
pub mod seating_service;
pub mod setup_service;
pub mod traveler_service;
pub mod vote_service;

pub use character_service::{CharacterService, CharacterServiceError};
pub use day_service::{DayError, DayService};
pub use death_service::{DeathError, DeathService};
pub use nomination_service::{NominationError, NominationService};
pub use seating_service::SeatingService;
pub use setup_service::{RoleDistribution, SetupError, SetupService};
pub use traveler_service::{TravelerError, TravelerService};
pub use vote_service::{VoteError, VoteService};

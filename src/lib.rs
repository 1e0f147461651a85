//! Grimoire Engine - a rule engine for social deduction matches
//!
//! The engine runs the clockwork of a Blood on the Clocktower-style match:
//! the day/night cycle, nominations and weighted votes, death resolution,
//! and the character abilities that bend each of those phases. It is
//! transport-agnostic: humans are reached only through the outbound ports
//! in [`application::ports`].
//!
//! Layering follows hexagonal architecture:
//! - [`domain`]: the game graph (game, days, votes, players, characters)
//!   and the capability hooks roles use to interject in rule phases
//! - [`application`]: the rule phases themselves as services, plus the
//!   ports they need from the outside world
//! - [`infrastructure`]: concrete adapters (in-memory store, scripted and
//!   timed inputs, the role registry)

pub mod application;
pub mod domain;
pub mod infrastructure;

//! Outbound ports - Interfaces the rule engine requires from external systems

mod actor_input_port;
mod announcement_port;
mod game_store_port;
mod role_lookup_port;

pub use actor_input_port::{ActorInputPort, ActorRef};
pub use announcement_port::{AnnouncementHandle, AnnouncementPort, Audience};
pub use game_store_port::GameStorePort;
pub use role_lookup_port::RoleLookupPort;

//! Infrastructure layer - concrete adapters behind the outbound ports

pub mod config;
pub mod memory_store;
pub mod recording_announcer;
pub mod role_registry;
pub mod scripted_input;
pub mod timed_input;

pub use config::AppConfig;
pub use memory_store::MemoryGameStore;
pub use recording_announcer::RecordingAnnouncer;
pub use role_registry::RoleRegistry;
pub use scripted_input::ScriptedInput;
pub use timed_input::TimedInput;

//! Announcement port - publishing rule outcomes
//!
//! The engine does not know how announcements are displayed; it only keeps
//! the returned handle so a later retraction or amendment can reference it.

use async_trait::async_trait;

use crate::domain::value_objects::{AnnouncementId, PlayerId};

use super::ActorRef;

/// Where an announcement lands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Audience {
    /// Everyone in the match.
    Town,
    Player(PlayerId),
    Storytellers,
}

impl From<ActorRef> for Audience {
    fn from(actor: ActorRef) -> Self {
        match actor {
            ActorRef::Player(id) => Audience::Player(id),
            ActorRef::Storytellers => Audience::Storytellers,
        }
    }
}

/// Opaque reference to a delivered announcement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnnouncementHandle(pub AnnouncementId);

/// Port for publishing text to an audience.
#[async_trait]
pub trait AnnouncementPort: Send + Sync {
    async fn announce(&self, audience: Audience, text: &str)
        -> anyhow::Result<AnnouncementHandle>;
}

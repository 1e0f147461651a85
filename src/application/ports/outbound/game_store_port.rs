//! Game store port - opaque save/restore of the whole match graph

use async_trait::async_trait;

use crate::domain::entities::Game;

/// Port for persisting a match, keyed by a single slot name.
///
/// The engine defines no wire format; it only requires that saving and
/// restoring round-trips to an equivalent game: the restored match must
/// produce identical outcomes for the same sequence of subsequent actions.
#[async_trait]
pub trait GameStorePort: Send + Sync {
    async fn save(&self, slot: &str, game: &Game) -> anyhow::Result<()>;

    async fn load(&self, slot: &str) -> anyhow::Result<Option<Game>>;

    async fn delete(&self, slot: &str) -> anyhow::Result<()>;
}

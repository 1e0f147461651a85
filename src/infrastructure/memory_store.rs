//! In-memory game store
//!
//! Serializes the whole game graph to JSON per save slot. The round trip
//! through serde is the same one any durable store would take, so the
//! restore-equivalence guarantee is exercised even in memory.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::application::ports::outbound::GameStorePort;
use crate::domain::entities::Game;

/// Game store over an in-process map of save slots.
pub struct MemoryGameStore {
    slots: Mutex<HashMap<String, serde_json::Value>>,
}

impl MemoryGameStore {
    pub fn new() -> Self {
        Self {
            slots: Mutex::new(HashMap::new()),
        }
    }
}

impl Default for MemoryGameStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl GameStorePort for MemoryGameStore {
    async fn save(&self, slot: &str, game: &Game) -> anyhow::Result<()> {
        let snapshot = serde_json::to_value(game)?;
        let mut slots = self
            .slots
            .lock()
            .map_err(|_| anyhow::anyhow!("game store lock poisoned"))?;
        slots.insert(slot.to_string(), snapshot);
        tracing::debug!(slot, "game saved");
        Ok(())
    }

    async fn load(&self, slot: &str) -> anyhow::Result<Option<Game>> {
        let snapshot = {
            let slots = self
                .slots
                .lock()
                .map_err(|_| anyhow::anyhow!("game store lock poisoned"))?;
            slots.get(slot).cloned()
        };
        match snapshot {
            Some(value) => Ok(Some(serde_json::from_value(value)?)),
            None => Ok(None),
        }
    }

    async fn delete(&self, slot: &str) -> anyhow::Result<()> {
        let mut slots = self
            .slots
            .lock()
            .map_err(|_| anyhow::anyhow!("game store lock poisoned"))?;
        slots.remove(slot);
        Ok(())
    }
}

//! Shared application state: the in-memory save slots.

use std::collections::HashMap;

use tokio::sync::RwLock;

use crate::game::state::GameState;

/// Slot used when a request carries no (or an empty) `userId`.
pub const DEFAULT_USER_ID: &str = "default";

/// One stored save.
#[derive(Debug, Clone, PartialEq)]
pub struct SavedGame {
    pub state: GameState,
    /// Epoch millis when the save was accepted.
    pub saved_at: i64,
}

/// Process-local save storage. Nothing survives a restart.
#[derive(Debug, Default)]
pub struct AppState {
    saves: RwLock<HashMap<String, SavedGame>>,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store `state` for `user_id`, replacing any previous save.
    pub async fn save(&self, user_id: &str, state: GameState, saved_at: i64) {
        let mut saves = self.saves.write().await;
        saves.insert(user_id.to_owned(), SavedGame { state, saved_at });
    }

    pub async fn load(&self, user_id: &str) -> Option<SavedGame> {
        self.saves.read().await.get(user_id).cloned()
    }

    pub async fn len(&self) -> usize {
        self.saves.read().await.len()
    }
}

/// Normalize an optional client-supplied user id to a slot key.
pub fn slot_key(user_id: Option<&str>) -> &str {
    match user_id {
        Some(id) if !id.is_empty() => id,
        _ => DEFAULT_USER_ID,
    }
}

//! Tournament snapshot persistence.

use super::models::TournamentState;
use crate::store::{KeyValueStore, StoreError, StoreResult};
use log::warn;
use std::sync::Arc;

/// Key the in-progress tournament is saved under
pub const SNAPSHOT_KEY: &str = "bags_tournament_state";

/// Saves and restores [`TournamentState`] so a tournament survives restarts
#[derive(Clone)]
pub struct TournamentSnapshots {
    store: Arc<dyn KeyValueStore>,
    key: String,
}

impl TournamentSnapshots {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self::with_key(store, SNAPSHOT_KEY)
    }

    pub fn with_key(store: Arc<dyn KeyValueStore>, key: impl Into<String>) -> Self {
        Self {
            store,
            key: key.into(),
        }
    }

    /// Persist the state as JSON
    pub fn save(&self, state: &TournamentState) -> StoreResult<()> {
        let json = serde_json::to_string(state).map_err(StoreError::Serialization)?;
        self.store.set(&self.key, &json)
    }

    /// Last saved state
    ///
    /// A snapshot that no longer parses, or whose bracket could not have
    /// come from the engine, is discarded with a warning and reported as
    /// absent.
    pub fn load(&self) -> StoreResult<Option<TournamentState>> {
        let Some(json) = self.store.get(&self.key)? else {
            return Ok(None);
        };
        match serde_json::from_str::<TournamentState>(&json) {
            Ok(state) if state.is_consistent() => Ok(Some(state)),
            Ok(_) => {
                warn!("Discarding inconsistent tournament snapshot");
                Ok(None)
            }
            Err(e) => {
                warn!("Discarding unreadable tournament snapshot: {}", e);
                Ok(None)
            }
        }
    }

    pub fn clear(&self) -> StoreResult<()> {
        self.store.remove(&self.key)
    }
}

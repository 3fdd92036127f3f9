//! In-memory journal. Volatile; lives as long as the process.

use std::sync::RwLock;

use spincycle_core::AgentId;
use spincycle_events::GameEvent;

use crate::journal::{Journal, JournalError};

/// Append-only journal held in a single vector behind one lock.
///
/// A global lock is acceptable here: appends are short and the engine
/// already serializes work per agent.
#[derive(Debug, Default)]
pub struct InMemoryJournal {
    events: RwLock<Vec<GameEvent>>,
}

impl InMemoryJournal {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Journal for InMemoryJournal {
    fn append_batch(&self, events: &[GameEvent]) -> Result<u64, JournalError> {
        let mut log = self
            .events
            .write()
            .map_err(|_| JournalError::Storage("lock poisoned".to_string()))?;
        let first = log.len() as u64;
        log.extend_from_slice(events);
        Ok(first)
    }

    fn load_all(&self) -> Result<Vec<GameEvent>, JournalError> {
        let log = self
            .events
            .read()
            .map_err(|_| JournalError::Storage("lock poisoned".to_string()))?;
        Ok(log.clone())
    }

    fn load_for_agent(&self, agent_id: &AgentId) -> Result<Vec<GameEvent>, JournalError> {
        let log = self
            .events
            .read()
            .map_err(|_| JournalError::Storage("lock poisoned".to_string()))?;
        Ok(log
            .iter()
            .filter(|e| e.agent_id == *agent_id)
            .cloned()
            .collect())
    }
}

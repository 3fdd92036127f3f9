//! Append-only event journal backends.
//!
//! The journal is the sole source of truth and the synchronization
//! point between agents: append establishes the total order per agent.
//! Two backends are supported: a volatile in-memory journal for tests
//! and hosts that manage their own persistence, and a line-delimited
//! JSON file journal with crash recovery.

pub mod file;
pub mod in_memory;
pub mod journal;

pub use file::FileJournal;
pub use in_memory::InMemoryJournal;
pub use journal::{Journal, JournalError};

#[cfg(test)]
pub(crate) mod testing {
    use chrono::Utc;
    use spincycle_core::AgentId;
    use spincycle_events::{EventPayload, GameEvent};
    use uuid::Uuid;

    /// A minimal stamped event for journal tests; `week` doubles as a
    /// marker for ordering assertions.
    pub fn event_for(agent: &str, week: u32) -> GameEvent {
        GameEvent {
            event_id: Uuid::now_v7(),
            agent_id: AgentId::new(agent),
            week,
            day: 0,
            timestamp: Utc::now(),
            payload: EventPayload::TimeAdvanced,
        }
    }
}

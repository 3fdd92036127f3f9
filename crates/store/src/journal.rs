//! Journal contract: ordered, append-only, per-agent queryable.

use std::sync::Arc;

use spincycle_core::AgentId;
use spincycle_events::GameEvent;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum JournalError {
    /// The backing store failed. Fatal to the operation; the engine must
    /// not report success after seeing this.
    #[error("storage failure: {0}")]
    Storage(String),

    /// A stored record could not be encoded or decoded.
    #[error("serialization failure: {0}")]
    Serialization(String),
}

/// Append-only ordered journal of [`GameEvent`]s.
///
/// Implementations must:
/// - assign monotonically increasing sequence positions, starting at 0
/// - make `append_batch` all-or-nothing: on error, none of the batch is
///   observable through any load operation
/// - support concurrent appenders; interior locking serializes writes
///
/// No deletion, no mutation, no filtering-as-policy.
pub trait Journal: Send + Sync {
    /// Append a batch of events contiguously. Returns the sequence
    /// position of the first event appended.
    fn append_batch(&self, events: &[GameEvent]) -> Result<u64, JournalError>;

    /// Every event ever appended, in order.
    fn load_all(&self) -> Result<Vec<GameEvent>, JournalError>;

    /// The ordered subsequence belonging to one agent's stream.
    fn load_for_agent(&self, agent_id: &AgentId) -> Result<Vec<GameEvent>, JournalError>;

    /// The last `n` events of one agent's stream, in order.
    fn tail(&self, agent_id: &AgentId, n: usize) -> Result<Vec<GameEvent>, JournalError> {
        let mut events = self.load_for_agent(agent_id)?;
        let keep_from = events.len().saturating_sub(n);
        Ok(events.split_off(keep_from))
    }

    /// Append a single event. Returns its sequence position.
    fn append(&self, event: GameEvent) -> Result<u64, JournalError> {
        self.append_batch(std::slice::from_ref(&event))
    }
}

impl<J> Journal for Arc<J>
where
    J: Journal + ?Sized,
{
    fn append_batch(&self, events: &[GameEvent]) -> Result<u64, JournalError> {
        (**self).append_batch(events)
    }

    fn load_all(&self) -> Result<Vec<GameEvent>, JournalError> {
        (**self).load_all()
    }

    fn load_for_agent(&self, agent_id: &AgentId) -> Result<Vec<GameEvent>, JournalError> {
        (**self).load_for_agent(agent_id)
    }

    fn tail(&self, agent_id: &AgentId, n: usize) -> Result<Vec<GameEvent>, JournalError> {
        (**self).tail(agent_id, n)
    }
}

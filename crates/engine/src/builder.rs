//! State builder: fold an ordered event stream into a snapshot.

use spincycle_core::{AgentId, Calendar, FoldError};
use spincycle_domain::AgentState;
use spincycle_events::GameEvent;

use crate::registry::ReducerRegistry;

/// Folds per-agent event streams with the registered reducers.
///
/// Folding is pure: no I/O happens here, and the same stream always
/// produces the same snapshot. Callers own the returned state.
#[derive(Debug)]
pub struct StateBuilder<'a> {
    reducers: &'a ReducerRegistry,
}

impl<'a> StateBuilder<'a> {
    pub fn new(reducers: &'a ReducerRegistry) -> Self {
        Self { reducers }
    }

    /// Fold a full stream into the current state.
    pub fn fold(&self, agent_id: &AgentId, events: &[GameEvent]) -> Result<AgentState, FoldError> {
        self.fold_until(agent_id, events, None)
    }

    /// Fold a stream up to and including an optional (week, day) bound,
    /// for point-in-time reconstruction.
    pub fn fold_until(
        &self,
        agent_id: &AgentId,
        events: &[GameEvent],
        bound: Option<Calendar>,
    ) -> Result<AgentState, FoldError> {
        let mut state = AgentState::zero(agent_id.clone());
        for event in events {
            if let Some(bound) = bound {
                if Calendar::new(event.week, event.day) > bound {
                    break;
                }
            }
            state = self.reducers.reduce(state, event)?;
        }
        Ok(state)
    }

    /// Apply freshly appended events to an already folded snapshot.
    pub fn apply(
        &self,
        mut state: AgentState,
        events: &[GameEvent],
    ) -> Result<AgentState, FoldError> {
        for event in events {
            state = self.reducers.reduce(state, event)?;
        }
        Ok(state)
    }
}

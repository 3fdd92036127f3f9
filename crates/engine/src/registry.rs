//! Registries mapping command kinds to handlers and event kinds to
//! reducers.
//!
//! Dispatch is open/closed: adding a kind means registering a handler
//! and a reducer, nothing else. The registries never inspect state or
//! payloads beyond routing on the kind tag.

use std::collections::HashMap;

use spincycle_core::{CommandError, FoldError};
use spincycle_domain::AgentState;
use spincycle_events::{Command, EventDraft, GameEvent};

use crate::context::CommandContext;

/// Validates a command against a snapshot and emits event drafts.
///
/// Handlers are pure: same state + same command + same (seeded) context
/// produce the same drafts. On any failure they return a typed error and
/// emit nothing.
pub trait CommandHandler: Send + Sync {
    fn handle(
        &self,
        state: &AgentState,
        command: &Command,
        ctx: &mut CommandContext,
    ) -> Result<Vec<EventDraft>, CommandError>;
}

impl<F> CommandHandler for F
where
    F: Fn(&AgentState, &Command, &mut CommandContext) -> Result<Vec<EventDraft>, CommandError>
        + Send
        + Sync,
{
    fn handle(
        &self,
        state: &AgentState,
        command: &Command,
        ctx: &mut CommandContext,
    ) -> Result<Vec<EventDraft>, CommandError> {
        self(state, command, ctx)
    }
}

/// Applies one event kind's declared fact to a state snapshot.
///
/// Reducers contain no game rules: clamping is mechanical, thresholds
/// and deltas arrive on the event.
pub trait Reducer: Send + Sync {
    fn apply(&self, state: AgentState, event: &GameEvent) -> Result<AgentState, FoldError>;
}

impl<F> Reducer for F
where
    F: Fn(AgentState, &GameEvent) -> Result<AgentState, FoldError> + Send + Sync,
{
    fn apply(&self, state: AgentState, event: &GameEvent) -> Result<AgentState, FoldError> {
        self(state, event)
    }
}

/// Command-kind → handler registry. At most one handler per kind;
/// re-registering a kind replaces the previous handler.
#[derive(Default)]
pub struct CommandRegistry {
    handlers: HashMap<String, Box<dyn CommandHandler>>,
}

impl CommandRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, kind: impl Into<String>, handler: impl CommandHandler + 'static) {
        self.handlers.insert(kind.into(), Box::new(handler));
    }

    pub fn get(&self, kind: &str) -> Option<&dyn CommandHandler> {
        self.handlers.get(kind).map(Box::as_ref)
    }

    pub fn registered_kinds(&self) -> impl Iterator<Item = &str> {
        self.handlers.keys().map(String::as_str)
    }
}

impl core::fmt::Debug for CommandRegistry {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("CommandRegistry")
            .field("kinds", &self.handlers.len())
            .finish()
    }
}

/// Event-kind → reducer registry. A missing reducer during a fold is an
/// invariant violation, never a per-caller error.
#[derive(Default)]
pub struct ReducerRegistry {
    reducers: HashMap<String, Box<dyn Reducer>>,
}

impl ReducerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, kind: impl Into<String>, reducer: impl Reducer + 'static) {
        self.reducers.insert(kind.into(), Box::new(reducer));
    }

    pub fn contains(&self, kind: &str) -> bool {
        self.reducers.contains_key(kind)
    }

    /// Apply the registered reducer for this event's kind.
    pub fn reduce(&self, state: AgentState, event: &GameEvent) -> Result<AgentState, FoldError> {
        let kind = event.kind();
        let reducer = self
            .reducers
            .get(kind)
            .ok_or_else(|| FoldError::MissingReducer(kind.to_string()))?;
        reducer.apply(state, event)
    }
}

impl core::fmt::Debug for ReducerRegistry {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ReducerRegistry")
            .field("kinds", &self.reducers.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use spincycle_core::AgentId;
    use spincycle_events::EventPayload;
    use uuid::Uuid;

    fn time_advanced(agent: &str) -> GameEvent {
        GameEvent {
            event_id: Uuid::now_v7(),
            agent_id: AgentId::new(agent),
            week: 0,
            day: 0,
            timestamp: Utc::now(),
            payload: EventPayload::TimeAdvanced,
        }
    }

    #[test]
    fn missing_reducer_is_a_fold_error() {
        let registry = ReducerRegistry::new();
        let err = registry
            .reduce(AgentState::zero(AgentId::new("A")), &time_advanced("A"))
            .unwrap_err();
        assert!(matches!(err, FoldError::MissingReducer(kind) if kind == "time.advanced"));
    }

    #[test]
    fn registered_reducer_is_dispatched_by_kind() {
        let mut registry = ReducerRegistry::new();
        registry.register(
            "time.advanced",
            |mut state: AgentState, _e: &GameEvent| -> Result<AgentState, FoldError> {
                state.calendar = state.calendar.next_day();
                Ok(state)
            },
        );
        let state = registry
            .reduce(AgentState::zero(AgentId::new("A")), &time_advanced("A"))
            .unwrap();
        assert_eq!(state.calendar.day, 1);
    }

    #[test]
    fn reregistering_a_kind_replaces_the_handler() {
        let reject = |msg: &'static str| {
            move |_: &AgentState,
                  _: &Command,
                  _: &mut CommandContext|
                  -> Result<Vec<EventDraft>, CommandError> {
                Err(CommandError::invalid(msg))
            }
        };
        let mut registry = CommandRegistry::new();
        registry.register("SET_PRICE", reject("first"));
        registry.register("SET_PRICE", reject("second"));
        assert_eq!(registry.registered_kinds().count(), 1);
    }
}

//! The engine: the synchronous surface hosts embed.
//!
//! Per-agent timelines are serialized behind a lock map; the journal
//! append is the commit point. Regulator consequences are appended
//! inside the same critical section as their trigger, so a caller never
//! observes a triggering event without its consequences.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Instant;

use spincycle_core::{AgentId, Calendar, CommandError, FoldError};
use spincycle_domain::AgentState;
use spincycle_events::{Command, EventDraft, GameEvent};
use spincycle_store::{Journal, JournalError};
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::bootstrap;
use crate::builder::StateBuilder;
use crate::context::{stamp_event, CommandContext, IdSource};
use crate::game_master::GameMaster;
use crate::handlers;
use crate::reducers;
use crate::registry::{CommandHandler, CommandRegistry, Reducer, ReducerRegistry};
use crate::regulator::{Regulator, SnapshotSource};
use crate::ticker;

/// Events the regulator scans backwards for windowed checks.
const REGULATOR_WINDOW: usize = 256;

#[derive(Debug, Error)]
pub enum EngineError {
    /// No handler registered for the submitted kind.
    #[error("unknown command kind '{0}'")]
    UnknownCommand(String),

    /// Handler-rejected command; nothing was written.
    #[error(transparent)]
    Validation(#[from] CommandError),

    /// Journal failure. The operation did not complete.
    #[error(transparent)]
    Storage(#[from] JournalError),

    /// Fatal fold fault: broken registry or corrupted stream.
    #[error(transparent)]
    Fold(#[from] FoldError),

    /// Deadline passed before the first event was appended.
    #[error("deadline exceeded before commit")]
    DeadlineExceeded,

    /// Internal lock poisoned by a panicking thread.
    #[error("engine lock poisoned")]
    LockPoisoned,
}

impl EngineError {
    /// Terse machine-readable kind for the caller's result tuple.
    pub fn kind(&self) -> String {
        match self {
            EngineError::UnknownCommand(_) => "unknown_command".to_string(),
            EngineError::Validation(e) => e.kind().to_string(),
            EngineError::Storage(_) => "storage_error".to_string(),
            EngineError::Fold(_) => "invariant_violation".to_string(),
            EngineError::DeadlineExceeded => "deadline_exceeded".to_string(),
            EngineError::LockPoisoned => "invariant_violation".to_string(),
        }
    }
}

/// Everything appended on behalf of one accepted command.
#[derive(Debug, Clone)]
pub struct CommandOutcome {
    pub events: Vec<GameEvent>,
}

/// Flat result form for hosts that want (ok, events, kind, message).
#[derive(Debug, Clone)]
pub struct CommandReport {
    pub ok: bool,
    pub events: Vec<GameEvent>,
    pub error_kind: Option<String>,
    pub message: Option<String>,
}

pub struct Engine<J: Journal> {
    journal: J,
    commands: CommandRegistry,
    reducers: ReducerRegistry,
    game_master: GameMaster,
    regulator: Regulator,
    agent_locks: Mutex<HashMap<AgentId, Arc<Mutex<()>>>>,
}

impl<J: Journal> Engine<J> {
    /// Build an engine over a journal backend with the full default
    /// handler and reducer catalogs registered.
    pub fn new(journal: J) -> Self {
        let mut commands = CommandRegistry::new();
        handlers::register_defaults(&mut commands);
        let mut reducer_registry = ReducerRegistry::new();
        reducers::register_defaults(&mut reducer_registry);
        Self {
            journal,
            commands,
            reducers: reducer_registry,
            game_master: GameMaster::new(),
            regulator: Regulator::new(),
            agent_locks: Mutex::new(HashMap::new()),
        }
    }

    /// Build an engine over explicit registries. Hosts that want full
    /// control of the catalogs start here and register kinds one by one.
    pub fn with_registries(
        journal: J,
        commands: CommandRegistry,
        reducers: ReducerRegistry,
    ) -> Self {
        Self {
            journal,
            commands,
            reducers,
            game_master: GameMaster::new(),
            regulator: Regulator::new(),
            agent_locks: Mutex::new(HashMap::new()),
        }
    }

    /// Register (or replace) a command handler. Adding a new kind needs
    /// nothing beyond this and a reducer for any new event kinds.
    pub fn register_command_handler(
        &mut self,
        kind: impl Into<String>,
        handler: impl CommandHandler + 'static,
    ) {
        self.commands.register(kind, handler);
    }

    /// Register (or replace) a reducer for an event kind.
    pub fn register_reducer(&mut self, kind: impl Into<String>, reducer: impl Reducer + 'static) {
        self.reducers.register(kind, reducer);
    }

    /// Create an agent with the standard starting package.
    pub fn create_agent(
        &self,
        agent_id: &AgentId,
        name: &str,
    ) -> Result<Vec<GameEvent>, EngineError> {
        let lock = self.agent_lock(agent_id)?;
        let _guard = lock.lock().map_err(|_| EngineError::LockPoisoned)?;

        if !self.journal.load_for_agent(agent_id)?.is_empty() {
            return Err(CommandError::invalid(format!("agent {agent_id} already exists")).into());
        }

        let mut ids = IdSource::seeded(agent_id, Calendar::default(), 0);
        let events: Vec<GameEvent> = bootstrap::seed_drafts(agent_id, name, &mut ids)
            .into_iter()
            .map(|d| stamp_event(&d.stream, Calendar::default(), d.payload))
            .collect();
        self.journal.append_batch(&events)?;
        info!(agent = %agent_id, events = events.len(), "agent created");
        Ok(events)
    }

    /// Execute a command with no deadline.
    pub fn execute_command(&self, command: Command) -> Result<CommandOutcome, EngineError> {
        self.execute_command_before(command, None)
    }

    /// Execute a command, abandoning it (with nothing written) if the
    /// deadline passes before the first append. Once the first event is
    /// committed the operation runs to completion.
    pub fn execute_command_before(
        &self,
        command: Command,
        deadline: Option<Instant>,
    ) -> Result<CommandOutcome, EngineError> {
        let agent_id = command.agent_id.clone();
        check_deadline(deadline)?;

        let lock = self.agent_lock(&agent_id)?;
        let _guard = lock.lock().map_err(|_| EngineError::LockPoisoned)?;

        let stream = self.journal.load_for_agent(&agent_id)?;
        let builder = StateBuilder::new(&self.reducers);
        let state = builder.fold(&agent_id, &stream)?;
        ensure_live(&state)?;

        let handler = self
            .commands
            .get(command.kind())
            .ok_or_else(|| EngineError::UnknownCommand(command.kind().to_string()))?;

        let mut ctx = CommandContext::new(&agent_id, state.calendar, stream.len() as u64);
        let drafts = handler
            .handle(&state, &command, &mut ctx)
            .map_err(EngineError::Validation)?;
        debug!(agent = %agent_id, kind = command.kind(), drafts = drafts.len(), "command validated");

        // Last exit before anything is written.
        check_deadline(deadline)?;

        let events = self.stamp_drafts(&state, drafts)?;
        let first_seq = self.journal.append_batch(&events)?;

        let own: Vec<GameEvent> = events
            .iter()
            .filter(|e| e.agent_id == agent_id)
            .cloned()
            .collect();
        let state = builder.apply(state, &own)?;

        let (state, consequences) =
            self.adjudicate(state, &own, first_seq + events.len() as u64)?;
        let narrative = self.narrate(&state, first_seq, false)?;

        let mut all = events;
        all.extend(consequences);
        all.extend(narrative);
        info!(agent = %agent_id, kind = command.kind(), appended = all.len(), "command committed");
        Ok(CommandOutcome { events: all })
    }

    /// Execute a command and flatten the result into a report.
    pub fn execute_command_report(&self, command: Command) -> CommandReport {
        match self.execute_command(command) {
            Ok(outcome) => CommandReport {
                ok: true,
                events: outcome.events,
                error_kind: None,
                message: None,
            },
            Err(err) => CommandReport {
                ok: false,
                events: Vec::new(),
                error_kind: Some(err.kind()),
                message: Some(err.to_string()),
            },
        }
    }

    /// Advance an agent's clock, with no deadline.
    pub fn advance_time(
        &self,
        agent_id: &AgentId,
        days: u32,
    ) -> Result<Vec<GameEvent>, EngineError> {
        self.advance_time_before(agent_id, days, None)
    }

    /// Advance an agent's clock by whole days, appending the ticker's
    /// events, then regulator consequences, then narrative.
    pub fn advance_time_before(
        &self,
        agent_id: &AgentId,
        days: u32,
        deadline: Option<Instant>,
    ) -> Result<Vec<GameEvent>, EngineError> {
        check_deadline(deadline)?;

        let lock = self.agent_lock(agent_id)?;
        let _guard = lock.lock().map_err(|_| EngineError::LockPoisoned)?;

        let stream = self.journal.load_for_agent(agent_id)?;
        let builder = StateBuilder::new(&self.reducers);
        let state = builder.fold(agent_id, &stream)?;
        ensure_live(&state)?;

        let events = ticker::run(&self.reducers, &state, days)?;
        check_deadline(deadline)?;

        let first_seq = self.journal.append_batch(&events)?;
        let state = builder.apply(state, &events)?;

        let (state, consequences) =
            self.adjudicate(state, &events, first_seq + events.len() as u64)?;
        let narrative = self.narrate(&state, first_seq, true)?;

        let mut all = events;
        all.extend(consequences);
        all.extend(narrative);
        debug!(agent = %agent_id, days, appended = all.len(), "tick committed");
        Ok(all)
    }

    /// Current snapshot, freshly folded. The caller owns it.
    pub fn get_current_state(&self, agent_id: &AgentId) -> Result<AgentState, EngineError> {
        let stream = self.journal.load_for_agent(agent_id)?;
        Ok(StateBuilder::new(&self.reducers).fold(agent_id, &stream)?)
    }

    /// Point-in-time snapshot: events up to and including the bound.
    pub fn get_state_at(
        &self,
        agent_id: &AgentId,
        bound: Calendar,
    ) -> Result<AgentState, EngineError> {
        let stream = self.journal.load_for_agent(agent_id)?;
        Ok(StateBuilder::new(&self.reducers).fold_until(agent_id, &stream, Some(bound))?)
    }

    /// Ordered history for one agent, optionally just the tail.
    pub fn get_history(
        &self,
        agent_id: &AgentId,
        limit: Option<usize>,
    ) -> Result<Vec<GameEvent>, EngineError> {
        Ok(match limit {
            Some(n) => self.journal.tail(agent_id, n)?,
            None => self.journal.load_for_agent(agent_id)?,
        })
    }

    pub fn journal(&self) -> &J {
        &self.journal
    }

    /// Run the regulator over freshly appended events and append its
    /// consequences inside the current critical section. Returns the
    /// state with own-stream consequences applied.
    fn adjudicate(
        &self,
        state: AgentState,
        new_events: &[GameEvent],
        counter: u64,
    ) -> Result<(AgentState, Vec<GameEvent>), EngineError> {
        let agent_id = state.id.clone();
        let recent = self.journal.tail(&agent_id, REGULATOR_WINDOW)?;
        let mut ids = IdSource::seeded(&agent_id, state.calendar, counter);
        let peers = JournalSnapshots {
            journal: &self.journal,
            reducers: &self.reducers,
        };
        let drafts = self
            .regulator
            .inspect(&state, new_events, &recent, &peers, &mut ids);
        if drafts.is_empty() {
            return Ok((state, Vec::new()));
        }

        let events = self.stamp_drafts(&state, drafts)?;
        self.journal.append_batch(&events)?;
        warn!(agent = %agent_id, consequences = events.len(), "regulator consequences appended");

        let own: Vec<GameEvent> = events
            .iter()
            .filter(|e| e.agent_id == agent_id)
            .cloned()
            .collect();
        let state = StateBuilder::new(&self.reducers).apply(state, &own)?;
        Ok((state, events))
    }

    /// Run the game master hook and append whatever it injects.
    fn narrate(
        &self,
        state: &AgentState,
        counter: u64,
        tick: bool,
    ) -> Result<Vec<GameEvent>, EngineError> {
        let drafts = if tick {
            self.game_master.post_tick(state, counter)
        } else {
            self.game_master.post_command(state, counter)
        };
        if drafts.is_empty() {
            return Ok(Vec::new());
        }
        let events = self.stamp_drafts(state, drafts)?;
        self.journal.append_batch(&events)?;
        debug!(agent = %state.id, injected = events.len(), "narrative appended");
        Ok(events)
    }

    /// Stamp drafts with each target stream's own business time. The
    /// issuing agent's calendar is already in hand; mirror streams are
    /// folded for theirs.
    fn stamp_drafts(
        &self,
        state: &AgentState,
        drafts: Vec<EventDraft>,
    ) -> Result<Vec<GameEvent>, EngineError> {
        let mut calendars: HashMap<AgentId, Calendar> = HashMap::new();
        calendars.insert(state.id.clone(), state.calendar);

        let mut events = Vec::with_capacity(drafts.len());
        for draft in drafts {
            let calendar = match calendars.get(&draft.stream) {
                Some(c) => *c,
                None => {
                    let stream = self.journal.load_for_agent(&draft.stream)?;
                    let folded =
                        StateBuilder::new(&self.reducers).fold(&draft.stream, &stream)?;
                    calendars.insert(draft.stream.clone(), folded.calendar);
                    folded.calendar
                }
            };
            events.push(stamp_event(&draft.stream, calendar, draft.payload));
        }
        Ok(events)
    }

    fn agent_lock(&self, agent_id: &AgentId) -> Result<Arc<Mutex<()>>, EngineError> {
        let mut locks = self
            .agent_locks
            .lock()
            .map_err(|_| EngineError::LockPoisoned)?;
        Ok(locks.entry(agent_id.clone()).or_default().clone())
    }
}

/// Peer snapshots straight off the journal, for regulator checks.
struct JournalSnapshots<'a, J: Journal> {
    journal: &'a J,
    reducers: &'a ReducerRegistry,
}

impl<J: Journal> SnapshotSource for JournalSnapshots<'_, J> {
    fn snapshot(&self, agent_id: &AgentId) -> Option<AgentState> {
        let stream = self.journal.load_for_agent(agent_id).ok()?;
        if stream.is_empty() {
            return None;
        }
        StateBuilder::new(self.reducers).fold(agent_id, &stream).ok()
    }
}

fn check_deadline(deadline: Option<Instant>) -> Result<(), EngineError> {
    match deadline {
        Some(d) if Instant::now() >= d => Err(EngineError::DeadlineExceeded),
        _ => Ok(()),
    }
}

fn ensure_live(state: &AgentState) -> Result<(), EngineError> {
    if !state.created {
        return Err(CommandError::invalid(format!("unknown agent {}", state.id)).into());
    }
    if state.retired {
        return Err(CommandError::invalid(format!("agent {} is retired", state.id)).into());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use spincycle_core::LocationId;
    use spincycle_domain::ServiceKind;
    use spincycle_events::CommandPayload;
    use spincycle_store::InMemoryJournal;

    fn engine() -> Engine<InMemoryJournal> {
        Engine::new(InMemoryJournal::new())
    }

    fn set_price(agent: &str, price: f64) -> Command {
        Command::new(
            AgentId::new(agent),
            CommandPayload::SetPrice {
                location_id: LocationId::new("LOC_001"),
                service: ServiceKind::StandardWash,
                new_price: price,
            },
        )
    }

    #[test]
    fn command_against_unknown_agent_is_rejected() {
        let engine = engine();
        let err = engine.execute_command(set_price("GHOST", 3.75)).unwrap_err();
        assert_eq!(err.kind(), "invalid_state");
    }

    #[test]
    fn unregistered_command_kind_is_unknown() {
        // A host wiring its own catalog forgets SET_PRICE.
        let mut reducer_registry = ReducerRegistry::new();
        crate::reducers::register_defaults(&mut reducer_registry);
        let engine = Engine::with_registries(
            InMemoryJournal::new(),
            CommandRegistry::new(),
            reducer_registry,
        );
        engine.create_agent(&AgentId::new("A"), "Suds").unwrap();
        let err = engine.execute_command(set_price("A", 3.75)).unwrap_err();
        assert!(matches!(err, EngineError::UnknownCommand(kind) if kind == "SET_PRICE"));
    }

    #[test]
    fn failed_validation_appends_nothing() {
        let engine = engine();
        engine.create_agent(&AgentId::new("A"), "Suds").unwrap();
        let before = engine.get_history(&AgentId::new("A"), None).unwrap().len();

        let err = engine.execute_command(set_price("A", 500.0)).unwrap_err();
        assert_eq!(err.kind(), "invalid_state");

        let after = engine.get_history(&AgentId::new("A"), None).unwrap().len();
        assert_eq!(before, after);
    }

    #[test]
    fn expired_deadline_abandons_before_append() {
        let engine = engine();
        engine.create_agent(&AgentId::new("A"), "Suds").unwrap();
        let before = engine.get_history(&AgentId::new("A"), None).unwrap().len();

        let past = Instant::now() - std::time::Duration::from_secs(1);
        let err = engine
            .execute_command_before(set_price("A", 3.75), Some(past))
            .unwrap_err();
        assert!(matches!(err, EngineError::DeadlineExceeded));
        assert_eq!(
            engine.get_history(&AgentId::new("A"), None).unwrap().len(),
            before
        );
    }

    #[test]
    fn duplicate_agent_creation_is_rejected() {
        let engine = engine();
        engine.create_agent(&AgentId::new("A"), "Suds").unwrap();
        assert!(engine.create_agent(&AgentId::new("A"), "Again").is_err());
    }

    #[test]
    fn report_form_flattens_errors() {
        let engine = engine();
        let report = engine.execute_command_report(set_price("GHOST", 3.75));
        assert!(!report.ok);
        assert_eq!(report.error_kind.as_deref(), Some("invalid_state"));
        assert!(report.events.is_empty());
        assert!(report.message.is_some());
    }
}

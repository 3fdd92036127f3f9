//! Engine-supplied context for event producers.
//!
//! Handlers never stamp events and never reach for a clock or an
//! entropy source: entity ids come from a PRNG seeded by the engine from
//! (agent, calendar, stream position), so replaying the same command
//! against the same state mints the same ids.

use chrono::Utc;
use rand::RngCore;
use rand_chacha::rand_core::SeedableRng;
use rand_chacha::ChaCha8Rng;
use spincycle_core::{AgentId, Calendar, CorrelationId};
use spincycle_events::{EventPayload, GameEvent};
use uuid::Uuid;

/// Stable 64-bit FNV-1a. Used for PRNG seeding so determinism does not
/// hang on the standard library's hasher keys.
fn fnv1a64(bytes: &[u8]) -> u64 {
    let mut hash: u64 = 0xcbf2_9ce4_8422_2325;
    for b in bytes {
        hash ^= u64::from(*b);
        hash = hash.wrapping_mul(0x0000_0100_0000_01b3);
    }
    hash
}

/// Deterministic PRNG for one (agent, calendar, counter) point.
///
/// The counter is the stream position at the time of seeding, so two
/// operations on the same day still draw independent sequences.
pub fn seeded_rng(agent: &AgentId, calendar: Calendar, counter: u64) -> ChaCha8Rng {
    let mut key = Vec::with_capacity(agent.as_str().len() + 16);
    key.extend_from_slice(agent.as_str().as_bytes());
    key.extend_from_slice(&calendar.week.to_le_bytes());
    key.extend_from_slice(&[calendar.day]);
    key.extend_from_slice(&counter.to_le_bytes());
    ChaCha8Rng::seed_from_u64(fnv1a64(&key))
}

/// Mints entity identifiers from a seeded stream.
#[derive(Debug)]
pub struct IdSource {
    rng: ChaCha8Rng,
}

impl IdSource {
    pub fn seeded(agent: &AgentId, calendar: Calendar, counter: u64) -> Self {
        Self {
            rng: seeded_rng(agent, calendar, counter),
        }
    }

    /// A short readable id like `MCH-1a2b3c4d`.
    pub fn mint(&mut self, prefix: &str) -> String {
        format!("{prefix}-{:08x}", self.rng.next_u32())
    }

    /// A full UUID drawn from the seeded stream (v4 layout).
    pub fn uuid(&mut self) -> Uuid {
        let mut bytes = [0u8; 16];
        self.rng.fill_bytes(&mut bytes);
        uuid::Builder::from_random_bytes(bytes).into_uuid()
    }
}

/// Everything a command handler may read besides the snapshot.
#[derive(Debug)]
pub struct CommandContext {
    calendar: Calendar,
    correlation_id: CorrelationId,
    ids: IdSource,
}

impl CommandContext {
    pub fn new(agent: &AgentId, calendar: Calendar, counter: u64) -> Self {
        let mut ids = IdSource::seeded(agent, calendar, counter);
        let correlation_id = CorrelationId::new(ids.uuid().to_string());
        Self {
            calendar,
            correlation_id,
            ids,
        }
    }

    pub fn calendar(&self) -> Calendar {
        self.calendar
    }

    pub fn week(&self) -> u32 {
        self.calendar.week
    }

    /// Correlation id shared by the two halves of an inter-agent pair.
    pub fn correlation_id(&self) -> CorrelationId {
        self.correlation_id.clone()
    }

    pub fn mint_id(&mut self, prefix: &str) -> String {
        self.ids.mint(prefix)
    }
}

/// Stamp a payload into a full event on the given stream.
///
/// Event ids are time-ordered UUIDs and the timestamp is wall clock;
/// neither participates in folds, so stamping stays outside the
/// determinism boundary.
pub fn stamp_event(agent: &AgentId, calendar: Calendar, payload: EventPayload) -> GameEvent {
    GameEvent {
        event_id: Uuid::now_v7(),
        agent_id: agent.clone(),
        week: calendar.week,
        day: calendar.day,
        timestamp: Utc::now(),
        payload,
    }
}

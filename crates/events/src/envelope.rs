//! The event envelope: stream metadata wrapped around a payload.
//!
//! Handlers and the ticker produce [`EventDraft`]s; only the engine turns
//! drafts into full [`GameEvent`]s, because event ids and wall timestamps
//! must come from the engine (or its seeded id source), never from
//! handler logic.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use spincycle_core::AgentId;
use uuid::Uuid;

use crate::payload::EventPayload;

/// A stamped, appendable event record.
///
/// Wire form is self-describing: the flattened payload contributes the
/// `event_kind` tag and its kind-specific fields. Unknown fields on read
/// are ignored; unknown kinds fail the fold.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameEvent {
    pub event_id: Uuid,
    pub agent_id: AgentId,
    pub week: u32,
    pub day: u8,
    pub timestamp: DateTime<Utc>,
    #[serde(flatten)]
    pub payload: EventPayload,
}

impl GameEvent {
    pub fn kind(&self) -> &'static str {
        self.payload.kind()
    }
}

/// An event a producer wants appended, before the engine stamps it.
///
/// `stream` names the agent whose log receives the event; inter-agent
/// commands emit drafts for two different streams.
#[derive(Debug, Clone, PartialEq)]
pub struct EventDraft {
    pub stream: AgentId,
    pub payload: EventPayload,
}

impl EventDraft {
    pub fn new(stream: AgentId, payload: EventPayload) -> Self {
        Self { stream, payload }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use spincycle_core::{LocationId, Money};
    use spincycle_domain::ServiceKind;

    fn sample_event() -> GameEvent {
        GameEvent {
            event_id: Uuid::nil(),
            agent_id: AgentId::new("A"),
            week: 2,
            day: 3,
            timestamp: DateTime::parse_from_rfc3339("2026-08-01T12:00:00Z")
                .unwrap()
                .with_timezone(&Utc),
            payload: EventPayload::PriceSet {
                location_id: LocationId::new("LOC_001"),
                service: ServiceKind::StandardWash,
                price: Money::from_cents(375),
            },
        }
    }

    #[test]
    fn envelope_flattens_payload_into_one_record() {
        let value = serde_json::to_value(sample_event()).unwrap();
        assert_eq!(value["event_kind"], "pricing.price_set");
        assert_eq!(value["agent_id"], "A");
        assert_eq!(value["week"], 2);
        assert_eq!(value["day"], 3);
        assert_eq!(value["price"], 375);
    }

    #[test]
    fn envelope_round_trips() {
        let event = sample_event();
        let json = serde_json::to_string(&event).unwrap();
        let back: GameEvent = serde_json::from_str(&json).unwrap();
        assert_eq!(back, event);
    }
}

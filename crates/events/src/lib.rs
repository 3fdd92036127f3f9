//! Event and command catalogs.
//!
//! Events are immutable facts appended to the log; commands are transient
//! intents that handlers turn into events. Both are self-describing
//! tagged records so logs written today stay readable as kinds are added.

pub mod command;
pub mod envelope;
pub mod payload;

pub use command::{Command, CommandPayload};
pub use envelope::{EventDraft, GameEvent};
pub use payload::{kinds, EthicalChoice, EventPayload, TransferKind};

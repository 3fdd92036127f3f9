//! Entity model for the laundromat simulation.
//!
//! Everything here is derived state: structs are rebuilt by folding the
//! event log and never persisted directly. Fields default where possible
//! so older snapshots deserialize across schema additions.

pub mod agent;
pub mod economy;
pub mod location;
pub mod machine;
pub mod social;
pub mod staff;
pub mod vendor;

pub use agent::{AgentState, BuyoutOffer, Investigation, Loan, LoanKind, RegulatoryStatus};
pub use location::{Inventory, LocationListing, LocationState, MarketingBoost, ServiceKind};
pub use machine::{MachineKind, MachineState, MachineStatus};
pub use social::{Alliance, AllianceKind, Dilemma, Fine, FineStatus, ScandalMarker};
pub use staff::{StaffMember, StaffRole};
pub use vendor::{NegotiationOutcome, VendorRelationship};

//! Core simulation types: identifiers, money, calendar, error taxonomy.

pub mod calendar;
pub mod error;
pub mod id;
pub mod money;

pub use calendar::{Calendar, DAYS_PER_WEEK, WEEKS_PER_MONTH};
pub use error::{CommandError, CommandResult, FoldError};
pub use id::{
    AgentId, AllianceId, CorrelationId, DilemmaId, FineId, InvestigationId, ListingId, LoanId,
    LocationId, MachineId, ScandalId, StaffId, VendorId,
};
pub use money::Money;

//! Error taxonomy for command validation and state folds.

use thiserror::Error;

pub type CommandResult<T> = Result<T, CommandError>;

/// A command rejected during validation. No events are written.
///
/// Keep this focused on deterministic, handler-visible failures; storage
/// and fold faults live elsewhere.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CommandError {
    /// Cash plus available credit cannot cover the required amount.
    #[error("insufficient funds: need {required}, have {available}")]
    InsufficientFunds { required: String, available: String },

    /// A parameter is out of range or references a missing entity.
    #[error("invalid state: {0}")]
    InvalidState(String),

    /// Credit rating below the floor for the requested loan product.
    #[error("credit rating {rating} below floor {floor}")]
    CreditError { rating: i64, floor: i64 },

    #[error("location not found: {0}")]
    LocationNotFound(String),

    #[error("machine not found: {0}")]
    MachineNotFound(String),

    #[error("vendor not found: {0}")]
    VendorNotFound(String),

    #[error("staff not found: {0}")]
    StaffNotFound(String),

    /// An exclusive contract forbids the requested action.
    #[error("contract violation: {0}")]
    ContractViolation(String),
}

impl CommandError {
    pub fn invalid(msg: impl Into<String>) -> Self {
        Self::InvalidState(msg.into())
    }

    /// Stable machine-readable kind, surfaced in the engine's result tuple.
    pub fn kind(&self) -> &'static str {
        match self {
            CommandError::InsufficientFunds { .. } => "insufficient_funds",
            CommandError::InvalidState(_) => "invalid_state",
            CommandError::CreditError { .. } => "credit_error",
            CommandError::LocationNotFound(_) => "location_not_found",
            CommandError::MachineNotFound(_) => "machine_not_found",
            CommandError::VendorNotFound(_) => "vendor_not_found",
            CommandError::StaffNotFound(_) => "staff_not_found",
            CommandError::ContractViolation(_) => "contract_violation",
        }
    }
}

/// Fatal fault while folding an event stream into state.
///
/// These are never recovered locally: a missing reducer or an unknown
/// event kind means the process is running with a broken registry.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FoldError {
    #[error("no reducer registered for event kind '{0}'")]
    MissingReducer(String),

    #[error("reducer for '{kind}' received a payload it does not handle")]
    PayloadMismatch { kind: String },

    #[error("invariant violated during fold: {0}")]
    InvariantViolation(String),
}

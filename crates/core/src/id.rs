//! Strongly-typed identifiers used across the simulation.
//!
//! Streams and entities are addressed by domain-readable strings
//! (`LOC_001`, `DEFAULT_VENDOR`, minted ids like `MCH-1a2b3c4d`), so the
//! newtypes wrap `String` rather than a UUID. Minted ids come from the
//! engine's deterministic id source, never from the handlers themselves.

use serde::{Deserialize, Serialize};

macro_rules! impl_string_id {
    ($t:ident) => {
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $t(String);

        impl $t {
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl core::fmt::Display for $t {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                core::fmt::Display::fmt(&self.0, f)
            }
        }

        impl From<&str> for $t {
            fn from(value: &str) -> Self {
                Self(value.to_string())
            }
        }

        impl From<String> for $t {
            fn from(value: String) -> Self {
                Self(value)
            }
        }
    };
}

impl_string_id!(AgentId);
impl_string_id!(LocationId);
impl_string_id!(MachineId);
impl_string_id!(VendorId);
impl_string_id!(StaffId);
impl_string_id!(ScandalId);
impl_string_id!(FineId);
impl_string_id!(AllianceId);
impl_string_id!(LoanId);
impl_string_id!(DilemmaId);
impl_string_id!(ListingId);
impl_string_id!(InvestigationId);

/// Shared id correlating the two halves of an inter-agent event pair.
///
/// Minted by the engine per command; both streams carry the same value.
impl_string_id!(CorrelationId);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_round_trip_through_serde_as_plain_strings() {
        let id = LocationId::new("LOC_001");
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"LOC_001\"");
        let back: LocationId = serde_json::from_str(&json).unwrap();
        assert_eq!(back, id);
    }

    #[test]
    fn display_matches_inner_string() {
        assert_eq!(VendorId::new("DEFAULT_VENDOR").to_string(), "DEFAULT_VENDOR");
    }
}

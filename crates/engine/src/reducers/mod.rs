//! Projection reducers, one per event kind.
//!
//! Reducers mechanically apply each event's declared fact: deltas are
//! added, new values overwrite, and range clamps are applied as a
//! mechanical step. No game rules live here: if a reducer needs to
//! "decide" something, the producer should have declared it on the
//! event instead.

pub mod equipment;
pub mod finance;
pub mod interagent;
pub mod lifecycle;
pub mod pricing;
pub mod regulatory;
pub mod social;
pub mod staffing;
pub mod time;
pub mod vendors;

use spincycle_core::FoldError;

use crate::registry::ReducerRegistry;

/// Register every built-in reducer. The engine calls this at startup;
/// hosts may re-register kinds afterwards to override.
pub fn register_defaults(reg: &mut ReducerRegistry) {
    lifecycle::register(reg);
    time::register(reg);
    finance::register(reg);
    pricing::register(reg);
    equipment::register(reg);
    staffing::register(reg);
    vendors::register(reg);
    social::register(reg);
    regulatory::register(reg);
    interagent::register(reg);
}

pub(crate) fn mismatch(kind: &str) -> FoldError {
    FoldError::PayloadMismatch {
        kind: kind.to_string(),
    }
}

pub(crate) fn clamp_score(v: i64) -> i64 {
    v.clamp(0, 100)
}

pub(crate) fn clamp_percent(v: f64) -> f64 {
    v.clamp(0.0, 100.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use spincycle_events::kinds;

    #[test]
    fn every_catalog_kind_has_a_default_reducer() {
        let mut reg = ReducerRegistry::new();
        register_defaults(&mut reg);
        for kind in kinds::ALL {
            assert!(reg.contains(kind), "no reducer registered for {kind}");
        }
    }
}

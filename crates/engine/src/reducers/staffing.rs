//! Staffing reducers.

use spincycle_core::FoldError;
use spincycle_domain::{AgentState, StaffMember};
use spincycle_events::{kinds, EventPayload, GameEvent};

use crate::registry::ReducerRegistry;

use super::{clamp_score, mismatch};

/// Morale every new hire starts with.
const STARTING_MORALE: i64 = 70;

pub fn register(reg: &mut ReducerRegistry) {
    reg.register(
        kinds::STAFF_HIRED,
        |mut state: AgentState, event: &GameEvent| -> Result<AgentState, FoldError> {
            let EventPayload::StaffHired {
                location_id,
                staff_id,
                name,
                role,
                hourly_rate,
            } = &event.payload
            else {
                return Err(mismatch(event.kind()));
            };
            if let Some(location) = state.locations.get_mut(location_id) {
                location.staff.insert(
                    staff_id.clone(),
                    StaffMember {
                        id: staff_id.clone(),
                        name: name.clone(),
                        role: *role,
                        hourly_rate: *hourly_rate,
                        morale: STARTING_MORALE,
                        hired_week: event.week,
                    },
                );
            }
            Ok(state)
        },
    );

    reg.register(
        kinds::STAFF_FIRED,
        |mut state: AgentState, event: &GameEvent| -> Result<AgentState, FoldError> {
            let EventPayload::StaffFired {
                location_id,
                staff_id,
                ..
            } = &event.payload
            else {
                return Err(mismatch(event.kind()));
            };
            if let Some(location) = state.locations.get_mut(location_id) {
                location.staff.remove(staff_id);
            }
            Ok(state)
        },
    );

    reg.register(
        kinds::STAFF_QUIT,
        |mut state: AgentState, event: &GameEvent| -> Result<AgentState, FoldError> {
            let EventPayload::StaffQuit {
                location_id,
                staff_id,
                ..
            } = &event.payload
            else {
                return Err(mismatch(event.kind()));
            };
            if let Some(location) = state.locations.get_mut(location_id) {
                location.staff.remove(staff_id);
            }
            Ok(state)
        },
    );

    reg.register(
        kinds::STAFF_WAGE_ADJUSTED,
        |mut state: AgentState, event: &GameEvent| -> Result<AgentState, FoldError> {
            let EventPayload::StaffWageAdjusted {
                location_id,
                staff_id,
                new_rate,
                morale_delta,
            } = &event.payload
            else {
                return Err(mismatch(event.kind()));
            };
            if let Some(member) = state
                .locations
                .get_mut(location_id)
                .and_then(|l| l.staff.get_mut(staff_id))
            {
                member.hourly_rate = *new_rate;
                member.morale = clamp_score(member.morale + morale_delta);
            }
            Ok(state)
        },
    );

    reg.register(
        kinds::STAFF_BENEFITS_PROVIDED,
        |mut state: AgentState, event: &GameEvent| -> Result<AgentState, FoldError> {
            let EventPayload::StaffBenefitsProvided {
                location_id,
                morale_delta,
                until_week,
                ..
            } = &event.payload
            else {
                return Err(mismatch(event.kind()));
            };
            if let Some(location) = state.locations.get_mut(location_id) {
                location.benefits_until_week = Some(*until_week);
                for member in location.staff.values_mut() {
                    member.morale = clamp_score(member.morale + morale_delta);
                }
            }
            Ok(state)
        },
    );

    reg.register(
        kinds::STAFF_MORALE_CHANGED,
        |mut state: AgentState, event: &GameEvent| -> Result<AgentState, FoldError> {
            let EventPayload::StaffMoraleChanged {
                location_id,
                staff_id,
                delta,
            } = &event.payload
            else {
                return Err(mismatch(event.kind()));
            };
            if let Some(member) = state
                .locations
                .get_mut(location_id)
                .and_then(|l| l.staff.get_mut(staff_id))
            {
                member.morale = clamp_score(member.morale + delta);
            }
            Ok(state)
        },
    );
}

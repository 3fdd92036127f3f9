//! Calendar and daily-operations reducers.

use spincycle_core::FoldError;
use spincycle_domain::AgentState;
use spincycle_events::{kinds, EventPayload, GameEvent};

use crate::registry::ReducerRegistry;

use super::{clamp_percent, mismatch};

pub fn register(reg: &mut ReducerRegistry) {
    reg.register(
        kinds::TIME_ADVANCED,
        |mut state: AgentState, event: &GameEvent| -> Result<AgentState, FoldError> {
            let EventPayload::TimeAdvanced = &event.payload else {
                return Err(mismatch(event.kind()));
            };
            state.calendar = state.calendar.next_day();
            Ok(state)
        },
    );

    reg.register(
        kinds::DAILY_REVENUE_PROCESSED,
        |mut state: AgentState, event: &GameEvent| -> Result<AgentState, FoldError> {
            let EventPayload::DailyRevenueProcessed {
                location_id,
                loads_by_service,
                revenue,
                cogs,
            } = &event.payload
            else {
                return Err(mismatch(event.kind()));
            };
            let loads: u64 = loads_by_service.values().map(|n| u64::from(*n)).sum();
            state.market_share_loads += loads;
            state.revenue_since_audit += *revenue;
            state.cogs_since_audit += *cogs;
            if let Some(location) = state.locations.get_mut(location_id) {
                location.weekly_revenue += *revenue;
                location.weekly_cogs += *cogs;
            }
            Ok(state)
        },
    );

    reg.register(
        kinds::WEEKLY_FIXED_COSTS_BILLED,
        |mut state: AgentState, event: &GameEvent| -> Result<AgentState, FoldError> {
            let EventPayload::WeeklyFixedCostsBilled { location_id, .. } = &event.payload else {
                return Err(mismatch(event.kind()));
            };
            // The billing event closes the location's trading week.
            if let Some(location) = state.locations.get_mut(location_id) {
                location.weekly_revenue = spincycle_core::Money::ZERO;
                location.weekly_cogs = spincycle_core::Money::ZERO;
            }
            Ok(state)
        },
    );

    reg.register(
        kinds::CLEANLINESS_ADJUSTED,
        |mut state: AgentState, event: &GameEvent| -> Result<AgentState, FoldError> {
            let EventPayload::CleanlinessAdjusted {
                location_id,
                new_value,
                ..
            } = &event.payload
            else {
                return Err(mismatch(event.kind()));
            };
            if let Some(location) = state.locations.get_mut(location_id) {
                location.cleanliness = clamp_percent(*new_value);
            }
            Ok(state)
        },
    );

    reg.register(
        kinds::INVENTORY_CONSUMED,
        |mut state: AgentState, event: &GameEvent| -> Result<AgentState, FoldError> {
            let EventPayload::InventoryConsumed {
                location_id,
                detergent_units,
                softener_units,
            } = &event.payload
            else {
                return Err(mismatch(event.kind()));
            };
            if let Some(location) = state.locations.get_mut(location_id) {
                location.inventory.detergent_units = location
                    .inventory
                    .detergent_units
                    .saturating_sub(*detergent_units);
                location.inventory.softener_units = location
                    .inventory
                    .softener_units
                    .saturating_sub(*softener_units);
            }
            Ok(state)
        },
    );
}

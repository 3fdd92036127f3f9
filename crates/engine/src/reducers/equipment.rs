//! Equipment and supplies reducers.

use spincycle_core::FoldError;
use spincycle_domain::{AgentState, MachineState};
use spincycle_events::{kinds, EventPayload, GameEvent};

use crate::registry::ReducerRegistry;

use super::{clamp_percent, mismatch};

pub fn register(reg: &mut ReducerRegistry) {
    reg.register(
        kinds::EQUIPMENT_PURCHASED,
        |mut state: AgentState, event: &GameEvent| -> Result<AgentState, FoldError> {
            let EventPayload::EquipmentPurchased {
                location_id,
                machine_id,
                kind,
                ..
            } = &event.payload
            else {
                return Err(mismatch(event.kind()));
            };
            if let Some(location) = state.locations.get_mut(location_id) {
                location.equipment.insert(
                    machine_id.clone(),
                    MachineState::new(machine_id.clone(), *kind),
                );
            }
            Ok(state)
        },
    );

    reg.register(
        kinds::EQUIPMENT_SOLD,
        |mut state: AgentState, event: &GameEvent| -> Result<AgentState, FoldError> {
            let EventPayload::EquipmentSold {
                location_id,
                machine_id,
                ..
            } = &event.payload
            else {
                return Err(mismatch(event.kind()));
            };
            if let Some(location) = state.locations.get_mut(location_id) {
                location.equipment.remove(machine_id);
            }
            Ok(state)
        },
    );

    reg.register(
        kinds::EQUIPMENT_REPAIRED,
        |mut state: AgentState, event: &GameEvent| -> Result<AgentState, FoldError> {
            let EventPayload::EquipmentRepaired {
                location_id,
                machine_id,
                new_condition,
                new_status,
                ..
            } = &event.payload
            else {
                return Err(mismatch(event.kind()));
            };
            if let Some(machine) = state
                .locations
                .get_mut(location_id)
                .and_then(|l| l.equipment.get_mut(machine_id))
            {
                machine.condition = clamp_percent(*new_condition);
                machine.status = *new_status;
                machine.loads_since_service = 0;
            }
            Ok(state)
        },
    );

    reg.register(
        kinds::MACHINE_WEAR_UPDATED,
        |mut state: AgentState, event: &GameEvent| -> Result<AgentState, FoldError> {
            let EventPayload::MachineWearUpdated {
                location_id,
                machine_id,
                new_condition,
                loads_processed,
                ..
            } = &event.payload
            else {
                return Err(mismatch(event.kind()));
            };
            if let Some(machine) = state
                .locations
                .get_mut(location_id)
                .and_then(|l| l.equipment.get_mut(machine_id))
            {
                machine.condition = clamp_percent(*new_condition);
                machine.loads_since_service += u64::from(*loads_processed);
            }
            Ok(state)
        },
    );

    reg.register(
        kinds::MACHINE_STATUS_CHANGED,
        |mut state: AgentState, event: &GameEvent| -> Result<AgentState, FoldError> {
            let EventPayload::MachineStatusChanged {
                location_id,
                machine_id,
                new_status,
            } = &event.payload
            else {
                return Err(mismatch(event.kind()));
            };
            if let Some(machine) = state
                .locations
                .get_mut(location_id)
                .and_then(|l| l.equipment.get_mut(machine_id))
            {
                machine.status = *new_status;
            }
            Ok(state)
        },
    );

    reg.register(
        kinds::SUPPLIES_PURCHASED,
        |mut state: AgentState, event: &GameEvent| -> Result<AgentState, FoldError> {
            let EventPayload::SuppliesPurchased {
                location_id,
                vendor_id,
                detergent_units,
                softener_units,
                ..
            } = &event.payload
            else {
                return Err(mismatch(event.kind()));
            };
            if let Some(location) = state.locations.get_mut(location_id) {
                location.inventory.detergent_units += *detergent_units;
                location.inventory.softener_units += *softener_units;
                if let Some(vendor) = location.vendors.get_mut(vendor_id) {
                    vendor.record_payment(true);
                }
            }
            Ok(state)
        },
    );
}

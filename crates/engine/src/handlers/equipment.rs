//! Equipment and supplies handlers.

use spincycle_core::{CommandError, MachineId, Money, VendorId};
use spincycle_domain::economy::{
    self, equipment_unit_price, maintenance_terms, salvage_value, ConditionRestore,
};
use spincycle_domain::{AgentState, MachineStatus};
use spincycle_events::{Command, CommandPayload, EventDraft, EventPayload, TransferKind};

use crate::context::CommandContext;

use super::own;

const MAX_UNITS_PER_ORDER: u32 = 20;

/// Resolve the vendor for a purchase: an explicit id must be known to
/// the location; omitted falls back to the house default.
fn resolve_vendor(
    state: &AgentState,
    location_id: &spincycle_core::LocationId,
    vendor_id: &Option<VendorId>,
) -> Result<VendorId, CommandError> {
    let location = state.location(location_id)?;
    match vendor_id {
        Some(id) => {
            if location.vendors.contains_key(id) || id.as_str() == economy::DEFAULT_VENDOR {
                Ok(id.clone())
            } else {
                Err(CommandError::VendorNotFound(id.to_string()))
            }
        }
        None => Ok(VendorId::new(economy::DEFAULT_VENDOR)),
    }
}

pub fn buy_equipment(
    state: &AgentState,
    cmd: &Command,
    ctx: &mut CommandContext,
) -> Result<Vec<EventDraft>, CommandError> {
    let CommandPayload::BuyEquipment {
        location_id,
        kind,
        vendor_id,
        quantity,
    } = &cmd.payload
    else {
        return Err(CommandError::invalid("payload does not match BUY_EQUIPMENT"));
    };

    if *quantity == 0 || *quantity > MAX_UNITS_PER_ORDER {
        return Err(CommandError::invalid(format!(
            "quantity must be 1..={MAX_UNITS_PER_ORDER}"
        )));
    }
    let vendor = resolve_vendor(state, location_id, vendor_id)?;

    let unit_price = equipment_unit_price(*kind);
    let total = unit_price * i64::from(*quantity);
    state.ensure_affordable(total)?;

    let mut drafts = Vec::with_capacity(*quantity as usize + 1);
    for _ in 0..*quantity {
        drafts.push(own(
            cmd,
            EventPayload::EquipmentPurchased {
                location_id: location_id.clone(),
                machine_id: MachineId::new(ctx.mint_id("MCH")),
                kind: *kind,
                unit_price,
                vendor_id: vendor.clone(),
            },
        ));
    }
    drafts.push(own(
        cmd,
        EventPayload::FundsTransferred {
            kind: TransferKind::Expense,
            amount: total,
            memo: format!("{quantity} machines for {location_id}"),
        },
    ));
    Ok(drafts)
}

pub fn sell_equipment(
    state: &AgentState,
    cmd: &Command,
    _ctx: &mut CommandContext,
) -> Result<Vec<EventDraft>, CommandError> {
    let CommandPayload::SellEquipment {
        location_id,
        machine_id,
    } = &cmd.payload
    else {
        return Err(CommandError::invalid("payload does not match SELL_EQUIPMENT"));
    };

    let machine = state.machine(location_id, machine_id)?;
    if machine.status == MachineStatus::InRepair {
        return Err(CommandError::invalid("machine is in the shop"));
    }
    let salvage = salvage_value(machine.kind, machine.condition);

    Ok(vec![
        own(
            cmd,
            EventPayload::EquipmentSold {
                location_id: location_id.clone(),
                machine_id: machine_id.clone(),
                salvage_value: salvage,
            },
        ),
        own(
            cmd,
            EventPayload::FundsTransferred {
                kind: TransferKind::Revenue,
                amount: salvage,
                memo: format!("salvage of {machine_id}"),
            },
        ),
    ])
}

pub fn perform_maintenance(
    state: &AgentState,
    cmd: &Command,
    _ctx: &mut CommandContext,
) -> Result<Vec<EventDraft>, CommandError> {
    let CommandPayload::PerformMaintenance {
        location_id,
        machine_id,
        tier,
    } = &cmd.payload
    else {
        return Err(CommandError::invalid(
            "payload does not match PERFORM_MAINTENANCE",
        ));
    };

    let machine = state.machine(location_id, machine_id)?;
    if machine.status == MachineStatus::InRepair {
        return Err(CommandError::invalid("machine is already in repair"));
    }

    let (cost, restore) = maintenance_terms(*tier);
    state.ensure_affordable(cost)?;
    let new_condition = match restore {
        ConditionRestore::Delta(delta) => (machine.condition + delta).min(100.0),
        ConditionRestore::Full => 100.0,
    };

    Ok(vec![
        own(
            cmd,
            EventPayload::EquipmentRepaired {
                location_id: location_id.clone(),
                machine_id: machine_id.clone(),
                tier: Some(*tier),
                new_condition,
                new_status: MachineStatus::Operational,
            },
        ),
        own(
            cmd,
            EventPayload::FundsTransferred {
                kind: TransferKind::Expense,
                amount: cost,
                memo: format!("{tier:?} maintenance on {machine_id}"),
            },
        ),
    ])
}

pub fn fix_machine(
    state: &AgentState,
    cmd: &Command,
    _ctx: &mut CommandContext,
) -> Result<Vec<EventDraft>, CommandError> {
    let CommandPayload::FixMachine {
        location_id,
        machine_id,
    } = &cmd.payload
    else {
        return Err(CommandError::invalid("payload does not match FIX_MACHINE"));
    };

    let machine = state.machine(location_id, machine_id)?;
    if machine.status != MachineStatus::Broken {
        return Err(CommandError::invalid("machine is not broken"));
    }
    state.ensure_affordable(economy::BREAKDOWN_REPAIR_COST)?;

    Ok(vec![
        own(
            cmd,
            EventPayload::EquipmentRepaired {
                location_id: location_id.clone(),
                machine_id: machine_id.clone(),
                tier: None,
                new_condition: machine.condition.max(economy::BREAKDOWN_REPAIR_CONDITION),
                new_status: MachineStatus::Operational,
            },
        ),
        own(
            cmd,
            EventPayload::FundsTransferred {
                kind: TransferKind::Expense,
                amount: economy::BREAKDOWN_REPAIR_COST,
                memo: format!("emergency repair of {machine_id}"),
            },
        ),
    ])
}

pub fn buy_supplies(
    state: &AgentState,
    cmd: &Command,
    _ctx: &mut CommandContext,
) -> Result<Vec<EventDraft>, CommandError> {
    let CommandPayload::BuySupplies {
        location_id,
        vendor_id,
        detergent_units,
        softener_units,
    } = &cmd.payload
    else {
        return Err(CommandError::invalid("payload does not match BUY_SUPPLIES"));
    };

    let units = detergent_units + softener_units;
    if units == 0 {
        return Err(CommandError::invalid("order is empty"));
    }
    let vendor = resolve_vendor(state, location_id, vendor_id)?;
    let location = state.location(location_id)?;

    let unit_price = match location.vendors.get(&vendor) {
        Some(rel) => {
            if rel.disrupted {
                return Err(CommandError::invalid(format!(
                    "deliveries from {vendor} are disrupted"
                )));
            }
            rel.unit_price
        }
        None => economy::DEFAULT_SUPPLY_UNIT_PRICE,
    };
    let cost = unit_price * i64::from(units);
    state.ensure_affordable(cost)?;

    Ok(vec![
        own(
            cmd,
            EventPayload::SuppliesPurchased {
                location_id: location_id.clone(),
                vendor_id: vendor,
                detergent_units: *detergent_units,
                softener_units: *softener_units,
                cost,
            },
        ),
        own(
            cmd,
            EventPayload::FundsTransferred {
                kind: TransferKind::Expense,
                amount: cost,
                memo: format!("supplies for {location_id}"),
            },
        ),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::handlers::testing::{command_ctx, seeded_agent};
    use spincycle_core::{AgentId, LocationId};
    use spincycle_domain::economy::MaintenanceTier;
    use spincycle_domain::{MachineKind, MachineState};

    fn with_machine(status: MachineStatus, condition: f64) -> (AgentState, MachineId) {
        let mut state = seeded_agent();
        let machine_id = MachineId::new("MCH-1");
        let mut machine = MachineState::new(machine_id.clone(), MachineKind::Washer);
        machine.status = status;
        machine.condition = condition;
        state
            .locations
            .get_mut(&LocationId::new("LOC_001"))
            .unwrap()
            .equipment
            .insert(machine_id.clone(), machine);
        (state, machine_id)
    }

    #[test]
    fn buying_two_washers_emits_two_purchases_and_one_transfer() {
        let state = seeded_agent();
        let cmd = Command::new(
            AgentId::new("A"),
            CommandPayload::BuyEquipment {
                location_id: LocationId::new("LOC_001"),
                kind: MachineKind::Washer,
                vendor_id: Some(VendorId::new(economy::DEFAULT_VENDOR)),
                quantity: 2,
            },
        );
        let drafts = buy_equipment(&state, &cmd, &mut command_ctx(&state)).unwrap();
        assert_eq!(drafts.len(), 3);

        let machine_ids: Vec<_> = drafts
            .iter()
            .filter_map(|d| match &d.payload {
                EventPayload::EquipmentPurchased { machine_id, .. } => Some(machine_id.clone()),
                _ => None,
            })
            .collect();
        assert_eq!(machine_ids.len(), 2);
        assert_ne!(machine_ids[0], machine_ids[1]);

        match &drafts[2].payload {
            EventPayload::FundsTransferred { amount, kind, .. } => {
                assert_eq!(*amount, Money::from_cents(4_000_00));
                assert_eq!(*kind, TransferKind::Expense);
            }
            other => panic!("unexpected draft: {other:?}"),
        }
    }

    #[test]
    fn cash_exactly_equal_to_cost_succeeds() {
        let mut state = seeded_agent();
        state.cash = Money::from_cents(2_000_00);
        state.credit_limit = Money::ZERO;
        let cmd = Command::new(
            AgentId::new("A"),
            CommandPayload::BuyEquipment {
                location_id: LocationId::new("LOC_001"),
                kind: MachineKind::Washer,
                vendor_id: None,
                quantity: 1,
            },
        );
        assert!(buy_equipment(&state, &cmd, &mut command_ctx(&state)).is_ok());
    }

    #[test]
    fn unknown_vendor_is_rejected() {
        let state = seeded_agent();
        let cmd = Command::new(
            AgentId::new("A"),
            CommandPayload::BuyEquipment {
                location_id: LocationId::new("LOC_001"),
                kind: MachineKind::Dryer,
                vendor_id: Some(VendorId::new("V-404")),
                quantity: 1,
            },
        );
        let err = buy_equipment(&state, &cmd, &mut command_ctx(&state)).unwrap_err();
        assert_eq!(err.kind(), "vendor_not_found");
    }

    #[test]
    fn maintenance_on_a_machine_in_repair_is_rejected() {
        let (state, machine_id) = with_machine(MachineStatus::InRepair, 50.0);
        let cmd = Command::new(
            AgentId::new("A"),
            CommandPayload::PerformMaintenance {
                location_id: LocationId::new("LOC_001"),
                machine_id,
                tier: MaintenanceTier::Routine,
            },
        );
        assert!(perform_maintenance(&state, &cmd, &mut command_ctx(&state)).is_err());
    }

    #[test]
    fn routine_maintenance_restores_fifteen_points_capped() {
        let (state, machine_id) = with_machine(MachineStatus::Operational, 92.0);
        let cmd = Command::new(
            AgentId::new("A"),
            CommandPayload::PerformMaintenance {
                location_id: LocationId::new("LOC_001"),
                machine_id,
                tier: MaintenanceTier::Routine,
            },
        );
        let drafts = perform_maintenance(&state, &cmd, &mut command_ctx(&state)).unwrap();
        match &drafts[0].payload {
            EventPayload::EquipmentRepaired { new_condition, .. } => {
                assert_eq!(*new_condition, 100.0);
            }
            other => panic!("unexpected draft: {other:?}"),
        }
    }

    #[test]
    fn fix_machine_requires_a_breakdown() {
        let (state, machine_id) = with_machine(MachineStatus::Operational, 80.0);
        let cmd = Command::new(
            AgentId::new("A"),
            CommandPayload::FixMachine {
                location_id: LocationId::new("LOC_001"),
                machine_id,
            },
        );
        assert!(fix_machine(&state, &cmd, &mut command_ctx(&state)).is_err());
    }

    #[test]
    fn disrupted_vendor_blocks_supply_orders() {
        let mut state = seeded_agent();
        state
            .locations
            .get_mut(&LocationId::new("LOC_001"))
            .unwrap()
            .vendors
            .get_mut(&VendorId::new(economy::DEFAULT_VENDOR))
            .unwrap()
            .disrupted = true;
        let cmd = Command::new(
            AgentId::new("A"),
            CommandPayload::BuySupplies {
                location_id: LocationId::new("LOC_001"),
                vendor_id: None,
                detergent_units: 10,
                softener_units: 10,
            },
        );
        assert!(buy_supplies(&state, &cmd, &mut command_ctx(&state)).is_err());
    }
}

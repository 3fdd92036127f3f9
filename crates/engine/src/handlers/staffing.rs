//! Staffing handlers.

use spincycle_core::{CommandError, Money, StaffId};
use spincycle_domain::economy;
use spincycle_domain::AgentState;
use spincycle_events::{Command, CommandPayload, EventDraft, EventPayload, TransferKind};

use crate::context::CommandContext;

use super::own;

pub fn hire_staff(
    state: &AgentState,
    cmd: &Command,
    ctx: &mut CommandContext,
) -> Result<Vec<EventDraft>, CommandError> {
    let CommandPayload::HireStaff {
        location_id,
        name,
        role,
        hourly_rate,
    } = &cmd.payload
    else {
        return Err(CommandError::invalid("payload does not match HIRE_STAFF"));
    };

    state.location(location_id)?;
    if name.trim().is_empty() {
        return Err(CommandError::invalid("name cannot be empty"));
    }
    let rate = Money::from_dollars(*hourly_rate);
    if rate < economy::STATUTORY_WAGE_FLOOR {
        return Err(CommandError::invalid(format!(
            "rate {rate} below statutory minimum {}",
            economy::STATUTORY_WAGE_FLOOR
        )));
    }

    Ok(vec![own(
        cmd,
        EventPayload::StaffHired {
            location_id: location_id.clone(),
            staff_id: StaffId::new(ctx.mint_id("STF")),
            name: name.clone(),
            role: *role,
            hourly_rate: rate,
        },
    )])
}

pub fn fire_staff(
    state: &AgentState,
    cmd: &Command,
    _ctx: &mut CommandContext,
) -> Result<Vec<EventDraft>, CommandError> {
    let CommandPayload::FireStaff {
        location_id,
        staff_id,
    } = &cmd.payload
    else {
        return Err(CommandError::invalid("payload does not match FIRE_STAFF"));
    };

    let location = state.location(location_id)?;
    let member = location
        .staff
        .get(staff_id)
        .ok_or_else(|| CommandError::StaffNotFound(staff_id.to_string()))?;

    let severance = member.hourly_rate
        * (economy::FULL_TIME_HOURS_PER_WEEK * economy::SEVERANCE_WEEKS);
    state.ensure_affordable(severance)?;

    Ok(vec![
        own(
            cmd,
            EventPayload::StaffFired {
                location_id: location_id.clone(),
                staff_id: staff_id.clone(),
                severance,
            },
        ),
        own(
            cmd,
            EventPayload::FundsTransferred {
                kind: TransferKind::Expense,
                amount: severance,
                memo: format!("severance for {staff_id}"),
            },
        ),
    ])
}

pub fn adjust_staff_wage(
    state: &AgentState,
    cmd: &Command,
    _ctx: &mut CommandContext,
) -> Result<Vec<EventDraft>, CommandError> {
    let CommandPayload::AdjustStaffWage {
        location_id,
        staff_id,
        new_rate,
    } = &cmd.payload
    else {
        return Err(CommandError::invalid(
            "payload does not match ADJUST_STAFF_WAGE",
        ));
    };

    let location = state.location(location_id)?;
    let member = location
        .staff
        .get(staff_id)
        .ok_or_else(|| CommandError::StaffNotFound(staff_id.to_string()))?;

    let rate = Money::from_dollars(*new_rate);
    if rate <= Money::ZERO {
        return Err(CommandError::invalid("rate must be positive"));
    }
    // Sub-floor cuts pass validation; the regulator issues the finding.
    let morale_delta = if rate > member.hourly_rate {
        economy::RAISE_MORALE_DELTA
    } else if rate < member.hourly_rate {
        economy::PAY_CUT_MORALE_DELTA
    } else {
        0
    };

    Ok(vec![own(
        cmd,
        EventPayload::StaffWageAdjusted {
            location_id: location_id.clone(),
            staff_id: staff_id.clone(),
            new_rate: rate,
            morale_delta,
        },
    )])
}

pub fn provide_benefits(
    state: &AgentState,
    cmd: &Command,
    ctx: &mut CommandContext,
) -> Result<Vec<EventDraft>, CommandError> {
    let CommandPayload::ProvideBenefits { location_id } = &cmd.payload else {
        return Err(CommandError::invalid(
            "payload does not match PROVIDE_BENEFITS",
        ));
    };

    let location = state.location(location_id)?;
    if location.staff.is_empty() {
        return Err(CommandError::invalid("no staff to cover"));
    }
    let cost = economy::BENEFITS_COST_PER_STAFF * location.staff.len() as i64;
    state.ensure_affordable(cost)?;

    Ok(vec![
        own(
            cmd,
            EventPayload::StaffBenefitsProvided {
                location_id: location_id.clone(),
                cost,
                morale_delta: economy::BENEFITS_MORALE_DELTA,
                until_week: ctx.week() + economy::BENEFITS_WEEKS,
            },
        ),
        own(
            cmd,
            EventPayload::FundsTransferred {
                kind: TransferKind::Expense,
                amount: cost,
                memo: format!("benefits package at {location_id}"),
            },
        ),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::handlers::testing::{command_ctx, seeded_agent};
    use spincycle_core::LocationId;
    use spincycle_domain::{StaffMember, StaffRole};

    fn with_staff(rate_cents: i64) -> (AgentState, StaffId) {
        let mut state = seeded_agent();
        let staff_id = StaffId::new("STF-1");
        state
            .locations
            .get_mut(&LocationId::new("LOC_001"))
            .unwrap()
            .staff
            .insert(
                staff_id.clone(),
                StaffMember {
                    id: staff_id.clone(),
                    name: "Rosa".into(),
                    role: StaffRole::Attendant,
                    hourly_rate: Money::from_cents(rate_cents),
                    morale: 70,
                    hired_week: 0,
                },
            );
        (state, staff_id)
    }

    #[test]
    fn hire_below_the_floor_is_rejected() {
        let state = seeded_agent();
        let cmd = Command::new(
            state.id.clone(),
            CommandPayload::HireStaff {
                location_id: LocationId::new("LOC_001"),
                name: "Cheapskate Target".into(),
                role: StaffRole::Attendant,
                hourly_rate: 5.00,
            },
        );
        assert!(hire_staff(&state, &cmd, &mut command_ctx(&state)).is_err());
    }

    #[test]
    fn hire_at_the_floor_is_accepted() {
        let state = seeded_agent();
        let cmd = Command::new(
            state.id.clone(),
            CommandPayload::HireStaff {
                location_id: LocationId::new("LOC_001"),
                name: "Rosa".into(),
                role: StaffRole::Attendant,
                hourly_rate: 7.25,
            },
        );
        assert!(hire_staff(&state, &cmd, &mut command_ctx(&state)).is_ok());
    }

    #[test]
    fn firing_pays_two_weeks_severance() {
        let (state, staff_id) = with_staff(12_00);
        let cmd = Command::new(
            state.id.clone(),
            CommandPayload::FireStaff {
                location_id: LocationId::new("LOC_001"),
                staff_id,
            },
        );
        let drafts = fire_staff(&state, &cmd, &mut command_ctx(&state)).unwrap();
        match &drafts[0].payload {
            EventPayload::StaffFired { severance, .. } => {
                assert_eq!(*severance, Money::from_cents(12_00 * 80));
            }
            other => panic!("unexpected draft: {other:?}"),
        }
    }

    #[test]
    fn wage_cut_below_floor_passes_validation() {
        let (state, staff_id) = with_staff(12_00);
        let cmd = Command::new(
            state.id.clone(),
            CommandPayload::AdjustStaffWage {
                location_id: LocationId::new("LOC_001"),
                staff_id,
                new_rate: 5.00,
            },
        );
        let drafts = adjust_staff_wage(&state, &cmd, &mut command_ctx(&state)).unwrap();
        match &drafts[0].payload {
            EventPayload::StaffWageAdjusted { morale_delta, .. } => {
                assert_eq!(*morale_delta, economy::PAY_CUT_MORALE_DELTA);
            }
            other => panic!("unexpected draft: {other:?}"),
        }
    }

    #[test]
    fn unknown_staff_is_a_typed_error() {
        let state = seeded_agent();
        let cmd = Command::new(
            state.id.clone(),
            CommandPayload::FireStaff {
                location_id: LocationId::new("LOC_001"),
                staff_id: StaffId::new("STF-404"),
            },
        );
        let err = fire_staff(&state, &cmd, &mut command_ctx(&state)).unwrap_err();
        assert_eq!(err.kind(), "staff_not_found");
    }
}

//! Autonomous ticker: engine-generated facts for each simulated day.
//!
//! Pure apart from envelope stamping: given a snapshot and a day count
//! it produces the full event list, evolving a working copy through the
//! registered reducers so later days see earlier days' effects. It never
//! touches the journal; the engine appends.

use std::collections::BTreeMap;

use spincycle_core::{AgentId, FoldError, Money};
use spincycle_domain::economy::{
    self, cost_per_load, wear_base, wear_per_load, BROKEN_CONDITION_THRESHOLD,
};
use spincycle_domain::{AgentState, LocationState, MachineKind, MachineStatus, ServiceKind};
use spincycle_events::{EventPayload, GameEvent, TransferKind};

use crate::context::stamp_event;
use crate::registry::ReducerRegistry;

/// Run the ticker for `days` simulated days from `state`.
pub fn run(
    reducers: &ReducerRegistry,
    state: &AgentState,
    days: u32,
) -> Result<Vec<GameEvent>, FoldError> {
    let mut tick = TickRun {
        reducers,
        agent: state.id.clone(),
        state: state.clone(),
        events: Vec::new(),
    };
    for _ in 0..days {
        tick.one_day()?;
    }
    Ok(tick.events)
}

struct TickRun<'a> {
    reducers: &'a ReducerRegistry,
    agent: AgentId,
    state: AgentState,
    events: Vec<GameEvent>,
}

/// One location's trading day.
struct DayTrade {
    loads_by_service: BTreeMap<ServiceKind, u32>,
    revenue: Money,
    cogs: Money,
    wash_loads: u32,
    dry_loads: u32,
    vending_sales: u32,
}

impl TickRun<'_> {
    /// Stamp, apply and record one event. Every event carries the day
    /// it belongs to: `TimeAdvanced` is stamped with the day it opens,
    /// matching the calendar its reducer produces, so a point-in-time
    /// fold bounded at (w, d) stops exactly at the end of that day.
    fn emit(&mut self, payload: EventPayload) -> Result<(), FoldError> {
        let calendar = match payload {
            EventPayload::TimeAdvanced => self.state.calendar.next_day(),
            _ => self.state.calendar,
        };
        let event = stamp_event(&self.agent, calendar, payload);
        let state = std::mem::replace(&mut self.state, AgentState::zero(self.agent.clone()));
        self.state = self.reducers.reduce(state, &event)?;
        self.events.push(event);
        Ok(())
    }

    fn one_day(&mut self) -> Result<(), FoldError> {
        self.emit(EventPayload::TimeAdvanced)?;

        let location_ids: Vec<_> = self.state.locations.keys().cloned().collect();
        for location_id in &location_ids {
            let Some(location) = self.state.locations.get(location_id) else {
                continue;
            };
            let trade = trade_for(&self.state, location);
            let consumed = trade.wash_loads / economy::WASH_LOADS_PER_SUPPLY_UNIT;
            let attendants = location
                .staff
                .values()
                .filter(|s| s.role == spincycle_domain::StaffRole::Attendant)
                .count() as f64;
            let cleanliness = location.cleanliness;
            let wear_plan = wear_plan(location, &trade);

            self.emit(EventPayload::DailyRevenueProcessed {
                location_id: location_id.clone(),
                loads_by_service: trade.loads_by_service.clone(),
                revenue: trade.revenue,
                cogs: trade.cogs,
            })?;
            self.emit(EventPayload::FundsTransferred {
                kind: TransferKind::Revenue,
                amount: trade.revenue,
                memo: format!("daily takings at {location_id}"),
            })?;
            if consumed > 0 {
                self.emit(EventPayload::InventoryConsumed {
                    location_id: location_id.clone(),
                    detergent_units: consumed,
                    softener_units: consumed,
                })?;
            }

            let delta = economy::CLEANLINESS_RECOVERY_PER_ATTENDANT * attendants
                - economy::CLEANLINESS_DECAY_PER_DAY;
            let new_value = (cleanliness + delta).clamp(0.0, 100.0);
            if new_value != cleanliness {
                self.emit(EventPayload::CleanlinessAdjusted {
                    location_id: location_id.clone(),
                    delta,
                    new_value,
                })?;
            }

            for wear in wear_plan {
                self.emit(EventPayload::MachineWearUpdated {
                    location_id: location_id.clone(),
                    machine_id: wear.machine_id.clone(),
                    wear: wear.wear,
                    new_condition: wear.new_condition,
                    loads_processed: wear.loads,
                })?;
                if wear.breaks_down {
                    self.emit(EventPayload::MachineStatusChanged {
                        location_id: location_id.clone(),
                        machine_id: wear.machine_id,
                        new_status: MachineStatus::Broken,
                    })?;
                }
            }
        }

        if self.state.calendar.is_week_boundary() {
            self.close_week()?;
        }
        if self.state.calendar.is_month_boundary() {
            self.close_month()?;
        }
        Ok(())
    }

    fn close_week(&mut self) -> Result<(), FoldError> {
        let week = self.state.calendar.week;
        let location_ids: Vec<_> = self.state.locations.keys().cloned().collect();

        for location_id in &location_ids {
            let Some(location) = self.state.locations.get(location_id) else {
                continue;
            };
            let rent = location.monthly_rent.scale(0.25);
            let utilities =
                economy::UTILITIES_PER_MACHINE_WEEKLY * location.equipment.len() as i64;
            let wages: Money = location
                .staff
                .values()
                .map(|s| s.hourly_rate * economy::FULL_TIME_HOURS_PER_WEEK)
                .sum();
            let total = rent + utilities + wages;
            let benefits_active = location.has_active_benefits(week);
            let roster: Vec<_> = location
                .staff
                .values()
                .map(|s| (s.id.clone(), s.morale))
                .collect();

            self.emit(EventPayload::WeeklyFixedCostsBilled {
                location_id: location_id.clone(),
                rent,
                utilities,
                wages,
                total,
            })?;
            self.emit(EventPayload::FundsTransferred {
                kind: TransferKind::Expense,
                amount: total,
                memo: format!("weekly fixed costs at {location_id}"),
            })?;

            let delta = economy::MORALE_DRIFT_WEEKLY
                + if benefits_active {
                    economy::MORALE_BENEFITS_BONUS
                } else {
                    0
                };
            for (staff_id, morale) in roster {
                self.emit(EventPayload::StaffMoraleChanged {
                    location_id: location_id.clone(),
                    staff_id: staff_id.clone(),
                    delta,
                })?;
                if morale + delta <= economy::MORALE_QUIT_THRESHOLD {
                    self.emit(EventPayload::StaffQuit {
                        location_id: location_id.clone(),
                        staff_id,
                        reason: "morale collapsed".into(),
                    })?;
                }
            }
        }

        let decays: Vec<_> = self
            .state
            .active_scandals
            .iter()
            .map(|s| (s.id.clone(), s.weekly_decay))
            .collect();
        for (scandal_id, decay) in decays {
            self.emit(EventPayload::ScandalMarkerDecayed { scandal_id, decay })?;
        }
        Ok(())
    }

    fn close_month(&mut self) -> Result<(), FoldError> {
        let loans: Vec<_> = self
            .state
            .loans
            .values()
            .map(|l| (l.id.clone(), l.outstanding.scale(l.annual_rate / 12.0)))
            .collect();
        for (loan_id, amount) in loans {
            self.emit(EventPayload::InterestAccrued { loan_id, amount })?;
        }

        let period_revenue = self.state.revenue_since_audit;
        let period_cogs = self.state.cogs_since_audit;
        let profit = (period_revenue - period_cogs).max(Money::ZERO);
        self.emit(EventPayload::TaxLiabilityCalculated {
            amount: profit.scale(economy::TAX_RATE),
            period_revenue,
            period_cogs,
        })?;
        Ok(())
    }
}

/// Deterministic daily demand model.
///
/// base loads scale with operational washers, cleanliness and marketing;
/// loyalty members, scandal weight and the posted price against the
/// observed competitor stretch or squeeze the result.
fn trade_for(state: &AgentState, location: &LocationState) -> DayTrade {
    let week = state.calendar.week;
    let washers = count_operational(location, MachineKind::Washer);
    let dryers = count_operational(location, MachineKind::Dryer);
    let vending = count_operational(location, MachineKind::Vending);

    let cleanliness_factor = 0.5 + location.cleanliness / 200.0;
    let loyalty = (1.0 + economy::LOYALTY_MULTIPLIER_PER_MEMBER * f64::from(state.loyalty_members))
        .min(economy::LOYALTY_MULTIPLIER_CAP);
    let scandal_penalty = (1.0 - 0.5 * state.total_scandal_severity()).max(0.0);

    let our_price = price_of(location, ServiceKind::StandardWash);
    let competitor_price = location
        .observed_competitor_prices
        .get(&ServiceKind::StandardWash)
        .copied()
        .unwrap_or(our_price);
    let competitiveness = if competitor_price > Money::ZERO {
        (1.5 - our_price.as_dollars() / (2.0 * competitor_price.as_dollars())).clamp(0.5, 1.25)
    } else {
        1.0
    };

    let wash_total = (washers as f64
        * economy::LOADS_PER_WASHER_PER_DAY
        * cleanliness_factor
        * location.marketing_multiplier(week)
        * loyalty
        * scandal_penalty
        * competitiveness)
        .floor() as u32;

    let premium = (f64::from(wash_total) * economy::PREMIUM_WASH_SHARE).floor() as u32;
    let standard = wash_total - premium;
    let dry_loads = if dryers > 0 {
        wash_total.min((dryers as f64 * economy::LOADS_PER_WASHER_PER_DAY).floor() as u32)
    } else {
        0
    };
    let vending_sales = if vending > 0 {
        (f64::from(wash_total) * economy::VENDING_SALES_PER_LOAD).floor() as u32
    } else {
        0
    };

    let mut loads_by_service = BTreeMap::new();
    loads_by_service.insert(ServiceKind::StandardWash, standard);
    loads_by_service.insert(ServiceKind::PremiumWash, premium);
    loads_by_service.insert(ServiceKind::Dry, dry_loads);
    loads_by_service.insert(ServiceKind::VendingItems, vending_sales);

    let mut revenue = Money::ZERO;
    let mut cogs = Money::ZERO;
    for (service, loads) in &loads_by_service {
        revenue += price_of(location, *service) * i64::from(*loads);
        cogs += cost_per_load(*service) * i64::from(*loads);
    }

    DayTrade {
        loads_by_service,
        revenue,
        cogs,
        wash_loads: wash_total,
        dry_loads,
        vending_sales,
    }
}

struct WearEntry {
    machine_id: spincycle_core::MachineId,
    wear: f64,
    new_condition: f64,
    loads: u32,
    breaks_down: bool,
}

fn wear_plan(location: &LocationState, trade: &DayTrade) -> Vec<WearEntry> {
    let washers = count_operational(location, MachineKind::Washer).max(1);
    let dryers = count_operational(location, MachineKind::Dryer).max(1);
    let vending = count_operational(location, MachineKind::Vending).max(1);

    location
        .operational_machines()
        .map(|machine| {
            let loads = match machine.kind {
                MachineKind::Washer => trade.wash_loads / washers as u32,
                MachineKind::Dryer => trade.dry_loads / dryers as u32,
                MachineKind::Vending => trade.vending_sales / vending as u32,
            };
            let wear = wear_base(machine.kind) + wear_per_load(machine.kind) * f64::from(loads);
            let new_condition = (machine.condition - wear).max(0.0);
            WearEntry {
                machine_id: machine.id.clone(),
                wear,
                new_condition,
                loads,
                breaks_down: machine.condition > BROKEN_CONDITION_THRESHOLD
                    && new_condition <= BROKEN_CONDITION_THRESHOLD,
            }
        })
        .collect()
}

fn count_operational(location: &LocationState, kind: MachineKind) -> usize {
    location
        .operational_machines()
        .filter(|m| m.kind == kind)
        .count()
}

fn price_of(location: &LocationState, service: ServiceKind) -> Money {
    location
        .active_pricing
        .get(&service)
        .copied()
        .unwrap_or_else(|| economy::default_price_list()[&service])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reducers;
    use spincycle_core::{Calendar, LocationId, MachineId};
    use spincycle_domain::MachineState;
    use spincycle_events::kinds;

    fn registry() -> ReducerRegistry {
        let mut reg = ReducerRegistry::new();
        reducers::register_defaults(&mut reg);
        reg
    }

    fn agent_with_one_washer() -> AgentState {
        let mut state = AgentState::zero(AgentId::new("A"));
        state.created = true;
        state.cash = Money::from_cents(10_000_00);
        let loc = LocationId::new("LOC_001");
        let mut location = LocationState::new(loc.clone(), "downtown", Money::from_cents(120_000));
        location.cleanliness = 85.0;
        location.active_pricing = economy::default_price_list();
        location.equipment.insert(
            MachineId::new("MCH-1"),
            MachineState::new(MachineId::new("MCH-1"), MachineKind::Washer),
        );
        state.locations.insert(loc, location);
        state
    }

    fn count_kind(events: &[GameEvent], kind: &str) -> usize {
        events.iter().filter(|e| e.kind() == kind).count()
    }

    #[test]
    fn seven_days_produce_the_weekly_shape() {
        let reg = registry();
        let state = agent_with_one_washer();
        let events = run(&reg, &state, 7).unwrap();

        assert_eq!(count_kind(&events, kinds::TIME_ADVANCED), 7);
        assert_eq!(count_kind(&events, kinds::DAILY_REVENUE_PROCESSED), 7);
        assert_eq!(count_kind(&events, kinds::MACHINE_WEAR_UPDATED), 7);
        assert_eq!(count_kind(&events, kinds::WEEKLY_FIXED_COSTS_BILLED), 1);
        // 7 revenue transfers + 1 weekly expense.
        assert_eq!(count_kind(&events, kinds::FUNDS_TRANSFERRED), 8);
    }

    #[test]
    fn week_ends_at_week_one_day_zero() {
        let reg = registry();
        let state = agent_with_one_washer();
        let events = run(&reg, &state, 7).unwrap();

        // Replaying the ticker's output over the same snapshot lands on
        // the rolled-over week.
        let mut replayed = state.clone();
        for event in &events {
            replayed = reg.reduce(replayed, event).unwrap();
        }
        assert_eq!(replayed.calendar, Calendar::new(1, 0));
    }

    #[test]
    fn revenue_is_deterministic_for_the_same_snapshot() {
        let reg = registry();
        let state = agent_with_one_washer();
        let a = run(&reg, &state, 3).unwrap();
        let b = run(&reg, &state, 3).unwrap();
        let payloads_a: Vec<_> = a.iter().map(|e| e.payload.clone()).collect();
        let payloads_b: Vec<_> = b.iter().map(|e| e.payload.clone()).collect();
        assert_eq!(payloads_a, payloads_b);
    }

    #[test]
    fn condition_crossing_the_threshold_breaks_the_machine() {
        let reg = registry();
        let mut state = agent_with_one_washer();
        state
            .locations
            .get_mut(&LocationId::new("LOC_001"))
            .unwrap()
            .equipment
            .get_mut(&MachineId::new("MCH-1"))
            .unwrap()
            .condition = 11.0;

        let events = run(&reg, &state, 1).unwrap();
        assert_eq!(count_kind(&events, kinds::MACHINE_STATUS_CHANGED), 1);
    }

    #[test]
    fn scandals_decay_on_the_week_boundary() {
        let reg = registry();
        let mut state = agent_with_one_washer();
        state.active_scandals.push(spincycle_domain::ScandalMarker {
            id: spincycle_core::ScandalId::new("SCN-1"),
            description: "mystery suds".into(),
            severity: 0.3,
            start_week: 0,
            duration_weeks: 4,
            weekly_decay: 0.1,
        });
        let events = run(&reg, &state, 7).unwrap();
        assert_eq!(count_kind(&events, kinds::SCANDAL_MARKER_DECAYED), 1);
    }

    #[test]
    fn month_boundary_accrues_interest_and_tax() {
        let reg = registry();
        let mut state = agent_with_one_washer();
        state.calendar = Calendar::new(3, 0);
        state.loans.insert(
            spincycle_core::LoanId::new("LN-1"),
            spincycle_domain::Loan {
                id: spincycle_core::LoanId::new("LN-1"),
                kind: spincycle_domain::LoanKind::Equipment,
                principal: Money::from_cents(2_400_00),
                outstanding: Money::from_cents(2_400_00),
                annual_rate: 0.06,
                term_weeks: Some(24),
                taken_week: 0,
            },
        );

        let events = run(&reg, &state, 7).unwrap();
        assert_eq!(count_kind(&events, kinds::INTEREST_ACCRUED), 1);
        assert_eq!(count_kind(&events, kinds::TAX_LIABILITY_CALCULATED), 1);

        let interest = events
            .iter()
            .find_map(|e| match &e.payload {
                EventPayload::InterestAccrued { amount, .. } => Some(*amount),
                _ => None,
            })
            .unwrap();
        // 6% annual on $2400 is $12/month.
        assert_eq!(interest, Money::from_cents(12_00));
    }
}

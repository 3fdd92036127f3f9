//! End-to-end pipeline tests: command → journal → fold → adjudication,
//! on both journal backends.

use anyhow::Result;
use chrono::Utc;
use spincycle_core::{AgentId, Calendar, LocationId, MachineId, Money};
use spincycle_domain::economy;
use spincycle_domain::{MachineKind, RegulatoryStatus, ServiceKind};
use spincycle_engine::{Engine, EngineError, StateBuilder};
use spincycle_events::{kinds, Command, CommandPayload, EventPayload, GameEvent, TransferKind};
use spincycle_store::{FileJournal, InMemoryJournal, Journal};
use uuid::Uuid;

fn agent() -> AgentId {
    AgentId::new("A")
}

fn loc() -> LocationId {
    LocationId::new("LOC_001")
}

fn cmd(payload: CommandPayload) -> Command {
    Command::new(agent(), payload)
}

fn count_kind(events: &[GameEvent], kind: &str) -> usize {
    events.iter().filter(|e| e.kind() == kind).count()
}

fn count_transfers(events: &[GameEvent], wanted: TransferKind) -> usize {
    events
        .iter()
        .filter(|e| {
            matches!(&e.payload, EventPayload::FundsTransferred { kind, .. } if *kind == wanted)
        })
        .count()
}

#[test]
fn set_price_updates_the_active_price_list() -> Result<()> {
    let engine = Engine::new(InMemoryJournal::new());
    engine.create_agent(&agent(), "Suds & Co")?;

    let outcome = engine.execute_command(cmd(CommandPayload::SetPrice {
        location_id: loc(),
        service: ServiceKind::StandardWash,
        new_price: 3.75,
    }))?;
    assert_eq!(count_kind(&outcome.events, kinds::PRICE_SET), 1);

    let state = engine.get_current_state(&agent())?;
    assert_eq!(
        state.locations[&loc()].active_pricing[&ServiceKind::StandardWash],
        Money::from_dollars(3.75)
    );
    Ok(())
}

#[test]
fn line_of_credit_loan_lands_in_cash_and_debt() -> Result<()> {
    let engine = Engine::new(InMemoryJournal::new());
    engine.create_agent(&agent(), "Suds & Co")?;
    assert_eq!(engine.get_current_state(&agent())?.credit_rating, 50);

    let outcome = engine.execute_command(cmd(CommandPayload::TakeLoan {
        kind: spincycle_domain::LoanKind::LineOfCredit,
        amount: 3_000.0,
        location_id: None,
    }))?;
    assert_eq!(count_kind(&outcome.events, kinds::LOAN_TAKEN), 1);
    assert_eq!(count_transfers(&outcome.events, TransferKind::Loan), 1);

    let state = engine.get_current_state(&agent())?;
    assert_eq!(state.cash, Money::from_dollars(13_000.0));
    assert_eq!(state.total_debt(), Money::from_dollars(3_000.0));
    Ok(())
}

/// Seed a minimal hand-stamped world: one agent, one location, one
/// operational washer, default pricing, cleanliness 85.
fn seed_single_washer_world(journal: &impl Journal) {
    let stamp = |payload: EventPayload| GameEvent {
        event_id: Uuid::now_v7(),
        agent_id: agent(),
        week: 0,
        day: 0,
        timestamp: Utc::now(),
        payload,
    };
    let mut events = vec![
        stamp(EventPayload::AgentCreated {
            name: "Single Washer".into(),
            starting_cash: economy::STARTING_CASH,
            credit_limit: economy::STARTING_CREDIT_LIMIT,
            credit_rating: economy::INITIAL_CREDIT_RATING,
            social_score: economy::INITIAL_SOCIAL_SCORE,
        }),
        stamp(EventPayload::LocationOpened {
            location_id: loc(),
            zone: "downtown".into(),
            monthly_rent: Money::from_cents(1_200_00),
            listing_id: None,
        }),
        stamp(EventPayload::EquipmentPurchased {
            location_id: loc(),
            machine_id: MachineId::new("MCH-1"),
            kind: MachineKind::Washer,
            unit_price: economy::equipment_unit_price(MachineKind::Washer),
            vendor_id: spincycle_core::VendorId::new(economy::DEFAULT_VENDOR),
        }),
    ];
    for (service, price) in economy::default_price_list() {
        events.push(stamp(EventPayload::PriceSet {
            location_id: loc(),
            service,
            price,
        }));
    }
    journal.append_batch(&events).unwrap();
}

#[test]
fn one_week_tick_produces_the_specified_shape() -> Result<()> {
    let journal = InMemoryJournal::new();
    seed_single_washer_world(&journal);
    let engine = Engine::new(journal);

    let events = engine.advance_time(&agent(), 7)?;

    assert_eq!(count_kind(&events, kinds::TIME_ADVANCED), 7);
    assert_eq!(count_kind(&events, kinds::DAILY_REVENUE_PROCESSED), 7);
    assert_eq!(count_kind(&events, kinds::MACHINE_WEAR_UPDATED), 7);
    assert_eq!(count_kind(&events, kinds::WEEKLY_FIXED_COSTS_BILLED), 1);
    assert_eq!(count_transfers(&events, TransferKind::Revenue), 7);
    assert_eq!(count_transfers(&events, TransferKind::Expense), 1);
    // No scandals seeded, so no decay events.
    assert_eq!(count_kind(&events, kinds::SCANDAL_MARKER_DECAYED), 0);

    let state = engine.get_current_state(&agent())?;
    assert_eq!(state.calendar, Calendar::new(1, 0));
    Ok(())
}

#[test]
fn buying_two_washers_spends_four_thousand() -> Result<()> {
    let engine = Engine::new(InMemoryJournal::new());
    engine.create_agent(&agent(), "Suds & Co")?;
    let machines_before = engine.get_current_state(&agent())?.locations[&loc()]
        .equipment
        .len();

    let outcome = engine.execute_command(cmd(CommandPayload::BuyEquipment {
        location_id: loc(),
        kind: MachineKind::Washer,
        vendor_id: Some(spincycle_core::VendorId::new(economy::DEFAULT_VENDOR)),
        quantity: 2,
    }))?;
    assert_eq!(count_kind(&outcome.events, kinds::EQUIPMENT_PURCHASED), 2);
    assert_eq!(count_transfers(&outcome.events, TransferKind::Expense), 1);

    let state = engine.get_current_state(&agent())?;
    assert_eq!(state.cash, Money::from_dollars(6_000.0));
    let location = &state.locations[&loc()];
    assert_eq!(location.equipment.len(), machines_before + 2);
    assert!(location.equipment.values().all(|m| m.condition == 100.0));
    Ok(())
}

#[test]
fn predatory_price_draws_regulatory_consequences() -> Result<()> {
    let engine = Engine::new(InMemoryJournal::new());
    engine.create_agent(&agent(), "Suds & Co")?;

    let outcome = engine.execute_command(cmd(CommandPayload::SetPrice {
        location_id: loc(),
        service: ServiceKind::StandardWash,
        new_price: 0.10,
    }))?;
    assert_eq!(count_kind(&outcome.events, kinds::PRICE_SET), 1);
    assert_eq!(count_kind(&outcome.events, kinds::REGULATORY_FINDING), 1);
    assert_eq!(count_kind(&outcome.events, kinds::REGULATORY_STATUS_UPDATED), 1);

    let state = engine.get_current_state(&agent())?;
    assert_eq!(state.pending_fines.len(), 1);
    assert_eq!(state.regulatory_status, RegulatoryStatus::Warning);
    Ok(())
}

/// Drive scenarios 1–5 against one engine; used by the fold-equality
/// and backend-parity tests.
fn run_full_scenario(engine: &Engine<impl Journal>) -> Result<()> {
    engine.create_agent(&agent(), "Suds & Co")?;
    engine.execute_command(cmd(CommandPayload::SetPrice {
        location_id: loc(),
        service: ServiceKind::StandardWash,
        new_price: 3.75,
    }))?;
    engine.execute_command(cmd(CommandPayload::TakeLoan {
        kind: spincycle_domain::LoanKind::LineOfCredit,
        amount: 3_000.0,
        location_id: None,
    }))?;
    engine.advance_time(&agent(), 7)?;
    engine.execute_command(cmd(CommandPayload::BuyEquipment {
        location_id: loc(),
        kind: MachineKind::Washer,
        vendor_id: None,
        quantity: 2,
    }))?;
    engine.execute_command(cmd(CommandPayload::SetPrice {
        location_id: loc(),
        service: ServiceKind::StandardWash,
        new_price: 0.10,
    }))?;
    Ok(())
}

#[test]
fn fold_from_empty_log_matches_the_running_state() -> Result<()> {
    let engine = Engine::new(InMemoryJournal::new());
    run_full_scenario(&engine)?;

    let running = engine.get_current_state(&agent())?;
    let refolded = engine.get_current_state(&agent())?;
    assert_eq!(running, refolded);

    // Byte-identical across independent folds.
    assert_eq!(
        serde_json::to_vec(&running)?,
        serde_json::to_vec(&refolded)?
    );
    Ok(())
}

#[test]
fn file_backend_replays_to_the_same_state() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("journal.log");

    let in_memory = Engine::new(InMemoryJournal::new());
    run_full_scenario(&in_memory)?;

    {
        let on_disk = Engine::new(FileJournal::open(&path)?);
        run_full_scenario(&on_disk)?;
    }

    // A fresh process over the same file folds to the same snapshot.
    let reopened = Engine::new(FileJournal::open(&path)?);
    let memory_state = in_memory.get_current_state(&agent())?;
    let disk_state = reopened.get_current_state(&agent())?;
    assert_eq!(memory_state, disk_state);
    Ok(())
}

#[test]
fn point_in_time_fold_stops_at_the_bound() -> Result<()> {
    let journal = InMemoryJournal::new();
    seed_single_washer_world(&journal);
    let engine = Engine::new(journal);
    engine.advance_time(&agent(), 7)?;

    let mid_week = engine.get_state_at(&agent(), Calendar::new(0, 3))?;
    assert_eq!(mid_week.calendar, Calendar::new(0, 3));

    let full = engine.get_current_state(&agent())?;
    assert_eq!(full.calendar, Calendar::new(1, 0));
    assert!(mid_week.market_share_loads < full.market_share_loads);
    Ok(())
}

#[test]
fn history_tail_returns_the_last_events_in_order() -> Result<()> {
    let engine = Engine::new(InMemoryJournal::new());
    engine.create_agent(&agent(), "Suds & Co")?;
    engine.advance_time(&agent(), 3)?;

    let full = engine.get_history(&agent(), None)?;
    let tail = engine.get_history(&agent(), Some(5))?;
    assert_eq!(tail.len(), 5);
    assert_eq!(&full[full.len() - 5..], &tail[..]);
    Ok(())
}

#[test]
fn communication_mirrors_across_both_streams() -> Result<()> {
    let engine = Engine::new(InMemoryJournal::new());
    engine.create_agent(&agent(), "Suds & Co")?;
    engine.create_agent(&AgentId::new("B"), "Rinse Rivals")?;

    let outcome = engine.execute_command(cmd(CommandPayload::CommunicateToAgent {
        to: AgentId::new("B"),
        message: "fancy a truce?".into(),
    }))?;
    assert_eq!(count_kind(&outcome.events, kinds::AGENT_MESSAGE_SENT), 1);
    assert_eq!(count_kind(&outcome.events, kinds::AGENT_MESSAGE_RECEIVED), 1);

    let b_state = engine.get_current_state(&AgentId::new("B"))?;
    assert_eq!(b_state.private_notes, vec!["from A: fancy a truce?".to_string()]);
    Ok(())
}

#[test]
fn repeated_aligned_messaging_triggers_a_collusion_investigation() -> Result<()> {
    let engine = Engine::new(InMemoryJournal::new());
    engine.create_agent(&agent(), "Suds & Co")?;
    engine.create_agent(&AgentId::new("B"), "Rinse Rivals")?;

    // Both agents sit on the default price list, well inside the
    // alignment tolerance.
    for n in 0..3 {
        engine.execute_command(cmd(CommandPayload::CommunicateToAgent {
            to: AgentId::new("B"),
            message: format!("hold at three dollars, round {n}"),
        }))?;
    }

    let state = engine.get_current_state(&agent())?;
    assert_eq!(state.investigations.len(), 1);
    assert!(state.investigations[0].subject.contains("B"));
    Ok(())
}

#[test]
fn buyout_retires_the_seller_and_charges_the_buyer() -> Result<()> {
    let engine = Engine::new(InMemoryJournal::new());
    engine.create_agent(&agent(), "Suds & Co")?;
    engine.create_agent(&AgentId::new("B"), "Rinse Rivals")?;

    engine.execute_command(cmd(CommandPayload::ProposeBuyout {
        target: AgentId::new("B"),
        offer: 9_000.0,
    }))?;

    let b_state = engine.get_current_state(&AgentId::new("B"))?;
    assert_eq!(b_state.pending_buyout_offers.len(), 1);
    let correlation_id = b_state.pending_buyout_offers.keys().next().unwrap().clone();

    engine.execute_command(Command::new(
        AgentId::new("B"),
        CommandPayload::AcceptBuyoutOffer { correlation_id },
    ))?;

    let seller = engine.get_current_state(&AgentId::new("B"))?;
    assert!(seller.retired);
    assert!(seller.locations.is_empty());
    assert_eq!(seller.cash, Money::from_dollars(19_000.0));

    let buyer = engine.get_current_state(&agent())?;
    assert_eq!(buyer.cash, Money::from_dollars(1_000.0));

    // A retired agent accepts no further commands.
    let err = engine
        .execute_command(Command::new(
            AgentId::new("B"),
            CommandPayload::SetPrice {
                location_id: loc(),
                service: ServiceKind::Dry,
                new_price: 2.0,
            },
        ))
        .unwrap_err();
    assert!(matches!(err, EngineError::Validation(_)));
    Ok(())
}

#[test]
fn append_only_law_holds_across_operations() -> Result<()> {
    let engine = Engine::new(InMemoryJournal::new());
    engine.create_agent(&agent(), "Suds & Co")?;
    let snapshot_after_create = engine.journal().load_all()?;

    engine.advance_time(&agent(), 2)?;
    let later = engine.journal().load_all()?;

    assert!(later.len() > snapshot_after_create.len());
    assert_eq!(&later[..snapshot_after_create.len()], &snapshot_after_create[..]);
    Ok(())
}

#[test]
fn replaying_the_log_is_deterministic_for_every_agent() -> Result<()> {
    let engine = Engine::new(InMemoryJournal::new());
    run_full_scenario(&engine)?;

    let stream = engine.journal().load_for_agent(&agent())?;
    let mut reducers = spincycle_engine::ReducerRegistry::new();
    spincycle_engine::reducers::register_defaults(&mut reducers);
    let builder = StateBuilder::new(&reducers);

    let a = builder.fold(&agent(), &stream)?;
    let b = builder.fold(&agent(), &stream)?;
    assert_eq!(serde_json::to_vec(&a)?, serde_json::to_vec(&b)?);
    Ok(())
}

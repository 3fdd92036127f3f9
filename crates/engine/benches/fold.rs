//! Fold throughput: how fast a season of events replays into state.

use criterion::{criterion_group, criterion_main, Criterion};
use spincycle_core::AgentId;
use spincycle_engine::{reducers, Engine, ReducerRegistry, StateBuilder};
use spincycle_store::{InMemoryJournal, Journal};

fn seeded_stream() -> Vec<spincycle_events::GameEvent> {
    let agent = AgentId::new("BENCH");
    let engine = Engine::new(InMemoryJournal::new());
    engine.create_agent(&agent, "Bench & Sons").unwrap();
    // Two months of autonomous operation.
    for _ in 0..8 {
        engine.advance_time(&agent, 7).unwrap();
    }
    engine.journal().load_for_agent(&agent).unwrap()
}

fn bench_fold(c: &mut Criterion) {
    let stream = seeded_stream();
    let mut registry = ReducerRegistry::new();
    reducers::register_defaults(&mut registry);
    let builder = StateBuilder::new(&registry);
    let agent = AgentId::new("BENCH");

    c.bench_function("fold_two_months", |b| {
        b.iter(|| builder.fold(&agent, &stream).unwrap())
    });
}

criterion_group!(benches, bench_fold);
criterion_main!(benches);

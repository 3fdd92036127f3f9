//! Game master: narrative injection from state and a seeded PRNG.
//!
//! The game master observes snapshots at two hooks (post-command,
//! post-tick) and emits drafts; it never mutates state. Every random
//! draw comes from a PRNG seeded by (agent, week, day, stream
//! position), so replaying the same log against the same hooks
//! reproduces the same narrative.

use rand::Rng;
use rand_chacha::ChaCha8Rng;
use spincycle_core::{DilemmaId, ListingId, Money};
use spincycle_domain::economy;
use spincycle_domain::{AgentState, LocationState, ServiceKind};
use spincycle_events::{EventDraft, EventPayload};

use crate::context::{seeded_rng, IdSource};

/// Hook salt folded into the PRNG counter so a tick draw never shares
/// a sequence with any other seeded consumer at the same position.
const POST_TICK_SALT: u64 = 0x5454;

const REVIEW_CHANCE: f64 = 0.30;
const VENDOR_FLUCTUATION_CHANCE: f64 = 0.15;
const DISRUPTION_CHANCE: f64 = 0.05;
const COMPETITOR_MOVE_CHANCE: f64 = 0.25;
const LISTING_CHANCE: f64 = 0.20;

const LISTING_ZONES: [&str; 4] = ["riverside", "campus", "old town", "industrial"];

struct DilemmaSpec {
    id: &'static str,
    title: &'static str,
    description: &'static str,
    trigger: fn(&AgentState) -> bool,
}

const DILEMMA_CATALOG: [DilemmaSpec; 5] = [
    DilemmaSpec {
        id: "DIL-WINDFALL",
        title: "The quiet investor",
        description: "A flush balance sheet attracts an investor offering \
                      off-the-books terms.",
        trigger: |s| s.cash > Money::from_cents(20_000_00),
    },
    DilemmaSpec {
        id: "DIL-BROKEN-FLEET",
        title: "Corner-cutting mechanic",
        description: "With machines down, a mechanic offers salvaged parts \
                      of dubious origin.",
        trigger: |s| {
            s.locations
                .values()
                .flat_map(|l| l.equipment.values())
                .filter(|m| m.status == spincycle_domain::MachineStatus::Broken)
                .count()
                >= 2
        },
    },
    DilemmaSpec {
        id: "DIL-SPIN-DOCTOR",
        title: "The spin doctor",
        description: "A PR firm promises to make the scandal disappear, \
                      no questions answered.",
        trigger: |s| !s.active_scandals.is_empty(),
    },
    DilemmaSpec {
        id: "DIL-WAGE-PRESSURE",
        title: "Off-the-clock hours",
        description: "A manager suggests trimming payroll by rounding \
                      shift hours down.",
        trigger: |s| {
            s.locations
                .values()
                .flat_map(|l| l.staff.values())
                .any(|m| m.hourly_rate < Money::from_cents(8_00))
        },
    },
    DilemmaSpec {
        id: "DIL-EXCLUSIVE-SQUEEZE",
        title: "Squeeze the supply line",
        description: "Your exclusive supplier hints they could short your \
                      competitor's deliveries.",
        trigger: |s| {
            s.locations.values().any(|l| {
                l.vendors
                    .values()
                    .any(|v| v.has_active_exclusive(s.calendar.week))
            })
        },
    },
];

#[derive(Debug, Default)]
pub struct GameMaster;

impl GameMaster {
    pub fn new() -> Self {
        Self
    }

    /// Hook after a player command lands: dilemma predicates only, no
    /// random draw.
    pub fn post_command(&self, state: &AgentState, _stream_position: u64) -> Vec<EventDraft> {
        self.dilemma_drafts(state)
    }

    /// Hook after a tick: dilemmas plus scheduled world events.
    pub fn post_tick(&self, state: &AgentState, stream_position: u64) -> Vec<EventDraft> {
        let mut rng = seeded_rng(
            &state.id,
            state.calendar,
            stream_position.wrapping_add(POST_TICK_SALT),
        );
        let mut drafts = self.dilemma_drafts(state);

        for location in state.locations.values() {
            self.review_drafts(state, location, &mut rng, &mut drafts);
            self.vendor_drafts(state, location, &mut rng, &mut drafts);
            self.competitor_drafts(state, location, &mut rng, &mut drafts);
        }
        self.listing_drafts(state, &mut rng, &mut drafts);
        drafts
    }

    fn dilemma_drafts(&self, state: &AgentState) -> Vec<EventDraft> {
        DILEMMA_CATALOG
            .iter()
            .filter(|spec| {
                let id = DilemmaId::new(spec.id);
                !state.active_dilemmas.contains_key(&id)
                    && !state.resolved_dilemmas.contains(&id)
                    && (spec.trigger)(state)
            })
            .map(|spec| {
                EventDraft::new(
                    state.id.clone(),
                    EventPayload::DilemmaTriggered {
                        dilemma_id: DilemmaId::new(spec.id),
                        title: spec.title.to_string(),
                        description: spec.description.to_string(),
                    },
                )
            })
            .collect()
    }

    fn review_drafts(
        &self,
        state: &AgentState,
        location: &LocationState,
        rng: &mut ChaCha8Rng,
        drafts: &mut Vec<EventDraft>,
    ) {
        if !rng.gen_bool(REVIEW_CHANCE) {
            return;
        }
        let machines = location.equipment.len();
        let mean_condition = if machines == 0 {
            0.0
        } else {
            location.equipment.values().map(|m| m.condition).sum::<f64>() / machines as f64
        };
        let ours = location
            .active_pricing
            .get(&ServiceKind::StandardWash)
            .copied()
            .unwrap_or_else(|| economy::default_price_list()[&ServiceKind::StandardWash]);
        let reference = location
            .observed_competitor_prices
            .get(&ServiceKind::StandardWash)
            .copied()
            .unwrap_or(ours);
        let price_factor = if ours <= reference || reference == Money::ZERO {
            1.0
        } else {
            (reference.as_dollars() / ours.as_dollars()).max(0.2)
        };

        let score =
            0.4 * location.cleanliness / 100.0 + 0.4 * mean_condition / 100.0 + 0.2 * price_factor;
        let rating = ((score * 5.0).round() as u8).clamp(1, 5);
        let comment = match rating {
            5 => "Spotless machines and fair prices.",
            4 => "Reliable wash, would come back.",
            3 => "Does the job.",
            2 => "Half the dryers were down.",
            _ => "Grimy floors and broken machines.",
        };
        drafts.push(EventDraft::new(
            state.id.clone(),
            EventPayload::CustomerReviewSubmitted {
                location_id: location.id.clone(),
                rating,
                comment: comment.to_string(),
            },
        ));
    }

    fn vendor_drafts(
        &self,
        state: &AgentState,
        location: &LocationState,
        rng: &mut ChaCha8Rng,
        drafts: &mut Vec<EventDraft>,
    ) {
        let today = state.calendar.absolute_day();
        for vendor in location.vendors.values() {
            if vendor.disrupted {
                if vendor.disrupted_until_day.is_some_and(|until| today >= until) {
                    drafts.push(EventDraft::new(
                        state.id.clone(),
                        EventPayload::DeliveryDisruptionEnded {
                            location_id: location.id.clone(),
                            vendor_id: vendor.id.clone(),
                        },
                    ));
                }
                continue;
            }
            if rng.gen_bool(DISRUPTION_CHANCE) {
                drafts.push(EventDraft::new(
                    state.id.clone(),
                    EventPayload::DeliveryDisruptionStarted {
                        location_id: location.id.clone(),
                        vendor_id: vendor.id.clone(),
                        duration_days: rng.gen_range(2..=5),
                    },
                ));
                continue;
            }
            if rng.gen_bool(VENDOR_FLUCTUATION_CHANCE) {
                let factor = rng.gen_range(0.9..=1.1);
                let new_unit_price = vendor.unit_price.scale(factor).max(Money::from_cents(1));
                if new_unit_price != vendor.unit_price {
                    drafts.push(EventDraft::new(
                        state.id.clone(),
                        EventPayload::VendorPriceFluctuated {
                            location_id: location.id.clone(),
                            vendor_id: vendor.id.clone(),
                            new_unit_price,
                        },
                    ));
                }
            }
        }
    }

    fn competitor_drafts(
        &self,
        state: &AgentState,
        location: &LocationState,
        rng: &mut ChaCha8Rng,
        drafts: &mut Vec<EventDraft>,
    ) {
        if !rng.gen_bool(COMPETITOR_MOVE_CHANCE) {
            return;
        }
        let service = ServiceKind::ALL[rng.gen_range(0..ServiceKind::ALL.len())];
        let defaults = economy::default_price_list();
        let ours = location
            .active_pricing
            .get(&service)
            .copied()
            .unwrap_or(defaults[&service]);
        let current = location
            .observed_competitor_prices
            .get(&service)
            .copied()
            .unwrap_or(defaults[&service]);

        // The NPC drifts a third of the way toward our posted price,
        // with a little noise.
        let drift = (ours - current).scale(0.3);
        let noise = Money::from_cents(rng.gen_range(-10..=10));
        let price = (current + drift + noise).max(economy::MIN_SERVICE_PRICE);
        if price != current {
            drafts.push(EventDraft::new(
                state.id.clone(),
                EventPayload::CompetitorPriceChanged {
                    location_id: location.id.clone(),
                    service,
                    price,
                },
            ));
        }
    }

    fn listing_drafts(
        &self,
        state: &AgentState,
        rng: &mut ChaCha8Rng,
        drafts: &mut Vec<EventDraft>,
    ) {
        if !state.available_listings.is_empty() || !rng.gen_bool(LISTING_CHANCE) {
            return;
        }
        let mut ids = IdSource::seeded(&state.id, state.calendar, rng.r#gen());
        let zone = LISTING_ZONES[rng.gen_range(0..LISTING_ZONES.len())];
        drafts.push(EventDraft::new(
            state.id.clone(),
            EventPayload::LocationListingPosted {
                listing_id: ListingId::new(ids.mint("LST")),
                zone: zone.to_string(),
                monthly_rent: Money::from_cents(rng.gen_range(800..=2_000) * 100),
                purchase_price: Money::from_cents(rng.gen_range(5_000..=15_000) * 100),
            },
        ));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::handlers::testing::seeded_agent;

    #[test]
    fn post_tick_is_deterministic_for_the_same_inputs() {
        let gm = GameMaster::new();
        let state = seeded_agent();
        let a = gm.post_tick(&state, 42);
        let b = gm.post_tick(&state, 42);
        assert_eq!(a, b);
    }

    #[test]
    fn stream_position_varies_the_draw() {
        let gm = GameMaster::new();
        let mut state = seeded_agent();
        state.calendar = spincycle_core::Calendar::new(5, 2);
        // Across many positions the hook must not be constant.
        let distinct: std::collections::BTreeSet<usize> =
            (0..64).map(|seq| gm.post_tick(&state, seq).len()).collect();
        assert!(distinct.len() > 1);
    }

    #[test]
    fn windfall_dilemma_triggers_once() {
        let gm = GameMaster::new();
        let mut state = seeded_agent();
        state.cash = Money::from_cents(25_000_00);

        let drafts = gm.post_command(&state, 7);
        assert!(drafts.iter().any(|d| matches!(
            &d.payload,
            EventPayload::DilemmaTriggered { dilemma_id, .. }
                if dilemma_id.as_str() == "DIL-WINDFALL"
        )));

        // Once resolved, the same predicate stays quiet.
        state
            .resolved_dilemmas
            .push(DilemmaId::new("DIL-WINDFALL"));
        let drafts = gm.post_command(&state, 8);
        assert!(drafts.is_empty());
    }

    #[test]
    fn game_master_never_drafts_for_other_streams() {
        let gm = GameMaster::new();
        let state = seeded_agent();
        for seq in 0..32 {
            for draft in gm.post_tick(&state, seq) {
                assert_eq!(draft.stream, state.id);
            }
        }
    }
}

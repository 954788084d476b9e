//! Plant Paradise progression rules: pure functions over [`GameState`],
//! fully testable without storage or timers.

use rand::Rng;

use super::catalog::{GeneratorKind, Milestone, PackKind, PlantKey, Rarity, RarityRates};
use super::state::{GameState, Slot, SlotId};

/// Why an action was not accepted. An `Err` never leaves a partial change.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum ActionError {
    #[error("not enough nectar: need {cost}, have {available}")]
    InsufficientNectar { cost: f64, available: f64 },

    #[error("not enough sunlight: need {cost}, have {available}")]
    InsufficientSunlight { cost: u32, available: u32 },

    #[error("a {0:?} pack is already opening")]
    PackAlreadyOpening(PackKind),

    #[error("no empty garden slot")]
    NoEmptySlot,

    #[error("slot {0} is empty")]
    EmptySlot(SlotId),

    #[error("slot {0} is still growing")]
    NotReady(SlotId),

    #[error("{0:?} is not sold for sunlight")]
    NotSunlightPlant(PlantKey),

    #[error("unknown generator {0:?}")]
    UnknownGenerator(GeneratorKind),
}

/// What an action or deferred task did, for the presentation layer.
#[derive(Clone, Debug, PartialEq)]
pub enum GameEvent {
    PackOpening { pack: PackKind, cost: f64 },
    PackRevealed {
        pack: PackKind,
        plant: PlantKey,
        slot: Option<SlotId>,
    },
    SunlightPlantBought {
        plant: PlantKey,
        slot: SlotId,
        cost: u32,
    },
    GeneratorBought {
        generator: GeneratorKind,
        level: u32,
        cost: f64,
    },
    Harvested {
        slot: SlotId,
        plant: PlantKey,
        reward: f64,
    },
    MilestoneReached { threshold: u32, sunlight: u32 },
    PassiveIncome { amount: f64 },
    Reset,
}

// ── Growth ──────────────────────────────────────────────────────

/// Growth in percent, clamped to `0..=100`.
pub fn progress_percent(slot: &Slot, now: f64) -> f64 {
    let elapsed = now - slot.planted_time;
    (100.0 * elapsed / slot.plant.info().growth_time).clamp(0.0, 100.0)
}

pub fn is_ready(slot: &Slot, now: f64) -> bool {
    progress_percent(slot, now) >= 100.0
}

/// Milliseconds until harvestable, never negative.
pub fn remaining_ms(slot: &Slot, now: f64) -> f64 {
    (slot.plant.info().growth_time - (now - slot.planted_time)).max(0.0)
}

// ── Reward roll ─────────────────────────────────────────────────

/// Walk rarities in order, accumulating `rates`; the first bucket whose
/// cumulative rate reaches `draw` and that has members wins. Buckets with a
/// zero rate are never selected.
pub fn pick_rarity(
    rates: &RarityRates,
    draw: f64,
    has_members: impl Fn(Rarity) -> bool,
) -> Option<Rarity> {
    let mut cumulative = 0.0;
    for rarity in Rarity::ALL {
        let rate = rates.rate(rarity);
        cumulative += rate;
        if rate > 0.0 && cumulative >= draw && has_members(rarity) {
            return Some(rarity);
        }
    }
    None
}

/// Roll a pack plant. Falls back to a random common plant when no bucket
/// matched; `None` only if the catalog has no common plants.
pub fn roll_plant<R: Rng + ?Sized>(rates: &RarityRates, rng: &mut R) -> Option<PlantKey> {
    let draw = rng.random_range(0.0..100.0);
    let rarity = pick_rarity(rates, draw, |r| PlantKey::pack_plants(r).next().is_some())
        .unwrap_or(Rarity::Common);
    let bucket: Vec<PlantKey> = PlantKey::pack_plants(rarity).collect();
    choose(rng, &bucket)
}

fn choose<T: Copy, R: Rng + ?Sized>(rng: &mut R, items: &[T]) -> Option<T> {
    if items.is_empty() {
        return None;
    }
    Some(items[rng.random_range(0..items.len())])
}

/// Put `plant` into a uniformly random empty slot. `None` when the garden is full.
fn plant_in_random_slot<R: Rng + ?Sized>(
    state: &mut GameState,
    plant: PlantKey,
    rng: &mut R,
    now: f64,
) -> Option<SlotId> {
    let slot_id = choose(rng, &state.empty_slots())?;
    state.active_slots.insert(
        slot_id,
        Slot {
            plant,
            planted_time: now,
        },
    );
    Some(slot_id)
}

fn record_collected(state: &mut GameState, plant: PlantKey) {
    *state.plant_collection.entry(plant).or_insert(0) += 1;
    state.last_reward = Some(plant);
}

// ── Milestones ──────────────────────────────────────────────────

/// Pay every milestone crossed since the last payout. Skipped milestones are
/// back-paid. No-op unless a higher threshold has been reached.
pub fn apply_milestones(state: &mut GameState, milestones: &[Milestone]) -> Option<GameEvent> {
    let total = state.total_plants_collected();
    let previous = state.last_milestone_reached;
    let highest = milestones
        .iter()
        .map(|m| m.plants_threshold)
        .filter(|&t| t <= total)
        .max()?;
    if highest <= previous {
        return None;
    }

    let sunlight: u32 = milestones
        .iter()
        .filter(|m| m.plants_threshold > previous && m.plants_threshold <= total)
        .map(|m| m.sunlight_reward)
        .sum();
    state.sunlight += sunlight;
    state.last_milestone_reached = highest;
    Some(GameEvent::MilestoneReached {
        threshold: highest,
        sunlight,
    })
}

// ── Actions ─────────────────────────────────────────────────────

/// First phase of opening a pack: pay and take the opening mutex.
pub fn begin_pack_open(state: &mut GameState, pack: PackKind) -> Result<GameEvent, ActionError> {
    if let Some(opening) = state.opening_pack {
        return Err(ActionError::PackAlreadyOpening(opening));
    }
    let cost = pack.cost();
    if state.nectar < cost {
        return Err(ActionError::InsufficientNectar {
            cost,
            available: state.nectar,
        });
    }
    state.nectar -= cost;
    state.opening_pack = Some(pack);
    Ok(GameEvent::PackOpening { pack, cost })
}

/// Second phase: roll, record, plant if there is room, release the mutex.
/// `None` if no pack was opening.
pub fn reveal_pack<R: Rng + ?Sized>(
    state: &mut GameState,
    rng: &mut R,
    now: f64,
) -> Option<GameEvent> {
    let pack = state.opening_pack.take()?;
    let plant = roll_plant(&pack.rarity_rates(), rng)?;
    record_collected(state, plant);
    let slot = plant_in_random_slot(state, plant, rng, now);
    Some(GameEvent::PackRevealed { pack, plant, slot })
}

pub fn buy_sunlight_plant<R: Rng + ?Sized>(
    state: &mut GameState,
    plant: PlantKey,
    rng: &mut R,
    now: f64,
) -> Result<GameEvent, ActionError> {
    let cost = plant
        .sunlight_cost()
        .ok_or(ActionError::NotSunlightPlant(plant))?;
    if state.sunlight < cost {
        return Err(ActionError::InsufficientSunlight {
            cost,
            available: state.sunlight,
        });
    }
    let slot = plant_in_random_slot(state, plant, rng, now).ok_or(ActionError::NoEmptySlot)?;
    state.sunlight -= cost;
    record_collected(state, plant);
    Ok(GameEvent::SunlightPlantBought { plant, slot, cost })
}

pub fn buy_generator(state: &mut GameState, kind: GeneratorKind) -> Result<GameEvent, ActionError> {
    let available = state.nectar;
    let generator = state
        .generators
        .get_mut(&kind)
        .ok_or(ActionError::UnknownGenerator(kind))?;
    let cost = generator.current_cost();
    if available < cost {
        return Err(ActionError::InsufficientNectar { cost, available });
    }
    generator.level += 1;
    let level = generator.level;
    state.nectar -= cost;
    Ok(GameEvent::GeneratorBought {
        generator: kind,
        level,
        cost,
    })
}

pub fn harvest(state: &mut GameState, slot_id: SlotId, now: f64) -> Result<GameEvent, ActionError> {
    let slot = state
        .active_slots
        .get(&slot_id)
        .ok_or(ActionError::EmptySlot(slot_id))?;
    if !is_ready(slot, now) {
        return Err(ActionError::NotReady(slot_id));
    }
    let plant = slot.plant;
    let reward = plant.info().harvest_reward;
    state.active_slots.remove(&slot_id);
    state.nectar += reward;
    Ok(GameEvent::Harvested {
        slot: slot_id,
        plant,
        reward,
    })
}

/// Harvest every ready slot. Readiness is decided for all slots before any
/// is emptied.
pub fn harvest_all(state: &mut GameState, now: f64) -> Vec<GameEvent> {
    let ready: Vec<SlotId> = state
        .active_slots
        .iter()
        .filter(|(_, slot)| is_ready(slot, now))
        .map(|(&id, _)| id)
        .collect();
    ready
        .into_iter()
        .filter_map(|id| harvest(state, id, now).ok())
        .collect()
}

/// Credit one interval of passive income.
pub fn passive_tick(state: &mut GameState) -> Option<GameEvent> {
    let amount = state.total_nectar_per_second();
    if amount <= 0.0 {
        return None;
    }
    state.nectar += amount;
    Some(GameEvent::PassiveIncome { amount })
}

// ── Formatting ──────────────────────────────────────────────────

/// `"42s"` under a minute, `"3m 5s"` otherwise. Seconds round up.
pub fn format_time(ms: f64) -> String {
    let seconds = (ms / 1000.0).ceil().max(0.0) as u64;
    if seconds < 60 {
        return format!("{}s", seconds);
    }
    format!("{}m {}s", seconds / 60, seconds % 60)
}

/// Floor and group with commas (e.g. 1234567.8 → "1,234,567").
pub fn format_number(n: f64) -> String {
    if n < 0.0 {
        return format!("-{}", format_number(-n));
    }
    let s = (n.floor() as u64).to_string();
    let mut result = String::new();
    for (i, c) in s.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            result.push(',');
        }
        result.push(c);
    }
    result.chars().rev().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::garden::catalog::{MILESTONES, SLOT_COUNT};
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn rng() -> Pcg32 {
        Pcg32::seed_from_u64(7)
    }

    fn fill_garden(state: &mut GameState) {
        for id in 1..=SLOT_COUNT {
            state.active_slots.insert(
                id,
                Slot {
                    plant: PlantKey::Grass,
                    planted_time: 0.0,
                },
            );
        }
    }

    // ── growth ──

    #[test]
    fn slot_ready_exactly_at_growth_time() {
        let t0 = 1_700_000_000_000.0;
        let slot = Slot {
            plant: PlantKey::Daisy, // 10s
            planted_time: t0,
        };
        assert!(!is_ready(&slot, t0 + 9_999.0));
        assert!(is_ready(&slot, t0 + 10_000.0));
    }

    #[test]
    fn progress_and_remaining() {
        let slot = Slot {
            plant: PlantKey::Daisy,
            planted_time: 1_000.0,
        };
        assert!((progress_percent(&slot, 6_000.0) - 50.0).abs() < 0.001);
        assert!((remaining_ms(&slot, 6_000.0) - 5_000.0).abs() < 0.001);
        assert!((progress_percent(&slot, 1_000_000.0) - 100.0).abs() < 0.001);
        assert!((remaining_ms(&slot, 1_000_000.0) - 0.0).abs() < 0.001);
    }

    #[test]
    fn growth_is_a_function_of_time_only() {
        let slot = Slot {
            plant: PlantKey::Oak,
            planted_time: 0.0,
        };
        let a = progress_percent(&slot, 30_000.0);
        let b = progress_percent(&slot, 30_000.0);
        assert_eq!(a, b);
    }

    #[test]
    fn clock_skew_does_not_go_negative() {
        let slot = Slot {
            plant: PlantKey::Daisy,
            planted_time: 5_000.0,
        };
        assert!((progress_percent(&slot, 0.0) - 0.0).abs() < f64::EPSILON);
        assert!(!is_ready(&slot, 0.0));
    }

    // ── roll ──

    #[test]
    fn basic_pack_draw_90_falls_through_to_uncommon() {
        let rates = PackKind::Basic.rarity_rates();
        assert_eq!(pick_rarity(&rates, 90.0, |_| true), Some(Rarity::Uncommon));
        assert_eq!(pick_rarity(&rates, 85.0, |_| true), Some(Rarity::Common));
        assert_eq!(pick_rarity(&rates, 0.0, |_| true), Some(Rarity::Common));
    }

    #[test]
    fn zero_rate_bucket_is_skipped() {
        let rates = PackKind::Legendary.rarity_rates();
        // common is 0%: a draw of 0 must not land there.
        assert_eq!(pick_rarity(&rates, 0.0, |_| true), Some(Rarity::Uncommon));
    }

    #[test]
    fn empty_bucket_falls_through_to_next() {
        let rates = PackKind::Premium.rarity_rates();
        let no_uncommon = |r: Rarity| r != Rarity::Uncommon;
        // 70 is inside the uncommon band (60..85); next populated bucket is rare.
        assert_eq!(pick_rarity(&rates, 70.0, no_uncommon), Some(Rarity::Rare));
    }

    #[test]
    fn no_bucket_matches_past_total() {
        let rates = RarityRates([10.0, 0.0, 0.0, 0.0, 0.0]);
        assert_eq!(pick_rarity(&rates, 50.0, |_| true), None);
    }

    #[test]
    fn basic_pack_only_yields_common_or_uncommon() {
        let mut rng = rng();
        for _ in 0..500 {
            let plant = roll_plant(&PackKind::Basic.rarity_rates(), &mut rng).unwrap();
            let rarity = plant.info().rarity;
            assert!(rarity == Rarity::Common || rarity == Rarity::Uncommon, "{:?}", plant);
        }
    }

    #[test]
    fn roll_never_yields_sunlight_items() {
        let mut rng = rng();
        for _ in 0..500 {
            let plant = roll_plant(&PackKind::Legendary.rarity_rates(), &mut rng).unwrap();
            assert!(plant.sunlight_cost().is_none(), "{:?}", plant);
        }
    }

    #[test]
    fn unmatched_roll_falls_back_to_common() {
        let mut rng = rng();
        let rates = RarityRates([0.0; 5]);
        let plant = roll_plant(&rates, &mut rng).unwrap();
        assert_eq!(plant.info().rarity, Rarity::Common);
    }

    // ── milestones ──

    #[test]
    fn milestone_jump_back_pays_skipped() {
        let mut state = GameState::new();
        state.plant_collection.insert(PlantKey::Daisy, 12);
        let event = apply_milestones(&mut state, MILESTONES);
        assert_eq!(
            event,
            Some(GameEvent::MilestoneReached {
                threshold: 10,
                sunlight: 3
            })
        );
        assert_eq!(state.sunlight, 3);
        assert_eq!(state.last_milestone_reached, 10);
    }

    #[test]
    fn milestone_not_paid_twice() {
        let mut state = GameState::new();
        state.plant_collection.insert(PlantKey::Daisy, 6);
        assert!(apply_milestones(&mut state, MILESTONES).is_some());
        assert_eq!(state.sunlight, 1);
        assert!(apply_milestones(&mut state, MILESTONES).is_none());
        assert_eq!(state.sunlight, 1);
    }

    #[test]
    fn milestone_below_first_threshold_is_noop() {
        let mut state = GameState::new();
        state.plant_collection.insert(PlantKey::Daisy, 4);
        assert!(apply_milestones(&mut state, MILESTONES).is_none());
        assert_eq!(state.last_milestone_reached, 0);
    }

    #[test]
    fn milestone_pays_only_new_ones() {
        let mut state = GameState::new();
        state.last_milestone_reached = 5;
        state.plant_collection.insert(PlantKey::Daisy, 30);
        apply_milestones(&mut state, MILESTONES);
        assert_eq!(state.sunlight, 2 + 5);
        assert_eq!(state.last_milestone_reached, 25);
    }

    // ── packs ──

    #[test]
    fn open_pack_debits_and_takes_mutex() {
        let mut state = GameState::new();
        let event = begin_pack_open(&mut state, PackKind::Basic).unwrap();
        assert_eq!(
            event,
            GameEvent::PackOpening {
                pack: PackKind::Basic,
                cost: 10.0
            }
        );
        assert!((state.nectar - 40.0).abs() < 0.001);
        assert_eq!(state.opening_pack, Some(PackKind::Basic));
    }

    #[test]
    fn second_open_rejected_while_first_pending() {
        let mut state = GameState::new();
        begin_pack_open(&mut state, PackKind::Basic).unwrap();
        let before = state.clone();
        assert_eq!(
            begin_pack_open(&mut state, PackKind::Basic),
            Err(ActionError::PackAlreadyOpening(PackKind::Basic))
        );
        assert_eq!(state, before);
    }

    #[test]
    fn open_pack_insufficient_nectar() {
        let mut state = GameState::new();
        let before = state.clone();
        assert!(matches!(
            begin_pack_open(&mut state, PackKind::Legendary),
            Err(ActionError::InsufficientNectar { .. })
        ));
        assert_eq!(state, before);
    }

    #[test]
    fn reveal_records_plants_and_releases_mutex() {
        let mut state = GameState::new();
        let mut rng = rng();
        begin_pack_open(&mut state, PackKind::Basic).unwrap();
        let event = reveal_pack(&mut state, &mut rng, 123.0).unwrap();
        let GameEvent::PackRevealed { plant, slot, .. } = event else {
            panic!("expected a reveal");
        };
        assert_eq!(state.opening_pack, None);
        assert_eq!(state.collected(plant), 1);
        assert_eq!(state.last_reward, Some(plant));
        let slot = state.active_slots.get(&slot.unwrap()).unwrap();
        assert_eq!(slot.plant, plant);
        assert!((slot.planted_time - 123.0).abs() < f64::EPSILON);
    }

    #[test]
    fn reveal_into_full_garden_still_collects() {
        let mut state = GameState::new();
        let mut rng = rng();
        fill_garden(&mut state);
        begin_pack_open(&mut state, PackKind::Basic).unwrap();
        let event = reveal_pack(&mut state, &mut rng, 0.0).unwrap();
        assert!(matches!(event, GameEvent::PackRevealed { slot: None, .. }));
        assert_eq!(state.active_slots.len(), 12);
        assert_eq!(state.total_plants_collected(), 1);
        assert_eq!(state.opening_pack, None);
    }

    #[test]
    fn reveal_without_opening_pack_is_noop() {
        let mut state = GameState::new();
        let before = state.clone();
        assert!(reveal_pack(&mut state, &mut rng(), 0.0).is_none());
        assert_eq!(state, before);
    }

    // ── sunlight shop ──

    #[test]
    fn buy_sunlight_plant_success() {
        let mut state = GameState::new();
        state.sunlight = 7;
        let event =
            buy_sunlight_plant(&mut state, PlantKey::GoldenDaisy, &mut rng(), 50.0).unwrap();
        assert!(matches!(
            event,
            GameEvent::SunlightPlantBought {
                plant: PlantKey::GoldenDaisy,
                cost: 5,
                ..
            }
        ));
        assert_eq!(state.sunlight, 2);
        assert_eq!(state.collected(PlantKey::GoldenDaisy), 1);
        assert_eq!(state.active_slots.len(), 1);
    }

    #[test]
    fn buy_sunlight_plant_full_garden_fails_outright() {
        let mut state = GameState::new();
        state.sunlight = 100;
        fill_garden(&mut state);
        let before = state.clone();
        assert_eq!(
            buy_sunlight_plant(&mut state, PlantKey::RainbowRose, &mut rng(), 0.0),
            Err(ActionError::NoEmptySlot)
        );
        assert_eq!(state, before);
    }

    #[test]
    fn buy_sunlight_plant_insufficient_sunlight() {
        let mut state = GameState::new();
        state.sunlight = 4;
        let before = state.clone();
        assert!(buy_sunlight_plant(&mut state, PlantKey::GoldenDaisy, &mut rng(), 0.0).is_err());
        assert_eq!(state, before);
    }

    #[test]
    fn pack_plant_is_not_for_sale() {
        let mut state = GameState::new();
        state.sunlight = 100;
        assert_eq!(
            buy_sunlight_plant(&mut state, PlantKey::Daisy, &mut rng(), 0.0),
            Err(ActionError::NotSunlightPlant(PlantKey::Daisy))
        );
    }

    // ── generators ──

    #[test]
    fn generator_purchase_scenario() {
        let mut state = GameState::new();
        state.nectar = 300.0;
        let event = buy_generator(&mut state, GeneratorKind::Sprinkler).unwrap();
        assert_eq!(
            event,
            GameEvent::GeneratorBought {
                generator: GeneratorKind::Sprinkler,
                level: 1,
                cost: 100.0
            }
        );
        assert!((state.nectar - 200.0).abs() < 0.001);
        let next = state.generator(GeneratorKind::Sprinkler).unwrap().current_cost();
        assert!((next - 115.0).abs() < 0.001);
    }

    #[test]
    fn generator_purchase_insufficient_funds() {
        let mut state = GameState::new();
        let before = state.clone();
        assert!(buy_generator(&mut state, GeneratorKind::Greenhouse).is_err());
        assert_eq!(state, before);
    }

    #[test]
    fn generator_purchase_leaves_slots_alone() {
        let mut state = GameState::new();
        state.nectar = 1_000.0;
        state.active_slots.insert(
            3,
            Slot {
                plant: PlantKey::Rose,
                planted_time: 0.0,
            },
        );
        let slots_before = state.active_slots.clone();
        buy_generator(&mut state, GeneratorKind::Sprinkler).unwrap();
        assert_eq!(state.active_slots, slots_before);
    }

    // ── harvest ──

    #[test]
    fn harvest_ready_slot() {
        let mut state = GameState::new();
        state.active_slots.insert(
            2,
            Slot {
                plant: PlantKey::Clover,
                planted_time: 0.0,
            },
        );
        let event = harvest(&mut state, 2, 12_000.0).unwrap();
        assert_eq!(
            event,
            GameEvent::Harvested {
                slot: 2,
                plant: PlantKey::Clover,
                reward: 20.0
            }
        );
        assert!((state.nectar - 70.0).abs() < 0.001);
        assert!(state.active_slots.is_empty());
    }

    #[test]
    fn harvest_growing_or_empty_slot_fails() {
        let mut state = GameState::new();
        state.active_slots.insert(
            2,
            Slot {
                plant: PlantKey::Clover,
                planted_time: 0.0,
            },
        );
        assert_eq!(harvest(&mut state, 2, 11_999.0), Err(ActionError::NotReady(2)));
        assert_eq!(harvest(&mut state, 5, 99_999.0), Err(ActionError::EmptySlot(5)));
        assert_eq!(state.active_slots.len(), 1);
    }

    #[test]
    fn harvest_all_only_takes_ready() {
        let mut state = GameState::new();
        state.active_slots.insert(
            1,
            Slot {
                plant: PlantKey::Grass,
                planted_time: 0.0,
            },
        );
        state.active_slots.insert(
            2,
            Slot {
                plant: PlantKey::Daisy,
                planted_time: 0.0,
            },
        );
        state.active_slots.insert(
            3,
            Slot {
                plant: PlantKey::Oak,
                planted_time: 0.0,
            },
        );
        let events = harvest_all(&mut state, 10_000.0);
        assert_eq!(events.len(), 2);
        assert!((state.nectar - (50.0 + 12.0 + 15.0)).abs() < 0.001);
        assert_eq!(state.active_slots.keys().copied().collect::<Vec<_>>(), vec![3]);
    }

    // ── passive ──

    #[test]
    fn passive_tick_credits_rate() {
        let mut state = GameState::new();
        state.generators.get_mut(&GeneratorKind::Greenhouse).unwrap().level = 2;
        let event = passive_tick(&mut state);
        assert_eq!(event, Some(GameEvent::PassiveIncome { amount: 16.0 }));
        assert!((state.nectar - 66.0).abs() < 0.001);
    }

    #[test]
    fn passive_tick_without_income_is_noop() {
        let mut state = GameState::new();
        assert!(passive_tick(&mut state).is_none());
        assert!((state.nectar - 50.0).abs() < 0.001);
    }

    // ── formatting ──

    #[test]
    fn format_time_units() {
        assert_eq!(format_time(0.0), "0s");
        assert_eq!(format_time(1.0), "1s");
        assert_eq!(format_time(59_000.0), "59s");
        assert_eq!(format_time(60_000.0), "1m 0s");
        assert_eq!(format_time(185_500.0), "3m 6s");
    }

    #[test]
    fn format_number_floors_and_groups() {
        assert_eq!(format_number(0.0), "0");
        assert_eq!(format_number(999.9), "999");
        assert_eq!(format_number(1_234_567.8), "1,234,567");
        assert_eq!(format_number(-1_500.0), "-1,500");
    }
}

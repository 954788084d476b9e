//! Plant Paradise game state: the single aggregate that gets persisted.

use std::collections::BTreeMap;

use super::catalog::{
    GeneratorKind, Milestone, PackKind, PlantKey, GENERATOR_COST_GROWTH, MILESTONES, SLOT_COUNT,
    SLOT_INCOME_RATE, STARTING_NECTAR,
};

/// Garden position, `1..=SLOT_COUNT`.
pub type SlotId = u8;

/// A plant growing in a slot. Readiness is derived from `planted_time`.
#[derive(Clone, Debug, PartialEq)]
pub struct Slot {
    pub plant: PlantKey,
    /// Wall-clock milliseconds since the Unix epoch.
    pub planted_time: f64,
}

/// A levelable passive-income source.
#[derive(Clone, Debug, PartialEq)]
pub struct Generator {
    pub level: u32,
    /// Base cost; the price of the next level scales with `level`.
    pub cost: f64,
    /// Nectar per second contributed by each level.
    pub base_nectar: f64,
}

impl Generator {
    pub fn new(kind: GeneratorKind) -> Self {
        Self {
            level: 0,
            cost: kind.default_cost(),
            base_nectar: kind.default_base_nectar(),
        }
    }

    /// Price of the next level: `floor(cost × 1.15^level)`.
    pub fn current_cost(&self) -> f64 {
        let raw = self.cost * GENERATOR_COST_GROWTH.powi(self.level as i32);
        // 100.0 * 1.15 lands on 114.99999999999999; floor the decimal value instead.
        (raw * (1.0 + 1e-12)).floor()
    }

    pub fn nectar_per_second(&self) -> f64 {
        self.base_nectar * self.level as f64
    }
}

/// Full persisted state of a garden.
#[derive(Clone, Debug, PartialEq)]
pub struct GameState {
    pub nectar: f64,
    pub sunlight: u32,
    /// Lifetime count per plant ever obtained.
    pub plant_collection: BTreeMap<PlantKey, u32>,
    pub active_slots: BTreeMap<SlotId, Slot>,
    /// Pack whose reveal is pending. Only one pack opens at a time.
    pub opening_pack: Option<PackKind>,
    /// Most recently obtained plant.
    pub last_reward: Option<PlantKey>,
    /// Highest milestone threshold already paid out.
    pub last_milestone_reached: u32,
    pub generators: BTreeMap<GeneratorKind, Generator>,
}

impl Default for GameState {
    fn default() -> Self {
        Self::new()
    }
}

impl GameState {
    pub fn new() -> Self {
        Self {
            nectar: STARTING_NECTAR,
            sunlight: 0,
            plant_collection: BTreeMap::new(),
            active_slots: BTreeMap::new(),
            opening_pack: None,
            last_reward: None,
            last_milestone_reached: 0,
            generators: GeneratorKind::ALL
                .iter()
                .map(|&k| (k, Generator::new(k)))
                .collect(),
        }
    }

    /// Sum of lifetime collection counts.
    pub fn total_plants_collected(&self) -> u32 {
        self.plant_collection.values().sum()
    }

    /// Estimated passive income shown to the player and credited by the
    /// passive tick.
    pub fn total_nectar_per_second(&self) -> f64 {
        let from_slots: f64 = self
            .active_slots
            .values()
            .map(|slot| (slot.plant.info().harvest_reward * SLOT_INCOME_RATE).floor())
            .sum();
        let from_generators: f64 = self.generators.values().map(|g| g.nectar_per_second()).sum();
        from_slots + from_generators
    }

    /// First milestone not yet reached by the lifetime total.
    pub fn next_milestone(&self) -> Option<&'static Milestone> {
        let total = self.total_plants_collected();
        MILESTONES.iter().find(|m| m.plants_threshold > total)
    }

    /// Unoccupied slot ids in ascending order.
    pub fn empty_slots(&self) -> Vec<SlotId> {
        (1..=SLOT_COUNT)
            .filter(|id| !self.active_slots.contains_key(id))
            .collect()
    }

    pub fn collected(&self, plant: PlantKey) -> u32 {
        self.plant_collection.get(&plant).copied().unwrap_or(0)
    }

    /// Number of distinct plants ever obtained.
    pub fn discovered_count(&self) -> usize {
        self.plant_collection.values().filter(|&&c| c > 0).count()
    }

    pub fn generator(&self, kind: GeneratorKind) -> Option<&Generator> {
        self.generators.get(&kind)
    }
}

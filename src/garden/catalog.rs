//! Static reference data for Plant Paradise: plants, seed packs, generators
//! and milestones. Nothing here is mutable; the economy of generators lives
//! in [`super::state::Generator`].

/// Number of concurrent growing positions in the garden.
pub const SLOT_COUNT: u8 = 12;

/// Nectar a fresh garden starts with.
pub const STARTING_NECTAR: f64 = 50.0;

/// Per-level cost multiplier for generators.
pub const GENERATOR_COST_GROWTH: f64 = 1.15;

/// Fraction of a planted item's harvest reward counted as passive nectar/sec.
pub const SLOT_INCOME_RATE: f64 = 0.1 / 60.0;

/// Plant rarity. Declaration order is the order the reward roll walks.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Rarity {
    Common,
    Uncommon,
    Rare,
    Legendary,
    Mythical,
}

impl Rarity {
    pub const ALL: [Rarity; 5] = [
        Rarity::Common,
        Rarity::Uncommon,
        Rarity::Rare,
        Rarity::Legendary,
        Rarity::Mythical,
    ];

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn label(self) -> &'static str {
        match self {
            Rarity::Common => "COMMON",
            Rarity::Uncommon => "UNCOMMON",
            Rarity::Rare => "RARE",
            Rarity::Legendary => "LEGENDARY",
            Rarity::Mythical => "MYTHICAL",
        }
    }
}

/// Where a plant can be obtained.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Source {
    /// Drops from seed packs.
    Pack,
    /// Bought with sunlight.
    Sunlight { cost: u32 },
}

/// Display and growth data of a plant.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PlantInfo {
    pub name: &'static str,
    pub icon: &'static str,
    pub rarity: Rarity,
    /// Milliseconds from planting until harvestable.
    pub growth_time: f64,
    pub harvest_reward: f64,
    pub source: Source,
}

/// Every item that can occupy a slot or appear in the collection.
///
/// Regular pack plants and sunlight-shop plants share one registry, so a
/// key always resolves once parsed from its persisted string.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PlantKey {
    Daisy,
    Grass,
    Clover,
    Sunflower,
    Rose,
    Oak,
    Lotus,
    Phoenix,
    Celestial,
    GoldenDaisy,
    RainbowRose,
    StarfruitTree,
}

impl PlantKey {
    pub const ALL: [PlantKey; 12] = [
        PlantKey::Daisy,
        PlantKey::Grass,
        PlantKey::Clover,
        PlantKey::Sunflower,
        PlantKey::Rose,
        PlantKey::Oak,
        PlantKey::Lotus,
        PlantKey::Phoenix,
        PlantKey::Celestial,
        PlantKey::GoldenDaisy,
        PlantKey::RainbowRose,
        PlantKey::StarfruitTree,
    ];

    /// Items sold in the sunlight shop, in display order.
    pub const SUNLIGHT_SHOP: [PlantKey; 3] = [
        PlantKey::GoldenDaisy,
        PlantKey::RainbowRose,
        PlantKey::StarfruitTree,
    ];

    pub fn info(self) -> &'static PlantInfo {
        const fn pack(
            name: &'static str,
            icon: &'static str,
            rarity: Rarity,
            growth_time: f64,
            harvest_reward: f64,
        ) -> PlantInfo {
            PlantInfo {
                name,
                icon,
                rarity,
                growth_time,
                harvest_reward,
                source: Source::Pack,
            }
        }
        const fn shop(
            name: &'static str,
            icon: &'static str,
            rarity: Rarity,
            growth_time: f64,
            harvest_reward: f64,
            cost: u32,
        ) -> PlantInfo {
            PlantInfo {
                name,
                icon,
                rarity,
                growth_time,
                harvest_reward,
                source: Source::Sunlight { cost },
            }
        }

        const DAISY: PlantInfo = pack("Daisy", "🌼", Rarity::Common, 10_000.0, 15.0);
        const GRASS: PlantInfo = pack("Grass", "🌱", Rarity::Common, 8_000.0, 12.0);
        const CLOVER: PlantInfo = pack("Clover", "🍀", Rarity::Common, 12_000.0, 20.0);
        const SUNFLOWER: PlantInfo = pack("Sunflower", "🌻", Rarity::Uncommon, 20_000.0, 50.0);
        const ROSE: PlantInfo = pack("Rose", "🌹", Rarity::Uncommon, 25_000.0, 65.0);
        const OAK: PlantInfo = pack("Oak Tree", "🌳", Rarity::Rare, 45_000.0, 180.0);
        const LOTUS: PlantInfo = pack("Lotus", "🪷", Rarity::Rare, 50_000.0, 220.0);
        const PHOENIX: PlantInfo =
            pack("Phoenix Flower", "⚡", Rarity::Legendary, 90_000.0, 500.0);
        const CELESTIAL: PlantInfo =
            pack("Celestial Bloom", "✨", Rarity::Mythical, 180_000.0, 1_500.0);
        const GOLDEN_DAISY: PlantInfo =
            shop("Golden Daisy", "⭐", Rarity::Legendary, 15_000.0, 150.0, 5);
        const RAINBOW_ROSE: PlantInfo =
            shop("Rainbow Rose", "🌈", Rarity::Mythical, 45_000.0, 400.0, 15);
        const STARFRUIT_TREE: PlantInfo =
            shop("Starfruit Tree", "👑", Rarity::Mythical, 60_000.0, 800.0, 25);

        match self {
            PlantKey::Daisy => &DAISY,
            PlantKey::Grass => &GRASS,
            PlantKey::Clover => &CLOVER,
            PlantKey::Sunflower => &SUNFLOWER,
            PlantKey::Rose => &ROSE,
            PlantKey::Oak => &OAK,
            PlantKey::Lotus => &LOTUS,
            PlantKey::Phoenix => &PHOENIX,
            PlantKey::Celestial => &CELESTIAL,
            PlantKey::GoldenDaisy => &GOLDEN_DAISY,
            PlantKey::RainbowRose => &RAINBOW_ROSE,
            PlantKey::StarfruitTree => &STARFRUIT_TREE,
        }
    }

    /// Persisted string key.
    pub fn key(self) -> &'static str {
        match self {
            PlantKey::Daisy => "daisy",
            PlantKey::Grass => "grass",
            PlantKey::Clover => "clover",
            PlantKey::Sunflower => "sunflower",
            PlantKey::Rose => "rose",
            PlantKey::Oak => "oak",
            PlantKey::Lotus => "lotus",
            PlantKey::Phoenix => "phoenix",
            PlantKey::Celestial => "celestial",
            PlantKey::GoldenDaisy => "golden_daisy",
            PlantKey::RainbowRose => "rainbow_rose",
            PlantKey::StarfruitTree => "starfruit_tree",
        }
    }

    pub fn from_key(key: &str) -> Option<PlantKey> {
        PlantKey::ALL.iter().copied().find(|p| p.key() == key)
    }

    /// Sunlight price, or `None` for pack-only plants.
    pub fn sunlight_cost(self) -> Option<u32> {
        match self.info().source {
            Source::Sunlight { cost } => Some(cost),
            Source::Pack => None,
        }
    }

    /// Pack plants of the given rarity, in registry order.
    pub fn pack_plants(rarity: Rarity) -> impl Iterator<Item = PlantKey> {
        PlantKey::ALL
            .into_iter()
            .filter(move |p| p.info().source == Source::Pack && p.info().rarity == rarity)
    }
}

/// Rarity odds of a seed pack, in percent per [`Rarity::ALL`] slot.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RarityRates(pub [f64; 5]);

impl RarityRates {
    pub fn rate(&self, rarity: Rarity) -> f64 {
        self.0[rarity.index()]
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PackKind {
    Basic,
    Premium,
    Legendary,
}

impl PackKind {
    pub const ALL: [PackKind; 3] = [PackKind::Basic, PackKind::Premium, PackKind::Legendary];

    pub fn key(self) -> &'static str {
        match self {
            PackKind::Basic => "basic",
            PackKind::Premium => "premium",
            PackKind::Legendary => "legendary",
        }
    }

    pub fn from_key(key: &str) -> Option<PackKind> {
        PackKind::ALL.iter().copied().find(|p| p.key() == key)
    }

    pub fn name(self) -> &'static str {
        match self {
            PackKind::Basic => "Basic Seed Pack",
            PackKind::Premium => "Premium Seed Pack",
            PackKind::Legendary => "Legendary Seed Pack",
        }
    }

    pub fn icon(self) -> &'static str {
        match self {
            PackKind::Basic | PackKind::Premium => "📦",
            PackKind::Legendary => "👑",
        }
    }

    pub fn cost(self) -> f64 {
        match self {
            PackKind::Basic => 10.0,
            PackKind::Premium => 50.0,
            PackKind::Legendary => 200.0,
        }
    }

    pub fn rarity_rates(self) -> RarityRates {
        match self {
            PackKind::Basic => RarityRates([85.0, 15.0, 0.0, 0.0, 0.0]),
            PackKind::Premium => RarityRates([60.0, 25.0, 10.0, 4.0, 1.0]),
            PackKind::Legendary => RarityRates([0.0, 25.0, 50.0, 20.0, 5.0]),
        }
    }
}

/// Passive income sources. Economics (cost, rate, level) are part of the
/// saved state; this is display data plus the defaults for a new garden.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum GeneratorKind {
    Sprinkler,
    Greenhouse,
    Beehive,
    MysticWell,
}

impl GeneratorKind {
    pub const ALL: [GeneratorKind; 4] = [
        GeneratorKind::Sprinkler,
        GeneratorKind::Greenhouse,
        GeneratorKind::Beehive,
        GeneratorKind::MysticWell,
    ];

    pub fn key(self) -> &'static str {
        match self {
            GeneratorKind::Sprinkler => "sprinkler",
            GeneratorKind::Greenhouse => "greenhouse",
            GeneratorKind::Beehive => "beehive",
            GeneratorKind::MysticWell => "mysticwell",
        }
    }

    pub fn from_key(key: &str) -> Option<GeneratorKind> {
        GeneratorKind::ALL.iter().copied().find(|g| g.key() == key)
    }

    pub fn name(self) -> &'static str {
        match self {
            GeneratorKind::Sprinkler => "Garden Sprinkler",
            GeneratorKind::Greenhouse => "Mini Greenhouse",
            GeneratorKind::Beehive => "Magical Beehive",
            GeneratorKind::MysticWell => "Mystic Well",
        }
    }

    pub fn icon(self) -> &'static str {
        match self {
            GeneratorKind::Sprinkler => "💧",
            GeneratorKind::Greenhouse => "🏠",
            GeneratorKind::Beehive => "🐝",
            GeneratorKind::MysticWell => "🔮",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            GeneratorKind::Sprinkler => "Automatically waters plants for extra nectar",
            GeneratorKind::Greenhouse => "Controlled environment boosts nectar production",
            GeneratorKind::Beehive => "Bees pollinate plants for premium nectar",
            GeneratorKind::MysticWell => "Ancient magic continuously generates pure nectar",
        }
    }

    /// Base purchase cost of a new garden's generator.
    pub fn default_cost(self) -> f64 {
        match self {
            GeneratorKind::Sprinkler => 100.0,
            GeneratorKind::Greenhouse => 500.0,
            GeneratorKind::Beehive => 2_000.0,
            GeneratorKind::MysticWell => 10_000.0,
        }
    }

    /// Nectar per second per level of a new garden's generator.
    pub fn default_base_nectar(self) -> f64 {
        match self {
            GeneratorKind::Sprinkler => 2.0,
            GeneratorKind::Greenhouse => 8.0,
            GeneratorKind::Beehive => 25.0,
            GeneratorKind::MysticWell => 75.0,
        }
    }
}

/// A lifetime-collection threshold paying sunlight once.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Milestone {
    pub plants_threshold: u32,
    pub sunlight_reward: u32,
    pub description: &'static str,
}

/// Ascending by threshold.
pub const MILESTONES: &[Milestone] = &[
    Milestone {
        plants_threshold: 5,
        sunlight_reward: 1,
        description: "First Garden",
    },
    Milestone {
        plants_threshold: 10,
        sunlight_reward: 2,
        description: "Growing Collection",
    },
    Milestone {
        plants_threshold: 25,
        sunlight_reward: 5,
        description: "Plant Enthusiast",
    },
    Milestone {
        plants_threshold: 50,
        sunlight_reward: 10,
        description: "Master Gardener",
    },
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_plant_key_round_trips_through_its_string() {
        for plant in PlantKey::ALL {
            assert_eq!(PlantKey::from_key(plant.key()), Some(plant));
        }
        assert_eq!(PlantKey::from_key("dandelion"), None);
    }

    #[test]
    fn pack_keys_round_trip() {
        for pack in PackKind::ALL {
            assert_eq!(PackKind::from_key(pack.key()), Some(pack));
        }
        assert_eq!(PackKind::from_key("mega"), None);
    }

    #[test]
    fn sunlight_shop_items_have_costs_and_pack_plants_do_not() {
        for plant in PlantKey::ALL {
            let in_shop = PlantKey::SUNLIGHT_SHOP.contains(&plant);
            assert_eq!(plant.sunlight_cost().is_some(), in_shop, "{:?}", plant);
        }
    }

    #[test]
    fn pack_rates_sum_to_100() {
        for pack in PackKind::ALL {
            let sum: f64 = pack.rarity_rates().0.iter().sum();
            assert!((sum - 100.0).abs() < 1e-9, "{:?} sums to {}", pack, sum);
        }
    }

    #[test]
    fn common_bucket_is_never_empty() {
        assert!(PlantKey::pack_plants(Rarity::Common).count() > 0);
    }

    #[test]
    fn pack_plants_exclude_sunlight_items() {
        let legendary: Vec<_> = PlantKey::pack_plants(Rarity::Legendary).collect();
        assert_eq!(legendary, vec![PlantKey::Phoenix]);
        let mythical: Vec<_> = PlantKey::pack_plants(Rarity::Mythical).collect();
        assert_eq!(mythical, vec![PlantKey::Celestial]);
    }

    #[test]
    fn milestones_ascend() {
        for pair in MILESTONES.windows(2) {
            assert!(pair[0].plants_threshold < pair[1].plants_threshold);
        }
    }

    #[test]
    fn generator_keys_round_trip() {
        for g in GeneratorKind::ALL {
            assert_eq!(GeneratorKind::from_key(g.key()), Some(g));
        }
    }
}

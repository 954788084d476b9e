//! Semantic action IDs for Plant Paradise click targets.
//!
//! Registered during render and dispatched via `InputEvent::Click`.

// ── Garden ──────────────────────────────────────────────────────
pub const HARVEST_ALL: u16 = 0;

// ── Shop tabs ───────────────────────────────────────────────────
pub const TAB_PACKS: u16 = 10;
pub const TAB_GENERATORS: u16 = 11;
pub const TAB_SUNLIGHT: u16 = 12;
pub const TAB_COLLECTION: u16 = 13;
pub const NEXT_TAB: u16 = 19;

// ── Seed packs (base + PackKind index) ──────────────────────────
pub const OPEN_PACK_BASE: u16 = 100;

// ── Generators (base + GeneratorKind index) ─────────────────────
pub const BUY_GENERATOR_BASE: u16 = 200;

// ── Sunlight shop (base + shop index) ───────────────────────────
pub const BUY_SUNLIGHT_BASE: u16 = 300;

// ── Harvest a single slot (base + slot id 1..=12) ───────────────
pub const HARVEST_SLOT_BASE: u16 = 400;

// ── Misc ────────────────────────────────────────────────────────
pub const DISMISS_POPUP: u16 = 900;
pub const RESET_GARDEN: u16 = 999;

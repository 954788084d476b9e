//! Plant Paradise persistence.
//!
//! The whole [`GameState`] is stored as one JSON document under one key.
//! There is no version field: a saved document is merged over the current
//! defaults, so missing keys (including generators added later) heal, and
//! unknown keys are ignored.
//!
//! Persistence never fails the caller. Unreadable data falls back to a
//! fresh garden and failed writes are dropped; both are logged.

use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};

use super::catalog::{GeneratorKind, PackKind, PlantKey, SLOT_COUNT};
use super::state::{GameState, Generator, Slot, SlotId};

/// Key-value persistence backend.
pub trait Storage {
    fn read(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn write(&mut self, key: &str, value: &str) -> Result<(), StorageError>;
    fn remove(&mut self, key: &str) -> Result<(), StorageError>;
}

#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[cfg(any(target_arch = "wasm32", test))]
    #[error("storage is unavailable")]
    Unavailable,

    #[error("storage rejected the operation: {0}")]
    Rejected(String),
}

/// In-process storage. Used natively and by tests.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    entries: HashMap<String, String>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Storage pre-filled with a raw document under `key`.
    #[cfg(test)]
    pub fn with_entry(key: &str, value: &str) -> Self {
        let mut storage = Self::new();
        storage.entries.insert(key.to_string(), value.to_string());
        storage
    }
}

impl Storage for MemoryStorage {
    fn read(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.entries.get(key).cloned())
    }

    fn write(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), StorageError> {
        self.entries.remove(key);
        Ok(())
    }
}

/// Browser `localStorage`.
#[cfg(target_arch = "wasm32")]
pub struct LocalStorage;

#[cfg(target_arch = "wasm32")]
impl LocalStorage {
    fn storage() -> Result<web_sys::Storage, StorageError> {
        web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten()
            .ok_or(StorageError::Unavailable)
    }
}

#[cfg(target_arch = "wasm32")]
impl Storage for LocalStorage {
    fn read(&self, key: &str) -> Result<Option<String>, StorageError> {
        Self::storage()?
            .get_item(key)
            .map_err(|e| StorageError::Rejected(format!("{e:?}")))
    }

    fn write(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        Self::storage()?
            .set_item(key, value)
            .map_err(|e| StorageError::Rejected(format!("{e:?}")))
    }

    fn remove(&mut self, key: &str) -> Result<(), StorageError> {
        Self::storage()?
            .remove_item(key)
            .map_err(|e| StorageError::Rejected(format!("{e:?}")))
    }
}

// ── On-disk schema ──────────────────────────────────────────────

/// Serialized form of [`GameState`]. Keys are kept as strings so that a
/// single unknown entry drops that entry instead of the whole save.
#[derive(Debug, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct SaveData {
    nectar: f64,
    sunlight: u32,
    plant_collection: BTreeMap<String, u32>,
    active_slots: BTreeMap<String, SavedSlot>,
    opening_pack: Option<String>,
    last_reward: Option<String>,
    last_milestone_reached: u32,
    generators: BTreeMap<String, SavedGenerator>,
}

impl Default for SaveData {
    fn default() -> Self {
        extract_save(&GameState::new())
    }
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SavedSlot {
    #[serde(rename = "type")]
    plant: String,
    planted_time: f64,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SavedGenerator {
    level: u32,
    cost: f64,
    base_nectar: f64,
}

fn extract_save(state: &GameState) -> SaveData {
    SaveData {
        nectar: state.nectar,
        sunlight: state.sunlight,
        plant_collection: state
            .plant_collection
            .iter()
            .map(|(plant, &count)| (plant.key().to_string(), count))
            .collect(),
        active_slots: state
            .active_slots
            .iter()
            .map(|(id, slot)| {
                (
                    id.to_string(),
                    SavedSlot {
                        plant: slot.plant.key().to_string(),
                        planted_time: slot.planted_time,
                    },
                )
            })
            .collect(),
        opening_pack: state.opening_pack.map(|p| p.key().to_string()),
        last_reward: state.last_reward.map(|p| p.key().to_string()),
        last_milestone_reached: state.last_milestone_reached,
        generators: state
            .generators
            .iter()
            .map(|(kind, g)| {
                (
                    kind.key().to_string(),
                    SavedGenerator {
                        level: g.level,
                        cost: g.cost,
                        base_nectar: g.base_nectar,
                    },
                )
            })
            .collect(),
    }
}

fn parse_slot_id(raw: &str) -> Option<SlotId> {
    raw.parse::<SlotId>()
        .ok()
        .filter(|id| (1..=SLOT_COUNT).contains(id))
}

/// Resolve a saved document against the catalog. Entries that do not
/// resolve are dropped with a warning.
fn apply_save(save: SaveData) -> GameState {
    let mut state = GameState::new();
    state.nectar = save.nectar.max(0.0);
    state.sunlight = save.sunlight;
    state.last_milestone_reached = save.last_milestone_reached;

    for (key, count) in save.plant_collection {
        match PlantKey::from_key(&key) {
            Some(plant) => {
                state.plant_collection.insert(plant, count);
            }
            None => log::warn!("dropping unknown plant '{}' from collection", key),
        }
    }

    for (raw_id, slot) in save.active_slots {
        let Some(id) = parse_slot_id(&raw_id) else {
            log::warn!("dropping slot with invalid id '{}'", raw_id);
            continue;
        };
        let Some(plant) = PlantKey::from_key(&slot.plant) else {
            log::warn!("dropping slot {} with unknown plant '{}'", id, slot.plant);
            continue;
        };
        state.active_slots.insert(
            id,
            Slot {
                plant,
                planted_time: slot.planted_time,
            },
        );
    }

    state.opening_pack = save.opening_pack.as_deref().and_then(|key| {
        let pack = PackKind::from_key(key);
        if pack.is_none() {
            log::warn!("dropping unknown opening pack '{}'", key);
        }
        pack
    });
    state.last_reward = save.last_reward.as_deref().and_then(|key| {
        let plant = PlantKey::from_key(key);
        if plant.is_none() {
            log::warn!("dropping unknown last reward '{}'", key);
        }
        plant
    });

    // Per generator, so generators missing from an old save keep defaults.
    for (key, saved) in save.generators {
        match GeneratorKind::from_key(&key) {
            Some(kind) => {
                state.generators.insert(
                    kind,
                    Generator {
                        level: saved.level,
                        cost: saved.cost,
                        base_nectar: saved.base_nectar,
                    },
                );
            }
            None => log::warn!("ignoring unknown generator '{}'", key),
        }
    }

    state
}

// ── Store ───────────────────────────────────────────────────────

/// Owns the live [`GameState`] and writes it through to a [`Storage`]
/// backend after every change.
pub struct Store {
    backend: Box<dyn Storage>,
    key: String,
    state: GameState,
}

impl Store {
    /// Open the store and load whatever is persisted under `key`.
    pub fn open(backend: Box<dyn Storage>, key: impl Into<String>) -> Self {
        let mut store = Self {
            backend,
            key: key.into(),
            state: GameState::new(),
        };
        store.state = store.load();
        store
    }

    /// Current state.
    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Read the persisted state merged over defaults. Never fails.
    pub fn load(&self) -> GameState {
        let json = match self.backend.read(&self.key) {
            Ok(Some(json)) => json,
            Ok(None) => return GameState::new(),
            Err(e) => {
                log::warn!("could not read saved garden, using defaults: {}", e);
                return GameState::new();
            }
        };
        match serde_json::from_str::<SaveData>(&json) {
            Ok(save) => apply_save(save),
            Err(e) => {
                log::warn!("could not parse saved garden, using defaults: {}", e);
                GameState::new()
            }
        }
    }

    /// Replace the state and persist it.
    pub fn save(&mut self, state: GameState) {
        self.state = state;
        self.persist();
    }

    /// Apply `f` to a copy of the live state, then commit and persist it.
    pub fn update<T>(&mut self, f: impl FnOnce(&mut GameState) -> T) -> T {
        let mut next = self.state.clone();
        let out = f(&mut next);
        self.save(next);
        out
    }

    /// Like [`Store::update`], but an `Err` discards the copy, so the live
    /// state is untouched even if `f` failed halfway.
    pub fn try_update<T, E>(
        &mut self,
        f: impl FnOnce(&mut GameState) -> Result<T, E>,
    ) -> Result<T, E> {
        let mut next = self.state.clone();
        let out = f(&mut next)?;
        self.save(next);
        Ok(out)
    }

    /// Delete the persisted key and start over from defaults.
    pub fn reset(&mut self) -> &GameState {
        if let Err(e) = self.backend.remove(&self.key) {
            log::warn!("could not delete saved garden: {}", e);
        }
        self.state = GameState::new();
        &self.state
    }

    fn persist(&mut self) {
        let json = match serde_json::to_string(&extract_save(&self.state)) {
            Ok(json) => json,
            Err(e) => {
                log::warn!("could not serialize garden: {}", e);
                return;
            }
        };
        if let Err(e) = self.backend.write(&self.key, &json) {
            log::warn!("could not save garden: {}", e);
        }
    }
}

//! Plant Paradise progression engine.
//!
//! [`Engine`] owns the [`Store`], the deferred-task [`Scheduler`] and the
//! RNG. Player actions run synchronously and return a [`GameEvent`];
//! deferred work (pack reveal, milestone recheck, passive income) runs from
//! [`Engine::advance`], which the render loop calls with the current time.
//!
//! Ordering contract: a pack reveal runs `reveal_delay_ms` after the open,
//! and its milestone recheck runs `milestone_delay_ms` after the reveal.

use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::catalog::{GeneratorKind, PackKind, PlantKey, MILESTONES};
use super::logic::{self, ActionError, GameEvent};
use super::schedule::{Scheduler, Task};
use super::state::{GameState, SlotId};
use super::store::{Storage, Store};

/// Tunables. `Default` carries the shipped values.
#[derive(Clone, Debug, PartialEq)]
pub struct EngineConfig {
    /// Persistence key.
    pub storage_key: String,
    /// Delay between paying for a pack and revealing its plant.
    pub reveal_delay_ms: f64,
    /// Delay between a new plant and the milestone recheck.
    pub milestone_delay_ms: f64,
    /// Passive income interval.
    pub tick_interval_ms: f64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            storage_key: "plantParadiseGame".to_string(),
            reveal_delay_ms: 1500.0,
            milestone_delay_ms: 100.0,
            tick_interval_ms: 1000.0,
        }
    }
}

pub struct Engine {
    store: Store,
    scheduler: Scheduler,
    rng: Pcg32,
    config: EngineConfig,
}

impl Engine {
    /// Load the persisted garden and start the passive tick at `now`.
    pub fn new(backend: Box<dyn Storage>, config: EngineConfig, seed: u64, now: f64) -> Self {
        let store = Store::open(backend, config.storage_key.clone());
        let mut scheduler = Scheduler::new();
        scheduler.schedule(now, config.tick_interval_ms, Task::PassiveTick);

        // A reload during a reveal leaves the pack paid for but undelivered.
        if let Some(pack) = store.state().opening_pack {
            log::info!("resuming interrupted {} reveal", pack.name());
            scheduler.schedule(now, config.reveal_delay_ms, Task::RevealPack);
        }

        log::info!(
            "garden loaded: {} nectar, {} sunlight, {} plants collected",
            store.state().nectar.floor(),
            store.state().sunlight,
            store.state().total_plants_collected()
        );

        Self {
            store,
            scheduler,
            rng: Pcg32::seed_from_u64(seed),
            config,
        }
    }

    pub fn state(&self) -> &GameState {
        self.store.state()
    }

    pub fn is_opening_pack(&self) -> bool {
        self.state().opening_pack.is_some()
    }

    // ── Actions ─────────────────────────────────────────────────

    /// Pay for `pack` now; the plant is revealed by a later [`Engine::advance`].
    pub fn open_seed_pack(&mut self, pack: PackKind, now: f64) -> Result<GameEvent, ActionError> {
        let event = self
            .store
            .try_update(|state| logic::begin_pack_open(state, pack))?;
        self.scheduler
            .schedule(now, self.config.reveal_delay_ms, Task::RevealPack);
        Ok(event)
    }

    pub fn buy_sunlight_plant(
        &mut self,
        plant: PlantKey,
        now: f64,
    ) -> Result<GameEvent, ActionError> {
        let rng = &mut self.rng;
        let event = self
            .store
            .try_update(|state| logic::buy_sunlight_plant(state, plant, rng, now))?;
        self.scheduler
            .schedule(now, self.config.milestone_delay_ms, Task::CheckMilestones);
        Ok(event)
    }

    pub fn buy_generator(&mut self, kind: GeneratorKind) -> Result<GameEvent, ActionError> {
        self.store
            .try_update(|state| logic::buy_generator(state, kind))
    }

    pub fn harvest(&mut self, slot: SlotId, now: f64) -> Result<GameEvent, ActionError> {
        self.store
            .try_update(|state| logic::harvest(state, slot, now))
    }

    /// Harvest every ready slot; one event per harvested slot.
    pub fn harvest_all(&mut self, now: f64) -> Vec<GameEvent> {
        self.store.update(|state| logic::harvest_all(state, now))
    }

    /// Start over from a fresh garden. Pending reveals and milestone checks
    /// are dropped; the passive tick keeps running.
    pub fn reset(&mut self) -> GameEvent {
        self.scheduler.cancel(Task::RevealPack);
        self.scheduler.cancel(Task::CheckMilestones);
        self.store.reset();
        log::info!("garden reset");
        GameEvent::Reset
    }

    // ── Deferred work ───────────────────────────────────────────

    /// Run every task due at `now`, in order.
    pub fn advance(&mut self, now: f64) -> Vec<GameEvent> {
        let mut events = Vec::new();
        while let Some((task, due)) = self.scheduler.pop_due(now) {
            self.run(task, due, now, &mut events);
        }
        events
    }

    fn run(&mut self, task: Task, due: f64, now: f64, events: &mut Vec<GameEvent>) {
        match task {
            Task::RevealPack => {
                let rng = &mut self.rng;
                let revealed = self
                    .store
                    .update(|state| logic::reveal_pack(state, rng, now));
                if let Some(event) = revealed {
                    if let GameEvent::PackRevealed { plant, slot, .. } = &event {
                        log::info!("revealed {} (slot {:?})", plant.info().name, slot);
                    }
                    events.push(event);
                    self.scheduler
                        .schedule(now, self.config.milestone_delay_ms, Task::CheckMilestones);
                }
            }
            Task::CheckMilestones => {
                let reached = self
                    .store
                    .update(|state| logic::apply_milestones(state, MILESTONES));
                if let Some(event) = reached {
                    log::info!("milestone reached: {:?}", event);
                    events.push(event);
                }
            }
            Task::PassiveTick => {
                // Late ticks are credited once, without catching up.
                let interval = self.config.tick_interval_ms;
                let base = if due + interval > now { due } else { now };
                self.scheduler.schedule(base, interval, Task::PassiveTick);
                if self.state().total_nectar_per_second() > 0.0 {
                    if let Some(event) = self.store.update(logic::passive_tick) {
                        events.push(event);
                    }
                }
            }
        }
    }
}

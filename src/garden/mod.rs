//! Plant Paradise, an idle gardening game.

pub mod actions;
pub mod catalog;
pub mod engine;
pub mod logic;
pub mod render;
pub mod schedule;
pub mod state;
pub mod store;

use std::cell::RefCell;
use std::rc::Rc;

use ratzilla::ratatui::layout::Rect;
use ratzilla::ratatui::Frame;

use crate::input::{ClickState, InputEvent};

use actions::*;
use catalog::{GeneratorKind, PackKind, PlantKey, SLOT_COUNT};
use engine::{Engine, EngineConfig};
use logic::{format_number, ActionError, GameEvent};
use state::SlotId;
use store::Storage;

/// How long a reward popup stays up.
const POPUP_MS: f64 = 2000.0;

const MAX_LOG: usize = 50;

/// Right-hand shop panel.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ShopTab {
    Packs,
    Generators,
    Sunlight,
    Collection,
}

impl ShopTab {
    pub const ALL: [ShopTab; 4] = [
        ShopTab::Packs,
        ShopTab::Generators,
        ShopTab::Sunlight,
        ShopTab::Collection,
    ];

    pub fn label(self) -> &'static str {
        match self {
            ShopTab::Packs => "Packs",
            ShopTab::Generators => "Generators",
            ShopTab::Sunlight => "Sunlight",
            ShopTab::Collection => "Collection",
        }
    }

    fn next(self) -> ShopTab {
        let i = Self::ALL.iter().position(|&t| t == self).unwrap_or(0);
        Self::ALL[(i + 1) % Self::ALL.len()]
    }
}

#[derive(Clone, Debug)]
pub struct LogEntry {
    pub text: String,
    pub is_important: bool,
}

/// Short-lived reward banner.
#[derive(Clone, Debug, PartialEq)]
pub struct Popup {
    pub icon: &'static str,
    pub title: String,
    pub detail: String,
    pub expires_at: f64,
}

/// Everything a key press or tap can ask for.
#[derive(Clone, Copy, Debug, PartialEq)]
enum Command {
    OpenPack(PackKind),
    BuyGenerator(GeneratorKind),
    BuySunlight(PlantKey),
    Harvest(SlotId),
    HarvestAll,
    SelectTab(ShopTab),
    CycleTab,
    DismissPopup,
    Reset,
}

/// Keys match case-insensitively, so the uppercase hints work as shown.
fn key_command(key: char) -> Option<Command> {
    let command = match key.to_ascii_lowercase() {
        '1' => Command::OpenPack(PackKind::Basic),
        '2' => Command::OpenPack(PackKind::Premium),
        '3' => Command::OpenPack(PackKind::Legendary),
        'q' => Command::BuyGenerator(GeneratorKind::Sprinkler),
        'w' => Command::BuyGenerator(GeneratorKind::Greenhouse),
        'e' => Command::BuyGenerator(GeneratorKind::Beehive),
        'r' => Command::BuyGenerator(GeneratorKind::MysticWell),
        'z' => Command::BuySunlight(PlantKey::GoldenDaisy),
        'x' => Command::BuySunlight(PlantKey::RainbowRose),
        'c' => Command::BuySunlight(PlantKey::StarfruitTree),
        'h' => Command::HarvestAll,
        't' => Command::CycleTab,
        'n' => Command::Reset,
        _ => return None,
    };
    Some(command)
}

fn click_command(id: u16) -> Option<Command> {
    let indexed = |base: u16, len: usize| -> Option<usize> {
        id.checked_sub(base)
            .map(usize::from)
            .filter(|&i| i < len)
    };

    match id {
        HARVEST_ALL => return Some(Command::HarvestAll),
        TAB_PACKS => return Some(Command::SelectTab(ShopTab::Packs)),
        TAB_GENERATORS => return Some(Command::SelectTab(ShopTab::Generators)),
        TAB_SUNLIGHT => return Some(Command::SelectTab(ShopTab::Sunlight)),
        TAB_COLLECTION => return Some(Command::SelectTab(ShopTab::Collection)),
        NEXT_TAB => return Some(Command::CycleTab),
        DISMISS_POPUP => return Some(Command::DismissPopup),
        RESET_GARDEN => return Some(Command::Reset),
        _ => {}
    }
    if let Some(i) = indexed(OPEN_PACK_BASE, PackKind::ALL.len()) {
        return Some(Command::OpenPack(PackKind::ALL[i]));
    }
    if let Some(i) = indexed(BUY_GENERATOR_BASE, GeneratorKind::ALL.len()) {
        return Some(Command::BuyGenerator(GeneratorKind::ALL[i]));
    }
    if let Some(i) = indexed(BUY_SUNLIGHT_BASE, PlantKey::SUNLIGHT_SHOP.len()) {
        return Some(Command::BuySunlight(PlantKey::SUNLIGHT_SHOP[i]));
    }
    let slot = id.checked_sub(HARVEST_SLOT_BASE)?;
    if (1..=u16::from(SLOT_COUNT)).contains(&slot) {
        return Some(Command::Harvest(slot as SlotId));
    }
    None
}

pub struct GardenGame {
    engine: Engine,
    tab: ShopTab,
    log: Vec<LogEntry>,
    popup: Option<Popup>,
    /// Wall-clock time of the last input or tick, used for growth bars.
    now_ms: f64,
    /// Set by the first reset request; the second one wipes the garden.
    confirm_reset: bool,
}

impl GardenGame {
    pub fn new(backend: Box<dyn Storage>, seed: u64, now_ms: f64) -> Self {
        let engine = Engine::new(backend, EngineConfig::default(), seed, now_ms);
        let mut game = Self {
            engine,
            tab: ShopTab::Packs,
            log: Vec::new(),
            popup: None,
            now_ms,
            confirm_reset: false,
        };
        game.add_log("🌱 Welcome to Plant Paradise!", true);
        if game.engine.is_opening_pack() {
            game.add_log("Finishing the pack you were opening...", false);
        }
        game
    }

    pub fn engine(&self) -> &Engine {
        &self.engine
    }

    pub fn tab(&self) -> ShopTab {
        self.tab
    }

    pub fn popup(&self) -> Option<&Popup> {
        self.popup.as_ref()
    }

    pub fn log(&self) -> &[LogEntry] {
        &self.log
    }

    pub fn now_ms(&self) -> f64 {
        self.now_ms
    }

    pub fn is_confirming_reset(&self) -> bool {
        self.confirm_reset
    }

    fn add_log(&mut self, text: &str, is_important: bool) {
        self.log.push(LogEntry {
            text: text.to_string(),
            is_important,
        });
        if self.log.len() > MAX_LOG {
            self.log.remove(0);
        }
    }

    fn show_popup(&mut self, icon: &'static str, title: String, detail: String) {
        self.popup = Some(Popup {
            icon,
            title,
            detail,
            expires_at: self.now_ms + POPUP_MS,
        });
    }

    /// Handle an input event. Returns true if the event was consumed.
    pub fn handle_input(&mut self, event: &InputEvent, now_ms: f64) -> bool {
        self.now_ms = now_ms;
        let command = match event {
            InputEvent::Key(c) => key_command(*c),
            InputEvent::Click(id) => click_command(*id),
        };
        match command {
            Some(command) => {
                self.apply(command);
                true
            }
            None => false,
        }
    }

    fn apply(&mut self, command: Command) {
        let now = self.now_ms;
        if command != Command::Reset {
            self.confirm_reset = false;
        }
        let result = match command {
            Command::OpenPack(pack) => self.engine.open_seed_pack(pack, now),
            Command::BuyGenerator(kind) => self.engine.buy_generator(kind),
            Command::BuySunlight(plant) => self.engine.buy_sunlight_plant(plant, now),
            Command::Harvest(slot) => self.engine.harvest(slot, now),
            Command::HarvestAll => {
                let events = self.engine.harvest_all(now);
                self.harvested(&events);
                return;
            }
            Command::SelectTab(tab) => {
                self.tab = tab;
                return;
            }
            Command::CycleTab => {
                self.tab = self.tab.next();
                return;
            }
            Command::DismissPopup => {
                self.popup = None;
                return;
            }
            Command::Reset => {
                if self.confirm_reset {
                    self.confirm_reset = false;
                    let event = self.engine.reset();
                    self.record(event);
                } else {
                    self.confirm_reset = true;
                    self.add_log(
                        &format!(
                            "Start a new garden? Press [{}] again to confirm.",
                            render::RESET_KEY
                        ),
                        true,
                    );
                }
                return;
            }
        };
        match result {
            Ok(event) => self.record(event),
            Err(e) => self.rejected(&e),
        }
    }

    /// Run due engine work and expire the popup.
    pub fn tick(&mut self, now_ms: f64) {
        self.now_ms = now_ms;
        for event in self.engine.advance(now_ms) {
            self.record(event);
        }
        if self
            .popup
            .as_ref()
            .is_some_and(|p| p.expires_at <= now_ms)
        {
            self.popup = None;
        }
    }

    fn harvested(&mut self, events: &[GameEvent]) {
        if events.is_empty() {
            self.add_log("Nothing is ready to harvest yet.", false);
            return;
        }
        let total: f64 = events
            .iter()
            .map(|e| match e {
                GameEvent::Harvested { reward, .. } => *reward,
                _ => 0.0,
            })
            .sum();
        self.add_log(
            &format!(
                "🧺 Harvested {} plants for {} nectar",
                events.len(),
                format_number(total)
            ),
            true,
        );
        self.show_popup(
            "🧺",
            format!("{} plants harvested", events.len()),
            format!("+{} nectar", format_number(total)),
        );
    }

    /// Turn an engine event into log lines and, for rewards, a popup.
    fn record(&mut self, event: GameEvent) {
        match event {
            GameEvent::PackOpening { pack, cost } => {
                self.add_log(
                    &format!(
                        "{} Opening {} for {} nectar...",
                        pack.icon(),
                        pack.name(),
                        format_number(cost)
                    ),
                    false,
                );
            }
            GameEvent::PackRevealed { plant, slot, .. } => {
                let info = plant.info();
                let where_ = match slot {
                    Some(id) => format!("planted in slot {}", id),
                    None => "garden full, added to collection".to_string(),
                };
                self.add_log(
                    &format!("{} {} ({}) {}", info.icon, info.name, info.rarity.label(), where_),
                    true,
                );
                self.show_popup(info.icon, info.name.to_string(), info.rarity.label().to_string());
            }
            GameEvent::SunlightPlantBought { plant, slot, cost } => {
                let info = plant.info();
                self.add_log(
                    &format!(
                        "☀ Bought {} for {} sunlight, planted in slot {}",
                        info.name, cost, slot
                    ),
                    true,
                );
                self.show_popup(info.icon, info.name.to_string(), info.rarity.label().to_string());
            }
            GameEvent::GeneratorBought {
                generator,
                level,
                cost,
            } => {
                self.add_log(
                    &format!(
                        "{} {} upgraded to level {} (-{} nectar)",
                        generator.icon(),
                        generator.name(),
                        level,
                        format_number(cost)
                    ),
                    false,
                );
            }
            GameEvent::Harvested {
                slot,
                plant,
                reward,
            } => {
                let info = plant.info();
                self.add_log(
                    &format!(
                        "{} Harvested {} from slot {} (+{} nectar)",
                        info.icon,
                        info.name,
                        slot,
                        format_number(reward)
                    ),
                    false,
                );
                self.show_popup(
                    info.icon,
                    format!("{} harvested", info.name),
                    format!("+{} nectar", format_number(reward)),
                );
            }
            GameEvent::MilestoneReached {
                threshold,
                sunlight,
            } => {
                self.add_log(
                    &format!(
                        "🏆 Milestone: {} plants collected! +{} sunlight",
                        threshold, sunlight
                    ),
                    true,
                );
                self.show_popup(
                    "🏆",
                    format!("{} plants collected", threshold),
                    format!("+{} sunlight", sunlight),
                );
            }
            GameEvent::PassiveIncome { .. } => {}
            GameEvent::Reset => {
                self.log.clear();
                self.popup = None;
                self.tab = ShopTab::Packs;
                self.add_log("🌱 The garden starts over.", true);
            }
        }
    }

    fn rejected(&mut self, error: &ActionError) {
        let text = match error {
            ActionError::InsufficientNectar { cost, available } => format!(
                "Not enough nectar ({} / {})",
                format_number(*available),
                format_number(*cost)
            ),
            ActionError::InsufficientSunlight { cost, available } => {
                format!("Not enough sunlight ({} / {})", available, cost)
            }
            ActionError::PackAlreadyOpening(pack) => {
                format!("Still opening {}...", pack.name())
            }
            ActionError::NoEmptySlot => {
                "No empty garden slot. Harvest something first.".to_string()
            }
            ActionError::NotReady(slot) => {
                match self.engine.state().active_slots.get(slot) {
                    Some(s) => format!(
                        "Slot {} is still growing ({} left)",
                        slot,
                        logic::format_time(logic::remaining_ms(s, self.now_ms))
                    ),
                    None => error.to_string(),
                }
            }
            other => other.to_string(),
        };
        self.add_log(&text, false);
    }

    pub fn render(&self, f: &mut Frame, area: Rect, click_state: &Rc<RefCell<ClickState>>) {
        render::render(self, f, area, click_state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use store::MemoryStorage;

    const T0: f64 = 1_700_000_000_000.0;

    fn game() -> GardenGame {
        GardenGame::new(Box::new(MemoryStorage::new()), 7, T0)
    }

    fn game_with(json: &str) -> GardenGame {
        let storage = MemoryStorage::with_entry(&EngineConfig::default().storage_key, json);
        GardenGame::new(Box::new(storage), 7, T0)
    }

    #[test]
    fn key_opens_basic_pack() {
        let mut g = game();
        assert!(g.handle_input(&InputEvent::Key('1'), T0));
        assert!(g.engine().is_opening_pack());
        assert!((g.engine().state().nectar - 40.0).abs() < 0.001);
    }

    #[test]
    fn reveal_shows_popup_then_expires() {
        let mut g = game();
        g.handle_input(&InputEvent::Key('1'), T0);
        g.tick(T0 + 1_500.0);
        let popup = g.popup().cloned();
        assert!(popup.is_some());
        assert!(g.log().last().is_some_and(|e| e.is_important));

        g.tick(T0 + 3_000.0);
        assert!(g.popup().is_some());
        g.tick(T0 + 3_500.0);
        assert!(g.popup().is_none());
    }

    #[test]
    fn click_ids_dispatch() {
        let mut g = game_with(r#"{ "nectar": 1000 }"#);
        g.handle_input(&InputEvent::Click(BUY_GENERATOR_BASE + 1), T0);
        assert_eq!(g.engine().state().generators[&GeneratorKind::Greenhouse].level, 1);

        g.handle_input(&InputEvent::Click(OPEN_PACK_BASE + 1), T0);
        assert_eq!(g.engine().state().opening_pack, Some(PackKind::Premium));

        g.handle_input(&InputEvent::Click(TAB_COLLECTION), T0);
        assert_eq!(g.tab(), ShopTab::Collection);
    }

    #[test]
    fn unknown_click_not_consumed() {
        let mut g = game();
        assert!(!g.handle_input(&InputEvent::Click(OPEN_PACK_BASE + 3), T0));
        assert!(!g.handle_input(&InputEvent::Click(HARVEST_SLOT_BASE), T0));
        assert!(!g.handle_input(&InputEvent::Click(HARVEST_SLOT_BASE + 13), T0));
        assert!(!g.handle_input(&InputEvent::Key('?'), T0));
    }

    #[test]
    fn rejected_action_logs_reason() {
        let mut g = game();
        g.handle_input(&InputEvent::Key('3'), T0);
        assert!(!g.engine().is_opening_pack());
        assert_eq!(
            g.log().last().map(|e| e.text.as_str()),
            Some("Not enough nectar (50 / 200)")
        );
    }

    #[test]
    fn tab_cycles() {
        let mut g = game();
        for expected in [
            ShopTab::Generators,
            ShopTab::Sunlight,
            ShopTab::Collection,
            ShopTab::Packs,
        ] {
            g.handle_input(&InputEvent::Key('t'), T0);
            assert_eq!(g.tab(), expected);
        }
    }

    #[test]
    fn harvest_slot_by_click() {
        let mut g = game_with(
            r#"{ "activeSlots": { "4": { "type": "grass", "plantedTime": 1700000000000 } } }"#,
        );
        g.handle_input(&InputEvent::Click(HARVEST_SLOT_BASE + 4), T0 + 1_000.0);
        assert!(g.engine().state().active_slots.contains_key(&4));
        assert!(g.log().last().is_some_and(|e| e.text.contains("still growing")));

        g.handle_input(&InputEvent::Click(HARVEST_SLOT_BASE + 4), T0 + 8_000.0);
        assert!(g.engine().state().active_slots.is_empty());
        assert!((g.engine().state().nectar - 62.0).abs() < 0.001);
    }

    #[test]
    fn harvest_all_summarizes() {
        let mut g = game_with(
            r#"{ "nectar": 0, "activeSlots": {
                "1": { "type": "grass", "plantedTime": 1700000000000 },
                "2": { "type": "daisy", "plantedTime": 1700000000000 }
            } }"#,
        );
        g.handle_input(&InputEvent::Key('h'), T0 + 10_000.0);
        assert!((g.engine().state().nectar - 27.0).abs() < 0.001);
        let popup = g.popup().cloned();
        assert_eq!(popup.map(|p| p.detail), Some("+27 nectar".to_string()));
    }

    #[test]
    fn reset_needs_confirmation() {
        let mut g = game_with(r#"{ "nectar": 999 }"#);
        g.handle_input(&InputEvent::Key('N'), T0);
        assert!(g.is_confirming_reset());
        assert!((g.engine().state().nectar - 999.0).abs() < 0.001);

        g.handle_input(&InputEvent::Key('n'), T0);
        assert!(!g.is_confirming_reset());
        assert!((g.engine().state().nectar - 50.0).abs() < 0.001);
    }

    #[test]
    fn shop_key_hints_never_reset() {
        let mut g = game_with(r#"{ "nectar": 100000, "sunlight": 100 }"#);
        let hints = render::PACK_KEYS
            .iter()
            .chain(render::GENERATOR_KEYS.iter())
            .chain(render::SUNLIGHT_KEYS.iter());
        for &key in hints {
            let command = key_command(key);
            assert!(command.is_some(), "hint [{}] does nothing", key);
            assert_ne!(command, Some(Command::Reset), "hint [{}] resets", key);
        }

        // Pressing the Mystic Well hint twice buys two levels.
        g.handle_input(&InputEvent::Key('R'), T0);
        g.handle_input(&InputEvent::Key('R'), T0);
        assert!(!g.is_confirming_reset());
        assert_eq!(g.engine().state().generators[&GeneratorKind::MysticWell].level, 2);
        assert!(g.engine().state().nectar < 100000.0);
    }

    #[test]
    fn uppercase_hints_match_lowercase_keys() {
        for (upper, lower) in [('Q', 'q'), ('Z', 'z'), ('H', 'h'), ('T', 't')] {
            assert_eq!(key_command(upper), key_command(lower));
        }
    }

    #[test]
    fn other_input_cancels_reset_confirmation() {
        let mut g = game_with(r#"{ "nectar": 999 }"#);
        g.handle_input(&InputEvent::Click(RESET_GARDEN), T0);
        g.handle_input(&InputEvent::Key('t'), T0);
        assert!(!g.is_confirming_reset());
        g.handle_input(&InputEvent::Click(RESET_GARDEN), T0);
        assert!((g.engine().state().nectar - 999.0).abs() < 0.001);
    }

    #[test]
    fn milestone_popup() {
        let mut g = game_with(r#"{ "nectar": 100, "plantCollection": { "daisy": 4 } }"#);
        g.handle_input(&InputEvent::Key('1'), T0);
        g.tick(T0 + 1_500.0);
        g.tick(T0 + 1_600.0);
        assert_eq!(g.engine().state().sunlight, 1);
        let popup = g.popup().cloned();
        assert_eq!(popup.map(|p| p.detail), Some("+1 sunlight".to_string()));
    }

    #[test]
    fn log_is_capped() {
        let mut g = game();
        for _ in 0..120 {
            g.handle_input(&InputEvent::Key('3'), T0);
        }
        assert_eq!(g.log().len(), MAX_LOG);
    }

    #[test]
    fn resumed_reveal_is_announced() {
        let g = game_with(r#"{ "openingPack": "basic" }"#);
        assert!(g.log().iter().any(|e| e.text.contains("Finishing")));
    }
}

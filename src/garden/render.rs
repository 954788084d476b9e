//! Plant Paradise rendering: header, garden slots, shop tabs, log and reward popup.

use std::cell::RefCell;
use std::rc::Rc;

use ratzilla::ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratzilla::ratatui::style::{Color, Modifier, Style};
use ratzilla::ratatui::text::{Line, Span};
use ratzilla::ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};
use ratzilla::ratatui::Frame;

use crate::input::{is_narrow_layout, ClickState};
use crate::widgets::{ClickableList, TabBar};

use super::actions::*;
use super::catalog::{GeneratorKind, PackKind, PlantKey, Rarity, SLOT_COUNT};
use super::logic::{format_number, format_time, is_ready, progress_percent, remaining_ms};
use super::state::GameState;
use super::{GardenGame, ShopTab};

const BAR_WIDTH: usize = 10;

const TABS: [(ShopTab, u16); 4] = [
    (ShopTab::Packs, TAB_PACKS),
    (ShopTab::Generators, TAB_GENERATORS),
    (ShopTab::Sunlight, TAB_SUNLIGHT),
    (ShopTab::Collection, TAB_COLLECTION),
];

pub(super) const PACK_KEYS: [char; 3] = ['1', '2', '3'];
pub(super) const GENERATOR_KEYS: [char; 4] = ['Q', 'W', 'E', 'R'];
pub(super) const SUNLIGHT_KEYS: [char; 3] = ['Z', 'X', 'C'];
pub(super) const RESET_KEY: char = 'N';

pub fn render(game: &GardenGame, f: &mut Frame, area: Rect, click_state: &Rc<RefCell<ClickState>>) {
    let state = game.engine().state();
    let garden_height = SLOT_COUNT as u16 + 3;

    let chunks = if is_narrow_layout(area.width) {
        Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(4),
                Constraint::Length(garden_height),
                Constraint::Min(8),
                Constraint::Length(6),
                Constraint::Length(1),
            ])
            .split(area)
    } else {
        Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(4),
                Constraint::Min(garden_height),
                Constraint::Length(0),
                Constraint::Length(8),
                Constraint::Length(1),
            ])
            .split(area)
    };

    render_header(state, f, chunks[0]);

    let (garden_area, shop_area) = if is_narrow_layout(area.width) {
        (chunks[1], chunks[2])
    } else {
        let cols = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
            .split(chunks[1]);
        (cols[0], cols[1])
    };

    render_garden(game, f, garden_area, click_state);
    render_shop(game, f, shop_area, click_state);
    render_log(game, f, chunks[3]);
    render_footer(game, f, chunks[4], click_state);

    if let Some(popup) = game.popup() {
        render_popup(popup, f, area, click_state);
    }
}

fn rarity_color(rarity: Rarity) -> Color {
    match rarity {
        Rarity::Common => Color::White,
        Rarity::Uncommon => Color::Green,
        Rarity::Rare => Color::Blue,
        Rarity::Legendary => Color::Yellow,
        Rarity::Mythical => Color::Magenta,
    }
}

fn key_style(enabled: bool) -> Style {
    if enabled {
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::DarkGray)
    }
}

fn render_header(state: &GameState, f: &mut Frame, area: Rect) {
    let nps = state.total_nectar_per_second();
    let totals = Line::from(vec![
        Span::styled(
            format!(" 💧 {} nectar", format_number(state.nectar)),
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            format!("  ☀ {} sunlight", state.sunlight),
            Style::default().fg(Color::Yellow),
        ),
        Span::styled(
            format!("  +{}/s", format_number(nps)),
            Style::default().fg(Color::Green),
        ),
    ]);

    let collected = state.total_plants_collected();
    let milestone = match state.next_milestone() {
        Some(m) => Line::from(Span::styled(
            format!(
                " 🏆 {} / {} plants, +{} ☀ at {}",
                collected, m.plants_threshold, m.sunlight_reward, m.plants_threshold
            ),
            Style::default().fg(Color::Gray),
        )),
        None => Line::from(Span::styled(
            format!(" 🏆 {} plants, every milestone reached", collected),
            Style::default().fg(Color::Gray),
        )),
    };

    let widget = Paragraph::new(vec![totals, milestone]).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Green))
            .title(" 🌸 Plant Paradise "),
    );
    f.render_widget(widget, area);
}

fn growth_bar(percent: f64) -> String {
    let filled = ((percent / 100.0) * BAR_WIDTH as f64).floor() as usize;
    let filled = filled.min(BAR_WIDTH);
    format!("{}{}", "█".repeat(filled), "░".repeat(BAR_WIDTH - filled))
}

fn render_garden(
    game: &GardenGame,
    f: &mut Frame,
    area: Rect,
    click_state: &Rc<RefCell<ClickState>>,
) {
    let state = game.engine().state();
    let now = game.now_ms();
    let mut cl = ClickableList::new();

    for id in 1..=SLOT_COUNT {
        let Some(slot) = state.active_slots.get(&id) else {
            cl.push(Line::from(Span::styled(
                format!(" {:>2}  · empty", id),
                Style::default().fg(Color::DarkGray),
            )));
            continue;
        };
        let info = slot.plant.info();
        let mut spans = vec![
            Span::styled(format!(" {:>2}  ", id), Style::default().fg(Color::DarkGray)),
            Span::styled(
                format!("{} {:<15}", info.icon, info.name),
                Style::default().fg(rarity_color(info.rarity)),
            ),
        ];
        if is_ready(slot, now) {
            spans.push(Span::styled(
                format!(" ✓ ready +{}", format_number(info.harvest_reward)),
                Style::default()
                    .fg(Color::Green)
                    .add_modifier(Modifier::BOLD),
            ));
        } else {
            spans.push(Span::styled(
                format!(" {}", growth_bar(progress_percent(slot, now))),
                Style::default().fg(Color::Green),
            ));
            spans.push(Span::styled(
                format!(" {}", format_time(remaining_ms(slot, now))),
                Style::default().fg(Color::Gray),
            ));
        }
        cl.push_clickable(Line::from(spans), HARVEST_SLOT_BASE + u16::from(id));
    }

    let ready = state
        .active_slots
        .values()
        .filter(|s| is_ready(s, now))
        .count();
    cl.push_clickable(
        Line::from(vec![
            Span::styled(" [H] ", key_style(ready > 0)),
            Span::styled(
                format!("Harvest all ({} ready)", ready),
                Style::default().fg(if ready > 0 { Color::White } else { Color::DarkGray }),
            ),
        ]),
        HARVEST_ALL,
    );

    let mut cs = click_state.borrow_mut();
    cl.register_targets(area, &mut cs, 1, 1, 0, 0);

    let title = format!(
        " 🌿 Garden {}/{} ",
        state.active_slots.len(),
        SLOT_COUNT
    );
    let widget = Paragraph::new(cl.into_lines()).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Green))
            .title(title),
    );
    f.render_widget(widget, area);
}

fn render_shop(
    game: &GardenGame,
    f: &mut Frame,
    area: Rect,
    click_state: &Rc<RefCell<ClickState>>,
) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Yellow))
        .title(" 🛒 Shop ");
    let inner = block.inner(area);
    f.render_widget(block, area);
    if inner.height < 2 {
        return;
    }

    let tab_area = Rect::new(inner.x, inner.y, inner.width, 1);
    let content_area = Rect::new(inner.x, inner.y + 1, inner.width, inner.height - 1);

    let mut cs = click_state.borrow_mut();
    let mut bar = TabBar::new("│");
    for (tab, action_id) in TABS {
        let style = if tab == game.tab() {
            Style::default()
                .fg(Color::Black)
                .bg(Color::Yellow)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::Yellow)
        };
        bar = bar.tab(tab.label(), style, action_id);
    }
    bar.render(f, tab_area, &mut cs);

    let state = game.engine().state();
    let mut cl = ClickableList::new();
    match game.tab() {
        ShopTab::Packs => build_packs(state, &mut cl),
        ShopTab::Generators => build_generators(state, &mut cl),
        ShopTab::Sunlight => build_sunlight(state, &mut cl),
        ShopTab::Collection => build_collection(state, &mut cl),
    }

    cl.register_targets(content_area, &mut cs, 0, 0, 0, content_area.width);
    let widget = Paragraph::new(cl.into_lines()).wrap(Wrap { trim: false });
    f.render_widget(widget, content_area);
}

fn build_packs(state: &GameState, cl: &mut ClickableList<'static>) {
    let opening = state.opening_pack;
    if let Some(pack) = opening {
        cl.push(Line::from(Span::styled(
            format!(" {} Opening {}...", pack.icon(), pack.name()),
            Style::default()
                .fg(Color::Magenta)
                .add_modifier(Modifier::BOLD),
        )));
    }
    for (i, pack) in PackKind::ALL.into_iter().enumerate() {
        let affordable = opening.is_none() && state.nectar >= pack.cost();
        cl.push_clickable(
            Line::from(vec![
                Span::styled(format!(" [{}] ", PACK_KEYS[i]), key_style(affordable)),
                Span::styled(
                    format!("{} {}", pack.icon(), pack.name()),
                    Style::default().fg(Color::White),
                ),
                Span::styled(
                    format!("  {} nectar", format_number(pack.cost())),
                    Style::default().fg(if affordable { Color::Cyan } else { Color::DarkGray }),
                ),
            ]),
            OPEN_PACK_BASE + i as u16,
        );
        let odds: Vec<String> = Rarity::ALL
            .into_iter()
            .filter(|&r| pack.rarity_rates().rate(r) > 0.0)
            .map(|r| format!("{} {}%", r.label(), pack.rarity_rates().rate(r)))
            .collect();
        cl.push(Line::from(Span::styled(
            format!("       {}", odds.join(" · ")),
            Style::default().fg(Color::DarkGray),
        )));
    }
}

fn build_generators(state: &GameState, cl: &mut ClickableList<'static>) {
    for (i, kind) in GeneratorKind::ALL.into_iter().enumerate() {
        let Some(generator) = state.generator(kind) else {
            continue;
        };
        let cost = generator.current_cost();
        let affordable = state.nectar >= cost;
        cl.push_clickable(
            Line::from(vec![
                Span::styled(format!(" [{}] ", GENERATOR_KEYS[i]), key_style(affordable)),
                Span::styled(
                    format!("{} {} Lv {}", kind.icon(), kind.name(), generator.level),
                    Style::default().fg(Color::White),
                ),
                Span::styled(
                    format!("  {} nectar", format_number(cost)),
                    Style::default().fg(if affordable { Color::Cyan } else { Color::DarkGray }),
                ),
            ]),
            BUY_GENERATOR_BASE + i as u16,
        );
        cl.push(Line::from(Span::styled(
            format!(
                "       {} · +{}/s each, +{}/s now",
                kind.description(),
                format_number(generator.base_nectar),
                format_number(generator.nectar_per_second())
            ),
            Style::default().fg(Color::DarkGray),
        )));
    }
}

fn build_sunlight(state: &GameState, cl: &mut ClickableList<'static>) {
    let has_room = !state.empty_slots().is_empty();
    for (i, plant) in PlantKey::SUNLIGHT_SHOP.into_iter().enumerate() {
        let info = plant.info();
        let cost = plant.sunlight_cost().unwrap_or(0);
        let affordable = has_room && state.sunlight >= cost;
        cl.push_clickable(
            Line::from(vec![
                Span::styled(format!(" [{}] ", SUNLIGHT_KEYS[i]), key_style(affordable)),
                Span::styled(
                    format!("{} {}", info.icon, info.name),
                    Style::default().fg(rarity_color(info.rarity)),
                ),
                Span::styled(
                    format!("  {} ☀", cost),
                    Style::default().fg(if affordable { Color::Yellow } else { Color::DarkGray }),
                ),
            ]),
            BUY_SUNLIGHT_BASE + i as u16,
        );
        cl.push(Line::from(Span::styled(
            format!(
                "       {} · {} to grow, +{} nectar",
                info.rarity.label(),
                format_time(info.growth_time),
                format_number(info.harvest_reward)
            ),
            Style::default().fg(Color::DarkGray),
        )));
    }
    if !has_room {
        cl.push(Line::from(Span::styled(
            " Garden is full. Harvest to make room.",
            Style::default().fg(Color::Red),
        )));
    }
}

fn build_collection(state: &GameState, cl: &mut ClickableList<'static>) {
    cl.push(Line::from(Span::styled(
        format!(
            " Discovered {}/{} · {} collected",
            state.discovered_count(),
            PlantKey::ALL.len(),
            state.total_plants_collected()
        ),
        Style::default()
            .fg(Color::White)
            .add_modifier(Modifier::BOLD),
    )));
    for plant in PlantKey::ALL {
        let info = plant.info();
        let count = state.collected(plant);
        let line = if count > 0 {
            Line::from(vec![
                Span::styled(
                    format!(" {} {:<16}", info.icon, info.name),
                    Style::default().fg(rarity_color(info.rarity)),
                ),
                Span::styled(
                    format!("{:<10}", info.rarity.label()),
                    Style::default().fg(Color::Gray),
                ),
                Span::styled(format!("×{}", count), Style::default().fg(Color::White)),
            ])
        } else {
            Line::from(Span::styled(
                format!(" ?  {:<16}{}", "???", info.rarity.label()),
                Style::default().fg(Color::DarkGray),
            ))
        };
        cl.push(line);
    }
}

fn render_log(game: &GardenGame, f: &mut Frame, area: Rect) {
    let lines: Vec<Line> = game
        .log()
        .iter()
        .map(|entry| {
            let style = if entry.is_important {
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::Gray)
            };
            Line::from(Span::styled(entry.text.as_str(), style))
        })
        .collect();

    let paragraph = Paragraph::new(lines).wrap(Wrap { trim: false });
    // Keep the newest entry on the bottom row.
    let visible = area.height.saturating_sub(2) as usize;
    let total = paragraph.line_count(area.width.saturating_sub(2));
    let scroll = total.saturating_sub(visible) as u16;

    let widget = paragraph.scroll((scroll, 0)).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Blue))
            .title(" 📜 Log "),
    );
    f.render_widget(widget, area);
}

fn render_footer(
    game: &GardenGame,
    f: &mut Frame,
    area: Rect,
    click_state: &Rc<RefCell<ClickState>>,
) {
    let reset_label = if game.is_confirming_reset() {
        format!("[{}] Confirm new garden", RESET_KEY)
    } else {
        format!("[{}] New garden", RESET_KEY)
    };
    let reset_color = if game.is_confirming_reset() {
        Color::Red
    } else {
        Color::DarkGray
    };
    let mut cs = click_state.borrow_mut();
    TabBar::new(" ")
        .tab("[H] Harvest all", Style::default().fg(Color::Green), HARVEST_ALL)
        .tab("[T] Next tab", Style::default().fg(Color::DarkGray), NEXT_TAB)
        .tab(reset_label, Style::default().fg(reset_color), RESET_GARDEN)
        .render(f, area, &mut cs);
}

fn render_popup(
    popup: &super::Popup,
    f: &mut Frame,
    area: Rect,
    click_state: &Rc<RefCell<ClickState>>,
) {
    let width = area.width.min(34);
    let height = 5.min(area.height);
    let rect = Rect::new(
        area.x + (area.width - width) / 2,
        area.y + (area.height - height) / 2,
        width,
        height,
    );

    let lines = vec![
        Line::from(Span::styled(
            format!("{} {}", popup.icon, popup.title),
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            popup.detail.as_str(),
            Style::default().fg(Color::Yellow),
        )),
    ];
    let widget = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(
                    Style::default()
                        .fg(Color::Magenta)
                        .add_modifier(Modifier::BOLD),
                )
                .title(" ✨ "),
        );
    f.render_widget(Clear, rect);
    f.render_widget(widget, rect);

    click_state
        .borrow_mut()
        .add_click_target(rect, DISMISS_POPUP);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn growth_bar_fills_by_tenths() {
        assert_eq!(growth_bar(0.0), "░".repeat(10));
        assert_eq!(growth_bar(45.0), format!("{}{}", "█".repeat(4), "░".repeat(6)));
        assert_eq!(growth_bar(100.0), "█".repeat(10));
        assert_eq!(growth_bar(250.0), "█".repeat(10));
    }

    #[test]
    fn every_tab_has_a_target() {
        assert_eq!(TABS.len(), ShopTab::ALL.len());
        for tab in ShopTab::ALL {
            assert!(TABS.iter().any(|(t, _)| *t == tab));
        }
    }

    #[test]
    fn key_hints_cover_catalog() {
        assert_eq!(PACK_KEYS.len(), PackKind::ALL.len());
        assert_eq!(GENERATOR_KEYS.len(), GeneratorKind::ALL.len());
        assert_eq!(SUNLIGHT_KEYS.len(), PlantKey::SUNLIGHT_SHOP.len());
    }
}

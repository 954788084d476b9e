mod garden;
mod input;
mod widgets;

use std::{cell::RefCell, io, rc::Rc};

use garden::store::Storage;
use garden::GardenGame;
use input::{ClickState, InputEvent};
use ratzilla::event::{KeyCode, MouseButton, MouseEventKind};
use ratzilla::ratatui::Terminal;
use ratzilla::{DomBackend, WebRenderer};

/// Translate a page-space click into an action ID using the grid container's
/// bounding rect.
fn dom_click_target(mouse_x: u32, mouse_y: u32, cs: &ClickState) -> Option<u16> {
    let document = web_sys::window()?.document()?;
    // DomBackend renders into a <div> directly under <body>.
    let grid = document.query_selector("body > div").ok()??;
    let rect = grid.get_bounding_client_rect();

    let action = cs.hit_test_pixels(
        mouse_x as f64 - rect.left(),
        mouse_y as f64 - rect.top(),
        rect.width(),
        rect.height(),
    );
    log::debug!("click at ({}, {}) -> {:?}", mouse_x, mouse_y, action);
    action
}

#[cfg(target_arch = "wasm32")]
fn init_logging() {
    if let Err(e) = console_log::init_with_level(log::Level::Info) {
        web_sys::console::warn_1(&format!("logger already set: {}", e).into());
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn init_logging() {
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .try_init();
}

#[cfg(target_arch = "wasm32")]
fn storage_backend() -> Box<dyn Storage> {
    Box::new(garden::store::LocalStorage)
}

#[cfg(not(target_arch = "wasm32"))]
fn storage_backend() -> Box<dyn Storage> {
    Box::new(garden::store::MemoryStorage::new())
}

fn main() -> io::Result<()> {
    console_error_panic_hook::set_once();
    init_logging();

    let now = js_sys::Date::now();
    let game = Rc::new(RefCell::new(GardenGame::new(storage_backend(), now as u64, now)));
    let click_state = Rc::new(RefCell::new(ClickState::new()));
    let backend = DomBackend::new()?;
    let terminal = Terminal::new(backend)?;

    terminal.on_mouse_event({
        let game = game.clone();
        let click_state = click_state.clone();
        move |mouse_event| {
            if mouse_event.event != MouseEventKind::Pressed
                || mouse_event.button != MouseButton::Left
            {
                return;
            }
            let action = {
                let cs = click_state.borrow();
                if cs.terminal_rows == 0 || cs.terminal_cols == 0 {
                    return;
                }
                dom_click_target(mouse_event.x, mouse_event.y, &cs)
            };
            if let Some(id) = action {
                game.borrow_mut()
                    .handle_input(&InputEvent::Click(id), js_sys::Date::now());
            }
        }
    });

    terminal.on_key_event({
        let game = game.clone();
        move |key_event| {
            if let KeyCode::Char(c) = key_event.code {
                game.borrow_mut()
                    .handle_input(&InputEvent::Key(c), js_sys::Date::now());
            }
        }
    });

    terminal.draw_web(move |f| {
        let mut game = game.borrow_mut();
        game.tick(js_sys::Date::now());

        let area = f.area();
        click_state
            .borrow_mut()
            .begin_frame(area.width, area.height);
        game.render(f, area, &click_state);
    });

    Ok(())
}

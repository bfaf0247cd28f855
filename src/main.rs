mod config;
mod input;
mod logging;
mod petpal;
mod time;
mod widgets;

use std::{cell::RefCell, io, rc::Rc};

use input::{pixel_x_to_col, pixel_y_to_row, ClickState, InputEvent};
use petpal::rng::SimRng;
use petpal::PetPalGame;
use ratzilla::event::{KeyCode, MouseButton, MouseEventKind};
use ratzilla::ratatui::Terminal;
use ratzilla::{DomBackend, WebRenderer};
use time::FrameClock;

/// Query the grid container's bounding rect and convert pixel coordinates
/// to a terminal cell.
fn dom_pixel_to_cell(mouse_x: u32, mouse_y: u32, cs: &ClickState) -> Option<(u16, u16)> {
    let window = web_sys::window()?;
    let document = window.document()?;

    // DomBackend creates a <div> as the grid container inside <body>.
    let grid = document.query_selector("body > div").ok()??;
    let rect = grid.get_bounding_client_rect();

    let click_y = mouse_y as f64 - rect.top();
    let click_x = mouse_x as f64 - rect.left();

    let row = pixel_y_to_row(click_y, rect.height(), cs.terminal_rows)?;
    let col = pixel_x_to_col(click_x, rect.width(), cs.terminal_cols)?;

    log::debug!(
        "click: pixel=({}, {}), cell=({}, {}), targets={}",
        mouse_x,
        mouse_y,
        col,
        row,
        cs.targets.len()
    );

    Some((col, row))
}

fn key_to_event(code: KeyCode) -> Option<InputEvent> {
    match code {
        KeyCode::Char(c) => Some(InputEvent::Key(c)),
        KeyCode::Enter => Some(InputEvent::Submit),
        KeyCode::Backspace => Some(InputEvent::Erase),
        KeyCode::Tab => Some(InputEvent::NextField),
        KeyCode::Esc => Some(InputEvent::Back),
        KeyCode::Left => Some(InputEvent::Left),
        KeyCode::Right => Some(InputEvent::Right),
        _ => None,
    }
}

fn performance_now() -> Option<f64> {
    Some(web_sys::window()?.performance()?.now())
}

fn main() -> io::Result<()> {
    console_error_panic_hook::set_once();
    logging::init();

    let config = config::SimConfig::load();
    let game = Rc::new(RefCell::new(PetPalGame::new(config, SimRng::from_entropy())));
    let click_state = Rc::new(RefCell::new(ClickState::new()));
    let backend = DomBackend::new()?;
    let terminal = Terminal::new(backend)?;

    // Mouse/touch click handler
    terminal.on_mouse_event({
        let game = game.clone();
        let click_state = click_state.clone();
        move |mouse_event| {
            if mouse_event.event != MouseEventKind::Pressed
                || mouse_event.button != MouseButton::Left
            {
                return;
            }

            let cs = click_state.borrow();
            if cs.terminal_rows == 0 || cs.terminal_cols == 0 {
                return;
            }

            let Some((col, row)) = dom_pixel_to_cell(mouse_event.x, mouse_event.y, &cs) else {
                return;
            };
            let action = cs.hit_test(col, row);
            drop(cs);

            if let Some(action_id) = action {
                game.borrow_mut().handle_input(&InputEvent::Click(action_id));
            }
        }
    });

    // Keyboard handler
    terminal.on_key_event({
        let game = game.clone();
        move |key_event| {
            if let Some(event) = key_to_event(key_event.code) {
                game.borrow_mut().handle_input(&event);
            }
        }
    });

    terminal.draw_web({
        let click_state = click_state.clone();
        let mut clock = FrameClock::new();
        move |f| {
            let elapsed = performance_now()
                .map(|now| clock.update(now))
                .unwrap_or_default();
            if elapsed > 0 {
                game.borrow_mut().tick(elapsed);
            }

            let size = f.area();

            // Update terminal dimensions and clear click targets
            {
                let mut cs = click_state.borrow_mut();
                cs.terminal_cols = size.width;
                cs.terminal_rows = size.height;
                cs.clear_targets();
            }

            game.borrow().render(f, size, &click_state);
        }
    });

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn special_keys_map_to_events() {
        assert_eq!(key_to_event(KeyCode::Char('1')), Some(InputEvent::Key('1')));
        assert_eq!(key_to_event(KeyCode::Enter), Some(InputEvent::Submit));
        assert_eq!(key_to_event(KeyCode::Esc), Some(InputEvent::Back));
        assert_eq!(key_to_event(KeyCode::Tab), Some(InputEvent::NextField));
        assert_eq!(key_to_event(KeyCode::Up), None);
    }
}

use std::{cell::RefCell, io, rc::Rc};

use code_clicker::game::remote::{self, RemoteClient, RemoteOp};
use code_clicker::game::{actions, render, CodeClicker};
use code_clicker::input::{ClickState, InputEvent};
use code_clicker::time::TickClock;
use ratzilla::event::{KeyCode, KeyEvent, MouseButton, MouseEventKind};
use ratzilla::ratatui::Terminal;
use ratzilla::{DomBackend, WebRenderer};

/// Map a pointer position to the action under it, using the grid
/// container's on-page rect.
fn dom_hit_test(mouse_x: u32, mouse_y: u32, cs: &ClickState) -> Option<u16> {
    let document = web_sys::window()?.document()?;
    // DomBackend renders into the first <div> under <body>.
    let grid = document.query_selector("body > div").ok()??;
    let rect = grid.get_bounding_client_rect();

    cs.hit_test_pixels(
        mouse_x as f64 - rect.left(),
        mouse_y as f64 - rect.top(),
        rect.width(),
        rect.height(),
    )
}

fn performance_now() -> f64 {
    web_sys::window()
        .and_then(|w| w.performance())
        .map(|p| p.now())
        .unwrap_or(0.0)
}

fn key_to_input(key: &KeyEvent) -> Option<InputEvent> {
    match key.code {
        KeyCode::Char(c) if key.ctrl && key.shift && c.eq_ignore_ascii_case(&'d') => {
            Some(InputEvent::Click(actions::TOGGLE_DEV_PANEL))
        }
        KeyCode::Char(c) if !key.ctrl && !key.alt => Some(InputEvent::Key(c)),
        KeyCode::Enter => Some(InputEvent::Key(' ')),
        KeyCode::Esc => Some(InputEvent::Key('n')),
        _ => None,
    }
}

#[cfg(target_arch = "wasm32")]
fn restore(game: &mut CodeClicker) {
    use code_clicker::game::save;
    if let Some(patch) = save::load_game() {
        game.load(patch);
        web_sys::console::log_1(&"Code Clicker: save restored".into());
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn restore(_game: &mut CodeClicker) {}

#[cfg(target_arch = "wasm32")]
fn persist(game: &mut CodeClicker) {
    use code_clicker::game::save;
    use code_clicker::time::epoch_millis;
    if game.take_save_request() {
        let previous = game.state.last_saved;
        game.mark_saved(epoch_millis());
        if !save::save_game(&game.state) {
            game.state.last_saved = previous;
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn persist(game: &mut CodeClicker) {
    game.take_save_request();
}

/// Run a server save/load without blocking the frame; the result is
/// applied when the request completes.
#[cfg(target_arch = "wasm32")]
fn start_remote(
    op: RemoteOp,
    g: &mut CodeClicker,
    game: &Rc<RefCell<CodeClicker>>,
    client: &RemoteClient,
) {
    let game = Rc::clone(game);
    let client = client.clone();
    match op {
        RemoteOp::Save => {
            let snapshot = g.state.clone();
            wasm_bindgen_futures::spawn_local(async move {
                let result = client.save(&snapshot).await;
                game.borrow_mut().finish_remote_save(result);
            });
        }
        RemoteOp::Load => {
            wasm_bindgen_futures::spawn_local(async move {
                let result = client.load().await;
                game.borrow_mut().finish_remote_load(result);
            });
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn start_remote(
    op: RemoteOp,
    g: &mut CodeClicker,
    _game: &Rc<RefCell<CodeClicker>>,
    _client: &RemoteClient,
) {
    use code_clicker::game::remote::RemoteError;
    let unavailable = || RemoteError::Request("only available in the browser".to_owned());
    match op {
        RemoteOp::Save => g.finish_remote_save(Err(unavailable())),
        RemoteOp::Load => g.finish_remote_load(Err(unavailable())),
    }
}

fn main() -> io::Result<()> {
    console_error_panic_hook::set_once();

    let game = Rc::new(RefCell::new(CodeClicker::new()));
    restore(&mut game.borrow_mut());

    let click_state = Rc::new(RefCell::new(ClickState::new()));
    let clock = RefCell::new(TickClock::default());
    let client = RemoteClient::new(remote::DEFAULT_API_URL);
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
                dom_hit_test(mouse_event.x, mouse_event.y, &cs)
            };
            if let Some(action_id) = action {
                game.borrow_mut().handle_input(&InputEvent::Click(action_id));
            }
        }
    });

    terminal.on_key_event({
        let game = game.clone();
        move |key_event| {
            if let Some(event) = key_to_input(&key_event) {
                game.borrow_mut().handle_input(&event);
            }
        }
    });

    terminal.draw_web({
        let click_state = click_state.clone();
        move |f| {
            let ticks = clock.borrow_mut().advance(performance_now());
            let mut g = game.borrow_mut();
            g.tick(ticks);
            persist(&mut g);
            if let Some(op) = g.take_remote_request() {
                start_remote(op, &mut g, &game, &client);
            }

            let area = f.area();
            click_state.borrow_mut().begin_frame(area);
            render::render(&g, f, area, &click_state);
        }
    });

    Ok(())
}

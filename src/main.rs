//! Lane Dash entry point
//!
//! Hosts the simulation: the 16ms ticker, keyboard and touch listeners, and
//! the wall-clock one-shots for slide clears and banner dismissal. Rendering
//! is left to the page, which consumes the per-tick snapshot events.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{CustomEvent, CustomEventInit, KeyboardEvent, MouseEvent, TouchEvent};

    use lane_dash::config::Config;
    use lane_dash::consts::TICK_MS;
    use lane_dash::engine::Engine;
    use lane_dash::highscore::LocalStorageStore;
    use lane_dash::input::{classify_key, classify_touch, InputEvent};
    use lane_dash::sim::GameEvent;

    type SharedEngine = Rc<RefCell<Engine>>;

    /// Schedule a wall-clock one-shot on the window.
    fn set_timeout(ms: i32, f: impl FnOnce() + 'static) {
        let closure = Closure::once_into_js(f);
        let _ = web_sys::window()
            .unwrap()
            .set_timeout_with_callback_and_timeout_and_arguments_0(
                closure.unchecked_ref(),
                ms,
            );
    }

    /// Route an input event; a started slide gets its expiry scheduled.
    fn dispatch_input(engine: &SharedEngine, event: InputEvent) {
        let token = engine.borrow_mut().handle_input(event);
        if let Some(token) = token {
            let ms = engine.borrow().config().slide_duration_ms as i32;
            let engine = engine.clone();
            set_timeout(ms, move || engine.borrow_mut().finish_slide(token));
        }
    }

    /// Publish the per-tick snapshot to the page as a `snapshot` event.
    fn publish_snapshot(engine: &SharedEngine) {
        let snapshot = engine.borrow().snapshot();
        let json = match serde_json::to_string(&snapshot) {
            Ok(json) => json,
            Err(err) => {
                log::error!("Failed to serialize snapshot: {}", err);
                return;
            }
        };

        let init = CustomEventInit::new();
        init.set_detail(&JsValue::from_str(&json));
        if let Ok(event) = CustomEvent::new_with_event_init_dict("snapshot", &init) {
            if let Some(document) = web_sys::window().and_then(|w| w.document()) {
                let _ = document.dispatch_event(&event);
            }
        }
    }

    fn start_ticker(engine: SharedEngine) {
        let window = web_sys::window().unwrap();
        let tick_engine = engine.clone();
        let closure = Closure::<dyn FnMut()>::new(move || {
            let events = tick_engine.borrow_mut().tick();
            for event in &events {
                if let GameEvent::PowerUpCollected { .. } = event {
                    // The banner this pickup raised dismisses on wall clock
                    let notification = tick_engine.borrow().snapshot().notification;
                    if let Some(n) = notification {
                        let ms = tick_engine.borrow().config().notification_duration_ms as i32;
                        let engine = tick_engine.clone();
                        set_timeout(ms, move || {
                            engine.borrow_mut().dismiss_notification(n.token)
                        });
                    }
                }
            }
            publish_snapshot(&tick_engine);
        });
        let _ = window.set_interval_with_callback_and_timeout_and_arguments_0(
            closure.as_ref().unchecked_ref(),
            TICK_MS as i32,
        );
        closure.forget();
    }

    fn setup_keyboard(engine: SharedEngine) {
        let document = web_sys::window().unwrap().document().unwrap();
        let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
            if let Some(input) = classify_key(&event.key()) {
                dispatch_input(&engine, input);
            }
        });
        let _ = document
            .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn setup_touch(engine: SharedEngine) {
        let document = web_sys::window().unwrap().document().unwrap();
        if let Some(area) = document.get_element_by_id("game-area") {
            let target = area.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                if let Some(touch) = event.touches().get(0) {
                    let rect = target.get_bounding_client_rect();
                    let x = touch.client_x() as f32 - rect.left() as f32;
                    let y = touch.client_y() as f32 - rect.top() as f32;
                    let input =
                        classify_touch(x, y, rect.width() as f32, rect.height() as f32);
                    dispatch_input(&engine, input);
                }
            });
            let _ = area
                .add_event_listener_with_callback("touchstart", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    /// Wire a lifecycle button by element id.
    fn setup_button(engine: &SharedEngine, id: &str, action: fn(&mut Engine)) {
        let document = web_sys::window().unwrap().document().unwrap();
        if let Some(btn) = document.get_element_by_id(id) {
            let engine = engine.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                action(&mut engine.borrow_mut());
            });
            let _ =
                btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        let _ = console_log::init_with_level(log::Level::Info);

        let seed = js_sys::Date::now() as u64;
        let config = Config::load();
        let engine: SharedEngine = Rc::new(RefCell::new(Engine::new(
            config,
            Box::new(LocalStorageStore::new()),
            seed,
        )));

        setup_keyboard(engine.clone());
        setup_touch(engine.clone());
        setup_button(&engine, "start-btn", Engine::start);
        setup_button(&engine, "pause-btn", Engine::pause);
        setup_button(&engine, "resume-btn", Engine::resume);
        setup_button(&engine, "restart-btn", Engine::restart);
        setup_button(&engine, "menu-btn", Engine::go_menu);
        start_ticker(engine);

        log::info!("Lane Dash ready (seed {})", seed);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    wasm_game::run();
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use std::time::{SystemTime, UNIX_EPOCH};

    use lane_dash::config::Config;
    use lane_dash::engine::Engine;
    use lane_dash::highscore::MemoryStore;
    use lane_dash::input::InputEvent;
    use lane_dash::sim::GamePhase;

    env_logger::init();
    log::info!("Lane Dash (native) starting headless demo...");

    let seed = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0);
    let config = Config::load();
    let anchor = config.anchor_y();
    let mut engine = Engine::new(config, Box::new(MemoryStore::new()), seed);

    engine.start();
    for _ in 0..20_000 {
        // Jump over anything closing in on our lane
        let snapshot = engine.snapshot();
        let threat = snapshot.obstacles.iter().any(|o| {
            o.lane == snapshot.character.lane && o.y > anchor - 200.0 && o.y < anchor
        });
        if threat && !snapshot.character.is_jumping {
            engine.handle_input(InputEvent::Jump);
        }

        engine.tick();
        if engine.phase() == GamePhase::GameOver {
            break;
        }
    }

    let snapshot = engine.snapshot();
    println!(
        "Demo run over: score {}, {} coins, high score {}",
        snapshot.score, snapshot.coins_collected, snapshot.high_score
    );
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

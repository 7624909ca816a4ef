//! Bullet Dodger entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{HtmlCanvasElement, HtmlInputElement};

    use bullet_dodger::render::CanvasRenderer;
    use bullet_dodger::sim::{GameEvent, GamePhase, GameState, TickInput, tick};
    use bullet_dodger::snapshot::RenderSnapshot;
    use bullet_dodger::{BestScore, Settings};

    /// Game instance holding all state
    struct Game {
        state: GameState,
        renderer: Option<CanvasRenderer>,
        input: TickInput,
        settings: Settings,
        best: BestScore,
    }

    impl Game {
        fn new(seed: u64, settings: Settings, best: BestScore) -> Self {
            Self {
                state: GameState::new(seed, best.score, settings.player_color_rgb()),
                renderer: None,
                input: TickInput::default(),
                settings,
                best,
            }
        }

        /// Run one simulation tick and drain its events.
        fn update(&mut self, time: f64) {
            tick(&mut self.state, self.input, time);

            for event in self.state.take_events() {
                match event {
                    GameEvent::GameOver { score, new_best } => {
                        if new_best && self.best.record(score) {
                            self.best.save();
                        }
                    }
                    GameEvent::BossSpawned
                    | GameEvent::BossDespawned
                    | GameEvent::BuffPickedUp(_) => {}
                }
            }
        }

        /// Render the current frame and refresh the DOM HUD.
        fn render(&self, time: f64) {
            if let Some(ref renderer) = self.renderer {
                let snap = RenderSnapshot::capture(&self.state, time);
                renderer.render(&snap);
                update_hud(&snap);
            }
        }
    }

    /// Wall clock shared by ticks and event handlers. Same timebase as the
    /// requestAnimationFrame timestamp.
    fn now_ms() -> f64 {
        web_sys::window()
            .and_then(|w| w.performance())
            .map(|p| p.now())
            .unwrap_or(0.0)
    }

    /// Update HUD elements in DOM
    fn update_hud(snap: &RenderSnapshot) {
        let Some(document) = web_sys::window().and_then(|w| w.document()) else {
            return;
        };

        if let Some(el) = document
            .query_selector("#hud-score .hud-value")
            .ok()
            .flatten()
        {
            el.set_text_content(Some(&snap.hud.score.to_string()));
        }
        if let Some(el) = document
            .query_selector("#hud-best .hud-value")
            .ok()
            .flatten()
        {
            el.set_text_content(Some(&snap.hud.best_score.to_string()));
        }
        if let Some(el) = document
            .query_selector("#hud-time .hud-value")
            .ok()
            .flatten()
        {
            el.set_text_content(Some(&format!("{:.0}s", snap.hud.survival_secs)));
        }

        if let Some(el) = document.get_element_by_id("boss-warning") {
            let class = if snap.hud.boss_warning {
                "warning"
            } else {
                "warning hidden"
            };
            let _ = el.set_attribute("class", class);
        }

        if let Some(el) = document.get_element_by_id("pause-overlay") {
            let class = if snap.hud.paused { "" } else { "hidden" };
            let _ = el.set_attribute("class", class);
        }

        if let Some(el) = document.get_element_by_id("menu") {
            let class = if snap.hud.phase == GamePhase::Menu {
                ""
            } else {
                "hidden"
            };
            let _ = el.set_attribute("class", class);
        }

        if let Some(el) = document.get_element_by_id("game-over") {
            if snap.hud.phase == GamePhase::GameOver {
                let _ = el.set_attribute("class", "");
                if let Some(score_el) = document.get_element_by_id("final-score") {
                    score_el.set_text_content(Some(&snap.hud.score.to_string()));
                }
                if let Some(best_el) = document.get_element_by_id("new-best") {
                    let class = if snap.hud.score >= snap.hud.best_score && snap.hud.score > 0 {
                        ""
                    } else {
                        "hidden"
                    };
                    let _ = best_el.set_attribute("class", class);
                }
            } else {
                let _ = el.set_attribute("class", "hidden");
            }
        }
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Bullet Dodger starting...");

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("canvas")
            .expect("no canvas")
            .dyn_into()
            .expect("not a canvas");

        let width = canvas.client_width().max(1) as u32;
        let height = canvas.client_height().max(1) as u32;
        canvas.set_width(width);
        canvas.set_height(height);

        let settings = Settings::load();
        let best = BestScore::load();
        let seed = js_sys::Date::now() as u64;
        let game = Rc::new(RefCell::new(Game::new(seed, settings, best)));
        {
            let mut g = game.borrow_mut();
            g.state.set_arena_size(width as f32, height as f32);
            g.renderer = CanvasRenderer::new(&canvas).ok();
        }

        log::info!("Game initialized with seed: {}", seed);

        setup_keyboard(game.clone());
        setup_buttons(game.clone());
        setup_color_picker(game.clone());
        setup_auto_pause(game.clone());

        request_animation_frame(game);

        log::info!("Bullet Dodger running!");
    }

    /// Map a key to a held-direction flag. Returns false for unhandled keys.
    fn apply_key(input: &mut TickInput, key: &str, down: bool) -> bool {
        match key {
            "ArrowUp" | "w" | "W" => input.up = down,
            "ArrowDown" | "s" | "S" => input.down = down,
            "ArrowLeft" | "a" | "A" => input.left = down,
            "ArrowRight" | "d" | "D" => input.right = down,
            _ => return false,
        }
        true
    }

    fn setup_keyboard(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();

        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: web_sys::KeyboardEvent| {
                let mut g = game.borrow_mut();
                let key = event.key();
                if apply_key(&mut g.input, &key, true) {
                    event.prevent_default();
                    return;
                }
                // Enter/Space start a run from the menu or game-over screen
                if matches!(key.as_str(), "Enter" | " ")
                    && g.state.phase != GamePhase::Playing
                {
                    g.state.start_run(now_ms());
                    event.prevent_default();
                }
            });
            let _ = window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        {
            let closure = Closure::<dyn FnMut(_)>::new(move |event: web_sys::KeyboardEvent| {
                let mut g = game.borrow_mut();
                if apply_key(&mut g.input, &event.key(), false) {
                    event.prevent_default();
                }
            });
            let _ = window
                .add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_buttons(game: Rc<RefCell<Game>>) {
        let document = web_sys::window().unwrap().document().unwrap();

        for id in ["start-btn", "restart-btn"] {
            if let Some(btn) = document.get_element_by_id(id) {
                let game = game.clone();
                let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
                    game.borrow_mut().state.start_run(now_ms());
                });
                let _ =
                    btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
                closure.forget();
            }
        }
    }

    fn setup_color_picker(game: Rc<RefCell<Game>>) {
        let document = web_sys::window().unwrap().document().unwrap();

        let Some(picker) = document
            .get_element_by_id("color-picker")
            .and_then(|el| el.dyn_into::<HtmlInputElement>().ok())
        else {
            return;
        };
        picker.set_value(&game.borrow().settings.player_color);

        let picker_clone = picker.clone();
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            let mut g = game.borrow_mut();
            g.settings.set_player_color(&picker_clone.value());
            g.settings.save();
            g.state.player.color = g.settings.player_color_rgb();
        });
        let _ = picker.add_event_listener_with_callback("input", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn setup_auto_pause(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();
        let document = window.document().unwrap();

        // Visibility change (tab switch, minimize)
        {
            let game = game.clone();
            let document_clone = document.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                let mut g = game.borrow_mut();
                if document_clone.visibility_state() == web_sys::VisibilityState::Hidden {
                    g.state.pause(now_ms());
                    log::info!("Auto-paused (tab hidden)");
                } else {
                    g.state.resume(now_ms());
                }
            });
            let _ = document.add_event_listener_with_callback(
                "visibilitychange",
                closure.as_ref().unchecked_ref(),
            );
            closure.forget();
        }

        // Window blur/focus (click outside and back)
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::FocusEvent| {
                game.borrow_mut().state.pause(now_ms());
                log::info!("Auto-paused (window blur)");
            });
            let _ =
                window.add_event_listener_with_callback("blur", closure.as_ref().unchecked_ref());
            closure.forget();
        }
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::FocusEvent| {
                game.borrow_mut().state.resume(now_ms());
            });
            let _ =
                window.add_event_listener_with_callback("focus", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();
        let closure = Closure::once(move |time: f64| {
            game_loop(game, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(game: Rc<RefCell<Game>>, time: f64) {
        {
            let mut g = game.borrow_mut();
            g.update(time);
            g.render(time);
        }
        request_animation_frame(game);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    wasm_game::run();
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use bullet_dodger::consts::{PLAYER_DEFAULT_COLOR, TICK_MS};
    use bullet_dodger::sim::{GamePhase, GameState, TickInput, tick};

    env_logger::init();
    log::info!("Bullet Dodger (native) starting...");
    log::info!("Headless mode - run with `trunk serve` for the web version");

    // Headless demo: a stationary player against the full spawn curve
    let seed = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0);
    let mut state = GameState::new(seed, 0, PLAYER_DEFAULT_COLOR);
    state.start_run(0.0);

    let mut now = 0.0;
    while state.phase == GamePhase::Playing && now < 120_000.0 {
        now += TICK_MS;
        tick(&mut state, TickInput::default(), now);
    }

    println!(
        "Run over after {:.1}s with score {}",
        state.clock.elapsed_secs(now),
        state.score
    );
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

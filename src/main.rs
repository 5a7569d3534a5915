//! Dusk Dash entry point
//!
//! Handles platform-specific initialization and runs the frame loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::collections::HashMap;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{Document, HtmlElement, KeyboardEvent, MouseEvent};

    use dusk_dash::Game;
    use dusk_dash::clock::BrowserClock;
    use dusk_dash::display::{DisplayList, ElementId};
    use dusk_dash::persistence::LocalStore;

    /// DOM-backed display list
    struct WebDisplay {
        document: Document,
        game_el: HtmlElement,
        obstacles: HashMap<u32, HtmlElement>,
    }

    impl WebDisplay {
        fn by_id(&self, id: &str) -> Option<HtmlElement> {
            self.document
                .get_element_by_id(id)
                .and_then(|el| el.dyn_into::<HtmlElement>().ok())
        }

        fn in_intro(&self, selector: &str) -> Option<HtmlElement> {
            self.document
                .query_selector(&format!("#intro {}", selector))
                .ok()
                .flatten()
                .and_then(|el| el.dyn_into::<HtmlElement>().ok())
        }

        fn element(&self, el: ElementId) -> Option<HtmlElement> {
            match el {
                ElementId::Game => Some(self.game_el.clone()),
                ElementId::Obstacle(id) => self.obstacles.get(&id).cloned(),
                ElementId::IntroTitle => self.in_intro("h1"),
                ElementId::IntroBody => self.in_intro("p"),
                other => self.by_id(&other.to_string()),
            }
        }

        fn set_style(&self, el: ElementId, property: &str, value: &str) {
            if let Some(el) = self.element(el) {
                let _ = el.style().set_property(property, value);
            }
        }
    }

    impl DisplayList for WebDisplay {
        fn create_obstacle(&mut self, id: u32) {
            let Ok(el) = self.document.create_element("div") else {
                log::warn!("Could not create obstacle element");
                return;
            };
            el.set_class_name("obstacle");
            if self.game_el.append_child(&el).is_err() {
                return;
            }
            if let Ok(el) = el.dyn_into::<HtmlElement>() {
                self.obstacles.insert(id, el);
            }
        }

        fn remove(&mut self, el: ElementId) {
            if let ElementId::Obstacle(id) = el {
                if let Some(el) = self.obstacles.remove(&id) {
                    el.remove();
                }
            }
        }

        fn set_position(&mut self, el: ElementId, left: Option<f32>, bottom: f32) {
            if let Some(left) = left {
                self.set_style(el, "left", &format!("{}px", left));
            }
            self.set_style(el, "bottom", &format!("{}px", bottom));
        }

        fn set_size(&mut self, el: ElementId, width: f32, height: f32) {
            self.set_style(el, "width", &format!("{}px", width));
            self.set_style(el, "height", &format!("{}px", height));
        }

        fn set_gradient(&mut self, el: ElementId, top: &str, bottom: &str) {
            self.set_style(el, "background", &format!("linear-gradient({}, {})", top, bottom));
        }

        fn set_opacity(&mut self, el: ElementId, opacity: f32) {
            self.set_style(el, "opacity", &opacity.to_string());
        }

        fn set_text(&mut self, el: ElementId, text: &str) {
            if let Some(el) = self.element(el) {
                // inner_text turns newlines into line breaks
                el.set_inner_text(text);
            }
        }

        fn set_class(&mut self, el: ElementId, class: &str, on: bool) {
            if let Some(el) = self.element(el) {
                let list = el.class_list();
                let _ = if on { list.add_1(class) } else { list.remove_1(class) };
            }
        }
    }

    /// Game plus the display it drives
    struct App {
        game: Game<LocalStore, BrowserClock>,
        display: WebDisplay,
    }

    impl App {
        fn sync_play_width(&mut self) {
            let width = self.display.game_el.client_width() as f32;
            self.game.set_play_width(width);
        }
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Dusk Dash starting...");

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");
        let game_el: HtmlElement = document
            .get_element_by_id("game")
            .expect("no game element")
            .dyn_into()
            .expect("game is not an HtmlElement");

        let display = WebDisplay {
            document: document.clone(),
            game_el,
            obstacles: HashMap::new(),
        };
        let game = Game::load(LocalStore::new(), BrowserClock);
        let app = Rc::new(RefCell::new(App { game, display }));

        {
            let mut a = app.borrow_mut();
            a.sync_play_width();
            let App { game, display } = &mut *a;
            game.init_view(display);
        }

        setup_input_handlers(app.clone());
        setup_start_button(app.clone());
        setup_resize(app.clone());

        // Start frame loop; it runs for the page's lifetime so the sky keeps cycling
        request_animation_frame(app);

        log::info!("Dusk Dash running!");
    }

    fn setup_input_handlers(app: Rc<RefCell<App>>) {
        let window = web_sys::window().unwrap();

        // Key down
        {
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                let mut a = app.borrow_mut();
                match event.code().as_str() {
                    "Space" => {
                        event.prevent_default();
                        a.game.jump_pressed();
                    }
                    "Enter" => {
                        let App { game, display } = &mut *a;
                        game.confirm_start(display);
                    }
                    "KeyI" => {
                        a.game.toggle_autopilot();
                    }
                    _ => {}
                }
            });
            let _ = window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Key up
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                if event.code() == "Space" {
                    app.borrow_mut().game.jump_released();
                }
            });
            let _ = window
                .add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_start_button(app: Rc<RefCell<App>>) {
        let document = web_sys::window().unwrap().document().unwrap();

        if let Some(btn) = document.get_element_by_id("startBtn") {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                let mut a = app.borrow_mut();
                let App { game, display } = &mut *a;
                game.confirm_start(display);
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_resize(app: Rc<RefCell<App>>) {
        let window = web_sys::window().unwrap();
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            app.borrow_mut().sync_play_width();
        });
        let _ = window.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn request_animation_frame(app: Rc<RefCell<App>>) {
        let window = web_sys::window().unwrap();
        let closure = Closure::once(move |time: f64| {
            frame_loop(app, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn frame_loop(app: Rc<RefCell<App>>, time: f64) {
        {
            let mut a = app.borrow_mut();
            let App { game, display } = &mut *a;
            game.frame(time, display);
        }

        request_animation_frame(app);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    wasm_game::run();
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Dusk Dash (native) starting...");
    log::info!("Native mode runs headless demo sessions - use `trunk serve` for the web version");

    demo::run(3);
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

/// Headless autopilot sessions against an in-memory store
#[cfg(not(target_arch = "wasm32"))]
mod demo {
    use dusk_dash::Game;
    use dusk_dash::clock::{Clock, ManualClock};
    use dusk_dash::display::CommandLog;
    use dusk_dash::persistence::MemoryStore;

    /// Frame period at 60 Hz
    const FRAME_MS: f64 = 1000.0 / 60.0;
    /// Give up on a session after two simulated minutes
    const MAX_FRAMES: u32 = 60 * 120;

    pub fn run(sessions: u32) {
        let clock = ManualClock::new(1_700_000_000_000.0);
        let mut game = Game::load(MemoryStore::new(), &clock);
        let mut display = CommandLog::new();
        game.init_view(&mut display);
        game.toggle_autopilot();

        for session in 1..=sessions {
            game.start_game(&mut display);
            let mut frames = 0;
            while game.is_running() && frames < MAX_FRAMES {
                let now = clock.advance(FRAME_MS);
                game.frame(now, &mut display);
                display.clear();
                frames += 1;
            }

            if game.is_running() {
                println!(
                    "Session {}: still alive after {:.0}s with {} pts",
                    session,
                    game.state.session.elapsed(clock.now_ms()) / 1000.0,
                    game.state.session.score
                );
                game.stop();
            } else if let Some(result) = game.last_result() {
                println!(
                    "Session {}: {} pts in {:.1}s",
                    session,
                    result.entry.score,
                    result.entry.time / 1000.0
                );
            }
            // Idle a little between runs; the sky keeps moving
            for _ in 0..30 {
                let now = clock.advance(FRAME_MS);
                game.frame(now, &mut display);
            }
            display.clear();
        }

        println!("\n{}", game.high_scores().board_text());
    }
}

//! Uplink Maze entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;

    use glam::Vec2;
    use wasm_bindgen::prelude::*;
    use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

    use uplink_maze::hud;
    use uplink_maze::scene::Frame;
    use uplink_maze::sim::{GamePhase, GameState, TickInput, tick};

    const WALL_COLOR: &str = "#888899";
    const PLAYER_COLOR: &str = "#2962ff";
    const EXIT_COLOR: &str = "#00ff00";
    const GRID_COLOR: &str = "#e0e0e0";
    const GRID_SIZE: f64 = 100.0;

    /// Game instance holding all state
    struct Game {
        state: GameState,
        input: TickInput,
        /// Timestamp of the previous frame; None before the first frame
        last_time: Option<f64>,
    }

    impl Game {
        fn new(seed: u64) -> Self {
            Self {
                state: GameState::new(seed),
                input: TickInput::default(),
                last_time: None,
            }
        }

        /// Run one simulation step with the real elapsed time
        fn update(&mut self, time: f64, viewport: Vec2) {
            let dt = match self.last_time {
                Some(prev) => time - prev,
                None => 0.0,
            };
            self.last_time = Some(time);

            tick(&mut self.state, &self.input.clone(), dt, viewport);

            // Clear one-shot inputs after processing
            self.input.begin = false;
        }

        /// Render the current frame onto the 2D context
        fn render(&self, ctx: &CanvasRenderingContext2d, viewport: Vec2, time: f64) {
            let frame = Frame::new(&self.state, viewport, time);
            let cam = frame.camera;

            ctx.clear_rect(0.0, 0.0, viewport.x as f64, viewport.y as f64);
            draw_grid(ctx, &frame);

            // Exit: pulsing square with an inner frame
            if frame.visible(&frame.exit) {
                let pulse = frame.exit_pulse as f64;
                let ex = (frame.exit.x - cam.x) as f64;
                let ey = (frame.exit.y - cam.y) as f64;
                let ew = frame.exit.w as f64;
                let eh = frame.exit.h as f64;
                ctx.set_fill_style_str(EXIT_COLOR);
                ctx.fill_rect(ex + pulse / 2.0, ey + pulse / 2.0, ew - pulse, eh - pulse);
                ctx.set_stroke_style_str("#ffffff");
                ctx.set_line_width(4.0);
                ctx.stroke_rect(ex + 8.0, ey + 8.0, ew - 16.0, eh - 16.0);
            }

            ctx.set_fill_style_str(WALL_COLOR);
            for rect in frame.walls.iter().chain(frame.traps.iter()) {
                if frame.visible(rect) {
                    ctx.fill_rect(
                        (rect.x - cam.x) as f64,
                        (rect.y - cam.y) as f64,
                        rect.w as f64,
                        rect.h as f64,
                    );
                }
            }
            for rect in frame
                .patrols
                .iter()
                .map(|p| &p.rect)
                .chain(frame.chasers.iter().map(|c| &c.rect))
            {
                if frame.visible(rect) {
                    ctx.fill_rect(
                        (rect.x - cam.x) as f64,
                        (rect.y - cam.y) as f64,
                        rect.w as f64,
                        rect.h as f64,
                    );
                }
            }

            // Player: core-lit square
            let px = (frame.player.x - cam.x) as f64;
            let py = (frame.player.y - cam.y) as f64;
            let ps = frame.player.w as f64;
            ctx.set_fill_style_str(PLAYER_COLOR);
            ctx.fill_rect(px, py, ps, ps);
            ctx.set_fill_style_str("#ffffff");
            ctx.fill_rect(px + 4.0, py + 4.0, ps - 8.0, ps - 8.0);
        }

        /// Push the text boundary into the DOM overlay
        fn update_overlay(&self) {
            let Some(document) = web_sys::window().and_then(|w| w.document()) else {
                return;
            };

            if let Some(el) = document.get_element_by_id("level-title") {
                el.set_text_content(Some(&hud::level_title(self.state.level)));
            }
            if let Some(el) = document.get_element_by_id("message") {
                el.set_text_content(Some(&hud::status_line(&self.state)));
            }

            if let Some(el) = document.get_element_by_id("start-screen") {
                if self.state.phase == GamePhase::Start {
                    let _ = el.class_list().remove_1("hidden");
                } else {
                    let _ = el.class_list().add_1("hidden");
                }
            }

            if let Some(el) = document.get_element_by_id("reveal-screen") {
                if self.state.phase == GamePhase::Reveal {
                    let _ = el.class_list().remove_1("hidden");
                    if let Some(profile) = &self.state.profile {
                        if let Some(trait_el) = document.get_element_by_id("reveal-trait") {
                            trait_el.set_text_content(Some(&hud::reveal_trait(profile)));
                        }
                        if let Some(desc_el) = document.get_element_by_id("reveal-description") {
                            desc_el.set_text_content(Some(&hud::reveal_description(profile)));
                        }
                    }
                } else {
                    let _ = el.class_list().add_1("hidden");
                }
            }
        }
    }

    fn draw_grid(ctx: &CanvasRenderingContext2d, frame: &Frame) {
        let cam_x = frame.camera.x as f64;
        let cam_y = frame.camera.y as f64;
        let w = frame.viewport.x as f64;
        let h = frame.viewport.y as f64;

        ctx.set_stroke_style_str(GRID_COLOR);
        ctx.set_line_width(1.0);
        ctx.begin_path();

        let mut x = (cam_x / GRID_SIZE).floor() * GRID_SIZE;
        while x < cam_x + w {
            ctx.move_to(x - cam_x, 0.0);
            ctx.line_to(x - cam_x, h);
            x += GRID_SIZE;
        }
        let mut y = (cam_y / GRID_SIZE).floor() * GRID_SIZE;
        while y < cam_y + h {
            ctx.move_to(0.0, y - cam_y);
            ctx.line_to(w, y - cam_y);
            y += GRID_SIZE;
        }
        ctx.stroke();
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Uplink Maze starting...");

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("gameCanvas")
            .expect("no canvas")
            .dyn_into()
            .expect("not a canvas");
        fit_canvas(&canvas);

        let ctx: CanvasRenderingContext2d = canvas
            .get_context("2d")
            .expect("get_context failed")
            .expect("no 2d context")
            .dyn_into()
            .expect("not a 2d context");

        let seed = js_sys::Date::now() as u64;
        let game = Rc::new(RefCell::new(Game::new(seed)));
        log::info!("Session initialized with seed: {}", seed);

        setup_input_handlers(game.clone());
        setup_resize_handler(canvas.clone());

        request_animation_frame(game, canvas, ctx);

        log::info!("Uplink Maze running!");
    }

    /// Match the canvas backing store to the window size
    fn fit_canvas(canvas: &HtmlCanvasElement) {
        let window = web_sys::window().expect("no window");
        let w = window.inner_width().ok().and_then(|v| v.as_f64()).unwrap_or(800.0);
        let h = window.inner_height().ok().and_then(|v| v.as_f64()).unwrap_or(600.0);
        canvas.set_width(w as u32);
        canvas.set_height(h as u32);
    }

    fn setup_resize_handler(canvas: HtmlCanvasElement) {
        let window = web_sys::window().expect("no window");
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            fit_canvas(&canvas);
        });
        let _ = window.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn setup_input_handlers(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().expect("no window");

        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: web_sys::KeyboardEvent| {
                let mut g = game.borrow_mut();
                set_direction(&mut g.input, &event.key(), true);
                if event.code() == "Space" {
                    g.input.begin = true;
                }
            });
            let _ = window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        {
            let closure = Closure::<dyn FnMut(_)>::new(move |event: web_sys::KeyboardEvent| {
                let mut g = game.borrow_mut();
                set_direction(&mut g.input, &event.key(), false);
            });
            let _ = window
                .add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn set_direction(input: &mut TickInput, key: &str, held: bool) {
        match key {
            "w" | "W" | "ArrowUp" => input.up = held,
            "s" | "S" | "ArrowDown" => input.down = held,
            "a" | "A" | "ArrowLeft" => input.left = held,
            "d" | "D" | "ArrowRight" => input.right = held,
            _ => {}
        }
    }

    fn request_animation_frame(
        game: Rc<RefCell<Game>>,
        canvas: HtmlCanvasElement,
        ctx: CanvasRenderingContext2d,
    ) {
        let window = web_sys::window().expect("no window");
        let closure = Closure::once(move |time: f64| {
            game_loop(game, canvas, ctx, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(
        game: Rc<RefCell<Game>>,
        canvas: HtmlCanvasElement,
        ctx: CanvasRenderingContext2d,
        time: f64,
    ) {
        {
            let mut g = game.borrow_mut();
            let viewport = Vec2::new(canvas.width() as f32, canvas.height() as f32);

            g.update(time, viewport);
            g.render(&ctx, viewport, time);
            g.update_overlay();
        }

        request_animation_frame(game, canvas, ctx);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    wasm_game::run();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use glam::Vec2;
    use uplink_maze::consts::BASE_FRAME_MS;
    use uplink_maze::sim::{GamePhase, GameState, TickInput, tick};

    env_logger::init();
    log::info!("Uplink Maze (native) starting...");
    log::info!("Headless demo session - run with `trunk serve` for the web version");

    let seed = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(1);
    let mut state = GameState::new(seed);
    let viewport = Vec2::new(800.0, 600.0);

    // Begin, then walk toward the exit corner for a while
    let begin = TickInput {
        begin: true,
        ..TickInput::default()
    };
    tick(&mut state, &begin, BASE_FRAME_MS, viewport);

    let down_right = TickInput {
        down: true,
        right: true,
        ..TickInput::default()
    };
    for _ in 0..1200 {
        tick(&mut state, &down_right, BASE_FRAME_MS, viewport);
        if state.phase == GamePhase::Reveal {
            break;
        }
    }

    let profile = state.telemetry.derive_profile();
    println!(
        "{}",
        serde_json::json!({
            "seed": seed,
            "level": state.level,
            "phase": format!("{:?}", state.phase),
            "telemetry": &state.telemetry,
            "profile": profile,
        })
    );
}

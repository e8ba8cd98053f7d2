//! Snow Dodge entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{HtmlCanvasElement, KeyboardEvent, MouseEvent};

    use snow_dodge::Settings;
    use snow_dodge::consts::*;
    use snow_dodge::error::StartupError;
    use snow_dodge::platform::{InputRouter, Key};
    use snow_dodge::renderer::{RenderState, VertexCanvas};
    use snow_dodge::sim::{GameLoop, TickOutcome};

    /// Game instance holding all state
    struct Game {
        game: GameLoop,
        canvas: VertexCanvas,
        render_state: Option<RenderState>,
        accumulator: f32,
        last_time: f64,
        /// CSS pixels to window pixels
        pointer_scale: (f32, f32),
    }

    impl Game {
        fn new(game: GameLoop) -> Self {
            let canvas = VertexCanvas::new(game.assets().clone());
            Self {
                game,
                canvas,
                render_state: None,
                accumulator: 0.0,
                last_time: 0.0,
                pointer_scale: (1.0, 1.0),
            }
        }

        fn set_client_size(&mut self, w: f32, h: f32) {
            if w > 0.0 && h > 0.0 {
                self.pointer_scale = (WINDOW_WIDTH as f32 / w, WINDOW_HEIGHT as f32 / h);
            }
        }

        /// Run simulation ticks at the fixed cadence
        fn update(&mut self, dt: f32) {
            let dt = dt.min(0.1);
            self.accumulator += dt;

            let mut substeps = 0;
            while self.accumulator >= FRAME_DT && substeps < MAX_SUBSTEPS {
                self.canvas.begin_frame();
                let outcome = self.game.tick(&mut self.canvas);
                self.accumulator -= FRAME_DT;
                substeps += 1;

                if outcome != TickOutcome::Running {
                    break;
                }
            }
        }

        /// Present the most recent tick's geometry
        fn render(&mut self) {
            if let Some(ref mut render_state) = self.render_state {
                match render_state.render(self.canvas.vertices()) {
                    Ok(_) => {}
                    Err(wgpu::SurfaceError::Lost) => {
                        render_state.resize(render_state.size.0, render_state.size.1);
                    }
                    Err(wgpu::SurfaceError::OutOfMemory) => {
                        log::error!("Out of memory!");
                    }
                    Err(e) => log::warn!("Render error: {:?}", e),
                }
            }
        }
    }

    pub async fn run() {
        console_error_panic_hook::set_once();
        if console_log::init_with_level(log::Level::Info).is_err() {
            web_sys::console::warn_1(&"Logger already initialized".into());
        }

        log::info!("Snow Dodge starting...");

        if let Err(e) = start().await {
            log::error!("Startup failed: {}", e);
        }
    }

    async fn start() -> Result<(), StartupError> {
        let window = web_sys::window().ok_or_else(|| StartupError::Render("no window".into()))?;
        let document = window
            .document()
            .ok_or_else(|| StartupError::Render("no document".into()))?;

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("canvas")
            .ok_or_else(|| StartupError::Render("no canvas".into()))?
            .dyn_into()
            .map_err(|_| StartupError::Render("#canvas is not a canvas".into()))?;

        // Backing store follows device pixel ratio; the game always draws 800x400
        let dpr = window.device_pixel_ratio();
        let width = (WINDOW_WIDTH as f64 * dpr) as u32;
        let height = (WINDOW_HEIGHT as f64 * dpr) as u32;
        canvas.set_width(width);
        canvas.set_height(height);

        let settings = Settings::load();
        let seed = js_sys::Date::now() as u64;
        let game = Rc::new(RefCell::new(Game::new(GameLoop::new(settings, seed)?)));
        game.borrow_mut()
            .set_client_size(canvas.client_width() as f32, canvas.client_height() as f32);

        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::BROWSER_WEBGPU,
            ..Default::default()
        });

        let surface = instance
            .create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))
            .map_err(|e| StartupError::Render(format!("surface: {e}")))?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .map_err(|e| StartupError::Render(format!("adapter: {e}")))?;

        log::info!("Using adapter: {:?}", adapter.get_info().name);

        let render_state = RenderState::new(
            surface,
            &adapter,
            width,
            height,
            (WINDOW_WIDTH as f32, WINDOW_HEIGHT as f32),
        )
        .await?;
        game.borrow_mut().render_state = Some(render_state);

        setup_input_handlers(&canvas, game.clone());

        request_animation_frame(game);
        log::info!("Snow Dodge running!");
        Ok(())
    }

    fn setup_input_handlers(canvas: &HtmlCanvasElement, game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else {
            return;
        };

        // Key down
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                let mut g = game.borrow_mut();
                InputRouter::new(&mut g.game).key_down(Key::from_dom(&event.key()));
            });
            let _ = window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Key up
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                let mut g = game.borrow_mut();
                InputRouter::new(&mut g.game).key_up(Key::from_dom(&event.key()));
            });
            let _ = window
                .add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Mouse down - hide nearby snowflakes
        {
            let game = game.clone();
            let canvas_clone = canvas.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                let mut g = game.borrow_mut();
                g.set_client_size(
                    canvas_clone.client_width() as f32,
                    canvas_clone.client_height() as f32,
                );
                let (sx, sy) = g.pointer_scale;
                let x = event.offset_x() as f32 * sx;
                let y = event.offset_y() as f32 * sy;
                InputRouter::new(&mut g.game).pointer_down(x, y);
            });
            let _ = canvas
                .add_event_listener_with_callback("mousedown", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::once(move |time: f64| {
            game_loop(game, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(game: Rc<RefCell<Game>>, time: f64) {
        let stopped = {
            let mut g = game.borrow_mut();

            let dt = if g.last_time > 0.0 {
                ((time - g.last_time) / 1000.0) as f32
            } else {
                FRAME_DT
            };
            g.last_time = time;

            g.update(dt);
            g.render();
            g.canvas.is_stopped()
        };

        // The game-over frame has been presented; stop scheduling frames
        if stopped {
            log::info!("Loop stopped");
            return;
        }
        request_animation_frame(game);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() {
    wasm_game::run().await;
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Snow Dodge (native) starting...");
    log::info!("Native mode runs headless - run with `trunk serve` for the web version");

    if let Err(e) = headless::run(std::env::args().nth(1)) {
        log::error!("{}", e);
        std::process::exit(1);
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use std::time::{SystemTime, UNIX_EPOCH};

    use snow_dodge::Settings;
    use snow_dodge::error::StartupError;
    use snow_dodge::platform::{InputRouter, Key};
    use snow_dodge::renderer::VertexCanvas;
    use snow_dodge::sim::{GameLoop, TickOutcome};

    /// Five minutes at 60 Hz
    const TICK_CAP: u64 = 60 * 60 * 5;
    /// Ticks between autopilot direction changes
    const STRAFE_PERIOD: u64 = 45;

    /// Play a run with a strafing autopilot until game over or the tick cap
    pub fn run(settings_path: Option<String>) -> Result<(), StartupError> {
        let settings = match settings_path {
            Some(path) => {
                log::info!("Loading settings from {}", path);
                Settings::load_from_path(path)?
            }
            None => Settings::load(),
        };
        let seed = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis() as u64)
            .unwrap_or_default();

        let mut game = GameLoop::new(settings, seed)?;
        let mut canvas = VertexCanvas::new(game.assets().clone());
        let mut heading = Key::Char('a');
        InputRouter::new(&mut game).key_down(heading);

        let mut ticks = 0;
        while ticks < TICK_CAP {
            if ticks > 0 && ticks % STRAFE_PERIOD == 0 {
                let mut router = InputRouter::new(&mut game);
                router.key_up(heading);
                heading = if heading == Key::Char('a') {
                    Key::Char('d')
                } else {
                    Key::Char('a')
                };
                router.key_down(heading);
            }

            canvas.begin_frame();
            let outcome = game.tick(&mut canvas);
            ticks += 1;
            if outcome != TickOutcome::Running {
                break;
            }
        }

        let state = game.state();
        log::info!(
            "Finished after {} ticks: lives={}, phase={:?}, last frame {} vertices",
            state.time_ticks,
            state.lives,
            state.phase,
            canvas.vertices().len()
        );
        Ok(())
    }
}

//! Shape Fall entry point
//!
//! Handles platform-specific initialization and runs the simulation loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_app {
    use std::cell::RefCell;
    use std::rc::{Rc, Weak};

    use glam::Vec2;
    use wasm_bindgen::prelude::*;
    use web_sys::{HtmlCanvasElement, MouseEvent};

    use shape_fall::SimConfig;
    use shape_fall::consts::*;
    use shape_fall::renderer::RenderState;
    use shape_fall::sim::{self, Control, SimState};

    /// Browser interval backing the spawn task; dropping it clears the interval
    struct SpawnTimer {
        handle: i32,
        _closure: Closure<dyn FnMut()>,
    }

    impl Drop for SpawnTimer {
        fn drop(&mut self) {
            if let Some(window) = web_sys::window() {
                window.clear_interval_with_handle(self.handle);
            }
        }
    }

    /// App instance holding all state
    struct App {
        state: SimState,
        render_state: Option<RenderState>,
        timer: Option<SpawnTimer>,
    }

    impl App {
        fn new(config: &SimConfig, seed: u64) -> Self {
            Self {
                state: SimState::new(config, seed, js_sys::Date::now()),
                render_state: None,
                timer: None,
            }
        }

        /// Render the current frame
        fn render(&mut self) {
            if let Some(ref mut render_state) = self.render_state {
                match render_state.render_scene(&self.state) {
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

        /// Write the last refreshed readout into the DOM
        fn update_hud(&self) {
            let Some(document) = web_sys::window().and_then(|w| w.document()) else {
                return;
            };
            for (id, text) in self.state.readout().fields() {
                if let Some(el) = document.get_element_by_id(id) {
                    el.set_text_content(Some(&text));
                }
            }
        }
    }

    pub async fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Trace).expect("Failed to init logger");

        let config = SimConfig::load();
        log::set_max_level(config.log_level().to_level_filter());

        log::info!("Shape Fall starting...");

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("canvas")
            .expect("no canvas")
            .dyn_into()
            .expect("not a canvas");

        // Backing store at device resolution, logical size fixed at 800x600
        let dpr = window.device_pixel_ratio();
        let width = (CANVAS_WIDTH as f64 * dpr) as u32;
        let height = (CANVAS_HEIGHT as f64 * dpr) as u32;
        canvas.set_width(width);
        canvas.set_height(height);

        let seed = config.seed.unwrap_or_else(|| js_sys::Date::now() as u64);
        let app = Rc::new(RefCell::new(App::new(&config, seed)));

        log::info!(
            "Simulation initialized with seed {} (spawn rate {}/s, gravity {}, fall policy {})",
            seed,
            config.spawn_rate,
            config.gravity,
            config.fall_policy.as_str()
        );

        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::BROWSER_WEBGPU | wgpu::Backends::GL,
            ..Default::default()
        });

        let surface = instance
            .create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))
            .expect("Failed to create surface");

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::LowPower,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .expect("Failed to get adapter");

        log::info!("Using adapter: {:?}", adapter.get_info().name);

        let render_state = RenderState::new(surface, &adapter, width, height).await;
        app.borrow_mut().render_state = Some(render_state);

        setup_canvas_click(&canvas, app.clone());
        setup_controls(app.clone());
        install_spawn_timer(&app);

        app.borrow().update_hud();

        request_animation_frame(app);

        log::info!("Shape Fall running!");
    }

    /// Cancel the current spawn interval and install one at the current rate
    fn install_spawn_timer(app: &Rc<RefCell<App>>) {
        // Drop first so the old interval is cleared before the new one exists
        app.borrow_mut().timer = None;

        let Some(window) = web_sys::window() else {
            log::error!("No window; spawn timer not installed");
            return;
        };
        let (interval_ms, generation) = {
            let a = app.borrow();
            (a.state.schedule.interval_ms(), a.state.schedule.generation())
        };

        let weak: Weak<RefCell<App>> = Rc::downgrade(app);
        let closure = Closure::<dyn FnMut()>::new(move || {
            if let Some(app) = weak.upgrade() {
                let mut a = app.borrow_mut();
                a.state.spawn_random();
                a.update_hud();
            }
        });

        match window.set_interval_with_callback_and_timeout_and_arguments_0(
            closure.as_ref().unchecked_ref(),
            interval_ms.round() as i32,
        ) {
            Ok(handle) => {
                log::debug!(
                    "Spawn timer #{} every {:.1} ms (handle {})",
                    generation,
                    interval_ms,
                    handle
                );
                app.borrow_mut().timer = Some(SpawnTimer {
                    handle,
                    _closure: closure,
                });
            }
            Err(e) => log::error!("Failed to install spawn timer: {:?}", e),
        }
    }

    fn setup_canvas_click(canvas: &HtmlCanvasElement, app: Rc<RefCell<App>>) {
        let canvas_clone = canvas.clone();
        let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
            // Client pixels -> canvas space (CSS may scale the element)
            let rect = canvas_clone.get_bounding_client_rect();
            if rect.width() <= 0.0 || rect.height() <= 0.0 {
                return;
            }
            let x = (event.client_x() as f64 - rect.left()) * CANVAS_WIDTH as f64 / rect.width();
            let y = (event.client_y() as f64 - rect.top()) * CANVAS_HEIGHT as f64 / rect.height();

            let mut a = app.borrow_mut();
            let outcome = sim::click(&mut a.state, Vec2::new(x as f32, y as f32));
            if outcome != sim::ClickOutcome::default() {
                a.update_hud();
            }
        });
        let _ = canvas.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn setup_controls(app: Rc<RefCell<App>>) {
        let document = web_sys::window().unwrap().document().unwrap();

        for control in Control::ALL {
            let Some(btn) = document.get_element_by_id(control.element_id()) else {
                log::warn!("Missing button #{}", control.element_id());
                continue;
            };
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                let outcome = {
                    let mut a = app.borrow_mut();
                    sim::apply_control(&mut a.state, control, js_sys::Date::now())
                };
                if outcome.reschedule {
                    install_spawn_timer(&app);
                }
                if outcome.changed {
                    app.borrow().update_hud();
                }
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn request_animation_frame(app: Rc<RefCell<App>>) {
        let window = web_sys::window().unwrap();
        let closure = Closure::once(move |_time: f64| {
            frame_loop(app);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn frame_loop(app: Rc<RefCell<App>>) {
        {
            let mut a = app.borrow_mut();
            sim::frame(&mut a.state);
            a.render();
        }

        request_animation_frame(app);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() {
    wasm_app::run().await;
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Shape Fall (native) starting...");
    log::info!("Native mode is headless - run with `trunk serve` for the web version");

    run_headless();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

/// Drive the simulation for a few seconds at 60 fps without a window
#[cfg(not(target_arch = "wasm32"))]
fn run_headless() {
    use glam::Vec2;
    use shape_fall::SimConfig;
    use shape_fall::sim::{self, Control, SimState};

    const FPS: f64 = 60.0;
    const SECONDS: u32 = 12;

    let config = SimConfig::load();
    let seed = config.seed.unwrap_or(42);
    let mut state = SimState::new(&config, seed, 0.0);

    for i in 1..=(SECONDS as u64 * FPS as u64) {
        let now_ms = i as f64 * 1000.0 / FPS;
        state.run_due_spawns(now_ms);

        // Poke the controls and the canvas once each along the way
        match i {
            120 => {
                sim::apply_control(&mut state, Control::SpawnRateUp, now_ms);
            }
            240 => {
                sim::apply_control(&mut state, Control::GravityUp, now_ms);
            }
            360 => {
                let outcome = sim::click(&mut state, Vec2::new(400.0, 300.0));
                log::info!("Click at (400, 300): {:?}", outcome);
            }
            _ => {}
        }

        let report = sim::frame(&mut state);
        if !report.fallen.is_empty() {
            log::info!("t={:.2}s fell off: {:?}", now_ms / 1000.0, report.fallen);
        }
    }

    state.refresh_readout();
    match serde_json::to_string(&state.readout()) {
        Ok(json) => println!("{}", json),
        Err(e) => log::error!("Failed to serialize stats: {}", e),
    }
}

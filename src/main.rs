//! Prize Confetti entry point
//!
//! On the web this attaches the overlay to the `#confetti` canvas and exposes
//! `start_confetti` / `stop_confetti` for the game to call at the reward
//! moment. Natively it runs a headless session and logs what happened.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_app {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::HtmlCanvasElement;

    use prize_confetti::platform::web::{AnimationFrameScheduler, ElementContainer};
    use prize_confetti::renderer::ConfettiRenderer;
    use prize_confetti::{ConfettiSurface, Settings};

    /// Overlay instance holding all state
    struct App {
        surface: ConfettiSurface<ElementContainer, AnimationFrameScheduler>,
        renderer: Option<ConfettiRenderer>,
        settings: Settings,
    }

    impl App {
        /// One display frame: tick, then present if a tick ran
        fn frame(&mut self) {
            if !self.surface.on_frame() {
                return;
            }
            if let Some(ref mut renderer) = self.renderer {
                match renderer.render(self.surface.batch()) {
                    Ok(_) => {}
                    Err(wgpu::SurfaceError::Lost) => {
                        renderer.resize(renderer.size.0, renderer.size.1);
                    }
                    Err(wgpu::SurfaceError::OutOfMemory) => {
                        log::error!("Out of memory!");
                    }
                    Err(e) => log::warn!("Render error: {:?}", e),
                }
            }
        }

        fn resize(&mut self) {
            self.surface.resize();
            let (w, h) = self.surface.device_size();
            if let Some(ref mut renderer) = self.renderer {
                renderer.resize(w, h);
            }
        }
    }

    thread_local! {
        static APP: RefCell<Option<Rc<RefCell<App>>>> = const { RefCell::new(None) };
    }

    fn with_app(f: impl FnOnce(&mut App)) {
        let app = APP.with(|slot| slot.borrow().clone());
        match app {
            Some(app) => f(&mut app.borrow_mut()),
            None => log::warn!("Confetti overlay not initialized"),
        }
    }

    /// Called by the game when the reward is revealed
    #[wasm_bindgen]
    pub fn start_confetti() {
        with_app(|app| app.surface.start());
    }

    #[wasm_bindgen]
    pub fn stop_confetti() {
        with_app(|app| app.surface.stop());
    }

    /// Switch to the "low", "medium" or "high" preset and remember it
    #[wasm_bindgen]
    pub fn set_confetti_quality(name: &str) {
        with_app(|app| {
            let result = app
                .settings
                .select_quality(name)
                .and_then(|_| app.surface.reconfigure(&app.settings));
            if let Err(e) = result {
                log::warn!("{}", e);
            }
        });
    }

    pub async fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Prize Confetti starting...");

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("confetti")
            .expect("no confetti canvas")
            .dyn_into()
            .expect("not a canvas");

        let Some(container) = ElementContainer::new(canvas.clone()) else {
            log::error!("Confetti canvas has no parent element");
            return;
        };

        let settings = Settings::load();
        let surface = match ConfettiSurface::new(container, AnimationFrameScheduler::new(), &settings) {
            Ok(surface) => surface,
            Err(e) => {
                log::error!("{}", e);
                return;
            }
        };
        let (width, height) = surface.device_size();

        let app = Rc::new(RefCell::new(App {
            surface,
            renderer: None,
            settings,
        }));

        // Frame callback: requestAnimationFrame re-queues this same function
        {
            let app_frame = app.clone();
            let closure = Closure::<dyn FnMut(f64)>::new(move |_time: f64| {
                app_frame.borrow_mut().frame();
            });
            let callback: js_sys::Function = closure.as_ref().unchecked_ref::<js_sys::Function>().clone();
            closure.forget();
            app.borrow_mut().surface.scheduler_mut().set_callback(callback);
        }

        // Window resize
        {
            let app_resize = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                app_resize.borrow_mut().resize();
            });
            let _ = window.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        APP.with(|slot| *slot.borrow_mut() = Some(app.clone()));

        // Initialize WebGPU
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::BROWSER_WEBGPU | wgpu::Backends::GL,
            ..Default::default()
        });

        let gpu_surface = match instance.create_surface(wgpu::SurfaceTarget::Canvas(canvas)) {
            Ok(surface) => surface,
            Err(e) => {
                log::error!("Failed to create surface: {}", e);
                return;
            }
        };

        let adapter = match instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::LowPower,
                compatible_surface: Some(&gpu_surface),
                force_fallback_adapter: false,
            })
            .await
        {
            Ok(adapter) => adapter,
            Err(e) => {
                log::error!("Failed to get adapter: {}", e);
                return;
            }
        };

        log::info!("Using adapter: {:?}", adapter.get_info().name);

        match ConfettiRenderer::new(gpu_surface, &adapter, width, height).await {
            Ok(renderer) => {
                let mut app = app.borrow_mut();
                let (w, h) = app.surface.device_size();
                app.renderer = Some(renderer);
                // A resize may have landed while the device was being created
                if (w, h) != (width, height) {
                    app.resize();
                }
            }
            Err(e) => log::error!("Failed to create device: {}", e),
        }

        log::info!("Prize Confetti ready");
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
    log::info!("Prize Confetti (native) starting...");
    log::info!("Native mode is headless - run with `trunk serve` for the web overlay");

    if let Err(e) = run_headless() {
        log::error!("{}", e);
        std::process::exit(1);
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

/// Ten simulated seconds on a 1280x720 container
#[cfg(not(target_arch = "wasm32"))]
fn run_headless() -> Result<(), prize_confetti::ConfettiError> {
    use prize_confetti::platform::{FixedContainer, ManualScheduler};
    use prize_confetti::{ConfettiSurface, Settings};

    let settings = Settings::load();
    let frames = (settings.ticks_per_second * 10.0) as u32;
    let mut surface = ConfettiSurface::new(
        FixedContainer::new(1280.0, 720.0, 1.0),
        ManualScheduler::new(),
        &settings,
    )?;

    surface.start();
    for _ in 0..frames {
        surface.scheduler_mut().fire();
        surface.on_frame();
    }
    surface.stop();

    let stats = surface.state().stats;
    log::info!(
        "{} ticks: {} paper recycles, {} ribbon resets, {} triangles in last frame",
        stats.ticks,
        stats.paper_recycles,
        stats.ribbon_resets,
        surface.batch().vertices().len() / 3
    );
    Ok(())
}

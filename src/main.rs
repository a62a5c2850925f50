//! Arachne - a choreographed real-time scene player
//!
//! Plays a single hard-coded choreography: a spider descends onto a hand,
//! bites it, falls, and the camera closes in on its face until the eight
//! eyes merge into two.

use std::path::PathBuf;
use std::sync::Arc;

use winit::{
    application::ApplicationHandler,
    event::{ElementState, WindowEvent},
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    keyboard::{KeyCode, PhysicalKey},
    window::{Window, WindowId},
};

use arachne_physics::{PhysicsConfig, PhysicsSet};

use arachne::config::AppConfig;
use arachne::scene::Script;
use arachne::systems::{RenderError, RenderSystem, SimulationSystem};

/// Main application state
struct App {
    config: AppConfig,
    window: Option<Arc<Window>>,
    render: Option<RenderSystem>,
    simulation: SimulationSystem,
    /// Held while `Z` is down: draw with the line pipeline
    wireframe: bool,
    /// Set when GPU or asset initialization fails; main exits non-zero
    startup_failed: bool,
}

impl App {
    fn new(config: AppConfig) -> Self {
        let physics = PhysicsSet::with_config(PhysicsConfig::new(config.simulation.gravity));
        let simulation = SimulationSystem::new(&config.simulation, Script::new(), physics);
        Self {
            config,
            window: None,
            render: None,
            simulation,
            wireframe: false,
            startup_failed: false,
        }
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let window_attributes = Window::default_attributes()
            .with_title(&self.config.window.title)
            .with_inner_size(winit::dpi::LogicalSize::new(
                self.config.window.width,
                self.config.window.height,
            ));
        let window = match event_loop.create_window(window_attributes) {
            Ok(window) => Arc::new(window),
            Err(e) => {
                log::error!("Failed to create window: {}", e);
                self.startup_failed = true;
                event_loop.exit();
                return;
            }
        };

        let asset_root = PathBuf::from(&self.config.assets.root);
        match RenderSystem::new(
            window.clone(),
            self.config.rendering.clone(),
            self.config.camera.clone(),
            &asset_root,
        ) {
            Ok(render) => {
                self.render = Some(render);
                self.window = Some(window);
            }
            Err(e) => {
                log::error!("Failed to initialize rendering: {}", e);
                self.startup_failed = true;
                event_loop.exit();
            }
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        match event {
            WindowEvent::CloseRequested => {
                event_loop.exit();
            }

            WindowEvent::Resized(physical_size) => {
                if let Some(render) = &mut self.render {
                    render.resize(physical_size);
                }
            }

            WindowEvent::KeyboardInput { event, .. } => {
                if let PhysicalKey::Code(key) = event.physical_key {
                    match key {
                        KeyCode::Escape => {
                            if event.state == ElementState::Pressed {
                                event_loop.exit();
                            }
                        }
                        // Wireframe while held
                        KeyCode::KeyZ => {
                            self.wireframe = event.state == ElementState::Pressed;
                        }
                        _ => {}
                    }
                }
            }

            WindowEvent::RedrawRequested => {
                let snapshot = self.simulation.update();

                if let Some(render) = &mut self.render {
                    match render.render_frame(&snapshot, self.simulation.physics(), self.wireframe)
                    {
                        Ok(()) => {}
                        Err(RenderError::SurfaceLost) => {
                            render.reconfigure();
                        }
                        Err(RenderError::OutOfMemory) => {
                            log::error!("GPU out of memory");
                            event_loop.exit();
                            return;
                        }
                        Err(e) => {
                            log::warn!("Frame skipped: {}", e);
                        }
                    }
                }

                if let Some(window) = &self.window {
                    window.request_redraw();
                }
            }

            _ => {}
        }
    }
}

fn main() {
    env_logger::init();
    log::info!("Starting Arachne");

    let mut config = AppConfig::load().unwrap_or_else(|e| {
        log::warn!("Failed to load config: {}. Using defaults.", e);
        AppConfig::default()
    });

    // A single optional argument overrides the asset root
    if let Some(asset_root) = std::env::args().nth(1) {
        log::info!("Asset root overridden: {}", asset_root);
        config.assets.root = asset_root;
    }

    let event_loop = EventLoop::new().expect("Failed to create event loop");
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut app = App::new(config);
    event_loop.run_app(&mut app).expect("Event loop error");

    if app.startup_failed {
        std::process::exit(1);
    }
}

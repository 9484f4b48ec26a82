//! Shadowcube
//!
//! Opens a window and draws a spinning wire cube and torus. Every frame the
//! scene is rendered into a shadow map from a fixed light, then from the
//! camera. Up/Down change the rotation speed, Escape quits.

use std::process::ExitCode;
use std::time::Instant;
use winit::{
    application::ApplicationHandler,
    event::{StartCause, WindowEvent},
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    keyboard::PhysicalKey,
    window::WindowId,
};
use shadowcube::config::AppConfig;
use shadowcube::systems::{FramePacer, RenderSystem, WindowSystem};
use shadowcube_core::{LoopState, Scene, SceneEvent, SceneState};
use shadowcube_input::InputMapper;

/// Main application state
struct App {
    /// Application configuration
    config: AppConfig,
    scene: Scene,
    window: Option<WindowSystem>,
    render: Option<RenderSystem>,
    scene_state: SceneState,
    loop_state: LoopState,
    pacer: FramePacer,
    /// Set when startup or rendering failed fatally
    failed: bool,
}

impl App {
    fn new(config: AppConfig, scene: Scene) -> Self {
        let scene_state = config.scene_state();
        let pacer = FramePacer::new(config.animation.frame_budget());

        Self {
            config,
            scene,
            window: None,
            render: None,
            scene_state,
            loop_state: LoopState::default(),
            pacer,
            failed: false,
        }
    }

    fn handle_scene_event(&mut self, event: SceneEvent, event_loop: &ActiveEventLoop) {
        self.scene_state = self.scene_state.handle_event(event);
        self.loop_state = self.loop_state.handle_event(event);

        if !self.loop_state.is_running() {
            log::info!("Exiting after {} frames", self.pacer.frame_count());
            event_loop.exit();
        }
    }

    fn fail(&mut self, event_loop: &ActiveEventLoop) {
        self.failed = true;
        self.loop_state = self.loop_state.handle_event(SceneEvent::CloseRequested);
        event_loop.exit();
    }

    fn redraw(&mut self, event_loop: &ActiveEventLoop) {
        let Some(render) = &mut self.render else {
            return;
        };

        // Early redraws repaint the current state
        if self.pacer.try_begin_frame(Instant::now()) {
            self.scene_state = self.scene_state.advance(1);
        }

        if let Err(e) = render.render_frame(&self.scene_state) {
            if e.is_recoverable() {
                log::warn!("Skipping frame: {}", e);
            } else {
                log::error!("{}", e);
                self.fail(event_loop);
                return;
            }
        }

        event_loop.set_control_flow(ControlFlow::WaitUntil(self.pacer.next_frame_at()));
    }
}

impl ApplicationHandler for App {
    fn new_events(&mut self, _event_loop: &ActiveEventLoop, cause: StartCause) {
        if let StartCause::ResumeTimeReached { .. } = cause {
            if let Some(window) = &self.window {
                window.request_redraw();
            }
        }
    }

    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let window = match WindowSystem::create(event_loop, &self.config.window) {
            Ok(window) => window,
            Err(e) => {
                log::error!("{}", e);
                self.fail(event_loop);
                return;
            }
        };

        let render = match RenderSystem::new(window.window().clone(), &self.config, &self.scene) {
            Ok(render) => render,
            Err(e) => {
                log::error!("Renderer initialization failed: {}", e);
                self.fail(event_loop);
                return;
            }
        };

        log::info!(
            "Rendering at {:?} with a {}px shadow map",
            render.size(),
            render.shadow_map_size()
        );

        window.request_redraw();
        self.window = Some(window);
        self.render = Some(render);
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        match event {
            WindowEvent::CloseRequested => {
                self.handle_scene_event(SceneEvent::CloseRequested, event_loop);
            }
            WindowEvent::Resized(physical_size) => {
                if let Some(render) = &mut self.render {
                    render.resize(physical_size.width, physical_size.height);
                }
                if let Some(window) = &self.window {
                    window.request_redraw();
                }
            }
            WindowEvent::KeyboardInput { event, .. } => {
                if let PhysicalKey::Code(key) = event.physical_key {
                    if let Some(scene_event) = InputMapper::map_keyboard(key, event.state, event.repeat) {
                        self.handle_scene_event(scene_event, event_loop);
                    }
                }
            }
            WindowEvent::RedrawRequested => {
                if self.loop_state.is_running() {
                    self.redraw(event_loop);
                }
            }
            _ => {}
        }
    }
}

fn main() -> ExitCode {
    // Config is read before logging starts so it can pick the log level
    let (config, config_error) = match AppConfig::load() {
        Ok(config) => (config, None),
        Err(e) => (AppConfig::default(), Some(e)),
    };

    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(config.debug.log_level.as_str()),
    )
    .init();

    if let Some(e) = config_error {
        log::warn!("Failed to load config: {}. Using defaults.", e);
    }

    log::info!("Starting Shadowcube");

    let scene = match config.scene() {
        Ok(scene) => scene,
        Err(e) => {
            log::error!("Invalid scene: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let event_loop = match EventLoop::new() {
        Ok(event_loop) => event_loop,
        Err(e) => {
            log::error!("Failed to create event loop: {}", e);
            return ExitCode::FAILURE;
        }
    };
    event_loop.set_control_flow(ControlFlow::Wait);

    let mut app = App::new(config, scene);
    if let Err(e) = event_loop.run_app(&mut app) {
        log::error!("Event loop error: {}", e);
        return ExitCode::FAILURE;
    }

    if app.failed {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}

//! Application event loop.
//!
//! [`run`] opens the window and drives the demo through winit's
//! [`ApplicationHandler`]. The window thread keeps polled input up to date and
//! renders continuously; scene-changing events are handed to the background
//! task of [`EventHandler`].
//!
//! # Lifecycle
//!
//! 1. `resumed` creates the window, the GPU context and the scene, paints the
//!    render target and spawns the event task
//! 2. `window_event` forwards key, text and resize events to the task and
//!    records key / button state for polling
//! 3. `RedrawRequested` renders one frame and immediately requests the next
//! 4. `exiting` closes the event channel and waits for the task to drain it

use std::sync::Arc;

use winit::{
    application::ApplicationHandler,
    event::WindowEvent,
    event_loop::{ActiveEventLoop, EventLoop},
    window::{Window, WindowId},
};

use crate::{
    config::DemoConfig,
    context::Context,
    events::{EventHandler, SceneEvent},
    input::{InputState, Key},
    scene::Scene,
};

/// Everything that exists once the window is up.
pub struct AppState {
    ctx: Context,
    scene: Scene,
    input: InputState,
    events: EventHandler,
}

impl AppState {
    fn resize(&mut self, width: u32, height: u32) {
        if self.ctx.resize(width, height) {
            self.events
                .send(SceneEvent::FramebufferResized { width, height });
        }
    }

    fn redraw(&mut self) {
        // invoke the render loop again right away
        self.ctx.window().request_redraw();
        if !self.ctx.is_surface_configured() {
            return;
        }
        let Err(e) = self.scene.render_frame(&self.ctx, &self.input) else {
            return;
        };
        match e.downcast_ref::<wgpu::SurfaceError>() {
            // Reconfigure the surface if it's lost or outdated
            Some(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                let size = self.ctx.window().inner_size();
                self.resize(size.width, size.height);
            }
            Some(wgpu::SurfaceError::Timeout) => log::warn!("surface timed out, skipping frame"),
            _ => log::error!("Unable to render {:#}", e),
        }
    }
}

pub struct App {
    async_runtime: tokio::runtime::Runtime,
    config: DemoConfig,
    state: Option<AppState>,
    fatal: Option<anyhow::Error>,
}

impl App {
    pub fn new(config: DemoConfig) -> anyhow::Result<Self> {
        Ok(Self {
            async_runtime: tokio::runtime::Runtime::new()?,
            config,
            state: None,
            fatal: None,
        })
    }

    fn init(&self, window: Arc<Window>) -> anyhow::Result<AppState> {
        let ctx = self
            .async_runtime
            .block_on(Context::new(window, self.config.target.precision))?;
        let scene = Scene::new(&ctx, self.config.clone())?;
        let events = EventHandler::spawn(
            self.async_runtime.handle(),
            scene.shared(),
            self.config.move_step,
            self.config.event_queue_capacity,
        );
        Ok(AppState {
            ctx,
            scene,
            input: InputState::default(),
            events,
        })
    }

    /// Stop the loop; `run` hands the error to the caller, which logs it.
    fn fail(&mut self, event_loop: &ActiveEventLoop, error: anyhow::Error) {
        self.fatal = Some(error);
        event_loop.exit();
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.state.is_some() {
            return;
        }
        let window_attributes = Window::default_attributes().with_title(self.config.title.clone());
        let window = match event_loop.create_window(window_attributes) {
            Ok(window) => Arc::new(window),
            Err(e) => return self.fail(event_loop, e.into()),
        };
        match self.init(window) {
            Ok(state) => {
                state.ctx.window().request_redraw();
                self.state = Some(state);
            }
            Err(e) => self.fail(event_loop, e),
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        let state = match &mut self.state {
            Some(state) => state,
            None => return,
        };

        match event {
            WindowEvent::CloseRequested => event_loop.exit(),
            WindowEvent::Resized(size) => state.resize(size.width, size.height),
            WindowEvent::Focused(focused) => state.input.focus(focused),
            WindowEvent::KeyboardInput { event, .. } => {
                let key = Key::from(event.physical_key);
                let pressed = event.state.is_pressed();
                state.input.key(key, event.state);
                if pressed {
                    if let Some(text) = &event.text {
                        state.events.send(SceneEvent::Typed(text.to_string()));
                    }
                }
                // Auto-repeat is not a state change and must not move the card.
                if !event.repeat {
                    state.events.send(SceneEvent::Key { key, pressed });
                }
            }
            WindowEvent::MouseInput {
                state: button_state,
                button,
                ..
            } => state.input.button(button, button_state),
            WindowEvent::RedrawRequested => state.redraw(),
            _ => {}
        }
    }

    fn exiting(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(state) = self.state.take() {
            self.async_runtime.block_on(state.events.shutdown());
        }
    }
}

/// Open the window and run the demo until it is closed.
///
/// Returns the error that stopped start-up, most notably a device without
/// render-to-texture support.
pub fn run(config: DemoConfig) -> anyhow::Result<()> {
    let env = env_logger::Env::default().default_filter_or("info");
    if let Err(e) = env_logger::Builder::from_env(env).try_init() {
        println!("Warning: Could not initialize logger: {}", e);
    }

    let event_loop = EventLoop::new()?;
    let mut app = App::new(config)?;
    event_loop.run_app(&mut app)?;
    match app.fatal.take() {
        Some(e) => Err(e),
        None => Ok(()),
    }
}

//! Root game object
//!
//! Owns the render device, the components, the camera, input and the rule
//! state, and drives them one frame at a time: clear, update everything,
//! draw everything, present. Rules advance in fixed steps inside `update`.

use std::time::{SystemTime, UNIX_EPOCH};

use crate::camera::{Camera, CameraController};
use crate::components::{
    BallComponent, Component, FrameContext, PadComponent, PlaneComponent, PowerUpComponent,
    TexturedQuadComponent,
};
use crate::consts::*;
use crate::error::EngineError;
use crate::platform::clock::FrameClock;
use crate::platform::input::{InputState, Key};
use crate::renderer::RenderDevice;
use crate::settings::Settings;
use crate::sim::{GameEvent, GameState, PowerUpKind, TickInput, tick};
use crate::transform::Viewport;

/// Whether the loop should keep going after a frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameStatus {
    Continue,
    Exit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Lifecycle {
    Created,
    Running,
    Disposed,
}

pub struct Game<D: RenderDevice> {
    device: D,
    viewport: Viewport,
    components: Vec<Box<dyn Component>>,
    camera: Camera,
    controller: CameraController,
    input: InputState,
    state: GameState,
    clock: FrameClock,
    /// Unsimulated time carried between frames
    accumulator: f32,
    total_time: f32,
    shutdown_requested: bool,
    lifecycle: Lifecycle,
}

impl<D: RenderDevice> Game<D> {
    /// Game with the standard scene registered
    pub fn new(device: D, settings: &Settings) -> Self {
        let mut game = Self::empty(device, settings);
        let scene: [Box<dyn Component>; 4] = [
            Box::new(TexturedQuadComponent::default()),
            Box::new(PlaneComponent::new()),
            Box::new(PadComponent::new()),
            Box::new(BallComponent::new()),
        ];
        game.components.extend(scene);
        game.components.extend(
            PowerUpKind::ALL
                .iter()
                .map(|&kind| Box::new(PowerUpComponent::new(kind)) as Box<dyn Component>),
        );
        game
    }

    /// Game with no components
    pub fn empty(device: D, settings: &Settings) -> Self {
        let viewport = device.viewport();
        let seed = settings.seed.unwrap_or_else(time_seed);
        log::info!("New game: seed {} field {}x{}", seed, viewport.width, viewport.height);

        let mut controller = CameraController::new(settings.camera_position);
        controller.velocity_magnitude = settings.camera_speed;
        controller.mouse_sensitivity = settings.mouse_sensitivity;
        let mut camera = Camera::new();
        let input = InputState::new();
        controller.update(&mut camera, &input, glam::Vec2::ZERO, 0.0);

        Self {
            device,
            viewport,
            components: Vec::new(),
            camera,
            controller,
            input,
            state: GameState::new(seed, viewport, settings.tuning.clone()),
            clock: FrameClock::new(),
            accumulator: 0.0,
            total_time: 0.0,
            shutdown_requested: false,
            lifecycle: Lifecycle::Created,
        }
    }

    /// Add a component; it is initialized right away if the game is running
    pub fn register(&mut self, mut component: Box<dyn Component>) -> Result<(), EngineError> {
        match self.lifecycle {
            Lifecycle::Created => {}
            Lifecycle::Running => {
                component
                    .init(&mut self.device)
                    .map_err(|source| EngineError::ComponentInit {
                        name: component.name().to_string(),
                        source,
                    })?;
                log::debug!("Initialized {}", component.name());
            }
            Lifecycle::Disposed => {
                log::warn!("Ignoring {} registered after dispose", component.name());
                return Ok(());
            }
        }
        self.components.push(component);
        Ok(())
    }

    /// Initialize every component in registration order and start the clock.
    ///
    /// A failure disposes the components initialized so far and ends the game.
    pub fn init(&mut self) -> Result<(), EngineError> {
        if self.lifecycle != Lifecycle::Created {
            return Ok(());
        }

        for i in 0..self.components.len() {
            if let Err(source) = self.components[i].init(&mut self.device) {
                let name = self.components[i].name().to_string();
                log::error!("{} failed to initialize: {}", name, source);
                for component in &mut self.components[..i] {
                    component.dispose(&mut self.device);
                }
                self.lifecycle = Lifecycle::Disposed;
                return Err(EngineError::ComponentInit { name, source });
            }
            log::debug!("Initialized {}", self.components[i].name());
        }

        self.clock.start();
        self.lifecycle = Lifecycle::Running;
        log::info!("Game running with {} components", self.components.len());
        Ok(())
    }

    /// Initialize, loop until shutdown, dispose
    pub fn run(&mut self) -> Result<(), EngineError> {
        self.init()?;
        let result = loop {
            match self.run_frame() {
                Ok(FrameStatus::Continue) => {}
                Ok(FrameStatus::Exit) => break Ok(()),
                Err(e) => break Err(e),
            }
        };
        self.dispose();
        result
    }

    /// One frame timed by the clock
    pub fn run_frame(&mut self) -> Result<FrameStatus, EngineError> {
        let dt = self.clock.tick();
        self.advance(dt)
    }

    /// One frame with an explicit delta (seconds)
    pub fn advance(&mut self, dt: f32) -> Result<FrameStatus, EngineError> {
        if self.lifecycle != Lifecycle::Running {
            return Ok(FrameStatus::Exit);
        }

        self.device.begin_frame();
        self.update(dt);
        self.draw(dt);
        self.device.present()?;

        Ok(if self.shutdown_requested {
            FrameStatus::Exit
        } else {
            FrameStatus::Continue
        })
    }

    fn update(&mut self, dt: f32) {
        let dt = dt.clamp(0.0, MAX_FRAME_DT);
        self.total_time += dt;

        if self.input.was_pressed(Key::Escape) {
            self.shutdown();
        }

        let mouse_delta = self.input.take_mouse_delta();
        self.controller
            .update(&mut self.camera, &self.input, mouse_delta, dt);

        if self.state.is_game_over()
            && (self.input.was_pressed(Key::R) || self.input.was_pressed(Key::Enter))
        {
            self.state.start_new_game();
            self.accumulator = 0.0;
            log::info!("Restarted");
        }

        let tick_input = TickInput {
            pad_direction: self.input.horizontal_axis(),
        };
        self.accumulator += dt;
        let mut substeps = 0;
        while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
            for event in tick(&mut self.state, &tick_input, SIM_DT) {
                log_event(&event);
            }
            self.accumulator -= SIM_DT;
            substeps += 1;
        }
        if self.accumulator >= SIM_DT {
            // Too far behind, drop the backlog
            self.accumulator = 0.0;
        }

        let ctx = FrameContext {
            state: &self.state,
            camera: &self.camera,
            viewport: self.viewport,
            total_time: self.total_time,
        };
        for component in &mut self.components {
            component.update(&mut self.device, &ctx, dt);
        }

        self.input.end_frame();
    }

    fn draw(&mut self, dt: f32) {
        for component in &mut self.components {
            component.draw(&mut self.device, dt);
        }
    }

    /// Adopt a new window size between frames; zero sizes are ignored
    pub fn resize(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            log::debug!("Ignoring resize to {}x{}", width, height);
            return;
        }
        self.device.resize_targets(width, height);
        self.viewport = Viewport::from_pixels(width, height);
        self.state.resize(self.viewport);
        log::info!("Resized to {}x{}", width, height);
    }

    /// Make the current frame the last one
    pub fn shutdown(&mut self) {
        if !self.shutdown_requested {
            log::info!("Shutdown requested");
        }
        self.shutdown_requested = true;
    }

    pub fn is_shutdown_requested(&self) -> bool {
        self.shutdown_requested
    }

    /// Stop the clock and dispose every component once
    pub fn dispose(&mut self) {
        if self.lifecycle == Lifecycle::Disposed {
            return;
        }
        self.clock.stop();
        for component in &mut self.components {
            component.dispose(&mut self.device);
            log::debug!("Disposed {}", component.name());
        }
        self.lifecycle = Lifecycle::Disposed;
        log::info!("Game disposed after {:.1}s", self.total_time);
    }

    pub fn input(&self) -> &InputState {
        &self.input
    }

    pub fn input_mut(&mut self) -> &mut InputState {
        &mut self.input
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut GameState {
        &mut self.state
    }

    pub fn device(&self) -> &D {
        &self.device
    }

    pub fn device_mut(&mut self) -> &mut D {
        &mut self.device
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn controller(&self) -> &CameraController {
        &self.controller
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn total_time(&self) -> f32 {
        self.total_time
    }

    pub fn component_names(&self) -> Vec<&str> {
        self.components.iter().map(|c| c.name()).collect()
    }
}

fn log_event(event: &GameEvent) {
    match event {
        GameEvent::GameOver => log::info!("Game over, press R or Enter to restart"),
        GameEvent::PowerUpCollected(kind) => log::info!("Collected {}", kind.as_str()),
        GameEvent::PowerUpSpawned(kind) => log::debug!("{} appeared", kind.as_str()),
        GameEvent::PowerUpMissed(kind) => log::debug!("{} missed", kind.as_str()),
        GameEvent::PadHit { acceleration } => log::debug!("Pad hit x{:.2}", acceleration),
        GameEvent::WallBounce(wall) => log::trace!("Bounced off {:?} wall", wall),
    }
}

fn time_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(0)
}

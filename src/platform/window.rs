//! winit event loop driving the game

use std::sync::Arc;

use winit::application::ApplicationHandler;
use winit::event::{DeviceEvent, DeviceId, ElementState, KeyEvent, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::keyboard::{KeyCode, PhysicalKey};
use winit::window::{Fullscreen, Window, WindowAttributes, WindowId};

use super::input::Key;
use crate::error::EngineError;
use crate::game::{FrameStatus, Game};
use crate::renderer::GpuDevice;
use crate::settings::Settings;

/// Open the window and run the game until it exits
pub fn run(settings: Settings) -> Result<(), EngineError> {
    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut app = App::new(settings);
    event_loop.run_app(&mut app)?;

    match app.error.take() {
        Some(e) => Err(e),
        None => Ok(()),
    }
}

struct App {
    settings: Settings,
    window: Option<Arc<Window>>,
    game: Option<Game<GpuDevice>>,
    /// First fatal error, reported once the loop returns
    error: Option<EngineError>,
}

impl App {
    fn new(settings: Settings) -> Self {
        Self {
            settings,
            window: None,
            game: None,
            error: None,
        }
    }

    fn start(&mut self, event_loop: &ActiveEventLoop) -> Result<(), EngineError> {
        let attributes = WindowAttributes::default()
            .with_title(self.settings.title.clone())
            .with_inner_size(winit::dpi::LogicalSize::new(
                self.settings.width,
                self.settings.height,
            ));
        let window = Arc::new(event_loop.create_window(attributes)?);

        let device = pollster::block_on(GpuDevice::new(window.clone(), self.settings.vsync))?;
        let mut game = Game::new(device, &self.settings);
        game.init()?;

        window.request_redraw();
        self.window = Some(window);
        self.game = Some(game);
        Ok(())
    }

    fn fail(&mut self, event_loop: &ActiveEventLoop, error: EngineError) {
        log::error!("{}", error);
        self.error.get_or_insert(error);
        self.stop(event_loop);
    }

    fn stop(&mut self, event_loop: &ActiveEventLoop) {
        if let Some(game) = &mut self.game {
            game.dispose();
        }
        event_loop.exit();
    }

    fn handle_key(&mut self, event: &KeyEvent) {
        let PhysicalKey::Code(code) = event.physical_key else {
            return;
        };
        let Some(key) = map_key(code) else { return };

        if key == Key::F11 && event.state == ElementState::Pressed && !event.repeat {
            self.toggle_fullscreen();
        }

        if let Some(game) = &mut self.game {
            match event.state {
                ElementState::Pressed => game.input_mut().key_down(key),
                ElementState::Released => game.input_mut().key_up(key),
            }
        }
    }

    fn toggle_fullscreen(&self) {
        if let Some(window) = &self.window {
            let fullscreen = match window.fullscreen() {
                Some(_) => None,
                None => Some(Fullscreen::Borderless(None)),
            };
            log::info!("Fullscreen: {}", fullscreen.is_some());
            window.set_fullscreen(fullscreen);
        }
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.game.is_some() || self.error.is_some() {
            return;
        }
        if let Err(e) = self.start(event_loop) {
            self.fail(event_loop, e);
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        match event {
            WindowEvent::CloseRequested => {
                if let Some(game) = &mut self.game {
                    game.shutdown();
                }
                self.stop(event_loop);
            }
            WindowEvent::Resized(size) => {
                if let Some(game) = &mut self.game {
                    game.resize(size.width, size.height);
                }
            }
            WindowEvent::Focused(false) => {
                if let Some(game) = &mut self.game {
                    game.input_mut().release_all();
                }
            }
            WindowEvent::KeyboardInput { event, .. } => self.handle_key(&event),
            WindowEvent::RedrawRequested => {
                let Some(game) = &mut self.game else { return };
                match game.run_frame() {
                    Ok(FrameStatus::Continue) => {
                        if let Some(window) = &self.window {
                            window.request_redraw();
                        }
                    }
                    Ok(FrameStatus::Exit) => self.stop(event_loop),
                    Err(e) => self.fail(event_loop, e),
                }
            }
            _ => {}
        }
    }

    fn device_event(&mut self, _event_loop: &ActiveEventLoop, _id: DeviceId, event: DeviceEvent) {
        if let DeviceEvent::MouseMotion { delta: (dx, dy) } = event {
            if let Some(game) = &mut self.game {
                game.input_mut().accumulate_mouse(dx as f32, dy as f32);
            }
        }
    }
}

/// Physical key to game key; everything else is ignored
pub fn map_key(code: KeyCode) -> Option<Key> {
    Some(match code {
        KeyCode::KeyW => Key::W,
        KeyCode::KeyA => Key::A,
        KeyCode::KeyS => Key::S,
        KeyCode::KeyD => Key::D,
        KeyCode::KeyC => Key::C,
        KeyCode::Space => Key::Space,
        KeyCode::ArrowLeft => Key::Left,
        KeyCode::ArrowRight => Key::Right,
        KeyCode::KeyR => Key::R,
        KeyCode::Enter | KeyCode::NumpadEnter => Key::Enter,
        KeyCode::Escape => Key::Escape,
        KeyCode::F11 => Key::F11,
        _ => return None,
    })
}

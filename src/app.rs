//! Window, event loop and per-frame orchestration

use std::sync::Arc;
use winit::{
    application::ApplicationHandler,
    dpi::PhysicalSize,
    event::{ElementState, KeyEvent, WindowEvent},
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    keyboard::{KeyCode, PhysicalKey},
    window::{Window, WindowAttributes, WindowId},
};

use crate::{
    config::ViewerConfig,
    error::Result,
    gfx::{frame_driver::FrameDriver, rendering::RenderEngine},
    settings::{SettingChange, SettingsPublisher},
    ui::{self, UiManager},
};

/// What a key press asks for
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum KeyAction {
    Publish(SettingChange),
    Exit,
}

/// Keyboard shortcuts, by physical key so layouts don't move them
pub fn key_action(code: KeyCode) -> Option<KeyAction> {
    match code {
        KeyCode::KeyW => Some(KeyAction::Publish(SettingChange::Wireframe(true))),
        KeyCode::KeyS => Some(KeyAction::Publish(SettingChange::Wireframe(false))),
        KeyCode::KeyP => Some(KeyAction::Publish(SettingChange::ToggleAnimation)),
        KeyCode::Escape => Some(KeyAction::Exit),
        _ => None,
    }
}

pub struct ViewerApp {
    event_loop: Option<EventLoop<()>>,
    app_state: AppState,
}

struct AppState {
    config: ViewerConfig,
    window: Option<Arc<Window>>,
    render_engine: Option<RenderEngine>,
    ui_manager: Option<UiManager>,
    driver: FrameDriver,
    publisher: SettingsPublisher,
    failure: Option<crate::error::ViewerError>,
}

impl ViewerApp {
    pub fn new(config: ViewerConfig) -> Result<Self> {
        let event_loop = EventLoop::new()?;
        let driver = FrameDriver::new(&config);
        let publisher = driver.publisher();

        Ok(Self {
            event_loop: Some(event_loop),
            app_state: AppState {
                config,
                window: None,
                render_engine: None,
                ui_manager: None,
                driver,
                publisher,
                failure: None,
            },
        })
    }

    /// Publisher for feeding settings changes from outside the UI
    pub fn publisher(&self) -> SettingsPublisher {
        self.app_state.publisher.clone()
    }

    /// Runs the event loop until the window closes
    pub fn run(mut self) -> Result<()> {
        let Some(event_loop) = self.event_loop.take() else {
            return Ok(());
        };
        event_loop.set_control_flow(ControlFlow::Poll);
        event_loop.run_app(&mut self.app_state)?;

        match self.app_state.failure.take() {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }
}

impl AppState {
    fn init_graphics(&mut self, event_loop: &ActiveEventLoop) -> Result<()> {
        let (width, height) = self.config.window_size;
        let window = event_loop.create_window(
            WindowAttributes::default()
                .with_title(self.config.title.clone())
                .with_inner_size(winit::dpi::LogicalSize::new(width, height)),
        )?;
        let window = Arc::new(window);

        let PhysicalSize { width, height } = window.inner_size();
        let render_engine = pollster::block_on(RenderEngine::new(
            window.clone(),
            width,
            height,
            self.config.clear_color,
        ))?;

        let mut ui_manager = UiManager::new(
            render_engine.device(),
            render_engine.queue(),
            render_engine.surface_format(),
            &window,
        );
        ui_manager.update_display_size(width, height);

        self.publisher
            .publish(SettingChange::Resize { width, height });

        self.window = Some(window);
        self.render_engine = Some(render_engine);
        self.ui_manager = Some(ui_manager);
        Ok(())
    }

    fn handle_key(&mut self, event_loop: &ActiveEventLoop, event: &KeyEvent) {
        if event.state != ElementState::Pressed || event.repeat {
            return;
        }
        let PhysicalKey::Code(code) = event.physical_key else {
            return;
        };
        match key_action(code) {
            Some(KeyAction::Publish(change)) => self.publisher.publish(change),
            Some(KeyAction::Exit) => {
                log::info!("escape pressed, exiting");
                event_loop.exit();
            }
            None => {}
        }
    }

    fn redraw(&mut self) {
        let (Some(window), Some(render_engine)) =
            (self.window.as_ref(), self.render_engine.as_mut())
        else {
            return;
        };

        if !self.driver.render_frame(render_engine) {
            return;
        }

        let driver = &self.driver;
        let publisher = &self.publisher;
        match self.ui_manager.as_mut() {
            Some(ui_manager) => {
                render_engine.present(Some(
                    |device: &wgpu::Device,
                     queue: &wgpu::Queue,
                     encoder: &mut wgpu::CommandEncoder,
                     view: &wgpu::TextureView| {
                        ui_manager.draw(device, queue, encoder, window, view, |ui| {
                            ui::settings_panel(ui, driver.scene(), publisher);
                            ui::object_panel(ui, driver.scene(), publisher);
                        });
                    },
                ));
            }
            None => {
                render_engine.present(
                    None::<
                        fn(&wgpu::Device, &wgpu::Queue, &mut wgpu::CommandEncoder, &wgpu::TextureView),
                    >,
                );
            }
        }
    }
}

impl ApplicationHandler for AppState {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        match self.init_graphics(event_loop) {
            Ok(()) => self.driver.start(),
            Err(e) => {
                log::error!("failed to initialise graphics: {}", e);
                self.failure = Some(e);
                event_loop.exit();
            }
        }
    }

    fn suspended(&mut self, _event_loop: &ActiveEventLoop) {
        self.driver.stop();
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        window_id: WindowId,
        event: WindowEvent,
    ) {
        let Some(window) = self.window.clone() else {
            return;
        };

        if let Some(ui_manager) = self.ui_manager.as_mut() {
            if ui_manager.handle_input(&window, window_id, &event) {
                return;
            }
        }

        match event {
            WindowEvent::KeyboardInput { event: key, .. } => {
                let ui_has_keyboard = self
                    .ui_manager
                    .as_ref()
                    .is_some_and(|ui| ui.wants_keyboard());
                if !ui_has_keyboard {
                    self.handle_key(event_loop, &key);
                }
            }
            WindowEvent::Resized(PhysicalSize { width, height }) => {
                if let Some(render_engine) = self.render_engine.as_mut() {
                    render_engine.resize(width, height);
                }
                if let Some(ui_manager) = self.ui_manager.as_mut() {
                    ui_manager.update_display_size(width, height);
                }
                self.publisher
                    .publish(SettingChange::Resize { width, height });
            }
            WindowEvent::CloseRequested => {
                self.driver.stop();
                event_loop.exit();
            }
            WindowEvent::RedrawRequested => self.redraw(),
            _ => (),
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(ref window) = self.window {
            window.request_redraw();
        }
    }
}

//! Host window and frame loop.
//!
//! [`run`] opens a window, builds the renderer and drives the fire system once
//! per redraw: input is mapped to [`FireEvent`]s and camera moves, the frame
//! clock supplies the real delta, and the resulting feed is uploaded and drawn.

use std::sync::Arc;

use winit::{
    application::ApplicationHandler,
    event::WindowEvent,
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    window::{Window, WindowId},
};

use crate::config::FireConfig;
use crate::error::AppError;
use crate::gpu::{Camera, GpuState};
use crate::input::{Input, MouseButton};
use crate::simulation::{FireEvent, FireSystem};
use crate::textures::SpriteTexture;
use crate::time::Time;

struct App {
    config: FireConfig,
    fire: FireSystem,
    input: Input,
    time: Time,
    camera: Camera,
    window: Option<Arc<Window>>,
    gpu_state: Option<GpuState>,
    error: Option<AppError>,
}

impl App {
    fn new(config: FireConfig) -> Self {
        let fire = FireSystem::from_entropy(&config);
        let mut time = Time::new();
        time.set_time_scale(config.host.time_scale);
        let camera = Camera::looking_at(
            config.host.camera_position,
            glam::Vec3::ZERO,
            config.host.fov_degrees.to_radians(),
        );
        Self {
            config,
            fire,
            input: Input::new(),
            time,
            camera,
            window: None,
            gpu_state: None,
            error: None,
        }
    }

    fn init_window(&mut self, event_loop: &ActiveEventLoop) -> Result<(), AppError> {
        let host = &self.config.host;
        let window_attrs = Window::default_attributes()
            .with_title(host.title.clone())
            .with_inner_size(winit::dpi::LogicalSize::new(host.width, host.height));

        let window = Arc::new(event_loop.create_window(window_attrs)?);
        let sprite = SpriteTexture::load_or_glow(&host.texture_path);
        let gpu_state = pollster::block_on(GpuState::new(
            window.clone(),
            &sprite,
            self.config.emitter.count,
            host.clear_color,
        ))?;

        self.window = Some(window);
        self.gpu_state = Some(gpu_state);
        self.time.reset();
        Ok(())
    }

    fn apply_input(&mut self) {
        let host = &self.config.host;
        if self.input.key_released(host.restart_key) {
            self.fire.push_event(FireEvent::Restart);
        }
        if self.input.key_pressed(host.pause_key) {
            self.time.toggle_pause();
            log::info!(
                "paused: {} at {:.1}s",
                self.time.is_paused(),
                self.time.elapsed()
            );
        }
        if self.input.mouse_held(MouseButton::Left) {
            let delta = self.input.mouse_delta();
            self.camera.orbit(delta.x, delta.y);
        }
        let scroll = self.input.scroll_delta();
        if scroll != 0.0 {
            self.camera.zoom(scroll);
        }
    }

    fn redraw(&mut self, event_loop: &ActiveEventLoop) {
        self.apply_input();
        self.input.end_frame();

        let dt = self.time.update();
        let feed = self.fire.on_frame(self.camera.position(), dt);

        let Some(gpu_state) = &mut self.gpu_state else {
            return;
        };
        gpu_state.upload_feed(feed);
        gpu_state.update_uniforms(&self.camera);

        match gpu_state.render() {
            Ok(()) => {}
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                gpu_state.reconfigure()
            }
            Err(wgpu::SurfaceError::OutOfMemory) => {
                log::error!("surface out of memory");
                event_loop.exit();
            }
            Err(e) => log::warn!("render error: {:?}", e),
        }
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_none() {
            if let Err(e) = self.init_window(event_loop) {
                self.error = Some(e);
                event_loop.exit();
            }
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        self.input.handle_event(&event);

        match event {
            WindowEvent::CloseRequested => {
                event_loop.exit();
            }
            WindowEvent::Resized(physical_size) => {
                if let Some(gpu_state) = &mut self.gpu_state {
                    gpu_state.resize(physical_size);
                }
            }
            WindowEvent::RedrawRequested => {
                self.redraw(event_loop);
                if let Some(window) = &self.window {
                    window.request_redraw();
                }
            }
            _ => {}
        }
    }
}

/// Open the fire window and run until it is closed.
pub fn run(config: FireConfig) -> Result<(), AppError> {
    config.validate()?;

    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut app = App::new(config);
    event_loop.run_app(&mut app)?;

    match app.error.take() {
        Some(e) => Err(e),
        None => Ok(()),
    }
}

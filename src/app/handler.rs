//! `ApplicationHandler` impl driving a sketch.
//!
//! Owns the window and renderer, translates winit events into [`Driver`]
//! calls and paces frames and physics ticks with [`FrameClock`]s through
//! `ControlFlow::WaitUntil`.

use super::clock::FrameClock;
use super::driver::Driver;
use crate::error::AvourError;
use crate::input;
use crate::sketch::Sketch;
use avour_render::{Renderer, RendererOptions};
use std::sync::Arc;
use std::time::Instant;
use tokio::runtime::Runtime;
use winit::application::ApplicationHandler;
use winit::dpi::LogicalSize;
use winit::event::{ElementState, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow};
use winit::keyboard::PhysicalKey;
use winit::window::{Window, WindowId};

pub(crate) struct SketchHandler<S> {
    driver: Driver<S>,
    /// Only used to block on async GPU initialisation
    runtime: Runtime,
    window: Option<Arc<Window>>,
    renderer: Option<Renderer>,
    frame_clock: FrameClock,
    physics_clock: FrameClock,
    /// A scheduled frame is waiting for its RedrawRequested
    frame_pending: bool,
    error: Option<AvourError>,
}

impl<S: Sketch> SketchHandler<S> {
    pub(crate) fn new(driver: Driver<S>, runtime: Runtime) -> Self {
        let now = Instant::now();
        let frame_clock = FrameClock::new(driver.avour().frame_rate(), now);
        let physics_clock = FrameClock::new(driver.avour().physics_rate(), now);
        Self {
            driver,
            runtime,
            window: None,
            renderer: None,
            frame_clock,
            physics_clock,
            frame_pending: false,
            error: None,
        }
    }

    /// Result of the run once the event loop has returned.
    pub(crate) fn finish(self) -> Result<(), AvourError> {
        match self.error {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }

    /// Record the first error and stop the loop.
    fn fail(&mut self, event_loop: &ActiveEventLoop, error: AvourError) {
        match &error {
            AvourError::Sketch(e) => crate::debug_error!("APP", "Sketch hook failed: {:#}", e),
            other => crate::debug_error!("APP", "Stopping sketch: {}", other),
        }
        if self.error.is_none() {
            self.error = Some(error);
        }
        self.driver.avour_mut().exit();
        event_loop.exit();
    }

    fn check(&mut self, event_loop: &ActiveEventLoop, result: Result<(), AvourError>) {
        if let Err(e) = result {
            self.fail(event_loop, e);
        } else if self.driver.is_exiting() {
            event_loop.exit();
        }
    }

    fn logical_size(window: &Window) -> (u32, u32) {
        let size = window
            .inner_size()
            .to_logical::<f64>(window.scale_factor());
        (size.width.round() as u32, size.height.round() as u32)
    }

    fn create_window(&mut self, event_loop: &ActiveEventLoop) -> Result<(), AvourError> {
        let config = self.driver.avour().config();
        let (width, height) = self.driver.avour().get_screen_size();
        let attributes = Window::default_attributes()
            .with_title(config.screen_title.clone())
            .with_inner_size(LogicalSize::new(f64::from(width), f64::from(height)))
            .with_resizable(config.resizable);
        let options = RendererOptions {
            vsync_mode: config.vsync_mode,
            power_preference: config.power_preference,
        };

        let window = Arc::new(event_loop.create_window(attributes)?);
        let renderer = self
            .runtime
            .block_on(Renderer::new(Arc::clone(&window), options))?;
        crate::debug_info!(
            "APP",
            "Window created: {:?} (scale factor {})",
            window.inner_size(),
            window.scale_factor()
        );

        let screen_size = Self::logical_size(&window);
        self.window = Some(window);
        self.renderer = Some(renderer);

        self.driver.attach(screen_size)?;

        let now = Instant::now();
        self.frame_clock.reset(now);
        self.physics_clock.reset(now);
        Ok(())
    }

    fn redraw(&mut self) -> Result<(), AvourError> {
        if self.frame_pending {
            self.frame_pending = false;
            self.driver.frame(Instant::now())?;
        }
        // A frame that called exit() is still presented
        if let Some(renderer) = self.renderer.as_mut() {
            renderer.render(self.driver.commands())?;
        }
        Ok(())
    }
}

impl<S: Sketch> ApplicationHandler for SketchHandler<S> {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }
        let result = self.create_window(event_loop);
        self.check(event_loop, result);
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        if let Some(renderer) = self.renderer.as_mut() {
            renderer.handle_window_event(&event);
        }

        let result = match event {
            WindowEvent::CloseRequested => {
                crate::debug_info!("APP", "Close requested");
                self.driver.close_requested();
                Ok(())
            }
            WindowEvent::Resized(_) | WindowEvent::ScaleFactorChanged { .. } => {
                if let Some(window) = &self.window {
                    let size = Self::logical_size(window);
                    crate::debug_log!("APP", "Resized to {}x{}", size.0, size.1);
                    self.driver.resized(size);
                }
                Ok(())
            }
            WindowEvent::KeyboardInput { event, .. } => {
                // Key repeats are not reported as new presses
                if event.repeat {
                    Ok(())
                } else if let PhysicalKey::Code(code) = event.physical_key
                    && let Some(name) = input::key_name(code)
                {
                    match event.state {
                        ElementState::Pressed => self.driver.key_down(name),
                        ElementState::Released => self.driver.key_up(name),
                    }
                } else {
                    Ok(())
                }
            }
            WindowEvent::CursorMoved { position, .. } => match &self.window {
                Some(window) => {
                    let height = f64::from(self.driver.avour().get_screen_size().1);
                    let screen = input::to_screen_coords(position, window.scale_factor(), height);
                    self.driver.mouse_moved(screen)
                }
                None => Ok(()),
            },
            WindowEvent::MouseInput { state, button, .. } => {
                match input::mouse_button_name(button) {
                    Some(name) => match state {
                        ElementState::Pressed => self.driver.mouse_down(name),
                        ElementState::Released => self.driver.mouse_up(name),
                    },
                    None => Ok(()),
                }
            }
            WindowEvent::Focused(focused) => self.driver.focus(focused),
            WindowEvent::RedrawRequested => self.redraw(),
            _ => Ok(()),
        };
        self.check(event_loop, result);
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        if self.driver.is_exiting() {
            event_loop.exit();
            return;
        }
        let Some(window) = self.window.clone() else {
            return;
        };

        // Rates may have been changed by a hook
        self.frame_clock.set_rate(self.driver.avour().frame_rate());
        self.physics_clock.set_rate(self.driver.avour().physics_rate());

        let now = Instant::now();
        if let Some(dt) = self.physics_clock.poll(now) {
            crate::debug_trace!("APP", "Physics tick dt={:.4}", dt.as_secs_f32());
            let result = self.driver.physics_tick(dt.as_secs_f32());
            self.check(event_loop, result);
            if self.driver.is_exiting() {
                return;
            }
        }
        if self.frame_clock.poll(now).is_some() && !self.frame_pending {
            self.frame_pending = true;
            window.request_redraw();
        }

        let next = self
            .frame_clock
            .next_due()
            .min(self.physics_clock.next_due());
        event_loop.set_control_flow(ControlFlow::WaitUntil(next));
    }

    fn exiting(&mut self, _event_loop: &ActiveEventLoop) {
        crate::debug_info!("APP", "Event loop exiting, releasing window and GPU resources");
        // Renderer holds the surface, which must go before the window
        self.renderer = None;
        self.window = None;
    }
}

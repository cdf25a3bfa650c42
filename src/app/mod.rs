//! Application module for avour
//!
//! This module contains the facade and its run loop:
//! - `Avour`: configuration, drawing state, display list and lifecycle flags
//! - `draw`: state setters and drawing primitives on `Avour`
//! - `Driver`: winit-independent dispatch of frames, physics ticks and input
//! - `SketchHandler`: the winit `ApplicationHandler` that owns window and GPU

use crate::canvas::{Coord, DrawState};
use crate::error::AvourError;
use crate::input;
use crate::sketch::Sketch;
use avour_config::Config;
use avour_render::DrawCommand;
use std::collections::HashMap;
use winit::event_loop::{ControlFlow, EventLoop};

pub mod clock;
mod draw;
pub mod driver;
pub mod fps;
mod handler;

pub use draw::TextOptions;
pub use driver::Driver;

use handler::SketchHandler;

/// Which hook is currently running. Drawing is only legal in `Drawing`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub(crate) enum Phase {
    #[default]
    Idle,
    Drawing,
    Physics,
}

/// The creative-coding facade handed to every sketch hook.
#[derive(Debug)]
pub struct Avour {
    config: Config,
    screen_size: (u32, u32),
    frame_rate: u32,
    physics_rate: u32,
    state: DrawState,
    saved_states: Vec<DrawState>,
    commands: Vec<DrawCommand>,
    phase: Phase,
    window_ready: bool,
    keys_active: HashMap<String, u64>,
    exit_requested: bool,
}

impl Avour {
    /// Create a facade from a validated configuration.
    ///
    /// The window itself is opened by [`Avour::run`].
    pub fn new(config: Config) -> Result<Self, AvourError> {
        config.validate()?;
        Ok(Self {
            screen_size: config.screen_size(),
            frame_rate: config.frame_rate,
            physics_rate: config.physics_rate,
            config,
            state: DrawState::default(),
            saved_states: Vec::new(),
            commands: Vec::new(),
            phase: Phase::Idle,
            window_ready: false,
            keys_active: HashMap::new(),
            exit_requested: false,
        })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Window size in logical pixels.
    pub fn get_screen_size(&self) -> (u32, u32) {
        self.screen_size
    }

    /// Target number of `draw()` calls per second, from the next frame on.
    pub fn set_frame_rate(&mut self, rate: u32) -> Result<(), AvourError> {
        if rate == 0 {
            return Err(AvourError::InvalidRate {
                what: "frame",
                value: rate,
            });
        }
        self.frame_rate = rate;
        Ok(())
    }

    pub fn frame_rate(&self) -> u32 {
        self.frame_rate
    }

    /// Target number of `update()` calls per second.
    pub fn set_physics_rate(&mut self, rate: u32) -> Result<(), AvourError> {
        if rate == 0 {
            return Err(AvourError::InvalidRate {
                what: "physics",
                value: rate,
            });
        }
        self.physics_rate = rate;
        Ok(())
    }

    pub fn physics_rate(&self) -> u32 {
        self.physics_rate
    }

    /// Every key name a sketch can receive, sorted.
    pub fn get_all_keys(&self) -> Vec<&'static str> {
        input::all_key_names()
    }

    /// Every mouse button name a sketch can receive, sorted.
    pub fn get_all_mouse_buttons(&self) -> Vec<&'static str> {
        input::all_mouse_button_names()
    }

    /// Keys currently held, with the number of physics ticks since the press.
    pub fn keys_active(&self) -> &HashMap<String, u64> {
        &self.keys_active
    }

    pub fn key_hold_ticks(&self, key: &str) -> Option<u64> {
        self.keys_active.get(key).copied()
    }

    /// Request shutdown. No further hook runs after the current one returns.
    pub fn exit(&mut self) {
        self.exit_requested = true;
    }

    pub fn is_exiting(&self) -> bool {
        self.exit_requested
    }

    /// Open the window and run `sketch` until `exit()` or the window closes.
    ///
    /// Returns the first error raised by a hook, the window system or the GPU.
    pub fn run<S: Sketch>(self, sketch: S) -> Result<(), AvourError> {
        let runtime = tokio::runtime::Builder::new_current_thread().build()?;

        let event_loop = EventLoop::new()?;
        // Deadlines are set with WaitUntil in about_to_wait
        event_loop.set_control_flow(ControlFlow::Wait);

        crate::debug_info!(
            "APP",
            "Starting sketch {:?} at {}x{}",
            self.config.screen_title,
            self.screen_size.0,
            self.screen_size.1
        );

        let mut handler = SketchHandler::new(Driver::new(self, sketch), runtime);
        event_loop.run_app(&mut handler)?;
        handler.finish()
    }

    pub(crate) fn screen_to_local(&self, pos: Coord) -> Coord {
        self.state.to_local(pos)
    }

    pub(crate) fn begin_phase(&mut self, phase: Phase) {
        self.phase = phase;
    }

    pub(crate) fn end_phase(&mut self) {
        self.phase = Phase::Idle;
    }

    pub(crate) fn mark_window_ready(&mut self, screen_size: (u32, u32)) {
        self.window_ready = true;
        self.screen_size = screen_size;
    }

    pub(crate) fn set_screen_size(&mut self, screen_size: (u32, u32)) {
        self.screen_size = screen_size;
    }

    pub(crate) fn clear_commands(&mut self) {
        self.commands.clear();
    }

    pub(crate) fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    pub(crate) fn push_command(&mut self, command: DrawCommand) {
        self.commands.push(command);
    }

    pub(crate) fn press_key(&mut self, key: &str) {
        self.keys_active.insert(key.to_string(), 0);
    }

    pub(crate) fn release_key(&mut self, key: &str) {
        self.keys_active.remove(key);
    }

    pub(crate) fn tick_keys(&mut self) {
        for ticks in self.keys_active.values_mut() {
            *ticks += 1;
        }
    }
}

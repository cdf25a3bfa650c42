//! Event and frame dispatch between the window system and a sketch.
//!
//! `Driver` knows nothing about winit: the handler translates window events
//! into calls here, and tests drive it directly without a display or GPU.
//! Every entry point is a no-op once `exit()` has been requested, so no hook
//! runs after the one that asked to stop.

use super::fps::FpsCounter;
use super::{Avour, Phase};
use crate::canvas::Coord;
use crate::error::AvourError;
use crate::sketch::Sketch;
use anyhow::Context;
use avour_render::DrawCommand;
use std::time::Instant;

pub struct Driver<S> {
    avour: Avour,
    sketch: S,
    fps: FpsCounter,
    /// Held mouse buttons, most recent last
    held_buttons: Vec<&'static str>,
    /// Last pointer position in screen coordinates
    cursor: Coord,
}

impl<S: Sketch> Driver<S> {
    pub fn new(avour: Avour, sketch: S) -> Self {
        Self {
            avour,
            sketch,
            fps: FpsCounter::new(),
            held_buttons: Vec::new(),
            cursor: (0.0, 0.0),
        }
    }

    pub fn avour(&self) -> &Avour {
        &self.avour
    }

    pub fn avour_mut(&mut self) -> &mut Avour {
        &mut self.avour
    }

    pub fn sketch(&self) -> &S {
        &self.sketch
    }

    pub fn is_exiting(&self) -> bool {
        self.avour.is_exiting()
    }

    /// Display list of the most recent frame, in screen coordinates.
    pub fn commands(&self) -> &[DrawCommand] {
        self.avour.commands()
    }

    /// The window exists: record its size and run `setup()`.
    pub fn attach(&mut self, screen_size: (u32, u32)) -> Result<(), AvourError> {
        self.avour.mark_window_ready(screen_size);
        if self.is_exiting() {
            return Ok(());
        }
        self.sketch
            .setup(&mut self.avour)
            .context("setup() failed")?;
        Ok(())
    }

    /// Build a new display list by running `draw()`.
    ///
    /// Returns `false` when the sketch is shutting down and nothing was drawn.
    pub fn frame(&mut self, now: Instant) -> Result<bool, AvourError> {
        if self.is_exiting() {
            return Ok(false);
        }
        self.avour.clear_commands();

        self.avour.begin_phase(Phase::Drawing);
        let result = self.sketch.draw(&mut self.avour);
        self.avour.end_phase();
        result.context("draw() failed")?;

        self.fps.record(now);
        if self.avour.config().show_fps {
            self.avour.push_command(self.fps.overlay());
        }
        Ok(true)
    }

    /// Run one physics tick. Key hold counters advance before `update()`.
    pub fn physics_tick(&mut self, dt: f32) -> Result<(), AvourError> {
        if self.is_exiting() {
            return Ok(());
        }
        self.avour.tick_keys();

        self.avour.begin_phase(Phase::Physics);
        let result = self.sketch.update(&mut self.avour, dt);
        self.avour.end_phase();
        result.context("update() failed")?;
        Ok(())
    }

    pub fn key_down(&mut self, key: &str) -> Result<(), AvourError> {
        if self.is_exiting() {
            return Ok(());
        }
        self.avour.press_key(key);
        self.sketch
            .on_keydown(&mut self.avour, key)
            .context("on_keydown() failed")?;
        Ok(())
    }

    pub fn key_up(&mut self, key: &str) -> Result<(), AvourError> {
        if self.is_exiting() {
            return Ok(());
        }
        self.avour.release_key(key);
        self.sketch
            .on_keyup(&mut self.avour, key)
            .context("on_keyup() failed")?;
        Ok(())
    }

    /// Pointer moved to `screen`. Reported as a drag while any button is held.
    pub fn mouse_moved(&mut self, screen: Coord) -> Result<(), AvourError> {
        self.cursor = screen;
        if self.is_exiting() {
            return Ok(());
        }
        let pos = self.avour.screen_to_local(screen);
        match self.held_buttons.last().copied() {
            Some(button) => self
                .sketch
                .on_mousedrag(&mut self.avour, pos, button)
                .context("on_mousedrag() failed")?,
            None => self
                .sketch
                .on_mousemove(&mut self.avour, pos)
                .context("on_mousemove() failed")?,
        }
        Ok(())
    }

    pub fn mouse_down(&mut self, button: &'static str) -> Result<(), AvourError> {
        if !self.held_buttons.contains(&button) {
            self.held_buttons.push(button);
        }
        if self.is_exiting() {
            return Ok(());
        }
        let pos = self.avour.screen_to_local(self.cursor);
        self.sketch
            .on_mousedown(&mut self.avour, pos, button)
            .context("on_mousedown() failed")?;
        Ok(())
    }

    pub fn mouse_up(&mut self, button: &'static str) -> Result<(), AvourError> {
        self.held_buttons.retain(|held| *held != button);
        if self.is_exiting() {
            return Ok(());
        }
        let pos = self.avour.screen_to_local(self.cursor);
        self.sketch
            .on_mouseup(&mut self.avour, pos, button)
            .context("on_mouseup() failed")?;
        Ok(())
    }

    pub fn focus(&mut self, focused: bool) -> Result<(), AvourError> {
        if self.is_exiting() {
            return Ok(());
        }
        if focused {
            self.sketch
                .on_activate(&mut self.avour)
                .context("on_activate() failed")?;
        } else {
            // Releases are not delivered to unfocused windows
            self.held_buttons.clear();
            self.sketch
                .on_deactivate(&mut self.avour)
                .context("on_deactivate() failed")?;
        }
        Ok(())
    }

    pub fn resized(&mut self, screen_size: (u32, u32)) {
        self.avour.set_screen_size(screen_size);
    }

    pub fn close_requested(&mut self) {
        self.avour.exit();
    }
}

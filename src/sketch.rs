//! The `Sketch` trait: user callbacks invoked by the event loop.
//!
//! Every hook has a no-op default, so a sketch only implements what it
//! needs. Hooks receive the facade explicitly and may call drawing
//! primitives (inside `draw` only), change rates, or request `exit()`.
//! Returning an error stops the loop and surfaces the error from
//! [`crate::Avour::run`].

use crate::app::Avour;
use crate::canvas::Coord;
use anyhow::Result;

pub trait Sketch {
    /// Called once after the window has been created.
    fn setup(&mut self, _app: &mut Avour) -> Result<()> {
        Ok(())
    }

    /// Called once per scheduled frame. The only hook where drawing is allowed.
    fn draw(&mut self, _app: &mut Avour) -> Result<()> {
        Ok(())
    }

    /// Called once per physics tick with the tick interval in seconds.
    fn update(&mut self, _app: &mut Avour, _dt: f32) -> Result<()> {
        Ok(())
    }

    fn on_keydown(&mut self, _app: &mut Avour, _key: &str) -> Result<()> {
        Ok(())
    }

    fn on_keyup(&mut self, _app: &mut Avour, _key: &str) -> Result<()> {
        Ok(())
    }

    /// Pointer moved with no button held. `pos` is in local coordinates.
    fn on_mousemove(&mut self, _app: &mut Avour, _pos: Coord) -> Result<()> {
        Ok(())
    }

    /// Pointer moved while `button` is held.
    fn on_mousedrag(&mut self, _app: &mut Avour, _pos: Coord, _button: &str) -> Result<()> {
        Ok(())
    }

    fn on_mousedown(&mut self, _app: &mut Avour, _pos: Coord, _button: &str) -> Result<()> {
        Ok(())
    }

    fn on_mouseup(&mut self, _app: &mut Avour, _pos: Coord, _button: &str) -> Result<()> {
        Ok(())
    }

    /// The window gained focus.
    fn on_activate(&mut self, _app: &mut Avour) -> Result<()> {
        Ok(())
    }

    /// The window lost focus.
    fn on_deactivate(&mut self, _app: &mut Avour) -> Result<()> {
        Ok(())
    }
}

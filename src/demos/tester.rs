//! Input tester: a circle under the pointer, a triangle anchored at the
//! centre and a readout of held keys and buttons.

use crate::app::{Avour, TextOptions};
use crate::canvas::Coord;
use crate::sketch::Sketch;
use avour_render::{AnchorX, AnchorY};

#[derive(Debug, Default)]
pub struct Tester {
    pointer: Coord,
    buttons: Vec<String>,
}

impl Tester {
    pub fn new() -> Self {
        Self::default()
    }

    /// Status line listing held keys (with hold ticks) and mouse buttons.
    pub fn status(&self, app: &Avour) -> String {
        let mut keys: Vec<String> = app
            .keys_active()
            .iter()
            .map(|(key, ticks)| format!("{key}:{ticks}"))
            .collect();
        keys.sort();
        format!(
            "keys [{}]  buttons [{}]  pos ({:.0}, {:.0})",
            keys.join(" "),
            self.buttons.join(" "),
            self.pointer.0,
            self.pointer.1
        )
    }
}

impl Sketch for Tester {
    fn setup(&mut self, app: &mut Avour) -> anyhow::Result<()> {
        app.set_frame_rate(80)?;
        app.set_physics_rate(120)?;
        let (width, height) = app.get_screen_size();
        app.translate((width as f32 / 2.0, height as f32 / 2.0));
        Ok(())
    }

    fn draw(&mut self, app: &mut Avour) -> anyhow::Result<()> {
        app.background(100)?;

        app.fill(true);
        app.color((50, 180, 30));
        app.circle(self.pointer, 50.0)?;

        app.thickness(3.0);
        app.fill(false);
        app.color((150, 80, 30));
        app.polygon(&[self.pointer, (0.0, 0.0), (100.0, 100.0)])?;

        let (_, height) = app.get_screen_size();
        let status = self.status(app);
        app.color(255);
        app.text(
            &status,
            (10.0, height as f32 - 10.0),
            &TextOptions::default()
                .with_size(16.0)
                .with_anchor(AnchorX::Left, AnchorY::Top)
                .in_screen_coordinates(),
        )?;
        Ok(())
    }

    fn on_keydown(&mut self, app: &mut Avour, key: &str) -> anyhow::Result<()> {
        log::debug!("Key down: {}", key);
        if key == "C" || key == "ESCAPE" {
            app.exit();
        }
        Ok(())
    }

    fn on_mousemove(&mut self, _app: &mut Avour, pos: Coord) -> anyhow::Result<()> {
        self.pointer = pos;
        Ok(())
    }

    fn on_mousedrag(&mut self, _app: &mut Avour, pos: Coord, _button: &str) -> anyhow::Result<()> {
        self.pointer = pos;
        Ok(())
    }

    fn on_mousedown(&mut self, _app: &mut Avour, pos: Coord, button: &str) -> anyhow::Result<()> {
        self.pointer = pos;
        self.buttons.push(button.to_string());
        Ok(())
    }

    fn on_mouseup(&mut self, _app: &mut Avour, _pos: Coord, button: &str) -> anyhow::Result<()> {
        self.buttons.retain(|b| b != button);
        Ok(())
    }

    fn on_deactivate(&mut self, _app: &mut Avour) -> anyhow::Result<()> {
        self.buttons.clear();
        Ok(())
    }
}

//! Tour of the drawing primitives, animated from the physics loop.

use crate::app::{Avour, TextOptions};
use crate::sketch::Sketch;
use crate::utils::math::cubic_bezier;
use crate::utils::{SpriteBody, TimeLogger, Vector2D};
use avour_render::{AnchorX, AnchorY};
use std::f32::consts::{PI, TAU};

const CELL: f32 = 200.0;
const LABEL_SIZE: f32 = 14.0;

pub struct Shapes {
    /// Radians, advanced by `update`
    phase: f32,
    sprite: SpriteBody,
    timings: TimeLogger,
}

impl Default for Shapes {
    fn default() -> Self {
        Self::new()
    }
}

impl Shapes {
    pub fn new() -> Self {
        let mut sprite = SpriteBody::new();
        sprite.add_rect((0.0, 0.0), 60.0, 20.0, true, (200, 60, 60));
        sprite.add_rect((0.0, 20.0), 20.0, 20.0, true, (240, 200, 40));
        sprite.add_rect((-25.0, -15.0), 10.0, 10.0, true, (60, 60, 200));
        sprite.add_rect((25.0, -15.0), 10.0, 10.0, true, (60, 60, 200));
        Self {
            phase: 0.0,
            sprite,
            timings: TimeLogger::new(),
        }
    }

    pub fn phase(&self) -> f32 {
        self.phase
    }

    fn label(app: &mut Avour, text: &str, x: f32, y: f32) -> anyhow::Result<()> {
        app.push(false);
        app.color(220);
        app.text(
            text,
            (x, y - CELL / 2.0 + 10.0),
            &TextOptions::default()
                .with_size(LABEL_SIZE)
                .with_anchor(AnchorX::Center, AnchorY::Bottom),
        )?;
        app.pop();
        Ok(())
    }

    fn draw_cells(&mut self, app: &mut Avour) -> anyhow::Result<()> {
        let wobble = self.phase.sin();

        // row 1: filled shapes
        let y = CELL * 2.5;
        app.fill(true);
        app.color((230, 90, 70));
        app.circle((CELL * 0.5, y), 50.0 + 10.0 * wobble)?;
        Self::label(app, "circle", CELL * 0.5, y)?;

        app.color((70, 160, 230));
        app.ellipse((CELL * 1.5, y), 70.0, 35.0 + 15.0 * wobble)?;
        Self::label(app, "ellipse", CELL * 1.5, y)?;

        app.color((240, 200, 60));
        app.sector((CELL * 2.5, y), 60.0, self.phase, PI * 1.5)?;
        Self::label(app, "sector", CELL * 2.5, y)?;

        app.color((120, 220, 120));
        app.rect((CELL * 3.5 - 50.0, y + 40.0), 100.0, 80.0)?;
        Self::label(app, "rect", CELL * 3.5, y)?;

        app.color((200, 120, 220));
        let hexagon: Vec<_> = (0..6)
            .map(|i| {
                let a = self.phase + i as f32 * TAU / 6.0;
                (CELL * 4.5 + 55.0 * a.cos(), y + 55.0 * a.sin())
            })
            .collect();
        app.polygon(&hexagon)?;
        Self::label(app, "polygon", CELL * 4.5, y)?;

        // row 2: outlines and curves
        let y = CELL * 1.5;
        app.fill(false);
        app.thickness(3.0);
        app.color((230, 90, 70));
        app.circle((CELL * 0.5, y), 50.0)?;
        Self::label(app, "outline", CELL * 0.5, y)?;

        app.color((70, 160, 230));
        app.arc((CELL * 1.5, y), 50.0, -self.phase, PI, true)?;
        Self::label(app, "arc", CELL * 1.5, y)?;

        app.color((240, 200, 60));
        let controls = [
            (CELL * 2.5 - 70.0, y - 40.0),
            (CELL * 2.5 - 20.0, y + 60.0 * wobble),
            (CELL * 2.5 + 20.0, y - 60.0 * wobble),
            (CELL * 2.5 + 70.0, y + 40.0),
        ];
        app.bezier(&controls, 1.0)?;
        Self::label(app, "bezier", CELL * 2.5, y)?;

        app.color((120, 220, 120));
        let zigzag: Vec<_> = (0..6)
            .map(|i| (CELL * 3.5 - 60.0 + i as f32 * 24.0, y + if i % 2 == 0 { -30.0 } else { 30.0 }))
            .collect();
        app.lines(&zigzag, false, false)?;
        Self::label(app, "lines", CELL * 3.5, y)?;

        app.color((200, 120, 220));
        let p = cubic_bezier(
            (CELL * 4.5 - 60.0, y),
            (CELL * 4.5 - 30.0, y + 60.0),
            (CELL * 4.5 + 30.0, y - 60.0),
            (CELL * 4.5 + 60.0, y),
            24,
        );
        app.lines(&p, false, true)?;
        Self::label(app, "multiline", CELL * 4.5, y)?;

        // row 3: transforms
        let y = CELL * 0.5;
        // translate replaces the offset, so the column margin is re-added
        let (margin, _) = app.draw_state().translate;
        app.push(false);
        app.translate((margin + CELL * 0.5, y));
        app.scale(1.0 + 0.3 * wobble)?;
        app.fill(true);
        app.color(255);
        app.rect((-30.0, 30.0), 60.0, 60.0)?;
        app.pop();
        Self::label(app, "scale", CELL * 0.5, y)?;

        app.push(true);
        app.translate((margin + CELL * 1.5, -y));
        app.invert_y_axis(true);
        app.color((255, 160, 0));
        app.line((-50.0, -40.0), (50.0, 40.0))?;
        app.pop();
        Self::label(app, "inverted y", CELL * 1.5, y)?;

        self.sprite.position = Vector2D::new(CELL * 2.5, y);
        self.sprite.angle = self.phase;
        self.sprite.draw(app, true, true)?;
        Self::label(app, "sprite", CELL * 2.5, y)?;
        Ok(())
    }
}

impl Sketch for Shapes {
    fn setup(&mut self, app: &mut Avour) -> anyhow::Result<()> {
        let (width, _) = app.get_screen_size();
        // five columns of CELL pixels, centred
        let margin = (width as f32 - CELL * 5.0) / 2.0;
        app.translate((margin.max(0.0), 0.0));
        Ok(())
    }

    fn draw(&mut self, app: &mut Avour) -> anyhow::Result<()> {
        self.timings.start("draw");
        app.background((30, 30, 40))?;
        let result = self.draw_cells(app);
        self.timings.end("draw");
        result
    }

    fn update(&mut self, _app: &mut Avour, dt: f32) -> anyhow::Result<()> {
        self.phase = (self.phase + dt) % TAU;
        Ok(())
    }

    fn on_keydown(&mut self, app: &mut Avour, key: &str) -> anyhow::Result<()> {
        match key {
            "Q" | "ESCAPE" => {
                log::info!("Shapes timings:\n{}", self.timings.describe());
                app.exit();
            }
            "SPACE" => self.phase = 0.0,
            _ => {}
        }
        Ok(())
    }
}

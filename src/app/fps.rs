//! Measured frame rate for the on-screen counter.

use avour_render::{AnchorX, AnchorY, Color, DrawCommand, TextCommand};
use std::time::{Duration, Instant};

/// How often the displayed value is refreshed
const UPDATE_PERIOD: Duration = Duration::from_millis(250);

const LABEL_POS: (f32, f32) = (10.0, 10.0);
const LABEL_SIZE: f32 = 24.0;
const LABEL_COLOR: Color = Color::rgba(127, 127, 127, 127);

/// Counts frames and averages them over [`UPDATE_PERIOD`] windows.
#[derive(Debug, Default)]
pub struct FpsCounter {
    window_start: Option<Instant>,
    frames: u32,
    fps: f32,
}

impl FpsCounter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one presented frame.
    pub fn record(&mut self, now: Instant) {
        let Some(start) = self.window_start else {
            self.window_start = Some(now);
            return;
        };
        self.frames += 1;
        let elapsed = now.saturating_duration_since(start);
        if elapsed >= UPDATE_PERIOD {
            self.fps = self.frames as f32 / elapsed.as_secs_f32();
            self.frames = 0;
            self.window_start = Some(now);
        }
    }

    pub fn fps(&self) -> f32 {
        self.fps
    }

    pub fn label(&self) -> String {
        format!("{:.2}", self.fps)
    }

    /// Overlay text drawn in the bottom-left corner after the sketch's `draw()`.
    pub fn overlay(&self) -> DrawCommand {
        DrawCommand::Text(TextCommand {
            text: self.label(),
            pos: LABEL_POS,
            font_name: "Arial".to_string(),
            font_size: LABEL_SIZE,
            anchor_x: AnchorX::Left,
            anchor_y: AnchorY::Baseline,
            bold: true,
            italic: false,
            multiline: false,
            color: LABEL_COLOR,
        })
    }
}

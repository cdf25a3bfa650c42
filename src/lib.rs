// Library exports for sketches, demos and tests
//
// avour is a small creative-coding facade: implement `Sketch`, hand it to
// `Avour::run`, and draw with background/fill/color/circle/... from inside
// the `draw` hook. Window, input and GPU work is delegated to winit, wgpu
// and egui.
//
// Coordinates are logical pixels with the origin in the bottom-left corner
// and y pointing up.

/// Application version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[macro_use]
pub mod debug;

pub mod app;
pub mod canvas;
pub mod cli;
pub mod demos;
pub mod error;
pub mod input;
pub mod sketch;
pub mod utils;

pub use app::{Avour, Driver, TextOptions};
pub use avour_config::Config;
pub use avour_render::{AnchorX, AnchorY, Color, DrawCommand, ShapeStyle};
pub use canvas::{Coord, DrawState};
pub use error::AvourError;
pub use sketch::Sketch;

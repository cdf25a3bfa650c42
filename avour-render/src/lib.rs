//! GPU rendering backend for the avour creative-coding facade.
//!
//! This crate turns a per-frame display list into pixels:
//!
//! - `Color` and the `DrawCommand` display list recorded by the facade
//! - Conversion of commands into egui shapes (`paint`)
//! - The wgpu surface + egui render pass (`Renderer`)

pub mod color;
pub mod command;
pub mod error;
pub mod paint;
pub mod renderer;

pub use color::Color;
pub use command::{AnchorX, AnchorY, DrawCommand, Point, ShapeStyle, TextCommand};
pub use error::RenderError;
pub use renderer::{Renderer, RendererOptions};

//! Typed error type for the facade.
//!
//! Configuration and usage errors fail fast with a descriptive variant;
//! windowing and GPU errors are passed through from winit / avour-render.

use avour_config::ConfigError;
use avour_render::RenderError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AvourError {
    /// The configuration failed validation.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// A frame or physics rate of zero was requested.
    #[error("invalid {what} rate {value}: must be greater than 0")]
    InvalidRate { what: &'static str, value: u32 },

    /// A zero, infinite or NaN scale was requested.
    #[error("invalid scale {0}: must be finite and non-zero")]
    InvalidScale(f32),

    /// A drawing primitive was called before the window exists.
    #[error("not ready: the window has not been created yet")]
    NotReady,

    /// A drawing primitive was called from a hook other than `draw()`.
    #[error("drawing is only allowed inside draw()")]
    OutsideFrame,

    /// A drawing primitive was called from the physics `update()` hook.
    #[error("drawing objects inside the physics loop is not permitted")]
    DrawInsidePhysics,

    /// The winit event loop could not be created or failed while running.
    #[error("event loop error: {0}")]
    EventLoop(#[from] winit::error::EventLoopError),

    /// The OS refused to create the window.
    #[error("window creation failed: {0}")]
    Window(#[from] winit::error::OsError),

    #[error(transparent)]
    Render(#[from] RenderError),

    /// The runtime used for async GPU initialisation could not start.
    #[error("async runtime error: {0}")]
    Runtime(#[from] std::io::Error),

    /// A sketch hook returned an error.
    #[error(transparent)]
    Sketch(#[from] anyhow::Error),
}

//! Typed error types for avour-render.
//!
//! Callers at the crate boundary can match on specific variants instead of
//! relying on opaque strings.

use thiserror::Error;

/// Top-level error type for the rendering backend.
#[derive(Debug, Error)]
pub enum RenderError {
    /// A suitable wgpu GPU adapter could not be found for the given surface.
    #[error("GPU adapter not found: no compatible GPU adapter available for this surface")]
    AdapterNotFound,

    /// The wgpu device could not be created.
    #[error("GPU device error: {0}")]
    DeviceError(String),

    /// The wgpu surface could not be created for the window.
    #[error("GPU surface creation failed: {0}")]
    SurfaceCreation(String),

    /// `Surface::get_current_texture()` failed with an unrecoverable error.
    #[error("GPU surface error: {0}")]
    Surface(#[from] wgpu::SurfaceError),
}

impl From<wgpu::CreateSurfaceError> for RenderError {
    fn from(e: wgpu::CreateSurfaceError) -> Self {
        RenderError::SurfaceCreation(e.to_string())
    }
}

impl From<wgpu::RequestDeviceError> for RenderError {
    fn from(e: wgpu::RequestDeviceError) -> Self {
        RenderError::DeviceError(e.to_string())
    }
}

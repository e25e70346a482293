//! Error types for the rendering harness.
//!
//! The matrix helpers in [`crate::mat4`] are total and never fail; everything
//! here comes from bringing up the window, the GPU, or reading a shader file.

use std::path::PathBuf;

use thiserror::Error;

/// Failures that stop the application from starting or continuing.
#[derive(Debug, Error)]
pub enum AppError {
    /// winit could not create its event loop
    #[error("Failed to create event loop: {0}")]
    EventLoop(#[from] winit::error::EventLoopError),

    /// The OS refused to open a window
    #[error("Unable to open window: {0}")]
    Window(#[from] winit::error::OsError),

    /// wgpu could not create a surface for the window
    #[error("Failed to create surface: {0}")]
    Surface(#[from] wgpu::CreateSurfaceError),

    /// No adapter compatible with the surface
    #[error("Failed to find a suitable GPU adapter: {0}")]
    Adapter(#[from] wgpu::RequestAdapterError),

    /// Device creation failed
    #[error("Failed to create device: {0}")]
    Device(#[from] wgpu::RequestDeviceError),

    /// A shader file could not be read
    #[error("Failed to read shader '{}': {source}", path.display())]
    ShaderIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Result alias for harness operations.
pub type AppResult<T> = Result<T, AppError>;

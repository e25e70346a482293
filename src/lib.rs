//! # GLprimer
//!
//! **A small rendering primer: one colored cube, spinning and orbiting.**
//!
//! The interesting part is [`mat4`], a handful of column-major 4×4 helpers
//! (identity, axis rotations, uniform scale, translation, multiply) that the
//! frame loop composes into a single world transform each frame:
//!
//! ```
//! use glprimer::mat4;
//!
//! let view = mat4::multiply(mat4::scale(0.05), mat4::rotate_x(std::f32::consts::FRAC_PI_4));
//! let t = 0.5;
//! let world = mat4::multiply(
//!     view,
//!     mat4::multiply(
//!         mat4::rotate_y(-t),
//!         mat4::multiply(mat4::translate(18.0, 0.0, 0.0), mat4::rotate_y(6.0 * t)),
//!     ),
//! );
//! assert_eq!(world.last_row(), [0.0, 0.0, 0.0, 1.0]);
//! ```
//!
//! Everything else is a thin harness over winit and wgpu: open a window,
//! upload the cube once, and every frame upload the transform, draw, present.
//!
//! ```no_run
//! use glprimer::{AppConfig, run_with_config};
//!
//! run_with_config(AppConfig::new().title("Primer").size(600, 600)).unwrap();
//! ```

mod animation;
mod app;
mod cube_pass;
mod error;
mod frame_stats;
mod gpu;
mod input;
pub mod mat4;
mod mesh;
mod shader;

pub use animation::OrbitAnimation;
pub use app::{AppConfig, LaunchOptions, run_with_config};
pub use cube_pass::{CubePass, CubeUniforms};
pub use error::{AppError, AppResult};
pub use frame_stats::FrameStats;
pub use gpu::GpuContext;
pub use input::Input;
pub use mat4::Matrix4;
pub use mesh::{Geometry, Mesh, Vertex};
pub use shader::{DEFAULT_SHADER, ShaderSource};

// Re-export glam so callers can convert to and from Matrix4 without a direct dependency.
pub use glam;

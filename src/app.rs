use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;
use winit::application::ApplicationHandler;
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::keyboard::KeyCode;
use winit::window::{Window, WindowAttributes, WindowId};

use crate::animation::OrbitAnimation;
use crate::cube_pass::{CubePass, CubeUniforms};
use crate::error::{AppError, AppResult};
use crate::frame_stats::FrameStats;
use crate::gpu::GpuContext;
use crate::input::Input;
use crate::mesh::{Geometry, Mesh};
use crate::shader::ShaderSource;

/// Configuration for the primer window and scene.
#[derive(Clone, Debug)]
pub struct AppConfig {
    pub title: String,
    pub width: u32,
    pub height: u32,
    /// Clear color as linear RGBA.
    pub clear_color: [f64; 4],
    /// Wait for the display refresh between frames.
    pub vsync: bool,
    /// Which faces to cull; `None` draws both sides.
    pub cull_mode: Option<wgpu::Face>,
    /// WGSL file to load (and watch) instead of the built-in shader.
    pub shader_path: Option<PathBuf>,
    /// What to draw; the cube unless replaced.
    pub geometry: Geometry,
    pub animation: OrbitAnimation,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            title: "GLprimer".to_string(),
            width: 512,
            height: 512,
            clear_color: [0.3, 0.3, 0.3, 0.0],
            vsync: false,
            cull_mode: Some(wgpu::Face::Back),
            shader_path: None,
            geometry: Geometry::cube(),
            animation: OrbitAnimation::default(),
        }
    }
}

impl AppConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn size(mut self, width: u32, height: u32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    pub fn clear_color(mut self, r: f64, g: f64, b: f64, a: f64) -> Self {
        self.clear_color = [r, g, b, a];
        self
    }

    pub fn vsync(mut self, vsync: bool) -> Self {
        self.vsync = vsync;
        self
    }

    pub fn cull_mode(mut self, cull_mode: Option<wgpu::Face>) -> Self {
        self.cull_mode = cull_mode;
        self
    }

    pub fn shader_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.shader_path = Some(path.into());
        self
    }

    pub fn geometry(mut self, geometry: Geometry) -> Self {
        self.geometry = geometry;
        self
    }

    pub fn animation(mut self, animation: OrbitAnimation) -> Self {
        self.animation = animation;
        self
    }
}

/// What the command line asked for: a window configuration plus whether to
/// dump the default matrices to stdout first.
#[derive(Clone, Debug, Default)]
pub struct LaunchOptions {
    pub config: AppConfig,
    pub print_matrices: bool,
}

impl LaunchOptions {
    /// Parse arguments (without the program name).
    ///
    /// Recognized flags are `--print`, `--vsync`, `--no-cull` and
    /// `--triangle`. Any other argument starting with `--` is logged and ignored; the remaining
    /// argument is taken as the shader path, the last one winning.
    pub fn from_args<I>(args: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        let mut options = Self::default();
        for arg in args {
            let arg: String = arg.into();
            match arg.as_str() {
                "--print" => options.print_matrices = true,
                "--vsync" => options.config.vsync = true,
                "--no-cull" => options.config.cull_mode = None,
                "--triangle" => options.config.geometry = Geometry::triangle(),
                flag if flag.starts_with("--") => log::warn!("Ignoring unknown option {flag}"),
                _ => options.config.shader_path = Some(PathBuf::from(&arg)),
            }
        }
        options
    }
}

/// Open the window and render until it is closed or Escape is pressed.
///
/// Returns the error that stopped startup, if any.
pub fn run_with_config(config: AppConfig) -> AppResult<()> {
    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut app = PrimerApp::Pending { config };
    event_loop.run_app(&mut app)?;

    match app {
        PrimerApp::Failed(e) => Err(e),
        _ => Ok(()),
    }
}

enum PrimerApp {
    Pending { config: AppConfig },
    Running(Box<Running>),
    Failed(AppError),
}

struct Running {
    window: Arc<Window>,
    gpu: GpuContext,
    mesh: Mesh,
    pass: CubePass,
    shader: ShaderSource,
    animation: OrbitAnimation,
    stats: FrameStats,
    input: Input,
    title: String,
    clear_color: wgpu::Color,
    start_time: Instant,
}

impl Running {
    fn start(event_loop: &ActiveEventLoop, config: &AppConfig) -> AppResult<Self> {
        let window_attrs = WindowAttributes::default()
            .with_title(&config.title)
            .with_inner_size(winit::dpi::LogicalSize::new(config.width, config.height));

        let window = Arc::new(event_loop.create_window(window_attrs)?);
        let gpu = GpuContext::new(window.clone(), config.vsync)?;

        let shader = ShaderSource::from_file_or_default(config.shader_path.as_deref());
        match shader.path() {
            Some(path) => log::info!("Shader: {} (watching for changes)", path.display()),
            None => log::info!("Shader: built-in"),
        }
        let pass = CubePass::new(&gpu, shader.source(), config.cull_mode);
        let mesh = Mesh::new(&gpu, &config.geometry);

        let [r, g, b, a] = config.clear_color;
        let start_time = Instant::now();

        Ok(Self {
            window,
            gpu,
            mesh,
            pass,
            shader,
            animation: config.animation,
            stats: FrameStats::new(0.0),
            input: Input::new(),
            title: config.title.clone(),
            clear_color: wgpu::Color { r, g, b, a },
            start_time,
        })
    }

    fn update(&mut self) -> f32 {
        let time = self.start_time.elapsed().as_secs_f64();

        self.stats.tick(time);
        if self.stats.just_refreshed() {
            self.window.set_title(&self.stats.title(&self.title));
        }

        if self.shader.check_reload() {
            self.pass.reload(&self.gpu, self.shader.source());
        }

        time as f32
    }

    fn render(&self, time: f32) -> Result<(), wgpu::SurfaceError> {
        let uniforms = CubeUniforms::new(self.animation.world_transform(time), time);

        let output = self.gpu.surface.get_current_texture()?;
        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let mut encoder = self
            .gpu
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Frame Encoder"),
            });

        {
            let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Cube Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(self.clear_color),
                        store: wgpu::StoreOp::Store,
                    },
                    depth_slice: None,
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
            });

            self.pass
                .render(&self.gpu, &mut render_pass, &self.mesh, &uniforms);
        }

        self.gpu.queue.submit(std::iter::once(encoder.finish()));
        output.present();
        Ok(())
    }
}

impl ApplicationHandler for PrimerApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        let PrimerApp::Pending { config } = self else {
            return;
        };

        match Running::start(event_loop, config) {
            Ok(running) => {
                running.window.request_redraw();
                *self = PrimerApp::Running(Box::new(running));
            }
            Err(e) => {
                log::error!("{e}. Terminating.");
                *self = PrimerApp::Failed(e);
                event_loop.exit();
            }
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        let PrimerApp::Running(app) = self else {
            return;
        };

        app.input.handle_event(&event);

        match event {
            WindowEvent::CloseRequested => {
                event_loop.exit();
            }
            WindowEvent::Resized(size) => {
                app.gpu.resize(size.width, size.height);
            }
            WindowEvent::RedrawRequested => {
                let time = app.update();

                match app.render(time) {
                    Ok(()) => {}
                    Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                        log::debug!("Surface lost or outdated, reconfiguring");
                        app.gpu.reconfigure();
                    }
                    Err(wgpu::SurfaceError::OutOfMemory) => {
                        log::error!("Out of GPU memory, exiting");
                        event_loop.exit();
                        return;
                    }
                    Err(e) => log::warn!("Skipping frame: {e}"),
                }

                if app.input.key_down(KeyCode::Escape) {
                    event_loop.exit();
                    return;
                }

                app.window.request_redraw();
            }
            _ => {}
        }
    }

    fn exiting(&mut self, _event_loop: &ActiveEventLoop) {
        if let PrimerApp::Running(app) = self {
            log::info!(
                "Exiting after {:.1}s (last estimate {:.1} FPS)",
                app.start_time.elapsed().as_secs_f32(),
                app.stats.fps()
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.title, "GLprimer");
        assert_eq!(config.width, config.height);
        assert_eq!(config.clear_color, [0.3, 0.3, 0.3, 0.0]);
        assert!(!config.vsync);
        assert_eq!(config.cull_mode, Some(wgpu::Face::Back));
        assert!(config.shader_path.is_none());
        assert_eq!(config.geometry.indices.len(), 36);
    }

    #[test]
    fn test_config_builder() {
        let config = AppConfig::new()
            .title("Orbit")
            .size(800, 600)
            .vsync(true)
            .cull_mode(None)
            .shader_path("shaders/custom.wgsl")
            .animation(OrbitAnimation::new().spin_rate(2.0));
        assert_eq!(config.title, "Orbit");
        assert_eq!((config.width, config.height), (800, 600));
        assert!(config.vsync);
        assert_eq!(config.cull_mode, None);
        assert_eq!(
            config.shader_path.as_deref(),
            Some(std::path::Path::new("shaders/custom.wgsl"))
        );
        assert_eq!(config.animation.spin_rate, 2.0);
    }

    #[test]
    fn test_launch_options_flags() {
        let options = LaunchOptions::from_args(["--vsync", "--no-cull", "--print", "--triangle"]);
        assert!(options.print_matrices);
        assert_eq!(options.config.geometry.indices, vec![0, 1, 2]);
        assert!(options.config.vsync);
        assert_eq!(options.config.cull_mode, None);
        assert!(options.config.shader_path.is_none());
    }

    #[test]
    fn test_launch_options_defaults_without_args() {
        let options = LaunchOptions::from_args(Vec::<String>::new());
        assert!(!options.print_matrices);
        assert!(!options.config.vsync);
        assert_eq!(options.config.cull_mode, Some(wgpu::Face::Back));
        assert!(options.config.shader_path.is_none());
    }

    #[test]
    fn test_launch_options_unknown_flag_is_not_a_shader() {
        let options = LaunchOptions::from_args(["--vsnyc", "--help"]);
        assert!(options.config.shader_path.is_none());
        assert!(!options.config.vsync);

        let options = LaunchOptions::from_args(["--frobnicate", "my_shader.wgsl"]);
        assert_eq!(
            options.config.shader_path.as_deref(),
            Some(std::path::Path::new("my_shader.wgsl"))
        );
    }
}

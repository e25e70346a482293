//! The render pass that draws the animated mesh.
//!
//! [`CubePass`] owns one pipeline and one uniform buffer. Each frame the host
//! hands it the world transform and elapsed time; the pass uploads them and
//! issues a single indexed draw.
//!
//! # Bindings
//!
//! - **Group 0, binding 0**: [`CubeUniforms`] (transform, time)
//!
//! # Pipeline Configuration
//!
//! - Triangle list, counter-clockwise front faces
//! - Back-face culling by default (see [`CubePass::new`])
//! - No depth attachment. Culling leaves one non-overlapping layer of faces,
//!   so draw order never matters. Clip space is left-handed, which means the
//!   counter-clockwise faces that survive are the cube's far side.
//!
//! # Shader Requirements
//!
//! The WGSL module needs `vs` and `fs` entry points, reads [`Vertex`] attributes
//! at locations 0 and 1, and declares:
//!
//! ```wgsl
//! struct Uniforms {
//!     transform: mat4x4f,
//!     time: f32,
//! }
//! @group(0) @binding(0) var<uniform> u: Uniforms;
//! ```

use crate::gpu::GpuContext;
use crate::mat4::Matrix4;
use crate::mesh::{Mesh, Vertex};

/// Per-frame uniforms, laid out to match the WGSL struct (80 bytes).
#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct CubeUniforms {
    /// Object-to-clip transform, column-major.
    pub transform: Matrix4,
    /// Elapsed time in seconds since application start.
    pub time: f32,
    /// Padding for 16-byte alignment.
    pub _padding: [f32; 3],
}

impl CubeUniforms {
    pub fn new(transform: Matrix4, time: f32) -> Self {
        Self {
            transform,
            time,
            _padding: [0.0; 3],
        }
    }
}

pub struct CubePass {
    pipeline: wgpu::RenderPipeline,
    pipeline_layout: wgpu::PipelineLayout,
    uniform_buffer: wgpu::Buffer,
    uniform_bind_group: wgpu::BindGroup,
    cull_mode: Option<wgpu::Face>,
}

impl CubePass {
    /// Creates the pass and compiles `shader`.
    ///
    /// `cull_mode` of `Some(Face::Back)` gives the usual solid look; `None`
    /// draws every triangle regardless of winding.
    pub fn new(gpu: &GpuContext, shader: &str, cull_mode: Option<wgpu::Face>) -> Self {
        let device = &gpu.device;

        let uniform_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("Cube Uniforms"),
            size: std::mem::size_of::<CubeUniforms>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let uniform_bind_group_layout =
            device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                label: Some("Cube Bind Group Layout"),
                entries: &[wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::VERTEX | wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Uniform,
                        has_dynamic_offset: false,
                        min_binding_size: None,
                    },
                    count: None,
                }],
            });

        let uniform_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Cube Bind Group"),
            layout: &uniform_bind_group_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: uniform_buffer.as_entire_binding(),
            }],
        });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("Cube Pipeline Layout"),
            bind_group_layouts: &[&uniform_bind_group_layout],
            push_constant_ranges: &[],
        });

        let pipeline = Self::create_pipeline(gpu, &pipeline_layout, shader, cull_mode);

        Self {
            pipeline,
            pipeline_layout,
            uniform_buffer,
            uniform_bind_group,
            cull_mode,
        }
    }

    fn create_pipeline(
        gpu: &GpuContext,
        layout: &wgpu::PipelineLayout,
        shader: &str,
        cull_mode: Option<wgpu::Face>,
    ) -> wgpu::RenderPipeline {
        let device = &gpu.device;

        let module = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("Cube Shader"),
            source: wgpu::ShaderSource::Wgsl(shader.into()),
        });

        device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("Cube Pipeline"),
            layout: Some(layout),
            vertex: wgpu::VertexState {
                module: &module,
                entry_point: Some("vs"),
                buffers: &[Vertex::LAYOUT],
                compilation_options: Default::default(),
            },
            fragment: Some(wgpu::FragmentState {
                module: &module,
                entry_point: Some("fs"),
                targets: &[Some(wgpu::ColorTargetState {
                    format: gpu.config.format,
                    blend: Some(wgpu::BlendState::REPLACE),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: Default::default(),
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                cull_mode,
                front_face: wgpu::FrontFace::Ccw,
                ..Default::default()
            },
            depth_stencil: None,
            multisample: wgpu::MultisampleState::default(),
            multiview: None,
            cache: None,
        })
    }

    /// Rebuilds the pipeline from new shader source.
    ///
    /// Validation errors are caught with an error scope; on failure the
    /// previous pipeline stays in place. Returns `true` if the new shader
    /// was accepted.
    pub fn reload(&mut self, gpu: &GpuContext, shader: &str) -> bool {
        gpu.device.push_error_scope(wgpu::ErrorFilter::Validation);
        let pipeline = Self::create_pipeline(gpu, &self.pipeline_layout, shader, self.cull_mode);
        let error = pollster::block_on(gpu.device.pop_error_scope());

        match error {
            Some(e) => {
                log::error!("Shader compilation failed, keeping previous version: {e}");
                false
            }
            None => {
                self.pipeline = pipeline;
                log::info!("Shader compiled successfully");
                true
            }
        }
    }

    /// Uploads `uniforms` and draws `mesh` into `render_pass`.
    pub fn render(
        &self,
        gpu: &GpuContext,
        render_pass: &mut wgpu::RenderPass,
        mesh: &Mesh,
        uniforms: &CubeUniforms,
    ) {
        gpu.queue.write_buffer(
            &self.uniform_buffer,
            0,
            bytemuck::cast_slice(std::slice::from_ref(uniforms)),
        );

        render_pass.set_pipeline(&self.pipeline);
        render_pass.set_bind_group(0, &self.uniform_bind_group, &[]);
        render_pass.set_vertex_buffer(0, mesh.vertex_buffer.slice(..));
        render_pass.set_index_buffer(mesh.index_buffer.slice(..), wgpu::IndexFormat::Uint32);
        render_pass.draw_indexed(0..mesh.index_count, 0, 0..1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mat4;

    #[test]
    fn test_uniform_size_matches_wgsl() {
        // mat4x4f (64) + f32, rounded up to the struct's 16-byte alignment.
        assert_eq!(std::mem::size_of::<CubeUniforms>(), 80);
    }

    #[test]
    fn test_uniform_bytes_start_with_transform() {
        let uniforms = CubeUniforms::new(mat4::translate(1.0, 2.0, 3.0), 4.5);
        let floats: &[f32] = bytemuck::cast_slice(std::slice::from_ref(&uniforms));
        assert_eq!(&floats[12..17], &[1.0, 2.0, 3.0, 1.0, 4.5]);
    }

    #[test]
    fn test_back_face_culling_keeps_far_side() {
        use crate::animation::OrbitAnimation;
        use crate::mesh::Geometry;

        // No face is edge-on at this time.
        let m = OrbitAnimation::default().world_transform(0.3);
        let (mut kept, mut culled) = (Vec::new(), Vec::new());

        for tri in Geometry::cube().triangles() {
            let [a, b, c] = tri.map(|[x, y, z]| mat4::transform(m, [x, y, z, 1.0]));
            // Signed area in NDC x/y: positive is counter-clockwise on screen.
            let area = (b[0] - a[0]) * (c[1] - a[1]) - (b[1] - a[1]) * (c[0] - a[0]);
            let depth = (a[2] + b[2] + c[2]) / 3.0;
            assert!(area.abs() > 1e-6, "edge-on triangle, area {area}");
            if area > 0.0 {
                kept.push(depth);
            } else {
                culled.push(depth);
            }
        }

        assert_eq!(kept.len(), 6);
        assert_eq!(culled.len(), 6);
        let mean = |v: &[f32]| v.iter().sum::<f32>() / v.len() as f32;
        // Larger z is farther from the viewer.
        assert!(mean(&kept) > mean(&culled));
    }
}

//! Static geometry and its GPU upload.
//!
//! - [`Vertex`]: position plus per-vertex color
//! - [`Geometry`]: CPU-side vertices and triangle indices (the cube, a triangle)
//! - [`Mesh`]: the same data uploaded into vertex and index buffers
//!
//! # Vertex Layout
//!
//! | Attribute | Format    | Offset | Shader Location |
//! |-----------|-----------|--------|-----------------|
//! | position  | Float32x3 | 0      | 0               |
//! | color     | Float32x3 | 12     | 1               |
//!
//! # Winding Order
//!
//! Front faces are counter-clockwise, matching the cull setup in
//! [`CubePass`](crate::CubePass).

use crate::gpu::GpuContext;

/// A vertex with a model-space position and an RGB color.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Vertex {
    pub position: [f32; 3],
    pub color: [f32; 3],
}

impl Vertex {
    /// The wgpu vertex buffer layout for [`Vertex`]: 24 bytes per vertex,
    /// position at location 0, color at location 1.
    pub const LAYOUT: wgpu::VertexBufferLayout<'static> = wgpu::VertexBufferLayout {
        array_stride: std::mem::size_of::<Vertex>() as u64,
        step_mode: wgpu::VertexStepMode::Vertex,
        attributes: &[
            // position
            wgpu::VertexAttribute {
                offset: 0,
                shader_location: 0,
                format: wgpu::VertexFormat::Float32x3,
            },
            // color
            wgpu::VertexAttribute {
                offset: 12,
                shader_location: 1,
                format: wgpu::VertexFormat::Float32x3,
            },
        ],
    };

    pub const fn new(position: [f32; 3], color: [f32; 3]) -> Self {
        Self { position, color }
    }
}

/// Vertex and index data before GPU upload.
#[derive(Clone, Debug)]
pub struct Geometry {
    pub vertices: Vec<Vertex>,
    pub indices: Vec<u32>,
}

impl Geometry {
    pub fn new(vertices: Vec<Vertex>, indices: Vec<u32>) -> Self {
        Self { vertices, indices }
    }

    /// A cube spanning -1..1 on every axis.
    ///
    /// Eight shared corners, one color per corner, twelve triangles.
    pub fn cube() -> Self {
        #[rustfmt::skip]
        let vertices = vec![
            Vertex::new([-1.0, -1.0, -1.0], [1.0, 0.0, 0.0]), // p0 red
            Vertex::new([-1.0, -1.0,  1.0], [0.0, 1.0, 0.0]), // p1 green
            Vertex::new([-1.0,  1.0,  1.0], [0.0, 0.0, 1.0]), // p2 blue
            Vertex::new([-1.0,  1.0, -1.0], [1.0, 0.5, 0.0]), // p3 orange
            Vertex::new([ 1.0, -1.0, -1.0], [0.0, 1.0, 0.0]), // p4 green
            Vertex::new([ 1.0, -1.0,  1.0], [0.5, 0.0, 1.0]), // p5 purple
            Vertex::new([ 1.0,  1.0,  1.0], [0.5, 0.5, 0.5]), // p6 gray
            Vertex::new([ 1.0,  1.0, -1.0], [1.0, 1.0, 1.0]), // p7 white
        ];

        #[rustfmt::skip]
        let indices: Vec<u32> = vec![
            0, 1, 3,  1, 2, 3, // -X
            4, 0, 7,  0, 3, 7, // -Z
            5, 4, 6,  4, 7, 6, // +X
            1, 5, 2,  5, 6, 2, // +Z
            3, 2, 7,  2, 6, 7, // +Y
            1, 0, 5,  0, 4, 5, // -Y
        ];

        Self::new(vertices, indices)
    }

    /// A single triangle in the z = 0 plane.
    pub fn triangle() -> Self {
        let vertices = vec![
            Vertex::new([-1.0, -1.0, 0.0], [1.0, 0.5, 0.0]),
            Vertex::new([1.0, -1.0, 0.0], [0.0, 1.0, 0.0]),
            Vertex::new([0.0, 1.0, 0.0], [0.5, 0.0, 1.0]),
        ];
        Self::new(vertices, vec![0, 1, 2])
    }

    /// Iterates triangles as triples of vertex positions.
    pub fn triangles(&self) -> impl Iterator<Item = [[f32; 3]; 3]> + '_ {
        self.indices.chunks_exact(3).map(|tri| {
            [
                self.vertices[tri[0] as usize].position,
                self.vertices[tri[1] as usize].position,
                self.vertices[tri[2] as usize].position,
            ]
        })
    }
}

/// GPU-resident geometry with vertex and index buffers.
#[derive(Debug)]
pub struct Mesh {
    pub(crate) vertex_buffer: wgpu::Buffer,
    pub(crate) index_buffer: wgpu::Buffer,
    /// The number of indices in the mesh (determines draw call size).
    pub(crate) index_count: u32,
}

impl Mesh {
    /// Uploads `geometry` into static vertex and index buffers.
    ///
    /// An empty geometry produces a mesh that draws nothing.
    pub fn new(gpu: &GpuContext, geometry: &Geometry) -> Self {
        use wgpu::util::DeviceExt;

        let vertex_buffer = gpu
            .device
            .create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("Mesh Vertex Buffer"),
                contents: bytemuck::cast_slice(&geometry.vertices),
                usage: wgpu::BufferUsages::VERTEX,
            });

        let index_buffer = gpu
            .device
            .create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("Mesh Index Buffer"),
                contents: bytemuck::cast_slice(&geometry.indices),
                usage: wgpu::BufferUsages::INDEX,
            });

        log::debug!(
            "Uploaded mesh: {} vertices, {} indices",
            geometry.vertices.len(),
            geometry.indices.len()
        );

        Self {
            vertex_buffer,
            index_buffer,
            index_count: geometry.indices.len() as u32,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;

    #[test]
    fn test_vertex_size_matches_layout() {
        assert_eq!(std::mem::size_of::<Vertex>(), 24);
        assert_eq!(Vertex::LAYOUT.array_stride, 24);
    }

    #[test]
    fn test_cube_counts() {
        let cube = Geometry::cube();
        assert_eq!(cube.vertices.len(), 8);
        assert_eq!(cube.indices.len(), 36);
        assert!(cube.indices.iter().all(|&i| (i as usize) < cube.vertices.len()));
    }

    #[test]
    fn test_cube_faces_wind_outward() {
        for [a, b, c] in Geometry::cube().triangles() {
            let (a, b, c) = (Vec3::from(a), Vec3::from(b), Vec3::from(c));
            let normal = (b - a).cross(c - a);
            let centroid = (a + b + c) / 3.0;
            assert!(
                normal.dot(centroid) > 0.0,
                "triangle {a} {b} {c} is wound clockwise from outside"
            );
        }
    }

    #[test]
    fn test_cube_corners_are_unit() {
        for v in Geometry::cube().vertices {
            assert!(v.position.iter().all(|c| c.abs() == 1.0));
        }
    }

    #[test]
    fn test_triangle_faces_viewer() {
        let tri = Geometry::triangle();
        assert_eq!(tri.indices, vec![0, 1, 2]);
        let [a, b, c] = tri.triangles().next().unwrap();
        let normal = (Vec3::from(b) - Vec3::from(a)).cross(Vec3::from(c) - Vec3::from(a));
        assert!(normal.z > 0.0);
        assert_eq!(tri.triangles().count(), 1);
    }
}

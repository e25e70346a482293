//! Column-major 4×4 transform matrices.
//!
//! [`Matrix4`] stores 16 floats in the same order the GPU expects for a
//! `mat4x4f` uniform: element (row `r`, column `c`) lives at index `4 * c + r`.
//! The translation sits in indices 12, 13 and 14, and every constructor in this
//! module produces an affine matrix whose last row is `(0, 0, 0, 1)`.
//!
//! # Conventions
//!
//! - Rotations are right-handed: a positive angle turns counter-clockwise when
//!   looking down the positive axis toward the origin. `rotate_z(π/2)` sends
//!   `+X` to `+Y`, `rotate_x(π/2)` sends `+Y` to `+Z`, `rotate_y(π/2)` sends
//!   `+Z` to `+X`.
//! - `multiply(a, b)` is the product `a · b`. Applied to a vector it runs `b`
//!   first and `a` second, so compositions read right to left.
//!
//! # Example
//!
//! ```
//! use glprimer::mat4;
//!
//! // Scale applied after the translation: (1,0,0) -> (2,0,0) -> (4,0,0)
//! let m = mat4::multiply(mat4::scale(2.0), mat4::translate(1.0, 0.0, 0.0));
//! let p = mat4::transform(m, [1.0, 0.0, 0.0, 1.0]);
//! assert_eq!(p, [4.0, 0.0, 0.0, 1.0]);
//! ```

use std::fmt;
use std::io::{self, Write};
use std::ops::{Index, Mul};

/// A 4×4 matrix in column-major order.
///
/// `#[repr(transparent)]` over `[f32; 16]`, so a `Matrix4` can be cast straight
/// into a uniform buffer with [`bytemuck`].
#[repr(transparent)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Matrix4(pub [f32; 16]);

impl Matrix4 {
    /// The multiplicative identity.
    pub const IDENTITY: Self = Self([
        1.0, 0.0, 0.0, 0.0, //
        0.0, 1.0, 0.0, 0.0, //
        0.0, 0.0, 1.0, 0.0, //
        0.0, 0.0, 0.0, 1.0, //
    ]);

    /// Element at `row`, `col` (both in `0..4`).
    pub fn get(&self, row: usize, col: usize) -> f32 {
        self.0[4 * col + row]
    }

    /// The bottom row `[m30, m31, m32, m33]`.
    pub fn last_row(&self) -> [f32; 4] {
        [self.0[3], self.0[7], self.0[11], self.0[15]]
    }

    /// Writes the matrix to `out` in row-major visual layout.
    pub fn write_to(&self, out: &mut impl Write) -> io::Result<()> {
        write!(out, "{self}")
    }
}

impl Default for Matrix4 {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Index<usize> for Matrix4 {
    type Output = f32;

    fn index(&self, index: usize) -> &f32 {
        &self.0[index]
    }
}

impl Mul for Matrix4 {
    type Output = Matrix4;

    fn mul(self, rhs: Matrix4) -> Matrix4 {
        multiply(self, rhs)
    }
}

// glam also stores Mat4 column-major, so these are plain copies.
impl From<glam::Mat4> for Matrix4 {
    fn from(m: glam::Mat4) -> Self {
        Self(m.to_cols_array())
    }
}

impl From<Matrix4> for glam::Mat4 {
    fn from(m: Matrix4) -> Self {
        glam::Mat4::from_cols_array(&m.0)
    }
}

/// Row-major layout: storage is transposed on the way out so the printed
/// rows read like the matrix on paper.
impl fmt::Display for Matrix4 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Matrix:")?;
        for row in 0..4 {
            writeln!(
                f,
                "{:6.2} {:6.2} {:6.2} {:6.2}",
                self.get(row, 0),
                self.get(row, 1),
                self.get(row, 2),
                self.get(row, 3)
            )?;
        }
        writeln!(f)
    }
}

/// Returns the identity matrix.
pub fn identity() -> Matrix4 {
    Matrix4::IDENTITY
}

/// Rotation about the X axis by `angle` radians.
#[rustfmt::skip]
pub fn rotate_x(angle: f32) -> Matrix4 {
    let (s, c) = angle.sin_cos();
    Matrix4([
        1.0, 0.0, 0.0, 0.0,
        0.0,   c,   s, 0.0,
        0.0,  -s,   c, 0.0,
        0.0, 0.0, 0.0, 1.0,
    ])
}

/// Rotation about the Y axis by `angle` radians.
#[rustfmt::skip]
pub fn rotate_y(angle: f32) -> Matrix4 {
    let (s, c) = angle.sin_cos();
    Matrix4([
          c, 0.0,  -s, 0.0,
        0.0, 1.0, 0.0, 0.0,
          s, 0.0,   c, 0.0,
        0.0, 0.0, 0.0, 1.0,
    ])
}

/// Rotation about the Z axis by `angle` radians.
#[rustfmt::skip]
pub fn rotate_z(angle: f32) -> Matrix4 {
    let (s, c) = angle.sin_cos();
    Matrix4([
          c,   s, 0.0, 0.0,
         -s,   c, 0.0, 0.0,
        0.0, 0.0, 1.0, 0.0,
        0.0, 0.0, 0.0, 1.0,
    ])
}

/// Uniform scale on x, y and z. Zero and negative factors are passed through.
pub fn scale(factor: f32) -> Matrix4 {
    let mut m = Matrix4::IDENTITY;
    m.0[0] = factor;
    m.0[5] = factor;
    m.0[10] = factor;
    m
}

/// Translation by `(dx, dy, dz)`.
pub fn translate(dx: f32, dy: f32, dz: f32) -> Matrix4 {
    let mut m = Matrix4::IDENTITY;
    m.0[12] = dx;
    m.0[13] = dy;
    m.0[14] = dz;
    m
}

/// The product `a · b`: transforms by `b`, then by `a`.
pub fn multiply(a: Matrix4, b: Matrix4) -> Matrix4 {
    let mut out = [0.0f32; 16];
    for col in 0..4 {
        for row in 0..4 {
            for k in 0..4 {
                out[4 * col + row] += a.0[4 * k + row] * b.0[4 * col + k];
            }
        }
    }
    Matrix4(out)
}

/// Matrix-vector product `m · v` for a homogeneous column vector.
pub fn transform(m: Matrix4, v: [f32; 4]) -> [f32; 4] {
    let mut out = [0.0f32; 4];
    for (row, slot) in out.iter_mut().enumerate() {
        *slot = (0..4).map(|k| m.0[4 * k + row] * v[k]).sum();
    }
    out
}

/// Prints the matrix to stdout in row-major layout.
pub fn print(m: &Matrix4) {
    if let Err(e) = m.write_to(&mut io::stdout().lock()) {
        log::warn!("Failed to print matrix: {e}");
    }
}

use std::f32::consts::FRAC_PI_4;

use crate::mat4::{self, Matrix4};

/// An object that spins about its own Y axis while orbiting the Y axis.
///
/// The world transform is composed right to left:
///
/// ```text
/// view · orbit(-t · orbit_rate) · (translate(orbit_radius, 0, 0) · spin(t · spin_rate))
/// ```
///
/// so the object first spins in place, is then pushed out to the orbit radius,
/// then carried around the orbit, and finally placed by the fixed view.
///
/// # Example
/// ```
/// use glprimer::{OrbitAnimation, mat4};
///
/// let anim = OrbitAnimation::new().view(mat4::identity()).orbit_radius(2.0);
/// let m = anim.world_transform(0.0);
/// assert_eq!(mat4::transform(m, [0.0, 0.0, 0.0, 1.0]), [2.0, 0.0, 0.0, 1.0]);
/// ```
#[derive(Clone, Copy, Debug)]
pub struct OrbitAnimation {
    /// Fixed transform applied last (scale and tilt of the whole scene).
    pub view: Matrix4,
    /// Distance from the orbit axis.
    pub orbit_radius: f32,
    /// Orbit speed in radians per second (positive = clockwise from above).
    pub orbit_rate: f32,
    /// Spin speed about the object's own axis in radians per second.
    pub spin_rate: f32,
}

impl Default for OrbitAnimation {
    fn default() -> Self {
        Self {
            view: mat4::multiply(mat4::scale(0.05), mat4::rotate_x(FRAC_PI_4)),
            orbit_radius: 18.0,
            orbit_rate: 1.0,
            spin_rate: 6.0,
        }
    }
}

impl OrbitAnimation {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the fixed view transform.
    pub fn view(mut self, view: Matrix4) -> Self {
        self.view = view;
        self
    }

    /// Set the distance from the orbit axis.
    pub fn orbit_radius(mut self, radius: f32) -> Self {
        self.orbit_radius = radius;
        self
    }

    /// Set the orbit speed in radians per second.
    pub fn orbit_rate(mut self, rate: f32) -> Self {
        self.orbit_rate = rate;
        self
    }

    /// Set the spin speed in radians per second.
    pub fn spin_rate(mut self, rate: f32) -> Self {
        self.spin_rate = rate;
        self
    }

    /// The object's own rotation at `time`.
    pub fn spin(&self, time: f32) -> Matrix4 {
        mat4::rotate_y(time * self.spin_rate)
    }

    /// The rotation carrying the object around the orbit at `time`.
    pub fn orbit(&self, time: f32) -> Matrix4 {
        mat4::rotate_y(-time * self.orbit_rate)
    }

    /// Model-to-clip transform at `time` seconds.
    pub fn world_transform(&self, time: f32) -> Matrix4 {
        let placed = mat4::multiply(
            mat4::translate(self.orbit_radius, 0.0, 0.0),
            self.spin(time),
        );
        mat4::multiply(self.view, mat4::multiply(self.orbit(time), placed))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::{FRAC_PI_2, PI};

    const EPS: f32 = 1e-4;

    fn assert_vec_near(a: [f32; 4], b: [f32; 4]) {
        for i in 0..4 {
            assert!((a[i] - b[i]).abs() < EPS, "{a:?} vs {b:?}");
        }
    }

    fn bare() -> OrbitAnimation {
        OrbitAnimation::new().view(mat4::identity()).orbit_radius(3.0)
    }

    #[test]
    fn test_center_follows_orbit() {
        let anim = bare().orbit_rate(1.0);
        let origin = [0.0, 0.0, 0.0, 1.0];
        assert_vec_near(mat4::transform(anim.world_transform(0.0), origin), [3.0, 0.0, 0.0, 1.0]);
        // rotate_y(-π/2) takes +X to +Z.
        assert_vec_near(
            mat4::transform(anim.world_transform(FRAC_PI_2), origin),
            [0.0, 0.0, 3.0, 1.0],
        );
        assert_vec_near(
            mat4::transform(anim.world_transform(PI), origin),
            [-3.0, 0.0, 0.0, 1.0],
        );
    }

    #[test]
    fn test_spin_does_not_move_center() {
        let still = bare().orbit_rate(0.0).spin_rate(5.0);
        for &t in &[0.0, 0.4, 2.0] {
            assert_vec_near(
                mat4::transform(still.world_transform(t), [0.0, 0.0, 0.0, 1.0]),
                [3.0, 0.0, 0.0, 1.0],
            );
        }
    }

    #[test]
    fn test_spin_turns_the_object() {
        let anim = bare().orbit_rate(0.0).spin_rate(1.0);
        // A point one unit along +Z in model space swings to +X after π/2.
        let p = mat4::transform(anim.world_transform(FRAC_PI_2), [0.0, 0.0, 1.0, 1.0]);
        assert_vec_near(p, [4.0, 0.0, 0.0, 1.0]);
    }

    #[test]
    fn test_matches_explicit_composition() {
        let anim = OrbitAnimation::default();
        let t = 1.3;
        let expected = anim.view
            * (mat4::rotate_y(-t) * (mat4::translate(18.0, 0.0, 0.0) * mat4::rotate_y(t * 6.0)));
        let got = anim.world_transform(t);
        for i in 0..16 {
            assert!((got[i] - expected[i]).abs() < 1e-6);
        }
    }

    #[test]
    fn test_default_fits_in_clip_space() {
        let anim = OrbitAnimation::default();
        for step in 0..64 {
            let m = anim.world_transform(step as f32 * 0.1);
            assert_eq!(m.last_row(), [0.0, 0.0, 0.0, 1.0]);
            for corner in crate::mesh::Geometry::cube().vertices {
                let [x, y, z] = corner.position;
                let p = mat4::transform(m, [x, y, z, 1.0]);
                assert!(p[..3].iter().all(|c| c.abs() <= 1.0), "{p:?} leaves clip space");
            }
        }
    }
}

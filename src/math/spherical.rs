//! Cartesian / spherical conversions.
//!
//! Angle convention:
//! - `theta`: azimuth on the xy-plane, measured from +x
//! - `phi`: inclination measured from +z
//!
//! Planar points degenerate to polar coordinates: `phi` is always zero
//! and the z-axis does not take part.

use super::{Dimensions, Vector2, Vector3};

/// Converts Cartesian coordinates to `(r, theta, phi)`.
///
/// `r` is the Euclidean norm over every axis of the point. A point at the
/// origin gets `phi = 0` instead of `NaN`.
#[must_use]
pub fn cartesian_to_spherical(dimensions: Dimensions, x: f64, y: f64, z: f64) -> (f64, f64, f64) {
    let theta = y.atan2(x);
    match dimensions {
        Dimensions::Two => (Vector2::new(x, y).norm(), theta, 0.0),
        Dimensions::Three => {
            let r = Vector3::new(x, y, z).norm();
            let phi = if r == 0.0 {
                0.0
            } else {
                (z / r).clamp(-1.0, 1.0).acos()
            };
            (r, theta, phi)
        }
    }
}

/// Converts `(r, theta, phi)` to Cartesian `(x, y, z)`.
#[must_use]
pub fn spherical_to_cartesian(
    dimensions: Dimensions,
    r: f64,
    theta: f64,
    phi: f64,
) -> (f64, f64, f64) {
    match dimensions {
        Dimensions::Two => (r * theta.cos(), r * theta.sin(), 0.0),
        Dimensions::Three => (
            r * theta.cos() * phi.sin(),
            r * theta.sin() * phi.sin(),
            r * phi.cos(),
        ),
    }
}

#[cfg(test)]
mod tests {
    use std::f64::consts::{FRAC_PI_2, PI};

    use super::*;

    const TOL: f64 = crate::math::TOLERANCE;

    #[test]
    fn planar_radius_and_azimuth() {
        let (r, theta, phi) = cartesian_to_spherical(Dimensions::Two, 3.0, 4.0, 0.0);
        assert!((r - 5.0).abs() < TOL, "r={r}");
        assert!((theta - 4.0_f64.atan2(3.0)).abs() < TOL, "theta={theta}");
        assert!(phi.abs() < TOL, "phi={phi}");
    }

    #[test]
    fn radius_uses_all_three_axes() {
        let (r, _, _) = cartesian_to_spherical(Dimensions::Three, 2.0, 3.0, 6.0);
        assert!((r - 7.0).abs() < TOL, "r={r}");
    }

    #[test]
    fn origin_inclination_is_zero() {
        let (r, theta, phi) = cartesian_to_spherical(Dimensions::Three, 0.0, 0.0, 0.0);
        assert!(r.abs() < TOL);
        assert!(theta.abs() < TOL);
        assert!(phi.abs() < TOL, "phi={phi}");
        assert!(!phi.is_nan());
    }

    #[test]
    fn point_on_xy_plane_is_inclined_a_right_angle() {
        // z = 0 but r != 0: no fallback, acos(0) = π/2.
        let (_, _, phi) = cartesian_to_spherical(Dimensions::Three, 1.0, 1.0, 0.0);
        assert!((phi - FRAC_PI_2).abs() < TOL, "phi={phi}");
    }

    #[test]
    fn negative_z_axis() {
        let (r, _, phi) = cartesian_to_spherical(Dimensions::Three, 0.0, 0.0, -2.0);
        assert!((r - 2.0).abs() < TOL);
        assert!((phi - PI).abs() < TOL, "phi={phi}");
    }

    #[test]
    fn spherical_to_cartesian_3d() {
        let (x, y, z) = spherical_to_cartesian(Dimensions::Three, 2.0, FRAC_PI_2, FRAC_PI_2);
        assert!(x.abs() < TOL, "x={x}");
        assert!((y - 2.0).abs() < TOL, "y={y}");
        assert!(z.abs() < TOL, "z={z}");
    }

    #[test]
    fn polar_to_cartesian_ignores_phi() {
        let (x, y, z) = spherical_to_cartesian(Dimensions::Two, 5.0, 0.0, 1.3);
        assert!((x - 5.0).abs() < TOL);
        assert!(y.abs() < TOL);
        assert!(z.abs() < TOL);
    }

    #[test]
    fn conversions_round_trip() {
        let cases = [
            (1.0, 2.0, 3.0),
            (-4.5, 0.25, -7.0),
            (0.0, -3.0, 1e-3),
            (10.0, 10.0, -10.0),
        ];
        for (x, y, z) in cases {
            let (r, theta, phi) = cartesian_to_spherical(Dimensions::Three, x, y, z);
            let (x2, y2, z2) = spherical_to_cartesian(Dimensions::Three, r, theta, phi);
            assert!((x - x2).abs() < 1e-9, "x: {x} vs {x2}");
            assert!((y - y2).abs() < 1e-9, "y: {y} vs {y2}");
            assert!((z - z2).abs() < 1e-9, "z: {z} vs {z2}");
        }
    }
}

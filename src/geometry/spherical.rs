//! Spherical and polar texture coordinates.
//!
//! Convention: +Y is the rotation axis (north), longitude 0 lies on +X.

use std::f32::consts::{FRAC_PI_2, PI, TAU};

use glam::Vec3;

/// Unit-sphere point addressed by an equirectangular texture coordinate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SphericalCoord {
    /// Azimuth in [0, 2π).
    pub theta: f32,
    /// Polar angle from +Y in [0, π].
    pub phi: f32,
    /// Cartesian unit vector.
    pub point: Vec3,
}

impl SphericalCoord {
    /// Builds a coordinate from texture `(u, v)` with `theta = u·2π`, `phi = v·π`.
    pub fn from_uv(u: f32, v: f32) -> Self {
        let theta = u * TAU;
        let phi = v.clamp(0.0, 1.0) * PI;
        let (sin_phi, cos_phi) = phi.sin_cos();
        let (sin_theta, cos_theta) = theta.sin_cos();
        Self {
            theta,
            phi,
            point: Vec3::new(sin_phi * cos_theta, cos_phi, sin_phi * sin_theta),
        }
    }

    /// Builds a coordinate from an arbitrary direction.
    ///
    /// Zero-length or non-finite input falls back to `+X`.
    pub fn from_point(p: Vec3) -> Self {
        let point = unit_or(p, Vec3::X);
        let phi = point.y.clamp(-1.0, 1.0).acos();
        let theta = point.z.atan2(point.x).rem_euclid(TAU);
        Self { theta, phi, point }
    }

    /// Pixel-center coordinate for texel `(x, y)` of a `width × height` map.
    pub fn from_texel(x: u32, y: u32, width: u32, height: u32) -> Self {
        let u = (x as f32 + 0.5) / width.max(1) as f32;
        let v = (y as f32 + 0.5) / height.max(1) as f32;
        Self::from_uv(u, v)
    }

    /// Latitude in radians, [-π/2, π/2].
    pub fn latitude(&self) -> f32 {
        FRAC_PI_2 - self.phi
    }
}

/// Position in a ring texture: normalized radius from the center and angle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PolarCoord {
    /// 0 at the center, 1 at the middle of an edge.
    pub radius: f32,
    /// Angle in radians, (-π, π].
    pub angle: f32,
}

impl PolarCoord {
    pub fn new(radius: f32, angle: f32) -> Self {
        Self { radius, angle }
    }

    /// Pixel-center polar coordinate for texel `(x, y)` of a `width × height` map.
    pub fn from_texel(x: u32, y: u32, width: u32, height: u32) -> Self {
        let dx = (x as f32 + 0.5) / width.max(1) as f32 * 2.0 - 1.0;
        let dy = (y as f32 + 0.5) / height.max(1) as f32 * 2.0 - 1.0;
        Self {
            radius: (dx * dx + dy * dy).sqrt(),
            angle: dy.atan2(dx),
        }
    }
}

/// Normalizes `v`, returning `fallback` when `v` is zero-length or non-finite.
pub fn unit_or(v: Vec3, fallback: Vec3) -> Vec3 {
    let len = v.length();
    if len.is_finite() && len > 1e-6 {
        v / len
    } else {
        fallback
    }
}

/// Converts a direction to `(latitude, longitude)` in degrees.
///
/// Returns `None` for zero-length or non-finite input.
pub fn lat_lon_deg(p: Vec3) -> Option<(f32, f32)> {
    let len = p.length();
    if !len.is_finite() || len < 1e-6 {
        return None;
    }
    let n = p / len;
    let lat = n.y.clamp(-1.0, 1.0).asin().to_degrees();
    let lon = n.z.atan2(n.x).to_degrees();
    Some((lat, lon))
}

/// Unit direction for a latitude/longitude pair in degrees.
pub fn lat_lon_to_dir(lat_deg: f32, lon_deg: f32) -> Vec3 {
    let (slat, clat) = lat_deg.to_radians().sin_cos();
    let (slon, clon) = lon_deg.to_radians().sin_cos();
    Vec3::new(clat * clon, slat, clat * slon)
}

/// Returns `(east, north)` tangent unit vectors at sphere point `p`.
///
/// At the poles north is undefined, so +Z stands in for the reference axis.
pub fn local_tangent_basis(p: Vec3) -> (Vec3, Vec3) {
    let n = unit_or(p, Vec3::X);
    let mut north = Vec3::Y.reject_from_normalized(n);
    if north.length_squared() < 1e-12 {
        north = Vec3::Z.reject_from_normalized(n);
    }
    let north = north.normalize_or_zero();
    let east = n.cross(north).normalize_or_zero();
    (east, north)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_uv_mapping_poles_and_equator() {
        let north = SphericalCoord::from_uv(0.0, 0.0);
        assert_relative_eq!(north.point.y, 1.0, epsilon = 1e-6);

        let south = SphericalCoord::from_uv(0.3, 1.0);
        assert_relative_eq!(south.point.y, -1.0, epsilon = 1e-6);

        let equator = SphericalCoord::from_uv(0.0, 0.5);
        assert_relative_eq!(equator.point.x, 1.0, epsilon = 1e-6);
        assert_relative_eq!(equator.latitude(), 0.0, epsilon = 1e-6);
    }

    #[test]
    fn test_points_are_unit_length() {
        for (u, v) in [(0.1, 0.2), (0.75, 0.9), (0.5, 0.5), (0.99, 0.01)] {
            let c = SphericalCoord::from_uv(u, v);
            assert_relative_eq!(c.point.length(), 1.0, epsilon = 1e-5);
        }
    }

    #[test]
    fn test_from_point_round_trip_angles() {
        let c = SphericalCoord::from_uv(0.25, 0.5);
        let back = SphericalCoord::from_point(c.point * 3.0);
        assert_relative_eq!(back.theta, c.theta, epsilon = 1e-5);
        assert_relative_eq!(back.phi, c.phi, epsilon = 1e-5);
    }

    #[test]
    fn test_zero_vector_falls_back_to_unit() {
        let c = SphericalCoord::from_point(Vec3::ZERO);
        assert_eq!(c.point, Vec3::X);
        assert_eq!(lat_lon_deg(Vec3::ZERO), None);
    }

    #[test]
    fn test_lat_lon_inverse() {
        let dir = lat_lon_to_dir(30.0, -60.0);
        let (lat, lon) = lat_lon_deg(dir).unwrap();
        assert_relative_eq!(lat, 30.0, epsilon = 1e-3);
        assert_relative_eq!(lon, -60.0, epsilon = 1e-3);
    }

    #[test]
    fn test_polar_texel_center_and_edge() {
        let center = PolarCoord::from_texel(255, 255, 512, 512);
        assert!(center.radius < 0.01);
        let edge = PolarCoord::from_texel(511, 256, 512, 512);
        assert!((edge.radius - 1.0).abs() < 0.01);
    }

    #[test]
    fn test_tangent_basis_is_orthogonal() {
        let p = lat_lon_to_dir(20.0, 45.0);
        let (east, north) = local_tangent_basis(p);
        assert!(east.dot(north).abs() < 1e-5);
        assert!(east.dot(p).abs() < 1e-5);
        assert!(north.y > 0.0);
    }
}

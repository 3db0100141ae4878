//! Sphere and ring texture coordinate systems.
//!
//! Maps equirectangular `(u, v)` texture coordinates onto the unit sphere and
//! ring texels onto polar coordinates.

mod spherical;

pub use spherical::{
    SphericalCoord, PolarCoord, unit_or, lat_lon_deg, lat_lon_to_dir, local_tangent_basis,
};

//! In-memory texture synthesis.
//!
//! Assembles whole planet, cloud, ring and moon textures from the per-texel
//! recipes in [`crate::terrain`]. Texels are independent, so every map is
//! filled in parallel with rayon. Nothing here touches the filesystem.

mod maps;

pub use maps::{
    HeightField, SurfaceMaps, TextureError,
    generate_surface_maps, generate_cloud_map, generate_ring_map, generate_moon_map,
    alpha_coverage,
};

//! Climate palette table, coldest first.

use glam::Vec3;

use super::PaletteColors;

pub(crate) const PALETTE_COUNT: usize = 5;

/// One climate bucket: eight terrain anchors (deep ocean → polar) and an
/// atmosphere tint, stored as sRGB bytes.
pub(crate) struct PaletteDef {
    pub name: &'static str,
    anchors: [[u8; 3]; 8],
    atmosphere: [u8; 3],
}

impl PaletteDef {
    pub fn colors(&self) -> PaletteColors {
        let a = self.anchors.map(byte_rgb);
        PaletteColors {
            deep_ocean: a[0],
            shallow_water: a[1],
            beach: a[2],
            lowland: a[3],
            highland: a[4],
            mountain: a[5],
            peak: a[6],
            polar: a[7],
        }
    }

    pub fn atmosphere(&self) -> Vec3 {
        byte_rgb(self.atmosphere)
    }
}

fn byte_rgb(c: [u8; 3]) -> Vec3 {
    Vec3::new(c[0] as f32, c[1] as f32, c[2] as f32) / 255.0
}

pub(crate) const PALETTES: [PaletteDef; PALETTE_COUNT] = [
    PaletteDef {
        name: "frozen",
        anchors: [
            [18, 38, 74],
            [70, 120, 160],
            [190, 196, 200],
            [160, 176, 178],
            [140, 150, 160],
            [175, 185, 198],
            [225, 232, 240],
            [250, 252, 255],
        ],
        atmosphere: [190, 215, 255],
    },
    PaletteDef {
        name: "cold",
        anchors: [
            [14, 42, 82],
            [46, 104, 150],
            [176, 168, 140],
            [90, 120, 90],
            [100, 110, 96],
            [128, 124, 120],
            [210, 214, 220],
            [245, 248, 252],
        ],
        atmosphere: [150, 195, 255],
    },
    PaletteDef {
        name: "temperate",
        anchors: [
            [10, 40, 100],
            [30, 110, 170],
            [222, 206, 150],
            [70, 140, 60],
            [110, 130, 70],
            [130, 110, 90],
            [200, 200, 200],
            [245, 245, 250],
        ],
        atmosphere: [120, 170, 255],
    },
    PaletteDef {
        name: "warm",
        anchors: [
            [8, 50, 110],
            [25, 140, 180],
            [236, 214, 160],
            [110, 160, 60],
            [150, 150, 80],
            [150, 120, 90],
            [196, 180, 160],
            [232, 228, 220],
        ],
        atmosphere: [140, 180, 235],
    },
    PaletteDef {
        name: "arid",
        anchors: [
            [20, 50, 90],
            [60, 130, 150],
            [240, 210, 150],
            [210, 170, 110],
            [190, 140, 90],
            [160, 110, 80],
            [200, 170, 140],
            [235, 220, 200],
        ],
        atmosphere: [230, 190, 140],
    },
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn palettes_are_ordered_cold_to_arid() {
        let names: Vec<&str> = PALETTES.iter().map(|p| p.name).collect();
        assert_eq!(names, vec!["frozen", "cold", "temperate", "warm", "arid"]);
    }

    #[test]
    fn deep_ocean_is_darker_than_shallow_water() {
        for p in &PALETTES {
            let c = p.colors();
            assert!(c.deep_ocean.length() < c.shallow_water.length(), "{}", p.name);
        }
    }
}

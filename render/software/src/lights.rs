use math::FixedPoint;

use crate::defs::{LIGHTLEVELS, LIGHTSEGSHIFT, LIGHTZSHIFT, MAXLIGHTZ, NUMCOLORMAPS};

/// Shift applied to the distance scale before it is halved in to colormaps
const LIGHTSCALESHIFT: u32 = 12;
/// Distance scale is calculated as for a 320 wide screen, at every resolution
const LIGHT_SCREEN_HALF: i32 = 160;

/// R_InitLightTables: for every light band, the colormap level to use at
/// each distance bucket. Near planes are brighter than far ones.
pub struct LightTables {
    zlight: Vec<[u8; MAXLIGHTZ]>,
}

impl Default for LightTables {
    fn default() -> Self {
        Self::new()
    }
}

impl LightTables {
    pub fn new() -> Self {
        let zlight = (0..LIGHTLEVELS)
            .map(|i| {
                let startmap = (((LIGHTLEVELS - 1 - i) * 2) * NUMCOLORMAPS / LIGHTLEVELS) as i32;
                let mut row = [0u8; MAXLIGHTZ];
                for (j, level) in row.iter_mut().enumerate() {
                    let scale = FixedPoint::from_int(LIGHT_SCREEN_HALF)
                        .fixed_div(FixedPoint::new(((j + 1) as i32) << LIGHTZSHIFT));
                    let scale = scale.raw() >> LIGHTSCALESHIFT;
                    *level = (startmap - scale / 2).clamp(0, NUMCOLORMAPS as i32 - 1) as u8;
                }
                row
            })
            .collect();
        Self { zlight }
    }

    /// Row for a sector light level. Extralight raises the band unless the
    /// sector is fogged.
    pub fn plane_light(&self, lightlevel: i32, extralight: i32, foggy: bool) -> &[u8; MAXLIGHTZ] {
        let extra = if foggy { 0 } else { extralight };
        let light = ((lightlevel >> LIGHTSEGSHIFT) + extra).clamp(0, LIGHTLEVELS as i32 - 1);
        &self.zlight[light as usize]
    }

    /// Colormap level within `row` for a plane `distance` away
    #[inline]
    pub fn level_at(row: &[u8; MAXLIGHTZ], distance: FixedPoint) -> u8 {
        let index = ((distance.raw() as u32) >> LIGHTZSHIFT).min(MAXLIGHTZ as u32 - 1);
        row[index as usize]
    }
}

use std::fmt::Debug;

use math::{Angle, FixedPoint, Plane};
use render_trait::ShadeRef;

/// Width of the visplane hash table. Only affects lookup speed; the pool
/// grows without limit.
pub const MAXVISPLANES: usize = 128;

/// Largest surface the column and row tables are built for
pub const MAXWIDTH: usize = 4096;
pub const MAXHEIGHT: usize = 4096;

/// A picture number with this bit set is a sky regardless of the configured
/// sky flat
pub const PL_SKYFLAT: usize = 1 << 31;

/// Sector light levels are bucketed into this many bands
pub const LIGHTLEVELS: usize = 16;
pub const LIGHTSEGSHIFT: i32 = 4;
/// Distance buckets per light band
pub const MAXLIGHTZ: usize = 128;
pub const LIGHTZSHIFT: u32 = 20;
/// Light levels per colormap set
pub const NUMCOLORMAPS: usize = 32;

pub type VisplaneId = usize;

/// Texture alignment of a flat: offsets in map units added before scaling,
/// scale in texels per map unit, and a rotation about the map origin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FlatTransform {
    pub xoffs: FixedPoint,
    pub yoffs: FixedPoint,
    pub xscale: FixedPoint,
    pub yscale: FixedPoint,
    pub angle: Angle,
}

impl FlatTransform {
    pub const IDENTITY: Self = Self {
        xoffs: FixedPoint::ZERO,
        yoffs: FixedPoint::ZERO,
        xscale: FixedPoint::UNIT,
        yscale: FixedPoint::UNIT,
        angle: Angle::ZERO,
    };
}

impl Default for FlatTransform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

/// Everything that makes two visplanes draw differently. Two requests share
/// a visplane only if their keys are identical.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlaneKey {
    pub plane: Plane,
    pub picnum: usize,
    pub lightlevel: i32,
    pub transform: FlatTransform,
    /// Colormap set active for the sector
    pub colormap: usize,
}

impl PlaneKey {
    pub fn is_sky(&self, sky_flat: usize) -> bool {
        self.picnum == sky_flat || self.picnum & PL_SKYFLAT != 0
    }

    /// Bucket for this key in a table of `width` buckets, `width` being a
    /// power of two
    pub(crate) fn hash(&self, width: usize) -> usize {
        let h = (self.picnum as u32)
            .wrapping_mul(3)
            .wrapping_add(self.lightlevel as u32)
            .wrapping_add((self.plane.d.raw() as u32).wrapping_mul(7));
        h as usize & (width - 1)
    }
}

/// The camera and per-frame lighting state `draw_planes` renders from
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewPoint {
    pub x: FixedPoint,
    pub y: FixedPoint,
    pub z: FixedPoint,
    pub angle: Angle,
    /// Light bands added by weapon flashes
    pub extralight: i32,
    /// Forces a single light level on every plane, e.g. invulnerability
    pub fixed_light: Option<u8>,
    /// Forces a whole colormap level, ignoring the plane's own set
    pub fixed_colormap: Option<ShadeRef>,
    /// Fog ignores extralight
    pub foggy: bool,
    /// Game tic, drives flat warping
    pub tic: u32,
}

impl ViewPoint {
    pub fn new(x: FixedPoint, y: FixedPoint, z: FixedPoint, angle: Angle) -> Self {
        Self {
            x,
            y,
            z,
            angle,
            extralight: 0,
            fixed_light: None,
            fixed_colormap: None,
            foggy: false,
            tic: 0,
        }
    }
}

/// Now what is a visplane, anyway?
///
/// One floor or ceiling draw operation: a key, the columns it covers and the
/// open rows of each of those columns.
#[derive(Clone)]
pub struct Visplane {
    pub key: PlaneKey,
    pub minx: i32,
    pub maxx: i32,
    /// First open row per column. Untouched columns hold the surface height.
    pub top: Vec<i32>,
    /// Last open row per column
    pub bottom: Vec<i32>,
    /// Surface height, the untouched marker for `top`
    pub(crate) closed: i32,
    /// Next visplane in the same hash bucket
    pub(crate) next: Option<VisplaneId>,
}

impl Debug for Visplane {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Visplane")
            .field("key", &self.key)
            .field("minx", &self.minx)
            .field("maxx", &self.maxx)
            .finish_non_exhaustive()
    }
}

impl Visplane {
    pub(crate) fn new(key: PlaneKey, screen_width: usize, screen_height: usize) -> Self {
        Visplane {
            key,
            minx: screen_width as i32,
            maxx: -1,
            top: vec![screen_height as i32; screen_width],
            bottom: vec![0; screen_width],
            closed: screen_height as i32,
            next: None,
        }
    }

    /// Reinitialise a recycled visplane for a new key, bounds empty
    pub(crate) fn reset(&mut self, key: PlaneKey) {
        self.key = key;
        self.minx = self.top.len() as i32;
        self.maxx = -1;
        self.top.fill(self.closed);
        self.next = None;
    }

    /// Record the open rows `top..=bottom` of column `x`
    #[inline]
    pub fn set_column(&mut self, x: i32, top: i32, bottom: i32) {
        debug_assert!(bottom < self.closed, "bottom row {bottom} off surface");
        self.top[x as usize] = top;
        self.bottom[x as usize] = bottom;
    }

    /// Column has not been claimed since the visplane was created
    #[inline]
    pub fn is_untouched(&self, x: i32) -> bool {
        self.top[x as usize] == self.closed
    }

    /// Open rows of column `x`, `None` when the column is closed or outside
    /// the visplane's bounds
    #[inline]
    pub fn column(&self, x: i32) -> Option<(i32, i32)> {
        if x < self.minx || x > self.maxx {
            return None;
        }
        let (t, b) = (self.top[x as usize], self.bottom[x as usize]);
        (t <= b).then_some((t, b))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(picnum: usize, lightlevel: i32) -> PlaneKey {
        PlaneKey {
            plane: Plane::floor(FixedPoint::from_int(8)),
            picnum,
            lightlevel,
            transform: FlatTransform::IDENTITY,
            colormap: 0,
        }
    }

    #[test]
    fn new_visplane_is_untouched() {
        let pl = Visplane::new(key(1, 160), 320, 200);
        assert_eq!(pl.minx, 320);
        assert_eq!(pl.maxx, -1);
        assert!((0..320).all(|x| pl.is_untouched(x)));
    }

    #[test]
    fn column_bounds() {
        let mut pl = Visplane::new(key(1, 160), 16, 10);
        pl.minx = 2;
        pl.maxx = 4;
        pl.set_column(3, 5, 9);
        pl.set_column(4, 6, 5);
        assert_eq!(pl.column(3), Some((5, 9)));
        assert_eq!(pl.column(4), None);
        assert_eq!(pl.column(2), None);
        assert_eq!(pl.column(8), None);
    }

    #[test]
    fn sky_detection() {
        assert!(key(99, 0).is_sky(99));
        assert!(key(3 | PL_SKYFLAT, 0).is_sky(99));
        assert!(!key(3, 0).is_sky(99));
    }

    #[test]
    fn hash_in_range() {
        for pic in 0..50 {
            assert!(key(pic, pic as i32 * 7).hash(MAXVISPLANES) < MAXVISPLANES);
        }
        assert_eq!(key(0, 0).hash(1), 0);
    }
}

//! Tilted floors and ceilings.
//!
//! Texture space is set up as three points on the plane: the texture origin,
//! and one flat width and one flat height away from it along the texture
//! axes. Cross products of those (in eye space) give three vectors whose dot
//! product with any screen ray is `(u*w, v*w, w)`, linear along a scanline.

use glam::DVec3;
use log::trace;
use math::FixedPoint;
use render_trait::{FLAT_SIZE, ShadeRef, SlopeSpan, SpanFiller};

use crate::defs::{NUMCOLORMAPS, ViewPoint, Visplane};
use crate::utilities::Projection;

/// Colormap levels lost per unit of `1 / distance`, times the 8 the shade
/// scale carries. Matches the falloff of the level light tables.
const GLOBAL_VIS: f64 = 10240.0;

enum SlopeLight {
    Fixed(ShadeRef),
    Varying {
        colormap: usize,
        shade: f64,
        plight: f64,
        extralight: i32,
    },
}

/// Per visplane setup for drawing a sloped plane, R_MapSlopedPlane per span
pub struct SlopeMapper<'a> {
    source: &'a [u8],
    proj: &'a Projection,
    a: DVec3,
    b: DVec3,
    c: DVec3,
    light: SlopeLight,
}

impl<'a> SlopeMapper<'a> {
    /// `None` when the eye lies in the plane, or the flat is scaled to
    /// nothing
    pub fn new(
        pl: &Visplane,
        view: &ViewPoint,
        proj: &'a Projection,
        source: &'a [u8],
    ) -> Option<Self> {
        let key = &pl.key;
        let tf = &key.transform;
        let plane = &key.plane;

        let (vx, vy, vz) = (view.x.to_f64(), view.y.to_f64(), view.z.to_f64());
        let zat = plane.z_at_f64(vx, vy);
        if zat == vz {
            trace!("sloped plane {} through the eye skipped", key.picnum);
            return None;
        }

        let (xscale, yscale) = (tf.xscale.to_f64(), tf.yscale.to_f64());
        if xscale == 0.0 || yscale == 0.0 {
            return None;
        }
        let width = FLAT_SIZE as f64 / xscale;
        let height = FLAT_SIZE as f64 / yscale;

        let (sin, cos) = tf.angle.sin_cos_exact_zero();
        let (sin, cos) = (sin.to_f64(), cos.to_f64());
        let (xoffs, yoffs) = (tf.xoffs.to_f64(), tf.yoffs.to_f64());

        // Texture origin, then a flat width back along u and a flat height
        // back along v, all in map coordinates
        let (px, py) = (-xoffs * cos + yoffs * sin, xoffs * sin + yoffs * cos);
        let (tx, ty) = (px - width * cos, py + width * sin);
        let (sx, sy) = (px + height * sin, py + height * cos);

        let (vsin, vcos) = (view.angle.sin().to_f64(), view.angle.cos().to_f64());
        // x right, y down, z forward
        let to_eye = |x: f64, y: f64| -> DVec3 {
            let dx = x - vx;
            let dy = y - vy;
            DVec3::new(
                dx * vsin - dy * vcos,
                vz - plane.z_at_f64(x, y),
                dx * vcos + dy * vsin,
            )
        };

        let p = to_eye(px, py);
        let m = to_eye(tx, ty) - p;
        let n = to_eye(sx, sy) - p;

        let volume = p.dot(m.cross(n));
        if volume == 0.0 {
            return None;
        }

        let scale = DVec3::new(0.5, 0.5 * proj.ifocratio, 0.5);
        let a = p.cross(n) * scale;
        let b = m.cross(p) * scale;
        let c = m.cross(n) * scale;

        let light = if let Some(level) = view.fixed_light {
            SlopeLight::Fixed(ShadeRef::new(key.colormap, level))
        } else if let Some(shade) = view.fixed_colormap {
            SlopeLight::Fixed(shade)
        } else {
            SlopeLight::Varying {
                colormap: key.colormap,
                shade: 512.0 - (key.lightlevel as f64 + 16.0) * 2.0,
                // `plight * id` comes out as GLOBAL_VIS / distance
                plight: 2.0 * GLOBAL_VIS / (proj.focal_x.to_f64() * volume),
                extralight: if view.foggy { 0 } else { view.extralight << 2 },
            }
        };

        Some(Self {
            source,
            proj,
            a,
            b,
            c,
            light,
        })
    }

    /// Resolve one span. `lighting` is scratch space at least as long as the
    /// span. Empty or reversed spans draw nothing.
    pub fn map_span(
        &self,
        y: i32,
        x1: i32,
        x2: i32,
        lighting: &mut [ShadeRef],
        filler: &mut impl SpanFiller,
    ) {
        let count = x2 - x1 + 1;
        if count <= 0 {
            return;
        }

        let s = DVec3::new(
            (x1 - self.proj.centerx) as f64,
            self.proj.row_offset(y),
            self.proj.focal_x.to_f64(),
        );
        let scale = FLAT_SIZE as f64;
        let iu = s.dot(self.a) * scale;
        let iv = s.dot(self.b) * scale;
        let id = s.dot(self.c);

        let lighting = &mut lighting[..count as usize];
        match self.light {
            SlopeLight::Fixed(shade) => lighting.fill(shade),
            SlopeLight::Varying {
                colormap,
                shade,
                plight,
                extralight,
            } => {
                let id_end = id + self.c.x * (count - 1) as f64;
                let map_at = |id: f64| {
                    FixedPoint::from_f64(((shade - plight * id) / 8.0).clamp(-64.0, 64.0))
                };
                let start = map_at(id);
                let end = map_at(id_end);
                let step = if count > 1 {
                    FixedPoint::new((end - start).raw() / (count - 1))
                } else {
                    FixedPoint::ZERO
                };

                let mut map = start;
                for l in lighting.iter_mut() {
                    let level = (map.raw() >> 16) + 1 - extralight;
                    *l = ShadeRef::new(colormap, level.clamp(0, NUMCOLORMAPS as i32 - 1) as u8);
                    map += step;
                }
            }
        }

        filler.draw_slope_span(&SlopeSpan {
            source: self.source,
            lighting,
            y,
            x1,
            x2,
            iu,
            iv,
            id,
            iustep: self.a.x * scale,
            ivstep: self.b.x * scale,
            idstep: self.c.x,
        });
    }
}

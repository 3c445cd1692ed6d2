//! Untilted floors and ceilings. Every row of such a plane is a constant
//! distance away, so texture coordinates step linearly across a span and are
//! carried in 6.26 fixed point.

use log::trace;
use math::FixedPoint;
use render_trait::{LevelSpan, ShadeRef, SpanFiller};

use crate::defs::{MAXLIGHTZ, ViewPoint, Visplane};
use crate::lights::LightTables;
use crate::utilities::Projection;

/// 16.16 texels to the 6.26 the span filler takes
const SPANSHIFT: u32 = 10;

enum LevelLight<'a> {
    Fixed(ShadeRef),
    Distance {
        colormap: usize,
        zlight: &'a [u8; MAXLIGHTZ],
    },
}

/// Per visplane setup for drawing a level plane, R_MapLevelPlane per span
pub struct LevelMapper<'a> {
    source: &'a [u8],
    proj: &'a Projection,
    light: LevelLight<'a>,
    planeheight: FixedPoint,
    viewsin: FixedPoint,
    viewcos: FixedPoint,
    xscale: FixedPoint,
    yscale: FixedPoint,
    xstepscale: FixedPoint,
    ystepscale: FixedPoint,
    viewxtrans: FixedPoint,
    viewytrans: FixedPoint,
}

impl<'a> LevelMapper<'a> {
    /// `None` when the eye is level with the plane and nothing would show
    pub fn new(
        pl: &Visplane,
        view: &ViewPoint,
        proj: &'a Projection,
        lights: &'a LightTables,
        source: &'a [u8],
    ) -> Option<Self> {
        let key = &pl.key;
        let tf = &key.transform;

        let planeheight = (key.plane.z_at(view.x, view.y) - view.z).abs();
        if planeheight == FixedPoint::ZERO {
            trace!("level plane {} at eye height skipped", key.picnum);
            return None;
        }

        let (pl_sin, pl_cos) = tf.angle.sin_cos_exact_zero();
        let ang = view.angle + tf.angle;
        let (viewsin, viewcos) = (ang.sin(), ang.cos());

        // Viewer in the flat's rotated frame, texture v runs against map y
        let pl_viewx = view.x * pl_cos - view.y * pl_sin;
        let pl_viewy = -(view.x * pl_sin + view.y * pl_cos);

        let light = if let Some(level) = view.fixed_light {
            LevelLight::Fixed(ShadeRef::new(key.colormap, level))
        } else if let Some(shade) = view.fixed_colormap {
            LevelLight::Fixed(shade)
        } else {
            LevelLight::Distance {
                colormap: key.colormap,
                zlight: lights.plane_light(key.lightlevel, view.extralight, view.foggy),
            }
        };

        Some(Self {
            source,
            proj,
            light,
            planeheight,
            viewsin,
            viewcos,
            xscale: tf.xscale << SPANSHIFT,
            yscale: tf.yscale << SPANSHIFT,
            xstepscale: (viewsin * tf.xscale) << SPANSHIFT,
            ystepscale: (viewcos * tf.yscale) << SPANSHIFT,
            viewxtrans: ((pl_viewx + tf.xoffs) * tf.xscale) << SPANSHIFT,
            viewytrans: ((pl_viewy + tf.yoffs) * tf.yscale) << SPANSHIFT,
        })
    }

    /// Distance to the plane along the view direction at row `y`
    #[inline]
    pub fn distance(&self, y: i32) -> FixedPoint {
        self.planeheight * self.proj.yslope[y as usize]
    }

    /// Resolve one span and hand it to the filler
    pub fn map_span(&self, y: i32, x1: i32, x2: i32, filler: &mut impl SpanFiller) {
        let distance = self.distance(y);
        // From the plane height rather than `distance`, which wraps on rows
        // close to the horizon of a distant plane
        let dy = self.proj.row_dy(y);
        let slope = FixedPoint::from_f64(
            self.planeheight.fixed_div(dy).to_f64() * self.proj.focratio,
        );
        let xstep = self.xstepscale * slope;
        let ystep = self.ystepscale * slope;

        let dx = x1 - self.proj.centerx;
        let xfrac = self.viewxtrans + (self.viewcos * distance) * self.xscale + xstep * dx;
        let yfrac = self.viewytrans - (self.viewsin * distance) * self.yscale + ystep * dx;

        let shade = match &self.light {
            LevelLight::Fixed(shade) => *shade,
            LevelLight::Distance { colormap, zlight } => {
                ShadeRef::new(*colormap, LightTables::level_at(zlight, distance))
            }
        };

        filler.draw_span(&LevelSpan {
            source: self.source,
            shade,
            y,
            x1,
            x2,
            xfrac: xfrac.raw() as u32,
            yfrac: yfrac.raw() as u32,
            xstep: xstep.raw() as u32,
            ystep: ystep.raw() as u32,
        });
    }
}

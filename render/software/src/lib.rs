//! Floor and ceiling rendering for a column based software renderer.
//!
//! During the BSP walk the wall renderer asks for a visplane with
//! [`PlaneRender::find_plane`], claims the columns it opens with
//! [`PlaneRender::check_plane`] and records each column's open rows. At the
//! end of the frame [`PlaneRender::draw_planes`] turns every visplane in to
//! horizontal spans and hands them to a [`SpanFiller`].

use std::collections::HashSet;
use std::error::Error;
use std::fmt;

#[cfg(feature = "hprof")]
use coarse_prof::profile;
use log::{debug, trace, warn};
use math::Plane;
use render_trait::{FLAT_BYTES, ShadeRef, SpanFiller};

mod config;
mod defs;
mod flat_warp;
mod lights;
mod plane_level;
mod plane_sloped;
mod planes;
mod utilities;

#[cfg(test)]
mod tests;

pub use config::PlaneConfig;
pub use defs::{
    FlatTransform, LIGHTLEVELS, LIGHTZSHIFT, MAXHEIGHT, MAXLIGHTZ, MAXVISPLANES, MAXWIDTH,
    NUMCOLORMAPS, PL_SKYFLAT, PlaneKey, ViewPoint, Visplane, VisplaneId,
};
pub use flat_warp::FlatWarpCache;
pub use lights::LightTables;
pub use plane_level::LevelMapper;
pub use plane_sloped::SlopeMapper;
pub use planes::{VisplanePool, make_spans};
pub use utilities::Projection;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderError {
    /// Surface is empty or larger than `MAXWIDTH` x `MAXHEIGHT`
    InvalidSurface { width: usize, height: usize },
    /// A per column or per row buffer could not be allocated
    Allocation { what: &'static str, len: usize },
    /// Visplane hash width must be a non-zero power of two
    BucketCount(usize),
}

impl Error for RenderError {}

impl fmt::Display for RenderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RenderError::InvalidSurface { width, height } => {
                write!(f, "invalid surface size {width}x{height}")
            }
            RenderError::Allocation { what, len } => {
                write!(f, "could not allocate {len} entries for {what}")
            }
            RenderError::BucketCount(n) => {
                write!(f, "visplane bucket count {n} is not a power of two")
            }
        }
    }
}

/// Where flat pixels come from. Lookup failures are the source's problem:
/// it should hand back a placeholder flat rather than nothing.
pub trait FlatSource {
    /// Animated flats draw a different lump than their picture number
    fn translate(&self, picnum: usize) -> usize;

    /// 64x64 bytes, row major
    fn pixels(&self, flat: usize) -> &[u8];

    /// Liquid flats ripple over time
    fn is_warped(&self, _flat: usize) -> bool {
        false
    }
}

fn column_buffer<T: Clone>(
    what: &'static str,
    len: usize,
    fill: T,
) -> Result<Vec<T>, RenderError> {
    let mut buf = Vec::new();
    buf.try_reserve_exact(len)
        .map_err(|_| RenderError::Allocation { what, len })?;
    buf.resize(len, fill);
    Ok(buf)
}

/// Everything the flat renderer keeps between calls in a frame, and across
/// frames. Only valid for the surface size it was last built or resized for.
pub struct PlaneRender {
    config: PlaneConfig,
    projection: Projection,
    pool: VisplanePool,
    /// Clip values are the solid pixel bounding the range.
    ///  floorclip starts out SCREENHEIGHT
    ///  ceilingclip starts out -1
    pub floorclip: Vec<i32>,
    pub ceilingclip: Vec<i32>,
    /// Column each row's current span began at
    span_start: Vec<i32>,
    /// Per pixel shades of the sloped span being drawn
    slope_lighting: Vec<ShadeRef>,
    warp: FlatWarpCache,
    /// Colormap set of the sector currently being walked
    base_colormap: usize,
    /// Flats already reported as too short to draw
    short_flats: HashSet<usize>,
}

impl PlaneRender {
    pub fn new(width: usize, height: usize, config: PlaneConfig) -> Result<Self, RenderError> {
        config.validate()?;
        let mut render = Self {
            projection: Projection::new(1, 1, config.fov, config.aspect_correct)?,
            pool: VisplanePool::new(config.visplane_buckets, 1, 1),
            config,
            floorclip: Vec::new(),
            ceilingclip: Vec::new(),
            span_start: Vec::new(),
            slope_lighting: Vec::new(),
            warp: FlatWarpCache::new(),
            base_colormap: 0,
            short_flats: HashSet::new(),
        };
        render.resize(width, height)?;
        Ok(render)
    }

    /// Rebuild every table sized by the surface. All visplanes are dropped,
    /// so ids handed out before are invalid afterwards.
    pub fn resize(&mut self, width: usize, height: usize) -> Result<(), RenderError> {
        if width == 0 || height == 0 || width > MAXWIDTH || height > MAXHEIGHT {
            return Err(RenderError::InvalidSurface { width, height });
        }

        let projection =
            Projection::new(width, height, self.config.fov, self.config.aspect_correct)?;
        let floorclip = column_buffer("floorclip", width, height as i32)?;
        let ceilingclip = column_buffer("ceilingclip", width, -1)?;
        let span_start = column_buffer("spanstart", height, 0)?;
        let slope_lighting = column_buffer("slope lighting", width, ShadeRef::default())?;

        self.projection = projection;
        self.floorclip = floorclip;
        self.ceilingclip = ceilingclip;
        self.span_start = span_start;
        self.slope_lighting = slope_lighting;
        self.pool = VisplanePool::new(self.config.visplane_buckets, width, height);
        debug!(
            "Plane tables resized to {width}x{height}, focal length {:?}",
            self.projection.focal_x
        );
        Ok(())
    }

    pub fn config(&self) -> &PlaneConfig {
        &self.config
    }

    pub fn projection(&self) -> &Projection {
        &self.projection
    }

    pub fn pool(&self) -> &VisplanePool {
        &self.pool
    }

    pub fn width(&self) -> usize {
        self.projection.width
    }

    pub fn height(&self) -> usize {
        self.projection.height
    }

    /// R_ClearPlanes
    /// At begining of frame.
    pub fn clear_planes(&mut self) {
        self.floorclip.fill(self.projection.height as i32);
        self.ceilingclip.fill(-1);
        self.pool.reset_frame();
    }

    /// Colormap set given to visplanes found from now on
    pub fn set_base_colormap(&mut self, colormap: usize) {
        self.base_colormap = colormap;
    }

    /// R_FindPlane
    pub fn find_plane(
        &mut self,
        plane: Plane,
        picnum: usize,
        lightlevel: i32,
        transform: FlatTransform,
    ) -> VisplaneId {
        let key = PlaneKey {
            plane,
            picnum,
            lightlevel,
            transform,
            colormap: self.base_colormap,
        };
        self.pool.find(key, self.config.sky_flat)
    }

    /// R_CheckPlane, columns `start..=stop`
    pub fn check_plane(&mut self, id: VisplaneId, start: i32, stop: i32) -> VisplaneId {
        debug_assert!(start <= stop && start >= 0 && (stop as usize) < self.width());
        self.pool.check(id, start, stop)
    }

    pub fn visplane(&self, id: VisplaneId) -> &Visplane {
        self.pool.get(id)
    }

    pub fn visplane_mut(&mut self, id: VisplaneId) -> &mut Visplane {
        self.pool.get_mut(id)
    }

    /// R_DrawPlanes
    /// At the end of each frame.
    pub fn draw_planes(
        &mut self,
        view: &ViewPoint,
        flats: &impl FlatSource,
        lights: &LightTables,
        filler: &mut impl SpanFiller,
    ) {
        #[cfg(feature = "hprof")]
        profile!("draw_planes");

        let Self {
            config,
            projection,
            pool,
            span_start,
            slope_lighting,
            warp,
            short_flats,
            ..
        } = self;

        let sky_shade = sky_shade(view);

        let mut spans = 0usize;
        for pl in pool.iter() {
            if pl.minx > pl.maxx {
                continue;
            }

            if pl.key.is_sky(config.sky_flat) {
                for x in pl.minx..=pl.maxx {
                    if let Some((top, bottom)) = pl.column(x) {
                        filler.draw_sky_column(x, top, bottom, sky_shade);
                    }
                }
                continue;
            }

            let flat = flats.translate(pl.key.picnum);
            let mut source = flats.pixels(flat);
            if source.len() < FLAT_BYTES {
                if short_flats.insert(flat) {
                    warn!("Flat {flat} is only {} bytes, not drawn", source.len());
                }
                continue;
            }
            if flats.is_warped(flat) {
                source = warp.warped(flat, source, view.tic);
            }

            if pl.key.plane.is_level() {
                if let Some(mapper) = LevelMapper::new(pl, view, projection, lights, source) {
                    make_spans(pl, span_start, |y, x1, x2| {
                        mapper.map_span(y, x1, x2, filler);
                        spans += 1;
                    });
                }
            } else if let Some(mapper) = SlopeMapper::new(pl, view, projection, source) {
                make_spans(pl, span_start, |y, x1, x2| {
                    mapper.map_span(y, x1, x2, slope_lighting, filler);
                    spans += 1;
                });
            }
        }
        trace!("Drew {} visplanes in {spans} spans", pool.len());
    }
}

/// Skies are drawn through the default colormap set at full brightness. A
/// fixed light level still applies, a fixed colormap does not, the way
/// invulnerability left the sky alone.
fn sky_shade(view: &ViewPoint) -> ShadeRef {
    ShadeRef::new(0, view.fixed_light.unwrap_or(0))
}

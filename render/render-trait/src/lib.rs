//! The seams between the flat renderer and whatever writes pixels.

/// channels should match pixel format
pub const SOFT_PIXEL_CHANNELS: usize = 4;

/// Flats are 64x64 bytes, row major
pub const FLAT_SIZE: usize = 64;
pub const FLAT_BYTES: usize = FLAT_SIZE * FLAT_SIZE;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BufferSize {
    width_usize: usize,
    height_usize: usize,
    width: i32,
    height: i32,
}

impl BufferSize {
    pub const fn new(width: usize, height: usize) -> Self {
        Self {
            width_usize: width,
            height_usize: height,
            width: width as i32,
            height: height as i32,
        }
    }

    pub const fn width(&self) -> i32 {
        self.width
    }

    pub const fn height(&self) -> i32 {
        self.height
    }

    pub const fn width_usize(&self) -> usize {
        self.width_usize
    }

    pub const fn height_usize(&self) -> usize {
        self.height_usize
    }
}

/// An RGBA surface the truecolour span filler can write to
pub trait PixelBuffer {
    fn size(&self) -> &BufferSize;
    fn clear_with_colour(&mut self, colour: &[u8; SOFT_PIXEL_CHANNELS]);
    fn set_pixel(&mut self, x: usize, y: usize, colour: &[u8; SOFT_PIXEL_CHANNELS]);
    fn read_pixel(&self, x: usize, y: usize) -> [u8; SOFT_PIXEL_CHANNELS];
}

/// Selects one light level of one colormap set. `map` picks the set (the
/// sector's colormap, or a special effect map), `level` the row in it where 0
/// is full brightness.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ShadeRef {
    pub map: usize,
    pub level: u8,
}

impl ShadeRef {
    pub const fn new(map: usize, level: u8) -> Self {
        Self { map, level }
    }
}

/// One horizontal run of an untilted flat.
///
/// The texture coordinates are unsigned 6.26 fixed point: the top six bits
/// are the texel, and stepping past the flat edge simply wraps.
#[derive(Debug, Clone, Copy)]
pub struct LevelSpan<'a> {
    /// 64x64 flat, row major
    pub source: &'a [u8],
    pub shade: ShadeRef,
    pub y: i32,
    pub x1: i32,
    /// Inclusive
    pub x2: i32,
    pub xfrac: u32,
    pub yfrac: u32,
    pub xstep: u32,
    pub ystep: u32,
}

impl LevelSpan<'_> {
    /// Flat offset sampled by the pixel `n` steps from `x1`
    #[inline]
    pub fn texel(&self, n: i32) -> usize {
        let xfrac = self.xfrac.wrapping_add(self.xstep.wrapping_mul(n as u32));
        let yfrac = self.yfrac.wrapping_add(self.ystep.wrapping_mul(n as u32));
        (((yfrac >> (32 - 6 - 6)) & (63 * 64)) + (xfrac >> (32 - 6))) as usize
    }
}

/// One horizontal run of a tilted flat, in homogeneous texture space.
/// `iu / id` and `iv / id` are the texel coordinates at `x1`; the steps are
/// the per-pixel change of each term.
#[derive(Debug, Clone, Copy)]
pub struct SlopeSpan<'a> {
    pub source: &'a [u8],
    /// One shade per pixel of the span
    pub lighting: &'a [ShadeRef],
    pub y: i32,
    pub x1: i32,
    pub x2: i32,
    pub iu: f64,
    pub iv: f64,
    pub id: f64,
    pub iustep: f64,
    pub ivstep: f64,
    pub idstep: f64,
}

impl SlopeSpan<'_> {
    /// Texel coordinates `(u, v)` of the pixel `n` steps from `x1`
    #[inline]
    pub fn uv(&self, n: i32) -> (f64, f64) {
        let n = n as f64;
        let id = self.id + self.idstep * n;
        (
            (self.iu + self.iustep * n) / id,
            (self.iv + self.ivstep * n) / id,
        )
    }

    /// Flat offset sampled by the pixel `n` steps from `x1`
    #[inline]
    pub fn texel(&self, n: i32) -> usize {
        let (u, v) = self.uv(n);
        let u = u.floor() as i64 as i32;
        let v = v.floor() as i64 as i32;
        ((v & 63) * 64 + (u & 63)) as usize
    }
}

/// The pixel writing boundary. One call per span the renderer produces;
/// palette and truecolour targets supply different implementations.
pub trait SpanFiller {
    fn draw_span(&mut self, span: &LevelSpan);

    fn draw_slope_span(&mut self, span: &SlopeSpan);

    /// An open column of a sky plane, rows `yl..=yh`, drawn through `shade`.
    /// Skies are column drawn by the wall renderer, so the default does
    /// nothing.
    fn draw_sky_column(&mut self, _x: i32, _yl: i32, _yh: i32, _shade: ShadeRef) {}
}

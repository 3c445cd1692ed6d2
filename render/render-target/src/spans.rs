//! Reference span fillers. They sample the flat texel by texel; a tilted span
//! is divided per pixel rather than in subdivided runs.

use render_trait::{LevelSpan, PixelBuffer, ShadeRef, SlopeSpan, SpanFiller};

use crate::buffers::IndexedBuffer;
use crate::colourmap::{ColourMaps, Palette};

/// Writes shaded palette indices
pub struct PalettedSpans<'a> {
    pub buffer: &'a mut IndexedBuffer,
    pub colourmaps: &'a ColourMaps,
    /// Palette index used for open sky columns
    pub sky: u8,
}

impl<'a> PalettedSpans<'a> {
    pub fn new(buffer: &'a mut IndexedBuffer, colourmaps: &'a ColourMaps, sky: u8) -> Self {
        Self {
            buffer,
            colourmaps,
            sky,
        }
    }
}

impl SpanFiller for PalettedSpans<'_> {
    fn draw_span(&mut self, span: &LevelSpan) {
        let y = span.y as usize;
        for n in 0..=(span.x2 - span.x1) {
            let c = span.source[span.texel(n)];
            self.buffer
                .set((span.x1 + n) as usize, y, self.colourmaps.shade(span.shade, c));
        }
    }

    fn draw_slope_span(&mut self, span: &SlopeSpan) {
        let y = span.y as usize;
        for n in 0..=(span.x2 - span.x1) {
            let c = span.source[span.texel(n)];
            let shade = span.lighting[n as usize];
            self.buffer
                .set((span.x1 + n) as usize, y, self.colourmaps.shade(shade, c));
        }
    }

    fn draw_sky_column(&mut self, x: i32, yl: i32, yh: i32, shade: ShadeRef) {
        let c = self.colourmaps.shade(shade, self.sky);
        for y in yl..=yh {
            self.buffer.set(x as usize, y as usize, c);
        }
    }
}

/// Shades through the colormaps, then expands through the palette into an
/// RGBA target
pub struct TrueColourSpans<'a, B: PixelBuffer> {
    pub buffer: &'a mut B,
    pub colourmaps: &'a ColourMaps,
    pub palette: &'a Palette,
    /// Palette index used for open sky columns
    pub sky: u8,
}

impl<'a, B: PixelBuffer> TrueColourSpans<'a, B> {
    pub fn new(
        buffer: &'a mut B,
        colourmaps: &'a ColourMaps,
        palette: &'a Palette,
        sky: u8,
    ) -> Self {
        Self {
            buffer,
            colourmaps,
            palette,
            sky,
        }
    }
}

impl<B: PixelBuffer> SpanFiller for TrueColourSpans<'_, B> {
    fn draw_span(&mut self, span: &LevelSpan) {
        let y = span.y as usize;
        for n in 0..=(span.x2 - span.x1) {
            let c = self
                .colourmaps
                .shade(span.shade, span.source[span.texel(n)]);
            self.buffer
                .set_pixel((span.x1 + n) as usize, y, &self.palette[c as usize]);
        }
    }

    fn draw_slope_span(&mut self, span: &SlopeSpan) {
        let y = span.y as usize;
        for n in 0..=(span.x2 - span.x1) {
            let c = self
                .colourmaps
                .shade(span.lighting[n as usize], span.source[span.texel(n)]);
            self.buffer
                .set_pixel((span.x1 + n) as usize, y, &self.palette[c as usize]);
        }
    }

    fn draw_sky_column(&mut self, x: i32, yl: i32, yh: i32, shade: ShadeRef) {
        let colour = self.palette[self.colourmaps.shade(shade, self.sky) as usize];
        for y in yl..=yh {
            self.buffer.set_pixel(x as usize, y as usize, &colour);
        }
    }
}

#[cfg(test)]
mod tests {
    use render_trait::FLAT_BYTES;

    use super::*;
    use crate::DrawBuffer;
    use crate::colourmap::grey_palette;

    fn gradient() -> Vec<u8> {
        (0..FLAT_BYTES).map(|i| (i % 64) as u8 * 4).collect()
    }

    #[test]
    fn paletted_level_span() {
        let flat = gradient();
        let maps = ColourMaps::ramp_fade(32);
        let mut buf = IndexedBuffer::new(16, 4);
        let mut filler = PalettedSpans::new(&mut buf, &maps, 255);
        filler.draw_span(&LevelSpan {
            source: &flat,
            shade: ShadeRef::new(0, 0),
            y: 2,
            x1: 3,
            x2: 6,
            xfrac: 10 << 26,
            yfrac: 0,
            xstep: 1 << 26,
            ystep: 0,
        });
        assert_eq!(buf.get(2, 2), 0);
        assert_eq!(buf.get(3, 2), 40);
        assert_eq!(buf.get(6, 2), 52);
        assert_eq!(buf.get(7, 2), 0);
    }

    #[test]
    fn truecolour_slope_span_uses_per_pixel_light() {
        let flat = vec![200u8; FLAT_BYTES];
        let maps = ColourMaps::ramp_fade(32);
        let pal = grey_palette();
        let lighting = [ShadeRef::new(0, 0), ShadeRef::new(0, 16)];
        let mut buf = DrawBuffer::new(4, 4);
        let mut filler = TrueColourSpans::new(&mut buf, &maps, &pal, 240);
        filler.draw_slope_span(&SlopeSpan {
            source: &flat,
            lighting: &lighting,
            y: 1,
            x1: 1,
            x2: 2,
            iu: 0.0,
            iv: 0.0,
            id: 1.0,
            iustep: 1.0,
            ivstep: 0.0,
            idstep: 0.0,
        });
        filler.draw_sky_column(3, 0, 1, ShadeRef::new(0, 0));
        filler.draw_sky_column(3, 2, 3, ShadeRef::new(0, 16));
        assert_eq!(buf.read_pixel(1, 1), [200, 200, 200, 255]);
        assert_eq!(buf.read_pixel(2, 1), [100, 100, 100, 255]);
        assert_eq!(buf.read_pixel(3, 0), [240, 240, 240, 255]);
        assert_eq!(buf.read_pixel(3, 2), [120, 120, 120, 255]);
    }
}

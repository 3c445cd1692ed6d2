//! In-memory draw targets for the flat renderer, and the span fillers that
//! write to them.

mod buffers;
mod colourmap;
mod spans;

use std::io::{self, Write};

pub use buffers::{DrawBuffer, IndexedBuffer};
pub use colourmap::{ColourMaps, Palette, grey_palette};
pub use render_trait::PixelBuffer;
pub use spans::{PalettedSpans, TrueColourSpans};

/// Write any pixel buffer out as a binary PPM, dropping alpha
pub fn write_ppm(buffer: &impl PixelBuffer, out: &mut impl Write) -> io::Result<()> {
    let size = *buffer.size();
    write!(out, "P6\n{} {}\n255\n", size.width(), size.height())?;
    let mut row = Vec::with_capacity(size.width_usize() * 3);
    for y in 0..size.height_usize() {
        row.clear();
        for x in 0..size.width_usize() {
            let px = buffer.read_pixel(x, y);
            row.extend_from_slice(&px[..3]);
        }
        out.write_all(&row)?;
    }
    Ok(())
}

/// Expand an indexed buffer through a palette into an RGBA buffer of the
/// same size
pub fn expand_indexed(src: &IndexedBuffer, palette: &Palette, dst: &mut DrawBuffer) {
    let size = *src.size();
    for y in 0..size.height_usize() {
        for x in 0..size.width_usize() {
            dst.set_pixel(x, y, &palette[src.get(x, y) as usize]);
        }
    }
}

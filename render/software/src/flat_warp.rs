//! Rippling liquid flats: a per flat copy of the pixels displaced by a sine
//! wave that advances with the game tic.

use std::collections::HashMap;

use math::{FINEMASK, fine_sine};
use render_trait::{FLAT_BYTES, FLAT_SIZE};

struct WarpedFlat {
    pixels: Vec<u8>,
    tic: u32,
}

/// Warped copies of flats, keyed by flat number. Each is rebuilt at most once
/// per tic no matter how many visplanes draw it.
#[derive(Default)]
pub struct FlatWarpCache {
    flats: HashMap<usize, WarpedFlat>,
}

impl FlatWarpCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// The warped pixels of `flat` for `tic`. `source` is only read when the
    /// cached copy is from another tic, and must hold a whole 64x64 flat.
    pub fn warped(&mut self, flat: usize, source: &[u8], tic: u32) -> &[u8] {
        let entry = self.flats.entry(flat).or_insert_with(|| WarpedFlat {
            pixels: vec![0; FLAT_BYTES],
            // anything but `tic`, so a fresh entry is always built
            tic: tic.wrapping_add(1),
        });
        if entry.tic != tic {
            warp_flat(source, &mut entry.pixels, tic);
            entry.tic = tic;
        }
        &entry.pixels
    }

    pub fn len(&self) -> usize {
        self.flats.len()
    }

    pub fn is_empty(&self) -> bool {
        self.flats.is_empty()
    }

    pub fn clear(&mut self) {
        self.flats.clear();
    }
}

/// Shift each column down by a sine of its position, then each row across
fn warp_flat(source: &[u8], dest: &mut [u8], tic: u32) {
    let size = FLAT_SIZE;
    let mask = size - 1;

    let timebase = (tic as usize).wrapping_mul(23);
    for x in (0..size).rev() {
        let phase = (timebase.wrapping_add((x + 17) << 7)) & FINEMASK;
        let mut yf = ((fine_sine(phase) >> 13) as usize) & mask;
        for row in 0..size {
            dest[x + row * size] = source[x + (yf << 6)];
            yf = (yf + 1) & mask;
        }
    }

    let timebase = (tic as usize).wrapping_mul(32);
    let mut line = [0u8; FLAT_SIZE];
    for y in (0..size).rev() {
        let phase = (timebase.wrapping_add(y << 7)) & FINEMASK;
        let mut xf = ((fine_sine(phase) >> 13) as usize) & mask;
        let row = &mut dest[y * size..(y + 1) * size];
        for px in line.iter_mut() {
            *px = row[xf];
            xf = (xf + 1) & mask;
        }
        row.copy_from_slice(&line);
    }
}

use render_trait::ShadeRef;

pub type Palette = [[u8; 4]; 256];

/// Colormap sets: each set is a list of 256 entry remap tables, one per
/// light level, brightest first.
pub struct ColourMaps {
    sets: Vec<Vec<[u8; 256]>>,
}

impl ColourMaps {
    pub fn new(sets: Vec<Vec<[u8; 256]>>) -> Self {
        Self { sets }
    }

    /// A single set that fades a linear grey ramp palette towards index 0 over
    /// `levels` steps
    pub fn ramp_fade(levels: usize) -> Self {
        let levels = levels.max(1);
        let set = (0..levels)
            .map(|l| {
                let mut map = [0u8; 256];
                for (i, m) in map.iter_mut().enumerate() {
                    *m = (i * (levels - l) / levels) as u8;
                }
                map
            })
            .collect();
        Self { sets: vec![set] }
    }

    /// Out of range sets or levels clamp to the last one
    #[inline]
    pub fn shade(&self, shade: ShadeRef, colour: u8) -> u8 {
        let set = &self.sets[shade.map.min(self.sets.len() - 1)];
        set[(shade.level as usize).min(set.len() - 1)][colour as usize]
    }
}

/// Palette where index `i` is the grey `(i, i, i)`
pub fn grey_palette() -> Palette {
    let mut pal = [[0u8; 4]; 256];
    for (i, p) in pal.iter_mut().enumerate() {
        *p = [i as u8, i as u8, i as u8, 255];
    }
    pal
}

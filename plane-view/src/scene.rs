//! A fixed frame of floors and ceilings, registered the way the wall
//! renderer would during a BSP walk.

use math::{Angle, FixedPoint, Plane};
use render_soft::{FlatSource, FlatTransform, PL_SKYFLAT, PlaneRender, ViewPoint};
use render_trait::{FLAT_BYTES, FLAT_SIZE};

pub const FLOOR_FLAT: usize = 1;
pub const CEILING_FLAT: usize = 2;
pub const RAMP_FLAT: usize = 3;
pub const LIQUID_FLAT: usize = 4;

/// Procedural flats. Flat 0 is the placeholder for unknown numbers.
pub struct SyntheticFlats {
    flats: Vec<Vec<u8>>,
}

impl SyntheticFlats {
    pub fn new() -> Self {
        Self {
            flats: vec![
                checker(8, 40, 200),
                checker(16, 96, 176),
                checker(4, 64, 224),
                stripes(8, 120, 232),
                rings(),
            ],
        }
    }
}

impl Default for SyntheticFlats {
    fn default() -> Self {
        Self::new()
    }
}

fn checker(cell: usize, dark: u8, light: u8) -> Vec<u8> {
    (0..FLAT_BYTES)
        .map(|i| {
            let (x, y) = (i % FLAT_SIZE, i / FLAT_SIZE);
            if (x / cell + y / cell) % 2 == 0 { light } else { dark }
        })
        .collect()
}

fn stripes(width: usize, dark: u8, light: u8) -> Vec<u8> {
    (0..FLAT_BYTES)
        .map(|i| if (i / FLAT_SIZE / width) % 2 == 0 { light } else { dark })
        .collect()
}

fn rings() -> Vec<u8> {
    (0..FLAT_BYTES)
        .map(|i| {
            let x = (i % FLAT_SIZE) as i32 - 32;
            let y = (i / FLAT_SIZE) as i32 - 32;
            let r = ((x * x + y * y) as f32).sqrt() as i32;
            (96 + (r % 8) * 16) as u8
        })
        .collect()
}

impl FlatSource for SyntheticFlats {
    fn translate(&self, picnum: usize) -> usize {
        picnum
    }

    fn pixels(&self, flat: usize) -> &[u8] {
        self.flats.get(flat).unwrap_or(&self.flats[0])
    }

    fn is_warped(&self, flat: usize) -> bool {
        flat == LIQUID_FLAT
    }
}

/// Standing at the map origin, eyes at 41, looking up the y axis
pub fn viewpoint(tic: u32) -> ViewPoint {
    let mut view = ViewPoint::new(
        FixedPoint::ZERO,
        FixedPoint::ZERO,
        FixedPoint::from_int(41),
        Angle::ANG90,
    );
    view.tic = tic;
    view
}

/// Register one sector's surface over columns `x1..=x2`, rows `top..=bottom`
fn claim(
    render: &mut PlaneRender,
    plane: Plane,
    picnum: usize,
    light: i32,
    transform: FlatTransform,
    (x1, x2): (i32, i32),
    (top, bottom): (i32, i32),
) {
    if x1 > x2 || top > bottom {
        return;
    }
    let id = render.find_plane(plane, picnum, light, transform);
    let id = render.check_plane(id, x1, x2);
    let pl = render.visplane_mut(id);
    for x in x1..=x2 {
        pl.set_column(x, top, bottom);
    }
}

/// Clear the frame and register a sky strip, a rotated ceiling, a ramp rising
/// away from the viewer, and a floor split between stone and liquid
pub fn build_frame(render: &mut PlaneRender) {
    let w = render.width() as i32;
    let h = render.height() as i32;
    render.clear_planes();

    let sky_end = h / 8;
    let ceiling_end = h * 3 / 8;
    let ramp_start = h / 2 + 1;
    let floor_start = h * 5 / 8;

    claim(
        render,
        Plane::ceiling(FixedPoint::from_int(256)),
        PL_SKYFLAT,
        255,
        FlatTransform::IDENTITY,
        (0, w - 1),
        (0, sky_end - 1),
    );

    let rotated = FlatTransform {
        angle: Angle::from_degrees(30.0),
        xscale: FixedPoint::from_int(2),
        yscale: FixedPoint::from_int(2),
        ..FlatTransform::IDENTITY
    };
    claim(
        render,
        Plane::ceiling(FixedPoint::from_int(128)),
        CEILING_FLAT,
        192,
        rotated,
        (0, w - 1),
        (sky_end, ceiling_end - 1),
    );

    let ramp = Plane::sloped(
        FixedPoint::ZERO,
        FixedPoint::ZERO,
        FixedPoint::ZERO,
        FixedPoint::ZERO,
        FixedPoint::new(FixedPoint::UNIT.raw() / 8),
        false,
    );
    claim(
        render,
        ramp,
        RAMP_FLAT,
        160,
        FlatTransform::IDENTITY,
        (0, w - 1),
        (ramp_start, floor_start - 1),
    );

    claim(
        render,
        Plane::floor(FixedPoint::ZERO),
        FLOOR_FLAT,
        176,
        FlatTransform::IDENTITY,
        (0, w / 2 - 1),
        (floor_start, h - 1),
    );
    claim(
        render,
        Plane::floor(FixedPoint::from_int(-8)),
        LIQUID_FLAT,
        144,
        FlatTransform::IDENTITY,
        (w / 2, w - 1),
        (floor_start, h - 1),
    );
}

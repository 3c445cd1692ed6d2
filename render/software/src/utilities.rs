use math::{FINEANGLES, FRACUNIT, FixedPoint, fine_tangent};

use crate::RenderError;

/// 320x200 shown at 4:3 has pixels 1.2 times taller than wide
const YASPECTMUL: i32 = 78643;

/// Screen geometry shared by both plane mappers. Rebuilt whenever the surface
/// changes size.
#[derive(Debug, Clone)]
pub struct Projection {
    pub width: usize,
    pub height: usize,
    pub centerx: i32,
    pub centery: i32,
    pub centerxfrac: FixedPoint,
    pub centeryfrac: FixedPoint,
    /// Field of view in fine angles
    pub fov: usize,
    /// Distance to the projection plane in pixels, horizontally
    pub focal_x: FixedPoint,
    /// Same, vertically. Differs from `focal_x` when aspect corrected.
    pub focal_y: FixedPoint,
    /// `focal_y / focal_x`
    pub focratio: f64,
    /// `focal_x / focal_y`
    pub ifocratio: f64,
    /// Per row, how far away a plane one unit above or below the eye is
    pub yslope: Vec<FixedPoint>,
}

impl Projection {
    pub fn new(
        width: usize,
        height: usize,
        fov_degrees: f32,
        aspect_correct: bool,
    ) -> Result<Self, RenderError> {
        let fov = fov_to_fine(fov_degrees);
        let centerx = (width / 2) as i32;
        let centery = (height / 2) as i32;
        let centerxfrac = FixedPoint::from_int(centerx);
        let centeryfrac = FixedPoint::from_int(centery);

        let hitan = FixedPoint::new(fine_tangent(FINEANGLES / 4 + fov / 2));
        let focal_x = centerxfrac.fixed_div(hitan);
        let yaspectmul = if aspect_correct {
            FixedPoint::new(YASPECTMUL)
        } else {
            FixedPoint::UNIT
        };
        let focal_y = centerxfrac.fixed_mul(yaspectmul).fixed_div(hitan);

        let mut yslope = Vec::new();
        yslope
            .try_reserve_exact(height)
            .map_err(|_| RenderError::Allocation {
                what: "yslope",
                len: height,
            })?;
        yslope.extend((0..height as i32).map(|y| focal_y.fixed_div(row_dy(y, centeryfrac))));

        Ok(Self {
            width,
            height,
            centerx,
            centery,
            centerxfrac,
            centeryfrac,
            fov,
            focal_x,
            focal_y,
            focratio: focal_y.to_f64() / focal_x.to_f64(),
            ifocratio: focal_x.to_f64() / focal_y.to_f64(),
            yslope,
        })
    }

    /// Vertical offset of row `y` from the view centre, sampled through the
    /// middle of the pixel
    #[inline]
    pub fn row_offset(&self, y: i32) -> f64 {
        y as f64 + 0.5 - self.centery as f64
    }

    /// `row_offset` as an unsigned fixed point distance
    #[inline]
    pub fn row_dy(&self, y: i32) -> FixedPoint {
        row_dy(y, self.centeryfrac)
    }
}

fn row_dy(y: i32, centeryfrac: FixedPoint) -> FixedPoint {
    FixedPoint::new((y << 16) - centeryfrac.raw() + FRACUNIT / 2).abs()
}

/// Degrees to fine angles, kept inside what the tangent table can look up
fn fov_to_fine(degrees: f32) -> usize {
    let fine = (degrees as f64 * FINEANGLES as f64 / 360.0) as usize;
    fine.clamp(2, FINEANGLES / 2 - 2)
}

use std::f64::consts::PI;

use lazy_static::lazy_static;

use crate::FRACUNIT;

/// Size of the fine angle tables, one full turn
pub const FINEANGLES: usize = 8192;
pub const FINEMASK: usize = FINEANGLES - 1;
/// Shift a 32 bit binary angle down to a fine table index
pub const ANGLETOFINESHIFT: u32 = 19;

lazy_static! {
    /// Sine sampled at the middle of each fine angle step. The extra quarter
    /// turn lets cosine read the same table at an offset.
    static ref FINESINE: Vec<i32> = (0..FINEANGLES * 5 / 4)
        .map(|i| {
            let a = (i as f64 + 0.5) * 2.0 * PI / FINEANGLES as f64;
            (a.sin() * FRACUNIT as f64).round() as i32
        })
        .collect();

    /// Tangent over -90..90 degrees, indexed by `(angle + ANG90) >> 19`
    static ref FINETANGENT: Vec<i32> = (0..FINEANGLES / 2)
        .map(|i| {
            let a = (i as f64 - (FINEANGLES / 4) as f64 + 0.5) * PI / (FINEANGLES / 2) as f64;
            (a.tan() * FRACUNIT as f64).round() as i32
        })
        .collect();
}

#[inline]
pub fn fine_sine(index: usize) -> i32 {
    FINESINE[index & FINEMASK]
}

#[inline]
pub fn fine_cosine(index: usize) -> i32 {
    FINESINE[(index & FINEMASK) + FINEANGLES / 4]
}

#[inline]
pub fn fine_tangent(index: usize) -> i32 {
    FINETANGENT[index & (FINEANGLES / 2 - 1)]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tables_are_half_step_sampled() {
        // Zero is not represented exactly
        assert_eq!(fine_sine(0), 25);
        assert_eq!(fine_cosine(0), FRACUNIT);
        assert_eq!(fine_sine(FINEANGLES / 4), FRACUNIT);
        assert_eq!(fine_cosine(FINEANGLES / 4), -25);
        assert_eq!(fine_sine(FINEANGLES / 2), -25);
    }

    #[test]
    fn cosine_wraps_through_mask() {
        for i in [0, 1, 2047, 4095, 8191] {
            assert_eq!(fine_cosine(i), fine_sine(i + FINEANGLES / 4));
        }
        assert_eq!(fine_sine(FINEANGLES + 5), fine_sine(5));
    }

    #[test]
    fn tangent_is_odd_about_the_middle() {
        let mid = FINEANGLES / 4;
        assert_eq!(fine_tangent(mid), -fine_tangent(mid - 1));
        // 45 degrees
        let t = fine_tangent(mid + FINEANGLES / 8);
        assert!((t - FRACUNIT).abs() < 64);
    }
}

use std::ops::{Add, AddAssign, Neg, Sub, SubAssign};

use crate::FixedPoint;
use crate::trig::{ANGLETOFINESHIFT, fine_cosine, fine_sine};

/// A binary angle measure: a full turn is 2^32 and overflow wraps around.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Angle(u32);

impl Angle {
    pub const ZERO: Angle = Angle(0);
    pub const ANG45: Angle = Angle(0x2000_0000);
    pub const ANG90: Angle = Angle(0x4000_0000);
    pub const ANG180: Angle = Angle(0x8000_0000);
    pub const ANG270: Angle = Angle(0xC000_0000);

    #[inline]
    pub const fn new(bam: u32) -> Self {
        Angle(bam)
    }

    pub fn from_degrees(degrees: f64) -> Self {
        let turns = (degrees / 360.0).rem_euclid(1.0);
        Angle((turns * 4_294_967_296.0) as u64 as u32)
    }

    #[inline]
    pub const fn bam(self) -> u32 {
        self.0
    }

    /// Index in to the fine trig tables
    #[inline]
    pub const fn fine(self) -> usize {
        (self.0 >> ANGLETOFINESHIFT) as usize
    }

    #[inline]
    pub const fn is_zero(self) -> bool {
        self.0 == 0
    }

    #[inline]
    pub fn sin(self) -> FixedPoint {
        FixedPoint::new(fine_sine(self.fine()))
    }

    #[inline]
    pub fn cos(self) -> FixedPoint {
        FixedPoint::new(fine_cosine(self.fine()))
    }

    /// Table sine and cosine, except that a zero angle yields exactly
    /// `(0, 1)`. The half-step sampled tables cannot represent it, and flats
    /// which share an unrotated texture have to line up at their seams.
    #[inline]
    pub fn sin_cos_exact_zero(self) -> (FixedPoint, FixedPoint) {
        if self.is_zero() {
            (FixedPoint::ZERO, FixedPoint::UNIT)
        } else {
            (self.sin(), self.cos())
        }
    }
}

impl Add for Angle {
    type Output = Angle;

    #[inline]
    fn add(self, other: Angle) -> Angle {
        Angle(self.0.wrapping_add(other.0))
    }
}

impl AddAssign for Angle {
    #[inline]
    fn add_assign(&mut self, other: Angle) {
        self.0 = self.0.wrapping_add(other.0);
    }
}

impl Sub for Angle {
    type Output = Angle;

    #[inline]
    fn sub(self, other: Angle) -> Angle {
        Angle(self.0.wrapping_sub(other.0))
    }
}

impl SubAssign for Angle {
    #[inline]
    fn sub_assign(&mut self, other: Angle) {
        self.0 = self.0.wrapping_sub(other.0);
    }
}

impl Neg for Angle {
    type Output = Angle;

    #[inline]
    fn neg(self) -> Angle {
        Angle(self.0.wrapping_neg())
    }
}

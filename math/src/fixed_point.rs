use std::fmt;
use std::ops::{Add, AddAssign, Div, Mul, Neg, Shl, Shr, Sub, SubAssign};

use crate::{FRACBITS, FRACUNIT};

/// A 16.16 signed fixed point number.
///
/// Arithmetic wraps like the two's complement `int` math it replaces instead
/// of saturating. Texture coordinates rely on that: they are only ever
/// meaningful modulo the flat size, and the low 32 bits of a wrapped product
/// are still exact modulo 2^32.
#[derive(Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FixedPoint(i32);

impl FixedPoint {
    pub const ZERO: Self = Self(0);
    pub const UNIT: Self = Self(FRACUNIT);
    pub const MIN: Self = Self(i32::MIN);
    pub const MAX: Self = Self(i32::MAX);

    /// Wrap a raw 16.16 value
    pub const fn new(raw: i32) -> Self {
        Self(raw)
    }

    pub const fn from_int(value: i32) -> Self {
        Self(value.wrapping_shl(FRACBITS as u32))
    }

    pub fn from_f32(value: f32) -> Self {
        Self((value * FRACUNIT as f32) as i32)
    }

    pub fn from_f64(value: f64) -> Self {
        Self((value * FRACUNIT as f64) as i32)
    }

    pub const fn raw(self) -> i32 {
        self.0
    }

    /// Integer part, rounded towards negative infinity
    pub const fn to_int(self) -> i32 {
        self.0 >> FRACBITS
    }

    pub fn to_f32(self) -> f32 {
        self.0 as f32 / FRACUNIT as f32
    }

    pub fn to_f64(self) -> f64 {
        self.0 as f64 / FRACUNIT as f64
    }

    pub const fn abs(self) -> Self {
        Self(self.0.wrapping_abs())
    }

    /// `(a * b) >> 16` through an `i64`, keeping the low 32 bits
    #[inline]
    pub const fn fixed_mul(self, rhs: Self) -> Self {
        Self(((self.0 as i64 * rhs.0 as i64) >> FRACBITS) as i32)
    }

    /// `(a << 16) / b`, saturating when the quotient would not fit.
    ///
    /// A zero divisor always takes the saturating branch, so this never
    /// panics.
    #[inline]
    pub const fn fixed_div(self, rhs: Self) -> Self {
        if (self.0.unsigned_abs() >> 14) >= rhs.0.unsigned_abs() {
            if (self.0 ^ rhs.0) < 0 {
                Self::MIN
            } else {
                Self::MAX
            }
        } else {
            Self((((self.0 as i64) << FRACBITS) / rhs.0 as i64) as i32)
        }
    }
}

impl fmt::Debug for FixedPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "FixedPoint({:#x} = {})", self.0, self.to_f64())
    }
}

impl From<i32> for FixedPoint {
    fn from(value: i32) -> Self {
        Self::from_int(value)
    }
}

impl From<f32> for FixedPoint {
    fn from(value: f32) -> Self {
        Self::from_f32(value)
    }
}

impl Add for FixedPoint {
    type Output = Self;

    #[inline]
    fn add(self, rhs: Self) -> Self {
        Self(self.0.wrapping_add(rhs.0))
    }
}

impl AddAssign for FixedPoint {
    #[inline]
    fn add_assign(&mut self, rhs: Self) {
        self.0 = self.0.wrapping_add(rhs.0);
    }
}

impl Sub for FixedPoint {
    type Output = Self;

    #[inline]
    fn sub(self, rhs: Self) -> Self {
        Self(self.0.wrapping_sub(rhs.0))
    }
}

impl SubAssign for FixedPoint {
    #[inline]
    fn sub_assign(&mut self, rhs: Self) {
        self.0 = self.0.wrapping_sub(rhs.0);
    }
}

impl Neg for FixedPoint {
    type Output = Self;

    #[inline]
    fn neg(self) -> Self {
        Self(self.0.wrapping_neg())
    }
}

impl Mul for FixedPoint {
    type Output = Self;

    #[inline]
    fn mul(self, rhs: Self) -> Self {
        self.fixed_mul(rhs)
    }
}

/// Integer scaling, e.g. a per-pixel step times a pixel count
impl Mul<i32> for FixedPoint {
    type Output = Self;

    #[inline]
    fn mul(self, rhs: i32) -> Self {
        Self(self.0.wrapping_mul(rhs))
    }
}

impl Mul<FixedPoint> for i32 {
    type Output = FixedPoint;

    #[inline]
    fn mul(self, rhs: FixedPoint) -> FixedPoint {
        rhs * self
    }
}

impl Div for FixedPoint {
    type Output = Self;

    #[inline]
    fn div(self, rhs: Self) -> Self {
        self.fixed_div(rhs)
    }
}

impl Shl<u32> for FixedPoint {
    type Output = Self;

    #[inline]
    fn shl(self, rhs: u32) -> Self {
        Self(self.0.wrapping_shl(rhs))
    }
}

impl Shr<u32> for FixedPoint {
    type Output = Self;

    #[inline]
    fn shr(self, rhs: u32) -> Self {
        Self(self.0 >> rhs)
    }
}

use crate::FixedPoint;

/// A floor or ceiling surface, `a*x + b*y + c*z + d = 0`.
///
/// Equality compares the four coefficients bit for bit. Two sectors only
/// share a plane when their equations are identical integers, so there is no
/// tolerance involved.
#[derive(Debug, Clone, Copy)]
pub struct Plane {
    pub a: FixedPoint,
    pub b: FixedPoint,
    pub c: FixedPoint,
    pub d: FixedPoint,
    /// Cached `1 / c`, used to solve for z
    pub invc: FixedPoint,
}

impl Plane {
    pub fn new(a: FixedPoint, b: FixedPoint, c: FixedPoint, d: FixedPoint) -> Self {
        Self {
            a,
            b,
            c,
            d,
            invc: FixedPoint::UNIT / c,
        }
    }

    /// A level floor at `height`, facing up
    pub const fn floor(height: FixedPoint) -> Self {
        Self {
            a: FixedPoint::ZERO,
            b: FixedPoint::ZERO,
            c: FixedPoint::UNIT,
            d: FixedPoint::new(height.raw().wrapping_neg()),
            invc: FixedPoint::UNIT,
        }
    }

    /// A level ceiling at `height`, facing down
    pub const fn ceiling(height: FixedPoint) -> Self {
        Self {
            a: FixedPoint::ZERO,
            b: FixedPoint::ZERO,
            c: FixedPoint::new(-FixedPoint::UNIT.raw()),
            d: height,
            invc: FixedPoint::new(-FixedPoint::UNIT.raw()),
        }
    }

    /// A plane through the point `(x, y, z)` rising `dzdx` per unit of x and
    /// `dzdy` per unit of y. `ceiling` flips the normal to face down.
    pub fn sloped(
        x: FixedPoint,
        y: FixedPoint,
        z: FixedPoint,
        dzdx: FixedPoint,
        dzdy: FixedPoint,
        ceiling: bool,
    ) -> Self {
        // z = z0 + dzdx*(x - x0) + dzdy*(y - y0)
        let a = -dzdx;
        let b = -dzdy;
        let c = FixedPoint::UNIT;
        let d = -(z - dzdx * x - dzdy * y);
        if ceiling {
            Self::new(-a, -b, -c, -d)
        } else {
            Self::new(a, b, c, d)
        }
    }

    /// No tilt, so the height is the same everywhere
    #[inline]
    pub fn is_level(&self) -> bool {
        self.a == FixedPoint::ZERO && self.b == FixedPoint::ZERO
    }

    /// Height of the plane at map position `(x, y)`
    pub fn z_at(&self, x: FixedPoint, y: FixedPoint) -> FixedPoint {
        if self.is_level() {
            return -(self.d * self.invc);
        }
        -((self.a * x + self.b * y + self.d) * self.invc)
    }

    pub fn z_at_f64(&self, x: f64, y: f64) -> f64 {
        -(self.a.to_f64() * x + self.b.to_f64() * y + self.d.to_f64()) / self.c.to_f64()
    }
}

impl PartialEq for Plane {
    fn eq(&self, other: &Self) -> bool {
        self.a == other.a && self.b == other.b && self.c == other.c && self.d == other.d
    }
}

impl Eq for Plane {}

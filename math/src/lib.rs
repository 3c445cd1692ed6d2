//! Numeric building blocks shared by the flat renderer: 16.16 fixed point,
//! binary angles with their fine lookup tables, and plane equations.

mod angle;
mod fixed_point;
mod plane;
mod trig;

pub use angle::*;
pub use fixed_point::*;
pub use plane::*;
pub use trig::*;

pub const FRACBITS: i32 = 16;
pub const FRACUNIT: i32 = 1 << FRACBITS;

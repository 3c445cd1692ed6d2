//! Renderer options, loadable from the same RON file as the rest of the
//! user configuration.

use nanoserde::{DeRon, SerRon};

use crate::RenderError;
use crate::defs::MAXVISPLANES;

#[derive(Debug, Clone, PartialEq, DeRon, SerRon)]
pub struct PlaneConfig {
    /// Horizontal field of view in degrees
    pub fov: f32,
    /// Stretch vertically by 1.2 the way 320x200 was shown on 4:3 monitors
    pub aspect_correct: bool,
    /// Picture number of the sky flat
    pub sky_flat: usize,
    /// Visplane hash width, a power of two
    pub visplane_buckets: usize,
}

impl Default for PlaneConfig {
    fn default() -> Self {
        Self {
            fov: 90.0,
            aspect_correct: true,
            sky_flat: 0xFFFF,
            visplane_buckets: MAXVISPLANES,
        }
    }
}

impl PlaneConfig {
    pub fn validate(&self) -> Result<(), RenderError> {
        if !self.visplane_buckets.is_power_of_two() {
            return Err(RenderError::BucketCount(self.visplane_buckets));
        }
        Ok(())
    }
}

//! Mercator projection of GPS coordinates onto the game canvas.
//!
//! Longitude maps linearly onto the canvas width. Latitude goes through the
//! Mercator transform and is then normalized against a fixed, hand-tuned
//! range of Mercator values instead of the (unbounded) true range, so the
//! inhabited latitudes fill the canvas height.

use std::f64::consts::FRAC_PI_4;

use crate::error::DatasetError;
use crate::models::PixelPosition;

// Tuned for the shipped dataset: Greenland's capital (64.18N, ~1.47) near the
// top, New Zealand's (41.29S, ~-0.79) just above the bottom edge.
pub const MIN_MERCATOR_Y: f64 = -0.8;
pub const MAX_MERCATOR_Y: f64 = 1.7;

/// ln(tan(pi/4 + lat/2)) diverges at the poles; stay just inside them.
const MAX_LATITUDE: f64 = 89.999_999;

/// Raw Mercator y for a latitude in degrees. Grows northward.
pub fn mercator_y(latitude: f64) -> f64 {
    let lat = latitude.clamp(-MAX_LATITUDE, MAX_LATITUDE);
    (FRAC_PI_4 + lat.to_radians() / 2.0).tan().ln()
}

/// The Mercator-y interval stretched over the canvas height.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MercatorRange {
    pub min: f64,
    pub max: f64,
}

impl Default for MercatorRange {
    fn default() -> Self {
        MercatorRange {
            min: MIN_MERCATOR_Y,
            max: MAX_MERCATOR_Y,
        }
    }
}

impl MercatorRange {
    pub fn new(min: f64, max: f64) -> Result<Self, DatasetError> {
        if !min.is_finite() || !max.is_finite() || min >= max {
            return Err(DatasetError::InvalidMercatorRange { min, max });
        }
        Ok(MercatorRange { min, max })
    }

    /// Derive a range from the dataset's southern and northern extremes,
    /// widened by `margin` Mercator units on both sides.
    pub fn fit(south: f64, north: f64, margin: f64) -> Result<Self, DatasetError> {
        Self::new(mercator_y(south) - margin, mercator_y(north) + margin)
    }

    pub fn span(&self) -> f64 {
        self.max - self.min
    }

    /// Project a GPS coordinate onto a `width` x `height` canvas.
    ///
    /// Never fails. Latitudes outside the tuned range land slightly outside
    /// `[0, height]`, which callers are expected to tolerate.
    pub fn project(&self, latitude: f64, longitude: f64, width: f64, height: f64) -> PixelPosition {
        let x = (longitude + 180.0) / 360.0 * width;
        // Canvas y grows downward, Mercator y grows northward.
        let y = height - (mercator_y(latitude) - self.min) / self.span() * height;
        PixelPosition {
            x: x.round() as i32,
            y: y.round() as i32,
        }
    }
}

/// Project with the default normalization range.
pub fn project(latitude: f64, longitude: f64, width: f64, height: f64) -> PixelPosition {
    MercatorRange::default().project(latitude, longitude, width, height)
}

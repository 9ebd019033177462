use thiserror::Error;

/// Raised while turning the raw GPS dataset into the placement artifact.
///
/// The artifact is trusted at runtime, so every variant aborts generation.
#[derive(Debug, Error, PartialEq)]
pub enum DatasetError {
    #[error("{name}: latitude {latitude} is outside [-90, 90]")]
    InvalidLatitude { name: String, latitude: f64 },

    #[error("{name}: longitude {longitude} is outside [-180, 180]")]
    InvalidLongitude { name: String, longitude: f64 },

    #[error("{name}: color {color:?} is not a #RRGGBB hex string")]
    InvalidColor { name: String, color: String },

    #[error("canvas must have a positive size, got {width}x{height}")]
    InvalidCanvas { width: u32, height: u32 },

    #[error("mercator range [{min}, {max}] is empty or not finite")]
    InvalidMercatorRange { min: f64, max: f64 },

    #[error("raw dataset contains no entities")]
    Empty,
}

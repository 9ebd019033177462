use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};

/// A point in canvas space as the player leaves it (drags are not snapped).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

/// A whole-pixel canvas point. Projected positions may overshoot the canvas
/// slightly near the poles, so the components are signed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PixelPosition {
    pub x: i32,
    pub y: i32,
}

impl From<PixelPosition> for Position {
    fn from(p: PixelPosition) -> Self {
        Position {
            x: p.x as f64,
            y: p.y as f64,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GpsCoordinate {
    pub latitude: f64,
    pub longitude: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CanvasSize {
    pub width: u32,
    pub height: u32,
}

impl Default for CanvasSize {
    fn default() -> Self {
        CanvasSize {
            width: 900,
            height: 550,
        }
    }
}

/// One record of the raw dataset. The entity name is the map key, not a field.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawEntity {
    pub capital: String,
    pub gps: GpsCoordinate,
    pub population: u64,
    pub color: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_position: Option<PixelPosition>,
}

/// The raw input file: entity name -> record. Keys are kept sorted so that
/// anything derived from iteration order is independent of the file's order.
pub type RawDataset = BTreeMap<String, RawEntity>;

/// A projected entity, as stored in the generated artifact.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlacedEntity {
    pub name: String,
    pub capital: String,
    pub correct_position: PixelPosition,
    pub gps_coordinates: GpsCoordinate,
    pub population: u64,
    pub color: String,
    pub default_position: PixelPosition,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProjectionKind {
    Mercator,
}

impl std::fmt::Display for ProjectionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProjectionKind::Mercator => write!(f, "mercator"),
        }
    }
}

/// The generated artifact shared between the build step and the game.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlacementArtifact {
    pub projection: ProjectionKind,
    pub canvas_size: CanvasSize,
    /// Sorted by population, most populous first.
    pub countries: Vec<PlacedEntity>,
}

impl PlacementArtifact {
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    pub fn to_json_pretty(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    pub fn find(&self, name: &str) -> Option<&PlacedEntity> {
        self.countries.iter().find(|c| c.name == name)
    }
}

/// Where the player has put each entity. A key is present only once the
/// entity has been placed.
pub type UserPositions = HashMap<String, Position>;

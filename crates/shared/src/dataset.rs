use crate::error::DatasetError;
use crate::grid;
use crate::models::{CanvasSize, PlacedEntity, PlacementArtifact, ProjectionKind, RawDataset, RawEntity};
use crate::projection::MercatorRange;

/// Knobs for a generation run.
#[derive(Debug, Clone, Copy, Default)]
pub struct GenerateOptions {
    pub canvas: CanvasSize,
    pub range: MercatorRange,
}

/// `#RRGGBB`, either case.
pub fn is_hex_color(color: &str) -> bool {
    color.len() == 7
        && color.starts_with('#')
        && color[1..].chars().all(|c| c.is_ascii_hexdigit())
}

fn validate(name: &str, entity: &RawEntity) -> Result<(), DatasetError> {
    let gps = entity.gps;
    if !(-90.0..=90.0).contains(&gps.latitude) {
        return Err(DatasetError::InvalidLatitude {
            name: name.to_string(),
            latitude: gps.latitude,
        });
    }
    if !(-180.0..=180.0).contains(&gps.longitude) {
        return Err(DatasetError::InvalidLongitude {
            name: name.to_string(),
            longitude: gps.longitude,
        });
    }
    if !is_hex_color(&entity.color) {
        return Err(DatasetError::InvalidColor {
            name: name.to_string(),
            color: entity.color.clone(),
        });
    }
    Ok(())
}

/// Project every raw record and assemble the artifact.
///
/// Entities without a staging position get `grid::slot_position(ordinal)`,
/// where the ordinal is the entity's rank by name. The result is sorted by
/// population (descending, then by name). Fails on the first bad record.
pub fn build_artifact(
    raw: &RawDataset,
    opts: &GenerateOptions,
) -> Result<PlacementArtifact, DatasetError> {
    let CanvasSize { width, height } = opts.canvas;
    if width == 0 || height == 0 {
        return Err(DatasetError::InvalidCanvas { width, height });
    }
    let range = MercatorRange::new(opts.range.min, opts.range.max)?;
    if raw.is_empty() {
        return Err(DatasetError::Empty);
    }

    let mut countries = Vec::with_capacity(raw.len());
    for (ordinal, (name, entity)) in raw.iter().enumerate() {
        validate(name, entity)?;
        let correct_position = range.project(
            entity.gps.latitude,
            entity.gps.longitude,
            width as f64,
            height as f64,
        );
        countries.push(PlacedEntity {
            name: name.clone(),
            capital: entity.capital.clone(),
            correct_position,
            gps_coordinates: entity.gps,
            population: entity.population,
            color: entity.color.clone(),
            default_position: entity
                .default_position
                .unwrap_or_else(|| grid::slot_position(ordinal)),
        });
    }

    countries.sort_by(|a, b| {
        b.population
            .cmp(&a.population)
            .then_with(|| a.name.cmp(&b.name))
    });

    Ok(PlacementArtifact {
        projection: ProjectionKind::Mercator,
        canvas_size: opts.canvas,
        countries,
    })
}

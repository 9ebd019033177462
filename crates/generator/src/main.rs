use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use geodrop_shared::dataset::{self, GenerateOptions};
use geodrop_shared::models::{CanvasSize, PlacementArtifact, RawDataset};
use geodrop_shared::projection::{MercatorRange, MAX_MERCATOR_Y, MIN_MERCATOR_Y};
use tracing_subscriber::EnvFilter;

/// Regenerate the placement artifact from the raw GPS dataset.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Raw dataset: JSON object of entity name -> { capital, gps, population, color }
    #[arg(long, env = "GEODROP_INPUT", default_value = "assets/countries-gps.json")]
    input: PathBuf,

    /// Where to write the generated artifact
    #[arg(long, env = "GEODROP_OUTPUT", default_value = "assets/countries-generated.json")]
    output: PathBuf,

    /// Canvas width in pixels
    #[arg(long, env = "GEODROP_CANVAS_WIDTH", default_value_t = 900)]
    width: u32,

    /// Canvas height in pixels
    #[arg(long, env = "GEODROP_CANVAS_HEIGHT", default_value_t = 550)]
    height: u32,

    /// Mercator y mapped onto the bottom edge of the canvas
    #[arg(long, env = "GEODROP_MIN_MERC_Y", default_value_t = MIN_MERCATOR_Y, allow_negative_numbers = true)]
    min_merc_y: f64,

    /// Mercator y mapped onto the top edge of the canvas
    #[arg(long, env = "GEODROP_MAX_MERC_Y", default_value_t = MAX_MERCATOR_Y, allow_negative_numbers = true)]
    max_merc_y: f64,

    /// Print the artifact to stdout instead of writing `--output`
    #[arg(long)]
    stdout: bool,
}

impl Args {
    fn options(&self) -> GenerateOptions {
        GenerateOptions {
            canvas: CanvasSize {
                width: self.width,
                height: self.height,
            },
            range: MercatorRange {
                min: self.min_merc_y,
                max: self.max_merc_y,
            },
        }
    }
}

fn load_dataset(path: &Path) -> Result<RawDataset> {
    let json = fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let dataset: RawDataset = serde_json::from_str(&json)
        .with_context(|| format!("Failed to parse {}", path.display()))?;
    tracing::info!(path = %path.display(), entities = dataset.len(), "Loaded raw dataset");
    Ok(dataset)
}

fn generate(input: &Path, opts: &GenerateOptions) -> Result<PlacementArtifact> {
    let dataset = load_dataset(input)?;
    let artifact = dataset::build_artifact(&dataset, opts)
        .with_context(|| format!("Invalid entity in {}", input.display()))?;

    for c in &artifact.countries {
        tracing::debug!(
            name = %c.name,
            lat = c.gps_coordinates.latitude,
            lon = c.gps_coordinates.longitude,
            x = c.correct_position.x,
            y = c.correct_position.y,
            "Projected"
        );
    }
    Ok(artifact)
}

fn write_artifact(path: &Path, artifact: &PlacementArtifact) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }
    let json = artifact.to_json_pretty()?;
    fs::write(path, json).with_context(|| format!("Failed to write {}", path.display()))?;
    tracing::info!(
        path = %path.display(),
        countries = artifact.countries.len(),
        width = artifact.canvas_size.width,
        height = artifact.canvas_size.height,
        projection = %artifact.projection,
        "Wrote placement artifact"
    );
    Ok(())
}

fn log_samples(artifact: &PlacementArtifact) {
    for c in artifact.countries.iter().take(5) {
        tracing::info!(
            name = %c.name,
            capital = %c.capital,
            lat = c.gps_coordinates.latitude,
            lon = c.gps_coordinates.longitude,
            x = c.correct_position.x,
            y = c.correct_position.y,
            "Sample"
        );
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let artifact = generate(&args.input, &args.options())?;

    if args.stdout {
        println!("{}", artifact.to_json_pretty()?);
    } else {
        write_artifact(&args.output, &artifact)?;
    }
    log_samples(&artifact);
    Ok(())
}

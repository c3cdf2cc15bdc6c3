//! Fetch command - build a georeferenced mosaic for a bounding box.

use clap::Args;
use std::path::PathBuf;
use std::time::Instant;
use tilemosaic::grid::BoundingBox;
use tilemosaic::orchestrator::{MosaicError, MosaicRequest};
use tilemosaic::provider::MapStyle;
use tilemosaic::raster::GeoTiffWriter;
use tracing::info;

use crate::error::CliError;
use crate::runner::CliRunner;

/// Arguments for the fetch command.
#[derive(Debug, Args)]
pub struct FetchArgs {
    /// Western edge (longitude in degrees, or Web Mercator metres)
    #[arg(long, allow_hyphen_values = true)]
    pub west: f64,

    /// Northern edge (latitude in degrees, or Web Mercator metres)
    #[arg(long, allow_hyphen_values = true)]
    pub north: f64,

    /// Eastern edge (longitude in degrees, or Web Mercator metres)
    #[arg(long, allow_hyphen_values = true)]
    pub east: f64,

    /// Southern edge (latitude in degrees, or Web Mercator metres)
    #[arg(long, allow_hyphen_values = true)]
    pub south: f64,

    /// Zoom level (lowered to the provider's maximum if needed)
    #[arg(long)]
    pub zoom: u8,

    /// Output GeoTIFF path
    #[arg(long, short)]
    pub output: PathBuf,

    /// Tile provider (defaults to the one in config.ini)
    #[arg(long)]
    pub provider: Option<String>,

    /// Map style code: m, s, y, t, p or h (defaults to config.ini)
    #[arg(long, value_parser = parse_style)]
    pub style: Option<MapStyle>,

    /// Number of download threads (1-20)
    #[arg(long)]
    pub parallelism: Option<usize>,

    /// Tile edge length in pixels
    #[arg(long)]
    pub tile_size: Option<u32>,
}

fn parse_style(s: &str) -> Result<MapStyle, String> {
    s.parse().map_err(|e: tilemosaic::provider::ProviderError| e.to_string())
}

/// Run the fetch command.
pub fn run(args: FetchArgs) -> Result<(), CliError> {
    let runner = CliRunner::new()?;
    runner.log_startup("fetch");
    let config = runner.config();

    let bbox = BoundingBox::new(args.west, args.north, args.east, args.south)
        .map_err(MosaicError::from)?;
    let provider = args
        .provider
        .unwrap_or_else(|| config.provider.name.clone());
    let style = args.style.unwrap_or(config.provider.style);

    let engine = runner.create_engine(args.parallelism, args.tile_size)?;
    let request = MosaicRequest::new(bbox, args.zoom)
        .with_provider(provider)
        .with_style(style);

    println!("Building mosaic for:");
    println!("  Bounds: {}", bbox);
    println!("  Zoom: {}", args.zoom);
    println!("  Provider: {} ({})", request.provider(), style.description());
    println!();

    let start = Instant::now();
    let geo = engine.build_and_write(&request, &GeoTiffWriter::new(), &args.output)?;
    let elapsed = start.elapsed();

    let stats = engine.fetcher().stats().snapshot();
    info!(stats = %stats, "Fetch statistics");

    println!(
        "✓ Saved {} ({}x{} pixels, {} tiles at zoom {}) in {:.2}s",
        args.output.display(),
        geo.width(),
        geo.height(),
        geo.grid.len(),
        geo.grid.zoom(),
        elapsed.as_secs_f64()
    );
    println!("  Geotransform: {}", geo.transform);
    println!("  {}", stats);

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[derive(Parser)]
    struct TestCli {
        #[command(flatten)]
        args: FetchArgs,
    }

    #[test]
    fn test_negative_coordinates_parse() {
        let cli = TestCli::try_parse_from([
            "tilemosaic",
            "--west",
            "-0.2",
            "--north",
            "51.55",
            "--east",
            "-0.05",
            "--south",
            "51.45",
            "--zoom",
            "10",
            "--output",
            "london.tif",
        ])
        .unwrap();

        assert_eq!(cli.args.west, -0.2);
        assert_eq!(cli.args.east, -0.05);
        assert_eq!(cli.args.zoom, 10);
        assert!(cli.args.provider.is_none());
        assert!(cli.args.style.is_none());
    }

    #[test]
    fn test_style_code_parsed() {
        let cli = TestCli::try_parse_from([
            "tilemosaic", "--west", "1", "--north", "2", "--east", "3", "--south", "1",
            "--zoom", "5", "-o", "out.tif", "--style", "y",
        ])
        .unwrap();
        assert_eq!(cli.args.style, Some(MapStyle::Hybrid));
    }

    #[test]
    fn test_unknown_style_rejected() {
        let result = TestCli::try_parse_from([
            "tilemosaic", "--west", "1", "--north", "2", "--east", "3", "--south", "1",
            "--zoom", "5", "-o", "out.tif", "--style", "q",
        ]);
        assert!(result.is_err());
    }
}

//! Mosaic engine implementation

use super::types::{GeoMosaic, MosaicError, MosaicRequest};
use crate::config::FetchConfig;
use crate::coord::{CoordError, MAX_ZOOM};
use crate::fetch::ConcurrentFetcher;
use crate::georef::compute_transform;
use crate::grid::TileGridPlanner;
use crate::mosaic::MosaicAssembler;
use crate::provider::{HttpClient, ProviderTable};
use crate::raster::{GeoTiffWriter, RasterWriter};
use std::path::Path;
use std::sync::Arc;
use std::time::Instant;
use tracing::{info, warn};

/// Runs the whole pipeline for a request: plan, fetch, assemble, georeference.
///
/// # Example
///
/// ```ignore
/// use tilemosaic::config::FetchConfig;
/// use tilemosaic::grid::BoundingBox;
/// use tilemosaic::orchestrator::{MosaicEngine, MosaicRequest};
/// use tilemosaic::provider::{ProviderTable, ReqwestClient};
/// use tilemosaic::raster::GeoTiffWriter;
/// use std::sync::Arc;
///
/// let engine = MosaicEngine::new(
///     Arc::new(ReqwestClient::new()?),
///     ProviderTable::builtin(),
///     FetchConfig::default(),
///     256,
/// )?;
/// let bbox = BoundingBox::new(-0.2, 51.55, -0.05, 51.45)?;
/// let request = MosaicRequest::new(bbox, 10).with_provider("esri");
/// engine.build_and_write(&request, &GeoTiffWriter::new(), "london.tif".as_ref())?;
/// ```
pub struct MosaicEngine {
    planner: TileGridPlanner,
    fetcher: ConcurrentFetcher,
    assembler: MosaicAssembler,
}

impl MosaicEngine {
    /// Creates an engine.
    ///
    /// # Errors
    ///
    /// Parallelism outside 1..=20 or a zero tile size is rejected here,
    /// before any request is made.
    pub fn new(
        client: Arc<dyn HttpClient>,
        table: ProviderTable,
        config: FetchConfig,
        tile_size: u32,
    ) -> Result<Self, MosaicError> {
        let fetcher = ConcurrentFetcher::new(client, config)?;
        let assembler = MosaicAssembler::new(tile_size)?;
        Ok(Self {
            planner: TileGridPlanner::new(table),
            fetcher,
            assembler,
        })
    }

    pub fn providers(&self) -> &ProviderTable {
        self.planner.table()
    }

    pub fn fetcher(&self) -> &ConcurrentFetcher {
        &self.fetcher
    }

    /// Builds the georeferenced mosaic for `request`.
    ///
    /// A zoom above the provider's ceiling is lowered to the ceiling before
    /// planning. A grid whose canvas could not be written out is rejected
    /// before any tile is requested. Any failure aborts the build; no partial
    /// mosaic is returned.
    pub fn build(&self, request: &MosaicRequest) -> Result<GeoMosaic, MosaicError> {
        let start = Instant::now();

        let provider = self.planner.table().resolve(request.provider())?.clone();

        let zoom = provider.clamp_zoom(request.zoom());
        if zoom < request.zoom() {
            warn!(
                provider = %provider.name,
                requested = request.zoom(),
                max_zoom = provider.max_zoom,
                "Requested zoom above provider ceiling, clamping"
            );
        }
        if zoom > MAX_ZOOM {
            return Err(CoordError::InvalidZoom(zoom).into());
        }

        let grid = self.planner.plan_grid(request.bbox(), zoom)?;
        let (width, height) = self.assembler.canvas_size(&grid)?;
        GeoTiffWriter::check_size(width, height)?;
        let urls = self
            .planner
            .build_urls(&grid, &provider.name, request.style())?;
        info!(
            provider = %provider.name,
            style = request.style().code(),
            grid = %grid,
            tiles = urls.len(),
            "Fetching tiles"
        );

        let payloads = self.fetcher.fetch_all(&urls)?;
        let mosaic = self.assembler.assemble(&grid, &payloads)?;
        let transform = compute_transform(&grid, &provider, mosaic.width(), mosaic.height())?;

        info!(
            width = mosaic.width(),
            height = mosaic.height(),
            transform = %transform,
            elapsed_ms = start.elapsed().as_millis() as u64,
            "Mosaic built"
        );

        Ok(GeoMosaic {
            mosaic,
            transform,
            grid,
            provider,
        })
    }

    /// Builds the mosaic and writes it to `path`.
    ///
    /// Nothing is written unless the build succeeds, and the writer leaves
    /// no file behind when it fails.
    pub fn build_and_write(
        &self,
        request: &MosaicRequest,
        writer: &dyn RasterWriter,
        path: &Path,
    ) -> Result<GeoMosaic, MosaicError> {
        let geo = self.build(request)?;
        writer.write(&geo.to_planes(), &geo.transform, path)?;
        Ok(geo)
    }
}

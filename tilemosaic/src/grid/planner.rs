//! Tile grid planning and URL construction.

use super::types::{BoundingBox, GridError, TileGrid};
use crate::coord::{geo_to_tile_index, tile_to_quadkey, GeoPoint, TileIndex};
use crate::provider::{MapStyle, ProviderError, ProviderTable, ProviderTemplate};
use tracing::{debug, warn};

/// Turns bounding boxes into tile grids and tiles into provider URLs.
#[derive(Debug, Clone)]
pub struct TileGridPlanner {
    table: ProviderTable,
}

impl TileGridPlanner {
    pub fn new(table: ProviderTable) -> Self {
        Self { table }
    }

    pub fn table(&self) -> &ProviderTable {
        &self.table
    }

    /// Computes the block of tiles covering `bbox` at `zoom`.
    ///
    /// The north-west corner gives the origin tile and the south-east corner
    /// the last one; both ends are inclusive.
    pub fn plan_grid(&self, bbox: &BoundingBox, zoom: u8) -> Result<TileGrid, GridError> {
        let nw = geo_to_tile_index(GeoPoint::new(bbox.west(), bbox.north()), zoom)?;
        let se = geo_to_tile_index(GeoPoint::new(bbox.east(), bbox.south()), zoom)?;

        let lenx = se.x as i64 - nw.x as i64 + 1;
        let leny = se.y as i64 - nw.y as i64 + 1;
        if lenx <= 0 || leny <= 0 {
            return Err(GridError::EmptyGrid);
        }

        let grid = TileGrid::new(nw.x, nw.y, lenx as u32, leny as u32, zoom)?;
        debug!(bbox = %bbox, grid = %grid, "Planned tile grid");
        Ok(grid)
    }

    /// Builds the download URL for one tile.
    ///
    /// A tile above the provider's zoom ceiling is replaced by its ancestor
    /// at the ceiling.
    pub fn build_url(
        &self,
        provider: &str,
        tile: TileIndex,
        style: MapStyle,
    ) -> Result<String, ProviderError> {
        let provider = self.table.resolve(provider)?;
        if tile.zoom > provider.max_zoom {
            debug!(
                provider = %provider.name,
                requested = tile.zoom,
                max_zoom = provider.max_zoom,
                "Zoom above provider maximum, using ancestor tile"
            );
        }
        self.render(provider, tile, style)
    }

    /// Builds URLs for every tile in `grid`, in grid order.
    pub fn build_urls(
        &self,
        grid: &TileGrid,
        provider: &str,
        style: MapStyle,
    ) -> Result<Vec<String>, ProviderError> {
        let provider = self.table.resolve(provider)?;
        if grid.zoom() > provider.max_zoom {
            warn!(
                provider = %provider.name,
                requested = grid.zoom(),
                max_zoom = provider.max_zoom,
                tiles = grid.len(),
                "Zoom above provider maximum, using ancestor tiles"
            );
        }
        grid.tiles()
            .map(|tile| self.render(provider, tile, style))
            .collect()
    }

    fn render(
        &self,
        provider: &ProviderTemplate,
        tile: TileIndex,
        style: MapStyle,
    ) -> Result<String, ProviderError> {
        let template = self.template_for(provider)?;

        let zoom = provider.clamp_zoom(tile.zoom);
        let tile = if zoom < tile.zoom {
            let shift = tile.zoom - zoom;
            TileIndex::new(tile.x >> shift, tile.y >> shift, zoom)
        } else {
            tile
        };

        let mut url = template
            .replace("{x}", &tile.x.to_string())
            .replace("{y}", &tile.y.to_string())
            .replace("{z}", &tile.zoom.to_string())
            .replace("{style}", style.code());
        if url.contains("{quadkey}") {
            url = url.replace("{quadkey}", &tile_to_quadkey(&tile));
        }
        Ok(url)
    }

    fn template_for<'a>(&'a self, provider: &'a ProviderTemplate) -> Result<&'a str, ProviderError> {
        if !provider.template.is_empty() {
            return Ok(&provider.template);
        }
        match self.table.default_template() {
            Some(fallback) if !fallback.template.is_empty() => {
                debug!(
                    provider = %provider.name,
                    fallback = %fallback.name,
                    "Empty template, using default provider"
                );
                Ok(&fallback.template)
            }
            _ => Err(ProviderError::InvalidTemplate {
                name: provider.name.clone(),
                reason: "template is empty and no default provider is available".to_string(),
            }),
        }
    }
}

impl Default for TileGridPlanner {
    fn default() -> Self {
        Self::new(ProviderTable::builtin())
    }
}

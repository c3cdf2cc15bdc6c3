//! Tile assembly implementation

use super::types::{AssemblyError, Mosaic};
use crate::grid::TileGrid;
use image::{DynamicImage, ImageError, ImageReader, RgbaImage};
use std::io::Cursor;
use tracing::{debug, info};

/// Pastes decoded tiles into a single canvas.
///
/// Tile `i` of a grid lands at pixel offset
/// `((i % lenx) * tile_size, (i / lenx) * tile_size)`. Assembly is
/// deterministic: the same payloads always produce the same canvas.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MosaicAssembler {
    tile_size: u32,
}

impl MosaicAssembler {
    pub fn new(tile_size: u32) -> Result<Self, AssemblyError> {
        if tile_size == 0 {
            return Err(AssemblyError::InvalidTileSize(tile_size));
        }
        Ok(Self { tile_size })
    }

    pub fn tile_size(&self) -> u32 {
        self.tile_size
    }

    /// Canvas size in pixels for `grid`.
    pub fn canvas_size(&self, grid: &TileGrid) -> Result<(u32, u32), AssemblyError> {
        let too_large = || AssemblyError::CanvasTooLarge {
            lenx: grid.lenx(),
            leny: grid.leny(),
            tile_size: self.tile_size,
        };
        let width = grid.lenx().checked_mul(self.tile_size).ok_or_else(too_large)?;
        let height = grid.leny().checked_mul(self.tile_size).ok_or_else(too_large)?;
        Ok((width, height))
    }

    /// Decodes every payload and copies it into its grid cell.
    ///
    /// # Errors
    ///
    /// Fails if the payload count differs from the grid, any tile fails to
    /// decode, or any tile is not `tile_size` pixels square.
    pub fn assemble(&self, grid: &TileGrid, payloads: &[Vec<u8>]) -> Result<Mosaic, AssemblyError> {
        if payloads.len() != grid.len() {
            return Err(AssemblyError::CountMismatch {
                expected: grid.len(),
                actual: payloads.len(),
            });
        }

        let (width, height) = self.canvas_size(grid)?;
        let mut canvas = RgbaImage::new(width, height);

        for (index, bytes) in payloads.iter().enumerate() {
            let tile = self.decode(index, bytes)?;
            let (col, row) = grid.cell(index).ok_or(AssemblyError::CountMismatch {
                expected: grid.len(),
                actual: payloads.len(),
            })?;

            let x = col * self.tile_size;
            let y = row * self.tile_size;
            image::imageops::replace(&mut canvas, &tile, x.into(), y.into());
            debug!(index = index, x = x, y = y, "Tile placed");
        }

        let rgb = DynamicImage::ImageRgba8(canvas).into_rgb8();
        info!(width = width, height = height, tiles = payloads.len(), "Mosaic assembled");
        Ok(Mosaic::new(rgb))
    }

    fn decode(&self, index: usize, bytes: &[u8]) -> Result<RgbaImage, AssemblyError> {
        let tile = ImageReader::new(Cursor::new(bytes))
            .with_guessed_format()
            .map_err(|e| AssemblyError::Decode {
                index,
                source: ImageError::IoError(e),
            })?
            .decode()
            .map_err(|source| AssemblyError::Decode { index, source })?
            .to_rgba8();

        if tile.width() != self.tile_size || tile.height() != self.tile_size {
            return Err(AssemblyError::TileSize {
                index,
                expected: self.tile_size,
                width: tile.width(),
                height: tile.height(),
            });
        }
        Ok(tile)
    }
}

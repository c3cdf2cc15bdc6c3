//! Mosaic type definitions

use image::RgbImage;
use std::fmt;

/// Errors that can occur while assembling tiles into a canvas.
#[derive(Debug)]
pub enum AssemblyError {
    /// Number of tile payloads differs from the grid size
    CountMismatch { expected: usize, actual: usize },
    /// A tile could not be decoded
    Decode {
        index: usize,
        source: image::ImageError,
    },
    /// A decoded tile has the wrong pixel size
    TileSize {
        index: usize,
        expected: u32,
        width: u32,
        height: u32,
    },
    /// Tile size of zero
    InvalidTileSize(u32),
    /// Canvas dimensions overflow
    CanvasTooLarge { lenx: u32, leny: u32, tile_size: u32 },
}

impl fmt::Display for AssemblyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AssemblyError::CountMismatch { expected, actual } => write!(
                f,
                "Expected {} tiles, got {}",
                expected, actual
            ),
            AssemblyError::Decode { index, source } => {
                write!(f, "Failed to decode tile {}: {}", index, source)
            }
            AssemblyError::TileSize {
                index,
                expected,
                width,
                height,
            } => write!(
                f,
                "Tile {} is {}x{} pixels, expected {}x{}",
                index, width, height, expected, expected
            ),
            AssemblyError::InvalidTileSize(size) => {
                write!(f, "Invalid tile size: {} (must be positive)", size)
            }
            AssemblyError::CanvasTooLarge {
                lenx,
                leny,
                tile_size,
            } => write!(
                f,
                "Canvas of {}x{} tiles at {} px per tile is too large",
                lenx, leny, tile_size
            ),
        }
    }
}

impl std::error::Error for AssemblyError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AssemblyError::Decode { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// An assembled RGB canvas.
#[derive(Debug, Clone, PartialEq)]
pub struct Mosaic {
    image: RgbImage,
}

impl Mosaic {
    pub(super) fn new(image: RgbImage) -> Self {
        Self { image }
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    pub fn as_rgb(&self) -> &RgbImage {
        &self.image
    }

    pub fn into_rgb(self) -> RgbImage {
        self.image
    }

    /// Splits the canvas into separate red, green and blue planes.
    pub fn to_planes(&self) -> RasterPlanes {
        let pixels = self.image.width() as usize * self.image.height() as usize;
        let mut red = Vec::with_capacity(pixels);
        let mut green = Vec::with_capacity(pixels);
        let mut blue = Vec::with_capacity(pixels);

        for pixel in self.image.pixels() {
            red.push(pixel[0]);
            green.push(pixel[1]);
            blue.push(pixel[2]);
        }

        RasterPlanes {
            width: self.image.width(),
            height: self.image.height(),
            red,
            green,
            blue,
        }
    }
}

/// Three row-major 8-bit bands of equal size.
///
/// This is the hand-off format for raster writers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RasterPlanes {
    pub width: u32,
    pub height: u32,
    pub red: Vec<u8>,
    pub green: Vec<u8>,
    pub blue: Vec<u8>,
}

impl RasterPlanes {
    pub fn bands(&self) -> [&[u8]; 3] {
        [&self.red, &self.green, &self.blue]
    }

    /// Pixels per band.
    pub fn pixel_count(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// True when every band holds exactly `width * height` bytes.
    pub fn is_consistent(&self) -> bool {
        let n = self.pixel_count();
        self.red.len() == n && self.green.len() == n && self.blue.len() == n
    }
}

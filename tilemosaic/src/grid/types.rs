//! Grid type definitions

use crate::coord::{
    normalize_longitude, projected_to_geo, CoordError, ProjectedPoint, TileIndex, MAX_ABS_LAT,
    MAX_ABS_LON,
};
use std::fmt;

/// Errors that can occur while planning a tile grid.
#[derive(Debug, Clone, PartialEq)]
pub enum GridError {
    /// Bounding box is malformed
    InvalidBounds(String),
    /// A corner could not be converted to a tile index
    Coord(CoordError),
    /// The box covers no tiles
    EmptyGrid,
}

impl fmt::Display for GridError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GridError::InvalidBounds(reason) => write!(f, "Invalid bounding box: {}", reason),
            GridError::Coord(e) => write!(f, "{}", e),
            GridError::EmptyGrid => write!(f, "Bounding box covers no tiles"),
        }
    }
}

impl std::error::Error for GridError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            GridError::Coord(e) => Some(e),
            _ => None,
        }
    }
}

impl From<CoordError> for GridError {
    fn from(e: CoordError) -> Self {
        GridError::Coord(e)
    }
}

/// A geographic rectangle in WGS84 degrees.
///
/// Always satisfies `west < east` and `south < north`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    west: f64,
    north: f64,
    east: f64,
    south: f64,
}

impl BoundingBox {
    /// Creates a bounding box from its four edges.
    ///
    /// If any longitude exceeds 360 in magnitude, or any latitude exceeds 90,
    /// the values are taken to be Web Mercator metres and inverse-projected.
    /// Longitudes are then wrapped into (-180, 180].
    ///
    /// # Errors
    ///
    /// Returns [`GridError::InvalidBounds`] for non-finite edges, edges still
    /// out of range after projection, or an inverted/degenerate box.
    pub fn new(west: f64, north: f64, east: f64, south: f64) -> Result<Self, GridError> {
        if ![west, north, east, south].iter().all(|v| v.is_finite()) {
            return Err(GridError::InvalidBounds(
                "edges must be finite numbers".to_string(),
            ));
        }

        let (mut west, mut north, mut east, mut south) = (west, north, east, south);
        if Self::looks_projected(west, north, east, south) {
            let nw = projected_to_geo(ProjectedPoint::new(west, north));
            let se = projected_to_geo(ProjectedPoint::new(east, south));
            west = nw.lon;
            north = nw.lat;
            east = se.lon;
            south = se.lat;
        }

        for lon in [west, east] {
            if lon.abs() > MAX_ABS_LON {
                return Err(GridError::InvalidBounds(format!(
                    "longitude {} out of range",
                    lon
                )));
            }
        }
        for lat in [north, south] {
            if lat.abs() > MAX_ABS_LAT {
                return Err(GridError::InvalidBounds(format!(
                    "latitude {} out of range",
                    lat
                )));
            }
        }

        let west = normalize_longitude(west);
        let east = normalize_longitude(east);
        if west >= east {
            return Err(GridError::InvalidBounds(format!(
                "west ({}) must be less than east ({})",
                west, east
            )));
        }
        if south >= north {
            return Err(GridError::InvalidBounds(format!(
                "south ({}) must be less than north ({})",
                south, north
            )));
        }

        Ok(Self {
            west,
            north,
            east,
            south,
        })
    }

    fn looks_projected(west: f64, north: f64, east: f64, south: f64) -> bool {
        west.abs() > MAX_ABS_LON
            || east.abs() > MAX_ABS_LON
            || north.abs() > MAX_ABS_LAT
            || south.abs() > MAX_ABS_LAT
    }

    pub fn west(&self) -> f64 {
        self.west
    }

    pub fn north(&self) -> f64 {
        self.north
    }

    pub fn east(&self) -> f64 {
        self.east
    }

    pub fn south(&self) -> f64 {
        self.south
    }
}

impl fmt::Display for BoundingBox {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[W {:.6}, N {:.6}, E {:.6}, S {:.6}]",
            self.west, self.north, self.east, self.south
        )
    }
}

/// Rectangular block of tiles at one zoom level.
///
/// Tiles are addressed by a sequence position in row-major order:
/// `row = i / lenx`, `col = i % lenx`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TileGrid {
    x_min: u32,
    y_min: u32,
    lenx: u32,
    leny: u32,
    zoom: u8,
}

impl TileGrid {
    /// Creates a grid from its origin tile and dimensions.
    pub fn new(x_min: u32, y_min: u32, lenx: u32, leny: u32, zoom: u8) -> Result<Self, GridError> {
        if lenx == 0 || leny == 0 {
            return Err(GridError::EmptyGrid);
        }
        Ok(Self {
            x_min,
            y_min,
            lenx,
            leny,
            zoom,
        })
    }

    pub fn x_min(&self) -> u32 {
        self.x_min
    }

    pub fn y_min(&self) -> u32 {
        self.y_min
    }

    /// Last tile column, inclusive.
    pub fn x_max(&self) -> u32 {
        self.x_min + self.lenx - 1
    }

    /// Last tile row, inclusive.
    pub fn y_max(&self) -> u32 {
        self.y_min + self.leny - 1
    }

    pub fn lenx(&self) -> u32 {
        self.lenx
    }

    pub fn leny(&self) -> u32 {
        self.leny
    }

    pub fn zoom(&self) -> u8 {
        self.zoom
    }

    /// Total number of tiles.
    #[inline]
    pub fn len(&self) -> usize {
        self.lenx as usize * self.leny as usize
    }

    /// Always false; an empty grid cannot be constructed.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns `(col, row)` of the tile at sequence position `i`.
    #[inline]
    pub fn cell(&self, i: usize) -> Option<(u32, u32)> {
        if i >= self.len() {
            return None;
        }
        let lenx = self.lenx as usize;
        Some(((i % lenx) as u32, (i / lenx) as u32))
    }

    /// Returns the tile index at sequence position `i`.
    pub fn tile_at(&self, i: usize) -> Option<TileIndex> {
        self.cell(i)
            .map(|(col, row)| TileIndex::new(self.x_min + col, self.y_min + row, self.zoom))
    }

    /// Returns an iterator over all tiles in row-major order.
    #[inline]
    pub fn tiles(&self) -> TileGridIter {
        TileGridIter {
            grid: *self,
            current: 0,
        }
    }
}

impl fmt::Display for TileGrid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "z{} x {}..={} y {}..={} ({}x{} tiles)",
            self.zoom,
            self.x_min,
            self.x_max(),
            self.y_min,
            self.y_max(),
            self.lenx,
            self.leny
        )
    }
}

/// Iterator over all tiles in a grid.
///
/// Yields rows top to bottom, each row west to east.
#[derive(Debug, Clone)]
pub struct TileGridIter {
    grid: TileGrid,
    current: usize,
}

impl Iterator for TileGridIter {
    type Item = TileIndex;

    fn next(&mut self) -> Option<Self::Item> {
        let tile = self.grid.tile_at(self.current)?;
        self.current += 1;
        Some(tile)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.grid.len() - self.current;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for TileGridIter {
    fn len(&self) -> usize {
        self.grid.len() - self.current
    }
}

//! Tile grid planning
//!
//! Converts a bounding box and zoom level into the rectangular block of tiles
//! covering it, and renders provider URLs for those tiles in a fixed
//! row-major order that the fetcher and assembler both rely on.

mod planner;
mod types;

pub use planner::TileGridPlanner;
pub use types::{BoundingBox, GridError, TileGrid, TileGridIter};

//! Mosaic assembly
//!
//! Decodes fetched tiles and pastes them into a single RGB canvas laid out
//! exactly like the tile grid.

mod assembler;
mod types;

pub use assembler::MosaicAssembler;
pub use types::{AssemblyError, Mosaic, RasterPlanes};

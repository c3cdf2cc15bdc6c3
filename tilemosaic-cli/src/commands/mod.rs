//! CLI command implementations.
//!
//! Each subcommand has its own module with argument definitions and handlers.
//!
//! # Command Modules
//!
//! - [`config`] - Configuration management (path, show, init)
//! - [`fetch`] - Build a GeoTIFF mosaic for a bounding box
//! - [`providers`] - List tile providers and map styles

pub mod config;
pub mod fetch;
pub mod providers;

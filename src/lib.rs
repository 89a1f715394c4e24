//! Displacement maps for a "liquid glass" refraction effect.
//!
//! [`generate`] turns an element's size, corner radius and bezel width into an
//! RGBA raster whose R/G channels hold per-pixel X/Y offsets (128 = none).
//! Feed it to an SVG `feDisplacementMap` (see [`ops::filter::svg_filter`]) or
//! any filter that reads displacement from colour channels.

pub mod cli;
pub mod error;
pub mod io;
pub mod logger;
pub mod ops;
pub mod settings;

pub use error::GlassError;
pub use io::MapFormat;
pub use ops::displacement::{generate, GlassShape, Zone, NEUTRAL};
pub use settings::GlassSettings;

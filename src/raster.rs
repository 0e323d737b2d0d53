//! Raster fixtures: pixel grids, the PNG encoder and the fixed minimal JPEG.

/// RGBA pixel grids and the gradient colour rules.
pub mod grid;
pub mod jpeg;
/// PNG encoder.
pub mod png;

//! Error type for the visibility engine.
//!
//! Per-frame numerical degradation (parallel rays, missing tile metadata)
//! never surfaces here. These variants are caller bugs or bad input.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum VisionError {
    #[error("Tile size must be finite and positive, got {0}")]
    InvalidTileSize(f64),
    #[error("Max view distance must be finite and positive, got {0}")]
    InvalidMaxDistance(f64),
    #[error("Grid of {width}x{height} tiles does not match its {cells} cells")]
    GridShape {
        width: usize,
        height: usize,
        cells: usize,
    },
    #[error("Invalid vision request JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Fail fast on a tile size no map loader should ever produce.
pub fn check_tile_size(tile_size: f64) -> Result<(), VisionError> {
    if tile_size.is_finite() && tile_size > 0.0 {
        Ok(())
    } else {
        Err(VisionError::InvalidTileSize(tile_size))
    }
}

//! Tile-map visibility engine.
//!
//! Turns a tile grid's sight-blocking cells into wall segments, sweeps
//! those segments into a visibility polygon per viewer, and places each
//! wall's shadow edge against the tile's drawn pixels.
//!
//! [`compute_json`] runs the whole pipeline on a JSON request and returns
//! a JSON result, for renderers that talk to the engine over a string
//! boundary.

pub mod error;
pub mod geometry;
pub mod grid;
pub mod segments;
pub mod shadow;
pub mod types;
pub mod visibility;

pub use error::VisionError;
pub use grid::{TileCell, TileGrid, TileMap, TileProperties};
pub use segments::extract_segments;
pub use shadow::{calculate_shadow_offset, default_shadow_offset, offset_segment, shadow_offset};
pub use types::{EdgeType, Point, Segment, ShadowEdge, VisionConfig, VisionRequest, VisionResult};
pub use visibility::{compute_visibility_polygon, compute_visibility_polygons, VisibilitySolver};

/// Run extraction, visibility and shadow placement for one request.
pub fn compute(request: &VisionRequest) -> Result<VisionResult, VisionError> {
    request.grid.validate()?;
    let config = request.config();
    let grid = &request.grid;

    let segments = extract_segments(grid, &config)?;
    let polygons =
        compute_visibility_polygons(&request.viewers, &segments, request.max_distance, &config)?;
    let areas = polygons.iter().map(|p| geometry::polygon_area(p)).collect();
    let map = request.metadata_shadows.then_some(grid);
    let shadows = shadow::shadow_segments(&segments, grid.tile_size, map, &config);

    Ok(VisionResult {
        segments,
        polygons,
        areas,
        shadows,
    })
}

/// Takes a JSON string matching [`VisionRequest`] and returns a JSON
/// string matching [`VisionResult`].
pub fn compute_json(request_json: &str) -> Result<String, VisionError> {
    let request: VisionRequest = serde_json::from_str(request_json)?;
    let result = compute(&request)?;
    Ok(serde_json::to_string(&result)?)
}

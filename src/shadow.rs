//! Shadow inset placement for wall edges.
//!
//! A wall tile's drawn pixels rarely fill its grid cell, so a shadow cast
//! from the raw grid edge floats away from the art. The offset returned
//! here is how far to push the edge into its tile before casting.

use log::trace;

use crate::grid::TileMap;
use crate::types::{EdgeType, Segment, ShadowEdge, VisionConfig, VisualBounds};

/// Tile property holding the drawn pixel extents.
pub const VISUAL_BOUNDS_KEY: &str = "visual_bounds";

/// Coarse inset used when no metadata is consulted: half a tile.
pub fn default_shadow_offset(tile_size: f64) -> f64 {
    tile_size / 2.0
}

/// Inset from the segment's edge to the far side of its tile's drawn pixels.
///
/// Missing definitions, a missing or malformed `visual_bounds`, or a
/// missing key all degrade to `config.fallback_shadow_offset`.
pub fn calculate_shadow_offset<M: TileMap + ?Sized>(
    segment: &Segment,
    tile_size: f64,
    map: &M,
    config: &VisionConfig,
) -> f64 {
    let bounds = map
        .tile_definition_at(segment.tile_x, segment.tile_y)
        .and_then(|def| def.get(VISUAL_BOUNDS_KEY))
        .and_then(VisualBounds::from_value);
    let Some(bounds) = bounds else {
        trace!(
            "no visual bounds for tile ({}, {}), using fallback offset",
            segment.tile_x,
            segment.tile_y
        );
        return config.fallback_shadow_offset;
    };

    let offset = match segment.edge {
        EdgeType::Top => bounds.bottom.map(|b| b + 1.0),
        EdgeType::Bottom => bounds.top.map(|t| tile_size - t + 1.0),
        EdgeType::Left => bounds.right.map(|r| r + 1.0),
        EdgeType::Right => bounds.left.map(|l| tile_size - l + 1.0),
    };
    offset.unwrap_or_else(|| {
        trace!(
            "tile ({}, {}) bounds lack the key for a {:?} edge",
            segment.tile_x,
            segment.tile_y,
            segment.edge
        );
        config.fallback_shadow_offset
    })
}

/// Metadata-driven offset when a map is supplied, half a tile otherwise.
pub fn shadow_offset<M: TileMap + ?Sized>(
    segment: &Segment,
    tile_size: f64,
    map: Option<&M>,
    config: &VisionConfig,
) -> f64 {
    match map {
        Some(map) => calculate_shadow_offset(segment, tile_size, map, config),
        None => default_shadow_offset(tile_size),
    }
}

/// Copy of `segment` pushed `offset` units into its own tile.
pub fn offset_segment(segment: &Segment, offset: f64) -> Segment {
    let (ix, iy) = segment.edge.inward();
    let mut shifted = *segment;
    shifted.a.x += ix * offset;
    shifted.a.y += iy * offset;
    shifted.b.x += ix * offset;
    shifted.b.y += iy * offset;
    shifted
}

/// Segment shifted by the default half-tile inset.
pub fn default_shadow_segment(segment: &Segment, tile_size: f64) -> Segment {
    offset_segment(segment, default_shadow_offset(tile_size))
}

/// Shadow edges for a whole segment list.
pub fn shadow_segments<M: TileMap + ?Sized>(
    segments: &[Segment],
    tile_size: f64,
    map: Option<&M>,
    config: &VisionConfig,
) -> Vec<ShadowEdge> {
    segments
        .iter()
        .map(|segment| {
            let offset = shadow_offset(segment, tile_size, map, config);
            ShadowEdge {
                segment: *segment,
                offset,
                shifted: offset_segment(segment, offset),
            }
        })
        .collect()
}

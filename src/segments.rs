//! Wall segment extraction from a tile grid's occlusion flags.
//!
//! Every sight-blocking tile contributes one segment per exposed edge.
//! Colinear neighbours are never merged: shadow placement reads each
//! tile's own visual bounds, which can differ along a straight wall.

use log::debug;

use crate::error::{check_tile_size, VisionError};
use crate::grid::TileMap;
use crate::types::{EdgeType, Point, Segment, VisionConfig};

/// Extract the exposed wall edges of every blocking tile.
///
/// Tiles are visited in row-major order and each tile's edges are
/// emitted top, right, bottom, left. Out-of-range neighbours are open.
/// Stacked blockers with different tile names get a seam top edge
/// between them, so such wall stacks yield internal segments.
pub fn extract_segments<M: TileMap + ?Sized>(
    map: &M,
    config: &VisionConfig,
) -> Result<Vec<Segment>, VisionError> {
    let size = map.tile_size();
    check_tile_size(size)?;

    let mut segments = Vec::new();
    for y in 0..map.height() as i32 {
        for x in 0..map.width() as i32 {
            if !map.blocks_sight(x, y) {
                continue;
            }
            if top_edge_exposed(map, config, x, y) {
                segments.push(tile_edge(x, y, size, EdgeType::Top));
            }
            if !map.blocks_sight(x + 1, y) {
                segments.push(tile_edge(x, y, size, EdgeType::Right));
            }
            if !map.blocks_sight(x, y + 1) {
                segments.push(tile_edge(x, y, size, EdgeType::Bottom));
            }
            if !map.blocks_sight(x - 1, y) {
                segments.push(tile_edge(x, y, size, EdgeType::Left));
            }
        }
    }

    debug!(
        "extracted {} wall segments from {}x{} grid",
        segments.len(),
        map.width(),
        map.height()
    );
    Ok(segments)
}

/// Top edges also look at tile identity.
///
/// Under an open cell the edge is always exposed. Under another blocker
/// it is a seam between two differently drawn tiles, unless the lower
/// tile is a wall bottom: those are the lower half of the wall above and
/// never get a top edge there.
fn top_edge_exposed<M: TileMap + ?Sized>(map: &M, config: &VisionConfig, x: i32, y: i32) -> bool {
    if !map.blocks_sight(x, y - 1) {
        return true;
    }
    let name = map.tile_name_at(x, y);
    if config.is_wall_bottom(name) {
        return false;
    }
    name != map.tile_name_at(x, y - 1)
}

/// Build one tile edge, wound with the open side on the positive cross.
///
/// Corners are exact index * size products so shared corners of
/// neighbouring tiles compare bit-equal.
pub fn tile_edge(x: i32, y: i32, size: f64, edge: EdgeType) -> Segment {
    let x0 = x as f64 * size;
    let x1 = (x + 1) as f64 * size;
    let y0 = y as f64 * size;
    let y1 = (y + 1) as f64 * size;
    let (a, b) = match edge {
        EdgeType::Top => (Point::new(x1, y0), Point::new(x0, y0)),
        EdgeType::Right => (Point::new(x1, y1), Point::new(x1, y0)),
        EdgeType::Bottom => (Point::new(x0, y1), Point::new(x1, y1)),
        EdgeType::Left => (Point::new(x0, y0), Point::new(x0, y1)),
    };
    Segment {
        a,
        b,
        tile_x: x,
        tile_y: y,
        edge,
    }
}

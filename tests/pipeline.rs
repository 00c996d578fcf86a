//! End-to-end checks through the public API and the JSON boundary.

use vision_rs::geometry::{distance, point_in_polygon};
use vision_rs::{
    compute, compute_json, EdgeType, Point, TileGrid, VisionError, VisionRequest, VisionResult,
};

fn init_logs() {
    let _ = env_logger::builder().is_test(true).try_init();
}

const REQUEST_JSON: &str = r#"{
  "grid": {
    "width": 3,
    "height": 3,
    "tile_size": 32.0,
    "cells": [
      {}, {"name": "nwt", "blocks_sight": true}, {},
      {}, {"name": "nwb", "blocks_sight": true,
           "properties": {"visual_bounds": {"top": 0, "bottom": 10, "left": 2, "right": 29}}}, {},
      {}, {}, {}
    ]
  },
  "viewers": [{"x": 16.0, "y": 80.0}, {"x": 80.0, "y": 88.0}],
  "max_distance": 64.0
}"#;

#[test]
fn json_pipeline_produces_segments_polygons_and_shadows() {
    init_logs();
    let out = compute_json(REQUEST_JSON).expect("compute");
    let result: VisionResult = serde_json::from_str(&out).expect("result json");

    // Column of two walls: upper has top/right/left, lower has right/bottom/left.
    assert_eq!(result.segments.len(), 6);
    assert!(!result
        .segments
        .iter()
        .any(|s| s.tile_y == 1 && s.edge == EdgeType::Top));

    assert_eq!(result.polygons.len(), 2);
    assert_eq!(result.areas.len(), 2);
    for (poly, area) in result.polygons.iter().zip(&result.areas) {
        // 8 corners minus the 2 shared ones, 3 rays each.
        assert_eq!(poly.len(), 6 * 3);
        assert!(*area > 0.0);
    }

    let bottom = result
        .shadows
        .iter()
        .find(|s| s.segment.tile_y == 1 && s.segment.edge == EdgeType::Bottom)
        .expect("bottom shadow");
    assert_eq!(bottom.offset, 32.0 - 0.0 + 1.0);
    assert_eq!(bottom.shifted.a.y, 64.0 - 33.0);

    // The upper tile has no metadata.
    let top = result
        .shadows
        .iter()
        .find(|s| s.segment.tile_y == 0 && s.segment.edge == EdgeType::Top)
        .expect("top shadow");
    assert_eq!(top.offset, 2.0);
}

#[test]
fn viewer_beside_pillar_cannot_see_behind_it() {
    init_logs();
    let grid = TileGrid::from_rows(
        &[
            "#######",
            "#.....#",
            "#..#..#",
            "#..#..#",
            "#..#..#",
            "#.....#",
            "#######",
        ],
        32.0,
    )
    .unwrap();
    let viewer = Point::new(48.0, 112.0);
    let req = VisionRequest {
        grid,
        viewers: vec![viewer],
        max_distance: 500.0,
        config: None,
        metadata_shadows: false,
    };
    let result = compute(&req).expect("compute");
    let poly = &result.polygons[0];
    assert!(point_in_polygon(Point::new(80.0, 112.0), poly));
    assert!(point_in_polygon(Point::new(48.0, 40.0), poly));
    assert!(!point_in_polygon(Point::new(160.0, 112.0), poly));
    // Without metadata every shadow sits half a tile in.
    assert!(result.shadows.iter().all(|s| s.offset == 16.0));
    assert!(poly.iter().all(|p| distance(viewer, *p) <= 500.0 + 1e-9));
}

#[test]
fn malformed_json_is_an_error() {
    assert!(matches!(compute_json("{not json"), Err(VisionError::Json(_))));
}

#[test]
fn grid_shape_mismatch_is_an_error() {
    let json = r#"{
        "grid": {"width": 2, "height": 2, "tile_size": 32.0, "cells": [{}]},
        "max_distance": 10.0
    }"#;
    assert!(matches!(
        compute_json(json),
        Err(VisionError::GridShape { width: 2, height: 2, cells: 1 })
    ));
}

#[test]
fn overflowing_grid_dimensions_are_an_error() {
    let json = r#"{
        "grid": {"width": 4294967296, "height": 4294967296, "tile_size": 32.0, "cells": [{}]},
        "max_distance": 10.0
    }"#;
    let err = compute_json(json).expect_err("oversized grid must not validate");
    assert!(matches!(
        err,
        VisionError::GridShape { width: 4294967296, height: 4294967296, cells: 1 }
    ));
    assert!(err.to_string().contains("4294967296x4294967296"));
}

#[test]
fn negative_tile_size_is_an_error() {
    let json = r#"{
        "grid": {"width": 1, "height": 1, "tile_size": -32.0, "cells": [{}]},
        "max_distance": 10.0
    }"#;
    assert!(matches!(compute_json(json), Err(VisionError::InvalidTileSize(_))));
}

#[test]
fn zero_max_distance_is_an_error() {
    let json = r#"{
        "grid": {"width": 1, "height": 1, "tile_size": 32.0, "cells": [{"blocks_sight": true}]},
        "viewers": [{"x": 50.0, "y": 50.0}],
        "max_distance": 0.0
    }"#;
    assert!(matches!(compute_json(json), Err(VisionError::InvalidMaxDistance(_))));
}

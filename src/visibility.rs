//! Visibility polygon computation via angular sweep.
//!
//! For each unique wall vertex, three rays are cast (at the vertex angle
//! and a hair either side of it) and the nearest wall hit along each ray,
//! or the view-distance limit, becomes one polygon vertex.

use std::collections::HashSet;

use log::{debug, trace};
use rayon::prelude::*;

use crate::error::VisionError;
use crate::geometry::ray_segment_intersection;
use crate::types::{Point, Segment, VisionConfig};

fn check_max_distance(max_distance: f64) -> Result<(), VisionError> {
    if max_distance.is_finite() && max_distance > 0.0 {
        Ok(())
    } else {
        Err(VisionError::InvalidMaxDistance(max_distance))
    }
}

/// Angular-sweep solver with reusable buffers.
///
/// Keep one per thread (or per viewer loop) so repeated solves don't
/// reallocate the endpoint and ray lists every frame.
pub struct VisibilitySolver {
    ray_epsilon: f64,
    parallel_epsilon: f64,
    endpoints: Vec<Point>,
    endpoint_seen: HashSet<(u64, u64)>,
    /// (angle, dx, dy)
    rays: Vec<(f64, f64, f64)>,
}

impl VisibilitySolver {
    pub fn new(config: &VisionConfig) -> Self {
        Self {
            ray_epsilon: config.ray_epsilon,
            parallel_epsilon: config.parallel_epsilon,
            endpoints: Vec::with_capacity(256),
            endpoint_seen: HashSet::with_capacity(256),
            rays: Vec::with_capacity(768),
        }
    }

    /// Compute the visibility polygon for `viewer` into `result`.
    ///
    /// `result` is cleared first. With no segments there are no vertices
    /// to cast at, and the polygon is empty. The points only enclose the
    /// viewer when walls surround it; otherwise draw them as a fan around
    /// the viewer.
    pub fn solve(
        &mut self,
        viewer: Point,
        segments: &[Segment],
        max_distance: f64,
        result: &mut Vec<Point>,
    ) -> Result<(), VisionError> {
        check_max_distance(max_distance)?;
        self.endpoints.clear();
        self.endpoint_seen.clear();
        self.rays.clear();
        result.clear();

        for seg in segments {
            for p in [seg.a, seg.b] {
                if self.endpoint_seen.insert(p.key()) {
                    self.endpoints.push(p);
                }
            }
        }

        let eps = self.ray_epsilon;
        for p in &self.endpoints {
            let angle = (p.y - viewer.y).atan2(p.x - viewer.x);
            for a in [angle - eps, angle, angle + eps] {
                self.rays.push((a, a.cos(), a.sin()));
            }
        }

        // Stable so rays that tie keep their vertex order.
        self.rays.sort_by(|a, b| a.0.total_cmp(&b.0));

        result.reserve(self.rays.len());
        for &(_angle, dx, dy) in &self.rays {
            let mut min_t = f64::INFINITY;
            for seg in segments {
                if let Some(t) =
                    ray_segment_intersection(viewer, dx, dy, seg, self.parallel_epsilon)
                {
                    if t < min_t {
                        min_t = t;
                    }
                }
            }
            let t = min_t.min(max_distance);
            result.push(Point::new(viewer.x + t * dx, viewer.y + t * dy));
        }

        trace!(
            "visibility from ({}, {}): {} vertices, {} rays, {} segments",
            viewer.x,
            viewer.y,
            self.endpoints.len(),
            self.rays.len(),
            segments.len()
        );
        Ok(())
    }
}

/// Compute the visibility polygon seen from `viewer`.
pub fn compute_visibility_polygon(
    viewer: Point,
    segments: &[Segment],
    max_distance: f64,
    config: &VisionConfig,
) -> Result<Vec<Point>, VisionError> {
    let mut solver = VisibilitySolver::new(config);
    let mut polygon = Vec::new();
    solver.solve(viewer, segments, max_distance, &mut polygon)?;
    Ok(polygon)
}

/// Compute one visibility polygon per viewer, in parallel.
///
/// Each rayon worker owns its own solver; results come back in viewer order.
pub fn compute_visibility_polygons(
    viewers: &[Point],
    segments: &[Segment],
    max_distance: f64,
    config: &VisionConfig,
) -> Result<Vec<Vec<Point>>, VisionError> {
    check_max_distance(max_distance)?;
    let polygons = viewers
        .par_iter()
        .map_init(
            || VisibilitySolver::new(config),
            |solver, &viewer| -> Result<Vec<Point>, VisionError> {
                let mut polygon = Vec::new();
                solver.solve(viewer, segments, max_distance, &mut polygon)?;
                Ok(polygon)
            },
        )
        .collect::<Result<Vec<_>, VisionError>>()?;
    debug!(
        "solved {} viewers against {} segments",
        viewers.len(),
        segments.len()
    );
    Ok(polygons)
}

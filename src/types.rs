//! Data types for the visibility engine and its JSON interchange format.
//!
//! Every struct here derives Serialize + Deserialize so it can
//! round-trip through the JSON request/result schema.

use serde::{Deserialize, Serialize};

use crate::grid::TileGrid;

// -- Geometry ------------------------------------------------------

/// A point in world (pixel) space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Exact identity key for vertex deduplication.
    ///
    /// Bit patterns, not an epsilon compare: grid-derived points are exact
    /// products, so equal corners produce equal keys. `-0.0` is folded
    /// into `0.0` so the two zeros don't split one vertex in two.
    pub fn key(&self) -> (u64, u64) {
        ((self.x + 0.0).to_bits(), (self.y + 0.0).to_bits())
    }
}

/// Which side of its tile a wall edge bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EdgeType {
    Top,
    Right,
    Bottom,
    Left,
}

impl EdgeType {
    /// Unit vector pointing from the edge into its own tile.
    pub fn inward(self) -> (f64, f64) {
        match self {
            EdgeType::Top => (0.0, 1.0),
            EdgeType::Bottom => (0.0, -1.0),
            EdgeType::Left => (1.0, 0.0),
            EdgeType::Right => (-1.0, 0.0),
        }
    }
}

/// A directed wall edge with the tile it came from.
///
/// Wound so that `cross(b - a, p - a) > 0` for points `p` on the open
/// (walkable) side.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    pub a: Point,
    pub b: Point,
    pub tile_x: i32,
    pub tile_y: i32,
    pub edge: EdgeType,
}

impl Segment {
    pub fn length(&self) -> f64 {
        crate::geometry::distance(self.a, self.b)
    }
}

/// Pixel extents of a tile's drawn content, measured from the tile origin.
/// Each key is optional in the tile metadata.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct VisualBounds {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub top: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bottom: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub left: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub right: Option<f64>,
}

impl VisualBounds {
    /// Read bounds out of a `visual_bounds` property value.
    ///
    /// Anything other than a JSON object yields `None`; keys that are
    /// absent or non-numeric are left unset.
    pub fn from_value(value: &serde_json::Value) -> Option<Self> {
        let map = value.as_object()?;
        let read = |key: &str| map.get(key).and_then(serde_json::Value::as_f64);
        Some(Self {
            top: read("top"),
            bottom: read("bottom"),
            left: read("left"),
            right: read("right"),
        })
    }
}

/// A segment paired with the inset its shadow starts at.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ShadowEdge {
    pub segment: Segment,
    pub offset: f64,
    pub shifted: Segment,
}

// -- Config --------------------------------------------------------

fn default_ray_epsilon() -> f64 {
    1e-4
}
fn default_parallel_epsilon() -> f64 {
    1e-10
}
fn default_fallback_shadow_offset() -> f64 {
    2.0
}
fn default_wall_bottom_tiles() -> Vec<String> {
    vec!["nwb".into()]
}

/// Tuning knobs shared by extraction, solving and shadow placement.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VisionConfig {
    /// Angular offset (radians) of the side rays cast past each vertex.
    #[serde(default = "default_ray_epsilon")]
    pub ray_epsilon: f64,
    /// Determinant magnitude below which a ray counts as parallel.
    #[serde(default = "default_parallel_epsilon")]
    pub parallel_epsilon: f64,
    /// Shadow inset used when tile metadata can't answer.
    #[serde(default = "default_fallback_shadow_offset")]
    pub fallback_shadow_offset: f64,
    /// Tile names drawn as the lower half of the wall above them.
    #[serde(default = "default_wall_bottom_tiles")]
    pub wall_bottom_tiles: Vec<String>,
}

impl Default for VisionConfig {
    fn default() -> Self {
        Self {
            ray_epsilon: default_ray_epsilon(),
            parallel_epsilon: default_parallel_epsilon(),
            fallback_shadow_offset: default_fallback_shadow_offset(),
            wall_bottom_tiles: default_wall_bottom_tiles(),
        }
    }
}

impl VisionConfig {
    pub fn is_wall_bottom(&self, name: &str) -> bool {
        self.wall_bottom_tiles.iter().any(|t| t == name)
    }
}

// -- Engine I/O ----------------------------------------------------

fn default_true() -> bool {
    true
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VisionRequest {
    pub grid: TileGrid,
    #[serde(default)]
    pub viewers: Vec<Point>,
    pub max_distance: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub config: Option<VisionConfig>,
    /// Use `visual_bounds` metadata for shadow insets; otherwise half a tile.
    #[serde(default = "default_true")]
    pub metadata_shadows: bool,
}

impl VisionRequest {
    pub fn config(&self) -> VisionConfig {
        self.config.clone().unwrap_or_default()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VisionResult {
    pub segments: Vec<Segment>,
    /// One polygon per request viewer, in request order.
    pub polygons: Vec<Vec<Point>>,
    /// Visible area of each polygon, square pixels.
    pub areas: Vec<f64>,
    pub shadows: Vec<ShadowEdge>,
}

// -- Tests ---------------------------------------------------------

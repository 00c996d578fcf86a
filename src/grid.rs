//! Tile-map collaborator interface and an owned grid snapshot.
//!
//! The engine only reads maps through [`TileMap`]. Callers that mutate
//! their live map hand the engine a snapshot (e.g. [`TileGrid`]) so
//! extraction never observes a half-edited grid.

use serde::{Deserialize, Serialize};

use crate::error::{check_tile_size, VisionError};

/// Free-form per-tile properties as loaded from the map file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TileProperties(pub serde_json::Map<String, serde_json::Value>);

impl TileProperties {
    pub fn get(&self, key: &str) -> Option<&serde_json::Value> {
        self.0.get(key)
    }

    pub fn insert(&mut self, key: impl Into<String>, value: serde_json::Value) {
        self.0.insert(key.into(), value);
    }
}

/// Read-only view of a tile map.
///
/// Coordinates are signed so neighbour lookups past the edge are legal;
/// anything out of range is open, unnamed and has no definition.
pub trait TileMap {
    fn width(&self) -> usize;
    fn height(&self) -> usize;
    /// Pixels per tile edge.
    fn tile_size(&self) -> f64;
    fn blocks_sight(&self, x: i32, y: i32) -> bool;
    fn tile_name_at(&self, x: i32, y: i32) -> &str;
    fn tile_definition_at(&self, x: i32, y: i32) -> Option<&TileProperties>;
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TileCell {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub blocks_sight: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub properties: Option<TileProperties>,
}

impl TileCell {
    pub fn wall(name: &str) -> Self {
        Self {
            name: name.into(),
            blocks_sight: true,
            properties: None,
        }
    }
}

/// Row-major snapshot of a tile map.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TileGrid {
    pub width: usize,
    pub height: usize,
    pub tile_size: f64,
    pub cells: Vec<TileCell>,
}

impl TileGrid {
    /// An all-open grid.
    pub fn new(width: usize, height: usize, tile_size: f64) -> Result<Self, VisionError> {
        check_tile_size(tile_size)?;
        let count = width.checked_mul(height).ok_or(VisionError::GridShape {
            width,
            height,
            cells: 0,
        })?;
        Ok(Self {
            width,
            height,
            tile_size,
            cells: vec![TileCell::default(); count],
        })
    }

    /// Build a grid from ASCII rows: `#` blocks sight, anything else is open.
    /// Rows shorter than the widest row are padded with open cells.
    pub fn from_rows(rows: &[&str], tile_size: f64) -> Result<Self, VisionError> {
        let width = rows.iter().map(|r| r.chars().count()).max().unwrap_or(0);
        let mut grid = Self::new(width, rows.len(), tile_size)?;
        for (y, row) in rows.iter().enumerate() {
            for (x, ch) in row.chars().enumerate() {
                if ch == '#' {
                    grid.cells[y * width + x].blocks_sight = true;
                }
            }
        }
        Ok(grid)
    }

    /// Check the invariants a deserialized grid may violate.
    pub fn validate(&self) -> Result<(), VisionError> {
        check_tile_size(self.tile_size)?;
        // Dimensions come straight from the request, so the product may overflow.
        if self.width.checked_mul(self.height) != Some(self.cells.len()) {
            return Err(VisionError::GridShape {
                width: self.width,
                height: self.height,
                cells: self.cells.len(),
            });
        }
        Ok(())
    }

    fn index(&self, x: i32, y: i32) -> Option<usize> {
        if x < 0 || y < 0 {
            return None;
        }
        let (x, y) = (x as usize, y as usize);
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(y * self.width + x)
    }

    pub fn cell(&self, x: i32, y: i32) -> Option<&TileCell> {
        self.index(x, y).and_then(|i| self.cells.get(i))
    }

    pub fn cell_mut(&mut self, x: i32, y: i32) -> Option<&mut TileCell> {
        let i = self.index(x, y)?;
        self.cells.get_mut(i)
    }

    /// Replace a cell; out-of-range coordinates are ignored.
    pub fn set(&mut self, x: i32, y: i32, cell: TileCell) {
        if let Some(c) = self.cell_mut(x, y) {
            *c = cell;
        }
    }
}

impl TileMap for TileGrid {
    fn width(&self) -> usize {
        self.width
    }

    fn height(&self) -> usize {
        self.height
    }

    fn tile_size(&self) -> f64 {
        self.tile_size
    }

    fn blocks_sight(&self, x: i32, y: i32) -> bool {
        self.cell(x, y).is_some_and(|c| c.blocks_sight)
    }

    fn tile_name_at(&self, x: i32, y: i32) -> &str {
        self.cell(x, y).map_or("", |c| c.name.as_str())
    }

    fn tile_definition_at(&self, x: i32, y: i32) -> Option<&TileProperties> {
        self.cell(x, y).and_then(|c| c.properties.as_ref())
    }
}

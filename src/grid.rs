//! Deterministic grid placement for showcase layouts.
//!
//! Components are placed left to right on a uniform pitch, wrapping to a new
//! row after [`GridConfig::max_cols`] placements. The packer knows nothing
//! about item extents; the pitch must be chosen to fit the widest expected
//! cell, and callers break rows explicitly for oversized items via
//! [`GridPlacer::force_new_row`].

use derive_builder::Builder;
use gds21::{GdsPoint, GdsStruct, GdsStructRef, GdsTextElem};
use serde::{Deserialize, Serialize};

/// Grid layout parameters.
///
/// All distances are in GDS database units. The defaults correspond to a
/// 300 x 100 µm pitch at a 1 nm database unit, which fits the largest cell
/// in the stock component catalogue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Builder)]
#[serde(default)]
pub struct GridConfig {
    /// Number of grid columns before wrapping to a new row.
    #[builder(default = "4")]
    pub max_cols: usize,
    /// Horizontal pitch between grid cells.
    #[builder(default = "300_000")]
    pub x_spacing: i32,
    /// Vertical pitch between grid rows.
    #[builder(default = "100_000")]
    pub y_spacing: i32,
    /// X coordinate of grid cell (0, 0).
    #[builder(default = "0")]
    pub origin_x: i32,
    /// Y coordinate of grid cell (0, 0).
    #[builder(default = "0")]
    pub origin_y: i32,
    /// Caption anchor offset to the left of the item anchor.
    #[builder(default = "50_000")]
    pub caption_offset_x: i32,
    /// Caption anchor offset below the item anchor.
    #[builder(default = "40_000")]
    pub caption_offset_y: i32,
    /// GDS (layer, texttype) pair for caption text elements.
    #[builder(default = "(1, 0)")]
    pub caption_layer: (i16, i16),
}

impl Default for GridConfig {
    fn default() -> Self {
        GridConfigBuilder::default()
            .build()
            .expect("all fields have defaults")
    }
}

impl GridConfig {
    #[inline]
    pub fn builder() -> GridConfigBuilder {
        GridConfigBuilder::default()
    }
}

/// Position state for one layout pass.
///
/// Maintains `0 <= col < max_cols`; `row` only ever increases. A cursor is
/// scoped to a single pass and carries no identity beyond it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GridCursor {
    row: usize,
    col: usize,
}

impl GridCursor {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn row(&self) -> usize {
        self.row
    }

    #[inline]
    pub fn col(&self) -> usize {
        self.col
    }

    /// Moves to the next grid cell, wrapping at `max_cols`.
    fn advance(&mut self, max_cols: usize) {
        self.col += 1;
        if self.col >= max_cols {
            self.col = 0;
            self.row += 1;
        }
    }

    /// Starts a fresh row unless already at the start of one.
    /// Returns whether the cursor moved.
    fn carriage_return(&mut self) -> bool {
        if self.col == 0 {
            return false;
        }
        self.col = 0;
        self.row += 1;
        true
    }
}

/// Record of a single placement. Produced by [`GridPlacer::place`] and never
/// mutated afterward; the target cell owns the inserted elements.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlacedItem {
    pub cell: String,
    pub row: usize,
    pub col: usize,
    pub x: i32,
    pub y: i32,
    pub caption_x: i32,
    pub caption_y: i32,
}

/// One grid layout session over a target cell.
///
/// Placement order is call order: no reordering, no bin packing. Each call
/// to [`place`](Self::place) appends a struct reference and a caption text
/// element to the target and advances the cursor by exactly one cell.
pub struct GridPlacer<'a> {
    target: &'a mut GdsStruct,
    config: &'a GridConfig,
    cursor: GridCursor,
}

impl<'a> GridPlacer<'a> {
    pub fn new(target: &'a mut GdsStruct, config: &'a GridConfig) -> Self {
        Self {
            target,
            config,
            cursor: GridCursor::new(),
        }
    }

    #[inline]
    pub fn cursor(&self) -> GridCursor {
        self.cursor
    }

    /// Places a reference to `cell` at the current grid position, adds its
    /// caption, and advances the cursor.
    pub fn place(&mut self, cell: impl Into<String>, caption: impl Into<String>) -> PlacedItem {
        let cell = cell.into();
        let (row, col) = (self.cursor.row, self.cursor.col);
        let x = self.config.origin_x + col as i32 * self.config.x_spacing;
        let y = self.config.origin_y - row as i32 * self.config.y_spacing;
        let caption_x = x - self.config.caption_offset_x;
        let caption_y = y - self.config.caption_offset_y;

        self.target.elems.push(
            GdsStructRef {
                name: cell.clone(),
                xy: GdsPoint::new(x, y),
                ..Default::default()
            }
            .into(),
        );
        let (layer, texttype) = self.config.caption_layer;
        self.target.elems.push(
            GdsTextElem {
                string: caption.into(),
                layer,
                texttype,
                xy: GdsPoint::new(caption_x, caption_y),
                ..Default::default()
            }
            .into(),
        );

        log::debug!("placed {cell} at ({x}, {y}), grid ({row}, {col})");
        self.cursor.advance(self.config.max_cols);

        PlacedItem {
            cell,
            row,
            col,
            x,
            y,
            caption_x,
            caption_y,
        }
    }

    /// Ensures the next placement starts a fresh row. Idempotent when the
    /// cursor is already at column 0.
    pub fn force_new_row(&mut self) {
        if self.cursor.carriage_return() {
            log::debug!("forced new row {}", self.cursor.row);
        }
    }
}

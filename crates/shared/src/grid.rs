//! Staging grid for entities that are not on the map yet.
//!
//! A fixed pool of 12 slots in the top-left corner of the canvas:
//! 4 columns x 3 rows, starting at (50, 50) with 70px between slots.
//! Slots are numbered row-major, so slot 4 starts the second row.

use crate::models::PixelPosition;

pub const STAGING_COLS: usize = 4;
pub const STAGING_ROWS: usize = 3;
pub const STAGING_SLOTS: usize = STAGING_COLS * STAGING_ROWS;

pub const STAGING_ORIGIN_PX: i32 = 50;
pub const STAGING_SPACING_PX: i32 = 70;

/// Where the "add country" list drops an entity onto the canvas.
pub const DROP_POINT: PixelPosition = PixelPosition { x: 120, y: 20 };

/// Pixel X of a staging column (0-based).
pub fn staging_col_px(col: usize) -> i32 {
    STAGING_ORIGIN_PX + col as i32 * STAGING_SPACING_PX
}

/// Pixel Y of a staging row (0-based).
pub fn staging_row_px(row: usize) -> i32 {
    STAGING_ORIGIN_PX + row as i32 * STAGING_SPACING_PX
}

/// Staging slot for the `ordinal`-th entity. Wraps around the pool.
pub fn slot_position(ordinal: usize) -> PixelPosition {
    let slot = ordinal % STAGING_SLOTS;
    PixelPosition {
        x: staging_col_px(slot % STAGING_COLS),
        y: staging_row_px(slot / STAGING_COLS),
    }
}

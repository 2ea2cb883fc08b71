//! Shared constants for quote rendering
//!
//! Layout values that are not part of the user-facing [`PageGeometry`]
//! live here so the renderer has no magic numbers inline.
//!
//! [`PageGeometry`]: crate::PageGeometry

use std::num::NonZeroUsize;

// =============================================================================
// Unit Conversion
// =============================================================================

/// Millimeters per point (1 inch = 72 points, 1 inch = 25.4mm)
pub const MM_PER_POINT: f32 = 25.4 / 72.0;

/// Convert points to millimeters
#[inline]
pub fn pt_to_mm(pt: f32) -> f32 {
    pt * MM_PER_POINT
}

// =============================================================================
// Pagination
// =============================================================================

/// Line items per page when no configuration says otherwise
pub const DEFAULT_MAX_ITEMS_PER_PAGE: NonZeroUsize = match NonZeroUsize::new(22) {
    Some(n) => n,
    None => NonZeroUsize::MIN,
};

// =============================================================================
// Text
// =============================================================================

/// Distance between consecutive lines of the client block (mm)
pub const METADATA_LINE_SPACING_MM: f32 = 10.0;

/// Distance between description lines, including lines wrapped to the
/// content width (mm)
pub const DESCRIPTION_LINE_SPACING_MM: f32 = 5.0;

/// Highest code point the built-in PDF fonts can show
pub const MAX_BUILTIN_CODE_POINT: u32 = 0xFF;

// =============================================================================
// Table
// =============================================================================

/// Column headers of the item table, left to right
pub const TABLE_HEADERS: [&str; 4] = ["CANT.", "DESCRIPCIÓN", "P. UNITARIO", "TOTAL"];

/// Share of the content width given to each column
pub const TABLE_COLUMN_RATIOS: [f32; 4] = [0.12, 0.52, 0.18, 0.18];

/// Appended to product names cut to fit their column
pub const ELLIPSIS: &str = "...";

/// Horizontal padding inside table cells (mm)
pub const CELL_PADDING_MM: f32 = 1.5;

/// Stroke width of the table grid (points)
pub const GRID_LINE_WIDTH: f32 = 0.3;

// =============================================================================
// Summary
// =============================================================================

/// Gap between the bottom of the last table and the first summary line (mm)
pub const SUMMARY_GAP_MM: f32 = 8.0;

/// Distance between summary lines (mm)
pub const SUMMARY_LINE_SPACING_MM: f32 = 6.0;

/// Labels of the summary lines
pub const SUBTOTAL_LABEL: &str = "SUBTOTAL";
pub const LABOR_LABEL: &str = "MANO DE OBRA";
pub const TOTAL_LABEL: &str = "TOTAL";

// =============================================================================
// Images
// =============================================================================

/// DPI used when placing letterhead images so one pixel maps to one point
pub const IMAGE_PLACEMENT_DPI: f32 = 72.0;

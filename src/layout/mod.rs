//! Page geometry and layout primitives for transcript rendering.
//!
//! All coordinates are in PDF points with the origin at the bottom-left
//! corner, so layout flows by decreasing the y cursor.

mod block;
mod pagination;
mod table;

pub use block::{draw_info_box, draw_section_title};
pub use pagination::{should_break, PaginationController};
pub use table::{Column, Row, TableLayout};

/// Left page margin in points.
pub const MARGIN_LEFT: f64 = 40.0;
/// Right page margin in points.
pub const MARGIN_RIGHT: f64 = 40.0;
/// Top page margin in points.
pub const MARGIN_TOP: f64 = 40.0;
/// Content must not be drawn below this y coordinate.
pub const BOTTOM_MARGIN: f64 = 50.0;

/// Height of a table body row in points.
pub const ROW_HEIGHT: f64 = 14.0;
/// Height of a table header row in points.
pub const HEADER_ROW_HEIGHT: f64 = 16.0;

/// Usable horizontal span between the margins.
pub fn printable_width(page_width: f64) -> f64 {
    page_width - MARGIN_LEFT - MARGIN_RIGHT
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_printable_width_a4() {
        assert_eq!(printable_width(595.0), 515.0);
    }
}

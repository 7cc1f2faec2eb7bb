//! Grid zone codes for drawing pages.
//!
//! Engineering drawings carry a border grid: columns lettered A-H from the
//! left edge, rows numbered 1-8 from the bottom edge. A zone code such as
//! "B-3" names one cell of that 8x8 grid.

use crate::error::{Error, Result};

/// Number of grid columns and rows.
const GRID_DIVISIONS: usize = 8;

/// Zone-code calculator for an 8x8 drawing grid.
pub struct ZoneCalculator;

impl ZoneCalculator {
    /// Compute the zone code for a point on a page.
    ///
    /// The page width is split into 8 equal columns labeled A-H left to
    /// right; the height into 8 equal rows numbered 1-8 bottom to top
    /// (the input `y` uses a top-left origin). Both indices are clamped to
    /// the grid, so any finite point maps to one of the 64 codes.
    ///
    /// Fails with [`Error::InvalidPageDimensions`] unless both dimensions
    /// are finite and positive.
    ///
    /// # Examples
    ///
    /// ```
    /// use balloon_oxide::zone::ZoneCalculator;
    ///
    /// // Bottom-left corner of a landscape A3 page
    /// let zone = ZoneCalculator::zone_of(10.0, 830.0, 1190.0, 841.0).unwrap();
    /// assert_eq!(zone, "A-1");
    /// ```
    pub fn zone_of(x: f64, y: f64, page_width: f64, page_height: f64) -> Result<String> {
        if !page_width.is_finite()
            || !page_height.is_finite()
            || page_width <= 0.0
            || page_height <= 0.0
        {
            return Err(Error::InvalidPageDimensions {
                width: page_width,
                height: page_height,
            });
        }

        let column_width = page_width / GRID_DIVISIONS as f64;
        let row_height = page_height / GRID_DIVISIONS as f64;

        let column = ((x / column_width).floor() as i64).clamp(0, GRID_DIVISIONS as i64 - 1);
        // Rows count from the bottom edge, input y from the top edge.
        let row =
            (((page_height - y) / row_height).floor() as i64).clamp(0, GRID_DIVISIONS as i64 - 1);

        let letter = (b'A' + column as u8) as char;
        Ok(format!("{}-{}", letter, row + 1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_corners() {
        // Top-left: column A, top row 8
        assert_eq!(ZoneCalculator::zone_of(0.0, 0.0, 800.0, 800.0).unwrap(), "A-8");
        // Bottom-left: column A, bottom row 1
        assert_eq!(ZoneCalculator::zone_of(0.0, 799.0, 800.0, 800.0).unwrap(), "A-1");
        // Top-right: column H, top row 8
        assert_eq!(ZoneCalculator::zone_of(799.0, 0.0, 800.0, 800.0).unwrap(), "H-8");
        // Bottom-right
        assert_eq!(ZoneCalculator::zone_of(799.0, 799.0, 800.0, 800.0).unwrap(), "H-1");
    }

    #[test]
    fn test_center_cell() {
        // Exactly mid-page: column index 4 (E), four full rows below -> row 5
        assert_eq!(ZoneCalculator::zone_of(400.0, 400.0, 800.0, 800.0).unwrap(), "E-5");
        // A point low on the page lands in row 2
        assert_eq!(ZoneCalculator::zone_of(400.0, 650.0, 800.0, 800.0).unwrap(), "E-2");
    }

    #[test]
    fn test_clamping_out_of_range_points() {
        assert_eq!(ZoneCalculator::zone_of(-50.0, -50.0, 800.0, 800.0).unwrap(), "A-8");
        assert_eq!(
            ZoneCalculator::zone_of(5000.0, 5000.0, 800.0, 800.0).unwrap(),
            "H-1"
        );
    }

    #[test]
    fn test_invalid_dimensions() {
        assert!(ZoneCalculator::zone_of(1.0, 1.0, 0.0, 800.0).is_err());
        assert!(ZoneCalculator::zone_of(1.0, 1.0, 800.0, f64::NAN).is_err());
        assert!(ZoneCalculator::zone_of(1.0, 1.0, f64::INFINITY, 800.0).is_err());
        assert!(ZoneCalculator::zone_of(1.0, 1.0, -800.0, 800.0).is_err());
    }

    proptest! {
        #[test]
        fn prop_zone_is_always_one_of_64_codes(
            x in 0.0f64..1000.0,
            y in 0.0f64..1000.0,
            w in 1.0f64..2000.0,
            h in 1.0f64..2000.0,
        ) {
            let zone = ZoneCalculator::zone_of(x.min(w), y.min(h), w, h).unwrap();
            let bytes = zone.as_bytes();
            prop_assert_eq!(zone.len(), 3);
            prop_assert!((b'A'..=b'H').contains(&bytes[0]));
            prop_assert_eq!(bytes[1], b'-');
            prop_assert!((b'1'..=b'8').contains(&bytes[2]));
        }

        #[test]
        fn prop_column_monotone_in_x(
            x1 in 0.0f64..800.0,
            x2 in 0.0f64..800.0,
            y in 0.0f64..600.0,
        ) {
            let (lo, hi) = if x1 <= x2 { (x1, x2) } else { (x2, x1) };
            let z_lo = ZoneCalculator::zone_of(lo, y, 800.0, 600.0).unwrap();
            let z_hi = ZoneCalculator::zone_of(hi, y, 800.0, 600.0).unwrap();
            prop_assert!(z_lo.as_bytes()[0] <= z_hi.as_bytes()[0]);
        }

        #[test]
        fn prop_row_antitone_in_y(
            x in 0.0f64..800.0,
            y1 in 0.0f64..600.0,
            y2 in 0.0f64..600.0,
        ) {
            let (lo, hi) = if y1 <= y2 { (y1, y2) } else { (y2, y1) };
            let z_lo = ZoneCalculator::zone_of(x, lo, 800.0, 600.0).unwrap();
            let z_hi = ZoneCalculator::zone_of(x, hi, 800.0, 600.0).unwrap();
            // Larger y (further down the page) never increases the row number
            prop_assert!(z_lo.as_bytes()[2] >= z_hi.as_bytes()[2]);
        }
    }
}

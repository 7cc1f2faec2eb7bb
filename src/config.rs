//! Configuration for balloon placement.

/// Placement configuration.
///
/// Defaults match the standard drawing-frame layout: a 60-point border
/// margin, a 120-point title block reserved at the bottom, and a 30-point
/// hard page margin that balloons never cross.
#[derive(Debug, Clone)]
pub struct PlacementConfig {
    /// Border margin excluded from the drawing bounds on all sides.
    pub border_margin: f64,

    /// Additional reservation at the bottom of the page for the title block.
    pub title_block_height: f64,

    /// Hard page margin a balloon circle may never cross.
    pub page_margin: f64,

    /// Minimum gap between two balloon circles.
    pub balloon_clearance: f64,

    /// Clearance a leader path must keep from other balloons.
    pub leader_clearance: f64,

    /// Padding added around text-item boxes before overlap testing.
    pub text_padding: f64,

    /// Preferred candidate offset from the target position.
    pub preferred_offset: f64,

    /// Minimum candidate offset from the target position.
    pub min_offset: f64,

    /// Minimum vertical spacing of the perimeter layout.
    pub perimeter_min_spacing: f64,

    /// Preferred vertical spacing of the perimeter layout.
    pub perimeter_preferred_spacing: f64,

    /// Horizontal inset of the second perimeter lane on each side.
    pub perimeter_lane_inset: f64,
}

impl Default for PlacementConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl PlacementConfig {
    /// Create a configuration with the standard defaults.
    pub fn new() -> Self {
        Self {
            border_margin: 60.0,
            title_block_height: 120.0,
            page_margin: 30.0,
            balloon_clearance: 5.0,
            leader_clearance: 3.0,
            text_padding: 5.0,
            preferred_offset: 60.0,
            min_offset: 35.0,
            perimeter_min_spacing: 25.0,
            perimeter_preferred_spacing: 35.0,
            perimeter_lane_inset: 40.0,
        }
    }

    /// Set the border margin.
    pub fn with_border_margin(mut self, margin: f64) -> Self {
        self.border_margin = margin;
        self
    }

    /// Set the title-block reservation height.
    pub fn with_title_block_height(mut self, height: f64) -> Self {
        self.title_block_height = height;
        self
    }

    /// Set the hard page margin.
    pub fn with_page_margin(mut self, margin: f64) -> Self {
        self.page_margin = margin;
        self
    }

    /// Set the preferred and minimum candidate offsets.
    pub fn with_offsets(mut self, preferred: f64, minimum: f64) -> Self {
        self.preferred_offset = preferred;
        self.min_offset = minimum;
        self
    }
}

//! Collision-free balloon placement.
//!
//! Searches for a balloon position near a characteristic's footprint that
//! does not cross the drawing frame, collide with already-placed balloons,
//! or cover text, and whose leader line back to the footprint stays clear
//! of other balloons. When no such position exists the balloon falls back
//! to the deterministic perimeter layout.

pub mod perimeter;

pub use perimeter::perimeter_layout;

use crate::config::PlacementConfig;
use crate::geometry::{euclidean_distance, point_segment_distance, Point, Rect};
use crate::text_index::TextItem;

/// Magnitude step of the vertical-perturbation fallback.
const PERTURBATION_STEP: f64 = 10.0;
/// Number of perturbation magnitudes probed per candidate.
const PERTURBATION_STEPS: usize = 10;

/// An already-placed balloon in the placement arena.
///
/// The arena is threaded through the placement loop explicitly; every later
/// balloon's collision and leader tests run against all earlier entries.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlacedBalloon {
    /// X coordinate of the balloon center
    pub x: f64,
    /// Y coordinate of the balloon center
    pub y: f64,
    /// Balloon radius
    pub radius: f64,
}

impl PlacedBalloon {
    /// Center point of the balloon.
    pub fn center(&self) -> Point {
        Point::new(self.x, self.y)
    }
}

/// Collision-free balloon position search.
#[derive(Debug, Clone, Default)]
pub struct BalloonPlacer {
    config: PlacementConfig,
}

impl BalloonPlacer {
    /// Create a placer with the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a placer with a custom configuration.
    pub fn with_config(config: PlacementConfig) -> Self {
        Self { config }
    }

    /// Balloon diameter for a drawing with `total_count` characteristics.
    ///
    /// Step function: more balloons, smaller markers.
    ///
    /// # Examples
    ///
    /// ```
    /// use balloon_oxide::placement::BalloonPlacer;
    ///
    /// assert_eq!(BalloonPlacer::balloon_diameter(20), 24.0);
    /// assert_eq!(BalloonPlacer::balloon_diameter(21), 20.0);
    /// assert_eq!(BalloonPlacer::balloon_diameter(81), 14.0);
    /// ```
    pub fn balloon_diameter(total_count: usize) -> f64 {
        match total_count {
            0..=20 => 24.0,
            21..=40 => 20.0,
            41..=60 => 18.0,
            61..=80 => 16.0,
            _ => 14.0,
        }
    }

    /// Choose a position for one balloon.
    ///
    /// With a target position, tries the twelve fixed candidate offsets in
    /// priority order, then retries each candidate with vertical
    /// perturbations (x is never perturbed). Each candidate must both sit
    /// in blank space and keep its leader path to the target clear. With
    /// no target, or when every candidate fails, falls back to
    /// [`perimeter_layout`].
    pub fn place(
        &self,
        target: Option<Point>,
        balloon_index: usize,
        page_width: f64,
        page_height: f64,
        placed: &[PlacedBalloon],
        total_count: usize,
        text_items: &[TextItem],
        drawing_origin: Point,
    ) -> Point {
        let radius = Self::balloon_diameter(total_count) / 2.0;

        let Some(target) = target else {
            log::warn!(
                "balloon {} has no target position; using perimeter layout",
                balloon_index + 1
            );
            return perimeter_layout(
                balloon_index,
                total_count,
                page_width,
                page_height,
                &self.config,
            );
        };

        let bounds = self.drawing_bounds(drawing_origin, page_width, page_height);

        for (dx, dy) in self.candidate_offsets() {
            let candidate = Point::new(target.x + dx, target.y + dy);
            if self.is_blank_space(
                &candidate,
                radius,
                &bounds,
                page_width,
                page_height,
                placed,
                text_items,
            ) && self.is_leader_path_clear(&candidate, &target, placed)
            {
                return candidate;
            }
        }

        // Fallback: vertical perturbations of each original candidate. The
        // candidate's x is kept as-is.
        for (dx, dy) in self.candidate_offsets() {
            for step in 1..=PERTURBATION_STEPS {
                let magnitude = PERTURBATION_STEP * step as f64;
                for sign in [-1.0, 1.0] {
                    let candidate = Point::new(target.x + dx, target.y + dy + sign * magnitude);
                    if self.is_blank_space(
                        &candidate,
                        radius,
                        &bounds,
                        page_width,
                        page_height,
                        placed,
                        text_items,
                    ) && self.is_leader_path_clear(&candidate, &target, placed)
                    {
                        return candidate;
                    }
                }
            }
        }

        log::warn!(
            "no collision-free position for balloon {}; using perimeter layout",
            balloon_index + 1
        );
        perimeter_layout(
            balloon_index,
            total_count,
            page_width,
            page_height,
            &self.config,
        )
    }

    /// Area balloons may occupy: the page minus the border margin on all
    /// sides and the title-block reservation at the bottom.
    fn drawing_bounds(&self, origin: Point, page_width: f64, page_height: f64) -> Rect {
        let margin = self.config.border_margin;
        Rect::from_points(
            origin.x + margin,
            origin.y + margin,
            origin.x + page_width - margin,
            origin.y + page_height - margin - self.config.title_block_height,
        )
    }

    /// The twelve candidate offsets, in priority order.
    fn candidate_offsets(&self) -> [(f64, f64); 12] {
        let preferred = self.config.preferred_offset;
        let minimum = self.config.min_offset;
        [
            (preferred, 0.0),         // right, preferred
            (minimum, 0.0),           // right, minimum
            (-preferred, 0.0),        // left, preferred
            (-minimum, 0.0),          // left, minimum
            (preferred, -preferred),  // above right
            (minimum, -minimum),      // above right, minimum
            (preferred, preferred),   // below right
            (minimum, minimum),       // below right, minimum
            (-preferred, -preferred), // above left
            (-minimum, -minimum),     // above left, minimum
            (-preferred, preferred),  // below left
            (-minimum, minimum),      // below left, minimum
        ]
    }

    /// Whether a balloon circle at `center` sits in blank space.
    ///
    /// Rejects when the circle crosses the drawing bounds or the page
    /// margin, overlaps an already-placed balloon, or overlaps a text
    /// item's padded bounding box.
    #[allow(clippy::too_many_arguments)]
    fn is_blank_space(
        &self,
        center: &Point,
        radius: f64,
        bounds: &Rect,
        page_width: f64,
        page_height: f64,
        placed: &[PlacedBalloon],
        text_items: &[TextItem],
    ) -> bool {
        if !bounds.contains_circle(center, radius) {
            return false;
        }

        let margin = self.config.page_margin;
        let page_rect = Rect::from_points(
            margin,
            margin,
            page_width - margin,
            page_height - margin,
        );
        if !page_rect.contains_circle(center, radius) {
            return false;
        }

        for other in placed {
            let min_distance = radius + other.radius + self.config.balloon_clearance;
            if euclidean_distance(center, &other.center()) < min_distance {
                return false;
            }
        }

        for item in text_items {
            let padded = item.bbox().expand(self.config.text_padding);
            if padded.distance_to_point(center) < radius {
                return false;
            }
        }

        true
    }

    /// Whether the leader segment from `from` to `to` stays clear of every
    /// placed balloon.
    fn is_leader_path_clear(&self, from: &Point, to: &Point, placed: &[PlacedBalloon]) -> bool {
        placed.iter().all(|other| {
            point_segment_distance(&other.center(), from, to)
                >= other.radius + self.config.leader_clearance
        })
    }
}

//! Per-page text items extracted from a drawing PDF.
//!
//! Text items are produced by an external extraction collaborator and are
//! treated as immutable input: the matcher scans them, the placer avoids
//! them, and nothing in this crate ever modifies them.

use crate::geometry::Rect;
use serde::{Deserialize, Serialize};

/// A single text string on a page with its bounding box.
///
/// Coordinates are absolute points with a top-left origin, as provided by
/// the extraction collaborator. Pages are 1-indexed on this type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextItem {
    /// The text string as extracted
    pub text: String,
    /// Page number (1-indexed)
    pub page: u32,
    /// X coordinate of the top-left corner
    pub x: f64,
    /// Y coordinate of the top-left corner
    pub y: f64,
    /// Width of the bounding box
    pub width: f64,
    /// Height of the bounding box
    pub height: f64,
}

impl TextItem {
    /// Bounding box of this item.
    pub fn bbox(&self) -> Rect {
        Rect::new(self.x, self.y, self.width, self.height)
    }
}

/// A page of the drawing: dimensions plus its ordered text items.
///
/// Item order is the extraction order and is significant: the matcher's
/// first-occurrence-wins rule depends on it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageInfo {
    /// Page number (1-indexed)
    pub page: u32,
    /// Page width in points
    pub width: f64,
    /// Page height in points
    pub height: f64,
    /// Text items in extraction order
    pub items: Vec<TextItem>,
}

impl PageInfo {
    /// Create a page with no text items.
    pub fn new(page: u32, width: f64, height: f64) -> Self {
        Self {
            page,
            width,
            height,
            items: Vec::new(),
        }
    }

    /// Add a text item to this page, returning self for chaining.
    pub fn with_item(mut self, text: &str, x: f64, y: f64, width: f64, height: f64) -> Self {
        self.items.push(TextItem {
            text: text.to_string(),
            page: self.page,
            x,
            y,
            width,
            height,
        });
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_item_bbox() {
        let item = TextItem {
            text: "10.5mm".to_string(),
            page: 1,
            x: 100.0,
            y: 200.0,
            width: 40.0,
            height: 10.0,
        };
        let bbox = item.bbox();
        assert_eq!(bbox.left(), 100.0);
        assert_eq!(bbox.right(), 140.0);
        assert_eq!(bbox.bottom(), 210.0);
    }

    #[test]
    fn test_page_builder_preserves_item_order() {
        let page = PageInfo::new(1, 612.0, 792.0)
            .with_item("first", 0.0, 0.0, 10.0, 10.0)
            .with_item("second", 20.0, 0.0, 10.0, 10.0);
        assert_eq!(page.items.len(), 2);
        assert_eq!(page.items[0].text, "first");
        assert_eq!(page.items[1].text, "second");
        assert_eq!(page.items[1].page, 1);
    }

    #[test]
    fn test_page_info_serde_round_trip() {
        let page = PageInfo::new(2, 841.0, 594.0).with_item("Ø12", 50.0, 60.0, 30.0, 12.0);
        let json = serde_json::to_string(&page).unwrap();
        let back: PageInfo = serde_json::from_str(&json).unwrap();
        assert_eq!(back, page);
    }
}

//! Inspection characteristics extracted from a drawing.
//!
//! A characteristic is a single inspectable requirement (a dimension, a
//! GD&T callout, a note, ...) produced by an external extraction
//! collaborator. The ballooning engine locates its textual footprint on the
//! page, attaches a normalized location once that location is durably
//! persisted, and later assigns it a balloon number and a zone code.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Kind of inspectable requirement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RequirementType {
    /// A toleranced dimension
    Dimension,
    /// A geometric dimensioning & tolerancing callout
    Gdt,
    /// A flag note or general note
    Note,
    /// A material requirement
    Material,
    /// A process requirement
    Process,
    /// A functional test requirement
    Functional,
}

/// Location of a characteristic's footprint, normalized to the page.
///
/// All geometric fields are fractions of the page's width/height in
/// `[0, 1]`; values outside that range are logged at assignment time but
/// kept as-is. The page is 0-indexed here, unlike [`crate::text_index::PageInfo`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NormalizedLocation {
    /// X of the top-left corner as a fraction of page width
    pub x: f64,
    /// Y of the top-left corner as a fraction of page height
    pub y: f64,
    /// Width as a fraction of page width
    pub width: f64,
    /// Height as a fraction of page height
    pub height: f64,
    /// Page number (0-indexed)
    pub page: u32,
    /// Confidence of the text match that produced this location
    pub confidence: f64,
}

impl NormalizedLocation {
    /// Whether every geometric field lies in `[0, 1]`.
    pub fn in_unit_range(&self) -> bool {
        [self.x, self.y, self.width, self.height]
            .iter()
            .all(|v| (0.0..=1.0).contains(v))
    }
}

/// A single inspectable requirement extracted from a drawing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Characteristic {
    /// Stable identifier
    pub id: Uuid,
    /// Kind of requirement
    pub requirement: RequirementType,
    /// Free-text description as extracted
    pub description: String,
    /// Nominal value, e.g. "10.5"
    pub nominal_value: Option<String>,
    /// Plus tolerance, e.g. "0.1"
    pub tolerance_plus: Option<String>,
    /// Minus tolerance, e.g. "0.1"
    pub tolerance_minus: Option<String>,
    /// Unit of the nominal value, e.g. "mm"
    pub unit: Option<String>,
    /// GD&T symbol text for Gdt characteristics, e.g. "⌖ 0.25 A B C"
    pub gdt_symbol: Option<String>,
    /// Footprint location on the page.
    ///
    /// Set at most once, and only after the backing annotation record has
    /// been durably persisted. Never set speculatively.
    pub location: Option<NormalizedLocation>,
    /// Grid zone code of the final balloon position, e.g. "B-3"
    pub zone: Option<String>,
    /// Balloon number, unique within the drawing
    pub balloon_number: Option<u32>,
}

impl Characteristic {
    /// Create a characteristic with a fresh id and no optional fields set.
    pub fn new(requirement: RequirementType, description: &str) -> Self {
        Self {
            id: Uuid::new_v4(),
            requirement,
            description: description.to_string(),
            nominal_value: None,
            tolerance_plus: None,
            tolerance_minus: None,
            unit: None,
            gdt_symbol: None,
            location: None,
            zone: None,
            balloon_number: None,
        }
    }

    /// Set the nominal value, returning self for chaining.
    pub fn with_nominal(mut self, nominal: &str) -> Self {
        self.nominal_value = Some(nominal.to_string());
        self
    }

    /// Set plus/minus tolerances, returning self for chaining.
    pub fn with_tolerances(mut self, plus: &str, minus: &str) -> Self {
        self.tolerance_plus = Some(plus.to_string());
        self.tolerance_minus = Some(minus.to_string());
        self
    }

    /// Set the unit, returning self for chaining.
    pub fn with_unit(mut self, unit: &str) -> Self {
        self.unit = Some(unit.to_string());
        self
    }

    /// Set the GD&T symbol text, returning self for chaining.
    pub fn with_gdt_symbol(mut self, symbol: &str) -> Self {
        self.gdt_symbol = Some(symbol.to_string());
        self
    }
}

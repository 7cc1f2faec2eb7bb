//! Fuzzy text matching for characteristic footprints.
//!
//! Locates a characteristic's textual footprint among the raw PDF text
//! items of a drawing. Matching works on normalized text (lowercased,
//! whitespace-collapsed, stripped to alphanumerics plus the symbols
//! `± ° Ø ∅`) and scores candidates with exact equality, substring
//! containment, then normalized Levenshtein similarity.

pub mod distance;

use crate::characteristic::{Characteristic, RequirementType};
use crate::text_index::PageInfo;
use distance::similarity;
use lazy_static::lazy_static;
use regex::Regex;

/// Search threshold used by the dimension candidate queries.
const DIMENSION_THRESHOLD: f64 = 0.6;
/// Search threshold used by the GD&T candidate queries.
const GDT_THRESHOLD: f64 = 0.7;
/// Search threshold used by description-only queries.
const DESCRIPTION_THRESHOLD: f64 = 0.8;

lazy_static! {
    static ref WHITESPACE: Regex = Regex::new(r"\s+").unwrap();
    // Everything outside lowercase alphanumerics, space, and the drawing
    // symbols ± ° Ø ∅ is stripped before comparison.
    static ref DISALLOWED: Regex = Regex::new(r"[^a-z0-9 ±°øØ∅]").unwrap();
}

/// A located footprint with its confidence score.
///
/// Ephemeral: produced by the matcher and consumed by the orchestrator,
/// never persisted. The page is 0-indexed here.
#[derive(Debug, Clone, PartialEq)]
pub struct TextMatch {
    /// The matched item's original text
    pub text: String,
    /// Page number (0-indexed)
    pub page: u32,
    /// X coordinate of the matched box
    pub x: f64,
    /// Y coordinate of the matched box
    pub y: f64,
    /// Width of the matched box
    pub width: f64,
    /// Height of the matched box
    pub height: f64,
    /// Match quality in `[0, 1]`
    pub confidence: f64,
}

/// Normalize text for comparison.
///
/// Lowercases, collapses whitespace runs to single spaces, strips every
/// character other than alphanumerics, space, and `± ° Ø ∅`, then trims.
///
/// # Examples
///
/// ```
/// use balloon_oxide::matcher::normalize;
///
/// assert_eq!(normalize("  10.5  ±0.1 MM "), "105 ±01 mm");
/// assert_eq!(normalize("Ø12,3"), "ø123");
/// ```
pub fn normalize(text: &str) -> String {
    let lowered = text.to_lowercase();
    let collapsed = WHITESPACE.replace_all(&lowered, " ");
    let stripped = DISALLOWED.replace_all(&collapsed, "");
    stripped.trim().to_string()
}

/// Fuzzy text matcher over a drawing's page text items.
pub struct TextMatcher;

impl TextMatcher {
    /// Find the best-matching text item for `query` across all pages.
    ///
    /// Pages are scanned in page order and items in item order. An exact
    /// match after normalization returns immediately with confidence 1.0
    /// (first occurrence in scan order wins). Otherwise a single
    /// best-so-far match is tracked across the entire index and updated
    /// only when a candidate's confidence strictly exceeds the previous
    /// best and meets `min_confidence`. Returns `None` when nothing
    /// qualifies.
    pub fn find_text_position(
        query: &str,
        pages: &[PageInfo],
        min_confidence: f64,
    ) -> Option<TextMatch> {
        let normalized_query = normalize(query);
        let mut best: Option<TextMatch> = None;

        for page in pages {
            for item in &page.items {
                let normalized_item = normalize(&item.text);

                if normalized_item == normalized_query {
                    return Some(TextMatch {
                        text: item.text.clone(),
                        page: item.page.saturating_sub(1),
                        x: item.x,
                        y: item.y,
                        width: item.width,
                        height: item.height,
                        confidence: 1.0,
                    });
                }

                let confidence =
                    Self::partial_confidence(&normalized_query, &normalized_item);
                let improves = best
                    .as_ref()
                    .map_or(true, |b| confidence > b.confidence);
                if confidence >= min_confidence && improves {
                    best = Some(TextMatch {
                        text: item.text.clone(),
                        page: item.page.saturating_sub(1),
                        x: item.x,
                        y: item.y,
                        width: item.width,
                        height: item.height,
                        confidence,
                    });
                }
            }
        }

        best
    }

    /// Score two normalized, non-identical strings.
    ///
    /// Substring containment in either direction scores the length ratio
    /// shorter/longer; everything else falls back to Levenshtein
    /// similarity.
    fn partial_confidence(query: &str, candidate: &str) -> f64 {
        let query_len = query.chars().count();
        let candidate_len = candidate.chars().count();
        if query_len > 0
            && candidate_len > 0
            && (candidate.contains(query) || query.contains(candidate))
        {
            let shorter = query_len.min(candidate_len);
            let longer = query_len.max(candidate_len);
            return shorter as f64 / longer as f64;
        }
        similarity(query, candidate)
    }

    /// Find the footprint for a characteristic using its type's candidate
    /// queries.
    ///
    /// Each type tries an ordered list of query strings and returns the
    /// first query that finds a match, not the best across all queries.
    pub fn find_for(characteristic: &Characteristic, pages: &[PageInfo]) -> Option<TextMatch> {
        match characteristic.requirement {
            RequirementType::Dimension => Self::find_dimension(characteristic, pages),
            RequirementType::Gdt => Self::find_gdt(characteristic, pages),
            RequirementType::Note
            | RequirementType::Material
            | RequirementType::Process
            | RequirementType::Functional => Self::find_description(characteristic, pages),
        }
    }

    /// Dimension queries: tolerance renderings first, then the bare
    /// nominal, then the raw description.
    fn find_dimension(characteristic: &Characteristic, pages: &[PageInfo]) -> Option<TextMatch> {
        let mut candidates: Vec<String> = Vec::new();
        if let Some(nominal) = &characteristic.nominal_value {
            if let Some(plus) = &characteristic.tolerance_plus {
                candidates.push(format!("{} ±{}", nominal, plus));
                candidates.push(format!("{}±{}", nominal, plus));
                if let Some(minus) = &characteristic.tolerance_minus {
                    candidates.push(format!("{} +{} -{}", nominal, plus, minus));
                }
            }
            candidates.push(nominal.clone());
        }
        candidates.push(characteristic.description.clone());

        candidates
            .iter()
            .find_map(|query| Self::find_text_position(query, pages, DIMENSION_THRESHOLD))
    }

    /// GD&T queries: the symbol text, then the description.
    fn find_gdt(characteristic: &Characteristic, pages: &[PageInfo]) -> Option<TextMatch> {
        let mut candidates: Vec<&str> = Vec::new();
        if let Some(symbol) = &characteristic.gdt_symbol {
            candidates.push(symbol);
        }
        candidates.push(&characteristic.description);

        candidates
            .iter()
            .find_map(|query| Self::find_text_position(query, pages, GDT_THRESHOLD))
    }

    /// Note/material/process/functional queries: the description only.
    fn find_description(characteristic: &Characteristic, pages: &[PageInfo]) -> Option<TextMatch> {
        Self::find_text_position(&characteristic.description, pages, DESCRIPTION_THRESHOLD)
    }
}

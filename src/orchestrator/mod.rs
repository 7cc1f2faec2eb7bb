//! Per-drawing orchestration of matching, persistence, and placement.
//!
//! The orchestrator drives the two phases of ballooning a drawing. The
//! matching phase locates each characteristic's footprint, persists the
//! annotation records as one atomic batch, and only then writes locations
//! back onto the characteristics. The placement phase walks the
//! characteristics in extraction order, threading the arena of already
//! placed balloons so every later balloon avoids every earlier one.
//!
//! External systems plug in through the collaborator traits defined here;
//! the crate ships no network, storage, or rendering code of its own.

use crate::annotation::{AnnotationBox, AnnotationRecord, Balloon};
use crate::cache::PdfByteCache;
use crate::characteristic::{Characteristic, NormalizedLocation, RequirementType};
use crate::config::PlacementConfig;
use crate::error::{Error, Result};
use crate::geometry::Point;
use crate::leader::{LeaderCalculator, LeaderDirection};
use crate::matcher::{TextMatch, TextMatcher};
use crate::placement::{BalloonPlacer, PlacedBalloon};
use crate::text_index::PageInfo;
use crate::zone::ZoneCalculator;
use std::collections::HashMap;
use uuid::Uuid;

/// Default capacity of the orchestrator's PDF byte cache.
const DEFAULT_CACHE_CAPACITY: usize = 16;

/// Extracts per-page text items from raw PDF bytes.
pub trait TextExtractor {
    /// Extract pages with their text items. Pages are 1-indexed,
    /// coordinates absolute points with a top-left origin.
    fn extract_pages(&self, pdf_bytes: &[u8]) -> Result<Vec<PageInfo>>;
}

/// Durable store for annotation and balloon records.
///
/// Batch methods are atomic: either every record in the slice is written
/// or none is. The engine relies on that to keep characteristic state
/// consistent with what is persisted.
pub trait AnnotationStore {
    /// Insert a batch of annotation records atomically.
    fn insert_annotations(&self, records: &[AnnotationRecord]) -> Result<()>;

    /// Backfill a characteristic identifier into the record with the given
    /// extraction key.
    fn link_characteristic(
        &self,
        drawing_id: Uuid,
        extraction_key: usize,
        characteristic_id: Uuid,
    ) -> Result<()>;

    /// Insert a batch of balloon records atomically.
    fn insert_balloons(&self, balloons: &[Balloon]) -> Result<()>;

    /// Swap the numbers of two balloons of a drawing as a single update.
    fn swap_balloon_numbers(&self, drawing_id: Uuid, a: u32, b: u32) -> Result<()>;
}

/// Uploads a named object and returns its URL.
pub trait ObjectUploader {
    /// Upload `bytes` under `name`, returning the resulting URL.
    fn upload(&self, name: &str, bytes: &[u8]) -> Result<String>;
}

/// Renders a copy of the drawing PDF with the matched boxes highlighted.
pub trait HighlightRenderer {
    /// Produce highlighted PDF bytes.
    fn render(&self, pdf_bytes: &[u8], boxes: &[AnnotationBox]) -> Result<Vec<u8>>;
}

/// Result of the matching phase.
///
/// `success` is false only when the phase itself aborted (extraction or
/// the atomic annotation write failed); best-effort failures land in
/// `errors` with `success` still true.
#[derive(Debug, Clone, PartialEq)]
pub struct MatchOutcome {
    /// Whether the phase ran to completion
    pub success: bool,
    /// URL of the highlighted PDF copy, when rendering and upload worked
    pub annotated_pdf_url: Option<String>,
    /// Number of annotation records persisted
    pub annotation_count: usize,
    /// Number of characteristics that matched
    pub matched_count: usize,
    /// Accumulated best-effort errors (and the aborting error on failure)
    pub errors: Vec<String>,
}

/// Acceptance threshold applied to a returned match's confidence,
/// independent of the matcher's own search thresholds.
fn acceptance_threshold(requirement: RequirementType) -> f64 {
    match requirement {
        RequirementType::Note | RequirementType::Material | RequirementType::Process => 0.8,
        RequirementType::Dimension | RequirementType::Gdt => 0.55,
        RequirementType::Functional => 0.7,
    }
}

/// Drives matching, persistence ordering, and sequential placement for
/// drawings.
pub struct PlacementOrchestrator {
    extractor: Box<dyn TextExtractor>,
    store: Box<dyn AnnotationStore>,
    renderer: Box<dyn HighlightRenderer>,
    placer: BalloonPlacer,
    cache: PdfByteCache,
}

impl PlacementOrchestrator {
    /// Create an orchestrator over the given collaborators.
    pub fn new(
        extractor: Box<dyn TextExtractor>,
        store: Box<dyn AnnotationStore>,
        renderer: Box<dyn HighlightRenderer>,
    ) -> Self {
        Self {
            extractor,
            store,
            renderer,
            placer: BalloonPlacer::new(),
            cache: PdfByteCache::new(DEFAULT_CACHE_CAPACITY),
        }
    }

    /// Replace the placement configuration.
    pub fn with_placement_config(mut self, config: PlacementConfig) -> Self {
        self.placer = BalloonPlacer::with_config(config);
        self
    }

    /// Replace the PDF byte cache capacity.
    pub fn with_cache_capacity(mut self, capacity: usize) -> Self {
        self.cache = PdfByteCache::new(capacity);
        self
    }

    /// Run the matching phase for one drawing.
    ///
    /// Characteristics are processed in extraction order; a
    /// characteristic's index is its stable extraction key. Locations are
    /// written onto the characteristics only after the annotation batch
    /// has been durably persisted; on any phase-aborting failure no
    /// characteristic is mutated.
    pub fn match_annotations(
        &mut self,
        drawing_id: Uuid,
        pdf_bytes: &[u8],
        characteristics: &mut [Characteristic],
        uploader: &dyn ObjectUploader,
    ) -> MatchOutcome {
        let mut errors: Vec<String> = Vec::new();

        let bytes = self.cache.get_or_insert(drawing_id, pdf_bytes);
        let pages = match self.extractor.extract_pages(&bytes) {
            Ok(pages) => pages,
            Err(e) => {
                log::warn!("text extraction failed for drawing {}: {}", drawing_id, e);
                errors.push(e.to_string());
                return MatchOutcome {
                    success: false,
                    annotated_pdf_url: None,
                    annotation_count: 0,
                    matched_count: 0,
                    errors,
                };
            }
        };

        // Matches are held aside until the batch write succeeds; the
        // characteristics stay untouched on every failure path.
        let mut matched: Vec<(usize, TextMatch)> = Vec::new();
        for (index, characteristic) in characteristics.iter().enumerate() {
            match TextMatcher::find_for(characteristic, &pages) {
                Some(found) if found.confidence >= acceptance_threshold(characteristic.requirement) => {
                    matched.push((index, found));
                }
                Some(found) => {
                    log::debug!(
                        "characteristic {} matched at {:.2}, below acceptance threshold",
                        index,
                        found.confidence
                    );
                }
                None => {
                    log::debug!("no text match for characteristic {}", index);
                    errors.push(format!(
                        "no text match for characteristic {} ({})",
                        index, characteristic.description
                    ));
                }
            }
        }

        let mut records: Vec<AnnotationRecord> = Vec::with_capacity(matched.len());
        for (index, found) in &matched {
            let characteristic = &characteristics[*index];
            records.push(AnnotationRecord::pending(
                drawing_id,
                *index,
                AnnotationBox {
                    x: found.x,
                    y: found.y,
                    width: found.width,
                    height: found.height,
                    kind: characteristic.requirement,
                    text: found.text.clone(),
                    page: found.page,
                },
                found.confidence,
            ));
        }

        if let Err(e) = self.store.insert_annotations(&records) {
            log::warn!(
                "annotation batch write failed for drawing {}: {}",
                drawing_id,
                e
            );
            errors.push(e.to_string());
            return MatchOutcome {
                success: false,
                annotated_pdf_url: None,
                annotation_count: 0,
                matched_count: matched.len(),
                errors,
            };
        }

        // The batch is durable; locations may now become visible.
        for (index, found) in &matched {
            let Some(page) = pages.iter().find(|p| p.page == found.page + 1) else {
                errors.push(format!(
                    "matched page {} missing from extraction for characteristic {}",
                    found.page, index
                ));
                continue;
            };
            let location = NormalizedLocation {
                x: found.x / page.width,
                y: found.y / page.height,
                width: found.width / page.width,
                height: found.height / page.height,
                page: found.page,
                confidence: found.confidence,
            };
            if !location.in_unit_range() {
                log::warn!(
                    "normalized location outside [0,1] for characteristic {}: {:?}",
                    index,
                    location
                );
            }
            characteristics[*index].location = Some(location);
        }

        let boxes: Vec<AnnotationBox> = records.iter().map(|r| r.annotation.clone()).collect();
        let annotated_pdf_url = self.upload_highlighted(drawing_id, &bytes, &boxes, &mut errors, uploader);

        MatchOutcome {
            success: true,
            annotated_pdf_url,
            annotation_count: records.len(),
            matched_count: matched.len(),
            errors,
        }
    }

    /// Best-effort: render a highlighted copy and upload it. Failures are
    /// appended to `errors` and never abort the phase.
    fn upload_highlighted(
        &self,
        drawing_id: Uuid,
        pdf_bytes: &[u8],
        boxes: &[AnnotationBox],
        errors: &mut Vec<String>,
        uploader: &dyn ObjectUploader,
    ) -> Option<String> {
        let highlighted = match self.renderer.render(pdf_bytes, boxes) {
            Ok(bytes) => bytes,
            Err(e) => {
                log::warn!("highlight rendering failed for drawing {}: {}", drawing_id, e);
                errors.push(e.to_string());
                return None;
            }
        };
        match uploader.upload(&format!("{}-annotated.pdf", drawing_id), &highlighted) {
            Ok(url) => Some(url),
            Err(e) => {
                log::warn!("highlight upload failed for drawing {}: {}", drawing_id, e);
                errors.push(e.to_string());
                None
            }
        }
    }

    /// Backfill characteristic identifiers into persisted annotation
    /// records by extraction key.
    pub fn link_annotations(
        &self,
        drawing_id: Uuid,
        links: &[(usize, Uuid)],
    ) -> Result<()> {
        for (extraction_key, characteristic_id) in links {
            self.store
                .link_characteristic(drawing_id, *extraction_key, *characteristic_id)?;
        }
        Ok(())
    }

    /// Run the placement phase for one drawing.
    ///
    /// Validates every page's dimensions up front, then places balloons
    /// strictly in extraction order, accumulating the placed-balloon arena
    /// per page. Zone codes and balloon numbers are written onto the
    /// characteristics; balloon records are persisted as one atomic batch.
    pub fn place_balloons(
        &self,
        drawing_id: Uuid,
        characteristics: &mut [Characteristic],
        pages: &[PageInfo],
    ) -> Result<Vec<Balloon>> {
        if pages.is_empty() {
            return Err(Error::Extraction(
                "cannot place balloons on a drawing with no pages".to_string(),
            ));
        }
        for page in pages {
            if !page.width.is_finite()
                || !page.height.is_finite()
                || page.width <= 0.0
                || page.height <= 0.0
            {
                return Err(Error::InvalidPageDimensions {
                    width: page.width,
                    height: page.height,
                });
            }
        }

        let total = characteristics.len();
        let diameter = BalloonPlacer::balloon_diameter(total);
        let mut arenas: HashMap<u32, Vec<PlacedBalloon>> = HashMap::new();
        let mut balloons: Vec<Balloon> = Vec::with_capacity(total);

        for (index, characteristic) in characteristics.iter_mut().enumerate() {
            // Characteristics without a location fall back to the
            // perimeter layout on the first page.
            let (page_index, target) = match characteristic.location {
                Some(location) => {
                    let page_index = location.page;
                    let page = Self::page_for(pages, page_index);
                    let target = Point::new(
                        (location.x + location.width / 2.0) * page.width,
                        (location.y + location.height / 2.0) * page.height,
                    );
                    (page_index, Some(target))
                }
                None => (pages[0].page.saturating_sub(1), None),
            };
            let page = Self::page_for(pages, page_index);

            let arena = arenas.entry(page_index).or_default();
            let position = self.placer.place(
                target,
                index,
                page.width,
                page.height,
                arena,
                total,
                &page.items,
                Point::new(0.0, 0.0),
            );

            let direction = target.map(|t| LeaderDirection::toward(&position, &t));
            let leader = LeaderCalculator::leader_offset(position.x, position.y, direction);
            let zone = ZoneCalculator::zone_of(position.x, position.y, page.width, page.height)?;

            arena.push(PlacedBalloon {
                x: position.x,
                y: position.y,
                radius: diameter / 2.0,
            });

            characteristic.zone = Some(zone);
            characteristic.balloon_number = Some(index as u32 + 1);
            balloons.push(Balloon {
                characteristic_id: characteristic.id,
                drawing_id,
                balloon_number: index as u32 + 1,
                x_position: position.x,
                y_position: position.y,
                leader_x: leader.x,
                leader_y: leader.y,
            });
        }

        self.store.insert_balloons(&balloons)?;
        Ok(balloons)
    }

    /// Swap the numbers of two balloons, mirroring the swap onto their
    /// characteristics, after persisting the update.
    pub fn reorder_balloons(
        &self,
        a: &mut Balloon,
        b: &mut Balloon,
        char_a: &mut Characteristic,
        char_b: &mut Characteristic,
    ) -> Result<()> {
        if a.characteristic_id != char_a.id {
            return Err(Error::BalloonMismatch {
                balloon_number: a.balloon_number,
                characteristic_id: char_a.id,
            });
        }
        if b.characteristic_id != char_b.id {
            return Err(Error::BalloonMismatch {
                balloon_number: b.balloon_number,
                characteristic_id: char_b.id,
            });
        }
        self.store
            .swap_balloon_numbers(a.drawing_id, a.balloon_number, b.balloon_number)?;
        crate::annotation::swap_balloon_numbers(a, b, char_a, char_b)
    }

    /// Page lookup by 0-indexed page number, falling back to the first
    /// page when the index is unknown.
    fn page_for(pages: &[PageInfo], page_index: u32) -> &PageInfo {
        pages
            .iter()
            .find(|p| p.page == page_index + 1)
            .unwrap_or_else(|| {
                log::warn!("page {} missing from extraction; using first page", page_index);
                &pages[0]
            })
    }
}

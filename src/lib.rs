// Allow some clippy lints that are too pedantic for this project
#![allow(clippy::too_many_arguments)]
#![allow(clippy::type_complexity)]

//! # Balloon Oxide
//!
//! Balloon annotation engine for engineering drawings: locates each
//! inspection characteristic's textual footprint among raw PDF text items,
//! places a numbered balloon marker in collision-free blank space nearby,
//! computes its leader line, and derives a standardized grid zone code.
//!
//! ## Core Subsystems
//!
//! - **Text matching** ([`matcher`]): normalized exact / containment /
//!   Levenshtein scoring with per-requirement-type candidate queries and
//!   confidence thresholds.
//! - **Placement** ([`placement`]): twelve prioritized candidate offsets
//!   around the footprint, blank-space and leader-clearance tests against
//!   accumulated placement state, vertical-perturbation retry, and a
//!   deterministic perimeter fallback.
//! - **Zone codes** ([`zone`]): the 8x8 border grid (columns A-H, rows
//!   1-8 from the bottom edge).
//! - **Orchestration** ([`orchestrator`]): per-drawing matching with
//!   atomic annotation persistence gating characteristic mutation, then
//!   sequential, order-dependent balloon placement.
//!
//! External systems (PDF text extraction, durable storage, object upload,
//! highlight rendering) plug in through the collaborator traits in
//! [`orchestrator`].
//!
//! ## Quick Start
//!
//! ```ignore
//! use balloon_oxide::characteristic::{Characteristic, RequirementType};
//! use balloon_oxide::orchestrator::PlacementOrchestrator;
//! use uuid::Uuid;
//!
//! let mut orchestrator = PlacementOrchestrator::new(extractor, store, renderer);
//! let mut characteristics = vec![
//!     Characteristic::new(RequirementType::Dimension, "10.5 ±0.1 mm")
//!         .with_nominal("10.5")
//!         .with_tolerances("0.1", "0.1"),
//! ];
//!
//! let drawing_id = Uuid::new_v4();
//! let outcome =
//!     orchestrator.match_annotations(drawing_id, &pdf_bytes, &mut characteristics, &uploader);
//! assert!(outcome.success);
//!
//! let pages = extractor.extract_pages(&pdf_bytes)?;
//! let balloons = orchestrator.place_balloons(drawing_id, &mut characteristics, &pages)?;
//! ```

#![warn(missing_docs)]

// Error handling
pub mod error;

// Geometry and input model
pub mod characteristic;
pub mod geometry;
pub mod text_index;

// Text matching
pub mod matcher;

// Balloon placement
pub mod config;
pub mod leader;
pub mod placement;
pub mod zone;

// Records, caching, and orchestration
pub mod annotation;
pub mod cache;
pub mod orchestrator;

pub use annotation::{AnnotationBox, AnnotationRecord, AnnotationStatus, Balloon};
pub use characteristic::{Characteristic, NormalizedLocation, RequirementType};
pub use config::PlacementConfig;
pub use error::{Error, Result};
pub use matcher::{TextMatch, TextMatcher};
pub use orchestrator::{MatchOutcome, PlacementOrchestrator};
pub use placement::{BalloonPlacer, PlacedBalloon};
pub use text_index::{PageInfo, TextItem};
pub use zone::ZoneCalculator;

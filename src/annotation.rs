//! Annotation and balloon records.
//!
//! These are the persistence-facing shapes the engine produces: annotation
//! records written as a single atomic batch during the matching phase, and
//! balloon records written after placement. Balloon diameter is a
//! placement-time quantity and deliberately has no field here.

use crate::characteristic::{Characteristic, RequirementType};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A matched footprint box on a page.
///
/// Coordinates are absolute points, top-left origin; the page is 0-indexed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnnotationBox {
    /// X coordinate of the top-left corner
    pub x: f64,
    /// Y coordinate of the top-left corner
    pub y: f64,
    /// Width of the box
    pub width: f64,
    /// Height of the box
    pub height: f64,
    /// Kind of requirement the box marks
    pub kind: RequirementType,
    /// The matched text
    pub text: String,
    /// Page number (0-indexed)
    pub page: u32,
}

/// Lifecycle of a persisted annotation record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnnotationStatus {
    /// Written, not yet linked to a characteristic row
    Pending,
    /// Characteristic identifier backfilled
    Linked,
}

/// A persisted annotation record.
///
/// `extraction_key` is the characteristic's index in its extraction batch
/// and is the stable key used to backfill `characteristic_id` later.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnnotationRecord {
    /// Drawing this record belongs to
    pub drawing_id: Uuid,
    /// Index of the characteristic in its extraction batch
    pub extraction_key: usize,
    /// The matched box
    #[serde(flatten)]
    pub annotation: AnnotationBox,
    /// Confidence of the match that produced the box
    pub confidence: f64,
    /// Lifecycle status
    pub status: AnnotationStatus,
    /// Characteristic identifier, backfilled by extraction key
    pub characteristic_id: Option<Uuid>,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
}

impl AnnotationRecord {
    /// Create a pending record for an annotation box.
    pub fn pending(
        drawing_id: Uuid,
        extraction_key: usize,
        annotation: AnnotationBox,
        confidence: f64,
    ) -> Self {
        Self {
            drawing_id,
            extraction_key,
            annotation,
            confidence,
            status: AnnotationStatus::Pending,
            characteristic_id: None,
            created_at: Utc::now(),
        }
    }
}

/// A numbered balloon marker linking a characteristic to a page position.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Balloon {
    /// Characteristic this balloon marks
    pub characteristic_id: Uuid,
    /// Drawing this balloon belongs to
    pub drawing_id: Uuid,
    /// Balloon number, unique within the drawing
    pub balloon_number: u32,
    /// X coordinate of the balloon center
    pub x_position: f64,
    /// Y coordinate of the balloon center
    pub y_position: f64,
    /// X coordinate of the leader-line endpoint
    pub leader_x: f64,
    /// Y coordinate of the leader-line endpoint
    pub leader_y: f64,
}

/// Swap the numbers of two balloons and mirror the swap onto their paired
/// characteristics.
///
/// The two mutations happen together or not at all: pairing is validated
/// first, and the numbers remain a permutation of `1..=N` afterward.
pub fn swap_balloon_numbers(
    a: &mut Balloon,
    b: &mut Balloon,
    char_a: &mut Characteristic,
    char_b: &mut Characteristic,
) -> crate::error::Result<()> {
    if a.characteristic_id != char_a.id {
        return Err(crate::error::Error::BalloonMismatch {
            balloon_number: a.balloon_number,
            characteristic_id: char_a.id,
        });
    }
    if b.characteristic_id != char_b.id {
        return Err(crate::error::Error::BalloonMismatch {
            balloon_number: b.balloon_number,
            characteristic_id: char_b.id,
        });
    }
    std::mem::swap(&mut a.balloon_number, &mut b.balloon_number);
    char_a.balloon_number = Some(a.balloon_number);
    char_b.balloon_number = Some(b.balloon_number);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::characteristic::Characteristic;

    fn balloon(characteristic_id: Uuid, drawing_id: Uuid, number: u32) -> Balloon {
        Balloon {
            characteristic_id,
            drawing_id,
            balloon_number: number,
            x_position: 100.0,
            y_position: 100.0,
            leader_x: 130.0,
            leader_y: 115.0,
        }
    }

    #[test]
    fn test_pending_record_defaults() {
        let record = AnnotationRecord::pending(
            Uuid::new_v4(),
            3,
            AnnotationBox {
                x: 100.0,
                y: 200.0,
                width: 40.0,
                height: 10.0,
                kind: RequirementType::Dimension,
                text: "10.5 ±0.1".to_string(),
                page: 0,
            },
            0.92,
        );
        assert_eq!(record.status, AnnotationStatus::Pending);
        assert_eq!(record.extraction_key, 3);
        assert!(record.characteristic_id.is_none());
    }

    #[test]
    fn test_swap_balloon_numbers() {
        let drawing = Uuid::new_v4();
        let mut char_a = Characteristic::new(RequirementType::Dimension, "a");
        let mut char_b = Characteristic::new(RequirementType::Note, "b");
        char_a.balloon_number = Some(3);
        char_b.balloon_number = Some(7);
        let mut a = balloon(char_a.id, drawing, 3);
        let mut b = balloon(char_b.id, drawing, 7);

        swap_balloon_numbers(&mut a, &mut b, &mut char_a, &mut char_b).unwrap();

        assert_eq!(a.balloon_number, 7);
        assert_eq!(b.balloon_number, 3);
        assert_eq!(char_a.balloon_number, Some(7));
        assert_eq!(char_b.balloon_number, Some(3));
    }

    #[test]
    fn test_swap_rejects_mispaired_characteristic() {
        let drawing = Uuid::new_v4();
        let mut char_a = Characteristic::new(RequirementType::Dimension, "a");
        let mut char_b = Characteristic::new(RequirementType::Note, "b");
        let mut a = balloon(Uuid::new_v4(), drawing, 1);
        let mut b = balloon(char_b.id, drawing, 2);

        let err = swap_balloon_numbers(&mut a, &mut b, &mut char_a, &mut char_b);
        assert!(err.is_err());
        // Nothing was mutated on the rejection path
        assert_eq!(a.balloon_number, 1);
        assert_eq!(b.balloon_number, 2);
        assert!(char_a.balloon_number.is_none());
    }

    #[test]
    fn test_record_serde_flattens_box() {
        let record = AnnotationRecord::pending(
            Uuid::new_v4(),
            0,
            AnnotationBox {
                x: 1.0,
                y: 2.0,
                width: 3.0,
                height: 4.0,
                kind: RequirementType::Note,
                text: "NOTE 4".to_string(),
                page: 1,
            },
            0.8,
        );
        let value = serde_json::to_value(&record).unwrap();
        assert_eq!(value["x"], 1.0);
        assert_eq!(value["kind"], "note");
        assert_eq!(value["status"], "pending");
    }
}

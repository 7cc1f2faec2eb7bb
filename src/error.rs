//! Error types for the ballooning engine.
//!
//! This module defines all error types that can occur during text matching,
//! balloon placement, and collaborator calls.

/// Result type alias for ballooning operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur during annotation and placement.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Page dimensions are not finite positive numbers.
    ///
    /// Fatal to zone calculation and to the whole placement run for the
    /// drawing; surfaced to the caller as a validation rejection, never
    /// retried.
    #[error("Invalid page dimensions: {width} x {height}")]
    InvalidPageDimensions {
        /// Page width that failed validation
        width: f64,
        /// Page height that failed validation
        height: f64,
    },

    /// Annotation or balloon batch write failed.
    ///
    /// Fatal to the phase that issued the write; no partial mutation of
    /// characteristic state occurs on this path.
    #[error("Persistence error: {0}")]
    Persistence(String),

    /// PDF text extraction collaborator failed.
    #[error("Text extraction error: {0}")]
    Extraction(String),

    /// Object upload collaborator failed (best-effort path).
    #[error("Upload error: {0}")]
    Upload(String),

    /// PDF highlight rendering collaborator failed (best-effort path).
    #[error("Highlight rendering error: {0}")]
    Render(String),

    /// A balloon was paired with a characteristic it does not belong to.
    #[error("Balloon {balloon_number} does not belong to characteristic {characteristic_id}")]
    BalloonMismatch {
        /// Number of the mispaired balloon
        balloon_number: u32,
        /// Identifier of the characteristic it was paired with
        characteristic_id: uuid::Uuid,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_page_dimensions_message() {
        let err = Error::InvalidPageDimensions {
            width: 0.0,
            height: f64::NAN,
        };
        let msg = format!("{}", err);
        assert!(msg.contains("Invalid page dimensions"));
    }

    #[test]
    fn test_persistence_message() {
        let err = Error::Persistence("connection reset".to_string());
        let msg = format!("{}", err);
        assert!(msg.contains("Persistence error"));
        assert!(msg.contains("connection reset"));
    }

    #[test]
    fn test_error_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Error>();
    }
}

// 📥 Ingestion Handler - validate and admit new reviews
//
// Both fields are checked on every submission. A rejected submission still
// gets a full record shape (fresh id, current timestamp) echoed back, but the
// store is left untouched.

use chrono::NaiveDateTime;
use serde::Serialize;
use std::sync::Arc;

use crate::error::IngestError;
use crate::locations::LocationRegistry;
use crate::review::{new_review_id, now_timestamp, timestamp_format, Review};
use crate::store::ReviewStore;

/// Form fields of a POST. Absent and empty values are both treated as missing.
#[derive(Debug, Clone, Default)]
pub struct Submission {
    /// `Location` form field
    pub location: Option<String>,

    /// `ReviewBody` form field
    pub body: Option<String>,
}

/// Record echoed back for a submission that failed validation
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RejectedSubmission {
    #[serde(rename = "Location")]
    pub location: Option<String>,

    #[serde(rename = "ReviewBody")]
    pub body: Option<String>,

    #[serde(rename = "Timestamp", with = "timestamp_format")]
    pub timestamp: NaiveDateTime,

    #[serde(rename = "ReviewId")]
    pub id: String,
}

#[derive(Clone)]
pub struct IngestionHandler {
    store: Arc<ReviewStore>,
    registry: Arc<LocationRegistry>,
}

impl IngestionHandler {
    pub fn new(store: Arc<ReviewStore>, registry: Arc<LocationRegistry>) -> Self {
        IngestionHandler { store, registry }
    }

    pub fn submit(&self, submission: Submission) -> Result<Review, IngestError> {
        let location = submission.location.filter(|s| !s.is_empty());
        let body = submission.body.filter(|s| !s.is_empty());

        let location_ok = location
            .as_deref()
            .is_some_and(|loc| self.registry.is_valid(loc));
        let body_ok = body.is_some();

        match (location, body) {
            (Some(location), Some(body)) if location_ok => {
                let review = self.store.append(location, body);
                tracing::info!(
                    review_id = %review.id,
                    location = %review.location,
                    "review admitted"
                );
                Ok(review)
            }
            (location, body) => {
                tracing::warn!(
                    location = ?location,
                    location_ok,
                    body_ok,
                    "review submission rejected"
                );
                Err(IngestError::InvalidSubmission(RejectedSubmission {
                    location,
                    body,
                    timestamp: now_timestamp(),
                    id: new_review_id(),
                }))
            }
        }
    }
}

// 📝 Review - the record every request revolves around
//
// A Review is written once and never touched again. Sentiment is NOT part of
// the record: it is recomputed from the body on every read and attached to a
// ScoredReview projection.

use chrono::{Local, NaiveDateTime, SubsecRound};
use serde::{Deserialize, Serialize};

use crate::sentiment::Sentiment;

/// Exact-second local timestamp, e.g. `2024-03-01 18:22:05`
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Calendar date accepted by the date filters, e.g. `2024-03-01`
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Current local time truncated to whole seconds
pub fn now_timestamp() -> NaiveDateTime {
    Local::now().naive_local().trunc_subsecs(0)
}

/// Fresh opaque review identifier
pub fn new_review_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

// ============================================================================
// REVIEW
// ============================================================================

/// An admitted review. Field names on the wire match the seed dataset columns.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Review {
    #[serde(rename = "Location")]
    pub location: String,

    #[serde(rename = "ReviewBody")]
    pub body: String,

    /// Assigned by the store at insertion time
    #[serde(rename = "Timestamp", with = "timestamp_format")]
    pub timestamp: NaiveDateTime,

    /// Stable identity - never reused
    #[serde(rename = "ReviewId")]
    pub id: String,
}

impl Review {
    pub fn identity(&self) -> &str {
        &self.id
    }
}

/// Read-time projection: the stored fields plus a freshly computed sentiment
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoredReview {
    #[serde(flatten)]
    pub review: Review,
    pub sentiment: Sentiment,
}

// ============================================================================
// SERDE HELPERS
// ============================================================================

pub(crate) mod timestamp_format {
    use super::TIMESTAMP_FORMAT;
    use chrono::NaiveDateTime;
    use serde::{de, Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(value: &NaiveDateTime, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(&value.format(TIMESTAMP_FORMAT))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<NaiveDateTime, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        NaiveDateTime::parse_from_str(raw.trim(), TIMESTAMP_FORMAT).map_err(de::Error::custom)
    }
}

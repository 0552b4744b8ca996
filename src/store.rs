// 🗄️ Review Store - append-only, process-lifetime collection of reviews
//
// Insertion order is preserved and is the tie-breaker for sentiment sorting.
// Writers take the lock for the append; readers take it just long enough to
// copy a snapshot, so scoring never runs while the lock is held.

use anyhow::{Context, Result};
use std::collections::HashSet;
use std::path::Path;
use std::sync::{PoisonError, RwLock};

use crate::locations::LocationRegistry;
use crate::review::{new_review_id, now_timestamp, Review};

#[derive(Debug, Default)]
struct Inner {
    reviews: Vec<Review>,
    ids: HashSet<String>,
}

#[derive(Debug, Default)]
pub struct ReviewStore {
    inner: RwLock<Inner>,
}

impl ReviewStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a store from seed rows, in file order.
    ///
    /// Rows that would break the store invariants (unregistered location,
    /// empty body, repeated ReviewId) are skipped with a warning.
    pub fn seeded(rows: Vec<Review>, registry: &LocationRegistry) -> Self {
        let mut inner = Inner::default();
        let total = rows.len();

        for row in rows {
            if !registry.is_valid(&row.location) {
                tracing::warn!(review_id = %row.id, location = %row.location, "skipping seed row: unknown location");
                continue;
            }
            if row.body.is_empty() {
                tracing::warn!(review_id = %row.id, "skipping seed row: empty body");
                continue;
            }
            if !inner.ids.insert(row.identity().to_string()) {
                tracing::warn!(review_id = %row.id, "skipping seed row: duplicate ReviewId");
                continue;
            }
            inner.reviews.push(row);
        }

        tracing::info!(admitted = inner.reviews.len(), total, "seeded review store");

        ReviewStore {
            inner: RwLock::new(inner),
        }
    }

    /// Append a new review. The store assigns the id and timestamp.
    pub(crate) fn append(&self, location: String, body: String) -> Review {
        let mut inner = self.inner.write().unwrap_or_else(PoisonError::into_inner);

        let mut id = new_review_id();
        while inner.ids.contains(&id) {
            id = new_review_id();
        }

        let review = Review {
            location,
            body,
            timestamp: now_timestamp(),
            id,
        };

        inner.ids.insert(review.id.clone());
        inner.reviews.push(review.clone());
        review
    }

    /// Copy of every review in insertion order
    pub(crate) fn snapshot(&self) -> Vec<Review> {
        self.inner
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .reviews
            .clone()
    }

    pub fn len(&self) -> usize {
        self.inner
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .reviews
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

// ============================================================================
// SEED LOADING
// ============================================================================

/// Read seed reviews from a CSV with columns Location, ReviewBody, Timestamp, ReviewId
pub fn load_csv(csv_path: &Path) -> Result<Vec<Review>> {
    let mut rdr = csv::Reader::from_path(csv_path)
        .with_context(|| format!("Failed to open seed CSV {}", csv_path.display()))?;

    let mut reviews = Vec::new();

    for (line, result) in rdr.deserialize().enumerate() {
        // +2: header row and 1-based numbering
        let review: Review =
            result.with_context(|| format!("Failed to deserialize review on line {}", line + 2))?;
        reviews.push(review);
    }

    Ok(reviews)
}

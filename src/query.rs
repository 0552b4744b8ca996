// 🔎 Query Engine - filter, score, sort
//
// Filters are a conjunction applied in the order location -> start -> end.
// Every surviving record is scored fresh; the stored Review is never touched.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use std::sync::Arc;

use crate::error::QueryError;
use crate::review::{Review, ScoredReview, DATE_FORMAT};
use crate::sentiment::SentimentScorer;
use crate::store::ReviewStore;

/// Raw filter values as they arrive on the query string. Empty values count
/// as absent.
#[derive(Debug, Clone, Default)]
pub struct ReviewFilter {
    pub location: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
}

impl ReviewFilter {
    fn location(&self) -> Option<&str> {
        self.location.as_deref().filter(|s| !s.is_empty())
    }

    /// Date bounds as midnight instants.
    ///
    /// NOTE: the end bound is `end_date 00:00:00`, so reviews later on the end
    /// day itself are excluded.
    fn bounds(&self) -> Result<(Option<NaiveDateTime>, Option<NaiveDateTime>), QueryError> {
        let start = parse_date_bound("start_date", self.start_date.as_deref())?;
        let end = parse_date_bound("end_date", self.end_date.as_deref())?;
        Ok((start, end))
    }
}

fn parse_date_bound(
    field: &'static str,
    value: Option<&str>,
) -> Result<Option<NaiveDateTime>, QueryError> {
    let Some(raw) = value.filter(|s| !s.is_empty()) else {
        return Ok(None);
    };

    NaiveDate::parse_from_str(raw, DATE_FORMAT)
        .map(|date| Some(date.and_time(NaiveTime::default())))
        .map_err(|_| QueryError::InvalidDateFormat {
            field,
            value: raw.to_string(),
        })
}

// ============================================================================
// QUERY ENGINE
// ============================================================================

#[derive(Clone)]
pub struct QueryEngine {
    store: Arc<ReviewStore>,
    scorer: Arc<dyn SentimentScorer>,
}

impl QueryEngine {
    pub fn new(store: Arc<ReviewStore>, scorer: Arc<dyn SentimentScorer>) -> Self {
        QueryEngine { store, scorer }
    }

    /// Reviews matching `filter`, sorted ascending by compound sentiment.
    /// Ties keep insertion order.
    pub fn query(&self, filter: &ReviewFilter) -> Result<Vec<ScoredReview>, QueryError> {
        let (start, end) = filter.bounds()?;
        let location = filter.location();

        let snapshot = self.store.snapshot();
        let total = snapshot.len();

        let matching: Vec<Review> = snapshot
            .into_iter()
            .filter(|r| location.map_or(true, |loc| r.location == loc))
            .filter(|r| start.map_or(true, |s| r.timestamp >= s))
            .filter(|r| end.map_or(true, |e| r.timestamp <= e))
            .collect();

        let mut scored: Vec<ScoredReview> = matching
            .into_iter()
            .map(|review| {
                let sentiment = self.scorer.score(&review.body);
                ScoredReview { review, sentiment }
            })
            .collect();

        // sort_by is stable
        scored.sort_by(|a, b| a.sentiment.compound.total_cmp(&b.sentiment.compound));

        tracing::debug!(total, returned = scored.len(), "review query");
        Ok(scored)
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::locations::LocationRegistry;
    use crate::sentiment::Sentiment;

    /// Deterministic scorer: +0.5 per known good word, -0.5 per known bad word,
    /// clamped to [-1, 1].
    pub(crate) struct WordListScorer;

    impl SentimentScorer for WordListScorer {
        fn score(&self, text: &str) -> Sentiment {
            let lower = text.to_lowercase();
            let good = ["amazing", "wonderful", "great", "lovely"];
            let bad = ["terrible", "worst", "awful", "dirty"];

            let mut compound = 0.0;
            for word in lower.split(|c: char| !c.is_alphanumeric()) {
                if good.contains(&word) {
                    compound += 0.5;
                } else if bad.contains(&word) {
                    compound -= 0.5;
                }
            }
            let compound = f64::clamp(compound, -1.0, 1.0);

            Sentiment {
                neg: if compound < 0.0 { 1.0 } else { 0.0 },
                neu: if compound == 0.0 { 1.0 } else { 0.0 },
                pos: if compound > 0.0 { 1.0 } else { 0.0 },
                compound,
            }
        }
    }

    fn at(date: &str, time: &str) -> NaiveDateTime {
        NaiveDateTime::parse_from_str(&format!("{date} {time}"), "%Y-%m-%d %H:%M:%S").unwrap()
    }

    fn row(id: &str, location: &str, body: &str, timestamp: NaiveDateTime) -> Review {
        Review {
            location: location.to_string(),
            body: body.to_string(),
            timestamp,
            id: id.to_string(),
        }
    }

    fn engine_with(rows: Vec<Review>) -> QueryEngine {
        let store = ReviewStore::seeded(rows, &LocationRegistry::new());
        QueryEngine::new(Arc::new(store), Arc::new(WordListScorer))
    }

    fn ids(results: &[ScoredReview]) -> Vec<&str> {
        results.iter().map(|r| r.review.id.as_str()).collect()
    }

    fn filter(location: Option<&str>, start: Option<&str>, end: Option<&str>) -> ReviewFilter {
        ReviewFilter {
            location: location.map(String::from),
            start_date: start.map(String::from),
            end_date: end.map(String::from),
        }
    }

    #[test]
    fn test_sorted_most_negative_first() {
        let ts = at("2023-01-01", "10:00:00");
        let engine = engine_with(vec![
            row("good", "Denver, Colorado", "Amazing, wonderful", ts),
            row("bad", "Denver, Colorado", "Terrible, worst ever", ts),
            row("meh", "Denver, Colorado", "It was a room", ts),
        ]);

        let results = engine.query(&ReviewFilter::default()).unwrap();

        assert_eq!(ids(&results), vec!["bad", "meh", "good"]);
        for pair in results.windows(2) {
            assert!(pair[0].sentiment.compound <= pair[1].sentiment.compound);
        }
    }

    #[test]
    fn test_ties_keep_insertion_order() {
        let ts = at("2023-01-01", "10:00:00");
        let engine = engine_with(vec![
            row("n1", "Denver, Colorado", "room", ts),
            row("g1", "Denver, Colorado", "great", ts),
            row("n2", "Phoenix, Arizona", "bed", ts),
            row("g2", "Phoenix, Arizona", "lovely", ts),
            row("n3", "Tucson, Arizona", "door", ts),
        ]);

        let results = engine.query(&ReviewFilter::default()).unwrap();

        assert_eq!(ids(&results), vec!["n1", "n2", "n3", "g1", "g2"]);
    }

    #[test]
    fn test_location_filter_is_exact() {
        let ts = at("2023-01-01", "10:00:00");
        let engine = engine_with(vec![
            row("d1", "Denver, Colorado", "great", ts),
            row("p1", "Phoenix, Arizona", "great", ts),
            row("d2", "Denver, Colorado", "awful", ts),
        ]);

        let results = engine
            .query(&filter(Some("Denver, Colorado"), None, None))
            .unwrap();
        assert_eq!(ids(&results), vec!["d2", "d1"]);

        let lower = engine
            .query(&filter(Some("denver, colorado"), None, None))
            .unwrap();
        assert!(lower.is_empty());

        let partial = engine.query(&filter(Some("Denver"), None, None)).unwrap();
        assert!(partial.is_empty());
    }

    #[test]
    fn test_empty_filter_values_are_ignored() {
        let ts = at("2023-01-01", "10:00:00");
        let engine = engine_with(vec![row("d1", "Denver, Colorado", "great", ts)]);

        let results = engine.query(&filter(Some(""), Some(""), Some(""))).unwrap();
        assert_eq!(results.len(), 1);
    }

    #[test]
    fn test_start_date_is_inclusive_from_midnight() {
        let engine = engine_with(vec![
            row("before", "Denver, Colorado", "x", at("2023-03-09", "23:59:59")),
            row("midnight", "Denver, Colorado", "x", at("2023-03-10", "00:00:00")),
            row("later", "Denver, Colorado", "x", at("2023-03-10", "15:00:00")),
        ]);

        let results = engine.query(&filter(None, Some("2023-03-10"), None)).unwrap();
        assert_eq!(ids(&results), vec!["midnight", "later"]);
    }

    #[test]
    fn test_end_date_stops_at_midnight_of_end_day() {
        let engine = engine_with(vec![
            row("before", "Denver, Colorado", "x", at("2023-03-09", "23:59:59")),
            row("midnight", "Denver, Colorado", "x", at("2023-03-10", "00:00:00")),
            row("same_day", "Denver, Colorado", "x", at("2023-03-10", "00:00:01")),
        ]);

        let results = engine.query(&filter(None, None, Some("2023-03-10"))).unwrap();
        assert_eq!(ids(&results), vec!["before", "midnight"]);
    }

    #[test]
    fn test_filters_combine() {
        let engine = engine_with(vec![
            row("d_old", "Denver, Colorado", "x", at("2020-01-01", "12:00:00")),
            row("d_mid", "Denver, Colorado", "x", at("2021-06-01", "12:00:00")),
            row("p_mid", "Phoenix, Arizona", "x", at("2021-06-01", "12:00:00")),
            row("d_new", "Denver, Colorado", "x", at("2023-01-01", "12:00:00")),
        ]);

        let results = engine
            .query(&filter(
                Some("Denver, Colorado"),
                Some("2021-01-01"),
                Some("2022-01-01"),
            ))
            .unwrap();
        assert_eq!(ids(&results), vec!["d_mid"]);
    }

    #[test]
    fn test_malformed_date_is_rejected() {
        let engine = engine_with(vec![]);

        let err = engine
            .query(&filter(None, Some("03/10/2023"), None))
            .unwrap_err();
        assert!(matches!(
            err,
            QueryError::InvalidDateFormat { field: "start_date", .. }
        ));

        let err = engine.query(&filter(None, None, Some("2023-13-01"))).unwrap_err();
        assert!(matches!(
            err,
            QueryError::InvalidDateFormat { field: "end_date", .. }
        ));
    }

    #[test]
    fn test_empty_store_yields_empty_result() {
        let engine = engine_with(vec![]);
        assert!(engine.query(&ReviewFilter::default()).unwrap().is_empty());
    }

    #[test]
    fn test_query_does_not_mutate_store() {
        let ts = at("2023-01-01", "10:00:00");
        let store = Arc::new(ReviewStore::seeded(
            vec![row("a", "Denver, Colorado", "great", ts)],
            &LocationRegistry::new(),
        ));
        let engine = QueryEngine::new(store.clone(), Arc::new(WordListScorer));

        let before = store.snapshot();
        engine.query(&ReviewFilter::default()).unwrap();
        assert_eq!(store.snapshot(), before);
    }
}

// Review Analyzer - Core Library
// Review store, sentiment-sorted queries and the HTTP router used by the server binary

pub mod config;
pub mod error;
pub mod http;
pub mod ingest;
pub mod locations;
pub mod query;
pub mod review;
pub mod sentiment;
pub mod store;

// Re-export commonly used types
pub use config::Config;
pub use error::{ConfigError, IngestError, QueryError};
pub use http::{router, AppState};
pub use ingest::{IngestionHandler, RejectedSubmission, Submission};
pub use locations::{LocationRegistry, DEFAULT_LOCATIONS};
pub use query::{QueryEngine, ReviewFilter};
pub use review::{Review, ScoredReview, TIMESTAMP_FORMAT};
pub use sentiment::{Sentiment, SentimentScorer, VaderScorer};
pub use store::{load_csv, ReviewStore};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

//! # Paper Match
//!
//! Paper retrieval and similarity ranking engine with:
//! - Text preprocessing (lowercase, punctuation stripping, stop words)
//! - Jaccard, cosine and word-frequency-overlap metrics
//! - Stable top-N ranking of paper records
//! - Pluggable paper sources and summary translators
//! - Multiple interfaces: Rust library, HTTP API, CLI
//!
//! ## Example Usage
//!
//! ```rust
//! use paper_match::{rank, Paper};
//!
//! let papers = vec![
//!     Paper::new("1", "Quantum computing", "Noise-aware quantum computing."),
//!     Paper::new("2", "Sourdough", "Bread baking at home."),
//! ];
//!
//! let ranked = rank("quantum noise", &papers, "cosine", Some(1));
//! assert_eq!(ranked[0].paper.id, "1");
//! ```

pub mod core;
pub mod ranking;
pub mod query;
pub mod sources;
pub mod translate;
pub mod engine;
pub mod error;

// Re-export primary types
pub use core::{MatchEntry, MatchResponse, Paper, SAMPLE_TEXT};
pub use engine::{MatchOptions, MatchRequest, PaperEngine};
pub use error::{PaperMatchError, Result};
pub use query::{PaperQuery, QueryBuilder};
pub use ranking::{rank, Metric, RankedPaper, Ranker, SimilarityRanker};
pub use sources::PaperSource;
pub use translate::Translator;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

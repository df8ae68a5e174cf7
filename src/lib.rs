/// This crate is a Document Similarity Checker for duplicate and plagiarism detection.
pub mod config;
pub mod engine;
pub mod error;
pub mod format;
pub mod io;
pub mod ratio;
pub mod segment;
pub mod utils;
pub mod vectorizer;

/// Similarity Engine
/// The top-level struct of this crate.
/// It scores how similar a candidate document is to an original, in [0, 1].
///
/// A pair is scored through a tiered policy:
/// - Empty or whitespace-only inputs are resolved directly
/// - Single-token inputs compare tokens, then raw characters
/// - Everything else is the cosine of TF-IDF vectors fit on the pair
/// - A pair without any term falls back to a character ratio
///
/// `SimilarityEngine<S>` has one generic parameter:
/// - `S`: Word segmenter (e.g., JiebaSegmenter)
///
/// # Batch
/// `score_batch` fits one model over every document in the batch.
/// Its scores are not interchangeable with single-pair scores.
///
/// # Thread Safety
/// `Send + Sync`. Share it behind an `Arc`.
pub use engine::{Scored, ScorePath, SimilarityEngine};

/// Engine Configuration
/// Cache size, model ownership policy and TF-IDF knobs.
/// Loadable from a JSON file with environment overrides.
pub use config::{EngineOptions, ModelPolicy, VectorizerOptions};

/// Error and Result types of this crate
pub use error::{Result, SimilarityError};

/// Word Segmentation
/// - `Segmenter`: the backend trait
/// - `JiebaSegmenter`: dictionary based Chinese segmentation
/// - `SegmentCache`: bounded LRU cache of segmentation results
pub use segment::{JiebaSegmenter, SegmentCache, Segmented, Segmenter};

/// TF-IDF Vectorizer
/// Fits vocabulary and IDF weights on the given documents only and returns
/// one L2-normalised sparse row per document.
pub use vectorizer::{cosine, FitOutcome, TfIdfVectorizer};

/// Term Frequency structure
/// A struct for counting term occurrences within one document.
/// Used as base data for TF (Term Frequency) calculation.
pub use vectorizer::token::TermFrequency;

/// TF IDF Calculation Engine Trait
/// By implementing this trait, you can plug different TF-IDF calculation strategies
/// into `TfIdfVectorizer<N, E>`.
/// `DefaultTfIdfEngine` uses smoothed IDF and raw TF by default.
pub use vectorizer::tfidf::{DefaultTfIdfEngine, TfIdfEngine};

/// Character level ratio used as a fallback score
pub use ratio::{sequence_ratio, SequenceMatcher};

/// Score rendering: two decimals, trailing zeros trimmed (`0.75`, `1.0`)
pub use format::{format_score, round_score};

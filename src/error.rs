use std::{io, path::PathBuf};

use thiserror::Error;

pub type Result<T> = std::result::Result<T, SimilarityError>;

/// Errors surfaced by the similarity pipeline and its file boundary.
///
/// Degenerate inputs (empty text, single tokens, an empty vocabulary in
/// pair mode) are not errors: they resolve to a score through the fallback
/// tiers of [`crate::SimilarityEngine`].
#[derive(Debug, Error)]
pub enum SimilarityError {
    /// The word segmenter rejected its input.
    #[error("segmentation failed: {0}")]
    Segmentation(String),
    /// TF-IDF fitting failed for a reason other than an empty vocabulary.
    #[error("vectorization failed: {0}")]
    Vectorization(String),
    /// Batch mode only: no document produced a single term.
    #[error("empty vocabulary: documents contain no extractable terms")]
    EmptyVocabulary,
    /// Batch mode only: nothing to compare.
    #[error("empty batch: at least one pair is required")]
    EmptyBatch,
    /// Options are inconsistent or could not be parsed.
    #[error("invalid config: {0}")]
    Config(String),
    #[error("io error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    /// The file exists but is not valid UTF-8.
    #[error("{} is not valid UTF-8", path.display())]
    Decode { path: PathBuf },
}

impl SimilarityError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        SimilarityError::Io {
            path: path.into(),
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn io_error_names_path() {
        let err = SimilarityError::io(
            "/tmp/missing.txt",
            io::Error::new(io::ErrorKind::NotFound, "gone"),
        );
        let msg = err.to_string();
        assert!(msg.contains("/tmp/missing.txt"));
        assert!(msg.contains("gone"));
    }

    #[test]
    fn vectorization_error_message() {
        let err = SimilarityError::Vectorization("no documents".into());
        assert_eq!(err.to_string(), "vectorization failed: no documents");
    }
}

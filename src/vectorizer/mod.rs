pub mod analyzer;
pub mod compare;
pub mod tfidf;
pub mod token;

use std::marker::PhantomData;

use indexmap::IndexMap;
use num::Float;
use tracing::trace;

use crate::{
    config::VectorizerOptions,
    error::{Result, SimilarityError},
    utils::math::vector::SparseVec,
    vectorizer::{
        analyzer::TermAnalyzer,
        compare::{Compare, DefaultCompare},
        tfidf::{DefaultTfIdfEngine, TfIdfEngine},
    },
};

/// Result of one fit.
#[derive(Debug, Clone, PartialEq)]
pub enum FitOutcome<N>
where
    N: Float,
{
    /// One L2-normalised TF-IDF row per input document, in input order.
    Fitted(Vec<SparseVec<N>>),
    /// No document produced a term. Callers pick a fallback.
    EmptyVocabulary,
}

/// TF-IDF model re-fit from scratch on every call.
///
/// The vocabulary and IDF weights come only from the documents passed to
/// the latest [`fit_transform`](TfIdfVectorizer::fit_transform); nothing is
/// carried over between calls. Fitting takes `&mut self`, so sharing one
/// instance across threads needs a lock around the fit and the reads that
/// follow it.
///
/// `TfIdfVectorizer<N, E>`:
/// - `N`: weight type (`f32`, `f64`)
/// - `E`: TF-IDF calculation engine
#[derive(Debug, Clone)]
pub struct TfIdfVectorizer<N = f64, E = DefaultTfIdfEngine>
where
    N: Float,
    E: TfIdfEngine<N>,
{
    analyzer: TermAnalyzer,
    options: VectorizerOptions,
    /// term -> dimension, in first-seen order
    vocabulary: IndexMap<String, usize>,
    idf: Vec<N>,
    _marker: PhantomData<fn() -> E>,
}

impl<N, E> TfIdfVectorizer<N, E>
where
    N: Float,
    E: TfIdfEngine<N>,
{
    pub fn new(options: VectorizerOptions) -> Result<Self> {
        let analyzer = TermAnalyzer::new(&options)?;
        Ok(Self::with_analyzer(analyzer, options))
    }

    /// Reuse an already compiled analyzer.
    pub fn with_analyzer(analyzer: TermAnalyzer, options: VectorizerOptions) -> Self {
        Self {
            analyzer,
            options,
            vocabulary: IndexMap::new(),
            idf: Vec::new(),
            _marker: PhantomData,
        }
    }

    /// Build the vocabulary and IDF weights from `docs` and return one
    /// TF-IDF row per document.
    ///
    /// # Errors
    /// `Vectorization` when `docs` is empty or a weight is not finite.
    pub fn fit_transform<T>(&mut self, docs: &[T]) -> Result<FitOutcome<N>>
    where
        T: AsRef<str>,
    {
        self.vocabulary.clear();
        self.idf.clear();
        if docs.is_empty() {
            return Err(SimilarityError::Vectorization("no documents to fit".into()));
        }

        let freqs: Vec<_> = docs.iter().map(|doc| self.analyzer.analyze(doc.as_ref())).collect();

        // 次元を割り当てつつ document frequency を数える
        let mut doc_freqs: Vec<u32> = Vec::new();
        for freq in &freqs {
            for term in freq.term_set_iter() {
                let next = self.vocabulary.len();
                let idx = *self.vocabulary.entry(term.to_string()).or_insert(next);
                if idx == doc_freqs.len() {
                    doc_freqs.push(0);
                }
                doc_freqs[idx] += 1;
            }
        }
        trace!(docs = docs.len(), vocabulary = self.vocabulary.len(), "fitted vocabulary");
        if self.vocabulary.is_empty() {
            return Ok(FitOutcome::EmptyVocabulary);
        }

        self.idf = E::idf_vec(&doc_freqs, docs.len(), &self.options);
        let mut rows = Vec::with_capacity(freqs.len());
        for freq in &freqs {
            let mut row = E::tf_vec(freq, &self.vocabulary, &self.options);
            row.hadamard_dense(&self.idf);
            row.normalize();
            if !row.is_finite() {
                return Err(SimilarityError::Vectorization("non-finite tf-idf weight".into()));
            }
            rows.push(row);
        }
        Ok(FitOutcome::Fitted(rows))
    }

    /// Vocabulary of the last fit.
    pub fn vocabulary(&self) -> &IndexMap<String, usize> {
        &self.vocabulary
    }

    /// IDF weights of the last fit, indexed by dimension.
    pub fn idf(&self) -> &[N] {
        &self.idf
    }

    pub fn options(&self) -> &VectorizerOptions {
        &self.options
    }
}

/// Cosine similarity of two rows, clamped to [0, 1].
#[inline]
pub fn cosine<N>(a: &SparseVec<N>, b: &SparseVec<N>) -> f64
where
    N: Float,
{
    <DefaultCompare as Compare<N>>::cosine_similarity(a.raw_iter(), b.raw_iter()).clamp(0.0, 1.0)
}

use std::{
    fmt,
    sync::{Mutex, PoisonError},
};

use tracing::{debug, warn};

use crate::{
    config::{EngineOptions, ModelPolicy},
    error::{Result, SimilarityError},
    ratio::sequence_ratio,
    segment::{CachedSegmenter, JiebaSegmenter, SegmentCache, Segmented, Segmenter},
    vectorizer::{analyzer::TermAnalyzer, cosine, FitOutcome, TfIdfVectorizer},
};

/// Which tier of the scoring policy produced a score.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScorePath {
    /// Both inputs empty: 1.0
    BothEmpty,
    /// Exactly one side has no content: 0.0
    OneEmpty,
    /// Both sides segment to no tokens: raw text equality, 1.0 or 0.0
    RawEquality,
    /// One equal token on each side: 1.0
    SingleTokenEqual,
    /// One token each, different: character ratio of the raw texts
    SingleTokenRatio,
    /// TF-IDF cosine
    Vector,
    /// The pair has no vocabulary: character ratio of the raw texts
    EmptyVocabularyRatio,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Scored {
    /// in [0, 1]
    pub score: f64,
    pub path: ScorePath,
}

impl Scored {
    #[inline]
    fn new(score: f64, path: ScorePath) -> Self {
        Self { score, path }
    }
}

enum ModelSlot {
    Shared(Mutex<TfIdfVectorizer>),
    PerCall,
}

/// Scores document pairs for duplication.
///
/// Pair scoring walks a tiered policy: empty inputs, inputs without
/// tokens and single-token inputs are settled without the vector model;
/// everything else is a TF-IDF cosine over a model fit on exactly the two
/// documents, falling back to a character ratio when the pair has no
/// vocabulary at all.
///
/// # Batch scores diverge from pair scores
/// [`score_batch`](SimilarityEngine::score_batch) fits one model over every
/// document of the batch, so IDF weights are shared batch-wide and the
/// result for a pair usually differs numerically from
/// [`score`](SimilarityEngine::score) on the same pair.
///
/// # Thread Safety
/// `Send + Sync`. The segmentation cache is behind a mutex. With
/// [`ModelPolicy::Shared`] every fit holds the model lock, so concurrent
/// calls serialize on it; [`ModelPolicy::PerCall`] builds a model per call
/// instead.
pub struct SimilarityEngine<S = JiebaSegmenter> {
    segmenter: CachedSegmenter<S>,
    analyzer: TermAnalyzer,
    options: EngineOptions,
    model: ModelSlot,
}

impl SimilarityEngine<JiebaSegmenter> {
    /// Engine with the bundled jieba dictionary.
    pub fn new(options: EngineOptions) -> Result<Self> {
        Self::with_segmenter(JiebaSegmenter::new(), options)
    }
}

impl<S> SimilarityEngine<S>
where
    S: Segmenter,
{
    pub fn with_segmenter(segmenter: S, options: EngineOptions) -> Result<Self> {
        options.validate()?;
        let cache = if options.cache_enabled {
            Some(SegmentCache::new(options.cache_capacity)?)
        } else {
            None
        };
        let analyzer = TermAnalyzer::new(&options.vectorizer)?;
        let model = match options.model_policy {
            ModelPolicy::Shared => ModelSlot::Shared(Mutex::new(TfIdfVectorizer::with_analyzer(
                analyzer.clone(),
                options.vectorizer.clone(),
            ))),
            ModelPolicy::PerCall => ModelSlot::PerCall,
        };
        Ok(Self {
            segmenter: CachedSegmenter::new(segmenter, cache),
            analyzer,
            options,
            model,
        })
    }

    pub fn options(&self) -> &EngineOptions {
        &self.options
    }

    /// The segmentation cache, when enabled.
    pub fn cache(&self) -> Option<&SegmentCache> {
        self.segmenter.cache()
    }

    /// Segment one text through the cache.
    pub fn segment(&self, text: &str) -> Result<Segmented> {
        self.segmenter.segment(text)
    }

    /// Similarity of `copy` to `original` in [0, 1].
    pub fn score(&self, original: &str, copy: &str) -> Result<f64> {
        self.score_detailed(original, copy).map(|scored| scored.score)
    }

    /// Like [`score`](Self::score), also naming the tier that decided it.
    ///
    /// # Errors
    /// Segmentation failures and vectorization failures other than an empty
    /// vocabulary.
    pub fn score_detailed(&self, original: &str, copy: &str) -> Result<Scored> {
        let seg_a = self.segmenter.segment(original)?;
        let seg_b = self.segmenter.segment(copy)?;
        let scored = self.score_segmented(original, copy, &seg_a, &seg_b)?;
        debug!(path = ?scored.path, score = scored.score, "scored pair");
        Ok(scored)
    }

    fn score_segmented(&self, original: &str, copy: &str, seg_a: &Segmented, seg_b: &Segmented) -> Result<Scored> {
        match (seg_a.is_empty(), seg_b.is_empty()) {
            (true, true) => return Ok(Scored::new(1.0, ScorePath::BothEmpty)),
            (true, false) | (false, true) => return Ok(Scored::new(0.0, ScorePath::OneEmpty)),
            (false, false) => {}
        }

        let tokens_a = seg_a.tokens();
        let tokens_b = seg_b.tokens();
        match (tokens_a.is_empty(), tokens_b.is_empty()) {
            // 空白のみ同士は生テキストで比較 (狭いケース、将来削除候補)
            (true, true) => {
                let score = if original == copy { 1.0 } else { 0.0 };
                return Ok(Scored::new(score, ScorePath::RawEquality));
            }
            (true, false) | (false, true) => return Ok(Scored::new(0.0, ScorePath::OneEmpty)),
            (false, false) => {}
        }

        // 1 token 同士だと TF-IDF が退化するので文字単位で比較
        if tokens_a.len() == 1 && tokens_b.len() == 1 {
            if tokens_a[0] == tokens_b[0] {
                return Ok(Scored::new(1.0, ScorePath::SingleTokenEqual));
            }
            return Ok(Scored::new(sequence_ratio(original, copy), ScorePath::SingleTokenRatio));
        }

        let docs = [seg_a.joined(), seg_b.joined()];
        match self.with_model(|model| model.fit_transform(&docs))? {
            FitOutcome::Fitted(rows) => Ok(Scored::new(cosine(&rows[0], &rows[1]), ScorePath::Vector)),
            FitOutcome::EmptyVocabulary => {
                warn!("pair has no vocabulary, falling back to character ratio");
                Ok(Scored::new(sequence_ratio(original, copy), ScorePath::EmptyVocabularyRatio))
            }
        }
    }

    /// Score many pairs with one model fit over all `2 * pairs.len()`
    /// documents. No degenerate-input tiers and no per-pair fallback.
    ///
    /// Result `i` belongs to `pairs[i]`.
    ///
    /// # Errors
    /// `EmptyBatch` for no pairs, `EmptyVocabulary` when no document in the
    /// batch has a term, and any segmentation or vectorization failure.
    pub fn score_batch<A, B>(&self, pairs: &[(A, B)]) -> Result<Vec<f64>>
    where
        A: AsRef<str>,
        B: AsRef<str>,
    {
        if pairs.is_empty() {
            return Err(SimilarityError::EmptyBatch);
        }
        let mut segmented = Vec::with_capacity(pairs.len() * 2);
        for (original, copy) in pairs {
            segmented.push(self.segmenter.segment(original.as_ref())?);
            segmented.push(self.segmenter.segment(copy.as_ref())?);
        }
        let docs: Vec<&str> = segmented.iter().map(Segmented::joined).collect();

        match self.with_model(|model| model.fit_transform(&docs))? {
            FitOutcome::Fitted(rows) => {
                let scores: Vec<f64> = rows.chunks_exact(2).map(|pair| cosine(&pair[0], &pair[1])).collect();
                debug!(pairs = scores.len(), "scored batch");
                Ok(scores)
            }
            FitOutcome::EmptyVocabulary => Err(SimilarityError::EmptyVocabulary),
        }
    }

    fn with_model<R>(&self, f: impl FnOnce(&mut TfIdfVectorizer) -> R) -> R {
        match &self.model {
            ModelSlot::Shared(model) => {
                // fit_transform は最初に状態を消すので poison からの復帰は安全
                let mut guard = model.lock().unwrap_or_else(PoisonError::into_inner);
                f(&mut guard)
            }
            ModelSlot::PerCall => {
                let mut model = TfIdfVectorizer::with_analyzer(self.analyzer.clone(), self.options.vectorizer.clone());
                f(&mut model)
            }
        }
    }
}

impl<S> fmt::Debug for SimilarityEngine<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SimilarityEngine")
            .field("options", &self.options)
            .field("cache", &self.segmenter.cache())
            .finish()
    }
}

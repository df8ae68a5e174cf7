pub mod cache;

use std::{fmt, sync::Arc};

use jieba_rs::Jieba;
use tracing::debug;

use crate::error::Result;

pub use cache::SegmentCache;

/// Word segmentation backend.
///
/// Implementations must be deterministic: the same text always yields the
/// same tokens. The cache in front of them relies on it.
pub trait Segmenter: Send + Sync {
    fn cut<'a>(&self, text: &'a str) -> Result<Vec<&'a str>>;
}

/// Dictionary based Chinese segmentation (jieba), HMM on for unknown words.
pub struct JiebaSegmenter {
    jieba: Jieba,
    hmm: bool,
}

impl JiebaSegmenter {
    /// Load the bundled dictionary.
    pub fn new() -> Self {
        Self {
            jieba: Jieba::new(),
            hmm: true,
        }
    }
}

impl Default for JiebaSegmenter {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for JiebaSegmenter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JiebaSegmenter").field("hmm", &self.hmm).finish()
    }
}

impl Segmenter for JiebaSegmenter {
    #[inline]
    fn cut<'a>(&self, text: &'a str) -> Result<Vec<&'a str>> {
        Ok(self.jieba.cut(text, self.hmm))
    }
}

/// Segmented text: tokens joined by single spaces.
///
/// `is_empty` is true only for empty input. A text made solely of
/// whitespace is not empty but has no [`tokens`](Segmented::tokens).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segmented {
    joined: Arc<str>,
}

impl Segmented {
    pub fn empty() -> Self {
        Self { joined: Arc::from("") }
    }

    pub fn from_tokens<T: AsRef<str>>(tokens: &[T]) -> Self {
        let joined = tokens
            .iter()
            .map(|t| t.as_ref())
            .collect::<Vec<&str>>()
            .join(" ");
        Self { joined: Arc::from(joined) }
    }

    pub(crate) fn from_joined(joined: Arc<str>) -> Self {
        Self { joined }
    }

    /// Space-joined form, the vectorizer's input.
    #[inline]
    pub fn joined(&self) -> &str {
        &self.joined
    }

    pub(crate) fn shared(&self) -> Arc<str> {
        Arc::clone(&self.joined)
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.joined.is_empty()
    }

    /// Non-whitespace tokens.
    pub fn tokens(&self) -> Vec<&str> {
        self.joined.split_whitespace().collect()
    }
}

/// Segmenter with an optional LRU cache keyed by exact text.
pub struct CachedSegmenter<S> {
    inner: S,
    cache: Option<SegmentCache>,
}

impl<S> CachedSegmenter<S> {
    pub fn new(inner: S, cache: Option<SegmentCache>) -> Self {
        Self { inner, cache }
    }

    pub fn uncached(inner: S) -> Self {
        Self { inner, cache: None }
    }

    pub fn cache(&self) -> Option<&SegmentCache> {
        self.cache.as_ref()
    }

    pub fn inner(&self) -> &S {
        &self.inner
    }
}

impl<S: Segmenter> CachedSegmenter<S> {
    /// Segment `text`, consulting the cache first.
    pub fn segment(&self, text: &str) -> Result<Segmented> {
        if text.is_empty() {
            return Ok(Segmented::empty());
        }
        let Some(cache) = &self.cache else {
            return self.segment_uncached(text);
        };
        if let Some(joined) = cache.get(text) {
            debug!(chars = text.chars().count(), "segment cache hit");
            return Ok(Segmented::from_joined(joined));
        }
        debug!(chars = text.chars().count(), "segment cache miss");
        let segmented = self.segment_uncached(text)?;
        cache.insert(text, segmented.shared());
        Ok(segmented)
    }

    fn segment_uncached(&self, text: &str) -> Result<Segmented> {
        let tokens = self.inner.cut(text)?;
        Ok(Segmented::from_tokens(&tokens))
    }
}

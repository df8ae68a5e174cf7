use regex::Regex;

use crate::{
    config::VectorizerOptions,
    error::{Result, SimilarityError},
    vectorizer::token::TermFrequency,
};

/// Turns a space-joined document into term counts.
///
/// With the default pattern only runs of two or more word characters
/// survive, so single characters and punctuation never reach the
/// vocabulary.
#[derive(Debug, Clone)]
pub struct TermAnalyzer {
    pattern: Regex,
    lowercase: bool,
}

impl TermAnalyzer {
    pub fn new(options: &VectorizerOptions) -> Result<Self> {
        let pattern = Regex::new(&options.token_pattern)
            .map_err(|e| SimilarityError::Config(format!("token_pattern: {e}")))?;
        Ok(Self {
            pattern,
            lowercase: options.lowercase,
        })
    }

    pub fn analyze(&self, doc: &str) -> TermFrequency {
        let mut freq = TermFrequency::new();
        if self.lowercase {
            let lowered = doc.to_lowercase();
            self.collect(&lowered, &mut freq);
        } else {
            self.collect(doc, &mut freq);
        }
        freq
    }

    #[inline]
    fn collect(&self, doc: &str, freq: &mut TermFrequency) {
        for m in self.pattern.find_iter(doc) {
            freq.add_term(m.as_str());
        }
    }
}

use indexmap::IndexMap;
use num::{Float, NumCast};

use crate::{config::VectorizerOptions, utils::math::vector::SparseVec, vectorizer::token::TermFrequency};

pub trait TfIdfEngine<N>
where
    N: Float,
{
    /// IDFベクトルを生成するメソッド
    /// # Arguments
    /// * `doc_freqs` - 次元ごとの出現ドキュメント数
    /// * `doc_num` - ドキュメント数
    /// # Returns
    /// * `Vec<N>` - IDFベクトル
    fn idf_vec(doc_freqs: &[u32], doc_num: usize, options: &VectorizerOptions) -> Vec<N>;
    /// TFベクトルを生成するメソッド
    /// Terms missing from `vocabulary` are ignored.
    fn tf_vec(freq: &TermFrequency, vocabulary: &IndexMap<String, usize>, options: &VectorizerOptions) -> SparseVec<N>;
}

/// デフォルトのTF-IDFエンジン
///
/// - tf: raw count, or `1 + ln(count)` when `sublinear_tf`
/// - idf: `ln((1 + n) / (1 + df)) + 1` when `smooth_idf`, else `ln(n / df) + 1`
#[derive(Debug, Default, Clone, Copy)]
pub struct DefaultTfIdfEngine;

impl DefaultTfIdfEngine {
    #[inline]
    pub fn idf_calc(doc_num: usize, doc_freq: u32, smooth: bool) -> f64 {
        let (n, df) = (doc_num as f64, doc_freq as f64);
        if smooth {
            ((1.0 + n) / (1.0 + df)).ln() + 1.0
        } else {
            (n / df).ln() + 1.0
        }
    }

    #[inline]
    pub fn tf_calc(count: u32, sublinear: bool) -> f64 {
        if sublinear && count > 0 {
            1.0 + (count as f64).ln()
        } else {
            count as f64
        }
    }
}

impl<N> TfIdfEngine<N> for DefaultTfIdfEngine
where
    N: Float,
{
    fn idf_vec(doc_freqs: &[u32], doc_num: usize, options: &VectorizerOptions) -> Vec<N> {
        doc_freqs
            .iter()
            .map(|&df| {
                let idf = Self::idf_calc(doc_num, df, options.smooth_idf);
                <N as NumCast>::from(idf).unwrap_or_else(N::nan)
            })
            .collect()
    }

    fn tf_vec(freq: &TermFrequency, vocabulary: &IndexMap<String, usize>, options: &VectorizerOptions) -> SparseVec<N> {
        let entries = freq
            .iter()
            .filter_map(|(term, count)| {
                let idx = *vocabulary.get(term)?;
                let tf = Self::tf_calc(count, options.sublinear_tf);
                Some((idx, <N as NumCast>::from(tf).unwrap_or_else(N::nan)))
            })
            .collect();
        SparseVec::from_entries(vocabulary.len(), entries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn smooth_idf_matches_formula() {
        // two docs, term in one of them: ln(3/2) + 1
        let idf = DefaultTfIdfEngine::idf_calc(2, 1, true);
        assert!((idf - (1.5_f64.ln() + 1.0)).abs() < 1e-12);
        // term in every doc
        assert!((DefaultTfIdfEngine::idf_calc(2, 2, true) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn raw_idf_matches_formula() {
        let idf = DefaultTfIdfEngine::idf_calc(4, 1, false);
        assert!((idf - (4.0_f64.ln() + 1.0)).abs() < 1e-12);
    }

    #[test]
    fn sublinear_tf() {
        assert_eq!(DefaultTfIdfEngine::tf_calc(3, false), 3.0);
        assert!((DefaultTfIdfEngine::tf_calc(3, true) - (1.0 + 3.0_f64.ln())).abs() < 1e-12);
        assert_eq!(DefaultTfIdfEngine::tf_calc(0, true), 0.0);
    }

    #[test]
    fn tf_vec_uses_vocabulary_dims() {
        let mut vocabulary = IndexMap::new();
        vocabulary.insert("天气".to_string(), 0);
        vocabulary.insert("散步".to_string(), 1);
        let mut freq = TermFrequency::new();
        freq.add_terms(&["散步", "散步", "未知"]);
        let v: SparseVec<f64> =
            <DefaultTfIdfEngine as TfIdfEngine<f64>>::tf_vec(&freq, &vocabulary, &VectorizerOptions::default());
        assert_eq!(v.len(), 2);
        assert_eq!(v.raw_iter().collect::<Vec<_>>(), vec![(1, 2.0)]);
    }
}

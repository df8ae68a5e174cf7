use std::cmp::Ordering;

use num::Float;

pub trait Compare<N>
where
    N: Float,
{
    /// コサイン類似度
    /// cos(θ) = Σ(a_i * b_i) / (||a|| * ||b||)
    /// ||a|| = sqrt(Σ(a_i^2))
    fn cosine_similarity(vec: impl Iterator<Item = (usize, N)>, other: impl Iterator<Item = (usize, N)>) -> f64;
}

/// Sparse comparisons over index-ascending `(index, value)` iterators.
#[derive(Debug)]
pub struct DefaultCompare;

impl<N> Compare<N> for DefaultCompare
where
    N: Float,
{
    /// A zero vector on either side gives 0.0.
    #[inline]
    fn cosine_similarity(vec: impl Iterator<Item = (usize, N)>, other: impl Iterator<Item = (usize, N)>) -> f64 {
        let mut a_it = vec.fuse();
        let mut b_it = other.fuse();
        let mut a_next = a_it.next();
        let mut b_next = b_it.next();
        let mut norm_a = 0_f64;
        let mut norm_b = 0_f64;
        let mut dot = 0_f64;
        while let (Some((ia, va)), Some((ib, vb))) = (a_next, b_next) {
            let (va, vb) = (va.to_f64().unwrap_or(0.0), vb.to_f64().unwrap_or(0.0));
            match ia.cmp(&ib) {
                Ordering::Equal => {
                    norm_a += va * va;
                    norm_b += vb * vb;
                    dot += va * vb;
                    a_next = a_it.next();
                    b_next = b_it.next();
                }
                Ordering::Less => {
                    norm_a += va * va;
                    a_next = a_it.next();
                }
                Ordering::Greater => {
                    norm_b += vb * vb;
                    b_next = b_it.next();
                }
            }
        }
        while let Some((_, va)) = a_next {
            let va = va.to_f64().unwrap_or(0.0);
            norm_a += va * va;
            a_next = a_it.next();
        }
        while let Some((_, vb)) = b_next {
            let vb = vb.to_f64().unwrap_or(0.0);
            norm_b += vb * vb;
            b_next = b_it.next();
        }
        if norm_a == 0.0 || norm_b == 0.0 {
            0.0
        } else {
            dot / (norm_a.sqrt() * norm_b.sqrt())
        }
    }
}

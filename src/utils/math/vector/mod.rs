use num::Float;

/// SparseVec は 0 要素を省いた疎ベクトル
/// indices と values を持ち、indices は昇順であることを保証します
///
/// `len` is the logical dimension (vocabulary size); only non-zero
/// entries are stored.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SparseVec<N>
where
    N: Float,
{
    indices: Vec<usize>,
    values: Vec<N>,
    len: usize,
}

impl<N> SparseVec<N>
where
    N: Float,
{
    #[inline]
    pub fn new(len: usize) -> Self {
        SparseVec {
            indices: Vec::new(),
            values: Vec::new(),
            len,
        }
    }

    /// Build from `(index, value)` pairs in any order.
    /// Zero values are dropped. Duplicate indices are summed.
    ///
    /// # Arguments
    /// * `len` - logical dimension
    /// * `entries` - pairs with `index < len`
    pub fn from_entries(len: usize, mut entries: Vec<(usize, N)>) -> Self {
        entries.sort_unstable_by_key(|(idx, _)| *idx);
        let mut vec = SparseVec {
            indices: Vec::with_capacity(entries.len()),
            values: Vec::with_capacity(entries.len()),
            len,
        };
        for (idx, val) in entries {
            debug_assert!(idx < len, "index {idx} out of bounds for len {len}");
            if vec.indices.last() == Some(&idx) {
                if let Some(last) = vec.values.last_mut() {
                    *last = *last + val;
                }
                continue;
            }
            vec.indices.push(idx);
            vec.values.push(val);
        }
        vec.drop_zeros();
        vec
    }

    fn drop_zeros(&mut self) {
        let mut keep = 0;
        for i in 0..self.values.len() {
            if !self.values[i].is_zero() {
                self.indices[keep] = self.indices[i];
                self.values[keep] = self.values[i];
                keep += 1;
            }
        }
        self.indices.truncate(keep);
        self.values.truncate(keep);
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// number of stored (non-zero) entries
    #[inline]
    pub fn nnz(&self) -> usize {
        self.indices.len()
    }

    #[inline]
    pub fn get(&self, index: usize) -> N {
        match self.indices.binary_search(&index) {
            Ok(i) => self.values[i],
            Err(_) => N::zero(),
        }
    }

    /// Non-zero entries in ascending index order.
    #[inline]
    pub fn raw_iter(&self) -> impl Iterator<Item = (usize, N)> + '_ {
        self.indices.iter().copied().zip(self.values.iter().copied())
    }

    /// Multiply entry `i` by `weights[i]`.
    pub fn hadamard_dense(&mut self, weights: &[N]) {
        for (idx, val) in self.indices.iter().zip(self.values.iter_mut()) {
            *val = *val * weights.get(*idx).copied().unwrap_or_else(N::zero);
        }
        self.drop_zeros();
    }

    /// L2 norm
    #[inline]
    pub fn norm(&self) -> N {
        self.values
            .iter()
            .fold(N::zero(), |acc, &v| acc + v * v)
            .sqrt()
    }

    /// Scale to unit L2 norm. A zero vector is left as is.
    pub fn normalize(&mut self) {
        let norm = self.norm();
        if norm.is_zero() {
            return;
        }
        for val in self.values.iter_mut() {
            *val = *val / norm;
        }
    }

    pub fn is_finite(&self) -> bool {
        self.values.iter().all(|v| v.is_finite())
    }
}

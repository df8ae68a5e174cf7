//! Character level similarity used when the vector model degenerates.
//!
//! Ratcliff/Obershelp matching: find the longest common block, recurse on
//! both sides of it, and score `2 * M / (len(a) + len(b))` where `M` is the
//! total length of matched blocks.

use std::collections::{HashMap, HashSet};

/// Sequences at least this long get the popular-element heuristic.
const AUTOJUNK_MIN_LEN: usize = 200;

/// A matched block: `a[a_start..a_start + size] == b[b_start..b_start + size]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Block {
    pub a_start: usize,
    pub b_start: usize,
    pub size: usize,
}

/// Matcher over the `char`s of two strings.
///
/// When `b` has at least 200 chars, chars occurring more than
/// `len(b) / 100 + 1` times in it are "popular" and never start a match,
/// though matches may still extend over them.
pub struct SequenceMatcher {
    a: Vec<char>,
    b: Vec<char>,
    /// char -> ascending positions in b, popular chars removed
    b2j: HashMap<char, Vec<usize>>,
}

impl SequenceMatcher {
    pub fn new(a: &str, b: &str) -> Self {
        let a: Vec<char> = a.chars().collect();
        let b: Vec<char> = b.chars().collect();
        let mut b2j: HashMap<char, Vec<usize>> = HashMap::new();
        for (j, &c) in b.iter().enumerate() {
            b2j.entry(c).or_default().push(j);
        }
        let n = b.len();
        if n >= AUTOJUNK_MIN_LEN {
            let ntest = n / 100 + 1;
            let popular: HashSet<char> = b2j
                .iter()
                .filter(|(_, idxs)| idxs.len() > ntest)
                .map(|(&c, _)| c)
                .collect();
            for c in popular {
                b2j.remove(&c);
            }
        }
        Self { a, b, b2j }
    }

    /// Longest matching block in `a[alo..ahi]` x `b[blo..bhi]`.
    /// Ties go to the earliest start in `a`, then in `b`.
    fn find_longest_match(&self, alo: usize, ahi: usize, blo: usize, bhi: usize) -> Block {
        let (mut besti, mut bestj, mut bestsize) = (alo, blo, 0usize);
        // j2len[j] = length of the match ending at a[i - 1], b[j]
        let mut j2len: HashMap<usize, usize> = HashMap::new();
        for i in alo..ahi {
            let mut new_j2len: HashMap<usize, usize> = HashMap::new();
            if let Some(positions) = self.b2j.get(&self.a[i]) {
                for &j in positions {
                    if j < blo {
                        continue;
                    }
                    if j >= bhi {
                        break;
                    }
                    let k = j
                        .checked_sub(1)
                        .and_then(|prev| j2len.get(&prev))
                        .copied()
                        .unwrap_or(0)
                        + 1;
                    new_j2len.insert(j, k);
                    if k > bestsize {
                        besti = i + 1 - k;
                        bestj = j + 1 - k;
                        bestsize = k;
                    }
                }
            }
            j2len = new_j2len;
        }

        // popular chars were skipped as anchors; grow the block over equal neighbours
        while besti > alo && bestj > blo && self.a[besti - 1] == self.b[bestj - 1] {
            besti -= 1;
            bestj -= 1;
            bestsize += 1;
        }
        while besti + bestsize < ahi
            && bestj + bestsize < bhi
            && self.a[besti + bestsize] == self.b[bestj + bestsize]
        {
            bestsize += 1;
        }
        Block {
            a_start: besti,
            b_start: bestj,
            size: bestsize,
        }
    }

    /// Non-overlapping matched blocks in ascending order.
    pub fn matching_blocks(&self) -> Vec<Block> {
        let mut queue = vec![(0, self.a.len(), 0, self.b.len())];
        let mut blocks = Vec::new();
        while let Some((alo, ahi, blo, bhi)) = queue.pop() {
            let m = self.find_longest_match(alo, ahi, blo, bhi);
            if m.size == 0 {
                continue;
            }
            if alo < m.a_start && blo < m.b_start {
                queue.push((alo, m.a_start, blo, m.b_start));
            }
            if m.a_start + m.size < ahi && m.b_start + m.size < bhi {
                queue.push((m.a_start + m.size, ahi, m.b_start + m.size, bhi));
            }
            blocks.push(m);
        }
        blocks.sort_by_key(|blk| (blk.a_start, blk.b_start));
        blocks
    }

    /// `2 * M / T`; 1.0 when both sequences are empty.
    pub fn ratio(&self) -> f64 {
        let total = self.a.len() + self.b.len();
        if total == 0 {
            return 1.0;
        }
        let matches: usize = self.matching_blocks().iter().map(|blk| blk.size).sum();
        2.0 * matches as f64 / total as f64
    }
}

/// Shorthand for `SequenceMatcher::new(a, b).ratio()`.
#[inline]
pub fn sequence_ratio(a: &str, b: &str) -> f64 {
    SequenceMatcher::new(a, b).ratio()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identical_is_one() {
        assert_eq!(sequence_ratio("今天天气", "今天天气"), 1.0);
    }

    #[test]
    fn both_empty_is_one() {
        assert_eq!(sequence_ratio("", ""), 1.0);
    }

    #[test]
    fn one_empty_is_zero() {
        assert_eq!(sequence_ratio("abc", ""), 0.0);
    }

    #[test]
    fn nothing_shared_is_zero() {
        assert_eq!(sequence_ratio("好", "坏"), 0.0);
    }

    #[test]
    fn classic_example() {
        // ab + cd matched: 2 * 4 / 9
        let r = sequence_ratio("abxcd", "abcd");
        assert!((r - 8.0 / 9.0).abs() < 1e-12);
    }

    #[test]
    fn blocks_are_ordered_and_disjoint() {
        let m = SequenceMatcher::new("qabxcd", "abycdf");
        let blocks = m.matching_blocks();
        assert_eq!(
            blocks,
            vec![
                Block { a_start: 1, b_start: 0, size: 2 },
                Block { a_start: 4, b_start: 3, size: 2 },
            ]
        );
        assert!((m.ratio() - 8.0 / 12.0).abs() < 1e-12);
    }

    #[test]
    fn counts_chars_not_bytes() {
        // 好的 vs 好 -> one matched char out of three
        assert!((sequence_ratio("好的", "好") - 2.0 / 3.0).abs() < 1e-12);
    }

    #[test]
    fn popular_chars_do_not_anchor_long_sequences() {
        // every char of b is popular, so 'x' cannot start a match
        let b = "x".repeat(300);
        assert_eq!(sequence_ratio("ax", &b), 0.0);
        assert!(sequence_ratio("ax", "xx") > 0.0);
        // a block starting at the range origin still grows over popular chars
        assert!((sequence_ratio("x", &b) - 2.0 / 301.0).abs() < 1e-12);
    }

    #[test]
    fn ratio_is_bounded() {
        for (a, b) in [("今天天气很好", "明天要下雨了"), ("abc", "cab"), ("文本", "文本文本")] {
            let r = sequence_ratio(a, b);
            assert!((0.0..=1.0).contains(&r), "{a} {b} -> {r}");
        }
    }
}

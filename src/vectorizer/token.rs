use indexmap::IndexMap;

/// TermFrequency 構造体
/// 1 ドキュメント内の term の出現回数を管理します
///
/// Terms keep first-seen order.
///
/// # Examples
/// ```
/// use simcheck::TermFrequency;
/// let mut freq = TermFrequency::new();
/// freq.add_terms(&["今天", "天气", "今天"]);
/// assert_eq!(freq.term_count("今天"), 2);
/// assert_eq!(freq.term_sum(), 3);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TermFrequency {
    term_count: IndexMap<String, u32>,
    total_term_count: u64,
}

impl TermFrequency {
    pub fn new() -> Self {
        TermFrequency {
            term_count: IndexMap::new(),
            total_term_count: 0,
        }
    }

    /// termを追加する
    #[inline]
    pub fn add_term(&mut self, term: &str) -> &mut Self {
        if let Some(count) = self.term_count.get_mut(term) {
            *count += 1;
        } else {
            self.term_count.insert(term.to_string(), 1);
        }
        self.total_term_count += 1;
        self
    }

    /// 複数のtermを追加する
    #[inline]
    pub fn add_terms<T>(&mut self, terms: &[T]) -> &mut Self
    where
        T: AsRef<str>,
    {
        for term in terms {
            self.add_term(term.as_ref());
        }
        self
    }

    #[inline]
    pub fn term_count(&self, term: &str) -> u32 {
        self.term_count.get(term).copied().unwrap_or(0)
    }

    /// total number of term occurrences
    #[inline]
    pub fn term_sum(&self) -> u64 {
        self.total_term_count
    }

    /// number of distinct terms
    #[inline]
    pub fn len(&self) -> usize {
        self.term_count.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.term_count.is_empty()
    }

    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = (&str, u32)> {
        self.term_count.iter().map(|(term, &count)| (term.as_str(), count))
    }

    #[inline]
    pub fn term_set_iter(&self) -> impl Iterator<Item = &str> {
        self.term_count.keys().map(|s| s.as_str())
    }
}

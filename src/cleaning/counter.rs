//! Frequency table of tokens that kept TeX markup after cleaning.
use std::collections::HashMap;

use itertools::Itertools;

/// Counts occurrences of unhandled TeX tokens.
#[derive(Debug, Default)]
pub struct TexCounter {
    counts: HashMap<String, u64>,
}

impl TexCounter {
    /// Add 1 to the count of `tex`, creating the entry if needed.
    #[inline]
    pub fn add(&mut self, tex: &str) {
        self.counts
            .entry(tex.to_string())
            .and_modify(|count| *count += 1)
            .or_insert(1);
    }

    pub fn get(&self, tex: &str) -> u64 {
        self.counts.get(tex).copied().unwrap_or_default()
    }

    /// Number of distinct tokens.
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// The `n` most frequent tokens, most frequent first.
    ///
    /// Ties are broken alphabetically so that reports are stable between runs.
    pub fn most_common(&self, n: usize) -> Vec<(&str, u64)> {
        self.counts
            .iter()
            .sorted_by(|a, b| b.1.cmp(a.1).then_with(|| a.0.cmp(b.0)))
            .take(n)
            .map(|(tex, count)| (tex.as_str(), *count))
            .collect()
    }
}

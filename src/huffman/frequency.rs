use std::collections::BTreeMap;

/// Occurrence counts for every distinct symbol of one input.
///
/// Ordered by symbol, so iteration (and everything built from it) is
/// deterministic.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FrequencyTable {
    counts: BTreeMap<char, u64>,
}

impl FrequencyTable {
    /// Count every symbol of `text` in a single pass.
    pub fn from_text(text: &str) -> Self {
        let mut counts = BTreeMap::new();
        for symbol in text.chars() {
            *counts.entry(symbol).or_insert(0) += 1;
        }
        Self { counts }
    }

    /// Rebuild a table from persisted `(symbol, count)` pairs.
    ///
    /// Zero counts are dropped; a symbol that never occurs doesn't belong to
    /// the alphabet.
    pub fn from_counts(pairs: impl IntoIterator<Item = (char, u64)>) -> Self {
        let counts = pairs.into_iter().filter(|&(_, count)| count != 0).collect();
        Self { counts }
    }

    pub fn get(&self, symbol: char) -> u64 {
        self.counts.get(&symbol).copied().unwrap_or(0)
    }

    /// Number of distinct symbols.
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Sum of all counts, i.e. the length of the counted text in symbols.
    ///
    /// Saturates at `u64::MAX`.
    pub fn total(&self) -> u64 {
        self.counts
            .values()
            .fold(0u64, |total, &count| total.saturating_add(count))
    }

    /// `(symbol, count)` pairs in ascending symbol order.
    pub fn iter(&self) -> impl Iterator<Item = (char, u64)> + '_ {
        self.counts.iter().map(|(&symbol, &count)| (symbol, count))
    }
}

#[cfg(test)]
mod tests {
    use test_case::test_case;

    use super::*;

    #[test]
    fn counts_repeats() {
        let table = FrequencyTable::from_text("aabbbcc");
        assert_eq!(table.iter().collect::<Vec<_>>(), [('a', 2), ('b', 3), ('c', 2)]);
        assert_eq!(table.total(), 7);
        assert_eq!(table.get('z'), 0);
    }

    #[test_case("" ; "empty")]
    #[test_case("aaaa" ; "single symbol")]
    #[test_case("héllo wörld" ; "non ascii")]
    fn total_matches_char_count(text: &str) {
        let table = FrequencyTable::from_text(text);
        assert_eq!(table.total(), text.chars().count() as u64);
    }

    #[test]
    fn empty_text_gives_empty_table() {
        let table = FrequencyTable::from_text("");
        assert!(table.is_empty());
        assert_eq!(table.len(), 0);
    }

    #[test]
    fn from_counts_drops_zeros() {
        let table = FrequencyTable::from_counts([('x', 0), ('y', 4)]);
        assert_eq!(table.len(), 1);
        assert_eq!(table, FrequencyTable::from_text("yyyy"));
    }
}

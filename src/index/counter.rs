use std::collections::BTreeMap;
use std::io::{self, Write};

use anyhow::Result;
use tracing::debug;

use crate::present;
use crate::tokenizer::Tokenizer;

use super::{LineStore, TextIndex};

/// Word-frequency index: each lowercased token maps to the number of times
/// it occurs across all stored lines.
///
/// The aggregate is a `BTreeMap`, so presentation order (ascending
/// lexicographic by token) falls out of iteration; ordering is a correctness
/// requirement here, not a convenience.
#[derive(Debug, Default)]
pub struct CounterIndex {
    lines: LineStore,
    index: BTreeMap<String, u64>,
}

impl CounterIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Occurrences of `token` (already lowercased) per the last resolve,
    /// zero if absent.
    pub fn count(&self, token: &str) -> u64 {
        self.index.get(token).copied().unwrap_or(0)
    }

    /// Sum of all counts, i.e. the total number of tokens indexed.
    pub fn total_tokens(&self) -> u64 {
        self.index.values().sum()
    }
}

impl TextIndex for CounterIndex {
    fn add_line(&mut self, line: &str) {
        self.lines.push(line);
    }

    fn resolve(&mut self, delimiters: &str) -> Result<()> {
        // Compile before clearing so a bad pattern leaves the old aggregate.
        let tokenizer = Tokenizer::new(delimiters)?;
        self.index.clear();
        for line in self.lines.iter() {
            for token in tokenizer.tokens(line) {
                *self.index.entry(token.to_lowercase()).or_insert(0) += 1;
            }
        }
        debug!(
            lines = self.lines.len(),
            terms = self.index.len(),
            "rebuilt counter index"
        );
        Ok(())
    }

    fn present(&self, sink: &mut dyn Write) -> io::Result<()> {
        for (token, &count) in &self.index {
            present::write_count_row(sink, token, count)?;
        }
        Ok(())
    }

    fn term_count(&self) -> usize {
        self.index.len()
    }

    fn line_count(&self) -> usize {
        self.lines.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DELIM: &str = r"[ .,:;!?-]+";

    fn rendered(index: &CounterIndex) -> String {
        let mut buf = Vec::new();
        index.present(&mut buf).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn test_counts_repeated_tokens() {
        let mut index = CounterIndex::new();
        index.add_line("la jarra y la perra");
        index.add_line("la porra");
        index.resolve(DELIM).unwrap();

        assert_eq!(index.count("la"), 3);
        assert_eq!(index.count("jarra"), 1);
        assert_eq!(index.count("ausente"), 0);
    }

    #[test]
    fn test_case_folding_collapses_tokens() {
        let mut index = CounterIndex::new();
        index.add_line("Guerra guerra GUERRA");
        index.resolve(DELIM).unwrap();

        assert_eq!(index.term_count(), 1);
        assert_eq!(index.count("guerra"), 3);
    }

    #[test]
    fn test_present_is_sorted_and_fixed_width() {
        let mut index = CounterIndex::new();
        index.add_line("zeta alfa zeta");
        index.resolve(DELIM).unwrap();

        assert_eq!(rendered(&index), "alfa          1\nzeta          2\n");
    }

    #[test]
    fn test_empty_index_presents_nothing() {
        let mut index = CounterIndex::new();
        assert_eq!(rendered(&index), "");

        index.resolve(DELIM).unwrap();
        assert_eq!(rendered(&index), "");
    }

    #[test]
    fn test_resolve_discards_previous_aggregate() {
        let mut index = CounterIndex::new();
        index.add_line("uno dos");
        index.resolve(DELIM).unwrap();
        assert_eq!(index.count("uno"), 1);

        // Re-resolving must recount, not accumulate.
        index.resolve(DELIM).unwrap();
        assert_eq!(index.count("uno"), 1);
        assert_eq!(index.total_tokens(), 2);
    }

    #[test]
    fn test_invalid_pattern_keeps_old_aggregate() {
        let mut index = CounterIndex::new();
        index.add_line("uno dos");
        index.resolve(DELIM).unwrap();

        assert!(index.resolve("[broken").is_err());
        assert_eq!(index.count("uno"), 1);
        assert_eq!(index.term_count(), 2);
    }

    #[test]
    fn test_lines_persist_across_resolves() {
        let mut index = CounterIndex::new();
        index.add_line("uno");
        index.resolve(DELIM).unwrap();
        index.add_line("uno");
        index.resolve(DELIM).unwrap();

        assert_eq!(index.count("uno"), 2);
    }
}

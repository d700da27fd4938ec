use std::collections::{BTreeMap, BTreeSet};
use std::io::{self, Write};

use anyhow::Result;
use tracing::debug;

use crate::present;
use crate::tokenizer::Tokenizer;

use super::{LineStore, TextIndex};

/// Line-occurrence index: each lowercased token maps to the ascending set of
/// 1-based line numbers it appears on. Repeated occurrences on one line
/// collapse into a single set entry.
#[derive(Debug, Default)]
pub struct LineIndex {
    lines: LineStore,
    index: BTreeMap<String, BTreeSet<usize>>,
}

impl LineIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Line numbers for `token` (already lowercased) per the last resolve.
    pub fn lines_for(&self, token: &str) -> Option<&BTreeSet<usize>> {
        self.index.get(token)
    }
}

impl TextIndex for LineIndex {
    fn add_line(&mut self, line: &str) {
        self.lines.push(line);
    }

    fn resolve(&mut self, delimiters: &str) -> Result<()> {
        let tokenizer = Tokenizer::new(delimiters)?;
        self.index.clear();
        for (line_no, line) in self.lines.numbered() {
            for token in tokenizer.tokens(line) {
                self.index
                    .entry(token.to_lowercase())
                    .or_default()
                    .insert(line_no);
            }
        }
        debug!(
            lines = self.lines.len(),
            terms = self.index.len(),
            "rebuilt line index"
        );
        Ok(())
    }

    fn present(&self, sink: &mut dyn Write) -> io::Result<()> {
        for (token, line_set) in &self.index {
            present::write_line_set_row(sink, token, line_set.iter().copied())?;
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

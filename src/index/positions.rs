use std::collections::{BTreeMap, BTreeSet};
use std::io::{self, Write};

use anyhow::Result;
use tracing::debug;

use crate::present;
use crate::tokenizer::Tokenizer;

use super::{LineStore, TextIndex};

/// Position index: each lowercased token maps to the lines it appears on, and
/// within each line to the ascending set of 1-based positions it occupies.
///
/// A position is the token's rank among the non-empty tokens of its line, so
/// delimiter runs never consume position numbers. The position counter resets
/// at the start of every line.
#[derive(Debug, Default)]
pub struct PositionIndex {
    lines: LineStore,
    index: BTreeMap<String, BTreeMap<usize, BTreeSet<usize>>>,
}

impl PositionIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Positions of `token` (already lowercased) on `line_no`, per the last
    /// resolve.
    pub fn positions_for(&self, token: &str, line_no: usize) -> Option<&BTreeSet<usize>> {
        self.index.get(token)?.get(&line_no)
    }
}

impl TextIndex for PositionIndex {
    fn add_line(&mut self, line: &str) {
        self.lines.push(line);
    }

    fn resolve(&mut self, delimiters: &str) -> Result<()> {
        let tokenizer = Tokenizer::new(delimiters)?;
        self.index.clear();
        for (line_no, line) in self.lines.numbered() {
            for (rank, token) in tokenizer.tokens(line).enumerate() {
                self.index
                    .entry(token.to_lowercase())
                    .or_default()
                    .entry(line_no)
                    .or_default()
                    .insert(rank + 1);
            }
        }
        debug!(
            lines = self.lines.len(),
            terms = self.index.len(),
            "rebuilt position index"
        );
        Ok(())
    }

    fn present(&self, sink: &mut dyn Write) -> io::Result<()> {
        for (token, per_line) in &self.index {
            present::write_token_header(sink, token)?;
            for (&line_no, positions) in per_line {
                present::write_position_row(sink, line_no, positions.iter().copied())?;
            }
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

//! The index family: shared line storage plus three aggregate variants.
//!
//! Every variant owns a [`LineStore`] and a sorted aggregate. Lines accumulate
//! over the instance's lifetime; [`TextIndex::resolve`] rebuilds the aggregate
//! from scratch over the then-current lines, and [`TextIndex::present`] renders
//! it in a fixed layout. Resolving never mutates the stored lines.

use std::io::{self, Write};

use anyhow::Result;

pub mod counter;
pub mod lines;
pub mod positions;

pub use counter::CounterIndex;
pub use lines::LineIndex;
pub use positions::PositionIndex;

/// Ordered accumulation of raw input lines.
///
/// Line numbers are 1-based positions in insertion order, assigned only while
/// resolving; they are never stored per line. Empty and whitespace-only lines
/// are accepted and simply yield no tokens later.
#[derive(Debug, Default)]
pub struct LineStore {
    lines: Vec<String>,
}

impl LineStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a line verbatim. Cannot fail.
    pub fn push(&mut self, line: &str) {
        self.lines.push(line.to_string());
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Iterate lines in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.lines.iter().map(String::as_str)
    }

    /// Iterate `(line_number, line)` pairs, numbering from 1.
    pub fn numbered(&self) -> impl Iterator<Item = (usize, &str)> {
        self.iter().enumerate().map(|(i, line)| (i + 1, line))
    }
}

/// Common contract for the three index variants.
///
/// Lifecycle: an index starts empty; `add_line` may be called any number of
/// times; `resolve` (re)builds the aggregate from the current lines under the
/// given delimiter pattern; `present` is a pure read and writes zero rows if
/// `resolve` was never called.
pub trait TextIndex {
    /// Append one input line. Always succeeds.
    fn add_line(&mut self, line: &str);

    /// Discard the aggregate and rebuild it from the stored lines.
    ///
    /// `delimiters` is a regex describing the separators between words.
    /// Resolution is atomic: the pattern is compiled before anything is
    /// cleared, so an invalid pattern returns an error and leaves the
    /// previous aggregate intact.
    fn resolve(&mut self, delimiters: &str) -> Result<()>;

    /// Write the aggregate to `sink` in the variant's fixed layout.
    ///
    /// Write failures are the sink's errors and propagate unchanged; the
    /// index itself is not modified.
    fn present(&self, sink: &mut dyn Write) -> io::Result<()>;

    /// Number of distinct tokens in the current aggregate.
    fn term_count(&self) -> usize;

    /// Number of stored input lines.
    fn line_count(&self) -> usize;

    /// Convenience: present to the process's standard output.
    fn present_stdout(&self) -> io::Result<()> {
        let stdout = io::stdout();
        let mut handle = stdout.lock();
        self.present(&mut handle)?;
        handle.flush()
    }
}

use anyhow::{anyhow, Result};
use regex_automata::meta::Regex;
use tracing::debug;

/// Splits lines into word tokens using a delimiter regex.
///
/// The pattern describes the *separators*, not the words: a line is cut
/// wherever a maximal run of the pattern matches (e.g. `[ .,:;!?-]+` for
/// whitespace and punctuation). Empty fields produced by leading, trailing,
/// or adjacent delimiter runs are discarded; surviving tokens are lowercased
/// by the caller before use as index keys.
#[derive(Debug)]
pub struct Tokenizer {
    regex: Regex,
    pattern: String,
}

impl Tokenizer {
    /// Compile a delimiter pattern.
    ///
    /// A malformed pattern is a configuration error and is reported with the
    /// offending pattern in the message. Compilation happens once here, so
    /// tokenizing itself cannot fail.
    pub fn new(pattern: &str) -> Result<Self> {
        let regex = Regex::new(pattern)
            .map_err(|e| anyhow!("invalid delimiter pattern `{pattern}`: {e}"))?;
        debug!(pattern, "compiled delimiter pattern");
        Ok(Self {
            regex,
            pattern: pattern.to_string(),
        })
    }

    /// The pattern this tokenizer was built from.
    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    /// Lazily yield the non-empty fields of `line`.
    ///
    /// Fields borrow from `line`; case folding is left to the consumer so
    /// that callers who only need to count fields allocate nothing.
    pub fn tokens<'a>(&'a self, line: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.regex
            .split(line)
            .map(move |span| &line[span.range()])
            .filter(|field| !field.is_empty())
    }
}

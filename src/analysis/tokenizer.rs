//! Tokenizers that split document lines into raw tokens.
//!
//! Tokenization runs line by line. The [`SpaceTokenizer`] splits on the
//! single space character only, so tabs and other whitespace stay inside a
//! token and are removed later by [`normalize`](super::normalize).
//!
//! # Examples
//!
//! ```
//! use lexindex::analysis::tokenizer::{SpaceTokenizer, Tokenizer};
//!
//! let tokenizer = SpaceTokenizer::new();
//! let tokens: Vec<_> = tokenizer.tokenize("the cat sat").collect();
//! assert_eq!(tokens, vec!["the", "cat", "sat"]);
//! ```

use std::io;

/// Boxed iterator of raw tokens borrowed from one line.
pub type TokenStream<'a> = Box<dyn Iterator<Item = &'a str> + 'a>;

/// Trait for tokenizers that split a single line into raw tokens.
///
/// The trait requires `Send + Sync` so one tokenizer can be shared by every
/// indexing worker.
pub trait Tokenizer: Send + Sync {
    /// Split a line into raw, un-normalized tokens.
    fn tokenize<'a>(&self, line: &'a str) -> TokenStream<'a>;

    /// Get the name of this tokenizer.
    fn name(&self) -> &'static str;
}

/// A tokenizer that splits on `' '` and nothing else.
///
/// Consecutive spaces produce empty tokens, matching a plain split.
#[derive(Clone, Debug, Default)]
pub struct SpaceTokenizer;

impl SpaceTokenizer {
    /// Create a new space tokenizer.
    pub fn new() -> Self {
        SpaceTokenizer
    }
}

impl Tokenizer for SpaceTokenizer {
    fn tokenize<'a>(&self, line: &'a str) -> TokenStream<'a> {
        Box::new(line.split(' '))
    }

    fn name(&self) -> &'static str {
        "space"
    }
}

/// Lazily tokenize a sequence of lines.
///
/// The returned iterator is single-pass. A read error on a line is yielded
/// in place and the caller decides whether to stop.
pub fn tokenize_lines<'t, I>(
    tokenizer: &'t dyn Tokenizer,
    lines: I,
) -> impl Iterator<Item = io::Result<String>> + 't
where
    I: Iterator<Item = io::Result<String>> + 't,
{
    lines.flat_map(move |line| -> Box<dyn Iterator<Item = io::Result<String>> + 't> {
        match line {
            Ok(line) => {
                let tokens: Vec<io::Result<String>> = tokenizer
                    .tokenize(&line)
                    .map(|token| Ok(token.to_string()))
                    .collect();
                Box::new(tokens.into_iter())
            }
            Err(e) => Box::new(std::iter::once(Err(e))),
        }
    })
}

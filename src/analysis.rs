//! Text analysis: splitting document lines into raw tokens and
//! canonicalizing those tokens into index keys.

pub mod normalizer;
pub mod tokenizer;

pub use normalizer::{Word, normalize};
pub use tokenizer::{SpaceTokenizer, TokenStream, Tokenizer, tokenize_lines};

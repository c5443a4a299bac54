//! Token normalization.
//!
//! A [`Word`] is the canonical form of a raw token: surrounding whitespace
//! removed and lower-cased with Unicode (locale-independent) case mapping.
//! Two raw tokens that normalize to the same string are the same index key.
//!
//! # Examples
//!
//! ```
//! use lexindex::analysis::normalize;
//!
//! assert_eq!(normalize("  Cat "), "cat");
//! assert_eq!(normalize("CAT"), normalize("cat"));
//! ```

/// A normalized token used as an index key.
pub type Word = String;

/// Trim leading/trailing whitespace and lower-case the result.
///
/// Empty or all-whitespace input yields the empty word, which is still a
/// valid key.
pub fn normalize(raw: &str) -> Word {
    raw.trim().to_lowercase()
}

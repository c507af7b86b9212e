//! Mask runs
//!
//! Every redacted span is replaced by the same number of [`MASK_CHAR`]s.
//! Lengths are counted in characters, not bytes.

/// Filler character for redacted spans (U+2588 FULL BLOCK).
///
/// Not alphanumeric and not whitespace, so mask runs never satisfy a label
/// value, a pattern, or the digit catch-all on a second pass.
pub const MASK_CHAR: char = '\u{2588}';

/// Build a run of `len` mask characters
pub fn mask_run(len: usize) -> String {
    std::iter::repeat(MASK_CHAR).take(len).collect()
}

/// Mask a span, preserving its character count
pub fn mask(span: &str) -> String {
    mask_run(span.chars().count())
}

/// Number of characters in `span` that are not yet masked
pub fn unmasked_chars(span: &str) -> usize {
    span.chars().filter(|&c| c != MASK_CHAR).count()
}

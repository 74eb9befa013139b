//! Bit Utilities — Strings, Bytes, Text and Votes
//!
//! Conversions between the pipeline's `Vec<bool>` bit representation and the
//! forms people actually look at: `"0110"` strings, bytes, rendered text with
//! non-printables masked out. Also the small comparison helpers the link
//! metrics are built on, and a per-position majority vote for merging
//! repeated receptions of the same message.
//!
//! ## Example
//!
//! ```rust
//! use thermolink::bit_utils::{bits_from_str, bits_to_text, printable};
//!
//! let bits = bits_from_str("01101000011011110110110001100001").unwrap();
//! assert_eq!(bits_to_text(&bits), "hola");
//! assert_eq!(printable("hola\u{0}"), "hola*");
//! ```

/// A character that is neither `0`, `1` nor whitespace.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseBitsError {
    /// Character index in the input.
    pub position: usize,
    /// The offending character.
    pub found: char,
}

impl std::fmt::Display for ParseBitsError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Invalid bit character {:?} at position {}",
            self.found, self.position
        )
    }
}

impl std::error::Error for ParseBitsError {}

/// Parse a bitstring. Whitespace is ignored; anything else is an error.
pub fn bits_from_str(s: &str) -> Result<Vec<bool>, ParseBitsError> {
    let mut bits = Vec::with_capacity(s.len());
    for (position, ch) in s.chars().enumerate() {
        match ch {
            '0' => bits.push(false),
            '1' => bits.push(true),
            c if c.is_whitespace() => {}
            found => return Err(ParseBitsError { position, found }),
        }
    }
    Ok(bits)
}

/// Render bits as a `"0110"`-style string.
pub fn bits_to_string(bits: &[bool]) -> String {
    bits.iter().map(|&b| if b { '1' } else { '0' }).collect()
}

/// Pack bits into bytes, MSB first.
///
/// A final group shorter than 8 bits is taken right-aligned, so `"010"`
/// becomes the value 2 rather than 64. Receivers that cut a message short
/// mid-byte read the same trailing value the sender's logs show.
pub fn bits_to_bytes(bits: &[bool]) -> Vec<u8> {
    bits.chunks(8)
        .map(|chunk| chunk.iter().fold(0u8, |acc, &bit| (acc << 1) | bit as u8))
        .collect()
}

/// Render bits as text, one character per byte.
pub fn bits_to_text(bits: &[bool]) -> String {
    bits_to_bytes(bits).iter().map(|&b| b as char).collect()
}

/// Mask everything that is not alphanumeric with `*`.
///
/// Corrupted receptions decode to control characters and punctuation soup;
/// this keeps terminal output and reports legible.
pub fn printable(text: &str) -> String {
    text.chars()
        .map(|c| if c.is_alphanumeric() { c } else { '*' })
        .collect()
}

/// Positions where two bitstrings differ, compared over the shorter length.
pub fn diff_positions(a: &[bool], b: &[bool]) -> Vec<usize> {
    let mut diffs = Vec::new();
    for (i, (x, y)) in a.iter().zip(b.iter()).enumerate() {
        if x != y {
            diffs.push(i);
        }
    }
    diffs
}

/// Per-position majority vote across repeated receptions.
///
/// Compared over the shortest run; a position reads 1 only on a strict
/// majority, so ties fall to 0. Empty input yields an empty vote.
pub fn majority_vote(runs: &[Vec<bool>]) -> Vec<bool> {
    let width = match runs.iter().map(|r| r.len()).min() {
        Some(w) => w,
        None => return Vec::new(),
    };

    let mut merged = Vec::with_capacity(width);
    for i in 0..width {
        let ones = runs.iter().filter(|r| r[i]).count();
        merged.push(ones * 2 > runs.len());
    }
    merged
}

//! Syndrome Map — Extended Hamming Correction Lookup
//!
//! Builds the syndrome-to-outcome table for an extended Hamming code of
//! length `n` (any power of two >= 4): syndrome 0 means the word is clean,
//! a power-of-two syndrome points at a Hamming parity bit (data intact),
//! and every other syndrome names the data bit to flip, counted in
//! ascending codeword order.
//!
//! ## Example
//!
//! ```rust
//! use thermolink::syndrome_map::{SyndromeMap, SyndromeOutcome};
//!
//! let map = SyndromeMap::new(16).unwrap();
//! assert_eq!(map.lookup(0), SyndromeOutcome::NoError);
//! assert_eq!(map.lookup(4), SyndromeOutcome::ParityError);
//! assert_eq!(map.lookup(3), SyndromeOutcome::DataBit(0));
//! assert_eq!(map.lookup(15), SyndromeOutcome::DataBit(10));
//! assert_eq!(map.data_bits(), 11);
//! ```

/// What a syndrome value tells the corrector to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyndromeOutcome {
    /// Syndrome 0: no detectable error, nothing to flip.
    NoError,
    /// A Hamming parity bit is wrong; the data bits are intact.
    ParityError,
    /// Flip the k-th data bit (zero-based, ascending codeword order).
    DataBit(usize),
}

/// Invalid extended Hamming code length.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CodeLengthError {
    /// The rejected length.
    pub got: usize,
}

impl std::fmt::Display for CodeLengthError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Invalid code length: {}, expected a power of two >= 4",
            self.got
        )
    }
}

impl std::error::Error for CodeLengthError {}

/// Syndrome lookup table for one code length.
///
/// Entries are ordered by syndrome value, so the table for length `n` begins
/// with the table for every shorter power of two. The block assembler relies
/// on that when it decodes a truncated final chunk with the full-size map.
#[derive(Debug, Clone)]
pub struct SyndromeMap {
    n: usize,
    outcomes: Vec<SyndromeOutcome>,
}

impl SyndromeMap {
    /// Build the table for codewords of length `n`.
    ///
    /// `n` must be a power of two and at least 4 (position 0 carries the
    /// overall parity bit, so anything shorter has no room for data).
    pub fn new(n: usize) -> Result<Self, CodeLengthError> {
        if n < 4 || !n.is_power_of_two() {
            return Err(CodeLengthError { got: n });
        }

        let mut outcomes = Vec::with_capacity(n);
        let mut rank = 0;
        for syndrome in 0..n {
            let outcome = if syndrome == 0 {
                SyndromeOutcome::NoError
            } else if syndrome.is_power_of_two() {
                SyndromeOutcome::ParityError
            } else {
                rank += 1;
                SyndromeOutcome::DataBit(rank - 1)
            };
            outcomes.push(outcome);
        }

        Ok(Self { n, outcomes })
    }

    /// Look up the outcome for a syndrome. `syndrome` must be below `n`.
    pub fn lookup(&self, syndrome: usize) -> SyndromeOutcome {
        self.outcomes[syndrome]
    }

    /// Codeword length this table was built for.
    pub fn n(&self) -> usize {
        self.n
    }

    /// Number of data positions in a full codeword: n - log2(n) - 1.
    pub fn data_bits(&self) -> usize {
        self.n - self.n.trailing_zeros() as usize - 1
    }
}

//! Extended Hamming Codec — Single Error Correction, Double Error Detection
//!
//! Encoder/decoder for extended Hamming codewords of length `n` (a power of
//! two >= 4). Position 0 carries the overall parity bit, power-of-two
//! positions carry the Hamming parity bits, every other position carries a
//! data bit in ascending order. One flipped bit is located by the syndrome
//! and repaired; two flipped bits raise the double-error indicator so the
//! caller can quarantine the block instead of corrupting it further.
//!
//! The double-error indicator is the deployed receiver's test, kept as is:
//! `ones % 2 != bit0 && syndrome != 0`. With a received overall-parity bit of
//! 0 it flags some single errors and waves through some double errors; see
//! [`ExtendedHamming::decode`].
//!
//! ## Example
//!
//! ```rust
//! use thermolink::extended_hamming::ExtendedHamming;
//!
//! let code = ExtendedHamming::new(16).unwrap();
//! let data = vec![
//!     false, true, true, true, true, false, true, true, false, true, true,
//! ];
//! let mut word = code.encode(&data);
//!
//! // One bit flipped in transit
//! word[9] = !word[9];
//! let result = code.decode(&word);
//! assert!(!result.double_error);
//! assert_eq!(result.syndrome, 9);
//!
//! let (fixed, applied) = code.correct(&result);
//! assert_eq!(fixed, data);
//! assert_eq!(applied, 1);
//! ```

use crate::syndrome_map::{CodeLengthError, SyndromeMap, SyndromeOutcome};

/// Outcome of decoding one received codeword.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodeResult {
    /// Data bits as received, ascending codeword order, uncorrected.
    pub data_bits: Vec<bool>,
    /// XOR of the indices of all set bits; 0 means no detectable error.
    pub syndrome: usize,
    /// Double-error indicator; when set, `correct` must not be applied.
    pub double_error: bool,
}

/// Extended Hamming encoder/decoder for one code length.
#[derive(Debug, Clone)]
pub struct ExtendedHamming {
    n: usize,
    map: SyndromeMap,
}

impl ExtendedHamming {
    /// Create a codec for codewords of length `n` (power of two, >= 4).
    ///
    /// The syndrome map is built once here; `decode` and `correct` never fail.
    pub fn new(n: usize) -> Result<Self, CodeLengthError> {
        let map = SyndromeMap::new(n)?;
        Ok(Self { n, map })
    }

    /// Decode a received word into data bits, syndrome and the double-error
    /// indicator.
    ///
    /// Input longer than `n` is examined only up to `n`. Shorter input (a
    /// truncated final chunk of a stream) is examined as is; absent positions
    /// contribute nothing to the syndrome or the ones count.
    ///
    /// The indicator is `ones % 2 != bit0 && syndrome != 0`, where `ones`
    /// counts set bits across the examined word and `bit0` is the received
    /// overall-parity bit. When `bit0` arrives as 0, a single error at a
    /// nonzero position is reported as double (the block is then passed
    /// through uncorrected), and a two-bit error can escape the flag and be
    /// miscorrected. Both behaviors are pinned by tests.
    pub fn decode(&self, codeword: &[bool]) -> DecodeResult {
        let word = if codeword.len() > self.n {
            &codeword[..self.n]
        } else {
            codeword
        };

        let mut syndrome = 0usize;
        let mut ones = 0usize;
        let mut data_bits = Vec::with_capacity(self.map.data_bits());

        for (pos, &bit) in word.iter().enumerate() {
            if bit {
                syndrome ^= pos;
                ones += 1;
            }
            if pos != 0 && !pos.is_power_of_two() {
                data_bits.push(bit);
            }
        }

        let bit0 = word.first().copied().unwrap_or(false);
        let double_error = (ones % 2 != bit0 as usize) && syndrome != 0;

        DecodeResult {
            data_bits,
            syndrome,
            double_error,
        }
    }

    /// Apply the correction named by the syndrome, returning the repaired
    /// data bits and the number of corrections applied (0 or 1).
    ///
    /// Only valid for results whose `double_error` flag is clear; the block
    /// assembler routes flagged words around this. A syndrome that points at
    /// a parity position costs one correction but leaves the data untouched.
    /// A syndrome pointing past the end of a truncated chunk's data (possible
    /// only for short final chunks) hands the bits back unmodified while
    /// still counting the correction.
    pub fn correct(&self, result: &DecodeResult) -> (Vec<bool>, usize) {
        debug_assert!(
            !result.double_error,
            "correct() called on a double-error word"
        );

        let mut bits = result.data_bits.clone();
        match self.map.lookup(result.syndrome) {
            SyndromeOutcome::NoError => (bits, 0),
            SyndromeOutcome::ParityError => (bits, 1),
            SyndromeOutcome::DataBit(k) => {
                if let Some(bit) = bits.get_mut(k) {
                    *bit = !*bit;
                }
                (bits, 1)
            }
        }
    }

    /// Encode data bits into a full codeword.
    ///
    /// Data shorter than [`data_bits`](Self::data_bits) is zero-padded at the
    /// tail (the last block of a message usually is); longer data is
    /// truncated. The Hamming parity bits cancel the data syndrome and the
    /// overall-parity bit makes the total number of set bits even, so
    /// `decode(encode(d))` has syndrome 0 and a clear indicator.
    pub fn encode(&self, data: &[bool]) -> Vec<bool> {
        let mut word = vec![false; self.n];
        let mut source = data.iter().copied();
        for pos in 3..self.n {
            if !pos.is_power_of_two() {
                word[pos] = source.next().unwrap_or(false);
            }
        }

        let mut syndrome = 0usize;
        for (pos, &bit) in word.iter().enumerate() {
            if bit {
                syndrome ^= pos;
            }
        }
        let mut p = 1;
        while p < self.n {
            if syndrome & p != 0 {
                word[p] = true;
            }
            p <<= 1;
        }

        let ones = word.iter().filter(|&&b| b).count();
        word[0] = ones % 2 != 0;
        word
    }

    /// Codeword length.
    pub fn n(&self) -> usize {
        self.n
    }

    /// Data bits per full codeword.
    pub fn data_bits(&self) -> usize {
        self.map.data_bits()
    }

    /// The syndrome map this codec corrects with.
    pub fn map(&self) -> &SyndromeMap {
        &self.map
    }
}

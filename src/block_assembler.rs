//! Block Assembler — Codeword Stream to Message
//!
//! Cuts a demodulated bitstream into fixed-size extended Hamming blocks,
//! corrects each block, and stitches the data bits back into one message.
//! Blocks whose double-error indicator fires are quarantined: their data
//! bits pass through uncorrected and the raw block is kept alongside its
//! stream index so the caller can retry or display them. Every tally lives
//! in the returned [`DecodedMessage`]; nothing carries over between calls.
//!
//! ## Example
//!
//! ```rust
//! use thermolink::bit_utils::{bits_from_str, bits_to_string};
//! use thermolink::block_assembler::BlockAssembler;
//!
//! let assembler = BlockAssembler::new(16).unwrap();
//! let mut raw = bits_from_str(
//!     "011001101100001111100111110110111000000101000010",
//! ).unwrap();
//! raw[25] = !raw[25]; // one bit flipped in the second block
//!
//! let message = assembler.assemble(&raw);
//! assert!(message.is_clean());
//! assert_eq!(message.corrected, 1);
//! assert_eq!(
//!     bits_to_string(&message.bits),
//!     "011010000110111101101100011000010",
//! );
//! ```

use crate::extended_hamming::ExtendedHamming;
use crate::syndrome_map::CodeLengthError;

/// One reassembled message with its per-call fault record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedMessage {
    /// Stitched data bits of every block, corrected where possible.
    pub bits: Vec<bool>,
    /// Raw (uncorrected) bits of each flagged block, in stream order.
    pub faulty_blocks: Vec<Vec<bool>>,
    /// Zero-based stream indices of the flagged blocks, ascending.
    pub faulty_indices: Vec<usize>,
    /// Total corrections applied across all blocks.
    pub corrected: usize,
}

impl DecodedMessage {
    /// True when no block raised the double-error indicator.
    pub fn is_clean(&self) -> bool {
        self.faulty_indices.is_empty()
    }
}

/// Splits, corrects and stitches a raw bitstream.
#[derive(Debug, Clone)]
pub struct BlockAssembler {
    codec: ExtendedHamming,
}

impl BlockAssembler {
    /// Create an assembler for blocks of `block_size` bits (power of two,
    /// >= 4).
    pub fn new(block_size: usize) -> Result<Self, CodeLengthError> {
        Ok(Self {
            codec: ExtendedHamming::new(block_size)?,
        })
    }

    /// Decode a raw bitstream into a message.
    ///
    /// The stream is cut into consecutive blocks; the final block may be
    /// short and is decoded over the bits present with the same syndrome map
    /// (its entries below the chunk length are exactly the short code's).
    /// Message length is the sum of every block's data width, so the caller
    /// can always line blocks back up with the output.
    pub fn assemble(&self, raw: &[bool]) -> DecodedMessage {
        let n = self.codec.n();
        let num_blocks = (raw.len() + n - 1) / n;
        let mut bits = Vec::with_capacity(num_blocks * self.codec.data_bits());
        let mut faulty_blocks = Vec::new();
        let mut faulty_indices = Vec::new();
        let mut corrected = 0;

        for (index, chunk) in raw.chunks(n).enumerate() {
            let result = self.codec.decode(chunk);
            if result.double_error {
                bits.extend_from_slice(&result.data_bits);
                faulty_blocks.push(chunk.to_vec());
                faulty_indices.push(index);
            } else {
                let (fixed, applied) = self.codec.correct(&result);
                bits.extend(fixed);
                corrected += applied;
            }
        }

        DecodedMessage {
            bits,
            faulty_blocks,
            faulty_indices,
            corrected,
        }
    }

    /// Block size in bits.
    pub fn block_size(&self) -> usize {
        self.codec.n()
    }

    /// The codec used for each block.
    pub fn codec(&self) -> &ExtendedHamming {
        &self.codec
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bit_utils::{bits_from_str, bits_to_string};

    const HOLA_STREAM: &str = "011001101100001111100111110110111000000101000010";
    const HOLA_MESSAGE: &str = "01101000011011110110110001100001";

    fn bits(s: &str) -> Vec<bool> {
        bits_from_str(s).unwrap()
    }

    #[test]
    fn test_assemble_clean_stream() {
        let assembler = BlockAssembler::new(16).unwrap();
        let message = assembler.assemble(&bits(HOLA_STREAM));

        // 3 blocks x 11 data bits; the original 32 plus one pad bit.
        assert_eq!(message.bits.len(), 33);
        assert_eq!(&bits_to_string(&message.bits)[..32], HOLA_MESSAGE);
        assert!(!message.bits[32]);
        assert_eq!(message.corrected, 0);
        assert!(message.is_clean());
        assert!(message.faulty_blocks.is_empty());
    }

    #[test]
    fn test_assemble_corrects_single_errors() {
        let assembler = BlockAssembler::new(16).unwrap();
        let mut raw = bits(HOLA_STREAM);
        raw[16 + 9] = !raw[16 + 9]; // data bit of block 1
        raw[32 + 2] = !raw[32 + 2]; // parity bit of block 2

        let message = assembler.assemble(&raw);
        assert!(message.is_clean());
        assert_eq!(message.corrected, 2);
        assert_eq!(&bits_to_string(&message.bits)[..32], HOLA_MESSAGE);
    }

    #[test]
    fn test_assemble_quarantines_flagged_block() {
        let assembler = BlockAssembler::new(16).unwrap();
        let mut raw = bits(HOLA_STREAM);
        raw[16 + 3] = !raw[16 + 3];
        raw[16 + 5] = !raw[16 + 5];

        let message = assembler.assemble(&raw);
        assert_eq!(message.faulty_indices, vec![1]);
        assert_eq!(message.faulty_blocks.len(), 1);
        assert_eq!(message.faulty_blocks[0], raw[16..32].to_vec());
        assert_eq!(message.corrected, 0);

        // Quarantined data bits pass through exactly as received.
        assert_eq!(&bits_to_string(&message.bits)[11..22], "10111011011");
        // The neighbours are untouched.
        assert_eq!(&bits_to_string(&message.bits)[..11], "01101000011");
        assert_eq!(&bits_to_string(&message.bits)[22..33], "00011000010");
    }

    #[test]
    fn test_assemble_fault_order() {
        let assembler = BlockAssembler::new(16).unwrap();
        let mut raw = bits(HOLA_STREAM);
        // Block 0 arrives with overall parity 0, so one flip is enough to
        // trip the indicator there; block 2 needs two.
        raw[3] = !raw[3];
        raw[32 + 3] = !raw[32 + 3];
        raw[32 + 5] = !raw[32 + 5];

        let message = assembler.assemble(&raw);
        assert_eq!(message.faulty_indices, vec![0, 2]);
        assert_eq!(message.faulty_blocks[0], raw[..16].to_vec());
        assert_eq!(message.faulty_blocks[1], raw[32..48].to_vec());
        assert_eq!(message.corrected, 0);
    }

    #[test]
    fn test_assemble_short_final_chunk() {
        let assembler = BlockAssembler::new(16).unwrap();
        let mut raw = bits("1000000101000010");
        raw.extend(bits("000101"));

        let message = assembler.assemble(&raw);
        // 11 data bits from the full block, 2 from the 6-bit tail.
        assert_eq!(message.bits.len(), 13);
        assert!(message.is_clean());
        // The tail's syndrome points past its own data; recovery hands the
        // bits back untouched and still books the correction.
        assert_eq!(message.corrected, 1);
        assert_eq!(&bits_to_string(&message.bits)[11..], "11");
    }

    #[test]
    fn test_assemble_empty() {
        let assembler = BlockAssembler::new(16).unwrap();
        let message = assembler.assemble(&[]);
        assert!(message.bits.is_empty());
        assert!(message.is_clean());
        assert_eq!(message.corrected, 0);
    }

    #[test]
    fn test_new_rejects_invalid_block_size() {
        assert!(BlockAssembler::new(0).is_err());
        assert!(BlockAssembler::new(10).is_err());
        assert!(BlockAssembler::new(15).is_err());
        assert_eq!(BlockAssembler::new(32).unwrap().block_size(), 32);
    }
}

//! Parallel Processing Module
//!
//! This module provides parallel implementations of the decode pipeline
//! using Rayon. Enable with the `parallel` feature flag.
//!
//! ## Usage
//!
//! ```toml
//! [dependencies]
//! thermolink = { version = "0.1", features = ["parallel"] }
//! ```
//!
//! ## Performance Considerations
//!
//! Parallelization adds overhead, so it's most beneficial for:
//! - Correcting long captures with many blocks
//! - Batch processing of independent sample logs
//!
//! Trend demodulation of a single log stays sequential: each decision
//! depends on the previous window's mean. Block correction has no such
//! dependence, so one stream's blocks can be corrected concurrently.

use rayon::prelude::*;

use crate::block_assembler::{BlockAssembler, DecodedMessage};
use crate::syndrome_map::CodeLengthError;
use crate::trend_demod::{DemodError, TrendDemod};

/// Parallel block corrector for long streams and batches.
#[derive(Debug, Clone)]
pub struct ParallelAssembler {
    assembler: BlockAssembler,
}

impl ParallelAssembler {
    /// Create a parallel assembler for blocks of `block_size` bits.
    pub fn new(block_size: usize) -> Result<Self, CodeLengthError> {
        Ok(Self {
            assembler: BlockAssembler::new(block_size)?,
        })
    }

    /// Correct one stream's blocks concurrently.
    ///
    /// Output is identical to [`BlockAssembler::assemble`]: blocks keep
    /// their stream order, fault indices stay ascending.
    pub fn assemble(&self, raw: &[bool]) -> DecodedMessage {
        let codec = self.assembler.codec();

        // Per-block work runs in parallel; stitching stays sequential.
        let outcomes: Vec<(Vec<bool>, Option<Vec<bool>>, usize)> = raw
            .par_chunks(codec.n())
            .map(|chunk| {
                let result = codec.decode(chunk);
                if result.double_error {
                    (result.data_bits, Some(chunk.to_vec()), 0)
                } else {
                    let (fixed, applied) = codec.correct(&result);
                    (fixed, None, applied)
                }
            })
            .collect();

        let mut bits = Vec::with_capacity(outcomes.len() * codec.data_bits());
        let mut faulty_blocks = Vec::new();
        let mut faulty_indices = Vec::new();
        let mut corrected = 0;

        for (index, (data, faulty, applied)) in outcomes.into_iter().enumerate() {
            bits.extend(data);
            if let Some(block) = faulty {
                faulty_blocks.push(block);
                faulty_indices.push(index);
            }
            corrected += applied;
        }

        DecodedMessage {
            bits,
            faulty_blocks,
            faulty_indices,
            corrected,
        }
    }

    /// Correct many independent streams in parallel.
    ///
    /// Each stream is processed by a separate thread; results come back in
    /// input order.
    pub fn assemble_batch(&self, streams: &[&[bool]]) -> Vec<DecodedMessage> {
        streams
            .par_iter()
            .map(|raw| self.assembler.assemble(raw))
            .collect()
    }

    /// Block size in bits.
    pub fn block_size(&self) -> usize {
        self.assembler.block_size()
    }
}

/// Parallel batch demodulator for independent sample logs.
#[derive(Debug, Clone)]
pub struct ParallelDemodulator {
    demod: TrendDemod,
}

impl ParallelDemodulator {
    /// Create a batch demodulator.
    pub fn new(group_size: usize, tolerance: f64) -> Result<Self, DemodError> {
        Ok(Self {
            demod: TrendDemod::new(group_size, tolerance)?,
        })
    }

    /// Demodulate multiple sample logs in parallel.
    ///
    /// Each log is processed by a separate thread; results come back in
    /// input order.
    pub fn demodulate_batch(&self, logs: &[&[f64]]) -> Vec<Vec<bool>> {
        logs.par_iter()
            .map(|samples| self.demod.demodulate(samples))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bit_utils::bits_from_str;

    const HOLA_STREAM: &str = "011001101100001111100111110110111000000101000010";

    #[test]
    fn test_parallel_assemble_matches_sequential() {
        let mut raw = bits_from_str(HOLA_STREAM).unwrap();
        raw[16 + 3] = !raw[16 + 3]; // double error in block 1
        raw[16 + 5] = !raw[16 + 5];
        raw[32 + 2] = !raw[32 + 2]; // single error in block 2

        let sequential = BlockAssembler::new(16).unwrap().assemble(&raw);
        let parallel = ParallelAssembler::new(16).unwrap().assemble(&raw);

        assert_eq!(parallel, sequential);
        assert_eq!(parallel.faulty_indices, vec![1]);
        assert_eq!(parallel.corrected, 1);
    }

    #[test]
    fn test_parallel_assemble_long_stream() {
        // 64 copies of one codeword, every fourth block hit by a single flip.
        let block = bits_from_str("1110011111011011").unwrap();
        let mut raw = Vec::new();
        for _ in 0..64 {
            raw.extend(block.iter().copied());
        }
        for i in (0..64).step_by(4) {
            raw[i * 16 + 9] = !raw[i * 16 + 9];
        }

        let sequential = BlockAssembler::new(16).unwrap().assemble(&raw);
        let parallel = ParallelAssembler::new(16).unwrap().assemble(&raw);

        assert_eq!(parallel, sequential);
        assert_eq!(parallel.corrected, 16);
        assert_eq!(parallel.bits.len(), 64 * 11);
        assert!(parallel.is_clean());
    }

    #[test]
    fn test_assemble_batch() {
        let clean = bits_from_str(HOLA_STREAM).unwrap();
        let mut flipped = clean.clone();
        flipped[16 + 9] = !flipped[16 + 9];

        let assembler = ParallelAssembler::new(16).unwrap();
        let results = assembler.assemble_batch(&[&clean, &flipped]);

        assert_eq!(results.len(), 2);
        assert_eq!(results[0].corrected, 0);
        assert_eq!(results[1].corrected, 1);
        // The flip corrects away, so both messages agree.
        assert_eq!(results[0].bits, results[1].bits);
    }

    #[test]
    fn test_demodulate_batch_matches_sequential() {
        let rise: Vec<f64> = [vec![20.0; 5], vec![24.0; 5]].concat();
        let flat = vec![30.0; 10];
        let empty: Vec<f64> = Vec::new();
        let logs: Vec<&[f64]> = vec![&rise, &flat, &empty];

        let demod = TrendDemod::new(5, 0.5).unwrap();
        let batch = ParallelDemodulator::new(5, 0.5).unwrap();
        let results = batch.demodulate_batch(&logs);

        assert_eq!(results.len(), 3);
        for (log, parallel) in logs.iter().zip(&results) {
            assert_eq!(&demod.demodulate(log), parallel);
        }
        assert_eq!(results[0], vec![false, true]);
        assert!(results[2].is_empty());
    }

    #[test]
    fn test_invalid_parameters() {
        assert!(ParallelAssembler::new(12).is_err());
        assert!(ParallelDemodulator::new(0, 0.5).is_err());
    }
}

//! Link Receiver — End-to-End Decode Pipeline
//!
//! Composite receiver block that combines trend demodulation, extended
//! Hamming correction, and text rendering into a single convenient block
//! driven by a [`ThermolinkConfig`].
//!
//! - `LinkReceiver`: temperature log in, recovered message out
//! - `Reception`: everything recovered from one log
//!
//! ## Example
//!
//! ```rust
//! use thermolink::bit_utils;
//! use thermolink::config::ThermolinkConfig;
//! use thermolink::extended_hamming::ExtendedHamming;
//! use thermolink::receiver::LinkReceiver;
//! use thermolink::thermal_channel::{ThermalChannel, ThermalConfig};
//!
//! let config = ThermolinkConfig::parse(
//!     "link:\n  bit_interval_ms: 200\n  sample_period_ms: 10\n  tolerance_c: 0.5\n",
//! )
//! .unwrap();
//!
//! // Encode "hi" into two 16-bit blocks and send it over a quiet sensor.
//! let message = bit_utils::bits_from_str("0110100001101001").unwrap();
//! let code = ExtendedHamming::new(16).unwrap();
//! let mut stream = Vec::new();
//! for chunk in message.chunks(code.data_bits()) {
//!     stream.extend(code.encode(chunk));
//! }
//!
//! let mut channel = ThermalChannel::new(ThermalConfig {
//!     samples_per_bit: 20,
//!     ambient_c: 45.0,
//!     max_c: 70.0,
//!     heat_alpha: 0.25,
//!     cool_alpha: 0.2,
//!     jitter_std_c: 0.0,
//!     seed: 7,
//! });
//! let samples = channel.modulate(&stream);
//!
//! let rx = LinkReceiver::new(&config).unwrap();
//! let reception = rx.receive(&samples);
//! assert!(reception.is_clean());
//! assert_eq!(reception.text.trim_end_matches('\u{0}'), "hi");
//! ```

use tracing::{debug, info, warn};

use crate::bit_utils;
use crate::block_assembler::BlockAssembler;
use crate::config::ThermolinkConfig;
use crate::link_report::LinkReport;
use crate::syndrome_map::CodeLengthError;
use crate::trend_demod::{DemodError, TrendDemod};

/// Error type for receiver construction.
#[derive(Debug, Clone, PartialEq)]
pub enum ReceiverError {
    /// Invalid demodulator settings
    Demod(DemodError),
    /// Invalid code block size
    Code(CodeLengthError),
}

impl std::fmt::Display for ReceiverError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ReceiverError::Demod(e) => write!(f, "{}", e),
            ReceiverError::Code(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for ReceiverError {}

impl From<DemodError> for ReceiverError {
    fn from(e: DemodError) -> Self {
        ReceiverError::Demod(e)
    }
}

impl From<CodeLengthError> for ReceiverError {
    fn from(e: CodeLengthError) -> Self {
        ReceiverError::Code(e)
    }
}

/// Everything recovered from one sample log.
#[derive(Debug, Clone)]
pub struct Reception {
    /// Demodulated channel bits before any correction
    pub raw_bits: Vec<bool>,
    /// Message bits after correction (the raw bits when coding is off)
    pub message: Vec<bool>,
    /// Message bytes rendered as text
    pub text: String,
    /// Indices of blocks flagged as uncorrectable
    pub faulty_indices: Vec<usize>,
    /// Raw content of the flagged blocks
    pub faulty_blocks: Vec<Vec<bool>>,
    /// Single-bit corrections applied
    pub corrected: usize,
}

impl Reception {
    /// True when no block was flagged.
    pub fn is_clean(&self) -> bool {
        self.faulty_indices.is_empty()
    }
}

/// Composite receiver for the thermal covert link.
///
/// Processes a temperature log through:
/// 1. Trend demodulation (grouped means + hysteresis)
/// 2. Extended Hamming correction (optional, per config)
/// 3. Byte packing and text rendering
///
/// The first demodulated bit is always 0, so senders lead with a reference
/// 0 bit to give the first data window something to compare against.
#[derive(Debug, Clone)]
pub struct LinkReceiver {
    /// Trend demodulator sized from the link timing
    demod: TrendDemod,
    /// Block corrector, present when coding is enabled
    assembler: Option<BlockAssembler>,
    /// Sender bit window in seconds
    bit_period_s: f64,
}

impl LinkReceiver {
    /// Build a receiver from a configuration.
    ///
    /// Fails when the derived samples-per-bit is zero, the tolerance is
    /// negative, or the block size is not a valid code length.
    pub fn new(config: &ThermolinkConfig) -> Result<Self, ReceiverError> {
        let demod = TrendDemod::new(config.link.samples_per_bit(), config.link.tolerance())?;
        let assembler = if config.code.enabled {
            Some(BlockAssembler::new(config.code.block_size)?)
        } else {
            None
        };

        Ok(Self {
            demod,
            assembler,
            bit_period_s: config.link.bit_period_s(),
        })
    }

    /// Decode a temperature log into a reception.
    pub fn receive(&self, samples: &[f64]) -> Reception {
        let raw_bits = self.demod.demodulate(samples);
        debug!(
            samples = samples.len(),
            raw_bits = raw_bits.len(),
            "Demodulated sample log"
        );

        let (message, faulty_indices, faulty_blocks, corrected) = match &self.assembler {
            Some(assembler) => {
                let decoded = assembler.assemble(&raw_bits);
                (
                    decoded.bits,
                    decoded.faulty_indices,
                    decoded.faulty_blocks,
                    decoded.corrected,
                )
            }
            None => (raw_bits.clone(), Vec::new(), Vec::new(), 0),
        };

        if !faulty_indices.is_empty() {
            warn!(blocks = ?faulty_indices, "Uncorrectable blocks in reception");
        }

        let text = bit_utils::bits_to_text(&message);
        info!(
            message_bits = message.len(),
            corrected,
            faulty = faulty_indices.len(),
            "Reception complete"
        );

        Reception {
            raw_bits,
            message,
            text,
            faulty_indices,
            faulty_blocks,
            corrected,
        }
    }

    /// Decode a log and measure link quality against the transmit reference.
    ///
    /// `tx_raw` is the channel bitstream as sent, `tx_message` the message
    /// bits before encoding.
    pub fn analyze(
        &self,
        samples: &[f64],
        tx_raw: &[bool],
        tx_message: &[bool],
    ) -> (Reception, LinkReport) {
        let reception = self.receive(samples);
        let report = LinkReport::measure(
            tx_raw,
            &reception.raw_bits,
            tx_message,
            &reception.message,
            reception.corrected,
            self.bit_period_s,
        );
        (reception, report)
    }

    /// Samples per bit window.
    pub fn samples_per_bit(&self) -> usize {
        self.demod.group_size()
    }

    /// Whether extended Hamming correction is applied.
    pub fn coding_enabled(&self) -> bool {
        self.assembler.is_some()
    }

    /// Sender bit window in seconds.
    pub fn bit_period_s(&self) -> f64 {
        self.bit_period_s
    }
}

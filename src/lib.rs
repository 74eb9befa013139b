//! # Thermolink — Thermal Covert Channel Receiver
//!
//! This crate recovers digital messages from a covert thermal side channel.
//! A sender with no network access toggles CPU load to steer the package
//! temperature, a logger samples the die sensor at a fixed period, and this
//! library turns the resulting sample log back into text.
//!
//! ## Overview
//!
//! The decode path is deliberately simple and works on any slow sensor that
//! tracks an on/off actuator:
//!
//! - **Trend Demodulation**: per-bit sample windows reduced to means, each
//!   compared against the previous one with a hysteresis band
//! - **Extended Hamming SECDED**: single-error correction and double-error
//!   detection per codeword, with a syndrome map for any power-of-two length
//! - **Block Assembly**: stream chunking, per-block correction, fault
//!   quarantine, message stitching
//! - **Channel Simulation**: a seedable thermal model for testing receivers
//!   without hardware
//! - **Link Reports**: error rates, accuracy, and throughput for a transfer
//!
//! ## Signal Flow
//!
//! ```text
//! TX: Text → Bits → Extended Hamming → CPU Load Toggling → Die Temperature
//! RX: Sample Log → Trend Demod → Block Assembly → Data Bits → Text
//! ```
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
//! // Sender side: encode "ok" into 16-bit codewords.
//! let message = bit_utils::bits_from_str("0110111101101011").unwrap();
//! let code = ExtendedHamming::new(16).unwrap();
//! let mut stream = Vec::new();
//! for chunk in message.chunks(code.data_bits()) {
//!     stream.extend(code.encode(chunk));
//! }
//!
//! // Channel: simulated die temperature, 20 samples per bit.
//! let mut channel = ThermalChannel::new(ThermalConfig {
//!     samples_per_bit: 20,
//!     ambient_c: 45.0,
//!     max_c: 70.0,
//!     heat_alpha: 0.25,
//!     cool_alpha: 0.2,
//!     jitter_std_c: 0.0,
//!     seed: 3,
//! });
//! let samples = channel.modulate(&stream);
//!
//! // Receiver side: sample log in, text out.
//! let config = ThermolinkConfig::parse(
//!     "link:\n  bit_interval_ms: 200\n  sample_period_ms: 10\n  tolerance_c: 0.5\n",
//! )
//! .unwrap();
//! let rx = LinkReceiver::new(&config).unwrap();
//! let reception = rx.receive(&samples);
//!
//! assert!(reception.is_clean());
//! assert_eq!(reception.text.trim_end_matches('\u{0}'), "ok");
//! ```

pub mod bit_utils;
pub mod block_assembler;
pub mod config;
pub mod extended_hamming;
pub mod link_report;
pub mod observe;
pub mod receiver;
pub mod sample_log;
pub mod syndrome_map;
pub mod thermal_channel;
pub mod trend_demod;

// Parallel processing (requires `parallel` feature)
#[cfg(feature = "parallel")]
pub mod parallel;

// Re-export main types
pub use bit_utils::ParseBitsError;
pub use block_assembler::{BlockAssembler, DecodedMessage};
pub use config::{CodeConfig, ConfigError, LinkConfig, LoggingConfig, ThermolinkConfig};
pub use extended_hamming::{DecodeResult, ExtendedHamming};
pub use link_report::LinkReport;
pub use receiver::{LinkReceiver, Reception, ReceiverError};
pub use syndrome_map::{CodeLengthError, SyndromeMap, SyndromeOutcome};
pub use thermal_channel::{ThermalChannel, ThermalConfig};
pub use trend_demod::{DemodError, TrendDemod};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::bit_utils::{bits_from_str, bits_to_string, bits_to_text};
    pub use crate::block_assembler::{BlockAssembler, DecodedMessage};
    pub use crate::config::ThermolinkConfig;
    pub use crate::extended_hamming::ExtendedHamming;
    pub use crate::receiver::{LinkReceiver, Reception};
    pub use crate::thermal_channel::{ThermalChannel, ThermalConfig};
    pub use crate::trend_demod::TrendDemod;
}

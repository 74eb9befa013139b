//! Link Report — Transfer Quality Metrics
//!
//! One-shot measurement of a completed covert transfer against the known
//! transmit reference: raw channel error rate before correction, residual
//! message errors after it, the correction tally, and the timing figures
//! (bit rate, transfer time, goodput) derived from the bit period. All
//! numbers live in the returned struct; nothing accumulates across calls.
//!
//! ## Example
//!
//! ```rust
//! use thermolink::link_report::LinkReport;
//!
//! let tx = vec![true, false, true, true];
//! let mut rx = tx.clone();
//! rx[2] = false;
//!
//! let report = LinkReport::measure(&tx, &rx, &tx, &rx, 0, 1.0);
//! assert_eq!(report.raw_errors, 1);
//! assert!((report.raw_error_rate - 0.25).abs() < 1e-12);
//! assert!((report.accuracy_pct - 75.0).abs() < 1e-12);
//! ```

use crate::bit_utils::diff_positions;

/// Measured quality of one transfer.
#[derive(Debug, Clone, Copy)]
pub struct LinkReport {
    /// Demodulated channel bits.
    pub raw_bits: usize,
    /// Channel bits that differ from the transmit reference.
    pub raw_errors: usize,
    /// `raw_errors / raw_bits`.
    pub raw_error_rate: f64,
    /// Message bits compared (the shorter of reference and received).
    pub decoded_bits: usize,
    /// Message bits still wrong after correction.
    pub residual_errors: usize,
    /// Percentage of compared message bits that arrived intact.
    pub accuracy_pct: f64,
    /// Corrections applied by the block assembler.
    pub corrected: usize,
    /// `corrected / raw_bits`.
    pub correction_rate: f64,
    /// `raw_bits * bit_period_s`, in seconds.
    pub transfer_time_s: f64,
    /// Channel bits per second.
    pub bit_rate_bps: f64,
    /// Correct message bits per second.
    pub throughput_bps: f64,
}

fn ratio(num: usize, den: usize) -> f64 {
    if den == 0 {
        0.0
    } else {
        num as f64 / den as f64
    }
}

impl LinkReport {
    /// Measure a transfer.
    ///
    /// `tx_raw`/`rx_raw` are the channel bitstreams before correction,
    /// `tx_msg`/`rx_msg` the message bitstreams after it; each pair is
    /// compared over its shorter length, so a padded or truncated tail on
    /// either side is ignored. `bit_period_s` is the sender's bit window in
    /// seconds. Zero-length inputs yield 0.0 rates, never NaN.
    pub fn measure(
        tx_raw: &[bool],
        rx_raw: &[bool],
        tx_msg: &[bool],
        rx_msg: &[bool],
        corrected: usize,
        bit_period_s: f64,
    ) -> Self {
        let raw_bits = rx_raw.len();
        let raw_errors = diff_positions(tx_raw, rx_raw).len();
        let decoded_bits = tx_msg.len().min(rx_msg.len());
        let residual_errors = diff_positions(tx_msg, rx_msg).len();
        let good_bits = decoded_bits - residual_errors;

        let transfer_time_s = raw_bits as f64 * bit_period_s;
        let (bit_rate_bps, throughput_bps) = if transfer_time_s > 0.0 {
            (
                raw_bits as f64 / transfer_time_s,
                good_bits as f64 / transfer_time_s,
            )
        } else {
            (0.0, 0.0)
        };

        Self {
            raw_bits,
            raw_errors,
            raw_error_rate: ratio(raw_errors, raw_bits),
            decoded_bits,
            residual_errors,
            accuracy_pct: ratio(good_bits, decoded_bits) * 100.0,
            corrected,
            correction_rate: ratio(corrected, raw_bits),
            transfer_time_s,
            bit_rate_bps,
            throughput_bps,
        }
    }

    /// Get a summary string.
    pub fn summary(&self) -> String {
        format!(
            "Raw: {} bits, {} errors (rate {:.6})\n\
             Message: {} bits, {} residual errors, accuracy {:.2}%\n\
             Corrections: {} (rate {:.6})\n\
             Link: {:.3} bit/s over {:.1} s, goodput {:.3} bit/s",
            self.raw_bits,
            self.raw_errors,
            self.raw_error_rate,
            self.decoded_bits,
            self.residual_errors,
            self.accuracy_pct,
            self.corrected,
            self.correction_rate,
            self.bit_rate_bps,
            self.transfer_time_s,
            self.throughput_bps,
        )
    }

    /// CSV column names, matching [`to_csv_row`](Self::to_csv_row).
    pub fn csv_header() -> &'static str {
        "raw_bits,raw_errors,raw_error_rate,decoded_bits,residual_errors,\
         accuracy_pct,corrected,correction_rate,transfer_time_s,bit_rate_bps,\
         throughput_bps"
    }

    /// Export as one CSV row.
    pub fn to_csv_row(&self) -> String {
        format!(
            "{},{},{:.6},{},{},{:.2},{},{:.6},{:.3},{:.3},{:.3}",
            self.raw_bits,
            self.raw_errors,
            self.raw_error_rate,
            self.decoded_bits,
            self.residual_errors,
            self.accuracy_pct,
            self.corrected,
            self.correction_rate,
            self.transfer_time_s,
            self.bit_rate_bps,
            self.throughput_bps,
        )
    }
}

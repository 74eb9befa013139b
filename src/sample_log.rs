//! Sample Log I/O — Temperature Trace Files
//!
//! The on-device logger prints one decimal reading per line at the sampling
//! period, straight from the thermal zone sysfs node. These helpers parse
//! such files back into sample vectors and write compatible ones. Logs
//! captured through a shell session routinely pick up non-numeric lines
//! (prompts, headers, blanks); those are skipped rather than treated as
//! errors.
//!
//! ## Example
//!
//! ```rust
//! use thermolink::sample_log::{read_samples, write_samples};
//!
//! let tmp = std::env::temp_dir().join("thermolink_test_sample_log.txt");
//! write_samples(&tmp, &[48.216, 48.771, 49.322]).unwrap();
//! let samples = read_samples(&tmp).unwrap();
//! assert_eq!(samples.len(), 3);
//! assert!((samples[1] - 48.771).abs() < 1e-9);
//! std::fs::remove_file(&tmp).ok();
//! ```

use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::Path;

use tracing::debug;

/// Parse one-reading-per-line text into samples.
///
/// Lines are trimmed; blank lines are dropped and lines that do not parse as
/// a float are skipped (a debug log reports how many).
pub fn parse_samples(text: &str) -> Vec<f64> {
    let mut samples = Vec::new();
    let mut skipped = 0usize;

    for line in text.lines() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        match line.parse::<f64>() {
            Ok(value) => samples.push(value),
            Err(_) => skipped += 1,
        }
    }

    if skipped > 0 {
        debug!(skipped, kept = samples.len(), "skipped non-numeric log lines");
    }
    samples
}

/// Read a temperature log file.
pub fn read_samples(path: &Path) -> io::Result<Vec<f64>> {
    let text = fs::read_to_string(path)?;
    Ok(parse_samples(&text))
}

/// Write samples in the logger's format: six decimals, one per line.
pub fn write_samples(path: &Path, samples: &[f64]) -> io::Result<()> {
    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);
    for sample in samples {
        writeln!(writer, "{sample:.6}")?;
    }
    writer.flush()
}

//! Trend Demodulator — Grouped-Mean Hysteresis Slicer
//!
//! Recovers bits from a slow analog ramp signal (a package temperature
//! trace) by averaging fixed windows of samples and comparing each window
//! mean against the previous one. A rise beyond the tolerance band reads as
//! 1, a fall beyond it as 0, and anything inside the band repeats the
//! previous bit, which is what keeps long runs readable once the sensor
//! saturates against its floor or ceiling. The first window always reads as
//! 0 because there is nothing to compare it against; senders lead with a
//! reference 0 bit.
//!
//! ## Example
//!
//! ```rust
//! use thermolink::trend_demod::TrendDemod;
//!
//! let demod = TrendDemod::new(5, 0.1).unwrap();
//! let samples = [
//!     20.0, 20.0, 20.0, 20.0, 20.0, // reference window
//!     21.0, 21.0, 21.0, 21.0, 21.0, // rising
//!     21.0, 21.0, 21.0, 21.0, 21.0, // flat, repeats the 1
//!     19.5, 19.5, 19.5, 19.5, 19.5, // falling
//! ];
//! assert_eq!(demod.demodulate(&samples), vec![false, true, true, false]);
//! ```

/// Demodulator construction error.
#[derive(Debug, Clone, PartialEq)]
pub enum DemodError {
    /// A zero group size cannot form a window.
    ZeroGroupSize,
    /// The hysteresis tolerance must be finite and non-negative.
    NegativeTolerance { got: f64 },
}

impl std::fmt::Display for DemodError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DemodError::ZeroGroupSize => write!(f, "Group size must be at least 1"),
            DemodError::NegativeTolerance { got } => {
                write!(f, "Invalid tolerance: {got}, must be >= 0")
            }
        }
    }
}

impl std::error::Error for DemodError {}

/// Grouped-mean trend demodulator with hysteresis.
#[derive(Debug, Clone)]
pub struct TrendDemod {
    /// Samples averaged per bit window.
    group_size: usize,
    /// Band around the previous mean inside which the previous bit repeats.
    tolerance: f64,
}

impl TrendDemod {
    /// Create a demodulator. `group_size` is the number of samples per bit
    /// window; `tolerance` is the hysteresis band in sensor units.
    pub fn new(group_size: usize, tolerance: f64) -> Result<Self, DemodError> {
        if group_size == 0 {
            return Err(DemodError::ZeroGroupSize);
        }
        if tolerance < 0.0 || tolerance.is_nan() {
            return Err(DemodError::NegativeTolerance { got: tolerance });
        }
        Ok(Self {
            group_size,
            tolerance,
        })
    }

    /// Demodulate a sample stream into bits, one per window.
    ///
    /// The final window may hold fewer than `group_size` samples and is
    /// averaged over its actual length. The previous-mean reference updates
    /// after every window, including windows decided by the repeat branch,
    /// so a drift that stays inside the band never accumulates into a flip.
    /// Output length is `ceil(samples.len() / group_size)`.
    pub fn demodulate(&self, samples: &[f64]) -> Vec<bool> {
        let num_groups = (samples.len() + self.group_size - 1) / self.group_size;
        let mut bits = Vec::with_capacity(num_groups);
        let mut prev_mean = 0.0;
        let mut prev_bit = false;

        for group in samples.chunks(self.group_size) {
            let mean = group.iter().sum::<f64>() / group.len() as f64;
            let bit = if bits.is_empty() {
                false
            } else if (mean - prev_mean).abs() <= self.tolerance {
                prev_bit
            } else {
                mean > prev_mean
            };
            bits.push(bit);
            prev_bit = bit;
            prev_mean = mean;
        }

        bits
    }

    /// Samples per bit window.
    pub fn group_size(&self) -> usize {
        self.group_size
    }

    /// Hysteresis band in sensor units.
    pub fn tolerance(&self) -> f64 {
        self.tolerance
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rise_reads_one() {
        let demod = TrendDemod::new(5, 0.1).unwrap();
        let mut samples = vec![20.0; 5];
        samples.extend(vec![21.0; 5]);
        assert_eq!(demod.demodulate(&samples), vec![false, true]);
    }

    #[test]
    fn test_first_window_always_zero() {
        let demod = TrendDemod::new(3, 0.1).unwrap();
        assert_eq!(demod.demodulate(&[55.0, 55.1, 54.9]), vec![false]);
    }

    #[test]
    fn test_repeat_inside_band_both_sides() {
        let demod = TrendDemod::new(2, 0.1).unwrap();
        let samples = [
            20.0, 20.0, // reference
            21.0, 21.0, // +1.0, reads 1
            21.05, 21.05, // +0.05, repeats 1
            20.96, 20.96, // -0.09, repeats 1
            20.0, 20.0, // -0.96, reads 0
        ];
        assert_eq!(
            demod.demodulate(&samples),
            vec![false, true, true, true, false]
        );
    }

    #[test]
    fn test_boundary_equality_repeats() {
        let demod = TrendDemod::new(1, 0.5).unwrap();
        // Exactly on the band edge: repeat. Just past it: decide.
        assert_eq!(demod.demodulate(&[10.0, 10.5]), vec![false, false]);
        assert_eq!(demod.demodulate(&[10.0, 10.75]), vec![false, true]);
    }

    #[test]
    fn test_reference_updates_every_window() {
        // Each step stays inside the band, so the drift never flips the bit
        // even though the total excursion exceeds the tolerance.
        let demod = TrendDemod::new(1, 0.5).unwrap();
        assert_eq!(
            demod.demodulate(&[10.0, 10.4, 10.8, 11.2]),
            vec![false, false, false, false]
        );
    }

    #[test]
    fn test_short_tail_window() {
        let demod = TrendDemod::new(2, 0.1).unwrap();
        let samples = [20.0, 20.0, 30.0, 30.0, 30.0];
        assert_eq!(demod.demodulate(&samples), vec![false, true, true]);
    }

    #[test]
    fn test_group_larger_than_input() {
        let demod = TrendDemod::new(10, 0.1).unwrap();
        assert_eq!(demod.demodulate(&[40.0, 41.0, 42.0]), vec![false]);
    }

    #[test]
    fn test_empty_input() {
        let demod = TrendDemod::new(4, 0.1).unwrap();
        assert!(demod.demodulate(&[]).is_empty());
    }

    #[test]
    fn test_zero_group_size_rejected() {
        assert_eq!(TrendDemod::new(0, 0.1).unwrap_err(), DemodError::ZeroGroupSize);
    }

    #[test]
    fn test_bad_tolerance_rejected() {
        assert!(matches!(
            TrendDemod::new(4, -0.5).unwrap_err(),
            DemodError::NegativeTolerance { .. }
        ));
        assert!(TrendDemod::new(4, f64::NAN).is_err());
        assert!(TrendDemod::new(4, 0.0).is_ok());
    }

    #[test]
    fn test_accessors() {
        let demod = TrendDemod::new(300, 0.3).unwrap();
        assert_eq!(demod.group_size(), 300);
        assert!((demod.tolerance() - 0.3).abs() < 1e-12);
    }
}

//! Thermal covert channel model.
//!
//! Software stand-in for the physical medium: a sender leaks bits by loading
//! the CPU so the package temperature climbs toward its thermal ceiling
//! (bit 1) or idles so it sinks back toward ambient (bit 0), while a sensor
//! samples the temperature at a fixed period. The model is a first-order
//! approach toward the active target with Gaussian sensor jitter on every
//! reading, so early samples of a window move fast and late samples plateau,
//! which is exactly the shape the grouped-mean demodulator expects.
//!
//! # Features
//!
//! * **Asymmetric time constants**: packages heat under load faster than
//!   they cool through a passive heatsink; both rates are configurable.
//! * **Saturation**: long runs of the same bit flatten out against the
//!   ceiling or the floor, leaving the hysteresis repeat branch of
//!   [`TrendDemod`](crate::trend_demod::TrendDemod) to carry the run.
//! * **Seeded jitter**: deterministic Gaussian sensor noise; zero standard
//!   deviation gives an exactly reproducible trace.
//!
//! Transmissions should lead with a reference 0 bit: the demodulator has no
//! previous window for the first bit and always reads it as 0.
//!
//! # Example
//!
//! ```
//! use thermolink::thermal_channel::{ThermalChannel, ThermalConfig};
//! use thermolink::trend_demod::TrendDemod;
//!
//! let config = ThermalConfig {
//!     samples_per_bit: 20,
//!     heat_alpha: 0.25,
//!     cool_alpha: 0.2,
//!     jitter_std_c: 0.0,
//!     ..ThermalConfig::default()
//! };
//! let mut channel = ThermalChannel::new(config);
//!
//! let bits = vec![false, true, true, false, true, false, false];
//! let trace = channel.modulate(&bits);
//! assert_eq!(trace.len(), bits.len() * 20);
//!
//! let demod = TrendDemod::new(20, 0.5).unwrap();
//! assert_eq!(demod.demodulate(&trace), bits);
//! ```

use std::f64::consts::PI;

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

/// Parameters of the thermal channel model.
#[derive(Debug, Clone)]
pub struct ThermalConfig {
    /// Sensor samples emitted per bit window.
    pub samples_per_bit: usize,
    /// Idle package temperature; cooling target and start temperature (°C).
    pub ambient_c: f64,
    /// Thermal ceiling under sustained load; heating target (°C).
    pub max_c: f64,
    /// Per-sample fraction of the remaining distance to `max_c` covered
    /// while loaded (0..1].
    pub heat_alpha: f64,
    /// Per-sample fraction of the remaining distance to `ambient_c` covered
    /// while idle (0..1].
    pub cool_alpha: f64,
    /// Standard deviation of the Gaussian sensor jitter (°C).
    pub jitter_std_c: f64,
    /// PRNG seed for the jitter stream.
    pub seed: u64,
}

impl Default for ThermalConfig {
    fn default() -> Self {
        // A passively cooled Raspberry Pi 4 sampled every 10 ms with 3 s bit
        // windows: idles near 48 °C, throttles around 72 °C, heats in a few
        // hundred milliseconds and cools noticeably slower.
        Self {
            samples_per_bit: 300,
            ambient_c: 48.0,
            max_c: 72.0,
            heat_alpha: 0.03,
            cool_alpha: 0.02,
            jitter_std_c: 0.05,
            seed: 0xC0FF_EE11,
        }
    }
}

// ---------------------------------------------------------------------------
// Simple deterministic PRNG (xorshift64)
// ---------------------------------------------------------------------------

/// Minimal xorshift64 PRNG for the deterministic jitter stream.
#[derive(Debug, Clone)]
struct Xorshift64 {
    state: u64,
}

impl Xorshift64 {
    fn new(seed: u64) -> Self {
        Self {
            state: if seed == 0 { 1 } else { seed },
        }
    }

    fn next_u64(&mut self) -> u64 {
        let mut x = self.state;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.state = x;
        x
    }

    /// Return a value in [0, 1).
    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / ((1u64 << 53) as f64)
    }

    /// Approximate Gaussian via Box-Muller.
    fn next_gaussian(&mut self, mean: f64, std_dev: f64) -> f64 {
        let u1 = self.next_f64().max(1e-15);
        let u2 = self.next_f64();
        let z = (-2.0 * u1.ln()).sqrt() * (2.0 * PI * u2).cos();
        mean + z * std_dev
    }
}

// ---------------------------------------------------------------------------
// Channel
// ---------------------------------------------------------------------------

/// Thermal channel simulator.
///
/// Temperature state persists across [`modulate`](Self::modulate) calls, so
/// back-to-back messages continue from wherever the package last was, the
/// same way the real sensor would. [`reset`](Self::reset) returns to ambient
/// and reseeds the jitter stream.
#[derive(Debug, Clone)]
pub struct ThermalChannel {
    config: ThermalConfig,
    temp_c: f64,
    rng: Xorshift64,
}

impl ThermalChannel {
    /// Create a channel resting at ambient temperature.
    pub fn new(config: ThermalConfig) -> Self {
        let temp_c = config.ambient_c;
        let rng = Xorshift64::new(config.seed);
        Self {
            config,
            temp_c,
            rng,
        }
    }

    /// Transmit bits through the model, returning one sensor sample per
    /// sampling period (`samples_per_bit` per bit).
    pub fn modulate(&mut self, bits: &[bool]) -> Vec<f64> {
        let mut trace = Vec::with_capacity(bits.len() * self.config.samples_per_bit);
        for &bit in bits {
            let (target, alpha) = if bit {
                (self.config.max_c, self.config.heat_alpha)
            } else {
                (self.config.ambient_c, self.config.cool_alpha)
            };
            for _ in 0..self.config.samples_per_bit {
                self.temp_c += (target - self.temp_c) * alpha;
                let jitter = self.rng.next_gaussian(0.0, self.config.jitter_std_c);
                trace.push(self.temp_c + jitter);
            }
        }
        trace
    }

    /// Return to ambient temperature and reseed the jitter stream.
    pub fn reset(&mut self) {
        self.temp_c = self.config.ambient_c;
        self.rng = Xorshift64::new(self.config.seed);
    }

    /// Change the jitter seed; also reseeds the stream.
    pub fn set_seed(&mut self, seed: u64) {
        self.config.seed = seed;
        self.rng = Xorshift64::new(seed);
    }

    /// Current package temperature (no jitter applied).
    pub fn temperature_c(&self) -> f64 {
        self.temp_c
    }

    /// Return a reference to the current configuration.
    pub fn config(&self) -> &ThermalConfig {
        &self.config
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::trend_demod::TrendDemod;

    fn quiet_config() -> ThermalConfig {
        ThermalConfig {
            samples_per_bit: 20,
            ambient_c: 45.0,
            max_c: 70.0,
            heat_alpha: 0.25,
            cool_alpha: 0.2,
            jitter_std_c: 0.0,
            seed: 1,
        }
    }

    // 1. Trace length is bits * samples_per_bit.
    #[test]
    fn test_trace_length() {
        let mut channel = ThermalChannel::new(quiet_config());
        let trace = channel.modulate(&[false, true, false]);
        assert_eq!(trace.len(), 60);
    }

    // 2. Zero-jitter trace stays between the floor and the ceiling.
    #[test]
    fn test_trace_bounded() {
        let mut channel = ThermalChannel::new(quiet_config());
        let bits: Vec<bool> = (0..40).map(|i| i % 5 < 3).collect();
        let trace = channel.modulate(&bits);
        for (i, &t) in trace.iter().enumerate() {
            assert!((45.0..=70.0).contains(&t), "sample {i} = {t}");
        }
    }

    // 3. Heating moves toward the ceiling, cooling back toward the floor.
    #[test]
    fn test_trend_direction() {
        let mut channel = ThermalChannel::new(quiet_config());
        let rise = channel.modulate(&[true]);
        assert!(rise.last().unwrap() > &65.0);
        let fall = channel.modulate(&[false]);
        assert!(fall.last().unwrap() < &50.0);
    }

    // 4. Zero-jitter round-trip through the trend demodulator.
    #[test]
    fn test_roundtrip_exact() {
        let mut channel = ThermalChannel::new(quiet_config());
        let bits = vec![false, true, true, false, false, true, false, true, true, true];
        let trace = channel.modulate(&bits);
        let demod = TrendDemod::new(20, 0.5).unwrap();
        assert_eq!(demod.demodulate(&trace), bits);
    }

    // 5. Round-trip survives realistic sensor jitter.
    #[test]
    fn test_roundtrip_with_jitter() {
        let mut config = quiet_config();
        config.jitter_std_c = 0.05;
        let mut channel = ThermalChannel::new(config);
        let bits = vec![false, true, false, false, true, true, false, true, false];
        let trace = channel.modulate(&bits);
        let demod = TrendDemod::new(20, 0.5).unwrap();
        assert_eq!(demod.demodulate(&trace), bits);
    }

    // 6. Long runs saturate and still decode via the repeat branch.
    #[test]
    fn test_saturated_runs_decode() {
        let mut channel = ThermalChannel::new(quiet_config());
        let bits = vec![
            false, true, true, true, true, true, true, false, false, false, false, true,
        ];
        let trace = channel.modulate(&bits);
        let demod = TrendDemod::new(20, 0.5).unwrap();
        assert_eq!(demod.demodulate(&trace), bits);
    }

    // 7. Same seed, same trace; different seed, different trace.
    #[test]
    fn test_seed_determinism() {
        let mut config = quiet_config();
        config.jitter_std_c = 0.1;
        let bits = vec![false, true, false, true];

        let mut a = ThermalChannel::new(config.clone());
        let mut b = ThermalChannel::new(config.clone());
        assert_eq!(a.modulate(&bits), b.modulate(&bits));

        let mut c = ThermalChannel::new(config);
        c.set_seed(99);
        a.reset();
        let trace_a = a.modulate(&bits);
        let trace_c = c.modulate(&bits);
        let differ = trace_a
            .iter()
            .zip(trace_c.iter())
            .any(|(x, y)| (x - y).abs() > 1e-9);
        assert!(differ, "different seeds should produce different jitter");
    }

    // 8. State carries across calls; reset returns to ambient.
    #[test]
    fn test_reset() {
        let mut channel = ThermalChannel::new(quiet_config());
        channel.modulate(&[true, true, true]);
        assert!(channel.temperature_c() > 65.0);
        channel.reset();
        assert!((channel.temperature_c() - 45.0).abs() < 1e-12);
    }

    // 9. Empty input produces an empty trace.
    #[test]
    fn test_empty() {
        let mut channel = ThermalChannel::new(quiet_config());
        assert!(channel.modulate(&[]).is_empty());
    }
}

//! Deterministic random number generation.
//!
//! RULE: Nothing in the simulation may call any platform RNG.
//! All randomness flows through the single [`SimRng`] source handed
//! to the engine at construction, so a run is fully reproducible
//! from its seed.

use rand::{RngCore, SeedableRng};
use rand_pcg::Pcg64Mcg;

/// The single source of randomness for a simulation run.
pub trait SimRng {
    /// Roll a float in [0.0, 1.0).
    fn next_f64(&mut self) -> f64;

    /// Bernoulli trial: returns true with probability p.
    fn chance(&mut self, p: f64) -> bool {
        self.next_f64() < p
    }
}

/// Production source: PCG stream seeded from a single u64.
pub struct PcgRng {
    inner: Pcg64Mcg,
}

impl PcgRng {
    pub fn seeded(seed: u64) -> Self {
        Self {
            inner: Pcg64Mcg::seed_from_u64(seed),
        }
    }
}

impl SimRng for PcgRng {
    fn next_f64(&mut self) -> f64 {
        let bits = self.inner.next_u64();
        (bits >> 11) as f64 * (1.0 / (1u64 << 53) as f64)
    }
}

/// Source that repeats one value forever. Test-only.
#[cfg(test)]
pub(crate) struct FixedRng(pub f64);

#[cfg(test)]
impl SimRng for FixedRng {
    fn next_f64(&mut self) -> f64 {
        self.0
    }
}

/// Source that plays back a script, then repeats its last value. Test-only.
#[cfg(test)]
pub(crate) struct SequenceRng {
    values: Vec<f64>,
    next: usize,
}

#[cfg(test)]
impl SequenceRng {
    pub(crate) fn new(values: Vec<f64>) -> Self {
        assert!(!values.is_empty(), "SequenceRng needs at least one value");
        Self { values, next: 0 }
    }
}

#[cfg(test)]
impl SimRng for SequenceRng {
    fn next_f64(&mut self) -> f64 {
        let value = self.values[self.next.min(self.values.len() - 1)];
        self.next += 1;
        value
    }
}

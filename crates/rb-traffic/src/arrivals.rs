//! Inter-arrival-time distributions, keyed by (ingress, hop-count).
//!
//! The default table carries the measured rates of the reference
//! intersection: most direction pairs arrive as a Poisson stream (so the
//! gaps between cars are exponential with the measured mean), a few sparse
//! directions were only ever observed as a uniform band.

use rb_core::{Exit, SourceRng};

/// One inter-arrival-time distribution, in seconds between spawns.
#[derive(Clone, Debug, PartialEq)]
pub enum ArrivalDistribution {
    /// Poisson arrival stream: exponential gaps with the given mean.
    Exponential { mean: f64 },
    /// Gaps uniform in `[low, high)`.
    Uniform { low: f64, high: f64 },
}

impl ArrivalDistribution {
    /// Expected gap, used for the half-mean warm-up wait that decorrelates
    /// the sources at simulation start.
    pub fn mean(&self) -> f64 {
        match *self {
            ArrivalDistribution::Exponential { mean } => mean,
            ArrivalDistribution::Uniform { low, high } => (low + high) / 2.0,
        }
    }

    /// Draw the next inter-arrival gap.
    pub fn sample(&self, rng: &mut SourceRng) -> f64 {
        match *self {
            ArrivalDistribution::Exponential { mean } => rng.exponential(mean),
            ArrivalDistribution::Uniform { low, high } => rng.uniform_in(low, high),
        }
    }
}

/// Per-(ingress, hop-count) arrival distributions for all 12 direction
/// pairs.  Row = ingress exit, column = hop-count − 1.
#[derive(Clone, Debug, PartialEq)]
pub struct ArrivalTable {
    entries: [[ArrivalDistribution; 3]; 4],
}

impl ArrivalTable {
    /// The same exponential mean for every direction pair — handy for tests
    /// and symmetric-load experiments.
    pub fn exponential_everywhere(mean: f64) -> ArrivalTable {
        ArrivalTable {
            entries: std::array::from_fn(|_| {
                std::array::from_fn(|_| ArrivalDistribution::Exponential { mean })
            }),
        }
    }

    /// The same uniform band for every direction pair.
    pub fn uniform_everywhere(low: f64, high: f64) -> ArrivalTable {
        ArrivalTable {
            entries: std::array::from_fn(|_| {
                std::array::from_fn(|_| ArrivalDistribution::Uniform { low, high })
            }),
        }
    }

    /// The distribution for cars entering at `ingress` and leaving `hops`
    /// quarter-turns later.
    ///
    /// # Panics
    /// Panics if `hops` is not in `1..=3`.
    pub fn distribution(&self, ingress: Exit, hops: u8) -> &ArrivalDistribution {
        assert!((1..=3).contains(&hops), "hop-count {hops} out of range");
        &self.entries[ingress.index()][(hops - 1) as usize]
    }
}

impl Default for ArrivalTable {
    /// Measured arrival rates of the reference intersection, in seconds.
    fn default() -> ArrivalTable {
        use ArrivalDistribution::{Exponential, Uniform};
        ArrivalTable {
            entries: [
                // From West to South, East, North
                [
                    Exponential { mean: 20.72 },
                    Exponential { mean: 8.42 },
                    Uniform { low: 7.0, high: 83.0 },
                ],
                // From South to East, North, West
                [
                    Exponential { mean: 9.039 },
                    Exponential { mean: 19.208 },
                    Exponential { mean: 36.417 },
                ],
                // From East to North, West, South
                [
                    Exponential { mean: 9.125 },
                    Exponential { mean: 9.319 },
                    Uniform { low: 2.0, high: 82.0 },
                ],
                // From North to West, South, East
                [
                    Uniform { low: 33.0, high: 100.0 },
                    Exponential { mean: 24.11 },
                    Uniform { low: 10.0, high: 71.0 },
                ],
            ],
        }
    }
}

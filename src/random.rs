use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Source of integers drawn from a closed interval.
pub trait BoundedRandom: Send {
    /// Returns a value in `low..=high`. Callers guarantee `low <= high`.
    fn between(&mut self, low: u64, high: u64) -> u64;
}

pub struct StdRandom {
    rng: StdRng,
}

impl StdRandom {
    pub fn from_entropy() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Default for StdRandom {
    fn default() -> Self {
        Self::from_entropy()
    }
}

impl BoundedRandom for StdRandom {
    fn between(&mut self, low: u64, high: u64) -> u64 {
        if low == high {
            return low;
        }

        self.rng.gen_range(low..=high)
    }
}

/// Replays a fixed list of values in a cycle.
///
/// Each value is clamped into the requested interval, so a script written for
/// one set of bounds never produces an out-of-range draw under another.
#[derive(Clone, Debug)]
pub struct ScriptedRandom {
    values: Vec<u64>,
    cursor: usize,
}

impl ScriptedRandom {
    /// An empty script always yields the lower bound.
    pub fn new(values: impl Into<Vec<u64>>) -> Self {
        Self {
            values: values.into(),
            cursor: 0,
        }
    }

    pub fn draws(&self) -> usize {
        self.cursor
    }
}

impl BoundedRandom for ScriptedRandom {
    fn between(&mut self, low: u64, high: u64) -> u64 {
        if self.values.is_empty() {
            self.cursor += 1;
            return low;
        }

        let value = self.values[self.cursor % self.values.len()];
        self.cursor += 1;
        value.clamp(low, high)
    }
}

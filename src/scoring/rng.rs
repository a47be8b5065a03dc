use parking_lot::Mutex;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

use crate::fetch::ProxyPool;

/// Injectable random source for the audit gate, candidate order and proxy choice.
///
/// The lock is only held for a single draw, never across an await point.
#[derive(Debug)]
pub struct SamplingRng {
    inner: Mutex<StdRng>,
}

impl Default for SamplingRng {
    fn default() -> Self {
        Self::from_entropy()
    }
}

impl SamplingRng {
    pub fn seeded(seed: u64) -> Self {
        Self {
            inner: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }

    pub fn from_entropy() -> Self {
        Self {
            inner: Mutex::new(StdRng::from_entropy()),
        }
    }

    pub fn from_seed_option(seed: Option<u64>) -> Self {
        match seed {
            Some(seed) => Self::seeded(seed),
            None => Self::from_entropy(),
        }
    }

    /// `true` with probability `probability`.
    pub fn check_gate(&self, probability: f64) -> bool {
        probability > self.inner.lock().r#gen::<f64>()
    }

    /// A uniformly shuffled queue of `0..len`; popping from it draws
    /// candidates without replacement.
    pub fn shuffled_indices(&self, len: usize) -> Vec<usize> {
        let mut indices: Vec<usize> = (0..len).collect();
        indices.shuffle(&mut *self.inner.lock());
        indices
    }

    pub fn choose_proxy<'p>(&self, pool: &'p ProxyPool) -> Option<&'p str> {
        pool.choose(&mut *self.inner.lock())
    }
}

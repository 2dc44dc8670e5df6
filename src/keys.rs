//! Random key selection
//!
//! Keys are drawn from a fixed universe `[1, 100]`: shuffle, take the
//! first `size`, then sort so the midpoint builder yields a valid BST.

use rand::seq::SliceRandom;
use rand::Rng;

use crate::tree::Key;

/// Smallest key (and smallest tree size)
pub const MIN_KEY: Key = 1;

/// Largest key (and largest tree size)
pub const MAX_KEY: Key = 100;

/// Inclusive key range sampled by rebuilds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyUniverse {
    /// Lowest key
    pub low: Key,
    /// Highest key
    pub high: Key,
}

impl Default for KeyUniverse {
    fn default() -> Self {
        Self {
            low: MIN_KEY,
            high: MAX_KEY,
        }
    }
}

impl KeyUniverse {
    /// Number of distinct keys available
    pub fn len(&self) -> usize {
        if self.high < self.low {
            0
        } else {
            (self.high - self.low + 1) as usize
        }
    }

    /// True when the range holds no keys
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Check membership
    pub fn contains(&self, key: Key) -> bool {
        (self.low..=self.high).contains(&key)
    }

    /// Draw `size` distinct keys, returned ascending
    ///
    /// `size` is clamped to the universe size.
    pub fn sample<R: Rng + ?Sized>(&self, size: usize, rng: &mut R) -> Vec<Key> {
        let mut keys: Vec<Key> = (self.low..=self.high).collect();
        keys.shuffle(rng);
        keys.truncate(size);
        keys.sort_unstable();
        keys
    }
}

/// Draw `size` distinct keys from the default universe
pub fn random_key_set<R: Rng + ?Sized>(size: usize, rng: &mut R) -> Vec<Key> {
    KeyUniverse::default().sample(size, rng)
}

//! Random bracket seeding.

use super::models::Player;
use rand::{SeedableRng, rngs::StdRng, seq::SliceRandom};

/// Bracket seeder
///
/// Shuffles the roster uniformly before the first round is drawn so nobody
/// can pick their opening opponent.
pub struct BracketSeeder {
    /// Random number generator
    rng: StdRng,
}

impl BracketSeeder {
    /// Create a seeder backed by OS entropy
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_os_rng(),
        }
    }

    /// Create a reproducible seeder
    ///
    /// # Arguments
    ///
    /// * `seed` - Fixed seed, same seed yields the same draws
    pub fn from_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Return the roster in a uniformly random order
    ///
    /// # Arguments
    ///
    /// * `roster` - Players to seed
    ///
    /// # Returns
    ///
    /// * `Vec<Player>` - Permuted copy; consecutive pairs meet in round 0
    pub fn seed(&mut self, roster: &[Player]) -> Vec<Player> {
        let mut seeded = roster.to_vec();
        seeded.shuffle(&mut self.rng);
        seeded
    }
}

impl Default for BracketSeeder {
    fn default() -> Self {
        Self::new()
    }
}

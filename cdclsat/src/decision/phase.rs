//! Polarity selection for decisions.
use rand::{rngs::StdRng, Rng, SeedableRng};

/// Chooses the polarity of decision variables.
///
/// Variables that were assigned before reuse their last value (phase saving), all others get a
/// random polarity.
pub struct Phase {
    rng: StdRng,
}

impl Default for Phase {
    fn default() -> Phase {
        Phase {
            rng: StdRng::from_entropy(),
        }
    }
}

impl Phase {
    /// Make the random choices reproducible.
    pub fn reseed(&mut self, seed: u64) {
        self.rng = StdRng::seed_from_u64(seed);
    }

    /// Polarity for a decision on a variable with the given saved phase.
    pub fn choose(&mut self, saved_phase: Option<bool>) -> bool {
        match saved_phase {
            Some(polarity) => polarity,
            None => self.rng.gen(),
        }
    }
}

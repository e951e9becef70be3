use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Every random draw the battle rules make goes through this trait, so a
/// fixed source reproduces a battle exactly.
pub trait RandomSource {
    /// A uniform value in `[0, 1)`. `reason` names the roll for tracing.
    fn next_unit(&mut self, reason: &str) -> f64;

    /// A uniform index in `0..len`. `len` must be non-zero.
    fn pick_index(&mut self, len: usize, reason: &str) -> usize {
        let index = (self.next_unit(reason) * len as f64) as usize;
        index.min(len.saturating_sub(1))
    }
}

/// Draws from the thread-local generator.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemRandom;

impl RandomSource for SystemRandom {
    fn next_unit(&mut self, reason: &str) -> f64 {
        let value = rand::rng().random::<f64>();
        tracing::trace!(reason, value, "rolled");
        value
    }

    fn pick_index(&mut self, len: usize, reason: &str) -> usize {
        let index = rand::rng().random_range(0..len);
        tracing::trace!(reason, index, len, "picked");
        index
    }
}

/// A reproducible generator for replays and seeded sessions.
#[derive(Debug, Clone)]
pub struct SeededRandom {
    rng: StdRng,
}

impl SeededRandom {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl RandomSource for SeededRandom {
    fn next_unit(&mut self, reason: &str) -> f64 {
        let value = self.rng.random::<f64>();
        tracing::trace!(reason, value, "rolled");
        value
    }

    fn pick_index(&mut self, len: usize, reason: &str) -> usize {
        let index = self.rng.random_range(0..len);
        tracing::trace!(reason, index, len, "picked");
        index
    }
}

/// Scripted outcomes for tests. Values are consumed in order.
#[derive(Debug, Clone)]
pub struct TurnRng {
    outcomes: Vec<f64>,
    index: usize,
}

impl TurnRng {
    pub fn new_for_test(outcomes: Vec<f64>) -> Self {
        Self { outcomes, index: 0 }
    }

    pub fn remaining(&self) -> usize {
        self.outcomes.len() - self.index
    }
}

impl RandomSource for TurnRng {
    fn next_unit(&mut self, reason: &str) -> f64 {
        if self.index >= self.outcomes.len() {
            panic!(
                "TurnRng exhausted! Tried to get a value for: '{}'. Need more random values.",
                reason
            );
        }
        let outcome = self.outcomes[self.index];

        #[cfg(test)]
        println!("[RNG] Consumed {} for: {}", outcome, reason);

        self.index += 1;
        outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scripted_values_in_order() {
        let mut rng = TurnRng::new_for_test(vec![0.1, 0.9]);
        assert_eq!(rng.next_unit("first"), 0.1);
        assert_eq!(rng.next_unit("second"), 0.9);
        assert_eq!(rng.remaining(), 0);
    }

    #[test]
    #[should_panic(expected = "TurnRng exhausted")]
    fn test_exhaustion_panics_with_reason() {
        let mut rng = TurnRng::new_for_test(vec![]);
        rng.next_unit("accuracy");
    }

    #[test]
    fn test_pick_index_stays_in_bounds() {
        let mut rng = TurnRng::new_for_test(vec![0.0, 0.5, 0.999_999]);
        assert_eq!(rng.pick_index(4, "a"), 0);
        assert_eq!(rng.pick_index(4, "b"), 2);
        assert_eq!(rng.pick_index(4, "c"), 3);
    }

    #[test]
    fn test_seeded_sources_agree() {
        let mut a = SeededRandom::new(42);
        let mut b = SeededRandom::new(42);
        for _ in 0..10 {
            let x = a.next_unit("x");
            assert_eq!(x, b.next_unit("x"));
            assert!((0.0..1.0).contains(&x));
        }
        assert_eq!(a.pick_index(6, "i"), b.pick_index(6, "i"));
    }
}

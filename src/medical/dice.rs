//! Random draws for the medical systems
//!
//! Every roll in this crate goes through [`RandomSource`], so a seeded RNG or a
//! scripted sequence can replace the campaign RNG for replay and testing.

use rand::Rng;

/// An injectable integer-draw function
pub trait RandomSource {
    /// Uniform draw in `0..bound`; a zero bound always yields 0
    fn draw(&mut self, bound: u32) -> u32;

    /// One six-sided die, 1-6
    fn d6(&mut self) -> u32 {
        self.draw(6) + 1
    }

    /// Sum of `dice` six-sided dice
    fn d6n(&mut self, dice: u32) -> u32 {
        (0..dice).map(|_| self.d6()).sum()
    }

    /// True with `percent` chance
    fn percent(&mut self, percent: u32) -> bool {
        self.draw(100) < percent
    }
}

impl<R: Rng + ?Sized> RandomSource for R {
    fn draw(&mut self, bound: u32) -> u32 {
        if bound == 0 {
            0
        } else {
            self.gen_range(0..bound)
        }
    }
}

/// Replays a fixed sequence of draws, cycling when exhausted
///
/// Each scripted value is reduced modulo the requested bound, so a script
/// written for percentile rolls stays in range when a d6 is asked for.
#[derive(Debug, Clone)]
pub struct ScriptedRolls {
    rolls: Vec<u32>,
    next: usize,
}

impl ScriptedRolls {
    pub fn new(rolls: Vec<u32>) -> Self {
        assert!(!rolls.is_empty(), "ScriptedRolls needs at least one roll");
        Self { rolls, next: 0 }
    }

    /// A source that always yields the same value
    pub fn constant(value: u32) -> Self {
        Self::new(vec![value])
    }

    /// Number of draws taken so far
    pub fn draws_taken(&self) -> usize {
        self.next
    }
}

impl RandomSource for ScriptedRolls {
    fn draw(&mut self, bound: u32) -> u32 {
        let value = self.rolls[self.next % self.rolls.len()];
        self.next += 1;
        if bound == 0 {
            0
        } else {
            value % bound
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_rng_draw_in_range() {
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        for _ in 0..1000 {
            assert!(rng.draw(6) < 6);
        }
        assert_eq!(rng.draw(0), 0);
    }

    #[test]
    fn test_d6_bounds() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        for _ in 0..1000 {
            let roll = rng.d6();
            assert!((1..=6).contains(&roll));
            let pair = rng.d6n(2);
            assert!((2..=12).contains(&pair));
        }
    }

    #[test]
    fn test_scripted_rolls_cycle() {
        let mut rolls = ScriptedRolls::new(vec![10, 99]);
        assert_eq!(rolls.draw(100), 10);
        assert_eq!(rolls.draw(100), 99);
        assert_eq!(rolls.draw(100), 10);
        assert_eq!(rolls.draws_taken(), 3);
    }

    #[test]
    fn test_scripted_rolls_reduce_modulo_bound() {
        let mut rolls = ScriptedRolls::constant(10);
        assert_eq!(rolls.draw(6), 4);
        assert_eq!(rolls.d6(), 5);
    }
}

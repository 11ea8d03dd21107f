//! Randomness sources shared by every unit of a pipeline.

use crate::error::GenerationError;
use rand::rngs::{OsRng, StdRng};
use rand::{Rng, SeedableRng, TryRngCore};

/// A source of uniformly distributed integers.
pub trait RandomSource {
    /// Draw an integer uniformly from `[0, n)`.
    ///
    /// `n == 0` is rejected with [`GenerationError::InvalidRange`].
    fn draw(&mut self, n: usize) -> Result<usize, GenerationError>;

    /// Draw an integer uniformly from `[lo, hi]`.
    fn draw_inclusive(&mut self, lo: usize, hi: usize) -> Result<usize, GenerationError> {
        if hi < lo {
            return Err(GenerationError::InvalidRange);
        }
        let span = (hi - lo)
            .checked_add(1)
            .ok_or(GenerationError::InvalidRange)?;
        Ok(lo + self.draw(span)?)
    }
}

impl<R: RandomSource + ?Sized> RandomSource for &mut R {
    fn draw(&mut self, n: usize) -> Result<usize, GenerationError> {
        (**self).draw(n)
    }
}

/// Cryptographically secure source backed by the OS entropy provider.
///
/// Holds no state, so any number of threads may use their own copy freely.
#[derive(Debug, Clone, Copy, Default)]
pub struct SecureSource;

impl RandomSource for SecureSource {
    fn draw(&mut self, n: usize) -> Result<usize, GenerationError> {
        if n == 0 {
            return Err(GenerationError::InvalidRange);
        }
        let n = n as u64;
        // Values below 2^64 mod n would be over-represented after `% n`.
        let threshold = n.wrapping_neg() % n;
        loop {
            let value = OsRng
                .try_next_u64()
                .map_err(|e| GenerationError::RandomnessUnavailable(e.to_string()))?;
            if value >= threshold {
                return Ok((value % n) as usize);
            }
        }
    }
}

/// Seeded pseudo-random source.
///
/// Deterministic for a given seed and not safe to share without a lock; wrap
/// it in a [`Session`](crate::Session) for concurrent use.
#[derive(Debug, Clone)]
pub struct SeededSource {
    rng: StdRng,
}

impl SeededSource {
    /// Create a source seeded with `seed`.
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl RandomSource for SeededSource {
    fn draw(&mut self, n: usize) -> Result<usize, GenerationError> {
        if n == 0 {
            return Err(GenerationError::InvalidRange);
        }
        Ok(self.rng.random_range(0..n))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_secure_draw_in_range() {
        let mut source = SecureSource;
        for n in [1usize, 2, 3, 10, 62, 1000] {
            for _ in 0..200 {
                assert!(source.draw(n).unwrap() < n);
            }
        }
    }

    #[test]
    fn test_secure_draw_of_one_is_zero() {
        let mut source = SecureSource;
        assert_eq!(source.draw(1).unwrap(), 0);
    }

    #[test]
    fn test_zero_range_rejected() {
        assert_eq!(SecureSource.draw(0), Err(GenerationError::InvalidRange));
        assert_eq!(
            SeededSource::new(1).draw(0),
            Err(GenerationError::InvalidRange)
        );
    }

    #[test]
    fn test_seeded_deterministic() {
        let mut a = SeededSource::new(42);
        let mut b = SeededSource::new(42);
        let left: Vec<usize> = (0..50).map(|_| a.draw(1000).unwrap()).collect();
        let right: Vec<usize> = (0..50).map(|_| b.draw(1000).unwrap()).collect();
        assert_eq!(left, right);
    }

    #[test]
    fn test_seeded_different_seeds_diverge() {
        let mut a = SeededSource::new(1);
        let mut b = SeededSource::new(2);
        let left: Vec<usize> = (0..32).map(|_| a.draw(1 << 20).unwrap()).collect();
        let right: Vec<usize> = (0..32).map(|_| b.draw(1 << 20).unwrap()).collect();
        assert_ne!(left, right);
    }

    #[test]
    fn test_draw_inclusive_bounds() {
        let mut source = SeededSource::new(7);
        let mut seen_lo = false;
        let mut seen_hi = false;
        for _ in 0..1000 {
            let value = source.draw_inclusive(3, 6).unwrap();
            assert!((3..=6).contains(&value));
            seen_lo |= value == 3;
            seen_hi |= value == 6;
        }
        assert!(seen_lo && seen_hi);
    }

    #[test]
    fn test_draw_inclusive_rejects_inverted_range() {
        let mut source = SeededSource::new(7);
        assert_eq!(
            source.draw_inclusive(5, 4),
            Err(GenerationError::InvalidRange)
        );
    }

    #[test]
    fn test_borrowed_trait_object_draws() {
        let mut seeded = SeededSource::new(3);
        let source: &mut dyn RandomSource = &mut seeded;
        assert!(source.draw(5).unwrap() < 5);
    }
}

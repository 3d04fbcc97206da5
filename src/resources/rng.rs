//! Seedable random source shared by the spawners.
//!
//! Every random draw (intervals, placements, scales) goes through this
//! resource so a fixed seed reproduces a whole session.

use bevy_ecs::prelude::Resource;
use fastrand::Rng;

#[derive(Resource, Debug)]
pub struct GameRng(pub Rng);

impl Default for GameRng {
    fn default() -> Self {
        GameRng(Rng::new())
    }
}

impl GameRng {
    pub fn with_seed(seed: u64) -> Self {
        GameRng(Rng::with_seed(seed))
    }

    /// Uniform `f64` in `[min(a, b), max(a, b)]`.
    ///
    /// Inverted bounds are swapped; an empty range returns the bound.
    pub fn range_f64(&mut self, a: f64, b: f64) -> f64 {
        let (min, max) = if a <= b { (a, b) } else { (b, a) };
        let range = max - min;
        if range < f64::EPSILON {
            return min;
        }
        min + self.0.f64() * range
    }

    /// Uniform `f32` in `[min(a, b), max(a, b)]`.
    pub fn range_f32(&mut self, a: f32, b: f32) -> f32 {
        let (min, max) = if a <= b { (a, b) } else { (b, a) };
        let range = max - min;
        if range < f32::EPSILON {
            return min;
        }
        min + self.0.f32() * range
    }

    /// Uniform index in `0..len`; `None` for an empty slice.
    pub fn index(&mut self, len: usize) -> Option<usize> {
        (len > 0).then(|| self.0.usize(0..len))
    }

    /// `true` with probability `p`.
    pub fn chance(&mut self, p: f64) -> bool {
        self.0.f64() < p
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_seed_same_sequence() {
        let mut a = GameRng::with_seed(7);
        let mut b = GameRng::with_seed(7);
        for _ in 0..16 {
            assert_eq!(a.range_f64(0.0, 10.0), b.range_f64(0.0, 10.0));
        }
    }

    #[test]
    fn test_inverted_bounds_are_swapped() {
        let mut rng = GameRng::with_seed(3);
        for _ in 0..100 {
            let v = rng.range_f64(5.0, 2.5);
            assert!((2.5..=5.0).contains(&v));
            let w = rng.range_f32(0.75, 0.35);
            assert!((0.35..=0.75).contains(&w));
        }
    }

    #[test]
    fn test_empty_range_returns_bound() {
        let mut rng = GameRng::with_seed(1);
        assert_eq!(rng.range_f64(2.0, 2.0), 2.0);
        assert_eq!(rng.range_f32(-1.0, -1.0), -1.0);
    }

    #[test]
    fn test_index_of_empty_is_none() {
        let mut rng = GameRng::with_seed(1);
        assert_eq!(rng.index(0), None);
        assert!(rng.index(3).is_some_and(|i| i < 3));
    }
}

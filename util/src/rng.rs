use std::hash::{Hash, Hasher};

use rand::prelude::*;

use crate::GameRng;

/// Construct a throwaway random number generator seeded by a noise value.
///
/// Good for short-term use in immutable contexts given a varying source of
/// noise like map position coordinates.
///
/// ```
/// # use util::srng;
/// use rand::prelude::*;
///
/// assert_eq!(
///   srng("dungeon").gen_range(0..1000),
///   srng("dungeon").gen_range(0..1000));
/// ```
pub fn srng(seed: &(impl Hash + ?Sized)) -> GameRng {
    let mut h = crate::FastHasher::default();
    seed.hash(&mut h);
    GameRng::seed_from_u64(h.finish())
}

pub trait RngExt {
    /// Return true with probability `p`.
    ///
    /// Out of range probabilities are clamped, so 1.0 or more always
    /// succeeds and 0.0 or less never does.
    fn chance(&mut self, p: f64) -> bool;
}

impl<T: Rng + ?Sized> RngExt for T {
    fn chance(&mut self, p: f64) -> bool {
        if p.is_nan() || p <= 0.0 {
            false
        } else if p >= 1.0 {
            true
        } else {
            self.gen_bool(p)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chance_extremes() {
        let mut rng = srng(&123);
        for _ in 0..100 {
            assert!(rng.chance(1.0));
            assert!(rng.chance(3.0));
            assert!(!rng.chance(0.0));
            assert!(!rng.chance(-1.0));
            assert!(!rng.chance(f64::NAN));
        }
    }
}

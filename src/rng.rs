//! Thin wrapper over [`rand`] giving the two primitives the generators and
//! parallel schedulers need: a bounded integer draw and a uniform float.

use rand::Rng;

/// Uniform draw from `0..bound`. `bound` must be nonzero.
pub fn rand_bounded<R: Rng + ?Sized>(rng: &mut R, bound: u32) -> u32 {
    debug_assert!(bound > 0);
    rng.gen_range(0..bound)
}

/// Uniform draw from `[0.0, 1.0)`.
pub fn randf<R: Rng + ?Sized>(rng: &mut R) -> f32 {
    rng.gen_range(0.0..1.0)
}

#[cfg(test)]
mod test {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn rand_bounded_stays_in_range() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        for _ in 0..1000 {
            assert!(rand_bounded(&mut rng, 5) < 5);
        }
    }

    #[test]
    fn randf_stays_in_unit_interval() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        for _ in 0..1000 {
            let f = randf(&mut rng);
            assert!((0.0..1.0).contains(&f));
        }
    }
}

//! Reproducible shuffling for the daily picks.
//!
//! The generator is intentionally tiny: `frac(sin(s) * 10000)`. It must not
//! be swapped for a "better" PRNG, otherwise a given day's songs change.

/// Fractional part of `sin(state) * 10000`, in `[0, 1)`
#[allow(clippy::cast_precision_loss)]
pub fn seeded_random(state: i64) -> f64 {
    let x = (state as f64).sin() * 10_000.0;
    x - x.floor()
}

/// Fisher-Yates shuffle driven by [`seeded_random`].
///
/// Walks from the last index down to 1, bumping the state before every draw.
#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_precision_loss
)]
pub fn seeded_shuffle<T>(items: &mut [T], seed: i64) {
    let mut state = seed;
    for i in (1..items.len()).rev() {
        state += 1;
        let j = (seeded_random(state) * (i + 1) as f64).floor() as usize;
        // guards the 1.0 edge that float rounding can produce
        items.swap(i, j.min(i));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn random_is_in_unit_interval() {
        for s in -1000..1000 {
            let r = seeded_random(20_240_315 + s);
            assert!((0.0..1.0).contains(&r), "state {s}: {r}");
        }
    }

    #[test]
    fn random_matches_formula() {
        let x = 1.0_f64.sin() * 10_000.0;
        assert_eq!(seeded_random(1), x - x.floor());
        // sin(0) == 0
        assert_eq!(seeded_random(0), 0.0);
    }

    #[test]
    fn shuffle_is_reproducible() {
        let mut a: Vec<u32> = (0..50).collect();
        let mut b = a.clone();
        seeded_shuffle(&mut a, 20_240_315);
        seeded_shuffle(&mut b, 20_240_315);
        assert_eq!(a, b);
    }

    #[test]
    fn shuffle_is_a_permutation() {
        let mut items: Vec<u32> = (0..90).collect();
        seeded_shuffle(&mut items, 20_261_019);
        let mut sorted = items.clone();
        sorted.sort_unstable();
        assert_eq!(sorted, (0..90).collect::<Vec<_>>());
    }

    #[test]
    fn shuffle_follows_descending_walk() {
        let seed = 20_240_315;
        let mut expected = vec!['a', 'b', 'c', 'd'];
        let mut state = seed;
        for i in (1..expected.len()).rev() {
            state += 1;
            let x = (state as f64).sin() * 10_000.0;
            let r = x - x.floor();
            let j = (r * (i + 1) as f64).floor() as usize;
            expected.swap(i, j);
        }

        let mut items = vec!['a', 'b', 'c', 'd'];
        seeded_shuffle(&mut items, seed);
        assert_eq!(items, expected);
    }

    #[test]
    fn different_seeds_usually_differ() {
        let mut a: Vec<u32> = (0..30).collect();
        let mut b = a.clone();
        seeded_shuffle(&mut a, 20_240_315);
        seeded_shuffle(&mut b, 20_240_316);
        assert_ne!(a, b);
    }

    #[test]
    fn short_inputs_are_untouched() {
        let mut empty: Vec<u8> = vec![];
        seeded_shuffle(&mut empty, 1);
        assert!(empty.is_empty());

        let mut one = vec![7];
        seeded_shuffle(&mut one, 1);
        assert_eq!(one, vec![7]);
    }
}

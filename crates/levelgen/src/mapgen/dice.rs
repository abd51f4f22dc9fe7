//! Uniform rolls over an injected random stream.

use rand_chacha::rand_core::Rng;

pub(super) fn roll_inclusive<R: Rng + ?Sized>(
    rng: &mut R,
    min_value: usize,
    max_value: usize,
) -> usize {
    debug_assert!(min_value <= max_value);
    let range_size = (max_value - min_value) as u64 + 1;
    min_value + (rng.next_u64() % range_size) as usize
}

pub(super) fn coin_flip<R: Rng + ?Sized>(rng: &mut R) -> bool {
    rng.next_u64() & 1 == 0
}

pub(super) fn chance_per_mille<R: Rng + ?Sized>(rng: &mut R, per_mille: u32) -> bool {
    (rng.next_u64() % 1000) < u64::from(per_mille)
}

pub(super) fn pick<'a, R: Rng + ?Sized, T>(rng: &mut R, options: &'a [T]) -> Option<&'a T> {
    if options.is_empty() {
        return None;
    }
    options.get(roll_inclusive(rng, 0, options.len() - 1))
}

//! Randomness source for PI assignment.
//!
//! The original simulator pulls from a single PRNG owned by the AIG
//! manager, so that every call into the manager advances a shared
//! stream and two runs given the same call sequence are identical. We
//! keep that determinism but invert the ownership: the simulator session
//! is handed a PRNG handle rather than reaching into a global one, so
//! independent sessions can run on independent seeds without any
//! caller-side locking.

use rand::SeedableRng;
use rand::rngs::StdRng;

/// A source of simulation words. One call produces the bits for one word
/// of one pattern-frame; the exact call order is part of a session's
/// observable behavior.
pub trait SimRng {
    fn next_word(&mut self) -> u32;
}

/// Wraps any [`rand::RngCore`] as a [`SimRng`].
pub struct SharedRng<R> {
    inner: R,
}

impl<R> SharedRng<R> {
    pub fn new(inner: R) -> Self {
        Self { inner }
    }
}

impl<R: rand::RngCore> SimRng for SharedRng<R> {
    fn next_word(&mut self) -> u32 {
        self.inner.next_u32()
    }
}

/// Convenience constructor for the common case: a deterministic PRNG
/// seeded explicitly by the caller.
pub fn seeded(seed: u64) -> SharedRng<StdRng> {
    SharedRng::new(StdRng::seed_from_u64(seed))
}

/// A `SimRng` stand-in that always yields zero. [`crate::cex`]'s replay
/// path never calls it -- witnesses are seeded entirely through
/// [`crate::assign::assign_const`] -- but any caller composing a
/// `&mut dyn SimRng`-taking helper (e.g. [`crate::session::Session::initialize`])
/// over a witness it already holds can hand this in rather than standing
/// up a seeded PRNG it will never draw from.
pub struct NullRng;

impl SimRng for NullRng {
    fn next_word(&mut self) -> u32 {
        0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seeded_is_deterministic() {
        let mut a = seeded(42);
        let mut b = seeded(42);
        for _ in 0..8 {
            assert_eq!(a.next_word(), b.next_word());
        }
    }

    #[test]
    fn different_seeds_diverge() {
        let mut a = seeded(1);
        let mut b = seeded(2);
        let sa: Vec<u32> = (0..8).map(|_| a.next_word()).collect();
        let sb: Vec<u32> = (0..8).map(|_| b.next_word()).collect();
        assert_ne!(sa, sb);
    }

    #[test]
    fn null_rng_always_yields_zero() {
        let mut rng = NullRng;
        for _ in 0..4 {
            assert_eq!(rng.next_word(), 0);
        }
    }
}

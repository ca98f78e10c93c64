//! Stochastic infection outcome for repeated independent exposures.

use rand::prelude::*;

/// Probability that at least one of `contacts` independent exposures transmits, when each
/// exposure transmits with probability `probability`.
pub fn infection_probability(contacts: u32, probability: f64) -> f64 {
    // 1 - (1 - p)^n
    -(contacts as f64 * (-probability).ln_1p()).exp_m1()
}

/// Decide whether a node with `contacts` infectious contacts becomes infected.
///
/// Consumes a single uniform draw unless there are no contacts at all.
pub fn attempt_infection<R: Rng + ?Sized>(rng: &mut R, contacts: u32, probability: f64) -> bool {
    if contacts == 0 {
        return false;
    }
    rng.random::<f64>() < infection_probability(contacts, probability)
}

//! Creation of child variants from a parent variant
//!
//! A child genome is a copy of its parent with a uniformly drawn number of distinct loci flipped.
//! In coupled runs, the transmissibility of the child is inherited. Otherwise it drifts uniformly
//! within `[-drift, +drift]` around the parent value and is clamped to
//! `[MIN_TRANSMISSIBILITY, MAX_TRANSMISSIBILITY]`.

use rand::prelude::*;

use super::genome::Genome;

pub const MIN_TRANSMISSIBILITY: f64 = 0.1;
pub const MAX_TRANSMISSIBILITY: f64 = 0.9;

#[derive(Clone, Debug)]
pub struct Mutator {
    index_pool: Vec<usize>,
    min_edits: usize,
    max_edits: usize,
    drift: f64,
    coupled: bool,
}

impl Mutator {
    pub fn new(
        genome_length: usize,
        min_edits: usize,
        max_edits: usize,
        drift: f64,
        coupled: bool,
    ) -> Self {
        Self {
            index_pool: (0..genome_length).collect(),
            min_edits,
            max_edits,
            drift,
            coupled,
        }
    }

    /// Shared pool of locus indices, also used to draw the root genome.
    pub fn index_pool(&mut self) -> &mut [usize] {
        &mut self.index_pool
    }

    /// Create a child genome and transmissibility from a parent.
    pub fn mutate<R: Rng + ?Sized>(
        &mut self,
        rng: &mut R,
        parent: &Genome,
        transmissibility: f64,
    ) -> (Genome, f64) {
        self.index_pool.shuffle(rng);
        let n_edits = rng.random_range(self.min_edits..=self.max_edits);

        let mut child = parent.clone();
        for &locus in &self.index_pool[..n_edits] {
            child.flip(locus);
        }

        if self.coupled {
            return (child, transmissibility);
        }

        let delta = self.draw_drift(rng);
        let child_transmissibility =
            (transmissibility + delta).clamp(MIN_TRANSMISSIBILITY, MAX_TRANSMISSIBILITY);
        (child, child_transmissibility)
    }

    /// Draw a uniform offset in `[-drift, drift)` by rejection from `[0, 1)`.
    fn draw_drift<R: Rng + ?Sized>(&self, rng: &mut R) -> f64 {
        if self.drift <= 0. {
            return 0.;
        }
        let range = 2. * self.drift;
        loop {
            let sample = rng.random::<f64>();
            if sample < range {
                return sample - self.drift;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;

    #[test]
    fn edit_count_within_bounds() {
        let mut rng = StdRng::seed_from_u64(11);
        let mut mutator = Mutator::new(40, 2, 5, 0.1, false);
        let parent = Genome::from_ones(40, &[0, 1, 2, 3]);
        for _ in 0..500 {
            let (child, _) = mutator.mutate(&mut rng, &parent, 0.5);
            let distance = child.hamming(&parent);
            assert!((2..=5).contains(&distance), "distance was {distance}");
        }
    }

    #[test]
    fn fixed_edit_count() {
        let mut rng = StdRng::seed_from_u64(12);
        let mut mutator = Mutator::new(10, 3, 3, 0., true);
        let parent = Genome::new(10);
        let (child, _) = mutator.mutate(&mut rng, &parent, 0.5);
        assert_eq!(child.hamming(&parent), 3);
        assert_eq!(child.ones(), 3);
    }

    #[test]
    fn coupled_inherits_transmissibility() {
        let mut rng = StdRng::seed_from_u64(13);
        let mut mutator = Mutator::new(20, 1, 4, 0.3, true);
        let parent = Genome::from_ones(20, &[5]);
        for _ in 0..100 {
            let (_, transmissibility) = mutator.mutate(&mut rng, &parent, 0.37);
            assert_eq!(transmissibility, 0.37);
        }
    }

    #[test]
    fn uncoupled_drift_is_bounded_and_clamped() {
        let mut rng = StdRng::seed_from_u64(14);
        let mut mutator = Mutator::new(20, 1, 1, 0.05, false);
        let parent = Genome::new(20);
        for _ in 0..1_000 {
            let (_, transmissibility) = mutator.mutate(&mut rng, &parent, 0.5);
            assert!((0.449..=0.551).contains(&transmissibility));
        }

        let mut mutator = Mutator::new(20, 1, 1, 0.4, false);
        for _ in 0..1_000 {
            let (_, low) = mutator.mutate(&mut rng, &parent, 0.12);
            let (_, high) = mutator.mutate(&mut rng, &parent, 0.88);
            assert!((MIN_TRANSMISSIBILITY..=MAX_TRANSMISSIBILITY).contains(&low));
            assert!((MIN_TRANSMISSIBILITY..=MAX_TRANSMISSIBILITY).contains(&high));
        }
    }

    #[test]
    fn zero_drift_keeps_transmissibility() {
        let mut rng = StdRng::seed_from_u64(15);
        let mut mutator = Mutator::new(8, 1, 2, 0., false);
        let (_, transmissibility) = mutator.mutate(&mut rng, &Genome::new(8), 0.6);
        assert_eq!(transmissibility, 0.6);
    }
}

//! Binary genome of a variant
//!
//! A `Genome` is a fixed length sequence of loci, each either carrying a mutation (`1`) or not
//! (`0`). Genomes are compared by Hamming distance and are the basis of partial immunity.

use rand::prelude::*;
use std::fmt;

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Genome {
    loci: Vec<bool>,
}

impl Genome {
    /// Construct a genome without any mutations.
    pub fn new(length: usize) -> Self {
        Self {
            loci: vec![false; length],
        }
    }

    /// Construct a genome with ones at exactly the given loci.
    pub fn from_ones(length: usize, ones: &[usize]) -> Self {
        let mut genome = Self::new(length);
        for &locus in ones {
            genome.loci[locus] = true;
        }
        genome
    }

    /// Construct a genome with `n_ones` mutations at uniformly chosen loci.
    ///
    /// The index pool is shuffled in place and its first `n_ones` entries are set.
    pub fn random<R: Rng + ?Sized>(rng: &mut R, index_pool: &mut [usize], n_ones: usize) -> Self {
        index_pool.shuffle(rng);
        Self::from_ones(index_pool.len(), &index_pool[..n_ones])
    }

    pub fn len(&self) -> usize {
        self.loci.len()
    }

    pub fn is_empty(&self) -> bool {
        self.loci.is_empty()
    }

    pub fn get(&self, locus: usize) -> bool {
        self.loci[locus]
    }

    /// Toggle the locus between `0` and `1`.
    pub fn flip(&mut self, locus: usize) {
        self.loci[locus] = !self.loci[locus];
    }

    /// Number of loci carrying a mutation.
    pub fn ones(&self) -> usize {
        self.loci.iter().filter(|&&bit| bit).count()
    }

    /// Iterate over the loci carrying a mutation.
    pub fn iter_ones(&self) -> impl Iterator<Item = usize> + '_ {
        self.loci
            .iter()
            .enumerate()
            .filter_map(|(locus, &bit)| bit.then_some(locus))
    }

    /// Number of loci in which both genomes differ.
    pub fn hamming(&self, other: &Genome) -> usize {
        self.loci
            .iter()
            .zip(other.loci.iter())
            .filter(|(a, b)| a != b)
            .count()
    }
}

impl fmt::Display for Genome {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for &bit in &self.loci {
            write!(f, "{}", if bit { '1' } else { '0' })?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;

    #[test]
    fn flip_toggles() {
        let mut genome = Genome::new(4);
        genome.flip(1);
        genome.flip(3);
        assert_eq!(genome.to_string(), "0101");
        genome.flip(1);
        assert_eq!(genome.to_string(), "0001");
        assert_eq!(genome.ones(), 1);
    }

    #[test]
    fn random_has_requested_ones() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut pool: Vec<usize> = (0..50).collect();
        for n_ones in [0, 1, 17, 50] {
            let genome = Genome::random(&mut rng, &mut pool, n_ones);
            assert_eq!(genome.len(), 50);
            assert_eq!(genome.ones(), n_ones);
        }
    }

    #[test]
    fn ones_and_hamming() {
        let a = Genome::from_ones(6, &[0, 2, 5]);
        let b = Genome::from_ones(6, &[2, 3]);
        assert_eq!(a.iter_ones().collect::<Vec<_>>(), vec![0, 2, 5]);
        assert_eq!(a.hamming(&b), 3);
        assert_eq!(a.hamming(&a), 0);
    }
}

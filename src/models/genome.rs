use rand::{seq::SliceRandom, Rng};
use serde::{Deserialize, Serialize};

use crate::utils::dice::FACES_PER_DIE;

/// One board slot: which physical die sits there and which face is up
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Gene {
    pub dice_id: usize,
    pub face_id: usize,
}

/// A candidate board layout.
///
/// Slot `i` maps to board cell `i` in row-major order. The dice ids across all
/// slots form a permutation of `0..genes.len()`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Genome {
    pub genes: Vec<Gene>,
    pub fitness: f64,
}

/// One generation of genomes
pub type Population = Vec<Genome>;

impl Genome {
    pub fn new(genes: Vec<Gene>) -> Self {
        Self {
            genes,
            fitness: 0.0,
        }
    }

    /// Random layout: every die once, random face up, slots shuffled
    pub fn random(length: usize, rng: &mut impl Rng) -> Self {
        let mut genes: Vec<Gene> = (0..length)
            .map(|dice_id| Gene {
                dice_id,
                face_id: rng.random_range(0..FACES_PER_DIE),
            })
            .collect();
        genes.shuffle(rng);

        Self::new(genes)
    }

    pub fn len(&self) -> usize {
        self.genes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.genes.is_empty()
    }

    /// Check that every dice id in `0..len` appears exactly once
    pub fn is_permutation(&self) -> bool {
        is_dice_permutation(&self.genes)
    }
}

pub(crate) fn is_dice_permutation(genes: &[Gene]) -> bool {
    let mut seen = vec![false; genes.len()];
    for gene in genes {
        match seen.get_mut(gene.dice_id) {
            Some(slot) if !*slot => *slot = true,
            _ => return false,
        }
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, SeedableRng};

    #[test]
    fn test_random_genome_is_permutation() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..200 {
            let genome = Genome::random(16, &mut rng);
            assert_eq!(genome.len(), 16);
            assert!(genome.is_permutation());
            assert!(genome.genes.iter().all(|g| g.face_id < FACES_PER_DIE));
            assert_eq!(genome.fitness, 0.0);
        }
    }

    #[test]
    fn test_random_genome_actually_shuffles() {
        let mut rng = StdRng::seed_from_u64(11);
        let identity_count = (0..50)
            .map(|_| Genome::random(16, &mut rng))
            .filter(|g| g.genes.iter().enumerate().all(|(i, gene)| gene.dice_id == i))
            .count();
        assert!(identity_count < 50);
    }

    #[test]
    fn test_permutation_check_detects_duplicates_and_gaps() {
        let gene = |dice_id| Gene { dice_id, face_id: 0 };

        assert!(Genome::new(vec![gene(2), gene(0), gene(1)]).is_permutation());
        assert!(!Genome::new(vec![gene(0), gene(0), gene(1)]).is_permutation());
        assert!(!Genome::new(vec![gene(0), gene(1), gene(3)]).is_permutation());
        assert!(Genome::new(vec![]).is_permutation());
    }
}

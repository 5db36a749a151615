use rand::Rng;

use crate::models::Genome;

/// Aggregate fitness of a population after normalization
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FitnessStats {
    pub total: f64,
    pub best: f64,
    pub best_index: usize,
}

/// Shift fitness up so no genome is below zero, then total it and find the
/// fittest genome. Ties keep the earliest index; index 0 wins when nothing is
/// strictly positive.
pub fn normalize(population: &mut [Genome]) -> FitnessStats {
    let min = population
        .iter()
        .map(|genome| genome.fitness)
        .fold(0.0, f64::min);
    for genome in population.iter_mut() {
        genome.fitness -= min;
    }

    let mut stats = FitnessStats::default();
    for (index, genome) in population.iter().enumerate() {
        stats.total += genome.fitness;
        if genome.fitness > stats.best {
            stats.best = genome.fitness;
            stats.best_index = index;
        }
    }
    stats
}

/// Rescale every fitness to `(f - mean) / (2 * sigma)` and return sigma.
///
/// A population with no spread has sigma 0 and every fitness becomes NaN.
pub fn sigma_scale(population: &mut [Genome]) -> f64 {
    if population.is_empty() {
        return 0.0;
    }

    let count = population.len() as f64;
    let mean = population.iter().map(|g| g.fitness).sum::<f64>() / count;
    let variance = population
        .iter()
        .map(|g| (g.fitness - mean) * (g.fitness - mean))
        .sum::<f64>()
        / count;
    let sigma = variance.sqrt();

    for genome in population.iter_mut() {
        genome.fitness = (genome.fitness - mean) / (2.0 * sigma);
    }
    sigma
}

/// Fitness-proportional pick: the first genome whose running fitness sum
/// reaches a uniform draw from `[0, total)`. Falls back to index 0 when no
/// running sum reaches the draw (e.g. NaN fitness).
pub fn roulette(population: &[Genome], total: f64, rng: &mut impl Rng) -> usize {
    let slice = rng.random::<f64>() * total;
    let mut accumulated = 0.0;

    for (index, genome) in population.iter().enumerate() {
        accumulated += genome.fitness;
        if accumulated >= slice {
            return index;
        }
    }
    0
}

/// The `count` fittest genomes, best first, repeated `copies` times
pub fn elites(population: &[Genome], count: usize, copies: usize) -> Vec<Genome> {
    let mut ranked: Vec<&Genome> = population.iter().collect();
    ranked.sort_by(|a, b| b.fitness.total_cmp(&a.fitness));

    let best = &ranked[..count.min(ranked.len())];
    (0..copies)
        .flat_map(|_| best.iter().map(|genome| (*genome).clone()))
        .collect()
}

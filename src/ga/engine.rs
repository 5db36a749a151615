use rand::Rng;
use serde::{Deserialize, Serialize};

use super::config::GaConfig;
use super::error::EngineError;
use super::operators;
use super::selection::{self, FitnessStats};
use crate::game::{Evaluator, GridError};
use crate::models::{Evaluation, Genome, Population};
use crate::utils::dice;

/// Generation counter and the best raw score of the last finished generation
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationStats {
    pub generation: u32,
    pub last_generation_best_score: u32,
}

/// Summary of a generation, produced when its epoch runs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EpochReport {
    /// Number of the generation that was just evaluated
    pub generation: u32,
    pub best_score: u32,
    pub average_score: f64,
    /// Layout of the fittest genome in that generation
    pub best_configuration: String,
}

/// Genetic algorithm over board layouts.
///
/// Each [`evaluate_next`](Engine::evaluate_next) call scores one genome. When
/// the last genome of a generation has been scored the engine runs an epoch:
/// normalize, sigma scale, renormalize, then breed a full replacement
/// population.
pub struct Engine<E, R> {
    config: GaConfig,
    evaluator: E,
    rng: R,
    population: Population,
    cursor: usize,
    stats: FitnessStats,
    generation: u32,
    running_best_score: u32,
    running_score_total: u64,
    last_generation_best_score: u32,
    best_configuration: String,
    display_configuration: String,
}

impl<E: Evaluator, R: Rng> Engine<E, R> {
    /// Create an engine with a random initial population
    pub fn new(config: GaConfig, evaluator: E, mut rng: R) -> Result<Self, EngineError> {
        config.validate()?;

        let length = config.genome_length();
        let population = (0..config.population_size)
            .map(|_| Genome::random(length, &mut rng))
            .collect();

        Self::with_population(config, evaluator, rng, population)
    }

    /// Create an engine starting from a given population
    pub fn with_population(
        config: GaConfig,
        evaluator: E,
        rng: R,
        population: Population,
    ) -> Result<Self, EngineError> {
        config.validate()?;

        if evaluator.width() != config.board_width {
            return Err(EngineError::EvaluatorWidth {
                expected: config.board_width,
                actual: evaluator.width(),
            });
        }

        if population.len() != config.population_size {
            return Err(EngineError::InvalidPopulation(format!(
                "expected {} genomes, got {}",
                config.population_size,
                population.len()
            )));
        }

        let length = config.genome_length();
        if let Some(index) = population
            .iter()
            .position(|genome| genome.len() != length || !genome.is_permutation())
        {
            return Err(EngineError::InvalidPopulation(format!(
                "genome {} is not a permutation of {} dice",
                index, length
            )));
        }

        let best_configuration = dice::configuration_string(&population[0].genes)?;

        Ok(Self {
            config,
            evaluator,
            rng,
            population,
            cursor: 0,
            stats: FitnessStats::default(),
            generation: 0,
            running_best_score: 0,
            running_score_total: 0,
            last_generation_best_score: 0,
            display_configuration: best_configuration.clone(),
            best_configuration,
        })
    }

    /// Score the genome under the cursor. Returns a report when this finished
    /// a generation and the next one has been bred.
    pub fn evaluate_next(&mut self) -> Result<Option<EpochReport>, EngineError> {
        let genome = &mut self.population[self.cursor];
        let configuration = dice::configuration_string(&genome.genes)?;
        let score = self.evaluator.score(&configuration)?;
        genome.fitness = f64::from(score);

        self.running_best_score = self.running_best_score.max(score);
        self.running_score_total += u64::from(score);
        self.cursor += 1;

        if self.cursor < self.config.population_size {
            return Ok(None);
        }

        let evaluated_generation = self.generation;
        let best_score = self.running_best_score;
        let average_score = self.running_score_total as f64 / self.config.population_size as f64;

        self.last_generation_best_score = best_score;
        self.running_best_score = 0;
        self.running_score_total = 0;
        self.cursor = 0;

        self.epoch()?;

        Ok(Some(EpochReport {
            generation: evaluated_generation,
            best_score,
            average_score,
            best_configuration: self.best_configuration.clone(),
        }))
    }

    /// Run `evaluations` single-genome steps, collecting any epoch reports
    pub fn run(&mut self, evaluations: usize) -> Result<Vec<EpochReport>, EngineError> {
        let mut reports = Vec::new();
        for _ in 0..evaluations {
            if let Some(report) = self.evaluate_next()? {
                reports.push(report);
            }
        }
        Ok(reports)
    }

    fn epoch(&mut self) -> Result<(), EngineError> {
        self.update_fitness_properties()?;
        let sigma = selection::sigma_scale(&mut self.population);
        if sigma == 0.0 {
            tracing::warn!(
                generation = self.generation,
                "Population fitness has no spread, selection falls back to the first genome"
            );
        }
        self.update_fitness_properties()?;

        tracing::debug!(
            generation = self.generation,
            total_fitness = self.stats.total,
            best_fitness = self.stats.best,
            best_index = self.stats.best_index,
            sigma,
            "Breeding next generation"
        );

        let size = self.config.population_size;
        let mut next: Population = Vec::with_capacity(size);

        if self.config.elite_count > 0 {
            next.extend(
                selection::elites(&self.population, self.config.elite_count, self.config.elite_copies)
                    .into_iter()
                    .map(|elite| Genome::new(elite.genes)),
            );
        }

        while next.len() < size {
            let mum = selection::roulette(&self.population, self.stats.total, &mut self.rng);
            let dad = selection::roulette(&self.population, self.stats.total, &mut self.rng);
            let mum_genes = &self.population[mum].genes;
            let dad_genes = &self.population[dad].genes;

            let (mut baby1, mut baby2) =
                if mum == dad || self.rng.random::<f64>() > self.config.crossover_rate {
                    (mum_genes.clone(), dad_genes.clone())
                } else {
                    operators::crossover_pbx(mum_genes, dad_genes, &mut self.rng).ok_or_else(|| {
                        EngineError::InvalidPopulation(format!(
                            "genomes {} and {} cannot be recombined",
                            mum, dad
                        ))
                    })?
                };

            operators::mutate(&mut baby1, self.config.mutation_rate, &mut self.rng);
            operators::mutate(&mut baby2, self.config.mutation_rate, &mut self.rng);

            next.push(Genome::new(baby1));
            if next.len() < size {
                next.push(Genome::new(baby2));
            }
        }

        self.population = next;
        self.generation += 1;
        Ok(())
    }

    fn update_fitness_properties(&mut self) -> Result<(), EngineError> {
        self.stats = selection::normalize(&mut self.population);
        self.best_configuration =
            dice::configuration_string(&self.population[self.stats.best_index].genes)?;
        Ok(())
    }

    /// Best layout found at the last epoch boundary
    pub fn best_configuration(&self) -> &str {
        &self.best_configuration
    }

    pub fn generation_stats(&self) -> GenerationStats {
        GenerationStats {
            generation: self.generation,
            last_generation_best_score: self.last_generation_best_score,
        }
    }

    /// Choose which board the driver shows; the search itself ignores it
    pub fn set_board_for_display(&mut self, configuration: impl Into<String>) {
        self.display_configuration = configuration.into();
    }

    pub fn display_configuration(&self) -> &str {
        &self.display_configuration
    }

    /// Solve the display board, listing every scoring word
    pub fn display_evaluation(&mut self) -> Result<Evaluation, GridError> {
        self.evaluator.evaluate(&self.display_configuration)
    }

    pub fn population(&self) -> &[Genome] {
        &self.population
    }

    pub fn config(&self) -> &GaConfig {
        &self.config
    }
}

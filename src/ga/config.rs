use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::utils::dice::dice_for_width;

#[derive(Debug, Error, PartialEq, Clone)]
pub enum ConfigError {
    #[error("Population size must be at least 1")]
    EmptyPopulation,

    #[error("{name} must be within [0, 1], got {value}")]
    RateOutOfRange { name: &'static str, value: f64 },

    #[error("No dice set for a {width}x{width} board")]
    UnsupportedWidth { width: usize },

    #[error("{elites} elite slots leave no room for offspring in a population of {population_size}")]
    TooManyElites {
        elites: usize,
        population_size: usize,
    },
}

/// Static GA tunables, fixed at construction
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GaConfig {
    pub population_size: usize,
    pub crossover_rate: f64,
    pub mutation_rate: f64,
    pub board_width: usize,
    /// Fittest genomes copied unchanged into the next generation (0 disables)
    pub elite_count: usize,
    pub elite_copies: usize,
}

impl Default for GaConfig {
    fn default() -> Self {
        Self {
            population_size: 32,
            crossover_rate: 0.75,
            mutation_rate: 0.2,
            board_width: 4,
            elite_count: 0,
            elite_copies: 1,
        }
    }
}

impl GaConfig {
    /// Genes per genome, one per board cell
    pub fn genome_length(&self) -> usize {
        self.board_width * self.board_width
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.population_size == 0 {
            return Err(ConfigError::EmptyPopulation);
        }

        for (name, value) in [
            ("crossover_rate", self.crossover_rate),
            ("mutation_rate", self.mutation_rate),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(ConfigError::RateOutOfRange { name, value });
            }
        }

        if dice_for_width(self.board_width).is_none() {
            return Err(ConfigError::UnsupportedWidth {
                width: self.board_width,
            });
        }

        let elites = self.elite_count * self.elite_copies;
        if elites >= self.population_size {
            return Err(ConfigError::TooManyElites {
                elites,
                population_size: self.population_size,
            });
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = GaConfig::default();
        assert_eq!(config.validate(), Ok(()));
        assert_eq!(config.genome_length(), 16);
    }

    #[test]
    fn test_rejects_empty_population() {
        let config = GaConfig {
            population_size: 0,
            ..GaConfig::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::EmptyPopulation));
    }

    #[test]
    fn test_rejects_rates_out_of_range() {
        let config = GaConfig {
            mutation_rate: 1.5,
            ..GaConfig::default()
        };
        assert_eq!(
            config.validate(),
            Err(ConfigError::RateOutOfRange {
                name: "mutation_rate",
                value: 1.5
            })
        );

        let config = GaConfig {
            crossover_rate: f64::NAN,
            ..GaConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::RateOutOfRange {
                name: "crossover_rate",
                ..
            })
        ));
    }

    #[test]
    fn test_rejects_width_without_dice() {
        let config = GaConfig {
            board_width: 5,
            ..GaConfig::default()
        };
        assert_eq!(
            config.validate(),
            Err(ConfigError::UnsupportedWidth { width: 5 })
        );
    }

    #[test]
    fn test_rejects_elites_filling_population() {
        let config = GaConfig {
            population_size: 4,
            elite_count: 2,
            elite_copies: 2,
            ..GaConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::TooManyElites { elites: 4, .. })
        ));
    }
}

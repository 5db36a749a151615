use anyhow::{Context, Result};
use serde::Deserialize;
use std::env;
use std::str::FromStr;
use std::time::Duration;

use boggle_ga::ga::GaConfig;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub dictionary: DictionaryConfig,
    pub ga: GaConfig,
    pub driver: DriverConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DictionaryConfig {
    pub path: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DriverConfig {
    /// Fixed RNG seed; a fresh OS seed is used when absent
    pub seed: Option<u64>,
    pub evaluations_per_tick: usize,
    pub tick_interval_ms: u64,
    /// Stop after this many generations; 0 runs until interrupted
    pub max_generations: u32,
}

impl DriverConfig {
    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms.max(1))
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();

        let dictionary = DictionaryConfig {
            path: env::var("DICTIONARY_PATH")
                .unwrap_or_else(|_| "./dictionary.txt".to_string()),
        };

        let defaults = GaConfig::default();
        let ga = GaConfig {
            population_size: parse_or("POPULATION_SIZE", defaults.population_size)?,
            crossover_rate: parse_or("CROSSOVER_RATE", defaults.crossover_rate)?,
            mutation_rate: parse_or("MUTATION_RATE", defaults.mutation_rate)?,
            board_width: parse_or("BOARD_WIDTH", defaults.board_width)?,
            elite_count: parse_or("ELITE_COUNT", defaults.elite_count)?,
            elite_copies: parse_or("ELITE_COPIES", defaults.elite_copies)?,
        };
        ga.validate().context("Invalid GA settings")?;

        let driver = DriverConfig {
            seed: match env::var("GA_SEED") {
                Ok(seed) => Some(seed.parse().context("GA_SEED must be a number")?),
                Err(_) => None,
            },
            evaluations_per_tick: parse_or("EVALUATIONS_PER_TICK", ga.population_size)?,
            tick_interval_ms: parse_or("TICK_INTERVAL_MS", 16)?,
            max_generations: parse_or("MAX_GENERATIONS", 0)?,
        };

        Ok(Config {
            dictionary,
            ga,
            driver,
        })
    }
}

/// Read `key` from the environment, falling back to `default` when unset
fn parse_or<T>(key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match env::var(key) {
        Ok(value) => value
            .trim()
            .parse()
            .with_context(|| format!("{} must be a valid {}", key, std::any::type_name::<T>())),
        Err(_) => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_or_uses_default_when_unset() {
        let value: usize = parse_or("BOGGLE_GA_TEST_UNSET_VARIABLE", 7).unwrap();
        assert_eq!(value, 7);
    }

    #[test]
    fn test_parse_or_reports_bad_values() {
        env::set_var("BOGGLE_GA_TEST_BAD_RATE", "lots");
        let result: Result<f64> = parse_or("BOGGLE_GA_TEST_BAD_RATE", 0.5);
        let message = format!("{:#}", result.unwrap_err());
        assert!(message.contains("BOGGLE_GA_TEST_BAD_RATE must be a valid f64"));
        env::remove_var("BOGGLE_GA_TEST_BAD_RATE");
    }

    #[test]
    fn test_parse_or_reads_set_values() {
        env::set_var("BOGGLE_GA_TEST_WIDTH", " 4 ");
        let value: usize = parse_or("BOGGLE_GA_TEST_WIDTH", 0).unwrap();
        assert_eq!(value, 4);
        env::remove_var("BOGGLE_GA_TEST_WIDTH");
    }

    #[test]
    fn test_tick_interval_is_never_zero() {
        let driver = DriverConfig {
            seed: None,
            evaluations_per_tick: 1,
            tick_interval_ms: 0,
            max_generations: 0,
        };
        assert_eq!(driver.tick_interval(), Duration::from_millis(1));
    }
}

use thiserror::Error;

use super::config::ConfigError;
use crate::game::GridError;
use crate::utils::dice::DiceError;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("Invalid GA configuration: {source}")]
    Config {
        #[from]
        source: ConfigError,
    },

    #[error("Board evaluation failed: {source}")]
    Grid {
        #[from]
        source: GridError,
    },

    #[error("Dice lookup failed: {source}")]
    Dice {
        #[from]
        source: DiceError,
    },

    #[error("Evaluator solves {actual}x{actual} boards but the GA is configured for {expected}x{expected}")]
    EvaluatorWidth { expected: usize, actual: usize },

    #[error("Invalid population: {0}")]
    InvalidPopulation(String),
}

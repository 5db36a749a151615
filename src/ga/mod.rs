//! Genetic search over board layouts.
//!
//! The [`Engine`] scores one genome per call through an [`Evaluator`] and, once
//! the whole population has been scored, breeds the next generation with
//! sigma-scaled roulette selection, position-based crossover and mutation.
//!
//! [`Evaluator`]: crate::game::Evaluator

pub mod config;
pub mod engine;
pub mod error;
pub mod operators;
pub mod selection;

pub use config::{ConfigError, GaConfig};
pub use engine::{Engine, EpochReport, GenerationStats};
pub use error::EngineError;

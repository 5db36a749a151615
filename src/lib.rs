//! Boggle board solver and a genetic search for high-scoring board layouts.
//!
//! [`dictionary::Dictionary`] holds the word list as a prefix tree,
//! [`game::Solver`] finds and scores every word on a board, and [`ga::Engine`]
//! evolves dice layouts using the solver as its fitness function.

pub mod dictionary;
pub mod ga;
pub mod game;
pub mod models;
pub mod utils;

pub use dictionary::{Dictionary, DictionaryError};
pub use ga::{Engine, EngineError, EpochReport, GaConfig, GenerationStats};
pub use game::{Evaluator, Grid, GridError, Solver};
pub use models::{Evaluation, Gene, Genome, SolutionWord};

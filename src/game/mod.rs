// Board evaluation: grid parsing, word scoring and the trie-guided search

pub mod grid;
pub mod scorer;
pub mod solver;

pub use grid::{Grid, GridError, QU_TILE};
pub use scorer::Scorer;
pub use solver::{Evaluator, Solver};

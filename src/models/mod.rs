pub mod genome;
pub mod solution;

pub use genome::{Gene, Genome, Population};
pub use solution::{Evaluation, SolutionWord};

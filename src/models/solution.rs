use serde::{Deserialize, Serialize};

/// A word found on the board together with the points it earned
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SolutionWord {
    pub word: String,
    pub score: u32,
}

/// Result of solving one board configuration.
///
/// `words` is in discovery order and omits words that score zero, though
/// those still count towards deduplication.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Evaluation {
    pub score: u32,
    pub words: Vec<SolutionWord>,
}

use std::collections::HashSet;
use std::sync::Arc;

use crate::dictionary::{Dictionary, NodeId};
use crate::game::grid::{Grid, GridError, Position, Tile, DIRECTIONS};
use crate::game::scorer::Scorer;
use crate::models::{Evaluation, SolutionWord};

/// Anything that can score a board configuration.
///
/// The GA engine only sees this trait, so tests can drive it with fixed scores.
pub trait Evaluator {
    /// Side length of the boards this evaluator accepts
    fn width(&self) -> usize;

    /// Full solve: total score plus every scoring word in discovery order
    fn evaluate(&mut self, configuration: &str) -> Result<Evaluation, GridError>;

    /// Total score only
    fn score(&mut self, configuration: &str) -> Result<u32, GridError> {
        Ok(self.evaluate(configuration)?.score)
    }
}

/// Per-evaluation scratch state, reset before every top-level solve
#[derive(Debug)]
struct Scratch {
    visited: Vec<bool>,
    /// Terminal nodes already scored; one node per dictionary word
    found: HashSet<NodeId>,
}

impl Scratch {
    fn new(cells: usize) -> Self {
        Self {
            visited: vec![false; cells],
            found: HashSet::new(),
        }
    }

    fn reset(&mut self) {
        self.visited.fill(false);
        self.found.clear();
    }
}

struct Tally {
    score: u32,
    words: Option<Vec<SolutionWord>>,
}

/// Depth-first board solver walking the dictionary trie in lock-step with
/// grid adjacency.
///
/// Holds mutable scratch, so one solver serves one evaluation at a time. The
/// dictionary itself is shared.
pub struct Solver {
    dictionary: Arc<Dictionary>,
    width: usize,
    scratch: Scratch,
}

impl Solver {
    pub fn new(dictionary: Arc<Dictionary>, width: usize) -> Self {
        Self {
            dictionary,
            width,
            scratch: Scratch::new(width * width),
        }
    }

    pub fn dictionary(&self) -> &Dictionary {
        &self.dictionary
    }

    fn solve(&mut self, configuration: &str, collect_words: bool) -> Result<Evaluation, GridError> {
        let grid = Grid::parse(configuration, self.width)?;
        self.scratch.reset();

        let mut tally = Tally {
            score: 0,
            words: collect_words.then(Vec::new),
        };
        let root = self.dictionary.root();

        for start in grid.positions() {
            search(&self.dictionary, &grid, start, root, &mut self.scratch, &mut tally);
            debug_assert!(self.scratch.visited.iter().all(|v| !v));
        }

        tracing::trace!(configuration, score = tally.score, "Solved board");

        Ok(Evaluation {
            score: tally.score,
            words: tally.words.unwrap_or_default(),
        })
    }
}

impl Evaluator for Solver {
    fn width(&self) -> usize {
        self.width
    }

    fn evaluate(&mut self, configuration: &str) -> Result<Evaluation, GridError> {
        self.solve(configuration, true)
    }

    fn score(&mut self, configuration: &str) -> Result<u32, GridError> {
        Ok(self.solve(configuration, false)?.score)
    }
}

/// Follow the trie edges spelled by one tile
#[inline]
fn step(dictionary: &Dictionary, node: NodeId, tile: Tile) -> Option<NodeId> {
    match tile {
        Tile::Letter(c) => dictionary.child(node, c),
        Tile::Qu => dictionary
            .child(node, b'q')
            .and_then(|q| dictionary.child(q, b'u')),
    }
}

fn search(
    dictionary: &Dictionary,
    grid: &Grid,
    pos: Position,
    node: NodeId,
    scratch: &mut Scratch,
    tally: &mut Tally,
) {
    let cell = grid.index(pos);
    if scratch.visited[cell] {
        return;
    }
    let Some(next) = step(dictionary, node, grid.tile(pos)) else {
        return;
    };

    scratch.visited[cell] = true;

    for offset in DIRECTIONS {
        if let Some(neighbour) = grid.neighbour(pos, offset) {
            search(dictionary, grid, neighbour, next, scratch, tally);
        }
    }

    // Words are recorded after their extensions, so longer words come first
    if let Some(word) = dictionary.word(next) {
        if scratch.found.insert(next) {
            let score = Scorer::word_score(word.len());
            tally.score += score;
            if score > 0 {
                if let Some(words) = tally.words.as_mut() {
                    words.push(SolutionWord {
                        word: word.to_string(),
                        score,
                    });
                }
            }
        }
    }

    scratch.visited[cell] = false;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn solver(words: &[&str], width: usize) -> Solver {
        let dictionary = Dictionary::from_words(words).unwrap();
        Solver::new(Arc::new(dictionary), width)
    }

    fn word(word: &str, score: u32) -> SolutionWord {
        SolutionWord {
            word: word.to_string(),
            score,
        }
    }

    #[test]
    fn test_single_reachable_word() {
        let mut solver = solver(&["sat"], 2);
        let result = solver.evaluate("atse").unwrap();
        assert_eq!(result.score, 1);
        assert_eq!(result.words, vec![word("SAT", 1)]);
    }

    #[test]
    fn test_word_along_path_is_found() {
        // s t o
        // z z n
        // z z e
        let mut solver = solver(&["stone", "notes"], 3);
        let result = solver.evaluate("STOZZNZZE").unwrap();
        assert_eq!(result.score, 2);
        assert_eq!(result.words, vec![word("STONE", 2)]);
    }

    #[test]
    fn test_duplicate_paths_score_once() {
        // c t
        // a a  -> "cat" through either a
        let mut solver = solver(&["cat"], 2);
        let result = solver.evaluate("ctaa").unwrap();
        assert_eq!(result.score, 1);
        assert_eq!(result.words, vec![word("CAT", 1)]);
    }

    #[test]
    fn test_longer_words_are_recorded_first() {
        let mut solver = solver(&["sat", "sate"], 2);
        let result = solver.evaluate("atse").unwrap();
        assert_eq!(result.score, 2);
        assert_eq!(result.words, vec![word("SATE", 1), word("SAT", 1)]);
    }

    #[test]
    fn test_short_words_are_not_listed() {
        let mut solver = solver(&["at", "sat"], 2);
        let result = solver.evaluate("atse").unwrap();
        assert_eq!(result.score, 1);
        assert_eq!(result.words, vec![word("SAT", 1)]);
    }

    #[test]
    fn test_cells_are_not_reused_within_a_word() {
        let mut solver = solver(&["aba"], 2);
        let result = solver.evaluate("abxy").unwrap();
        assert_eq!(result.score, 0);
        assert!(result.words.is_empty());
    }

    #[test]
    fn test_qu_tile_consumes_two_letters() {
        // Qu o
        // t  e
        let mut solver = solver(&["quote", "qote"], 2);
        let result = solver.evaluate("#ote").unwrap();
        assert_eq!(result.score, 2);
        assert_eq!(result.words, vec![word("QUOTE", 2)]);
    }

    #[test]
    fn test_qu_tile_needs_both_edges() {
        let mut solver = solver(&["qat", "qi"], 2);
        assert_eq!(solver.evaluate("#ati").unwrap(), Evaluation::default());
    }

    #[test]
    fn test_evaluation_is_deterministic() {
        let mut solver = solver(
            &["rate", "tear", "tare", "rat", "tar", "art", "era", "ear", "eat", "tea", "ate", "treat", "arete"],
            4,
        );
        let first = solver.evaluate("RATEEATRTREAAERT").unwrap();
        let second = solver.evaluate("ratee atrtr eaaert".replace(' ', "").as_str()).unwrap();
        assert!(first.score > 0);
        assert_eq!(first, second);
    }

    #[test]
    fn test_score_matches_full_evaluation() {
        let mut solver = solver(&["rate", "tear", "rat", "tea", "treat", "eater"], 4);
        let config = "RATEEATRTREAAERT";
        let full = solver.evaluate(config).unwrap();
        assert_eq!(solver.score(config).unwrap(), full.score);
        assert_eq!(full.score, full.words.iter().map(|w| w.score).sum::<u32>());
    }

    #[test]
    fn test_malformed_configuration_is_rejected() {
        let mut solver = solver(&["sat"], 2);
        assert_eq!(
            solver.evaluate("ats"),
            Err(GridError::InvalidLength {
                expected: 4,
                actual: 3
            })
        );
        assert!(matches!(
            solver.score("at-e"),
            Err(GridError::InvalidCharacter { character: '-', .. })
        ));
        // The solver is still usable afterwards
        assert_eq!(solver.evaluate("atse").unwrap().score, 1);
    }
}

use std::path::Path;

use thiserror::Error;
use tokio::fs;

/// Index of a node in the dictionary arena
pub type NodeId = u32;

/// Number of child slots per node, one per lowercase ASCII letter
pub const ALPHABET_SIZE: usize = 26;

const ROOT: NodeId = 0;
// The root is never anyone's child, so its id doubles as the empty slot marker.
const NO_CHILD: NodeId = ROOT;

#[derive(Debug, Error)]
pub enum DictionaryError {
    #[error("Failed to read word list {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Word {word:?} contains characters outside a-z")]
    InvalidWord { word: String },
}

#[derive(Debug, Clone)]
struct TrieNode {
    children: [NodeId; ALPHABET_SIZE],
    /// Complete word ending at this node, present only on terminal nodes
    word: Option<Box<str>>,
}

impl TrieNode {
    fn new() -> Self {
        Self {
            children: [NO_CHILD; ALPHABET_SIZE],
            word: None,
        }
    }
}

/// Prefix tree over the word list, stored as an arena of nodes.
///
/// Built once at start-up and read-only afterwards; solvers walk it edge by
/// edge through [`Dictionary::child`].
#[derive(Debug, Clone)]
pub struct Dictionary {
    nodes: Vec<TrieNode>,
    word_count: usize,
}

impl Default for Dictionary {
    fn default() -> Self {
        Self::empty()
    }
}

impl Dictionary {
    /// Load dictionary from a newline-delimited word list
    pub async fn load<P: AsRef<Path>>(path: P) -> Result<Self, DictionaryError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .await
            .map_err(|source| DictionaryError::Io {
                path: path.display().to_string(),
                source,
            })?;

        let dictionary = Self::from_lines(content.lines());
        tracing::info!("Loaded {} words into dictionary", dictionary.len());

        Ok(dictionary)
    }

    /// Create an empty dictionary (for testing)
    pub fn empty() -> Self {
        Self {
            nodes: vec![TrieNode::new()],
            word_count: 0,
        }
    }

    /// Build a dictionary from in-memory words, rejecting any malformed entry
    pub fn from_words<I, S>(words: I) -> Result<Self, DictionaryError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut dictionary = Self::empty();
        for word in words {
            dictionary.insert(word.as_ref())?;
        }
        Ok(dictionary)
    }

    fn from_lines<'a>(lines: impl Iterator<Item = &'a str>) -> Self {
        let mut dictionary = Self::empty();
        let mut skipped = 0usize;

        for line in lines.map(str::trim).filter(|line| !line.is_empty()) {
            if dictionary.insert(line).is_err() {
                skipped += 1;
            }
        }

        if skipped > 0 {
            tracing::warn!("Skipped {} dictionary lines with unsupported characters", skipped);
        }

        dictionary
    }

    /// Insert a word, returning `false` when it was already present
    pub fn insert(&mut self, word: &str) -> Result<bool, DictionaryError> {
        if word.is_empty() || !word.bytes().all(|b| b.is_ascii_alphabetic()) {
            return Err(DictionaryError::InvalidWord {
                word: word.to_string(),
            });
        }

        let mut node = ROOT;
        for byte in word.bytes() {
            let slot = letter_index(byte);
            let next = self.nodes[node as usize].children[slot];
            node = if next == NO_CHILD {
                let id = self.nodes.len() as NodeId;
                self.nodes.push(TrieNode::new());
                self.nodes[node as usize].children[slot] = id;
                id
            } else {
                next
            };
        }

        let terminal = &mut self.nodes[node as usize];
        if terminal.word.is_some() {
            return Ok(false);
        }
        terminal.word = Some(word.to_ascii_uppercase().into_boxed_str());
        self.word_count += 1;
        Ok(true)
    }

    /// Entry node for traversal
    pub fn root(&self) -> NodeId {
        ROOT
    }

    /// Follow the edge labelled `letter` (ASCII, any case) out of `node`
    #[inline]
    pub fn child(&self, node: NodeId, letter: u8) -> Option<NodeId> {
        if !letter.is_ascii_alphabetic() {
            return None;
        }
        match self.nodes[node as usize].children[letter_index(letter)] {
            NO_CHILD => None,
            next => Some(next),
        }
    }

    /// The word terminating at `node`, if any
    #[inline]
    pub fn word(&self, node: NodeId) -> Option<&str> {
        self.nodes[node as usize].word.as_deref()
    }

    /// Check if a word exists in the dictionary
    pub fn contains(&self, word: &str) -> bool {
        word.bytes()
            .try_fold(self.root(), |node, letter| self.child(node, letter))
            .and_then(|node| self.word(node))
            .is_some()
    }

    /// Get the number of words in the dictionary
    pub fn len(&self) -> usize {
        self.word_count
    }

    /// Check if dictionary is empty
    pub fn is_empty(&self) -> bool {
        self.word_count == 0
    }
}

#[inline]
fn letter_index(letter: u8) -> usize {
    (letter.to_ascii_lowercase() - b'a') as usize
}

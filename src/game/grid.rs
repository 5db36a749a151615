use std::fmt;

use thiserror::Error;

/// Configuration character for the combined "Qu" tile
pub const QU_TILE: char = '#';

/// Neighbour offsets as (row, col) deltas, in search order
pub const DIRECTIONS: [(isize, isize); 8] = [
    (0, 1),
    (-1, 0),
    (0, -1),
    (1, 0),
    (-1, -1),
    (1, 1),
    (-1, 1),
    (1, -1),
];

#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum GridError {
    #[error("Configuration has {actual} characters, expected {expected}")]
    InvalidLength { expected: usize, actual: usize },

    #[error("Unsupported character {character:?} at position {index}")]
    InvalidCharacter { character: char, index: usize },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Position {
    pub row: usize,
    pub col: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tile {
    /// Lowercase ASCII letter
    Letter(u8),
    /// Two letters in one cell, matched as `q` then `u`
    Qu,
}

/// A square board parsed from a configuration string, row-major
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    width: usize,
    tiles: Vec<Tile>,
}

impl Grid {
    /// Parse a `width * width` configuration. Letters are case-folded and
    /// [`QU_TILE`] marks the Qu tile; anything else is rejected.
    pub fn parse(configuration: &str, width: usize) -> Result<Self, GridError> {
        let expected = width * width;
        let actual = configuration.chars().count();
        if actual != expected {
            return Err(GridError::InvalidLength { expected, actual });
        }

        let tiles = configuration
            .chars()
            .enumerate()
            .map(|(index, character)| match character {
                QU_TILE => Ok(Tile::Qu),
                c if c.is_ascii_alphabetic() => Ok(Tile::Letter(c.to_ascii_lowercase() as u8)),
                _ => Err(GridError::InvalidCharacter { character, index }),
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self { width, tiles })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn tile(&self, pos: Position) -> Tile {
        self.tiles[self.index(pos)]
    }

    #[inline]
    pub fn index(&self, pos: Position) -> usize {
        pos.row * self.width + pos.col
    }

    /// Cell reached from `pos` by `offset`, if it is on the board
    #[inline]
    pub fn neighbour(&self, pos: Position, (dr, dc): (isize, isize)) -> Option<Position> {
        let row = pos.row.checked_add_signed(dr)?;
        let col = pos.col.checked_add_signed(dc)?;
        (row < self.width && col < self.width).then_some(Position { row, col })
    }

    pub fn positions(&self) -> impl Iterator<Item = Position> + '_ {
        (0..self.width).flat_map(move |row| (0..self.width).map(move |col| Position { row, col }))
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (row, cells) in self.tiles.chunks(self.width.max(1)).enumerate() {
            if row > 0 {
                writeln!(f)?;
            }
            let line: Vec<String> = cells
                .iter()
                .map(|tile| match tile {
                    Tile::Letter(c) => (*c as char).to_ascii_uppercase().to_string(),
                    Tile::Qu => "Qu".to_string(),
                })
                .collect();
            write!(f, "{}", line.join(" "))?;
        }
        Ok(())
    }
}

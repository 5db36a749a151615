use thiserror::Error;

use crate::game::grid::QU_TILE;
use crate::models::Gene;

/// Faces on every die
pub const FACES_PER_DIE: usize = 6;

/// The sixteen dice of a standard 4x4 set. `#` is the combined "Qu" face.
pub static STANDARD_DICE: [[char; FACES_PER_DIE]; 16] = [
    ['R', 'I', 'F', 'O', 'B', 'X'],
    ['I', 'F', 'E', 'H', 'E', 'Y'],
    ['D', 'E', 'N', 'O', 'W', 'S'],
    ['U', 'T', 'O', 'K', 'N', 'D'],
    ['H', 'M', 'S', 'R', 'A', 'O'],
    ['L', 'U', 'P', 'E', 'T', 'S'],
    ['A', 'C', 'I', 'T', 'O', 'A'],
    ['Y', 'L', 'G', 'K', 'U', 'E'],
    [QU_TILE, 'B', 'M', 'J', 'O', 'A'],
    ['E', 'H', 'I', 'S', 'P', 'N'],
    ['V', 'E', 'T', 'I', 'G', 'N'],
    ['B', 'A', 'L', 'I', 'Y', 'T'],
    ['E', 'Z', 'A', 'V', 'N', 'D'],
    ['R', 'A', 'L', 'E', 'S', 'C'],
    ['U', 'W', 'I', 'L', 'R', 'G'],
    ['P', 'A', 'C', 'E', 'M', 'D'],
];

#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum DiceError {
    #[error("No die with id {dice_id} in a set of {available}")]
    UnknownDie { dice_id: usize, available: usize },

    #[error("Face {face_id} is out of range for die {dice_id} (a die has 6 faces)")]
    FaceOutOfRange { dice_id: usize, face_id: usize },
}

/// Dice table matching a board of `width` x `width` cells, if one exists
pub fn dice_for_width(width: usize) -> Option<&'static [[char; FACES_PER_DIE]]> {
    (width * width == STANDARD_DICE.len()).then_some(&STANDARD_DICE[..])
}

/// Letter shown by a gene's die with its chosen face up
pub fn letter(gene: &Gene) -> Result<char, DiceError> {
    let die = STANDARD_DICE
        .get(gene.dice_id)
        .ok_or(DiceError::UnknownDie {
            dice_id: gene.dice_id,
            available: STANDARD_DICE.len(),
        })?;

    die.get(gene.face_id)
        .copied()
        .ok_or(DiceError::FaceOutOfRange {
            dice_id: gene.dice_id,
            face_id: gene.face_id,
        })
}

/// Board configuration string for a sequence of genes, in slot order
pub fn configuration_string(genes: &[Gene]) -> Result<String, DiceError> {
    genes.iter().map(letter).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gene(dice_id: usize, face_id: usize) -> Gene {
        Gene { dice_id, face_id }
    }

    #[test]
    fn test_letter_lookup() {
        assert_eq!(letter(&gene(0, 0)), Ok('R'));
        assert_eq!(letter(&gene(15, 5)), Ok('D'));
        assert_eq!(letter(&gene(8, 0)), Ok(QU_TILE));
    }

    #[test]
    fn test_letter_lookup_out_of_range() {
        assert_eq!(
            letter(&gene(3, 6)),
            Err(DiceError::FaceOutOfRange {
                dice_id: 3,
                face_id: 6
            })
        );
        assert!(matches!(
            letter(&gene(16, 0)),
            Err(DiceError::UnknownDie { dice_id: 16, .. })
        ));
    }

    #[test]
    fn test_configuration_string_follows_slot_order() {
        let genes: Vec<Gene> = (0..16).rev().map(|id| gene(id, 1)).collect();
        let config = configuration_string(&genes).unwrap();
        assert_eq!(config, "AWAZAEHBLCUMTEFI");
    }

    #[test]
    fn test_only_standard_width_has_dice() {
        assert!(dice_for_width(4).is_some());
        assert!(dice_for_width(5).is_none());
        assert!(dice_for_width(2).is_none());
    }
}

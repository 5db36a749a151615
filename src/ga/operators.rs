use rand::Rng;
use smallvec::{smallvec, SmallVec};

use crate::models::Gene;
use crate::utils::dice::FACES_PER_DIE;

/// Inline capacity for per-crossover bookkeeping; covers a standard 4x4 board
const INLINE_GENES: usize = 16;

/// Slots fixed from one parent during position-based crossover
pub type Positions = SmallVec<[usize; INLINE_GENES]>;

/// Which mutation operator was applied to a chromosome
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mutation {
    /// Two slots swapped their genes
    Interchange,
    /// One slot turned its die to a new face
    Face,
}

/// Position-based crossover.
///
/// Child one keeps `mum`'s genes at a random set of slots and takes the rest
/// from `dad` in his order, skipping dice already placed. Child two is the
/// mirror image. Both stay dice permutations when the parents are. Returns
/// `None` if the parents are not permutations of the same dice.
pub fn crossover_pbx(
    mum: &[Gene],
    dad: &[Gene],
    rng: &mut impl Rng,
) -> Option<(Vec<Gene>, Vec<Gene>)> {
    if mum.len() != dad.len() {
        return None;
    }
    if mum.len() < 2 {
        return Some((mum.to_vec(), dad.to_vec()));
    }

    let positions = pbx_positions(mum.len(), rng);
    let baby1 = fill_child(mum, dad, &positions)?;
    let baby2 = fill_child(dad, mum, &positions)?;
    Some((baby1, baby2))
}

/// Start somewhere in `[0, len - 1)` and hop forward by `[1, len - pos]` until
/// past the end
pub fn pbx_positions(length: usize, rng: &mut impl Rng) -> Positions {
    let mut positions = Positions::new();
    let mut pos = rng.random_range(0..length - 1);
    while pos < length {
        positions.push(pos);
        pos += rng.random_range(1..=length - pos);
    }
    positions
}

fn fill_child(fixed_parent: &[Gene], order_parent: &[Gene], positions: &[usize]) -> Option<Vec<Gene>> {
    let length = fixed_parent.len();
    let mut child: SmallVec<[Option<Gene>; INLINE_GENES]> = smallvec![None; length];
    let mut placed: SmallVec<[bool; INLINE_GENES]> = smallvec![false; length];

    for &pos in positions {
        let gene = fixed_parent[pos];
        child[pos] = Some(gene);
        *placed.get_mut(gene.dice_id)? = true;
    }

    let mut donors = order_parent
        .iter()
        .filter(|gene| !placed.get(gene.dice_id).copied().unwrap_or(true));
    for slot in child.iter_mut().filter(|slot| slot.is_none()) {
        *slot = Some(*donors.next()?);
    }

    child.into_iter().collect()
}

/// Swap the genes of two distinct random slots
pub fn mutate_interchange(genes: &mut [Gene], rng: &mut impl Rng) {
    if genes.len() < 2 {
        return;
    }
    let first = rng.random_range(0..genes.len());
    let mut second = rng.random_range(0..genes.len());
    while second == first {
        second = rng.random_range(0..genes.len());
    }
    genes.swap(first, second);
}

/// Turn one random die to a random face
pub fn mutate_face(genes: &mut [Gene], rng: &mut impl Rng) {
    if genes.is_empty() {
        return;
    }
    let pos = rng.random_range(0..genes.len());
    genes[pos].face_id = rng.random_range(0..FACES_PER_DIE);
}

/// Pick one of the two operators with even odds and apply it with
/// probability `rate`
pub fn mutate(genes: &mut [Gene], rate: f64, rng: &mut impl Rng) -> Option<Mutation> {
    let operator = if rng.random_range(0..2) == 0 {
        Mutation::Interchange
    } else {
        Mutation::Face
    };
    if rng.random::<f64>() > rate {
        return None;
    }

    match operator {
        Mutation::Interchange => mutate_interchange(genes, rng),
        Mutation::Face => mutate_face(genes, rng),
    }
    Some(operator)
}

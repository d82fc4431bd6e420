//! Random move sequences for shuffling the puzzle.

use rand::seq::IndexedRandom;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use sha2::Digest;
use strum::VariantArray;

use crate::{Axis, Direction, Lattice, Layer, Move, Timestamp};

/// Parameters to deterministically generate a shuffle.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct ScrambleParams {
    /// Number of moves.
    pub length: u32,
    /// Timestamp when the shuffle was requested.
    pub time: Timestamp,
    /// Random seed.
    pub seed: String,
}
impl ScrambleParams {
    /// Generates new parameters based on the current time and a random number.
    pub fn new(length: u32) -> Self {
        let random_u64: u64 = rand::rng().random();
        Self {
            length,
            time: Timestamp::now(),
            seed: random_u64.to_string(),
        }
    }

    /// Returns a random number generator seeded from the time and seed.
    pub fn rng(&self) -> rand_chacha::ChaCha12Rng {
        let mut sha256 = sha2::Sha256::new();
        sha256.update(self.time.to_string().as_bytes());
        sha256.update(self.seed.len().to_le_bytes());
        sha256.update(self.seed.as_bytes());
        let digest = sha256.finalize();

        let mut seed = [0_u8; 32];
        seed.copy_from_slice(&digest);
        rand_chacha::ChaCha12Rng::from_seed(seed)
    }

    /// Generates the full move sequence.
    pub fn generate(&self) -> Vec<Move> {
        let mut rng = self.rng();
        (0..self.length).map(|_| random_move(&mut rng)).collect()
    }

    /// Constructs a solved lattice and applies the shuffle to it instantly.
    pub fn scrambled_lattice(&self) -> ScrambledLattice {
        let moves = self.generate();
        let mut lattice = Lattice::new_solved();
        for &m in &moves {
            if let Err(e) = lattice.apply_move(m) {
                log::error!("shuffle move {m} failed: {e}");
            }
        }
        ScrambledLattice {
            params: self.clone(),
            moves,
            lattice,
        }
    }
}

/// Returns a uniformly random quarter turn: axis, layer, and direction are
/// each chosen independently.
pub fn random_move(rng: &mut impl Rng) -> Move {
    // The slices are nonempty, so `choose()` always succeeds.
    let axis = Axis::VARIANTS.choose(rng).copied().unwrap_or(Axis::X);
    let layer = Layer::VARIANTS.choose(rng).copied().unwrap_or(Layer::Middle);
    let direction = Direction::VARIANTS
        .choose(rng)
        .copied()
        .unwrap_or(Direction::Positive);
    Move::new(axis, layer, direction)
}

/// Output of shuffling a lattice instantly.
#[derive(Debug, Clone)]
pub struct ScrambledLattice {
    /// Parameters used to generate the shuffle.
    pub params: ScrambleParams,
    /// Moves applied.
    pub moves: Vec<Move>,
    /// Lattice after shuffling.
    pub lattice: Lattice,
}

#[cfg(test)]
mod tests {
    use itertools::Itertools;

    use super::*;

    #[test]
    fn test_scramble_is_deterministic() {
        let params = ScrambleParams::new(20);
        let a = params.generate();
        let b = params.clone().generate();
        assert_eq!(a.len(), 20);
        assert_eq!(a, b);
        assert_eq!(
            params.scrambled_lattice().lattice,
            params.scrambled_lattice().lattice
        );

        let other = ScrambleParams {
            seed: format!("{}x", params.seed),
            ..params
        };
        assert_ne!(other.generate(), a);
    }

    #[test]
    fn test_random_moves_cover_all_moves() {
        let params = ScrambleParams::new(2000);
        let seen = params.generate().into_iter().unique().count();
        assert_eq!(seen, 18);
    }
}

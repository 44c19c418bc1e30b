use std::str::FromStr;

use rand::seq::SliceRandom;
use rand::Rng;

use crate::error::Error;
use crate::facelet::{self, Facelets};
use crate::moves::{Move, ALL_MOVES};
use crate::state::CubeState;

/// Length of the scramble applied by [scramble].
pub const SCRAMBLE_LENGTH: usize = 20;

pub fn scramble_from_str(s: &str) -> Result<Vec<Move>, Error> {
    s.split_whitespace()
        .map(|word| Move::from_str(word.trim()))
        .collect()
}

pub fn scramble_to_str(s: &[Move]) -> String {
    s.iter()
        .map(Move::to_string)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Random walk over the 18 moves, never turning the same face twice in a row.
pub fn gen_scramble_with_rng<R: Rng + ?Sized>(length: usize, rng: &mut R) -> Vec<Move> {
    let mut scramble: Vec<Move> = Vec::with_capacity(length);
    while scramble.len() < length {
        let m = *ALL_MOVES.choose(rng).unwrap_or(&Move::U);
        if scramble.last().map_or(false, |last| last.is_same_layer(m)) {
            continue;
        }
        scramble.push(m);
    }
    scramble
}

pub fn gen_scramble(length: usize) -> Vec<Move> {
    gen_scramble_with_rng(length, &mut rand::thread_rng())
}

/// Apply a fresh scramble to the solved cube; returns the scramble and the resulting configuration.
pub fn scramble_with_rng<R: Rng + ?Sized>(length: usize, rng: &mut R) -> (Vec<Move>, Facelets) {
    let moves = gen_scramble_with_rng(length, rng);
    let state = CubeState::from(&facelet::solved()).apply_moves(&moves);
    (moves, Facelets::from(&state))
}

/// A scrambled configuration, ready to be painted or solved.
pub fn scramble() -> Facelets {
    scramble_with_rng(SCRAMBLE_LENGTH, &mut rand::thread_rng()).1
}

#[cfg(test)]
mod test {
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;
    use crate::moves::Move::*;

    #[test]
    fn test_scramble_from_str() {
        let m = vec![R, U, R3, U3, F, L3, D3, B2, R3, U3];
        assert_eq!(scramble_from_str("R U R' U' F L' D' B2 R' U'").unwrap(), m);
        assert!(scramble_from_str("R U X").is_err());
        assert!(scramble_from_str("").unwrap().is_empty());
    }

    #[test]
    fn test_scramble_to_str() {
        let m = vec![R, U, R3, U3, F, L3, D3, B2, R3, U3];
        assert_eq!(scramble_to_str(&m), "R U R' U' F L' D' B2 R' U'");
    }

    #[test]
    fn test_gen_scramble() {
        let ss = gen_scramble(20);
        assert_eq!(ss.len(), 20);
        for pair in ss.windows(2) {
            assert_ne!(pair[0].face(), pair[1].face());
        }
    }

    #[test]
    fn test_gen_scramble_seeded() {
        let a = gen_scramble_with_rng(25, &mut StdRng::seed_from_u64(7));
        let b = gen_scramble_with_rng(25, &mut StdRng::seed_from_u64(7));
        assert_eq!(a, b);
    }

    #[test]
    fn test_scramble_facelets() {
        let mut rng = StdRng::seed_from_u64(42);
        let (moves, fc) = scramble_with_rng(SCRAMBLE_LENGTH, &mut rng);
        assert_eq!(moves.len(), SCRAMBLE_LENGTH);
        assert!(fc.validate().is_ok());
        let state = CubeState::from(&fc);
        assert_eq!(CubeState::default().apply_moves(&moves), state);
        assert!(scramble().validate().is_ok());
    }
}

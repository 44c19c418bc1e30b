use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use self::Move::*;
use crate::constants::*;
use crate::error::Error;
use crate::facelet::Face;

/// Layer moves, Up, Right, Front, Down, Left, Back.
///
/// $ clockwise, $2 double, $3 counter-clockwise.
#[rustfmt::skip]
#[allow(clippy::upper_case_acronyms)]
#[derive(Debug, PartialEq, Eq, Hash, Clone, Copy, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Move {
    U, U2, U3,
    R, R2, R3,
    F, F2, F3,
    D, D2, D3,
    L, L2, L3,
    B, B2, B3,
}

#[rustfmt::skip]
pub const ALL_MOVES: [Move; N_MOVE] = [
    U, U2, U3,
    R, R2, R3,
    F, F2, F3,
    D, D2, D3,
    L, L2, L3,
    B, B2, B3,
];

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            U3 => write!(f, "U'"),
            D3 => write!(f, "D'"),
            R3 => write!(f, "R'"),
            L3 => write!(f, "L'"),
            F3 => write!(f, "F'"),
            B3 => write!(f, "B'"),
            _ => write!(f, "{:?}", self),
        }
    }
}

impl FromStr for Move {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "R" => Ok(R),
            "R'" => Ok(R3),
            "R2" => Ok(R2),
            "L" => Ok(L),
            "L'" => Ok(L3),
            "L2" => Ok(L2),
            "U" => Ok(U),
            "U'" => Ok(U3),
            "U2" => Ok(U2),
            "D" => Ok(D),
            "D'" => Ok(D3),
            "D2" => Ok(D2),
            "F" => Ok(F),
            "F'" => Ok(F3),
            "F2" => Ok(F2),
            "B" => Ok(B),
            "B'" => Ok(B3),
            "B2" => Ok(B2),
            _ => Err(Error::InvalidMove(s.to_string())),
        }
    }
}

impl TryFrom<String> for Move {
    type Error = Error;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Move> for String {
    fn from(value: Move) -> Self {
        value.to_string()
    }
}

#[rustfmt::skip]
impl Move {
    pub fn face(self) -> Face {
        match self {
            U | U2 | U3 => Face::U,
            R | R2 | R3 => Face::R,
            F | F2 | F3 => Face::F,
            D | D2 | D3 => Face::D,
            L | L2 | L3 => Face::L,
            B | B2 | B3 => Face::B,
        }
    }

    /// Quarter turns clockwise: 1, 2 or 3.
    pub fn turns(self) -> usize {
        self as usize % 3 + 1
    }

    pub fn from_face(face: Face, turns: usize) -> Move {
        let first = match face {
            Face::U => 0,
            Face::R => 3,
            Face::F => 6,
            Face::D => 9,
            Face::L => 12,
            Face::B => 15,
        };
        ALL_MOVES[first + (turns + 2) % 3]
    }

    /// Moves on opposite faces, U/D, R/L, F/B.
    pub fn is_opposite(&self, other: Move) -> bool {
        self.face().opposite() == other.face()
    }

    pub fn is_same_layer(&self, other: Move) -> bool {
        self.face() == other.face()
    }

    pub fn get_inverse(self) -> Self {
        match self {
            U => U3,
            U3 => U,
            D => D3,
            D3 => D,
            R => R3,
            R3 => R,
            L => L3,
            L3 => L,
            F => F3,
            F3 => F,
            B => B3,
            B3 => B,
            _ => self,
        }
    }

    /// Instruction text shown next to a move while replaying a solution.
    pub fn describe(self) -> String {
        let turn = match self.turns() {
            1 => "clockwise 90°",
            2 => "180°",
            _ => "counterclockwise 90°",
        };
        format!("Turn the {} face {}", self.face().name(), turn)
    }
}

/// Human-readable sentence for a move.
pub fn describe(m: Move) -> String {
    m.describe()
}

/// A permutation of the 54 facelets.
///
/// `t[i]` is the index whose value moves into position `i`.
pub type Transform = [u8; N_FACELETS];

pub fn identity() -> Transform {
    let mut t = [0; N_FACELETS];
    for (i, v) in t.iter_mut().enumerate() {
        *v = i as u8;
    }
    t
}

/// `compose(a, b)[i] = a[b[i]]`, the transform of applying `a` and then `b`.
pub fn compose(a: &Transform, b: &Transform) -> Transform {
    let mut t = [0; N_FACELETS];
    for (i, v) in t.iter_mut().enumerate() {
        *v = a[b[i] as usize];
    }
    t
}

/// Move the facelet at `c[0]` to `c[1]`, `c[1]` to `c[2]`, and so on around the cycle.
fn cycle(t: &mut Transform, c: [usize; 4]) {
    for k in 0..4 {
        t[c[(k + 1) % 4]] = c[k] as u8;
    }
}

/// The rows and columns of the neighbouring faces dragged along by a clockwise turn, one 4-cycle per
/// slot. Rows are read in the direction that keeps a sticker's place in its strip.
///
/// Faces are indexed U 0-8, F 9-17, R 18-26, B 27-35, L 36-44, D 45-53.
#[rustfmt::skip]
const U_RING: [[usize; 4]; 3] = [
    [9, 36, 27, 18],  // F1 -> L1 -> B1 -> R1
    [10, 37, 28, 19],
    [11, 38, 29, 20],
];
#[rustfmt::skip]
const R_RING: [[usize; 4]; 3] = [
    [2, 33, 47, 11],  // U3 -> B7 -> D3 -> F3
    [5, 30, 50, 14],
    [8, 27, 53, 17],
];
#[rustfmt::skip]
const F_RING: [[usize; 4]; 3] = [
    [6, 18, 47, 44],  // U7 -> R1 -> D3 -> L9
    [7, 21, 46, 41],
    [8, 24, 45, 38],
];
#[rustfmt::skip]
const D_RING: [[usize; 4]; 3] = [
    [15, 24, 33, 42], // F7 -> R7 -> B7 -> L7
    [16, 25, 34, 43],
    [17, 26, 35, 44],
];
#[rustfmt::skip]
const L_RING: [[usize; 4]; 3] = [
    [0, 9, 45, 35],   // U1 -> F1 -> D1 -> B9
    [3, 12, 48, 32],
    [6, 15, 51, 29],
];
#[rustfmt::skip]
const B_RING: [[usize; 4]; 3] = [
    [0, 42, 53, 20],  // U1 -> L7 -> D9 -> R3
    [1, 39, 52, 23],
    [2, 36, 51, 26],
];

/// Build the clockwise quarter turn of `face`: the face's own nine cells turn, and `ring` carries the
/// adjacent strips around.
fn face_turn(face: Face, ring: &[[usize; 4]; 3]) -> Transform {
    let mut t = identity();
    let base = face.base();
    cycle(&mut t, [base, base + 2, base + 8, base + 6]);
    cycle(&mut t, [base + 1, base + 5, base + 7, base + 3]);
    for c in ring {
        cycle(&mut t, *c);
    }
    t
}

pub fn u_move() -> Transform {
    face_turn(Face::U, &U_RING)
}

pub fn r_move() -> Transform {
    face_turn(Face::R, &R_RING)
}

pub fn f_move() -> Transform {
    face_turn(Face::F, &F_RING)
}

pub fn d_move() -> Transform {
    face_turn(Face::D, &D_RING)
}

pub fn l_move() -> Transform {
    face_turn(Face::L, &L_RING)
}

pub fn b_move() -> Transform {
    face_turn(Face::B, &B_RING)
}

/// Transforms for all 18 moves, indexed by `Move as usize`.
///
/// Built once; afterwards only read, so one instance is shared by every solve.
pub struct MoveTables {
    transforms: [Transform; N_MOVE],
}

impl Default for MoveTables {
    fn default() -> Self {
        Self::new()
    }
}

impl MoveTables {
    pub fn new() -> Self {
        let mut transforms = [identity(); N_MOVE];
        // same order as the faces in Move: U, R, F, D, L, B
        let basic = [u_move(), r_move(), f_move(), d_move(), l_move(), b_move()];
        for (j, m) in basic.iter().enumerate() {
            let double = compose(m, m);
            let inverse = compose(&double, m);
            transforms[3 * j] = *m;
            transforms[3 * j + 1] = double;
            transforms[3 * j + 2] = inverse;
        }
        Self { transforms }
    }

    pub fn transform(&self, m: Move) -> &Transform {
        &self.transforms[m as usize]
    }
}

lazy_static! {
    pub static ref MOVE_TABLES: MoveTables = MoveTables::new();
}

#[cfg(test)]
mod test {
    use crate::facelet::ALL_FACES;
    use crate::moves::*;
    use crate::state::CubeState;

    fn scrambled() -> CubeState {
        CubeState::default().apply_moves(&[R, U, F3, L2, D, B3, U2, R3, F])
    }

    #[test]
    fn test_move_from_str() {
        assert_eq!("R'".parse::<Move>().unwrap(), R3);
        assert_eq!("B2".parse::<Move>().unwrap(), B2);
        assert!("X".parse::<Move>().is_err());
        assert!("R3".parse::<Move>().is_err());
        assert_eq!(U3.to_string(), "U'");
        assert_eq!(F2.to_string(), "F2");
    }

    #[test]
    fn test_bijection() {
        for m in ALL_MOVES {
            let t = MOVE_TABLES.transform(m);
            let mut seen = [false; N_FACELETS];
            for src in t {
                assert!(!seen[*src as usize], "{} reads facelet {} twice", m, src);
                seen[*src as usize] = true;
            }
        }
    }

    #[test]
    fn test_order_four() {
        let cs = scrambled();
        for m in ALL_MOVES.into_iter().step_by(3) {
            assert_eq!(cs.apply_moves(&[m, m, m, m]), cs);
            assert_ne!(cs.apply_move(m), cs);
        }
    }

    #[test]
    fn test_inverse_and_double() {
        let cs = scrambled();
        for m in ALL_MOVES {
            assert_eq!(cs.apply_move(m).apply_move(m.get_inverse()), cs);
        }
        for m in ALL_MOVES.into_iter().step_by(3) {
            let face = m.face();
            assert_eq!(
                cs.apply_move(Move::from_face(face, 2)),
                cs.apply_moves(&[m, m])
            );
            assert_eq!(
                cs.apply_move(Move::from_face(face, 3)),
                cs.apply_moves(&[m, m, m])
            );
            let t = MOVE_TABLES.transform(m);
            let inv = MOVE_TABLES.transform(m.get_inverse());
            assert_eq!(compose(t, inv), identity());
        }
    }

    #[test]
    fn test_centers_fixed() {
        for m in ALL_MOVES {
            let t = MOVE_TABLES.transform(m);
            for face in ALL_FACES {
                let c = face.base() + CENTER;
                assert_eq!(t[c] as usize, c);
            }
        }
    }

    #[test]
    fn test_opposite_faces_disjoint() {
        for (a, b) in [(U, D), (R, L), (F, B)] {
            let ta = MOVE_TABLES.transform(a);
            let tb = MOVE_TABLES.transform(b);
            for i in 0..N_FACELETS {
                assert!(ta[i] as usize == i || tb[i] as usize == i);
            }
            // opposite turns commute
            let cs = scrambled();
            assert_eq!(cs.apply_moves(&[a, b]), cs.apply_moves(&[b, a]));
        }
    }

    #[test]
    fn test_sexy_move_order_six() {
        let cs = CubeState::default();
        let sexy = [R, U, R3, U3];
        let mut s = cs;
        for k in 1..=6 {
            s = s.apply_moves(&sexy);
            assert_eq!(s == cs, k == 6);
        }
    }

    #[test]
    fn test_moves_keep_color_counts() {
        let cs = scrambled();
        for v in 0..6u8 {
            assert_eq!(cs.f.iter().filter(|x| **x == v).count(), 9);
        }
    }

    #[test]
    fn test_from_face() {
        for m in ALL_MOVES {
            assert_eq!(Move::from_face(m.face(), m.turns()), m);
        }
    }

    #[test]
    fn test_describe() {
        assert_eq!(describe(U), "Turn the Up face clockwise 90°");
        assert_eq!(describe(F2), "Turn the Front face 180°");
        assert_eq!(describe(L3), "Turn the Left face counterclockwise 90°");
    }
}

//! The facelet level: named positions, colors and the configuration map exchanged with callers.
//!
//! ```text
//!              |************|
//!              |*U1**U2**U3*|
//!              |************|
//!              |*U4**U5**U6*|
//!              |************|
//!              |*U7**U8**U9*|
//!              |************|
//! |************|************|************|************|
//! |*L1**L2**L3*|*F1**F2**F3*|*R1**R2**R3*|*B1**B2**B3*|
//! |************|************|************|************|
//! |*L4**L5**L6*|*F4**F5**F6*|*R4**R5**R6*|*B4**B5**B6*|
//! |************|************|************|************|
//! |*L7**L8**L9*|*F7**F8**F9*|*R7**R8**R9*|*B7**B8**B9*|
//! |************|************|************|************|
//!              |************|
//!              |*D1**D2**D3*|
//!              |************|
//!              |*D4**D5**D6*|
//!              |************|
//!              |*D7**D8**D9*|
//!              |************|
//! ```
//!
//! The flat state orders faces U, F, R, B, L, D, each face in row-major reading order.
use std::collections::BTreeMap;
use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::constants::*;
use crate::error::Error;
use crate::state::CubeState;

/// Sticker colors. The discriminant is the value stored in [CubeState].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Color {
    White,
    Red,
    Blue,
    Orange,
    Green,
    Yellow,
}

pub const ALL_COLORS: [Color; N_FACES] = [
    Color::White,
    Color::Red,
    Color::Blue,
    Color::Orange,
    Color::Green,
    Color::Yellow,
];

impl Color {
    pub fn name(self) -> &'static str {
        match self {
            Color::White => "white",
            Color::Red => "red",
            Color::Blue => "blue",
            Color::Orange => "orange",
            Color::Green => "green",
            Color::Yellow => "yellow",
        }
    }

    /// Single-letter form used by compact facelet strings.
    pub fn initial(self) -> char {
        match self {
            Color::White => 'w',
            Color::Red => 'r',
            Color::Blue => 'b',
            Color::Orange => 'o',
            Color::Green => 'g',
            Color::Yellow => 'y',
        }
    }

    pub fn from_initial(c: char) -> Result<Self, Error> {
        match c.to_ascii_lowercase() {
            'w' => Ok(Color::White),
            'r' => Ok(Color::Red),
            'b' => Ok(Color::Blue),
            'o' => Ok(Color::Orange),
            'g' => Ok(Color::Green),
            'y' => Ok(Color::Yellow),
            _ => Err(Error::InvalidColor(c.to_string())),
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for Color {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ALL_COLORS
            .into_iter()
            .find(|c| c.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| Error::InvalidColor(s.to_string()))
    }
}

impl TryFrom<u8> for Color {
    type Error = Error;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        ALL_COLORS
            .get(value as usize)
            .copied()
            .ok_or_else(|| Error::InvalidColor(value.to_string()))
    }
}

/// Faces in canonical state order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Face {
    U,
    F,
    R,
    B,
    L,
    D,
}

pub const ALL_FACES: [Face; N_FACES] = [Face::U, Face::F, Face::R, Face::B, Face::L, Face::D];

impl Face {
    pub fn opposite(self) -> Face {
        match self {
            Face::U => Face::D,
            Face::D => Face::U,
            Face::F => Face::B,
            Face::B => Face::F,
            Face::R => Face::L,
            Face::L => Face::R,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Face::U => "Up",
            Face::F => "Front",
            Face::R => "Right",
            Face::B => "Back",
            Face::L => "Left",
            Face::D => "Down",
        }
    }

    /// Color a correctly oriented cube shows on this face.
    pub fn color(self) -> Color {
        ALL_COLORS[self as usize]
    }

    /// Index of the first facelet of this face in the flat state.
    pub fn base(self) -> usize {
        N_FACE_CELLS * self as usize
    }

    pub fn from_char(c: char) -> Option<Face> {
        match c {
            'U' => Some(Face::U),
            'F' => Some(Face::F),
            'R' => Some(Face::R),
            'B' => Some(Face::B),
            'L' => Some(Face::L),
            'D' => Some(Face::D),
            _ => None,
        }
    }
}

impl fmt::Display for Face {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

/// A named facelet such as `U5`: face letter plus cell number 1 to 9.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Position {
    pub face: Face,
    pub cell: u8,
}

impl Position {
    pub fn new(face: Face, cell: u8) -> Result<Self, Error> {
        if (1..=9).contains(&cell) {
            Ok(Self { face, cell })
        } else {
            Err(Error::InvalidPosition(format!("{}{}", face, cell)))
        }
    }

    pub fn center(face: Face) -> Self {
        Self { face, cell: 5 }
    }

    /// Index into the flat 54-facelet state.
    pub fn index(self) -> usize {
        self.face.base() + self.cell as usize - 1
    }

    pub fn from_index(index: usize) -> Self {
        Self {
            face: ALL_FACES[index / N_FACE_CELLS],
            cell: (index % N_FACE_CELLS) as u8 + 1,
        }
    }

    /// All 54 positions in canonical state order.
    pub fn all() -> impl Iterator<Item = Position> {
        (0..N_FACELETS).map(Position::from_index)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.face, self.cell)
    }
}

impl FromStr for Position {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.chars();
        let face = chars.next().and_then(Face::from_char);
        let digits = chars.as_str();
        let cell = if !digits.is_empty() && digits.chars().all(|c| c.is_ascii_digit()) {
            digits.parse::<u8>().ok()
        } else {
            None
        };
        match (face, cell) {
            (Some(face), Some(cell)) => Position::new(face, cell),
            _ => Err(Error::InvalidPosition(s.to_string())),
        }
    }
}

impl TryFrom<String> for Position {
    type Error = Error;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Position> for String {
    fn from(value: Position) -> Self {
        value.to_string()
    }
}

/// Facelet configuration: a color for each named position.
///
/// Positions may be missing while a configuration is being painted; [Facelets::validate] catches that
/// through the color counts, and encoding fills the gap with white.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Facelets {
    pub cells: BTreeMap<Position, Color>,
}

/// Summary of a configuration, as shown next to the painted cube.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FaceletStats {
    pub is_valid: bool,
    pub is_solved: bool,
    pub color_distribution: BTreeMap<Color, usize>,
    pub validation_message: String,
}

impl Facelets {
    pub fn get(&self, position: Position) -> Option<Color> {
        self.cells.get(&position).copied()
    }

    pub fn set(&mut self, position: Position, color: Color) {
        self.cells.insert(position, color);
    }

    /// Check facelet counts and center colors.
    ///
    /// Centers are checked first so a repainted center is reported as such rather than as the count
    /// imbalance it causes.
    pub fn validate(&self) -> Result<(), Error> {
        for face in ALL_FACES {
            let position = Position::center(face);
            let expected = face.color();
            match self.get(position) {
                Some(found) if found == expected => {}
                found => {
                    return Err(Error::CenterMismatch {
                        position,
                        expected,
                        found: found.map_or("nothing".to_string(), |c| c.to_string()),
                    })
                }
            }
        }
        let distribution = self.color_distribution();
        for color in ALL_COLORS {
            let count = distribution.get(&color).copied().unwrap_or(0);
            if count != N_FACE_CELLS {
                return Err(Error::ColorCount { color, count });
            }
        }
        Ok(())
    }

    pub fn color_distribution(&self) -> BTreeMap<Color, usize> {
        let mut distribution = BTreeMap::new();
        for color in self.cells.values() {
            *distribution.entry(*color).or_insert(0) += 1;
        }
        distribution
    }

    pub fn stats(&self) -> FaceletStats {
        let validation = self.validate();
        FaceletStats {
            is_valid: validation.is_ok(),
            is_solved: CubeState::from(self).is_solved(),
            color_distribution: self.color_distribution(),
            validation_message: match validation {
                Ok(()) => "Cube configuration is valid".to_string(),
                Err(e) => e.to_string(),
            },
        }
    }

    pub fn to_json(&self) -> Result<String, Error> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(data: &str) -> Result<Self, Error> {
        Ok(serde_json::from_str(data)?)
    }
}

/// The canonical solved configuration.
pub fn solved() -> Facelets {
    Facelets {
        cells: Position::all().map(|p| (p, p.face.color())).collect(),
    }
}

/// Map a configuration onto the flat state, filling missing facelets with white.
pub fn encode(facelets: &Facelets) -> CubeState {
    CubeState::from(facelets)
}

pub fn decode(state: &CubeState) -> Facelets {
    Facelets::from(state)
}

pub fn validate(facelets: &Facelets) -> Result<(), Error> {
    facelets.validate()
}

impl From<&Facelets> for CubeState {
    fn from(facelets: &Facelets) -> Self {
        let mut f = [Color::White as u8; N_FACELETS];
        for (position, color) in &facelets.cells {
            f[position.index()] = *color as u8;
        }
        CubeState { f }
    }
}

impl From<&CubeState> for Facelets {
    fn from(state: &CubeState) -> Self {
        Facelets {
            cells: Position::all()
                .filter_map(|p| Color::try_from(state.f[p.index()]).ok().map(|c| (p, c)))
                .collect(),
        }
    }
}

/// Compact form: 54 color initials in canonical order, e.g. `wwwwwwwwwrrrrrrrrr...`.
impl FromStr for Facelets {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let initials: Vec<char> = s.chars().filter(|c| !c.is_whitespace()).collect();
        if initials.len() != N_FACELETS {
            return Err(Error::InvalidFaceletString);
        }
        let mut facelets = Facelets::default();
        for (i, c) in initials.into_iter().enumerate() {
            facelets.set(Position::from_index(i), Color::from_initial(c)?);
        }
        Ok(facelets)
    }
}

impl fmt::Display for Facelets {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for position in Position::all() {
            let c = self.get(position).map_or('-', Color::initial);
            write!(f, "{}", c)?;
        }
        Ok(())
    }
}

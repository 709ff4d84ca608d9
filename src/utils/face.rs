//! Face registry, moves and standard move notation.
//!
//! Faces are fixed world directions: U=+Y, D=-Y, R=+X, L=-X, F=+Z, B=-Z.
//! Turning a layer never reorients the faces themselves, only the camera orbits.

use std::f32::consts::FRAC_PI_2;
use std::fmt;
use std::str::FromStr;

use bevy::prelude::*;

use crate::utils::constants::cube_constants::{
    COLOR_B, COLOR_D, COLOR_F, COLOR_L, COLOR_R, COLOR_U,
};

/// One of the six outer faces of the puzzle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Face {
    U,
    D,
    L,
    R,
    F,
    B,
}

/// Fixed geometry of a face.
///
/// `right` and `up` follow a shared world convention (always positive coordinate
/// axes), so for U, B and R the pair `right x up` points inward. The swipe table
/// in `gesture` accounts for that per face.
#[derive(Clone, Copy, Debug)]
pub struct FaceInfo {
    pub normal: IVec3,
    pub right: IVec3,
    pub up: IVec3,
    /// Sign of a clockwise quarter turn about the positive coordinate axis of this face.
    pub cw_sign: i32,
    pub letter: char,
    pub color: Color,
}

const FACE_U: FaceInfo = FaceInfo {
    normal: IVec3::Y,
    right: IVec3::X,
    up: IVec3::Z,
    cw_sign: -1,
    letter: 'U',
    color: COLOR_U,
};
const FACE_D: FaceInfo = FaceInfo {
    normal: IVec3::NEG_Y,
    right: IVec3::X,
    up: IVec3::Z,
    cw_sign: 1,
    letter: 'D',
    color: COLOR_D,
};
const FACE_L: FaceInfo = FaceInfo {
    normal: IVec3::NEG_X,
    right: IVec3::Z,
    up: IVec3::Y,
    cw_sign: 1,
    letter: 'L',
    color: COLOR_L,
};
const FACE_R: FaceInfo = FaceInfo {
    normal: IVec3::X,
    right: IVec3::Z,
    up: IVec3::Y,
    cw_sign: -1,
    letter: 'R',
    color: COLOR_R,
};
const FACE_F: FaceInfo = FaceInfo {
    normal: IVec3::Z,
    right: IVec3::X,
    up: IVec3::Y,
    cw_sign: -1,
    letter: 'F',
    color: COLOR_F,
};
const FACE_B: FaceInfo = FaceInfo {
    normal: IVec3::NEG_Z,
    right: IVec3::X,
    up: IVec3::Y,
    cw_sign: 1,
    letter: 'B',
    color: COLOR_B,
};

impl Face {
    pub const ALL: [Face; 6] = [Face::U, Face::D, Face::L, Face::R, Face::F, Face::B];

    pub const fn info(self) -> &'static FaceInfo {
        match self {
            Face::U => &FACE_U,
            Face::D => &FACE_D,
            Face::L => &FACE_L,
            Face::R => &FACE_R,
            Face::F => &FACE_F,
            Face::B => &FACE_B,
        }
    }

    pub fn normal(self) -> Vec3 {
        self.info().normal.as_vec3()
    }

    pub fn local_right(self) -> Vec3 {
        self.info().right.as_vec3()
    }

    pub fn local_up(self) -> Vec3 {
        self.info().up.as_vec3()
    }

    /// Positive coordinate axis the layer turns about.
    pub fn axis(self) -> Vec3 {
        self.info().normal.abs().as_vec3()
    }

    pub fn letter(self) -> char {
        self.info().letter
    }

    pub fn from_letter(letter: char) -> Option<Face> {
        Face::ALL.into_iter().find(|face| face.letter() == letter)
    }

    /// Face whose normal is the dominant axis of `v`. Ties resolve x, then y, then z.
    pub fn from_normal(v: Vec3) -> Option<Face> {
        let abs = v.abs();
        if !abs.is_finite() || abs.max_element() <= f32::EPSILON {
            return None;
        }
        let face = if abs.x >= abs.y && abs.x >= abs.z {
            if v.x > 0.0 { Face::R } else { Face::L }
        } else if abs.y >= abs.z {
            if v.y > 0.0 { Face::U } else { Face::D }
        } else if v.z > 0.0 {
            Face::F
        } else {
            Face::B
        };
        Some(face)
    }

    /// Face whose outward normal is exactly `normal`.
    pub fn from_grid_normal(normal: IVec3) -> Option<Face> {
        Face::ALL.into_iter().find(|face| face.info().normal == normal)
    }
}

impl fmt::Display for Face {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.letter())
    }
}

/// Turn direction, as seen from outside the face looking inward.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TurnDirection {
    Clockwise,
    CounterClockwise,
    Double,
}

impl TurnDirection {
    pub const ALL: [TurnDirection; 3] = [
        TurnDirection::Clockwise,
        TurnDirection::CounterClockwise,
        TurnDirection::Double,
    ];

    pub fn inverse(self) -> TurnDirection {
        match self {
            TurnDirection::Clockwise => TurnDirection::CounterClockwise,
            TurnDirection::CounterClockwise => TurnDirection::Clockwise,
            TurnDirection::Double => TurnDirection::Double,
        }
    }

    fn suffix(self) -> &'static str {
        match self {
            TurnDirection::Clockwise => "",
            TurnDirection::CounterClockwise => "'",
            TurnDirection::Double => "2",
        }
    }
}

/// A single face turn.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Move {
    pub face: Face,
    pub direction: TurnDirection,
}

impl Move {
    pub const fn new(face: Face, direction: TurnDirection) -> Self {
        Self { face, direction }
    }

    pub fn inverse(self) -> Move {
        Move::new(self.face, self.direction.inverse())
    }

    /// Signed quarter turns about `face.axis()`.
    pub fn quarter_turns(self) -> i32 {
        let cw = self.face.info().cw_sign;
        match self.direction {
            TurnDirection::Clockwise => cw,
            TurnDirection::CounterClockwise => -cw,
            TurnDirection::Double => 2 * cw,
        }
    }

    /// World axis and signed angle in radians of this turn.
    pub fn axis_angle(self) -> (Vec3, f32) {
        (self.face.axis(), self.quarter_turns() as f32 * FRAC_PI_2)
    }

    pub fn notation(self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.face, self.direction.suffix())
    }
}

/// A token that is not `<FACE>`, `<FACE>'` or `<FACE>2`.
#[derive(thiserror::Error, Clone, Debug, PartialEq, Eq)]
#[error("invalid move token {token:?}")]
pub struct NotationError {
    pub token: String,
}

impl FromStr for Move {
    type Err = NotationError;

    fn from_str(token: &str) -> Result<Self, Self::Err> {
        let err = || NotationError {
            token: token.to_string(),
        };
        let mut chars = token.chars();
        let face = chars.next().and_then(Face::from_letter).ok_or_else(err)?;
        let direction = match (chars.next(), chars.next()) {
            (None, _) => TurnDirection::Clockwise,
            (Some('\''), None) => TurnDirection::CounterClockwise,
            (Some('2'), None) => TurnDirection::Double,
            _ => return Err(err()),
        };
        Ok(Move::new(face, direction))
    }
}

/// Result of parsing a free-text move sequence.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ParsedSequence {
    pub moves: Vec<Move>,
    pub skipped: Vec<NotationError>,
}

/// Parses whitespace-separated move tokens, skipping malformed ones.
pub fn parse_sequence(text: &str) -> ParsedSequence {
    let mut parsed = ParsedSequence::default();
    for token in text.split_whitespace() {
        match token.parse::<Move>() {
            Ok(mv) => parsed.moves.push(mv),
            Err(err) => {
                log::debug!("skipping {err}");
                parsed.skipped.push(err);
            }
        }
    }
    parsed
}

/// Formats moves as space-separated notation.
pub fn format_sequence(moves: &[Move]) -> String {
    moves
        .iter()
        .copied()
        .map(Move::notation)
        .collect::<Vec<_>>()
        .join(" ")
}

//! The 24-element rotation group of the cube and snapping onto it.
//!
//! Committed cubie orientations are stored exactly as signed permutation
//! matrices; `Quat` is only used while a layer is animating.

use std::ops::Mul;
use std::sync::LazyLock;

use bevy::prelude::*;

/// All 24 rotations of a cube, as maps on integer coordinates.
///
/// Organized as 6 face-up choices x 4 rotations around that axis:
/// - 0-3: +Z face up
/// - 4-7: +Y face up
/// - 8-11: -Z face up
/// - 12-15: -Y face up
/// - 16-19: +X face up
/// - 20-23: -X face up
const ROTATIONS: [fn(IVec3) -> IVec3; 24] = [
    // +Z face up (identity orientation), rotate around Z axis
    |v| IVec3::new(v.x, v.y, v.z),
    |v| IVec3::new(-v.y, v.x, v.z),
    |v| IVec3::new(-v.x, -v.y, v.z),
    |v| IVec3::new(v.y, -v.x, v.z),
    // +Y face up
    |v| IVec3::new(v.x, -v.z, v.y),
    |v| IVec3::new(v.z, v.x, v.y),
    |v| IVec3::new(-v.x, v.z, v.y),
    |v| IVec3::new(-v.z, -v.x, v.y),
    // -Z face up
    |v| IVec3::new(v.x, -v.y, -v.z),
    |v| IVec3::new(v.y, v.x, -v.z),
    |v| IVec3::new(-v.x, v.y, -v.z),
    |v| IVec3::new(-v.y, -v.x, -v.z),
    // -Y face up
    |v| IVec3::new(v.x, v.z, -v.y),
    |v| IVec3::new(-v.z, v.x, -v.y),
    |v| IVec3::new(-v.x, -v.z, -v.y),
    |v| IVec3::new(v.z, -v.x, -v.y),
    // +X face up
    |v| IVec3::new(v.z, v.y, -v.x),
    |v| IVec3::new(-v.y, v.z, -v.x),
    |v| IVec3::new(-v.z, -v.y, -v.x),
    |v| IVec3::new(v.y, -v.z, -v.x),
    // -X face up
    |v| IVec3::new(-v.z, v.y, v.x),
    |v| IVec3::new(-v.y, -v.z, v.x),
    |v| IVec3::new(v.z, -v.y, v.x),
    |v| IVec3::new(v.y, v.z, v.x),
];

/// An exact cube orientation. Columns are the images of the X, Y and Z axes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Orientation {
    cols: [IVec3; 3],
}

/// Group elements with their quaternions, built once.
static GROUP: LazyLock<[(Orientation, Quat); 24]> = LazyLock::new(|| {
    ROTATIONS.map(|rotate| {
        let orientation = Orientation {
            cols: [rotate(IVec3::X), rotate(IVec3::Y), rotate(IVec3::Z)],
        };
        (orientation, orientation.to_quat())
    })
});

impl Orientation {
    pub const IDENTITY: Self = Self {
        cols: [IVec3::X, IVec3::Y, IVec3::Z],
    };

    /// Every element of the rotation group.
    pub fn all() -> impl Iterator<Item = Orientation> {
        GROUP.iter().map(|(orientation, _)| *orientation)
    }

    /// Quarter turns about a coordinate axis; `axis` must be one of the six unit vectors.
    pub fn quarter_turns(axis: IVec3, turns: i32) -> Self {
        let mut result = Self::IDENTITY;
        let step = Self::quarter_turn(axis);
        for _ in 0..turns.rem_euclid(4) {
            result = step * result;
        }
        result
    }

    fn quarter_turn(axis: IVec3) -> Self {
        // Positive quarter turn about `axis` sends each basis vector e to axis x e (plus its axial part).
        let image = |e: IVec3| axis * axis.dot(e) + axis.cross(e);
        Self {
            cols: [image(IVec3::X), image(IVec3::Y), image(IVec3::Z)],
        }
    }

    pub fn apply(&self, v: IVec3) -> IVec3 {
        self.cols[0] * v.x + self.cols[1] * v.y + self.cols[2] * v.z
    }

    pub fn to_mat3(&self) -> Mat3 {
        Mat3::from_cols(
            self.cols[0].as_vec3(),
            self.cols[1].as_vec3(),
            self.cols[2].as_vec3(),
        )
    }

    pub fn to_quat(&self) -> Quat {
        Quat::from_mat3(&self.to_mat3()).normalize()
    }

    /// The group element closest to `rotation`.
    pub fn snap(rotation: Quat) -> Self {
        let rotation = rotation.normalize();
        let mut best = Self::IDENTITY;
        let mut best_dot = f32::NEG_INFINITY;
        for (orientation, quat) in GROUP.iter() {
            // q and -q are the same rotation
            let dot = quat.dot(rotation).abs();
            if dot > best_dot {
                best_dot = dot;
                best = *orientation;
            }
        }
        best
    }
}

impl Default for Orientation {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Mul for Orientation {
    type Output = Orientation;

    fn mul(self, rhs: Orientation) -> Orientation {
        Orientation {
            cols: rhs.cols.map(|col| self.apply(col)),
        }
    }
}

/// Rounds each component to the nearest grid point.
pub fn snap_position(position: Vec3) -> IVec3 {
    position.round().as_ivec3()
}

//! Discrete cube state and the layer-rotation engine.
//!
//! The 27 cubies live in a flat arena indexed by cubie id. A turn never moves
//! a committed transform while it animates: the pivot rotation is composed on
//! top of the committed transforms for rendering only, and `commit` bakes the
//! composed result back into exact grid positions and group orientations.

use std::time::Duration;

use bevy::prelude::*;

use crate::utils::constants::cube_constants::{CUBIE_COUNT, HALF, LAYER_EPSILON, LAYER_SIZE};
use crate::utils::face::{Face, Move};
use crate::utils::orientation::{Orientation, snap_position};

/// Easing applied to the turn progress.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Easing {
    Linear,
    #[default]
    Smoothstep,
}

impl Easing {
    pub fn apply(self, t: f32) -> f32 {
        let k = t.clamp(0.0, 1.0);
        match self {
            Easing::Linear => k,
            Easing::Smoothstep => k * k * (3.0 - 2.0 * k),
        }
    }
}

/// A turn or reset was requested while another turn is in flight.
#[derive(thiserror::Error, Clone, Copy, Debug, PartialEq, Eq)]
pub enum TurnError {
    #[error("a layer turn is already animating")]
    Busy,
}

/// One sub-cube.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CubieRecord {
    /// Grid coordinate at creation, which fixes the sticker colors.
    pub home: IVec3,
    pub position: IVec3,
    pub orientation: Orientation,
}

impl CubieRecord {
    fn solved(home: IVec3) -> Self {
        Self {
            home,
            position: home,
            orientation: Orientation::IDENTITY,
        }
    }

    /// Committed transform relative to the cube root.
    pub fn local_transform(&self) -> Transform {
        Transform::from_translation(self.position.as_vec3()).with_rotation(self.orientation.to_quat())
    }
}

/// The transient rotation group of an in-flight turn.
#[derive(Clone, Debug, PartialEq)]
pub struct PivotContext {
    pub mv: Move,
    pub axis: Vec3,
    pub target_angle: f32,
    pub layer: [usize; LAYER_SIZE],
    pub started: Duration,
    pub duration: Duration,
    /// Eased progress in [0, 1] of the last sample.
    pub progress: f32,
}

impl PivotContext {
    /// Pivot rotation at the current progress, always computed from the identity baseline.
    pub fn rotation(&self) -> Quat {
        Quat::from_axis_angle(self.axis, self.target_angle * self.progress)
    }

    fn contains(&self, id: usize) -> bool {
        self.layer.contains(&id)
    }

    /// Raw (un-eased) fraction of the duration elapsed at `now`.
    fn fraction(&self, now: Duration) -> f32 {
        if self.duration.is_zero() {
            return 1.0;
        }
        let elapsed = now.saturating_sub(self.started);
        (elapsed.as_secs_f32() / self.duration.as_secs_f32()).clamp(0.0, 1.0)
    }
}

/// The whole puzzle: cubie arena plus the optional in-flight turn.
#[derive(Resource, Clone, Debug)]
pub struct CubeState {
    cubies: Vec<CubieRecord>,
    /// World transform of the permanent cube root.
    root: Transform,
    animation: Option<PivotContext>,
}

impl Default for CubeState {
    fn default() -> Self {
        Self::solved()
    }
}

/// Every grid point, x outermost then y then z.
pub fn grid_points() -> impl Iterator<Item = IVec3> {
    (-HALF..=HALF).flat_map(|x| {
        (-HALF..=HALF).flat_map(move |y| (-HALF..=HALF).map(move |z| IVec3::new(x, y, z)))
    })
}

impl CubeState {
    pub fn solved() -> Self {
        let cubies: Vec<CubieRecord> = grid_points().map(CubieRecord::solved).collect();
        debug_assert_eq!(cubies.len(), CUBIE_COUNT);
        Self {
            cubies,
            root: Transform::IDENTITY,
            animation: None,
        }
    }

    pub fn with_root(mut self, root: Transform) -> Self {
        self.root = root;
        self
    }

    pub fn root(&self) -> Transform {
        self.root
    }

    pub fn cubies(&self) -> &[CubieRecord] {
        &self.cubies
    }

    pub fn cubie(&self, id: usize) -> &CubieRecord {
        &self.cubies[id]
    }

    pub fn is_animating(&self) -> bool {
        self.animation.is_some()
    }

    pub fn animation(&self) -> Option<&PivotContext> {
        self.animation.as_ref()
    }

    /// Ids of the 9 cubies currently in `face`'s outer layer.
    ///
    /// Compares continuous positions with a half-unit tolerance, so the same
    /// test serves baked grid positions and positions read back from geometry.
    pub fn select_layer(&self, face: Face) -> [usize; LAYER_SIZE] {
        let normal = face.normal();
        let threshold = HALF as f32 - LAYER_EPSILON;
        let mut layer = [0; LAYER_SIZE];
        let mut count = 0;
        for (id, cubie) in self.cubies.iter().enumerate() {
            if cubie.position.as_vec3().dot(normal) > threshold {
                assert!(count < LAYER_SIZE, "layer {face} holds more than {LAYER_SIZE} cubies");
                layer[count] = id;
                count += 1;
            }
        }
        assert_eq!(count, LAYER_SIZE, "layer {face} must hold exactly {LAYER_SIZE} cubies");
        layer
    }

    /// Enters `ANIMATING` for `mv`. Dropped with `TurnError::Busy` if a turn is in flight.
    pub fn begin_turn(&mut self, mv: Move, now: Duration, duration: Duration) -> Result<(), TurnError> {
        if self.animation.is_some() {
            return Err(TurnError::Busy);
        }
        let (axis, target_angle) = mv.axis_angle();
        let layer = self.select_layer(mv.face);
        log::debug!("begin {mv}: axis {axis}, angle {target_angle:.4}, layer {layer:?}");
        self.animation = Some(PivotContext {
            mv,
            axis,
            target_angle,
            layer,
            started: now,
            duration,
            progress: 0.0,
        });
        Ok(())
    }

    /// Samples the in-flight turn at `now`. Returns the committed move once it completes.
    pub fn advance(&mut self, now: Duration, easing: Easing) -> Option<Move> {
        let animation = self.animation.as_mut()?;
        let t = animation.fraction(now);
        animation.progress = easing.apply(t);
        if t >= 1.0 { self.commit() } else { None }
    }

    /// Transform of cubie `id` relative to the cube root, including the pivot rotation.
    pub fn render_transform(&self, id: usize) -> Transform {
        let local = self.cubies[id].local_transform();
        match &self.animation {
            Some(animation) if animation.contains(id) => {
                Transform::from_rotation(animation.rotation()).mul_transform(local)
            }
            _ => local,
        }
    }

    /// World transform of cubie `id`.
    pub fn world_transform(&self, id: usize) -> Transform {
        self.root.mul_transform(self.render_transform(id))
    }

    /// Finishes the in-flight turn at its full angle and bakes the layer back onto the grid.
    pub fn commit(&mut self) -> Option<Move> {
        let animation = self.animation.as_mut()?;
        animation.progress = 1.0;
        let layer = animation.layer;
        let world: Vec<(usize, Transform)> = layer
            .iter()
            .map(|&id| (id, self.world_transform(id)))
            .collect();
        for (id, world) in world {
            let (position, orientation) = bake(world, self.root);
            self.cubies[id].position = position;
            self.cubies[id].orientation = orientation;
        }
        let mv = self.animation.take().map(|animation| animation.mv);
        debug_assert!(self.is_permutation(), "positions diverged from the grid after {mv:?}");
        mv
    }

    /// Starts and immediately commits `mv`.
    pub fn apply_instant(&mut self, mv: Move) -> Result<(), TurnError> {
        self.begin_turn(mv, Duration::ZERO, Duration::ZERO)?;
        self.commit();
        Ok(())
    }

    /// Restores every cubie to its home position and identity orientation.
    pub fn reset(&mut self) -> Result<(), TurnError> {
        if self.animation.is_some() {
            return Err(TurnError::Busy);
        }
        for cubie in &mut self.cubies {
            *cubie = CubieRecord::solved(cubie.home);
        }
        Ok(())
    }

    /// True when the cubie positions are exactly the 27 grid points.
    pub fn is_permutation(&self) -> bool {
        let mut seen = [false; CUBIE_COUNT];
        for cubie in &self.cubies {
            if cubie.position.abs().max_element() > HALF {
                return false;
            }
            let offset = cubie.position + IVec3::splat(HALF);
            let dim = 2 * HALF + 1;
            let index = (offset.x * dim * dim + offset.y * dim + offset.z) as usize;
            if std::mem::replace(&mut seen[index], true) {
                return false;
            }
        }
        true
    }
}

/// Converts a world transform into the root's frame, then snaps it onto the grid.
///
/// Rounding happens after the frame change; snapping in world space is wrong
/// whenever the root is not the identity.
pub fn bake(world: Transform, root: Transform) -> (IVec3, Orientation) {
    let local = root.compute_affine().inverse() * world.compute_affine();
    let (_, rotation, translation) = local.to_scale_rotation_translation();
    (snap_position(translation), Orientation::snap(rotation))
}

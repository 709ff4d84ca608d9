//! Layer gestures: a single-pointer swipe on a cubie turns the touched face.
//!
//! Two or more touches are reserved for the camera and never turn a layer.

use bevy::picking::events::{Drag, Pointer, Press};
use bevy::picking::pointer::{PointerButton, PointerId};
use bevy::prelude::*;

use crate::utils::animation::MoveRequest;
use crate::utils::config::{CubeConfig, HitPolicy};
use crate::utils::cube_state::CubeState;
use crate::utils::face::{Face, Move, TurnDirection};
use crate::utils::objects::{CubeRoot, Cubie, OrbitControl, PersistentCamera, Sticker};
use crate::utils::orientation::Orientation;
use crate::utils::sequence::MoveSequence;

/// Which in-plane axis a swipe runs along, and which way.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SwipePolarity {
    PosU,
    NegU,
    PosV,
    NegV,
}

impl SwipePolarity {
    pub const ALL: [SwipePolarity; 4] = [
        SwipePolarity::PosU,
        SwipePolarity::NegU,
        SwipePolarity::PosV,
        SwipePolarity::NegV,
    ];

    fn index(self) -> usize {
        match self {
            SwipePolarity::PosU => 0,
            SwipePolarity::NegU => 1,
            SwipePolarity::PosV => 2,
            SwipePolarity::NegV => 3,
        }
    }
}

use TurnDirection::{Clockwise as CW, CounterClockwise as CCW};

// [+u, -u, +v, -v]. A horizontal swipe drags the +v rim of the face, a vertical one the +u rim.
// Faces whose right x up points inward (U, B, R) mirror the others.
const INWARD_FRAME: [TurnDirection; 4] = [CCW, CW, CW, CCW];
const OUTWARD_FRAME: [TurnDirection; 4] = [CW, CCW, CCW, CW];

pub fn polarity_table(face: Face) -> [TurnDirection; 4] {
    match face {
        Face::D | Face::F | Face::L => OUTWARD_FRAME,
        Face::U | Face::B | Face::R => INWARD_FRAME,
    }
}

/// A swipe resolved to a turn of the touched face.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SwipeDecision {
    pub face: Face,
    pub polarity: SwipePolarity,
    pub direction: TurnDirection,
    pub axis: Vec3,
    pub signed_angle: f32,
}

impl SwipeDecision {
    pub fn mv(&self) -> Move {
        Move::new(self.face, self.direction)
    }

    pub fn is_clockwise(&self) -> bool {
        self.direction == TurnDirection::Clockwise
    }
}

pub fn passes_deadzone(swipe: Vec2, deadzone_px: f32) -> bool {
    swipe.length() > deadzone_px
}

/// Decodes a screen swipe on `face` into a turn.
///
/// `swipe` is in screen pixels with y pointing down; `cam_right` and `cam_up`
/// are the camera basis in the cube's frame. Returns `None` when the swipe has
/// no component in the face plane (face seen edge-on).
pub fn decode_swipe(face: Face, swipe: Vec2, cam_right: Vec3, cam_up: Vec3) -> Option<SwipeDecision> {
    let world = cam_right * swipe.x - cam_up * swipe.y;
    let normal = face.normal();
    let in_plane = (world - normal * world.dot(normal)).try_normalize()?;

    let along_u = in_plane.dot(face.local_right());
    let along_v = in_plane.dot(face.local_up());
    let polarity = if along_u.abs() >= along_v.abs() {
        if along_u > 0.0 { SwipePolarity::PosU } else { SwipePolarity::NegU }
    } else if along_v > 0.0 {
        SwipePolarity::PosV
    } else {
        SwipePolarity::NegV
    };

    let direction = polarity_table(face)[polarity.index()];
    let (axis, signed_angle) = Move::new(face, direction).axis_angle();
    Some(SwipeDecision {
        face,
        polarity,
        direction,
        axis,
        signed_angle,
    })
}

/// Face touched by a pointer press.
///
/// `sticker` is the hit sticker's home side and its cubie's orientation;
/// `normal` is the hit surface normal in the cube's frame.
pub fn resolve_face_from_hit(
    sticker: Option<(Face, Orientation)>,
    normal: Option<Vec3>,
    policy: HitPolicy,
) -> Option<Face> {
    match (policy, sticker) {
        (HitPolicy::Sticker, Some((side, orientation))) => {
            Face::from_grid_normal(orientation.apply(side.info().normal))
        }
        _ => normal.and_then(Face::from_normal),
    }
}

/// Progress of the current single-pointer layer gesture.
#[derive(Resource, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum GestureState {
    #[default]
    Idle,
    /// Pressed on `face`, waiting for the swipe to leave the deadzone.
    Tracking { face: Face, pointer: PointerId },
    /// Turn issued or gesture handed to the camera; ignored until release.
    Spent,
}

/// Gesture bookkeeping; camera orbit runs after it so a released pointer orbits again the same frame.
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub struct GestureSystems;

pub struct GesturePlugin;

impl Plugin for GesturePlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<GestureState>()
            .init_resource::<OrbitControl>()
            .add_observer(on_cubie_press)
            .add_observer(on_cubie_drag)
            .add_systems(
                Update,
                (yield_to_multi_touch, end_gesture_on_release)
                    .chain()
                    .in_set(GestureSystems),
            );
    }
}

fn touch_count(touches: &Touches) -> usize {
    touches.iter().count()
}

/// A layer gesture starts only from a single primary pointer on an idle cube
/// with no queued sequence.
pub fn accepts_press(button: PointerButton, touches: usize, busy: bool, gesture: GestureState) -> bool {
    button == PointerButton::Primary && touches < 2 && !busy && gesture == GestureState::Idle
}

/// How a gesture reacts to one drag sample.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DragStep {
    /// No gesture is tracking this pointer.
    Ignored,
    /// Still inside the deadzone.
    Pending,
    /// A second touch took over.
    Yielded,
    /// Left the deadzone: the face is fixed and the gesture is spent.
    Locked(Face),
}

pub fn drag_step(
    gesture: GestureState,
    pointer: PointerId,
    touches: usize,
    swipe: Vec2,
    deadzone_px: f32,
) -> DragStep {
    let GestureState::Tracking {
        face,
        pointer: tracked,
    } = gesture
    else {
        return DragStep::Ignored;
    };
    if pointer != tracked {
        DragStep::Ignored
    } else if touches >= 2 {
        DragStep::Yielded
    } else if passes_deadzone(swipe, deadzone_px) {
        DragStep::Locked(face)
    } else {
        DragStep::Pending
    }
}

/// Starts tracking a layer gesture and takes the pointer away from the camera.
pub fn on_cubie_press(
    mut press: On<Pointer<Press>>,
    config: Res<CubeConfig>,
    state: Res<CubeState>,
    sequence: Res<MoveSequence>,
    touches: Res<Touches>,
    stickers: Query<&Sticker>,
    cubies: Query<&Cubie>,
    roots: Query<&GlobalTransform, With<CubeRoot>>,
    mut gesture: ResMut<GestureState>,
    mut orbit: ResMut<OrbitControl>,
) {
    let target = press.event().event_target();
    if stickers.get(target).is_err() && cubies.get(target).is_err() {
        return;
    }
    press.propagate(false);

    let busy = state.is_animating() || !sequence.is_empty();
    if !accepts_press(
        press.event().button,
        touch_count(&touches),
        busy,
        *gesture,
    ) {
        return;
    }

    let root_rotation = roots
        .single()
        .map(|root| root.rotation())
        .unwrap_or(Quat::IDENTITY);
    let sticker = stickers
        .get(target)
        .ok()
        .map(|sticker| (sticker.side, state.cubie(sticker.cubie).orientation));
    let normal = press.event().hit.normal.map(|n| root_rotation.inverse() * n);

    let Some(face) = resolve_face_from_hit(sticker, normal, config.hit_policy) else {
        debug!("press on {target} did not resolve to a face");
        return;
    };

    *gesture = GestureState::Tracking {
        face,
        pointer: press.event().pointer_id,
    };
    orbit.enabled = false;
    debug!("gesture: tracking {face}");
}

/// Locks the gesture to a turn once the swipe leaves the deadzone.
pub fn on_cubie_drag(
    mut drag: On<Pointer<Drag>>,
    config: Res<CubeConfig>,
    state: Res<CubeState>,
    sequence: Res<MoveSequence>,
    touches: Res<Touches>,
    cameras: Query<&GlobalTransform, With<PersistentCamera>>,
    roots: Query<&GlobalTransform, With<CubeRoot>>,
    mut gesture: ResMut<GestureState>,
    mut orbit: ResMut<OrbitControl>,
    mut requests: MessageWriter<MoveRequest>,
) {
    let swipe = drag.event().distance;
    let face = match drag_step(
        *gesture,
        drag.event().pointer_id,
        touch_count(&touches),
        swipe,
        config.deadzone_px,
    ) {
        DragStep::Ignored => return,
        DragStep::Pending => {
            drag.propagate(false);
            return;
        }
        DragStep::Yielded => {
            drag.propagate(false);
            *gesture = GestureState::Spent;
            orbit.enabled = true;
            return;
        }
        DragStep::Locked(face) => face,
    };
    drag.propagate(false);

    if state.is_animating() || !sequence.is_empty() {
        *gesture = GestureState::Spent;
        debug!("gesture on {face} dropped: cube is busy");
        return;
    }

    let Ok(camera) = cameras.single() else {
        return;
    };
    let to_cube = roots
        .single()
        .map(|root| root.rotation().inverse())
        .unwrap_or(Quat::IDENTITY);
    let cam_right = to_cube * camera.right().as_vec3();
    let cam_up = to_cube * camera.up().as_vec3();

    *gesture = GestureState::Spent;
    match decode_swipe(face, swipe, cam_right, cam_up) {
        Some(decision) => {
            debug!(
                "gesture: {:?} on {face} -> {} (axis {}, angle {:.3})",
                decision.polarity,
                decision.mv(),
                decision.axis,
                decision.signed_angle
            );
            requests.write(MoveRequest::new(decision.mv()));
        }
        None => debug!("gesture: swipe on {face} has no in-plane component"),
    }
}

/// A second finger hands the interaction back to the camera.
pub fn yield_to_multi_touch(
    touches: Res<Touches>,
    mut gesture: ResMut<GestureState>,
    mut orbit: ResMut<OrbitControl>,
) {
    if touch_count(&touches) >= 2 && matches!(*gesture, GestureState::Tracking { .. }) {
        *gesture = GestureState::Spent;
        orbit.enabled = true;
        debug!("gesture: second touch, orbit resumed");
    }
}

/// Ends the gesture once no pointer is down.
pub fn end_gesture_on_release(
    mouse: Res<ButtonInput<MouseButton>>,
    touches: Res<Touches>,
    mut gesture: ResMut<GestureState>,
    mut orbit: ResMut<OrbitControl>,
) {
    if *gesture == GestureState::Idle {
        return;
    }
    if !mouse.pressed(MouseButton::Left) && touch_count(&touches) == 0 {
        *gesture = GestureState::Idle;
        orbit.enabled = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use SwipePolarity::{NegU, NegV, PosU, PosV};

    /// Swipe of 60px along a face's in-plane axes, with the camera aligned to them.
    fn swipe_on(face: Face, polarity: SwipePolarity) -> Option<SwipeDecision> {
        let swipe = match polarity {
            PosU => Vec2::new(60.0, 0.0),
            NegU => Vec2::new(-60.0, 0.0),
            // screen y points down
            PosV => Vec2::new(0.0, -60.0),
            NegV => Vec2::new(0.0, 60.0),
        };
        decode_swipe(face, swipe, face.local_right(), face.local_up())
    }

    #[test]
    fn test_polarity_table_literal_cases() {
        let cases = [
            (Face::U, PosU, CCW),
            (Face::U, NegU, CW),
            (Face::U, PosV, CW),
            (Face::U, NegV, CCW),
            (Face::D, PosU, CW),
            (Face::D, NegU, CCW),
            (Face::D, PosV, CCW),
            (Face::D, NegV, CW),
            (Face::L, PosU, CW),
            (Face::L, NegU, CCW),
            (Face::L, PosV, CCW),
            (Face::L, NegV, CW),
            (Face::R, PosU, CCW),
            (Face::R, NegU, CW),
            (Face::R, PosV, CW),
            (Face::R, NegV, CCW),
            (Face::F, PosU, CW),
            (Face::F, NegU, CCW),
            (Face::F, PosV, CCW),
            (Face::F, NegV, CW),
            (Face::B, PosU, CCW),
            (Face::B, NegU, CW),
            (Face::B, PosV, CW),
            (Face::B, NegV, CCW),
        ];
        for (face, polarity, expected) in cases {
            let decision = swipe_on(face, polarity).unwrap();
            assert_eq!(decision.polarity, polarity, "{face} {polarity:?}");
            assert_eq!(decision.direction, expected, "{face} {polarity:?}");
        }
    }

    #[test]
    fn test_turn_follows_the_finger() {
        // The dragged rim point must move along the swipe.
        for face in Face::ALL {
            for polarity in SwipePolarity::ALL {
                let decision = swipe_on(face, polarity).unwrap();
                let (swipe, rim) = match polarity {
                    PosU => (face.local_right(), face.local_up()),
                    NegU => (-face.local_right(), face.local_up()),
                    PosV => (face.local_up(), face.local_right()),
                    NegV => (-face.local_up(), face.local_right()),
                };
                let contact = face.normal() + rim;
                let velocity = (decision.axis * decision.signed_angle.signum()).cross(contact);
                assert!(velocity.dot(swipe) > 0.0, "{face} {polarity:?}");
            }
        }
    }

    #[test]
    fn test_rightward_swipe_on_front_from_front_is_clockwise() {
        let camera = Transform::from_xyz(0.0, 0.0, 10.0).looking_at(Vec3::ZERO, Vec3::Y);
        let decision = decode_swipe(
            Face::F,
            Vec2::new(80.0, 3.0),
            camera.right().as_vec3(),
            camera.up().as_vec3(),
        )
        .unwrap();
        assert!(decision.is_clockwise());
        assert_eq!(decision.mv().notation(), "F");
        assert_eq!(decision.axis, Vec3::Z);
        assert!(decision.signed_angle < 0.0);
    }

    #[test]
    fn test_oblique_camera() {
        let camera = Transform::from_xyz(6.0, 5.5, 7.5).looking_at(Vec3::ZERO, Vec3::Y);
        let right = camera.right().as_vec3();
        let up = camera.up().as_vec3();
        // Dragging the top face's front half to the right turns U counter-clockwise.
        let top = decode_swipe(Face::U, Vec2::new(50.0, 0.0), right, up).unwrap();
        assert_eq!(top.mv().notation(), "U'");
        // Dragging the right face upward turns R clockwise.
        let side = decode_swipe(Face::R, Vec2::new(0.0, -50.0), right, up).unwrap();
        assert_eq!(side.polarity, PosV);
        assert_eq!(side.mv().notation(), "R");
    }

    #[test]
    fn test_edge_on_swipe_is_rejected() {
        // Camera right is the face normal and the swipe is purely horizontal.
        assert_eq!(decode_swipe(Face::R, Vec2::new(50.0, 0.0), Vec3::X, Vec3::Y), None);
    }

    #[test]
    fn test_deadzone() {
        assert!(!passes_deadzone(Vec2::new(20.0, 20.0), 36.0));
        assert!(!passes_deadzone(Vec2::new(36.0, 0.0), 36.0));
        assert!(passes_deadzone(Vec2::new(30.0, 25.0), 36.0));
    }

    #[test]
    fn test_hit_policy() {
        let turned = Orientation::quarter_turns(IVec3::Y, 1);
        // An F sticker turned a quarter about +Y now faces R.
        let sticker = Some((Face::F, turned));
        let normal = Some(Vec3::new(0.45, 0.1, 0.5));
        assert_eq!(resolve_face_from_hit(sticker, normal, HitPolicy::Sticker), Some(Face::R));
        assert_eq!(resolve_face_from_hit(sticker, normal, HitPolicy::DominantNormal), Some(Face::F));
        assert_eq!(resolve_face_from_hit(None, normal, HitPolicy::Sticker), Some(Face::F));
        assert_eq!(resolve_face_from_hit(None, None, HitPolicy::Sticker), None);
    }

    #[test]
    fn test_press_needs_idle_cube_and_single_primary_pointer() {
        let idle = GestureState::Idle;
        assert!(accepts_press(PointerButton::Primary, 1, false, idle));
        assert!(accepts_press(PointerButton::Primary, 0, false, idle));
        assert!(!accepts_press(PointerButton::Secondary, 0, false, idle));
        assert!(!accepts_press(PointerButton::Primary, 2, false, idle));
        // animating, or a scramble still queued
        assert!(!accepts_press(PointerButton::Primary, 1, true, idle));
        assert!(!accepts_press(PointerButton::Primary, 1, false, GestureState::Spent));
    }

    #[test]
    fn test_drag_locks_once_past_deadzone() {
        let tracking = GestureState::Tracking {
            face: Face::F,
            pointer: PointerId::Mouse,
        };
        let near = Vec2::new(10.0, 5.0);
        let far = Vec2::new(48.0, 3.0);
        assert_eq!(drag_step(tracking, PointerId::Mouse, 0, near, 36.0), DragStep::Pending);
        assert_eq!(drag_step(tracking, PointerId::Mouse, 0, far, 36.0), DragStep::Locked(Face::F));
        // After locking the state is Spent and further drags do nothing.
        assert_eq!(drag_step(GestureState::Spent, PointerId::Mouse, 0, far * 2.0, 36.0), DragStep::Ignored);
        assert_eq!(drag_step(GestureState::Idle, PointerId::Mouse, 0, far, 36.0), DragStep::Ignored);
    }

    #[test]
    fn test_drag_from_other_pointer_or_second_touch() {
        let tracking = GestureState::Tracking {
            face: Face::U,
            pointer: PointerId::Touch(3),
        };
        let far = Vec2::new(0.0, 80.0);
        assert_eq!(drag_step(tracking, PointerId::Touch(4), 1, far, 36.0), DragStep::Ignored);
        assert_eq!(drag_step(tracking, PointerId::Touch(3), 2, far, 36.0), DragStep::Yielded);
    }
}

//! Orbit and layer gestures hand the pointer back and forth frame by frame.
use bevy::ecs::message::Messages;
use bevy::input::InputPlugin;
use bevy::input::touch::{TouchInput, TouchPhase};
use bevy::picking::pointer::PointerId;
use bevy::prelude::*;

use rubiks_cube_3d::utils::animation::MoveRequest;
use rubiks_cube_3d::utils::face::Face;
use rubiks_cube_3d::utils::gesture::{
    DragStep, GestureState, drag_step, end_gesture_on_release, yield_to_multi_touch,
};
use rubiks_cube_3d::utils::objects::OrbitControl;

const DEADZONE: f32 = 36.0;

/// Input plus the two gesture systems, with a gesture already tracking `pointer` on F.
fn gesture_app(pointer: PointerId) -> App {
    let mut app = App::new();
    app.add_plugins(InputPlugin)
        .add_message::<MoveRequest>()
        .insert_resource(GestureState::Tracking {
            face: Face::F,
            pointer,
        })
        // The press observer cleared it.
        .insert_resource(OrbitControl { enabled: false })
        .add_systems(Update, (yield_to_multi_touch, end_gesture_on_release).chain());
    app
}

fn touch(app: &mut App, id: u64, phase: TouchPhase) {
    app.world_mut().resource_mut::<Messages<TouchInput>>().write(TouchInput {
        phase,
        position: Vec2::new(100.0 + 40.0 * id as f32, 200.0),
        window: Entity::PLACEHOLDER,
        force: None,
        id,
    });
}

fn gesture(app: &App) -> GestureState {
    *app.world().resource::<GestureState>()
}

fn orbit_enabled(app: &App) -> bool {
    app.world().resource::<OrbitControl>().enabled
}

fn move_requests(app: &App) -> usize {
    let messages = app.world().resource::<Messages<MoveRequest>>();
    messages.get_cursor().read(messages).count()
}

#[test]
fn test_orbit_disabled_while_tracking_and_back_on_release() {
    let mut app = gesture_app(PointerId::Mouse);
    app.world_mut()
        .resource_mut::<ButtonInput<MouseButton>>()
        .press(MouseButton::Left);

    for _ in 0..3 {
        app.update();
        assert!(matches!(gesture(&app), GestureState::Tracking { .. }));
        assert!(!orbit_enabled(&app));
    }

    app.world_mut()
        .resource_mut::<ButtonInput<MouseButton>>()
        .release(MouseButton::Left);
    app.update();
    assert_eq!(gesture(&app), GestureState::Idle);
    assert!(orbit_enabled(&app));
}

#[test]
fn test_second_touch_hands_control_to_camera() {
    let mut app = gesture_app(PointerId::Touch(0));
    touch(&mut app, 0, TouchPhase::Started);
    app.update();
    assert!(matches!(gesture(&app), GestureState::Tracking { .. }));
    assert!(!orbit_enabled(&app));

    touch(&mut app, 1, TouchPhase::Started);
    app.update();
    assert_eq!(gesture(&app), GestureState::Spent);
    assert!(orbit_enabled(&app));

    // A two-finger swipe far past the deadzone still turns nothing.
    let far = Vec2::new(120.0, 0.0);
    assert_eq!(drag_step(gesture(&app), PointerId::Touch(0), 2, far, DEADZONE), DragStep::Ignored);
    assert_eq!(move_requests(&app), 0);

    // Lifting one finger does not restart the gesture.
    touch(&mut app, 1, TouchPhase::Ended);
    app.update();
    assert_eq!(gesture(&app), GestureState::Spent);

    touch(&mut app, 0, TouchPhase::Ended);
    app.update();
    assert_eq!(gesture(&app), GestureState::Idle);
    assert!(orbit_enabled(&app));
}

#[test]
fn test_locked_gesture_issues_nothing_until_release() {
    let mut app = gesture_app(PointerId::Mouse);
    app.world_mut()
        .resource_mut::<ButtonInput<MouseButton>>()
        .press(MouseButton::Left);
    app.update();

    assert_eq!(
        drag_step(gesture(&app), PointerId::Mouse, 0, Vec2::new(12.0, 4.0), DEADZONE),
        DragStep::Pending
    );
    let past = Vec2::new(50.0, 6.0);
    assert_eq!(
        drag_step(gesture(&app), PointerId::Mouse, 0, past, DEADZONE),
        DragStep::Locked(Face::F)
    );
    // The drag observer spends the gesture once it locks.
    *app.world_mut().resource_mut::<GestureState>() = GestureState::Spent;

    for step in 1..=3 {
        app.update();
        assert_eq!(gesture(&app), GestureState::Spent);
        assert!(!orbit_enabled(&app), "camera stays parked while the pointer is held");
        let further = past * (1.0 + step as f32);
        assert_eq!(drag_step(gesture(&app), PointerId::Mouse, 0, further, DEADZONE), DragStep::Ignored);
    }
    assert_eq!(move_requests(&app), 0);

    app.world_mut()
        .resource_mut::<ButtonInput<MouseButton>>()
        .release(MouseButton::Left);
    app.update();
    assert_eq!(gesture(&app), GestureState::Idle);
    assert!(orbit_enabled(&app));
}

//! Drives the engine systems headlessly, frame by frame.
use std::time::Duration;

use bevy::ecs::message::Messages;
use bevy::prelude::*;
use bevy::time::TimeUpdateStrategy;

use rubiks_cube_3d::utils::animation::{
    CubeEnginePlugin, MoveRequest, ResetRequest, ScrambleRequest, SequenceRequest,
};
use rubiks_cube_3d::utils::cube_state::CubeState;
use rubiks_cube_3d::utils::face::{Move, parse_sequence};
use rubiks_cube_3d::utils::move_log::MoveHistory;
use rubiks_cube_3d::utils::objects::RandomGen;
use rubiks_cube_3d::utils::sequence::MoveSequence;

const FRAME: Duration = Duration::from_millis(16);
const MAX_FRAMES: usize = 2000;

fn engine_app(seed: u64) -> App {
    let mut app = App::new();
    app.add_plugins(MinimalPlugins)
        .insert_resource(TimeUpdateStrategy::ManualDuration(FRAME))
        .insert_resource(RandomGen::from_seed(seed))
        .add_plugins(CubeEnginePlugin);
    // Startup plus a first frame so time starts advancing.
    app.update();
    app.update();
    app
}

fn send<M: Message>(app: &mut App, message: M) {
    app.world_mut().resource_mut::<Messages<M>>().write(message);
}

fn is_idle(app: &App) -> bool {
    !app.world().resource::<CubeState>().is_animating() && app.world().resource::<MoveSequence>().is_empty()
}

fn run_until_idle(app: &mut App) -> usize {
    for frame in 1..=MAX_FRAMES {
        app.update();
        if is_idle(app) {
            return frame;
        }
    }
    panic!("engine still busy after {MAX_FRAMES} frames");
}

fn is_home(app: &App) -> bool {
    app.world().resource::<CubeState>().cubies() == CubeState::solved().cubies()
}

fn moves(text: &str) -> Vec<Move> {
    parse_sequence(text).moves
}

fn history_notation(app: &App) -> String {
    let history = app.world().resource::<MoveHistory>();
    history.recent_notation(history.len())
}

#[test]
fn test_turn_animates_then_commits() {
    let mut app = engine_app(69);
    send(&mut app, MoveRequest::new("R".parse().unwrap()));
    app.update();

    let state = app.world().resource::<CubeState>();
    assert!(state.is_animating());
    // Committed state is untouched until the bake.
    assert_eq!(state.cubies(), CubeState::solved().cubies());

    let frames = run_until_idle(&mut app);
    assert!(frames > 1, "a 150ms turn cannot finish in one 16ms frame");

    let mut expected = CubeState::solved();
    expected.apply_instant("R".parse().unwrap()).unwrap();
    assert_eq!(app.world().resource::<CubeState>().cubies(), expected.cubies());
    assert_eq!(history_notation(&app), "R");
}

#[test]
fn test_requests_while_animating_are_dropped() {
    let mut app = engine_app(69);
    send(&mut app, MoveRequest::new("R".parse().unwrap()));
    send(&mut app, MoveRequest::new("U".parse().unwrap()));
    app.update();
    send(&mut app, MoveRequest::new("F".parse().unwrap()));
    app.update();

    let in_flight = app.world().resource::<CubeState>().animation().map(|a| a.mv);
    assert_eq!(in_flight, Some("R".parse().unwrap()));

    run_until_idle(&mut app);
    assert_eq!(history_notation(&app), "R");
    let mut expected = CubeState::solved();
    expected.apply_instant("R".parse().unwrap()).unwrap();
    assert_eq!(app.world().resource::<CubeState>().cubies(), expected.cubies());
}

#[test]
fn test_sequence_plays_one_turn_at_a_time() {
    let mut app = engine_app(69);
    send(
        &mut app,
        SequenceRequest {
            moves: moves("R U R' U' F2"),
        },
    );

    let mut last_len = 0;
    for _ in 0..MAX_FRAMES {
        app.update();
        let len = app.world().resource::<MoveHistory>().len();
        // never more than one commit per frame
        assert!(len <= last_len + 1);
        last_len = len;
        if is_idle(&app) {
            break;
        }
    }
    assert!(is_idle(&app));
    assert_eq!(history_notation(&app), "R U R' U' F2");

    let history = app.world().resource::<MoveHistory>();
    for pair in history.all().windows(2) {
        assert!(pair[0].timestamp < pair[1].timestamp);
    }

    let mut expected = CubeState::solved();
    for mv in moves("R U R' U' F2") {
        expected.apply_instant(mv).unwrap();
    }
    assert_eq!(app.world().resource::<CubeState>().cubies(), expected.cubies());
}

#[test]
fn test_second_sequence_rejected_while_playing() {
    let mut app = engine_app(69);
    send(&mut app, SequenceRequest { moves: moves("R U") });
    app.update();
    send(&mut app, SequenceRequest { moves: moves("L") });
    run_until_idle(&mut app);
    assert_eq!(history_notation(&app), "R U");
}

#[test]
fn test_scramble_is_reproducible() {
    let mut first = engine_app(69);
    let mut second = engine_app(69);
    for app in [&mut first, &mut second] {
        send(app, ScrambleRequest { count: Some(20) });
        run_until_idle(app);
    }
    assert_eq!(first.world().resource::<MoveHistory>().len(), 20);
    assert_eq!(history_notation(&first), history_notation(&second));
    assert_eq!(
        first.world().resource::<CubeState>().cubies(),
        second.world().resource::<CubeState>().cubies()
    );
    assert!(first.world().resource::<CubeState>().is_permutation());
}

#[test]
fn test_reset_rejected_while_animating() {
    let mut app = engine_app(69);
    send(&mut app, MoveRequest::new("F".parse().unwrap()));
    app.update();
    send(&mut app, ResetRequest);
    run_until_idle(&mut app);
    assert_eq!(history_notation(&app), "F");
    assert!(!is_home(&app));

    send(&mut app, ResetRequest);
    app.update();
    assert!(is_home(&app));
    assert!(app.world().resource::<MoveHistory>().is_empty());
}

#[test]
fn test_duration_override() {
    let mut app = engine_app(69);
    send(
        &mut app,
        MoveRequest {
            mv: "D2".parse().unwrap(),
            duration: Some(Duration::ZERO),
        },
    );
    app.update();
    assert!(!app.world().resource::<CubeState>().is_animating());
    assert_eq!(history_notation(&app), "D2");
}

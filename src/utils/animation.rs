//! Frame-driven layer turns: move requests in, committed moves out.
use std::time::Duration;

use bevy::prelude::*;

use crate::utils::config::CubeConfig;
use crate::utils::cube_state::CubeState;
use crate::utils::face::Move;
use crate::utils::move_log::MoveHistory;
use crate::utils::objects::{Cubie, RandomGen};
use crate::utils::sequence::{MoveSequence, scramble_moves};

/// Request for a single turn. Dropped if a turn is already animating.
#[derive(Message, Clone, Copy, Debug)]
pub struct MoveRequest {
    pub mv: Move,
    /// Overrides the configured turn duration.
    pub duration: Option<Duration>,
}

impl MoveRequest {
    pub fn new(mv: Move) -> Self {
        Self { mv, duration: None }
    }
}

/// Restore the solved cube and clear the history.
#[derive(Message, Clone, Copy, Debug, Default)]
pub struct ResetRequest;

/// Play `count` random moves, or the configured scramble length.
#[derive(Message, Clone, Copy, Debug, Default)]
pub struct ScrambleRequest {
    pub count: Option<usize>,
}

/// Play `moves` one after the other.
#[derive(Message, Clone, Debug)]
pub struct SequenceRequest {
    pub moves: Vec<Move>,
}

/// A turn finished and was baked into the discrete state.
#[derive(Message, Clone, Debug, PartialEq)]
pub struct MoveCommitted {
    pub mv: Move,
    pub notation: String,
    pub at: Duration,
}

/// Ordering of the engine systems within `Update`.
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub enum EngineSystems {
    /// Requests become turns or are dropped.
    Requests,
    /// The in-flight turn is sampled and possibly committed.
    Advance,
    /// Cubie entities follow the engine state.
    Sync,
}

/// Engine-only plugin: state, messages and the turn state machine. No rendering.
pub struct CubeEnginePlugin;

impl Plugin for CubeEnginePlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<CubeConfig>()
            .init_resource::<CubeState>()
            .init_resource::<MoveHistory>()
            .init_resource::<MoveSequence>()
            .add_message::<MoveRequest>()
            .add_message::<ResetRequest>()
            .add_message::<ScrambleRequest>()
            .add_message::<SequenceRequest>()
            .add_message::<MoveCommitted>()
            .add_systems(Startup, seed_random_gen)
            .configure_sets(
                Update,
                (EngineSystems::Requests, EngineSystems::Advance, EngineSystems::Sync).chain(),
            )
            .add_systems(
                Update,
                (
                    handle_reset_requests,
                    handle_scramble_requests,
                    handle_sequence_requests,
                    handle_move_requests,
                    crate::utils::sequence::play_sequence,
                )
                    .chain()
                    .in_set(EngineSystems::Requests),
            )
            .add_systems(Update, advance_turn.in_set(EngineSystems::Advance))
            .add_systems(Update, sync_cubie_transforms.in_set(EngineSystems::Sync));
    }
}

/// Seeds the scramble generator from the configuration unless one was inserted already.
fn seed_random_gen(mut commands: Commands, config: Res<CubeConfig>, existing: Option<Res<RandomGen>>) {
    if existing.is_none() {
        commands.insert_resource(RandomGen::from_seed(config.seed));
    }
}

// Bevy needs a function for systems
pub fn is_idle(state: Res<CubeState>, sequence: Res<MoveSequence>) -> bool {
    !state.is_animating() && sequence.is_empty()
}

pub fn handle_move_requests(
    time: Res<Time>,
    config: Res<CubeConfig>,
    mut state: ResMut<CubeState>,
    mut requests: MessageReader<MoveRequest>,
) {
    for request in requests.read() {
        let duration = request.duration.unwrap_or_else(|| config.turn_duration());
        if let Err(err) = state.begin_turn(request.mv, time.elapsed(), duration) {
            debug!("dropped {}: {err}", request.mv);
        }
    }
}

pub fn advance_turn(
    time: Res<Time>,
    config: Res<CubeConfig>,
    mut state: ResMut<CubeState>,
    mut history: ResMut<MoveHistory>,
    mut committed: MessageWriter<MoveCommitted>,
) {
    if !state.is_animating() {
        return;
    }
    let now = time.elapsed();
    let Some(mv) = state.advance(now, config.easing) else {
        return;
    };
    let notation = mv.notation();
    info!("[{:.3}s] {notation}", now.as_secs_f32());
    history.record(mv, notation.clone(), now);
    committed.write(MoveCommitted {
        mv,
        notation,
        at: now,
    });
}

pub fn handle_reset_requests(
    mut requests: MessageReader<ResetRequest>,
    mut state: ResMut<CubeState>,
    mut history: ResMut<MoveHistory>,
    mut sequence: ResMut<MoveSequence>,
) {
    if requests.read().count() == 0 {
        return;
    }
    match state.reset() {
        Ok(()) => {
            history.clear();
            sequence.clear();
            info!("cube reset to solved");
        }
        Err(err) => debug!("reset rejected: {err}"),
    }
}

pub fn handle_scramble_requests(
    config: Res<CubeConfig>,
    state: Res<CubeState>,
    mut rng: ResMut<RandomGen>,
    mut sequence: ResMut<MoveSequence>,
    mut requests: MessageReader<ScrambleRequest>,
) {
    for request in requests.read() {
        if state.is_animating() || !sequence.is_empty() {
            debug!("scramble rejected: cube is busy");
            continue;
        }
        let count = request.count.unwrap_or(config.scramble_length);
        let moves = scramble_moves(&mut rng.random_gen, count);
        info!("scramble: {}", crate::utils::face::format_sequence(&moves));
        sequence.extend(moves, config.scramble_turn_duration());
    }
}

pub fn handle_sequence_requests(
    config: Res<CubeConfig>,
    state: Res<CubeState>,
    mut sequence: ResMut<MoveSequence>,
    mut requests: MessageReader<SequenceRequest>,
) {
    for request in requests.read() {
        if state.is_animating() || !sequence.is_empty() {
            debug!("sequence rejected: cube is busy");
            continue;
        }
        sequence.extend(request.moves.iter().copied(), config.turn_duration());
    }
}

/// Copies committed transforms, composed with the pivot, onto the cubie entities.
pub fn sync_cubie_transforms(state: Res<CubeState>, mut cubies: Query<(&Cubie, &mut Transform)>) {
    if !state.is_changed() {
        return;
    }
    for (cubie, mut transform) in &mut cubies {
        *transform = state.render_transform(cubie.id);
    }
}

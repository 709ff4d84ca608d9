//! Serialized playback of scrambles and typed sequences.
//!
//! A sequence never overlaps turns: the next move only starts once the
//! engine is idle again, one full animation at a time.
use std::collections::VecDeque;
use std::time::Duration;

use bevy::prelude::*;
use rand::Rng;

use crate::utils::cube_state::CubeState;
use crate::utils::face::{Face, Move, TurnDirection};

/// FIFO of moves waiting to be played.
#[derive(Resource, Default, Debug)]
pub struct MoveSequence {
    queue: VecDeque<(Move, Duration)>,
}

impl MoveSequence {
    pub fn extend(&mut self, moves: impl IntoIterator<Item = Move>, duration: Duration) {
        self.queue.extend(moves.into_iter().map(|mv| (mv, duration)));
    }

    pub fn peek(&self) -> Option<(Move, Duration)> {
        self.queue.front().copied()
    }

    pub fn pop(&mut self) -> Option<(Move, Duration)> {
        self.queue.pop_front()
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    pub fn clear(&mut self) {
        self.queue.clear();
    }
}

/// `count` uniformly random moves: face from the 6, direction from the 3.
pub fn scramble_moves(rng: &mut impl Rng, count: usize) -> Vec<Move> {
    (0..count)
        .map(|_| {
            let face = Face::ALL[rng.random_range(0..Face::ALL.len())];
            let direction = TurnDirection::ALL[rng.random_range(0..TurnDirection::ALL.len())];
            Move::new(face, direction)
        })
        .collect()
}

/// Starts the next queued move once the engine is idle.
pub fn play_sequence(
    time: Res<Time>,
    mut state: ResMut<CubeState>,
    mut sequence: ResMut<MoveSequence>,
) {
    if state.is_animating() {
        return;
    }
    let Some((mv, duration)) = sequence.peek() else {
        return;
    };
    match state.begin_turn(mv, time.elapsed(), duration) {
        Ok(()) => {
            sequence.pop();
            debug!("sequence: {mv} ({} left)", sequence.len());
        }
        Err(err) => debug!("sequence: {mv} deferred, {err}"),
    }
}

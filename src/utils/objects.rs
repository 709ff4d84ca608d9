// This file defines the components and resources shared by the cube systems.
use bevy::prelude::*;
use rand_chacha::ChaCha8Rng;
use rand_chacha::rand_core::SeedableRng;

use crate::utils::constants::game_constants::SEED;
use crate::utils::face::{Face, Move};

/// A resource for random number generation.
#[derive(Resource)]
pub struct RandomGen {
    pub random_gen: ChaCha8Rng,
}

impl RandomGen {
    // Creates a new `RandomGen` from a given seed.
    pub fn from_seed(seed: u64) -> Self {
        Self {
            random_gen: ChaCha8Rng::seed_from_u64(seed),
        }
    }
}

impl Default for RandomGen {
    // Creates a new `RandomGen` with the default seed.
    fn default() -> Self {
        Self::from_seed(SEED)
    }
}

/// Permanent parent of all cubies. Its transform is the frame the bake rounds in.
#[derive(Component)]
pub struct CubeRoot;

/// One rendered cubie, indexing the `CubeState` arena.
#[derive(Component, Clone, Copy, Debug)]
pub struct Cubie {
    pub id: usize,
}

/// A colored sticker. `side` is the face it showed when the cube was solved.
#[derive(Component, Clone, Copy, Debug)]
pub struct Sticker {
    pub cubie: usize,
    pub side: Face,
}

/// The one camera, orbiting the cube.
#[derive(Component)]
pub struct PersistentCamera;

/// A component that marks the HUD text.
#[derive(Component)]
pub struct HudText;

/// What a toolbar button does when pressed.
#[derive(Component, Clone, Copy, Debug, PartialEq, Eq)]
pub enum ToolbarAction {
    Turn(Move),
    Scramble,
    Reset,
}

/// Whether camera orbit input is accepted. Cleared while a single pointer drives a layer.
#[derive(Resource, Debug)]
pub struct OrbitControl {
    pub enabled: bool,
}

impl Default for OrbitControl {
    fn default() -> Self {
        Self { enabled: true }
    }
}

/// Text line for typing a move sequence.
#[derive(Resource, Default, Debug)]
pub struct NotationEntry {
    pub active: bool,
    pub buffer: String,
}

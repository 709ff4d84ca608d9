//! Wiring of the interactive cube: scene, camera, gestures, keyboard and HUD.

use crate::utils::animation::{CubeEnginePlugin, EngineSystems};
use crate::utils::camera::OrbitCameraPlugin;
use crate::utils::config::load_config;
use crate::utils::game_functions::{handle_toolbar, update_hud};
use crate::utils::gesture::GesturePlugin;
use crate::utils::inputs::InputsPlugin;
use crate::utils::setup::setup;
use bevy::prelude::*;

// Plugin for managing all the interactive systems on top of the engine.
pub struct SystemsLogicPlugin;

impl Plugin for SystemsLogicPlugin {
    /// Builds the plugin by adding the systems to the app.
    fn build(&self, app: &mut App) {
        if !app.is_plugin_added::<CubeEnginePlugin>() {
            app.add_plugins(CubeEnginePlugin);
        }
        app.add_plugins((GesturePlugin, OrbitCameraPlugin, InputsPlugin))
            // Config lands before the engine seeds its generator in Startup
            .add_systems(PreStartup, load_config)
            .add_systems(Startup, setup)
            // Inputs are requests, so they land before the engine consumes them
            .configure_sets(Update, EngineSystems::Requests.after(crate::utils::gesture::GestureSystems))
            .add_systems(Update, handle_toolbar.before(EngineSystems::Requests))
            .add_systems(Update, update_hud.after(EngineSystems::Sync));
    }
}

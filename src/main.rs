use bevy::picking::mesh_picking::MeshPickingPlugin;
use bevy::prelude::*;

use rubiks_cube_3d::utils::animation::CubeEnginePlugin;
use rubiks_cube_3d::utils::debug_functions::DebugFunctionsPlugin;
use rubiks_cube_3d::utils::systems_logic::SystemsLogicPlugin;

/// Main application function
fn main() {
    App::new()
        .insert_resource(ClearColor(Color::srgb(0.09, 0.1, 0.12)))
        .add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: "Rubik's Cube".into(),
                fit_canvas_to_parent: true,
                ..default()
            }),
            ..default()
        }))
        .add_plugins(MeshPickingPlugin)
        .add_plugins((CubeEnginePlugin, SystemsLogicPlugin, DebugFunctionsPlugin))
        .run();
}

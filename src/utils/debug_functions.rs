//! Debug functions for the cube.
use bevy::{prelude::*, window::*};

use crate::utils::constants::cube_constants::HALF;
use crate::utils::face::Face;
use crate::utils::objects::CubeRoot;

pub struct DebugFunctionsPlugin;

impl Plugin for DebugFunctionsPlugin {
    /// Adds the `toggle_vsync` and `visualize_face_axes` systems to the app.
    fn build(&self, app: &mut App) {
        app.add_systems(Update, (toggle_vsync, visualize_face_axes));
    }
}

/// Toggles VSync when the 'V' key is pressed.
fn toggle_vsync(input: Res<ButtonInput<KeyCode>>, mut window: Query<&mut Window>) {
    if input.just_pressed(KeyCode::KeyV) {
        let Ok(mut window) = window.single_mut() else {
            return;
        };

        window.present_mode = if matches!(window.present_mode, PresentMode::AutoVsync) {
            PresentMode::AutoNoVsync
        } else {
            PresentMode::AutoVsync
        };

        info!("PRESENT_MODE: {:?}", window.present_mode);
    }
}

/// Draws each face's normal (face color), local right (red) and local up (green) when 'G' is toggled on.
fn visualize_face_axes(
    mut gizmos: Gizmos,
    input: Res<ButtonInput<KeyCode>>,
    roots: Query<&GlobalTransform, With<CubeRoot>>,
    mut show_axes: Local<bool>,
) {
    if input.just_pressed(KeyCode::KeyG) {
        *show_axes = !*show_axes;
        info!("Face axes visualization: {}", *show_axes);
    }
    if !*show_axes {
        return;
    }
    let Ok(root) = roots.single() else {
        return;
    };

    let reach = HALF as f32 + 0.5;
    for face in Face::ALL {
        let center = root.transform_point(face.normal() * reach);
        let to_world = |v: Vec3| root.affine().transform_vector3(v);
        gizmos.arrow(center, center + to_world(face.normal()), face.info().color);
        gizmos.arrow(center, center + to_world(face.local_right() * 0.8), Color::srgb(1.0, 0.2, 0.2));
        gizmos.arrow(center, center + to_world(face.local_up() * 0.8), Color::srgb(0.2, 1.0, 0.2));
    }
}

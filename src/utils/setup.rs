use bevy::prelude::*;

use crate::log;
use crate::utils::camera::OrbitCamera;
use crate::utils::constants::camera_3d_constants::{
    CAMERA_3D_INITIAL_X, CAMERA_3D_INITIAL_Y, CAMERA_3D_INITIAL_Z,
};
use crate::utils::constants::cube_constants::{
    BODY_COLOR, CUBIE_SIZE, STICKER_OFFSET, STICKER_SIZE, STICKER_THICKNESS,
};
use crate::utils::constants::game_constants::HUD_FONT_SIZE;
use crate::utils::constants::lighting_constants::{
    AMBIENT_LIGHT_BRIGHTNESS, POINT_LIGHT_INTENSITY, POINT_LIGHT_POSITION, SHADOWS_ENABLED,
};
use crate::utils::cube_state::CubeState;
use crate::utils::face::Face;
use crate::utils::game_functions::spawn_toolbar;
use crate::utils::objects::{CubeRoot, Cubie, HudText, PersistentCamera, Sticker};

/// Camera, lights, cube and HUD.
pub fn setup(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    state: Res<CubeState>,
) {
    // Camera
    let orbit = OrbitCamera::from_position(Vec3::new(
        CAMERA_3D_INITIAL_X,
        CAMERA_3D_INITIAL_Y,
        CAMERA_3D_INITIAL_Z,
    ));
    commands.spawn((Camera3d::default(), orbit.transform(), orbit, PersistentCamera));

    // Light
    let [x, y, z] = POINT_LIGHT_POSITION;
    commands.spawn((
        PointLight {
            intensity: POINT_LIGHT_INTENSITY,
            shadows_enabled: SHADOWS_ENABLED,
            ..default()
        },
        Transform::from_xyz(x, y, z),
    ));

    // Ambient light
    commands.insert_resource(AmbientLight {
        color: Color::WHITE,
        brightness: AMBIENT_LIGHT_BRIGHTNESS,
        affects_lightmapped_meshes: true,
    });

    spawn_cube(&mut commands, &mut meshes, &mut materials, &state);

    // HUD
    commands.spawn((
        Text::new(""),
        TextFont {
            font_size: HUD_FONT_SIZE,
            ..default()
        },
        TextColor(Color::WHITE),
        Node {
            position_type: PositionType::Absolute,
            top: Val::Px(12.0),
            left: Val::Px(12.0),
            max_width: Val::Percent(45.0),
            ..default()
        },
        HudText,
    ));

    spawn_toolbar(&mut commands);

    log!("🧊 Cube ready");
    log!("⌨️  U D L R F B turn a face, Shift = counter-clockwise, Ctrl = half turn");
    log!("🔀 Space scrambles, Backspace resets, S types a move sequence");
    log!("🖱️  Swipe a face to turn it, drag the background or use arrows to orbit");
}

/// Spawns the cube root and its 27 cubies, each with a sticker on every exterior home side.
pub fn spawn_cube(
    commands: &mut Commands,
    meshes: &mut Assets<Mesh>,
    materials: &mut Assets<StandardMaterial>,
    state: &CubeState,
) {
    let body_mesh = meshes.add(Cuboid::new(CUBIE_SIZE, CUBIE_SIZE, CUBIE_SIZE));
    let body_material = materials.add(StandardMaterial {
        base_color: BODY_COLOR,
        perceptual_roughness: 0.6,
        ..default()
    });
    let sticker_mesh = meshes.add(Cuboid::new(STICKER_SIZE, STICKER_SIZE, STICKER_THICKNESS));
    let sticker_materials: Vec<(Face, Handle<StandardMaterial>)> = Face::ALL
        .into_iter()
        .map(|face| {
            let material = materials.add(StandardMaterial {
                base_color: face.info().color,
                perceptual_roughness: 0.35,
                ..default()
            });
            (face, material)
        })
        .collect();

    commands
        .spawn((CubeRoot, state.root(), Visibility::default()))
        .with_children(|root| {
            for (id, record) in state.cubies().iter().enumerate() {
                root.spawn((
                    Cubie { id },
                    state.render_transform(id),
                    Mesh3d(body_mesh.clone()),
                    MeshMaterial3d(body_material.clone()),
                ))
                .with_children(|cubie| {
                    for (side, material) in &sticker_materials {
                        let normal = side.info().normal;
                        // exterior sides only
                        if record.home.dot(normal) <= 0 {
                            continue;
                        }
                        cubie.spawn((
                            Sticker { cubie: id, side: *side },
                            sticker_transform(*side),
                            Mesh3d(sticker_mesh.clone()),
                            MeshMaterial3d(material.clone()),
                        ));
                    }
                });
            }
        });
}

/// Sticker placement relative to its cubie: flat on the `side` face, slightly proud of the body.
fn sticker_transform(side: Face) -> Transform {
    let normal = side.normal();
    let rotation = Quat::from_rotation_arc(Vec3::Z, normal);
    Transform::from_translation(normal * (STICKER_OFFSET + STICKER_THICKNESS / 2.0)).with_rotation(rotation)
}

//! Orbit camera around the cube: mouse, keyboard and touch.
use bevy::input::mouse::{AccumulatedMouseMotion, AccumulatedMouseScroll, MouseScrollUnit};
use bevy::prelude::*;

use crate::utils::constants::camera_3d_constants::{
    CAMERA_3D_MAX_PITCH, CAMERA_3D_MAX_RADIUS, CAMERA_3D_MIN_RADIUS, CAMERA_3D_SPEED_DRAG,
    CAMERA_3D_SPEED_ROTATE, CAMERA_3D_SPEED_SCROLL, CAMERA_3D_SPEED_ZOOM, PINCH_SENSITIVITY,
};
use crate::utils::gesture::GestureSystems;
use crate::utils::objects::OrbitControl;

/// Spherical camera coordinates around the origin.
#[derive(Component, Clone, Copy, Debug, PartialEq)]
pub struct OrbitCamera {
    pub yaw: f32,
    pub pitch: f32,
    pub radius: f32,
}

impl OrbitCamera {
    pub fn from_position(position: Vec3) -> Self {
        let radius = position.length();
        let mut orbit = Self {
            yaw: position.x.atan2(position.z),
            pitch: (position.y / radius).asin(),
            radius,
        };
        orbit.clamp();
        orbit
    }

    pub fn rotate(&mut self, d_yaw: f32, d_pitch: f32) {
        self.yaw += d_yaw;
        self.pitch += d_pitch;
        self.clamp();
    }

    pub fn zoom(&mut self, delta: f32) {
        self.radius += delta;
        self.clamp();
    }

    fn clamp(&mut self) {
        self.pitch = self.pitch.clamp(-CAMERA_3D_MAX_PITCH, CAMERA_3D_MAX_PITCH);
        self.radius = self.radius.clamp(CAMERA_3D_MIN_RADIUS, CAMERA_3D_MAX_RADIUS);
    }

    pub fn position(&self) -> Vec3 {
        let (sin_yaw, cos_yaw) = self.yaw.sin_cos();
        let (sin_pitch, cos_pitch) = self.pitch.sin_cos();
        self.radius * Vec3::new(cos_pitch * sin_yaw, sin_pitch, cos_pitch * cos_yaw)
    }

    pub fn transform(&self) -> Transform {
        Transform::from_translation(self.position()).looking_at(Vec3::ZERO, Vec3::Y)
    }
}

pub struct OrbitCameraPlugin;

impl Plugin for OrbitCameraPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<OrbitControl>().add_systems(
            Update,
            (
                (camera_mouse_inputs, camera_keyboard_inputs, camera_touch_inputs),
                apply_orbit_camera,
            )
                .chain()
                .after(GestureSystems),
        );
    }
}

/// Primary-button drag orbits, wheel zooms.
pub fn camera_mouse_inputs(
    mouse: Res<ButtonInput<MouseButton>>,
    motion: Res<AccumulatedMouseMotion>,
    scroll: Res<AccumulatedMouseScroll>,
    control: Res<OrbitControl>,
    mut cameras: Query<&mut OrbitCamera>,
) {
    let Ok(mut orbit) = cameras.single_mut() else {
        return;
    };

    if control.enabled && mouse.pressed(MouseButton::Left) && motion.delta != Vec2::ZERO {
        orbit.rotate(
            -motion.delta.x * CAMERA_3D_SPEED_DRAG,
            motion.delta.y * CAMERA_3D_SPEED_DRAG,
        );
    }

    if scroll.delta.y != 0.0 {
        let lines = match scroll.unit {
            MouseScrollUnit::Line => scroll.delta.y,
            MouseScrollUnit::Pixel => scroll.delta.y / 40.0,
        };
        orbit.zoom(-lines * CAMERA_3D_SPEED_SCROLL);
    }
}

/// Arrow keys orbit, PageUp/PageDown zoom.
pub fn camera_keyboard_inputs(
    keyboard: Res<ButtonInput<KeyCode>>,
    timer: Res<Time>,
    mut cameras: Query<&mut OrbitCamera>,
) {
    let Ok(mut orbit) = cameras.single_mut() else {
        return;
    };

    let speed = CAMERA_3D_SPEED_ROTATE * timer.delta_secs();
    let zoom_speed = CAMERA_3D_SPEED_ZOOM * timer.delta_secs();

    let mut d_yaw = 0.0;
    let mut d_pitch = 0.0;
    let mut d_radius = 0.0;
    if keyboard.pressed(KeyCode::ArrowLeft) {
        d_yaw -= speed;
    }
    if keyboard.pressed(KeyCode::ArrowRight) {
        d_yaw += speed;
    }
    if keyboard.pressed(KeyCode::ArrowUp) {
        d_pitch += speed;
    }
    if keyboard.pressed(KeyCode::ArrowDown) {
        d_pitch -= speed;
    }
    if keyboard.pressed(KeyCode::PageUp) {
        d_radius -= zoom_speed;
    }
    if keyboard.pressed(KeyCode::PageDown) {
        d_radius += zoom_speed;
    }

    if d_yaw != 0.0 || d_pitch != 0.0 {
        orbit.rotate(d_yaw, d_pitch);
    }
    if d_radius != 0.0 {
        orbit.zoom(d_radius);
    }
}

/// One finger orbits when no layer gesture owns it; two fingers orbit by their
/// mean motion and pinch to zoom.
pub fn camera_touch_inputs(
    touches: Res<Touches>,
    control: Res<OrbitControl>,
    mut cameras: Query<&mut OrbitCamera>,
) {
    let Ok(mut orbit) = cameras.single_mut() else {
        return;
    };

    let active: Vec<_> = touches.iter().collect();
    match active.as_slice() {
        [single] if control.enabled => {
            let delta = single.delta();
            if delta != Vec2::ZERO {
                orbit.rotate(-delta.x * CAMERA_3D_SPEED_DRAG, delta.y * CAMERA_3D_SPEED_DRAG);
            }
        }
        [first, second, ..] => {
            let mean = (first.delta() + second.delta()) * 0.5;
            if mean != Vec2::ZERO {
                orbit.rotate(-mean.x * CAMERA_3D_SPEED_DRAG, mean.y * CAMERA_3D_SPEED_DRAG);
            }
            let before = first.previous_position().distance(second.previous_position());
            let now = first.position().distance(second.position());
            let pinch = now - before;
            if pinch != 0.0 {
                // Fingers apart zoom in.
                orbit.zoom(-pinch * PINCH_SENSITIVITY);
            }
        }
        _ => {}
    }
}

pub fn apply_orbit_camera(mut cameras: Query<(&OrbitCamera, &mut Transform), Changed<OrbitCamera>>) {
    for (orbit, mut transform) in &mut cameras {
        *transform = orbit.transform();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_position_round_trips() {
        let start = Vec3::new(6.0, 5.5, 7.5);
        let orbit = OrbitCamera::from_position(start);
        assert!(orbit.position().abs_diff_eq(start, 1e-4));
    }

    #[test]
    fn test_radius_and_pitch_are_clamped() {
        let mut orbit = OrbitCamera::from_position(Vec3::new(0.0, 0.0, 10.0));
        orbit.zoom(-100.0);
        assert_eq!(orbit.radius, CAMERA_3D_MIN_RADIUS);
        orbit.zoom(100.0);
        assert_eq!(orbit.radius, CAMERA_3D_MAX_RADIUS);
        orbit.rotate(0.0, 10.0);
        assert_eq!(orbit.pitch, CAMERA_3D_MAX_PITCH);
    }

    #[test]
    fn test_transform_looks_at_origin() {
        let orbit = OrbitCamera::from_position(Vec3::new(-3.0, 4.0, 5.0));
        let transform = orbit.transform();
        let forward = transform.forward().as_vec3();
        assert!(forward.abs_diff_eq(-transform.translation.normalize(), 1e-5));
    }
}

// Constants used by the cube engine and the game shell, structured into modules.

/// 3D camera
pub mod camera_3d_constants {
    pub const CAMERA_3D_INITIAL_X: f32 = 6.0;
    pub const CAMERA_3D_INITIAL_Y: f32 = 5.5;
    pub const CAMERA_3D_INITIAL_Z: f32 = 7.5;

    // Radians per logical pixel of pointer motion.
    pub const CAMERA_3D_SPEED_DRAG: f32 = 0.008;
    // Radians per second for keyboard orbit.
    pub const CAMERA_3D_SPEED_ROTATE: f32 = 1.6;
    // Units per second for keyboard zoom.
    pub const CAMERA_3D_SPEED_ZOOM: f32 = 6.0;
    // Units per wheel line.
    pub const CAMERA_3D_SPEED_SCROLL: f32 = 0.6;
    // Units per pixel of pinch distance change.
    pub const PINCH_SENSITIVITY: f32 = 0.02;

    // Radius range for the camera's orbit.
    pub const CAMERA_3D_MIN_RADIUS: f32 = 4.0;
    pub const CAMERA_3D_MAX_RADIUS: f32 = 18.0;

    // Keep away from the poles so `look_at` with +Y up stays well defined.
    pub const CAMERA_3D_MAX_PITCH: f32 = 1.45;
}

/// Cube geometry
pub mod cube_constants {
    use bevy::prelude::Color;

    /// Cubies per edge.
    pub const CUBE_DIM: i32 = 3;
    /// Largest grid coordinate, the grid runs over -HALF..=HALF.
    pub const HALF: i32 = (CUBE_DIM - 1) / 2;
    /// Total number of cubies.
    pub const CUBIE_COUNT: usize = 27;
    /// Cubies in one face layer.
    pub const LAYER_SIZE: usize = 9;

    /// Tolerance used when comparing continuous positions against grid planes.
    pub const LAYER_EPSILON: f32 = 0.5;

    // Rendered sizes, grid step is 1.0.
    pub const CUBIE_SIZE: f32 = 0.95;
    pub const STICKER_SIZE: f32 = 0.82;
    pub const STICKER_THICKNESS: f32 = 0.02;
    pub const STICKER_OFFSET: f32 = CUBIE_SIZE / 2.0;

    pub const BODY_COLOR: Color = Color::srgb(0.063, 0.067, 0.075);

    // Classic color scheme
    pub const COLOR_U: Color = Color::srgb(1.0, 1.0, 1.0); // white
    pub const COLOR_D: Color = Color::srgb(1.0, 1.0, 0.0); // yellow
    pub const COLOR_L: Color = Color::srgb(1.0, 0.5, 0.0); // orange
    pub const COLOR_R: Color = Color::srgb(1.0, 0.0, 0.0); // red
    pub const COLOR_F: Color = Color::srgb(0.0, 1.0, 0.0); // green
    pub const COLOR_B: Color = Color::srgb(0.0, 0.0, 1.0); // blue
}

/// Layer turn animation
pub mod animation_constants {
    pub const TURN_DURATION_MS: u64 = 150;
    pub const SCRAMBLE_TURN_DURATION_MS: u64 = 120;
    pub const SCRAMBLE_LENGTH: usize = 20;
}

/// Pointer and touch gestures
pub mod gesture_constants {
    /// Swipe length in logical pixels before a layer gesture commits to a direction.
    pub const SWIPE_DEADZONE_PX: f32 = 36.0;
}

/// Lighting constants
pub mod lighting_constants {
    pub const AMBIENT_LIGHT_BRIGHTNESS: f32 = 400.0;
    pub const POINT_LIGHT_INTENSITY: f32 = 3_000_000.0;
    pub const POINT_LIGHT_POSITION: [f32; 3] = [5.0, 7.0, 9.0];

    #[cfg(target_arch = "wasm32")]
    pub const SHADOWS_ENABLED: bool = false; // Shadows show artifacts on WASM
    #[cfg(not(target_arch = "wasm32"))]
    pub const SHADOWS_ENABLED: bool = true;
}

/// Generic game constants
pub mod game_constants {
    // Seed for the random number generator.
    pub const SEED: u64 = 69;

    // Number of most recent moves shown by the history panel.
    pub const HISTORY_WINDOW: usize = 200;

    // Optional runtime configuration file, looked up in the working directory.
    pub const CONFIG_PATH: &str = "cube.toml";

    pub const HUD_FONT_SIZE: f32 = 18.0;
}

pub mod toolbar_constants {
    use bevy::prelude::Color;

    pub const TOOLBAR_FONT_SIZE: f32 = 16.0;
    pub const TOOLBAR_BUTTON_WIDTH: f32 = 44.0;
    pub const TOOLBAR_BUTTON_HEIGHT: f32 = 34.0;
    pub const TOOLBAR_GAP: f32 = 6.0;

    pub const BUTTON_NORMAL: Color = Color::srgb(0.18, 0.19, 0.22);
    pub const BUTTON_HOVERED: Color = Color::srgb(0.27, 0.28, 0.32);
    pub const BUTTON_PRESSED: Color = Color::srgb(0.38, 0.52, 0.36);
}

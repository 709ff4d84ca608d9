pub mod utils {
    pub mod animation;
    pub mod camera;
    pub mod config;
    pub mod constants;
    pub mod cube_state;
    pub mod debug_functions;
    pub mod face;
    pub mod game_functions;
    pub mod gesture;
    pub mod inputs;
    pub mod macros;
    pub mod move_log;
    pub mod objects;
    pub mod orientation;
    pub mod sequence;
    pub mod setup;
    pub mod systems_logic;
}

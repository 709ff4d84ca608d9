//! Keyboard command surface: face turns, scramble, reset and typed sequences.
use bevy::input::ButtonState;
use bevy::input::keyboard::{Key, KeyboardInput};
use bevy::prelude::*;

use crate::utils::animation::{
    EngineSystems, MoveRequest, ResetRequest, ScrambleRequest, SequenceRequest, is_idle,
};
use crate::utils::face::{Face, Move, TurnDirection, parse_sequence};
use crate::utils::objects::NotationEntry;

/// Plugin for handling inputs
pub struct InputsPlugin;

impl Plugin for InputsPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<NotationEntry>().add_systems(
            Update,
            (
                handle_notation_entry,
                handle_command_keys,
                // Allow face turns only if not animating
                handle_face_keys.run_if(is_idle),
            )
                .chain()
                .before(EngineSystems::Requests),
        );
    }
}

const FACE_KEYS: [(KeyCode, Face); 6] = [
    (KeyCode::KeyU, Face::U),
    (KeyCode::KeyD, Face::D),
    (KeyCode::KeyL, Face::L),
    (KeyCode::KeyR, Face::R),
    (KeyCode::KeyF, Face::F),
    (KeyCode::KeyB, Face::B),
];

/// Ctrl wins over Shift.
pub fn direction_from_modifiers(shift: bool, ctrl: bool) -> TurnDirection {
    if ctrl {
        TurnDirection::Double
    } else if shift {
        TurnDirection::CounterClockwise
    } else {
        TurnDirection::Clockwise
    }
}

pub fn handle_face_keys(
    keyboard: Res<ButtonInput<KeyCode>>,
    entry: Res<NotationEntry>,
    mut requests: MessageWriter<MoveRequest>,
) {
    if entry.active {
        return;
    }
    let shift = keyboard.any_pressed([KeyCode::ShiftLeft, KeyCode::ShiftRight]);
    let ctrl = keyboard.any_pressed([KeyCode::ControlLeft, KeyCode::ControlRight]);
    let direction = direction_from_modifiers(shift, ctrl);

    // One turn per frame; the rest would be dropped as busy anyway.
    if let Some((_, face)) = FACE_KEYS.iter().find(|(key, _)| keyboard.just_pressed(*key)) {
        requests.write(MoveRequest::new(Move::new(*face, direction)));
    }
}

pub fn handle_command_keys(
    keyboard: Res<ButtonInput<KeyCode>>,
    entry: Res<NotationEntry>,
    mut scrambles: MessageWriter<ScrambleRequest>,
    mut resets: MessageWriter<ResetRequest>,
) {
    if entry.active {
        return;
    }
    if keyboard.just_pressed(KeyCode::Space) {
        scrambles.write(ScrambleRequest::default());
    }
    if keyboard.just_pressed(KeyCode::Backspace) {
        resets.write(ResetRequest);
    }
}

/// `S` opens the entry line, Enter plays it, Escape cancels.
pub fn handle_notation_entry(
    mut keys: MessageReader<KeyboardInput>,
    mut entry: ResMut<NotationEntry>,
    mut sequences: MessageWriter<SequenceRequest>,
) {
    for key in keys.read() {
        if key.state != ButtonState::Pressed {
            continue;
        }
        if !entry.active {
            if key.key_code == KeyCode::KeyS && !key.repeat {
                entry.active = true;
                entry.buffer.clear();
            }
            continue;
        }
        match &key.logical_key {
            Key::Enter => {
                entry.active = false;
                let text = std::mem::take(&mut entry.buffer);
                let parsed = parse_sequence(&text);
                if !parsed.skipped.is_empty() {
                    debug!("skipped {} malformed token(s)", parsed.skipped.len());
                }
                if !parsed.moves.is_empty() {
                    info!("sequence: {text}");
                    sequences.write(SequenceRequest { moves: parsed.moves });
                }
            }
            Key::Escape => {
                entry.active = false;
                entry.buffer.clear();
            }
            Key::Backspace => {
                entry.buffer.pop();
            }
            Key::Space => entry.buffer.push(' '),
            Key::Character(text) => entry.buffer.push_str(text),
            _ => {}
        }
    }
}

//! On-screen UI: the HUD text (move count, timestamped history, entry line)
//! and the toolbar of turn, scramble and reset buttons.
use bevy::prelude::*;

use crate::utils::animation::{MoveRequest, ResetRequest, ScrambleRequest};
use crate::utils::config::CubeConfig;
use crate::utils::constants::toolbar_constants::{
    BUTTON_HOVERED, BUTTON_NORMAL, BUTTON_PRESSED, TOOLBAR_BUTTON_HEIGHT, TOOLBAR_BUTTON_WIDTH,
    TOOLBAR_FONT_SIZE, TOOLBAR_GAP,
};
use crate::utils::cube_state::CubeState;
use crate::utils::face::{Face, Move, TurnDirection};
use crate::utils::move_log::MoveHistory;
use crate::utils::objects::{HudText, NotationEntry, ToolbarAction};
use crate::utils::sequence::MoveSequence;

pub fn hud_text(history: &MoveHistory, window: usize, queued: usize, entry: &NotationEntry) -> String {
    let mut text = format!("Moves: {}", history.len());
    if queued > 0 {
        text.push_str(&format!("  [{queued} queued]"));
    }
    let lines = history.recent_lines(window);
    if !lines.is_empty() {
        text.push('\n');
        text.push_str(&lines);
    }
    if entry.active {
        text.push_str(&format!("\n> {}_", entry.buffer));
    }
    text
}

/// Rewrites the HUD when anything it shows has changed.
pub fn update_hud(
    config: Res<CubeConfig>,
    history: Res<MoveHistory>,
    sequence: Res<MoveSequence>,
    entry: Res<NotationEntry>,
    mut huds: Query<&mut Text, With<HudText>>,
) {
    if !(history.is_changed() || entry.is_changed() || sequence.is_changed()) {
        return;
    }
    let text = hud_text(&history, config.history_window, sequence.len(), &entry);
    for mut hud in &mut huds {
        hud.0.clone_from(&text);
    }
}

/// Buttons in toolbar order: clockwise and counter-clockwise for each face, then Scramble and Reset.
pub fn toolbar_actions() -> Vec<ToolbarAction> {
    let mut actions: Vec<ToolbarAction> = Face::ALL
        .into_iter()
        .flat_map(|face| {
            [TurnDirection::Clockwise, TurnDirection::CounterClockwise]
                .map(|direction| ToolbarAction::Turn(Move::new(face, direction)))
        })
        .collect();
    actions.extend([ToolbarAction::Scramble, ToolbarAction::Reset]);
    actions
}

pub fn toolbar_label(action: ToolbarAction) -> String {
    match action {
        ToolbarAction::Turn(mv) => mv.notation(),
        ToolbarAction::Scramble => "Scramble".to_string(),
        ToolbarAction::Reset => "Reset".to_string(),
    }
}

/// Spawns the button row along the bottom edge of the viewport.
pub fn spawn_toolbar(commands: &mut Commands) {
    commands
        .spawn(Node {
            position_type: PositionType::Absolute,
            bottom: Val::Px(12.0),
            left: Val::Px(12.0),
            right: Val::Px(12.0),
            flex_wrap: FlexWrap::Wrap,
            justify_content: JustifyContent::Center,
            column_gap: Val::Px(TOOLBAR_GAP),
            row_gap: Val::Px(TOOLBAR_GAP),
            ..default()
        })
        .with_children(|parent| {
            for action in toolbar_actions() {
                let width = match action {
                    ToolbarAction::Turn(_) => Val::Px(TOOLBAR_BUTTON_WIDTH),
                    // Wide enough for the word
                    _ => Val::Px(TOOLBAR_BUTTON_WIDTH * 2.2),
                };
                parent
                    .spawn((
                        Button,
                        Node {
                            width,
                            height: Val::Px(TOOLBAR_BUTTON_HEIGHT),
                            justify_content: JustifyContent::Center,
                            align_items: AlignItems::Center,
                            ..default()
                        },
                        BackgroundColor(BUTTON_NORMAL),
                        action,
                    ))
                    .with_children(|button| {
                        button.spawn((
                            Text::new(toolbar_label(action)),
                            TextFont {
                                font_size: TOOLBAR_FONT_SIZE,
                                ..default()
                            },
                            TextColor(Color::WHITE),
                        ));
                    });
            }
        });
}

/// Turns a button press into an engine request. Face turns wait for an idle cube,
/// scramble and reset go through and the engine rejects them when busy.
pub fn handle_toolbar(
    mut buttons: Query<(&Interaction, &ToolbarAction, Option<&mut BackgroundColor>), Changed<Interaction>>,
    state: Res<CubeState>,
    sequence: Res<MoveSequence>,
    mut moves: MessageWriter<MoveRequest>,
    mut scrambles: MessageWriter<ScrambleRequest>,
    mut resets: MessageWriter<ResetRequest>,
) {
    for (interaction, action, background) in &mut buttons {
        if let Some(mut background) = background {
            background.0 = match interaction {
                Interaction::Pressed => BUTTON_PRESSED,
                Interaction::Hovered => BUTTON_HOVERED,
                Interaction::None => BUTTON_NORMAL,
            };
        }
        if *interaction != Interaction::Pressed {
            continue;
        }
        match *action {
            ToolbarAction::Turn(mv) => {
                if state.is_animating() || !sequence.is_empty() {
                    debug!("toolbar {mv} ignored: cube is busy");
                    continue;
                }
                moves.write(MoveRequest::new(mv));
            }
            ToolbarAction::Scramble => {
                scrambles.write(ScrambleRequest::default());
            }
            ToolbarAction::Reset => {
                resets.write(ResetRequest);
            }
        }
    }
}

use raylib::prelude::*;

use gridcaster::core::input::{InputState, Key};

const HELD: &[(KeyboardKey, Key)] = &[
    (KeyboardKey::KEY_W, Key::Forward),
    (KeyboardKey::KEY_S, Key::Back),
    (KeyboardKey::KEY_A, Key::StrafeLeft),
    (KeyboardKey::KEY_D, Key::StrafeRight),
    (KeyboardKey::KEY_LEFT, Key::TurnLeft),
    (KeyboardKey::KEY_RIGHT, Key::TurnRight),
    (KeyboardKey::KEY_LEFT_SHIFT, Key::Sprint),
];

/// Snapshot of the keyboard and mouse for this frame.
///
/// WASD moves, arrows turn, Shift sprints, left mouse or Ctrl fires, R reloads,
/// M toggles the map and Escape quits.
pub fn process_events(window: &RaylibHandle) -> InputState {
    let mut input = InputState::default();
    for &(raylib_key, key) in HELD {
        input.set_held(key, window.is_key_down(raylib_key));
    }

    input.fire = window.is_mouse_button_pressed(MouseButton::MOUSE_BUTTON_LEFT)
        || window.is_key_pressed(KeyboardKey::KEY_LEFT_CONTROL);
    input.reload = window.is_key_pressed(KeyboardKey::KEY_R);
    input.toggle_map = window.is_key_pressed(KeyboardKey::KEY_M);
    input.quit = window.is_key_pressed(KeyboardKey::KEY_ESCAPE) || window.window_should_close();

    let delta = window.get_mouse_delta();
    input.mouse_dx = delta.x;
    input.mouse_dy = delta.y;
    input
}

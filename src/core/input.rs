//! Per-frame input snapshot.
//!
//! The window layer fills one of these every frame; the core never polls devices.

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Key {
    Forward,
    Back,
    StrafeLeft,
    StrafeRight,
    TurnLeft,
    TurnRight,
    Sprint,
}

impl Key {
    pub const COUNT: usize = 7;
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct InputState {
    pub held: [bool; Key::COUNT],
    // edge events, true only on the frame they happened
    pub fire: bool,
    pub reload: bool,
    pub toggle_map: bool,
    pub quit: bool,
    pub mouse_dx: f32,
    pub mouse_dy: f32,
}

impl InputState {
    #[inline]
    pub fn is_held(&self, key: Key) -> bool {
        self.held[key as usize]
    }

    #[inline]
    pub fn set_held(&mut self, key: Key, down: bool) {
        self.held[key as usize] = down;
    }

    pub fn with_held(mut self, key: Key) -> Self {
        self.set_held(key, true);
        self
    }
}

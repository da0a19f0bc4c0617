//! Decoded controller state. The [crate::drivers::dualshock::driver::Driver]
//! owns one [ControllerState] and is the only writer; everything here is
//! plain data.
use std::time::SystemTime;

/// 2-dimensional point, used for stick positions
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Vector2D {
    pub x: i16,
    pub y: i16,
}

impl Vector2D {
    pub fn new(x: i16, y: i16) -> Self {
        Self { x, y }
    }

    /// Center the raw byte coordinates on (0, 0) and flip the vertical axis
    /// so up is positive. No clamping: the byte extremes land at -127..=128
    /// on both axes.
    pub fn normalize(&self) -> Vector2D {
        Vector2D {
            x: self.x - 127,
            y: 255 - self.y - 127,
        }
    }
}

/// A single digital button and the times it last changed. Timestamps start
/// unset and are never cleared, only refreshed on the matching transition.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ButtonState {
    pub is_pressed: bool,
    pub last_pressed_at: Option<SystemTime>,
    pub last_released_at: Option<SystemTime>,
}

impl ButtonState {
    pub fn press(&mut self, at: SystemTime) {
        self.is_pressed = true;
        self.last_pressed_at = Some(at);
    }

    pub fn release(&mut self, at: SystemTime) {
        self.is_pressed = false;
        self.last_released_at = Some(at);
    }
}

/// An analog stick position in raw and normalized coordinates. The two are
/// only written together, so they always describe the same frame.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Stick {
    pub raw: Vector2D,
    pub normalized: Vector2D,
}

impl Stick {
    pub fn set_position(&mut self, raw: Vector2D) {
        self.raw = raw;
        self.normalized = raw.normalize();
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Sticks {
    pub left: Stick,
    pub right: Stick,
}

/// The four logical d-pad directions. On the wire these are one hat code;
/// decoded they act as independent buttons.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Dpad {
    pub up: ButtonState,
    pub down: ButtonState,
    pub left: ButtonState,
    pub right: ButtonState,
}

/// The symbol cluster on the right of the pad
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Symbols {
    pub square: ButtonState,
    pub cross: ButtonState,
    pub circle: ButtonState,
    pub triangle: ButtonState,
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Shoulders {
    pub l1: ButtonState,
    pub r1: ButtonState,
}

/// Full decoded picture of the controller
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ControllerState {
    pub dpad: Dpad,
    pub symbols: Symbols,
    pub shoulders: Shoulders,
    pub sticks: Sticks,
}

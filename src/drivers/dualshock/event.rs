//! Events produced by the DualShock 4 driver. Each event describes one
//! observed transition; steady state produces no events.
use std::fmt::Display;
use std::time::SystemTime;

use super::state::Vector2D;

/// Events that can be emitted by the DualShock 4 controller
#[derive(Clone, Debug)]
pub enum Event {
    Button(ButtonEvent),
    Axis(AxisEvent),
}

/// Binary input contains either pressed or unpressed, stamped with the time
/// of the transition
#[derive(Clone, Copy, Debug)]
pub struct BinaryInput {
    pub pressed: bool,
    pub timestamp: SystemTime,
}

/// Button events represent digital transitions
#[derive(Clone, Debug)]
pub enum ButtonEvent {
    /// D-pad up
    Up(BinaryInput),
    /// D-pad down
    Down(BinaryInput),
    /// D-pad left
    Left(BinaryInput),
    /// D-pad right
    Right(BinaryInput),
    /// □ button
    Square(BinaryInput),
    /// ✕ button
    Cross(BinaryInput),
    /// ◯ button
    Circle(BinaryInput),
    /// △ button
    Triangle(BinaryInput),
    /// Left shoulder button
    L1(BinaryInput),
    /// Right shoulder button
    R1(BinaryInput),
}

/// Axis input carries a stick position in raw byte coordinates and in the
/// centered, y-up coordinates derived from them, stamped with the time the
/// move was observed
#[derive(Clone, Copy, Debug)]
pub struct AxisInput {
    pub raw: Vector2D,
    pub normalized: Vector2D,
    pub timestamp: SystemTime,
}

/// Axis events represent stick movement
#[derive(Clone, Debug)]
pub enum AxisEvent {
    LeftStick(AxisInput),
    RightStick(AxisInput),
}

impl Display for Event {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Event::Button(button) => {
                let (name, input) = match button {
                    ButtonEvent::Up(input) => ("UP", input),
                    ButtonEvent::Down(input) => ("DOWN", input),
                    ButtonEvent::Left(input) => ("LEFT", input),
                    ButtonEvent::Right(input) => ("RIGHT", input),
                    ButtonEvent::Square(input) => ("square", input),
                    ButtonEvent::Cross(input) => ("cross", input),
                    ButtonEvent::Circle(input) => ("circle", input),
                    ButtonEvent::Triangle(input) => ("triangle", input),
                    ButtonEvent::L1(input) => ("L1", input),
                    ButtonEvent::R1(input) => ("R1", input),
                };
                let action = if input.pressed { "pressed" } else { "released" };
                write!(f, "{name} {action}")
            }
            Event::Axis(axis) => {
                let (name, input) = match axis {
                    AxisEvent::LeftStick(input) => ("left stick", input),
                    AxisEvent::RightStick(input) => ("right stick", input),
                };
                write!(
                    f,
                    "{} moved to ({}, {})",
                    name, input.normalized.x, input.normalized.y
                )
            }
        }
    }
}

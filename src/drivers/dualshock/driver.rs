//! Driver for the Sony DualShock 4. Feed it raw frames; it diffs each one
//! against the last and returns the transitions as events.
use std::time::SystemTime;

use packed_struct::types::SizedInteger;

use super::event::{AxisEvent, AxisInput, BinaryInput, ButtonEvent, Event};
use super::hid_report::{
    Direction, InputState, PackedInputDataReport, ReportError, DPAD_DOWN, DPAD_LEFT, DPAD_RIGHT,
    DPAD_UP,
};
use super::state::{ButtonState, ControllerState, Vector2D};

/// Source of event timestamps. Injected into the [Driver] so tests can
/// control time.
pub trait Clock: Send {
    fn now(&self) -> SystemTime;
}

/// Wall clock used outside of tests
#[derive(Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> SystemTime {
        SystemTime::now()
    }
}

/// Apply a press or release to a button and build the event payload for it.
fn transition(button: &mut ButtonState, pressed: bool, at: SystemTime) -> BinaryInput {
    if pressed {
        button.press(at);
    } else {
        button.release(at);
    }
    BinaryInput {
        pressed,
        timestamp: at,
    }
}

/// DualShock 4 decoding engine. Owns the [ControllerState] and the raw
/// fields of the last good frame; [Driver::handle_frame] is the only place
/// either is written.
pub struct Driver {
    /// Decoded state of the controller
    controller: ControllerState,
    /// Raw fields of the last good frame. Diffing raw bytes rather than the
    /// decoded state keeps change detection independent of normalization.
    prev: InputState,
    /// Shoulder fields of the last frame that carried them. Core frames do
    /// not reset these.
    prev_l1: bool,
    prev_r1: bool,
    clock: Box<dyn Clock>,
}

impl Driver {
    pub fn new() -> Self {
        Self::with_clock(Box::new(SystemClock))
    }

    pub fn with_clock(clock: Box<dyn Clock>) -> Self {
        Self {
            controller: ControllerState::default(),
            prev: InputState::default(),
            prev_l1: false,
            prev_r1: false,
            clock,
        }
    }

    /// Read-only view of the decoded controller state
    pub fn state(&self) -> &ControllerState {
        &self.controller
    }

    /// Decode a single frame and return the transitions it contains. A
    /// malformed frame returns an error and leaves all state untouched, so
    /// the stream can continue with the next frame. Every event from one
    /// frame carries the same timestamp.
    pub fn handle_frame(&mut self, buf: &[u8]) -> Result<Vec<Event>, ReportError> {
        let report = PackedInputDataReport::unpack(buf)?;
        let state = *report.state();
        let timestamp = self.clock.now();

        let mut events = Vec::new();
        self.translate_sticks(&state, timestamp, &mut events);
        self.translate_dpad(&state, timestamp, &mut events);
        self.translate_symbols(&state, timestamp, &mut events);
        if let Some(extended) = report.extended() {
            self.translate_shoulders(extended.l1, extended.r1, timestamp, &mut events);
        }
        self.prev = state;

        Ok(events)
    }

    /// Emit a move event for each stick whose raw bytes changed
    fn translate_sticks(&mut self, state: &InputState, at: SystemTime, events: &mut Vec<Event>) {
        if state.left_stick_x != self.prev.left_stick_x
            || state.left_stick_y != self.prev.left_stick_y
        {
            let raw = Vector2D::new(state.left_stick_x.into(), state.left_stick_y.into());
            let stick = &mut self.controller.sticks.left;
            stick.set_position(raw);
            events.push(Event::Axis(AxisEvent::LeftStick(AxisInput {
                raw,
                normalized: stick.normalized,
                timestamp: at,
            })));
        }
        if state.right_stick_x != self.prev.right_stick_x
            || state.right_stick_y != self.prev.right_stick_y
        {
            let raw = Vector2D::new(state.right_stick_x.into(), state.right_stick_y.into());
            let stick = &mut self.controller.sticks.right;
            stick.set_position(raw);
            events.push(Event::Axis(AxisEvent::RightStick(AxisInput {
                raw,
                normalized: stick.normalized,
                timestamp: at,
            })));
        }
    }

    /// Diff the old and new hat codes as direction sets and emit one event
    /// per direction whose membership changed. A rotation along the hat
    /// (e.g. north to north-east) only touches the direction that actually
    /// changed.
    fn translate_dpad(&mut self, state: &InputState, at: SystemTime, events: &mut Vec<Event>) {
        if state.dpad == self.prev.dpad {
            return;
        }
        let was = Direction::from_code(self.prev.dpad.to_primitive()).as_bitflag();
        let now = Direction::from_code(state.dpad.to_primitive()).as_bitflag();

        // Evaluation order is fixed: up, down, left, right
        type Wrap = fn(BinaryInput) -> ButtonEvent;
        let directions: [(u8, &mut ButtonState, Wrap); 4] = [
            (DPAD_UP, &mut self.controller.dpad.up, ButtonEvent::Up),
            (DPAD_DOWN, &mut self.controller.dpad.down, ButtonEvent::Down),
            (DPAD_LEFT, &mut self.controller.dpad.left, ButtonEvent::Left),
            (
                DPAD_RIGHT,
                &mut self.controller.dpad.right,
                ButtonEvent::Right,
            ),
        ];
        for (flag, button, wrap) in directions {
            let was_active = was & flag != 0;
            let is_active = now & flag != 0;
            if is_active == was_active {
                continue;
            }
            let input = transition(button, is_active, at);
            events.push(Event::Button(wrap(input)));
        }
    }

    /// Emit an event for each symbol button whose bit changed. Evaluation
    /// order is fixed: square, cross, circle, triangle.
    fn translate_symbols(&mut self, state: &InputState, at: SystemTime, events: &mut Vec<Event>) {
        if state.square != self.prev.square {
            let input = transition(&mut self.controller.symbols.square, state.square, at);
            events.push(Event::Button(ButtonEvent::Square(input)));
        }
        if state.cross != self.prev.cross {
            let input = transition(&mut self.controller.symbols.cross, state.cross, at);
            events.push(Event::Button(ButtonEvent::Cross(input)));
        }
        if state.circle != self.prev.circle {
            let input = transition(&mut self.controller.symbols.circle, state.circle, at);
            events.push(Event::Button(ButtonEvent::Circle(input)));
        }
        if state.triangle != self.prev.triangle {
            let input = transition(&mut self.controller.symbols.triangle, state.triangle, at);
            events.push(Event::Button(ButtonEvent::Triangle(input)));
        }
    }

    /// Emit events for the shoulder buttons. Only called for frames that
    /// carry the shoulder byte, so core frames never fabricate releases.
    fn translate_shoulders(&mut self, l1: bool, r1: bool, at: SystemTime, events: &mut Vec<Event>) {
        if l1 != self.prev_l1 {
            let input = transition(&mut self.controller.shoulders.l1, l1, at);
            events.push(Event::Button(ButtonEvent::L1(input)));
        }
        if r1 != self.prev_r1 {
            let input = transition(&mut self.controller.shoulders.r1, r1, at);
            events.push(Event::Button(ButtonEvent::R1(input)));
        }
        self.prev_l1 = l1;
        self.prev_r1 = r1;
    }
}

impl Default for Driver {
    fn default() -> Self {
        Self::new()
    }
}

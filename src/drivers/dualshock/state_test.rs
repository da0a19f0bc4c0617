use std::time::{Duration, SystemTime};

use super::state::{ButtonState, ControllerState, Stick, Vector2D};

#[test]
fn test_normalize_centers_and_flips() {
    assert_eq!(Vector2D::new(127, 128).normalize(), Vector2D::new(0, 0));
    assert_eq!(Vector2D::new(0, 0).normalize(), Vector2D::new(-127, 128));
    assert_eq!(Vector2D::new(255, 255).normalize(), Vector2D::new(128, -127));

    // The byte midpoint is not the exact center on the flipped axis
    assert_eq!(Vector2D::new(127, 127).normalize(), Vector2D::new(0, 1));

    // Up on the pad is positive after the flip
    assert!(Vector2D::new(127, 0).normalize().y > 0);
}

#[test]
fn test_button_timestamps_never_clear() {
    let t0 = SystemTime::UNIX_EPOCH;
    let t1 = t0 + Duration::from_millis(16);
    let t2 = t1 + Duration::from_millis(16);

    let mut button = ButtonState::default();
    assert!(!button.is_pressed);
    assert_eq!(button.last_pressed_at, None);
    assert_eq!(button.last_released_at, None);

    button.press(t0);
    assert!(button.is_pressed);
    assert_eq!(button.last_pressed_at, Some(t0));
    assert_eq!(button.last_released_at, None);

    button.release(t1);
    assert!(!button.is_pressed);
    assert_eq!(button.last_pressed_at, Some(t0));
    assert_eq!(button.last_released_at, Some(t1));

    button.press(t2);
    assert_eq!(button.last_pressed_at, Some(t2));
    assert_eq!(button.last_released_at, Some(t1));
}

#[test]
fn test_stick_positions_update_together() {
    let mut stick = Stick::default();
    stick.set_position(Vector2D::new(200, 100));
    assert_eq!(stick.raw, Vector2D::new(200, 100));
    assert_eq!(stick.normalized, Vector2D::new(73, 28));
}

#[test]
fn test_default_state_is_neutral() {
    let state = ControllerState::default();
    assert!(!state.dpad.up.is_pressed && !state.dpad.down.is_pressed);
    assert!(!state.dpad.left.is_pressed && !state.dpad.right.is_pressed);
    assert!(!state.symbols.square.is_pressed && !state.symbols.triangle.is_pressed);
    assert!(!state.shoulders.l1.is_pressed && !state.shoulders.r1.is_pressed);
    assert_eq!(state.sticks.left.raw, Vector2D::new(0, 0));
    assert_eq!(state.sticks.right.raw, Vector2D::new(0, 0));
}

//! Input classification
//!
//! Maps keyboard keys and touch positions to the engine's discrete input
//! events. Zone rules: a touch in the top third of the play area jumps, the
//! bottom third slides, and the middle band changes lane by horizontal half.

use serde::{Deserialize, Serialize};

/// Discrete, edge-triggered input events accepted by the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InputEvent {
    MoveLeft,
    MoveRight,
    Jump,
    Slide,
}

/// Map a key name (`KeyboardEvent.key`) to an input event.
pub fn classify_key(key: &str) -> Option<InputEvent> {
    match key {
        "ArrowLeft" => Some(InputEvent::MoveLeft),
        "ArrowRight" => Some(InputEvent::MoveRight),
        "ArrowUp" | " " => Some(InputEvent::Jump),
        "ArrowDown" => Some(InputEvent::Slide),
        _ => None,
    }
}

/// Classify a touch at `(x, y)` inside a play area of the given size.
///
/// Coordinates are relative to the play area's top-left corner.
pub fn classify_touch(x: f32, y: f32, width: f32, height: f32) -> InputEvent {
    if y < height / 3.0 {
        InputEvent::Jump
    } else if y > height * 2.0 / 3.0 {
        InputEvent::Slide
    } else if x < width / 2.0 {
        InputEvent::MoveLeft
    } else {
        InputEvent::MoveRight
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keyboard_mapping() {
        assert_eq!(classify_key("ArrowLeft"), Some(InputEvent::MoveLeft));
        assert_eq!(classify_key("ArrowRight"), Some(InputEvent::MoveRight));
        assert_eq!(classify_key("ArrowUp"), Some(InputEvent::Jump));
        assert_eq!(classify_key(" "), Some(InputEvent::Jump));
        assert_eq!(classify_key("ArrowDown"), Some(InputEvent::Slide));
        assert_eq!(classify_key("Escape"), None);
    }

    #[test]
    fn test_touch_zones() {
        // 400x600 play area
        assert_eq!(classify_touch(200.0, 50.0, 400.0, 600.0), InputEvent::Jump);
        assert_eq!(classify_touch(200.0, 550.0, 400.0, 600.0), InputEvent::Slide);
        assert_eq!(
            classify_touch(100.0, 300.0, 400.0, 600.0),
            InputEvent::MoveLeft
        );
        assert_eq!(
            classify_touch(300.0, 300.0, 400.0, 600.0),
            InputEvent::MoveRight
        );
    }

    #[test]
    fn test_touch_band_edges() {
        // Exactly on the third boundaries falls through to the middle band
        assert_eq!(
            classify_touch(0.0, 200.0, 400.0, 600.0),
            InputEvent::MoveLeft
        );
        assert_eq!(
            classify_touch(399.0, 400.0, 400.0, 600.0),
            InputEvent::MoveRight
        );
    }
}

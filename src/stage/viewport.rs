//! Viewport resize handling.
//!
//! Keeps the stage camera's projection in sync with the window: after a
//! resize the aspect ratio is exactly `width / height`. The swapchain
//! surface itself is resized by the windowing backend.

use bevy::prelude::*;
use bevy::window::WindowResized;

use super::StageCamera;

/// Projection aspect ratio for a viewport size
pub fn aspect_ratio(width: f32, height: f32) -> f32 {
    width / height
}

/// Recompute the camera projection on viewport resize
pub fn handle_resize(
    mut events: MessageReader<WindowResized>,
    mut camera_query: Query<&mut Projection, With<StageCamera>>,
) {
    for event in events.read() {
        let Ok(mut projection) = camera_query.single_mut() else {
            continue;
        };

        if let Projection::Perspective(ref mut perspective) = *projection {
            perspective.aspect_ratio = aspect_ratio(event.width, event.height);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_aspect_ratio_is_exact_quotient() {
        assert_eq!(aspect_ratio(1600.0, 900.0), 1600.0 / 900.0);
        assert_eq!(aspect_ratio(1024.0, 1024.0), 1.0);
    }

    #[test]
    fn test_aspect_ratio_portrait() {
        assert!(aspect_ratio(800.0, 1280.0) < 1.0);
    }

    #[test]
    fn test_resize_is_idempotent() {
        let a = aspect_ratio(1280.0, 800.0);
        let b = aspect_ratio(1280.0, 800.0);
        assert_eq!(a, b);
    }
}

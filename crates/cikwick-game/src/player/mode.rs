//! Per-frame movement state: raw axes and the walk/slide mode

use glam::{Vec2, Vec3};

use crate::orientation::Orientation;

/// Walk/slide mode of the player
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MovementMode {
    #[default]
    Walking,
    Sliding,
}

impl MovementMode {
    /// Next mode given this frame's key edges. Slide wins when both keys are
    /// pressed in the same frame; no edge keeps the current mode.
    pub fn next(self, slide_pressed: bool, walk_pressed: bool) -> Self {
        if slide_pressed {
            MovementMode::Sliding
        } else if walk_pressed {
            MovementMode::Walking
        } else {
            self
        }
    }

    pub fn is_sliding(self) -> bool {
        self == MovementMode::Sliding
    }
}

/// Raw directional input sampled once per frame, both axes within [-1, 1]
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct MovementState {
    horizontal: f32,
    vertical: f32,
}

impl MovementState {
    /// Clamp the axes into [-1, 1]; NaN reads as 0
    pub fn new(horizontal: f32, vertical: f32) -> Self {
        let clamp = |v: f32| if v.is_nan() { 0.0 } else { v.clamp(-1.0, 1.0) };
        Self {
            horizontal: clamp(horizontal),
            vertical: clamp(vertical),
        }
    }

    pub fn from_axes(axes: Vec2) -> Self {
        Self::new(axes.x, axes.y)
    }

    pub fn horizontal(&self) -> f32 {
        self.horizontal
    }

    pub fn vertical(&self) -> f32 {
        self.vertical
    }

    /// Un-normalized movement direction in the given basis
    pub fn direction(&self, orientation: &Orientation) -> Vec3 {
        orientation.project(self.horizontal, self.vertical)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mode_transitions() {
        let mode = MovementMode::default();
        assert_eq!(mode, MovementMode::Walking);

        let mode = mode.next(true, false);
        assert!(mode.is_sliding());
        // No edge: stays
        assert_eq!(mode.next(false, false), MovementMode::Sliding);
        assert_eq!(mode.next(false, true), MovementMode::Walking);
    }

    #[test]
    fn test_slide_wins_simultaneous_press() {
        assert_eq!(
            MovementMode::Walking.next(true, true),
            MovementMode::Sliding
        );
        assert_eq!(
            MovementMode::Sliding.next(true, true),
            MovementMode::Sliding
        );
    }

    #[test]
    fn test_state_clamps() {
        let state = MovementState::new(2.0, -3.5);
        assert_eq!(state.horizontal(), 1.0);
        assert_eq!(state.vertical(), -1.0);

        let state = MovementState::new(f32::NAN, 0.25);
        assert_eq!(state.horizontal(), 0.0);
        assert_eq!(state.vertical(), 0.25);
    }

    #[test]
    fn test_direction_linear_combination_grid() {
        let orientation = Orientation::new(
            Vec3::new(0.6, 0.0, 0.8),
            Vec3::new(0.8, 0.0, -0.6),
        );
        let samples = [-1.0, -0.5, 0.0, 0.3, 1.0];
        for &h in &samples {
            for &v in &samples {
                let state = MovementState::new(h, v);
                let expected = orientation.forward * v + orientation.right * h;
                assert!((state.direction(&orientation) - expected).length() < 1e-6);
            }
        }
    }
}

//! Gravity camera
//!
//! Owns the current "down" direction. Gravity always points opposite the
//! camera's up vector, and changes only in quarter turns that are animated
//! over several frames.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::{CAMERA_MARGIN, CAMERA_STEP};
use crate::{right_of, rotate};

/// Cardinal direction of the camera's up vector (cyclic, 0..=3)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Cardinal {
    #[default]
    Up,
    Right,
    Down,
    Left,
}

impl Cardinal {
    pub fn index(self) -> u8 {
        match self {
            Cardinal::Up => 0,
            Cardinal::Right => 1,
            Cardinal::Down => 2,
            Cardinal::Left => 3,
        }
    }

    pub fn from_index(index: i32) -> Self {
        match index.rem_euclid(4) {
            0 => Cardinal::Up,
            1 => Cardinal::Right,
            2 => Cardinal::Down,
            _ => Cardinal::Left,
        }
    }

    /// Step around the compass (+1 clockwise, -1 anticlockwise)
    pub fn turned(self, direction: i32) -> Self {
        Self::from_index(self.index() as i32 + direction)
    }

    /// Unit up vector for this direction
    pub fn up_vector(self) -> Vec2 {
        match self {
            Cardinal::Up => Vec2::new(0.0, 1.0),
            Cardinal::Right => Vec2::new(1.0, 0.0),
            Cardinal::Down => Vec2::new(0.0, -1.0),
            Cardinal::Left => Vec2::new(-1.0, 0.0),
        }
    }

    /// Up/Down targets move the player along world X, Left/Right along world Y
    pub fn is_vertical(self) -> bool {
        matches!(self, Cardinal::Up | Cardinal::Down)
    }
}

/// Camera/gravity orientation state machine (Idle <-> Rotating)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GravityCamera {
    current_target: Cardinal,
    /// Up vector being rotated toward; cleared once reached
    target_up: Option<Vec2>,
    up: Vec2,
    right: Vec2,
    rotating: bool,
    rotation_paused: bool,
}

impl Default for GravityCamera {
    fn default() -> Self {
        Self {
            current_target: Cardinal::Up,
            target_up: None,
            up: Vec2::new(0.0, 1.0),
            right: Vec2::new(1.0, 0.0),
            rotating: false,
            rotation_paused: false,
        }
    }
}

impl GravityCamera {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn up(&self) -> Vec2 {
        self.up
    }

    pub fn right(&self) -> Vec2 {
        self.right
    }

    pub fn current_target(&self) -> Cardinal {
        self.current_target
    }

    pub fn target_up(&self) -> Option<Vec2> {
        self.target_up
    }

    pub fn is_rotating(&self) -> bool {
        self.rotating
    }

    pub fn set_rotating(&mut self, rotating: bool) {
        self.rotating = rotating;
    }

    pub fn is_rotation_paused(&self) -> bool {
        self.rotation_paused
    }

    pub fn set_rotation_paused(&mut self, paused: bool) {
        self.rotation_paused = paused;
    }

    /// Gravity vector for a given magnitude
    ///
    /// A snapped component can leave `up` slightly long mid-turn; gravity
    /// keeps its full magnitude regardless.
    pub fn gravity(&self, magnitude: f32) -> Vec2 {
        -magnitude * self.up.normalize_or_zero()
    }

    /// Advance the target one quarter turn (+1 clockwise, -1 anticlockwise)
    pub fn change_target(&mut self, direction: i32) {
        self.current_target = self.current_target.turned(direction.signum());
        self.target_up = Some(self.current_target.up_vector());
    }

    /// Enter the Rotating state toward the neighbouring cardinal
    pub fn begin_rotation(&mut self, direction: i32) {
        self.rotating = true;
        self.change_target(direction);
    }

    /// Rotate the up vector one frame toward the target
    ///
    /// Each component snaps to the target value once it is within the margin,
    /// so the rotation always lands exactly on the cardinal vector. The
    /// rotated vector is renormalised first: a snap can stretch it, and a
    /// reversal would otherwise keep turning the stretched vector.
    pub fn rotate_step(&mut self, direction: i32) {
        if self.rotation_paused {
            return;
        }
        let turned = rotate(self.up, -(direction.signum() as f32) * CAMERA_STEP);
        let mut up = turned.normalize_or_zero();

        if let Some(target) = self.target_up {
            if (up.x - target.x).abs() < CAMERA_MARGIN {
                up.x = target.x;
            }
            if (up.y - target.y).abs() < CAMERA_MARGIN {
                up.y = target.y;
            }
        }

        self.up = up;
        self.right = right_of(up);
    }

    /// True when the up vector sits exactly on the target
    pub fn has_reached_target(&self) -> bool {
        self.target_up.is_some_and(|t| self.up == t)
    }

    /// Forget the reached target and allow rotation again
    pub fn acknowledge_target_reached(&mut self) {
        self.target_up = None;
        self.rotation_paused = false;
    }

    /// Query the target and acknowledge it when reached
    pub fn check_target_reached(&mut self) -> bool {
        let reached = self.has_reached_target();
        if reached {
            self.acknowledge_target_reached();
        }
        reached
    }

    /// Back to Idle facing up
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

//! Body definitions and the rapier bodies and colliders built from them

use glam::Vec2;
use rapier2d::prelude::*;
use serde::{Deserialize, Serialize};

/// Handle to a body in a [`World`](super::World); goes stale once the body is removed
pub type BodyHandle = RigidBodyHandle;

/// Surface friction shared by every collider in the game
const FRICTION: f32 = 0.2;

/// Static bodies never move; dynamic bodies are integrated every step
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum BodyKind {
    #[default]
    Static,
    Dynamic,
}

/// Collision shape attached to a body (centred on the body position)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Shape {
    /// Axis-aligned box
    Box { half_extents: Vec2 },
    /// Circle
    Circle { radius: f32 },
}

impl Shape {
    pub fn square(half_size: f32) -> Self {
        Shape::Box {
            half_extents: Vec2::splat(half_size),
        }
    }

    pub fn circle(radius: f32) -> Self {
        Shape::Circle { radius }
    }

    /// Shape area (used with density to derive mass)
    pub fn area(&self) -> f32 {
        match *self {
            Shape::Box { half_extents } => 4.0 * half_extents.x * half_extents.y,
            Shape::Circle { radius } => std::f32::consts::PI * radius * radius,
        }
    }

    fn collider_builder(&self) -> ColliderBuilder {
        match *self {
            Shape::Box { half_extents } => ColliderBuilder::cuboid(half_extents.x, half_extents.y),
            Shape::Circle { radius } => ColliderBuilder::ball(radius),
        }
    }
}

/// Construction parameters for a body
#[derive(Debug, Clone)]
pub struct BodyDef<T> {
    pub kind: BodyKind,
    pub position: Vec2,
    pub shape: Shape,
    pub density: f32,
    /// Multiplier on world gravity (0 = floats)
    pub gravity_scale: f32,
    /// Sensors report contacts but are never pushed apart
    pub sensor: bool,
    pub fixed_rotation: bool,
    pub active: bool,
    pub user_data: T,
}

impl<T> BodyDef<T> {
    pub fn new(kind: BodyKind, position: Vec2, shape: Shape, user_data: T) -> Self {
        Self {
            kind,
            position,
            shape,
            density: 1.0,
            gravity_scale: 1.0,
            sensor: false,
            fixed_rotation: false,
            active: true,
            user_data,
        }
    }

    pub fn with_density(mut self, density: f32) -> Self {
        self.density = density;
        self
    }

    pub fn with_gravity_scale(mut self, scale: f32) -> Self {
        self.gravity_scale = scale;
        self
    }

    pub fn sensor(mut self) -> Self {
        self.sensor = true;
        self
    }

    pub fn fixed_rotation(mut self) -> Self {
        self.fixed_rotation = true;
        self
    }

    pub fn inactive(mut self) -> Self {
        self.active = false;
        self
    }

    /// Mass implied by the shape and density (zero for static bodies)
    pub fn mass(&self) -> f32 {
        match self.kind {
            BodyKind::Static => 0.0,
            BodyKind::Dynamic => self.shape.area() * self.density,
        }
    }

    pub(crate) fn rigid_body(&self) -> RigidBody {
        let builder = match self.kind {
            BodyKind::Static => RigidBodyBuilder::fixed(),
            // Gravity turns while bodies rest, so nothing may fall asleep
            BodyKind::Dynamic => RigidBodyBuilder::dynamic().can_sleep(false),
        };
        let builder = builder
            .translation(vector![self.position.x, self.position.y])
            .gravity_scale(self.gravity_scale)
            .enabled(self.active);
        if self.fixed_rotation {
            builder.lock_rotations().build()
        } else {
            builder.build()
        }
    }

    pub(crate) fn collider(&self) -> Collider {
        self.shape
            .collider_builder()
            .density(self.density)
            .friction(FRICTION)
            .sensor(self.sensor)
            .build()
    }
}

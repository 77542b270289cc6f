//! Pooled projectiles
//!
//! Each actor owns one projectile body for its whole life. Firing moves and
//! re-activates the body; hitting something or expiring deactivates it. The
//! body is only destroyed when the arena is torn down.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::entity::{EntityTag, PhysicsWorld, Provenance};
use crate::consts::*;
use crate::physics::{BodyDef, BodyHandle, BodyKind, Shape};

/// Bullet (small, ballistic) or Explosion (large, stationary, timed)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProjectileKind {
    Bullet,
    Explosion,
}

/// A reusable projectile body
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Projectile {
    pub body: BodyHandle,
    pub provenance: Provenance,
    pub kind: ProjectileKind,
    /// Frames the explosion has been alive
    timer: u32,
    /// Lifetime of an explosion in frames
    active_count: u32,
}

impl Projectile {
    /// Create an inactive bullet for an owner
    pub fn bullet(world: &mut PhysicsWorld, provenance: Provenance, owner: u32, pos: Vec2) -> Self {
        let body = world.create_body(
            BodyDef::new(
                BodyKind::Dynamic,
                pos,
                Shape::square(BULLET_HALF_SIZE),
                EntityTag::projectile(provenance, owner),
            )
            .inactive(),
        );
        Self {
            body,
            provenance,
            kind: ProjectileKind::Bullet,
            timer: 0,
            active_count: 0,
        }
    }

    /// Create an inactive blast for an owner
    ///
    /// Blasts are sensors with no gravity: they overlap whatever is nearby
    /// without being pushed out of walls.
    pub fn explosion(world: &mut PhysicsWorld, owner: u32, pos: Vec2) -> Self {
        let body = world.create_body(
            BodyDef::new(
                BodyKind::Dynamic,
                pos,
                Shape::square(EXPLOSION_HALF_SIZE),
                EntityTag::projectile(Provenance::Blast, owner),
            )
            .with_density(EXPLOSION_DENSITY)
            .with_gravity_scale(0.0)
            .sensor()
            .inactive(),
        );
        Self {
            body,
            provenance: Provenance::Blast,
            kind: ProjectileKind::Explosion,
            timer: 0,
            active_count: EXPLOSION_FRAMES,
        }
    }

    pub fn is_active(&self, world: &PhysicsWorld) -> bool {
        world.is_active(self.body)
    }

    pub fn position(&self, world: &PhysicsWorld) -> Option<Vec2> {
        world.position(self.body)
    }

    /// Launch from `origin + offset` with an instantaneous impulse
    ///
    /// Does not check whether the projectile is already in flight; callers
    /// guard with the owner's `can_fire_again`.
    pub fn fire(&mut self, world: &mut PhysicsWorld, impulse: Vec2, origin: Vec2, offset: Vec2) {
        world.set_position(self.body, origin + offset);
        world.set_active(self.body, true);
        world.set_linear_velocity(self.body, Vec2::ZERO);
        world.apply_linear_impulse(self.body, impulse);
    }

    /// Start a blast at `pos`
    pub fn activate(&mut self, world: &mut PhysicsWorld, pos: Vec2) {
        self.timer = 0;
        world.set_position(self.body, pos);
        world.set_active(self.body, true);
        world.set_linear_velocity(self.body, Vec2::ZERO);
    }

    /// Per-frame update: explosions count down and hold still
    pub fn update(&mut self, world: &mut PhysicsWorld) {
        if self.kind != ProjectileKind::Explosion || !self.is_active(world) {
            return;
        }
        self.timer += 1;
        if self.timer >= self.active_count {
            self.reset(world);
        }
        world.set_linear_velocity(self.body, Vec2::ZERO);
    }

    /// Return to the pool
    pub fn reset(&mut self, world: &mut PhysicsWorld) {
        world.set_active(self.body, false);
        world.set_linear_velocity(self.body, Vec2::ZERO);
    }

    /// Remove the body from the world (arena teardown only)
    pub fn destroy(self, world: &mut PhysicsWorld) {
        world.destroy_body(self.body);
    }
}

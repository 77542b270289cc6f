//! Player and enemy actors
//!
//! Both kinds of actor own exactly one projectile and track health. Movement
//! and aiming are expressed relative to the gravity camera so that "right"
//! on the stick always means "toward the camera's right vector".

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::camera::GravityCamera;
use super::entity::{EntityTag, PLAYER_ID, PhysicsWorld, Provenance};
use super::projectile::Projectile;
use crate::consts::*;
use crate::physics::{BodyDef, BodyHandle, BodyKind, Shape};

/// State shared by every actor
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Actor {
    pub body: BodyHandle,
    health: i32,
    max_health: i32,
    alive: bool,
    pub projectile: Projectile,
    /// False exactly while the owned projectile is in flight
    pub can_fire_again: bool,
    /// Normalized fire direction (world space)
    pub aim: Vec2,
}

impl Actor {
    fn new(body: BodyHandle, projectile: Projectile, max_health: i32) -> Self {
        let max_health = max_health.max(1);
        Self {
            body,
            health: max_health,
            max_health,
            alive: true,
            projectile,
            can_fire_again: true,
            aim: Vec2::Y,
        }
    }

    pub fn health(&self) -> i32 {
        self.health
    }

    pub fn max_health(&self) -> i32 {
        self.max_health
    }

    pub fn is_alive(&self) -> bool {
        self.alive
    }

    /// Set health, clamped to `[0, max_health]`
    pub fn set_health(&mut self, health: i32) {
        self.health = health.clamp(0, self.max_health);
    }

    /// Apply damage; returns the remaining health
    pub fn damage(&mut self, amount: i32) -> i32 {
        self.set_health(self.health.saturating_sub(amount.max(0)));
        self.health
    }

    pub fn restore_health(&mut self) {
        self.health = self.max_health;
    }

    pub fn position(&self, world: &PhysicsWorld) -> Vec2 {
        world.position(self.body).unwrap_or_default()
    }

    pub fn velocity(&self, world: &PhysicsWorld) -> Vec2 {
        world.linear_velocity(self.body).unwrap_or_default()
    }

    /// Re-arm once the projectile has come back to the pool
    pub fn poll_projectile(&mut self, world: &PhysicsWorld) {
        self.can_fire_again = !self.projectile.is_active(world);
    }

    /// Fire the owned projectile along `aim`; no-op while it is still in flight
    pub fn fire(&mut self, world: &mut PhysicsWorld, speed: f32) -> bool {
        if !self.can_fire_again || !self.alive {
            return false;
        }
        let dir = self.aim.normalize_or_zero();
        if dir == Vec2::ZERO {
            return false;
        }
        let mass = world.mass(self.projectile.body);
        let origin = self.position(world);
        self.projectile
            .fire(world, dir * speed * mass, origin, dir * TURRET_OFFSET);
        self.can_fire_again = false;
        true
    }
}

/// Map a raw aim stick into world space for the current camera orientation
///
/// The mapping is picked from the dominant axis of the up vector, so it stays
/// stable while the camera is part-way through a rotation.
pub fn remap_stick(stick: Vec2, up: Vec2) -> Vec2 {
    let (x, y) = (stick.x, stick.y);
    if up.x.abs() > up.y.abs() {
        if up.x > 0.0 {
            Vec2::new(-y, x)
        } else {
            Vec2::new(y, -x)
        }
    } else if up.y < 0.0 {
        Vec2::new(-x, -y)
    } else {
        Vec2::new(x, y)
    }
}

/// Inverse of [`remap_stick`]: the stick reading that aims along `dir`
pub fn stick_for(dir: Vec2, up: Vec2) -> Vec2 {
    let (x, y) = (dir.x, dir.y);
    if up.x.abs() > up.y.abs() {
        if up.x > 0.0 {
            Vec2::new(y, -x)
        } else {
            Vec2::new(-y, x)
        }
    } else if up.y < 0.0 {
        Vec2::new(-x, -y)
    } else {
        Vec2::new(x, y)
    }
}

/// The player's tank
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub actor: Actor,
    /// Blast spawned by detonating an in-flight shot
    pub explosion: Projectile,
    /// Turret angle, `atan2(x, y)` of the world-space aim
    pub turret_rotation: f32,
    /// Movement stick was held right / left on the previous frame
    pub pressing_right: bool,
    pub pressing_left: bool,
    /// Hold button pressed since the last move: next move only stops
    pub hold: bool,
    /// Whether the player is currently driving (for move sound cues)
    pub moving: bool,
}

impl Player {
    pub fn new(world: &mut PhysicsWorld, start: Vec2, max_health: i32) -> Self {
        let body = world.create_body(
            BodyDef::new(
                BodyKind::Dynamic,
                start,
                Shape::square(PLAYER_HALF_SIZE),
                EntityTag::player(),
            )
            .fixed_rotation(),
        );
        let bullet = Projectile::bullet(world, Provenance::PlayerShot, PLAYER_ID, start);
        let explosion = Projectile::explosion(world, PLAYER_ID, start);
        Self {
            actor: Actor::new(body, bullet, max_health),
            explosion,
            turret_rotation: 0.0,
            pressing_right: false,
            pressing_left: false,
            hold: false,
            moving: false,
        }
    }

    pub fn position(&self, world: &PhysicsWorld) -> Vec2 {
        self.actor.position(world)
    }

    /// Where the turret / aim indicator sits this frame
    pub fn turret_position(&self, world: &PhysicsWorld) -> Vec2 {
        self.position(world) + self.actor.aim * TURRET_OFFSET
    }

    /// A blast is alive
    pub fn is_exploding(&self, world: &PhysicsWorld) -> bool {
        self.explosion.is_active(world)
    }

    /// Per-frame update: aim from the stick, tick the blast, re-arm
    pub fn update(&mut self, world: &mut PhysicsWorld, aim_stick: Vec2, up: Vec2) {
        let aim = remap_stick(aim_stick, up);
        if aim.length_squared() > f32::EPSILON {
            self.turret_rotation = aim.x.atan2(aim.y);
            self.actor.aim = aim.normalize();
        }

        self.explosion.update(world);
        // Only one shot or blast in the air at a time
        self.actor.can_fire_again =
            !self.actor.projectile.is_active(world) && !self.explosion.is_active(world);
    }

    pub fn can_fire(&self) -> bool {
        self.actor.can_fire_again
    }

    /// Fire along the current aim
    pub fn shoot(&mut self, world: &mut PhysicsWorld, speed: f32) -> bool {
        self.actor.fire(world, speed)
    }

    /// Turn the in-flight bullet into a blast at its current position
    pub fn detonate(&mut self, world: &mut PhysicsWorld) -> bool {
        if !self.actor.projectile.is_active(world) {
            return false;
        }
        let Some(pos) = self.actor.projectile.position(world) else {
            return false;
        };
        self.actor.projectile.reset(world);
        self.explosion.activate(world, pos);
        true
    }

    /// Drive along the camera's right vector (`sign` +1 right, -1 left)
    ///
    /// Only the velocity component along the current ground axis is touched,
    /// so falling is never fought.
    pub fn drive(
        &mut self,
        world: &mut PhysicsWorld,
        camera: &GravityCamera,
        sign: f32,
        speed: f32,
    ) {
        let v = self.actor.velocity(world);
        let right = camera.right();
        let target = if self.hold { 0.0 } else { sign * speed };
        let new_v = if camera.current_target().is_vertical() {
            Vec2::new(target * right.x, v.y)
        } else {
            Vec2::new(v.x, target * right.y)
        };
        world.set_linear_velocity(self.actor.body, new_v);
        self.moving = !self.hold;
    }

    /// Zero the ground-axis velocity component
    pub fn stop(&mut self, world: &mut PhysicsWorld, camera: &GravityCamera) {
        let v = self.actor.velocity(world);
        let new_v = if camera.current_target().is_vertical() {
            Vec2::new(0.0, v.y)
        } else {
            Vec2::new(v.x, 0.0)
        };
        world.set_linear_velocity(self.actor.body, new_v);
        self.moving = false;
    }

    /// Put the player back at a start position with both projectiles pooled
    pub fn reset(&mut self, world: &mut PhysicsWorld, start: Vec2) {
        world.set_position(self.actor.body, start);
        world.set_linear_velocity(self.actor.body, Vec2::ZERO);
        world.set_active(self.actor.body, true);
        self.actor.projectile.reset(world);
        self.explosion.reset(world);
        self.actor.can_fire_again = true;
        self.actor.aim = Vec2::Y;
        self.turret_rotation = 0.0;
        self.pressing_right = false;
        self.pressing_left = false;
        self.hold = false;
        self.moving = false;
    }
}

/// Wall an enemy clings to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EnemyBehavior {
    /// Code 3
    Floor,
    /// Code 4
    RightWall,
    /// Code 5
    Ceiling,
    /// Code 6
    LeftWall,
}

impl EnemyBehavior {
    /// Behaviour for codes 3..=6
    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            3 => Some(EnemyBehavior::Floor),
            4 => Some(EnemyBehavior::RightWall),
            5 => Some(EnemyBehavior::Ceiling),
            6 => Some(EnemyBehavior::LeftWall),
            _ => None,
        }
    }

    pub fn code(self) -> u8 {
        match self {
            EnemyBehavior::Floor => 3,
            EnemyBehavior::RightWall => 4,
            EnemyBehavior::Ceiling => 5,
            EnemyBehavior::LeftWall => 6,
        }
    }

    /// Unit vector pointing from the enemy into its wall
    pub fn wall_direction(self) -> Vec2 {
        match self {
            EnemyBehavior::Floor => Vec2::new(0.0, -1.0),
            EnemyBehavior::RightWall => Vec2::new(1.0, 0.0),
            EnemyBehavior::Ceiling => Vec2::new(0.0, 1.0),
            EnemyBehavior::LeftWall => Vec2::new(-1.0, 0.0),
        }
    }
}

/// Tuning shared by all enemies in a level
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EnemyTuning {
    pub speed: f32,
    pub change_at: u32,
    pub max_shoot_length: f32,
    pub bullet_speed: f32,
    pub reload_frames: u32,
}

impl Default for EnemyTuning {
    fn default() -> Self {
        Self {
            speed: ENEMY_SPEED,
            change_at: ENEMY_CHANGE_AT,
            max_shoot_length: ENEMY_SHOOT_RANGE,
            bullet_speed: ENEMY_BULLET_SPEED,
            reload_frames: ENEMY_RELOAD_FRAMES,
        }
    }
}

/// A wall-crawling enemy
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Enemy {
    pub actor: Actor,
    /// Roster index (also stored in the body tag)
    pub id: u32,
    pub behavior: EnemyBehavior,
    /// Walking direction along the wall (+1 / -1)
    pub direction_sign: f32,
    change_timer: f32,
    reload_timer: f32,
    tuning: EnemyTuning,
}

impl Enemy {
    pub fn new(
        world: &mut PhysicsWorld,
        id: u32,
        behavior: EnemyBehavior,
        pos: Vec2,
        tuning: EnemyTuning,
    ) -> Self {
        let body = world.create_body(BodyDef::new(
            BodyKind::Dynamic,
            pos,
            Shape::circle(ENEMY_RADIUS),
            EntityTag::enemy(id),
        ));
        let bullet = Projectile::bullet(world, Provenance::EnemyShot, id, pos);
        Self {
            actor: Actor::new(body, bullet, 1),
            id,
            behavior,
            direction_sign: 1.0,
            change_timer: 0.0,
            reload_timer: 0.0,
            tuning,
        }
    }

    pub fn is_alive(&self) -> bool {
        self.actor.is_alive()
    }

    pub fn position(&self, world: &PhysicsWorld) -> Vec2 {
        self.actor.position(world)
    }

    /// Per-frame behaviour: cling, patrol, shoot. Returns true if a shot was fired.
    pub fn update(
        &mut self,
        world: &mut PhysicsWorld,
        gravity: Vec2,
        player_pos: Vec2,
        fps_scale: f32,
    ) -> bool {
        if !self.actor.is_alive() {
            return false;
        }
        self.actor.poll_projectile(world);

        // Frame-rate independent patrol timer
        self.change_timer += fps_scale;
        if self.change_timer >= self.tuning.change_at as f32 {
            self.change_timer = 0.0;
            self.direction_sign = -self.direction_sign;
        }

        // Net acceleration: full gravity strength into the wall, none along it
        let mass = world.mass(self.actor.body);
        let wall = self.behavior.wall_direction();
        let cling = wall * gravity.length() - gravity;
        world.apply_force_to_center(self.actor.body, cling * mass);

        let tangent = Vec2::new(-wall.y, wall.x);
        let v = self.actor.velocity(world);
        let walk = tangent * self.tuning.speed * fps_scale * self.direction_sign;
        world.set_linear_velocity(self.actor.body, walk + wall * v.dot(wall));

        if self.reload_timer > 0.0 {
            self.reload_timer -= fps_scale;
            return false;
        }

        let pos = self.actor.position(world);
        let to_player = player_pos - pos;
        if !self.actor.can_fire_again || to_player.length() > self.tuning.max_shoot_length {
            return false;
        }
        self.actor.aim = to_player.normalize_or_zero();
        let fired = self.actor.fire(world, self.tuning.bullet_speed);
        if fired {
            self.reload_timer = self.tuning.reload_frames as f32;
        }
        fired
    }

    /// Take the enemy out of play (bodies stay allocated until teardown)
    ///
    /// A shot still in flight goes back to the pool with its owner.
    pub fn kill(&mut self, world: &mut PhysicsWorld) {
        self.actor.set_health(0);
        self.actor.alive = false;
        world.set_active(self.actor.body, false);
        self.actor.projectile.reset(world);
        self.actor.can_fire_again = true;
    }

    /// Remove both bodies from the world
    pub fn destroy(self, world: &mut PhysicsWorld) {
        world.destroy_body(self.actor.body);
        self.actor.projectile.destroy(world);
    }
}

//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed physics step only
//! - Seeded RNG only (autopilot)
//! - Stable iteration order (by body slot and roster index)
//! - No rendering or platform dependencies

pub mod actor;
pub mod arena;
pub mod camera;
pub mod collision;
pub mod entity;
pub mod projectile;
pub mod state;
pub mod tick;

pub use actor::{Actor, Enemy, EnemyBehavior, EnemyTuning, Player, remap_stick};
pub use arena::{Arena, BUILTIN_LEVELS, Difficulty, LevelGrid, LevelPack, TileCell};
pub use camera::{Cardinal, GravityCamera};
pub use collision::{Outcome, resolve};
pub use entity::{EntityTag, PLAYER_ID, PhysicsWorld, Provenance, Role};
pub use projectile::{Projectile, ProjectileKind};
pub use state::{GameEvent, GamePhase, GameState, Shooter};
pub use tick::{TickInput, tick};

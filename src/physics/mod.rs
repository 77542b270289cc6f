//! Rigid-body physics
//!
//! Game-facing wrapper around `rapier2d`:
//! - Static and dynamic bodies with one box or circle collider each
//! - Forces, impulses, per-body gravity scale, sensors
//! - Fixed-step solve with velocity/position iteration counts
//! - Touching-contact list rebuilt after every step
//!
//! Bodies carry an opaque user-data value (`T`) so gameplay code can map a
//! contact back to the entity that owns each body.

pub mod body;
pub mod world;

pub use body::{BodyDef, BodyHandle, BodyKind, Shape};
pub use world::{Contact, World};

//! Entity tags stored in physics user data
//!
//! Every body carries an [`EntityTag`] by value. Collision resolution reads the
//! tag back from a contact to learn what touched what, and uses the `owner` id
//! to find the actor in the arena roster.

use serde::{Deserialize, Serialize};

use crate::physics::World;

/// Collision role of a game entity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Role {
    /// Unclassified body; contacts involving it are ignored
    #[default]
    None,
    Player,
    Enemy,
    Projectile,
    StaticTile,
}

/// Who fired a projectile (and therefore who it can hurt)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Provenance {
    #[default]
    Inert,
    PlayerShot,
    EnemyShot,
    /// Area blast from a detonated player shot; hurts everyone
    Blast,
}

/// Owner id used by the player and its projectiles
pub const PLAYER_ID: u32 = u32::MAX;

/// Role, provenance and owner of a body
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct EntityTag {
    pub role: Role,
    pub provenance: Provenance,
    /// Roster index for enemies and their shots, [`PLAYER_ID`] for the player
    pub owner: u32,
}

impl EntityTag {
    pub fn player() -> Self {
        Self {
            role: Role::Player,
            provenance: Provenance::Inert,
            owner: PLAYER_ID,
        }
    }

    pub fn enemy(index: u32) -> Self {
        Self {
            role: Role::Enemy,
            provenance: Provenance::Inert,
            owner: index,
        }
    }

    pub fn projectile(provenance: Provenance, owner: u32) -> Self {
        Self {
            role: Role::Projectile,
            provenance,
            owner,
        }
    }

    pub fn tile() -> Self {
        Self {
            role: Role::StaticTile,
            provenance: Provenance::Inert,
            owner: 0,
        }
    }

    pub fn is_blast(&self) -> bool {
        self.role == Role::Projectile && self.provenance == Provenance::Blast
    }
}

/// The physics world used by the game
pub type PhysicsWorld = World<EntityTag>;

//! Contact resolution
//!
//! After every physics step the touching pairs are classified by role and
//! projectile provenance, and the matching gameplay rule is applied:
//!
//! | Pair                   | Provenance          | Effect                                  |
//! |------------------------|---------------------|-----------------------------------------|
//! | Player + Projectile    | EnemyShot, Blast    | player loses 1 health, shot removed     |
//! | Player + Projectile    | PlayerShot          | shot removed                            |
//! | Enemy + Projectile     | PlayerShot          | enemy killed, shot removed              |
//! | Enemy + Projectile     | Blast               | enemy killed                            |
//! | Enemy + Projectile     | EnemyShot           | shot removed                            |
//! | Projectile + Tile      | anything but Blast  | shot removed                            |
//! | Projectile + Projectile| exactly one Blast   | the other one removed                   |
//!
//! Resolution never tears anything down. A death or a cleared level is
//! reported through [`Outcome`] and handled by the caller once the pass is
//! over.

use super::actor::Player;
use super::arena::Arena;
use super::entity::{EntityTag, PhysicsWorld, Provenance, Role};
use super::state::GameEvent;
use crate::physics::BodyHandle;

/// What the scene loop has to do after resolution
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Outcome {
    #[default]
    Continue,
    /// Player health reached zero
    PlayerDied,
    /// Last enemy of the level was destroyed
    LevelCleared,
}

/// One side of a contact
#[derive(Debug, Clone, Copy)]
struct Participant {
    body: BodyHandle,
    tag: EntityTag,
}

/// Roles found in a touching pair
#[derive(Debug, Default)]
struct Pair {
    player: Option<Participant>,
    enemy: Option<Participant>,
    first_projectile: Option<Participant>,
    second_projectile: Option<Participant>,
    tile: bool,
}

impl Pair {
    /// Sort the two bodies by role; `None` if either is unclassified
    fn classify(a: Participant, b: Participant) -> Option<Self> {
        let mut pair = Pair::default();
        for p in [a, b] {
            match p.tag.role {
                Role::None => return None,
                Role::Player => pair.player = Some(p),
                Role::Enemy => pair.enemy = Some(p),
                Role::StaticTile => pair.tile = true,
                Role::Projectile => {
                    if pair.first_projectile.is_none() {
                        pair.first_projectile = Some(p);
                    } else {
                        pair.second_projectile = Some(p);
                    }
                }
            }
        }
        Some(pair)
    }
}

/// Resolve the contacts reported by the last physics step
pub fn resolve(
    world: &mut PhysicsWorld,
    player: &mut Player,
    arena: &mut Arena,
    events: &mut Vec<GameEvent>,
) -> Outcome {
    // Rules deactivate bodies, so work from a snapshot of the pair list
    let pairs: Vec<(BodyHandle, BodyHandle)> =
        world.contacts().iter().map(|c| (c.a, c.b)).collect();
    resolve_pairs(&pairs, world, player, arena, events)
}

/// Resolve an explicit list of touching pairs
pub fn resolve_pairs(
    pairs: &[(BodyHandle, BodyHandle)],
    world: &mut PhysicsWorld,
    player: &mut Player,
    arena: &mut Arena,
    events: &mut Vec<GameEvent>,
) -> Outcome {
    for &(a, b) in pairs {
        // A body switched off earlier in this pass takes no further part
        if !world.is_active(a) || !world.is_active(b) {
            continue;
        }
        let (Some(&tag_a), Some(&tag_b)) = (world.user_data(a), world.user_data(b)) else {
            continue;
        };
        let Some(pair) = Pair::classify(
            Participant { body: a, tag: tag_a },
            Participant { body: b, tag: tag_b },
        ) else {
            continue;
        };

        let outcome = apply_rules(&pair, world, player, arena, events);
        if outcome != Outcome::Continue {
            return outcome;
        }
    }
    Outcome::Continue
}

fn apply_rules(
    pair: &Pair,
    world: &mut PhysicsWorld,
    player: &mut Player,
    arena: &mut Arena,
    events: &mut Vec<GameEvent>,
) -> Outcome {
    match (pair.player, pair.enemy, pair.first_projectile, pair.second_projectile) {
        (Some(_), _, Some(shot), _) => player_hit(shot, world, player, events),
        (None, Some(enemy), Some(shot), _) => enemy_hit(enemy, shot, world, arena, events),
        (None, None, Some(shot), None) if pair.tile => {
            if shot.tag.provenance != Provenance::Blast {
                log::debug!("{:?} hit a wall", shot.tag.provenance);
                deactivate(world, shot.body);
            }
            Outcome::Continue
        }
        (None, None, Some(first), Some(second)) => {
            match (first.tag.is_blast(), second.tag.is_blast()) {
                (true, false) => deactivate(world, second.body),
                (false, true) => deactivate(world, first.body),
                _ => {}
            }
            Outcome::Continue
        }
        _ => Outcome::Continue,
    }
}

fn player_hit(
    shot: Participant,
    world: &mut PhysicsWorld,
    player: &mut Player,
    events: &mut Vec<GameEvent>,
) -> Outcome {
    match shot.tag.provenance {
        Provenance::EnemyShot | Provenance::Blast => {
            deactivate(world, shot.body);
            let health = player.actor.damage(1);
            log::debug!(
                "Player hit by {:?}, health now {}",
                shot.tag.provenance,
                health
            );
            events.push(GameEvent::PlayerHit { health });
            if health == 0 {
                events.push(GameEvent::PlayerDied);
                return Outcome::PlayerDied;
            }
        }
        Provenance::PlayerShot => deactivate(world, shot.body),
        Provenance::Inert => {}
    }
    Outcome::Continue
}

fn enemy_hit(
    enemy: Participant,
    shot: Participant,
    world: &mut PhysicsWorld,
    arena: &mut Arena,
    events: &mut Vec<GameEvent>,
) -> Outcome {
    match shot.tag.provenance {
        Provenance::PlayerShot | Provenance::Blast => {
            if shot.tag.provenance == Provenance::PlayerShot {
                deactivate(world, shot.body);
            }
            let Some(enemies_left) = arena.kill_enemy(world, enemy.tag.owner) else {
                log::warn!("Contact with unknown enemy {}", enemy.tag.owner);
                return Outcome::Continue;
            };
            log::debug!(
                "Enemy {} destroyed by {:?}, {} left",
                enemy.tag.owner,
                shot.tag.provenance,
                enemies_left
            );
            events.push(GameEvent::EnemyDestroyed { enemies_left });
            if enemies_left == 0 {
                return Outcome::LevelCleared;
            }
        }
        Provenance::EnemyShot => deactivate(world, shot.body),
        Provenance::Inert => {}
    }
    Outcome::Continue
}

/// Return a projectile body to its pool
fn deactivate(world: &mut PhysicsWorld, body: BodyHandle) {
    world.set_active(body, false);
    world.set_linear_velocity(body, glam::Vec2::ZERO);
}

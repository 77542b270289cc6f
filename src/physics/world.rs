//! Physics world: a thin wrapper over a rapier pipeline
//!
//! Keeps every rapier set the pipeline needs, maps glam vectors in and out,
//! and after each step snapshots the touching pairs (solid contacts and
//! sensor overlaps) between enabled bodies.

use std::collections::HashMap;
use std::fmt;
use std::num::NonZeroUsize;

use glam::Vec2;
use rapier2d::prelude::*;

use super::body::{BodyDef, BodyHandle};

/// A touching pair reported after a step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Contact {
    pub a: BodyHandle,
    pub b: BodyHandle,
    /// At least one side is a sensor (overlap only, no contact response)
    pub sensor: bool,
}

/// Per-body data rapier does not keep for us
#[derive(Debug, Clone)]
struct BodyInfo<T> {
    mass: f32,
    user_data: T,
}

fn to_vector(v: Vec2) -> Vector<Real> {
    vector![v.x, v.y]
}

fn to_vec2(v: &Vector<Real>) -> Vec2 {
    Vec2::new(v.x, v.y)
}

/// Rigid-body world with per-body user data of type `T`
pub struct World<T> {
    gravity: Vec2,
    params: IntegrationParameters,
    pipeline: PhysicsPipeline,
    islands: IslandManager,
    broad_phase: DefaultBroadPhase,
    narrow_phase: NarrowPhase,
    bodies: RigidBodySet,
    colliders: ColliderSet,
    impulse_joints: ImpulseJointSet,
    multibody_joints: MultibodyJointSet,
    ccd_solver: CCDSolver,
    info: HashMap<BodyHandle, BodyInfo<T>>,
    contacts: Vec<Contact>,
}

impl<T: Clone> Clone for World<T> {
    fn clone(&self) -> Self {
        Self {
            gravity: self.gravity,
            params: self.params,
            // Pipeline and CCD solver only hold scratch buffers
            pipeline: PhysicsPipeline::new(),
            islands: self.islands.clone(),
            broad_phase: self.broad_phase.clone(),
            narrow_phase: self.narrow_phase.clone(),
            bodies: self.bodies.clone(),
            colliders: self.colliders.clone(),
            impulse_joints: self.impulse_joints.clone(),
            multibody_joints: self.multibody_joints.clone(),
            ccd_solver: CCDSolver::new(),
            info: self.info.clone(),
            contacts: self.contacts.clone(),
        }
    }
}

impl<T> fmt::Debug for World<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("World")
            .field("gravity", &self.gravity)
            .field("bodies", &self.bodies.len())
            .field("contacts", &self.contacts.len())
            .finish()
    }
}

impl<T> World<T> {
    pub fn new(gravity: Vec2) -> Self {
        Self {
            gravity,
            params: IntegrationParameters::default(),
            pipeline: PhysicsPipeline::new(),
            islands: IslandManager::new(),
            broad_phase: DefaultBroadPhase::new(),
            narrow_phase: NarrowPhase::new(),
            bodies: RigidBodySet::new(),
            colliders: ColliderSet::new(),
            impulse_joints: ImpulseJointSet::new(),
            multibody_joints: MultibodyJointSet::new(),
            ccd_solver: CCDSolver::new(),
            info: HashMap::new(),
            contacts: Vec::new(),
        }
    }

    pub fn gravity(&self) -> Vec2 {
        self.gravity
    }

    pub fn set_gravity(&mut self, gravity: Vec2) {
        self.gravity = gravity;
    }

    /// Create a body with its single collider
    pub fn create_body(&mut self, def: BodyDef<T>) -> BodyHandle {
        let handle = self.bodies.insert(def.rigid_body());
        self.colliders
            .insert_with_parent(def.collider(), handle, &mut self.bodies);
        self.info.insert(
            handle,
            BodyInfo {
                mass: def.mass(),
                user_data: def.user_data,
            },
        );
        handle
    }

    /// Destroy a body and its collider. Returns false if the handle was already stale.
    pub fn destroy_body(&mut self, handle: BodyHandle) -> bool {
        let removed = self.bodies.remove(
            handle,
            &mut self.islands,
            &mut self.colliders,
            &mut self.impulse_joints,
            &mut self.multibody_joints,
            true,
        );
        if removed.is_none() {
            return false;
        }
        self.info.remove(&handle);
        self.contacts.retain(|c| c.a != handle && c.b != handle);
        true
    }

    pub fn contains(&self, handle: BodyHandle) -> bool {
        self.bodies.contains(handle)
    }

    /// Number of live bodies
    pub fn body_count(&self) -> usize {
        self.bodies.len()
    }

    pub fn user_data(&self, handle: BodyHandle) -> Option<&T> {
        self.info.get(&handle).map(|i| &i.user_data)
    }

    pub fn position(&self, handle: BodyHandle) -> Option<Vec2> {
        self.bodies.get(handle).map(|b| to_vec2(b.translation()))
    }

    /// Teleport a body (velocity is kept)
    pub fn set_position(&mut self, handle: BodyHandle, position: Vec2) {
        if let Some(body) = self.bodies.get_mut(handle) {
            body.set_translation(to_vector(position), true);
        }
    }

    pub fn linear_velocity(&self, handle: BodyHandle) -> Option<Vec2> {
        self.bodies.get(handle).map(|b| to_vec2(b.linvel()))
    }

    pub fn set_linear_velocity(&mut self, handle: BodyHandle, velocity: Vec2) {
        if let Some(body) = self.bodies.get_mut(handle) {
            if body.is_dynamic() {
                body.set_linvel(to_vector(velocity), true);
            }
        }
    }

    /// Mass from the body definition (zero for static bodies)
    pub fn mass(&self, handle: BodyHandle) -> f32 {
        self.info.get(&handle).map_or(0.0, |i| i.mass)
    }

    pub fn is_active(&self, handle: BodyHandle) -> bool {
        self.bodies.get(handle).is_some_and(|b| b.is_enabled())
    }

    /// Toggle simulation of a body. Deactivating drops its current contacts.
    pub fn set_active(&mut self, handle: BodyHandle, active: bool) {
        let Some(body) = self.bodies.get_mut(handle) else {
            return;
        };
        body.set_enabled(active);
        if active {
            body.wake_up(true);
        } else {
            body.reset_forces(false);
            self.contacts.retain(|c| c.a != handle && c.b != handle);
        }
    }

    pub fn is_awake(&self, handle: BodyHandle) -> bool {
        self.bodies.get(handle).is_some_and(|b| !b.is_sleeping())
    }

    pub fn set_awake(&mut self, handle: BodyHandle, awake: bool) {
        if let Some(body) = self.bodies.get_mut(handle) {
            if awake {
                body.wake_up(true);
            } else {
                body.sleep();
            }
        }
    }

    /// Accumulate a force applied at the centre of mass until the next step
    pub fn apply_force_to_center(&mut self, handle: BodyHandle, force: Vec2) {
        if let Some(body) = self.bodies.get_mut(handle) {
            if body.is_dynamic() {
                body.add_force(to_vector(force), true);
            }
        }
    }

    /// Instantaneous change of momentum at the centre of mass
    pub fn apply_linear_impulse(&mut self, handle: BodyHandle, impulse: Vec2) {
        let mass = self.mass(handle);
        if mass <= 0.0 {
            return;
        }
        if let Some(body) = self.bodies.get_mut(handle) {
            let velocity = to_vec2(body.linvel()) + impulse / mass;
            body.set_linvel(to_vector(velocity), true);
        }
    }

    /// Touching pairs found by the most recent step
    pub fn contacts(&self) -> &[Contact] {
        &self.contacts
    }

    /// Advance the simulation by one fixed step
    pub fn step(&mut self, dt: f32, velocity_iterations: u32, position_iterations: u32) {
        self.params.dt = dt;
        self.params.num_solver_iterations =
            NonZeroUsize::new(velocity_iterations as usize).unwrap_or(NonZeroUsize::MIN);
        self.params.num_internal_stabilization_iterations = position_iterations as usize;

        let gravity = to_vector(self.gravity);
        self.pipeline.step(
            &gravity,
            &self.params,
            &mut self.islands,
            &mut self.broad_phase,
            &mut self.narrow_phase,
            &mut self.bodies,
            &mut self.colliders,
            &mut self.impulse_joints,
            &mut self.multibody_joints,
            &mut self.ccd_solver,
            None,
            &(),
            &(),
        );

        // Applied forces last for a single step
        for (_, body) in self.bodies.iter_mut() {
            body.reset_forces(false);
        }

        self.contacts = self.touching_pairs();
    }

    fn touching_pairs(&self) -> Vec<Contact> {
        let solid = self
            .narrow_phase
            .contact_pairs()
            .filter(|pair| pair.has_any_active_contact)
            .map(|pair| (pair.collider1, pair.collider2, false));
        let sensors = self
            .narrow_phase
            .intersection_pairs()
            .filter(|&(_, _, touching)| touching)
            .map(|(c1, c2, _)| (c1, c2, true));

        solid
            .chain(sensors)
            .filter_map(|(c1, c2, sensor)| self.contact_between(c1, c2, sensor))
            .collect()
    }

    fn contact_between(
        &self,
        c1: ColliderHandle,
        c2: ColliderHandle,
        sensor: bool,
    ) -> Option<Contact> {
        let a = self.colliders.get(c1)?.parent()?;
        let b = self.colliders.get(c2)?.parent()?;
        if !self.is_active(a) || !self.is_active(b) {
            return None;
        }
        Some(Contact { a, b, sensor })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::physics::{BodyKind, Shape};

    const DT: f32 = 1.0 / 60.0;

    fn world() -> World<u32> {
        World::new(Vec2::new(0.0, -9.81))
    }

    fn ground(world: &mut World<u32>) -> BodyHandle {
        world.create_body(BodyDef::new(
            BodyKind::Static,
            Vec2::ZERO,
            Shape::square(2.0),
            1,
        ))
    }

    fn touching(world: &World<u32>, x: BodyHandle, y: BodyHandle) -> bool {
        world
            .contacts()
            .iter()
            .any(|c| (c.a == x && c.b == y) || (c.a == y && c.b == x))
    }

    #[test]
    fn test_box_falls_and_rests_on_ground() {
        let mut world = world();
        let floor = ground(&mut world);
        let crate_box = world.create_body(
            BodyDef::new(BodyKind::Dynamic, Vec2::new(0.0, 4.0), Shape::square(0.5), 2)
                .fixed_rotation(),
        );

        for _ in 0..240 {
            world.step(DT, 6, 2);
        }

        let pos = world.position(crate_box).unwrap();
        // Resting on the top face (y = 2) with a half-height of 0.5
        assert!((pos.y - 2.5).abs() < 0.05, "resting at {}", pos.y);
        assert!(world.linear_velocity(crate_box).unwrap().y.abs() < 0.5);
        assert!(touching(&world, floor, crate_box));
        assert_eq!(world.user_data(crate_box), Some(&2));
    }

    #[test]
    fn test_inactive_body_is_frozen_and_reports_no_contacts() {
        let mut world = world();
        ground(&mut world);
        let body = world.create_body(
            BodyDef::new(BodyKind::Dynamic, Vec2::new(0.0, 2.4), Shape::square(0.5), 2)
                .inactive(),
        );

        for _ in 0..10 {
            world.step(DT, 6, 2);
        }

        assert_eq!(world.position(body), Some(Vec2::new(0.0, 2.4)));
        assert!(!world.is_active(body));
        assert!(world.contacts().is_empty());
    }

    #[test]
    fn test_deactivating_drops_contacts() {
        let mut world = world();
        ground(&mut world);
        let body = world.create_body(BodyDef::new(
            BodyKind::Dynamic,
            Vec2::new(0.0, 2.4),
            Shape::square(0.5),
            2,
        ));
        world.step(DT, 6, 2);
        assert!(!world.contacts().is_empty());

        world.set_active(body, false);
        assert!(world.contacts().is_empty());
        world.step(DT, 6, 2);
        assert!(world.contacts().is_empty());
    }

    #[test]
    fn test_impulse_changes_velocity_by_inverse_mass() {
        let mut world: World<u32> = World::new(Vec2::ZERO);
        let body = world.create_body(
            BodyDef::new(BodyKind::Dynamic, Vec2::ZERO, Shape::square(0.5), 0).with_density(2.0),
        );
        // mass = 1 * 2
        assert!((world.mass(body) - 2.0).abs() < 1e-6);
        world.apply_linear_impulse(body, Vec2::new(4.0, 0.0));
        assert_eq!(world.linear_velocity(body), Some(Vec2::new(2.0, 0.0)));
    }

    #[test]
    fn test_force_is_consumed_by_step() {
        let mut world: World<u32> = World::new(Vec2::ZERO);
        let body = world.create_body(BodyDef::new(
            BodyKind::Dynamic,
            Vec2::ZERO,
            Shape::square(0.5),
            0,
        ));
        world.apply_force_to_center(body, Vec2::new(60.0, 0.0));
        world.step(DT, 6, 2);
        let v = world.linear_velocity(body).unwrap();
        assert!((v.x - 1.0).abs() < 1e-3, "velocity after push {}", v.x);

        world.step(DT, 6, 2);
        let v2 = world.linear_velocity(body).unwrap();
        assert!((v2.x - v.x).abs() < 1e-5);
    }

    #[test]
    fn test_gravity_scale_zero_floats() {
        let mut world = world();
        let body = world.create_body(
            BodyDef::new(BodyKind::Dynamic, Vec2::new(0.0, 10.0), Shape::square(0.5), 0)
                .with_gravity_scale(0.0),
        );
        world.step(DT, 6, 2);
        let pos = world.position(body).unwrap();
        assert!((pos - Vec2::new(0.0, 10.0)).length() < 1e-6);
    }

    #[test]
    fn test_gravity_change_applies_next_step() {
        let mut world = world();
        let body = world.create_body(BodyDef::new(
            BodyKind::Dynamic,
            Vec2::ZERO,
            Shape::square(0.5),
            0,
        ));
        world.set_gravity(Vec2::new(-9.81, 0.0));
        world.step(DT, 6, 2);
        let v = world.linear_velocity(body).unwrap();
        assert!(v.x < 0.0);
        assert!(v.y.abs() < 1e-6);
    }

    #[test]
    fn test_sensor_reports_contact_without_pushing() {
        let mut world: World<u32> = World::new(Vec2::ZERO);
        let wall = ground(&mut world);
        let blast = world.create_body(
            BodyDef::new(BodyKind::Dynamic, Vec2::new(1.0, 0.0), Shape::square(1.5), 2)
                .with_gravity_scale(0.0)
                .sensor(),
        );
        world.step(DT, 6, 2);
        let pos = world.position(blast).unwrap();
        assert!((pos - Vec2::new(1.0, 0.0)).length() < 1e-6);
        assert_eq!(world.contacts().len(), 1);
        assert!(world.contacts()[0].sensor);
        assert!(touching(&world, wall, blast));
    }

    #[test]
    fn test_destroyed_handle_goes_stale() {
        let mut world = world();
        let first = ground(&mut world);
        assert!(world.destroy_body(first));
        assert!(!world.contains(first));
        assert!(!world.destroy_body(first));
        assert_eq!(world.user_data(first), None);

        let second = ground(&mut world);
        assert_ne!(second, first);
        assert_eq!(world.body_count(), 1);
    }

    #[test]
    fn test_clone_steps_identically() {
        let mut world = world();
        ground(&mut world);
        let body = world.create_body(BodyDef::new(
            BodyKind::Dynamic,
            Vec2::new(0.3, 5.0),
            Shape::circle(0.5),
            2,
        ));
        let mut copy = world.clone();
        for _ in 0..90 {
            world.step(DT, 6, 2);
            copy.step(DT, 6, 2);
        }
        assert_eq!(world.position(body), copy.position(body));
        assert_eq!(world.contacts(), copy.contacts());
    }

    #[test]
    fn test_awake_toggle() {
        let mut world = world();
        let body = world.create_body(BodyDef::new(
            BodyKind::Dynamic,
            Vec2::ZERO,
            Shape::square(0.5),
            0,
        ));
        assert!(world.is_awake(body));
        world.set_awake(body, false);
        assert!(!world.is_awake(body));
        world.set_awake(body, true);
        assert!(world.is_awake(body));
    }
}

//! Property tests for the camera, actors and arena loader

use glam::Vec2;
use proptest::prelude::*;

use grav_tank::consts::*;
use grav_tank::physics::World;
use grav_tank::sim::actor::stick_for;
use grav_tank::sim::arena::count_spawns;
use grav_tank::sim::{
    Cardinal, Difficulty, EntityTag, GravityCamera, LevelGrid, PhysicsWorld, Player, remap_stick,
};

fn turn() -> impl Strategy<Value = i32> {
    prop_oneof![Just(1), Just(-1)]
}

fn grid() -> impl Strategy<Value = LevelGrid> {
    prop::array::uniform15(prop::array::uniform15(0u8..16))
}

proptest! {
    #[test]
    fn camera_quarter_turns_land_exactly(turns in prop::collection::vec(turn(), 1..12)) {
        let mut camera = GravityCamera::new();
        let mut expected = Cardinal::Up;

        for dir in turns {
            camera.begin_rotation(dir);
            expected = expected.turned(dir);

            let mut frames = 0;
            while !camera.has_reached_target() {
                camera.rotate_step(dir);
                frames += 1;
                prop_assert!(frames <= 40);
            }
            prop_assert!(camera.check_target_reached());
            camera.set_rotating(false);

            prop_assert_eq!(camera.current_target(), expected);
            prop_assert_eq!(camera.up(), expected.up_vector());
            let up = camera.up();
            prop_assert_eq!(camera.right(), Vec2::new(up.y, -up.x));
        }
    }

    #[test]
    fn camera_reversals_keep_up_unit_length(
        first in turn(),
        legs in prop::collection::vec(0usize..25, 1..8),
    ) {
        let mut camera = GravityCamera::new();
        let mut dir = first;
        camera.begin_rotation(dir);

        for steps in legs {
            for _ in 0..steps {
                if camera.has_reached_target() {
                    break;
                }
                camera.rotate_step(dir);

                let up = camera.up();
                let target = camera.target_up().unwrap();
                if up.x != target.x && up.y != target.y {
                    prop_assert!((up.length() - 1.0).abs() < 1e-4);
                }
                prop_assert!((camera.gravity(GRAVITY).length() - GRAVITY).abs() < 1e-3);
            }
            dir = -dir;
            camera.change_target(dir);
        }

        let mut frames = 0;
        while !camera.has_reached_target() {
            camera.rotate_step(dir);
            frames += 1;
            prop_assert!(frames <= 40);
        }
        prop_assert_eq!(camera.up(), camera.current_target().up_vector());
    }

    #[test]
    fn camera_reset_from_any_state(
        turns in prop::collection::vec((turn(), 0usize..30), 0..6),
        paused in any::<bool>(),
    ) {
        let mut camera = GravityCamera::new();
        for (dir, steps) in turns {
            camera.begin_rotation(dir);
            for _ in 0..steps {
                camera.rotate_step(dir);
            }
        }
        camera.set_rotation_paused(paused);
        camera.reset();

        prop_assert_eq!(camera.up(), Vec2::new(0.0, 1.0));
        prop_assert_eq!(camera.right(), Vec2::new(1.0, 0.0));
        prop_assert_eq!(camera.current_target(), Cardinal::Up);
        prop_assert_eq!(camera.current_target().index(), 0);
        prop_assert!(!camera.is_rotating());
        prop_assert!(camera.target_up().is_none());
    }

    #[test]
    fn health_stays_in_range(
        max in 1i32..20,
        hits in prop::collection::vec(-3i32..5, 0..40),
        set_to in -50i32..50,
    ) {
        let mut world: PhysicsWorld = World::new(Vec2::ZERO);
        let mut player = Player::new(&mut world, Vec2::ZERO, max);
        for hit in hits {
            let left = player.actor.damage(hit);
            prop_assert!((0..=max).contains(&left));
        }
        player.actor.set_health(set_to);
        prop_assert!((0..=max).contains(&player.actor.health()));
    }

    #[test]
    fn harder_tiers_never_spawn_fewer_enemies(grid in grid()) {
        let easy = count_spawns(&grid, Difficulty::Easy);
        let normal = count_spawns(&grid, Difficulty::Normal);
        let hard = count_spawns(&grid, Difficulty::Hard);
        prop_assert!(easy <= normal);
        prop_assert!(normal <= hard);
    }

    #[test]
    fn aim_remap_round_trips(x in -1.0f32..1.0, y in -1.0f32..1.0, target in 0i32..4) {
        let up = Cardinal::from_index(target).up_vector();
        let dir = Vec2::new(x, y);
        prop_assert_eq!(remap_stick(stick_for(dir, up), up), dir);
        // Remapping preserves length
        prop_assert!((remap_stick(dir, up).length() - dir.length()).abs() < 1e-6);
    }

    #[test]
    fn enemy_tags_never_alias_the_player(index in 0u32..(MAX_ENEMIES as u32)) {
        prop_assert_ne!(EntityTag::enemy(index).owner, EntityTag::player().owner);
    }
}
